//! `pomofocus chime` command implementation

use anyhow::Result;

use crate::config::Config;
use crate::sound::{self, SoundConfig};

pub fn run() -> Result<()> {
    let config = Config::load_or_default();
    if !config.sound.enabled {
        println!("Sound is disabled in config.toml ([sound] enabled = false); playing anyway.");
    }

    println!("🔔 Playing chime...");
    // Forced on: this command exists to test the audio path
    sound::play_chime_blocking(&SoundConfig { enabled: true })?;
    Ok(())
}
