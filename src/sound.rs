//! Completion chime
//!
//! The chime is synthesized rather than shipped as an asset: a short sine
//! sweep from C5 to C6 with an exponentially decaying gain. It is written
//! to a temp file as 16-bit mono WAV and handed to the platform player:
//!   - macOS: afplay
//!   - Linux: paplay (PulseAudio/PipeWire), falling back to aplay (ALSA)

use std::f64::consts::TAU;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tempfile::TempPath;

pub const SAMPLE_RATE: u32 = 44_100;

const START_HZ: f64 = 523.25;
const END_HZ: f64 = 1046.5;
const SWEEP_SECS: f64 = 0.1;
const START_GAIN: f64 = 0.2;
const END_GAIN: f64 = 0.001;
const CHIME_SECS: f64 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("no audio player found in PATH")]
    NoPlayer,

    #[error("failed to write chime: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode chime: {0}")]
    Wav(#[from] hound::Error),

    #[error("failed to run {player}: {source}")]
    Spawn {
        player: String,
        source: std::io::Error,
    },

    #[error("{player} exited with {status}")]
    PlayerFailed { player: String, status: String },
}

/// Samples of the chime at [`SAMPLE_RATE`]
pub fn synthesize_chime() -> Vec<i16> {
    let rate = f64::from(SAMPLE_RATE);
    let total = (rate * CHIME_SECS) as usize;
    let mut phase = 0.0_f64;

    (0..total)
        .map(|n| {
            let t = n as f64 / rate;
            let sample = phase.sin() * gain_at(t);
            phase = (phase + TAU * frequency_at(t) / rate) % TAU;
            (sample * f64::from(i16::MAX)).round() as i16
        })
        .collect()
}

fn frequency_at(t: f64) -> f64 {
    if t >= SWEEP_SECS {
        END_HZ
    } else {
        START_HZ * (END_HZ / START_HZ).powf(t / SWEEP_SECS)
    }
}

fn gain_at(t: f64) -> f64 {
    START_GAIN * (END_GAIN / START_GAIN).powf((t / CHIME_SECS).min(1.0))
}

fn candidate_players() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["afplay"]
    } else {
        &["paplay", "aplay"]
    }
}

fn find_player() -> Option<String> {
    candidate_players()
        .iter()
        .find(|cmd| which::which(cmd).is_ok())
        .map(|cmd| cmd.to_string())
}

fn write_chime_file() -> Result<TempPath, SoundError> {
    let path = tempfile::Builder::new()
        .prefix("pomofocus-chime-")
        .suffix(".wav")
        .tempfile()?
        .into_temp_path();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)?;
    for sample in synthesize_chime() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(path)
}

fn run_player(player: &str, path: &Path) -> Result<(), SoundError> {
    let output = Command::new(player)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| SoundError::Spawn {
            player: player.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!("{} stderr: {}", player, stderr.trim());
        Err(SoundError::PlayerFailed {
            player: player.to_string(),
            status: output.status.to_string(),
        })
    }
}

/// Play the chime (fire-and-forget, non-blocking).
///
/// Errors that can be detected up front (sound unavailable, temp file) are
/// returned; player failures on the background thread are only logged.
pub fn play_chime(config: &SoundConfig) -> Result<(), SoundError> {
    if !config.enabled {
        return Ok(());
    }

    let player = find_player().ok_or(SoundError::NoPlayer)?;
    let path = write_chime_file()?;

    std::thread::spawn(move || {
        if let Err(e) = run_player(&player, &path) {
            tracing::warn!("Failed to play chime: {}", e);
        }
        drop(path);
    });
    Ok(())
}

/// Play the chime and wait for the player to finish
pub fn play_chime_blocking(config: &SoundConfig) -> Result<(), SoundError> {
    if !config.enabled {
        return Ok(());
    }

    let player = find_player().ok_or(SoundError::NoPlayer)?;
    let path = write_chime_file()?;
    run_player(&player, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_config_default_enabled() {
        assert!(SoundConfig::default().enabled);
    }

    #[test]
    fn test_sound_config_deserialize_empty() {
        let config: SoundConfig = toml::from_str("").unwrap();
        assert!(config.enabled);
    }

    #[test]
    fn test_chime_length() {
        let samples = synthesize_chime();
        assert_eq!(samples.len(), (SAMPLE_RATE * 2) as usize);
    }

    #[test]
    fn test_chime_decays() {
        let samples = synthesize_chime();
        let peak = |range: std::ops::Range<usize>| {
            samples[range]
                .iter()
                .map(|s| i32::from(*s).abs())
                .max()
                .unwrap_or(0)
        };
        let head = peak(0..4410);
        let tail = peak(samples.len() - 4410..samples.len());
        assert!(head > 4000, "head peak {head}");
        assert!(tail < head / 20, "tail peak {tail} vs head {head}");
    }

    #[test]
    fn test_frequency_sweeps_up_an_octave() {
        assert!((frequency_at(0.0) - START_HZ).abs() < 1e-9);
        assert!(frequency_at(0.05) > START_HZ);
        assert!(frequency_at(0.05) < END_HZ);
        assert!((frequency_at(0.1) - END_HZ).abs() < 1e-9);
        assert!((frequency_at(1.5) - END_HZ).abs() < 1e-9);
    }

    #[test]
    fn test_gain_envelope_bounds() {
        assert!((gain_at(0.0) - START_GAIN).abs() < 1e-12);
        assert!((gain_at(CHIME_SECS) - END_GAIN).abs() < 1e-12);
        assert!(gain_at(1.0) < START_GAIN);
    }

    #[test]
    fn test_disabled_chime_is_noop() {
        let config = SoundConfig { enabled: false };
        assert!(play_chime(&config).is_ok());
        assert!(play_chime_blocking(&config).is_ok());
    }

    #[test]
    fn test_write_chime_file_is_valid_wav() {
        let path = write_chime_file().unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + (SAMPLE_RATE as usize * 2) * 2);

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let written: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(written, synthesize_chime());
    }

    #[test]
    fn test_missing_player_reports_spawn_error() {
        let path = write_chime_file().unwrap();
        let err = run_player("pomofocus-no-such-player", &path).unwrap_err();
        assert!(matches!(err, SoundError::Spawn { .. }));
        assert!(err.to_string().starts_with("failed to run pomofocus-no-such-player"));
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_find_player_skips_non_executable_files() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let player = candidate_players()[0];
        let file = temp.path().join(player);
        std::fs::write(&file, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();

        let saved_path = std::env::var_os("PATH");
        std::env::set_var("PATH", temp.path());
        let without_exec = find_player();

        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o755)).unwrap();
        let with_exec = find_player();

        match saved_path {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        assert_eq!(without_exec, None);
        assert_eq!(with_exec.as_deref(), Some(player));
    }
}
