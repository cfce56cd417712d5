use std::path::PathBuf;

use clap::Parser;

use crate::audio::oscillator::Parameters;
use crate::error::{Result, SineError};
use crate::utils::consts::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a sine tone through JACK", long_about = None)]
pub struct Cli {
    /// Tone frequency (Hz)
    #[arg(short, long, default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: f64,

    /// Linear volume, 0.0-1.0 nominal
    #[arg(short, long, default_value_t = DEFAULT_VOLUME)]
    pub volume: f64,

    /// Playback port to connect to, or 0 to leave the output unconnected
    #[arg(short, long)]
    pub target: Option<String>,

    /// Render to a WAV file instead of playing through JACK
    #[arg(long, value_name = "PATH")]
    pub render: Option<PathBuf>,

    /// Seconds to render with --render
    #[arg(short, long, default_value_t = DEFAULT_RENDER_SECONDS, requires = "render")]
    pub duration: f64,

    /// Frames requested per cycle with --render
    #[arg(long, default_value_t = DEFAULT_QUANTUM_FRAMES, requires = "render")]
    pub quantum: usize,
}

/// Where the output port gets connected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// First physical playback port
    Auto,
    /// A named port
    Port(String),
    /// Leave unconnected
    Disabled,
}

impl Target {
    fn from_arg(arg: Option<String>) -> Self {
        match arg {
            None => Target::Auto,
            Some(name) if name == TARGET_NONE => Target::Disabled,
            Some(name) => Target::Port(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub path: PathBuf,
    pub seconds: f64,
    pub quantum: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub params: Parameters,
    pub target: Target,
    pub render: Option<RenderOptions>,
}

impl Cli {
    /// Checks value domains clap cannot express.
    pub fn into_config(self) -> Result<Config> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(SineError::Config(format!(
                "frequency must be a positive number, got {}",
                self.frequency
            )));
        }
        if !self.volume.is_finite() {
            return Err(SineError::Config(format!(
                "volume must be a finite number, got {}",
                self.volume
            )));
        }

        let render = match self.render {
            Some(path) => {
                if !self.duration.is_finite() || self.duration <= 0.0 {
                    return Err(SineError::Config(format!(
                        "duration must be a positive number, got {}",
                        self.duration
                    )));
                }
                if self.quantum == 0 {
                    return Err(SineError::Config(
                        "quantum must be at least one frame".to_string(),
                    ));
                }
                Some(RenderOptions {
                    path,
                    seconds: self.duration,
                    quantum: self.quantum,
                })
            }
            None => None,
        };

        Ok(Config {
            params: Parameters {
                frequency: self.frequency,
                volume: self.volume,
            },
            target: Target::from_arg(self.target),
            render,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sine-rs").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap().into_config().unwrap();
        assert_eq!(config.params, Parameters::default());
        assert_eq!(config.target, Target::Auto);
        assert!(config.render.is_none());
    }

    #[test]
    fn short_and_long_flags() {
        let config = parse(&["-f", "440", "--volume", "0.25", "-t", "system:playback_2"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.params.frequency, 440.0);
        assert_eq!(config.params.volume, 0.25);
        assert_eq!(config.target, Target::Port("system:playback_2".into()));
    }

    #[test]
    fn zero_target_disables_autoconnect() {
        let config = parse(&["--target", "0"]).unwrap().into_config().unwrap();
        assert_eq!(config.target, Target::Disabled);
    }

    #[test]
    fn malformed_number_is_rejected() {
        assert!(parse(&["-f", "loud"]).is_err());
        assert!(parse(&["-v", ""]).is_err());
    }

    #[test]
    fn non_positive_frequency_is_rejected() {
        let err = parse(&["--frequency=-5"]).unwrap().into_config().unwrap_err();
        assert!(matches!(err, SineError::Config(_)));
        assert!(parse(&["-f", "NaN"]).unwrap().into_config().is_err());
    }

    #[test]
    fn volume_is_not_clamped() {
        let config = parse(&["-v", "3.5"]).unwrap().into_config().unwrap();
        assert_eq!(config.params.volume, 3.5);
        assert!(parse(&["-v", "inf"]).unwrap().into_config().is_err());
    }

    #[test]
    fn render_options() {
        let config = parse(&["--render", "out.wav", "-d", "0.5", "--quantum", "256"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(
            config.render,
            Some(RenderOptions {
                path: "out.wav".into(),
                seconds: 0.5,
                quantum: 256,
            })
        );
        assert!(parse(&["-d", "2"]).is_err());
        assert!(parse(&["--render", "x.wav", "--quantum", "0"])
            .unwrap()
            .into_config()
            .is_err());
    }
}
