use std::path::{Path, PathBuf};

use clap::ValueEnum;
use color_eyre::eyre::{WrapErr, eyre};
use cube_core::Face;
use log::{debug, info};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "cube-notation";
const CONFIG_FILE: &str = "config.toml";

/// Settings shared by every subcommand. Command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Side length of the cube
    pub size: usize,
    /// The face that is turned to the front before any moves are applied
    pub focus: Face,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: 3,
            focus: Face::Front,
        }
    }
}

/// A face as named on the command line
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FaceArg {
    #[value(alias = "l")]
    Left,
    #[value(alias = "f")]
    Front,
    #[value(alias = "r")]
    Right,
    #[value(alias = "b")]
    Back,
    #[value(aliases = ["u", "up"])]
    Top,
    #[value(aliases = ["d", "down"])]
    Bottom,
}

impl From<FaceArg> for Face {
    fn from(value: FaceArg) -> Self {
        match value {
            FaceArg::Left => Face::Left,
            FaceArg::Front => Face::Front,
            FaceArg::Right => Face::Right,
            FaceArg::Back => Face::Back,
            FaceArg::Top => Face::Top,
            FaceArg::Bottom => Face::Bottom,
        }
    }
}

impl FaceArg {
    /// Parse a face name or letter typed at the REPL
    pub fn parse(text: &str) -> color_eyre::Result<Face> {
        <FaceArg as ValueEnum>::from_str(text.trim(), true)
            .map(Face::from)
            .map_err(|err| eyre!("Unknown face `{}`: {err}", text.trim()))
    }
}

impl Config {
    /// Read the configuration from `path`, or from the user configuration
    /// directory if it has one, or fall back to the defaults.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Config> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    debug!("No configuration file, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let text = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read the configuration file {path:?}"))?;
        let config = Config::parse(&text)
            .wrap_err_with(|| format!("Failed to parse the configuration file {path:?}"))?;

        info!("Loaded {config:?} from {path:?}");

        Ok(config)
    }

    pub fn parse(text: &str) -> color_eyre::Result<Config> {
        let config = toml::from_str::<Config>(text)?;
        config.validated()
    }

    /// Apply command line overrides
    pub fn with_overrides(
        mut self,
        size: Option<usize>,
        focus: Option<FaceArg>,
    ) -> color_eyre::Result<Config> {
        if let Some(size) = size {
            self.size = size;
        }

        if let Some(focus) = focus {
            self.focus = focus.into();
        }

        self.validated()
    }

    fn validated(self) -> color_eyre::Result<Config> {
        if self.size < 2 {
            return Err(eyre!("The cube size must be at least 2 but got {}", self.size));
        }

        Ok(self)
    }
}

fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(
            Config::parse("focus = \"Top\"").unwrap(),
            Config {
                size: 3,
                focus: Face::Top
            }
        );
    }

    #[test]
    fn rejects_bad_files() {
        assert!(Config::parse("size = 1").is_err());
        assert!(Config::parse("focus = \"Middle\"").is_err());
        assert!(Config::parse("colour = 4").is_err());
    }

    #[test]
    fn flags_override_the_file() {
        let config = Config::parse("size = 5\nfocus = \"Back\"")
            .unwrap()
            .with_overrides(Some(4), None)
            .unwrap();

        assert_eq!(config.size, 4);
        assert_eq!(config.focus, Face::Back);

        assert!(Config::default().with_overrides(Some(0), None).is_err());
        assert_eq!(
            Config::default()
                .with_overrides(None, Some(FaceArg::Left))
                .unwrap()
                .focus,
            Face::Left
        );
    }

    #[test]
    fn faces_parse_by_name_or_letter() {
        assert_eq!(FaceArg::parse("top").unwrap(), Face::Top);
        assert_eq!(FaceArg::parse(" U ").unwrap(), Face::Top);
        assert_eq!(FaceArg::parse("Bottom").unwrap(), Face::Bottom);
        assert!(FaceArg::parse("middle").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        assert!(Config::load(Some(Path::new("/nonexistent/cube/config.toml"))).is_err());
    }
}
