use crate::persist::DEFAULT_MARKERS_FILE;
use egui::Vec2;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: canvas-markers [OPTIONS] [MARKERS_FILE]

Arguments:
  MARKERS_FILE        marker file to restore and save (default: markers.json)

Options:
  --canvas WxH        scrollable canvas size (default: 1000x1000)
  --size N            initial tool half-extent, 1-100 (default: 10)
  --log-lines N       lines kept in the log panel (default: 500)
  -h, --help          print this help";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{option}`")]
    InvalidValue { option: String, value: String },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub markers_path: PathBuf,
    pub canvas_size: Vec2,
    pub tool_size: f32,
    pub log_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers_path: PathBuf::from(DEFAULT_MARKERS_FILE),
            canvas_size: Vec2::new(1000.0, 1000.0),
            tool_size: 10.0,
            log_lines: 500,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut path_seen = false;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--canvas" => {
                    let value = value_for(&arg, args.next())?;
                    config.canvas_size = parse_dimensions(&value)
                        .ok_or_else(|| invalid(&arg, &value))?;
                }
                "--size" => {
                    let value = value_for(&arg, args.next())?;
                    let size: f32 = value.parse().map_err(|_| invalid(&arg, &value))?;
                    if !(1.0..=100.0).contains(&size) {
                        return Err(invalid(&arg, &value));
                    }
                    config.tool_size = size;
                }
                "--log-lines" => {
                    let value = value_for(&arg, args.next())?;
                    config.log_lines = value
                        .parse()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid(&arg, &value))?;
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ if path_seen => return Err(ConfigError::UnexpectedArgument(arg)),
                _ => {
                    config.markers_path = PathBuf::from(arg);
                    path_seen = true;
                }
            }
        }
        Ok(Command::Run(config))
    }
}

fn value_for(option: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue(option.to_string()))
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn parse_dimensions(value: &str) -> Option<Vec2> {
    let (w, h) = value.split_once(['x', 'X'])?;
    let w: f32 = w.trim().parse().ok()?;
    let h: f32 = h.trim().parse().ok()?;
    (w > 0.0 && h > 0.0).then(|| Vec2::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ConfigError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(parse(&[]), Ok(Command::Run(Config::default())));
    }

    #[test]
    fn reads_path_and_options() {
        let Ok(Command::Run(config)) =
            parse(&["--canvas", "640x480", "board.json", "--size", "25", "--log-lines", "50"])
        else {
            panic!("expected a run command");
        };
        assert_eq!(config.markers_path, PathBuf::from("board.json"));
        assert_eq!(config.canvas_size, Vec2::new(640.0, 480.0));
        assert_eq!(config.tool_size, 25.0);
        assert_eq!(config.log_lines, 50);
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&["board.json", "-h"]), Ok(Command::Help));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["--bogus"]),
            Err(ConfigError::UnknownOption("--bogus".into()))
        );
        assert_eq!(
            parse(&["--size"]),
            Err(ConfigError::MissingValue("--size".into()))
        );
        assert!(matches!(
            parse(&["--size", "500"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse(&["--canvas", "wide"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            parse(&["a.json", "b.json"]),
            Err(ConfigError::UnexpectedArgument("b.json".into()))
        );
    }
}
