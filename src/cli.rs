use crate::config;
use crate::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

pub const USAGE: &str = "\
Usage: genre-demo [--endpoint <url>] [--timeout <secs>] [paths...]

With paths, queues them (directories expand to their audio files), predicts
once and prints the result. Without paths, starts an interactive session.

Environment:
  GENRE_DEMO_ENDPOINT      prediction endpoint (default http://localhost:5000/predict)
  GENRE_DEMO_TIMEOUT_SECS  per-request timeout, unset for none
  RUST_LOG                 log filter (default info)";

pub const INTERACTIVE_HELP: &str = "\
Commands:
  add <path>...    queue files or directories
  remove <n>       drop the file at position n
  predict          send every queued file for classification
  show             print the current view
  help             this text
  quit             leave";

#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
    pub paths: Vec<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, AppError> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--endpoint" => {
                    let value = args.next().ok_or("--endpoint needs a value")?;
                    parsed.endpoint = Some(value);
                }
                "--timeout" => {
                    let value = args.next().ok_or("--timeout needs a value")?;
                    parsed.timeout = Some(config::parse_timeout(&value)?);
                }
                "--" => {
                    parsed.paths.extend(args.by_ref().map(PathBuf::from));
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option {}", flag).into());
                }
                _ => parsed.paths.push(PathBuf::from(&arg)),
            }
        }

        Ok(parsed)
    }
}

#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    Add(Vec<PathBuf>),
    Remove(usize),
    Predict,
    Show,
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(ReplCommand::Show);
        };

        match verb {
            "add" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err("add needs at least one path".into());
                }
                Ok(ReplCommand::Add(paths))
            }
            "remove" | "rm" => {
                let position = words
                    .next()
                    .and_then(|w| w.parse::<usize>().ok())
                    .ok_or("remove needs a file number")?;
                Ok(ReplCommand::Remove(position))
            }
            "predict" | "submit" => Ok(ReplCommand::Predict),
            "show" | "ls" => Ok(ReplCommand::Show),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command '{}', try help", other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_paths() {
        let parsed = CliArgs::parse(args(&[
            "--endpoint",
            "http://10.0.0.2:5000/predict",
            "a.mp3",
            "--timeout",
            "15",
            "music/",
        ]))
        .unwrap();
        assert_eq!(parsed.endpoint.as_deref(), Some("http://10.0.0.2:5000/predict"));
        assert_eq!(parsed.timeout, Some(Duration::from_secs(15)));
        assert_eq!(parsed.paths, vec![PathBuf::from("a.mp3"), PathBuf::from("music/")]);
        assert!(!parsed.help);
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = CliArgs::parse(args(&["--", "--weird.mp3"])).unwrap();
        assert_eq!(parsed.paths, vec![PathBuf::from("--weird.mp3")]);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(CliArgs::parse(args(&["--endpoint"])).is_err());
        assert!(CliArgs::parse(args(&["--timeout", "later"])).is_err());
        assert!(CliArgs::parse(args(&["--verbose"])).is_err());
    }

    #[test]
    fn parses_interactive_commands() {
        assert_eq!(
            ReplCommand::parse("add a.mp3 b.wav").unwrap(),
            ReplCommand::Add(vec![PathBuf::from("a.mp3"), PathBuf::from("b.wav")])
        );
        assert_eq!(ReplCommand::parse("remove 2").unwrap(), ReplCommand::Remove(2));
        assert_eq!(ReplCommand::parse("  predict ").unwrap(), ReplCommand::Predict);
        assert_eq!(ReplCommand::parse("").unwrap(), ReplCommand::Show);
        assert_eq!(ReplCommand::parse("q").unwrap(), ReplCommand::Quit);
        assert!(ReplCommand::parse("add").is_err());
        assert!(ReplCommand::parse("remove two").is_err());
        assert!(ReplCommand::parse("dance").is_err());
    }
}
