use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Default cap for a single `settle` step
pub const DEFAULT_MAX_TICKS: u32 = 2000;

pub const USAGE: &str = "\
usage: tile-match [--levels <file>] [--script <file>] [--max-ticks <n>]

  --levels <file>    JSON level set (default: built-in demo levels)
  --script <file>    JSON list of steps (default: built-in demo script)
  --max-ticks <n>    tick cap for each settle step (default: 2000)
  -h, --help         show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub levels: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub max_ticks: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            levels: None,
            script: None,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// Parse command-line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--levels" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --levels"))?;
                config.levels = Some(PathBuf::from(v));
            }
            "--script" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --script"))?;
                config.script = Some(PathBuf::from(v));
            }
            "--max-ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --max-ticks"))?;
                config.max_ticks = v
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| anyhow!("invalid --max-ticks value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_args() {
        assert_eq!(parse_args(&[]).unwrap(), Some(RunConfig::default()));
    }

    #[test]
    fn parses_all_flags() {
        let cfg = parse_args(&args(&[
            "--levels",
            "set.json",
            "--script",
            "steps.json",
            "--max-ticks",
            "50",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(cfg.levels, Some(PathBuf::from("set.json")));
        assert_eq!(cfg.script, Some(PathBuf::from("steps.json")));
        assert_eq!(cfg.max_ticks, 50);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(&args(&["--levels", "x", "-h"])).unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--levels"])).is_err());
        assert!(parse_args(&args(&["--max-ticks", "0"])).is_err());
        assert!(parse_args(&args(&["--max-ticks", "many"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
