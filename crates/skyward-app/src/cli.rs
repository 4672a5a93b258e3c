//! Command-line options for the headless driver.

use std::path::PathBuf;

/// Env var naming a tuning file when `--tuning` is not given.
pub const TUNING_ENV: &str = "SKYWARD_TUNING";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub tuning: Option<PathBuf>,
    /// Simulated seconds to fly.
    pub seconds: f64,
    pub seed: u64,
    /// Let the autopilot pull the trigger.
    pub fire: bool,
    /// Run on the frame-clocked loop thread instead of stepping as fast as possible.
    pub realtime: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tuning: None,
            seconds: 30.0,
            seed: 42,
            fire: false,
            realtime: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse arguments (program name excluded). `env_tuning` fills in a missing `--tuning`.
    pub fn parse(args: &[String], env_tuning: Option<String>) -> Result<Self, String> {
        let mut options = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--tuning" => options.tuning = Some(PathBuf::from(value(&mut iter, arg)?)),
                "--seconds" => {
                    let raw = value(&mut iter, arg)?;
                    let seconds: f64 = raw
                        .parse()
                        .map_err(|_| format!("--seconds expects a number, got '{raw}'"))?;
                    if !seconds.is_finite() || seconds < 0.0 {
                        return Err(format!("--seconds must be non-negative, got {seconds}"));
                    }
                    options.seconds = seconds;
                }
                "--seed" => {
                    let raw = value(&mut iter, arg)?;
                    options.seed = raw
                        .parse()
                        .map_err(|_| format!("--seed expects an integer, got '{raw}'"))?;
                }
                "--fire" => options.fire = true,
                "--realtime" => options.realtime = true,
                "help" | "--help" | "-h" => options.help = true,
                other => return Err(format!("Unknown argument: {other}")),
            }
        }

        if options.tuning.is_none() {
            options.tuning = env_tuning.filter(|p| !p.is_empty()).map(PathBuf::from);
        }
        Ok(options)
    }
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

pub fn usage() -> &'static str {
    "skyward: headless flight simulation driver\n\
     \n\
     Options:\n\
     \n\
       --tuning <path>   Flight tuning JSON (default: $SKYWARD_TUNING, else built-in)\n\
       --seconds <N>     Simulated seconds to fly (default: 30)\n\
       --seed <N>        World scatter seed (default: 42)\n\
       --fire            Let the autopilot fire bursts during cruise\n\
       --realtime        Run on the 60 Hz loop thread instead of as fast as possible\n\
     \n\
     Events are written to stdout as JSON lines; logs go to stderr (RUST_LOG, LOG_FORMAT=json).\n"
}
