//! Command-line argument parsing for expirycheck

use anyhow::{bail, Context, Result};

/// Parse command line arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub schedule_path: Option<String>,
    pub now: Option<String>,
    pub window_secs: Option<u64>,
    pub validate: bool,
    pub help: bool,
}

impl Args {
    /// Both positional arguments, if supplied.
    pub fn inputs(&self) -> Option<(&str, &str)> {
        Some((self.schedule_path.as_deref()?, self.now.as_deref()?))
    }
}

pub fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse an argument vector whose first element is the program name.
pub fn parse_args_from(args: &[String]) -> Result<Args> {
    let mut result = Args::default();
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--validate" => result.validate = true,
            "--help" | "-h" => result.help = true,
            "--window-secs" => {
                if i + 1 >= args.len() {
                    bail!("--window-secs needs a value");
                }
                i += 1;
                result.window_secs = Some(
                    args[i]
                        .parse()
                        .with_context(|| format!("--window-secs {:?} is not a whole number of seconds", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => bail!("unknown option {}", arg),
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    // Anything past the second positional argument is ignored
    let mut positional = positional.into_iter();
    result.schedule_path = positional.next();
    result.now = positional.next();

    Ok(result)
}

pub fn usage() -> &'static str {
    "USAGE:\n    expirycheck [OPTIONS] <SCHEDULE_JSON> <NOW>\n\n\
     ARGS:\n    \
     <SCHEDULE_JSON>    Path to a JSON array of 7 day records, Sunday first:\n                       \
     [{\"open\": true, \"open_at\": \"09:00\", \"close_at\": \"17:00\"}, ...]\n    \
     <NOW>              Reference time, yyyy-MM-ddTHH:mm:ss+hhmm\n                       \
     e.g. 2019-10-11T16:00:00+0800\n"
}

/// Usage on stderr, for missing or malformed arguments
pub fn print_usage() {
    eprintln!("Invalid or no arguments were provided.\n");
    eprintln!("{}", usage());
}

pub fn print_help() {
    println!("expirycheck - business-hours expiry calculator\n");
    println!("{}", usage());
    println!("OPTIONS:");
    println!("    --window-secs N     Open-time seconds to add (default: 10800)");
    println!("    --validate          Validate the schedule file and exit");
    println!("    --help, -h          Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    EXPIRY_WINDOW_SECS  Default for --window-secs (also read from .env)");
    println!("    RUST_LOG            Log filter, e.g. expirycheck=debug");
}
