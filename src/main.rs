use anyhow::Result;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use expirycheck::cli;
use expirycheck::config::Config;
use expirycheck::report::{compute, load_schedule};

fn main() -> Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{:#}", e);
            cli::print_usage();
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }

    // Initialize logging (stderr, so stdout only carries the report)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("expirycheck=warn")),
        )
        .init();

    info!("expirycheck v{}", env!("CARGO_PKG_VERSION"));

    // Handle --validate mode
    if args.validate {
        let Some(path) = args.schedule_path.as_deref() else {
            cli::print_usage();
            std::process::exit(2);
        };
        let schedule = load_schedule(Path::new(path))?;
        let open_days: Vec<String> = schedule.open_days().map(|d| d.to_string()).collect();
        if open_days.is_empty() {
            eprintln!("Schedule '{}' has no open days", path);
            std::process::exit(1);
        }
        println!("Schedule is valid. Open days: {}", open_days.join(", "));
        return Ok(());
    }

    let Some((schedule_path, now)) = args.inputs() else {
        cli::print_usage();
        std::process::exit(2);
    };

    let config = Config::from_env()?.with_window_secs(args.window_secs);
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let schedule = load_schedule(Path::new(schedule_path))?;
    let report = compute(&schedule, now, config.window_secs)?;
    println!("{}", report);

    Ok(())
}
