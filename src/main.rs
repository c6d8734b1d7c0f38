//! Map Latency Bench - Main CLI Application
//!
//! Measures local-write to remote-confirmation latency of a replicated
//! shared property map and reports quartile statistics with outlier
//! fences.

use clap::Parser;
use map_latency_bench::{
    app::App,
    cli::Cli,
    config::load_config,
    error::{AppError, Result},
    PKG_NAME, VERSION,
};
use std::{error::Error, process};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    let fresh = cli.fresh;
    let use_colors = cli.use_colors();
    let mut config = load_config(cli)?;

    // Terminal detection only applies when no explicit flag decided it
    config.enable_color = config.enable_color && use_colors;

    let app = App::new(config, fresh);
    app.run().await?;
    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - RUN_COUNT must be between 1 and 10000");
            eprintln!("  - SIZE_CLASS must be 0, 1, 5 or 10");
        }
        AppError::NotReady(_) => {
            eprintln!();
            eprintln!("A run was still in progress; wait for it to finish before starting another.");
        }
        AppError::Io(_) => {
            eprintln!();
            eprintln!("File access help:");
            eprintln!("  - Check permissions on the session file (--session-file)");
            eprintln!("  - Check the --json output path is writable");
        }
        _ => {}
    }
}
