use clap::Parser;
use tracing_subscriber::EnvFilter;

use console::cli::{self, Commands};
use console::errors::ConsoleError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .init();
    }

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
        Commands::Validate(args) => cli::validate::handle_validate(args).await,
    };

    if let Err(e) = result {
        match &e {
            ConsoleError::FieldValidation(errors) => {
                eprintln!("Error: validation failed");
                for err in errors.iter() {
                    eprintln!("  {}: {}", err.field, err.message);
                }
            }
            other => eprintln!("Error: {}", other),
        }
        let exit_code = match &e {
            ConsoleError::Config(_) | ConsoleError::Yaml(_) => 2,
            ConsoleError::FieldValidation(_) | ConsoleError::PortPolicy(_) | ConsoleError::QuotaExceeded(_) => 3,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}
