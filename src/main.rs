use credportal::cli::{handle_version_command, parse_args, CliCommand, Portal};
use credportal::config::AppConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        handle_version_command();
    }

    init_tracing();

    let portal = Portal::production(AppConfig::from_env())?;
    match portal.execute(&command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            for line in portal.failure_report(&e) {
                eprintln!("{}", line);
            }
            Err(e.into())
        }
    }
}
