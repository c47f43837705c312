use minso::cli::{self, Invocation};
use minso::{ApiClient, Config};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    let command = match cli::parse(args)? {
        Invocation::Run(command) => command,
        other => {
            cli::report(&other, &mut stdout)?;
            return Ok(());
        }
    };

    let mut client = ApiClient::new(Config::default())?;
    cli::execute(&mut client, command, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
