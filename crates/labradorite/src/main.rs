mod cli;
mod commands;
mod config;
mod error;
mod http;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LogFormat};
use crate::error::CliError;

#[actix_web::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A server is expected to log requests without being asked to
    let baseline = u8::from(matches!(cli.command, Command::Serve(_)));
    init_tracing(
        cli.global.verbose.saturating_add(baseline),
        cli.global.log_format,
    );

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve(args) => commands::serve::handle(args, &cli.global).await,
        Command::Lookup(args) => commands::lookup::handle(args, &cli.global),
        Command::Check(args) => commands::check::handle(&args, &cli.global),
        Command::GenerateMappings(args) => commands::generate::handle(args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "labradorite", &mut std::io::stdout());
            Ok(())
        }
    }
}
