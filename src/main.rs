use std::io;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use genmark::CancellationToken;

/// genmark — find generated source files by name and leading marker comments.
#[derive(Parser)]
#[command(name = "genmark", version, about)]
struct Cli {
    /// Files or directories to classify.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// List every file, not just generated ones.
    #[arg(long)]
    all: bool,

    /// Machine-readable JSON output.
    #[arg(long)]
    json: bool,

    /// Skip files whose name or relative path matches this glob. Repeatable.
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Stop classifying after this many seconds; unfinished files are reported as unknown.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "genmark", &mut io::stdout());
        return;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_env("GENMARK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cancel = CancellationToken::new();
    if let Some(secs) = cli.timeout {
        let timer = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            tracing::debug!(secs, "timeout reached, cancelling");
            timer.cancel();
        });
    }

    let report = match genmark::run(&cli.paths, &cli.exclude, &cancel) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        }
    } else {
        println!("{}", genmark::format::report(&report, cli.all));
    }
}
