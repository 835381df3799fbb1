//! tcsa-loader CLI binary entry point.
//! Delegates to the library pipeline and maps the outcome to an exit code.

use clap::Parser;
use tcsa_loader::cli::{Cli, Commands};
use tcsa_loader::codequality::{self, Lines, Location, Severity};
use tcsa_loader::config::{self, Overrides};
use tcsa_loader::driver::make_driver;
use tcsa_loader::{analyze, exit, output, utils};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), message);
    std::process::exit(exit::RETURN_ERROR);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version requests are not failures
            let code = if e.use_stderr() { exit::RETURN_ERROR } else { 0 };
            std::process::exit(code);
        }
    };
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Fingerprint {
            description,
            path,
            line,
            severity,
        } => {
            let severity: Severity = severity.parse().unwrap_or_else(|e: String| fail(e));
            let location = Location {
                path,
                lines: Lines { begin: line },
            };
            println!("{}", codequality::fingerprint(&description, &location, severity));
        }
        Commands::Analyze {
            repo_root,
            solution,
            project,
            report_path,
            report_format,
            output,
            driver,
            devenv,
            configuration,
            error_list,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root,
                solution,
                project,
                report_path,
                report_format,
                output,
                driver,
                devenv,
                configuration,
                error_list,
            })
            .unwrap_or_else(|e| fail(e));
            if !eff.config_found {
                tracing::debug!(root = %eff.repo_root.display(), "No tcsa.toml found; using defaults");
            }
            let mut build_driver = make_driver(&eff.driver).unwrap_or_else(|e| fail(e));
            let outcome =
                analyze::run_analysis(&eff, build_driver.as_mut()).unwrap_or_else(|e| fail(e));
            output::print_analysis(&outcome.report, eff.output, outcome.exit_code);
            if let Some(p) = &outcome.report_written {
                eprintln!("{} report written to {}", utils::note_prefix(), utils::rel_to_wd(p));
            }
            std::process::exit(outcome.exit_code);
        }
    }
}
