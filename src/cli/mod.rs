pub mod activity;
pub mod expense;
pub mod task;

use clap::{Args, Parser};
use tracing::level_filters::LevelFilter;

use crate::utils::{dir::create_application_default_path, logging::enable_logging};

/// Logging options shared by every tool.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long, global = true, help = "Print logs to the console")]
    pub log: bool,
    #[arg(
        long = "log-filter",
        global = true,
        help = "Log level, e.g. debug. Falls back to RUST_LOG and then to info"
    )]
    pub log_filter: Option<LevelFilter>,
}

impl LogArgs {
    fn level(&self) -> Option<LevelFilter> {
        self.log_filter.or(self.log.then_some(LevelFilter::TRACE))
    }
}

/// Logs are a convenience, so a tool keeps working when they can't be set up.
pub fn setup_logging(prefix: &str, args: &LogArgs) {
    let result = create_application_default_path()
        .and_then(|dir| enable_logging(prefix, &dir, args.level(), args.log));
    if let Err(e) = result {
        eprintln!("Logging is disabled: {e}");
    }
}

/// Every failure exits with 1, argument errors included. Help and version output exit with 0.
fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() {
        1
    } else {
        0
    }
}

/// Like [Parser::parse] but with the exit codes of [usage_exit_code].
pub fn parse_args<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| {
        let code = usage_exit_code(&e);
        if let Err(print_error) = e.print() {
            eprintln!("{print_error}");
        }
        std::process::exit(code)
    })
}

#[cfg(test)]
mod tests {
    use clap::{Parser, Subcommand};

    use super::usage_exit_code;

    #[derive(Parser, Debug)]
    #[command(name = "tool", version)]
    struct Args {
        #[command(subcommand)]
        commands: Commands,
    }

    #[derive(Subcommand, Debug)]
    enum Commands {
        Delete {
            #[arg(long)]
            id: u64,
        },
    }

    #[test]
    fn test_argument_errors_exit_with_one() {
        for args in [
            vec!["tool", "delete"],
            vec!["tool", "delete", "--id", "abc"],
            vec!["tool", "unknown"],
        ] {
            let error = Args::try_parse_from(args).unwrap_err();
            assert_eq!(usage_exit_code(&error), 1);
        }
    }

    #[test]
    fn test_help_and_version_exit_with_zero() {
        for flag in ["--help", "--version"] {
            let error = Args::try_parse_from(["tool", flag]).unwrap_err();
            assert_eq!(usage_exit_code(&error), 0);
        }
    }
}
