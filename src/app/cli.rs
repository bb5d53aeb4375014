use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, warn};

use super::demos::DemoContext;
use super::error::AppError;
use super::logging::init_logging;
use crate::batch::{BatchObserver, FailurePolicy};
use crate::io::FileStore;

/// What the fail-fast demo does after a read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Report the failure and stop reading
    Abort,
    /// Report the failure and keep reading
    Continue,
}

impl From<OnError> for FailurePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => FailurePolicy::Abort,
            OnError::Continue => FailurePolicy::Continue,
        }
    }
}

/// Run batch file reading demonstrations over a poem's stanzas
#[derive(Debug, Parser)]
#[command(name = "stanza", version)]
pub struct Cli {
    /// Demonstrations to run (a-e, case-insensitive); unknown names are ignored
    pub problems: Vec<String>,

    /// Directory containing the poem folders
    #[arg(long, default_value = "poems")]
    pub root: PathBuf,

    /// Stanza slot to corrupt in demo D (0-based); random when omitted
    #[arg(long)]
    pub fault_index: Option<usize>,

    /// Failure handling for demo D
    #[arg(long, value_enum, default_value_t = OnError::Continue)]
    pub on_error: OnError,

    /// Directory demo E writes into; defaults to the system temp dir
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Flags that were not recognised and were dropped during parsing
    #[arg(skip)]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parse arguments, dropping unknown flags instead of failing
    ///
    /// Known options are parsed wherever they appear. Unknown long flags
    /// (with or without `=value`) and short clusters containing an unknown
    /// letter are removed and recorded in [`Cli::ignored`]. Other errors,
    /// including `--help` and `--version`, are returned unchanged.
    pub fn parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut ignored = Vec::new();

        loop {
            match Self::try_parse_from(&args) {
                Ok(mut cli) => {
                    cli.ignored = ignored;
                    return Ok(cli);
                }
                Err(e) if e.kind() == ErrorKind::UnknownArgument => {
                    let Some(ContextValue::String(flag)) = e.get(ContextKind::InvalidArg) else {
                        return Err(e);
                    };
                    // argv[0] is the program name and never a candidate
                    let Some(index) = args
                        .iter()
                        .skip(1)
                        .position(|arg| matches_unknown_flag(arg, flag))
                    else {
                        return Err(e);
                    };
                    let dropped = args.remove(index + 1);
                    ignored.push(dropped.to_string_lossy().into_owned());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Build the demo context, sending output to `observer`
    pub fn to_context(&self, observer: Box<dyn BatchObserver>) -> DemoContext {
        let scratch = self
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);

        DemoContext::new(FileStore::new(&self.root), FileStore::new(scratch), observer)
            .with_fault_index(self.fault_index)
            .with_on_error(self.on_error.into())
    }
}

/// Whether the raw argument `arg` is where clap found the unknown `flag`
fn matches_unknown_flag(arg: &OsString, flag: &str) -> bool {
    let Some(arg) = arg.to_str() else {
        return false;
    };

    if arg == flag {
        return true;
    }
    if flag.starts_with("--") {
        return arg
            .strip_prefix(flag)
            .is_some_and(|rest| rest.starts_with('='));
    }
    match (flag.strip_prefix('-'), arg.strip_prefix('-')) {
        (Some(letter), Some(cluster)) if !cluster.starts_with('-') => cluster.contains(letter),
        _ => false,
    }
}

/// Reusable CLI application runner that handles:
/// - Argument parsing and logging setup
/// - Signal handling (SIGINT, SIGTERM, SIGHUP)
/// - Exit codes (0 = success, 1 = error, 130 = SIGINT, 143 = SIGTERM)
pub struct CliApp {
    name: String,
}

impl CliApp {
    /// Create a new CLI application runner
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Parse the process arguments and run `main_fn`
    pub async fn run<F, Fut>(self, main_fn: F) -> ExitCode
    where
        F: FnOnce(Cli) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let cli = Cli::parse_lenient(std::env::args_os()).unwrap_or_else(|e| e.exit());
        ExitCode::from(self.run_with(cli, main_fn).await)
    }

    /// Run `main_fn` with already-parsed arguments, racing it against signals
    /// Returns the process exit status
    pub async fn run_with<F, Fut>(self, cli: Cli, main_fn: F) -> u8
    where
        F: FnOnce(Cli) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        init_logging(cli.verbose);
        debug!(app = %self.name, problems = ?cli.problems, "Starting");
        if !cli.ignored.is_empty() {
            debug!(ignored = ?cli.ignored, "Ignoring unrecognised flags");
        }

        tokio::select! {
            result = main_fn(cli) => {
                match result {
                    Ok(()) => 0,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        1
                    }
                }
            }
            signal_code = wait_for_signal() => signal_code,
        }
    }
}

/// Wait for any Unix signal (SIGINT, SIGTERM, SIGHUP) or Ctrl+C
/// Returns the exit code to use (130 for SIGINT, 143 for SIGTERM, etc.)
async fn wait_for_signal() -> u8 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let handlers = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        );
        let (mut sigterm, mut sigint, mut sighup) = match handlers {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                warn!("Failed to install signal handlers");
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                eprintln!("Received SIGTERM");
                143 // 128 + 15
            }
            _ = sigint.recv() => {
                eprintln!("Received SIGINT");
                130 // 128 + 2
            }
            _ = sighup.recv() => {
                eprintln!("Received SIGHUP");
                129 // 128 + 1
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            return std::future::pending().await;
        }
        eprintln!("Received Ctrl+C");
        130
    }
}
