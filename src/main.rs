use std::process::ExitCode;

use stanza::prelude::*;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    CliApp::new("stanza").run(run_demos).await
}

/// Run every demonstration named on the command line
async fn run_demos(cli: Cli) -> Result<(), AppError> {
    let registry = DemoRegistry::standard();
    let mut ctx = cli.to_context(Box::new(ConsoleReporter::stdout()));

    let ran = dispatch(&registry, &cli.problems, &mut ctx).await?;
    debug!(ran, "All demonstrations finished");

    Ok(())
}
