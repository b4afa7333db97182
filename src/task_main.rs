use anyhow::Result;
use tallybook::cli::task::run_task_cli;
use tracing::error;

fn main() -> Result<()> {
    run_task_cli().inspect_err(|e| {
        error!("Error running task cli {e:?}");
    })?;
    Ok(())
}
