use anyhow::Result;
use tallybook::cli::activity::run_activity_cli;
use tracing::error;

fn main() -> Result<()> {
    run_activity_cli().inspect_err(|e| {
        error!("Error fetching activity {e:?}");
    })?;
    Ok(())
}
