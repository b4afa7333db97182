use anyhow::Result;
use tallybook::cli::expense::run_expense_cli;
use tracing::error;

fn main() -> Result<()> {
    run_expense_cli().inspect_err(|e| {
        error!("Error running expense tracker {e:?}");
    })?;
    Ok(())
}
