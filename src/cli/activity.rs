use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::{
    activity::{
        client::{DEFAULT_API_URL, DEFAULT_TIMEOUT},
        summarize_user, GitHubClient,
    },
    utils::{logging::ACTIVITY_PREFIX, runtime::single_thread_runtime},
};

use super::{parse_args, setup_logging, LogArgs};

#[derive(Parser, Debug)]
#[command(name = "github-activity", version, long_about = None)]
#[command(about = "Shows recent public GitHub activity of a user")]
struct Args {
    #[arg(help = "GitHub username")]
    username: String,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), help = "Request timeout in seconds")]
    timeout: u64,
    #[arg(long = "api-url", default_value = DEFAULT_API_URL, help = "Base URL of the GitHub API")]
    api_url: String,
    #[command(flatten)]
    log: LogArgs,
}

pub fn run_activity_cli() -> Result<()> {
    let args: Args = parse_args();
    setup_logging(ACTIVITY_PREFIX, &args.log);

    let client = GitHubClient::new(&args.api_url, Duration::from_secs(args.timeout))?;
    let digest =
        single_thread_runtime()?.block_on(async { summarize_user(&client, &args.username).await })?;

    if digest.is_empty() {
        println!("No recent activity found for {}.", args.username);
        return Ok(());
    }

    println!("Activities of {}:", args.username);
    for line in digest.lines() {
        println!("   > {line}");
    }
    Ok(())
}
