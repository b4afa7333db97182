use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    store::RecordId,
    task::{Task, TaskStatus, TaskTracker},
    utils::{clock::DefaultClock, logging::TASK_PREFIX, time::format_timestamp},
};

use super::{parse_args, setup_logging, LogArgs};

#[derive(Parser, Debug)]
#[command(name = "task-cli", version, long_about = None)]
#[command(about = "Keeps track of your tasks")]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        default_value = "db.json",
        help = "Document the tasks are kept in"
    )]
    file: PathBuf,
    #[command(flatten)]
    log: LogArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Add a new task, example: task-cli add \"Buy groceries\"")]
    Add { description: String },
    #[command(about = "Change description of a task")]
    Update { id: RecordId, description: String },
    #[command(about = "Delete a task")]
    Delete { id: RecordId },
    #[command(about = "Mark a task as in progress")]
    MarkInProgress { id: RecordId },
    #[command(about = "Mark a task as done")]
    MarkDone { id: RecordId },
    #[command(about = "Mark a task as not started")]
    MarkTodo { id: RecordId },
    #[command(about = "List tasks, optionally only those with the given status")]
    List { status: Option<TaskStatus> },
}

pub fn run_task_cli() -> Result<()> {
    let args: Args = parse_args();
    setup_logging(TASK_PREFIX, &args.log);

    let mut tracker = TaskTracker::open(args.file.clone(), Box::new(DefaultClock))?;

    match args.commands {
        Commands::Add { description } => {
            let id = tracker.add(&description)?;
            println!("Task added successfully (ID: {id})");
        }
        Commands::Update { id, description } => {
            tracker.update(id, &description)?;
            println!("Task updated successfully (ID: {id})");
        }
        Commands::Delete { id } => {
            tracker.delete(id)?;
            println!("Task deleted successfully (ID: {id})");
        }
        Commands::MarkInProgress { id } => mark(&mut tracker, id, TaskStatus::InProgress)?,
        Commands::MarkDone { id } => mark(&mut tracker, id, TaskStatus::Done)?,
        Commands::MarkTodo { id } => mark(&mut tracker, id, TaskStatus::Todo)?,
        Commands::List { status } => print_tasks(&tracker.list(status)),
    }
    Ok(())
}

fn mark(tracker: &mut TaskTracker, id: RecordId, status: TaskStatus) -> Result<()> {
    tracker.mark(id, status)?;
    println!("Task marked {status} successfully (ID: {id})");
    Ok(())
}

fn print_tasks(tasks: &[&Task]) {
    println!(
        "{:<6} {:<40} {:<12} {:<20} {:<20}",
        "ID", "DESCRIPTION", "STATUS", "CREATED AT", "UPDATED AT"
    );
    for task in tasks {
        println!(
            "{:<6} {:<40} {:<12} {:<20} {:<20}",
            task.id,
            task.description,
            task.status.to_string(),
            format_timestamp(&task.created_at),
            format_timestamp(&task.updated_at)
        );
    }
}
