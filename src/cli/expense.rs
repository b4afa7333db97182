use std::path::PathBuf;

use anyhow::Result;
use chrono::{Month, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    expense::{Expense, ExpenseFilter, ExpenseInput, ExpenseTracker, YearFilter},
    store::RecordId,
    utils::{clock::DefaultClock, logging::EXPENSE_PREFIX, time::format_date},
};

use super::{parse_args, setup_logging, LogArgs};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker", version, long_about = None)]
#[command(about = "Keeps track of your expenses")]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        default_value = "data.json",
        help = "Document the expenses are kept in"
    )]
    file: PathBuf,
    #[command(flatten)]
    log: LogArgs,
}

#[derive(clap::Args, Debug)]
struct ExpenseFields {
    #[arg(long, help = "(mandatory) expense's description, example \"Groceries\"")]
    description: Option<String>,
    #[arg(long, help = "(mandatory) expense's amount, example 32.99")]
    amount: Option<String>,
    #[arg(long, help = "expense's category, example \"Market\". Defaults to general")]
    category: Option<String>,
}

impl From<ExpenseFields> for ExpenseInput {
    fn from(
        ExpenseFields {
            description,
            amount,
            category,
        }: ExpenseFields,
    ) -> Self {
        ExpenseInput {
            description,
            amount,
            category,
        }
    }
}

#[derive(clap::Args, Debug)]
struct FilterFields {
    #[arg(long, help = "Month filter, must be between 1 and 12, example 8")]
    month: Option<String>,
    #[arg(long, help = "Year filter: current, none or a year, example 2012")]
    year: Option<YearFilter>,
    #[arg(long, help = "Category filter")]
    category: Option<String>,
}

impl FilterFields {
    fn into_filter(self, default_year: YearFilter) -> Result<ExpenseFilter> {
        Ok(ExpenseFilter::parse(
            self.month.as_deref(),
            self.year.unwrap_or(default_year),
            self.category,
        )?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Add a new expense dated today")]
    Add {
        #[command(flatten)]
        fields: ExpenseFields,
        #[arg(long, help = "Date of the expense instead of today, example 2024-08-15")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Overwrite description and amount of an expense")]
    Update {
        #[arg(long)]
        id: RecordId,
        #[command(flatten)]
        fields: ExpenseFields,
    },
    #[command(about = "Delete an expense")]
    Delete {
        #[arg(long)]
        id: RecordId,
    },
    #[command(about = "List expenses. Shows every year unless --year is given")]
    List {
        #[command(flatten)]
        filter: FilterFields,
    },
    #[command(about = "Sum of expenses. Uses the current year unless --year is given")]
    Summary {
        #[command(flatten)]
        filter: FilterFields,
    },
}

pub fn run_expense_cli() -> Result<()> {
    let args: Args = parse_args();
    setup_logging(EXPENSE_PREFIX, &args.log);

    let mut tracker = ExpenseTracker::open(&args.file, Box::new(DefaultClock))?;

    match args.commands {
        Commands::Add { fields, date } => {
            let id = tracker.add(fields.into(), date)?;
            println!("Expense added successfully (ID: {id})");
        }
        Commands::Update { id, fields } => {
            tracker.update(id, fields.into())?;
            println!("Expense updated successfully (ID: {id})");
        }
        Commands::Delete { id } => {
            tracker.delete(id)?;
            println!("Expense deleted successfully (ID: {id})");
        }
        Commands::List { filter } => {
            let filter = filter.into_filter(YearFilter::None)?;
            print_expenses(&tracker.list(&filter));
        }
        Commands::Summary { filter } => {
            let filter = filter.into_filter(YearFilter::Current)?;
            let total = tracker.summary(&filter)?;
            match filter.month.and_then(month_name) {
                Some(month) => println!("Total expenses for {month}: {total:.2}"),
                None => println!("Total expenses: {total:.2}"),
            }
        }
    }
    Ok(())
}

fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|v| v.name())
}

fn print_expenses(expenses: &[&Expense]) {
    println!(
        "{:<6} {:<10} {:<30} {:>10} {:<15}",
        "ID", "DATE", "DESCRIPTION", "AMOUNT", "CATEGORY"
    );
    for expense in expenses {
        println!(
            "{:<6} {:<10} {:<30} {:>10} {:<15}",
            expense.id,
            format_date(expense.date),
            expense.description,
            format!("{:.2}", expense.amount),
            expense.category
        );
    }
}
