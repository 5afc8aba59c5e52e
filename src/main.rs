use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, Text};
use tracing::debug;

use spendlog::errors::SpendlogError;
use spendlog::storage::FileStore;
use spendlog::{Config, Record, RecordDraft, RecordId, RecordStore, SortKey, Summary, Tracker};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Override the directory the records file lives in
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new record; missing fields are prompted for
    Add {
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit a record by id, pre-filled with its current values
    Edit { id: RecordId },
    /// Delete a record by id
    Delete { id: RecordId },
    /// List records, optionally filtered and freshly sorted
    List {
        /// Show only records whose category contains this text
        #[arg(short, long)]
        category: Option<String>,
        /// Reorder the stored collection before listing
        #[arg(short, long)]
        sort: Option<SortArg>,
    },
    /// Print the total, optionally over a category filter
    Total {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Remove every record
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortArg {
    Amount,
    Category,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Amount => SortKey::Amount,
            SortArg::Category => SortKey::Category,
        }
    }
}

fn main() -> Result<(), SpendlogError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            println!("Could not read the config file. A minimal config would look like this:");
            println!("currency = \"$\"");
            println!("data_dir = \"/path/to/records\"");
            return Err(err);
        }
    };
    let data_dir = args.file.unwrap_or_else(|| config.data_dir.clone());

    let store = RecordStore::open(Box::new(FileStore::new(data_dir)))?;
    let mut tracker = Tracker::new(store);
    tracker.subscribe(|event| debug!(?event, "tracker event"));

    match args.command {
        Command::Add {
            description,
            amount,
            category,
        } => {
            let draft = RecordDraft::new(
                prompt_or("Description:", description, None)?,
                prompt_or("Amount:", amount, None)?,
                prompt_or("Category:", category, None)?,
            );
            let record = tracker.add_or_edit(&draft)?;
            println!("Added {record}");
        }
        Command::Edit { id } => {
            let mut prefill = tracker.begin_edit(id)?;
            loop {
                let draft = RecordDraft::new(
                    prompt_or("Description:", None, Some(&prefill.description))?,
                    prompt_or("Amount:", None, Some(&prefill.amount))?,
                    prompt_or("Category:", None, Some(&prefill.category))?,
                );
                match tracker.add_or_edit(&draft) {
                    Ok(record) => {
                        println!("Updated {record}");
                        break;
                    }
                    Err(SpendlogError::Validation(err)) => {
                        println!("Invalid {}: {err}", err.field());
                        prefill = draft;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Command::Delete { id } => match tracker.delete(id)? {
            Some(record) => println!("Deleted {record}"),
            None => println!("No record with id {id}"),
        },
        Command::List { category, sort } => {
            if let Some(filter) = category {
                tracker.set_filter(&filter);
            }
            let view = match sort {
                Some(key) => tracker.sort_by(key.into())?,
                None => tracker.current_view(),
            };
            print_records(&view, &config);
            print_summary(&tracker, &config);
        }
        Command::Total { category } => {
            if let Some(filter) = category {
                tracker.set_filter(&filter);
            }
            print_summary(&tracker, &config);
        }
        Command::Clear { yes } => {
            if yes || Confirm::new("Clear all records?").with_default(false).prompt()? {
                tracker.clear_all()?;
                println!("All records cleared");
            }
        }
    }

    Ok(())
}

/// CLI flag if given, otherwise an interactive prompt, optionally
/// pre-filled with the value being edited.
fn prompt_or(
    message: &str,
    flag: Option<String>,
    initial: Option<&str>,
) -> Result<String, SpendlogError> {
    if let Some(value) = flag {
        return Ok(value);
    }
    let mut prompt = Text::new(message);
    if let Some(initial) = initial {
        prompt = prompt.with_initial_value(initial);
    }
    Ok(prompt.prompt()?)
}

fn print_records(records: &[Record], config: &Config) {
    for record in records {
        println!(
            "{:>4}  {:<24} {:<12} {}{:>10.2}",
            record.id, record.description, record.category, config.currency, record.amount
        );
    }
}

fn print_summary(tracker: &Tracker, config: &Config) {
    if tracker.is_empty() {
        println!("No records yet");
        return;
    }
    match tracker.summary() {
        Summary::Empty => println!("No records match the filter"),
        Summary::Total(total) => println!("Total spent: {}{total:.2}", config.currency),
    }
}
