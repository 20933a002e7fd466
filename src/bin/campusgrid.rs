//! campusgrid - browse and manage school records from the terminal.
//!
//! Usage:
//!   campusgrid students --role admin --token T            # print first page
//!   campusgrid teachers --filter vega --sort cubicle      # filtered, sorted
//!   campusgrid events --json --page 2                     # page as JSON
//!   campusgrid students --delete 12 --yes                 # delete, then print
//!   campusgrid events --create feria.json                 # validate and register
//!   campusgrid teachers --update t4.json --yes            # save an edited record
//!   campusgrid events --tui                               # interactive view

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use campusgrid::models::{Admin, Event, Role, Session, Student, Teacher};
use campusgrid::provider::{JsonFileProvider, Record};
use campusgrid::screen::{Confirmation, Outcome, Screen};
use campusgrid::table::{DEFAULT_PAGE_SIZE, SortDirection, TableRow};
use campusgrid::tui::App;
use campusgrid::view::format_text;

/// TUI redraw interval.
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Entity {
    Admins,
    Students,
    Teachers,
    Events,
}

impl Entity {
    fn title(self) -> &'static str {
        match self {
            Entity::Admins => "Administrators",
            Entity::Students => "Students",
            Entity::Teachers => "Teachers",
            Entity::Events => "Academic events",
        }
    }
}

/// Browse and manage school records.
#[derive(Parser)]
#[command(name = "campusgrid", about = "School records browser", version = campusgrid::VERSION)]
struct Args {
    /// Record list to open.
    #[arg(value_enum)]
    entity: Entity,

    /// Directory holding admins.json, students.json, teachers.json and events.json.
    #[arg(long, default_value = "./data", env = "CAMPUSGRID_DATA_DIR")]
    data_dir: PathBuf,

    /// Role of the signed-in user (admin, teacher, student).
    #[arg(long, env = "CAMPUSGRID_ROLE")]
    role: Role,

    /// Session token. Screens refuse to open without one.
    #[arg(long, env = "CAMPUSGRID_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Account id of the signed-in user.
    #[arg(long, env = "CAMPUSGRID_USER_ID")]
    user_id: Option<u64>,

    /// Case-insensitive substring filter.
    #[arg(short, long)]
    filter: Option<String>,

    /// Column key to sort by (e.g. name, birth_date, cubicle).
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    desc: bool,

    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Print the page as JSON.
    #[arg(long, conflicts_with = "tui")]
    json: bool,

    /// Open the interactive terminal UI.
    #[arg(long)]
    tui: bool,

    /// Delete the record with this id before listing.
    #[arg(long, value_name = "ID")]
    delete: Option<u64>,

    /// Register the record in this JSON file before listing.
    #[arg(long, value_name = "FILE")]
    create: Option<PathBuf>,

    /// Save the edited record in this JSON file (matched by id) before listing.
    #[arg(long, value_name = "FILE")]
    update: Option<PathBuf>,

    /// Confirm deletes and updates.
    #[arg(short, long)]
    yes: bool,

    /// Increase verbosity (-v: info, -vv: debug, -vvv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("campusgrid={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();

    // The TUI owns the terminal; only log there when explicitly asked to.
    if !args.tui || std::env::var_os("RUST_LOG").is_some() {
        init_logging(args.verbose, args.quiet);
    }

    let result = match args.entity {
        Entity::Admins => run::<Admin>(&args),
        Entity::Students => run::<Student>(&args),
        Entity::Teachers => run::<Teacher>(&args),
        Entity::Events => run::<Event>(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run<T: Record>(args: &Args) -> Result<(), Box<dyn Error>> {
    let session = Session::new(
        args.role,
        args.token.clone().unwrap_or_default(),
        args.user_id,
    );
    let provider = JsonFileProvider::<T>::new(&args.data_dir);
    let mut screen = Screen::open(args.entity.title(), session, provider, args.page_size)?;
    screen.reload()?;

    if let Some(id) = args.delete {
        let confirmation = Confirmation {
            confirmed: args.yes,
        };
        match screen.delete(id, confirmation)? {
            Outcome::Applied => eprintln!("Deleted record {}", id),
            Outcome::Cancelled => {
                eprintln!("Not deleting record {} without --yes", id);
            }
        }
    }

    if let Some(path) = &args.create {
        let created = screen.create(read_record::<T>(path)?)?;
        eprintln!("Created record {}", created.id());
    }

    if let Some(path) = &args.update {
        let record = read_record::<T>(path)?;
        let id = record.id();
        let confirmation = Confirmation {
            confirmed: args.yes,
        };
        match screen.update(record, confirmation)? {
            Outcome::Applied => eprintln!("Updated record {}", id),
            Outcome::Cancelled => {
                eprintln!("Not updating record {} without --yes", id);
            }
        }
    }

    if let Some(filter) = &args.filter {
        screen.table.set_filter(filter);
    }
    if let Some(key) = &args.sort {
        check_sort_key::<T>(key)?;
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        screen.table.set_sort(key, direction);
    }
    screen.table.set_page(args.page.saturating_sub(1));

    if args.tui {
        App::new(screen).run(TICK_RATE)?;
        return Ok(());
    }

    let vm = screen.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&vm)?);
    } else {
        print!("{}", format_text(&vm));
    }
    Ok(())
}

fn read_record<T: Record>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let record = serde_json::from_str(&data)
        .map_err(|e| format!("invalid record in {}: {}", path.display(), e))?;
    Ok(record)
}

fn check_sort_key<T: TableRow>(key: &str) -> Result<(), String> {
    match T::column(key) {
        Some(c) if c.sortable => Ok(()),
        _ => {
            let keys: Vec<&str> = T::columns()
                .iter()
                .filter(|c| c.sortable)
                .map(|c| c.key)
                .collect();
            Err(format!(
                "unknown sort column '{}' (expected one of: {})",
                key,
                keys.join(", ")
            ))
        }
    }
}
