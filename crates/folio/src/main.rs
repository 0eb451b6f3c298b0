//! folio - Terminal browser for a project portfolio.
//!
//! Usage:
//!   folio                          # interactive TUI over ./content
//!   folio --content-dir ~/site     # custom content root
//!   folio projects                 # list projects in card order
//!   folio patch-notes -p chop      # patch notes of one project
//!   folio quests chop              # quest log of a project
//!   folio last-seen --clear        # forget the last opened entry

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use folio_core::content::ContentStore;
use folio_core::fmt::{normalize_for_display, safe_text, truncate};
use folio_core::last_seen::LastSeenStore;
use folio_core::quest_log::parse_quest_log;
use folio_core::tui::App;

/// Terminal browser for a project portfolio.
#[derive(Parser)]
#[command(name = "folio", about = "Portfolio browser", version)]
struct Args {
    /// Content root containing projects/ and patch-notes/.
    #[arg(long, env = "FOLIO_CONTENT_DIR", default_value = "./content")]
    content_dir: PathBuf,

    /// File that remembers the last opened entry.
    #[arg(long, env = "FOLIO_STATE_FILE", default_value = "./.folio/last_seen.json")]
    state_file: PathBuf,

    /// TUI tick in milliseconds; smooth scrolling moves one line per tick.
    #[arg(long, default_value = "50")]
    tick_ms: u64,

    /// Terminal width at which card grids switch to two columns.
    #[arg(long, default_value = "100")]
    wide_at: u16,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. The TUI logs nowhere without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List projects, featured first.
    Projects,
    /// List patch notes, newest first.
    PatchNotes {
        /// Only notes of this project.
        #[arg(short, long, value_name = "SLUG")]
        project: Option<String>,
    },
    /// Print the quest log of a project.
    Quests {
        #[arg(value_name = "SLUG")]
        slug: String,
    },
    /// Show the last opened entry.
    LastSeen {
        /// Forget it instead.
        #[arg(long)]
        clear: bool,
    },
}

/// Initializes the tracing subscriber.
///
/// Logs go to `log_file` when given, else to stderr unless `to_stderr` is off
/// (the TUI owns the terminal).
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>, to_stderr: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["folio", "folio_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    match log_file {
        Some(path) => match File::create(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            Err(e) => eprintln!("Warning: cannot open log file '{}': {}", path.display(), e),
        },
        None if to_stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        None => {}
    }
}

fn list_projects(store: &ContentStore) -> Result<(), Box<dyn Error>> {
    for p in store.projects_all()? {
        let marker = if p.featured { '*' } else { ' ' };
        let order = p.order.map(|o| o.to_string()).unwrap_or_else(|| "-".to_string());
        let subtitle = safe_text(p.subtitle.as_deref());
        let subtitle = if subtitle.is_empty() {
            String::new()
        } else {
            format!("  ({})", truncate(&normalize_for_display(subtitle), 48))
        };
        println!("{} {:<20} {:>4}  {}{}", marker, p.slug, order, p.title, subtitle);
    }
    Ok(())
}

fn list_patch_notes(store: &ContentStore, project: Option<&str>) -> Result<(), Box<dyn Error>> {
    let notes = match project {
        Some(slug) => store.patch_notes_by_project(slug)?,
        None => store.patch_notes_all()?,
    };
    for n in notes {
        println!(
            "{:<10}  {:<24} {:<12} {}",
            safe_text(n.date.as_deref()),
            n.slug,
            safe_text(n.project.as_deref()),
            n.title
        );
    }
    Ok(())
}

fn print_quests(store: &ContentStore, slug: &str) -> Result<(), Box<dyn Error>> {
    let Some(item) = store.project_by_slug(slug)? else {
        return Err(format!("project '{}' not found", slug).into());
    };
    let quests = parse_quest_log(&item.content);
    if quests.is_empty() {
        println!("(no quest log)");
    }
    for q in quests {
        match &q.tag {
            Some(tag) => println!("[{}] {}", tag, q.title),
            None => println!("{}", q.title),
        }
        if let Some(desc) = &q.desc {
            println!("    {}", desc);
        }
    }
    Ok(())
}

fn last_seen(store: &LastSeenStore, clear: bool) -> Result<(), Box<dyn Error>> {
    if clear {
        store.clear()?;
        println!("cleared");
        return Ok(());
    }
    match store.read() {
        Some(seen) => println!("{}  {}", seen.label(), seen.href()),
        None => println!("(none)"),
    }
    Ok(())
}

fn run(args: &Args, command: &Command) -> Result<(), Box<dyn Error>> {
    let content = ContentStore::new(&args.content_dir);
    match command {
        Command::Projects => list_projects(&content),
        Command::PatchNotes { project } => list_patch_notes(&content, project.as_deref()),
        Command::Quests { slug } => print_quests(&content, slug),
        Command::LastSeen { clear } => last_seen(&LastSeenStore::new(&args.state_file), *clear),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(
        args.verbose,
        args.quiet,
        args.log_file.as_deref(),
        args.command.is_some(),
    );

    if let Some(command) = &args.command {
        if let Err(e) = run(&args, command) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    debug!(
        content = %args.content_dir.display(),
        state = %args.state_file.display(),
        "starting TUI"
    );
    let app = App::new(
        ContentStore::new(&args.content_dir),
        LastSeenStore::new(&args.state_file),
        args.wide_at,
    );
    let tick_rate = Duration::from_millis(args.tick_ms.max(1));

    if let Err(e) = app.run(tick_rate) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
