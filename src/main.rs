mod app;
mod clipboard_utils;
mod debounce;
mod error;
mod history;
mod logger;
mod manager;
mod note;
mod poller;
mod settings;
mod store;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::note::Note;
use crate::settings::Settings;
use crate::store::{JsonFileRepository, NoteRepository};

/// PasteNotes - clipboard history you can search, rename and copy back
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// History file (default: <data dir>/PasteNotes/pastenotes.json)
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Clipboard polling period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = poller::DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    poll_interval_ms: u64,

    /// Quiet period before changes are written, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = debounce::DEFAULT_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    /// Print the stored history and exit instead of opening the window
    #[arg(long)]
    list: bool,

    /// With --list, only print notes whose title or content contains this
    #[arg(long, value_name = "QUERY", requires = "list")]
    search: Option<String>,

    /// With --list, print JSON instead of text
    #[arg(long, requires = "list")]
    json: bool,
}

fn main() {
    logger::init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let settings = match Settings::new(args.data_file.clone(), args.poll_interval_ms, args.debounce_ms) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(data_file = %settings.data_file.display(), "starting");

    if args.list {
        let query = args.search.as_deref().unwrap_or("");
        if let Err(e) = print_history(&settings, query, args.json) {
            eprintln!("Error listing history: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = app::run_gui(settings) {
        eprintln!("Error running GUI: {}", e);
        std::process::exit(1);
    }
}

/// Write the stored notes matching `query` to stdout
fn print_history(settings: &Settings, query: &str, json: bool) -> error::Result<()> {
    let repository = JsonFileRepository::new(&settings.data_file);
    let history = history::History::from_notes(repository.load()?);
    let notes = history.search(query);
    tracing::debug!(
        path = %repository.path().display(),
        total = history.len(),
        shown = notes.len(),
        "listing history"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &notes)?;
        writeln!(out).map_err(|e| error::Error::io("<stdout>", e))?;
    } else {
        for note in notes {
            write_note(&mut out, note).map_err(|e| error::Error::io("<stdout>", e))?;
        }
    }
    Ok(())
}

fn write_note(out: &mut impl Write, note: &Note) -> io::Result<()> {
    writeln!(out, "{}  {}", note.display_date(), note.title)?;
    for line in note.content.lines() {
        writeln!(out, "    {}", line)?;
    }
    writeln!(out)
}
