use std::{
    io::{self, BufRead, Stdout},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use todo_view::{Completion, TodoClient, TodoList, UreqTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod screen;

use command::{parse, Command, HELP};
use config::load_settings;
use screen::{describe, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "todo-term", about = "Terminal front end for a remote to-do list")]
struct Cli {
    /// Config file (defaults to ./todo.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    collection_path: Option<String>,
}

type App = TodoList<UreqTransport, TerminalSurface<Stdout>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(v) = cli.base_url {
        settings.base_url = v;
    }
    if let Some(v) = cli.collection_path {
        settings.collection_path = v;
    }

    // Logs go to stderr; stdout is the list.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log_filter).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    info!(base_url = %settings.base_url, collection = %settings.collection_path, "starting");
    let client = TodoClient::new(&settings.base_url).with_collection(&settings.collection_path);
    let mut app = TodoList::new(client, UreqTransport::new(), TerminalSurface::new(io::stdout()));
    app.load();

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => run(&mut app, cmd),
            Err(err) => app.surface_mut().notice(&err.to_string()),
        }
    }
    Ok(())
}

fn run(app: &mut App, cmd: Command) {
    match cmd {
        Command::Add(title) => {
            if app.add(&title) == Completion::Skipped {
                app.surface_mut().notice("title is empty");
            }
        }
        Command::Row { kind, row } => {
            let gesture = app
                .surface()
                .row(row)
                .and_then(|r| r.action(kind))
                .map(|a| a.gesture.clone());
            match gesture {
                Some(gesture) => {
                    app.dispatch(&gesture);
                }
                None => app.surface_mut().notice(&format!("row {row} has no such action")),
            }
        }
        Command::Show { row } => {
            let Some(id) = app.surface().row(row).map(|r| r.id.clone()) else {
                app.surface_mut().notice(&format!("no row {row}"));
                return;
            };
            match app.fetch(&id) {
                Ok(todo) => app.surface_mut().notice(&describe(&todo)),
                Err(err) => app.surface_mut().notice(&format!("could not fetch row {row}: {err}")),
            }
        }
        Command::Reload => {
            app.load();
        }
        Command::Help => app.surface_mut().notice(HELP),
        Command::Quit => {}
    }
}
