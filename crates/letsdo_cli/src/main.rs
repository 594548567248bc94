//! `letsdo` command-line front-end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the local store.
//! - Dispatch one-shot subcommands or the interactive shell.

mod args;
mod commands;
mod config;
mod error;
mod render;
mod shell;

use args::{Args, Commands, ListArgs};
use clap::Parser;
use config::{CliConfig, StorageTarget};
use error::CliError;
use letsdo_core::db::open_db;
use letsdo_core::{
    init_logging, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreEvent,
    TodoPersistence, TodoStore,
};
use log::{error, info};
use std::io;

fn main() {
    let code = match run(Args::parse()) {
        Ok(()) => 0,
        Err(err) => {
            error!("event=cli_exit module=cli status=error code={}", err.exit_code());
            eprintln!("letsdo: {err}");
            err.exit_code()
        }
    };
    log::logger().flush();
    std::process::exit(code);
}

fn run(args: Args) -> Result<(), CliError> {
    let config = CliConfig::from_args(&args)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok core_version={} memory={}",
        letsdo_core::core_version(),
        config.storage == StorageTarget::Memory
    );

    let command = args
        .command
        .unwrap_or_else(|| Commands::List(ListArgs::default()));

    match &config.storage {
        StorageTarget::Memory => {
            let store = TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new()))?;
            dispatch(store, command)
        }
        StorageTarget::File(path) => {
            let conn = open_db(path)?;
            let store = TodoStore::load(TodoPersistence::new(SqliteKeyValueStore::new(&conn)))?;
            dispatch(store, command)
        }
    }
}

fn dispatch<S: KeyValueStore>(mut store: TodoStore<S>, command: Commands) -> Result<(), CliError> {
    if let StoreEvent::Loaded {
        recovered_from_corrupt: true,
        ..
    } = store.load_event()
    {
        eprintln!("letsdo: warning: stored todos were unreadable; starting with an empty list");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(&mut store, command, &mut out)
}
