use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "letsdo", version, about = "LetsDo: manage your work todos")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite file holding the todo list.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Keep todos in memory only; nothing survives the process.
    #[arg(long, global = true, conflicts_with = "db")]
    pub memory: bool,

    /// Directory for rolling log files.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ListArgs {
    /// Hide completed todos.
    #[arg(long)]
    pub hide_finished: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AddArgs {
    /// Task text; words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IdArgs {
    /// Full id or unique prefix.
    pub id: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show todos.
    List(ListArgs),
    /// Add a todo (text must be longer than 3 characters).
    Add(AddArgs),
    /// Remove a todo and print its text for re-entry.
    Edit(IdArgs),
    /// Delete a todo.
    Delete(IdArgs),
    /// Flip a todo between open and done.
    Toggle(IdArgs),
    /// Drop the stored list.
    Reset,
    /// Interactive session.
    Shell,
}
