//! Interactive session mirroring the single-page list screen.
//!
//! The session keeps the staged input and show-finished flag for its
//! lifetime. A store subscription marks the screen dirty; the loop redraws
//! once per command when anything changed.

use crate::commands::resolve_id;
use crate::error::CliError;
use crate::render::{render_list, short_id};
use letsdo_core::{KeyValueStore, StoreEvent, TodoListView, TodoStore};
use log::debug;
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const PROMPT: &str = "letsdo> ";

const HELP: &str = "\
commands:
  type <text>    stage text for the next add
  add [text]     add staged text (or the given text)
  edit <id>      remove a todo and stage its text
  delete <id>    delete a todo
  toggle <id>    flip done/open
  filter         show/hide finished todos
  list           redraw the list
  help           this message
  quit           leave the session";

enum Flow {
    Continue,
    Quit,
}

/// Runs the session until `quit` or end of input.
///
/// Rejected input and unknown ids are reported inline; storage failures end
/// the session with an error.
pub fn run<S: KeyValueStore>(
    store: &mut TodoStore<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    store.subscribe(move |event: &StoreEvent| {
        debug!("event=shell_refresh module=cli status=pending trigger={event:?}");
        flag.set(true);
    });

    render_list(&TodoListView::from_store(store), out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        match handle_line(store, &line, out) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) if err.is_recoverable() => writeln!(out, "{err}")?,
            Err(err) => return Err(err),
        }

        if dirty.replace(false) {
            render_list(&TodoListView::from_store(store), out)?;
        }
    }
    Ok(())
}

fn handle_line<S: KeyValueStore>(
    store: &mut TodoStore<S>,
    line: &str,
    out: &mut impl Write,
) -> Result<Flow, CliError> {
    // `text` keeps everything after the single separator; ids use `rest`.
    let (command, text) = line
        .trim_start()
        .split_once(char::is_whitespace)
        .unwrap_or((line.trim(), ""));
    let rest = text.trim();

    match command.to_ascii_lowercase().as_str() {
        "" => {}
        "type" => {
            store.set_staged(text);
            let hint = if store.can_submit() {
                "ready to add"
            } else {
                "too short to add"
            };
            writeln!(out, "staged: {} ({hint})", store.staged())?;
        }
        "add" => {
            if !rest.is_empty() {
                store.set_staged(text);
            }
            let id = store.submit_staged()?;
            writeln!(out, "added {}", short_id(&id))?;
        }
        "edit" => {
            let id = resolve_id(store.todos(), rest)?;
            store.begin_edit(&id)?;
            writeln!(out, "staged: {}", store.staged())?;
        }
        "delete" => {
            let id = resolve_id(store.todos(), rest)?;
            store.delete(&id)?;
        }
        "toggle" => {
            let id = resolve_id(store.todos(), rest)?;
            store.toggle_complete(&id)?;
        }
        "filter" => {
            store.toggle_show_finished();
        }
        "list" => render_list(&TodoListView::from_store(store), out)?,
        "help" | "?" => writeln!(out, "{HELP}")?,
        "quit" | "exit" => return Ok(Flow::Quit),
        other => writeln!(out, "unknown command `{other}`; type `help`")?,
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::run;
    use letsdo_core::{MemoryKeyValueStore, TodoPersistence, TodoStore};
    use std::io::Cursor;

    fn session(script: &str) -> (TodoStore<MemoryKeyValueStore>, String) {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        let mut out = Vec::new();
        run(&mut store, Cursor::new(script.to_string()), &mut out).unwrap();
        (store, String::from_utf8(out).unwrap())
    }

    #[test]
    fn staged_text_is_added_and_cleared() {
        let (store, output) = session("type wash dishes\nadd\nquit\n");

        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.todos()[0].text, "wash dishes");
        assert_eq!(store.staged(), "");
        assert!(output.contains("staged: wash dishes (ready to add)"), "{output}");
        assert!(output.contains("wash dishes\n"), "{output}");
    }

    #[test]
    fn short_text_is_reported_and_session_continues() {
        let (store, output) = session("add ab\nadd long enough\n");

        assert_eq!(store.todos().len(), 1);
        assert!(output.contains("rejected:"), "{output}");
        assert_eq!(store.todos()[0].text, "long enough");
    }

    #[test]
    fn type_keeps_whitespace_around_staged_text() {
        let (store, output) = session("type   padded text  \n");

        assert_eq!(store.staged(), "  padded text  ");
        assert!(
            output.contains("staged:   padded text   (ready to add)"),
            "{output}"
        );
    }

    #[test]
    fn add_stores_text_exactly_as_typed() {
        let (store, _) = session("type  tab\tseparated \nadd\n");

        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.todos()[0].text, " tab\tseparated ");
    }

    #[test]
    fn edit_restages_text_for_readd() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        let id = store.add("call the plumber").unwrap();
        let script = format!("edit {}\nadd\n", &id.as_str()[..8]);
        let mut out = Vec::new();

        run(&mut store, Cursor::new(script), &mut out).unwrap();

        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.todos()[0].text, "call the plumber");
        assert_ne!(store.todos()[0].id, id);
    }

    #[test]
    fn filter_hides_finished_and_shows_empty_message() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        let id = store.add("wash dishes").unwrap();
        let script = format!("toggle {id}\nfilter\n");
        let mut out = Vec::new();

        run(&mut store, Cursor::new(script), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(!store.show_finished());
        assert_eq!(store.todos().len(), 1);
        assert!(output.trim_end().contains("No Todos to display"), "{output}");
    }

    #[test]
    fn unknown_commands_and_ids_do_not_end_the_session() {
        let (store, output) = session("frobnicate\ndelete 1234\nadd still alive\n");

        assert!(output.contains("unknown command `frobnicate`"), "{output}");
        assert!(output.contains("no todo matches id `1234`"), "{output}");
        assert_eq!(store.todos().len(), 1);
    }
}
