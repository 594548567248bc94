//! One-shot subcommand execution.

use crate::args::{AddArgs, Commands, IdArgs, ListArgs};
use crate::error::CliError;
use crate::render::{render_list, short_id};
use crate::shell;
use letsdo_core::{KeyValueStore, Todo, TodoId, TodoListView, TodoStore};
use log::info;
use std::io::{self, Write};

pub fn execute<S: KeyValueStore>(
    store: &mut TodoStore<S>,
    command: Commands,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::List(ListArgs { hide_finished }) => {
            if hide_finished && store.show_finished() {
                store.toggle_show_finished();
            }
            render_list(&TodoListView::from_store(store), out)?;
        }
        Commands::Add(AddArgs { text }) => {
            let id = store.add(&text.join(" "))?;
            writeln!(out, "Added {}", short_id(&id))?;
        }
        Commands::Edit(IdArgs { id }) => {
            let id = resolve_id(store.todos(), &id)?;
            store.begin_edit(&id)?;
            writeln!(out, "Removed {} for editing. Re-add it with:", short_id(&id))?;
            writeln!(out, "{}", store.staged())?;
        }
        Commands::Delete(IdArgs { id }) => {
            let id = resolve_id(store.todos(), &id)?;
            store.delete(&id)?;
            writeln!(out, "Deleted {}", short_id(&id))?;
        }
        Commands::Toggle(IdArgs { id }) => {
            let id = resolve_id(store.todos(), &id)?;
            let done = store
                .toggle_complete(&id)?
                .ok_or_else(|| CliError::UnknownId(id.to_string()))?;
            let state = if done { "done" } else { "open" };
            writeln!(out, "Marked {} {state}", short_id(&id))?;
        }
        Commands::Reset => {
            let existed = store.persistence().clear()?;
            info!("event=todos_reset module=cli status=ok existed={existed}");
            writeln!(
                out,
                "{}",
                if existed {
                    "Stored todos removed."
                } else {
                    "Nothing stored."
                }
            )?;
        }
        Commands::Shell => {
            let stdin = io::stdin();
            shell::run(store, stdin.lock(), out)?;
        }
    }
    Ok(())
}

/// Resolves a full id or unique id prefix against the current list.
///
/// An exact id wins outright; otherwise the needle is an ASCII
/// case-insensitive prefix that must match exactly one id.
pub fn resolve_id(todos: &[Todo], needle: &str) -> Result<TodoId, CliError> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Err(CliError::UnknownId(needle.to_string()));
    }
    if let Some(todo) = todos.iter().find(|todo| todo.id.as_str() == needle) {
        return Ok(todo.id.clone());
    }

    let mut matches = todos.iter().filter(|todo| {
        todo.id
            .as_str()
            .get(..needle.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(needle))
    });
    let first = matches.next();
    let rest = matches.count();
    match (first, rest) {
        (Some(todo), 0) => Ok(todo.id.clone()),
        (Some(_), rest) => Err(CliError::AmbiguousId {
            needle: needle.to_string(),
            matches: rest + 1,
        }),
        (None, _) => Err(CliError::UnknownId(needle.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, resolve_id};
    use crate::args::{AddArgs, Commands, IdArgs, ListArgs};
    use crate::error::{CliError, EXIT_REJECTED};
    use letsdo_core::{MemoryKeyValueStore, Todo, TodoPersistence, TodoStore};

    fn todo_with_id(id: &str) -> Todo {
        Todo::from_parts(id, "some task", false, "now").unwrap()
    }

    fn run(store: &mut TodoStore<MemoryKeyValueStore>, command: Commands) -> String {
        let mut out = Vec::new();
        execute(store, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn resolve_id_accepts_full_id_and_unique_prefix() {
        let todos = vec![
            todo_with_id("aaaa1111-0000-4000-8000-000000000000"),
            todo_with_id("aaab2222-0000-4000-8000-000000000000"),
        ];

        assert_eq!(
            resolve_id(&todos, "AAAB").unwrap(),
            todos[1].id,
            "prefix match is case-insensitive"
        );
        assert_eq!(
            resolve_id(&todos, "aaaa1111-0000-4000-8000-000000000000").unwrap(),
            todos[0].id
        );
        assert!(matches!(
            resolve_id(&todos, "aaa"),
            Err(CliError::AmbiguousId { matches: 2, .. })
        ));
        assert!(matches!(
            resolve_id(&todos, "ffff"),
            Err(CliError::UnknownId(_))
        ));
        assert!(matches!(
            resolve_id(&todos, "ffff1111-0000-4000-8000-000000000000"),
            Err(CliError::UnknownId(_))
        ));
    }

    #[test]
    fn resolve_id_handles_ids_that_are_not_uuids() {
        let todos = vec![
            todo_with_id("task-1"),
            todo_with_id("task-10"),
            todo_with_id("Inbox/7"),
        ];

        assert_eq!(resolve_id(&todos, "task-1").unwrap(), todos[0].id);
        assert_eq!(resolve_id(&todos, "task-10").unwrap(), todos[1].id);
        assert_eq!(resolve_id(&todos, "inbox").unwrap(), todos[2].id);
        assert!(matches!(
            resolve_id(&todos, "task"),
            Err(CliError::AmbiguousId { matches: 2, .. })
        ));
        assert!(matches!(
            resolve_id(&todos, "task-2"),
            Err(CliError::UnknownId(_))
        ));
    }

    #[test]
    fn toggle_addresses_a_stored_non_uuid_id() {
        let kv = MemoryKeyValueStore::new();
        TodoPersistence::new(&kv)
            .save(&[todo_with_id("legacy-42")])
            .unwrap();
        let mut store = TodoStore::load(TodoPersistence::new(&kv)).unwrap();
        let mut out = Vec::new();

        execute(
            &mut store,
            Commands::Toggle(IdArgs {
                id: "legacy-42".to_string(),
            }),
            &mut out,
        )
        .unwrap();

        assert_eq!(store.todos()[0].id.as_str(), "legacy-42");
        assert!(store.todos()[0].is_completed);
        assert_eq!(String::from_utf8(out).unwrap(), "Marked legacy-4 done\n");
    }

    #[test]
    fn add_then_list_then_toggle() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();

        let added = run(
            &mut store,
            Commands::Add(AddArgs {
                text: vec!["wash".to_string(), "dishes".to_string()],
            }),
        );
        assert!(added.starts_with("Added "), "{added}");
        assert_eq!(store.todos()[0].text, "wash dishes");

        let id = store.todos()[0].id.to_string();
        let toggled = run(&mut store, Commands::Toggle(IdArgs { id: id[..6].to_string() }));
        assert!(toggled.contains("done"), "{toggled}");

        let listed = run(
            &mut store,
            Commands::List(ListArgs {
                hide_finished: true,
            }),
        );
        assert!(listed.contains("No Todos to display"), "{listed}");
    }

    #[test]
    fn edit_prints_staged_text_and_removes_item() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        let id = store.add("fix the bike").unwrap();

        let output = run(&mut store, Commands::Edit(IdArgs { id: id.to_string() }));

        assert!(output.ends_with("fix the bike\n"), "{output}");
        assert!(store.todos().is_empty());
    }

    #[test]
    fn short_add_exits_with_rejection_code() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        let mut out = Vec::new();

        let err = execute(
            &mut store,
            Commands::Add(AddArgs {
                text: vec!["ab".to_string()],
            }),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), EXIT_REJECTED);
        assert!(store.todos().is_empty());
    }

    #[test]
    fn reset_clears_stored_list() {
        let mut store =
            TodoStore::load(TodoPersistence::new(MemoryKeyValueStore::new())).unwrap();
        store.add("to be wiped").unwrap();

        assert!(run(&mut store, Commands::Reset).contains("removed"));
        assert!(store.persistence().load().unwrap().is_none());
    }
}
