//! Interactive text menu
//!
//! A read-eval loop over a main menu and four transient sub-menus. Every
//! sub-menu handles one line of input, prints its outcome and returns to
//! the main menu. Invalid input prints an error without re-prompting.

mod actions;
mod listing;
mod transfer;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::task::{Storage, Task, TaskId, TaskStore};

/// Menu levels below the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    TaskAction,
    TaskListing,
    ExportFormat,
    ImportFormat,
}

/// What a main-menu choice leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter(MenuState),
    Exit,
}

impl MenuState {
    pub fn from_main_choice(choice: &str) -> Option<Transition> {
        match choice.trim() {
            "1" => Some(Transition::Enter(Self::TaskAction)),
            "2" => Some(Transition::Enter(Self::TaskListing)),
            "3" => Some(Transition::Enter(Self::ExportFormat)),
            "4" => Some(Transition::Enter(Self::ImportFormat)),
            "5" => Some(Transition::Exit),
            _ => None,
        }
    }
}

/// Owns the session's store and terminal streams
pub struct Menu<R, W> {
    store: TaskStore,
    storage: Storage,
    input: R,
    out: W,
    color: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: TaskStore, storage: Storage, input: R, out: W) -> Self {
        Self {
            store,
            storage,
            input,
            out,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    /// Read the data file into the store, reporting skipped rows
    pub fn load(&mut self) -> Result<()> {
        let report = self
            .storage
            .load_into(&mut self.store)
            .context("Failed to load tasks")?;
        for skipped in &report.skipped {
            writeln!(self.out, "Skipping invalid record at {}", skipped)?;
        }
        Ok(())
    }

    /// Run until the user exits or input ends, then save.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("Choose an option (1-5): ")? else {
                debug!("Input closed, exiting");
                break;
            };

            match MenuState::from_main_choice(&choice) {
                Some(Transition::Enter(state)) => self.enter(state)?,
                Some(Transition::Exit) => break,
                None => writeln!(self.out, "Invalid choice, please try again.")?,
            }
        }

        self.storage
            .save(&self.store)
            .context("Failed to save tasks")?;
        writeln!(self.out, "Exiting program...")?;
        Ok(())
    }

    fn enter(&mut self, state: MenuState) -> Result<()> {
        debug!("Entering {:?} menu", state);
        match state {
            MenuState::Main => Ok(()),
            MenuState::TaskAction => self.task_action_menu(),
            MenuState::TaskListing => self.task_listing_menu(),
            MenuState::ExportFormat => self.export_menu(),
            MenuState::ImportFormat => self.import_menu(),
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        let options = [
            "Press the 1 key for task actions (Add, Edit, Delete)",
            "Press the 2 key for task listing (List, Filter, Sort)",
            "Press the 3 key to export tasks",
            "Press the 4 key to import tasks",
            "Press the 5 key to exit the program",
        ];

        writeln!(self.out, "\nWelcome to Task Manager")?;
        for option in options {
            if self.color {
                writeln!(self.out, "{}", option.green())?;
            } else {
                writeln!(self.out, "{}", option)?;
            }
        }
        Ok(())
    }

    /// Print `message` and read one line without its line ending.
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt for a task ID; prints an error and returns `None` on bad input
    fn prompt_task_id(&mut self, message: &str) -> Result<Option<TaskId>> {
        let Some(answer) = self.prompt(message)? else {
            return Ok(None);
        };
        match answer.parse::<TaskId>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                writeln!(self.out, "{}", capitalize_first(&e.to_string()))?;
                Ok(None)
            }
        }
    }
}

fn write_tasks<W: Write>(out: &mut W, heading: &str, tasks: &[(TaskId, &Task)]) -> Result<()> {
    writeln!(out, "\n{}", heading)?;
    for (id, task) in tasks {
        writeln!(out, "{}", task.to_line(*id))?;
    }
    Ok(())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    pub(super) struct Session {
        pub temp: TempDir,
        pub output: String,
        pub store: TaskStore,
    }

    /// Run a full menu session over scripted input
    pub(super) fn run_script(store: TaskStore, script: &str) -> Session {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("tasks.csv"), temp.path());
        let mut out = Vec::new();

        let mut menu = Menu::new(store, storage, Cursor::new(script.as_bytes().to_vec()), &mut out);
        menu.run().unwrap();
        let store = menu.into_store();

        Session {
            temp,
            output: String::from_utf8(out).unwrap(),
            store,
        }
    }

    #[test]
    fn test_main_choice_transitions() {
        assert_eq!(
            MenuState::from_main_choice("1"),
            Some(Transition::Enter(MenuState::TaskAction))
        );
        assert_eq!(
            MenuState::from_main_choice(" 4 "),
            Some(Transition::Enter(MenuState::ImportFormat))
        );
        assert_eq!(MenuState::from_main_choice("5"), Some(Transition::Exit));
        assert_eq!(MenuState::from_main_choice("6"), None);
        assert_eq!(MenuState::from_main_choice(""), None);
    }

    #[test]
    fn test_exit_saves_store() {
        let mut store = TaskStore::new();
        store.add("persist me", "New", "Low").unwrap();

        let session = run_script(store, "5\n");
        assert!(session.output.contains("Exiting program..."));
        let saved = std::fs::read_to_string(session.temp.path().join("tasks.csv")).unwrap();
        assert_eq!(saved, "1,persist me,New,Low\n");
    }

    #[test]
    fn test_eof_behaves_like_exit() {
        let session = run_script(TaskStore::new(), "");
        assert!(session.output.contains("Exiting program..."));
        assert!(session.temp.path().join("tasks.csv").exists());
    }

    #[test]
    fn test_invalid_main_choice_loops() {
        let session = run_script(TaskStore::new(), "9\n5\n");
        assert!(session.output.contains("Invalid choice, please try again."));
        assert_eq!(session.output.matches("Welcome to Task Manager").count(), 2);
    }

    #[test]
    fn test_menu_without_color_has_no_escape_codes() {
        let session = run_script(TaskStore::new(), "5\n");
        assert!(!session.output.contains('\u{1b}'));
    }

    #[test]
    fn test_load_reports_skipped_rows() -> Result<()> {
        let temp = TempDir::new()?;
        let data = temp.path().join("tasks.csv");
        std::fs::write(&data, "1,ok,New,Low\nnope,bad,New,Low\n")?;

        let mut out = Vec::new();
        let storage = Storage::new(&data, temp.path());
        let mut menu = Menu::new(TaskStore::new(), storage, Cursor::new(Vec::new()), &mut out);
        menu.load()?;
        assert_eq!(menu.store().len(), 1);
        drop(menu);

        let output = String::from_utf8(out)?;
        assert!(output.contains("Skipping invalid record at row 2: invalid task ID 'nope'"));
        Ok(())
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("invalid task ID"), "Invalid task ID");
        assert_eq!(capitalize_first(""), "");
    }
}
