//! List, filter and sort handlers

use anyhow::Result;
use std::io::{BufRead, Write};

use super::{write_tasks, Menu};
use crate::task::{normalize_case, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAction {
    List,
    Filter,
    Sort,
}

impl ListingAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" => Some(Self::List),
            "filter" => Some(Self::Filter),
            "sort" => Some(Self::Sort),
            _ => None,
        }
    }
}

fn sort_key_from_choice(choice: &str) -> Option<SortKey> {
    match choice.trim() {
        "1" => Some(SortKey::Id),
        "2" => Some(SortKey::Priority),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub(super) fn task_listing_menu(&mut self) -> Result<()> {
        let Some(answer) = self.prompt(
            "\nWould you like to 'list', 'filter', or 'sort' tasks? (type 'list', 'filter', or 'sort'): ",
        )?
        else {
            return Ok(());
        };

        match ListingAction::parse(&answer) {
            Some(ListingAction::List) => self.list_tasks(),
            Some(ListingAction::Filter) => self.filter_tasks(),
            Some(ListingAction::Sort) => self.sort_tasks(),
            None => {
                writeln!(
                    self.out,
                    "Invalid option. Please type 'list', 'filter', or 'sort'."
                )?;
                Ok(())
            }
        }
    }

    fn list_tasks(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "No tasks available.")?;
            return Ok(());
        }
        write_tasks(&mut self.out, "Current Tasks:", &self.store.list())
    }

    fn filter_tasks(&mut self) -> Result<()> {
        let Some(answer) =
            self.prompt("\nEnter the status to filter by (New, In Progress, Complete): ")?
        else {
            return Ok(());
        };
        let status = normalize_case(&answer);

        let matches = self.store.filter_by_status(&status);
        if matches.is_empty() {
            writeln!(self.out, "No tasks found with the status '{}'.", status)?;
            return Ok(());
        }
        write_tasks(
            &mut self.out,
            &format!("Tasks with status '{}':", status),
            &matches,
        )
    }

    fn sort_tasks(&mut self) -> Result<()> {
        writeln!(self.out, "\nHow would you like to sort the tasks?")?;
        writeln!(self.out, "1: By Task ID")?;
        writeln!(self.out, "2: By Priority (Low, Medium, High)")?;
        let Some(choice) = self.prompt("Choose an option (1 or 2): ")? else {
            return Ok(());
        };

        let Some(key) = sort_key_from_choice(&choice) else {
            writeln!(self.out, "Invalid choice.")?;
            return Ok(());
        };
        write_tasks(&mut self.out, "Sorted Tasks:", &self.store.sort(key))
    }
}
