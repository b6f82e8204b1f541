//! Add, edit and delete handlers

use anyhow::Result;
use std::io::{BufRead, Write};

use super::Menu;
use crate::task::{normalize_case, TaskEdit, TaskError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Add,
    Edit,
    Delete,
}

impl TaskAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Some(Self::Add),
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub(super) fn task_action_menu(&mut self) -> Result<()> {
        let Some(answer) = self.prompt(
            "\nWould you like to 'add', 'edit', or 'delete' a task? (type 'add', 'edit', or 'delete'): ",
        )?
        else {
            return Ok(());
        };

        match TaskAction::parse(&answer) {
            Some(TaskAction::Add) => self.add_task(),
            Some(TaskAction::Edit) => self.edit_task(),
            Some(TaskAction::Delete) => self.delete_task(),
            None => {
                writeln!(
                    self.out,
                    "Invalid option. Please type 'add', 'edit', or 'delete'."
                )?;
                Ok(())
            }
        }
    }

    fn add_task(&mut self) -> Result<()> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        let Some(status) = self.prompt("Enter task status (New, In Progress, Complete): ")? else {
            return Ok(());
        };
        let Some(priority) = self.prompt("Enter task priority (Low, Medium, High): ")? else {
            return Ok(());
        };

        match self.store.add(
            description,
            normalize_case(&status),
            normalize_case(&priority),
        ) {
            Ok(id) => writeln!(self.out, "Task {} added successfully.", id)?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn edit_task(&mut self) -> Result<()> {
        let Some(id) = self.prompt_task_id("\nEnter the Task ID to edit: ")? else {
            return Ok(());
        };
        let Some(current) = self.store.get(id).cloned() else {
            writeln!(self.out, "Task ID not found.")?;
            return Ok(());
        };

        writeln!(self.out, "Editing Task {}", id)?;
        let Some(description) = self.prompt(&format!(
            "Current Description: {}. Enter new description (or press Enter to keep): ",
            current.description
        ))?
        else {
            return Ok(());
        };
        let Some(status) = self.prompt(&format!(
            "Current Status: {}. Enter new status (New, In Progress, Complete, or press Enter to keep): ",
            current.status
        ))?
        else {
            return Ok(());
        };
        let Some(priority) = self.prompt(&format!(
            "Current Priority: {}. Enter new priority (Low, Medium, High, or press Enter to keep): ",
            current.priority
        ))?
        else {
            return Ok(());
        };

        let edit = TaskEdit::from_input(&description, &status, &priority);
        match self.store.edit(id, edit) {
            Ok(()) => writeln!(self.out, "Task {} updated successfully.", id)?,
            Err(TaskError::NotFound(_)) => writeln!(self.out, "Task ID not found.")?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn delete_task(&mut self) -> Result<()> {
        let Some(id) = self.prompt_task_id("\nEnter the Task ID to delete: ")? else {
            return Ok(());
        };

        match self.store.delete(id) {
            Ok(_) => writeln!(self.out, "Task {} deleted successfully.", id)?,
            Err(_) => writeln!(self.out, "Task ID not found.")?,
        }
        Ok(())
    }
}
