//! Export and import handlers

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

use super::Menu;
use crate::task::{Format, StorageError};

fn format_from_choice(choice: &str) -> Option<Format> {
    match choice.trim() {
        "1" => Some(Format::Csv),
        "2" => Some(Format::Text),
        "3" => Some(Format::Json),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    fn print_format_options(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n{}", title)?;
        for (n, format) in Format::ALL.iter().enumerate() {
            writeln!(self.out, "{}: {}", n + 1, format)?;
        }
        Ok(())
    }

    pub(super) fn export_menu(&mut self) -> Result<()> {
        self.print_format_options("Select export format:")?;
        let Some(choice) = self.prompt("Choose an option (1-3): ")? else {
            return Ok(());
        };

        let Some(format) = format_from_choice(&choice) else {
            writeln!(self.out, "Invalid option!")?;
            return Ok(());
        };

        match self.storage.export(&self.store, format) {
            Ok(path) => writeln!(self.out, "Tasks exported to {}", path.display())?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    pub(super) fn import_menu(&mut self) -> Result<()> {
        self.print_format_options("Select import format:")?;
        let Some(choice) = self.prompt("Choose an option (1-3): ")? else {
            return Ok(());
        };
        // The file name is asked for before the format choice is checked
        let Some(file_name) = self.prompt("Enter the filename: ")? else {
            return Ok(());
        };

        let Some(format) = format_from_choice(&choice) else {
            writeln!(self.out, "Invalid option!")?;
            return Ok(());
        };

        let path = Path::new(file_name.trim());
        match self.storage.import(path, format, &mut self.store) {
            Ok(report) => {
                for skipped in &report.skipped {
                    writeln!(self.out, "Skipping invalid record at {}", skipped)?;
                }
                writeln!(
                    self.out,
                    "Imported {} tasks from {} ({} skipped)",
                    report.tasks.len(),
                    path.display(),
                    report.skipped.len()
                )?;
            }
            Err(e @ StorageError::FileNotFound(_)) => writeln!(self.out, "{}", e)?,
            Err(e) => writeln!(self.out, "Import failed: {}", e)?,
        }
        Ok(())
    }
}
