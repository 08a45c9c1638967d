use super::console::Console;
use crate::core::errors::Result;
use crate::core::validation::parse_choice;
use std::io::{BufRead, Write};

/// Width of the `N: ` prefix in front of every table row
const NUMBER_PREFIX: usize = 3;

/// Column headers and widths for a table-style menu
#[derive(Debug, Clone)]
pub struct TableLayout {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
}

impl TableLayout {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            headers: columns.iter().map(|(header, _)| *header).collect(),
            widths: columns.iter().map(|(_, width)| *width).collect(),
        }
    }

    fn header(&self) -> String {
        let cells: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        format!("{}{}", " ".repeat(NUMBER_PREFIX), self.pad_cells(&cells))
    }

    fn row(&self, number: usize, cells: &[String]) -> String {
        format!("{}: {}", number, self.pad_cells(cells))
    }

    fn pad_cells(&self, cells: &[String]) -> String {
        cells
            .iter()
            .zip(&self.widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let width = if i == 0 { width.saturating_sub(NUMBER_PREFIX) } else { *width };
                format!("{:<width$}", cell, width = width)
            })
            .collect()
    }
}

/// One selectable line of a menu
#[derive(Debug, Clone)]
pub struct MenuEntry<A> {
    pub label: String,
    /// Cells shown instead of the label when the menu is a table
    pub cells: Option<Vec<String>>,
    pub action: A,
}

/// A numbered list of choices, each carrying the action it triggers
#[derive(Debug, Clone)]
pub struct Menu<A> {
    title: String,
    entries: Vec<MenuEntry<A>>,
    table: Option<TableLayout>,
}

impl<A: Clone> Menu<A> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            table: None,
        }
    }

    pub fn with_table(mut self, layout: TableLayout) -> Self {
        self.table = Some(layout);
        self
    }

    pub fn with_entry(mut self, label: impl Into<String>, action: A) -> Self {
        self.push(label, action);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, action: A) {
        self.entries.push(MenuEntry {
            label: label.into(),
            cells: None,
            action,
        });
    }

    /// Add an entry rendered as a table row
    pub fn push_row(&mut self, cells: Vec<String>, action: A) {
        self.entries.push(MenuEntry {
            label: cells.first().cloned().unwrap_or_default(),
            cells: Some(cells),
            action,
        });
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[MenuEntry<A>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full text printed before reading a choice
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if !self.title.trim().is_empty() {
            lines.push(self.title.clone());
        }
        if let Some(table) = &self.table {
            lines.push(table.header());
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let number = i + 1;
            match (&self.table, &entry.cells) {
                (Some(table), Some(cells)) => lines.push(table.row(number, cells)),
                _ => lines.push(format!("{}: {}", number, entry.label)),
            }
        }
        lines.push(format!("Please enter a choice between 1 and {}:", self.entries.len()));
        lines.join("\n")
    }

    /// Read lines until one names an entry, then return its action
    pub fn select<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<A> {
        loop {
            let line = console.read_line()?;
            match parse_choice(&line, self.entries.len()) {
                Some(choice) => return Ok(self.entries[choice - 1].action.clone()),
                None => console.say("Invalid selection. Please try again: ")?,
            }
        }
    }
}
