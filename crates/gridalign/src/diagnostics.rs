use crate::{Cell, Error, Result};

/// Non fatal conditions encountered while processing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// A nodata cell that should have been filled but has no valid neighbour
    IsolatedCell(Cell),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::IsolatedCell(cell) => write!(f, "Isolated cell at row {} col {} could not be filled", cell.row, cell.col),
        }
    }
}

/// Collects the diagnostics of one or more operations.
/// The caller decides if any of them should be treated as an error.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn isolated_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries.iter().map(|diag| match diag {
            Diagnostic::IsolatedCell(cell) => *cell,
        })
    }

    /// Escalates the collected isolated cells to an error
    pub fn into_result(self) -> Result<()> {
        let cells: Vec<Cell> = self.isolated_cells().collect();
        if cells.is_empty() { Ok(()) } else { Err(Error::IsolatedCells(cells)) }
    }
}
