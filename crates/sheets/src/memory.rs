//! In-memory sheet backend.
//!
//! Keeps one tab as a grid of strings. Besides serving tests it lets the
//! scan run without a spreadsheet (`--dry-run`), with the report printed at
//! the end.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use groupsweep_core::CoreError;

use crate::backend::SheetBackend;
use crate::error::SheetError;

#[derive(Debug, Default)]
struct Tab {
    rows: Vec<Vec<String>>,
    bold_rows: BTreeSet<usize>,
    frozen_rows: usize,
}

impl Tab {
    /// 1-based index of the last row holding any non-empty cell, or 0.
    fn last_used_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_empty()))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn row_mut(&mut self, row: usize) -> &mut Vec<String> {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        &mut self.rows[row - 1]
    }
}

/// A single tab held in memory.
#[derive(Debug)]
pub struct MemorySheetBackend {
    name: String,
    tab: Mutex<Option<Tab>>,
}

impl MemorySheetBackend {
    /// A backend whose tab does not exist yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tab: Mutex::new(None),
        }
    }

    /// A backend whose tab already holds `rows` (row 1 first).
    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            tab: Mutex::new(Some(Tab {
                rows,
                ..Tab::default()
            })),
        }
    }

    /// Whether the tab has been created.
    pub fn exists(&self) -> bool {
        self.lock().is_some()
    }

    /// Copy of every row up to the last non-empty one.
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        match self.lock().as_ref() {
            Some(tab) => tab.rows[..tab.last_used_row()].to_vec(),
            None => Vec::new(),
        }
    }

    /// Whether `row` is rendered bold.
    pub fn is_bold(&self, row: usize) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|t| t.bold_rows.contains(&row))
    }

    /// Number of frozen rows.
    pub fn frozen_rows(&self) -> usize {
        self.lock().as_ref().map(|t| t.frozen_rows).unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Tab>> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.tab.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_tab<T>(&self, f: impl FnOnce(&mut Tab) -> T) -> Result<T, SheetError> {
        let mut guard = self.lock();
        let tab = guard.as_mut().ok_or_else(|| CoreError::NotFound {
            entity: "sheet",
            key: self.name.clone(),
        })?;
        Ok(f(tab))
    }
}

fn check_position(row: usize, column: usize) -> Result<(), SheetError> {
    if row == 0 || column == 0 {
        return Err(SheetError::Layout(format!(
            "row {row}, column {column} (positions are 1-based)"
        )));
    }
    Ok(())
}

#[async_trait]
impl SheetBackend for MemorySheetBackend {
    fn sheet_name(&self) -> &str {
        &self.name
    }

    async fn ensure_sheet(&self) -> Result<(), SheetError> {
        let mut guard = self.lock();
        if guard.is_none() {
            *guard = Some(Tab::default());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), SheetError> {
        self.with_tab(|tab| *tab = Tab::default())
    }

    async fn write_row(&self, row: usize, cells: &[String]) -> Result<(), SheetError> {
        check_position(row, 1)?;
        self.with_tab(|tab| {
            let target = tab.row_mut(row);
            if target.len() < cells.len() {
                target.resize(cells.len(), String::new());
            }
            target[..cells.len()].clone_from_slice(cells);
        })
    }

    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError> {
        self.with_tab(|tab| {
            let next = tab.last_used_row() + 1;
            *tab.row_mut(next) = cells.to_vec();
        })
    }

    async fn read_rows(
        &self,
        first_row: usize,
        columns: usize,
    ) -> Result<Vec<Vec<String>>, SheetError> {
        check_position(first_row, columns.max(1))?;
        self.with_tab(|tab| {
            let end = tab.last_used_row();
            if first_row > end {
                return Vec::new();
            }
            tab.rows[first_row - 1..end]
                .iter()
                .map(|r| {
                    let mut cells: Vec<String> = r.iter().take(columns).cloned().collect();
                    while cells.last().is_some_and(|c| c.is_empty()) {
                        cells.pop();
                    }
                    cells
                })
                .collect()
        })
    }

    async fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), SheetError> {
        check_position(row, column)?;
        self.with_tab(|tab| {
            let target = tab.row_mut(row);
            if target.len() < column {
                target.resize(column, String::new());
            }
            target[column - 1] = value.to_string();
        })
    }

    async fn format_header(&self, _columns: usize) -> Result<(), SheetError> {
        self.with_tab(|tab| {
            tab.bold_rows.insert(1);
            tab.frozen_rows = 1;
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn missing_tab_is_not_found() {
        let backend = MemorySheetBackend::new("Report");
        let err = backend.read_rows(1, 5).await.unwrap_err();
        assert_matches!(err, SheetError::Core(CoreError::NotFound { entity: "sheet", .. }));
    }

    #[tokio::test]
    async fn append_goes_after_last_used_row() {
        let backend = MemorySheetBackend::new("Report");
        backend.ensure_sheet().await.unwrap();
        backend.write_row(1, &cells(&["h1", "h2"])).await.unwrap();
        backend.append_row(&cells(&["a", "b"])).await.unwrap();
        backend.append_row(&cells(&["c", "d"])).await.unwrap();

        assert_eq!(
            backend.snapshot(),
            vec![cells(&["h1", "h2"]), cells(&["a", "b"]), cells(&["c", "d"])]
        );
    }

    #[tokio::test]
    async fn read_rows_trims_trailing_empty_cells() {
        let backend =
            MemorySheetBackend::with_rows("Report", vec![cells(&["h"]), cells(&["a", "", ""])]);
        let rows = backend.read_rows(2, 6).await.unwrap();
        assert_eq!(rows, vec![cells(&["a"])]);
    }

    #[tokio::test]
    async fn write_cell_extends_row() {
        let backend = MemorySheetBackend::with_rows("Report", vec![cells(&["h"])]);
        backend.write_cell(1, 3, "x").await.unwrap();
        assert_eq!(backend.snapshot(), vec![cells(&["h", "", "x"])]);
    }

    #[tokio::test]
    async fn zero_row_is_layout_error() {
        let backend = MemorySheetBackend::with_rows("Report", Vec::new());
        let err = backend.write_cell(0, 1, "x").await.unwrap_err();
        assert_matches!(err, SheetError::Layout(_));
    }

    #[tokio::test]
    async fn clear_drops_values_and_formatting() {
        let backend = MemorySheetBackend::with_rows("Report", vec![cells(&["h"])]);
        backend.format_header(1).await.unwrap();
        assert!(backend.is_bold(1));

        backend.clear().await.unwrap();
        assert!(backend.snapshot().is_empty());
        assert!(!backend.is_bold(1));
        assert_eq!(backend.frozen_rows(), 0);
    }
}
