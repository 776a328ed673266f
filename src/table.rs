//! Generic table state: sorting, filtering, diff tracking.
//!
//! Rows are identified by a stable `id()`, never by position, so selection
//! and change-highlighting survive re-sorts, filtering, and refreshes that
//! reorder the underlying data.

use std::collections::HashMap;

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Integer(i64),
    Float(f64),
    String(String),
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.partial_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Diff status against the previous refresh, for row highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiffStatus {
    /// Row id not seen on the previous refresh.
    New,
    /// Row changed; holds the changed column indices.
    Modified(Vec<usize>),
    #[default]
    Unchanged,
}

/// Trait for table row items.
pub trait TableRow: Clone {
    /// Stable unique identifier, used as the selection and diff key.
    fn row_id(&self) -> u64;

    fn column_count() -> usize;

    fn headers() -> Vec<&'static str>;

    /// Cell values as comparable strings (used for diffing, not display).
    fn cells(&self) -> Vec<String>;

    fn sort_key(&self, column: usize) -> SortKey;

    /// Case handling is up to the implementor; filters arrive verbatim.
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Sort, filter, and diff state for one table.
#[derive(Debug, Clone)]
pub struct TableState<T: TableRow> {
    /// All items, sorted, unfiltered.
    pub items: Vec<T>,
    pub sort_column: usize,
    /// true = ascending.
    pub sort_ascending: bool,
    pub filter: Option<String>,
    /// Entity id the selection should follow across reorders.
    pub tracked_id: Option<u64>,
    /// Previous items by id, for diffing.
    previous: HashMap<u64, T>,
    /// Diff status per row id, recomputed on every update.
    pub diff_status: HashMap<u64, DiffStatus>,
}

impl<T: TableRow> Default for TableState<T> {
    fn default() -> Self {
        Self::new(0, false)
    }
}

impl<T: TableRow> TableState<T> {
    pub fn new(sort_column: usize, sort_ascending: bool) -> Self {
        Self {
            items: Vec::new(),
            sort_column,
            sort_ascending,
            filter: None,
            tracked_id: None,
            previous: HashMap::new(),
            diff_status: HashMap::new(),
        }
    }

    /// Replaces the items, computing diff status against the previous set.
    /// Returns the number of rows not present before (skipping the very
    /// first load, where everything would count as new).
    pub fn update(&mut self, new_items: Vec<T>) -> usize {
        let first_load = self.previous.is_empty();
        self.diff_status.clear();
        let mut new_count = 0;
        for item in &new_items {
            let id = item.row_id();
            let status = if let Some(prev) = self.previous.get(&id) {
                let changed: Vec<usize> = prev
                    .cells()
                    .iter()
                    .zip(item.cells().iter())
                    .enumerate()
                    .filter(|(_, (p, n))| p != n)
                    .map(|(i, _)| i)
                    .collect();
                if changed.is_empty() {
                    DiffStatus::Unchanged
                } else {
                    DiffStatus::Modified(changed)
                }
            } else {
                new_count += 1;
                DiffStatus::New
            };
            self.diff_status.insert(id, status);
        }

        self.previous.clear();
        for item in &new_items {
            self.previous.insert(item.row_id(), item.clone());
        }

        self.items = new_items;
        self.apply_sort();
        if first_load { 0 } else { new_count }
    }

    /// Filtered view in current sort order.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| {
                self.filter
                    .as_ref()
                    .map(|f| item.matches_filter(f))
                    .unwrap_or(true)
            })
            .collect()
    }

    fn apply_sort(&mut self) {
        let col = self.sort_column;
        let asc = self.sort_ascending;
        self.items.sort_by(|a, b| {
            let cmp = a
                .sort_key(col)
                .partial_cmp(&b.sort_key(col))
                .unwrap_or(std::cmp::Ordering::Equal);
            if asc { cmp } else { cmp.reverse() }
        });
    }

    /// Cycles to the next sort column.
    pub fn next_sort_column(&mut self) {
        self.sort_column = (self.sort_column + 1) % T::column_count();
        self.apply_sort();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
        self.apply_sort();
    }

    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
    }

    /// Resolves the tracked entity against the current filtered order.
    ///
    /// Returns the index the selection should move to: the tracked row's new
    /// position if it is still present, otherwise `fallback` clamped to the
    /// filtered length. Updates `tracked_id` from the resolved row.
    pub fn resolve_selection(&mut self, fallback: usize) -> usize {
        let ids: Vec<u64> = self
            .filtered_items()
            .iter()
            .map(|item| item.row_id())
            .collect();
        if ids.is_empty() {
            self.tracked_id = None;
            return 0;
        }
        let index = self
            .tracked_id
            .and_then(|tid| ids.iter().position(|&id| id == tid))
            .unwrap_or_else(|| fallback.min(ids.len() - 1));
        self.tracked_id = Some(ids[index]);
        index
    }

    /// Forgets the tracked entity; the next resolve is position-based.
    pub fn clear_tracked(&mut self) {
        self.tracked_id = None;
    }
}
