//! Ticket table view: columns, sort keys, and view-model construction.

use crate::fmt;
use crate::model::Ticket;
use crate::table::{DiffStatus, SortKey, TableRow, TableState};

use super::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

/// Column order: ID, PRI, STATUS, AGE, UPDATED, REQUESTER, ASSIGNEE,
/// CATEGORY, TITLE.
pub const SORTABLE_COLUMNS: usize = 9;

/// Default sort: AGE column (creation time), newest first.
pub const DEFAULT_SORT_COLUMN: usize = 3;

impl TableRow for Ticket {
    fn row_id(&self) -> u64 {
        self.id
    }

    fn column_count() -> usize {
        SORTABLE_COLUMNS
    }

    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "PRI",
            "STATUS",
            "AGE",
            "UPDATED",
            "REQUESTER",
            "ASSIGNEE",
            "CATEGORY",
            "TITLE",
        ]
    }

    fn cells(&self) -> Vec<String> {
        // Raw values only: these feed the refresh diff and must not depend
        // on the current clock.
        vec![
            self.id.to_string(),
            self.priority.label().to_string(),
            self.status.name().to_string(),
            self.date_creation.clone().unwrap_or_default(),
            self.date_mod.clone().unwrap_or_default(),
            self.requester.clone().unwrap_or_default(),
            self.assignee.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.name.clone(),
        ]
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::Integer(self.id as i64),
            1 => SortKey::Integer(self.priority.rank()),
            2 => SortKey::Integer(i64::from(self.status)),
            // Backend timestamps sort correctly as strings; missing dates
            // sort to the bottom of a descending view.
            3 => SortKey::String(self.date_creation.clone().unwrap_or_default()),
            4 => SortKey::String(self.date_mod.clone().unwrap_or_default()),
            5 => SortKey::String(lower_or_empty(self.requester.as_deref())),
            6 => SortKey::String(lower_or_empty(self.assignee.as_deref())),
            7 => SortKey::String(lower_or_empty(self.category.as_deref())),
            _ => SortKey::String(self.name.to_lowercase()),
        }
    }

    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.id.to_string().contains(&needle)
            || contains_ci(self.requester.as_deref(), &needle)
            || contains_ci(self.assignee.as_deref(), &needle)
            || contains_ci(self.category.as_deref(), &needle)
            || self.status.name().contains(&needle)
    }
}

fn lower_or_empty(v: Option<&str>) -> String {
    v.map(|s| s.to_lowercase()).unwrap_or_default()
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|s| s.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Builds the ticket table view model from the current table state.
///
/// Row style precedence: refresh diff (new/modified highlight) over the
/// ticket's own status class. Per-cell styles carry the priority map.
pub fn build_tickets_view(table: &TableState<Ticket>, now_epoch: i64) -> TableViewModel<u64> {
    let items = table.filtered_items();
    let shown = items.len();
    let total = table.items.len();

    let rows: Vec<ViewRow<u64>> = items
        .into_iter()
        .map(|t| {
            let row_style = match table.diff_status.get(&t.id) {
                Some(DiffStatus::New) => RowStyleClass::Active,
                Some(DiffStatus::Modified(_)) => RowStyleClass::Warning,
                _ => t.status.style_class(),
            };
            let cells = vec![
                ViewCell::plain(t.id.to_string()),
                ViewCell::styled(t.priority.label().to_string(), t.priority.style_class()),
                ViewCell::plain(t.status.name().to_string()),
                ViewCell::plain(fmt::format_age(t.date_creation.as_deref(), now_epoch)),
                ViewCell::plain(fmt::format_date_short(t.date_mod.as_deref())),
                ViewCell::plain(fmt::or_fallback(t.requester.as_deref())),
                ViewCell::plain(fmt::or_fallback(t.assignee.as_deref())),
                ViewCell::plain(fmt::or_fallback(t.category.as_deref())),
                ViewCell::plain(t.name.clone()),
            ];
            ViewRow {
                id: t.id,
                cells,
                style: row_style,
            }
        })
        .collect();

    let title = match &table.filter {
        Some(f) => format!("Tickets ({shown}/{total}) [filter: {f}]"),
        None => format!("Tickets ({total})"),
    };

    TableViewModel {
        title,
        headers: Ticket::headers().iter().map(|h| h.to_string()).collect(),
        widths: vec![6, 5, 8, 5, 11, 12, 12, 14],
        rows,
        sort_column: table.sort_column,
        sort_ascending: table.sort_ascending,
    }
}
