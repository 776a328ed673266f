//! Ticket domain model.
//!
//! A ticket is a fixed struct of well-known display fields plus an open
//! `extra` map for backend-specific fields we render nowhere but must not
//! lose. Status and priority arrive from the API as GLPI numeric codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::view::RowStyleClass;

/// Ticket lifecycle status (GLPI numeric codes 1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TicketStatus {
    New,
    Assigned,
    Planned,
    Waiting,
    Solved,
    Closed,
    /// Code outside the documented range; kept verbatim.
    Unknown(i64),
}

impl From<i64> for TicketStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => TicketStatus::New,
            2 => TicketStatus::Assigned,
            3 => TicketStatus::Planned,
            4 => TicketStatus::Waiting,
            5 => TicketStatus::Solved,
            6 => TicketStatus::Closed,
            other => TicketStatus::Unknown(other),
        }
    }
}

impl From<TicketStatus> for i64 {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::New => 1,
            TicketStatus::Assigned => 2,
            TicketStatus::Planned => 3,
            TicketStatus::Waiting => 4,
            TicketStatus::Solved => 5,
            TicketStatus::Closed => 6,
            TicketStatus::Unknown(other) => other,
        }
    }
}

impl TicketStatus {
    /// Statuses in display order for the summary panel.
    pub const ALL: [TicketStatus; 6] = [
        TicketStatus::New,
        TicketStatus::Assigned,
        TicketStatus::Planned,
        TicketStatus::Waiting,
        TicketStatus::Solved,
        TicketStatus::Closed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::Assigned => "assigned",
            TicketStatus::Planned => "planned",
            TicketStatus::Waiting => "waiting",
            TicketStatus::Solved => "solved",
            TicketStatus::Closed => "closed",
            TicketStatus::Unknown(_) => "unknown",
        }
    }

    /// A ticket still in flight (counts toward the open total).
    pub fn is_open(&self) -> bool {
        !matches!(self, TicketStatus::Solved | TicketStatus::Closed)
    }

    pub fn style_class(&self) -> RowStyleClass {
        match self {
            TicketStatus::New => RowStyleClass::Active,
            TicketStatus::Assigned | TicketStatus::Planned => RowStyleClass::Normal,
            TicketStatus::Waiting => RowStyleClass::Warning,
            TicketStatus::Solved | TicketStatus::Closed => RowStyleClass::Dimmed,
            TicketStatus::Unknown(_) => RowStyleClass::Normal,
        }
    }
}

/// Ticket priority (GLPI numeric codes 1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Priority {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Major,
    Unknown(i64),
}

impl From<i64> for Priority {
    fn from(code: i64) -> Self {
        match code {
            1 => Priority::VeryLow,
            2 => Priority::Low,
            3 => Priority::Medium,
            4 => Priority::High,
            5 => Priority::VeryHigh,
            6 => Priority::Major,
            other => Priority::Unknown(other),
        }
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::VeryLow => 1,
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 4,
            Priority::VeryHigh => 5,
            Priority::Major => 6,
            Priority::Unknown(other) => other,
        }
    }
}

impl Priority {
    pub const ALL: [Priority; 6] = [
        Priority::VeryLow,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::VeryHigh,
        Priority::Major,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Priority::VeryLow => "very low",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::VeryHigh => "very high",
            Priority::Major => "major",
            Priority::Unknown(_) => "unknown",
        }
    }

    /// Short label for table cells.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::VeryLow => "vlow",
            Priority::Low => "low",
            Priority::Medium => "med",
            Priority::High => "high",
            Priority::VeryHigh => "vhigh",
            Priority::Major => "major",
            Priority::Unknown(_) => "?",
        }
    }

    /// Priority-to-style map for table cells.
    pub fn style_class(&self) -> RowStyleClass {
        match self {
            Priority::VeryLow | Priority::Low => RowStyleClass::Dimmed,
            Priority::Medium => RowStyleClass::Normal,
            Priority::High => RowStyleClass::Warning,
            Priority::VeryHigh => RowStyleClass::Critical,
            Priority::Major => RowStyleClass::CriticalBold,
            Priority::Unknown(_) => RowStyleClass::Normal,
        }
    }

    /// Sort rank; unknown codes sort below the documented range.
    pub fn rank(&self) -> i64 {
        match self {
            Priority::Unknown(_) => 0,
            known => i64::from(*known),
        }
    }
}

/// One helpdesk ticket as displayed by the dashboard.
///
/// Dates are kept as the raw strings the backend sent; parsing happens at
/// the formatting boundary so one malformed value degrades to a placeholder
/// in its own cell instead of failing the whole refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_status")]
    pub status: TicketStatus,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub requester: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Creation timestamp, backend format ("2024-03-01 09:15:00").
    #[serde(default)]
    pub date_creation: Option<String>,
    /// Last modification timestamp, same format.
    #[serde(default)]
    pub date_mod: Option<String>,
    /// Fields we do not model explicitly, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_status() -> TicketStatus {
    TicketStatus::Unknown(0)
}

fn default_priority() -> Priority {
    Priority::Unknown(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for code in 1..=6 {
            assert_eq!(i64::from(TicketStatus::from(code)), code);
        }
        assert_eq!(TicketStatus::from(9), TicketStatus::Unknown(9));
        assert_eq!(i64::from(TicketStatus::Unknown(9)), 9);
    }

    #[test]
    fn open_statuses_exclude_solved_and_closed() {
        assert!(TicketStatus::New.is_open());
        assert!(TicketStatus::Waiting.is_open());
        assert!(!TicketStatus::Solved.is_open());
        assert!(!TicketStatus::Closed.is_open());
    }

    #[test]
    fn unknown_priority_sorts_lowest() {
        assert!(Priority::Unknown(42).rank() < Priority::VeryLow.rank());
        assert!(Priority::Major.rank() > Priority::High.rank());
    }

    #[test]
    fn ticket_deserializes_with_extra_fields() {
        let json = r#"{
            "id": 17,
            "name": "Printer on fire",
            "status": 2,
            "priority": 5,
            "requester": "mlopez",
            "date_creation": "2024-03-01 09:15:00",
            "urgency": 4,
            "locations_id": 12
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 17);
        assert_eq!(ticket.status, TicketStatus::Assigned);
        assert_eq!(ticket.priority, Priority::VeryHigh);
        assert_eq!(ticket.extra.get("urgency"), Some(&serde_json::json!(4)));
        assert!(ticket.assignee.is_none());
    }
}
