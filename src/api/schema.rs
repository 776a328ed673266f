//! Wire types for the helpdesk REST API.
//!
//! The backend (GLPI-style) returns tickets as loosely-shaped JSON objects:
//! linked records (requester, category) arrive as numeric ids, or as names
//! when `expand_dropdowns` is set. The DTO absorbs both and converts to the
//! fixed [`Ticket`] model, folding everything unmodeled into `extra`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::model::Ticket;

/// Response of `initSession`.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub session_token: String,
}

/// One ticket as the backend sends it.
#[derive(Debug, Deserialize)]
pub struct TicketDto {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, rename = "users_id_recipient")]
    pub requester: Option<Value>,
    #[serde(default, rename = "users_id_lastupdater")]
    pub assignee: Option<Value>,
    #[serde(default, rename = "itilcategories_id")]
    pub category: Option<Value>,
    #[serde(default)]
    pub date_creation: Option<String>,
    #[serde(default)]
    pub date_mod: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TicketDto {
    pub fn into_ticket(self) -> Ticket {
        Ticket {
            id: self.id,
            name: self.name.unwrap_or_default(),
            status: self.status.unwrap_or(0).into(),
            priority: self.priority.unwrap_or(0).into(),
            requester: link_label(self.requester),
            assignee: link_label(self.assignee),
            category: link_label(self.category),
            date_creation: self.date_creation,
            date_mod: self.date_mod,
            extra: self.extra,
        }
    }
}

/// Renders a linked-record field: expanded name, or the raw id as text.
/// `0`, empty strings, and nulls all mean "unset".
fn link_label(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() && s != "0" => Some(s),
        Value::Number(n) if n.as_i64() != Some(0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TicketStatus};

    #[test]
    fn decodes_expanded_dropdowns() {
        let json = r#"{
            "id": 42,
            "name": "VPN down",
            "status": 4,
            "priority": 4,
            "users_id_recipient": "jdoe",
            "itilcategories_id": "Network",
            "date_creation": "2024-02-11 08:00:00",
            "date_mod": "2024-02-12 10:30:00",
            "urgency": 3
        }"#;
        let ticket = serde_json::from_str::<TicketDto>(json)
            .unwrap()
            .into_ticket();
        assert_eq!(ticket.status, TicketStatus::Waiting);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.requester.as_deref(), Some("jdoe"));
        assert_eq!(ticket.category.as_deref(), Some("Network"));
        assert_eq!(ticket.extra.get("urgency"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn numeric_links_become_id_text_and_zero_means_unset() {
        let json = r#"{"id": 7, "users_id_recipient": 15, "itilcategories_id": 0}"#;
        let ticket = serde_json::from_str::<TicketDto>(json)
            .unwrap()
            .into_ticket();
        assert_eq!(ticket.requester.as_deref(), Some("15"));
        assert_eq!(ticket.category, None);
        // Missing status/priority decode to the unknown code.
        assert_eq!(ticket.status, TicketStatus::Unknown(0));
    }

    #[test]
    fn session_response_decodes() {
        let json = r#"{"session_token": "abc123"}"#;
        let resp: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.session_token, "abc123");
    }
}
