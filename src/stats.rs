//! Ticket statistics for the summary panels.

use chrono::{Duration, NaiveDate, Utc};

use crate::fmt::parse_date;
use crate::model::{Priority, Ticket, TicketStatus};

/// Days covered by the opened-per-day series.
pub const OPENED_SERIES_DAYS: usize = 14;

/// Aggregates over one board of tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub unassigned_open: usize,
    /// Counts aligned with [`TicketStatus::ALL`].
    pub by_status: [usize; 6],
    /// Counts aligned with [`Priority::ALL`].
    pub by_priority: [usize; 6],
    /// Tickets opened per day, oldest first, ending today.
    pub opened_per_day: Vec<u64>,
}

impl TicketStats {
    pub fn compute(tickets: &[Ticket]) -> Self {
        Self::compute_at(tickets, Utc::now().date_naive())
    }

    /// Like [`compute`](Self::compute) with an explicit "today", so the
    /// per-day series is deterministic under test.
    pub fn compute_at(tickets: &[Ticket], today: NaiveDate) -> Self {
        let mut stats = Self {
            opened_per_day: vec![0; OPENED_SERIES_DAYS],
            ..Self::default()
        };
        let series_start = today - Duration::days(OPENED_SERIES_DAYS as i64 - 1);

        for ticket in tickets {
            stats.total += 1;
            if ticket.status.is_open() {
                stats.open += 1;
                if ticket.assignee.is_none() {
                    stats.unassigned_open += 1;
                }
            }
            if let Some(pos) = TicketStatus::ALL.iter().position(|s| *s == ticket.status) {
                stats.by_status[pos] += 1;
            }
            if let Some(pos) = Priority::ALL.iter().position(|p| *p == ticket.priority) {
                stats.by_priority[pos] += 1;
            }
            if let Some(created) = parse_date(ticket.date_creation.as_deref()) {
                let day = created.date();
                if day >= series_start && day <= today {
                    let offset = (day - series_start).num_days() as usize;
                    stats.opened_per_day[offset] += 1;
                }
            }
        }
        stats
    }

    pub fn status_count(&self, status: TicketStatus) -> usize {
        TicketStatus::ALL
            .iter()
            .position(|s| *s == status)
            .map(|pos| self.by_status[pos])
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ticket(id: u64, status: i64, priority: i64, created: Option<&str>) -> Ticket {
        Ticket {
            id,
            name: format!("t{id}"),
            status: status.into(),
            priority: priority.into(),
            requester: None,
            assignee: None,
            category: None,
            date_creation: created.map(|s| s.to_string()),
            date_mod: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn counts_by_status_and_priority() {
        let tickets = vec![
            ticket(1, 1, 5, None),
            ticket(2, 1, 3, None),
            ticket(3, 6, 3, None),
        ];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.status_count(TicketStatus::New), 2);
        assert_eq!(stats.status_count(TicketStatus::Closed), 1);
        assert_eq!(stats.by_priority[4], 1); // very high
        assert_eq!(stats.by_priority[2], 2); // medium
    }

    #[test]
    fn unassigned_counts_only_open_tickets() {
        let mut assigned = ticket(1, 2, 3, None);
        assigned.assignee = Some("tech1".to_string());
        let tickets = vec![assigned, ticket(2, 2, 3, None), ticket(3, 6, 3, None)];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.unassigned_open, 1);
    }

    #[test]
    fn opened_per_day_buckets_by_creation_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let tickets = vec![
            ticket(1, 1, 3, Some("2024-03-15 09:00:00")),
            ticket(2, 1, 3, Some("2024-03-15 17:30:00")),
            ticket(3, 1, 3, Some("2024-03-14 08:00:00")),
            ticket(4, 1, 3, Some("2024-01-01 08:00:00")), // outside the window
            ticket(5, 1, 3, Some("garbage")),             // unparseable, skipped
        ];
        let stats = TicketStats::compute_at(&tickets, today);
        assert_eq!(stats.opened_per_day.len(), OPENED_SERIES_DAYS);
        assert_eq!(stats.opened_per_day[OPENED_SERIES_DAYS - 1], 2);
        assert_eq!(stats.opened_per_day[OPENED_SERIES_DAYS - 2], 1);
        assert_eq!(stats.opened_per_day.iter().sum::<u64>(), 3);
    }
}
