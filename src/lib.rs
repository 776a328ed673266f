//! tixtop - Interactive TUI dashboard for helpdesk ticket queues.
//!
//! This library provides the functionality behind the `tixtop` binary:
//! - `api` - GLPI-compatible REST client (session handling, paged fetches)
//! - `provider` - data sources: live backend or JSON export on disk
//! - `model` - ticket domain types
//! - `table` - generic sortable/filterable table state with refresh diffing
//! - `view` - UI-agnostic view models
//! - `tui` - the terminal frontend

pub mod api;
pub mod config;
pub mod export;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod stats;
pub mod table;
pub mod tui;
pub mod view;
