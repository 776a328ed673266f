//! Terminal user interface for the ticket dashboard.
//!
//! Interactive view in the spirit of atop/htop: a windowed ticket table
//! with keyboard navigation, a summary panel, and detail popups.

mod app;
mod event;
mod input;
mod render;
mod state;
pub mod style;
pub mod viewport;
mod widgets;

pub use app::App;
pub use state::AppState;
pub use style::ThemeKind;
