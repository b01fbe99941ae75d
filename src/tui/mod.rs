//! Terminal UI: list page with search and a detail popup

mod app;
pub mod search;
pub mod theme;
pub mod widgets;

pub use app::{run, App};
