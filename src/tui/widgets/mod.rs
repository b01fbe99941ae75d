//! TUI widgets

pub mod detail_popup;
pub mod help;
pub mod pokemon_list;
pub mod spinner;
