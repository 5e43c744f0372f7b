//! UI rendering modules.
//!
//! - `control_panel`: Left sidebar with dataset and sampling controls
//! - `main_view`: Central panel with the overview page
//! - `chart`: Chart spec rendering
//! - `statistics`: Statistics display panel

mod chart;
mod control_panel;
mod main_view;
mod statistics;
pub mod theme;
