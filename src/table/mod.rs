//! In-memory tables
//!
//! A [`Table`] holds ordered, uniquely named columns of [`Cell`]s. Cells wrap
//! `serde_json::Value` and add an explicit `Missing` marker so that padding
//! from joins never masquerades as a JSON `null`.

pub mod types;
pub mod frame;
pub mod join;
pub mod writer;

pub use types::{Cell, Column};
pub use frame::Table;
pub use join::{join, JoinType};
pub use writer::TableWriter;
