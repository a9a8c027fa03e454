//! Database models backing the content tables.

pub mod announcement;
pub mod article;
#[cfg(feature = "server")]
pub mod config;
pub mod event;
pub mod news;
pub mod settings;
