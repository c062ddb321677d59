//! Helpers shared across pages

pub mod activity_log;
pub mod calendar;
pub mod form;
pub mod timer;

pub use activity_log::ActivityLog;
