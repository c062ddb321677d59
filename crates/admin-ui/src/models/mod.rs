//! Data models for the Hotelier admin console

pub mod activity;
pub mod config;
pub mod error;

pub use activity::*;
pub use config::*;
pub use error::*;
