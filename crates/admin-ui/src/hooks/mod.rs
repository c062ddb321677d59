//! Custom hooks module

pub mod use_catalog;
pub mod use_config;
pub mod use_notifications;

pub use use_catalog::*;
pub use use_config::*;
pub use use_notifications::*;
