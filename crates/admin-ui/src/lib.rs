//! Hotelier admin console
//!
//! Browser admin UI for hotels, rooms, bookings, invoices and payments.
//! Built with Dioxus and compiled to WebAssembly; all data lives in an
//! in-memory catalog seeded with mock records.

pub mod app;
pub mod components;
pub mod grid;
pub mod hooks;
pub mod models;
pub mod pages;
pub mod services;
pub mod utils;

pub use app::App;
