//! UI components module

pub mod action_menu;
pub mod data_table;
pub mod feedback;
pub mod forms;
pub mod layout;
pub mod modal;
pub mod page;
pub mod qr_scanner;
pub mod status_badge;

pub use action_menu::{ActionMenu, MenuItem};
pub use data_table::DataTable;
pub use feedback::{Alert, ErrorMessage, Toast, ValidationFeedback, WarningMessage};
pub use forms::{Button, Checkbox, Input, Select, TextArea};
pub use layout::AdminLayout;
pub use modal::{ConfirmDialog, Modal};
pub use page::{FieldGrid, FormModal, PageHeader};
pub use qr_scanner::QrCheckInModal;
pub use status_badge::{StatusBadge, Tone};
