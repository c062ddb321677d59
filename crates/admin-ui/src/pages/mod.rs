//! Pages module, one per route

pub mod activity;
pub mod amenities;
pub mod bookings;
pub mod coupons;
pub mod dashboard;
pub mod hotels;
pub mod invoices;
pub mod payment_gateways;
pub mod reviews;
pub mod rooms;
pub mod settings;
pub mod transactions;

pub use activity::ActivityLogPage;
pub use amenities::Amenities;
pub use bookings::Bookings;
pub use coupons::Coupons;
pub use dashboard::Dashboard;
pub use hotels::Hotels;
pub use invoices::Invoices;
pub use payment_gateways::PaymentGateways;
pub use reviews::Reviews;
pub use rooms::Rooms;
pub use settings::Settings;
pub use transactions::Transactions;
