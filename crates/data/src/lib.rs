//! Records, validation and stores behind the Hotelier admin console.
//!
//! Everything lives in memory. [`Repository`] is the seam where a real
//! backend would plug in.

pub mod amenity;
pub mod booking;
pub mod coupon;
pub mod error;
pub mod hotel;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod record;
pub mod review;
pub mod room;
pub mod seed;
pub mod store;
pub mod validation;

pub use amenity::{Amenity, AmenityCategory};
pub use booking::{Booking, BookingStatus};
pub use coupon::{Coupon, Discount};
pub use error::{DataError, DataResult};
pub use hotel::{Hotel, HotelStatus};
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus, InvoiceTotals};
pub use money::Money;
pub use payment::{GatewayMode, GatewayProvider, PaymentGateway, PaymentTransaction, TransactionStatus};
pub use record::{Record, new_id};
pub use review::{Review, ReviewStatus, average_rating};
pub use room::{Room, RoomStatus, RoomType};
pub use seed::Dataset;
pub use store::{MemoryStore, Repository};
pub use validation::{FieldError, FieldWarning, ValidationResult};
