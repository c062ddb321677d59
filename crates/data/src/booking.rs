use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{DataError, DataResult};
use crate::money::Money;
use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    pub id: String,
    pub reference: String,
    pub guest_name: String,
    pub guest_email: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub total: Money,
    pub status: BookingStatus,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "待确认",
            BookingStatus::Confirmed => "已确认",
            BookingStatus::CheckedIn => "已入住",
            BookingStatus::CheckedOut => "已离店",
            BookingStatus::Cancelled => "已取消",
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, CheckedIn)
                | (CheckedIn, CheckedOut)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether the guest stays the night of `date`.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    pub fn transition(&mut self, next: BookingStatus) -> DataResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DataError::illegal_transition(Self::KIND, self.status, next));
        }
        self.status = next;
        Ok(())
    }
}

impl Record for Booking {
    const KIND: &'static str = "Booking";
    const ID_PREFIX: &'static str = "bkg";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "reference", &self.reference);
        require_text(&mut result, "guest_name", &self.guest_name);
        require_text(&mut result, "room_id", &self.room_id);
        result.check(EMAIL.is_match(&self.guest_email), || {
            FieldError::invalid_format("guest_email", "name@example.com")
        });
        result.check(self.check_out > self.check_in, || {
            FieldError::invalid_value("check_out", "must be after the check-in date")
        });
        result.check(self.guests >= 1, || FieldError::out_of_range("guests", 1, u8::MAX));
        result.check(self.total.minor() >= 0, || {
            FieldError::invalid_value("total", "must not be negative")
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn booking() -> Booking {
        Booking {
            id: String::new(),
            reference: "BK-1001".to_owned(),
            guest_name: "Zhang Wei".to_owned(),
            guest_email: "zhang@example.com".to_owned(),
            room_id: "rm-1".to_owned(),
            check_in: date(10),
            check_out: date(13),
            guests: 2,
            total: Money::from_major(1_500),
            status: BookingStatus::Pending,
        }
    }

    #[test]
    fn test_nights_and_occupancy() {
        let b = booking();
        assert_eq!(b.nights(), 3);
        assert!(!b.occupies(date(9)));
        assert!(b.occupies(date(10)));
        assert!(b.occupies(date(12)));
        assert!(!b.occupies(date(13)));
    }

    #[test]
    fn test_lifecycle() {
        let mut b = booking();
        assert!(b.transition(BookingStatus::CheckedIn).is_err());
        b.transition(BookingStatus::Confirmed).unwrap();
        b.transition(BookingStatus::CheckedIn).unwrap();
        assert_eq!(
            b.transition(BookingStatus::Cancelled).unwrap_err(),
            DataError::IllegalTransition {
                kind: "Booking",
                from: "checked_in".to_owned(),
                to: "cancelled".to_owned(),
            }
        );
        b.transition(BookingStatus::CheckedOut).unwrap();
        assert_eq!(b.status, BookingStatus::CheckedOut);
    }

    #[test]
    fn test_validate_dates_and_email() {
        let mut b = booking();
        assert!(b.validate().is_valid());
        b.check_out = b.check_in;
        b.guest_email = "not-an-email".to_owned();
        let result = b.validate();
        assert!(result.error_for("check_out").is_some());
        assert!(result.error_for("guest_email").is_some());
    }
}
