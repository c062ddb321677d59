use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::record::Record;
use crate::validation::{FieldError, ValidationResult};

static COUPON_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]{3,20}$").expect("valid coupon pattern"));

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount: Discount,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage in basis points (1500 = 15%).
    Percent { bps: u32 },
    Fixed { amount: Money },
}

impl Discount {
    pub fn describe(&self, currency_symbol: &str) -> String {
        match self {
            Discount::Percent { bps } if bps % 100 == 0 => format!("{}% off", bps / 100),
            Discount::Percent { bps } => format!("{}.{:02}% off", bps / 100, bps % 100),
            Discount::Fixed { amount } => format!("{} off", amount.with_symbol(currency_symbol)),
        }
    }
}

impl Coupon {
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used_count >= limit)
    }

    pub fn is_redeemable_on(&self, date: NaiveDate) -> bool {
        self.active && !self.is_exhausted() && self.valid_from <= date && date <= self.valid_until
    }

    /// Discount granted on `amount`, never more than the amount itself.
    pub fn discount_for(&self, amount: Money) -> Money {
        let discount = match self.discount {
            Discount::Percent { bps } => amount.apply_rate_bps(bps),
            Discount::Fixed { amount: fixed } => fixed,
        };
        discount.min(amount)
    }
}

impl Record for Coupon {
    const KIND: &'static str = "Coupon";
    const ID_PREFIX: &'static str = "cpn";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        result.check(COUPON_CODE.is_match(&self.code), || {
            FieldError::invalid_format("code", "3-20 uppercase letters, digits, '-' or '_'")
        });
        match self.discount {
            Discount::Percent { bps } => {
                result.check((100..=10_000).contains(&bps), || FieldError::out_of_range("discount", "1%", "100%"));
            }
            Discount::Fixed { amount } => {
                result.check(amount.is_positive(), || {
                    FieldError::invalid_value("discount", "must be greater than zero")
                });
            }
        }
        result.check(self.valid_until >= self.valid_from, || {
            FieldError::invalid_value("valid_until", "must not be before the start date")
        });
        result
    }
}
