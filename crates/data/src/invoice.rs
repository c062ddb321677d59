use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{DataError, DataResult};
use crate::money::Money;
use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub booking_reference: String,
    pub bill_to: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub items: Vec<InvoiceItem>,
    pub discount: Money,
    pub tax_rate_bps: u32,
    pub status: InvoiceStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl InvoiceItem {
    pub fn amount(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub taxable: Money,
    pub tax: Money,
    pub total: Money,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Unpaid,
    Paid,
    Overdue,
    Void,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "草稿",
            InvoiceStatus::Unpaid => "待支付",
            InvoiceStatus::Paid => "已支付",
            InvoiceStatus::Overdue => "已逾期",
            InvoiceStatus::Void => "已作废",
        }
    }

    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Draft, Unpaid) | (Unpaid, Paid) | (Overdue, Paid) | (Unpaid, Overdue) | (Draft | Unpaid | Overdue, Void)
        )
    }

    /// Issued but not settled.
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Unpaid | InvoiceStatus::Overdue)
    }
}

impl Invoice {
    /// Subtotal of all lines, discount capped at the subtotal, tax on the remainder.
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal: Money = self.items.iter().map(InvoiceItem::amount).sum();
        let discount = self.discount.min(subtotal);
        let taxable = subtotal - discount;
        let tax = taxable.apply_rate_bps(self.tax_rate_bps);
        InvoiceTotals {
            subtotal,
            discount,
            taxable,
            tax,
            total: taxable + tax,
        }
    }

    pub fn transition(&mut self, next: InvoiceStatus) -> DataResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DataError::illegal_transition(Self::KIND, self.status, next));
        }
        self.status = next;
        Ok(())
    }

    /// Unpaid invoices past their due date become overdue.
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Unpaid && today > self.due_on
    }
}

impl Record for Invoice {
    const KIND: &'static str = "Invoice";
    const ID_PREFIX: &'static str = "inv";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "number", &self.number);
        require_text(&mut result, "bill_to", &self.bill_to);
        result.check(!self.items.is_empty(), || {
            FieldError::invalid_value("items", "at least one line item is required")
        });
        for (index, item) in self.items.iter().enumerate() {
            let field = format!("items[{index}]");
            result.check(!item.description.trim().is_empty(), || FieldError::required(field.clone()));
            result.check(item.quantity >= 1, || FieldError::out_of_range(field.clone(), 1, u32::MAX));
            result.check(item.unit_price.minor() >= 0, || {
                FieldError::invalid_value(field.clone(), "unit price must not be negative")
            });
        }
        result.check(self.discount.minor() >= 0, || {
            FieldError::invalid_value("discount", "must not be negative")
        });
        result.check(self.tax_rate_bps <= 10_000, || FieldError::out_of_range("tax_rate", "0%", "100%"));
        result.check(self.due_on >= self.issued_on, || {
            FieldError::invalid_value("due_on", "must not be before the issue date")
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        Invoice {
            id: String::new(),
            number: "INV-2024-001".to_owned(),
            booking_reference: "BK-1001".to_owned(),
            bill_to: "Zhang Wei".to_owned(),
            issued_on: NaiveDate::from_ymd_opt(2024, 7, 13).unwrap(),
            due_on: NaiveDate::from_ymd_opt(2024, 7, 27).unwrap(),
            items: vec![
                InvoiceItem {
                    description: "Deluxe room x3 nights".to_owned(),
                    quantity: 3,
                    unit_price: Money::from_major(480),
                },
                InvoiceItem {
                    description: "Breakfast".to_owned(),
                    quantity: 2,
                    unit_price: Money::from_minor(6_850),
                },
            ],
            discount: Money::from_major(100),
            tax_rate_bps: 600,
            status: InvoiceStatus::Unpaid,
        }
    }

    #[test]
    fn test_totals() {
        let totals = invoice().totals();
        assert_eq!(totals.subtotal, Money::from_major(1_577));
        assert_eq!(totals.discount, Money::from_major(100));
        assert_eq!(totals.taxable, Money::from_major(1_477));
        assert_eq!(totals.tax, Money::from_minor(8_862));
        assert_eq!(totals.total, Money::from_minor(156_562));
    }

    #[test]
    fn test_discount_capped_at_subtotal() {
        let mut inv = invoice();
        inv.discount = Money::from_major(5_000);
        let totals = inv.totals();
        assert_eq!(totals.discount, totals.subtotal);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_status_flow() {
        let mut inv = invoice();
        inv.transition(InvoiceStatus::Paid).unwrap();
        assert!(inv.transition(InvoiceStatus::Void).is_err());
        assert!(!inv.status.is_outstanding());
    }

    #[test]
    fn test_validate_items() {
        let mut inv = invoice();
        inv.items[1].quantity = 0;
        inv.items[0].description.clear();
        let result = inv.validate();
        assert!(result.error_for("items[0]").is_some());
        assert!(result.error_for("items[1]").is_some());

        inv.items.clear();
        assert!(inv.validate().error_for("items").is_some());
    }

    #[test]
    fn test_past_due() {
        let inv = invoice();
        assert!(!inv.is_past_due(inv.due_on));
        assert!(inv.is_past_due(inv.due_on.succ_opt().unwrap()));
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn item() -> impl Strategy<Value = InvoiceItem> {
            (1u32..20, 0i64..100_000).prop_map(|(quantity, cents)| InvoiceItem {
                description: "line".to_owned(),
                quantity,
                unit_price: Money::from_minor(cents),
            })
        }

        proptest! {
            #[test]
            fn totals_add_up(
                items in prop::collection::vec(item(), 1..8),
                discount in 0i64..2_000_000,
                tax_rate_bps in 0u32..=10_000,
            ) {
                let mut inv = invoice();
                inv.items = items;
                inv.discount = Money::from_minor(discount);
                inv.tax_rate_bps = tax_rate_bps;
                let totals = inv.totals();

                prop_assert!(totals.discount <= totals.subtotal);
                prop_assert_eq!(totals.taxable, totals.subtotal - totals.discount);
                prop_assert_eq!(totals.total, totals.taxable + totals.tax);
                prop_assert!(totals.tax <= totals.taxable);
                prop_assert!(totals.tax.minor() >= 0);
            }
        }
    }
}
