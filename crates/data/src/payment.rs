use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{DataError, DataResult};
use crate::money::Money;
use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

/// Display-only gateway configuration; nothing here talks to a provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PaymentGateway {
    pub id: String,
    pub name: String,
    pub provider: GatewayProvider,
    pub mode: GatewayMode,
    pub api_key: String,
    pub webhook_url: String,
    pub fee_bps: u32,
    pub currencies: Vec<String>,
    pub enabled: bool,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GatewayProvider {
    #[default]
    Stripe,
    Paypal,
    Alipay,
    WechatPay,
    BankTransfer,
}

impl GatewayProvider {
    pub fn label(&self) -> &'static str {
        match self {
            GatewayProvider::Stripe => "Stripe",
            GatewayProvider::Paypal => "PayPal",
            GatewayProvider::Alipay => "支付宝",
            GatewayProvider::WechatPay => "微信支付",
            GatewayProvider::BankTransfer => "银行转账",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GatewayMode {
    #[default]
    Sandbox,
    Live,
}

impl GatewayMode {
    pub fn label(&self) -> &'static str {
        match self {
            GatewayMode::Sandbox => "沙箱",
            GatewayMode::Live => "生产",
        }
    }
}

impl PaymentGateway {
    /// API key with everything but the last four characters hidden.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "•".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{visible}", "•".repeat(8))
    }
}

impl Record for PaymentGateway {
    const KIND: &'static str = "PaymentGateway";
    const ID_PREFIX: &'static str = "gw";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "name", &self.name);
        if !self.webhook_url.is_empty() {
            result.check(
                self.webhook_url.starts_with("https://") || self.webhook_url.starts_with("http://"),
                || FieldError::invalid_format("webhook_url", "URL starting with http:// or https://"),
            );
        }
        result.check(self.fee_bps <= 10_000, || FieldError::out_of_range("fee", "0%", "100%"));
        for currency in &self.currencies {
            result.check(
                currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase()),
                || FieldError::invalid_format("currencies", "ISO 4217 codes such as CNY"),
            );
        }
        result
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PaymentTransaction {
    pub id: String,
    pub reference: String,
    pub gateway_id: String,
    pub booking_reference: String,
    pub amount: Money,
    pub currency: String,
    pub method: String,
    pub status: TransactionStatus,
    pub created_on: NaiveDate,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "处理中",
            TransactionStatus::Succeeded => "成功",
            TransactionStatus::Failed => "失败",
            TransactionStatus::Refunded => "已退款",
        }
    }
}

impl PaymentTransaction {
    pub fn refund(&mut self) -> DataResult<()> {
        if self.status != TransactionStatus::Succeeded {
            return Err(DataError::illegal_transition(
                Self::KIND,
                self.status,
                TransactionStatus::Refunded,
            ));
        }
        self.status = TransactionStatus::Refunded;
        Ok(())
    }
}

impl Record for PaymentTransaction {
    const KIND: &'static str = "PaymentTransaction";
    const ID_PREFIX: &'static str = "txn";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "reference", &self.reference);
        require_text(&mut result, "gateway_id", &self.gateway_id);
        result.check(self.amount.is_positive(), || {
            FieldError::invalid_value("amount", "must be greater than zero")
        });
        result
    }
}
