//! Console error type

use hotelier_data::{DataError, ValidationResult};
use thiserror::Error;

/// Errors surfaced to the operator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    /// Form input failed validation before reaching a store
    #[error("Validation failed: {result}")]
    Validation { result: ValidationResult },

    /// Store rejected the operation
    #[error(transparent)]
    Data(#[from] DataError),

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Camera access failed
    #[error("Camera error: {message}")]
    Camera { message: String },

    /// A lookup outside the stores found nothing
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ConsoleError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn camera(message: impl Into<String>) -> Self {
        Self::Camera { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation { result } => format!("输入有误：{result}"),
            ConsoleError::Data(DataError::NotFound { kind, id }) => {
                format!("{}「{id}」不存在", kind_label(kind))
            }
            ConsoleError::Data(DataError::Duplicate { kind, id }) => {
                format!("{}「{id}」已存在", kind_label(kind))
            }
            ConsoleError::Data(DataError::Invalid { result, .. }) => format!("输入有误：{result}"),
            ConsoleError::Data(DataError::IllegalTransition { from, to, .. }) => {
                format!("无法从「{from}」变更为「{to}」")
            }
            ConsoleError::Data(DataError::Poisoned { .. }) => "数据存储不可用，请刷新页面".to_owned(),
            ConsoleError::Config { message } => format!("配置错误：{message}"),
            ConsoleError::Camera { message } => format!("摄像头不可用：{message}"),
            ConsoleError::NotFound { message } => format!("未找到：{message}"),
            ConsoleError::Internal { message } => format!("内部错误：{message}"),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Validation { .. } => "VALIDATION_ERROR",
            ConsoleError::Data(DataError::NotFound { .. }) => "NOT_FOUND",
            ConsoleError::Data(DataError::Duplicate { .. }) => "DUPLICATE",
            ConsoleError::Data(DataError::Invalid { .. }) => "VALIDATION_ERROR",
            ConsoleError::Data(DataError::IllegalTransition { .. }) => "ILLEGAL_TRANSITION",
            ConsoleError::Data(DataError::Poisoned { .. }) => "STORE_UNAVAILABLE",
            ConsoleError::Config { .. } => "CONFIG_ERROR",
            ConsoleError::Camera { .. } => "CAMERA_ERROR",
            ConsoleError::NotFound { .. } => "NOT_FOUND",
            ConsoleError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Per-field messages for forms; empty for non-validation errors.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        match self {
            ConsoleError::Validation { result } | ConsoleError::Data(DataError::Invalid { result, .. }) => {
                result.field_messages()
            }
            _ => Vec::new(),
        }
    }
}

impl From<ValidationResult> for ConsoleError {
    fn from(result: ValidationResult) -> Self {
        ConsoleError::Validation { result }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Display name of a record kind
pub fn kind_label(kind: &str) -> &str {
    match kind {
        "Hotel" => "酒店",
        "Room" => "客房",
        "Amenity" => "设施",
        "Coupon" => "优惠券",
        "Review" => "评价",
        "Booking" => "预订",
        "Invoice" => "发票",
        "PaymentGateway" => "支付网关",
        "PaymentTransaction" => "交易",
        "Config" => "配置",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelier_data::FieldError;

    #[test]
    fn test_user_messages() {
        let err = ConsoleError::from(DataError::not_found("Hotel", "htl-9"));
        assert_eq!(err.user_message(), "酒店「htl-9」不存在");
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = ConsoleError::from(DataError::illegal_transition("Booking", "cancelled", "confirmed"));
        assert_eq!(err.error_code(), "ILLEGAL_TRANSITION");
        assert!(err.user_message().contains("cancelled"));

        assert_eq!(ConsoleError::camera("denied").user_message(), "摄像头不可用：denied");
    }

    #[test]
    fn test_field_messages_from_both_validation_paths() {
        let mut result = ValidationResult::success();
        result.add_error(FieldError::required("name"));

        let direct = ConsoleError::from(result.clone());
        let stored = ConsoleError::from(DataError::Invalid { kind: "Hotel", result });
        assert_eq!(direct.field_messages(), stored.field_messages());
        assert_eq!(direct.field_messages()[0].0, "name");
        assert!(ConsoleError::internal("x").field_messages().is_empty());
    }
}
