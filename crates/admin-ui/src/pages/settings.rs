//! Console settings: form editor plus TOML/JSON import and export

use dioxus::prelude::*;
use hotelier_data::ValidationResult;

use crate::components::{
    Button, Checkbox, ConfirmDialog, FieldGrid, Input, PageHeader, Select, TextArea, ValidationFeedback,
};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::{ActivityAction, ConfigFormat, ConsoleConfig, ConsoleError, LOG_LEVELS};
use crate::utils::form::{bps_to_percent_text, error_text, parse_number, parse_percent_bps};

/// Editable text form of [`ConsoleConfig`]
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsDraft {
    pub title: String,
    pub operator: String,
    pub page_size: String,
    pub log_level: String,
    pub confirm_destructive: bool,
    pub timeout_secs: String,
    pub max_visible: String,
    pub currency: String,
    pub currency_symbol: String,
    /// Percentage text
    pub default_tax_rate: String,
}

impl From<&ConsoleConfig> for SettingsDraft {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            title: config.console.title.clone(),
            operator: config.console.operator.clone(),
            page_size: config.console.page_size.to_string(),
            log_level: config.console.log_level.clone(),
            confirm_destructive: config.console.confirm_destructive,
            timeout_secs: config.notifications.timeout_secs.to_string(),
            max_visible: config.notifications.max_visible.to_string(),
            currency: config.billing.currency.clone(),
            currency_symbol: config.billing.currency_symbol.clone(),
            default_tax_rate: bps_to_percent_text(config.billing.default_tax_rate_bps),
        }
    }
}

impl SettingsDraft {
    /// Parsed and validated configuration. Warnings ride along in the
    /// returned result even on success.
    pub fn into_config(self) -> (Option<ConsoleConfig>, ValidationResult) {
        let mut result = ValidationResult::success();
        let page_size = parse_number(&mut result, "console.page_size", &self.page_size);
        let timeout_secs = parse_number(&mut result, "notifications.timeout_secs", &self.timeout_secs);
        let max_visible = parse_number(&mut result, "notifications.max_visible", &self.max_visible);
        let tax = parse_percent_bps(&mut result, "billing.default_tax_rate_bps", &self.default_tax_rate);

        let mut config = ConsoleConfig::default();
        config.console.title = self.title.trim().to_owned();
        config.console.operator = self.operator.trim().to_owned();
        config.console.page_size = page_size.unwrap_or(0);
        config.console.log_level = self.log_level;
        config.console.confirm_destructive = self.confirm_destructive;
        config.notifications.timeout_secs = timeout_secs.unwrap_or(0);
        config.notifications.max_visible = max_visible.unwrap_or(0);
        config.billing.currency = self.currency.trim().to_uppercase();
        config.billing.currency_symbol = self.currency_symbol.trim().to_owned();
        config.billing.default_tax_rate_bps = tax.unwrap_or(0);

        // Range checks only make sense once every number parsed.
        if !result.is_valid() {
            return (None, result);
        }
        result.merge(config.validate());
        let config = result.is_valid().then_some(config);
        (config, result)
    }
}

fn messages(result: &ValidationResult) -> (Vec<String>, Vec<String>) {
    let errors = result.errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
    let warnings = result.warnings.iter().map(|w| format!("{}: {}", w.field, w.message)).collect();
    (errors, warnings)
}

#[component]
pub fn Settings() -> Element {
    let config = use_config();
    let ctx = use_catalog();
    let notifications = use_notifications();

    let mut draft = use_signal(|| SettingsDraft::from(&config.current()));
    let mut feedback = use_signal(ValidationResult::success);
    let mut format = use_signal(ConfigFormat::default);
    let mut exchange = use_signal(String::new);
    let mut confirm_reset = use_signal(|| false);

    let record = move |detail: &str| {
        ctx.catalog()
            .activity
            .log_success(&config.operator(), ActivityAction::ConfigUpdate, "Config", "console", Some(detail.to_owned()));
        ctx.touch();
    };

    let mut apply = move |next: ConsoleConfig, detail: &str| -> bool {
        match config.apply(next.clone()) {
            Ok(()) => {
                feedback.set(next.validate());
                draft.set(SettingsDraft::from(&next));
                record(detail);
                true
            }
            Err(err) => {
                if let ConsoleError::Validation { result } = &err {
                    feedback.set(result.clone());
                }
                notifications.error(err.user_message());
                false
            }
        }
    };

    let mut save = move |_| {
        let (parsed, result) = draft().into_config();
        match parsed {
            Some(next) => {
                if apply(next, "表单保存") {
                    notifications.success("配置已应用");
                }
            }
            None => {
                feedback.set(result);
                notifications.error("配置有误，请检查标红的字段");
            }
        }
    };

    let mut reset = move || {
        config.reset();
        let current = config.current();
        draft.set(SettingsDraft::from(&current));
        feedback.set(ValidationResult::success());
        record("恢复默认");
        notifications.info("已恢复默认配置");
    };

    let export = move |_| match config.current().export(format()) {
        Ok(text) => {
            exchange.set(text);
            notifications.info(format!("已导出为 {}", format().as_ref().to_uppercase()));
        }
        Err(err) => notifications.error(err.user_message()),
    };

    let import = move |_| match ConsoleConfig::import(&exchange(), format()) {
        Ok(next) => {
            if apply(next, "导入配置") {
                notifications.success("配置已导入并应用");
            }
        }
        Err(err) => {
            if let ConsoleError::Validation { result } = &err {
                feedback.set(result.clone());
            }
            tracing::warn!(error = %err, "configuration import rejected");
            notifications.error(err.user_message());
        }
    };

    let form = draft();
    let result = feedback();
    let (errors, warnings) = messages(&result);
    let level_options: Vec<(String, String)> =
        LOG_LEVELS.iter().map(|level| (level.to_string(), level.to_uppercase())).collect();
    let format_options: Vec<(String, String)> = [ConfigFormat::Toml, ConfigFormat::Json]
        .into_iter()
        .map(|f| (f.as_ref().to_owned(), f.as_ref().to_uppercase()))
        .collect();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "系统设置".to_string(),
                subtitle: "修改仅在本次会话内生效".to_string(),
                Button {
                    variant: "secondary".to_string(),
                    onclick: move |_| {
                        if config.confirm_destructive() {
                            confirm_reset.set(true);
                        } else {
                            reset();
                        }
                    },
                    "恢复默认"
                }
            }

            ValidationFeedback { errors, warnings }

            div { class: "grid grid-cols-1 gap-6 lg:grid-cols-2",
                form {
                    class: "bg-white shadow rounded-lg p-6 space-y-4",
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        save(());
                    },
                    h4 { class: "text-base font-medium text-gray-900", "控制台" }
                    FieldGrid {
                        Input {
                            label: "标题".to_string(),
                            value: form.title.clone(),
                            required: true,
                            error: error_text(&result, "console.title"),
                            oninput: move |value| draft.with_mut(|d| d.title = value),
                        }
                        Input {
                            label: "操作人".to_string(),
                            value: form.operator.clone(),
                            required: true,
                            error: error_text(&result, "console.operator"),
                            oninput: move |value| draft.with_mut(|d| d.operator = value),
                        }
                        Input {
                            label: "每页条数".to_string(),
                            input_type: "number".to_string(),
                            value: form.page_size.clone(),
                            error: error_text(&result, "console.page_size"),
                            oninput: move |value| draft.with_mut(|d| d.page_size = value),
                        }
                        Select {
                            label: "日志级别".to_string(),
                            value: form.log_level.clone(),
                            options: level_options,
                            error: error_text(&result, "console.log_level"),
                            onchange: move |value| draft.with_mut(|d| d.log_level = value),
                        }
                    }
                    Checkbox {
                        label: "删除、取消等操作前二次确认".to_string(),
                        checked: form.confirm_destructive,
                        onchange: move |checked| draft.with_mut(|d| d.confirm_destructive = checked),
                    }

                    h4 { class: "pt-2 text-base font-medium text-gray-900", "通知" }
                    FieldGrid {
                        Input {
                            label: "自动关闭 (秒)".to_string(),
                            input_type: "number".to_string(),
                            value: form.timeout_secs.clone(),
                            error: error_text(&result, "notifications.timeout_secs"),
                            oninput: move |value| draft.with_mut(|d| d.timeout_secs = value),
                        }
                        Input {
                            label: "最多显示".to_string(),
                            input_type: "number".to_string(),
                            value: form.max_visible.clone(),
                            error: error_text(&result, "notifications.max_visible"),
                            oninput: move |value| draft.with_mut(|d| d.max_visible = value),
                        }
                    }

                    h4 { class: "pt-2 text-base font-medium text-gray-900", "账单" }
                    FieldGrid {
                        Input {
                            label: "币种".to_string(),
                            value: form.currency.clone(),
                            error: error_text(&result, "billing.currency"),
                            oninput: move |value| draft.with_mut(|d| d.currency = value),
                        }
                        Input {
                            label: "货币符号".to_string(),
                            value: form.currency_symbol.clone(),
                            error: error_text(&result, "billing.currency_symbol"),
                            oninput: move |value| draft.with_mut(|d| d.currency_symbol = value),
                        }
                        Input {
                            label: "默认税率 (%)".to_string(),
                            value: form.default_tax_rate.clone(),
                            error: error_text(&result, "billing.default_tax_rate_bps"),
                            oninput: move |value| draft.with_mut(|d| d.default_tax_rate = value),
                        }
                    }
                    div { class: "flex justify-end pt-2",
                        Button { button_type: "submit".to_string(), "应用" }
                    }
                }

                div { class: "bg-white shadow rounded-lg p-6 space-y-4",
                    div { class: "flex items-center justify-between",
                        h4 { class: "text-base font-medium text-gray-900", "导入 / 导出" }
                        div { class: "w-28",
                            Select {
                                label: String::new(),
                                value: format().as_ref().to_string(),
                                options: format_options,
                                onchange: move |value: String| format.set(value.parse().unwrap_or_default()),
                            }
                        }
                    }
                    TextArea {
                        label: "配置文本".to_string(),
                        value: exchange(),
                        rows: 16,
                        code: true,
                        placeholder: "点击「导出」获取当前配置，或粘贴配置后点击「导入」".to_string(),
                        oninput: move |value| exchange.set(value),
                    }
                    div { class: "flex justify-end space-x-3",
                        Button { variant: "secondary".to_string(), onclick: export, "导出" }
                        Button { disabled: exchange().trim().is_empty(), onclick: import, "导入" }
                    }
                }
            }

            ConfirmDialog {
                show: confirm_reset(),
                message: "确定将所有设置恢复为默认值吗？".to_string(),
                confirm_label: "恢复默认".to_string(),
                on_confirm: move |_| {
                    confirm_reset.set(false);
                    reset();
                },
                on_cancel: move |_| confirm_reset.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = ConsoleConfig::default();
        let (parsed, result) = SettingsDraft::from(&config).into_config();
        assert!(result.is_valid());
        assert_eq!(parsed, Some(config));
    }

    #[test]
    fn test_unparsable_number_stops_before_range_checks() {
        let mut draft = SettingsDraft::from(&ConsoleConfig::default());
        draft.page_size = "ten".to_owned();
        let (parsed, result) = draft.into_config();
        assert!(parsed.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(result.error_for("console.page_size").is_some());
    }

    #[test]
    fn test_range_errors_are_keyed_by_path() {
        let mut draft = SettingsDraft::from(&ConsoleConfig::default());
        draft.timeout_secs = "0".to_owned();
        draft.currency = "yuan".to_owned();
        let (parsed, result) = draft.into_config();
        assert!(parsed.is_none());
        assert!(result.error_for("notifications.timeout_secs").is_some());
        // uppercased to YUAN, still not a three-letter code
        assert!(result.error_for("billing.currency").is_some());
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut draft = SettingsDraft::from(&ConsoleConfig::default());
        draft.page_size = "80".to_owned();
        draft.currency = " usd ".to_owned();
        let (parsed, result) = draft.into_config();
        let config = parsed.unwrap();
        assert_eq!(config.console.page_size, 80);
        assert_eq!(config.billing.currency, "USD");
        let (errors, warnings) = messages(&result);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("console.page_size"));
    }
}
