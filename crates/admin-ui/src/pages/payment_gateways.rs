//! Payment gateway settings page

use dioxus::prelude::*;
use hotelier_data::{GatewayMode, GatewayProvider, PaymentGateway, ValidationResult};

use crate::components::{
    Button, Checkbox, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::utils::form::{bps_to_percent_text, enum_options, error_text, parse_percent_bps, split_list, validated};

impl GridRow for PaymentGateway {
    const FIELDS: &'static [&'static str] =
        &["name", "provider", "mode", "api_key", "webhook_url", "fee", "currencies", "enabled"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => (&self.name).into(),
            "provider" => self.provider.label().into(),
            "mode" => self.mode.label().into(),
            "api_key" => self.masked_key().into(),
            "webhook_url" => (&self.webhook_url).into(),
            "fee" => self.fee_bps.into(),
            "currencies" => self.currencies.join(", ").into(),
            "enabled" => (if self.enabled { "已启用" } else { "已停用" }).into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.clone()
    }
}

fn gateway_columns() -> Vec<Column<PaymentGateway>> {
    vec![
        Column::new("name", "名称"),
        Column::new("provider", "服务商"),
        Column::new("mode", "环境")
            .format(|gateway: &PaymentGateway| CellContent::status(gateway.mode.as_ref(), gateway.mode.label())),
        Column::new("api_key", "API 密钥").unsortable(),
        Column::new("fee", "费率")
            .format(|gateway: &PaymentGateway| CellContent::text(format!("{}%", bps_to_percent_text(gateway.fee_bps)))),
        Column::new("currencies", "币种").unsortable(),
        Column::new("enabled", "状态").format(|gateway: &PaymentGateway| {
            if gateway.enabled {
                CellContent::status("enabled", "已启用")
            } else {
                CellContent::status("disabled", "已停用")
            }
        }),
    ]
}

fn gateway_actions(gateway: &PaymentGateway) -> Vec<MenuItem> {
    let mode = match gateway.mode {
        GatewayMode::Sandbox => MenuItem::new("mode:live", "切换到生产环境").icon("🚀"),
        GatewayMode::Live => MenuItem::new("mode:sandbox", "切换到沙箱环境").icon("🧪"),
    };
    vec![
        MenuItem::new("edit", "编辑").icon("✏️"),
        MenuItem::new("toggle", if gateway.enabled { "停用" } else { "启用" }).icon("⏯"),
        mode,
        MenuItem::new("delete", "删除").icon("🗑").danger(),
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub struct GatewayDraft {
    pub id: Option<String>,
    pub name: String,
    pub provider: String,
    pub mode: String,
    /// Blank on edit keeps the stored key
    pub api_key: String,
    pub stored_key: String,
    pub webhook_url: String,
    pub fee: String,
    pub currencies: String,
    pub enabled: bool,
}

impl Default for GatewayDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            provider: GatewayProvider::default().as_ref().to_owned(),
            mode: GatewayMode::default().as_ref().to_owned(),
            api_key: String::new(),
            stored_key: String::new(),
            webhook_url: String::new(),
            fee: "0.6".to_owned(),
            currencies: "CNY".to_owned(),
            enabled: false,
        }
    }
}

impl From<&PaymentGateway> for GatewayDraft {
    fn from(gateway: &PaymentGateway) -> Self {
        Self {
            id: Some(gateway.id.clone()),
            name: gateway.name.clone(),
            provider: gateway.provider.as_ref().to_owned(),
            mode: gateway.mode.as_ref().to_owned(),
            api_key: String::new(),
            stored_key: gateway.api_key.clone(),
            webhook_url: gateway.webhook_url.clone(),
            fee: bps_to_percent_text(gateway.fee_bps),
            currencies: gateway.currencies.join(", "),
            enabled: gateway.enabled,
        }
    }
}

impl GatewayDraft {
    pub fn into_record(self) -> Result<PaymentGateway, ValidationResult> {
        let mut result = ValidationResult::success();
        let fee_bps = parse_percent_bps(&mut result, "fee", &self.fee).unwrap_or(0);
        let api_key = match self.api_key.trim() {
            "" => self.stored_key,
            typed => typed.to_owned(),
        };
        let gateway = PaymentGateway {
            id: self.id.unwrap_or_default(),
            name: self.name.trim().to_owned(),
            provider: self.provider.parse().unwrap_or_default(),
            mode: self.mode.parse().unwrap_or_default(),
            api_key,
            webhook_url: self.webhook_url.trim().to_owned(),
            fee_bps,
            currencies: split_list(&self.currencies.to_uppercase()),
            enabled: self.enabled,
        };
        validated(gateway, result)
    }
}

#[component]
pub fn PaymentGateways() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let gateways = ctx.subscribe().gateways.list();
    let enabled = gateways.iter().filter(|gateway| gateway.enabled).count();
    let columns = use_hook(gateway_columns);

    let mut draft = use_signal(|| None::<GatewayDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<PaymentGateway>);

    let row_actions = use_callback(|gateway: PaymentGateway| gateway_actions(&gateway));

    let delete = move |gateway: PaymentGateway| {
        let result = ctx.catalog().gateways.delete(&gateway.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除支付通道「{}」", gateway.name));
    };

    let on_action = move |(key, gateway): (String, PaymentGateway)| {
        if let Some(mode) = key.strip_prefix("mode:") {
            let Ok(mode) = mode.parse::<GatewayMode>() else {
                return;
            };
            let result = ctx.catalog().gateways.change(
                &gateway.id,
                &config.operator(),
                ActivityAction::StatusChange,
                Some(mode.label().to_owned()),
                |g| {
                    g.mode = mode;
                    Ok(())
                },
            );
            ctx.settle(result, &notifications, format!("「{}」已切换到{}环境", gateway.name, mode.label()));
            return;
        }
        match key.as_str() {
            "edit" => {
                errors.set(ValidationResult::success());
                draft.set(Some(GatewayDraft::from(&gateway)));
            }
            "toggle" => {
                let next = !gateway.enabled;
                let label = if next { "启用" } else { "停用" };
                let result = ctx.catalog().gateways.change(
                    &gateway.id,
                    &config.operator(),
                    ActivityAction::StatusChange,
                    Some(label.to_owned()),
                    |g| {
                        g.enabled = next;
                        Ok(())
                    },
                );
                ctx.settle(result, &notifications, format!("「{}」已{label}", gateway.name));
            }
            "delete" if config.confirm_destructive() => pending_delete.set(Some(gateway)),
            "delete" => delete(gateway),
            _ => {}
        }
    };

    let save = move |_| {
        let Some(current) = draft() else {
            return;
        };
        let is_new = current.id.is_none();
        match current.into_record() {
            Err(result) => errors.set(result),
            Ok(gateway) => {
                let name = gateway.name.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.gateways.create(gateway, &config.operator())
                } else {
                    services.gateways.update(gateway, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存支付通道「{name}」")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let form = draft().unwrap_or_default();
    let errs = errors();
    let key_placeholder = if form.stored_key.is_empty() {
        "sk_test_...".to_string()
    } else {
        "留空则保留原密钥".to_string()
    };
    let delete_message = pending_delete()
        .map(|gateway| format!("确定删除支付通道「{}」吗？", gateway.name))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "支付通道".to_string(),
                subtitle: format!("共 {} 个通道，{} 个已启用", gateways.len(), enabled),
                Button {
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(GatewayDraft::default()));
                    },
                    "新增通道"
                }
            }

            DataTable {
                rows: gateways,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索名称、服务商、币种...".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑支付通道".to_string() } else { "新增支付通道".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                Input {
                    label: "名称".to_string(),
                    value: form.name.clone(),
                    required: true,
                    error: error_text(&errs, "name"),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.name = value }),
                }
                FieldGrid {
                    Select {
                        label: "服务商".to_string(),
                        value: form.provider.clone(),
                        options: enum_options::<GatewayProvider>(GatewayProvider::label),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.provider = value }),
                    }
                    Select {
                        label: "环境".to_string(),
                        value: form.mode.clone(),
                        options: enum_options::<GatewayMode>(GatewayMode::label),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.mode = value }),
                    }
                }
                Input {
                    label: "API 密钥".to_string(),
                    input_type: "password".to_string(),
                    value: form.api_key.clone(),
                    placeholder: key_placeholder,
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.api_key = value }),
                }
                Input {
                    label: "Webhook 地址".to_string(),
                    input_type: "url".to_string(),
                    value: form.webhook_url.clone(),
                    placeholder: "https://".to_string(),
                    error: error_text(&errs, "webhook_url"),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.webhook_url = value }),
                }
                FieldGrid {
                    Input {
                        label: "费率 (%)".to_string(),
                        value: form.fee.clone(),
                        error: error_text(&errs, "fee"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.fee = value }),
                    }
                    Input {
                        label: "币种".to_string(),
                        value: form.currencies.clone(),
                        placeholder: "CNY, USD".to_string(),
                        error: error_text(&errs, "currencies"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.currencies = value }),
                    }
                }
                Checkbox {
                    label: "启用".to_string(),
                    checked: form.enabled,
                    onchange: move |checked| draft.with_mut(|d| if let Some(d) = d { d.enabled = checked }),
                }
            }

            ConfirmDialog {
                show: pending_delete().is_some(),
                message: delete_message,
                confirm_label: "删除".to_string(),
                on_confirm: move |_| {
                    if let Some(gateway) = pending_delete.take() {
                        delete(gateway);
                    }
                },
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}
