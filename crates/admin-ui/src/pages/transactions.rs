//! Payment transactions: read-only list with refunds

use std::collections::HashMap;

use dioxus::prelude::*;
use hotelier_data::{Money, PaymentTransaction, TransactionStatus};

use crate::components::{ConfirmDialog, DataTable, MenuItem, PageHeader, Select};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::utils::form::enum_options;

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
    pub txn: PaymentTransaction,
    pub gateway_name: String,
}

impl GridRow for TransactionRow {
    const FIELDS: &'static [&'static str] = &[
        "reference",
        "gateway",
        "booking_reference",
        "amount",
        "method",
        "status",
        "created_on",
    ];

    fn field(&self, key: &str) -> CellValue {
        let txn = &self.txn;
        match key {
            "reference" => (&txn.reference).into(),
            "gateway" => (&self.gateway_name).into(),
            "booking_reference" => (&txn.booking_reference).into(),
            "amount" => txn.amount.into(),
            "method" => (&txn.method).into(),
            "status" => txn.status.label().into(),
            "created_on" => txn.created_on.into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.txn.id.clone()
    }
}

/// Joins gateway names; an unparsable status filter keeps everything.
pub fn transaction_rows(
    transactions: Vec<PaymentTransaction>,
    gateway_names: &HashMap<String, String>,
    status_filter: &str,
) -> Vec<TransactionRow> {
    let status = status_filter.parse::<TransactionStatus>().ok();
    transactions
        .into_iter()
        .filter(|txn| status.is_none_or(|status| txn.status == status))
        .map(|txn| TransactionRow {
            gateway_name: gateway_names
                .get(&txn.gateway_id)
                .cloned()
                .unwrap_or_else(|| txn.gateway_id.clone()),
            txn,
        })
        .collect()
}

/// Net amount received: succeeded payments only.
pub fn collected(transactions: &[PaymentTransaction]) -> Money {
    transactions
        .iter()
        .filter(|txn| txn.status == TransactionStatus::Succeeded)
        .map(|txn| txn.amount)
        .sum()
}

fn transaction_columns() -> Vec<Column<TransactionRow>> {
    vec![
        Column::new("reference", "流水号"),
        Column::new("gateway", "支付通道"),
        Column::new("booking_reference", "关联预订"),
        Column::new("amount", "金额")
            .format(|row: &TransactionRow| CellContent::text(format!("{} {}", row.txn.currency, row.txn.amount))),
        Column::new("method", "支付方式"),
        Column::new("created_on", "日期"),
        Column::new("status", "状态")
            .format(|row: &TransactionRow| CellContent::status(row.txn.status.as_ref(), row.txn.status.label())),
    ]
}

#[component]
pub fn Transactions() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let catalog = ctx.subscribe();
    let gateway_names: HashMap<String, String> = catalog
        .gateways
        .list()
        .into_iter()
        .map(|gateway| (gateway.id, gateway.name))
        .collect();
    let transactions = catalog.transactions.list();
    let received = collected(&transactions);
    let total = transactions.len();

    let mut status_filter = use_signal(String::new);
    let rows = transaction_rows(transactions, &gateway_names, &status_filter());
    let columns = use_hook(transaction_columns);
    let mut pending_refund = use_signal(|| None::<PaymentTransaction>);

    let row_actions = use_callback(|row: TransactionRow| {
        if row.txn.status == TransactionStatus::Succeeded {
            vec![MenuItem::new("refund", "退款").icon("↩").danger()]
        } else {
            Vec::new()
        }
    });

    let refund = move |txn: PaymentTransaction| {
        let result = ctx.catalog().transactions.change(
            &txn.id,
            &config.operator(),
            ActivityAction::StatusChange,
            Some(TransactionStatus::Refunded.label().to_owned()),
            PaymentTransaction::refund,
        );
        ctx.settle(result, &notifications, format!("流水 {} 已退款", txn.reference));
    };

    let on_action = move |(key, row): (String, TransactionRow)| {
        if key != "refund" {
            return;
        }
        if config.confirm_destructive() {
            pending_refund.set(Some(row.txn));
        } else {
            refund(row.txn);
        }
    };

    let mut filter_options = vec![(String::new(), "全部状态".to_string())];
    filter_options.extend(enum_options::<TransactionStatus>(TransactionStatus::label));
    let refund_message = pending_refund()
        .map(|txn| format!("确定为流水 {} 退款 {} {} 吗？", txn.reference, txn.currency, txn.amount))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "交易流水".to_string(),
                subtitle: format!("共 {total} 笔，已收款 {}", config.money(received)),
                div { class: "w-36",
                    Select {
                        label: String::new(),
                        value: status_filter(),
                        options: filter_options,
                        onchange: move |value| status_filter.set(value),
                    }
                }
            }

            DataTable {
                rows,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索流水号、通道、预订编号...".to_string(),
                empty_message: "没有符合条件的交易".to_string(),
                row_actions,
                on_action,
            }

            ConfirmDialog {
                show: pending_refund().is_some(),
                title: "确认退款".to_string(),
                message: refund_message,
                confirm_label: "退款".to_string(),
                on_confirm: move |_| {
                    if let Some(txn) = pending_refund.take() {
                        refund(txn);
                    }
                },
                on_cancel: move |_| pending_refund.set(None),
            }
        }
    }
}
