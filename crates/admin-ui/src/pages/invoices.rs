//! Invoice management with a line-item editor and live totals

use chrono::{Datelike, Days, NaiveDate};
use dioxus::prelude::*;
use hotelier_data::{Invoice, InvoiceItem, InvoiceStatus, InvoiceTotals, Money, ValidationResult};

use crate::components::{
    Button, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, Modal, PageHeader, StatusBadge,
    Tone,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::services::today;
use crate::utils::form::{
    bps_to_percent_text, error_text, parse_date, parse_money, parse_number, parse_percent_bps, validated,
};

impl GridRow for Invoice {
    const FIELDS: &'static [&'static str] =
        &["number", "bill_to", "booking_reference", "issued_on", "due_on", "total", "status"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "number" => (&self.number).into(),
            "bill_to" => (&self.bill_to).into(),
            "booking_reference" => (&self.booking_reference).into(),
            "issued_on" => self.issued_on.into(),
            "due_on" => self.due_on.into(),
            "total" => self.totals().total.into(),
            "status" => self.status.label().into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.clone()
    }
}

fn invoice_columns(currency_symbol: String, date: NaiveDate) -> Vec<Column<Invoice>> {
    vec![
        Column::new("number", "发票号"),
        Column::new("bill_to", "抬头"),
        Column::new("booking_reference", "关联预订").format(|invoice: &Invoice| {
            if invoice.booking_reference.is_empty() {
                CellContent::muted("-")
            } else {
                CellContent::text(&invoice.booking_reference)
            }
        }),
        Column::new("issued_on", "开票日期"),
        Column::new("due_on", "到期日").format(move |invoice: &Invoice| {
            if invoice.is_past_due(date) {
                CellContent::status("overdue", format!("{} 已过期", invoice.due_on))
            } else {
                CellContent::text(invoice.due_on.to_string())
            }
        }),
        Column::new("total", "合计")
            .format(move |invoice: &Invoice| CellContent::text(invoice.totals().total.with_symbol(&currency_symbol))),
        Column::new("status", "状态")
            .format(|invoice: &Invoice| CellContent::status(invoice.status.as_ref(), invoice.status.label())),
    ]
}

/// Menu entries for an invoice on `date`.
pub fn invoice_actions(invoice: &Invoice, date: NaiveDate) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::new("view", "查看").icon("👁")];
    if invoice.status == InvoiceStatus::Draft {
        items.push(MenuItem::new("edit", "编辑").icon("✏️"));
        items.push(MenuItem::new("to:unpaid", "开具").icon("📨"));
    }
    if invoice.status.can_transition_to(InvoiceStatus::Paid) {
        items.push(MenuItem::new("to:paid", "标记已支付").icon("💰"));
    }
    if invoice.is_past_due(date) {
        items.push(MenuItem::new("to:overdue", "标记逾期").icon("⏰"));
    }
    if invoice.status.can_transition_to(InvoiceStatus::Void) {
        items.push(MenuItem::new("to:void", "作废").icon("⛔").danger());
    }
    if invoice.status == InvoiceStatus::Draft {
        items.push(MenuItem::new("delete", "删除").icon("🗑").danger());
    }
    items
}

/// `INV-<year>-<n>` with the first `n` not already taken.
pub fn next_invoice_number(existing: &[Invoice], date: NaiveDate) -> String {
    (existing.len() + 1..)
        .map(|n| format!("INV-{}-{:03}", date.year(), n))
        .find(|candidate| existing.iter().all(|invoice| &invoice.number != candidate))
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemDraft {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: "1".to_owned(),
            unit_price: String::new(),
        }
    }
}

impl From<&InvoiceItem> for ItemDraft {
    fn from(item: &InvoiceItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceDraft {
    pub id: Option<String>,
    pub number: String,
    pub booking_reference: String,
    pub bill_to: String,
    pub issued_on: String,
    pub due_on: String,
    pub items: Vec<ItemDraft>,
    pub discount: String,
    /// Percentage text, e.g. `6`
    pub tax_rate: String,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    pub fn new(number: String, issued_on: NaiveDate, tax_rate_bps: u32) -> Self {
        let due_on = issued_on.checked_add_days(Days::new(14)).unwrap_or(issued_on);
        Self {
            id: None,
            number,
            booking_reference: String::new(),
            bill_to: String::new(),
            issued_on: issued_on.to_string(),
            due_on: due_on.to_string(),
            items: vec![ItemDraft::default()],
            discount: "0".to_owned(),
            tax_rate: bps_to_percent_text(tax_rate_bps),
            status: InvoiceStatus::Draft,
        }
    }

    /// Totals of whatever parses so far; unreadable numbers count as zero.
    pub fn preview_totals(&self) -> InvoiceTotals {
        let items = self
            .items
            .iter()
            .map(|item| InvoiceItem {
                description: item.description.clone(),
                quantity: item.quantity.trim().parse().unwrap_or(0),
                unit_price: Money::parse(&item.unit_price).unwrap_or(Money::ZERO),
            })
            .collect();
        let tax_rate_bps = Money::parse(&self.tax_rate)
            .and_then(|rate| u32::try_from(rate.minor()).ok())
            .unwrap_or(0);
        Invoice {
            id: String::new(),
            number: String::new(),
            booking_reference: String::new(),
            bill_to: String::new(),
            issued_on: NaiveDate::MIN,
            due_on: NaiveDate::MIN,
            items,
            discount: Money::parse(&self.discount).unwrap_or(Money::ZERO),
            tax_rate_bps,
            status: self.status,
        }
        .totals()
    }

    pub fn into_record(self) -> Result<Invoice, ValidationResult> {
        let mut result = ValidationResult::success();
        let issued_on = parse_date(&mut result, "issued_on", &self.issued_on);
        let due_on = parse_date(&mut result, "due_on", &self.due_on);
        let discount = if self.discount.trim().is_empty() {
            Money::ZERO
        } else {
            parse_money(&mut result, "discount", &self.discount).unwrap_or(Money::ZERO)
        };
        let tax_rate_bps = parse_percent_bps(&mut result, "tax_rate", &self.tax_rate).unwrap_or(0);
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let field = format!("items[{index}]");
                InvoiceItem {
                    description: item.description.trim().to_owned(),
                    quantity: parse_number(&mut result, &field, &item.quantity).unwrap_or(0),
                    unit_price: parse_money(&mut result, &field, &item.unit_price).unwrap_or(Money::ZERO),
                }
            })
            .collect();
        let (Some(issued_on), Some(due_on)) = (issued_on, due_on) else {
            return Err(result);
        };
        let invoice = Invoice {
            id: self.id.unwrap_or_default(),
            number: self.number.trim().to_owned(),
            booking_reference: self.booking_reference.trim().to_uppercase(),
            bill_to: self.bill_to.trim().to_owned(),
            issued_on,
            due_on,
            items,
            discount,
            tax_rate_bps,
            status: self.status,
        };
        validated(invoice, result)
    }
}

impl From<&Invoice> for InvoiceDraft {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: Some(invoice.id.clone()),
            number: invoice.number.clone(),
            booking_reference: invoice.booking_reference.clone(),
            bill_to: invoice.bill_to.clone(),
            issued_on: invoice.issued_on.to_string(),
            due_on: invoice.due_on.to_string(),
            items: invoice.items.iter().map(ItemDraft::from).collect(),
            discount: invoice.discount.to_string(),
            tax_rate: bps_to_percent_text(invoice.tax_rate_bps),
            status: invoice.status,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Prompt {
    Void(Invoice),
    Delete(Invoice),
}

#[component]
pub fn Invoices() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let invoices = ctx.subscribe().invoices.list();
    let now = today();
    let outstanding: Money = invoices
        .iter()
        .filter(|invoice| invoice.status.is_outstanding())
        .map(|invoice| invoice.totals().total)
        .sum();
    let columns = use_memo(move || invoice_columns(config.current().billing.currency_symbol, today()));

    let mut draft = use_signal(|| None::<InvoiceDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut prompt = use_signal(|| None::<Prompt>);
    let mut viewing = use_signal(|| None::<Invoice>);

    let row_actions = use_callback(|invoice: Invoice| invoice_actions(&invoice, today()));

    let transition = move |invoice: Invoice, next: InvoiceStatus| {
        let result = ctx.catalog().invoices.change(
            &invoice.id,
            &config.operator(),
            ActivityAction::StatusChange,
            Some(next.label().to_owned()),
            |inv| inv.transition(next),
        );
        ctx.settle(result, &notifications, format!("发票 {} {}", invoice.number, next.label()));
    };

    let delete = move |invoice: Invoice| {
        let result = ctx.catalog().invoices.delete(&invoice.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除发票 {}", invoice.number));
    };

    let on_action = move |(key, invoice): (String, Invoice)| {
        if let Some(next) = key.strip_prefix("to:") {
            let Ok(next) = next.parse::<InvoiceStatus>() else {
                return;
            };
            if next == InvoiceStatus::Void && config.confirm_destructive() {
                prompt.set(Some(Prompt::Void(invoice)));
            } else {
                transition(invoice, next);
            }
            return;
        }
        match key.as_str() {
            "view" => viewing.set(Some(invoice)),
            "edit" => {
                errors.set(ValidationResult::success());
                draft.set(Some(InvoiceDraft::from(&invoice)));
            }
            "delete" if config.confirm_destructive() => prompt.set(Some(Prompt::Delete(invoice))),
            "delete" => delete(invoice),
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
            Ok(invoice) => {
                let number = invoice.number.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.invoices.create(invoice, &config.operator())
                } else {
                    services.invoices.update(invoice, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存发票 {number}")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let new_draft = move || {
        let existing = ctx.catalog().invoices.list();
        let date = today();
        let tax = config.current().billing.default_tax_rate_bps;
        InvoiceDraft::new(next_invoice_number(&existing, date), date, tax)
    };

    let form = draft().unwrap_or_else(|| InvoiceDraft::new(String::new(), now, 0));
    let preview = form.preview_totals();
    let errs = errors();
    let items_error = error_text(&errs, "items");
    let prompt_message = match prompt() {
        Some(Prompt::Void(invoice)) => format!("确定作废发票 {} 吗？", invoice.number),
        Some(Prompt::Delete(invoice)) => format!("确定删除发票 {} 吗？", invoice.number),
        None => String::new(),
    };

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "发票管理".to_string(),
                subtitle: format!("共 {} 张发票，待收 {}", invoices.len(), config.money(outstanding)),
                Button {
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(new_draft()));
                    },
                    "新建发票"
                }
            }

            DataTable {
                rows: invoices,
                columns: columns(),
                page_size: config.page_size(),
                search_placeholder: "搜索发票号、抬头、预订编号...".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑发票".to_string() } else { "新建发票".to_string() },
                width: "sm:max-w-3xl".to_string(),
                on_save: save,
                on_cancel: move |_| draft.set(None),
                FieldGrid {
                    Input {
                        label: "发票号".to_string(),
                        value: form.number.clone(),
                        required: true,
                        error: error_text(&errs, "number"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.number = value }),
                    }
                    Input {
                        label: "关联预订".to_string(),
                        value: form.booking_reference.clone(),
                        placeholder: "BK-240001".to_string(),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.booking_reference = value }),
                    }
                }
                Input {
                    label: "抬头".to_string(),
                    value: form.bill_to.clone(),
                    required: true,
                    error: error_text(&errs, "bill_to"),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.bill_to = value }),
                }
                FieldGrid {
                    Input {
                        label: "开票日期".to_string(),
                        input_type: "date".to_string(),
                        value: form.issued_on.clone(),
                        error: error_text(&errs, "issued_on"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.issued_on = value }),
                    }
                    Input {
                        label: "到期日".to_string(),
                        input_type: "date".to_string(),
                        value: form.due_on.clone(),
                        error: error_text(&errs, "due_on"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.due_on = value }),
                    }
                }

                // Line items
                div { class: "space-y-2",
                    div { class: "grid grid-cols-12 gap-2 text-xs font-medium text-gray-500",
                        span { class: "col-span-6", "项目" }
                        span { class: "col-span-2", "数量" }
                        span { class: "col-span-3", "单价" }
                    }
                    for (index, item) in form.items.iter().enumerate() {
                        div { key: "{index}", class: "grid grid-cols-12 gap-2 items-start",
                            input {
                                class: "col-span-6 rounded-md border border-gray-300 px-2 py-1.5 text-sm",
                                value: "{item.description}",
                                placeholder: "房费、早餐...",
                                oninput: move |evt| draft.with_mut(|d| {
                                    if let Some(line) = d.as_mut().and_then(|d| d.items.get_mut(index)) {
                                        line.description = evt.value();
                                    }
                                }),
                            }
                            input {
                                class: "col-span-2 rounded-md border border-gray-300 px-2 py-1.5 text-sm",
                                r#type: "number",
                                value: "{item.quantity}",
                                oninput: move |evt| draft.with_mut(|d| {
                                    if let Some(line) = d.as_mut().and_then(|d| d.items.get_mut(index)) {
                                        line.quantity = evt.value();
                                    }
                                }),
                            }
                            input {
                                class: "col-span-3 rounded-md border border-gray-300 px-2 py-1.5 text-sm",
                                value: "{item.unit_price}",
                                placeholder: "0.00",
                                oninput: move |evt| draft.with_mut(|d| {
                                    if let Some(line) = d.as_mut().and_then(|d| d.items.get_mut(index)) {
                                        line.unit_price = evt.value();
                                    }
                                }),
                            }
                            button {
                                r#type: "button",
                                class: "col-span-1 text-gray-400 hover:text-red-600 disabled:opacity-30",
                                disabled: form.items.len() == 1,
                                "aria-label": "删除此行",
                                onclick: move |_| draft.with_mut(|d| {
                                    if let Some(d) = d {
                                        if d.items.len() > 1 && index < d.items.len() {
                                            d.items.remove(index);
                                        }
                                    }
                                }),
                                "✕"
                            }
                            if let Some(message) = error_text(&errs, &format!("items[{index}]")) {
                                p { class: "col-span-12 text-xs text-red-600", "{message}" }
                            }
                        }
                    }
                    if let Some(message) = items_error {
                        p { class: "text-xs text-red-600", "{message}" }
                    }
                    Button {
                        variant: "secondary".to_string(),
                        size: "small".to_string(),
                        onclick: move |_| draft.with_mut(|d| if let Some(d) = d { d.items.push(ItemDraft::default()) }),
                        "+ 添加项目"
                    }
                }

                FieldGrid {
                    Input {
                        label: "优惠金额".to_string(),
                        value: form.discount.clone(),
                        error: error_text(&errs, "discount"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.discount = value }),
                    }
                    Input {
                        label: "税率 (%)".to_string(),
                        value: form.tax_rate.clone(),
                        error: error_text(&errs, "tax_rate"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.tax_rate = value }),
                    }
                }
                TotalsTable { totals: preview }
            }

            if let Some(invoice) = viewing() {
                InvoiceDetail { invoice, onclose: move |_| viewing.set(None) }
            }

            ConfirmDialog {
                show: prompt().is_some(),
                message: prompt_message,
                on_confirm: move |_| match prompt.take() {
                    Some(Prompt::Void(invoice)) => transition(invoice, InvoiceStatus::Void),
                    Some(Prompt::Delete(invoice)) => delete(invoice),
                    None => {}
                },
                on_cancel: move |_| prompt.set(None),
            }
        }
    }
}

#[component]
fn TotalsTable(totals: InvoiceTotals) -> Element {
    let config = use_config();
    let lines = [
        ("小计", config.money(totals.subtotal)),
        ("优惠", format!("-{}", config.money(totals.discount))),
        ("税额", config.money(totals.tax)),
    ];
    let total = config.money(totals.total);

    rsx! {
        dl { class: "ml-auto w-full sm:w-64 space-y-1 text-sm",
            for (label, amount) in lines {
                div { class: "flex justify-between text-gray-600",
                    dt { "{label}" }
                    dd { "{amount}" }
                }
            }
            div { class: "flex justify-between border-t pt-1 font-semibold text-gray-900",
                dt { "合计" }
                dd { "{total}" }
            }
        }
    }
}

/// Read-only invoice with its lines and totals
#[component]
fn InvoiceDetail(invoice: Invoice, onclose: EventHandler<()>) -> Element {
    let config = use_config();
    let totals = invoice.totals();
    let tax_rate = bps_to_percent_text(invoice.tax_rate_bps);
    let reference = if invoice.booking_reference.is_empty() {
        "-".to_owned()
    } else {
        invoice.booking_reference.clone()
    };
    let lines: Vec<(String, u32, String, String)> = invoice
        .items
        .iter()
        .map(|item| {
            (
                item.description.clone(),
                item.quantity,
                config.money(item.unit_price),
                config.money(item.amount()),
            )
        })
        .collect();

    rsx! {
        Modal {
            show: true,
            title: format!("发票 {}", invoice.number),
            width: "sm:max-w-2xl".to_string(),
            onclose: move |_| onclose.call(()),
            div { class: "space-y-4 text-sm",
                div { class: "flex items-start justify-between",
                    dl { class: "grid grid-cols-2 gap-x-6 gap-y-1 text-gray-600",
                        dt { "抬头" }
                        dd { class: "text-gray-900", "{invoice.bill_to}" }
                        dt { "关联预订" }
                        dd { class: "text-gray-900", "{reference}" }
                        dt { "开票日期" }
                        dd { class: "text-gray-900", "{invoice.issued_on}" }
                        dt { "到期日" }
                        dd { class: "text-gray-900", "{invoice.due_on}" }
                        dt { "税率" }
                        dd { class: "text-gray-900", "{tax_rate}%" }
                    }
                    StatusBadge {
                        label: invoice.status.label().to_string(),
                        tone: Tone::for_label(invoice.status.as_ref()),
                    }
                }
                table { class: "min-w-full divide-y divide-gray-200",
                    thead {
                        tr { class: "text-left text-xs text-gray-500",
                            th { class: "py-2", "项目" }
                            th { class: "py-2 text-right", "数量" }
                            th { class: "py-2 text-right", "单价" }
                            th { class: "py-2 text-right", "金额" }
                        }
                    }
                    tbody { class: "divide-y divide-gray-100",
                        for (description, quantity, unit_price, amount) in lines {
                            tr {
                                td { class: "py-2", "{description}" }
                                td { class: "py-2 text-right", "{quantity}" }
                                td { class: "py-2 text-right", "{unit_price}" }
                                td { class: "py-2 text-right", "{amount}" }
                            }
                        }
                    }
                }
                TotalsTable { totals }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridState, render_cell};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn invoice(number: &str, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: format!("inv-{number}"),
            number: number.to_owned(),
            booking_reference: "BK-240001".to_owned(),
            bill_to: "Zhang Wei".to_owned(),
            issued_on: date(7, 1),
            due_on: date(7, 15),
            items: vec![
                InvoiceItem {
                    description: "Room".to_owned(),
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
            status,
        }
    }

    #[test]
    fn test_actions_by_status() {
        let keys = |inv: &Invoice, on| invoice_actions(inv, on).into_iter().map(|i| i.key).collect::<Vec<_>>();
        assert_eq!(
            keys(&invoice("A", InvoiceStatus::Draft), date(7, 2)),
            vec!["view", "edit", "to:unpaid", "to:void", "delete"]
        );
        assert_eq!(keys(&invoice("B", InvoiceStatus::Unpaid), date(7, 2)), vec!["view", "to:paid", "to:void"]);
        assert_eq!(
            keys(&invoice("C", InvoiceStatus::Unpaid), date(7, 20)),
            vec!["view", "to:paid", "to:overdue", "to:void"]
        );
        assert_eq!(keys(&invoice("D", InvoiceStatus::Paid), date(7, 20)), vec!["view"]);
    }

    #[test]
    fn test_next_number_skips_taken() {
        let existing = vec![invoice("INV-2024-002", InvoiceStatus::Paid)];
        assert_eq!(next_invoice_number(&existing, date(7, 1)), "INV-2024-003");
        let existing = vec![invoice("INV-2024-001", InvoiceStatus::Paid), invoice("X", InvoiceStatus::Paid)];
        assert_eq!(next_invoice_number(&existing, date(7, 1)), "INV-2024-003");
        assert_eq!(next_invoice_number(&[], date(7, 1)), "INV-2024-001");
    }

    #[test]
    fn test_sorts_by_computed_total() {
        let mut small = invoice("S", InvoiceStatus::Paid);
        small.items.truncate(1);
        let rows = vec![invoice("L", InvoiceStatus::Paid), small];
        let mut state = GridState::new(10);
        state.toggle_sort("total");
        assert_eq!(state.view(&rows).rows[0].number, "S");
    }

    #[test]
    fn test_due_column_flags_past_due() {
        let columns = invoice_columns("¥".to_owned(), date(7, 20));
        let due = columns.iter().find(|c| c.key == "due_on").unwrap();
        let cell = render_cell(due, &invoice("A", InvoiceStatus::Unpaid));
        assert!(matches!(cell, CellContent::Badge { .. }));
        let paid = render_cell(due, &invoice("B", InvoiceStatus::Paid));
        assert_eq!(paid, CellContent::text("2024-07-15"));
    }

    #[test]
    fn test_preview_matches_saved_totals() {
        let original = invoice("A", InvoiceStatus::Draft);
        let draft = InvoiceDraft::from(&original);
        assert_eq!(draft.preview_totals(), original.totals());
        assert_eq!(draft.into_record().unwrap(), original);
    }

    #[test]
    fn test_preview_tolerates_partial_input() {
        let mut draft = InvoiceDraft::new("INV-1".to_owned(), date(7, 1), 600);
        draft.items[0].unit_price = "abc".to_owned();
        draft.items.push(ItemDraft {
            description: "Spa".to_owned(),
            quantity: "2".to_owned(),
            unit_price: "50".to_owned(),
        });
        let totals = draft.preview_totals();
        assert_eq!(totals.subtotal, Money::from_major(100));
        assert_eq!(totals.total, Money::from_major(106));
    }

    #[test]
    fn test_item_errors_are_indexed() {
        let mut draft = InvoiceDraft::new("INV-1".to_owned(), date(7, 1), 600);
        draft.bill_to = "Li Na".to_owned();
        draft.items[0] = ItemDraft {
            description: "Room".to_owned(),
            quantity: "1".to_owned(),
            unit_price: "300".to_owned(),
        };
        draft.items.push(ItemDraft::default());
        let result = draft.into_record().unwrap_err();
        assert!(result.error_for("items[0]").is_none());
        assert!(result.error_for("items[1]").is_some());
    }
}
