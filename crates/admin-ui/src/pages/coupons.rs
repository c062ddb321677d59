//! Coupon management page

use chrono::NaiveDate;
use dioxus::prelude::*;
use hotelier_data::{Coupon, Discount, ValidationResult};

use crate::components::{
    Button, Checkbox, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::services::today;
use crate::utils::form::{
    bps_to_percent_text, error_text, parse_date, parse_money, parse_number, parse_percent_bps, validated,
};

/// Badge key and label of a coupon on `date`.
pub fn coupon_state(coupon: &Coupon, date: NaiveDate) -> (&'static str, &'static str) {
    if !coupon.active {
        ("inactive", "已停用")
    } else if coupon.is_exhausted() {
        ("exhausted", "已用完")
    } else if date > coupon.valid_until {
        ("expired", "已过期")
    } else if date < coupon.valid_from {
        ("pending", "未开始")
    } else {
        ("redeemable", "今日可用")
    }
}

fn usage_text(coupon: &Coupon) -> String {
    match coupon.usage_limit {
        Some(limit) => format!("{}/{}", coupon.used_count, limit),
        None => format!("{}/不限", coupon.used_count),
    }
}

impl GridRow for Coupon {
    const FIELDS: &'static [&'static str] = &["code", "discount", "valid_from", "valid_until", "usage", "active"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "code" => (&self.code).into(),
            "discount" => match self.discount {
                Discount::Percent { bps } => CellValue::Int(i64::from(bps)),
                Discount::Fixed { amount } => amount.into(),
            },
            "valid_from" => self.valid_from.into(),
            "valid_until" => self.valid_until.into(),
            "usage" => self.used_count.into(),
            "active" => (if self.active { "启用" } else { "停用" }).into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.clone()
    }
}

fn coupon_columns(currency_symbol: String, date: NaiveDate) -> Vec<Column<Coupon>> {
    vec![
        Column::new("code", "优惠码"),
        Column::new("discount", "优惠")
            .format(move |coupon: &Coupon| CellContent::text(coupon.discount.describe(&currency_symbol))),
        Column::new("valid_from", "开始日期"),
        Column::new("valid_until", "截止日期"),
        Column::new("usage", "已用/上限").format(|coupon: &Coupon| CellContent::text(usage_text(coupon))),
        Column::new("active", "状态").unsortable().format(move |coupon: &Coupon| {
            let (key, label) = coupon_state(coupon, date);
            CellContent::status(key, label)
        }),
    ]
}

const PERCENT: &str = "percent";
const FIXED: &str = "fixed";

#[derive(Clone, Debug, PartialEq)]
pub struct CouponDraft {
    pub id: Option<String>,
    pub code: String,
    /// `percent` or `fixed`
    pub discount_kind: String,
    pub discount_value: String,
    pub valid_from: String,
    pub valid_until: String,
    /// Empty for unlimited
    pub usage_limit: String,
    pub used_count: u32,
    pub active: bool,
}

impl CouponDraft {
    pub fn new(from: NaiveDate) -> Self {
        let until = from.checked_add_days(chrono::Days::new(30)).unwrap_or(from);
        Self {
            id: None,
            code: String::new(),
            discount_kind: PERCENT.to_owned(),
            discount_value: "10".to_owned(),
            valid_from: from.to_string(),
            valid_until: until.to_string(),
            usage_limit: String::new(),
            used_count: 0,
            active: true,
        }
    }

    pub fn into_record(self) -> Result<Coupon, ValidationResult> {
        let mut result = ValidationResult::success();
        let discount = if self.discount_kind == FIXED {
            parse_money(&mut result, "discount", &self.discount_value).map(|amount| Discount::Fixed { amount })
        } else {
            parse_percent_bps(&mut result, "discount", &self.discount_value).map(|bps| Discount::Percent { bps })
        };
        let valid_from = parse_date(&mut result, "valid_from", &self.valid_from);
        let valid_until = parse_date(&mut result, "valid_until", &self.valid_until);
        let usage_limit = if self.usage_limit.trim().is_empty() {
            None
        } else {
            parse_number(&mut result, "usage_limit", &self.usage_limit)
        };
        let (Some(discount), Some(valid_from), Some(valid_until)) = (discount, valid_from, valid_until) else {
            return Err(result);
        };
        let coupon = Coupon {
            id: self.id.unwrap_or_default(),
            code: self.code.trim().to_uppercase(),
            discount,
            valid_from,
            valid_until,
            usage_limit,
            used_count: self.used_count,
            active: self.active,
        };
        validated(coupon, result)
    }
}

impl From<&Coupon> for CouponDraft {
    fn from(coupon: &Coupon) -> Self {
        let (discount_kind, discount_value) = match coupon.discount {
            Discount::Percent { bps } => (PERCENT, bps_to_percent_text(bps)),
            Discount::Fixed { amount } => (FIXED, amount.to_string()),
        };
        Self {
            id: Some(coupon.id.clone()),
            code: coupon.code.clone(),
            discount_kind: discount_kind.to_owned(),
            discount_value,
            valid_from: coupon.valid_from.to_string(),
            valid_until: coupon.valid_until.to_string(),
            usage_limit: coupon.usage_limit.map(|limit| limit.to_string()).unwrap_or_default(),
            used_count: coupon.used_count,
            active: coupon.active,
        }
    }
}

#[component]
pub fn Coupons() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let coupons = ctx.subscribe().coupons.list();
    let now = today();
    let redeemable = coupons.iter().filter(|coupon| coupon.is_redeemable_on(now)).count();
    let columns = use_memo(move || coupon_columns(config.current().billing.currency_symbol, today()));

    let mut draft = use_signal(|| None::<CouponDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<Coupon>);

    let row_actions = use_callback(|coupon: Coupon| {
        vec![
            MenuItem::new("edit", "编辑").icon("✏️"),
            MenuItem::new("toggle", if coupon.active { "停用" } else { "启用" }).icon("⏯"),
            MenuItem::new("delete", "删除").icon("🗑").danger(),
        ]
    });

    let delete = move |coupon: Coupon| {
        let result = ctx.catalog().coupons.delete(&coupon.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除优惠码 {}", coupon.code));
    };

    let on_action = move |(key, coupon): (String, Coupon)| match key.as_str() {
        "edit" => {
            errors.set(ValidationResult::success());
            draft.set(Some(CouponDraft::from(&coupon)));
        }
        "toggle" => {
            let next = !coupon.active;
            let label = if next { "启用" } else { "停用" };
            let result = ctx.catalog().coupons.change(
                &coupon.id,
                &config.operator(),
                ActivityAction::StatusChange,
                Some(label.to_owned()),
                |c| {
                    c.active = next;
                    Ok(())
                },
            );
            ctx.settle(result, &notifications, format!("优惠码 {} 已{label}", coupon.code));
        }
        "delete" if config.confirm_destructive() => pending_delete.set(Some(coupon)),
        "delete" => delete(coupon),
        _ => {}
    };

    let save = move |_| {
        let Some(current) = draft() else {
            return;
        };
        let is_new = current.id.is_none();
        match current.into_record() {
            Err(result) => errors.set(result),
            Ok(coupon) => {
                let code = coupon.code.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.coupons.create(coupon, &config.operator())
                } else {
                    services.coupons.update(coupon, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存优惠码 {code}")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let form = draft().unwrap_or_else(|| CouponDraft::new(now));
    let errs = errors();
    let value_label = if form.discount_kind == FIXED { "立减金额" } else { "折扣比例 (%)" };
    let delete_message = pending_delete()
        .map(|coupon| format!("确定删除优惠码 {} 吗？", coupon.code))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "优惠券管理".to_string(),
                subtitle: format!("共 {} 个优惠码，今日可用 {} 个", coupons.len(), redeemable),
                Button {
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(CouponDraft::new(today())));
                    },
                    "新增优惠码"
                }
            }

            DataTable {
                rows: coupons,
                columns: columns(),
                page_size: config.page_size(),
                search_placeholder: "搜索优惠码...".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑优惠码".to_string() } else { "新增优惠码".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                Input {
                    label: "优惠码".to_string(),
                    value: form.code.clone(),
                    placeholder: "SUMMER15".to_string(),
                    required: true,
                    error: error_text(&errs, "code"),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.code = value }),
                }
                FieldGrid {
                    Select {
                        label: "优惠类型".to_string(),
                        value: form.discount_kind.clone(),
                        options: vec![
                            (PERCENT.to_string(), "按比例".to_string()),
                            (FIXED.to_string(), "固定金额".to_string()),
                        ],
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.discount_kind = value }),
                    }
                    Input {
                        label: value_label.to_string(),
                        value: form.discount_value.clone(),
                        required: true,
                        error: error_text(&errs, "discount"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.discount_value = value }),
                    }
                    Input {
                        label: "开始日期".to_string(),
                        input_type: "date".to_string(),
                        value: form.valid_from.clone(),
                        error: error_text(&errs, "valid_from"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.valid_from = value }),
                    }
                    Input {
                        label: "截止日期".to_string(),
                        input_type: "date".to_string(),
                        value: form.valid_until.clone(),
                        error: error_text(&errs, "valid_until"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.valid_until = value }),
                    }
                    Input {
                        label: "使用上限".to_string(),
                        input_type: "number".to_string(),
                        value: form.usage_limit.clone(),
                        placeholder: "留空表示不限".to_string(),
                        error: error_text(&errs, "usage_limit"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.usage_limit = value }),
                    }
                }
                Checkbox {
                    label: "启用".to_string(),
                    checked: form.active,
                    onchange: move |checked| draft.with_mut(|d| if let Some(d) = d { d.active = checked }),
                }
            }

            ConfirmDialog {
                show: pending_delete().is_some(),
                message: delete_message,
                confirm_label: "删除".to_string(),
                on_confirm: move |_| {
                    if let Some(coupon) = pending_delete.take() {
                        delete(coupon);
                    }
                },
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hotelier_data::Money;

    use super::*;
    use crate::grid::render_cell;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn coupon(code: &str, discount: Discount) -> Coupon {
        Coupon {
            id: format!("cpn-{code}"),
            code: code.to_owned(),
            discount,
            valid_from: date(6, 1),
            valid_until: date(8, 31),
            usage_limit: Some(10),
            used_count: 3,
            active: true,
        }
    }

    #[test]
    fn test_coupon_state() {
        let mut c = coupon("SUMMER15", Discount::Percent { bps: 1_500 });
        assert_eq!(coupon_state(&c, date(7, 1)), ("redeemable", "今日可用"));
        assert_eq!(coupon_state(&c, date(9, 1)).0, "expired");
        assert_eq!(coupon_state(&c, date(5, 1)).0, "pending");
        c.used_count = 10;
        assert_eq!(coupon_state(&c, date(7, 1)).0, "exhausted");
        c.active = false;
        assert_eq!(coupon_state(&c, date(7, 1)).0, "inactive");
    }

    #[test]
    fn test_columns_render_discount_and_usage() {
        let columns = coupon_columns("¥".to_owned(), date(7, 1));
        let row = coupon("FLAT50", Discount::Fixed { amount: Money::from_major(50) });
        let discount = columns.iter().find(|c| c.key == "discount").unwrap();
        assert_eq!(render_cell(discount, &row).as_text(), "¥50.00 off");
        let usage = columns.iter().find(|c| c.key == "usage").unwrap();
        assert_eq!(render_cell(usage, &row).as_text(), "3/10");
    }

    #[test]
    fn test_draft_round_trip() {
        for discount in [Discount::Percent { bps: 1_250 }, Discount::Fixed { amount: Money::from_minor(4_990) }] {
            let original = coupon("ROUND", discount);
            assert_eq!(CouponDraft::from(&original).into_record().unwrap(), original);
        }
    }

    #[test]
    fn test_draft_normalises_code_and_limit() {
        let mut draft = CouponDraft::new(date(6, 1));
        draft.code = " welcome10 ".to_owned();
        let coupon = draft.into_record().unwrap();
        assert_eq!(coupon.code, "WELCOME10");
        assert_eq!(coupon.usage_limit, None);
        assert_eq!(coupon.discount, Discount::Percent { bps: 1_000 });
        assert_eq!(coupon.valid_until, date(7, 1));
    }

    #[test]
    fn test_draft_errors() {
        let mut draft = CouponDraft::new(date(6, 1));
        draft.code = "x".to_owned();
        draft.discount_value = "0".to_owned();
        let result = draft.into_record().unwrap_err();
        assert!(result.error_for("code").is_some());
        assert!(result.error_for("discount").is_some());

        let mut bad_date = CouponDraft::new(date(6, 1));
        bad_date.valid_until = "soon".to_owned();
        assert!(bad_date.into_record().unwrap_err().error_for("valid_until").is_some());
    }
}
