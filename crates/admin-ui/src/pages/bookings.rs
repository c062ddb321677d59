//! Booking management: list, lifecycle transitions, calendar and QR check-in

use chrono::{Datelike, NaiveDate};
use dioxus::prelude::*;
use hotelier_data::{Booking, BookingStatus, Money, ValidationResult};
use strum::IntoEnumIterator;

use crate::components::{
    Button, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, QrCheckInModal, Select,
    StatusBadge, Tone,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::services::{Catalog, today};
use crate::utils::calendar::{MonthGrid, WEEKDAY_LABELS, next_month, prev_month};
use crate::utils::form::{error_text, parse_date, parse_money, parse_number, validated};

#[derive(Clone, Debug, PartialEq)]
pub struct BookingRow {
    pub booking: Booking,
    pub room_label: String,
}

impl GridRow for BookingRow {
    const FIELDS: &'static [&'static str] = &[
        "reference",
        "guest_name",
        "guest_email",
        "room",
        "check_in",
        "check_out",
        "nights",
        "total",
        "status",
    ];

    fn field(&self, key: &str) -> CellValue {
        let booking = &self.booking;
        match key {
            "reference" => (&booking.reference).into(),
            "guest_name" => (&booking.guest_name).into(),
            "guest_email" => (&booking.guest_email).into(),
            "room" => (&self.room_label).into(),
            "check_in" => booking.check_in.into(),
            "check_out" => booking.check_out.into(),
            "nights" => CellValue::Int(booking.nights()),
            "total" => booking.total.into(),
            "status" => booking.status.label().into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.booking.id.clone()
    }
}

pub fn booking_rows(catalog: &Catalog, bookings: Vec<Booking>) -> Vec<BookingRow> {
    bookings
        .into_iter()
        .map(|booking| BookingRow {
            room_label: catalog.room_label(&booking.room_id),
            booking,
        })
        .collect()
}

fn booking_columns(currency_symbol: String) -> Vec<Column<BookingRow>> {
    vec![
        Column::new("reference", "预订编号"),
        Column::new("guest_name", "住客").format(|row: &BookingRow| {
            CellContent::text(format!("{} <{}>", row.booking.guest_name, row.booking.guest_email))
        }),
        Column::new("room", "客房"),
        Column::new("check_in", "入住"),
        Column::new("check_out", "离店"),
        Column::new("nights", "晚数"),
        Column::new("total", "金额")
            .format(move |row: &BookingRow| CellContent::text(row.booking.total.with_symbol(&currency_symbol))),
        Column::new("status", "状态")
            .format(|row: &BookingRow| CellContent::status(row.booking.status.as_ref(), row.booking.status.label())),
    ]
}

/// Verb shown in the action menu for moving to `next`.
fn transition_label(next: BookingStatus) -> &'static str {
    match next {
        BookingStatus::Pending => "重置为待确认",
        BookingStatus::Confirmed => "确认预订",
        BookingStatus::CheckedIn => "办理入住",
        BookingStatus::CheckedOut => "办理离店",
        BookingStatus::Cancelled => "取消预订",
    }
}

/// Menu entries for every legal next status.
pub fn transition_actions(status: BookingStatus) -> Vec<MenuItem> {
    BookingStatus::iter()
        .filter(|next| status.can_transition_to(*next))
        .map(|next| {
            let item = MenuItem::new(format!("to:{}", next.as_ref()), transition_label(next));
            if next == BookingStatus::Cancelled { item.danger() } else { item }
        })
        .collect()
}

/// Short reference for a new booking, e.g. `BK-3F9A21`.
fn new_reference() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("BK-{}", id[..6].to_uppercase())
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingDraft {
    pub id: Option<String>,
    pub reference: String,
    pub guest_name: String,
    pub guest_email: String,
    pub room_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    /// Empty means nightly rate × nights
    pub total: String,
    pub status: BookingStatus,
}

impl BookingDraft {
    pub fn new(room_id: &str, check_in: NaiveDate) -> Self {
        let check_out = check_in.succ_opt().unwrap_or(check_in);
        Self {
            id: None,
            reference: new_reference(),
            guest_name: String::new(),
            guest_email: String::new(),
            room_id: room_id.to_owned(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            guests: "1".to_owned(),
            total: String::new(),
            status: BookingStatus::Pending,
        }
    }

    /// `nightly_rate` prices the stay when no total was typed.
    pub fn into_record(self, nightly_rate: Option<Money>) -> Result<Booking, ValidationResult> {
        let mut result = ValidationResult::success();
        let check_in = parse_date(&mut result, "check_in", &self.check_in);
        let check_out = parse_date(&mut result, "check_out", &self.check_out);
        let guests = parse_number(&mut result, "guests", &self.guests).unwrap_or(0);
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return Err(result);
        };
        let nights = u32::try_from((check_out - check_in).num_days()).unwrap_or(0);
        let total = if self.total.trim().is_empty() {
            nightly_rate.map(|rate| rate.times(nights)).unwrap_or(Money::ZERO)
        } else {
            parse_money(&mut result, "total", &self.total).unwrap_or(Money::ZERO)
        };
        let booking = Booking {
            id: self.id.unwrap_or_default(),
            reference: self.reference.trim().to_uppercase(),
            guest_name: self.guest_name.trim().to_owned(),
            guest_email: self.guest_email.trim().to_owned(),
            room_id: self.room_id,
            check_in,
            check_out,
            guests,
            total,
            status: self.status,
        };
        validated(booking, result)
    }
}

impl From<&Booking> for BookingDraft {
    fn from(booking: &Booking) -> Self {
        Self {
            id: Some(booking.id.clone()),
            reference: booking.reference.clone(),
            guest_name: booking.guest_name.clone(),
            guest_email: booking.guest_email.clone(),
            room_id: booking.room_id.clone(),
            check_in: booking.check_in.to_string(),
            check_out: booking.check_out.to_string(),
            guests: booking.guests.to_string(),
            total: booking.total.to_string(),
            status: booking.status,
        }
    }
}

/// Confirmation the page is waiting for.
#[derive(Clone, Debug, PartialEq)]
enum Prompt {
    Cancel(Booking),
    Delete(Booking),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
    List,
    Calendar,
}

#[component]
pub fn Bookings() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let catalog = ctx.subscribe();
    let bookings = catalog.bookings.list();
    let rows = booking_rows(&catalog, bookings.clone());
    let room_options: Vec<(String, String)> = catalog
        .rooms
        .list()
        .into_iter()
        .map(|room| {
            let label = catalog.room_label(&room.id);
            (room.id, label)
        })
        .collect();
    let now = today();
    let arrivals = bookings
        .iter()
        .filter(|b| b.check_in == now && b.status == BookingStatus::Confirmed)
        .count();
    let columns = use_memo(move || booking_columns(config.current().billing.currency_symbol));

    let mut view = use_signal(|| View::List);
    let mut draft = use_signal(|| None::<BookingDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut prompt = use_signal(|| None::<Prompt>);
    let mut scanning = use_signal(|| false);

    let row_actions = use_callback(|row: BookingRow| {
        let mut items = transition_actions(row.booking.status);
        items.push(MenuItem::new("edit", "编辑").icon("✏️"));
        items.push(MenuItem::new("delete", "删除").icon("🗑").danger());
        items
    });

    let transition = move |booking: Booking, next: BookingStatus| {
        let result = ctx
            .catalog()
            .transition_booking(&booking.id, next, &config.operator());
        ctx.settle(result, &notifications, format!("{} {}", booking.reference, next.label()));
    };

    let delete = move |booking: Booking| {
        let result = ctx.catalog().bookings.delete(&booking.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除预订 {}", booking.reference));
    };

    let on_action = move |(key, row): (String, BookingRow)| {
        let booking = row.booking;
        if let Some(next) = key.strip_prefix("to:") {
            let Ok(next) = next.parse::<BookingStatus>() else {
                return;
            };
            if next == BookingStatus::Cancelled && config.confirm_destructive() {
                prompt.set(Some(Prompt::Cancel(booking)));
            } else {
                transition(booking, next);
            }
            return;
        }
        match key.as_str() {
            "edit" => {
                errors.set(ValidationResult::success());
                draft.set(Some(BookingDraft::from(&booking)));
            }
            "delete" if config.confirm_destructive() => prompt.set(Some(Prompt::Delete(booking))),
            "delete" => delete(booking),
            _ => {}
        }
    };

    let on_code = move |code: String| {
        let result = ctx.catalog().check_in_by_reference(&code, &config.operator());
        let checked_in = ctx.settle(result, &notifications, format!("{} 已办理入住", code.trim()));
        if checked_in.is_some() {
            scanning.set(false);
        }
    };

    let save = move |_| {
        let Some(current) = draft() else {
            return;
        };
        let is_new = current.id.is_none();
        let services = ctx.catalog();
        let rate = services.rooms.get(&current.room_id).ok().map(|room| room.price_per_night);
        match current.into_record(rate) {
            Err(result) => errors.set(result),
            Ok(booking) => {
                let reference = booking.reference.clone();
                let result = if is_new {
                    services.bookings.create(booking, &config.operator())
                } else {
                    services.bookings.update(booking, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存预订 {reference}")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let default_room = room_options.first().map(|(id, _)| id.clone()).unwrap_or_default();
    let form = draft().unwrap_or_else(|| BookingDraft::new(&default_room, now));
    let errs = errors();
    let prompt_message = match prompt() {
        Some(Prompt::Cancel(booking)) => format!("确定取消预订 {} 吗？", booking.reference),
        Some(Prompt::Delete(booking)) => format!("确定删除预订 {} 吗？此操作无法撤销。", booking.reference),
        None => String::new(),
    };
    let tab_class = |active: bool| {
        if active {
            "px-3 py-1.5 text-sm rounded-md bg-teal-600 text-white"
        } else {
            "px-3 py-1.5 text-sm rounded-md text-gray-600 hover:bg-gray-100"
        }
    };

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "预订管理".to_string(),
                subtitle: format!("共 {} 个预订，今日待入住 {} 个", bookings.len(), arrivals),
                div { class: "inline-flex rounded-md border border-gray-200 p-0.5",
                    button { class: tab_class(view() == View::List), onclick: move |_| view.set(View::List), "列表" }
                    button { class: tab_class(view() == View::Calendar), onclick: move |_| view.set(View::Calendar), "日历" }
                }
                Button {
                    variant: "secondary".to_string(),
                    onclick: move |_| scanning.set(true),
                    "扫码入住"
                }
                Button {
                    disabled: room_options.is_empty(),
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(BookingDraft::new(&default_room, today())));
                    },
                    "新增预订"
                }
            }

            if view() == View::List {
                DataTable {
                    rows,
                    columns: columns(),
                    page_size: config.page_size(),
                    search_placeholder: "搜索预订编号、住客、客房...".to_string(),
                    empty_message: "没有符合条件的预订".to_string(),
                    row_actions,
                    on_action,
                }
            } else {
                BookingCalendar { bookings: bookings.clone(), start: now }
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑预订".to_string() } else { "新增预订".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                FieldGrid {
                    Input {
                        label: "预订编号".to_string(),
                        value: form.reference.clone(),
                        required: true,
                        error: error_text(&errs, "reference"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.reference = value }),
                    }
                    Select {
                        label: "客房".to_string(),
                        value: form.room_id.clone(),
                        options: room_options.clone(),
                        required: true,
                        error: error_text(&errs, "room_id"),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.room_id = value }),
                    }
                    Input {
                        label: "住客姓名".to_string(),
                        value: form.guest_name.clone(),
                        required: true,
                        error: error_text(&errs, "guest_name"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.guest_name = value }),
                    }
                    Input {
                        label: "邮箱".to_string(),
                        input_type: "email".to_string(),
                        value: form.guest_email.clone(),
                        error: error_text(&errs, "guest_email"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.guest_email = value }),
                    }
                    Input {
                        label: "入住日期".to_string(),
                        input_type: "date".to_string(),
                        value: form.check_in.clone(),
                        error: error_text(&errs, "check_in"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.check_in = value }),
                    }
                    Input {
                        label: "离店日期".to_string(),
                        input_type: "date".to_string(),
                        value: form.check_out.clone(),
                        error: error_text(&errs, "check_out"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.check_out = value }),
                    }
                    Input {
                        label: "人数".to_string(),
                        input_type: "number".to_string(),
                        value: form.guests.clone(),
                        error: error_text(&errs, "guests"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.guests = value }),
                    }
                    Input {
                        label: "金额".to_string(),
                        value: form.total.clone(),
                        placeholder: "留空按房价计算".to_string(),
                        error: error_text(&errs, "total"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.total = value }),
                    }
                }
            }

            ConfirmDialog {
                show: prompt().is_some(),
                message: prompt_message,
                confirm_label: "确认".to_string(),
                on_confirm: move |_| match prompt.take() {
                    Some(Prompt::Cancel(booking)) => transition(booking, BookingStatus::Cancelled),
                    Some(Prompt::Delete(booking)) => delete(booking),
                    None => {}
                },
                on_cancel: move |_| prompt.set(None),
            }

            QrCheckInModal {
                show: scanning(),
                onclose: move |_| scanning.set(false),
                on_code,
            }
        }
    }
}

/// Month view of occupied nights with previous/next navigation.
#[component]
fn BookingCalendar(bookings: Vec<Booking>, start: NaiveDate) -> Element {
    let mut cursor = use_signal(move || (start.year(), start.month()));
    let (year, month) = cursor();
    let Some(grid) = MonthGrid::build(year, month, &bookings) else {
        return rsx! {};
    };
    let title = grid.title();
    let room_nights = grid.room_nights();

    rsx! {
        div { class: "bg-white shadow rounded-lg p-4",
            div { class: "flex items-center justify-between mb-4",
                Button {
                    variant: "secondary".to_string(),
                    size: "small".to_string(),
                    onclick: move |_| cursor.set(prev_month(year, month)),
                    "‹ 上月"
                }
                div { class: "text-center",
                    h4 { class: "text-base font-medium text-gray-900", "{title}" }
                    p { class: "text-xs text-gray-500", "共 {room_nights} 间夜" }
                }
                Button {
                    variant: "secondary".to_string(),
                    size: "small".to_string(),
                    onclick: move |_| cursor.set(next_month(year, month)),
                    "下月 ›"
                }
            }
            table { class: "w-full table-fixed border-collapse text-xs",
                thead {
                    tr {
                        for label in WEEKDAY_LABELS {
                            th { class: "py-2 font-medium text-gray-500", "{label}" }
                        }
                    }
                }
                tbody {
                    for (index, week) in grid.weeks.iter().enumerate() {
                        tr { key: "{index}",
                            for cell in week.iter() {
                                td { class: "h-24 align-top border border-gray-100 p-1",
                                    if let Some(day) = cell {
                                        div { class: if day.date == start { "font-semibold text-teal-700" } else { "text-gray-700" },
                                            {day.date.day().to_string()}
                                        }
                                        for booking in day.bookings.iter().take(2) {
                                            div { class: "mt-0.5 truncate", title: "{booking.guest_name}",
                                                StatusBadge {
                                                    label: booking.reference.clone(),
                                                    tone: Tone::for_label(booking.status.as_ref()),
                                                }
                                            }
                                        }
                                        if day.bookings.len() > 2 {
                                            div { class: "mt-0.5 text-gray-400", {format!("+{}", day.bookings.len() - 2)} }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
