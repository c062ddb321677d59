//! Room management page

use std::collections::HashMap;

use dioxus::prelude::*;
use hotelier_data::{Money, Room, RoomStatus, RoomType, ValidationResult};
use strum::IntoEnumIterator;

use crate::components::{
    Button, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::utils::form::{enum_options, error_text, parse_money, parse_number, validated};

/// A room with the name of its hotel, so search can match either.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomRow {
    pub room: Room,
    pub hotel_name: String,
}

impl GridRow for RoomRow {
    const FIELDS: &'static [&'static str] =
        &["number", "hotel", "room_type", "capacity", "price_per_night", "status"];

    fn field(&self, key: &str) -> CellValue {
        let room = &self.room;
        match key {
            "number" => (&room.number).into(),
            "hotel" => (&self.hotel_name).into(),
            "room_type" => room.room_type.label().into(),
            "capacity" => room.capacity.into(),
            "price_per_night" => room.price_per_night.into(),
            "status" => room.status.label().into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.room.id.clone()
    }
}

/// Joins rooms with hotel names, optionally keeping a single hotel.
pub fn room_rows(rooms: Vec<Room>, hotel_names: &HashMap<String, String>, hotel_filter: &str) -> Vec<RoomRow> {
    rooms
        .into_iter()
        .filter(|room| hotel_filter.is_empty() || room.hotel_id == hotel_filter)
        .map(|room| RoomRow {
            hotel_name: hotel_names
                .get(&room.hotel_id)
                .cloned()
                .unwrap_or_else(|| room.hotel_id.clone()),
            room,
        })
        .collect()
}

fn room_columns(currency_symbol: String) -> Vec<Column<RoomRow>> {
    vec![
        Column::new("number", "房号"),
        Column::new("hotel", "所属酒店"),
        Column::new("room_type", "房型"),
        Column::new("capacity", "可住人数").format(|row: &RoomRow| CellContent::text(format!("{} 人", row.room.capacity))),
        Column::new("price_per_night", "每晚价格")
            .format(move |row: &RoomRow| CellContent::text(row.room.price_per_night.with_symbol(&currency_symbol))),
        Column::new("status", "状态")
            .format(|row: &RoomRow| CellContent::status(row.room.status.as_ref(), row.room.status.label())),
    ]
}

fn status_actions(room: &Room) -> Vec<MenuItem> {
    RoomStatus::iter()
        .filter(|status| *status != room.status)
        .map(|status| MenuItem::new(format!("status:{}", status.as_ref()), format!("设为{}", status.label())))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomDraft {
    pub id: Option<String>,
    pub hotel_id: String,
    pub number: String,
    pub room_type: String,
    pub capacity: String,
    pub price_per_night: String,
    pub status: String,
}

impl RoomDraft {
    pub fn new(hotel_id: &str) -> Self {
        Self {
            id: None,
            hotel_id: hotel_id.to_owned(),
            number: String::new(),
            room_type: RoomType::default().as_ref().to_owned(),
            capacity: "2".to_owned(),
            price_per_night: String::new(),
            status: RoomStatus::default().as_ref().to_owned(),
        }
    }

    pub fn into_record(self) -> Result<Room, ValidationResult> {
        let mut result = ValidationResult::success();
        let capacity = parse_number(&mut result, "capacity", &self.capacity).unwrap_or(0);
        let price = parse_money(&mut result, "price_per_night", &self.price_per_night).unwrap_or(Money::ZERO);
        let room = Room {
            id: self.id.unwrap_or_default(),
            hotel_id: self.hotel_id,
            number: self.number.trim().to_owned(),
            room_type: self.room_type.parse().unwrap_or_default(),
            capacity,
            price_per_night: price,
            status: self.status.parse().unwrap_or_default(),
        };
        validated(room, result)
    }
}

impl From<&Room> for RoomDraft {
    fn from(room: &Room) -> Self {
        Self {
            id: Some(room.id.clone()),
            hotel_id: room.hotel_id.clone(),
            number: room.number.clone(),
            room_type: room.room_type.as_ref().to_owned(),
            capacity: room.capacity.to_string(),
            price_per_night: room.price_per_night.to_string(),
            status: room.status.as_ref().to_owned(),
        }
    }
}

#[component]
pub fn Rooms() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let catalog = ctx.subscribe();
    let hotels = catalog.hotels.list();
    let hotel_names: HashMap<String, String> =
        hotels.iter().map(|hotel| (hotel.id.clone(), hotel.name.clone())).collect();
    let hotel_options: Vec<(String, String)> =
        hotels.iter().map(|hotel| (hotel.id.clone(), hotel.name.clone())).collect();

    let mut hotel_filter = use_signal(String::new);
    let rows = room_rows(catalog.rooms.list(), &hotel_names, &hotel_filter());
    let available = rows.iter().filter(|row| row.room.status == RoomStatus::Available).count();
    let columns = use_memo(move || room_columns(config.current().billing.currency_symbol));

    let mut draft = use_signal(|| None::<RoomDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<Room>);

    let row_actions = use_callback(|row: RoomRow| {
        let mut items = vec![MenuItem::new("edit", "编辑").icon("✏️")];
        items.extend(status_actions(&row.room));
        items.push(MenuItem::new("delete", "删除").icon("🗑").danger());
        items
    });

    let delete = move |room: Room| {
        let result = ctx.catalog().rooms.delete(&room.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除客房 {}", room.number));
    };

    let on_action = move |(key, row): (String, RoomRow)| {
        let room = row.room;
        if let Some(status) = key.strip_prefix("status:") {
            let Ok(next) = status.parse::<RoomStatus>() else {
                return;
            };
            let result = ctx.catalog().rooms.change(
                &room.id,
                &config.operator(),
                ActivityAction::StatusChange,
                Some(next.label().to_owned()),
                |r| {
                    r.status = next;
                    Ok(())
                },
            );
            ctx.settle(result, &notifications, format!("客房 {} 已设为{}", room.number, next.label()));
            return;
        }
        match key.as_str() {
            "edit" => {
                errors.set(ValidationResult::success());
                draft.set(Some(RoomDraft::from(&room)));
            }
            "delete" if config.confirm_destructive() => pending_delete.set(Some(room)),
            "delete" => delete(room),
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
            Ok(room) => {
                let number = room.number.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.rooms.create(room, &config.operator())
                } else {
                    services.rooms.update(room, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存客房 {number}")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let default_hotel = hotel_options.first().map(|(id, _)| id.clone()).unwrap_or_default();
    let mut filter_options = vec![(String::new(), "全部酒店".to_string())];
    filter_options.extend(hotel_options.iter().cloned());
    let form = draft().unwrap_or_else(|| RoomDraft::new(&default_hotel));
    let errs = errors();
    let delete_message = pending_delete()
        .map(|room| format!("确定删除客房 {} 吗？", room.number))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "客房管理".to_string(),
                subtitle: format!("当前 {} 间客房，{} 间空闲", rows.len(), available),
                div { class: "w-48",
                    Select {
                        label: String::new(),
                        value: hotel_filter(),
                        options: filter_options,
                        onchange: move |value| hotel_filter.set(value),
                    }
                }
                Button {
                    disabled: hotel_options.is_empty(),
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        let hotel = if hotel_filter().is_empty() { default_hotel.clone() } else { hotel_filter() };
                        draft.set(Some(RoomDraft::new(&hotel)));
                    },
                    "新增客房"
                }
            }

            DataTable {
                rows,
                columns: columns(),
                page_size: config.page_size(),
                search_placeholder: "搜索房号、酒店、房型...".to_string(),
                empty_message: "没有符合条件的客房".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑客房".to_string() } else { "新增客房".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                Select {
                    label: "所属酒店".to_string(),
                    value: form.hotel_id.clone(),
                    options: hotel_options.clone(),
                    required: true,
                    error: error_text(&errs, "hotel_id"),
                    onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.hotel_id = value }),
                }
                FieldGrid {
                    Input {
                        label: "房号".to_string(),
                        value: form.number.clone(),
                        required: true,
                        error: error_text(&errs, "number"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.number = value }),
                    }
                    Select {
                        label: "房型".to_string(),
                        value: form.room_type.clone(),
                        options: enum_options::<RoomType>(RoomType::label),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.room_type = value }),
                    }
                    Input {
                        label: "可住人数".to_string(),
                        input_type: "number".to_string(),
                        value: form.capacity.clone(),
                        error: error_text(&errs, "capacity"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.capacity = value }),
                    }
                    Input {
                        label: "每晚价格".to_string(),
                        value: form.price_per_night.clone(),
                        placeholder: "680.00".to_string(),
                        required: true,
                        error: error_text(&errs, "price_per_night"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.price_per_night = value }),
                    }
                }
                Select {
                    label: "状态".to_string(),
                    value: form.status.clone(),
                    options: enum_options::<RoomStatus>(RoomStatus::label),
                    onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.status = value }),
                }
            }

            ConfirmDialog {
                show: pending_delete().is_some(),
                message: delete_message,
                confirm_label: "删除".to_string(),
                on_confirm: move |_| {
                    if let Some(room) = pending_delete.take() {
                        delete(room);
                    }
                },
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridState, SortDirection, render_cell};

    fn room(id: &str, hotel: &str, number: &str, price: i64, status: RoomStatus) -> Room {
        Room {
            id: id.to_owned(),
            hotel_id: hotel.to_owned(),
            number: number.to_owned(),
            room_type: RoomType::Double,
            capacity: 2,
            price_per_night: Money::from_major(price),
            status,
        }
    }

    fn names() -> HashMap<String, String> {
        HashMap::from([
            ("htl-1".to_owned(), "湖畔酒店".to_owned()),
            ("htl-2".to_owned(), "海景酒店".to_owned()),
        ])
    }

    fn sample() -> Vec<Room> {
        vec![
            room("rm-1", "htl-1", "101", 680, RoomStatus::Available),
            room("rm-2", "htl-2", "201", 420, RoomStatus::Occupied),
            room("rm-3", "htl-1", "102", 1_200, RoomStatus::Maintenance),
        ]
    }

    #[test]
    fn test_rows_join_hotel_names_and_filter() {
        let rows = room_rows(sample(), &names(), "");
        assert_eq!(rows[1].hotel_name, "海景酒店");
        let only_first = room_rows(sample(), &names(), "htl-1");
        assert_eq!(only_first.len(), 2);

        let orphan = room_rows(vec![room("rm-9", "htl-x", "9", 1, RoomStatus::Available)], &names(), "");
        assert_eq!(orphan[0].hotel_name, "htl-x");
    }

    #[test]
    fn test_search_by_hotel_name() {
        let rows = room_rows(sample(), &names(), "");
        let mut state = GridState::new(10);
        state.set_search("海景");
        let view = state.view(&rows);
        assert_eq!(view.total_rows, 1);
        assert_eq!(view.rows[0].room.number, "201");
    }

    #[test]
    fn test_price_sorts_numerically() {
        let rows = room_rows(sample(), &names(), "");
        let mut state = GridState::new(10);
        state.toggle_sort("price_per_night");
        state.toggle_sort("price_per_night");
        assert_eq!(state.direction_for("price_per_night"), Some(SortDirection::Descending));
        let numbers: Vec<String> = state.view(&rows).rows.into_iter().map(|row| row.room.number).collect();
        assert_eq!(numbers, vec!["102", "101", "201"]);
    }

    #[test]
    fn test_price_column_uses_symbol() {
        let columns = room_columns("¥".to_owned());
        let rows = room_rows(sample(), &names(), "");
        let price = columns.iter().find(|c| c.key == "price_per_night").unwrap();
        assert_eq!(render_cell(price, &rows[0]).as_text(), "¥680.00");
    }

    #[test]
    fn test_status_actions_skip_current() {
        let actions = status_actions(&sample()[0]);
        let keys: Vec<&str> = actions.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["status:occupied", "status:maintenance"]);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = RoomDraft::new("htl-1");
        draft.number = "305".to_owned();
        draft.price_per_night = "0".to_owned();
        let result = draft.clone().into_record().unwrap_err();
        assert!(result.error_for("price_per_night").is_some());

        draft.price_per_night = "499.5".to_owned();
        let room = draft.into_record().unwrap();
        assert_eq!(room.price_per_night, Money::from_minor(49_950));
        assert_eq!(room.room_type, RoomType::Double);
    }
}
