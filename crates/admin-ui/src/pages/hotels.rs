//! Hotel management page

use dioxus::prelude::*;
use hotelier_data::{Hotel, HotelStatus, ValidationResult};

use crate::components::{
    Button, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::utils::form::{enum_options, error_text, parse_number, validated};

impl GridRow for Hotel {
    const FIELDS: &'static [&'static str] = &["id", "name", "city", "address", "star_rating", "phone", "status"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "city" => (&self.city).into(),
            "address" => (&self.address).into(),
            "star_rating" => self.star_rating.into(),
            "phone" => (&self.phone).into(),
            "status" => self.status.label().into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.clone()
    }
}

fn stars(count: u8) -> String {
    let filled = usize::from(count.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn hotel_columns() -> Vec<Column<Hotel>> {
    vec![
        Column::new("name", "酒店名称"),
        Column::new("city", "城市"),
        Column::new("address", "地址").unsortable(),
        Column::new("star_rating", "星级").format(|hotel: &Hotel| CellContent::text(stars(hotel.star_rating))),
        Column::new("phone", "电话")
            .unsortable()
            .format(|hotel: &Hotel| {
                if hotel.phone.is_empty() {
                    CellContent::muted("未填写")
                } else {
                    CellContent::text(&hotel.phone)
                }
            }),
        Column::new("status", "状态")
            .format(|hotel: &Hotel| CellContent::status(hotel.status.as_ref(), hotel.status.label())),
    ]
}

/// Form state of the add/edit dialog
#[derive(Clone, Debug, PartialEq)]
pub struct HotelDraft {
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub address: String,
    pub star_rating: String,
    pub phone: String,
    pub status: String,
}

impl Default for HotelDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            city: String::new(),
            address: String::new(),
            star_rating: "3".to_owned(),
            phone: String::new(),
            status: HotelStatus::Active.as_ref().to_owned(),
        }
    }
}

impl From<&Hotel> for HotelDraft {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: Some(hotel.id.clone()),
            name: hotel.name.clone(),
            city: hotel.city.clone(),
            address: hotel.address.clone(),
            star_rating: hotel.star_rating.to_string(),
            phone: hotel.phone.clone(),
            status: hotel.status.as_ref().to_owned(),
        }
    }
}

impl HotelDraft {
    pub fn into_record(self) -> Result<Hotel, ValidationResult> {
        let mut result = ValidationResult::success();
        let star_rating = parse_number(&mut result, "star_rating", &self.star_rating).unwrap_or(0);
        let hotel = Hotel {
            id: self.id.unwrap_or_default(),
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            address: self.address.trim().to_owned(),
            star_rating,
            phone: self.phone.trim().to_owned(),
            status: self.status.parse().unwrap_or_default(),
        };
        validated(hotel, result)
    }
}

#[component]
pub fn Hotels() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let hotels = ctx.subscribe().hotels.list();
    let active = hotels.iter().filter(|hotel| hotel.is_active()).count();
    let columns = use_hook(hotel_columns);

    let mut draft = use_signal(|| None::<HotelDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<Hotel>);

    let row_actions = use_callback(|hotel: Hotel| {
        vec![
            MenuItem::new("edit", "编辑").icon("✏️"),
            MenuItem::new("toggle", if hotel.is_active() { "停用" } else { "启用" }).icon("⏯"),
            MenuItem::new("delete", "删除").icon("🗑").danger(),
        ]
    });

    let delete = move |hotel: Hotel| {
        let result = ctx.catalog().hotels.delete(&hotel.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除酒店「{}」", hotel.name));
    };

    let on_action = move |(key, hotel): (String, Hotel)| match key.as_str() {
        "edit" => {
            errors.set(ValidationResult::success());
            draft.set(Some(HotelDraft::from(&hotel)));
        }
        "toggle" => {
            let next = hotel.status.toggled();
            let result = ctx.catalog().hotels.change(
                &hotel.id,
                &config.operator(),
                ActivityAction::StatusChange,
                Some(next.label().to_owned()),
                |h| {
                    h.status = next;
                    Ok(())
                },
            );
            ctx.settle(result, &notifications, format!("「{}」已{}", hotel.name, next.label()));
        }
        "delete" if config.confirm_destructive() => pending_delete.set(Some(hotel)),
        "delete" => delete(hotel),
        _ => {}
    };

    let save = move |_| {
        let Some(current) = draft() else {
            return;
        };
        let is_new = current.id.is_none();
        match current.into_record() {
            Err(result) => errors.set(result),
            Ok(hotel) => {
                let name = hotel.name.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.hotels.create(hotel, &config.operator())
                } else {
                    services.hotels.update(hotel, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存酒店「{name}」")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let form = draft().unwrap_or_default();
    let errs = errors();
    let title = if form.id.is_some() { "编辑酒店" } else { "新增酒店" };
    let delete_message = pending_delete()
        .map(|hotel| format!("确定删除酒店「{}」吗？此操作无法撤销。", hotel.name))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "酒店管理".to_string(),
                subtitle: format!("共 {} 家酒店，{} 家营业中", hotels.len(), active),
                Button {
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(HotelDraft::default()));
                    },
                    "新增酒店"
                }
            }

            DataTable {
                rows: hotels,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索酒店名称、城市...".to_string(),
                empty_message: "没有符合条件的酒店".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: title.to_string(),
                on_save: save,
                on_cancel: move |_| draft.set(None),
                Input {
                    label: "酒店名称".to_string(),
                    value: form.name.clone(),
                    required: true,
                    error: error_text(&errs, "name"),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.name = value }),
                }
                FieldGrid {
                    Input {
                        label: "城市".to_string(),
                        value: form.city.clone(),
                        required: true,
                        error: error_text(&errs, "city"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.city = value }),
                    }
                    Input {
                        label: "电话".to_string(),
                        value: form.phone.clone(),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.phone = value }),
                    }
                }
                Input {
                    label: "地址".to_string(),
                    value: form.address.clone(),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.address = value }),
                }
                FieldGrid {
                    Select {
                        label: "星级".to_string(),
                        value: form.star_rating.clone(),
                        options: (1..=5).map(|n: u8| (n.to_string(), stars(n))).collect::<Vec<_>>(),
                        error: error_text(&errs, "star_rating"),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.star_rating = value }),
                    }
                    Select {
                        label: "状态".to_string(),
                        value: form.status.clone(),
                        options: enum_options::<HotelStatus>(HotelStatus::label),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.status = value }),
                    }
                }
            }

            ConfirmDialog {
                show: pending_delete().is_some(),
                message: delete_message,
                confirm_label: "删除".to_string(),
                on_confirm: move |_| {
                    if let Some(hotel) = pending_delete.take() {
                        delete(hotel);
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
    use crate::grid::{GridState, render_cell};

    fn hotel(name: &str, city: &str, stars: u8) -> Hotel {
        Hotel {
            id: format!("htl-{name}"),
            name: name.to_owned(),
            city: city.to_owned(),
            address: String::new(),
            star_rating: stars,
            phone: String::new(),
            status: HotelStatus::Active,
        }
    }

    #[test]
    fn test_search_matches_city_and_status_label() {
        let rows = vec![hotel("湖畔", "杭州", 4), hotel("海景", "青岛", 5)];
        let mut state = GridState::new(10);
        state.set_search("青岛");
        assert_eq!(state.view(&rows).rows, vec![rows[1].clone()]);
        state.set_search("营业中");
        assert_eq!(state.view(&rows).total_rows, 2);
    }

    #[test]
    fn test_star_column_formatting() {
        let columns = hotel_columns();
        let star_column = columns.iter().find(|c| c.key == "star_rating").unwrap();
        assert_eq!(render_cell(star_column, &hotel("a", "b", 3)).as_text(), "★★★☆☆");
        let phone_column = columns.iter().find(|c| c.key == "phone").unwrap();
        assert_eq!(render_cell(phone_column, &hotel("a", "b", 3)), CellContent::muted("未填写"));
    }

    #[test]
    fn test_draft_round_trip() {
        let original = hotel("湖畔", "杭州", 4);
        let rebuilt = HotelDraft::from(&original).into_record().unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_draft_reports_field_errors() {
        let draft = HotelDraft {
            star_rating: "many".to_owned(),
            ..HotelDraft::default()
        };
        let result = draft.into_record().unwrap_err();
        assert!(result.error_for("name").is_some());
        assert!(result.error_for("city").is_some());
        assert!(result.error_for("star_rating").is_some());
    }
}
