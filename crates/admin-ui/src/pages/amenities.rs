//! Amenity management page

use dioxus::prelude::*;
use hotelier_data::{Amenity, AmenityCategory, ValidationResult};

use crate::components::{
    Button, Checkbox, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::utils::form::{enum_options, error_text, validated};

fn active_label(active: bool) -> &'static str {
    if active { "启用" } else { "停用" }
}

impl GridRow for Amenity {
    const FIELDS: &'static [&'static str] = &["icon", "name", "category", "active"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "icon" => (&self.icon).into(),
            "name" => (&self.name).into(),
            "category" => self.category.label().into(),
            "active" => active_label(self.active).into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.clone()
    }
}

fn amenity_columns() -> Vec<Column<Amenity>> {
    vec![
        Column::new("icon", "图标").unsortable(),
        Column::new("name", "名称"),
        Column::new("category", "分类"),
        Column::new("active", "状态").format(|amenity: &Amenity| {
            let key = if amenity.active { "active" } else { "inactive" };
            CellContent::status(key, active_label(amenity.active))
        }),
    ]
}

/// Amenities in `category`, or all of them for an empty filter.
pub fn filter_by_category(amenities: Vec<Amenity>, category: &str) -> Vec<Amenity> {
    match category.parse::<AmenityCategory>() {
        Ok(category) => amenities.into_iter().filter(|a| a.category == category).collect(),
        Err(_) => amenities,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmenityDraft {
    pub id: Option<String>,
    pub name: String,
    pub icon: String,
    pub category: String,
    pub active: bool,
}

impl Default for AmenityDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            icon: "✨".to_owned(),
            category: AmenityCategory::default().as_ref().to_owned(),
            active: true,
        }
    }
}

impl From<&Amenity> for AmenityDraft {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: Some(amenity.id.clone()),
            name: amenity.name.clone(),
            icon: amenity.icon.clone(),
            category: amenity.category.as_ref().to_owned(),
            active: amenity.active,
        }
    }
}

impl AmenityDraft {
    pub fn into_record(self) -> Result<Amenity, ValidationResult> {
        let amenity = Amenity {
            id: self.id.unwrap_or_default(),
            name: self.name.trim().to_owned(),
            icon: self.icon.trim().to_owned(),
            category: self.category.parse().unwrap_or_default(),
            active: self.active,
        };
        validated(amenity, ValidationResult::success())
    }
}

#[component]
pub fn Amenities() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let all = ctx.subscribe().amenities.list();
    let total = all.len();

    let mut category_filter = use_signal(String::new);
    let amenities = filter_by_category(all, &category_filter());
    let columns = use_hook(amenity_columns);

    let mut draft = use_signal(|| None::<AmenityDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<Amenity>);

    let row_actions = use_callback(|amenity: Amenity| {
        vec![
            MenuItem::new("edit", "编辑").icon("✏️"),
            MenuItem::new("toggle", if amenity.active { "停用" } else { "启用" }).icon("⏯"),
            MenuItem::new("delete", "删除").icon("🗑").danger(),
        ]
    });

    let delete = move |amenity: Amenity| {
        let result = ctx.catalog().amenities.delete(&amenity.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除设施「{}」", amenity.name));
    };

    let on_action = move |(key, amenity): (String, Amenity)| match key.as_str() {
        "edit" => {
            errors.set(ValidationResult::success());
            draft.set(Some(AmenityDraft::from(&amenity)));
        }
        "toggle" => {
            let next = !amenity.active;
            let result = ctx.catalog().amenities.change(
                &amenity.id,
                &config.operator(),
                ActivityAction::StatusChange,
                Some(active_label(next).to_owned()),
                |a| {
                    a.active = next;
                    Ok(())
                },
            );
            ctx.settle(result, &notifications, format!("「{}」已{}", amenity.name, active_label(next)));
        }
        "delete" if config.confirm_destructive() => pending_delete.set(Some(amenity)),
        "delete" => delete(amenity),
        _ => {}
    };

    let save = move |_| {
        let Some(current) = draft() else {
            return;
        };
        let is_new = current.id.is_none();
        match current.into_record() {
            Err(result) => errors.set(result),
            Ok(amenity) => {
                let name = amenity.name.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.amenities.create(amenity, &config.operator())
                } else {
                    services.amenities.update(amenity, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存设施「{name}」")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let mut filter_options = vec![(String::new(), "全部分类".to_string())];
    filter_options.extend(enum_options::<AmenityCategory>(AmenityCategory::label));
    let form = draft().unwrap_or_default();
    let errs = errors();
    let delete_message = pending_delete()
        .map(|amenity| format!("确定删除设施「{}」吗？", amenity.name))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "设施管理".to_string(),
                subtitle: format!("共 {total} 项设施"),
                div { class: "w-40",
                    Select {
                        label: String::new(),
                        value: category_filter(),
                        options: filter_options,
                        onchange: move |value| category_filter.set(value),
                    }
                }
                Button {
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(AmenityDraft::default()));
                    },
                    "新增设施"
                }
            }

            DataTable {
                rows: amenities,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索设施名称、分类...".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑设施".to_string() } else { "新增设施".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                FieldGrid {
                    Input {
                        label: "名称".to_string(),
                        value: form.name.clone(),
                        required: true,
                        error: error_text(&errs, "name"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.name = value }),
                    }
                    Input {
                        label: "图标".to_string(),
                        value: form.icon.clone(),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.icon = value }),
                    }
                }
                Select {
                    label: "分类".to_string(),
                    value: form.category.clone(),
                    options: enum_options::<AmenityCategory>(AmenityCategory::label),
                    onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.category = value }),
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
                    if let Some(amenity) = pending_delete.take() {
                        delete(amenity);
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

    fn amenity(name: &str, category: AmenityCategory, active: bool) -> Amenity {
        Amenity {
            id: format!("amn-{name}"),
            name: name.to_owned(),
            icon: "✨".to_owned(),
            category,
            active,
        }
    }

    fn sample() -> Vec<Amenity> {
        vec![
            amenity("泳池", AmenityCategory::Wellness, true),
            amenity("早餐", AmenityCategory::Dining, true),
            amenity("健身房", AmenityCategory::Wellness, false),
        ]
    }

    #[test]
    fn test_category_filter() {
        assert_eq!(filter_by_category(sample(), "wellness").len(), 2);
        assert_eq!(filter_by_category(sample(), "").len(), 3);
        assert_eq!(filter_by_category(sample(), "nonsense").len(), 3);
    }

    #[test]
    fn test_search_matches_category_label() {
        let rows = sample();
        let mut state = GridState::new(10);
        state.set_search("餐饮");
        assert_eq!(state.view(&rows).rows[0].name, "早餐");
    }

    #[test]
    fn test_active_badge() {
        let columns = amenity_columns();
        let status = columns.iter().find(|c| c.key == "active").unwrap();
        assert_eq!(render_cell(status, &sample()[2]), CellContent::status("inactive", "停用"));
    }

    #[test]
    fn test_draft_requires_name() {
        let result = AmenityDraft::default().into_record().unwrap_err();
        assert!(result.error_for("name").is_some());

        let original = sample().remove(0);
        assert_eq!(AmenityDraft::from(&original).into_record().unwrap(), original);
    }
}
