//! Guest review moderation page

use std::collections::HashMap;

use chrono::NaiveDate;
use dioxus::prelude::*;
use hotelier_data::{Review, ReviewStatus, ValidationResult, average_rating};

use crate::components::{
    Button, ConfirmDialog, DataTable, FieldGrid, FormModal, Input, MenuItem, PageHeader, Select, TextArea,
};
use crate::grid::{CellContent, CellValue, Column, GridRow};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::ActivityAction;
use crate::services::today;
use crate::utils::form::{enum_options, error_text, parse_number, validated};

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRow {
    pub review: Review,
    pub hotel_name: String,
}

impl GridRow for ReviewRow {
    const FIELDS: &'static [&'static str] = &["hotel", "guest_name", "rating", "comment", "status", "created_on"];

    fn field(&self, key: &str) -> CellValue {
        let review = &self.review;
        match key {
            "hotel" => (&self.hotel_name).into(),
            "guest_name" => (&review.guest_name).into(),
            "rating" => review.rating.into(),
            "comment" => (&review.comment).into(),
            "status" => review.status.label().into(),
            "created_on" => review.created_on.into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.review.id.clone()
    }
}

/// Joins hotel names; `rating` keeps only reviews with exactly that many stars.
pub fn review_rows(reviews: Vec<Review>, hotel_names: &HashMap<String, String>, rating: Option<u8>) -> Vec<ReviewRow> {
    reviews
        .into_iter()
        .filter(|review| rating.is_none_or(|stars| review.rating == stars))
        .map(|review| ReviewRow {
            hotel_name: hotel_names
                .get(&review.hotel_id)
                .cloned()
                .unwrap_or_else(|| review.hotel_id.clone()),
            review,
        })
        .collect()
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push('…');
    short
}

fn review_columns() -> Vec<Column<ReviewRow>> {
    vec![
        Column::new("hotel", "酒店"),
        Column::new("guest_name", "住客"),
        Column::new("rating", "评分").format(|row: &ReviewRow| {
            let stars = usize::from(row.review.rating.min(5));
            CellContent::text(format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars)))
        }),
        Column::new("comment", "评价内容").unsortable().format(|row: &ReviewRow| {
            if row.review.comment.is_empty() {
                CellContent::muted("（无文字评价）")
            } else {
                CellContent::text(excerpt(&row.review.comment, 40))
            }
        }),
        Column::new("created_on", "日期"),
        Column::new("status", "状态")
            .format(|row: &ReviewRow| CellContent::status(row.review.status.as_ref(), row.review.status.label())),
    ]
}

fn moderation_actions(status: ReviewStatus) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if status != ReviewStatus::Published {
        items.push(MenuItem::new("publish", "发布").icon("✅"));
    }
    if status != ReviewStatus::Hidden {
        items.push(MenuItem::new("hide", "隐藏").icon("🙈"));
    }
    items
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewDraft {
    pub id: Option<String>,
    pub hotel_id: String,
    pub guest_name: String,
    pub rating: String,
    pub comment: String,
    pub status: String,
    pub created_on: NaiveDate,
}

impl ReviewDraft {
    pub fn new(hotel_id: &str, created_on: NaiveDate) -> Self {
        Self {
            id: None,
            hotel_id: hotel_id.to_owned(),
            guest_name: String::new(),
            rating: "5".to_owned(),
            comment: String::new(),
            status: ReviewStatus::default().as_ref().to_owned(),
            created_on,
        }
    }

    pub fn into_record(self) -> Result<Review, ValidationResult> {
        let mut result = ValidationResult::success();
        let rating = parse_number(&mut result, "rating", &self.rating).unwrap_or(0);
        let review = Review {
            id: self.id.unwrap_or_default(),
            hotel_id: self.hotel_id,
            guest_name: self.guest_name.trim().to_owned(),
            rating,
            comment: self.comment.trim().to_owned(),
            status: self.status.parse().unwrap_or_default(),
            created_on: self.created_on,
        };
        validated(review, result)
    }
}

impl From<&Review> for ReviewDraft {
    fn from(review: &Review) -> Self {
        Self {
            id: Some(review.id.clone()),
            hotel_id: review.hotel_id.clone(),
            guest_name: review.guest_name.clone(),
            rating: review.rating.to_string(),
            comment: review.comment.clone(),
            status: review.status.as_ref().to_owned(),
            created_on: review.created_on,
        }
    }
}

#[component]
pub fn Reviews() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let catalog = ctx.subscribe();
    let hotel_options: Vec<(String, String)> = catalog
        .hotels
        .list()
        .into_iter()
        .map(|hotel| (hotel.id, hotel.name))
        .collect();
    let hotel_names: HashMap<String, String> = hotel_options.iter().cloned().collect();
    let reviews = catalog.reviews.list();
    let pending = reviews.iter().filter(|r| r.status == ReviewStatus::Pending).count();
    let average = average_rating(&reviews)
        .map(|avg| format!("{avg:.1}"))
        .unwrap_or_else(|| "-".to_owned());

    let mut rating_filter = use_signal(String::new);
    let rows = review_rows(reviews, &hotel_names, rating_filter().parse().ok());
    let columns = use_hook(review_columns);

    let mut draft = use_signal(|| None::<ReviewDraft>);
    let mut errors = use_signal(ValidationResult::success);
    let mut pending_delete = use_signal(|| None::<Review>);

    let row_actions = use_callback(|row: ReviewRow| {
        let mut items = moderation_actions(row.review.status);
        items.push(MenuItem::new("edit", "编辑").icon("✏️"));
        items.push(MenuItem::new("delete", "删除").icon("🗑").danger());
        items
    });

    let delete = move |review: Review| {
        let result = ctx.catalog().reviews.delete(&review.id, &config.operator());
        ctx.settle(result, &notifications, format!("已删除 {} 的评价", review.guest_name));
    };

    let moderate = move |review: Review, next: ReviewStatus| {
        let result = ctx.catalog().reviews.change(
            &review.id,
            &config.operator(),
            ActivityAction::StatusChange,
            Some(next.label().to_owned()),
            |r| {
                r.status = next;
                Ok(())
            },
        );
        ctx.settle(result, &notifications, format!("{} 的评价{}", review.guest_name, next.label()));
    };

    let on_action = move |(key, row): (String, ReviewRow)| {
        let review = row.review;
        match key.as_str() {
            "publish" => moderate(review, ReviewStatus::Published),
            "hide" => moderate(review, ReviewStatus::Hidden),
            "edit" => {
                errors.set(ValidationResult::success());
                draft.set(Some(ReviewDraft::from(&review)));
            }
            "delete" if config.confirm_destructive() => pending_delete.set(Some(review)),
            "delete" => delete(review),
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
            Ok(review) => {
                let guest = review.guest_name.clone();
                let services = ctx.catalog();
                let result = if is_new {
                    services.reviews.create(review, &config.operator())
                } else {
                    services.reviews.update(review, &config.operator())
                };
                if ctx.settle(result, &notifications, format!("已保存 {guest} 的评价")).is_some() {
                    draft.set(None);
                }
            }
        }
    };

    let default_hotel = hotel_options.first().map(|(id, _)| id.clone()).unwrap_or_default();
    let mut filter_options = vec![(String::new(), "全部评分".to_string())];
    filter_options.extend((1..=5).rev().map(|n: u8| (n.to_string(), format!("{n} 星"))));
    let form = draft().unwrap_or_else(|| ReviewDraft::new(&default_hotel, today()));
    let errs = errors();
    let delete_message = pending_delete()
        .map(|review| format!("确定删除 {} 的评价吗？", review.guest_name))
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "评价管理".to_string(),
                subtitle: format!("{pending} 条待审核，已发布评价平均 {average} 分"),
                div { class: "w-32",
                    Select {
                        label: String::new(),
                        value: rating_filter(),
                        options: filter_options,
                        onchange: move |value| rating_filter.set(value),
                    }
                }
                Button {
                    disabled: hotel_options.is_empty(),
                    onclick: move |_| {
                        errors.set(ValidationResult::success());
                        draft.set(Some(ReviewDraft::new(&default_hotel, today())));
                    },
                    "新增评价"
                }
            }

            DataTable {
                rows,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索酒店、住客、评价内容...".to_string(),
                empty_message: "没有符合条件的评价".to_string(),
                row_actions,
                on_action,
            }

            FormModal {
                show: draft().is_some(),
                title: if form.id.is_some() { "编辑评价".to_string() } else { "新增评价".to_string() },
                on_save: save,
                on_cancel: move |_| draft.set(None),
                Select {
                    label: "酒店".to_string(),
                    value: form.hotel_id.clone(),
                    options: hotel_options.clone(),
                    required: true,
                    error: error_text(&errs, "hotel_id"),
                    onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.hotel_id = value }),
                }
                FieldGrid {
                    Input {
                        label: "住客姓名".to_string(),
                        value: form.guest_name.clone(),
                        required: true,
                        error: error_text(&errs, "guest_name"),
                        oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.guest_name = value }),
                    }
                    Select {
                        label: "评分".to_string(),
                        value: form.rating.clone(),
                        options: (1..=5).map(|n: u8| (n.to_string(), format!("{n} 星"))).collect::<Vec<_>>(),
                        error: error_text(&errs, "rating"),
                        onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.rating = value }),
                    }
                }
                TextArea {
                    label: "评价内容".to_string(),
                    value: form.comment.clone(),
                    oninput: move |value| draft.with_mut(|d| if let Some(d) = d { d.comment = value }),
                }
                Select {
                    label: "状态".to_string(),
                    value: form.status.clone(),
                    options: enum_options::<ReviewStatus>(ReviewStatus::label),
                    onchange: move |value| draft.with_mut(|d| if let Some(d) = d { d.status = value }),
                }
            }

            ConfirmDialog {
                show: pending_delete().is_some(),
                message: delete_message,
                confirm_label: "删除".to_string(),
                on_confirm: move |_| {
                    if let Some(review) = pending_delete.take() {
                        delete(review);
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

    fn review(id: &str, rating: u8, comment: &str, status: ReviewStatus) -> Review {
        Review {
            id: id.to_owned(),
            hotel_id: "htl-1".to_owned(),
            guest_name: format!("Guest {id}"),
            rating,
            comment: comment.to_owned(),
            status,
            created_on: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        }
    }

    fn names() -> HashMap<String, String> {
        HashMap::from([("htl-1".to_owned(), "湖畔酒店".to_owned())])
    }

    #[test]
    fn test_rating_filter() {
        let reviews = vec![
            review("a", 5, "好", ReviewStatus::Published),
            review("b", 3, "一般", ReviewStatus::Pending),
            review("c", 5, "", ReviewStatus::Hidden),
        ];
        assert_eq!(review_rows(reviews.clone(), &names(), Some(5)).len(), 2);
        assert_eq!(review_rows(reviews, &names(), None).len(), 3);
    }

    #[test]
    fn test_search_finds_comment_text() {
        let rows = review_rows(
            vec![review("a", 5, "早餐很丰富", ReviewStatus::Published), review("b", 2, "隔音差", ReviewStatus::Pending)],
            &names(),
            None,
        );
        let mut state = GridState::new(10);
        state.set_search("隔音");
        assert_eq!(state.view(&rows).rows[0].review.id, "b");
    }

    #[test]
    fn test_comment_column() {
        let columns = review_columns();
        let comment = columns.iter().find(|c| c.key == "comment").unwrap();
        let rows = review_rows(vec![review("a", 4, "", ReviewStatus::Pending)], &names(), None);
        assert_eq!(render_cell(comment, &rows[0]), CellContent::muted("（无文字评价）"));
        assert_eq!(excerpt("一二三四五", 3), "一二三…");
        assert_eq!(excerpt("短", 3), "短");
    }

    #[test]
    fn test_moderation_actions_depend_on_status() {
        let keys = |status| moderation_actions(status).into_iter().map(|i| i.key).collect::<Vec<_>>();
        assert_eq!(keys(ReviewStatus::Pending), vec!["publish", "hide"]);
        assert_eq!(keys(ReviewStatus::Published), vec!["hide"]);
        assert_eq!(keys(ReviewStatus::Hidden), vec!["publish"]);
    }

    #[test]
    fn test_draft_rejects_rating_out_of_range() {
        let mut draft = ReviewDraft::new("htl-1", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        draft.guest_name = "Li Na".to_owned();
        draft.rating = "6".to_owned();
        assert!(draft.clone().into_record().unwrap_err().error_for("rating").is_some());
        draft.rating = "4".to_owned();
        assert_eq!(draft.into_record().unwrap().rating, 4);
    }
}
