//! Activity log page

use dioxus::prelude::*;

use crate::components::{Button, ConfirmDialog, DataTable, PageHeader, Select};
use crate::grid::{CellContent, Column};
use crate::hooks::{use_catalog, use_config, use_notifications};
use crate::models::{ActivityEntry, result_badge};

fn activity_columns() -> Vec<Column<ActivityEntry>> {
    vec![
        Column::new("time", "时间"),
        Column::new("actor", "操作人"),
        Column::new("action", "操作"),
        Column::new("target_type", "对象类型"),
        Column::new("target_id", "对象"),
        Column::new("detail", "详情").unsortable().format(|entry: &ActivityEntry| {
            match (&entry.detail, &entry.error_message) {
                (_, Some(error)) => CellContent::text(error),
                (Some(detail), None) => CellContent::text(detail),
                (None, None) => CellContent::muted("-"),
            }
        }),
        Column::new("result", "结果").format(result_badge),
    ]
}

/// Newest first; `outcome` is `success`, `failure` or empty for all.
pub fn filter_entries(mut entries: Vec<ActivityEntry>, outcome: &str) -> Vec<ActivityEntry> {
    entries.reverse();
    match outcome {
        "success" => entries.retain(|entry| entry.success),
        "failure" => entries.retain(|entry| !entry.success),
        _ => {}
    }
    entries
}

#[component]
pub fn ActivityLogPage() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let notifications = use_notifications();
    let entries = ctx.subscribe().activity.entries();
    let failures = entries.iter().filter(|entry| !entry.success).count();
    let total = entries.len();

    let mut outcome = use_signal(String::new);
    let rows = filter_entries(entries, &outcome());
    let columns = use_hook(activity_columns);
    let mut confirm_clear = use_signal(|| false);

    let clear = move || {
        ctx.catalog().activity.clear();
        tracing::info!(operator = %config.operator(), "activity log cleared");
        ctx.touch();
        notifications.info("操作日志已清空");
    };

    rsx! {
        div { class: "space-y-6",
            PageHeader {
                title: "操作日志".to_string(),
                subtitle: format!("本次会话共 {total} 条记录，其中失败 {failures} 条"),
                div { class: "w-32",
                    Select {
                        label: String::new(),
                        value: outcome(),
                        options: vec![
                            (String::new(), "全部结果".to_string()),
                            ("success".to_string(), "成功".to_string()),
                            ("failure".to_string(), "失败".to_string()),
                        ],
                        onchange: move |value| outcome.set(value),
                    }
                }
                Button {
                    variant: "secondary".to_string(),
                    disabled: total == 0,
                    onclick: move |_| {
                        if config.confirm_destructive() {
                            confirm_clear.set(true);
                        } else {
                            clear();
                        }
                    },
                    "清空日志"
                }
            }

            DataTable {
                rows,
                columns,
                page_size: config.page_size(),
                search_placeholder: "搜索操作人、对象、详情...".to_string(),
                empty_message: "暂无操作记录".to_string(),
            }

            ConfirmDialog {
                show: confirm_clear(),
                message: "确定清空全部操作日志吗？".to_string(),
                confirm_label: "清空".to_string(),
                on_confirm: move |_| {
                    confirm_clear.set(false);
                    clear();
                },
                on_cancel: move |_| confirm_clear.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridState, render_cell};
    use crate::models::ActivityAction;
    use crate::utils::ActivityLog;

    fn log() -> ActivityLog {
        let log = ActivityLog::new(10);
        log.log_success("admin", ActivityAction::Create, "Hotel", "htl-001", None);
        log.log_failure("admin", ActivityAction::CheckIn, "Booking", "BK-9", "unknown reference");
        log.log_success("alice", ActivityAction::StatusChange, "Room", "rm-101", Some("维修中".to_owned()));
        log
    }

    #[test]
    fn test_newest_first_and_outcome_filter() {
        let entries = log().entries();
        let all = filter_entries(entries.clone(), "");
        assert_eq!(all[0].target_id, "rm-101");
        assert_eq!(filter_entries(entries.clone(), "failure").len(), 1);
        assert_eq!(filter_entries(entries, "success").len(), 2);
    }

    #[test]
    fn test_detail_column_prefers_error() {
        let columns = activity_columns();
        let detail = columns.iter().find(|c| c.key == "detail").unwrap();
        let entries = filter_entries(log().entries(), "");
        assert_eq!(render_cell(detail, &entries[0]).as_text(), "维修中");
        assert_eq!(render_cell(detail, &entries[1]).as_text(), "unknown reference");
        assert_eq!(render_cell(detail, &entries[2]), CellContent::muted("-"));
    }

    #[test]
    fn test_search_by_actor() {
        let rows = filter_entries(log().entries(), "");
        let mut state = GridState::new(10);
        state.set_search("ALICE");
        assert_eq!(state.view(&rows).total_rows, 1);
    }
}
