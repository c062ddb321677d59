//! Generic sortable, searchable, paginated table

use dioxus::prelude::*;

use super::action_menu::{ActionMenu, MenuItem};
use super::status_badge::StatusBadge;
use crate::grid::{CellContent, Column, DEFAULT_PAGE_SIZE, GridRow, GridState, render_cell};

const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];
const PAGER_BUTTON: &str = "px-3 py-1 rounded-md border border-gray-300 bg-white hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed";

/// Props for the DataTable component
#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps<R: GridRow> {
    /// Source collection; never mutated by the table
    pub rows: Vec<R>,
    /// Column definitions, in display order
    pub columns: Vec<Column<R>>,
    /// Rows per page
    #[props(default = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Shown when nothing matches
    #[props(default = "暂无数据".to_string())]
    pub empty_message: String,
    #[props(default = "搜索...".to_string())]
    pub search_placeholder: String,
    /// Builds the action menu of a row; no action column when absent
    pub row_actions: Option<Callback<R, Vec<MenuItem>>>,
    /// Receives (action key, row) when a menu item is chosen
    #[props(default = EventHandler::default())]
    pub on_action: EventHandler<(String, R)>,
}

#[component]
pub fn DataTable<R: GridRow>(props: DataTableProps<R>) -> Element {
    let initial_size = props.page_size;
    let mut state = use_signal(move || GridState::new(initial_size));
    let mut snapshot = state();
    let view = snapshot.view(&props.rows);
    if snapshot.page != state.peek().page {
        state.set(snapshot.clone());
    }
    let on_action = props.on_action;
    let row_actions = props.row_actions;
    let column_count = props.columns.len() + usize::from(row_actions.is_some());
    let total_pages = view.total_pages;

    rsx! {
        div { class: "bg-white shadow rounded-lg overflow-hidden",
            // Search and page size
            div { class: "flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3 px-4 py-3 border-b",
                input {
                    r#type: "search",
                    class: "block w-full sm:w-72 rounded-md border border-gray-300 px-3 py-2 text-sm focus:border-teal-500 focus:ring-teal-500",
                    placeholder: "{props.search_placeholder}",
                    value: "{snapshot.search}",
                    oninput: move |evt| state.write().set_search(evt.value()),
                }
                div { class: "flex items-center text-sm text-gray-500",
                    span { class: "mr-2", "每页" }
                    select {
                        class: "rounded-md border border-gray-300 px-2 py-1 text-sm",
                        value: "{snapshot.page_size}",
                        onchange: move |evt| {
                            if let Ok(size) = evt.value().parse::<usize>() {
                                state.write().set_page_size(size);
                            }
                        },
                        for size in PAGE_SIZE_CHOICES {
                            option { value: "{size}", selected: size == snapshot.page_size, "{size}" }
                        }
                    }
                    span { class: "ml-2", "条" }
                }
            }

            div { class: "overflow-x-auto",
                table { class: "min-w-full divide-y divide-gray-200",
                    thead { class: "bg-gray-50",
                        tr {
                            for column in props.columns.iter() {
                                th {
                                    key: "{column.key}",
                                    scope: "col",
                                    class: if column.sortable {
                                        "px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider cursor-pointer select-none hover:text-gray-700"
                                    } else {
                                        "px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider"
                                    },
                                    onclick: {
                                        let column = column.clone();
                                        move |_| state.write().request_sort(&column)
                                    },
                                    "{column.label}"
                                    if let Some(direction) = snapshot.direction_for(column.key) {
                                        span { class: "ml-1", {direction.arrow()} }
                                    }
                                }
                            }
                            if row_actions.is_some() {
                                th { class: "px-4 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider", "操作" }
                            }
                        }
                    }
                    tbody { class: "bg-white divide-y divide-gray-200",
                        if view.is_empty() {
                            tr {
                                td {
                                    colspan: "{column_count}",
                                    class: "px-4 py-10 text-center text-sm text-gray-500",
                                    "{props.empty_message}"
                                }
                            }
                        }
                        for row in view.rows.iter() {
                            tr { key: "{row.row_key()}", class: "hover:bg-gray-50",
                                for column in props.columns.iter() {
                                    td { key: "{column.key}", class: "px-4 py-3 whitespace-nowrap text-sm",
                                        {render_content(render_cell(column, row))}
                                    }
                                }
                                if let Some(actions) = row_actions {
                                    td { class: "px-4 py-3 text-right",
                                        ActionMenu {
                                            items: actions.call(row.clone()),
                                            on_select: {
                                                let row = row.clone();
                                                move |key: String| on_action.call((key, row.clone()))
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Pagination
            div { class: "flex items-center justify-between px-4 py-3 border-t text-sm text-gray-600",
                span { {view.range_label()} }
                div { class: "flex items-center space-x-2",
                    button {
                        class: PAGER_BUTTON,
                        disabled: !view.has_prev(),
                        onclick: move |_| state.write().prev_page(total_pages),
                        "上一页"
                    }
                    span { {format!("{} / {}", view.page, total_pages.max(1))} }
                    button {
                        class: PAGER_BUTTON,
                        disabled: !view.has_next(),
                        onclick: move |_| state.write().next_page(total_pages),
                        "下一页"
                    }
                }
            }
        }
    }
}

fn render_content(content: CellContent) -> Element {
    match content {
        CellContent::Text(text) => rsx! { span { class: "text-gray-900", "{text}" } },
        CellContent::Muted(text) => rsx! { span { class: "text-gray-400", "{text}" } },
        CellContent::Badge { label, tone } => rsx! { StatusBadge { label, tone } },
    }
}
