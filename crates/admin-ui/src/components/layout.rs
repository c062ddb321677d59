//! Layout components for the admin console
//!
//! - AdminLayout: sidebar, header and the routed page
//! - Sidebar: responsive navigation grouped by area
//! - Header: page title, breadcrumbs and operator info
//! - Breadcrumb: navigation trail

use dioxus::prelude::*;

use crate::app::Route;
use crate::hooks::{ToastStack, use_config};
use crate::services::today;

/// Navigation item definition
#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

/// Breadcrumb item definition
#[derive(Clone, Debug, PartialEq)]
pub struct BreadcrumbItem {
    pub label: String,
    pub route: Option<Route>,
}

#[derive(Clone, Debug, PartialEq)]
struct NavGroup {
    title: &'static str,
    items: Vec<NavItem>,
}

fn nav_groups() -> Vec<NavGroup> {
    vec![
        NavGroup {
            title: "概览",
            items: vec![NavItem {
                id: "dashboard",
                label: "仪表板",
                icon: "📊",
                route: Route::Dashboard {},
            }],
        },
        NavGroup {
            title: "酒店",
            items: vec![
                NavItem {
                    id: "hotels",
                    label: "酒店管理",
                    icon: "🏨",
                    route: Route::Hotels {},
                },
                NavItem {
                    id: "rooms",
                    label: "客房管理",
                    icon: "🛏️",
                    route: Route::Rooms {},
                },
                NavItem {
                    id: "amenities",
                    label: "设施管理",
                    icon: "🏊",
                    route: Route::Amenities {},
                },
                NavItem {
                    id: "reviews",
                    label: "评价管理",
                    icon: "⭐",
                    route: Route::Reviews {},
                },
            ],
        },
        NavGroup {
            title: "运营",
            items: vec![
                NavItem {
                    id: "bookings",
                    label: "预订管理",
                    icon: "📅",
                    route: Route::Bookings {},
                },
                NavItem {
                    id: "coupons",
                    label: "优惠券",
                    icon: "🎟️",
                    route: Route::Coupons {},
                },
                NavItem {
                    id: "invoices",
                    label: "发票管理",
                    icon: "🧾",
                    route: Route::Invoices {},
                },
            ],
        },
        NavGroup {
            title: "支付",
            items: vec![
                NavItem {
                    id: "gateways",
                    label: "支付网关",
                    icon: "💳",
                    route: Route::PaymentGateways {},
                },
                NavItem {
                    id: "transactions",
                    label: "交易记录",
                    icon: "💱",
                    route: Route::Transactions {},
                },
            ],
        },
        NavGroup {
            title: "系统",
            items: vec![
                NavItem {
                    id: "activity",
                    label: "操作日志",
                    icon: "📝",
                    route: Route::ActivityLog {},
                },
                NavItem {
                    id: "settings",
                    label: "系统设置",
                    icon: "⚙️",
                    route: Route::Settings {},
                },
            ],
        },
    ]
}

/// Admin layout component with sidebar and header
#[component]
pub fn AdminLayout() -> Element {
    let mut show_mobile_menu = use_signal(|| false);

    rsx! {
        div { class: "flex h-screen bg-gray-50 overflow-hidden",
            Sidebar {
                show_mobile: show_mobile_menu(),
                on_close: move |_| show_mobile_menu.set(false)
            }

            main { class: "flex-1 flex flex-col overflow-hidden",
                Header {
                    on_menu_toggle: move |_| show_mobile_menu.set(!show_mobile_menu())
                }

                div { class: "flex-1 overflow-auto",
                    div { class: "container mx-auto px-4 sm:px-6 lg:px-8 py-6",
                        Outlet::<Route> {}
                    }
                }
            }

            ToastStack {}
        }
    }
}

/// Responsive sidebar navigation component
#[component]
pub fn Sidebar(show_mobile: bool, on_close: EventHandler<()>) -> Element {
    let config = use_config();
    let route = use_route::<Route>();
    let title = config.config.read().console.title.clone();
    let operator = config.operator();
    let initial = operator.chars().next().unwrap_or('A').to_uppercase().to_string();

    rsx! {
        if show_mobile {
            div {
                class: "fixed inset-0 z-40 lg:hidden",
                onclick: move |_| on_close.call(()),
                div { class: "fixed inset-0 bg-gray-600 bg-opacity-75" }
            }
        }

        aside {
            class: format!(
                "fixed inset-y-0 left-0 z-50 w-64 bg-white shadow-lg transform transition-transform duration-300 ease-in-out lg:translate-x-0 lg:static lg:inset-0 {}",
                if show_mobile { "translate-x-0" } else { "-translate-x-full" }
            ),

            div { class: "flex flex-col h-full",
                div { class: "flex items-center justify-between px-6 py-4 border-b",
                    div { class: "flex items-center",
                        div { class: "w-10 h-10 bg-gradient-to-br from-teal-600 to-teal-700 rounded-lg flex items-center justify-center shadow-md",
                            span { class: "text-white font-bold text-lg", "H" }
                        }
                        span { class: "ml-3 text-lg font-semibold text-gray-900 truncate", "{title}" }
                    }

                    button {
                        class: "lg:hidden p-2 rounded-md text-gray-400 hover:text-gray-500 hover:bg-gray-100",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                nav { class: "flex-1 px-3 py-4 space-y-4 overflow-y-auto",
                    for group in nav_groups() {
                        div { key: "{group.title}",
                            p { class: "px-3 mb-1 text-xs font-semibold uppercase tracking-wider text-gray-400",
                                "{group.title}"
                            }
                            for item in group.items {
                                {
                                    let active = item.route == route;
                                    rsx! {
                                        Link {
                                            key: "{item.id}",
                                            to: item.route.clone(),
                                            class: format!(
                                                "flex items-center px-3 py-2 text-sm font-medium rounded-lg transition-all duration-150 {}",
                                                if active {
                                                    "bg-teal-50 text-teal-700 shadow-sm"
                                                } else {
                                                    "text-gray-700 hover:bg-gray-50 hover:text-gray-900"
                                                }
                                            ),
                                            onclick: move |_| on_close.call(()),

                                            span { class: "text-lg mr-3", "{item.icon}" }
                                            span { "{item.label}" }

                                            if active {
                                                span { class: "ml-auto w-1.5 h-1.5 bg-teal-600 rounded-full" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "px-4 py-4 border-t bg-gray-50",
                    div { class: "flex items-center",
                        div { class: "w-10 h-10 bg-gradient-to-br from-gray-400 to-gray-500 rounded-full flex items-center justify-center text-white font-semibold",
                            "{initial}"
                        }
                        div { class: "ml-3 flex-1 min-w-0",
                            p { class: "text-sm font-medium text-gray-900 truncate", "{operator}" }
                            p { class: "text-xs text-gray-500", "操作员" }
                        }
                    }
                }
            }
        }
    }
}

/// Header component with breadcrumbs
#[component]
pub fn Header(on_menu_toggle: EventHandler<()>) -> Element {
    let route = use_route::<Route>();
    let breadcrumbs = breadcrumbs_for(&route);
    let page_title = breadcrumbs.last().map(|b| b.label.clone()).unwrap_or_default();
    let date = today().format("%Y-%m-%d").to_string();

    rsx! {
        header { class: "bg-white shadow-sm border-b",
            div { class: "px-4 sm:px-6 lg:px-8 py-4",
                div { class: "flex items-center justify-between",
                    div { class: "flex items-center flex-1 min-w-0",
                        button {
                            class: "lg:hidden p-2 mr-2 rounded-md text-gray-400 hover:text-gray-500 hover:bg-gray-100",
                            onclick: move |_| on_menu_toggle.call(()),
                            "☰"
                        }

                        div { class: "flex-1 min-w-0",
                            h1 { class: "text-xl sm:text-2xl font-semibold text-gray-900 truncate",
                                "{page_title}"
                            }
                            Breadcrumb { items: breadcrumbs }
                        }
                    }

                    div { class: "hidden sm:block text-sm text-gray-500", "今天 {date}" }
                }
            }
        }
    }
}

/// Breadcrumb navigation component
#[component]
pub fn Breadcrumb(items: Vec<BreadcrumbItem>) -> Element {
    if items.len() <= 1 {
        return rsx! { div {} };
    }

    rsx! {
        nav { class: "flex mt-1", "aria-label": "Breadcrumb",
            ol { class: "flex items-center space-x-2 text-sm",
                for (index, item) in items.iter().enumerate() {
                    li {
                        key: "{index}",
                        class: "flex items-center",

                        if index > 0 {
                            span { class: "mx-2 text-gray-400", "/" }
                        }

                        if let Some(route) = &item.route {
                            Link {
                                to: route.clone(),
                                class: "text-gray-500 hover:text-gray-700 transition-colors",
                                "{item.label}"
                            }
                        } else {
                            span { class: "text-gray-900 font-medium", "{item.label}" }
                        }
                    }
                }
            }
        }
    }
}

/// Section and page title for a route; `None` section for top-level pages.
fn route_titles(route: &Route) -> (Option<&'static str>, &'static str) {
    match route {
        Route::Dashboard {} => (None, "仪表板"),
        Route::Hotels {} => (Some("酒店"), "酒店管理"),
        Route::Rooms {} => (Some("酒店"), "客房管理"),
        Route::Amenities {} => (Some("酒店"), "设施管理"),
        Route::Reviews {} => (Some("酒店"), "评价管理"),
        Route::Bookings {} => (Some("运营"), "预订管理"),
        Route::Coupons {} => (Some("运营"), "优惠券"),
        Route::Invoices {} => (Some("运营"), "发票管理"),
        Route::PaymentGateways {} => (Some("支付"), "支付网关"),
        Route::Transactions {} => (Some("支付"), "交易记录"),
        Route::ActivityLog {} => (Some("系统"), "操作日志"),
        Route::Settings {} => (Some("系统"), "系统设置"),
        Route::NotFound { .. } => (None, "页面不存在"),
    }
}

fn breadcrumbs_for(route: &Route) -> Vec<BreadcrumbItem> {
    let (section, title) = route_titles(route);
    if matches!(route, Route::Dashboard {}) {
        return vec![BreadcrumbItem {
            label: title.to_string(),
            route: None,
        }];
    }

    let mut breadcrumbs = vec![BreadcrumbItem {
        label: "首页".to_string(),
        route: Some(Route::Dashboard {}),
    }];
    if let Some(section) = section {
        breadcrumbs.push(BreadcrumbItem {
            label: section.to_string(),
            route: None,
        });
    }
    breadcrumbs.push(BreadcrumbItem {
        label: title.to_string(),
        route: None,
    });
    breadcrumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_breadcrumb_is_single() {
        let crumbs = breadcrumbs_for(&Route::Dashboard {});
        assert_eq!(crumbs.len(), 1);
        assert!(crumbs[0].route.is_none());
    }

    #[test]
    fn test_nested_breadcrumbs() {
        let crumbs = breadcrumbs_for(&Route::Transactions {});
        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["首页", "支付", "交易记录"]);
        assert_eq!(crumbs[0].route, Some(Route::Dashboard {}));
    }

    #[test]
    fn test_every_nav_item_has_a_title() {
        for item in nav_groups().into_iter().flat_map(|group| group.items) {
            let (_, title) = route_titles(&item.route);
            assert_eq!(title, item.label, "nav label differs for {}", item.id);
        }
    }
}
