//! Root component and route table

use dioxus::prelude::*;

use crate::components::{AdminLayout, Alert};
use crate::hooks::{use_catalog_provider, use_config_provider, use_notifications_provider};
use crate::models::ConsoleConfig;
use crate::pages::{
    ActivityLogPage, Amenities, Bookings, Coupons, Dashboard, Hotels, Invoices, PaymentGateways, Reviews, Rooms,
    Settings, Transactions,
};
use crate::services::{Catalog, today};

#[derive(Routable, Clone, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AdminLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/hotels")]
        Hotels {},
        #[route("/rooms")]
        Rooms {},
        #[route("/amenities")]
        Amenities {},
        #[route("/coupons")]
        Coupons {},
        #[route("/reviews")]
        Reviews {},
        #[route("/bookings")]
        Bookings {},
        #[route("/invoices")]
        Invoices {},
        #[route("/payments/gateways")]
        PaymentGateways {},
        #[route("/payments/transactions")]
        Transactions {},
        #[route("/activity", ActivityLogPage)]
        ActivityLog {},
        #[route("/settings")]
        Settings {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    let config = use_config_provider(ConsoleConfig::embedded());
    use_notifications_provider(config.config);
    use_catalog_provider(|| Catalog::seeded(today()));

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div { class: "max-w-xl mx-auto mt-12 space-y-4",
            Alert {
                title: "页面不存在".to_string(),
                message: format!("没有找到 {path} 对应的页面"),
                alert_type: "warning".to_string(),
            }
            Link {
                to: Route::Dashboard {},
                class: "text-sm font-medium text-teal-600 hover:text-teal-500",
                "返回仪表板"
            }
        }
    }
}
