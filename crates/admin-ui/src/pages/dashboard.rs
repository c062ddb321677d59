//! Dashboard page component

use chrono::NaiveDate;
use dioxus::prelude::*;
use hotelier_data::{BookingStatus, InvoiceStatus, Money, ReviewStatus, RoomStatus, average_rating};

use crate::app::Route;
use crate::components::{StatusBadge, Tone};
use crate::hooks::{use_catalog, use_config};
use crate::models::ActivityEntry;
use crate::services::{Catalog, today};

const RECENT_ACTIVITY: usize = 8;

/// Headline figures for one day
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub hotels_active: usize,
    pub hotels_total: usize,
    pub rooms_available: usize,
    pub rooms_total: usize,
    /// Whole percent of rooms currently occupied
    pub occupancy_percent: u32,
    pub arrivals_today: usize,
    pub departures_today: usize,
    pub outstanding: Money,
    pub collected: Money,
    pub average_rating: Option<f64>,
    pub pending_reviews: usize,
}

impl DashboardStats {
    pub fn compute(catalog: &Catalog, date: NaiveDate) -> Self {
        let hotels = catalog.hotels.list();
        let rooms = catalog.rooms.list();
        let bookings = catalog.bookings.list();
        let invoices = catalog.invoices.list();
        let reviews = catalog.reviews.list();

        let occupied = rooms.iter().filter(|room| room.status == RoomStatus::Occupied).count();
        let occupancy_percent = if rooms.is_empty() {
            0
        } else {
            ((occupied * 100 + rooms.len() / 2) / rooms.len()) as u32
        };

        let invoice_sum = |keep: fn(InvoiceStatus) -> bool| -> Money {
            invoices
                .iter()
                .filter(|invoice| keep(invoice.status))
                .map(|invoice| invoice.totals().total)
                .sum()
        };

        Self {
            hotels_active: hotels.iter().filter(|hotel| hotel.is_active()).count(),
            hotels_total: hotels.len(),
            rooms_available: rooms.iter().filter(|room| room.status == RoomStatus::Available).count(),
            rooms_total: rooms.len(),
            occupancy_percent,
            arrivals_today: bookings
                .iter()
                .filter(|b| b.check_in == date && matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed))
                .count(),
            departures_today: bookings
                .iter()
                .filter(|b| b.check_out == date && b.status == BookingStatus::CheckedIn)
                .count(),
            outstanding: invoice_sum(InvoiceStatus::is_outstanding),
            collected: invoice_sum(|status| status == InvoiceStatus::Paid),
            average_rating: average_rating(&reviews),
            pending_reviews: reviews.iter().filter(|r| r.status == ReviewStatus::Pending).count(),
        }
    }

    pub fn rating_text(&self) -> String {
        self.average_rating
            .map(|rating| format!("{rating:.1} / 5"))
            .unwrap_or_else(|| "暂无".to_owned())
    }
}

#[derive(Props, Clone, PartialEq)]
struct StatCardProps {
    title: String,
    value: String,
    #[props(default = String::new())]
    hint: String,
    icon: String,
    /// Tailwind background for the icon tile
    accent: String,
    to: Route,
}

#[component]
fn StatCard(props: StatCardProps) -> Element {
    rsx! {
        Link {
            to: props.to.clone(),
            class: "block bg-white overflow-hidden shadow rounded-lg hover:shadow-md transition-shadow",
            div { class: "p-5",
                div { class: "flex items-center",
                    div { class: "flex-shrink-0",
                        div { class: "w-8 h-8 {props.accent} rounded-md flex items-center justify-center",
                            span { class: "text-white text-sm", "{props.icon}" }
                        }
                    }
                    div { class: "ml-5 w-0 flex-1",
                        dl {
                            dt { class: "text-sm font-medium text-gray-500 truncate", "{props.title}" }
                            dd { class: "text-lg font-medium text-gray-900", "{props.value}" }
                            if !props.hint.is_empty() {
                                dd { class: "text-xs text-gray-500", "{props.hint}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecentActivity(entries: Vec<ActivityEntry>) -> Element {
    rsx! {
        div { class: "bg-white shadow rounded-lg",
            div { class: "px-4 py-5 sm:p-6",
                div { class: "flex items-center justify-between mb-4",
                    h3 { class: "text-lg leading-6 font-medium text-gray-900", "最近操作" }
                    Link {
                        to: Route::ActivityLog {},
                        class: "text-sm font-medium text-teal-600 hover:text-teal-500",
                        "查看全部"
                    }
                }
                if entries.is_empty() {
                    p { class: "text-sm text-gray-500", "本次会话还没有任何操作" }
                } else {
                    ul { class: "divide-y divide-gray-200",
                        for entry in entries {
                            li { key: "{entry.id}", class: "py-3 flex items-center justify-between",
                                div { class: "min-w-0",
                                    p { class: "text-sm text-gray-900 truncate",
                                        {format!("{} {} {} {}", entry.actor, entry.action.label(), entry.target_type, entry.target_id)}
                                    }
                                    p { class: "text-xs text-gray-500",
                                        {entry.timestamp.format("%m-%d %H:%M:%S").to_string()}
                                    }
                                }
                                if entry.success {
                                    StatusBadge { label: "成功".to_string(), tone: Tone::Success }
                                } else {
                                    StatusBadge { label: "失败".to_string(), tone: Tone::Danger }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let ctx = use_catalog();
    let config = use_config();
    let catalog = ctx.subscribe();
    let date = today();
    let stats = DashboardStats::compute(&catalog, date);
    let recent = catalog.activity.latest(RECENT_ACTIVITY);
    let settings = config.current();

    rsx! {
        div { class: "space-y-6",
            div { class: "bg-white overflow-hidden shadow rounded-lg",
                div { class: "px-4 py-5 sm:p-6",
                    p { class: "text-xl font-bold text-gray-900 sm:text-2xl",
                        {format!("欢迎回来, {}", settings.console.operator)}
                    }
                    p { class: "text-sm font-medium text-gray-600",
                        {format!("{} · {}", settings.console.title, date.format("%Y-%m-%d"))}
                    }
                }
            }

            div { class: "grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-4",
                StatCard {
                    title: "营业酒店".to_string(),
                    value: format!("{} / {}", stats.hotels_active, stats.hotels_total),
                    icon: "🏨".to_string(),
                    accent: "bg-teal-500".to_string(),
                    to: Route::Hotels {},
                }
                StatCard {
                    title: "空闲客房".to_string(),
                    value: format!("{} / {}", stats.rooms_available, stats.rooms_total),
                    hint: format!("入住率 {}%", stats.occupancy_percent),
                    icon: "🛏".to_string(),
                    accent: "bg-blue-500".to_string(),
                    to: Route::Rooms {},
                }
                StatCard {
                    title: "今日到店 / 离店".to_string(),
                    value: format!("{} / {}", stats.arrivals_today, stats.departures_today),
                    icon: "🧳".to_string(),
                    accent: "bg-indigo-500".to_string(),
                    to: Route::Bookings {},
                }
                StatCard {
                    title: "待收款".to_string(),
                    value: config.money(stats.outstanding),
                    hint: format!("已收款 {}", config.money(stats.collected)),
                    icon: "¥".to_string(),
                    accent: "bg-yellow-500".to_string(),
                    to: Route::Invoices {},
                }
                StatCard {
                    title: "平均评分".to_string(),
                    value: stats.rating_text(),
                    hint: format!("{} 条待审核", stats.pending_reviews),
                    icon: "★".to_string(),
                    accent: "bg-orange-500".to_string(),
                    to: Route::Reviews {},
                }
            }

            RecentActivity { entries: recent }
        }
    }
}

#[cfg(test)]
mod tests {
    use hotelier_data::{
        Booking, Dataset, Hotel, HotelStatus, Invoice, InvoiceItem, Review, Room, RoomType,
    };

    use super::*;
    use crate::models::ActivityAction;
    use crate::utils::ActivityLog;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn hotel(id: &str, status: HotelStatus) -> Hotel {
        Hotel {
            id: id.to_owned(),
            name: id.to_owned(),
            city: "杭州".to_owned(),
            address: "西湖路 1 号".to_owned(),
            star_rating: 4,
            phone: "0571-8888".to_owned(),
            status,
        }
    }

    fn room(id: &str, status: RoomStatus) -> Room {
        Room {
            id: id.to_owned(),
            hotel_id: "h1".to_owned(),
            number: id.to_owned(),
            room_type: RoomType::default(),
            capacity: 2,
            price_per_night: Money::from_major(300),
            status,
        }
    }

    fn booking(reference: &str, check_in: u32, check_out: u32, status: BookingStatus) -> Booking {
        Booking {
            id: reference.to_lowercase(),
            reference: reference.to_owned(),
            guest_name: "王芳".to_owned(),
            guest_email: "wang@example.com".to_owned(),
            room_id: "r1".to_owned(),
            check_in: date(check_in),
            check_out: date(check_out),
            guests: 2,
            total: Money::from_major(600),
            status,
        }
    }

    fn invoice(number: &str, amount: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: number.to_lowercase(),
            number: number.to_owned(),
            booking_reference: "BK-1".to_owned(),
            bill_to: "王芳".to_owned(),
            issued_on: date(1),
            due_on: date(15),
            items: vec![InvoiceItem {
                description: "房费".to_owned(),
                quantity: 1,
                unit_price: Money::from_major(amount),
            }],
            discount: Money::ZERO,
            tax_rate_bps: 0,
            status,
        }
    }

    fn review(rating: u8, status: ReviewStatus) -> Review {
        Review {
            id: format!("rv-{rating}-{status}"),
            hotel_id: "h1".to_owned(),
            guest_name: "李雷".to_owned(),
            rating,
            comment: "不错".to_owned(),
            status,
            created_on: date(2),
        }
    }

    fn catalog() -> Catalog {
        let data = Dataset {
            hotels: vec![hotel("h1", HotelStatus::Active), hotel("h2", HotelStatus::Inactive)],
            rooms: vec![
                room("r1", RoomStatus::Occupied),
                room("r2", RoomStatus::Available),
                room("r3", RoomStatus::Maintenance),
            ],
            bookings: vec![
                booking("BK-A", 10, 12, BookingStatus::Confirmed),
                booking("BK-B", 10, 11, BookingStatus::Cancelled),
                booking("BK-C", 8, 10, BookingStatus::CheckedIn),
                booking("BK-D", 7, 10, BookingStatus::CheckedOut),
            ],
            invoices: vec![
                invoice("INV-1", 100, InvoiceStatus::Unpaid),
                invoice("INV-2", 50, InvoiceStatus::Overdue),
                invoice("INV-3", 70, InvoiceStatus::Paid),
                invoice("INV-4", 900, InvoiceStatus::Void),
            ],
            reviews: vec![
                review(5, ReviewStatus::Published),
                review(4, ReviewStatus::Published),
                review(1, ReviewStatus::Pending),
            ],
            ..Dataset::default()
        };
        Catalog::with_dataset(data, ActivityLog::new(20))
    }

    #[test]
    fn test_counts_and_occupancy() {
        let stats = DashboardStats::compute(&catalog(), date(10));
        assert_eq!((stats.hotels_active, stats.hotels_total), (1, 2));
        assert_eq!((stats.rooms_available, stats.rooms_total), (1, 3));
        assert_eq!(stats.occupancy_percent, 33);
    }

    #[test]
    fn test_arrivals_skip_cancelled_and_departures_need_check_in() {
        let stats = DashboardStats::compute(&catalog(), date(10));
        assert_eq!(stats.arrivals_today, 1);
        assert_eq!(stats.departures_today, 1);
    }

    #[test]
    fn test_money_and_reviews() {
        let stats = DashboardStats::compute(&catalog(), date(10));
        assert_eq!(stats.outstanding, Money::from_major(150));
        assert_eq!(stats.collected, Money::from_major(70));
        assert_eq!(stats.rating_text(), "4.5 / 5");
        assert_eq!(stats.pending_reviews, 1);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::with_dataset(Dataset::default(), ActivityLog::new(5));
        let stats = DashboardStats::compute(&catalog, date(10));
        assert_eq!(stats.occupancy_percent, 0);
        assert_eq!(stats.rating_text(), "暂无");
    }

    #[test]
    fn test_recent_activity_is_newest_first() {
        let catalog = catalog();
        catalog.hotels.delete("h2", "admin").unwrap();
        catalog
            .activity
            .log_success("admin", ActivityAction::ConfigUpdate, "Config", "console", None);
        let recent = catalog.activity.latest(RECENT_ACTIVITY);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, ActivityAction::ConfigUpdate);
        assert_eq!(recent[1].action, ActivityAction::Delete);
    }
}
