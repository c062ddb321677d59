//! Mock collections the console starts with.
//!
//! Dates are laid out around `today` so the dashboard and calendar always
//! have something current to show.

use chrono::{Days, NaiveDate};

use crate::amenity::{Amenity, AmenityCategory};
use crate::booking::{Booking, BookingStatus};
use crate::coupon::{Coupon, Discount};
use crate::hotel::{Hotel, HotelStatus};
use crate::invoice::{Invoice, InvoiceItem, InvoiceStatus};
use crate::money::Money;
use crate::payment::{GatewayMode, GatewayProvider, PaymentGateway, PaymentTransaction, TransactionStatus};
use crate::review::{Review, ReviewStatus};
use crate::room::{Room, RoomStatus, RoomType};

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub hotels: Vec<Hotel>,
    pub rooms: Vec<Room>,
    pub amenities: Vec<Amenity>,
    pub coupons: Vec<Coupon>,
    pub reviews: Vec<Review>,
    pub bookings: Vec<Booking>,
    pub invoices: Vec<Invoice>,
    pub gateways: Vec<PaymentGateway>,
    pub transactions: Vec<PaymentTransaction>,
}

fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        today.checked_add_days(magnitude)
    } else {
        today.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(today)
}

impl Dataset {
    pub fn generate(today: NaiveDate) -> Self {
        Self {
            hotels: hotels(),
            rooms: rooms(),
            amenities: amenities(),
            coupons: coupons(today),
            reviews: reviews(today),
            bookings: bookings(today),
            invoices: invoices(today),
            gateways: gateways(),
            transactions: transactions(today),
        }
    }
}

fn hotels() -> Vec<Hotel> {
    let hotel = |id: &str, name: &str, city: &str, address: &str, stars: u8, status: HotelStatus| Hotel {
        id: id.to_owned(),
        name: name.to_owned(),
        city: city.to_owned(),
        address: address.to_owned(),
        star_rating: stars,
        phone: "+86 400 800 1234".to_owned(),
        status,
    };
    vec![
        hotel("htl-001", "海景度假酒店", "青岛", "东海西路 18 号", 5, HotelStatus::Active),
        hotel("htl-002", "西湖精品酒店", "杭州", "北山街 66 号", 4, HotelStatus::Active),
        hotel("htl-003", "城市商务酒店", "上海", "南京西路 1200 号", 3, HotelStatus::Inactive),
    ]
}

fn rooms() -> Vec<Room> {
    let room = |id: &str, hotel: &str, number: &str, room_type: RoomType, capacity: u8, price: i64, status: RoomStatus| {
        Room {
            id: id.to_owned(),
            hotel_id: hotel.to_owned(),
            number: number.to_owned(),
            room_type,
            capacity,
            price_per_night: Money::from_major(price),
            status,
        }
    };
    vec![
        room("rm-101", "htl-001", "101", RoomType::Double, 2, 680, RoomStatus::Occupied),
        room("rm-102", "htl-001", "102", RoomType::Twin, 2, 620, RoomStatus::Available),
        room("rm-801", "htl-001", "801", RoomType::Suite, 3, 1_880, RoomStatus::Available),
        room("rm-201", "htl-002", "201", RoomType::Single, 1, 420, RoomStatus::Available),
        room("rm-202", "htl-002", "202", RoomType::Family, 4, 960, RoomStatus::Occupied),
        room("rm-203", "htl-002", "203", RoomType::Double, 2, 560, RoomStatus::Maintenance),
        room("rm-301", "htl-003", "301", RoomType::Double, 2, 390, RoomStatus::Available),
        room("rm-302", "htl-003", "302", RoomType::Twin, 2, 360, RoomStatus::Available),
    ]
}

fn amenities() -> Vec<Amenity> {
    let amenity = |id: &str, name: &str, icon: &str, category: AmenityCategory, active: bool| Amenity {
        id: id.to_owned(),
        name: name.to_owned(),
        icon: icon.to_owned(),
        category,
        active,
    };
    vec![
        amenity("amn-001", "免费 Wi-Fi", "📶", AmenityCategory::Room, true),
        amenity("amn-002", "迷你吧", "🍷", AmenityCategory::Room, true),
        amenity("amn-003", "室内泳池", "🏊", AmenityCategory::Wellness, true),
        amenity("amn-004", "健身房", "🏋️", AmenityCategory::Wellness, true),
        amenity("amn-005", "自助早餐", "🥐", AmenityCategory::Dining, true),
        amenity("amn-006", "机场接送", "🚐", AmenityCategory::Property, false),
    ]
}

fn coupons(today: NaiveDate) -> Vec<Coupon> {
    vec![
        Coupon {
            id: "cpn-001".to_owned(),
            code: "SUMMER15".to_owned(),
            discount: Discount::Percent { bps: 1_500 },
            valid_from: shift(today, -30),
            valid_until: shift(today, 60),
            usage_limit: Some(500),
            used_count: 127,
            active: true,
        },
        Coupon {
            id: "cpn-002".to_owned(),
            code: "WELCOME100".to_owned(),
            discount: Discount::Fixed {
                amount: Money::from_major(100),
            },
            valid_from: shift(today, -90),
            valid_until: shift(today, 275),
            usage_limit: None,
            used_count: 842,
            active: true,
        },
        Coupon {
            id: "cpn-003".to_owned(),
            code: "SPRING-FLASH".to_owned(),
            discount: Discount::Percent { bps: 2_000 },
            valid_from: shift(today, -120),
            valid_until: shift(today, -60),
            usage_limit: Some(100),
            used_count: 100,
            active: false,
        },
    ]
}

fn reviews(today: NaiveDate) -> Vec<Review> {
    let review = |id: &str, hotel: &str, guest: &str, rating: u8, comment: &str, status: ReviewStatus, age: i64| Review {
        id: id.to_owned(),
        hotel_id: hotel.to_owned(),
        guest_name: guest.to_owned(),
        rating,
        comment: comment.to_owned(),
        status,
        created_on: shift(today, -age),
    };
    vec![
        review("rvw-001", "htl-001", "王芳", 5, "海景房视野极好，服务周到。", ReviewStatus::Published, 12),
        review("rvw-002", "htl-001", "李强", 4, "早餐丰富，停车稍不便。", ReviewStatus::Published, 8),
        review("rvw-003", "htl-002", "陈静", 5, "位置绝佳，步行即到西湖。", ReviewStatus::Published, 5),
        review("rvw-004", "htl-002", "赵磊", 2, "隔音一般，夜里有些吵。", ReviewStatus::Pending, 2),
        review("rvw-005", "htl-003", "匿名", 1, "广告内容", ReviewStatus::Hidden, 20),
    ]
}

fn bookings(today: NaiveDate) -> Vec<Booking> {
    let booking = |id: &str,
                   reference: &str,
                   guest: &str,
                   email: &str,
                   room: &str,
                   start: i64,
                   nights: i64,
                   guests: u8,
                   total: i64,
                   status: BookingStatus| Booking {
        id: id.to_owned(),
        reference: reference.to_owned(),
        guest_name: guest.to_owned(),
        guest_email: email.to_owned(),
        room_id: room.to_owned(),
        check_in: shift(today, start),
        check_out: shift(today, start + nights),
        guests,
        total: Money::from_major(total),
        status,
    };
    vec![
        booking("bkg-001", "BK-240001", "张伟", "zhangwei@example.com", "rm-101", -2, 4, 2, 2_720, BookingStatus::CheckedIn),
        booking("bkg-002", "BK-240002", "刘洋", "liuyang@example.com", "rm-202", -1, 3, 4, 2_880, BookingStatus::CheckedIn),
        booking("bkg-003", "BK-240003", "Emily Chen", "emily@example.com", "rm-801", 0, 2, 2, 3_760, BookingStatus::Confirmed),
        booking("bkg-004", "BK-240004", "孙丽", "sunli@example.com", "rm-201", 3, 2, 1, 840, BookingStatus::Pending),
        booking("bkg-005", "BK-240005", "周杰", "zhoujie@example.com", "rm-102", -6, 2, 2, 1_240, BookingStatus::CheckedOut),
        booking("bkg-006", "BK-240006", "吴敏", "wumin@example.com", "rm-301", 5, 3, 2, 1_170, BookingStatus::Cancelled),
    ]
}

fn invoices(today: NaiveDate) -> Vec<Invoice> {
    vec![
        Invoice {
            id: "inv-001".to_owned(),
            number: "INV-240001".to_owned(),
            booking_reference: "BK-240005".to_owned(),
            bill_to: "周杰".to_owned(),
            issued_on: shift(today, -4),
            due_on: shift(today, 10),
            items: vec![
                InvoiceItem {
                    description: "双床房 2 晚".to_owned(),
                    quantity: 2,
                    unit_price: Money::from_major(620),
                },
                InvoiceItem {
                    description: "自助早餐".to_owned(),
                    quantity: 4,
                    unit_price: Money::from_major(68),
                },
            ],
            discount: Money::ZERO,
            tax_rate_bps: 600,
            status: InvoiceStatus::Paid,
        },
        Invoice {
            id: "inv-002".to_owned(),
            number: "INV-240002".to_owned(),
            booking_reference: "BK-240001".to_owned(),
            bill_to: "张伟".to_owned(),
            issued_on: shift(today, -2),
            due_on: shift(today, 12),
            items: vec![InvoiceItem {
                description: "大床房 4 晚".to_owned(),
                quantity: 4,
                unit_price: Money::from_major(680),
            }],
            discount: Money::from_major(100),
            tax_rate_bps: 600,
            status: InvoiceStatus::Unpaid,
        },
        Invoice {
            id: "inv-003".to_owned(),
            number: "INV-240003".to_owned(),
            booking_reference: "BK-239950".to_owned(),
            bill_to: "星辰旅行社".to_owned(),
            issued_on: shift(today, -45),
            due_on: shift(today, -15),
            items: vec![InvoiceItem {
                description: "团队房 12 间夜".to_owned(),
                quantity: 12,
                unit_price: Money::from_major(450),
            }],
            discount: Money::from_major(300),
            tax_rate_bps: 600,
            status: InvoiceStatus::Overdue,
        },
    ]
}

fn gateways() -> Vec<PaymentGateway> {
    vec![
        PaymentGateway {
            id: "gw-001".to_owned(),
            name: "Stripe 国际卡".to_owned(),
            provider: GatewayProvider::Stripe,
            mode: GatewayMode::Live,
            api_key: "sk_live_51Hx9mock4821".to_owned(),
            webhook_url: "https://pay.example.com/webhooks/stripe".to_owned(),
            fee_bps: 290,
            currencies: vec!["USD".to_owned(), "EUR".to_owned(), "CNY".to_owned()],
            enabled: true,
        },
        PaymentGateway {
            id: "gw-002".to_owned(),
            name: "支付宝".to_owned(),
            provider: GatewayProvider::Alipay,
            mode: GatewayMode::Live,
            api_key: "2088mockalipay7730".to_owned(),
            webhook_url: "https://pay.example.com/webhooks/alipay".to_owned(),
            fee_bps: 60,
            currencies: vec!["CNY".to_owned()],
            enabled: true,
        },
        PaymentGateway {
            id: "gw-003".to_owned(),
            name: "PayPal 沙箱".to_owned(),
            provider: GatewayProvider::Paypal,
            mode: GatewayMode::Sandbox,
            api_key: "sb-mock-paypal-0019".to_owned(),
            webhook_url: String::new(),
            fee_bps: 340,
            currencies: vec!["USD".to_owned()],
            enabled: false,
        },
    ]
}

fn transactions(today: NaiveDate) -> Vec<PaymentTransaction> {
    let txn = |id: &str, reference: &str, gateway: &str, booking: &str, amount: i64, currency: &str, method: &str, status: TransactionStatus, age: i64| {
        PaymentTransaction {
            id: id.to_owned(),
            reference: reference.to_owned(),
            gateway_id: gateway.to_owned(),
            booking_reference: booking.to_owned(),
            amount: Money::from_major(amount),
            currency: currency.to_owned(),
            method: method.to_owned(),
            status,
            created_on: shift(today, -age),
        }
    };
    vec![
        txn("txn-001", "TX-900101", "gw-002", "BK-240005", 1_603, "CNY", "扫码支付", TransactionStatus::Succeeded, 4),
        txn("txn-002", "TX-900102", "gw-001", "BK-240003", 3_760, "CNY", "Visa ****4242", TransactionStatus::Pending, 0),
        txn("txn-003", "TX-900103", "gw-001", "BK-240006", 1_170, "CNY", "Mastercard ****5100", TransactionStatus::Refunded, 3),
        txn("txn-004", "TX-900104", "gw-002", "BK-240002", 2_880, "CNY", "扫码支付", TransactionStatus::Failed, 1),
        txn("txn-005", "TX-900105", "gw-002", "BK-240002", 2_880, "CNY", "扫码支付", TransactionStatus::Succeeded, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_seed_records_validate() {
        let data = Dataset::generate(today());
        let mut problems = Vec::new();
        let mut collect = |kind: &str, id: &str, result: crate::ValidationResult| {
            if !result.is_valid() {
                problems.push(format!("{kind} {id}: {result}"));
            }
        };
        data.hotels.iter().for_each(|r| collect(Hotel::KIND, r.id(), r.validate()));
        data.rooms.iter().for_each(|r| collect(Room::KIND, r.id(), r.validate()));
        data.amenities.iter().for_each(|r| collect(Amenity::KIND, r.id(), r.validate()));
        data.coupons.iter().for_each(|r| collect(Coupon::KIND, r.id(), r.validate()));
        data.reviews.iter().for_each(|r| collect(Review::KIND, r.id(), r.validate()));
        data.bookings.iter().for_each(|r| collect(Booking::KIND, r.id(), r.validate()));
        data.invoices.iter().for_each(|r| collect(Invoice::KIND, r.id(), r.validate()));
        data.gateways.iter().for_each(|r| collect(PaymentGateway::KIND, r.id(), r.validate()));
        data.transactions.iter().for_each(|r| collect(PaymentTransaction::KIND, r.id(), r.validate()));
        assert!(problems.is_empty(), "{problems:#?}");
    }

    #[test]
    fn test_rooms_reference_seeded_hotels() {
        let data = Dataset::generate(today());
        for room in &data.rooms {
            assert!(data.hotels.iter().any(|h| h.id == room.hotel_id), "{}", room.id);
        }
        for booking in &data.bookings {
            assert!(data.rooms.iter().any(|r| r.id == booking.room_id), "{}", booking.id);
        }
    }

    #[test]
    fn test_shift_crosses_month() {
        assert_eq!(shift(today(), 20), NaiveDate::from_ymd_opt(2024, 8, 4).unwrap());
        assert_eq!(shift(today(), -15), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }
}
