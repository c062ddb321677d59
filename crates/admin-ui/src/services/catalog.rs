//! Record services for every console screen
//!
//! A [`Catalog`] is handed to pages through context. All of its services
//! share one [`ActivityLog`].

use chrono::{Local, NaiveDate};
use hotelier_data::{
    Amenity, Booking, BookingStatus, Coupon, Dataset, Hotel, Invoice, PaymentGateway, PaymentTransaction,
    Review, Room, RoomStatus,
};

use super::entity::EntityService;
use crate::models::{ActivityAction, ConsoleError, ConsoleResult};
use crate::utils::ActivityLog;

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub hotels: EntityService<Hotel>,
    pub rooms: EntityService<Room>,
    pub amenities: EntityService<Amenity>,
    pub coupons: EntityService<Coupon>,
    pub reviews: EntityService<Review>,
    pub bookings: EntityService<Booking>,
    pub invoices: EntityService<Invoice>,
    pub gateways: EntityService<PaymentGateway>,
    pub transactions: EntityService<PaymentTransaction>,
    pub activity: ActivityLog,
}

impl Catalog {
    /// In-memory catalog filled with mock records dated around `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::with_dataset(Dataset::generate(today), ActivityLog::default())
    }

    pub fn with_dataset(data: Dataset, activity: ActivityLog) -> Self {
        Self {
            hotels: EntityService::in_memory(data.hotels, activity.clone()),
            rooms: EntityService::in_memory(data.rooms, activity.clone()),
            amenities: EntityService::in_memory(data.amenities, activity.clone()),
            coupons: EntityService::in_memory(data.coupons, activity.clone()),
            reviews: EntityService::in_memory(data.reviews, activity.clone()),
            bookings: EntityService::in_memory(data.bookings, activity.clone()),
            invoices: EntityService::in_memory(data.invoices, activity.clone()),
            gateways: EntityService::in_memory(data.gateways, activity.clone()),
            transactions: EntityService::in_memory(data.transactions, activity.clone()),
            activity,
        }
    }

    pub fn hotel_name(&self, hotel_id: &str) -> String {
        self.hotels
            .get(hotel_id)
            .map(|hotel| hotel.name)
            .unwrap_or_else(|_| hotel_id.to_owned())
    }

    /// e.g. `湖畔酒店 · 101`
    pub fn room_label(&self, room_id: &str) -> String {
        match self.rooms.get(room_id) {
            Ok(room) => format!("{} · {}", self.hotel_name(&room.hotel_id), room.number),
            Err(_) => room_id.to_owned(),
        }
    }

    pub fn gateway_name(&self, gateway_id: &str) -> String {
        self.gateways
            .get(gateway_id)
            .map(|gateway| gateway.name)
            .unwrap_or_else(|_| gateway_id.to_owned())
    }

    /// Booking whose reference matches `reference`, ignoring case and
    /// surrounding whitespace.
    pub fn find_booking_by_reference(&self, reference: &str) -> Option<Booking> {
        let wanted = reference.trim();
        if wanted.is_empty() {
            return None;
        }
        self.bookings
            .find(|booking| booking.reference.eq_ignore_ascii_case(wanted))
    }

    /// Moves a booking through its lifecycle and keeps the room status in
    /// step: checking in occupies the room, checking out frees it.
    pub fn transition_booking(&self, id: &str, next: BookingStatus, actor: &str) -> ConsoleResult<Booking> {
        let booking = self.bookings.change(
            id,
            actor,
            ActivityAction::StatusChange,
            Some(next.label().to_owned()),
            |booking| booking.transition(next),
        )?;
        self.sync_room(&booking, actor);
        Ok(booking)
    }

    /// Checks in the booking identified by a scanned or typed reference.
    pub fn check_in_by_reference(&self, reference: &str, actor: &str) -> ConsoleResult<Booking> {
        let Some(found) = self.find_booking_by_reference(reference) else {
            let reference = reference.trim();
            self.activity
                .log_failure(actor, ActivityAction::CheckIn, "Booking", reference, "unknown reference");
            return Err(ConsoleError::not_found(format!("预订编号 {reference}")));
        };

        let booking = self.bookings.change(
            &found.id,
            actor,
            ActivityAction::CheckIn,
            Some(found.reference.clone()),
            |booking| booking.transition(BookingStatus::CheckedIn),
        )?;
        self.sync_room(&booking, actor);
        Ok(booking)
    }

    fn sync_room(&self, booking: &Booking, actor: &str) {
        let status = match booking.status {
            BookingStatus::CheckedIn => RoomStatus::Occupied,
            BookingStatus::CheckedOut => RoomStatus::Available,
            _ => return,
        };
        let detail = Some(status.label().to_owned());
        let result = self
            .rooms
            .change(&booking.room_id, actor, ActivityAction::StatusChange, detail, |room| {
                room.status = status;
                Ok(())
            });
        if let Err(err) = result {
            tracing::warn!(booking = %booking.reference, "room status not updated: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use hotelier_data::DataError;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::seeded(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    }

    #[test]
    fn test_seeded_catalog_is_populated() {
        let catalog = catalog();
        assert_eq!(catalog.hotels.count(), 3);
        assert_eq!(catalog.rooms.count(), 8);
        assert!(catalog.bookings.count() > 0);
        assert_eq!(catalog.activity.count(), 0);
    }

    #[test]
    fn test_lookup_helpers() {
        let catalog = catalog();
        let room = catalog.rooms.get("rm-101").unwrap();
        assert_eq!(catalog.room_label("rm-101"), format!("{} · {}", catalog.hotel_name(&room.hotel_id), room.number));
        assert_eq!(catalog.hotel_name("htl-missing"), "htl-missing");
        assert_eq!(catalog.gateway_name("gw-missing"), "gw-missing");
    }

    #[test]
    fn test_find_booking_by_reference_ignores_case() {
        let catalog = catalog();
        let found = catalog.find_booking_by_reference("  bk-240003 ").unwrap();
        assert_eq!(found.id, "bkg-003");
        assert!(catalog.find_booking_by_reference("").is_none());
        assert!(catalog.find_booking_by_reference("BK-000000").is_none());
    }

    #[test]
    fn test_check_in_by_reference_occupies_room() {
        let catalog = catalog();
        let booking = catalog.check_in_by_reference("BK-240003", "admin").unwrap();

        assert_eq!(booking.status, BookingStatus::CheckedIn);
        assert_eq!(catalog.rooms.get(&booking.room_id).unwrap().status, RoomStatus::Occupied);
        let latest = catalog.activity.latest(2);
        assert_eq!(latest[1].action, ActivityAction::CheckIn);
        assert!(latest[1].success);
    }

    #[test]
    fn test_check_in_twice_is_rejected() {
        let catalog = catalog();
        catalog.check_in_by_reference("BK-240003", "admin").unwrap();
        let err = catalog.check_in_by_reference("BK-240003", "admin").unwrap_err();
        assert!(matches!(err, ConsoleError::Data(DataError::IllegalTransition { .. })));
    }

    #[test]
    fn test_unknown_reference_is_logged() {
        let catalog = catalog();
        let err = catalog.check_in_by_reference("BK-999999", "admin").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        let entry = &catalog.activity.latest(1)[0];
        assert!(!entry.success);
        assert_eq!(entry.target_id, "BK-999999");
    }

    #[test]
    fn test_check_out_frees_room() {
        let catalog = catalog();
        let booking = catalog.check_in_by_reference("BK-240003", "admin").unwrap();
        catalog
            .transition_booking(&booking.id, BookingStatus::CheckedOut, "admin")
            .unwrap();
        assert_eq!(catalog.rooms.get(&booking.room_id).unwrap().status, RoomStatus::Available);
    }
}
