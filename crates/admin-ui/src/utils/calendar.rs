//! Month grid for the bookings calendar

use chrono::{Datelike, NaiveDate};
use hotelier_data::Booking;

/// One day of the month and the bookings staying that night.
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

/// Monday-first weeks; cells outside the month are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    /// `None` when `month` is not in 1..=12.
    pub fn build(year: i32, month: u32, bookings: &[Booking]) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = next_month(year, month);
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?.day();
        let lead = first.weekday().num_days_from_monday() as usize;

        let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(42);
        cells.resize(lead, None);
        for date in first.iter_days().take(last_day as usize) {
            let staying = bookings
                .iter()
                .filter(|booking| booking.is_active() && booking.occupies(date))
                .cloned()
                .collect();
            cells.push(Some(DayCell {
                date,
                bookings: staying,
            }));
        }
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        let weeks = cells
            .chunks(7)
            .map(|chunk| std::array::from_fn(|index| chunk[index].clone()))
            .collect();
        Some(Self { year, month, weeks })
    }

    pub fn title(&self) -> String {
        format!("{}年{}月", self.year, self.month)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .find(|cell| cell.date.day() == day)
    }

    /// Total occupied room-nights in the month.
    pub fn room_nights(&self) -> usize {
        self.weeks.iter().flatten().flatten().map(|cell| cell.bookings.len()).sum()
    }
}

pub const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

#[cfg(test)]
mod tests {
    use hotelier_data::{BookingStatus, Money};

    use super::*;

    fn booking(reference: &str, check_in: (u32, u32), check_out: (u32, u32), status: BookingStatus) -> Booking {
        Booking {
            id: format!("bkg-{reference}"),
            reference: reference.to_owned(),
            guest_name: "Guest".to_owned(),
            guest_email: "guest@example.com".to_owned(),
            room_id: "rm-1".to_owned(),
            check_in: NaiveDate::from_ymd_opt(2024, check_in.0, check_in.1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, check_out.0, check_out.1).unwrap(),
            guests: 1,
            total: Money::from_major(100),
            status,
        }
    }

    #[test]
    fn test_layout_starts_on_monday() {
        // 2024-07-01 is a Monday, 31 days
        let grid = MonthGrid::build(2024, 7, &[]).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0].as_ref().unwrap().date.day(), 1);
        assert_eq!(grid.weeks[4][2].as_ref().unwrap().date.day(), 31);
        assert!(grid.weeks[4][3].is_none());
        assert_eq!(grid.title(), "2024年7月");
    }

    #[test]
    fn test_leading_blanks() {
        // 2024-09-01 is a Sunday
        let grid = MonthGrid::build(2024, 9, &[]).unwrap();
        assert!(grid.weeks[0][..6].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0][6].as_ref().unwrap().date.day(), 1);
        // February of a leap year
        let feb = MonthGrid::build(2024, 2, &[]).unwrap();
        assert!(feb.day(29).is_some());
        assert!(feb.day(30).is_none());
    }

    #[test]
    fn test_bookings_fill_nights_but_not_checkout_day() {
        let bookings = vec![
            booking("A", (7, 30), (8, 2), BookingStatus::Confirmed),
            booking("B", (8, 1), (8, 3), BookingStatus::Cancelled),
        ];
        let august = MonthGrid::build(2024, 8, &bookings).unwrap();
        assert_eq!(august.day(1).unwrap().bookings.len(), 1);
        assert!(august.day(2).unwrap().bookings.is_empty());
        assert_eq!(august.room_nights(), 1);

        let july = MonthGrid::build(2024, 7, &bookings).unwrap();
        assert_eq!(july.day(30).unwrap().bookings[0].reference, "A");
        assert_eq!(july.room_nights(), 2);
    }

    #[test]
    fn test_month_navigation_rolls_over() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(next_month(2024, 6), (2024, 7));
        assert!(MonthGrid::build(2024, 13, &[]).is_none());
    }
}
