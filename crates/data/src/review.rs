use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Review {
    pub id: String,
    pub hotel_id: String,
    pub guest_name: String,
    pub rating: u8,
    pub comment: String,
    pub status: ReviewStatus,
    pub created_on: NaiveDate,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Published,
    Hidden,
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "待审核",
            ReviewStatus::Published => "已发布",
            ReviewStatus::Hidden => "已隐藏",
        }
    }
}

/// Mean rating of published reviews, `None` when there are none.
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<f64> {
    let (sum, count) = reviews
        .into_iter()
        .filter(|review| review.status == ReviewStatus::Published)
        .fold((0u32, 0u32), |(sum, count), review| (sum + u32::from(review.rating), count + 1));
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

impl Record for Review {
    const KIND: &'static str = "Review";
    const ID_PREFIX: &'static str = "rvw";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "hotel_id", &self.hotel_id);
        require_text(&mut result, "guest_name", &self.guest_name);
        result.check((1..=5).contains(&self.rating), || FieldError::out_of_range("rating", 1, 5));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, status: ReviewStatus) -> Review {
        Review {
            id: String::new(),
            hotel_id: "htl-1".to_owned(),
            guest_name: "Lin".to_owned(),
            rating,
            comment: String::new(),
            status,
            created_on: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        }
    }

    #[test]
    fn test_average_ignores_unpublished() {
        let reviews = vec![
            review(5, ReviewStatus::Published),
            review(4, ReviewStatus::Published),
            review(1, ReviewStatus::Hidden),
            review(2, ReviewStatus::Pending),
        ];
        assert_eq!(average_rating(&reviews), Some(4.5));
        assert_eq!(average_rating(&reviews[2..]), None);
    }

    #[test]
    fn test_rating_range() {
        assert!(review(0, ReviewStatus::Pending).validate().error_for("rating").is_some());
        assert!(review(5, ReviewStatus::Pending).validate().is_valid());
    }
}
