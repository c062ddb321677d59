use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub star_rating: u8,
    pub phone: String,
    pub status: HotelStatus,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HotelStatus {
    #[default]
    Active,
    Inactive,
}

impl HotelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HotelStatus::Active => "营业中",
            HotelStatus::Inactive => "已停用",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HotelStatus::Active => HotelStatus::Inactive,
            HotelStatus::Inactive => HotelStatus::Active,
        }
    }
}

impl Hotel {
    pub fn is_active(&self) -> bool {
        self.status == HotelStatus::Active
    }
}

impl Record for Hotel {
    const KIND: &'static str = "Hotel";
    const ID_PREFIX: &'static str = "htl";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "name", &self.name);
        require_text(&mut result, "city", &self.city);
        result.check((1..=5).contains(&self.star_rating), || {
            FieldError::out_of_range("star_rating", 1, 5)
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel() -> Hotel {
        Hotel {
            id: String::new(),
            name: "Harbour View".to_owned(),
            city: "Qingdao".to_owned(),
            address: "1 Coast Rd".to_owned(),
            star_rating: 4,
            phone: String::new(),
            status: HotelStatus::Active,
        }
    }

    #[test]
    fn test_validate() {
        assert!(hotel().validate().is_valid());

        let mut invalid = hotel();
        invalid.name = " ".to_owned();
        invalid.star_rating = 6;
        let result = invalid.validate();
        assert!(result.error_for("name").is_some());
        assert!(result.error_for("star_rating").is_some());
        assert!(result.error_for("city").is_none());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!(HotelStatus::Inactive.as_ref(), "inactive");
        assert_eq!("active".parse::<HotelStatus>().unwrap(), HotelStatus::Active);
        assert_eq!(HotelStatus::Active.toggled(), HotelStatus::Inactive);
    }
}
