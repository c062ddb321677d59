use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::money::Money;
use crate::record::Record;
use crate::validation::{FieldError, ValidationResult, require_text};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub number: String,
    pub room_type: RoomType,
    pub capacity: u8,
    pub price_per_night: Money,
    pub status: RoomStatus,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    Single,
    #[default]
    Double,
    Twin,
    Suite,
    Family,
}

impl RoomType {
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "单人间",
            RoomType::Double => "大床房",
            RoomType::Twin => "双床房",
            RoomType::Suite => "套房",
            RoomType::Family => "家庭房",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Available => "空闲",
            RoomStatus::Occupied => "入住中",
            RoomStatus::Maintenance => "维修中",
        }
    }
}

impl Record for Room {
    const KIND: &'static str = "Room";
    const ID_PREFIX: &'static str = "rm";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "hotel_id", &self.hotel_id);
        require_text(&mut result, "number", &self.number);
        result.check(self.capacity >= 1, || FieldError::out_of_range("capacity", 1, u8::MAX));
        result.check(self.price_per_night.is_positive(), || {
            FieldError::invalid_value("price_per_night", "must be greater than zero")
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price_and_capacity() {
        let mut room = Room {
            id: String::new(),
            hotel_id: "htl-1".to_owned(),
            number: "1201".to_owned(),
            room_type: RoomType::Suite,
            capacity: 0,
            price_per_night: Money::ZERO,
            status: RoomStatus::Available,
        };
        let result = room.validate();
        assert!(result.error_for("capacity").is_some());
        assert!(result.error_for("price_per_night").is_some());

        room.capacity = 2;
        room.price_per_night = Money::from_major(680);
        assert!(room.validate().is_valid());
    }
}
