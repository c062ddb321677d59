use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::record::Record;
use crate::validation::{ValidationResult, require_text};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: AmenityCategory,
    pub active: bool,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AmenityCategory {
    #[default]
    Room,
    Property,
    Wellness,
    Dining,
}

impl AmenityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AmenityCategory::Room => "客房设施",
            AmenityCategory::Property => "公共设施",
            AmenityCategory::Wellness => "康体休闲",
            AmenityCategory::Dining => "餐饮",
        }
    }
}

impl Record for Amenity {
    const KIND: &'static str = "Amenity";
    const ID_PREFIX: &'static str = "amn";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        require_text(&mut result, "name", &self.name);
        result
    }
}
