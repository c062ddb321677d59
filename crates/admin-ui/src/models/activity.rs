//! Activity log models

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::error::kind_label;
use crate::grid::{CellContent, CellValue, GridRow};

/// One operator action recorded by the console
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: ActivityAction,
    /// Record kind, e.g. `Hotel`, or `Config`
    pub target_type: String,
    pub target_id: String,
    pub detail: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    StatusChange,
    CheckIn,
    ConfigUpdate,
}

impl ActivityAction {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityAction::Create => "创建",
            ActivityAction::Update => "更新",
            ActivityAction::Delete => "删除",
            ActivityAction::StatusChange => "变更状态",
            ActivityAction::CheckIn => "扫码入住",
            ActivityAction::ConfigUpdate => "更新配置",
        }
    }
}

impl ActivityEntry {
    pub fn success(
        actor: impl Into<String>,
        action: ActivityAction,
        target_type: impl Into<String>,
        target_id: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            actor: actor.into(),
            action,
            target_type: target_type.into(),
            target_id: target_id.into(),
            detail,
            success: true,
            error_message: None,
        }
    }

    pub fn failure(
        actor: impl Into<String>,
        action: ActivityAction,
        target_type: impl Into<String>,
        target_id: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error_message: Some(error_message.into()),
            ..Self::success(actor, action, target_type, target_id, None)
        }
    }

    /// e.g. `admin 创建 酒店 htl-001`
    pub fn description(&self) -> String {
        let mut text = format!(
            "{} {} {} {}",
            self.actor,
            self.action.label(),
            kind_label(&self.target_type),
            self.target_id
        );
        if let Some(detail) = &self.detail {
            text.push_str(&format!("（{detail}）"));
        }
        if let Some(error) = &self.error_message {
            text.push_str(&format!(" 失败: {error}"));
        }
        text
    }

    pub fn local_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl GridRow for ActivityEntry {
    const FIELDS: &'static [&'static str] =
        &["id", "time", "actor", "action", "target_type", "target_id", "detail", "result"];

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::Int(i64::try_from(self.id).unwrap_or(i64::MAX)),
            "time" => self.local_time().into(),
            "actor" => (&self.actor).into(),
            "action" => self.action.label().into(),
            "target_type" => kind_label(&self.target_type).into(),
            "target_id" => (&self.target_id).into(),
            "detail" => self.detail.clone().or_else(|| self.error_message.clone()).into(),
            "result" => (if self.success { "成功" } else { "失败" }).into(),
            _ => CellValue::Empty,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

/// Badge for the result column
pub fn result_badge(entry: &ActivityEntry) -> CellContent {
    if entry.success {
        CellContent::status("success", "成功")
    } else {
        CellContent::status("failed", "失败")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description() {
        let entry = ActivityEntry::success("admin", ActivityAction::Create, "Hotel", "htl-001", None);
        assert_eq!(entry.description(), "admin 创建 酒店 htl-001");

        let entry = ActivityEntry::failure("admin", ActivityAction::Delete, "Room", "rm-1", "not found");
        assert!(!entry.success);
        assert_eq!(entry.description(), "admin 删除 客房 rm-1 失败: not found");
    }

    #[test]
    fn test_grid_fields() {
        let entry = ActivityEntry::success(
            "front-desk",
            ActivityAction::StatusChange,
            "Booking",
            "bkg-1",
            Some("confirmed".to_owned()),
        );
        assert_eq!(entry.field("target_type"), CellValue::from("预订"));
        assert_eq!(entry.field("detail"), CellValue::from("confirmed"));
        assert_eq!(entry.field("result"), CellValue::from("成功"));
        assert_eq!(entry.field("bogus"), CellValue::Empty);
        assert_eq!(result_badge(&entry).as_text(), "成功");
    }
}
