//! Status badge component

use dioxus::prelude::*;

/// Colour family of a badge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    #[default]
    Neutral,
}

impl Tone {
    /// Tone for a status label such as `paid` or `Checked In`.
    ///
    /// Matching ignores case, spaces and hyphens; anything unknown is neutral.
    pub fn for_label(label: &str) -> Tone {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "active" | "available" | "confirmed" | "checked_in" | "published" | "paid" | "succeeded"
            | "enabled" | "live" | "redeemable" | "success" => Tone::Success,
            "pending" | "maintenance" | "draft" | "unpaid" | "sandbox" | "warning" => Tone::Warning,
            "cancelled" | "failed" | "overdue" | "exhausted" | "error" => Tone::Danger,
            "occupied" | "checked_out" | "refunded" | "info" => Tone::Info,
            _ => Tone::Neutral,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Tone::Success => "bg-green-100 text-green-800",
            Tone::Warning => "bg-yellow-100 text-yellow-800",
            Tone::Danger => "bg-red-100 text-red-800",
            Tone::Info => "bg-blue-100 text-blue-800",
            Tone::Neutral => "bg-gray-100 text-gray-700",
        }
    }
}

/// Props for the StatusBadge component
#[derive(Props, Clone, PartialEq)]
pub struct StatusBadgeProps {
    /// Text shown inside the badge
    pub label: String,
    /// Explicit tone; derived from `label` when absent
    #[props(default = None)]
    pub tone: Option<Tone>,
}

/// Pill-shaped status indicator
#[component]
pub fn StatusBadge(props: StatusBadgeProps) -> Element {
    let tone = props.tone.unwrap_or_else(|| Tone::for_label(&props.label));

    rsx! {
        span {
            class: format!("inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}", tone.class()),
            "{props.label}"
        }
    }
}
