//! Feedback components: inline errors, validation summaries, alerts and toasts

use dioxus::prelude::*;

/// Inline error under a form field
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        p { class: "mt-1 text-xs text-red-600 flex items-center",
            span { class: "mr-1", "⚠" }
            "{message}"
        }
    }
}

#[component]
pub fn WarningMessage(message: String) -> Element {
    rsx! {
        p { class: "mt-1 text-xs text-yellow-700 flex items-center",
            span { class: "mr-1", "⚠" }
            "{message}"
        }
    }
}

/// Props for the ValidationFeedback component
#[derive(Props, Clone, PartialEq)]
pub struct ValidationFeedbackProps {
    #[props(default = vec![])]
    pub errors: Vec<String>,
    #[props(default = vec![])]
    pub warnings: Vec<String>,
}

/// Summary of every error and warning of a form
#[component]
pub fn ValidationFeedback(props: ValidationFeedbackProps) -> Element {
    if props.errors.is_empty() && props.warnings.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "rounded-md border border-gray-200 bg-gray-50 p-3 space-y-1",
            for error in props.errors.iter() {
                ErrorMessage { message: error.clone() }
            }
            for warning in props.warnings.iter() {
                WarningMessage { message: warning.clone() }
            }
        }
    }
}

fn tone_class(kind: &str) -> &'static str {
    match kind {
        "success" => "bg-green-50 border-green-200 text-green-800",
        "error" => "bg-red-50 border-red-200 text-red-800",
        "warning" => "bg-yellow-50 border-yellow-200 text-yellow-800",
        _ => "bg-blue-50 border-blue-200 text-blue-800",
    }
}

/// Props for the Toast component
#[derive(Props, Clone, PartialEq)]
pub struct ToastProps {
    pub message: String,
    /// success, error, warning, info
    #[props(default = "info".to_string())]
    pub toast_type: String,
    #[props(default = EventHandler::default())]
    pub ondismiss: EventHandler<()>,
}

#[component]
pub fn Toast(props: ToastProps) -> Element {
    let class = tone_class(&props.toast_type);
    let role = if props.toast_type == "error" { "alert" } else { "status" };

    rsx! {
        div { class: "flex items-start justify-between rounded-lg border shadow-lg px-4 py-3 text-sm {class}",
            role: "{role}",
            span { class: "pr-3", "{props.message}" }
            button {
                class: "opacity-60 hover:opacity-100",
                "aria-label": "关闭",
                onclick: move |_| props.ondismiss.call(()),
                "×"
            }
        }
    }
}

/// Props for the Alert component
#[derive(Props, Clone, PartialEq)]
pub struct AlertProps {
    #[props(default = None)]
    pub title: Option<String>,
    pub message: String,
    /// success, error, warning, info
    #[props(default = "info".to_string())]
    pub alert_type: String,
}

/// Prominent block message inside a page
#[component]
pub fn Alert(props: AlertProps) -> Element {
    let class = tone_class(&props.alert_type);

    rsx! {
        div { class: "rounded-md border p-4 text-sm {class}",
            if let Some(title) = &props.title {
                p { class: "font-medium mb-1", "{title}" }
            }
            p { "{props.message}" }
        }
    }
}
