//! Form components for the admin console

use dioxus::prelude::*;

use super::feedback::ErrorMessage;

const FIELD_CLASS: &str =
    "block w-full rounded-md border px-3 py-2 text-sm shadow-sm focus:outline-none focus:ring-1";

fn field_class(has_error: bool) -> String {
    if has_error {
        format!("{FIELD_CLASS} border-red-300 text-red-900 focus:border-red-500 focus:ring-red-500")
    } else {
        format!("{FIELD_CLASS} border-gray-300 focus:border-teal-500 focus:ring-teal-500")
    }
}

#[component]
fn FieldLabel(label: String, required: bool) -> Element {
    rsx! {
        label { class: "block text-sm font-medium text-gray-700 mb-1",
            "{label}"
            if required {
                span { class: "text-red-500", " *" }
            }
        }
    }
}

/// Props for the Input component
#[derive(Props, Clone, PartialEq)]
pub struct InputProps {
    pub label: String,
    /// text, number, date, email, url
    #[props(default = "text".to_string())]
    pub input_type: String,
    pub value: String,
    #[props(default = String::new())]
    pub placeholder: String,
    #[props(default = false)]
    pub readonly: bool,
    #[props(default = false)]
    pub required: bool,
    #[props(default = None)]
    pub error: Option<String>,
    pub oninput: EventHandler<String>,
}

/// Labelled text input with an inline error
#[component]
pub fn Input(props: InputProps) -> Element {
    rsx! {
        div {
            FieldLabel { label: props.label.clone(), required: props.required }
            input {
                r#type: "{props.input_type}",
                class: field_class(props.error.is_some()),
                value: "{props.value}",
                placeholder: "{props.placeholder}",
                readonly: props.readonly,
                required: props.required,
                oninput: move |evt| props.oninput.call(evt.value())
            }
            if let Some(error) = &props.error {
                ErrorMessage { message: error.clone() }
            }
        }
    }
}

/// Props for the TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub label: String,
    pub value: String,
    #[props(default = String::new())]
    pub placeholder: String,
    #[props(default = 4)]
    pub rows: u32,
    #[props(default = false)]
    pub readonly: bool,
    #[props(default = false)]
    pub required: bool,
    /// Monospaced, for configuration text
    #[props(default = false)]
    pub code: bool,
    #[props(default = None)]
    pub error: Option<String>,
    pub oninput: EventHandler<String>,
}

#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = if props.code {
        format!("{} font-mono text-xs", field_class(props.error.is_some()))
    } else {
        field_class(props.error.is_some())
    };

    rsx! {
        div {
            FieldLabel { label: props.label.clone(), required: props.required }
            textarea {
                class: "{class}",
                value: "{props.value}",
                placeholder: "{props.placeholder}",
                rows: "{props.rows}",
                readonly: props.readonly,
                required: props.required,
                oninput: move |evt| props.oninput.call(evt.value())
            }
            if let Some(error) = &props.error {
                ErrorMessage { message: error.clone() }
            }
        }
    }
}

/// Props for the Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    pub label: String,
    pub value: String,
    /// (value, label) pairs
    pub options: Vec<(String, String)>,
    #[props(default = false)]
    pub readonly: bool,
    #[props(default = false)]
    pub required: bool,
    #[props(default = None)]
    pub error: Option<String>,
    pub onchange: EventHandler<String>,
}

#[component]
pub fn Select(props: SelectProps) -> Element {
    rsx! {
        div {
            if !props.label.is_empty() {
                FieldLabel { label: props.label.clone(), required: props.required }
            }
            select {
                class: field_class(props.error.is_some()),
                value: "{props.value}",
                disabled: props.readonly,
                required: props.required,
                onchange: move |evt| props.onchange.call(evt.value()),
                for (value, label) in props.options.iter() {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: *value == props.value,
                        "{label}"
                    }
                }
            }
            if let Some(error) = &props.error {
                ErrorMessage { message: error.clone() }
            }
        }
    }
}

/// Props for the Checkbox component
#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub label: String,
    pub checked: bool,
    #[props(default = false)]
    pub readonly: bool,
    pub onchange: EventHandler<bool>,
}

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        label { class: "inline-flex items-center space-x-2 text-sm text-gray-700",
            input {
                r#type: "checkbox",
                class: "h-4 w-4 rounded border-gray-300 text-teal-600 focus:ring-teal-500",
                checked: props.checked,
                disabled: props.readonly,
                onchange: move |evt| props.onchange.call(evt.checked())
            }
            span { "{props.label}" }
        }
    }
}

/// Props for the Button component
#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    pub children: Element,
    /// primary, secondary, danger, success
    #[props(default = "primary".to_string())]
    pub variant: String,
    /// small, medium
    #[props(default = "medium".to_string())]
    pub size: String,
    #[props(default = false)]
    pub disabled: bool,
    /// button, submit, reset
    #[props(default = "button".to_string())]
    pub button_type: String,
    #[props(default = EventHandler::default())]
    pub onclick: EventHandler<MouseEvent>,
}

fn button_class(variant: &str, size: &str) -> String {
    let tone = match variant {
        "secondary" => "bg-white text-gray-700 border border-gray-300 hover:bg-gray-50 focus:ring-teal-500",
        "danger" => "bg-red-600 text-white hover:bg-red-700 focus:ring-red-500",
        "success" => "bg-green-600 text-white hover:bg-green-700 focus:ring-green-500",
        _ => "bg-teal-600 text-white hover:bg-teal-700 focus:ring-teal-500",
    };
    let padding = if size == "small" { "px-2.5 py-1.5 text-xs" } else { "px-4 py-2 text-sm" };
    format!(
        "inline-flex items-center justify-center rounded-md font-medium shadow-sm focus:outline-none focus:ring-2 focus:ring-offset-2 disabled:opacity-50 disabled:cursor-not-allowed {tone} {padding}"
    )
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let disabled = props.disabled;

    rsx! {
        button {
            r#type: "{props.button_type}",
            class: button_class(&props.variant, &props.size),
            disabled,
            onclick: move |evt| {
                if !disabled {
                    props.onclick.call(evt)
                }
            },
            {props.children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_class_marks_errors() {
        assert!(field_class(true).contains("border-red-300"));
        assert!(field_class(false).contains("border-gray-300"));
    }

    #[test]
    fn test_button_class_variants() {
        assert!(button_class("danger", "medium").contains("bg-red-600"));
        assert!(button_class("unknown", "small").contains("bg-teal-600"));
        assert!(button_class("secondary", "small").contains("px-2.5"));
    }
}
