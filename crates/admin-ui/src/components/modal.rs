//! Modal dialogs
//!
//! A dimmed backdrop closes the dialog; clicks inside the panel stop there.

use dioxus::prelude::*;

use super::forms::Button;

/// Props for the Modal component
#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    pub show: bool,
    pub title: String,
    /// Tailwind max-width class of the panel
    #[props(default = "sm:max-w-lg".to_string())]
    pub width: String,
    pub onclose: EventHandler<()>,
    pub children: Element,
}

#[component]
pub fn Modal(props: ModalProps) -> Element {
    if !props.show {
        return rsx! {};
    }
    let onclose = props.onclose;

    rsx! {
        div {
            class: "fixed inset-0 bg-gray-500 bg-opacity-75 transition-opacity z-40",
            onclick: move |_| onclose.call(()),
        }
        div {
            class: "fixed inset-0 z-50 overflow-y-auto",
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    onclose.call(());
                }
            },
            onclick: move |_| onclose.call(()),
            div { class: "flex min-h-full items-end justify-center p-4 text-center sm:items-center sm:p-0",
                div {
                    class: "relative transform overflow-hidden rounded-lg bg-white text-left shadow-xl transition-all sm:my-8 sm:w-full {props.width}",
                    role: "dialog",
                    "aria-modal": "true",
                    onclick: move |evt| evt.stop_propagation(),
                    div { class: "flex items-center justify-between px-4 pt-5 pb-3 sm:px-6 border-b",
                        h3 { class: "text-lg font-medium leading-6 text-gray-900", "{props.title}" }
                        button {
                            r#type: "button",
                            class: "p-1 rounded-md text-gray-400 hover:text-gray-600",
                            "aria-label": "关闭",
                            onclick: move |_| onclose.call(()),
                            "✕"
                        }
                    }
                    div { class: "px-4 py-4 sm:px-6", {props.children} }
                }
            }
        }
    }
}

/// Props for the ConfirmDialog component
#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDialogProps {
    pub show: bool,
    #[props(default = "请确认".to_string())]
    pub title: String,
    pub message: String,
    #[props(default = "确认".to_string())]
    pub confirm_label: String,
    /// Styles the confirm button as destructive
    #[props(default = true)]
    pub danger: bool,
    pub on_confirm: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// Yes/no question asked before destructive actions
#[component]
pub fn ConfirmDialog(props: ConfirmDialogProps) -> Element {
    let on_confirm = props.on_confirm;
    let on_cancel = props.on_cancel;

    rsx! {
        Modal {
            show: props.show,
            title: props.title.clone(),
            width: "sm:max-w-md".to_string(),
            onclose: move |_| on_cancel.call(()),
            p { class: "text-sm text-gray-600", "{props.message}" }
            div { class: "mt-6 flex justify-end space-x-3",
                Button {
                    variant: "secondary".to_string(),
                    onclick: move |_| on_cancel.call(()),
                    "取消"
                }
                Button {
                    variant: if props.danger { "danger".to_string() } else { "primary".to_string() },
                    onclick: move |_| on_confirm.call(()),
                    "{props.confirm_label}"
                }
            }
        }
    }
}
