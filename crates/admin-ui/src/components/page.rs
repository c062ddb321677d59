//! Building blocks shared by the management pages

use dioxus::prelude::*;

use super::forms::Button;
use super::modal::Modal;

/// Title card at the top of a page; children go to the right (usually buttons).
#[component]
pub fn PageHeader(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div { class: "bg-white shadow rounded-lg",
            div { class: "px-4 py-5 sm:p-6 sm:flex sm:items-center sm:justify-between",
                div {
                    h3 { class: "text-lg leading-6 font-medium text-gray-900", "{title}" }
                    p { class: "mt-1 text-sm text-gray-500", "{subtitle}" }
                }
                div { class: "mt-4 sm:mt-0 flex flex-wrap items-center gap-3", {children} }
            }
        }
    }
}

/// Props for the FormModal component
#[derive(Props, Clone, PartialEq)]
pub struct FormModalProps {
    pub show: bool,
    pub title: String,
    #[props(default = "保存".to_string())]
    pub save_label: String,
    #[props(default = "sm:max-w-lg".to_string())]
    pub width: String,
    pub on_save: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
    pub children: Element,
}

/// Add/edit dialog with cancel and save buttons
#[component]
pub fn FormModal(props: FormModalProps) -> Element {
    let on_save = props.on_save;
    let on_cancel = props.on_cancel;

    rsx! {
        Modal {
            show: props.show,
            title: props.title.clone(),
            width: props.width.clone(),
            onclose: move |_| on_cancel.call(()),
            form {
                class: "space-y-4",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_save.call(());
                },
                {props.children}
                div { class: "pt-2 flex justify-end space-x-3",
                    Button {
                        variant: "secondary".to_string(),
                        onclick: move |_| on_cancel.call(()),
                        "取消"
                    }
                    Button { button_type: "submit".to_string(), "{props.save_label}" }
                }
            }
        }
    }
}

/// Two-column grid for short form fields
#[component]
pub fn FieldGrid(children: Element) -> Element {
    rsx! {
        div { class: "grid grid-cols-1 gap-4 sm:grid-cols-2", {children} }
    }
}
