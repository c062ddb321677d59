//! Row action dropdown
//!
//! Opens from its trigger button and closes when an item is chosen, when the
//! pointer lands anywhere outside (a transparent full-screen backdrop catches
//! it) or on Escape. Arrow keys, Home and End move the highlight; Enter or
//! Space picks the highlighted item.

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub danger: bool,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            danger: false,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

/// Keys the menu reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Home,
    End,
    Activate,
    Escape,
}

impl MenuKey {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(MenuKey::Up),
            Key::ArrowDown => Some(MenuKey::Down),
            Key::Home => Some(MenuKey::Home),
            Key::End => Some(MenuKey::End),
            Key::Enter => Some(MenuKey::Activate),
            Key::Escape => Some(MenuKey::Escape),
            Key::Character(text) if text == " " => Some(MenuKey::Activate),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Unchanged,
    Moved,
    Opened,
    Closed,
    Selected(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
    pub highlighted: Option<usize>,
}

impl MenuState {
    /// Pointer toggle on the trigger; nothing is highlighted.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.highlighted = None;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    /// Closes the menu and hands back the chosen key.
    pub fn select(&mut self, key: &str) -> MenuOutcome {
        self.close();
        MenuOutcome::Selected(key.to_owned())
    }

    pub fn handle_key(&mut self, key: MenuKey, items: &[MenuItem]) -> MenuOutcome {
        if !self.open {
            return match key {
                MenuKey::Down | MenuKey::Up | MenuKey::Activate => {
                    self.open = true;
                    self.highlighted = match key {
                        MenuKey::Up => items.len().checked_sub(1),
                        _ if items.is_empty() => None,
                        _ => Some(0),
                    };
                    MenuOutcome::Opened
                }
                _ => MenuOutcome::Unchanged,
            };
        }

        let last = match items.len().checked_sub(1) {
            Some(last) => last,
            None => {
                self.close();
                return MenuOutcome::Closed;
            }
        };
        match key {
            MenuKey::Down => {
                self.highlighted = Some(match self.highlighted {
                    Some(index) if index < last => index + 1,
                    Some(_) => 0,
                    None => 0,
                });
                MenuOutcome::Moved
            }
            MenuKey::Up => {
                self.highlighted = Some(match self.highlighted {
                    Some(index) if index > 0 => index - 1,
                    _ => last,
                });
                MenuOutcome::Moved
            }
            MenuKey::Home => {
                self.highlighted = Some(0);
                MenuOutcome::Moved
            }
            MenuKey::End => {
                self.highlighted = Some(last);
                MenuOutcome::Moved
            }
            MenuKey::Activate => match self.highlighted.and_then(|index| items.get(index)) {
                Some(item) => self.select(&item.key),
                None => MenuOutcome::Unchanged,
            },
            MenuKey::Escape => {
                self.close();
                MenuOutcome::Closed
            }
        }
    }
}

/// Props for the ActionMenu component
#[derive(Props, Clone, PartialEq)]
pub struct ActionMenuProps {
    pub items: Vec<MenuItem>,
    /// Receives the key of the chosen item
    pub on_select: EventHandler<String>,
    /// Accessible name of the trigger button
    #[props(default = "操作".to_string())]
    pub label: String,
}

#[component]
pub fn ActionMenu(props: ActionMenuProps) -> Element {
    let mut state = use_signal(MenuState::default);
    let on_select = props.on_select;
    let current = state();
    let key_items = props.items.clone();

    rsx! {
        div {
            class: "relative inline-block text-left",
            onkeydown: move |evt: KeyboardEvent| {
                let Some(key) = MenuKey::from_key(&evt.key()) else {
                    return;
                };
                evt.prevent_default();
                let outcome = state.write().handle_key(key, &key_items);
                if let MenuOutcome::Selected(chosen) = outcome {
                    on_select.call(chosen);
                }
            },

            button {
                r#type: "button",
                class: "p-1.5 rounded-md text-gray-500 hover:text-gray-700 hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-blue-500",
                "aria-haspopup": "menu",
                "aria-expanded": "{current.open}",
                "aria-label": "{props.label}",
                onclick: move |_| state.write().toggle(),
                "⋯"
            }

            if current.open {
                // Outside clicks land on this backdrop
                div {
                    class: "fixed inset-0 z-10",
                    onclick: move |_| state.write().close(),
                }
                div {
                    class: "absolute right-0 z-20 mt-1 w-44 origin-top-right rounded-md bg-white shadow-lg ring-1 ring-black ring-opacity-5 py-1",
                    role: "menu",
                    for (index, item) in props.items.iter().enumerate() {
                        button {
                            key: "{item.key}",
                            r#type: "button",
                            role: "menuitem",
                            class: format!(
                                "flex w-full items-center px-4 py-2 text-sm {} {}",
                                if item.danger { "text-red-600 hover:bg-red-50" } else { "text-gray-700 hover:bg-gray-50" },
                                if current.highlighted == Some(index) { "bg-gray-100" } else { "" }
                            ),
                            onclick: {
                                let chosen = item.key.clone();
                                move |_| {
                                    on_select.call(chosen.clone());
                                    state.write().close();
                                }
                            },
                            if let Some(icon) = &item.icon {
                                span { class: "mr-2", "{icon}" }
                            }
                            "{item.label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("edit", "编辑").icon("✏️"),
            MenuItem::new("toggle", "停用"),
            MenuItem::new("delete", "删除").danger(),
        ]
    }

    #[test]
    fn test_pointer_toggle() {
        let mut state = MenuState::default();
        state.toggle();
        assert!(state.open);
        assert_eq!(state.highlighted, None);
        state.toggle();
        assert_eq!(state, MenuState::default());
    }

    #[test]
    fn test_keyboard_open_highlights_first() {
        let mut state = MenuState::default();
        assert_eq!(state.handle_key(MenuKey::Down, &items()), MenuOutcome::Opened);
        assert_eq!(state.highlighted, Some(0));
        assert_eq!(state.handle_key(MenuKey::Escape, &items()), MenuOutcome::Closed);
        assert!(!state.open);
    }

    #[test]
    fn test_arrows_wrap() {
        let items = items();
        let mut state = MenuState {
            open: true,
            highlighted: None,
        };
        state.handle_key(MenuKey::Up, &items);
        assert_eq!(state.highlighted, Some(2));
        state.handle_key(MenuKey::Down, &items);
        assert_eq!(state.highlighted, Some(0));
        state.handle_key(MenuKey::End, &items);
        state.handle_key(MenuKey::Down, &items);
        assert_eq!(state.highlighted, Some(0));
        state.handle_key(MenuKey::Home, &items);
        state.handle_key(MenuKey::Up, &items);
        assert_eq!(state.highlighted, Some(2));
    }

    #[test]
    fn test_enter_selects_and_closes() {
        let items = items();
        let mut state = MenuState::default();
        state.handle_key(MenuKey::Activate, &items);
        state.handle_key(MenuKey::Down, &items);
        assert_eq!(
            state.handle_key(MenuKey::Activate, &items),
            MenuOutcome::Selected("toggle".to_owned())
        );
        assert!(!state.open);
    }

    #[test]
    fn test_activate_without_highlight_does_nothing() {
        let mut state = MenuState::default();
        state.toggle();
        assert_eq!(state.handle_key(MenuKey::Activate, &items()), MenuOutcome::Unchanged);
        assert!(state.open);
    }

    #[test]
    fn test_escape_when_closed_is_ignored() {
        let mut state = MenuState::default();
        assert_eq!(state.handle_key(MenuKey::Escape, &items()), MenuOutcome::Unchanged);
        assert!(!state.open);
    }

    #[test]
    fn test_empty_menu_closes_on_any_key() {
        let mut state = MenuState::default();
        assert_eq!(state.handle_key(MenuKey::Down, &[]), MenuOutcome::Opened);
        assert_eq!(state.highlighted, None);
        assert_eq!(state.handle_key(MenuKey::Down, &[]), MenuOutcome::Closed);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(MenuKey::from_key(&Key::ArrowDown), Some(MenuKey::Down));
        assert_eq!(MenuKey::from_key(&Key::Character(" ".to_owned())), Some(MenuKey::Activate));
        assert_eq!(MenuKey::from_key(&Key::Character("a".to_owned())), None);
        assert_eq!(MenuKey::from_key(&Key::Tab), None);
    }
}
