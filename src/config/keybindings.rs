use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub theme: KeyBinding,
    pub focus_next: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchKeybindings {
    pub toggle: KeyBinding,
    pub exit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductsKeybindings {
    pub edit: KeyBinding,
    pub new: KeyBinding,
    pub delete: KeyBinding,
    pub reload: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormKeybindings {
    pub submit: KeyBinding,
    pub reset: KeyBinding,
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub leave: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub search: SearchKeybindings,
    pub products: ProductsKeybindings,
    pub form: FormKeybindings,
    pub dialog: DialogKeybindings,
}

fn keys(codes: &[KeyCode]) -> KeyBinding {
    KeyBinding::multiple(codes.iter().map(|c| Key::new(*c)).collect())
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            theme: Key::new(KeyCode::Char('t')).into(),
            focus_next: Key::new(KeyCode::Tab).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: keys(&[KeyCode::Char('k'), KeyCode::Up]),
            down: keys(&[KeyCode::Char('j'), KeyCode::Down]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: keys(&[KeyCode::Char('g'), KeyCode::Home]),
            end: keys(&[KeyCode::Char('G'), KeyCode::End]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: Key::new(KeyCode::Char('/')).into(),
            exit: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for ProductsKeybindings {
    fn default() -> Self {
        Self {
            edit: keys(&[KeyCode::Char('e'), KeyCode::Enter]),
            new: Key::new(KeyCode::Char('n')).into(),
            delete: keys(&[KeyCode::Char('d'), KeyCode::Delete]),
            reload: Key::new(KeyCode::Char('r')).into(),
        }
    }
}

impl Default for FormKeybindings {
    fn default() -> Self {
        Self {
            submit: Key::new(KeyCode::Enter).into(),
            reset: Key::ctrl(KeyCode::Char('r')).into(),
            next_field: keys(&[KeyCode::Tab, KeyCode::Down]),
            prev_field: keys(&[KeyCode::BackTab, KeyCode::Up]),
            leave: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            confirm: keys(&[KeyCode::Char('y'), KeyCode::Char('Y'), KeyCode::Enter]),
            cancel: keys(&[KeyCode::Char('n'), KeyCode::Char('N'), KeyCode::Esc]),
            dismiss: keys(&[KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q')]),
        }
    }
}
