//! Platform abstraction layer
//!
//! The simulation talks to the host only through these seams:
//! - [`InputSource`]: which rotate actions are held
//! - [`Effects`]: fire-and-forget audio and door visual requests
//!
//! [`KeyboardState`] and [`EffectLog`] are ready-made host-side implementations.

use std::collections::{HashMap, HashSet};

/// Named input actions the lock understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RotateLeft,
    RotateRight,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::RotateLeft => "LEFT",
            Action::RotateRight => "RIGHT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "LEFT" => Some(Action::RotateLeft),
            "RIGHT" => Some(Action::RotateRight),
            _ => None,
        }
    }
}

/// Query for held actions, sampled once per tick
pub trait InputSource {
    fn is_action_active(&self, action: Action) -> bool;

    /// Look up an action by its name ("LEFT" / "RIGHT")
    fn is_named_action_active(&self, name: &str) -> bool {
        Action::from_name(name).is_some_and(|action| self.is_action_active(action))
    }
}

/// Side effects the simulation requests from the host
pub trait Effects {
    fn request_click_sound(&mut self);
    fn request_door_sound(&mut self);
    fn request_visual_state(&mut self, door_open: bool);
}

/// Held keys mapped to actions
#[derive(Debug, Clone)]
pub struct KeyboardState {
    bindings: HashMap<String, Action>,
    pressed: HashSet<String>,
}

impl Default for KeyboardState {
    /// A / ArrowLeft rotate left, D / ArrowRight rotate right
    fn default() -> Self {
        let mut keyboard = Self {
            bindings: HashMap::new(),
            pressed: HashSet::new(),
        };
        for key in ["KeyA", "ArrowLeft"] {
            keyboard.bind(key, Action::RotateLeft);
        }
        for key in ["KeyD", "ArrowRight"] {
            keyboard.bind(key, Action::RotateRight);
        }
        keyboard
    }
}

impl KeyboardState {
    /// Empty keyboard with no bindings
    pub fn unbound() -> Self {
        Self {
            bindings: HashMap::new(),
            pressed: HashSet::new(),
        }
    }

    pub fn bind(&mut self, key: &str, action: Action) {
        self.bindings.insert(key.to_string(), action);
    }

    pub fn key_down(&mut self, key: &str) {
        self.pressed.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(key);
    }

    /// Drop all held keys (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_action_active(&self, action: Action) -> bool {
        self.pressed
            .iter()
            .any(|key| self.bindings.get(key) == Some(&action))
    }
}

/// A recorded side-effect request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectRequest {
    ClickSound,
    DoorSound,
    VisualState { door_open: bool },
}

/// Effects sink that records every request in order
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    pub requests: Vec<EffectRequest>,
}

impl EffectLog {
    /// Take all recorded requests
    pub fn drain(&mut self) -> Vec<EffectRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl Effects for EffectLog {
    fn request_click_sound(&mut self) {
        self.requests.push(EffectRequest::ClickSound);
    }

    fn request_door_sound(&mut self) {
        self.requests.push(EffectRequest::DoorSound);
    }

    fn request_visual_state(&mut self, door_open: bool) {
        self.requests.push(EffectRequest::VisualState { door_open });
    }
}
