//! Session-scoped key/value storage shared by the controllers.
//!
//! Lives for the lifetime of the viewer process and survives deck reloads.
//! Nothing here is written to disk.

use std::collections::HashMap;

pub const MODE_KEY: &str = "presentationAuth";
pub const LOCKOUT_KEY: &str = "authLockout";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Unset,
    Public,
    Admin,
}

impl SessionMode {
    fn stored(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Public => Some("public"),
            Self::Admin => Some("admin"),
        }
    }

    fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("public") => Self::Public,
            Some("admin") => Self::Admin,
            _ => Self::Unset,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    values: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn mode(&self) -> SessionMode {
        SessionMode::from_stored(self.get(MODE_KEY))
    }

    pub fn set_mode(&mut self, mode: SessionMode) {
        match mode.stored() {
            Some(value) => self.set(MODE_KEY, value),
            None => self.remove(MODE_KEY),
        }
    }

    /// Absolute lockout expiry in milliseconds since the Unix epoch.
    /// An unparsable stored value counts as no lockout.
    pub fn lockout_until(&self) -> Option<u64> {
        self.get(LOCKOUT_KEY).and_then(|v| v.parse().ok())
    }

    pub fn set_lockout_until(&mut self, expiry_ms: u64) {
        self.set(LOCKOUT_KEY, expiry_ms.to_string());
    }

    pub fn clear_lockout(&mut self) {
        self.remove(LOCKOUT_KEY);
    }
}
