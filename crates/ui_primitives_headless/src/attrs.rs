//! Attribute bags computed for role elements.
//!
//! Hosts that render their own element ("graft" mode) apply an [`AttrMap`] verbatim; the default
//! wrappers in `system_ui` read individual keys from the same map.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Values of the `data-state` styling/test hook.
pub enum DataState {
    /// Disclosure content is shown.
    Open,
    /// Disclosure content is hidden.
    Closed,
    /// Tab trigger or panel is selected.
    Active,
    /// Tab trigger or panel is not selected.
    Inactive,
    /// Switch is on.
    Checked,
    /// Switch is off.
    Unchecked,
}

impl DataState {
    /// Returns the attribute token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
        }
    }

    /// Maps a disclosure flag to `open`/`closed`.
    pub const fn disclosure(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    /// Maps a selection flag to `active`/`inactive`.
    pub const fn selection(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Ordered attribute name/value list for one element.
pub struct AttrMap(Vec<(String, String)>);

impl AttrMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// Builder form of [`AttrMap::set`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` only when `value` is present.
    pub fn with_opt(mut self, name: &str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Sets a boolean attribute (`name=""`) when `present` is true.
    pub fn with_flag(mut self, name: &str, present: bool) -> Self {
        if present {
            self.set(name, "");
        }
        self
    }

    /// Sets `data-state`.
    pub fn with_state(self, state: DataState) -> Self {
        self.with("data-state", state.token())
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` when `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
