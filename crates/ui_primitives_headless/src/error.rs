//! Error type shared by every headless primitive.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Integration mistakes reported by primitive roots and role elements.
///
/// None of these are end-user conditions. They surface wiring or usage errors that the host layer
/// either panics on (`OutsideRoot`) or logs and ignores.
pub enum PrimitiveError {
    /// A role element was used without its owning root as an ancestor.
    #[error("`{role}` must be used within `{root}`")]
    OutsideRoot {
        /// Role element that looked up the coordination cell.
        role: &'static str,
        /// Root primitive expected above it.
        root: &'static str,
    },
    /// An external value was pushed into an instance created uncontrolled.
    #[error("`{primitive}` was created uncontrolled and ignores external values")]
    ModeSwitch {
        /// Primitive that rejected the value.
        primitive: &'static str,
    },
    /// A registry already holds an entry for this value.
    #[error("value `{value}` is already registered")]
    DuplicateValue {
        /// Duplicated registry key.
        value: String,
    },
    /// No registry entry exists for this value.
    #[error("value `{value}` is not registered")]
    UnknownValue {
        /// Missing registry key.
        value: String,
    },
    /// The registry entry exists but cannot be selected.
    #[error("value `{value}` is disabled")]
    DisabledValue {
        /// Disabled registry key.
        value: String,
    },
    /// Host-supplied defaults failed to parse.
    #[error("invalid primitive defaults: {0}")]
    Config(String),
}
