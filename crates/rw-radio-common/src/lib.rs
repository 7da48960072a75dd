//! Markup contract shared by the radio list transform and its runtime.
//!
//! The build-time transform (`rw-radio`) emits elements carrying the class
//! names and data attributes defined here, and the runtime controller
//! (`rw-radio-runtime`) queries and mutates exactly those. Neither side links
//! against the other; this crate is the whole contract.
//!
//! # Rendered structure
//!
//! ```html
//! <div class="rw-radio" data-rw-group="os">
//!   <div class="rw-radio-buttons" role="tablist">
//!     <div class="rw-radio-button active" role="tab" data-rw-id="linux"
//!          data-rw-key="linux" data-rw-active="true" aria-selected="true"
//!          aria-controls="p1" tabindex="0">Linux</div>
//!     <div class="rw-radio-button" role="tab" data-rw-id="macos"
//!          data-rw-key="macos" data-rw-active="false" aria-selected="false"
//!          aria-controls="p2" tabindex="-1">macOS</div>
//!   </div>
//!   <div class="rw-radio-panel active" role="tabpanel" id="p1" aria-labelledby="linux">…</div>
//!   <div class="rw-radio-panel" role="tabpanel" id="p2" aria-labelledby="macos">…</div>
//! </div>
//! ```

/// Class of the outer container of one construct instance.
pub const CONTAINER_CLASS: &str = "rw-radio";
/// Class of the wrapper holding the option headers.
pub const HEADER_LIST_CLASS: &str = "rw-radio-buttons";
/// Class of a single option header.
pub const HEADER_CLASS: &str = "rw-radio-button";
/// Class of a single option panel.
pub const PANEL_CLASS: &str = "rw-radio-panel";
/// Class toggled on the active header and panel.
pub const ACTIVE_CLASS: &str = "active";

/// Group identifier, set on the container.
pub const GROUP_ATTR: &str = "data-rw-group";
/// Normalized option key, set on each header.
pub const KEY_ATTR: &str = "data-rw-key";
/// Stable id, set on each header.
pub const ID_ATTR: &str = "data-rw-id";
/// Active flag (`"true"` / `"false"`), set on each header.
pub const ACTIVE_ATTR: &str = "data-rw-active";

/// ARIA role of the header list.
pub const ROLE_HEADER_LIST: &str = "tablist";
/// ARIA role of a header.
pub const ROLE_HEADER: &str = "tab";
/// ARIA role of a panel.
pub const ROLE_PANEL: &str = "tabpanel";

/// Prefix of auto-generated groups.
///
/// Constructs written without `group=` get a group made of this prefix and a
/// unique token. Events for such groups do not expose the group.
pub const DEFAULT_GROUP_PREFIX: &str = "rw-radio-group-";

/// Property of `window` holding the page's installed runtime.
///
/// Both the built-in script and the wasm binding check it so that only one
/// controller listens on a page.
pub const GLOBAL_NAME: &str = "__rwRadioController";

/// Check whether a group was generated rather than written by the author.
#[must_use]
pub fn is_default_group(group: &str) -> bool {
    group.starts_with(DEFAULT_GROUP_PREFIX)
}

/// Render an active flag as an attribute value.
#[must_use]
pub fn flag(active: bool) -> &'static str {
    if active { "true" } else { "false" }
}

/// Logical option: what external code selects and is notified about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioButton {
    /// Group scope. `None` in events for auto-generated groups.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub group: Option<String>,
    /// Normalized option key.
    pub key: String,
}

impl RadioButton {
    /// Create an option reference within a named group.
    #[must_use]
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            key: key.into(),
        }
    }

    /// Public form of this option: the group is dropped when it was generated.
    #[must_use]
    pub fn into_public(self) -> Self {
        match &self.group {
            Some(group) if is_default_group(group) => Self {
                group: None,
                key: self.key,
            },
            _ => self,
        }
    }
}

/// Payload delivered to selection subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SelectionEvent {
    /// The option that became active.
    pub radio_button: RadioButton,
    /// Stable id of the header the user interacted with, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub current_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_default_group() {
        assert!(is_default_group("rw-radio-group-3f2a"));
        assert!(!is_default_group("os"));
        assert!(!is_default_group(""));
    }

    #[test]
    fn test_into_public_drops_generated_group() {
        let button = RadioButton::new(format!("{DEFAULT_GROUP_PREFIX}abc"), "alpha");
        assert_eq!(
            button.into_public(),
            RadioButton {
                group: None,
                key: "alpha".to_owned(),
            }
        );
    }

    #[test]
    fn test_into_public_keeps_named_group() {
        let button = RadioButton::new("os", "linux");
        assert_eq!(button.clone().into_public(), button);
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(true), "true");
        assert_eq!(flag(false), "false");
    }
}
