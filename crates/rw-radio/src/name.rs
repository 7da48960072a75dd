//! Option names: display text, custom anchors and keys.
//!
//! An option name may carry a custom anchor, `Label {#anchor}` or
//! `Label [{#anchor}]`. The anchor is removed from the displayed label and,
//! when present, replaces the label as the seed for the stable id and key.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

static CUSTOM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[?\{ ?#(\S+) ?\}\]?").unwrap());

/// Characters left unescaped by URI component encoding: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// An option name split into label and custom anchor.
#[derive(Debug, PartialEq, Eq)]
pub struct OptionName<'a> {
    /// Text shown in the option header.
    pub label: String,
    /// Custom anchor target, if the name had one.
    pub anchor: Option<&'a str>,
    raw: &'a str,
}

impl<'a> OptionName<'a> {
    /// Split a raw option name.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match CUSTOM_ID_RE.captures(raw) {
            Some(caps) => {
                let directive = caps.get(0).map_or("", |m| m.as_str());
                Self {
                    label: raw.replacen(directive, "", 1).trim().to_owned(),
                    anchor: caps.get(1).map(|m| m.as_str()),
                    raw,
                }
            }
            None => Self {
                label: raw.to_owned(),
                anchor: None,
                raw,
            },
        }
    }

    /// Seed for the stable id and key: the anchor, or the whole raw name.
    #[must_use]
    pub fn id_seed(&self) -> &'a str {
        self.anchor.unwrap_or(self.raw)
    }

    /// Key correlating this option across construct instances.
    ///
    /// URI-component encoding of the lowercased id seed, with lowercase hex
    /// escapes, so `Alpha` and `alpha` (and `Ü` and `ü`) share a key.
    #[must_use]
    pub fn key(&self) -> String {
        utf8_percent_encode(&self.id_seed().to_lowercase(), URI_COMPONENT_SET)
            .to_string()
            .to_lowercase()
    }
}
