//! Selection runtime for radio lists.
//!
//! Radio lists rendered by `rw-radio` are plain markup: a container, a
//! header list and one panel per option. This crate keeps them interactive.
//! A [`SelectionController`] reacts to clicks and arrow keys on headers,
//! activates the chosen option in every list of the same group, keeps the
//! clicked header in place on screen and notifies subscribers.
//!
//! The controller talks to the document only through [`DocumentTree`], so
//! the same logic runs against a browser binding or against
//! [`MemoryDocument`] in tests.
//!
//! # Example
//!
//! ```
//! use rw_radio_common::RadioButton;
//! use rw_radio_runtime::{DocumentTree, MemoryDocument, RuntimeContext};
//!
//! let mut doc = MemoryDocument::new();
//! let container = doc.append(doc.root(), "div");
//! doc.set_attr(container, "class", "rw-radio");
//! doc.set_attr(container, "data-rw-group", "os");
//! let list = doc.append(container, "div");
//! doc.set_attr(list, "class", "rw-radio-buttons");
//! for key in ["linux", "macos"] {
//!     let header = doc.append(list, "div");
//!     doc.set_attr(header, "class", "rw-radio-button");
//!     doc.set_attr(header, "data-rw-id", key);
//!     doc.set_attr(header, "data-rw-key", key);
//! }
//!
//! let mut context = RuntimeContext::new(doc);
//! context.install();
//! assert_eq!(context.select(&RadioButton::new("os", "macos")), 1);
//! ```

mod context;
mod controller;
mod memory;
mod tree;

pub use context::RuntimeContext;
pub use controller::{
    DocumentEvent, EventKind, Key, SelectByIdOptions, SelectionController, SubscriptionId,
};
pub use memory::{MemoryDocument, NodeId};
pub use tree::{DocumentTree, ElementOffset};
