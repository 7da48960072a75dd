//! Browser binding of the radio list selection runtime.
//!
//! [`WebDocument`] implements [`DocumentTree`](rw_radio_runtime::DocumentTree)
//! over the live DOM, and [`RadioRuntime`] forwards the document's `click`
//! and `keydown` events into a
//! [`RuntimeContext`](rw_radio_runtime::RuntimeContext). Loading the module
//! installs one runtime per page and publishes it on `window` under
//! [`GLOBAL_NAME`](rw_radio_common::GLOBAL_NAME), next to `selectByStableId`,
//! `select` and `subscribe`.
//!
//! This crate targets `wasm32-unknown-unknown`. Event translation is plain
//! Rust and is tested natively; the DOM layer is tested in a browser with
//! `wasm-pack test`.

mod document;
mod events;
mod runtime;

pub use document::{WebDocument, WebNode};
pub use events::{is_synthetic, key_from_name};
pub use runtime::{RadioRuntime, install};
