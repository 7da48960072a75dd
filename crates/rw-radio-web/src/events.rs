//! Translation of browser events into runtime events.

use rw_radio_runtime::{DocumentEvent, Key};
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Element, Event};

use crate::document::{WebDocument, WebNode};

/// Map a `KeyboardEvent.key` value.
pub fn key_from_name(name: &str) -> Key {
    match name {
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        other => Key::Other(other.to_owned()),
    }
}

/// Events dispatched by page scripts as `CustomEvent`s rather than by the
/// user.
pub fn is_synthetic(event: &Event) -> bool {
    event.is_instance_of::<CustomEvent>()
}

/// Element the event was dispatched on. Text nodes and the window yield
/// nothing.
fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn click(doc: &WebDocument, event: &Event) -> Option<DocumentEvent<WebNode>> {
    let target = doc.node(target_element(event)?);
    Some(DocumentEvent {
        synthetic: is_synthetic(event),
        ..DocumentEvent::click(target)
    })
}

pub(crate) fn key_down(
    doc: &WebDocument,
    event: &Event,
    key: &str,
) -> Option<DocumentEvent<WebNode>> {
    let key = key_from_name(key);
    // Only arrows move the selection; skip interning targets of typing.
    if matches!(key, Key::Other(_)) {
        return None;
    }
    let target = doc.node(target_element(event)?);
    Some(DocumentEvent {
        synthetic: is_synthetic(event),
        ..DocumentEvent::key_down(target, key)
    })
}
