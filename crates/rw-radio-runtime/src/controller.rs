//! Selection state of radio lists in a live document.

use std::borrow::Cow;

use rw_radio_common::{
    ACTIVE_ATTR, ACTIVE_CLASS, CONTAINER_CLASS, GROUP_ATTR, HEADER_CLASS, HEADER_LIST_CLASS,
    ID_ATTR, KEY_ATTR, PANEL_CLASS, RadioButton, SelectionEvent, flag,
};

use crate::tree::{DocumentTree, ElementOffset};

/// Keyboard key of a [`DocumentEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown(Key),
}

/// A user interaction delivered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentEvent<N> {
    pub kind: EventKind,
    pub target: N,
    /// Dispatched by script rather than by the user. Ignored.
    pub synthetic: bool,
}

impl<N> DocumentEvent<N> {
    pub fn click(target: N) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            synthetic: false,
        }
    }

    pub fn key_down(target: N, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown(key),
            target,
            synthetic: false,
        }
    }
}

/// Options of [`SelectionController::select_by_stable_id`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectByIdOptions {
    /// Scroll the header into view after selecting it.
    pub scroll_to_element: bool,
}

/// Handle returned by [`SelectionController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&SelectionEvent)>;

enum Direction {
    Left,
    Right,
}

/// Keeps radio lists of a document in sync.
///
/// Selecting an option activates it in every radio list of its group and
/// notifies subscribers when anything changed. Handlers run synchronously in
/// subscription order; a panicking handler unwinds through the caller and
/// later handlers are not called.
///
/// The controller does not hold the document. Every operation takes it, so
/// the owner ([`RuntimeContext`](crate::RuntimeContext)) decides its lifetime.
#[derive(Default)]
pub struct SelectionController {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selection handler.
    pub fn subscribe(&mut self, handler: impl FnMut(&SelectionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    /// Select the option whose header has stable id `id`.
    ///
    /// Unknown ids and headers outside a radio list are ignored. Returns the
    /// number of headers that became active.
    pub fn select_by_stable_id<D: DocumentTree>(
        &mut self,
        doc: &mut D,
        id: &str,
        options: SelectByIdOptions,
    ) -> usize {
        let Some(target) = doc
            .find_by_class(HEADER_CLASS)
            .into_iter()
            .find(|&header| doc.attr(header, ID_ATTR).as_deref() == Some(id))
            .filter(|&header| is_header(doc, header))
        else {
            tracing::trace!(id, "No radio header with this id");
            return 0;
        };

        let changed = header_option(doc, target)
            .map_or(0, |option| self.select_from(doc, &option, Some(target)));

        if options.scroll_to_element {
            doc.scroll_into_view(target);
        }
        changed
    }

    /// Activate `option` in every radio list of its group.
    ///
    /// Returns the number of headers that became active; zero when the
    /// option is already active everywhere or has no group.
    pub fn select<D: DocumentTree>(&mut self, doc: &mut D, option: &RadioButton) -> usize {
        self.select_from(doc, option, None)
    }

    /// React to a click or key press. Returns the number of headers that
    /// became active.
    pub fn handle_event<D: DocumentTree>(
        &mut self,
        doc: &mut D,
        event: &DocumentEvent<D::Node>,
    ) -> usize {
        if event.synthetic || !is_header(doc, event.target) {
            tracing::trace!(node = ?event.target, "Ignored event");
            return 0;
        }
        match &event.kind {
            EventKind::Click => header_option(doc, event.target)
                .map_or(0, |option| self.select_from(doc, &option, Some(event.target))),
            EventKind::KeyDown(Key::ArrowLeft) => self.step(doc, event.target, &Direction::Left),
            EventKind::KeyDown(Key::ArrowRight) => self.step(doc, event.target, &Direction::Right),
            EventKind::KeyDown(Key::Other(_)) => 0,
        }
    }

    /// Move to the neighbouring header of the same list, wrapping around.
    fn step<D: DocumentTree>(
        &mut self,
        doc: &mut D,
        current: D::Node,
        direction: &Direction,
    ) -> usize {
        let Some(list) = doc.closest(current, HEADER_LIST_CLASS) else {
            return 0;
        };
        let headers: Vec<D::Node> = doc
            .children_with_class(list, HEADER_CLASS)
            .into_iter()
            .filter(|&header| doc.attr(header, KEY_ATTR).is_some())
            .collect();
        let Some(position) = headers.iter().position(|&header| header == current) else {
            return 0;
        };
        if headers.len() <= 1 {
            return 0;
        }
        let next = match direction {
            Direction::Left => (position + headers.len() - 1) % headers.len(),
            Direction::Right => (position + 1) % headers.len(),
        };
        let target = headers[next];
        let changed = header_option(doc, target)
            .map_or(0, |option| self.select_from(doc, &option, Some(target)));
        doc.focus(target);
        changed
    }

    fn select_from<D: DocumentTree>(
        &mut self,
        doc: &mut D,
        option: &RadioButton,
        target: Option<D::Node>,
    ) -> usize {
        let Some(group) = option.group.as_deref() else {
            tracing::trace!(key = %option.key, "Ignored selection without group");
            return 0;
        };

        let anchor = target.and_then(|target| {
            let scroller = doc.closest_scrollable(target)?;
            Some((target, scroller, doc.offset_within(target, scroller)))
        });

        let changed = update(doc, group, &option.key, target);
        tracing::debug!(group, key = %option.key, changed, "Radio selection");
        if changed == 0 {
            return 0;
        }

        let current_id =
            target.and_then(|target| doc.attr(target, ID_ATTR).map(Cow::into_owned));
        self.notify(&SelectionEvent {
            radio_button: option.clone().into_public(),
            current_id,
        });

        if let Some((target, scroller, before)) = anchor {
            restore_position(doc, target, scroller, before);
        }
        changed
    }

    fn notify(&mut self, event: &SelectionEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

/// Activate the header keyed `key` in every list of `group`.
///
/// In each list the chosen header is `target` when the list contains it,
/// otherwise the first header with the key. Lists where the chosen header is
/// already active are left alone.
fn update<D: DocumentTree>(doc: &mut D, group: &str, key: &str, target: Option<D::Node>) -> usize {
    let lists: Vec<D::Node> = doc
        .find_by_class(CONTAINER_CLASS)
        .into_iter()
        .filter(|&container| doc.attr(container, GROUP_ATTR).as_deref() == Some(group))
        .flat_map(|container| doc.children_with_class(container, HEADER_LIST_CLASS))
        .collect();

    let mut changed = 0;
    for list in lists {
        let headers = doc.children_with_class(list, HEADER_CLASS);
        let chosen = target
            .filter(|target| headers.contains(target))
            .or_else(|| {
                headers
                    .iter()
                    .copied()
                    .find(|&header| doc.attr(header, KEY_ATTR).as_deref() == Some(key))
            });
        let Some(chosen) = chosen.filter(|&header| is_header(doc, header)) else {
            continue;
        };
        if doc.attr(chosen, ACTIVE_ATTR).as_deref() == Some("true") {
            continue;
        }
        changed += 1;

        let panels = doc
            .parent(list)
            .map(|container| doc.children_with_class(container, PANEL_CLASS))
            .unwrap_or_default();
        for (idx, &header) in headers.iter().enumerate() {
            let active = header == chosen;
            doc.set_attr(header, ACTIVE_ATTR, flag(active));
            doc.toggle_class(header, ACTIVE_CLASS, active);
            doc.set_attr(header, "aria-selected", flag(active));
            doc.set_attr(header, "tabindex", if active { "0" } else { "-1" });
            if let Some(&panel) = panels.get(idx) {
                doc.toggle_class(panel, ACTIVE_CLASS, active);
            }
        }
    }
    changed
}

/// Scroll `scroller` so `target` is back where it was on screen.
fn restore_position<D: DocumentTree>(
    doc: &mut D,
    target: D::Node,
    scroller: D::Node,
    before: ElementOffset,
) {
    let after = doc.offset_within(target, scroller);
    let top_delta = after.top - before.top;
    let left_delta = after.left - before.left;
    let scroll_top_delta = after.scroll_top - before.scroll_top;
    let scroll_left_delta = after.scroll_left - before.scroll_left;
    doc.scroll_to(
        scroller,
        after.scroll_left + left_delta - scroll_left_delta,
        after.scroll_top + top_delta - scroll_top_delta,
    );
}

/// A header with a stable id, inside a header list, inside a container.
fn is_header<D: DocumentTree>(doc: &D, node: D::Node) -> bool {
    doc.has_class(node, HEADER_CLASS)
        && doc.attr(node, ID_ATTR).is_some()
        && doc
            .closest(node, HEADER_LIST_CLASS)
            .and_then(|list| doc.closest(list, CONTAINER_CLASS))
            .is_some()
}

/// Logical option of a header: its key and its container's group.
fn header_option<D: DocumentTree>(doc: &D, header: D::Node) -> Option<RadioButton> {
    let key = doc.attr(header, KEY_ATTR)?;
    let group = doc
        .closest(header, CONTAINER_CLASS)
        .and_then(|container| doc.attr(container, GROUP_ATTR))?;
    Some(RadioButton::new(group, key))
}
