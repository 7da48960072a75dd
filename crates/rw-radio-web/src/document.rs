//! [`DocumentTree`] over the live browser DOM.

use std::borrow::Cow;
use std::cell::RefCell;

use rw_radio_runtime::{DocumentTree, ElementOffset};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCollection, HtmlElement, Window};

/// Handle to an element seen by a [`WebDocument`].
///
/// DOM elements are host objects, so handles index a table of elements the
/// document has already handed out. The same element always maps to the
/// same handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WebNode(usize);

/// Browser document seen through the selection runtime's queries.
#[derive(Debug)]
pub struct WebDocument {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<Element>>,
}

impl WebDocument {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Document of the current window, if running in a page.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle for `element`, reusing the existing one if already seen.
    pub fn node(&self, element: Element) -> WebNode {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(idx) = nodes.iter().position(|known| *known == element) {
            return WebNode(idx);
        }
        nodes.push(element);
        WebNode(nodes.len() - 1)
    }

    /// Element behind `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was handed out by another document.
    pub fn element(&self, node: WebNode) -> Element {
        self.nodes.borrow()[node.0].clone()
    }

    fn collect(&self, collection: &HtmlCollection) -> Vec<WebNode> {
        (0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .map(|element| self.node(element))
            .collect()
    }

    fn scrolls_overflow(&self, element: &Element) -> bool {
        if element.scroll_height() <= element.client_height() {
            return false;
        }
        let overflow = match self.window.get_computed_style(element) {
            Ok(Some(style)) => style.get_property_value("overflow-y").unwrap_or_default(),
            _ => return false,
        };
        matches!(overflow.as_str(), "auto" | "scroll")
    }
}

impl DocumentTree for WebDocument {
    type Node = WebNode;

    fn attr(&self, node: WebNode, name: &str) -> Option<Cow<'_, str>> {
        self.element(node).get_attribute(name).map(Cow::Owned)
    }

    fn set_attr(&mut self, node: WebNode, name: &str, value: &str) {
        if let Err(err) = self.element(node).set_attribute(name, value) {
            tracing::warn!(name, ?err, "Failed to set attribute");
        }
    }

    fn has_class(&self, node: WebNode, class: &str) -> bool {
        self.element(node).class_list().contains(class)
    }

    fn toggle_class(&mut self, node: WebNode, class: &str, on: bool) {
        if let Err(err) = self.element(node).class_list().toggle_with_force(class, on) {
            tracing::warn!(class, ?err, "Failed to toggle class");
        }
    }

    fn parent(&self, node: WebNode) -> Option<WebNode> {
        self.element(node)
            .parent_element()
            .map(|parent| self.node(parent))
    }

    fn children(&self, node: WebNode) -> Vec<WebNode> {
        self.collect(&self.element(node).children())
    }

    fn find_by_class(&self, class: &str) -> Vec<WebNode> {
        self.collect(&self.document.get_elements_by_class_name(class))
    }

    fn focus(&mut self, node: WebNode) {
        let element = self.element(node);
        let Some(element) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.focus() {
            tracing::warn!(?err, "Failed to focus header");
        }
    }

    fn scroll_into_view(&mut self, node: WebNode) {
        self.element(node).scroll_into_view();
    }

    /// The page's scrolling element always counts, so headers outside any
    /// scroll container are stabilized against the viewport.
    fn is_scrollable(&self, node: WebNode) -> bool {
        let element = self.element(node);
        self.document.scrolling_element().as_ref() == Some(&element)
            || self.scrolls_overflow(&element)
    }

    fn offset_within(&self, node: WebNode, ancestor: WebNode) -> ElementOffset {
        let rect = self.element(node).get_bounding_client_rect();
        let container = self.element(ancestor);
        let parent_rect = container.get_bounding_client_rect();
        ElementOffset {
            top: rect.top() - parent_rect.top(),
            left: rect.left() - parent_rect.left(),
            scroll_top: f64::from(container.scroll_top()),
            scroll_left: f64::from(container.scroll_left()),
        }
    }

    fn scroll_to(&mut self, node: WebNode, left: f64, top: f64) {
        self.element(node).scroll_to_with_x_and_y(left, top);
    }
}
