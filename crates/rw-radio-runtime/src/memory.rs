//! In-memory document with a minimal block layout.

use std::borrow::Cow;

use rw_radio_common::{ACTIVE_CLASS, PANEL_CLASS};

use crate::tree::{DocumentTree, ElementOffset};

/// Element handle of a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    height: f64,
    scrollable: bool,
    scroll_left: f64,
    scroll_top: f64,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: Vec::new(),
            parent,
            children: Vec::new(),
            height: 0.0,
            scrollable: false,
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }
}

/// A document held in memory.
///
/// Layout is a single column: every element occupies its own height followed
/// by its displayed children, stacked top to bottom. A radio panel without
/// the active class is not displayed, as with the runtime stylesheet, so
/// switching options changes the height of the container.
///
/// Focus and scroll-into-view requests are recorded for inspection.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    focused: Option<NodeId>,
    scrolled_into_view: Vec<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document with an empty `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", None)],
            focused: None,
            scrolled_into_view: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// Set the element's own height, excluding children.
    pub fn set_height(&mut self, node: NodeId, height: f64) {
        self.nodes[node.0].height = height;
    }

    pub fn set_scrollable(&mut self, node: NodeId, scrollable: bool) {
        self.nodes[node.0].scrollable = scrollable;
    }

    /// Current `(left, top)` scroll offsets.
    #[must_use]
    pub fn scroll_offset(&self, node: NodeId) -> (f64, f64) {
        let element = &self.nodes[node.0];
        (element.scroll_left, element.scroll_top)
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Elements passed to `scroll_into_view`, oldest first.
    #[must_use]
    pub fn scrolled_into_view(&self) -> &[NodeId] {
        &self.scrolled_into_view
    }

    fn attr_str(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First element, in document order, whose `name` attribute is `value`.
    #[must_use]
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.attr_str(node, name) == Some(value))
    }

    /// Rendered height of an element including displayed children.
    #[must_use]
    pub fn layout_height(&self, node: NodeId) -> f64 {
        if !self.is_displayed(node) {
            return 0.0;
        }
        let element = &self.nodes[node.0];
        element.height
            + element
                .children
                .iter()
                .map(|&child| self.layout_height(child))
                .sum::<f64>()
    }

    fn is_displayed(&self, node: NodeId) -> bool {
        !self.has_class(node, PANEL_CLASS) || self.has_class(node, ACTIVE_CLASS)
    }

    /// Distance from the top of the document, ignoring scrolling.
    fn document_top(&self, node: NodeId) -> f64 {
        let Some(parent) = self.nodes[node.0].parent else {
            return 0.0;
        };
        let preceding: f64 = self.nodes[parent.0]
            .children
            .iter()
            .take_while(|&&sibling| sibling != node)
            .map(|&sibling| self.layout_height(sibling))
            .sum();
        self.document_top(parent) + self.nodes[parent.0].height + preceding
    }

    /// Position on screen: document position minus scrolling of all ancestors.
    fn viewport_position(&self, node: NodeId) -> (f64, f64) {
        let mut left = 0.0;
        let mut top = self.document_top(node);
        let mut current = self.nodes[node.0].parent;
        while let Some(ancestor) = current {
            let element = &self.nodes[ancestor.0];
            left -= element.scroll_left;
            top -= element.scroll_top;
            current = element.parent;
        }
        (left, top)
    }

    /// Inclusive descendants in document order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        out
    }
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;

    fn attr(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
        self.attr_str(node, name).map(Cow::Borrowed)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr_str(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if self.has_class(node, class) == on {
            return;
        }
        let mut classes: Vec<&str> = self
            .attr_str(node, "class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default();
        if on {
            classes.push(class);
        } else {
            classes.retain(|&c| c != class);
        }
        let joined = classes.join(" ");
        self.set_attr(node, "class", &joined);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolled_into_view.push(node);
    }

    fn is_scrollable(&self, node: NodeId) -> bool {
        self.nodes[node.0].scrollable
    }

    fn offset_within(&self, node: NodeId, ancestor: NodeId) -> ElementOffset {
        let (left, top) = self.viewport_position(node);
        let (ancestor_left, ancestor_top) = self.viewport_position(ancestor);
        let container = &self.nodes[ancestor.0];
        ElementOffset {
            top: top - ancestor_top,
            left: left - ancestor_left,
            scroll_top: container.scroll_top,
            scroll_left: container.scroll_left,
        }
    }

    fn scroll_to(&mut self, node: NodeId, left: f64, top: f64) {
        let element = &mut self.nodes[node.0];
        element.scroll_left = left.max(0.0);
        element.scroll_top = top.max(0.0);
    }
}
