//! Structural queries the selection controller needs from a document.

use std::borrow::Cow;
use std::fmt::Debug;

/// Position of an element inside a scroll container.
///
/// `top` and `left` are measured from the container's visible edge, so they
/// change when the container scrolls. `scroll_top` and `scroll_left` are the
/// container's scroll offsets at measurement time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementOffset {
    pub top: f64,
    pub left: f64,
    pub scroll_top: f64,
    pub scroll_left: f64,
}

/// Document access for the selection controller.
///
/// Implemented by the host (a browser binding, a test fake). Class and
/// attribute names are the ones from `rw_radio_common`; the controller never
/// needs anything beyond this trait.
pub trait DocumentTree {
    /// Handle to an element. Cheap to copy and compare.
    type Node: Copy + Eq + Debug;

    /// Attribute value. Borrowed when the document stores it, owned when
    /// it has to be read out of a host object.
    fn attr(&self, node: Self::Node, name: &str) -> Option<Cow<'_, str>>;

    fn set_attr(&mut self, node: Self::Node, name: &str, value: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Add `class` when `on`, remove it otherwise.
    fn toggle_class(&mut self, node: Self::Node, class: &str, on: bool);

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element children in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// All elements carrying `class`, in document order.
    fn find_by_class(&self, class: &str) -> Vec<Self::Node>;

    fn focus(&mut self, node: Self::Node);

    fn scroll_into_view(&mut self, node: Self::Node);

    /// Whether the element scrolls its overflowing content.
    fn is_scrollable(&self, node: Self::Node) -> bool;

    /// Position of `node` relative to the scroll container `ancestor`.
    fn offset_within(&self, node: Self::Node, ancestor: Self::Node) -> ElementOffset;

    /// Scroll `node` to the given offsets.
    fn scroll_to(&mut self, node: Self::Node, left: f64, top: f64);

    /// Nearest inclusive ancestor carrying `class`.
    fn closest(&self, node: Self::Node, class: &str) -> Option<Self::Node> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Children carrying `class`, in document order.
    fn children_with_class(&self, node: Self::Node, class: &str) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter(|&child| self.has_class(child, class))
            .collect()
    }

    /// Nearest strict ancestor that scrolls.
    fn closest_scrollable(&self, node: Self::Node) -> Option<Self::Node> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.is_scrollable(candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }
}
