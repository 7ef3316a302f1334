use std::fmt;

use thiserror::Error;

/// Where an element should land when it is scrolled into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
}

/// Everything the page logic needs from the rendering environment.
///
/// The browser implementation lives in `dom.rs`; tests use the in-memory tree
/// from `testing.rs`. Calls that the environment refuses are logged by the
/// implementation and otherwise ignored.
pub trait PresentationSurface {
    type Node: Clone + PartialEq + fmt::Debug;

    fn find_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matches for a CSS selector, in document order, below `scope` (or the
    /// whole document).
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn find_all_by_class(&self, scope: Option<&Self::Node>, class: &str) -> Vec<Self::Node> {
        self.query_all(scope, &format!(".{}", class))
    }

    fn query_first(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn set_text(&self, node: &Self::Node, text: &str);
    fn markup(&self, node: &Self::Node) -> String;
    fn set_markup(&self, node: &Self::Node, markup: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool);

    /// Inline style, kebab-case property names. An empty value clears it.
    fn set_style_property(&self, node: &Self::Node, property: &str, value: &str);

    /// Current value of a form control; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Appends a `div` with the given class to `parent`.
    fn create_transient_node(&self, parent: &Self::Node, class: &str) -> Option<Self::Node>;
    fn remove_node(&self, node: &Self::Node);

    /// Full height of the node's rendered content, including overflow.
    fn content_height(&self, node: &Self::Node) -> f64;
    /// Rendered `(width, height)`.
    fn bounding_size(&self, node: &Self::Node) -> (f64, f64);

    fn scroll_into_view(&self, node: &Self::Node, block: ScrollBlock);
    fn focus(&self, node: &Self::Node);
    fn set_playing(&self, node: &Self::Node, playing: bool);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("persistent storage is not available")]
    Unavailable,
    #[error("storage refused the write: {0}")]
    Rejected(String),
}

/// Write side of the page-scoped persistent key-value storage.
pub trait KeyValueStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
