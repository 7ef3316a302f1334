//! In-memory stand-ins for the browser, used by unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::signal::{Deferred, Task};
use crate::surface::{KeyValueStore, PresentationSurface, ScrollBlock, StoreError};

pub type NodeId = usize;

#[derive(Debug, Default, Clone)]
pub struct FakeNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub markup: String,
    pub value: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub removed: bool,
    pub playing: bool,
    pub focused: bool,
    pub content_height: f64,
    pub size: (f64, f64),
    pub scrolled_to: Vec<ScrollBlock>,
}

#[derive(Default)]
pub struct FakeSurface {
    nodes: RefCell<Vec<FakeNode>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element; `shape` is `tag`, `tag.class`, `tag#id` or combinations
    /// like `div#id.a.b`.
    pub fn add(&self, parent: Option<NodeId>, shape: &str) -> NodeId {
        let mut node = FakeNode {
            parent,
            ..FakeNode::default()
        };
        let mut rest = shape;
        let tag_end = rest.find(|c: char| c == '.' || c == '#').unwrap_or(rest.len());
        node.tag = rest[..tag_end].to_string();
        rest = &rest[tag_end..];
        while !rest.is_empty() {
            let marker = &rest[..1];
            let body = &rest[1..];
            let end = body.find(|c: char| c == '.' || c == '#').unwrap_or(body.len());
            let name = body[..end].to_string();
            if marker == "#" {
                node.id = Some(name);
            } else {
                node.classes.insert(name);
            }
            rest = &body[end..];
        }

        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(node);
        if let Some(parent) = parent {
            nodes[parent].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> FakeNode {
        self.nodes.borrow()[id].clone()
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[id].styles.get(property).cloned()
    }

    pub fn text(&self, id: NodeId) -> String {
        self.nodes.borrow()[id].markup.clone()
    }

    pub fn set_content_height(&self, id: NodeId, height: f64) {
        self.nodes.borrow_mut()[id].content_height = height;
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[id]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn type_into(&self, id: NodeId, value: &str) {
        self.nodes.borrow_mut()[id].value = value.to_string();
    }

    fn matches(node: &FakeNode, simple: &str) -> bool {
        if let Some(class) = simple.strip_prefix('.') {
            node.classes.contains(class)
        } else if let Some(id) = simple.strip_prefix('#') {
            node.id.as_deref() == Some(id)
        } else {
            node.tag == simple
        }
    }

    fn descendants(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match scope {
            Some(scope) => nodes[scope].children.iter().rev().copied().collect(),
            None => (0..nodes.len())
                .rev()
                .filter(|&i| nodes[i].parent.is_none())
                .collect(),
        };
        while let Some(id) = stack.pop() {
            if nodes[id].removed {
                continue;
            }
            out.push(id);
            stack.extend(nodes[id].children.iter().rev().copied());
        }
        out
    }
}

impl PresentationSurface for FakeSurface {
    type Node = NodeId;

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(None)
            .into_iter()
            .find(|&n| self.nodes.borrow()[n].id.as_deref() == Some(id))
    }

    // Supports simple selectors (`.class`, `#id`, `tag`) joined by the
    // descendant combinator.
    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let mut scopes: Vec<Option<NodeId>> = vec![scope.copied()];
        let mut found = Vec::new();
        for simple in selector.split_whitespace() {
            found = Vec::new();
            for scope in &scopes {
                for id in self.descendants(*scope) {
                    if Self::matches(&self.nodes.borrow()[id], simple) && !found.contains(&id) {
                        found.push(id);
                    }
                }
            }
            scopes = found.iter().map(|&id| Some(id)).collect();
        }
        found
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[*node].markup = text.to_string();
    }

    fn markup(&self, node: &NodeId) -> String {
        self.nodes.borrow()[*node].markup.clone()
    }

    fn set_markup(&self, node: &NodeId, markup: &str) {
        self.nodes.borrow_mut()[*node].markup = markup.to_string();
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[*node].classes.contains(class)
    }

    fn toggle_class(&self, node: &NodeId, class: &str, on: bool) {
        let mut nodes = self.nodes.borrow_mut();
        if on {
            nodes[*node].classes.insert(class.to_string());
        } else {
            nodes[*node].classes.remove(class);
        }
    }

    fn set_style_property(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if value.is_empty() {
            nodes[*node].styles.remove(property);
        } else {
            nodes[*node]
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[*node].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.nodes.borrow_mut()[*node].value = value.to_string();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attributes.get(name).cloned()
    }

    fn create_transient_node(&self, parent: &NodeId, class: &str) -> Option<NodeId> {
        Some(self.add(Some(*parent), &format!("div.{}", class)))
    }

    fn remove_node(&self, node: &NodeId) {
        self.nodes.borrow_mut()[*node].removed = true;
    }

    fn content_height(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[*node].content_height
    }

    fn bounding_size(&self, node: &NodeId) -> (f64, f64) {
        self.nodes.borrow()[*node].size
    }

    fn scroll_into_view(&self, node: &NodeId, block: ScrollBlock) {
        self.nodes.borrow_mut()[*node].scrolled_to.push(block);
    }

    fn focus(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        for n in nodes.iter_mut() {
            n.focused = false;
        }
        nodes[*node].focused = true;
    }

    fn set_playing(&self, node: &NodeId, playing: bool) {
        self.nodes.borrow_mut()[*node].playing = playing;
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub items: RefCell<HashMap<String, String>>,
    pub refuse_writes: bool,
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.refuse_writes {
            return Err(StoreError::Rejected("QuotaExceededError".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Runs pending continuations shortest delay first, feeding anything they
/// schedule back into the queue, until nothing is left.
pub fn drain_timers<N>(
    mut pending: Vec<Deferred<N>>,
    mut fire: impl FnMut(Task<N>) -> Vec<Deferred<N>>,
) {
    while !pending.is_empty() {
        pending.sort_by_key(|d| d.after_ms);
        let next = pending.remove(0);
        let followups = fire(next.task);
        pending.extend(followups.into_iter().map(|d| Deferred {
            after_ms: d.after_ms + next.after_ms,
            task: d.task,
        }));
    }
}
