//! In-memory page model: an element arena plus the bits of window state the
//! page scripts touch (scroll position, location, history, focus, dialogs).

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use shared::protocol::ProofFile;
use tracing::debug;
use url::Url;

/// Handle to an element slot. Slots of removed elements are reused, and the
/// generation keeps old handles from resolving to the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    files: Vec<ProofFile>,
    offset_top: f64,
    offset_height: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    generation: u32,
    detached: bool,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// `value` attribute, empty when absent.
    pub fn value(&self) -> &str {
        self.attr("value").unwrap_or_default()
    }

    pub fn files(&self) -> &[ProofFile] {
        &self.files
    }

    pub fn offset_top(&self) -> f64 {
        self.offset_top
    }

    pub fn offset_height(&self) -> f64 {
        self.offset_height
    }
}

pub struct Document {
    nodes: Vec<Element>,
    free: Vec<usize>,
    by_id: HashMap<String, NodeId>,
    body: NodeId,
    location: Url,
    history: Vec<Url>,
    scroll_y: f64,
    focused: Option<NodeId>,
    alerts: Vec<String>,
    confirms: Vec<String>,
    confirm_answers: VecDeque<bool>,
    navigations: Vec<Url>,
    pending_resets: Vec<NodeId>,
}

impl Document {
    pub fn new(location: Url) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            by_id: HashMap::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
            location: location.clone(),
            history: vec![location],
            scroll_y: 0.0,
            focused: None,
            alerts: Vec::new(),
            confirms: Vec::new(),
            confirm_answers: VecDeque::new(),
            navigations: Vec::new(),
            pending_resets: Vec::new(),
        };
        doc.nodes.push(Element {
            tag: "body".into(),
            ..Element::default()
        });
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Appends a new element under `parent` and returns a builder for it.
    /// Appending under a removed parent yields a handle that resolves to
    /// nothing.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> ElementMut<'_> {
        let element = Element {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..Element::default()
        };
        let node = match self.free.pop() {
            Some(index) => {
                let generation = self.nodes[index].generation.wrapping_add(1);
                self.nodes[index] = Element {
                    generation,
                    ..element
                };
                NodeId { index, generation }
            }
            None => {
                self.nodes.push(element);
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        };
        match self.element_mut(parent) {
            Some(parent) => parent.children.push(node),
            None => self.release(node),
        }
        ElementMut { doc: self, node }
    }

    /// Element slots held by the arena, live or waiting for reuse.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    fn release(&mut self, node: NodeId) {
        if let Some(el) = self.nodes.get_mut(node.index) {
            if el.generation == node.generation && !el.detached {
                el.detached = true;
                self.free.push(node.index);
            }
        }
    }

    pub fn edit(&mut self, node: NodeId) -> ElementMut<'_> {
        ElementMut { doc: self, node }
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes
            .get(node.index)
            .filter(|el| el.generation == node.generation && !el.detached)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes
            .get_mut(node.index)
            .filter(|el| el.generation == node.generation && !el.detached)
    }

    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    fn set_id(&mut self, node: NodeId, id: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        if let Some(old) = el.id.replace(id.to_string()) {
            self.by_id.remove(&old);
        }
        self.by_id.insert(id.to_string(), node);
    }

    /// Attached elements in document order.
    pub fn query(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(self.body, &predicate, &mut found);
        found
    }

    /// Attached descendants of `root` (excluding `root`) in document order.
    pub fn query_within(&self, root: NodeId, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        if let Some(el) = self.element(root) {
            for child in &el.children {
                self.walk(*child, &predicate, &mut found);
            }
        }
        found
    }

    fn walk(&self, node: NodeId, predicate: &impl Fn(&Element) -> bool, found: &mut Vec<NodeId>) {
        let Some(el) = self.element(node) else {
            return;
        };
        if predicate(el) {
            found.push(node);
        }
        for child in &el.children {
            self.walk(*child, predicate, found);
        }
    }

    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.query(|el| el.has_class(class))
    }

    pub fn query_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query(|el| el.tag == tag)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(self.parent(node)?)?;
        let pos = parent.children.iter().position(|child| *child == node)?;
        pos.checked_sub(1).map(|prev| parent.children[prev])
    }

    /// True when `node` is `ancestor` or sits below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Nearest element, starting at `node` itself, that matches.
    pub fn closest(&self, node: NodeId, predicate: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            let el = self.element(n)?;
            if predicate(el) {
                return Some(n);
            }
            current = el.parent;
        }
        None
    }

    /// Detaches `node` and its subtree and frees their slots.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        let Some(parent) = self.element(node).and_then(|el| el.parent) else {
            return;
        };
        if let Some(parent) = self.element_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
        let mut pending = vec![node];
        while let Some(n) = pending.pop() {
            let Some(el) = self.element_mut(n) else {
                continue;
            };
            let children = std::mem::take(&mut el.children);
            let id = el.id.clone();
            pending.extend(children);
            self.release(n);
            if let Some(id) = id {
                if self.by_id.get(&id) == Some(&n) {
                    self.by_id.remove(&id);
                }
            }
            if self.focused == Some(n) {
                self.focused = None;
            }
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.remove(class);
        }
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.element_mut(node) else {
            return false;
        };
        if el.classes.remove(class) {
            false
        } else {
            el.classes.insert(class.to_string());
            true
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(class))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) {
            el.attrs.remove(name);
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            let value = value.into();
            if value.is_empty() {
                el.style.remove(property);
            } else {
                el.style.insert(property.to_string(), value);
            }
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)?.style(property)
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.text = text.into();
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::text)
    }

    /// Text of the element with the given id.
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.text(self.get(id)?)
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(Element::value).unwrap_or_default()
    }

    pub fn value_of(&self, id: &str) -> &str {
        self.get(id).map(|node| self.value(node)).unwrap_or_default()
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.set_attr(node, "value", value);
    }

    /// Empties the user-editable fields of `form` and queues the `reset`
    /// event that follows.
    pub fn reset_form(&mut self, form: NodeId) {
        if self.element(form).is_none() {
            return;
        }
        let fields = self.query_within(form, |el| match el.tag() {
            "input" => !matches!(
                el.attr("type"),
                Some("hidden" | "submit" | "button" | "reset")
            ),
            "textarea" => true,
            _ => false,
        });
        for field in fields {
            if let Some(el) = self.element_mut(field) {
                let toggle = matches!(el.attr("type"), Some("checkbox" | "radio"));
                el.attrs.remove(if toggle { "checked" } else { "value" });
                el.files.clear();
            }
        }
        self.pending_resets.push(form);
    }

    /// Forms reset since the last call, oldest first.
    pub fn take_resets(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.pending_resets)
    }

    pub fn set_files(&mut self, node: NodeId, files: Vec<ProofFile>) {
        if let Some(el) = self.element_mut(node) {
            el.files = files;
        }
    }

    pub fn set_layout(&mut self, node: NodeId, offset_top: f64, offset_height: f64) {
        if let Some(el) = self.element_mut(node) {
            el.offset_top = offset_top;
            el.offset_height = offset_height;
        }
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.element(node).is_some() {
            self.focused = Some(node);
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_y = top.max(0.0);
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn history(&self) -> &[Url] {
        &self.history
    }

    pub fn push_history(&mut self, url: Url) {
        self.location = url.clone();
        self.history.push(url);
    }

    pub fn replace_history(&mut self, url: Url) {
        self.location = url.clone();
        match self.history.last_mut() {
            Some(last) => *last = url,
            None => self.history.push(url),
        }
    }

    /// Same-origin navigation relative to the current location.
    pub fn navigate(&mut self, path: &str) {
        match self.location.join(path) {
            Ok(url) => {
                debug!(to = %url, "navigating");
                self.navigations.push(url.clone());
                self.push_history(url);
            }
            Err(err) => debug!(path, error = %err, "ignoring navigation to malformed path"),
        }
    }

    pub fn navigations(&self) -> &[Url] {
        &self.navigations
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Answers the next confirmation prompt. Unanswered prompts are accepted.
    pub fn queue_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    pub fn confirm(&mut self, message: impl Into<String>) -> bool {
        self.confirms.push(message.into());
        self.confirm_answers.pop_front().unwrap_or(true)
    }

    pub fn confirms(&self) -> &[String] {
        &self.confirms
    }
}

/// Chained edits on a single element.
pub struct ElementMut<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl ElementMut<'_> {
    pub fn id(self, id: &str) -> Self {
        self.doc.set_id(self.node, id);
        self
    }

    pub fn class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.doc.add_class(self.node, class);
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attr(self.node, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.node, text);
        self
    }

    pub fn layout(self, offset_top: f64, offset_height: f64) -> Self {
        self.doc.set_layout(self.node, offset_top, offset_height);
        self
    }

    pub fn node(self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
