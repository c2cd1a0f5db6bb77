use serde::Serialize;

use crate::errors::DomError;
use crate::events::{DispatchedEvent, EventKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) selected: bool,
}

impl Element {
    pub(crate) fn new(tag: &str, attrs: Vec<(String, String)>) -> Self {
        let tag = tag.to_ascii_lowercase();
        let value = if tag == "input" {
            attr_in(&attrs, "value").unwrap_or_default().to_string()
        } else {
            String::new()
        };
        let checked = attr_in(&attrs, "checked").is_some();
        let selected = attr_in(&attrs, "selected").is_some();
        Self {
            tag,
            attrs,
            value,
            checked,
            selected,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        attr_in(&self.attrs, name)
    }
}

fn attr_in<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// One `<option>` as seen by the fillers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionInfo {
    pub node: NodeId,
    pub value: String,
    /// `label` attribute, falling back to the text.
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
    url: Option<String>,
    events: Vec<DispatchedEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
            url: None,
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// The `<body>` element, or the document root for fragments without one.
    pub fn body(&self) -> NodeId {
        self.find(self.root, |doc, id| doc.is_tag(id, "body"))
            .unwrap_or(self.root)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    pub(crate) fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            Some(NodeKind::Element(el)) => Ok(el),
            Some(_) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::UnknownNode(id)),
        }
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, DomError> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn create_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        self.push_node(parent, NodeKind::Element(Element::new(tag, attrs)))
    }

    pub(crate) fn create_element_owned(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: Vec<(String, String)>,
    ) -> Result<NodeId, DomError> {
        self.push_node(parent, NodeKind::Element(Element::new(tag, attrs)))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    /// Detach a node from its parent. The arena slot stays allocated.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
        self.nodes[id.0].parent = None;
        Ok(())
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current.0).and_then(|node| node.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|el| el.tag.as_str())
    }

    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id)
            .map(|t| t.eq_ignore_ascii_case(tag))
            .unwrap_or(false)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        let name = name.to_ascii_lowercase();
        match el.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => el.attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        if let NodeKind::Text(text) = &node.kind {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    /// Current value of a control. For `<select>` this follows DOM rules: the
    /// selected option, else the first option.
    pub fn value(&self, id: NodeId) -> Result<String, DomError> {
        let el = self.element(id)?;
        match el.tag.as_str() {
            "select" => {
                let options = self.options(id);
                let chosen = self
                    .selected_option(id)
                    .and_then(|node| options.iter().find(|opt| opt.node == node))
                    .or_else(|| options.first());
                Ok(chosen.map(|opt| opt.value.clone()).unwrap_or_default())
            }
            "input" | "textarea" => Ok(el.value.clone()),
            other => Err(DomError::NotAControl {
                node: id,
                tag: other.to_string(),
            }),
        }
    }

    /// Property write with no events, like calling the native value setter.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        if self.is_tag(id, "select") {
            let option = self
                .options(id)
                .into_iter()
                .find(|opt| opt.value == value)
                .map(|opt| opt.node);
            return match option {
                Some(option) => self.select_option(id, option),
                None => Ok(()),
            };
        }
        let el = self.element_mut(id)?;
        match el.tag.as_str() {
            "input" | "textarea" => {
                el.value = value.to_string();
                Ok(())
            }
            other => Err(DomError::NotAControl {
                node: id,
                tag: other.to_string(),
            }),
        }
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.element(id).map(|el| el.checked).unwrap_or(false)
    }

    /// Check or uncheck a box. Checking a radio unchecks the other radios
    /// sharing its `name`.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DomError> {
        let is_radio = self.input_type(id).as_deref() == Some("radio");
        if checked && is_radio {
            if let Some(group) = self.attr(id, "name").map(str::to_string) {
                let peers = self.find_all(self.root, |doc, node| {
                    node != id
                        && doc.input_type(node).as_deref() == Some("radio")
                        && doc.attr(node, "name") == Some(group.as_str())
                });
                for peer in peers {
                    self.element_mut(peer)?.checked = false;
                }
            }
        }
        self.element_mut(id)?.checked = checked;
        Ok(())
    }

    pub fn options(&self, select: NodeId) -> Vec<OptionInfo> {
        self.find_all(select, |doc, id| doc.is_tag(id, "option"))
            .into_iter()
            .map(|node| {
                let text = self.text_content(node).trim().to_string();
                let value = self
                    .attr(node, "value")
                    .map(str::to_string)
                    .unwrap_or_else(|| text.clone());
                let label = self
                    .attr(node, "label")
                    .map(str::to_string)
                    .unwrap_or_else(|| text.clone());
                OptionInfo {
                    node,
                    value,
                    label,
                    text,
                }
            })
            .collect()
    }

    /// The explicitly selected option, if any.
    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        self.find(select, |doc, id| {
            doc.is_tag(id, "option") && doc.element(id).map(|el| el.selected).unwrap_or(false)
        })
    }

    pub fn select_option(&mut self, select: NodeId, option: NodeId) -> Result<(), DomError> {
        let options: Vec<NodeId> = self.options(select).into_iter().map(|o| o.node).collect();
        if !options.contains(&option) {
            return Err(DomError::ForeignOption { select, option });
        }
        for node in options {
            self.element_mut(node)?.selected = node == option;
        }
        Ok(())
    }

    /// Lowercased `type` of an `<input>`, `"text"` when absent.
    pub fn input_type(&self, id: NodeId) -> Option<String> {
        if !self.is_tag(id, "input") {
            return None;
        }
        Some(
            self.attr(id, "type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
        )
    }

    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> Result<(), DomError> {
        self.element(target)?;
        self.events.push(DispatchedEvent { target, kind });
        Ok(())
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio(doc: &mut Document, parent: NodeId, name: &str, value: &str) -> NodeId {
        doc.create_element(
            parent,
            "input",
            &[("type", "radio"), ("name", name), ("value", value)],
        )
        .unwrap()
    }

    #[test]
    fn checking_a_radio_clears_its_group() {
        let mut doc = Document::new();
        let root = doc.root();
        let yes = radio(&mut doc, root, "q1", "yes");
        let no = radio(&mut doc, root, "q1", "no");
        let other = radio(&mut doc, root, "q2", "yes");
        doc.set_checked(other, true).unwrap();
        doc.set_checked(yes, true).unwrap();
        doc.set_checked(no, true).unwrap();
        assert!(!doc.checked(yes));
        assert!(doc.checked(no));
        assert!(doc.checked(other));
    }

    #[test]
    fn select_value_follows_dom_rules() {
        let mut doc = Document::new();
        let root = doc.root();
        let select = doc.create_element(root, "select", &[]).unwrap();
        let first = doc.create_element(select, "option", &[("value", "")]).unwrap();
        doc.append_text(first, "Select...").unwrap();
        let ca = doc.create_element(select, "option", &[("value", "CA")]).unwrap();
        doc.append_text(ca, "California").unwrap();
        assert_eq!(doc.value(select).unwrap(), "");
        assert!(doc.selected_option(select).is_none());
        doc.set_value(select, "CA").unwrap();
        assert_eq!(doc.value(select).unwrap(), "CA");
        assert_eq!(doc.selected_option(select), Some(ca));
    }

    #[test]
    fn removed_nodes_are_detached() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(root, "div", &[]).unwrap();
        assert!(doc.is_attached(div));
        doc.remove(div).unwrap();
        assert!(!doc.is_attached(div));
        assert!(doc.children(root).is_empty());
    }

    #[test]
    fn value_of_non_control_is_an_error() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(root, "div", &[]).unwrap();
        assert!(matches!(
            doc.value(div),
            Err(DomError::NotAControl { .. })
        ));
    }
}
