use crate::node::{Document, NodeKind};
use crate::NodeId;

const TEXT_LIKE_INPUTS: &[&str] = &["text", "tel", "email", "url", "search", "number"];

impl Document {
    /// Element descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id.0) {
                if matches!(node.kind, NodeKind::Element(_)) {
                    out.push(id);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn find<F>(&self, root: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.descendants(root).into_iter().find(|id| pred(self, *id))
    }

    pub fn find_all<F>(&self, root: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .filter(|id| pred(self, *id))
            .collect()
    }

    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.find_all(root, |doc, id| doc.is_tag(id, tag))
    }

    pub fn element_by_id(&self, id_attr: &str) -> Option<NodeId> {
        self.find(self.root(), |doc, id| doc.attr(id, "id") == Some(id_attr))
    }

    /// Substring match against the raw `class` attribute, the way
    /// `[class*="..."]` selectors behave.
    pub fn class_contains(&self, id: NodeId, marker: &str) -> bool {
        self.attr(id, "class")
            .map(|class| class.contains(marker))
            .unwrap_or(false)
    }

    pub fn attr_contains(&self, id: NodeId, name: &str, needle: &str) -> bool {
        self.attr(id, name)
            .map(|value| value.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    pub fn has_ancestor(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Inputs a user types free text into: `<textarea>` and text-ish `<input>`s.
    pub fn is_text_like(&self, id: NodeId) -> bool {
        if self.is_tag(id, "textarea") {
            return true;
        }
        self.input_type(id)
            .map(|ty| TEXT_LIKE_INPUTS.contains(&ty.as_str()))
            .unwrap_or(false)
    }

    pub fn is_radio(&self, id: NodeId) -> bool {
        self.input_type(id).as_deref() == Some("radio")
    }

    pub fn is_checkbox(&self, id: NodeId) -> bool {
        self.input_type(id).as_deref() == Some("checkbox")
    }

    /// The `<label>` describing a control: `label[for=id]` anywhere in the
    /// document, else an enclosing `<label>`.
    pub fn label_for(&self, control: NodeId) -> Option<NodeId> {
        if let Some(id_attr) = self.attr(control, "id").filter(|id| !id.is_empty()) {
            let id_attr = id_attr.to_string();
            let explicit = self.find(self.root(), |doc, id| {
                doc.is_tag(id, "label") && doc.attr(id, "for") == Some(id_attr.as_str())
            });
            if explicit.is_some() {
                return explicit;
            }
        }
        let mut current = self.parent(control);
        while let Some(node) = current {
            if self.is_tag(node, "label") {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Lowercased, trimmed text of a control's label, empty when unlabeled.
    pub fn label_text(&self, control: NodeId) -> String {
        self.label_for(control)
            .map(|label| normalize_text(&self.text_content(label)))
            .unwrap_or_default()
    }
}

/// Lowercase, trim, and collapse internal whitespace runs to one space.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
