use crate::node::{Document, NodeKind};
use crate::NodeId;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize the current state. Control state is written back as
    /// attributes so the output reflects what the engine filled.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (key, value) in &el.attrs {
                    if matches!(el.tag.as_str(), "input" | "option")
                        && matches!(key.as_str(), "value" | "checked" | "selected")
                    {
                        continue;
                    }
                    write_attr(out, key, value);
                }
                match el.tag.as_str() {
                    "input" => {
                        if !el.value.is_empty() {
                            write_attr(out, "value", &el.value);
                        }
                        if el.checked {
                            out.push_str(" checked");
                        }
                    }
                    "option" => {
                        if let Some(value) = el.attr("value") {
                            write_attr(out, "value", value);
                        }
                        if el.selected {
                            out.push_str(" selected");
                        }
                    }
                    _ => {}
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                if el.tag == "textarea" {
                    out.push_str(&escape_text(&el.value));
                } else {
                    for child in &node.children {
                        self.write_node(*child, out);
                    }
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(raw: &str) -> String {
    escape_text(raw).replace('"', "&quot;")
}
