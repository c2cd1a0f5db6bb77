use scraper::{Html, Node as HtmlNode};
use tracing::debug;

use crate::node::Document;
use crate::NodeId;

impl Document {
    /// Build a page from markup. Parsing is lenient: malformed HTML yields
    /// whatever tree the HTML5 parser recovers.
    pub fn parse_html(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let mut doc = Document::new();
        let mut stack = vec![(html.tree.root(), doc.root())];
        while let Some((node, parent)) = stack.pop() {
            let next_parent = match node.value() {
                HtmlNode::Element(el) => {
                    let attrs = el
                        .attrs()
                        .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                        .collect();
                    match doc.create_element_owned(parent, el.name(), attrs) {
                        Ok(id) => id,
                        Err(err) => {
                            debug!(tag = el.name(), error = %err, "element skipped");
                            continue;
                        }
                    }
                }
                HtmlNode::Text(text) => {
                    let content: &str = text;
                    if let Err(err) = doc.append_text(parent, content) {
                        debug!(error = %err, "text node skipped");
                    }
                    continue;
                }
                HtmlNode::Document | HtmlNode::Fragment => parent,
                _ => continue,
            };
            let children: Vec<_> = node.children().collect();
            for child in children.into_iter().rev() {
                stack.push((child, next_parent));
            }
        }
        doc.init_textareas();
        debug!(nodes = doc.nodes.len(), "parsed page markup");
        doc
    }

    fn init_textareas(&mut self) {
        for id in self.elements_by_tag(self.root(), "textarea") {
            let text = self.text_content(id);
            if let Err(err) = self.set_value(id, &text) {
                debug!(error = %err, "textarea content not applied");
            }
        }
    }

    pub fn parse_fragment_into(&mut self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        let fragment = Document::parse_html(markup);
        let body = fragment.body();
        let mut created = Vec::new();
        for child in fragment.children(body).to_vec() {
            self.import_subtree(&fragment, child, parent, &mut created);
        }
        created
    }

    fn import_subtree(
        &mut self,
        source: &Document,
        node: NodeId,
        parent: NodeId,
        created: &mut Vec<NodeId>,
    ) {
        let new_id = match source.element(node) {
            Ok(el) => match self.create_element_owned(parent, &el.tag, el.attrs.clone()) {
                Ok(id) => id,
                Err(err) => {
                    debug!(tag = %el.tag, error = %err, "element skipped");
                    return;
                }
            },
            Err(_) => {
                let text = source.text_content(node);
                if let Err(err) = self.append_text(parent, &text) {
                    debug!(error = %err, "text node skipped");
                }
                return;
            }
        };
        if self.is_tag(new_id, "textarea") {
            let text = source.text_content(node);
            if let Err(err) = self.set_value(new_id, &text) {
                debug!(error = %err, "textarea content not applied");
            }
        }
        created.push(new_id);
        for child in source.children(node).to_vec() {
            self.import_subtree(source, child, new_id, created);
        }
    }
}
