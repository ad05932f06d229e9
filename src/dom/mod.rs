pub mod parser;
pub mod registry;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// Owned DOM node. The widget works on parsed snapshots, not a live
/// document, so fragments can be cloned onto bake threads freely.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

/// Heading/paragraph tags drawn as overlay text on a baked face.
const OVERLAY_TAGS: &[&str] = &["h1", "h2", "h3", "p"];

impl DomNode {
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            tag: "#document".into(),
            attributes: HashMap::new(),
            text: String::new(),
            children,
            node_type: NodeType::Document,
        }
    }

    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Recursively count all nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively.
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(self.text.trim());
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    /// Depth-first visit of every element in this subtree, self included.
    pub fn walk_elements<'a>(&'a self, visit: &mut dyn FnMut(&'a DomNode)) {
        if self.node_type != NodeType::Text {
            visit(self);
        }
        for child in &self.children {
            child.walk_elements(visit);
        }
    }

    /// `src` URLs of descendant images carrying the baked-image marker.
    pub fn marked_image_urls(&self, image_attr: &str) -> Vec<String> {
        let mut urls = Vec::new();
        self.walk_elements(&mut |el| {
            if el.tag == "img" && el.attr(image_attr) == Some("true") {
                if let Some(src) = el.attr("src") {
                    if !src.is_empty() {
                        urls.push(src.to_string());
                    }
                }
            }
        });
        urls
    }

    /// Non-empty heading/paragraph texts, in document order.
    pub fn overlay_texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        self.walk_elements(&mut |el| {
            if OVERLAY_TAGS.contains(&el.tag.as_str()) {
                let text = el.collect_text();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed.to_string());
                }
            }
        });
        texts
    }
}

/// Parsed document with metadata.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn marked_images_only() {
        let fragment = DomNode::element(
            "div",
            HashMap::new(),
            vec![
                DomNode::element(
                    "img",
                    attrs(&[("src", "a.png"), ("data-cube-image", "true")]),
                    vec![],
                ),
                DomNode::element("img", attrs(&[("src", "b.png")]), vec![]),
            ],
        );
        assert_eq!(fragment.marked_image_urls("data-cube-image"), vec!["a.png"]);
    }

    #[test]
    fn overlay_texts_skip_empty() {
        let fragment = DomNode::element(
            "div",
            HashMap::new(),
            vec![
                DomNode::element("h1", HashMap::new(), vec![DomNode::text("Title")]),
                DomNode::element("p", HashMap::new(), vec![DomNode::text("   ")]),
                DomNode::element("p", HashMap::new(), vec![DomNode::text("Body")]),
                DomNode::element("span", HashMap::new(), vec![DomNode::text("skipped")]),
            ],
        );
        assert_eq!(fragment.overlay_texts(), vec!["Title", "Body"]);
    }

    #[test]
    fn collect_text_joins_with_spaces() {
        let node = DomNode::element(
            "p",
            HashMap::new(),
            vec![DomNode::text("hello"), DomNode::text("world")],
        );
        assert_eq!(node.collect_text(), "hello world");
    }
}
