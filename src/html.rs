use crate::error::{Error, Result};

/// Ordered attribute map. Attributes serialize in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, keeping its original position if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key="value"` pairs with one leading space, or nothing at all.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in &self.0 {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Terminal node holding text. Without a tag the value renders as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub tag: Option<String>,
    pub value: String,
    pub attrs: Attributes,
}

impl LeafNode {
    pub fn new(tag: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.map(str::to_string),
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(None, value)
    }

    pub fn tagged(tag: &str, value: impl Into<String>) -> Self {
        Self::new(Some(tag), value)
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Node with a tag and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    tag: String,
    pub children: Vec<HtmlNode>,
    pub attrs: Attributes,
}

impl ParentNode {
    /// Fails when `tag` is empty: every parent must be tagged.
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::UntaggedParent);
        }
        Ok(Self {
            tag,
            children,
            attrs: Attributes::new(),
        })
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn push(&mut self, child: impl Into<HtmlNode>) {
        self.children.push(child.into());
    }
}

/// A node in the rendered document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag.as_deref(),
            HtmlNode::Parent(parent) => Some(parent.tag()),
        }
    }

    pub fn attrs(&self) -> &Attributes {
        match self {
            HtmlNode::Leaf(leaf) => &leaf.attrs,
            HtmlNode::Parent(parent) => &parent.attrs,
        }
    }

    /// Serialize the node and all its descendants.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            HtmlNode::Leaf(leaf) => match leaf.tag.as_deref() {
                None => out.push_str(&leaf.value),
                Some("img") => {
                    out.push_str("<img");
                    leaf.attrs.write_html(out);
                    out.push('>');
                }
                Some(tag) => {
                    open_tag(tag, &leaf.attrs, out);
                    out.push_str(&leaf.value);
                    close_tag(tag, out);
                }
            },
            HtmlNode::Parent(parent) => {
                open_tag(&parent.tag, &parent.attrs, out);
                for child in &parent.children {
                    child.write_html(out);
                }
                close_tag(&parent.tag, out);
            }
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

fn open_tag(tag: &str, attrs: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attrs.write_html(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(tag: &str, value: &str) -> HtmlNode {
        LeafNode::tagged(tag, value).into()
    }

    fn parent(tag: &str, children: Vec<HtmlNode>) -> ParentNode {
        ParentNode::new(tag, children).unwrap()
    }

    #[test]
    fn attributes_render_in_order() {
        let attrs = Attributes::new()
            .with("prop1", "val1")
            .with("prop2", "val2");
        assert_eq!(attrs.to_html(), r#" prop1="val1" prop2="val2""#);
    }

    #[test]
    fn empty_attributes_render_nothing() {
        assert_eq!(Attributes::new().to_html(), "");
    }

    #[test]
    fn attributes_with_dashes_and_spaces() {
        let attrs: Attributes = [("data-test", "value"), ("class", "btn btn-primary")]
            .into_iter()
            .collect();
        assert_eq!(attrs.to_html(), r#" data-test="value" class="btn btn-primary""#);
    }

    #[test]
    fn reinserting_keeps_position() {
        let mut attrs = Attributes::new().with("id", "a").with("class", "b");
        attrs.insert("id", "c");
        assert_eq!(attrs.to_html(), r#" id="c" class="b""#);
        assert_eq!(attrs.get("id"), Some("c"));
    }

    #[test]
    fn leaf_with_tag() {
        assert_eq!(leaf("p", "Hello, world!").to_html(), "<p>Hello, world!</p>");
    }

    #[test]
    fn leaf_without_tag_is_raw_text() {
        assert_eq!(HtmlNode::from(LeafNode::text("plain")).to_html(), "plain");
    }

    #[test]
    fn leaf_with_empty_value() {
        assert_eq!(leaf("code", "").to_html(), "<code></code>");
    }

    #[test]
    fn leaf_with_attributes() {
        let node = LeafNode::tagged("a", "Click me!")
            .with_attrs(Attributes::new().with("href", "https://www.google.com"));
        assert_eq!(
            HtmlNode::from(node).to_html(),
            r#"<a href="https://www.google.com">Click me!</a>"#
        );
    }

    #[test]
    fn image_has_no_body_or_closing_tag() {
        let node = LeafNode::tagged("img", "ignored").with_attrs(
            Attributes::new()
                .with("src", "https://example.com/image.png")
                .with("alt", "Alt text"),
        );
        assert_eq!(
            HtmlNode::from(node).to_html(),
            r#"<img src="https://example.com/image.png" alt="Alt text">"#
        );
    }

    #[test]
    fn parent_with_children() {
        let node = parent("div", vec![leaf("span", "child")]);
        assert_eq!(HtmlNode::from(node).to_html(), "<div><span>child</span></div>");
    }

    #[test]
    fn parent_with_grandchildren() {
        let child = parent("span", vec![leaf("b", "grandchild")]);
        let node = parent("div", vec![child.into()]);
        assert_eq!(
            HtmlNode::from(node).to_html(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn parent_with_mixed_children() {
        let node = parent(
            "div",
            vec![
                leaf("span", "text"),
                LeafNode::text("plain text").into(),
                parent("p", vec![leaf("em", "emphasized")]).into(),
            ],
        );
        assert_eq!(
            HtmlNode::from(node).to_html(),
            "<div><span>text</span>plain text<p><em>emphasized</em></p></div>"
        );
    }

    #[test]
    fn parent_attributes_keep_insertion_order() {
        let node = parent("div", vec![leaf("p", "text")])
            .with_attrs(Attributes::new().with("id", "main").with("class", "container"));
        assert_eq!(
            HtmlNode::from(node).to_html(),
            r#"<div id="main" class="container"><p>text</p></div>"#
        );
    }

    #[test]
    fn parent_without_children() {
        assert_eq!(HtmlNode::from(parent("div", vec![])).to_html(), "<div></div>");
    }

    #[test]
    fn untagged_parent_is_rejected() {
        let err = ParentNode::new("", vec![leaf("p", "text")]).unwrap_err();
        assert!(matches!(err, Error::UntaggedParent));
        assert!(err.to_string().contains("need to be tagged"));
    }

    #[test]
    fn serializing_twice_is_identical() {
        let mut root = parent("div", vec![]);
        root.push(parent("ul", vec![parent("li", vec![leaf("b", "x")]).into()]));
        let node = HtmlNode::from(root);
        assert_eq!(node.to_html(), node.to_html());
    }
}
