use crate::block::{Block, BlockType, SpanKind, TextSpan};
use crate::error::Result;
use crate::html::{Attributes, HtmlNode, LeafNode, ParentNode};
use crate::inline::tokenize;
use crate::parser::parse;

/// Convert markdown into a single `div` holding one node per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    let blocks = parse(markdown);
    log::trace!("assembling {} blocks", blocks.len());

    let mut root = ParentNode::new("div", Vec::with_capacity(blocks.len()))?;
    for block in &blocks {
        log::trace!("{:?}: {:?}", block.kind, block.text);
        root.push(block_to_html(block)?);
    }
    Ok(root.into())
}

/// Map one inline span onto its HTML leaf
pub fn span_to_html(span: &TextSpan) -> LeafNode {
    match span.kind() {
        SpanKind::Plain => LeafNode::text(span.text()),
        SpanKind::Bold => LeafNode::tagged("b", span.text()),
        SpanKind::Italic => LeafNode::tagged("i", span.text()),
        SpanKind::Code => LeafNode::tagged("code", span.text()),
        SpanKind::Link => LeafNode::tagged("a", span.text())
            .with_attrs(Attributes::new().with("href", span.url().unwrap_or_default())),
        SpanKind::Image => LeafNode::tagged("img", "").with_attrs(
            Attributes::new()
                .with("src", span.url().unwrap_or_default())
                .with("alt", span.text()),
        ),
    }
}

/// Tokenize inline text and turn every span into a leaf
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?
        .iter()
        .map(|span| HtmlNode::from(span_to_html(span)))
        .collect())
}

fn block_to_html(block: &Block) -> Result<ParentNode> {
    let text = block.text.as_str();
    match block.kind {
        BlockType::Paragraph => wrap("p", &text.replace('\n', " ")),
        BlockType::Heading(level) => {
            // Skip the `#` run and the single space the classifier required.
            let content = text.get(usize::from(level) + 1..).unwrap_or_default();
            wrap(&format!("h{level}"), content)
        }
        BlockType::CodeFence => code_block(text),
        BlockType::Blockquote => {
            let quote = text
                .split('\n')
                .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
                .collect::<Vec<_>>()
                .join(" ");
            wrap("blockquote", &quote)
        }
        BlockType::UnorderedList => list("ul", text.split('\n').map(|line| {
            line.strip_prefix("- ").unwrap_or(line)
        })),
        BlockType::OrderedList => list("ol", text.split('\n').map(|line| {
            line.split_once(' ').map_or(line, |(_, item)| item)
        })),
    }
}

fn wrap(tag: &str, text: &str) -> Result<ParentNode> {
    ParentNode::new(tag, text_to_children(text)?)
}

fn list<'a>(tag: &str, items: impl Iterator<Item = &'a str>) -> Result<ParentNode> {
    let items = items
        .map(|item| wrap("li", item).map(HtmlNode::from))
        .collect::<Result<Vec<_>>>()?;
    ParentNode::new(tag, items)
}

/// `pre > code` with the fences removed and the body left untouched.
///
/// An info string on the opening fence (```` ```rust ````) is dropped from
/// the body and recorded as a `language-*` class.
fn code_block(text: &str) -> Result<ParentNode> {
    let inner = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or_default();

    let (info, body) = match inner.split_once('\n') {
        Some((info, body)) => (info.trim(), body),
        None => ("", inner),
    };

    let mut code = LeafNode::tagged("code", body);
    if !info.is_empty() {
        code = code.with_attrs(Attributes::new().with("class", format!("language-{info}")));
    }
    ParentNode::new("pre", vec![code.into()])
}
