mod block;
mod config;
mod convert;
mod error;
mod html;
mod inline;
mod parser;
pub mod site;

pub use block::{Block, BlockType, SpanKind, TextSpan};
pub use config::{CONFIG_FILE, Config, SitePaths};
pub use convert::{markdown_to_html_node, span_to_html, text_to_children};
pub use error::{Error, Result};
pub use html::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use inline::{extract_images, extract_links, tokenize};
pub use parser::{classify, extract_title, parse, segment};

/// Convert markdown to an HTML fragment wrapped in a single `div`.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    Ok(markdown_to_html_node(markdown)?.to_html())
}
