use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, BlockType};
use crate::error::{Error, Result};

const FENCE: &str = "```";

/// A level-one heading line, allowing indentation before the `#`
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*# (.*)$").expect("valid title regex"));

/// Split markdown into blank-line separated, trimmed, non-empty blocks
pub fn segment(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a single block. The first matching rule wins and every block
/// ends up with a type, falling back to a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }

    if block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::CodeFence;
    }

    if block.split('\n').all(|line| line.starts_with('>')) {
        return BlockType::Blockquote;
    }

    if block.split('\n').all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Parse markdown text into a list of classified blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    segment(markdown)
        .into_iter()
        .map(|text| Block {
            kind: classify(text),
            text: text.to_string(),
        })
        .collect()
}

/// Return the text of the one `# ` heading line in the document.
///
/// Leading indentation before the `#` is ignored and trailing whitespace is
/// kept. Zero or several such lines are errors.
pub fn extract_title(markdown: &str) -> Result<&str> {
    let mut titles = TITLE_RE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str());

    let title = titles.next().ok_or(Error::NoTitle)?;
    let extra = titles.count();
    if extra > 0 {
        return Err(Error::MultipleTitles { count: extra + 1 });
    }
    Ok(title)
}

/// `Some(level)` when the block opens with 1 to 6 `#` and a space
fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}
