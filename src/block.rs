use std::fmt;

use crate::error::{Error, Result};

/// Inline formatting kinds recognised by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Whether spans of this kind point somewhere and therefore need a url.
    pub fn takes_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

/// One inline unit of parsed text.
///
/// For images `text` is the alt text, for links it is the label. The url is
/// present exactly when the kind is [`SpanKind::Link`] or [`SpanKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    kind: SpanKind,
    text: String,
    url: Option<String>,
}

impl TextSpan {
    /// Build a span, checking that the url matches the kind.
    pub fn new(kind: SpanKind, text: impl Into<String>, url: Option<String>) -> Result<Self> {
        match (kind.takes_url(), url.is_some()) {
            (true, false) => Err(Error::MissingUrl { kind }),
            (false, true) => Err(Error::UnexpectedUrl { kind }),
            _ => Ok(Self {
                kind,
                text: text.into(),
                url,
            }),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Plain, text)
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: label.into(),
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Image,
            text: alt.into(),
            url: Some(url.into()),
        }
    }

    /// Span for one of the url-less kinds. Callers pass a delimiter kind or
    /// `Plain`; a url-taking kind here would break the url invariant.
    pub(crate) fn styled(kind: SpanKind, text: impl Into<String>) -> Self {
        debug_assert!(!kind.takes_url());
        Self {
            kind,
            text: text.into(),
            url: None,
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "TextSpan({}, {:?}, {})", self.text, self.kind, url),
            None => write!(f, "TextSpan({}, {:?})", self.text, self.kind),
        }
    }
}

/// Structural kind of a markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    /// Level is always within 1..=6.
    Heading(u8),
    CodeFence,
    Blockquote,
    UnorderedList,
    OrderedList,
}

/// A trimmed, non-empty chunk of markdown together with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockType,
    pub text: String,
}
