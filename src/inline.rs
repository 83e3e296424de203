use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

/// `![alt](url)` with no brackets inside alt and no parens inside url
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid image regex"));

/// `[label](url)`, optionally preceded by `!`. Matches that capture the bang
/// are images and get skipped, which stands in for a lookbehind.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid link regex"));

/// Delimiter passes in the order they run.
const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Split raw inline text into typed spans.
///
/// Images are resolved first, then links, then bold, italic and code. Each
/// pass only looks at spans that are still plain, so markers inside an image
/// alt text or link label stay literal.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut spans = vec![TextSpan::plain(text)];
    spans = split_images(spans);
    spans = split_links(spans);
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, kind)?;
    }
    Ok(spans)
}

/// All `(alt, url)` pairs of images in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (group(&caps, 1), group(&caps, 2)))
        .collect()
}

/// All `(label, url)` pairs of links in `text`, ignoring images.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| group(caps, 1).is_empty())
        .map(|caps| (group(&caps, 2), group(&caps, 3)))
        .collect()
}

pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, &IMAGE_RE, |caps| {
        Some(TextSpan::image(group(caps, 1), group(caps, 2)))
    })
}

pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, &LINK_RE, |caps| {
        if !group(caps, 1).is_empty() {
            return None;
        }
        Some(TextSpan::link(group(caps, 2), group(caps, 3)))
    })
}

/// Resolve the first `delimiter` pair in every plain span.
///
/// Only the first pair is handled: the text after the closing marker is
/// emitted as plain and is not rescanned for the same delimiter. An opening
/// marker without a closing one is an error.
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() || !span.text().contains(delimiter) {
            out.push(span);
            continue;
        }

        let mut parts = span.text().splitn(3, delimiter);
        let (Some(before), Some(inside), Some(after)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::UnclosedDelimiter {
                delimiter,
                text: span.text().to_string(),
            });
        };

        if !before.is_empty() {
            out.push(TextSpan::plain(before));
        }
        out.push(TextSpan::styled(kind, inside));
        if !after.is_empty() {
            out.push(TextSpan::plain(after));
        }
    }
    Ok(out)
}

/// Replace every regex match inside plain spans with the span built by
/// `make`. When `make` declines a match, its text stays plain.
fn split_matches<F>(spans: Vec<TextSpan>, re: &Regex, make: F) -> Vec<TextSpan>
where
    F: Fn(&Captures<'_>) -> Option<TextSpan>,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.text();
        let mut last = 0;
        for caps in re.captures_iter(text) {
            let Some(typed) = make(&caps) else {
                continue;
            };
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if whole.start > last {
                out.push(TextSpan::plain(&text[last..whole.start]));
            }
            out.push(typed);
            last = whole.end;
        }

        if last == 0 {
            out.push(span);
        } else if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }
    out
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}
