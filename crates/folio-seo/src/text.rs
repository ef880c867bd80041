//! Text helpers shared by the XML and feed generators.

use std::sync::LazyLock;

use regex::Regex;

/// Longest plain-text excerpt placed in feeds, in characters.
pub const EXCERPT_CHARS: usize = 500;

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,3}\s+").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plain-text excerpt of a markdown body: code removed, emphasis, headers
/// and link targets dropped, newlines folded, cut to [`EXCERPT_CHARS`].
pub fn markdown_excerpt(content: &str) -> String {
    let text = CODE_BLOCK_RE.replace_all(content, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = HEADER_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = NEWLINES_RE.replace_all(&text, " ");
    text.trim().chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_xml_specials() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <it's>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;it&apos;s&gt;"
        );
    }

    #[test]
    fn excerpt_strips_markdown() {
        let md = "## Heading\n\nSome **bold** text with `code` and a [link](https://x.y).\n\n```sql\nSELECT 1;\n```\nDone.";
        assert_eq!(
            markdown_excerpt(md),
            "Heading Some bold text with  and a link. Done."
        );
    }

    #[test]
    fn excerpt_is_capped_on_char_boundary() {
        let md = "é".repeat(EXCERPT_CHARS + 10);
        let excerpt = markdown_excerpt(&md);
        assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
    }
}
