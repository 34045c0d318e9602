//! Depth-tracked scanning primitives for the block markup.
//!
//! Every consumer of the markup (batch parser, streaming parser, slide
//! splice) delimits blocks the same way: `{`/`}` and `[`/`]` pairs matched by
//! depth, with double-quoted string values skipped so braces inside content
//! never disturb the count. This module is the single implementation of that
//! discipline.

use memchr::memmem;
use smallvec::SmallVec;
use std::ops::Range;

/// Scope kinds tracked while scanning nested blocks.
///
/// The slides array, an open `SLIDE` block, and an open element each form a
/// scope of their own; slide-scope and element-scope depths are counted
/// independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Inside the top-level `slides = [ ... ]` array
    Array,
    /// Inside a `SLIDE { ... }` block
    Slide,
    /// Inside an element block
    Element,
}

/// Stack of open scopes. Presentations nest shallowly, so the inline
/// capacity covers real documents without heap allocation.
pub type ScopeStack = SmallVec<[ScopeKind; 8]>;

/// Check whether a byte can be part of an identifier.
///
/// Identifiers cover tag names (`div`, `img`) and data-attribute keys
/// (`data-background-image`), hence `-` is included.
#[inline]
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// A forward-only cursor over markup text.
///
/// The cursor operates on bytes; the markup grammar is ASCII, and content
/// strings are consumed as opaque spans, so multi-byte UTF-8 sequences pass
/// through untouched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `text`.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute byte offset. The offset must lie on a
    /// character boundary of the underlying text.
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos <= self.text.len());
        self.pos = pos;
    }

    /// Whether the cursor has consumed all input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Peek the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consume the character at the cursor and return its first byte.
    /// Multi-byte UTF-8 sequences are consumed whole so the cursor always
    /// rests on a character boundary.
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += utf8_len(b);
        Some(b)
    }

    /// Consume the next byte if it equals `expected`.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and stray `;` separators between items.
    pub fn skip_trivia(&mut self) {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_whitespace() || bytes[self.pos] == b';')
        {
            self.pos += 1;
        }
    }

    /// Read an identifier at the cursor, or `None` if the next byte cannot
    /// start one.
    pub fn read_identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && is_ident_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos > start {
            Some(&self.text[start..self.pos])
        } else {
            None
        }
    }

    /// Read a double-quoted string at the cursor, returning its unescaped
    /// value. The cursor must sit on the opening quote. Returns `None` (and
    /// consumes nothing) when the string is absent or unterminated.
    pub fn read_string(&mut self) -> Option<String> {
        let bytes = self.text.as_bytes();
        if self.peek() != Some(b'"') {
            return None;
        }
        let mut out = String::new();
        let mut i = self.pos + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if i + 1 < bytes.len() => {
                    // Only quote and backslash escapes are recognized; any
                    // other backslash passes through literally.
                    match bytes[i + 1] {
                        b'"' => out.push('"'),
                        b'\\' => out.push('\\'),
                        other => {
                            out.push('\\');
                            out.push(other as char);
                        },
                    }
                    i += 2;
                },
                b'"' => {
                    self.pos = i + 1;
                    return Some(out);
                },
                _ => {
                    // Copy a full UTF-8 sequence so multi-byte characters
                    // survive intact.
                    let ch_len = utf8_len(bytes[i]);
                    out.push_str(&self.text[i..i + ch_len]);
                    i += ch_len;
                },
            }
        }
        None
    }

    /// Skip a scalar property value: a quoted string, or a bare token up to
    /// the terminating `;`.
    pub fn skip_value(&mut self) {
        self.skip_whitespace();
        if self.read_string().is_some() {
            return;
        }
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b';' && bytes[self.pos] != b'}' {
            self.pos += 1;
        }
    }

    /// Remaining unconsumed text.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// The full underlying text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.text
    }
}

#[inline]
fn utf8_len(first: u8) -> usize {
    match first {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

/// Advance past a double-quoted string starting at `open`; returns the index
/// just after the closing quote, or `None` if the string never terminates.
fn skip_string(bytes: &[u8], open: usize) -> Option<usize> {
    debug_assert_eq!(bytes[open], b'"');
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn matching_delim(text: &str, open: usize, open_b: u8, close_b: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&open_b) {
        return None;
    }
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            },
            b if b == open_b => depth += 1,
            b if b == close_b => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
        i += 1;
    }
    None
}

/// Index of the `}` matching the `{` at `open`, skipping quoted strings.
#[inline]
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    matching_delim(text, open, b'{', b'}')
}

/// Index of the `]` matching the `[` at `open`, skipping quoted strings.
#[inline]
pub fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    matching_delim(text, open, b'[', b']')
}

/// Locate the `slides = [` marker, tolerating interior whitespace.
///
/// Returns `(open_bracket, after_bracket)` for the first occurrence of the
/// `slides` identifier that is followed by `=` and `[`.
pub fn find_slides_marker(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    for start in memmem::find_iter(bytes, b"slides") {
        // Reject hits inside longer identifiers such as `data-slides`.
        if start > 0 && is_ident_byte(bytes[start - 1]) {
            continue;
        }
        let mut cursor = Cursor::new(&text[start + "slides".len()..]);
        cursor.skip_whitespace();
        if !cursor.eat(b'=') {
            continue;
        }
        cursor.skip_whitespace();
        if cursor.peek() == Some(b'[') {
            let open = start + "slides".len() + cursor.pos();
            return Some((open, open + 1));
        }
    }
    None
}

/// Byte spans of each top-level `SLIDE { ... }` block, in discovery order.
///
/// Each span covers the `SLIDE` keyword through its matching `}` inclusive.
/// Scanning is string-aware, so a content value containing `SLIDE` or braces
/// never produces a phantom block. A `SLIDE` keyword whose block never
/// balances is skipped rather than reported.
pub fn slide_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let Some((open, body_start)) = find_slides_marker(text) else {
        return spans;
    };
    let end = matching_bracket(text, open).unwrap_or(text.len());
    let bytes = text.as_bytes();
    let mut i = body_start;
    while i < end {
        match bytes[i] {
            b'"' => {
                let Some(next) = skip_string(bytes, i) else {
                    break;
                };
                i = next;
            },
            b'S' => {
                let prev_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
                if prev_ok && bytes[i..end].starts_with(b"SLIDE") {
                    let after = i + 5;
                    if after >= end || !is_ident_byte(bytes[after]) {
                        let mut cursor = Cursor::new(&text[after..end]);
                        cursor.skip_whitespace();
                        if cursor.peek() == Some(b'{') {
                            let brace = after + cursor.pos();
                            if let Some(close) = matching_brace(&text[..end], brace) {
                                spans.push(i..close + 1);
                                i = close + 1;
                                continue;
                            }
                        }
                    }
                }
                i += 1;
            },
            _ => i += 1,
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_nested_braces() {
        let text = "a { b { } c { d { } } } tail";
        assert_eq!(matching_brace(text, 2), Some(22));
        assert_eq!(matching_brace(text, 6), Some(8));
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let text = r#"{ content = "curly } brace { soup"; }"#;
        assert_eq!(matching_brace(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn unbalanced_braces_yield_none() {
        assert_eq!(matching_brace("{ { }", 0), None);
        assert_eq!(matching_bracket("[ [ ]", 0), None);
    }

    #[test]
    fn finds_slides_marker_with_loose_whitespace() {
        let (open, after) = find_slides_marker("PRESENTATION { slides   =\n [ ] }").unwrap();
        assert_eq!(open, "PRESENTATION { slides   =\n ".len());
        assert_eq!(after, open + 1);
    }

    #[test]
    fn marker_skips_longer_identifiers() {
        assert!(find_slides_marker("data-slides = [ ]").is_none());
        assert!(find_slides_marker("slideshow = [ ]").is_none());
    }

    #[test]
    fn slide_spans_in_order() {
        let text = "slides = [ SLIDE { div { } } SLIDE { } ]";
        let spans = slide_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].clone()], "SLIDE { div { } }");
        assert_eq!(&text[spans[1].clone()], "SLIDE { }");
    }

    #[test]
    fn slide_keyword_inside_string_is_not_a_block() {
        let text = r#"slides = [ SLIDE { div { content = "SLIDE { fake }"; } } ]"#;
        assert_eq!(slide_spans(text).len(), 1);
    }

    #[test]
    fn missing_array_yields_no_spans() {
        assert!(slide_spans("PRESENTATION { }").is_empty());
    }

    #[test]
    fn read_string_unescapes() {
        let mut cursor = Cursor::new(r#""say \"hi\" \\ done""#);
        assert_eq!(cursor.read_string().unwrap(), r#"say "hi" \ done"#);
        assert!(cursor.is_eof());
    }

    #[test]
    fn read_string_keeps_multibyte_characters() {
        let mut cursor = Cursor::new("\"héllo — ☃\"");
        assert_eq!(cursor.read_string().unwrap(), "héllo — ☃");
    }

    #[test]
    fn unterminated_string_returns_none() {
        let mut cursor = Cursor::new("\"never closed");
        assert_eq!(cursor.read_string(), None);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn identifier_includes_hyphens() {
        let mut cursor = Cursor::new("data-background-image = x");
        assert_eq!(cursor.read_identifier(), Some("data-background-image"));
    }
}
