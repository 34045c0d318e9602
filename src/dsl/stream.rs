//! Streaming block parser: incremental compilation of markup as it arrives.
//!
//! A generation backend produces markup token by token; this parser consumes
//! chunks in arrival order and reports each top-level element the moment its
//! closing brace arrives, tagged with its slide index and whether the
//! enclosing slide also completed. Chunk boundaries may split the text
//! anywhere, including mid-identifier and mid-string, because all matching
//! operates on the cumulative buffer.
//!
//! The parser never fails: malformed input simply never reaches depth zero
//! and stays buffered. Deadlines are the caller's concern, as is sequencing;
//! one instance serves one in-flight generation session and performs no
//! internal locking.

use crate::common::scan::{is_ident_byte, Cursor, ScopeKind, ScopeStack};
use memchr::memmem;
use serde::{Deserialize, Serialize};

/// A fully closed top-level element, reported by [`StreamingParser::add_chunk`].
///
/// When a slide closes with no element boundary coinciding (trailing
/// whitespace or braces only, or its last element was already flushed by an
/// earlier call), a synthetic zero-length marker is emitted instead: `dsl`
/// and `element_type` are empty and `is_slide_complete` is `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEvent {
    /// Exact source text of the element, from its tag through its closing brace
    pub dsl: String,
    /// The element's tag name
    pub element_type: String,
    /// Index of the enclosing slide, in discovery order
    pub slide_index: usize,
    /// Whether the enclosing slide completed with this element
    pub is_slide_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing structural seen yet; waiting for `slides = [` (or a bare
    /// `SLIDE {`, which opens the array implicitly)
    AwaitingSlidesArray,
    /// Inside the slides array; scope stack tracks slide/element nesting
    InSlides,
    /// The array's closing `]` was seen; all further input is ignored
    Done,
}

/// Stateful incremental parser, one per in-flight generation session.
///
/// Holds only buffered text; dropping it is the whole cancellation story.
/// Consumed input is discarded as soon as it is understood, bounding memory
/// to roughly one slide's text.
#[derive(Debug)]
pub struct StreamingParser {
    phase: Phase,
    /// Unconsumed raw text
    buf: String,
    scopes: ScopeStack,
    /// Current slide index; `None` before the first `SLIDE` opens
    slide_index: Option<usize>,
    /// Braces open inside the current slide, its own brace included
    slide_depth: u32,
    /// Braces open inside the current element, its own brace included
    elem_depth: u32,
    /// Tag of the in-progress element
    elem_tag: String,
    /// Partially accumulated element text
    elem_buf: String,
    /// Inside a quoted value
    in_string: bool,
    /// Last string byte was a backslash
    escape: bool,
    /// Only whitespace/`;` seen since the last element closed in this slide
    clean_gap: bool,
    slides_seen: usize,
}

impl Default for StreamingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingParser {
    /// Create a parser awaiting the start of a slides array.
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingSlidesArray,
            buf: String::new(),
            scopes: ScopeStack::new(),
            slide_index: None,
            slide_depth: 0,
            elem_depth: 0,
            elem_tag: String::new(),
            elem_buf: String::new(),
            in_string: false,
            escape: false,
            clean_gap: false,
            slides_seen: 0,
        }
    }

    /// Clear all state for reuse across sessions.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bytes currently held (unconsumed buffer plus in-progress element).
    pub fn buffered(&self) -> usize {
        self.buf.len() + self.elem_buf.len()
    }

    /// Index of the slide currently being parsed, `None` before the first.
    pub fn slide_index(&self) -> Option<usize> {
        self.slide_index
    }

    /// Number of `SLIDE` blocks opened so far.
    pub fn slides_seen(&self) -> usize {
        self.slides_seen
    }

    /// Append a chunk and return the elements it completed, in document
    /// order. Elements are never re-emitted once returned.
    pub fn add_chunk(&mut self, chunk: &str) -> Vec<ElementEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Done {
            return events;
        }
        self.buf.push_str(chunk);
        if self.phase == Phase::AwaitingSlidesArray && !self.enter_slides() {
            return events;
        }
        self.scan(&mut events);
        events
    }

    /// Look for `slides = [` (or a bare `SLIDE {`) in the buffer. Consumes
    /// everything up to and including the marker; on a partial match at the
    /// buffer's end, retains just enough text to finish matching later.
    fn enter_slides(&mut self) -> bool {
        let consume_to = {
            let text = self.buf.as_str();
            let bytes = text.as_bytes();
            // Earliest position that might still become a marker once more
            // text arrives; nothing before it can matter again.
            let mut pending: Option<usize> = None;
            // Complete `slides = [` marker: (start, index just past `[`)
            let mut marker: Option<(usize, usize)> = None;

            for start in memmem::find_iter(bytes, b"slides") {
                if start > 0 && is_ident_byte(bytes[start - 1]) {
                    continue;
                }
                let mut cursor = Cursor::new(text);
                cursor.seek(start + "slides".len());
                cursor.skip_whitespace();
                match cursor.peek() {
                    None => {
                        pending = Some(start);
                        break;
                    },
                    Some(b'=') => {
                        cursor.bump();
                        cursor.skip_whitespace();
                        match cursor.peek() {
                            None => {
                                pending = Some(start);
                                break;
                            },
                            Some(b'[') => {
                                marker = Some((start, cursor.pos() + 1));
                                break;
                            },
                            Some(_) => continue,
                        }
                    },
                    Some(_) => continue,
                }
            }

            // A bare `SLIDE {` opens the array implicitly; generation
            // backends sometimes skip the surrounding scaffold.
            let mut slide: Option<usize> = None;
            for start in memmem::find_iter(bytes, b"SLIDE") {
                if start > 0 && is_ident_byte(bytes[start - 1]) {
                    continue;
                }
                let after = start + "SLIDE".len();
                if bytes.get(after).copied().is_some_and(is_ident_byte) {
                    continue;
                }
                let mut cursor = Cursor::new(text);
                cursor.seek(after);
                cursor.skip_whitespace();
                match cursor.peek() {
                    None => {
                        pending = Some(pending.map_or(start, |p| p.min(start)));
                        break;
                    },
                    Some(b'{') => {
                        slide = Some(start);
                        break;
                    },
                    Some(_) => continue,
                }
            }

            match (marker, slide) {
                (Some((m_start, _)), Some(s_start)) if s_start < m_start => Ok(s_start),
                (Some((_, past_bracket)), _) => Ok(past_bracket),
                (None, Some(s_start)) => Ok(s_start),
                // Keep only what could still complete a marker.
                (None, None) => Err(pending.unwrap_or_else(|| {
                    let n =
                        suffix_overlap(bytes, b"slides").max(suffix_overlap(bytes, b"SLIDE"));
                    bytes.len() - n
                })),
            }
        };

        match consume_to {
            Ok(cut) => {
                self.buf.drain(..cut);
                tracing::debug!("slides array opened");
                self.phase = Phase::InSlides;
                self.scopes.push(ScopeKind::Array);
                true
            },
            Err(keep_from) => {
                self.buf.drain(..keep_from);
                false
            },
        }
    }

    /// Scan the buffer inside the slides array, consuming understood text
    /// and emitting completed elements.
    fn scan(&mut self, events: &mut Vec<ElementEvent>) {
        let buf = std::mem::take(&mut self.buf);
        let bytes = buf.as_bytes();
        let len = bytes.len();
        let mut i = 0;
        // Start of text that must survive into the next call (an identifier
        // still waiting for its decisive following character).
        let mut retain_from = len;

        'outer: while i < len {
            match self.scopes.last().copied() {
                Some(ScopeKind::Element) => {
                    let seg_start = i;
                    let mut closed = false;
                    while i < len {
                        let b = bytes[i];
                        if self.in_string {
                            if self.escape {
                                self.escape = false;
                            } else if b == b'\\' {
                                self.escape = true;
                            } else if b == b'"' {
                                self.in_string = false;
                            }
                        } else {
                            match b {
                                b'"' => self.in_string = true,
                                b'{' => {
                                    self.elem_depth += 1;
                                    self.slide_depth += 1;
                                },
                                b'}' => {
                                    self.elem_depth = self.elem_depth.saturating_sub(1);
                                    self.slide_depth = self.slide_depth.saturating_sub(1);
                                    if self.elem_depth == 0 {
                                        i += 1;
                                        closed = true;
                                        break;
                                    }
                                },
                                _ => {},
                            }
                        }
                        i += 1;
                    }
                    self.elem_buf.push_str(&buf[seg_start..i]);
                    if closed {
                        events.push(ElementEvent {
                            dsl: std::mem::take(&mut self.elem_buf),
                            element_type: std::mem::take(&mut self.elem_tag),
                            slide_index: self.slide_index.unwrap_or(0),
                            is_slide_complete: false,
                        });
                        self.scopes.pop();
                        self.clean_gap = true;
                    }
                },

                Some(ScopeKind::Slide) => {
                    if self.in_string {
                        // Slide-level attribute value; skip to its close.
                        while i < len {
                            let b = bytes[i];
                            i += 1;
                            if self.escape {
                                self.escape = false;
                            } else if b == b'\\' {
                                self.escape = true;
                            } else if b == b'"' {
                                self.in_string = false;
                                break;
                            }
                        }
                        continue;
                    }
                    let b = bytes[i];
                    if b.is_ascii_whitespace() || b == b';' {
                        i += 1;
                    } else if b == b'}' {
                        self.slide_depth = self.slide_depth.saturating_sub(1);
                        i += 1;
                        if self.slide_depth == 0 {
                            self.complete_slide(events);
                        }
                    } else if b == b'{' {
                        self.slide_depth += 1;
                        self.clean_gap = false;
                        i += 1;
                    } else if b == b'"' {
                        self.in_string = true;
                        self.clean_gap = false;
                        i += 1;
                    } else if is_ident_byte(b) {
                        let ident_start = i;
                        while i < len && is_ident_byte(bytes[i]) {
                            i += 1;
                        }
                        let mut j = i;
                        while j < len && bytes[j].is_ascii_whitespace() {
                            j += 1;
                        }
                        if j >= len {
                            // Cannot yet tell element from attribute.
                            retain_from = ident_start;
                            break 'outer;
                        }
                        if bytes[j] == b'{' {
                            self.elem_tag = buf[ident_start..i].to_string();
                            self.elem_buf.clear();
                            self.elem_buf.push_str(&buf[ident_start..j + 1]);
                            self.elem_depth = 1;
                            self.slide_depth += 1;
                            self.scopes.push(ScopeKind::Element);
                            self.clean_gap = false;
                            i = j + 1;
                        } else {
                            // Slide-level data-attribute (or stray text); its
                            // value is consumed by the punctuation rules.
                            self.clean_gap = false;
                        }
                    } else {
                        // `=` and other punctuation between attribute parts.
                        self.clean_gap = false;
                        i += 1;
                    }
                },

                // Between slides (or before the first one).
                _ => {
                    let b = bytes[i];
                    if b.is_ascii_whitespace() || b == b';' || b == b',' {
                        i += 1;
                    } else if b == b']' {
                        tracing::debug!(slides = self.slides_seen, "slides array closed");
                        self.phase = Phase::Done;
                        self.scopes.clear();
                        retain_from = len;
                        break 'outer;
                    } else if is_ident_byte(b) {
                        let ident_start = i;
                        while i < len && is_ident_byte(bytes[i]) {
                            i += 1;
                        }
                        let mut j = i;
                        while j < len && bytes[j].is_ascii_whitespace() {
                            j += 1;
                        }
                        if j >= len {
                            retain_from = ident_start;
                            break 'outer;
                        }
                        if &buf[ident_start..i] == "SLIDE" && bytes[j] == b'{' {
                            let next = self.slide_index.map_or(0, |n| n + 1);
                            tracing::debug!(slide = next, "slide opened");
                            self.slide_index = Some(next);
                            self.slides_seen += 1;
                            self.slide_depth = 1;
                            self.clean_gap = false;
                            self.scopes.push(ScopeKind::Slide);
                            i = j + 1;
                        }
                        // Anything else is noise between slides; the
                        // identifier is consumed and scanning continues.
                    } else {
                        i += 1;
                    }
                },
            }
        }

        if retain_from < len {
            self.buf = buf[retain_from..].to_string();
        } else if self.phase == Phase::Done {
            self.buf.clear();
        }
    }

    /// The current slide's depth returned to zero: mark the element that
    /// closed at this boundary, or synthesize a completion marker.
    fn complete_slide(&mut self, events: &mut Vec<ElementEvent>) {
        let idx = self.slide_index.unwrap_or(0);
        let coincides = self.clean_gap
            && events
                .last()
                .is_some_and(|e| e.slide_index == idx && !e.is_slide_complete);
        if coincides {
            if let Some(last) = events.last_mut() {
                last.is_slide_complete = true;
            }
        } else {
            events.push(ElementEvent {
                dsl: String::new(),
                element_type: String::new(),
                slide_index: idx,
                is_slide_complete: true,
            });
        }
        self.scopes.pop();
        self.clean_gap = false;
    }
}

/// Length of the longest suffix of `text` that is a prefix of `pattern`.
fn suffix_overlap(text: &[u8], pattern: &[u8]) -> usize {
    let max = pattern.len().min(text.len());
    for k in (1..=max).rev() {
        if text[text.len() - k..] == pattern[..k] {
            return k;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed(parser: &mut StreamingParser, chunks: &[&str]) -> Vec<ElementEvent> {
        let mut events = Vec::new();
        for chunk in chunks {
            events.extend(parser.add_chunk(chunk));
        }
        events
    }

    #[test]
    fn single_chunk_emits_elements_in_order() {
        let mut parser = StreamingParser::new();
        let events = parser.add_chunk(
            r#"PRESENTATION { slides = [ SLIDE { h1 { content = "t"; } p { content = "b"; } } ] }"#,
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].element_type, "h1");
        assert!(!events[0].is_slide_complete);
        assert_eq!(events[1].element_type, "p");
        assert!(events[1].is_slide_complete);
        assert_eq!(events[1].slide_index, 0);
    }

    #[test]
    fn worked_example_from_two_chunks() {
        // chunk 1 = `SLIDE { div { classes="x"; `, chunk 2 = `content="y"; } }`
        let mut parser = StreamingParser::new();
        assert!(parser.add_chunk(r#"SLIDE { div { classes="x"; "#).is_empty());
        let events = parser.add_chunk(r#"content="y"; } }"#);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].element_type, "div");
        assert_eq!(events[0].slide_index, 0);
        assert!(events[0].is_slide_complete);
        assert_eq!(events[0].dsl, r#"div { classes="x"; content="y"; }"#);
    }

    #[test]
    fn elements_return_only_once() {
        let mut parser = StreamingParser::new();
        let first = parser.add_chunk("slides = [ SLIDE { div { content = \"a\"; }");
        assert_eq!(first.len(), 1);
        let second = parser.add_chunk(" } ]");
        // The div was already flushed; slide completion arrives as a
        // synthetic marker.
        assert_eq!(second.len(), 1);
        assert!(second[0].dsl.is_empty());
        assert!(second[0].is_slide_complete);
        assert_eq!(second[0].slide_index, 0);
    }

    #[test]
    fn splitting_mid_identifier_and_mid_marker() {
        let mut parser = StreamingParser::new();
        let events = feed(
            &mut parser,
            &["PRESENTATION { sli", "des = [ SL", "IDE { di", "v { content = \"ok\"; } } ]"],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].element_type, "div");
        assert!(events[0].is_slide_complete);
    }

    #[test]
    fn splitting_mid_string_with_braces_inside() {
        let mut parser = StreamingParser::new();
        let events = feed(
            &mut parser,
            &[
                "slides = [ SLIDE { div { content = \"left {",
                " right }\"; } } ]",
            ],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].dsl, "div { content = \"left { right }\"; }");
    }

    #[test]
    fn nested_children_close_with_the_outer_element() {
        let mut parser = StreamingParser::new();
        let events = parser.add_chunk(
            "slides = [ SLIDE { ul { children = [ li { content = \"a\"; }; li { content = \"b\"; }; ]; } } ]",
        );
        // Only the top-level ul is reported.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].element_type, "ul");
        assert!(events[0].is_slide_complete);
    }

    #[test]
    fn slide_indices_advance_per_slide() {
        let mut parser = StreamingParser::new();
        let events = parser.add_chunk(
            "slides = [ SLIDE { p { content = \"a\"; } } SLIDE { p { content = \"b\"; } } ]",
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].slide_index, 0);
        assert_eq!(events[1].slide_index, 1);
        assert!(events[0].is_slide_complete && events[1].is_slide_complete);
        assert_eq!(parser.slides_seen(), 2);
    }

    #[test]
    fn slide_level_attrs_do_not_emit_elements() {
        let mut parser = StreamingParser::new();
        let events = parser.add_chunk(
            "slides = [ SLIDE { data-transition = \"zoom\"; div { content = \"x\"; } } ]",
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].element_type, "div");
    }

    #[test]
    fn empty_slide_emits_a_synthetic_marker() {
        let mut parser = StreamingParser::new();
        let events = parser.add_chunk("slides = [ SLIDE { } ]");
        assert_eq!(events.len(), 1);
        assert!(events[0].dsl.is_empty());
        assert!(events[0].element_type.is_empty());
        assert!(events[0].is_slide_complete);
    }

    #[test]
    fn malformed_input_stays_buffered_without_error() {
        let mut parser = StreamingParser::new();
        assert!(parser.add_chunk("slides = [ SLIDE { div { never closes").is_empty());
        assert!(parser.add_chunk(" still nothing").is_empty());
        assert!(parser.buffered() > 0);
    }

    #[test]
    fn input_after_array_close_is_ignored() {
        let mut parser = StreamingParser::new();
        parser.add_chunk("slides = [ SLIDE { } ] ; }");
        assert!(parser.add_chunk("SLIDE { div { content = \"x\"; } }").is_empty());
    }

    #[test]
    fn preamble_before_marker_is_discarded_and_memory_stays_bounded() {
        let mut parser = StreamingParser::new();
        for _ in 0..64 {
            assert!(parser.add_chunk("noise without any marker at all ").is_empty());
        }
        assert!(parser.buffered() < 16);
        let events = parser.add_chunk("slides = [ SLIDE { p { content = \"x\"; } } ]");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn reset_allows_reuse() {
        let mut parser = StreamingParser::new();
        parser.add_chunk("slides = [ SLIDE { p { content = \"a\"; } } ]");
        parser.reset();
        assert_eq!(parser.slide_index(), None);
        assert_eq!(parser.buffered(), 0);
        let events = parser.add_chunk("slides = [ SLIDE { p { content = \"b\"; } } ]");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].slide_index, 0);
    }

    const PROP_SOURCE: &str = concat!(
        "PRESENTATION { slides = [ ",
        "SLIDE { h1 { content = \"a b\"; } ",
        "div { classes = \"c\"; children = [ p { content = \"x{y}\"; }; ]; } } ",
        "SLIDE { data-state = \"s\"; img { content = \"i.png\"; } } ",
        "] }",
    );

    /// The element payloads of `events`, synthetic completion markers
    /// excluded. Where the completion flag lands depends on chunk
    /// boundaries; the elements themselves must not.
    fn element_events(events: &[ElementEvent]) -> Vec<(String, String, usize)> {
        events
            .iter()
            .filter(|e| !e.dsl.is_empty())
            .map(|e| (e.dsl.clone(), e.element_type.clone(), e.slide_index))
            .collect()
    }

    proptest! {
        #[test]
        fn arbitrary_chunking_yields_the_same_elements(
            mut cuts in proptest::collection::vec(1usize..PROP_SOURCE.len(), 0..6),
        ) {
            cuts.sort_unstable();
            cuts.dedup();

            let mut parser = StreamingParser::new();
            let mut chunked = Vec::new();
            let mut prev = 0;
            for cut in cuts.into_iter().chain([PROP_SOURCE.len()]) {
                chunked.extend(parser.add_chunk(&PROP_SOURCE[prev..cut]));
                prev = cut;
            }

            let whole = StreamingParser::new().add_chunk(PROP_SOURCE);
            prop_assert_eq!(element_events(&chunked), element_events(&whole));
            for slide in 0..2 {
                let completions = chunked
                    .iter()
                    .filter(|e| e.slide_index == slide && e.is_slide_complete)
                    .count();
                prop_assert_eq!(completions, 1, "slide {}", slide);
            }
        }
    }

    #[test]
    fn exactly_one_completion_flag_per_slide() {
        let source = r#"PRESENTATION { slides = [
            SLIDE { h1 { content = "a"; } p { content = "b"; } }
            SLIDE { data-state = "x"; img { content = "c.png"; } }
            SLIDE { }
        ] }"#;
        // Feed one character at a time: the cruellest chunking.
        let mut parser = StreamingParser::new();
        let mut events = Vec::new();
        let mut scratch = [0u8; 4];
        for ch in source.chars() {
            events.extend(parser.add_chunk(ch.encode_utf8(&mut scratch)));
        }
        for slide in 0..3 {
            let complete: Vec<_> = events
                .iter()
                .filter(|e| e.slide_index == slide && e.is_slide_complete)
                .collect();
            assert_eq!(complete.len(), 1, "slide {slide}");
        }
    }
}
