//! Streaming tag-path matcher
//!
//! Finds the text content of one element, addressed by the chain of element
//! names from the document root, while the response is read one byte at a
//! time. Nothing is buffered beyond a few counters: names are compared
//! against the expected path segment as their bytes arrive.
//!
//! The matcher recognises open tags (with attributes and quoted values),
//! close tags, self-closing tags and `<?...>` / `<!...>` markup, which is
//! skipped. It assumes the document is well formed; close tags are not
//! checked against the element they close. Text is delivered raw, without
//! entity decoding.

use crate::buffer::ValueSink;

/// Element names from the document root down to the target element
pub type TagPath = &'static [&'static str];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexer {
    Text,
    TagOpen,
    Name,
    Attributes,
    Quoted(u8),
    Skip,
}

/// Incremental matcher for a single [`TagPath`]
///
/// Invariant: `matched <= depth`, and the first `matched` path segments are
/// the names of the outermost `matched` open elements.
#[derive(Debug, Clone)]
pub struct TagPathMatcher {
    path: TagPath,
    depth: usize,
    matched: usize,
    lexer: Lexer,
    closing: bool,
    self_closing: bool,
    name_len: usize,
    name_matches: bool,
    capturing: bool,
}

impl TagPathMatcher {
    pub const fn new() -> Self {
        Self {
            path: &[],
            depth: 0,
            matched: 0,
            lexer: Lexer::Text,
            closing: false,
            self_closing: false,
            name_len: 0,
            name_matches: false,
            capturing: false,
        }
    }

    /// Forget the stream position and the target path
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Target a new path without losing the stream position
    ///
    /// Progress already made on segments shared with the previous path is
    /// kept, so sibling fields can be read one after another from a single
    /// response as long as they appear in the requested order.
    pub fn set_path(&mut self, path: TagPath) {
        let common = self
            .path
            .iter()
            .zip(path.iter())
            .take(self.matched)
            .take_while(|(old, new)| old == new)
            .count();

        self.path = path;
        self.matched = common;
        self.capturing = false;
    }

    pub fn path(&self) -> TagPath {
        self.path
    }

    /// Whether the target element is open and its text is being written
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Feed one byte of the response
    ///
    /// Returns `true` once the target element's text is complete in `out`.
    /// `out.begin()` is called when the target opens; the sink is untouched
    /// before that.
    pub fn feed(&mut self, byte: u8, out: &mut dyn ValueSink) -> bool {
        match self.lexer {
            Lexer::Text => {
                if byte == b'<' {
                    self.lexer = Lexer::TagOpen;
                    if self.capturing {
                        self.capturing = false;
                        return true;
                    }
                } else if self.capturing {
                    out.push(byte);
                }
            }
            Lexer::TagOpen => match byte {
                b'/' => self.begin_name(true),
                b'?' | b'!' => self.lexer = Lexer::Skip,
                _ => {
                    self.begin_name(false);
                    self.name_byte(byte);
                }
            },
            Lexer::Name => match byte {
                b'>' => return self.end_tag(out),
                b'/' => {
                    self.self_closing = true;
                    self.lexer = Lexer::Attributes;
                }
                b if b.is_ascii_whitespace() => self.lexer = Lexer::Attributes,
                _ => self.name_byte(byte),
            },
            Lexer::Attributes => match byte {
                b'>' => return self.end_tag(out),
                b'"' | b'\'' => {
                    self.self_closing = false;
                    self.lexer = Lexer::Quoted(byte);
                }
                b'/' => self.self_closing = true,
                b if b.is_ascii_whitespace() => {}
                _ => self.self_closing = false,
            },
            Lexer::Quoted(quote) => {
                if byte == quote {
                    self.lexer = Lexer::Attributes;
                }
            }
            Lexer::Skip => {
                if byte == b'>' {
                    self.lexer = Lexer::Text;
                }
            }
        }
        false
    }

    /// The segment an opening tag at the current depth has to match
    fn candidate(&self) -> Option<&'static [u8]> {
        if self.depth == self.matched {
            self.path.get(self.matched).map(|name| name.as_bytes())
        } else {
            None
        }
    }

    fn begin_name(&mut self, closing: bool) {
        self.closing = closing;
        self.self_closing = false;
        self.name_len = 0;
        self.name_matches = !closing;
        self.lexer = Lexer::Name;
    }

    fn name_byte(&mut self, byte: u8) {
        if self.name_matches {
            self.name_matches = self
                .candidate()
                .and_then(|name| name.get(self.name_len))
                .is_some_and(|&expected| expected == byte);
        }
        self.name_len += 1;
    }

    fn end_tag(&mut self, out: &mut dyn ValueSink) -> bool {
        self.lexer = Lexer::Text;

        if self.closing {
            self.depth = self.depth.saturating_sub(1);
            self.matched = self.matched.min(self.depth);
            return false;
        }

        let hit = self.name_matches
            && self
                .candidate()
                .is_some_and(|name| name.len() == self.name_len);

        if self.self_closing {
            if hit && self.matched + 1 == self.path.len() {
                out.begin();
                return true;
            }
            return false;
        }

        if hit {
            self.matched += 1;
            if self.matched == self.path.len() {
                out.begin();
                self.capturing = true;
            }
        }
        self.depth += 1;
        false
    }
}

impl Default for TagPathMatcher {
    fn default() -> Self {
        Self::new()
    }
}
