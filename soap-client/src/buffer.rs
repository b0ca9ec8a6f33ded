//! Fixed-capacity output buffers
//!
//! Extracted values land in caller-owned storage. A buffer of capacity `N`
//! holds at most `N - 1` value bytes followed by a NUL terminator, so a
//! 4-byte buffer keeps three characters of a longer value and flags the
//! truncation instead of overflowing.

/// Destination for the text content of a matched element
///
/// The matcher calls `begin` when the target element opens and then pushes
/// bytes until the element's text ends. If the response ends before that,
/// the engine calls `abort` and the sink must hold what it held before
/// `begin`.
pub trait ValueSink {
    /// Start a new value, replacing the current contents
    fn begin(&mut self);

    /// Append one byte; bytes past capacity are dropped and recorded as truncation
    fn push(&mut self, byte: u8);

    /// Drop the value started by `begin` and restore the previous contents
    fn abort(&mut self);
}

/// Inline buffer of `N` bytes including the terminator
///
/// A second `N`-byte copy holds the contents from before the last
/// [`ValueSink::begin`], so a cut-off response never replaces the default.
#[derive(Clone)]
pub struct ValueBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
    saved: [u8; N],
    saved_len: usize,
    saved_truncated: bool,
}

impl<const N: usize> ValueBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
            saved: [0; N],
            saved_len: 0,
            saved_truncated: false,
        }
    }

    /// Create a buffer pre-filled with a default that survives a failed lookup
    pub fn with_default(default: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set(default);
        buffer
    }

    /// Replace the contents, truncating to capacity
    pub fn set(&mut self, value: &str) {
        self.clear();
        for &byte in value.as_bytes() {
            self.push(byte);
        }
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        if N > 0 {
            self.bytes[0] = 0;
        }
    }

    /// Maximum number of value bytes, excluding the terminator
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether bytes were dropped since the last clear
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The stored value bytes, without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The stored bytes including the NUL terminator (empty when `N == 0`)
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if N == 0 {
            &[]
        } else {
            &self.bytes[..=self.len]
        }
    }

    /// The value as text
    ///
    /// Truncation can split a multi-byte character; the incomplete tail is
    /// left out rather than failing the whole value.
    pub fn as_str(&self) -> &str {
        match std::str::from_utf8(self.as_bytes()) {
            Ok(text) => text,
            Err(err) => {
                let valid = &self.bytes[..err.valid_up_to()];
                // valid_up_to marks a UTF-8 boundary
                std::str::from_utf8(valid).unwrap_or_default()
            }
        }
    }
}

impl<const N: usize> ValueSink for ValueBuffer<N> {
    fn begin(&mut self) {
        self.saved = self.bytes;
        self.saved_len = self.len;
        self.saved_truncated = self.truncated;
        self.clear();
    }

    fn push(&mut self, byte: u8) {
        if self.len < self.capacity() {
            self.bytes[self.len] = byte;
            self.len += 1;
            self.bytes[self.len] = 0;
        } else {
            self.truncated = true;
        }
    }

    fn abort(&mut self) {
        self.bytes = self.saved;
        self.len = self.saved_len;
        self.truncated = self.saved_truncated;
    }
}

/// Formatting into a buffer fails once a byte has been dropped
impl<const N: usize> std::fmt::Write for ValueBuffer<N> {
    fn write_str(&mut self, text: &str) -> std::fmt::Result {
        for &byte in text.as_bytes() {
            self.push(byte);
        }
        if self.truncated {
            Err(std::fmt::Error)
        } else {
            Ok(())
        }
    }
}

impl<const N: usize> Default for ValueBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares the current value only
impl<const N: usize> PartialEq for ValueBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes() && self.truncated == other.truncated
    }
}

impl<const N: usize> Eq for ValueBuffer<N> {}

impl<const N: usize> std::fmt::Debug for ValueBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueBuffer")
            .field("value", &self.as_str())
            .field("capacity", &self.capacity())
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncation_keeps_terminator() {
        let mut buffer = ValueBuffer::<4>::new();
        buffer.set("0123456789");

        assert_eq!(buffer.as_str(), "012");
        assert_eq!(buffer.as_bytes_with_nul(), b"012\0");
        assert!(buffer.is_truncated());
    }

    #[test]
    fn test_value_that_fits_is_not_truncated() {
        let buffer = ValueBuffer::<5>::with_default("57");
        assert_eq!(buffer.as_str(), "57");
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_truncated());
    }

    #[test]
    fn test_exact_fit() {
        let buffer = ValueBuffer::<4>::with_default("abc");
        assert_eq!(buffer.as_str(), "abc");
        assert!(!buffer.is_truncated());
    }

    #[test]
    fn test_clear_resets_truncation() {
        let mut buffer = ValueBuffer::<3>::with_default("long");
        assert!(buffer.is_truncated());

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.is_truncated());
        assert_eq!(buffer.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_abort_restores_previous_value() {
        let mut buffer = ValueBuffer::<4>::with_default("dflt");
        assert!(buffer.is_truncated());

        buffer.begin();
        buffer.push(b'5');
        assert_eq!(buffer.as_str(), "5");

        buffer.abort();
        assert_eq!(buffer.as_str(), "dfl");
        assert_eq!(buffer.as_bytes_with_nul(), b"dfl\0");
        assert!(buffer.is_truncated());
    }

    #[test]
    fn test_equality_ignores_saved_value() {
        let mut first = ValueBuffer::<8>::with_default("old");
        first.begin();
        for &byte in b"57" {
            first.push(byte);
        }
        assert_eq!(first, ValueBuffer::<8>::with_default("57"));
    }

    #[test]
    fn test_zero_capacity_buffer() {
        let mut buffer = ValueBuffer::<0>::new();
        buffer.set("x");
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.is_truncated());
        assert_eq!(buffer.as_bytes_with_nul(), b"");
    }

    #[test]
    fn test_split_multibyte_character_is_dropped() {
        // "é" is two bytes; only its first byte fits after "ab"
        let buffer = ValueBuffer::<4>::with_default("abé");
        assert_eq!(buffer.as_bytes().len(), 3);
        assert_eq!(buffer.as_str(), "ab");
    }

    #[test]
    fn test_format_into_buffer() {
        use std::fmt::Write;

        let mut buffer = ValueBuffer::<12>::new();
        write!(buffer, "{}:{:02}:{:02}", 1, 2, 3).unwrap();
        assert_eq!(buffer.as_str(), "1:02:03");

        let mut small = ValueBuffer::<3>::new();
        assert!(write!(small, "{}", 1400).is_err());
        assert_eq!(small.as_str(), "14");
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(value in "[ -~]{0,64}") {
            let buffer = ValueBuffer::<8>::with_default(&value);
            prop_assert!(buffer.len() <= 7);
            prop_assert_eq!(buffer.is_truncated(), value.len() > 7);
            prop_assert_eq!(buffer.as_bytes_with_nul().last(), Some(&0u8));
            prop_assert!(value.starts_with(buffer.as_str()));
        }
    }
}
