use serde::{Deserialize, Serialize};

/// Repeat and shuffle settings of a renderer's queue
///
/// The wire carries one of four tokens; this struct is the only in-memory
/// form. The 2-bit mask from [`PlayMode::bits`] exists for callers that
/// store the mode compactly and is never sent to a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayMode {
    pub repeat: bool,
    pub shuffle: bool,
}

const REPEAT_BIT: u8 = 0b01;
const SHUFFLE_BIT: u8 = 0b10;

impl PlayMode {
    pub const NORMAL: PlayMode = PlayMode::new(false, false);
    pub const REPEAT_ALL: PlayMode = PlayMode::new(true, false);
    pub const SHUFFLE_NOREPEAT: PlayMode = PlayMode::new(false, true);
    pub const SHUFFLE: PlayMode = PlayMode::new(true, true);

    pub const fn new(repeat: bool, shuffle: bool) -> Self {
        Self { repeat, shuffle }
    }

    /// Decode a wire token; anything unrecognised is [`PlayMode::NORMAL`]
    pub fn from_token(token: &str) -> Self {
        match token {
            "REPEAT_ALL" => Self::REPEAT_ALL,
            "SHUFFLE_NOREPEAT" => Self::SHUFFLE_NOREPEAT,
            "SHUFFLE" => Self::SHUFFLE,
            _ => Self::NORMAL,
        }
    }

    /// The wire token for this mode
    pub fn token(&self) -> &'static str {
        match (self.repeat, self.shuffle) {
            (false, false) => "NORMAL",
            (true, false) => "REPEAT_ALL",
            (false, true) => "SHUFFLE_NOREPEAT",
            (true, true) => "SHUFFLE",
        }
    }

    /// Bit 0 is repeat, bit 1 is shuffle
    pub fn bits(&self) -> u8 {
        (if self.repeat { REPEAT_BIT } else { 0 }) | (if self.shuffle { SHUFFLE_BIT } else { 0 })
    }

    /// Inverse of [`PlayMode::bits`]; higher bits are ignored
    pub fn from_bits(bits: u8) -> Self {
        Self::new(bits & REPEAT_BIT != 0, bits & SHUFFLE_BIT != 0)
    }

    pub fn with_repeat(self, repeat: bool) -> Self {
        Self { repeat, ..self }
    }

    pub fn with_shuffle(self, shuffle: bool) -> Self {
        Self { shuffle, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NORMAL", false, false)]
    #[case("REPEAT_ALL", true, false)]
    #[case("SHUFFLE_NOREPEAT", false, true)]
    #[case("SHUFFLE", true, true)]
    fn test_token_table(#[case] token: &str, #[case] repeat: bool, #[case] shuffle: bool) {
        let mode = PlayMode::from_token(token);
        assert_eq!(mode, PlayMode::new(repeat, shuffle));
        assert_eq!(mode.token(), token);
    }

    #[rstest]
    #[case("")]
    #[case("REPEAT_ONE")]
    #[case("shuffle")]
    fn test_unknown_token_is_normal(#[case] token: &str) {
        assert_eq!(PlayMode::from_token(token), PlayMode::NORMAL);
    }

    #[test]
    fn test_bits_round_trip() {
        for bits in 0..4u8 {
            assert_eq!(PlayMode::from_bits(bits).bits(), bits);
        }
        assert_eq!(PlayMode::REPEAT_ALL.bits(), 0b01);
        assert_eq!(PlayMode::SHUFFLE_NOREPEAT.bits(), 0b10);
        assert_eq!(PlayMode::from_bits(0b111), PlayMode::SHUFFLE);
    }

    #[test]
    fn test_flag_updates() {
        assert_eq!(PlayMode::REPEAT_ALL.with_shuffle(true), PlayMode::SHUFFLE);
        assert_eq!(PlayMode::SHUFFLE.with_repeat(false), PlayMode::SHUFFLE_NOREPEAT);
    }
}
