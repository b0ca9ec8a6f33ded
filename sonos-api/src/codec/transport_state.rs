use serde::{Deserialize, Serialize};

/// Playback state reported by `GetTransportInfo`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportState {
    Playing,
    Paused,
    /// Also stands in for transitional and unknown states
    #[default]
    Stopped,
}

impl TransportState {
    /// Decode a wire token; anything unrecognised is `Stopped`
    pub fn from_token(token: &str) -> Self {
        match token {
            "PLAYING" => TransportState::Playing,
            "PAUSED_PLAYBACK" => TransportState::Paused,
            _ => TransportState::Stopped,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            TransportState::Playing => "PLAYING",
            TransportState::Paused => "PAUSED_PLAYBACK",
            TransportState::Stopped => "STOPPED",
        }
    }
}
