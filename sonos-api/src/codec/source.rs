use serde::{Deserialize, Serialize};

/// What a renderer is playing from, judged by the track URI's scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceScheme {
    /// Network share (`x-file-cifs:`)
    File,
    /// HTTP stream (`x-sonos-http:`)
    Http,
    /// Internet radio (`x-rincon-mp3radio:` or `aac:`)
    Radio,
    /// Line-in of a speaker (`x-rincon-stream:`)
    LineIn,
    /// Following a group coordinator (`x-rincon:`)
    MasterLink,
    /// The speaker's own queue (`x-rincon-queue:`)
    Queue,
    #[default]
    Unknown,
}

impl SourceScheme {
    pub const FILE_SCHEME: &'static str = "x-file-cifs:";
    pub const HTTP_SCHEME: &'static str = "x-sonos-http:";
    pub const RADIO_SCHEME: &'static str = "x-rincon-mp3radio:";
    pub const RADIO_AAC_SCHEME: &'static str = "aac:";
    pub const LINE_IN_SCHEME: &'static str = "x-rincon-stream:";
    pub const MASTER_SCHEME: &'static str = "x-rincon:";
    pub const QUEUE_SCHEME: &'static str = "x-rincon-queue:";

    /// Prefixes in match order; the first match wins
    const PREFIXES: [(&'static str, SourceScheme); 7] = [
        (Self::FILE_SCHEME, SourceScheme::File),
        (Self::HTTP_SCHEME, SourceScheme::Http),
        (Self::RADIO_SCHEME, SourceScheme::Radio),
        (Self::RADIO_AAC_SCHEME, SourceScheme::Radio),
        (Self::LINE_IN_SCHEME, SourceScheme::LineIn),
        (Self::MASTER_SCHEME, SourceScheme::MasterLink),
        (Self::QUEUE_SCHEME, SourceScheme::Queue),
    ];

    /// Classify a track URI by its scheme prefix
    pub fn classify(uri: &str) -> Self {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| uri.starts_with(prefix))
            .map(|&(_, scheme)| scheme)
            .unwrap_or_default()
    }
}
