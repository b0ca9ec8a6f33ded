use std::fmt::{Display, Write};
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use soap_client::protocol::UPNP_PORT;
use soap_client::{
    Command, CommandEngine, DeviceAddress, EngineConfig, ErrorHandler, FieldQuery, NoopHandler, Service, TagPath,
    TcpTransport, Transport, ValueBuffer, ValueSink,
};
use tracing::debug;

use crate::actions::*;
use crate::codec::{
    format_seek_time, parse_clamped, parse_leading_int, per_mille, time_to_seconds, PlayMode, SourceScheme,
    TransportState,
};
use crate::{ApiError, Result};

/// Holds `"0"`/`"1"` style flags
pub(crate) type FlagBuffer = ValueBuffer<3>;
/// Holds a short signed decimal
pub(crate) type NumberBuffer = ValueBuffer<8>;
/// Holds any transport state or play mode token
type TokenBuffer = ValueBuffer<20>;
/// Holds a `RINCON_<id>01400#0` address or a saved queue URI
type AddressBuffer = ValueBuffer<64>;
/// Enough of a track URI to classify its scheme
type SchemeBuffer = ValueBuffer<25>;

pub(crate) const EQ_MIN: i8 = -10;
pub(crate) const EQ_MAX: i8 = 10;
const VOLUME_MAX: u8 = 100;

pub(crate) fn format_number(value: impl Display) -> Result<NumberBuffer> {
    let mut text = NumberBuffer::new();
    write!(text, "{}", value).map_err(|_| ApiError::InvalidParameter(format!("{} does not fit", value)))?;
    Ok(text)
}

/// `RINCON_<speaker_id>0<port><suffix>`, the address of a speaker's own sources
fn rincon_address(speaker_id: &str, suffix: &str) -> Result<AddressBuffer> {
    let mut address = AddressBuffer::new();
    write!(address, "{}{}0{}{}", RINCON_PREFIX, speaker_id, UPNP_PORT, suffix)
        .map_err(|_| ApiError::InvalidParameter(format!("speaker id '{}' is too long", speaker_id)))?;
    Ok(address)
}

/// Direction for [`SonosClient::skip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Position of the current track, read in one exchange by
/// [`SonosClient::get_track_info`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Position in the queue, starting at 1; 0 when unknown
    pub number: u16,
    /// Length in seconds
    pub duration: u32,
    /// Elapsed time in seconds
    pub position: u32,
}

impl TrackInfo {
    pub fn per_mille(&self) -> u16 {
        per_mille(self.duration, self.position)
    }
}

/// A client for controlling Sonos speakers
///
/// Wraps one [`CommandEngine`], so commands run strictly one at a time.
/// Each method takes the speaker's IP; the port comes from the engine
/// configuration.
///
/// Read methods fall back to a default when the response lacks the field
/// (for example `Stopped`, `0` or `false`). Connect failures and timeouts
/// are returned as errors after the engine's error hook has fired; callers
/// that want the default in that case too can use `unwrap_or_default()`.
///
/// ```rust,no_run
/// use sonos_api::SonosClient;
/// use std::net::Ipv4Addr;
///
/// let mut client = SonosClient::new();
/// let speaker = Ipv4Addr::new(192, 168, 1, 100);
///
/// client.set_volume(speaker, 25)?;
/// client.play(speaker)?;
/// println!("{:?}", client.get_state(speaker)?);
/// # Ok::<(), sonos_api::ApiError>(())
/// ```
pub struct SonosClient<T = TcpTransport, H = NoopHandler> {
    engine: CommandEngine<T, H>,
}

impl SonosClient<TcpTransport, NoopHandler> {
    /// Create a client over TCP with the default configuration
    pub fn new() -> Self {
        Self::with_engine(CommandEngine::new(TcpTransport::default()))
    }

    /// Create a client over TCP with a custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let transport = TcpTransport::new(config.read_timeout);
        Ok(Self::with_engine(CommandEngine::new(transport).with_config(config)?))
    }
}

impl Default for SonosClient<TcpTransport, NoopHandler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ErrorHandler> SonosClient<TcpTransport, H> {
    /// Create a client over TCP that reports connect failures and timeouts
    /// to `handler`
    pub fn with_error_handler(handler: H) -> Self {
        Self::with_engine(CommandEngine::with_handler(TcpTransport::default(), handler))
    }
}

impl<T: Transport, H: ErrorHandler> SonosClient<T, H> {
    pub fn with_engine(engine: CommandEngine<T, H>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &CommandEngine<T, H> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CommandEngine<T, H> {
        &mut self.engine
    }

    pub fn into_engine(self) -> CommandEngine<T, H> {
        self.engine
    }

    fn address(&self, ip: Ipv4Addr) -> DeviceAddress {
        DeviceAddress::with_port(ip, self.engine.config().port)
    }

    fn send(&mut self, ip: Ipv4Addr, command: &Command<'_>) -> Result<()> {
        let address = self.address(ip);
        Ok(self.engine.send(address, command)?)
    }

    fn query(&mut self, ip: Ipv4Addr, command: &Command<'_>, path: TagPath, out: &mut dyn ValueSink) -> Result<bool> {
        let address = self.address(ip);
        Ok(self.engine.query(address, command, path, out)?)
    }

    fn query_fields(&mut self, ip: Ipv4Addr, command: &Command<'_>, queries: &mut [FieldQuery<'_>]) -> Result<usize> {
        let address = self.address(ip);
        Ok(self.engine.query_fields(address, command, queries)?)
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn play(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.send(ip, &Command::new(Service::AVTransport, PLAY).with_field(SPEED, SPEED_NORMAL))
    }

    pub fn pause(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.send(ip, &Command::new(Service::AVTransport, PAUSE))
    }

    pub fn stop(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.send(ip, &Command::new(Service::AVTransport, STOP))
    }

    pub fn skip(&mut self, ip: Ipv4Addr, direction: Direction) -> Result<()> {
        let action = match direction {
            Direction::Forward => NEXT,
            Direction::Backward => PREVIOUS,
        };
        self.send(ip, &Command::new(Service::AVTransport, action))
    }

    /// Jump to a track of the queue, counting from 1
    pub fn seek_track(&mut self, ip: Ipv4Addr, index: u16) -> Result<()> {
        let target = format_number(index)?;
        self.seek(ip, SEEK_TRACK_NR, target.as_str())
    }

    /// Jump to a position in the current track
    pub fn seek_time(&mut self, ip: Ipv4Addr, hours: u8, minutes: u8, seconds: u8) -> Result<()> {
        let target = format_seek_time(hours, minutes, seconds);
        self.seek(ip, SEEK_REL_TIME, target.as_str())
    }

    fn seek(&mut self, ip: Ipv4Addr, unit: &str, target: &str) -> Result<()> {
        let command = Command::new(Service::AVTransport, SEEK)
            .with_field(TARGET, target)
            .with_extra(SEEK_UNIT_TAG_START, unit, SEEK_UNIT_TAG_END);
        self.send(ip, &command)
    }

    pub fn set_play_mode(&mut self, ip: Ipv4Addr, mode: PlayMode) -> Result<()> {
        self.send(
            ip,
            &Command::new(Service::AVTransport, SET_PLAY_MODE).with_field(NEW_PLAY_MODE, mode.token()),
        )
    }

    // ========================================================================
    // Sources
    // ========================================================================

    /// Point the speaker at `scheme` + `address` without metadata
    pub fn set_av_transport_uri(&mut self, ip: Ipv4Addr, scheme: &str, address: &str) -> Result<()> {
        self.set_av_transport_uri_with_meta(ip, scheme, address, URI_META_LIGHT_START, "", URI_META_LIGHT_END)
    }

    fn set_av_transport_uri_with_meta(
        &mut self,
        ip: Ipv4Addr,
        scheme: &str,
        address: &str,
        meta_start: &str,
        meta_value: &str,
        meta_end: &str,
    ) -> Result<()> {
        let command = Command::new(Service::AVTransport, SET_AV_TRANSPORT_URI)
            .with_split_field(CURRENT_URI, scheme, address)
            .with_extra(meta_start, meta_value, meta_end);
        self.send(ip, &command)
    }

    /// Play a file from a network share, given as `//host/share/path`
    pub fn play_file(&mut self, ip: Ipv4Addr, path: &str) -> Result<()> {
        self.set_av_transport_uri(ip, SourceScheme::FILE_SCHEME, path)?;
        self.play(ip)
    }

    pub fn play_http(&mut self, ip: Ipv4Addr, address: &str) -> Result<()> {
        self.set_av_transport_uri(ip, SourceScheme::HTTP_SCHEME, address)?;
        self.play(ip)
    }

    /// Play an internet radio stream, labelled `title` in the Sonos apps
    ///
    /// The title is placed verbatim inside entity-escaped DIDL-Lite
    /// metadata, so it must not contain markup characters.
    pub fn play_radio(&mut self, ip: Ipv4Addr, address: &str, title: &str) -> Result<()> {
        self.set_av_transport_uri_with_meta(
            ip,
            SourceScheme::RADIO_SCHEME,
            address,
            RADIO_META_FULL_START,
            title,
            RADIO_META_FULL_END,
        )?;
        self.play(ip)
    }

    /// Play the line-in of the speaker with ID `speaker_id`
    pub fn play_line_in(&mut self, ip: Ipv4Addr, speaker_id: &str) -> Result<()> {
        let address = rincon_address(speaker_id, "")?;
        self.set_av_transport_uri(ip, SourceScheme::LINE_IN_SCHEME, address.as_str())?;
        self.play(ip)
    }

    /// Play the queue of the speaker with ID `speaker_id`
    pub fn play_queue(&mut self, ip: Ipv4Addr, speaker_id: &str) -> Result<()> {
        let address = rincon_address(speaker_id, QUEUE_SUFFIX)?;
        self.set_av_transport_uri(ip, SourceScheme::QUEUE_SCHEME, address.as_str())?;
        self.play(ip)
    }

    /// Make the speaker follow the group coordinator `master_id`
    pub fn connect_to_master(&mut self, ip: Ipv4Addr, master_id: &str) -> Result<()> {
        let address = rincon_address(master_id, "")?;
        self.set_av_transport_uri(ip, SourceScheme::MASTER_SCHEME, address.as_str())
    }

    /// Leave the current group and play standalone
    pub fn disconnect_from_master(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.send(ip, &Command::new(Service::AVTransport, BECOME_COORDINATOR_OF_STANDALONE_GROUP))
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Append the saved playlist at `index` to the queue
    pub fn add_playlist_to_queue(&mut self, ip: Ipv4Addr, index: u16) -> Result<()> {
        let mut uri = AddressBuffer::new();
        write!(uri, "{}{}", SAVED_QUEUES, index)
            .map_err(|_| ApiError::InvalidParameter(format!("playlist index {} does not fit", index)))?;
        self.add_track_to_queue(ip, "", uri.as_str())
    }

    pub fn add_track_to_queue(&mut self, ip: Ipv4Addr, scheme: &str, address: &str) -> Result<()> {
        let command = Command::new(Service::AVTransport, ADD_URI_TO_QUEUE)
            .with_split_field(ENQUEUED_URI, scheme, address)
            .with_extra(PLAYLIST_META_LIGHT_START, "", PLAYLIST_META_LIGHT_END);
        self.send(ip, &command)
    }

    pub fn remove_all_tracks_from_queue(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.send(ip, &Command::new(Service::AVTransport, REMOVE_ALL_TRACKS_FROM_QUEUE))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Set the Master volume, clamped to 100
    pub fn set_volume(&mut self, ip: Ipv4Addr, volume: u8) -> Result<()> {
        self.set_channel_volume(ip, volume, CHANNEL_MASTER)
    }

    /// Set the volume of one channel (`Master`, `LF` or `RF`), clamped to 100
    pub fn set_channel_volume(&mut self, ip: Ipv4Addr, volume: u8, channel: &str) -> Result<()> {
        let volume = format_number(volume.min(VOLUME_MAX))?;
        let command = Command::new(Service::RenderingControl, SET_VOLUME)
            .with_field(DESIRED_VOLUME, volume.as_str())
            .with_extra(CHANNEL_TAG_START, channel, CHANNEL_TAG_END);
        self.send(ip, &command)
    }

    pub fn get_volume(&mut self, ip: Ipv4Addr) -> Result<u8> {
        self.get_channel_volume(ip, CHANNEL_MASTER)
    }

    /// Volume of one channel; 0 if not reported
    pub fn get_channel_volume(&mut self, ip: Ipv4Addr, channel: &str) -> Result<u8> {
        let mut value = NumberBuffer::with_default("0");
        let command = Command::new(Service::RenderingControl, GET_VOLUME).with_field(CHANNEL, channel);
        self.query(ip, &command, VOLUME_PATH, &mut value)?;
        Ok(parse_clamped(value.as_str(), 0, VOLUME_MAX.into()) as u8)
    }

    /// Whether the line-out is fixed; `false` if not reported
    pub fn get_output_fixed(&mut self, ip: Ipv4Addr) -> Result<bool> {
        let mut value = FlagBuffer::with_default("0");
        let command = Command::new(Service::RenderingControl, GET_OUTPUT_FIXED);
        self.query(ip, &command, OUTPUT_FIXED_PATH, &mut value)?;
        Ok(crate::codec::parse_flag(value.as_str()))
    }

    define_switch_setting!(Mute);
    define_switch_setting!(Loudness);
    define_eq_setting!(Bass);
    define_eq_setting!(Treble);

    /// Switch the status light on the front of the speaker
    pub fn set_status_light(&mut self, ip: Ipv4Addr, on: bool) -> Result<()> {
        let state = if on { LED_ON } else { LED_OFF };
        self.send(
            ip,
            &Command::new(Service::DeviceProperties, SET_LED_STATE).with_field(DESIRED_LED_STATE, state),
        )
    }

    // ========================================================================
    // Transport state and play mode
    // ========================================================================

    /// Current playback state; `Stopped` if not reported
    pub fn get_state(&mut self, ip: Ipv4Addr) -> Result<TransportState> {
        let mut token = TokenBuffer::new();
        self.query(ip, &Command::new(Service::AVTransport, GET_TRANSPORT_INFO), TRANSPORT_STATE_PATH, &mut token)?;
        Ok(TransportState::from_token(token.as_str()))
    }

    /// Current play mode; normal if not reported
    pub fn get_play_mode(&mut self, ip: Ipv4Addr) -> Result<PlayMode> {
        let mut token = TokenBuffer::new();
        self.query(ip, &Command::new(Service::AVTransport, GET_TRANSPORT_SETTINGS), PLAY_MODE_PATH, &mut token)?;
        Ok(PlayMode::from_token(token.as_str()))
    }

    pub fn get_repeat(&mut self, ip: Ipv4Addr) -> Result<bool> {
        Ok(self.get_play_mode(ip)?.repeat)
    }

    pub fn get_shuffle(&mut self, ip: Ipv4Addr) -> Result<bool> {
        Ok(self.get_play_mode(ip)?.shuffle)
    }

    /// Change repeat, keeping shuffle; nothing is sent if it already matches
    pub fn set_repeat(&mut self, ip: Ipv4Addr, repeat: bool) -> Result<()> {
        let mode = self.get_play_mode(ip)?;
        if mode.repeat == repeat {
            return Ok(());
        }
        self.set_play_mode(ip, mode.with_repeat(repeat))
    }

    /// Change shuffle, keeping repeat; nothing is sent if it already matches
    pub fn set_shuffle(&mut self, ip: Ipv4Addr, shuffle: bool) -> Result<()> {
        let mode = self.get_play_mode(ip)?;
        if mode.shuffle == shuffle {
            return Ok(());
        }
        self.set_play_mode(ip, mode.with_shuffle(shuffle))
    }

    pub fn toggle_repeat(&mut self, ip: Ipv4Addr) -> Result<()> {
        let mode = self.get_play_mode(ip)?;
        self.set_play_mode(ip, mode.with_repeat(!mode.repeat))
    }

    pub fn toggle_shuffle(&mut self, ip: Ipv4Addr) -> Result<()> {
        let mode = self.get_play_mode(ip)?;
        self.set_play_mode(ip, mode.with_shuffle(!mode.shuffle))
    }

    /// Pause if playing, resume if paused, leave a stopped speaker alone
    pub fn toggle_pause(&mut self, ip: Ipv4Addr) -> Result<()> {
        match self.get_state(ip)? {
            TransportState::Playing => self.pause(ip),
            TransportState::Paused => self.play(ip),
            TransportState::Stopped => {
                debug!(%ip, "Speaker is stopped, not toggling pause");
                Ok(())
            }
        }
    }

    // ========================================================================
    // Track position
    // ========================================================================

    /// Track number, duration and position from a single `GetPositionInfo`,
    /// with the track URI written to `uri`
    ///
    /// Fields missing from the response read as 0 and leave `uri` untouched.
    pub fn get_track_info(&mut self, ip: Ipv4Addr, uri: &mut dyn ValueSink) -> Result<TrackInfo> {
        let mut number = TokenBuffer::new();
        let mut duration = TokenBuffer::new();
        let mut position = TokenBuffer::new();

        self.query_fields(
            ip,
            &Command::new(Service::AVTransport, GET_POSITION_INFO),
            &mut [
                FieldQuery::new(TRACK_PATH, &mut number),
                FieldQuery::new(TRACK_DURATION_PATH, &mut duration),
                FieldQuery::new(TRACK_URI_PATH, uri),
                FieldQuery::new(REL_TIME_PATH, &mut position),
            ],
        )?;

        Ok(TrackInfo {
            number: parse_clamped(number.as_str(), 0, u16::MAX.into()) as u16,
            duration: time_to_seconds(duration.as_str()),
            position: time_to_seconds(position.as_str()),
        })
    }

    /// Position of the current track in the queue; 0 if not reported
    pub fn get_track_number(&mut self, ip: Ipv4Addr) -> Result<u16> {
        let mut value = NumberBuffer::with_default("0");
        self.query(ip, &Command::new(Service::AVTransport, GET_POSITION_INFO), TRACK_PATH, &mut value)?;
        Ok(parse_leading_int(value.as_str()).clamp(0, u16::MAX.into()) as u16)
    }

    /// Write the current track URI to `out`; `Ok(false)` if not reported
    pub fn get_track_uri(&mut self, ip: Ipv4Addr, out: &mut dyn ValueSink) -> Result<bool> {
        self.query(ip, &Command::new(Service::AVTransport, GET_POSITION_INFO), TRACK_URI_PATH, out)
    }

    /// Where the current track comes from
    pub fn get_source(&mut self, ip: Ipv4Addr) -> Result<SourceScheme> {
        let mut uri = SchemeBuffer::new();
        self.get_track_uri(ip, &mut uri)?;
        Ok(SourceScheme::classify(uri.as_str()))
    }

    pub fn get_track_duration_seconds(&mut self, ip: Ipv4Addr) -> Result<u32> {
        self.get_position_time(ip, TRACK_DURATION_PATH)
    }

    pub fn get_track_position_seconds(&mut self, ip: Ipv4Addr) -> Result<u32> {
        self.get_position_time(ip, REL_TIME_PATH)
    }

    fn get_position_time(&mut self, ip: Ipv4Addr, path: TagPath) -> Result<u32> {
        let mut time = TokenBuffer::new();
        self.query(ip, &Command::new(Service::AVTransport, GET_POSITION_INFO), path, &mut time)?;
        Ok(time_to_seconds(time.as_str()))
    }

    /// Elapsed share of the current track in parts per thousand; 0 when the
    /// duration or position is unknown
    pub fn get_track_position_per_mille(&mut self, ip: Ipv4Addr) -> Result<u16> {
        let mut duration = TokenBuffer::new();
        let mut position = TokenBuffer::new();

        self.query_fields(
            ip,
            &Command::new(Service::AVTransport, GET_POSITION_INFO),
            &mut [
                FieldQuery::new(TRACK_DURATION_PATH, &mut duration),
                FieldQuery::new(REL_TIME_PATH, &mut position),
            ],
        )?;

        Ok(per_mille(time_to_seconds(duration.as_str()), time_to_seconds(position.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_client::MemoryTransport;

    fn speaker() -> Ipv4Addr {
        Ipv4Addr::new(192, 168, 1, 30)
    }

    fn response(action: &str, fields: &str) -> String {
        format!(
            concat!(
                "HTTP/1.1 200 OK\r\nCONTENT-TYPE: text/xml; charset=\"utf-8\"\r\n\r\n",
                "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
                "s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\"><s:Body>",
                "<u:{action}Response xmlns:u=\"urn:schemas-upnp-org:service:AVTransport:1\">{fields}",
                "</u:{action}Response></s:Body></s:Envelope>"
            ),
            action = action,
            fields = fields
        )
    }

    fn client(response: String) -> SonosClient<MemoryTransport> {
        SonosClient::with_engine(CommandEngine::new(MemoryTransport::responding(response)))
    }

    fn last_body(client: &SonosClient<MemoryTransport>) -> &str {
        client.engine().transport().last_body_str()
    }

    #[test]
    fn test_rincon_address() {
        assert_eq!(rincon_address("000E58C3A2B4", "").unwrap().as_str(), "RINCON_000E58C3A2B401400");
        assert_eq!(rincon_address("000E58C3A2B4", "#0").unwrap().as_str(), "RINCON_000E58C3A2B401400#0");
        assert!(matches!(
            rincon_address(&"X".repeat(80), ""),
            Err(ApiError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_set_volume_clamps() {
        let mut client = client(response("SetVolume", ""));
        client.set_volume(speaker(), 250).unwrap();
        assert!(last_body(&client).contains("<DesiredVolume>100</DesiredVolume><Channel>Master</Channel>"));
    }

    #[test]
    fn test_set_bass_clamps() {
        let mut client = client(response("SetBass", ""));
        client.set_bass(speaker(), -40).unwrap();
        assert!(last_body(&client).contains("<u:SetBass "));
        assert!(last_body(&client).contains("<DesiredBass>-10</DesiredBass></u:SetBass>"));
    }

    #[test]
    fn test_switch_setting_payload() {
        let mut client = client(response("SetLoudness", ""));
        client.set_loudness(speaker(), true).unwrap();
        assert!(last_body(&client)
            .contains("<DesiredLoudness>1</DesiredLoudness><Channel>Master</Channel></u:SetLoudness>"));
    }

    #[test]
    fn test_get_treble_clamps() {
        let mut client = client(response("GetTreble", "<CurrentTreble>14</CurrentTreble>"));
        assert_eq!(client.get_treble(speaker()).unwrap(), 10);
        assert!(last_body(&client).contains("<Channel>Master</Channel></u:GetTreble>"));
    }

    #[test]
    fn test_seek_time_payload() {
        let mut client = client(response("Seek", ""));
        client.seek_time(speaker(), 0, 1, 2).unwrap();
        assert!(last_body(&client).contains("<Target>0:01:02</Target><Unit>REL_TIME</Unit></u:Seek>"));
    }

    #[test]
    fn test_playlist_uri() {
        let mut client = client(response("AddURIToQueue", ""));
        client.add_playlist_to_queue(speaker(), 7).unwrap();
        assert!(last_body(&client).contains(concat!(
            "<EnqueuedURI>file:///jffs/settings/savedqueues.rsq#7</EnqueuedURI>",
            "<EnqueuedURIMetaData></EnqueuedURIMetaData><DesiredFirstTrackNumberEnqueued>",
            "0</DesiredFirstTrackNumberEnqueued><EnqueueAsNext>1</EnqueueAsNext>"
        )));
    }

    #[test]
    fn test_track_info_defaults_when_fields_missing() {
        let mut client = client(response("GetPositionInfo", "<Track>2</Track>"));
        let mut uri = ValueBuffer::<32>::with_default("none");

        let info = client.get_track_info(speaker(), &mut uri).unwrap();
        assert_eq!(info, TrackInfo { number: 2, duration: 0, position: 0 });
        assert_eq!(uri.as_str(), "none");
        assert_eq!(info.per_mille(), 0);
    }
}
