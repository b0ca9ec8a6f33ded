//! Action names, argument tags, payload literals and response paths
//!
//! Every string the catalogue sends that is not caller data lives here.

use soap_client::TagPath;

// AVTransport
pub const PLAY: &str = "Play";
pub const PAUSE: &str = "Pause";
pub const STOP: &str = "Stop";
pub const NEXT: &str = "Next";
pub const PREVIOUS: &str = "Previous";
pub const SEEK: &str = "Seek";
pub const SET_AV_TRANSPORT_URI: &str = "SetAVTransportURI";
pub const BECOME_COORDINATOR_OF_STANDALONE_GROUP: &str = "BecomeCoordinatorOfStandaloneGroup";
pub const SET_PLAY_MODE: &str = "SetPlayMode";
pub const ADD_URI_TO_QUEUE: &str = "AddURIToQueue";
pub const REMOVE_ALL_TRACKS_FROM_QUEUE: &str = "RemoveAllTracksFromQueue";
pub const GET_TRANSPORT_INFO: &str = "GetTransportInfo";
pub const GET_TRANSPORT_SETTINGS: &str = "GetTransportSettings";
pub const GET_POSITION_INFO: &str = "GetPositionInfo";

// RenderingControl
pub const SET_VOLUME: &str = "SetVolume";
pub const GET_VOLUME: &str = "GetVolume";
pub const GET_OUTPUT_FIXED: &str = "GetOutputFixed";

// DeviceProperties
pub const SET_LED_STATE: &str = "SetLEDState";

// Argument tags
pub const SPEED: &str = "Speed";
pub const TARGET: &str = "Target";
pub const CURRENT_URI: &str = "CurrentURI";
pub const NEW_PLAY_MODE: &str = "NewPlayMode";
pub const ENQUEUED_URI: &str = "EnqueuedURI";
pub const DESIRED_VOLUME: &str = "DesiredVolume";
pub const DESIRED_LED_STATE: &str = "DesiredLEDState";
pub const CHANNEL: &str = "Channel";

// Argument values
pub const SPEED_NORMAL: &str = "1";
pub const CHANNEL_MASTER: &str = "Master";
pub const SEEK_TRACK_NR: &str = "TRACK_NR";
pub const SEEK_REL_TIME: &str = "REL_TIME";
pub const LED_ON: &str = "On";
pub const LED_OFF: &str = "Off";

// Extra payload wrappers
pub const CHANNEL_TAG_START: &str = "<Channel>";
pub const CHANNEL_TAG_END: &str = "</Channel>";
pub const SEEK_UNIT_TAG_START: &str = "<Unit>";
pub const SEEK_UNIT_TAG_END: &str = "</Unit>";
pub const URI_META_LIGHT_START: &str = "<CurrentURIMetaData>";
pub const URI_META_LIGHT_END: &str = "</CurrentURIMetaData>";
pub const RADIO_META_FULL_START: &str = "<CurrentURIMetaData>&lt;DIDL-Lite xmlns:dc=&quot;http://purl.org/dc/elements/1.1/&quot; xmlns:upnp=&quot;urn:schemas-upnp-org:metadata-1-0/upnp/&quot; xmlns:r=&quot;urn:schemas-rinconnetworks-com:metadata-1-0/&quot; xmlns=&quot;urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/&quot;&gt;&lt;item id=&quot;R:0/0/46&quot; parentID=&quot;R:0/0&quot; restricted=&quot;true&quot;&gt;&lt;dc:title&gt;";
pub const RADIO_META_FULL_END: &str = "&lt;/dc:title&gt;&lt;upnp:class&gt;object.item.audioItem.audioBroadcast&lt;/upnp:class&gt;&lt;desc id=&quot;cdudn&quot; nameSpace=&quot;urn:schemas-rinconnetworks-com:metadata-1-0/&quot;&gt;SA_RINCON65031_&lt;/desc&gt;&lt;/item&gt;&lt;/DIDL-Lite&gt;</CurrentURIMetaData>";
pub const PLAYLIST_META_LIGHT_START: &str =
    "<EnqueuedURIMetaData></EnqueuedURIMetaData><DesiredFirstTrackNumberEnqueued>";
pub const PLAYLIST_META_LIGHT_END: &str = "0</DesiredFirstTrackNumberEnqueued><EnqueueAsNext>1</EnqueueAsNext>";

// Addresses
pub const RINCON_PREFIX: &str = "RINCON_";
pub const QUEUE_SUFFIX: &str = "#0";
pub const SAVED_QUEUES: &str = "file:///jffs/settings/savedqueues.rsq#";

// Response paths
pub const TRANSPORT_STATE_PATH: TagPath = response_path!(GetTransportInfo, CurrentTransportState);
pub const PLAY_MODE_PATH: TagPath = response_path!(GetTransportSettings, PlayMode);
pub const TRACK_PATH: TagPath = response_path!(GetPositionInfo, Track);
pub const TRACK_DURATION_PATH: TagPath = response_path!(GetPositionInfo, TrackDuration);
pub const TRACK_URI_PATH: TagPath = response_path!(GetPositionInfo, TrackURI);
pub const REL_TIME_PATH: TagPath = response_path!(GetPositionInfo, RelTime);
pub const VOLUME_PATH: TagPath = response_path!(GetVolume, CurrentVolume);
pub const OUTPUT_FIXED_PATH: TagPath = response_path!(GetOutputFixed, CurrentFixed);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_paths_are_rooted() {
        for path in [
            TRANSPORT_STATE_PATH,
            PLAY_MODE_PATH,
            TRACK_PATH,
            TRACK_DURATION_PATH,
            TRACK_URI_PATH,
            REL_TIME_PATH,
            VOLUME_PATH,
            OUTPUT_FIXED_PATH,
        ] {
            assert_eq!(path.len(), 4);
            assert_eq!(&path[..2], &["s:Envelope", "s:Body"]);
            assert!(path[2].starts_with("u:") && path[2].ends_with("Response"));
        }
        assert_eq!(VOLUME_PATH, &["s:Envelope", "s:Body", "u:GetVolumeResponse", "CurrentVolume"]);
    }

    #[test]
    fn test_radio_metadata_is_escaped_once() {
        assert!(!RADIO_META_FULL_START.contains("<DIDL"));
        assert!(RADIO_META_FULL_START.ends_with("&lt;dc:title&gt;"));
        assert!(RADIO_META_FULL_END.starts_with("&lt;/dc:title&gt;"));
        assert!(RADIO_META_FULL_END.ends_with("</CurrentURIMetaData>"));
    }
}
