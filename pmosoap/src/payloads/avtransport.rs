//! AVTransport:1 — transport, position et média courant

use serde::Deserialize;

use crate::AV_TRANSPORT;
use crate::time_utils::parse_upnp_time;

upnp_request! {
    /// AVTransport:1 — Play
    Play(AV_TRANSPORT, "Play", "u:Play") {
        instance_id: u32 => "InstanceID",
        speed: String => "Speed",
    }
}

upnp_request! {
    /// AVTransport:1 — Pause
    Pause(AV_TRANSPORT, "Pause", "u:Pause") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — Stop
    Stop(AV_TRANSPORT, "Stop", "u:Stop") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — Next
    Next(AV_TRANSPORT, "Next", "u:Next") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — Previous
    Previous(AV_TRANSPORT, "Previous", "u:Previous") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — Seek
    ///
    /// `unit` vaut typiquement `REL_TIME`, `ABS_TIME` ou `TRACK_NR`.
    Seek(AV_TRANSPORT, "Seek", "u:Seek") {
        instance_id: u32 => "InstanceID",
        unit: String => "Unit",
        target: String => "Target",
    }
}

upnp_request! {
    /// AVTransport:1 — SetAVTransportURI
    ///
    /// Les métadonnées (DIDL-Lite) sont passées telles quelles et échappées
    /// à la sérialisation.
    SetAvTransportUri(AV_TRANSPORT, "SetAVTransportURI", "u:SetAVTransportURI") {
        instance_id: u32 => "InstanceID",
        current_uri: String => "CurrentURI",
        current_uri_meta_data: String => "CurrentURIMetaData",
    }
}

upnp_request! {
    /// AVTransport:1 — GetTransportInfo
    GetTransportInfo(AV_TRANSPORT, "GetTransportInfo", "u:GetTransportInfo") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — GetPositionInfo
    GetPositionInfo(AV_TRANSPORT, "GetPositionInfo", "u:GetPositionInfo") {
        instance_id: u32 => "InstanceID",
    }
}

upnp_request! {
    /// AVTransport:1 — GetMediaInfo
    GetMediaInfo(AV_TRANSPORT, "GetMediaInfo", "u:GetMediaInfo") {
        instance_id: u32 => "InstanceID",
    }
}

/// État du transport tel que rapporté par `CurrentTransportState`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Playing,
    Transitioning,
    PausedPlayback,
    PausedRecording,
    Recording,
    NoMediaPresent,
    /// Valeur propriétaire
    Other(String),
}

impl From<&str> for TransportState {
    fn from(value: &str) -> Self {
        match value.trim() {
            "STOPPED" => TransportState::Stopped,
            "PLAYING" => TransportState::Playing,
            "TRANSITIONING" => TransportState::Transitioning,
            "PAUSED_PLAYBACK" => TransportState::PausedPlayback,
            "PAUSED_RECORDING" => TransportState::PausedRecording,
            "RECORDING" => TransportState::Recording,
            "NO_MEDIA_PRESENT" => TransportState::NoMediaPresent,
            other => TransportState::Other(other.to_string()),
        }
    }
}

/// Réponse à GetTransportInfo
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaybackStateResponse {
    #[serde(rename = "CurrentTransportState", default)]
    pub current_transport_state: String,

    #[serde(rename = "CurrentTransportStatus", default)]
    pub current_transport_status: String,

    #[serde(rename = "CurrentSpeed", default)]
    pub current_speed: String,
}

impl PlaybackStateResponse {
    pub fn state(&self) -> TransportState {
        TransportState::from(self.current_transport_state.as_str())
    }

    pub fn is_playing(&self) -> bool {
        self.state() == TransportState::Playing
    }
}

/// Réponse à GetPositionInfo
///
/// Les champs absents valent leur défaut : les firmwares omettent
/// régulièrement les compteurs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PositionInfoResponse {
    #[serde(rename = "Track", default)]
    pub track: u32,

    #[serde(rename = "TrackDuration", default)]
    pub track_duration: String,

    #[serde(rename = "TrackMetaData", default)]
    pub track_meta_data: String,

    #[serde(rename = "TrackURI", default)]
    pub track_uri: String,

    #[serde(rename = "RelTime", default)]
    pub rel_time: String,

    #[serde(rename = "AbsTime", default)]
    pub abs_time: String,

    #[serde(rename = "RelCount", default)]
    pub rel_count: i64,

    #[serde(rename = "AbsCount", default)]
    pub abs_count: i64,
}

impl PositionInfoResponse {
    /// Position dans la piste courante, en secondes
    pub fn rel_time_secs(&self) -> Option<u32> {
        parse_upnp_time(&self.rel_time)
    }

    /// Durée de la piste courante, en secondes
    pub fn track_duration_secs(&self) -> Option<u32> {
        parse_upnp_time(&self.track_duration)
    }
}

/// Réponse à GetMediaInfo
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaInfoResponse {
    #[serde(rename = "NrTracks", default)]
    pub nr_tracks: u32,

    #[serde(rename = "MediaDuration", default)]
    pub media_duration: String,

    #[serde(rename = "CurrentURI", default)]
    pub current_uri: String,

    #[serde(rename = "CurrentURIMetaData", default)]
    pub current_uri_meta_data: String,

    #[serde(rename = "NextURI", default)]
    pub next_uri: String,

    #[serde(rename = "NextURIMetaData", default)]
    pub next_uri_meta_data: String,

    #[serde(rename = "PlayMedium", default)]
    pub play_medium: String,

    #[serde(rename = "RecordMedium", default)]
    pub record_medium: String,

    #[serde(rename = "WriteStatus", default)]
    pub write_status: String,
}

impl MediaInfoResponse {
    pub fn media_duration_secs(&self) -> Option<u32> {
        parse_upnp_time(&self.media_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_state_parsing() {
        assert_eq!(TransportState::from("PLAYING"), TransportState::Playing);
        assert_eq!(
            TransportState::from("PAUSED_PLAYBACK"),
            TransportState::PausedPlayback
        );
        assert_eq!(
            TransportState::from("NO_MEDIA_PRESENT"),
            TransportState::NoMediaPresent
        );
        assert_eq!(
            TransportState::from("BUFFERING"),
            TransportState::Other("BUFFERING".into())
        );
    }

    #[test]
    fn position_info_unescapes_track_metadata() {
        let xml = r#"<u:GetPositionInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
            <Track>3</Track>
            <TrackDuration>0:04:10</TrackDuration>
            <TrackMetaData>&lt;DIDL-Lite&gt;&lt;item id="1"/&gt;&lt;/DIDL-Lite&gt;</TrackMetaData>
            <TrackURI>http://10.0.0.2/track.flac</TrackURI>
            <RelTime>0:01:05</RelTime>
            <AbsTime>NOT_IMPLEMENTED</AbsTime>
            <RelCount>2147483647</RelCount>
            <AbsCount>2147483647</AbsCount>
        </u:GetPositionInfoResponse>"#;

        let info: PositionInfoResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(info.track, 3);
        assert_eq!(info.track_meta_data, r#"<DIDL-Lite><item id="1"/></DIDL-Lite>"#);
        assert_eq!(info.rel_time_secs(), Some(65));
        assert_eq!(info.track_duration_secs(), Some(250));
        assert_eq!(parse_upnp_time(&info.abs_time), None);
        assert_eq!(info.rel_count, 2_147_483_647);
    }

    #[test]
    fn media_info_tolerates_missing_fields() {
        let xml = r#"<u:GetMediaInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
            <NrTracks>12</NrTracks>
            <MediaDuration>0:45:00</MediaDuration>
            <CurrentURI>x-rincon-queue:RINCON_000E58#0</CurrentURI>
        </u:GetMediaInfoResponse>"#;

        let info: MediaInfoResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(info.nr_tracks, 12);
        assert_eq!(info.media_duration_secs(), Some(2700));
        assert_eq!(info.current_uri, "x-rincon-queue:RINCON_000E58#0");
        assert!(info.next_uri.is_empty());
    }
}
