//! Payloads typés des services RenderingControl et AVTransport
//!
//! Les requêtes sont générées par `upnp_request!` ; les réponses
//! sont de simples structures `Deserialize` dont les noms de champs suivent
//! les arguments UPnP.

#[macro_use]
mod macros;

pub mod avtransport;
pub mod rendering_control;

pub use avtransport::{
    GetMediaInfo, GetPositionInfo, GetTransportInfo, MediaInfoResponse, Next, Pause, Play,
    PlaybackStateResponse, PositionInfoResponse, Previous, Seek, SetAvTransportUri, Stop,
    TransportState,
};
pub use rendering_control::{
    GetMute, GetVolume, MuteResponse, SetMute, SetVolume, VolumeResponse,
};

/// Booléens UPnP : émis `1`/`0`, acceptés sous les formes `1`, `true`, `yes`
/// (et leurs négations), sans tenir compte de la casse.
pub(crate) mod upnp_bool {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(de::Error::custom(format!(
                "invalid UPnP boolean '{}'",
                other
            ))),
        }
    }
}

/// Contenu typé d'une réponse, déterminé par le couple (namespace, élément)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseContent {
    Volume(VolumeResponse),
    Mute(MuteResponse),
    PlaybackState(PlaybackStateResponse),
    PositionInfo(PositionInfoResponse),
    MediaInfo(MediaInfoResponse),
}

impl ResponseContent {
    /// Nom court de la variante, pour les messages d'erreur
    pub fn name(&self) -> &'static str {
        match self {
            ResponseContent::Volume(_) => "Volume",
            ResponseContent::Mute(_) => "Mute",
            ResponseContent::PlaybackState(_) => "PlaybackState",
            ResponseContent::PositionInfo(_) => "PositionInfo",
            ResponseContent::MediaInfo(_) => "MediaInfo",
        }
    }

    pub fn into_volume(self) -> Result<VolumeResponse, ResponseContent> {
        match self {
            ResponseContent::Volume(v) => Ok(v),
            other => Err(other),
        }
    }

    pub fn into_mute(self) -> Result<MuteResponse, ResponseContent> {
        match self {
            ResponseContent::Mute(v) => Ok(v),
            other => Err(other),
        }
    }

    pub fn into_playback_state(self) -> Result<PlaybackStateResponse, ResponseContent> {
        match self {
            ResponseContent::PlaybackState(v) => Ok(v),
            other => Err(other),
        }
    }

    pub fn into_position_info(self) -> Result<PositionInfoResponse, ResponseContent> {
        match self {
            ResponseContent::PositionInfo(v) => Ok(v),
            other => Err(other),
        }
    }

    pub fn into_media_info(self) -> Result<MediaInfoResponse, ResponseContent> {
        match self {
            ResponseContent::MediaInfo(v) => Ok(v),
            other => Err(other),
        }
    }
}
