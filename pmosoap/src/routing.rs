//! Table de routage des enfants du Body
//!
//! Chaque enfant direct de `<s:Body>` est identifié par son couple
//! (namespace, nom local). La table est fermée : ajouter un service revient
//! à ajouter des lignes.

use quick_xml::de::DeError;
use tracing::trace;

use crate::payloads::{
    MediaInfoResponse, MuteResponse, PlaybackStateResponse, PositionInfoResponse,
    ResponseContent, VolumeResponse,
};
use crate::{AV_TRANSPORT, RENDERING_CONTROL, SOAP_ENVELOPE_NS};

/// Forme typée dans laquelle décoder un élément
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Volume,
    Mute,
    PlaybackState,
    PositionInfo,
    MediaInfo,
}

impl ContentKind {
    /// Décode le sous-arbre XML complet de l'élément
    pub fn decode(self, xml: &str) -> Result<ResponseContent, DeError> {
        Ok(match self {
            ContentKind::Volume => {
                ResponseContent::Volume(quick_xml::de::from_str::<VolumeResponse>(xml)?)
            }
            ContentKind::Mute => {
                ResponseContent::Mute(quick_xml::de::from_str::<MuteResponse>(xml)?)
            }
            ContentKind::PlaybackState => ResponseContent::PlaybackState(
                quick_xml::de::from_str::<PlaybackStateResponse>(xml)?,
            ),
            ContentKind::PositionInfo => ResponseContent::PositionInfo(
                quick_xml::de::from_str::<PositionInfoResponse>(xml)?,
            ),
            ContentKind::MediaInfo => ResponseContent::MediaInfo(
                quick_xml::de::from_str::<MediaInfoResponse>(xml)?,
            ),
        })
    }
}

/// Traitement d'un élément connu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Décodage dans une forme typée
    Decode(ContentKind),
    /// Accusé de réception : le sous-arbre est ignoré
    NoContent,
}

/// Résultat de la classification d'un enfant du Body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Fault,
    Route(Route),
    Unknown,
}

/// (namespace, élément, route)
pub static ROUTES: &[(&str, &str, Route)] = &[
    (RENDERING_CONTROL, "SetVolumeResponse", Route::NoContent),
    (
        RENDERING_CONTROL,
        "GetVolumeResponse",
        Route::Decode(ContentKind::Volume),
    ),
    (RENDERING_CONTROL, "SetMuteResponse", Route::NoContent),
    (
        RENDERING_CONTROL,
        "GetMuteResponse",
        Route::Decode(ContentKind::Mute),
    ),
    (AV_TRANSPORT, "PauseResponse", Route::NoContent),
    (AV_TRANSPORT, "PlayResponse", Route::NoContent),
    (AV_TRANSPORT, "StopResponse", Route::NoContent),
    (AV_TRANSPORT, "NextResponse", Route::NoContent),
    (AV_TRANSPORT, "PreviousResponse", Route::NoContent),
    (AV_TRANSPORT, "SetAVTransportURIResponse", Route::NoContent),
    (AV_TRANSPORT, "SeekResponse", Route::NoContent),
    (
        AV_TRANSPORT,
        "GetTransportInfoResponse",
        Route::Decode(ContentKind::PlaybackState),
    ),
    (
        AV_TRANSPORT,
        "GetPositionInfoResponse",
        Route::Decode(ContentKind::PositionInfo),
    ),
    (
        AV_TRANSPORT,
        "GetMediaInfoResponse",
        Route::Decode(ContentKind::MediaInfo),
    ),
];

/// Classe un enfant direct du Body
///
/// Un élément sans namespace n'est jamais routé.
pub fn classify(namespace: Option<&str>, name: &str) -> Classification {
    let Some(namespace) = namespace else {
        return Classification::Unknown;
    };

    if namespace == SOAP_ENVELOPE_NS && name == "Fault" {
        return Classification::Fault;
    }

    let found = ROUTES
        .iter()
        .find(|(ns, element, _)| *ns == namespace && *element == name)
        .map(|(_, _, route)| *route);

    trace!(namespace, element = name, route = ?found, "Body child classified");

    match found {
        Some(route) => Classification::Route(route),
        None => Classification::Unknown,
    }
}
