mod avtransport_client;
mod rendering_control_client;

pub use crate::upnp_clients::avtransport_client::AvTransportClient;
pub use crate::upnp_clients::rendering_control_client::RenderingControlClient;

use pmosoap::{ResponseBody, ResponseContent};

use crate::errors::ControlPointError;

/// Canal par défaut de RenderingControl
pub const MASTER_CHANNEL: &str = "Master";

/// Vérifie qu'une action sans valeur de retour a réussi
///
/// Un contenu typé inattendu est accepté : seul le Fault est une erreur.
pub(crate) fn expect_acknowledgement(
    action: &str,
    body: ResponseBody,
) -> Result<(), ControlPointError> {
    match body {
        ResponseBody::Fault(fault) => Err(ControlPointError::Fault {
            action: action.to_string(),
            fault,
        }),
        ResponseBody::Content(_) | ResponseBody::Empty => Ok(()),
    }
}

/// Extrait le contenu attendu d'une réponse
///
/// `extract` est typiquement l'une des méthodes `ResponseContent::into_*`.
pub(crate) fn expect_content<T>(
    action: &str,
    expected: &'static str,
    body: ResponseBody,
    extract: impl FnOnce(ResponseContent) -> Result<T, ResponseContent>,
) -> Result<T, ControlPointError> {
    match body {
        ResponseBody::Fault(fault) => Err(ControlPointError::Fault {
            action: action.to_string(),
            fault,
        }),
        ResponseBody::Empty => Err(ControlPointError::UnexpectedResponse {
            action: action.to_string(),
            expected,
            found: "Empty",
        }),
        ResponseBody::Content(content) => {
            extract(content).map_err(|other| ControlPointError::UnexpectedResponse {
                action: action.to_string(),
                expected,
                found: other.name(),
            })
        }
    }
}
