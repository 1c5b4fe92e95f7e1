//! # PMOSoap - Enveloppes SOAP pour le contrôle de renderers UPnP
//!
//! Ce crate encode les requêtes d'action envoyées à un MediaRenderer et décode
//! ses réponses, sans aucune entrée/sortie réseau.
//!
//! ## Fonctionnalités
//!
//! - ✅ Construction d'enveloppes de requête (`s:Envelope` / `s:Body`)
//! - ✅ Décodage streaming du Body : Fault, contenu typé ou accusé de réception
//! - ✅ Routage par couple (namespace, élément) via une table statique
//! - ✅ Diagnostics injectables pour les éléments inconnus
//! - ✅ Payloads RenderingControl:1 et AVTransport:1
//!
//! ## Architecture
//!
//! - [`SoapRequest`] / [`ActionRequest`] : requête sortante
//! - [`decode_response`] / [`ResponseBody`] : réponse entrante
//! - [`SoapFault`] / [`UpnpError`] : erreurs protocolaires
//! - [`routing`] : table (namespace, élément) → forme typée
//!
//! ## Example
//!
//! ```
//! use pmosoap::payloads::GetVolume;
//! use pmosoap::{ActionRequest, ResponseBody, TracingDiagnostics, decode_response};
//!
//! let request = ActionRequest::for_action(GetVolume::new(0, "Master".into()));
//! assert_eq!(
//!     request.soap_action(),
//!     "urn:schemas-upnp-org:service:RenderingControl:1#GetVolume"
//! );
//! let xml = request.envelope().to_xml().unwrap();
//! assert!(xml.contains("<Channel>Master</Channel>"));
//!
//! let response = br#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
//!   <s:Body>
//!     <u:GetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1">
//!       <CurrentVolume>30</CurrentVolume>
//!     </u:GetVolumeResponse>
//!   </s:Body>
//! </s:Envelope>"#;
//!
//! let body = decode_response(response, &TracingDiagnostics).unwrap();
//! let volume = body.into_content().unwrap().into_volume().unwrap();
//! assert_eq!(volume.current_volume, 30);
//! ```

mod diagnostics;
mod dispatcher;
mod envelope;
mod error;
mod fault;
mod xml;

pub mod payloads;
pub mod routing;
pub mod time_utils;

use serde::Serialize;

pub use diagnostics::{CollectingDiagnostics, Diagnostic, DiagnosticSink, TracingDiagnostics};
pub use dispatcher::{ResponseBody, decode_response};
pub use envelope::{ActionRequest, SoapRequest, build_request_envelope, decode_request_payload};
pub use error::{DecodeError, EnvelopeError};
pub use fault::{FaultDetail, SoapFault, UpnpError, error_codes};
pub use payloads::ResponseContent;

/// Namespace de l'enveloppe SOAP 1.1
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Style d'encodage SOAP 1.1
pub const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Namespace des `<UPnPError>` portés par le détail d'un Fault
pub const UPNP_CONTROL_NS: &str = "urn:schemas-upnp-org:control-1-0";

pub const RENDERING_CONTROL: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

pub const AV_TRANSPORT: &str = "urn:schemas-upnp-org:service:AVTransport:1";

/// Payload d'une action UPnP, identifiée par son service et son nom
pub trait UpnpAction: Serialize {
    /// URN du service (namespace de l'action)
    const SERVICE: &'static str;

    /// Nom de l'action, tel qu'il apparaît dans `soapaction`
    const ACTION: &'static str;
}
