use pmosoap::{DecodeError, EnvelopeError, SoapFault};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlPointError {
    /// URL ou enveloppe impossible à construire : rien n'a été envoyé
    #[error("Cannot build SOAP request: {0}")]
    Construction(String),
    #[error("HTTP error when sending SOAP request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to read SOAP response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Cannot decode {action} response: {source}")]
    Decode {
        action: String,
        #[source]
        source: DecodeError,
    },
    #[error("{action} returned SOAP fault {fault}")]
    Fault { action: String, fault: SoapFault },
    #[error("{action}: expected {expected} response, got {found}")]
    UnexpectedResponse {
        action: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid {0} value: {1}")]
    InvalidValue(String, String),
}

impl ControlPointError {
    pub fn construction(message: impl Into<String>) -> Self {
        ControlPointError::Construction(message.into())
    }

    pub fn invalid_value(name: &str, value: &str) -> Self {
        ControlPointError::InvalidValue(name.to_string(), value.to_string())
    }

    /// Code d'erreur UPnP porté par un Fault, s'il y en a un
    pub fn upnp_error_code(&self) -> Option<u32> {
        match self {
            ControlPointError::Fault { fault, .. } => fault.upnp_error().map(|e| e.error_code),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for ControlPointError {
    fn from(err: EnvelopeError) -> Self {
        ControlPointError::Construction(err.to_string())
    }
}
