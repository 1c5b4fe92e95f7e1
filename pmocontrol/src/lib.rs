//! Client de contrôle pour MediaRenderers UPnP
//!
//! Transport SOAP synchrone ([`SoapClient`]) et clients typés pour les
//! services RenderingControl:1 et AVTransport:1. L'encodage et le décodage
//! des enveloppes sont délégués à `pmosoap`.

pub mod config_ext;
pub mod errors;
pub mod logging;
pub mod soap_client;
pub mod upnp_clients;

pub use config_ext::ControlConfigExt;
pub use errors::ControlPointError;
pub use logging::init_logging;
pub use soap_client::{SoapClient, SoapClientOptions, join_url, send};
pub use upnp_clients::{AvTransportClient, MASTER_CHANNEL, RenderingControlClient};

pub use pmosoap::{ResponseBody, ResponseContent, SoapFault};
