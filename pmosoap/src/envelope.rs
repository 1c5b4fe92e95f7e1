//! Enveloppe SOAP des requêtes sortantes
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
//!             s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
//!   <s:Body>
//!     <u:Play xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">...</u:Play>
//!   </s:Body>
//! </s:Envelope>
//! ```

use quick_xml::events::Event;
use quick_xml::se::Serializer;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, EnvelopeError};
use crate::xml;
use crate::{SOAP_ENCODING_NS, SOAP_ENVELOPE_NS, UpnpAction};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Enveloppe de requête, portant un unique payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "s:Envelope")]
pub struct SoapRequest<T> {
    #[serde(rename = "@xmlns:s")]
    xmlns: &'static str,

    #[serde(rename = "@s:encodingStyle")]
    encoding_style: &'static str,

    #[serde(rename = "s:Body")]
    body: SoapRequestBody<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SoapRequestBody<T> {
    #[serde(rename = "$value")]
    payload: T,
}

/// Enveloppe un payload, sans le valider
pub fn build_request_envelope<T: Serialize>(payload: T) -> SoapRequest<T> {
    SoapRequest {
        xmlns: SOAP_ENVELOPE_NS,
        encoding_style: SOAP_ENCODING_NS,
        body: SoapRequestBody { payload },
    }
}

impl<T> SoapRequest<T> {
    pub fn payload(&self) -> &T {
        &self.body.payload
    }

    pub fn into_payload(self) -> T {
        self.body.payload
    }
}

impl<T: Serialize> SoapRequest<T> {
    /// Sérialise l'enveloppe, déclaration XML comprise, indentée par tabulations
    pub fn to_xml(&self) -> Result<String, EnvelopeError> {
        let mut xml = String::from(XML_DECLARATION);
        let mut serializer = Serializer::new(&mut xml);
        serializer.indent('\t', 1);
        self.serialize(serializer)?;
        Ok(xml)
    }
}

/// Action à invoquer : service, nom d'action et arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest<T> {
    pub namespace: String,
    pub action: String,
    pub payload: T,
}

impl<T: Serialize> ActionRequest<T> {
    pub fn new(namespace: impl Into<String>, action: impl Into<String>, payload: T) -> Self {
        Self {
            namespace: namespace.into(),
            action: action.into(),
            payload,
        }
    }

    /// Valeur de l'en-tête `soapaction`, sans guillemets
    pub fn soap_action(&self) -> String {
        format!("{}#{}", self.namespace, self.action)
    }

    pub fn envelope(&self) -> SoapRequest<&T> {
        build_request_envelope(&self.payload)
    }
}

impl<T: UpnpAction> ActionRequest<T> {
    /// Construit la requête à partir des constantes de l'action
    pub fn for_action(payload: T) -> Self {
        Self::new(T::SERVICE, T::ACTION, payload)
    }
}

/// Relit une enveloppe de requête et décode l'unique enfant du Body
pub fn decode_request_payload<T: DeserializeOwned>(xml: &str) -> Result<T, DecodeError> {
    let input = xml::strip_bom(xml.as_bytes());
    let mut reader = xml::reader(input);

    if !xml::enter_body(&mut reader)? {
        return Err(DecodeError::EmptyBody);
    }

    let mut buf = Vec::new();
    loop {
        let at = xml::position(&reader);
        buf.clear();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?;
        let namespace = xml::namespace_of(resolved);

        let (name, end) = match event {
            Event::Start(e) => {
                xml::skip_to_end(&mut reader, "Body")?;
                (xml::local_name(&e), xml::position(&reader))
            }
            Event::Empty(e) => (xml::local_name(&e), xml::position(&reader)),
            Event::End(_) => return Err(DecodeError::EmptyBody),
            Event::Eof => return Err(DecodeError::Truncated("Body")),
            _ => continue,
        };

        let fragment = xml::slice(input, at..end, &name)?;
        return quick_xml::de::from_str(fragment).map_err(|source| DecodeError::Content {
            namespace: namespace.unwrap_or_default(),
            element: name,
            source,
        });
    }
}
