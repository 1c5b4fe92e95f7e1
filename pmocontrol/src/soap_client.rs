//! Transport SOAP : un POST HTTP synchrone par action, sans nouvel essai

use std::fmt;
use std::sync::Arc;

use pmoconfig::Config;
use pmosoap::{
    ActionRequest, DiagnosticSink, ResponseBody, TracingDiagnostics, UpnpAction,
    build_request_envelope, decode_response,
};
use serde::Serialize;
use tracing::{debug, warn};
use ureq::Agent;
use ureq::http::StatusCode;
use url::Url;

use crate::config_ext::ControlConfigExt;
use crate::errors::ControlPointError;

const CONTENT_TYPE: &str = r#"text/xml; charset="utf-8""#;

pub const DEFAULT_USER_AGENT: &str = "PMOSoap/0.1 UPnP/1.0";

/// Options d'envoi des requêtes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapClientOptions {
    /// Entoure la valeur de `soapaction` de guillemets (`"urn:...#Action"`)
    pub quote_action_header: bool,
    pub user_agent: String,
}

impl Default for SoapClientOptions {
    fn default() -> Self {
        Self {
            quote_action_header: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SoapClientOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quote_action_header: config.get_soap_quote_action_header(),
            user_agent: config
                .get_soap_user_agent()
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Valeur de l'en-tête `soapaction`
    pub fn action_header(&self, namespace: &str, action: &str) -> String {
        if self.quote_action_header {
            format!(r#""{}#{}""#, namespace, action)
        } else {
            format!("{}#{}", namespace, action)
        }
    }
}

/// Client SOAP réutilisable
///
/// Le client ne conserve aucun état entre deux appels : il peut être cloné et
/// partagé entre threads, un appel par renderer.
#[derive(Clone)]
pub struct SoapClient {
    agent: Agent,
    options: SoapClientOptions,
    diagnostics: Arc<dyn DiagnosticSink + Send + Sync>,
}

impl fmt::Debug for SoapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::with_options(SoapClientOptions::default())
    }
}

impl SoapClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SoapClientOptions) -> Self {
        // Les Faults arrivent avec un statut 500 : on veut pouvoir lire le
        // statut nous-mêmes plutôt que recevoir Error::StatusCode.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            options,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_options(SoapClientOptions::from_config(config))
    }

    /// Remplace la destination des diagnostics de décodage
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink + Send + Sync>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn options(&self) -> &SoapClientOptions {
        &self.options
    }

    /// Envoie une action et décode la réponse
    ///
    /// - `base_url` : racine du device, ex. `http://192.168.1.20:1400`
    /// - `path_suffix` : chemin de contrôle, ex. `MediaRenderer/AVTransport/Control`
    /// - `namespace` / `action` : composent l'en-tête `soapaction`
    ///
    /// Tout statut HTTP autre que 200 est une erreur et la réponse n'est pas
    /// décodée, y compris un statut 500 portant un Fault.
    pub fn send<T: Serialize>(
        &self,
        base_url: &str,
        path_suffix: &str,
        namespace: &str,
        action: &str,
        payload: &T,
    ) -> Result<ResponseBody, ControlPointError> {
        let url = join_url(base_url, path_suffix)?;
        let body_xml = build_request_envelope(payload).to_xml()?;
        let soap_action = self.options.action_header(namespace, action);

        debug!(url = %url, soapaction = %soap_action, "Sending SOAP request");

        let mut response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", CONTENT_TYPE)
            .header("soapaction", soap_action.as_str())
            .header("User-Agent", self.options.user_agent.as_str())
            .send(body_xml)
            .map_err(|source| ControlPointError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, action, status = status.as_u16(), "SOAP request rejected");
            return Err(ControlPointError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|source| ControlPointError::ReadBody {
                url: url.to_string(),
                source,
            })?;

        debug!(url = %url, action, bytes = bytes.len(), "SOAP response received");

        decode_response(&bytes, self.diagnostics.as_ref()).map_err(|source| {
            ControlPointError::Decode {
                action: action.to_string(),
                source,
            }
        })
    }

    pub fn call<T: Serialize>(
        &self,
        base_url: &str,
        path_suffix: &str,
        request: &ActionRequest<T>,
    ) -> Result<ResponseBody, ControlPointError> {
        self.send(
            base_url,
            path_suffix,
            &request.namespace,
            &request.action,
            &request.payload,
        )
    }

    /// Variante typée : service et action sont ceux du payload
    pub fn invoke<T: UpnpAction>(
        &self,
        base_url: &str,
        path_suffix: &str,
        payload: &T,
    ) -> Result<ResponseBody, ControlPointError> {
        self.send(base_url, path_suffix, T::SERVICE, T::ACTION, payload)
    }
}

/// Envoie une action avec les options par défaut
pub fn send<T: Serialize>(
    base_url: &str,
    path_suffix: &str,
    namespace: &str,
    action: &str,
    payload: &T,
) -> Result<ResponseBody, ControlPointError> {
    SoapClient::default().send(base_url, path_suffix, namespace, action, payload)
}

/// Concatène `{base_url}/{path_suffix}` avec un seul `/` et valide le résultat
pub fn join_url(base_url: &str, path_suffix: &str) -> Result<Url, ControlPointError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path_suffix.trim_start_matches('/')
    );

    let url = Url::parse(&joined)
        .map_err(|e| ControlPointError::construction(format!("invalid URL '{}': {}", joined, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ControlPointError::construction(format!(
            "unsupported scheme '{}' in '{}'",
            other, joined
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_uses_a_single_slash() {
        let expected = "http://192.168.1.20:1400/MediaRenderer/AVTransport/Control";
        for (base, suffix) in [
            ("http://192.168.1.20:1400", "MediaRenderer/AVTransport/Control"),
            ("http://192.168.1.20:1400/", "MediaRenderer/AVTransport/Control"),
            ("http://192.168.1.20:1400/", "/MediaRenderer/AVTransport/Control"),
        ] {
            assert_eq!(join_url(base, suffix).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn join_url_rejects_garbage() {
        assert!(matches!(
            join_url("not a url", "Control"),
            Err(ControlPointError::Construction(_))
        ));
        assert!(matches!(
            join_url("ftp://device", "Control"),
            Err(ControlPointError::Construction(_))
        ));
    }

    #[test]
    fn action_header_quoting() {
        let mut options = SoapClientOptions::default();
        assert_eq!(
            options.action_header("urn:schemas-upnp-org:service:AVTransport:1", "Play"),
            "urn:schemas-upnp-org:service:AVTransport:1#Play"
        );

        options.quote_action_header = true;
        assert_eq!(
            options.action_header("urn:schemas-upnp-org:service:AVTransport:1", "Play"),
            "\"urn:schemas-upnp-org:service:AVTransport:1#Play\""
        );
    }

    #[test]
    fn options_follow_configuration() {
        let config = Config::from_yaml_str(
            "soap:\n  user_agent: \"Test/1.0\"\n  quote_action_header: true\n",
        )
        .unwrap();
        let options = SoapClientOptions::from_config(&config);
        assert!(options.quote_action_header);
        assert_eq!(options.user_agent, "Test/1.0");
    }
}
