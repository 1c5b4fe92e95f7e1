//! SOAP Faults pour UPnP

use std::fmt;

use quick_xml::de::DeError;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::UPNP_CONTROL_NS;
use crate::xml;

/// Codes d'erreur SOAP UPnP standards
pub mod error_codes {
    /// Action invalide
    pub const INVALID_ACTION: u32 = 401;

    /// Arguments invalides
    pub const INVALID_ARGS: u32 = 402;

    /// Action échouée
    pub const ACTION_FAILED: u32 = 501;

    /// Valeur d'argument invalide
    pub const ARGUMENT_VALUE_INVALID: u32 = 600;

    /// Argument hors limites
    pub const ARGUMENT_VALUE_OUT_OF_RANGE: u32 = 601;

    /// Action optionnelle non implémentée
    pub const OPTIONAL_ACTION_NOT_IMPLEMENTED: u32 = 602;

    /// Mémoire insuffisante
    pub const OUT_OF_MEMORY: u32 = 603;

    /// Intervention humaine requise
    pub const HUMAN_INTERVENTION_REQUIRED: u32 = 604;

    /// Argument sous forme de chaîne trop long
    pub const STRING_ARGUMENT_TOO_LONG: u32 = 605;

    /// AVTransport : transition non disponible
    pub const TRANSITION_NOT_AVAILABLE: u32 = 701;

    /// AVTransport : pas de média
    pub const NO_CONTENTS: u32 = 702;
}

/// Erreur SOAP (Fault) retournée à la place d'un contenu
///
/// Tous les champs sont optionnels : un équipement peut n'en envoyer qu'une
/// partie, dans n'importe quel ordre.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapFault {
    /// Code du fault (ex: "s:Client")
    pub code: Option<String>,

    /// Description lisible
    pub string: Option<String>,

    /// Acteur à l'origine du fault
    pub actor: Option<String>,

    /// Détail spécifique à l'émetteur, non interprété
    pub detail: Option<FaultDetail>,
}

impl SoapFault {
    /// Raccourci vers l'erreur UPnP contenue dans le détail, si présente
    pub fn upnp_error(&self) -> Option<UpnpError> {
        self.detail.as_ref().and_then(FaultDetail::upnp_error)
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("(no faultcode)"),
            self.string.as_deref().unwrap_or("(no faultstring)")
        )?;
        if let Some(err) = self.upnp_error() {
            write!(f, " (UPnP error {}", err.error_code)?;
            if !err.error_description.is_empty() {
                write!(f, ": {}", err.error_description)?;
            } else if let Some(meaning) = err.standard_meaning() {
                write!(f, ": {}", meaning)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Contenu brut de l'élément `<detail>`
///
/// Le décodeur générique ne l'interprète pas ; l'appelant choisit la forme
/// attendue avec [`FaultDetail::decode`] ou [`FaultDetail::upnp_error`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultDetail {
    raw: String,
}

impl FaultDetail {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// XML interne de `<detail>`, tel que reçu
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Décode le premier élément du détail dans la forme `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DeError> {
        quick_xml::de::from_str(self.raw.trim())
    }

    /// Interprète le détail comme un `<UPnPError>`
    ///
    /// L'élément doit appartenir à `urn:schemas-upnp-org:control-1-0` ou ne
    /// déclarer aucun namespace.
    pub fn upnp_error(&self) -> Option<UpnpError> {
        let (namespace, name) = xml::root_element(self.raw.trim().as_bytes())?;
        if name != "UPnPError" {
            return None;
        }
        match namespace.as_deref() {
            None | Some(UPNP_CONTROL_NS) => self.decode().ok(),
            Some(_) => None,
        }
    }
}

/// Erreur UPnP spécifique (`urn:schemas-upnp-org:control-1-0`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpnpError {
    /// Code d'erreur UPnP (ex: 401, 501)
    #[serde(rename = "errorCode")]
    pub error_code: u32,

    /// Description de l'erreur
    #[serde(rename = "errorDescription", default)]
    pub error_description: String,
}

impl UpnpError {
    /// Signification normalisée du code, pour les codes standards
    pub fn standard_meaning(&self) -> Option<&'static str> {
        use error_codes::*;

        match self.error_code {
            INVALID_ACTION => Some("Invalid Action"),
            INVALID_ARGS => Some("Invalid Args"),
            ACTION_FAILED => Some("Action Failed"),
            ARGUMENT_VALUE_INVALID => Some("Argument Value Invalid"),
            ARGUMENT_VALUE_OUT_OF_RANGE => Some("Argument Value Out of Range"),
            OPTIONAL_ACTION_NOT_IMPLEMENTED => Some("Optional Action Not Implemented"),
            OUT_OF_MEMORY => Some("Out of Memory"),
            HUMAN_INTERVENTION_REQUIRED => Some("Human Intervention Required"),
            STRING_ARGUMENT_TOO_LONG => Some("String Argument Too Long"),
            TRANSITION_NOT_AVAILABLE => Some("Transition not available"),
            NO_CONTENTS => Some("No contents"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPNP_DETAIL: &str = r#"
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>701</errorCode>
          <errorDescription>Transition not available</errorDescription>
        </UPnPError>
    "#;

    #[test]
    fn upnp_error_is_decoded_from_detail() {
        let detail = FaultDetail::new(UPNP_DETAIL);
        let err = detail.upnp_error().unwrap();
        assert_eq!(err.error_code, error_codes::TRANSITION_NOT_AVAILABLE);
        assert_eq!(err.error_description, "Transition not available");
    }

    #[test]
    fn foreign_detail_is_kept_raw() {
        let detail = FaultDetail::new("<Vendor><Reason>busy</Reason></Vendor>");
        assert!(detail.upnp_error().is_none());
        assert!(detail.raw().contains("busy"));
    }

    #[test]
    fn upnp_error_in_foreign_namespace_is_ignored() {
        let detail = FaultDetail::new(
            r#"<UPnPError xmlns="urn:vendor:errors"><errorCode>701</errorCode></UPnPError>"#,
        );
        assert!(detail.upnp_error().is_none());

        let prefixed = FaultDetail::new(format!(
            r#"<e:UPnPError xmlns:e="{UPNP_CONTROL_NS}"><errorCode>402</errorCode></e:UPnPError>"#
        ));
        assert_eq!(prefixed.upnp_error().unwrap().error_code, error_codes::INVALID_ARGS);
    }

    #[test]
    fn display_uses_standard_meaning_when_description_is_missing() {
        let fault = SoapFault {
            code: Some("s:Client".into()),
            string: Some("UPnPError".into()),
            actor: None,
            detail: Some(FaultDetail::new(
                "<UPnPError><errorCode>402</errorCode></UPnPError>",
            )),
        };
        assert_eq!(
            fault.to_string(),
            "s:Client: UPnPError (UPnP error 402: Invalid Args)"
        );
    }

    #[test]
    fn display_without_detail() {
        let fault = SoapFault {
            string: Some("boom".into()),
            ..SoapFault::default()
        };
        assert_eq!(fault.to_string(), "(no faultcode): boom");
    }
}
