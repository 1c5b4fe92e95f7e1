//! Erreurs d'encodage et de décodage SOAP

use quick_xml::de::DeError;
use quick_xml::se::SeError;
use thiserror::Error;

/// Erreur de construction d'une enveloppe de requête
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("failed to serialize SOAP envelope: {0}")]
    Serialize(#[from] SeError),
}

/// Erreur de décodage d'une enveloppe de réponse
///
/// Toute erreur de décodage invalide la réponse entière : aucun résultat
/// partiel n'est retourné.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// XML mal formé (balise non fermée, noms incohérents, encodage…)
    #[error("malformed XML near byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document root is <{0}>, not a SOAP Envelope")]
    NotAnEnvelope(String),

    #[error("missing SOAP Body")]
    MissingBody,

    #[error("SOAP Body carries no payload")]
    EmptyBody,

    /// Fin de document atteinte avant la fermeture de l'élément indiqué
    #[error("unexpected end of document inside {0}")]
    Truncated(&'static str),

    /// Balise fermante sans contexte correspondant
    #[error("unexpected end element </{0}>")]
    UnexpectedEnd(String),

    /// Un élément reconnu n'a pas pu être décodé dans sa forme typée
    #[error("cannot decode <{element}> from namespace '{namespace}': {source}")]
    Content {
        namespace: String,
        element: String,
        #[source]
        source: DeError,
    },

    #[error("invalid UTF-8 in <{element}>: {source}")]
    Utf8 {
        element: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl DecodeError {
    pub(crate) fn xml(position: usize, source: impl Into<quick_xml::Error>) -> Self {
        DecodeError::Xml {
            position,
            source: source.into(),
        }
    }
}
