//! Décodage du corps d'une réponse SOAP
//!
//! Le Body est parcouru événement par événement. Chaque enfant direct est
//! classé par la [table de routage](crate::routing) puis :
//!
//! - `s:Fault` est décodé champ par champ (ordre quelconque) ;
//! - un contenu connu est décodé dans sa forme typée ;
//! - un accusé de réception ou un élément inconnu est ignoré, sous-arbre
//!   compris, en suivant la profondeur d'imbrication.
//!
//! La fermeture du Body est la seule condition de fin normale.

use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DecodeError;
use crate::fault::{FaultDetail, SoapFault};
use crate::payloads::ResponseContent;
use crate::routing::{Classification, ContentKind, Route, classify};
use crate::xml::{self, Reader};

/// Corps décodé d'une réponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Le serveur a retourné une erreur SOAP
    Fault(SoapFault),
    /// Contenu typé
    Content(ResponseContent),
    /// Accusé de réception, Body vide ou ne contenant que des éléments inconnus
    Empty,
}

impl ResponseBody {
    pub fn is_fault(&self) -> bool {
        matches!(self, ResponseBody::Fault(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            ResponseBody::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&ResponseContent> {
        match self {
            ResponseBody::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn into_content(self) -> Option<ResponseContent> {
        match self {
            ResponseBody::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Nom court de la variante
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseBody::Fault(_) => "Fault",
            ResponseBody::Content(content) => content.name(),
            ResponseBody::Empty => "Empty",
        }
    }
}

/// État du parcours des enfants du Body
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// Entre deux enfants directs du Body
    Scanning,
    /// À l'intérieur d'un enfant ignoré ; `depth` compte les ouvertures
    /// imbriquées non encore refermées
    Ignoring { element: String, depth: usize },
}

struct DecodedContent {
    content: ResponseContent,
    namespace: Option<String>,
    name: String,
}

impl DecodedContent {
    fn discard(self, diagnostics: &dyn DiagnosticSink) {
        diagnostics.report(&Diagnostic::DiscardedContent {
            namespace: self.namespace,
            name: self.name,
        });
    }
}

/// Décode une enveloppe de réponse complète
///
/// Les éléments non routés sont signalés à `diagnostics` et n'interrompent
/// jamais le décodage. Si le Body contient à la fois un Fault et un contenu,
/// le Fault l'emporte et le contenu est signalé comme écarté.
pub fn decode_response(
    input: &[u8],
    diagnostics: &dyn DiagnosticSink,
) -> Result<ResponseBody, DecodeError> {
    let input = xml::strip_bom(input);
    let mut reader = xml::reader(input);

    let mut fault = None;
    let mut content = None;

    if xml::enter_body(&mut reader)? {
        scan_body(&mut reader, input, diagnostics, &mut fault, &mut content)?;
    }
    xml::close_envelope(&mut reader)?;

    let body = match (fault, content) {
        (Some(fault), discarded) => {
            if let Some(discarded) = discarded {
                discarded.discard(diagnostics);
            }
            ResponseBody::Fault(fault)
        }
        (None, Some(decoded)) => ResponseBody::Content(decoded.content),
        (None, None) => ResponseBody::Empty,
    };

    debug!(body = body.kind(), "SOAP response decoded");
    Ok(body)
}

fn scan_body(
    reader: &mut Reader<'_>,
    input: &[u8],
    diagnostics: &dyn DiagnosticSink,
    fault: &mut Option<SoapFault>,
    content: &mut Option<DecodedContent>,
) -> Result<(), DecodeError> {
    let mut state = ScanState::Scanning;
    let mut buf = Vec::new();

    loop {
        let at = xml::position(reader);
        buf.clear();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?;
        let namespace = xml::namespace_of(resolved);

        if let ScanState::Ignoring { element, depth } = &mut state {
            match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) if *depth > 0 => *depth -= 1,
                Event::End(e) => {
                    if e.local_name().as_ref() != element.as_bytes() {
                        return Err(DecodeError::UnexpectedEnd(
                            String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        ));
                    }
                    trace!(element = %element, "Ignored subtree closed");
                    state = ScanState::Scanning;
                }
                Event::Eof => return Err(DecodeError::Truncated("Body")),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                let name = xml::local_name(&e);
                match classify(namespace.as_deref(), &name) {
                    Classification::Fault => {
                        let decoded = decode_fault(reader, input)?;
                        if fault.is_none() {
                            *fault = Some(decoded);
                        }
                    }
                    Classification::Route(Route::Decode(kind)) => {
                        xml::skip_to_end(reader, "Body")?;
                        let end = xml::position(reader);
                        let decoded =
                            decode_content(kind, input, at..end, namespace, name)?;
                        if let Some(previous) = content.replace(decoded) {
                            previous.discard(diagnostics);
                        }
                    }
                    Classification::Route(Route::NoContent) => {
                        state = ignore(state, name);
                    }
                    Classification::Unknown => {
                        diagnostics.report(&Diagnostic::UnknownElement {
                            namespace,
                            name: name.clone(),
                        });
                        state = ignore(state, name);
                    }
                }
            }
            Event::Empty(e) => {
                let name = xml::local_name(&e);
                match classify(namespace.as_deref(), &name) {
                    Classification::Fault => {
                        if fault.is_none() {
                            *fault = Some(SoapFault::default());
                        }
                    }
                    Classification::Route(Route::Decode(kind)) => {
                        let end = xml::position(reader);
                        let decoded =
                            decode_content(kind, input, at..end, namespace, name)?;
                        if let Some(previous) = content.replace(decoded) {
                            previous.discard(diagnostics);
                        }
                    }
                    Classification::Route(Route::NoContent) => {}
                    Classification::Unknown => {
                        diagnostics.report(&Diagnostic::UnknownElement { namespace, name });
                    }
                }
            }
            Event::End(e) => {
                if xml::is_envelope_element(namespace.as_deref(), e.local_name().as_ref(), "Body")
                {
                    return Ok(());
                }
                return Err(DecodeError::UnexpectedEnd(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ));
            }
            Event::Eof => return Err(DecodeError::Truncated("Body")),
            _ => {}
        }
    }
}

fn ignore(state: ScanState, element: String) -> ScanState {
    debug_assert!(
        state == ScanState::Scanning,
        "a Body child cannot open while another one is ignored"
    );
    ScanState::Ignoring { element, depth: 0 }
}

fn decode_content(
    kind: ContentKind,
    input: &[u8],
    range: std::ops::Range<usize>,
    namespace: Option<String>,
    name: String,
) -> Result<DecodedContent, DecodeError> {
    let fragment = xml::slice(input, range, &name)?;
    let content = kind.decode(fragment).map_err(|source| DecodeError::Content {
        namespace: namespace.clone().unwrap_or_default(),
        element: name.clone(),
        source,
    })?;
    trace!(element = %name, "Content decoded");

    Ok(DecodedContent {
        content,
        namespace,
        name,
    })
}

/// Décode les enfants de `<s:Fault>` jusqu'à sa fermeture
fn decode_fault(reader: &mut Reader<'_>, input: &[u8]) -> Result<SoapFault, DecodeError> {
    let mut fault = SoapFault::default();
    let mut buf = Vec::new();

    loop {
        let at = xml::position(reader);
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?
        {
            Event::Start(e) => match fault_field(&e) {
                Some("faultcode") => fault.code = Some(xml::read_text(reader, "faultcode")?),
                Some("faultstring") => {
                    fault.string = Some(xml::read_text(reader, "faultstring")?)
                }
                Some("faultactor") => {
                    fault.actor = Some(xml::read_text(reader, "faultactor")?)
                }
                Some("detail") => {
                    let inner = xml::skip_to_end(reader, "Fault")?;
                    let raw = xml::slice(input, inner, "detail")?;
                    fault.detail = Some(FaultDetail::new(raw));
                }
                _ => {
                    xml::skip_to_end(reader, "Fault")?;
                }
            },
            Event::Empty(e) => match fault_field(&e) {
                Some("faultcode") => fault.code = Some(String::new()),
                Some("faultstring") => fault.string = Some(String::new()),
                Some("faultactor") => fault.actor = Some(String::new()),
                Some("detail") => fault.detail = Some(FaultDetail::default()),
                _ => {}
            },
            Event::End(_) => return Ok(fault),
            Event::Eof => return Err(DecodeError::Truncated("Fault")),
            _ => {}
        }
    }
}

/// Nom local d'un champ de Fault connu
fn fault_field(element: &BytesStart<'_>) -> Option<&'static str> {
    match element.local_name().as_ref() {
        b"faultcode" => Some("faultcode"),
        b"faultstring" => Some("faultstring"),
        b"faultactor" => Some("faultactor"),
        b"detail" => Some("detail"),
        _ => None,
    }
}
