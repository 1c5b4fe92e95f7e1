//! Lecture événementielle de l'enveloppe (quick-xml `NsReader`)

use std::ops::Range;

use quick_xml::NsReader;
use quick_xml::encoding::EncodingError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::SOAP_ENVELOPE_NS;
use crate::error::DecodeError;

pub(crate) type Reader<'a> = NsReader<&'a [u8]>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Retire un BOM UTF-8 initial
///
/// Le lecteur l'ignore sans le compter dans `buffer_position()` : les
/// positions ne correspondent aux octets de l'entrée qu'une fois le BOM retiré.
pub(crate) fn strip_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(UTF8_BOM).unwrap_or(input)
}

pub(crate) fn reader(input: &[u8]) -> Reader<'_> {
    NsReader::from_reader(input)
}

pub(crate) fn position(reader: &Reader<'_>) -> usize {
    reader.buffer_position() as usize
}

/// Namespace résolu, `None` si l'élément n'est pas qualifié
pub(crate) fn namespace_of(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        _ => None,
    }
}

pub(crate) fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

pub(crate) fn is_envelope_element(namespace: Option<&str>, local: &[u8], expected: &str) -> bool {
    namespace == Some(SOAP_ENVELOPE_NS) && local == expected.as_bytes()
}

/// Consomme le sous-arbre dont le `Start` vient d'être lu
///
/// Retourne la plage du contenu interne ; le lecteur est ensuite placé juste
/// après la balise fermante. Les événements passent par `read_event_into`
/// pour que la portée des namespaces ouverte par le `Start` soit refermée.
pub(crate) fn skip_to_end(
    reader: &mut Reader<'_>,
    context: &'static str,
) -> Result<Range<usize>, DecodeError> {
    let start = position(reader);
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        let at = position(reader);
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?
        {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth > 0 => depth -= 1,
            Event::End(_) => return Ok(start..at),
            Event::Eof => return Err(DecodeError::Truncated(context)),
            _ => {}
        }
    }
}

/// Namespace et nom local du premier élément d'un fragment
pub(crate) fn root_element(fragment: &[u8]) -> Option<(Option<String>, String)> {
    let mut reader = reader(fragment);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf).ok()?;
        match event {
            Event::Start(e) | Event::Empty(e) => {
                return Some((namespace_of(resolved), local_name(&e)));
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}

/// Tranche UTF-8 de l'entrée
pub(crate) fn slice<'a>(
    input: &'a [u8],
    range: Range<usize>,
    element: &str,
) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(&input[range]).map_err(|source| DecodeError::Utf8 {
        element: element.to_string(),
        source,
    })
}

/// Positionne le lecteur à l'intérieur de `<s:Body>`
///
/// Ignore un éventuel `<s:Header>`. Retourne `false` si le Body est
/// auto-fermant (`<s:Body/>`).
pub(crate) fn enter_body(reader: &mut Reader<'_>) -> Result<bool, DecodeError> {
    let mut buf = Vec::new();

    // Racine
    loop {
        let at = position(reader);
        buf.clear();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?;
        let namespace = namespace_of(resolved);

        match event {
            Event::Start(e) => {
                if is_envelope_element(namespace.as_deref(), e.local_name().as_ref(), "Envelope") {
                    break;
                }
                return Err(DecodeError::NotAnEnvelope(local_name(&e)));
            }
            Event::Empty(e) => {
                if is_envelope_element(namespace.as_deref(), e.local_name().as_ref(), "Envelope") {
                    return Err(DecodeError::MissingBody);
                }
                return Err(DecodeError::NotAnEnvelope(local_name(&e)));
            }
            Event::Eof => return Err(DecodeError::Truncated("Envelope")),
            _ => {}
        }
    }

    // Enfants de l'enveloppe
    loop {
        let at = position(reader);
        buf.clear();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?;
        let namespace = namespace_of(resolved);

        match event {
            Event::Start(e) => {
                if is_envelope_element(namespace.as_deref(), e.local_name().as_ref(), "Body") {
                    return Ok(true);
                }
                // Header ou extension inconnue
                skip_to_end(reader, "Envelope")?;
            }
            Event::Empty(e) => {
                if is_envelope_element(namespace.as_deref(), e.local_name().as_ref(), "Body") {
                    return Ok(false);
                }
            }
            Event::End(_) => return Err(DecodeError::MissingBody),
            Event::Eof => return Err(DecodeError::Truncated("Envelope")),
            _ => {}
        }
    }
}

/// Lit jusqu'à la fermeture de `<s:Envelope>`, en ignorant ce qui suit le Body
pub(crate) fn close_envelope(reader: &mut Reader<'_>) -> Result<(), DecodeError> {
    let mut buf = Vec::new();
    loop {
        let at = position(reader);
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?
        {
            Event::Start(_) => {
                skip_to_end(reader, "Envelope")?;
            }
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(DecodeError::Truncated("Envelope")),
            _ => {}
        }
    }
}

/// Texte d'un élément simple, références d'entités résolues
///
/// Les éléments imbriqués éventuels sont ignorés.
pub(crate) fn read_text(
    reader: &mut Reader<'_>,
    element: &'static str,
) -> Result<String, DecodeError> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        let at = position(reader);
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(at, e))?
        {
            Event::Text(t) => {
                text.push_str(&t.decode().map_err(|e| encoding(at, e))?);
            }
            Event::CData(c) => {
                text.push_str(&c.decode().map_err(|e| encoding(at, e))?);
            }
            Event::GeneralRef(r) => {
                if let Some(ch) = r.resolve_char_ref().map_err(|e| DecodeError::xml(at, e))? {
                    text.push(ch);
                } else {
                    let name = r.decode().map_err(|e| encoding(at, e))?;
                    match quick_xml::escape::resolve_predefined_entity(&name) {
                        Some(value) => text.push_str(value),
                        None => {
                            text.push('&');
                            text.push_str(&name);
                            text.push(';');
                        }
                    }
                }
            }
            Event::Start(_) => {
                skip_to_end(reader, element)?;
            }
            Event::End(_) => return Ok(text.trim().to_string()),
            Event::Eof => return Err(DecodeError::Truncated(element)),
            _ => {}
        }
    }
}

fn encoding(position: usize, error: EncodingError) -> DecodeError {
    DecodeError::xml(position, quick_xml::Error::Encoding(error))
}
