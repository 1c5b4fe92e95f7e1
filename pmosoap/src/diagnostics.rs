//! Diagnostics non fatals remontés pendant le décodage
//!
//! Un firmware peut ajouter des éléments que ce client ne connaît pas. Ils ne
//! font jamais échouer le décodage : ils sont signalés à un [`DiagnosticSink`]
//! injecté par l'appelant.

use std::fmt;
use std::sync::Mutex;

use tracing::warn;

/// Observation non fatale faite sur le corps d'une réponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Enfant du Body dont le couple (namespace, nom) n'est pas routé
    UnknownElement {
        namespace: Option<String>,
        name: String,
    },

    /// Contenu décodé puis écarté (Fault présent, ou second contenu)
    DiscardedContent {
        namespace: Option<String>,
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownElement { namespace, name } => write!(
                f,
                "unknown payload '{}' - '{}'",
                namespace.as_deref().unwrap_or(""),
                name
            ),
            Diagnostic::DiscardedContent { namespace, name } => write!(
                f,
                "discarded payload '{}' - '{}'",
                namespace.as_deref().unwrap_or(""),
                name
            ),
        }
    }
}

/// Destination des diagnostics du décodeur
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Envoie les diagnostics dans les logs (`warn`)
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownElement { namespace, name } => warn!(
                namespace = namespace.as_deref().unwrap_or(""),
                element = %name,
                "Unknown SOAP payload ignored"
            ),
            Diagnostic::DiscardedContent { namespace, name } => warn!(
                namespace = namespace.as_deref().unwrap_or(""),
                element = %name,
                "SOAP payload discarded"
            ),
        }
    }
}

/// Conserve les diagnostics pour inspection ultérieure
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire et retourne les diagnostics accumulés
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}
