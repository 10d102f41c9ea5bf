//! Reveal sessions: temporary single-line exceptions to redaction.
//!
//! A reveal session shows exactly one line of one document unmasked until
//! the next qualifying interaction. The tracker only answers whether a
//! session should end; the caller decides when to ask and clears it.

use serde::{Deserialize, Serialize};

/// Identifier for an open document, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// A discrete host interaction, tagged with the cursor line where relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A document became the active one.
    DocumentEntered(DocumentId),
    /// Text changed on the given line.
    TextChanged { doc: DocumentId, line: usize },
    /// The cursor moved to the given line.
    CursorMoved { doc: DocumentId, line: usize },
    /// Insert/edit mode was entered with the cursor on the given line.
    InsertEntered { doc: DocumentId, line: usize },
    /// A document was left or closed.
    DocumentLeft(DocumentId),
}

/// Tracks which line of the current document is temporarily shown unmasked.
///
/// At most one line is revealed at a time; starting a new reveal implicitly
/// ends the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealTracker {
    session: Option<(DocumentId, usize)>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a reveal session for `line` of `doc`, ending any prior one.
    pub fn reveal(&mut self, doc: DocumentId, line: usize) {
        self.session = Some((doc, line));
    }

    /// Ends the current session.
    pub fn clear(&mut self) {
        self.session = None;
    }

    /// Whether `line` of `doc` is currently revealed.
    pub fn is_revealed(&self, doc: DocumentId, line: usize) -> bool {
        self.session == Some((doc, line))
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<(DocumentId, usize)> {
        self.session
    }

    /// Whether the current session must end given a host interaction.
    ///
    /// Interactions on the revealed line itself keep the session alive;
    /// leaving the document, entering another one, or touching any other
    /// line ends it. With no active session the answer is always `false`.
    pub fn should_end(&self, interaction: &Interaction) -> bool {
        let (doc, line) = match self.session {
            Some(session) => session,
            None => return false,
        };

        match *interaction {
            Interaction::DocumentLeft(d) => d == doc,
            Interaction::DocumentEntered(d) => d != doc,
            Interaction::TextChanged { doc: d, line: l }
            | Interaction::CursorMoved { doc: d, line: l }
            | Interaction::InsertEntered { doc: d, line: l } => d != doc || l != line,
        }
    }
}
