//! Async driver running one quiz session against a narrative client.

use sassmeter_core::{AnswerChoice, PendingNarrative, Result, Session, Tone};
use std::sync::Arc;

use crate::agent::{narrate, NarrativeClient};

/// Owns a [`Session`] and fulfils its narrative requests in place.
///
/// Narrative failures never escape: the session swaps in its fallback text
/// and the quiz carries on.
pub struct SessionController {
    session: Session,
    narrator: Arc<dyn NarrativeClient>,
}

impl SessionController {
    pub fn new(narrator: Arc<dyn NarrativeClient>) -> Self {
        Self::with_session(Session::new(), narrator)
    }

    pub fn with_session(session: Session, narrator: Arc<dyn NarrativeClient>) -> Self {
        Self { session, narrator }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn narrator(&self) -> &dyn NarrativeClient {
        self.narrator.as_ref()
    }

    pub fn start(&mut self) -> Result<()> {
        self.session.start()
    }

    /// Record an answer and wait for its reaction
    pub async fn select_answer(&mut self, choice: AnswerChoice, text: &str) -> Result<()> {
        let pending = self.session.select_answer(choice, text)?;
        self.fulfil(pending).await;
        Ok(())
    }

    pub fn submit_rating(&mut self, value: u8) -> Result<Tone> {
        self.session.submit_rating(value)
    }

    /// Advance; after the last question this waits for the final report
    pub async fn continue_quiz(&mut self) -> Result<()> {
        if let Some(pending) = self.session.continue_quiz()? {
            self.fulfil(pending).await;
        }
        Ok(())
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    async fn fulfil(&mut self, pending: PendingNarrative) {
        tracing::debug!(
            narrator = self.narrator.name(),
            kind = ?pending.ticket.kind,
            "requesting narrative"
        );
        let outcome = narrate(self.narrator.as_ref(), &pending.request).await;
        self.session.resolve_narrative(pending.ticket, outcome);
    }
}
