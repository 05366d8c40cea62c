//! Shared server state: live sessions and the narrative backend.

use chrono::{DateTime, Utc};
use sassmeter_agents::{narrate, NarrativeClient};
use sassmeter_core::{
    Category, PendingNarrative, Phase, Question, Session, SessionId, Tone, TraitScores,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::{ApiError, ApiResult};

pub type SharedState = Arc<AppState>;

/// A session and the last time a client touched it
struct Entry {
    session: Session,
    last_seen: Instant,
}

impl Entry {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut Session {
        self.last_seen = Instant::now();
        &mut self.session
    }
}

/// In-memory session store plus the narrator every session talks to
pub struct AppState {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    narrator: Arc<dyn NarrativeClient>,
}

impl AppState {
    pub fn new(narrator: Arc<dyn NarrativeClient>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            narrator,
        }
    }

    pub fn shared(narrator: Arc<dyn NarrativeClient>) -> SharedState {
        Arc::new(Self::new(narrator))
    }

    pub fn narrator_name(&self) -> &str {
        self.narrator.name()
    }

    pub async fn create_session(&self) -> SessionView {
        let session = Session::new();
        let view = SessionView::from(&session);

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id(), Entry::new(session));
        tracing::info!(session = %view.id, active = sessions.len(), "session created");

        view
    }

    /// Current view; polling counts as activity
    pub async fn view(&self, id: SessionId) -> ApiResult<SessionView> {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(&id)
            .map(|entry| SessionView::from(&*entry.touch()))
            .ok_or(ApiError::SessionNotFound(id))
    }

    /// Run a transition against one session under the write lock
    pub async fn update<T>(
        &self,
        id: SessionId,
        transition: impl FnOnce(&mut Session) -> sassmeter_core::Result<T>,
    ) -> ApiResult<(T, SessionView)> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(ApiError::SessionNotFound(id))?
            .touch();
        let output = transition(session)?;
        Ok((output, SessionView::from(&*session)))
    }

    pub async fn remove(&self, id: SessionId) -> ApiResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&id).is_none() {
            return Err(ApiError::SessionNotFound(id));
        }
        tracing::info!(session = %id, active = sessions.len(), "session removed");
        Ok(())
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions nobody has touched for `idle_ttl`; returns how many went
    pub async fn evict_idle(&self, idle_ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < idle_ttl);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, active = sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    /// Run [`AppState::evict_idle`] every `every` for the life of the process
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        idle_ttl: Duration,
        every: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                state.evict_idle(idle_ttl).await;
            }
        })
    }

    /// Fulfil a narrative request in the background.
    ///
    /// The lock is not held while the backend is working; the result is
    /// applied through the ticket, so a restart in the meantime wins.
    pub fn dispatch(self: &Arc<Self>, id: SessionId, pending: PendingNarrative) -> tokio::task::JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = narrate(state.narrator.as_ref(), &pending.request).await;

            let mut sessions = state.sessions.write().await;
            match sessions.get_mut(&id) {
                Some(entry) => {
                    if !entry.session.resolve_narrative(pending.ticket, outcome) {
                        tracing::debug!(session = %id, "narrative arrived after the session moved on");
                    }
                }
                None => tracing::debug!(session = %id, "narrative arrived for a removed session"),
            }
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub text: &'static str,
    pub category: Category,
    pub options: Vec<&'static str>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text,
            category: question.category,
            options: question.options.iter().map(|o| o.text).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressView {
    pub step: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub scores: TraitScores,
    pub archetype: &'static str,
    pub emoji: &'static str,
    pub weirdest_answer: String,
}

/// Everything the view layer may read about a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub progress: ProgressView,
    pub question: Option<QuestionView>,
    pub narrative: Option<String>,
    pub loading: bool,
    pub answered: usize,
    pub tone: Tone,
    pub report: Option<ReportView>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let (step, total) = session.progress();
        let report = session.report().map(|report| ReportView {
            scores: report.scores,
            archetype: report.archetype.label(),
            emoji: report.archetype.emoji(),
            weirdest_answer: report.weirdest_answer,
        });

        Self {
            id: session.id(),
            created_at: session.created_at().to_datetime(),
            phase: session.phase(),
            progress: ProgressView { step, total },
            question: session.current_question().map(QuestionView::from),
            narrative: session.narrative().map(str::to_string),
            loading: session.is_loading(),
            answered: session.answers().len(),
            tone: session.tone(),
            report,
        }
    }
}
