//! Quiz session state machine.
//!
//! ```text
//! welcome --start--> question --answer--> response --continue--> question
//!                                             |
//!                                             +--continue (last)--> report
//! any --restart--> welcome
//! ```
//!
//! The session itself never performs I/O. Transitions that need narrative
//! text hand back a [`PendingNarrative`]; whoever fulfils it reports the
//! outcome through [`Session::resolve_narrative`]. Every ticket carries the
//! session generation, so results that land after a restart or after the
//! user moved on are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::archetype::Archetype;
use crate::error::{Error, Result};
use crate::questions::{question, total_questions, Question};
use crate::scoring::{compute_trait_scores, TraitScores};
use crate::types::{Answer, AnswerChoice, Category, SessionId, Timestamp};
use crate::weirdness::select_weirdest;

/// Shown when a reaction request fails or comes back empty
pub const REACTION_FALLBACK: &str =
    "My sass circuits are overloaded! But your answer was... interesting.";

/// Shown when the final report request fails or comes back empty
pub const REPORT_FALLBACK: &str =
    "Your personality broke my AI brain... which is actually quite impressive!";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Ratings at or below this make the next reaction harsher
pub const SAVAGE_RATING_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Welcome,
    Question,
    Response,
    Report,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Welcome => "welcome",
            Phase::Question => "question",
            Phase::Response => "response",
            Phase::Report => "report",
        })
    }
}

/// Roast intensity for the next reaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Normal,
    Savage,
}

impl Tone {
    pub fn from_rating(rating: u8) -> Self {
        if rating <= SAVAGE_RATING_THRESHOLD {
            Tone::Savage
        } else {
            Tone::Normal
        }
    }
}

/// Input for a single-answer reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRequest {
    pub answer_text: String,
    pub category: Category,
    pub question_text: String,
    pub tone: Tone,
}

/// Input for the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub scores: TraitScores,
    pub archetype: Archetype,
    pub weirdest_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeRequest {
    Reaction(ReactionRequest),
    FinalReport(ReportRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NarrativeKind {
    Reaction,
    FinalReport,
}

/// Identifies which phase of which session generation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrativeTicket {
    pub generation: u64,
    pub step: usize,
    pub kind: NarrativeKind,
}

/// A narrative request waiting to be fulfilled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNarrative {
    pub ticket: NarrativeTicket,
    pub request: NarrativeRequest,
}

/// Final results shown in the report phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub scores: TraitScores,
    pub archetype: Archetype,
    pub weirdest_answer: String,
    pub narrative: Option<String>,
    pub loading: bool,
}

/// Mutable root of one quiz run
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    phase: Phase,
    question_index: usize,
    answers: Vec<Answer>,
    narrative: Option<String>,
    loading: bool,
    ratings: Vec<u8>,
    tone: Tone,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            created_at: Timestamp::now(),
            phase: Phase::Welcome,
            question_index: 0,
            answers: Vec::new(),
            narrative: None,
            loading: false,
            ratings: Vec::new(),
            tone: Tone::Normal,
            generation: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest reaction or report text; `None` while nothing has landed
    pub fn narrative(&self) -> Option<&str> {
        self.narrative.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Question on screen, if the phase shows one
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.phase {
            Phase::Question | Phase::Response => question(self.question_index),
            Phase::Welcome | Phase::Report => None,
        }
    }

    /// `(step, total)` for the progress bar
    pub fn progress(&self) -> (usize, usize) {
        let total = total_questions();
        let step = match self.phase {
            Phase::Welcome => 0,
            Phase::Question | Phase::Response => self.question_index + 1,
            Phase::Report => total,
        };
        (step, total)
    }

    pub fn scores(&self) -> TraitScores {
        compute_trait_scores(&self.answers)
    }

    pub fn archetype(&self) -> Archetype {
        Archetype::from_scores(&self.scores())
    }

    pub fn weirdest_answer(&self) -> &'static str {
        select_weirdest(&self.answers)
    }

    /// Final results, only available in the report phase
    pub fn report(&self) -> Option<FinalReport> {
        if self.phase != Phase::Report {
            return None;
        }

        let scores = self.scores();
        Some(FinalReport {
            scores,
            archetype: Archetype::from_scores(&scores),
            weirdest_answer: self.weirdest_answer().to_string(),
            narrative: self.narrative.clone(),
            loading: self.loading,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        self.expect_phase(Phase::Welcome, "start")?;

        self.phase = Phase::Question;
        self.question_index = 0;
        tracing::debug!(session = %self.id, "quiz started");
        Ok(())
    }

    /// Record an answer for the current question and move to its reaction.
    ///
    /// For a predefined option a blank `text` falls back to the option's own
    /// text. Custom answers must carry non-blank text.
    pub fn select_answer(&mut self, choice: AnswerChoice, text: &str) -> Result<PendingNarrative> {
        self.expect_phase(Phase::Question, "answer")?;

        let current = question(self.question_index)
            .ok_or_else(|| Error::UnknownQuestion(format!("index {}", self.question_index)))?;

        let text = match choice {
            AnswerChoice::Option(index) => {
                let option = current.option(index).ok_or_else(|| Error::OptionOutOfRange {
                    question_id: current.id.to_string(),
                    index,
                    available: current.option_count(),
                })?;
                if text.trim().is_empty() {
                    option.text.to_string()
                } else {
                    text.to_string()
                }
            }
            AnswerChoice::Custom => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(Error::InvalidInput("custom answer is empty".to_string()));
                }
                trimmed.to_string()
            }
        };

        self.answers.push(Answer {
            question_id: current.id.to_string(),
            choice,
            text: text.clone(),
        });
        self.phase = Phase::Response;
        self.narrative = None;
        self.loading = true;

        tracing::debug!(
            session = %self.id,
            question = current.id,
            answered = self.answers.len(),
            tone = ?self.tone,
            "answer recorded"
        );

        Ok(PendingNarrative {
            ticket: self.ticket(NarrativeKind::Reaction),
            request: NarrativeRequest::Reaction(ReactionRequest {
                answer_text: text,
                category: current.category,
                question_text: current.text.to_string(),
                tone: self.tone,
            }),
        })
    }

    /// Record a 1-5 rating of the last reaction and set the tone for the next one
    pub fn submit_rating(&mut self, value: u8) -> Result<Tone> {
        self.expect_phase(Phase::Response, "rate")?;
        self.expect_settled("rate")?;
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(Error::RatingOutOfRange(value));
        }

        self.ratings.push(value);
        self.tone = Tone::from_rating(value);
        tracing::debug!(session = %self.id, rating = value, tone = ?self.tone, "rating recorded");
        Ok(self.tone)
    }

    /// Advance past the current reaction.
    ///
    /// Returns the final report request when this was the last question.
    /// Calling it again in the report phase does nothing. Not allowed until
    /// the current reaction has resolved.
    pub fn continue_quiz(&mut self) -> Result<Option<PendingNarrative>> {
        if self.phase == Phase::Response {
            self.expect_settled("continue")?;
        }

        match self.phase {
            Phase::Report => Ok(None),
            Phase::Response if self.question_index + 1 < total_questions() => {
                self.question_index += 1;
                self.phase = Phase::Question;
                self.narrative = None;
                self.loading = false;
                Ok(None)
            }
            Phase::Response => Ok(Some(self.enter_report())),
            Phase::Welcome | Phase::Question => Err(Error::InvalidTransition {
                phase: self.phase,
                action: "continue",
            }),
        }
    }

    /// Back to the welcome screen with everything cleared
    pub fn restart(&mut self) {
        self.generation += 1;
        self.phase = Phase::Welcome;
        self.question_index = 0;
        self.answers.clear();
        self.narrative = None;
        self.loading = false;
        self.ratings.clear();
        self.tone = Tone::Normal;
        tracing::debug!(session = %self.id, generation = self.generation, "session restarted");
    }

    /// Apply the outcome of a narrative request.
    ///
    /// Failures and blank text install the fixed fallback for the request
    /// kind. Returns `false` when the ticket is stale and nothing changed.
    pub fn resolve_narrative<E: fmt::Display>(
        &mut self,
        ticket: NarrativeTicket,
        outcome: std::result::Result<String, E>,
    ) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(session = %self.id, ?ticket, "discarding stale narrative");
            return false;
        }

        let fallback = match ticket.kind {
            NarrativeKind::Reaction => REACTION_FALLBACK,
            NarrativeKind::FinalReport => REPORT_FALLBACK,
        };

        let text = match outcome {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!(session = %self.id, kind = ?ticket.kind, "narrative came back empty");
                fallback.to_string()
            }
            Err(e) => {
                tracing::warn!(session = %self.id, kind = ?ticket.kind, "narrative failed: {}", e);
                fallback.to_string()
            }
        };

        self.narrative = Some(text);
        self.loading = false;
        true
    }

    /// Whether a ticket still refers to the request the session is waiting on
    pub fn is_current(&self, ticket: &NarrativeTicket) -> bool {
        if ticket.generation != self.generation || !self.loading {
            return false;
        }

        match ticket.kind {
            NarrativeKind::Reaction => {
                self.phase == Phase::Response && ticket.step == self.question_index
            }
            NarrativeKind::FinalReport => self.phase == Phase::Report,
        }
    }

    fn enter_report(&mut self) -> PendingNarrative {
        self.phase = Phase::Report;
        self.narrative = None;
        self.loading = true;

        let scores = self.scores();
        let archetype = Archetype::from_scores(&scores);
        tracing::info!(
            session = %self.id,
            chaos = scores.chaos,
            vintage = scores.vintage,
            questionable = scores.questionable,
            archetype = archetype.label(),
            "quiz complete"
        );

        PendingNarrative {
            ticket: self.ticket(NarrativeKind::FinalReport),
            request: NarrativeRequest::FinalReport(ReportRequest {
                scores,
                archetype,
                weirdest_answer: self.weirdest_answer().to_string(),
            }),
        }
    }

    fn ticket(&self, kind: NarrativeKind) -> NarrativeTicket {
        NarrativeTicket {
            generation: self.generation,
            step: self.question_index,
            kind,
        }
    }

    /// At most one narrative request is outstanding per session
    fn expect_settled(&self, action: &'static str) -> Result<()> {
        if self.loading {
            Err(Error::InvalidTransition {
                phase: self.phase,
                action,
            })
        } else {
            Ok(())
        }
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_option(session: &mut Session, index: usize) -> PendingNarrative {
        session.select_answer(AnswerChoice::Option(index), "").unwrap()
    }

    fn run_to_report(session: &mut Session, index: usize) -> PendingNarrative {
        session.start().unwrap();
        for _ in 0..total_questions() - 1 {
            let pending = answer_option(session, index);
            session.resolve_narrative::<String>(pending.ticket, Ok("ok".to_string()));
            assert!(session.continue_quiz().unwrap().is_none());
        }
        let pending = answer_option(session, index);
        session.resolve_narrative::<String>(pending.ticket, Ok("ok".to_string()));
        session.continue_quiz().unwrap().expect("report request")
    }

    #[test]
    fn test_start_moves_to_first_question() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Welcome);
        assert_eq!(session.progress(), (0, 5));
        assert!(session.current_question().is_none());

        session.start().unwrap();
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.current_question().map(|q| q.id), Some("wake-up"));
        assert_eq!(session.progress(), (1, 5));
    }

    #[test]
    fn test_select_answer_appends_one_and_loads() {
        let mut session = Session::new();
        session.start().unwrap();

        let pending = answer_option(&mut session, 4);
        assert_eq!(session.phase(), Phase::Response);
        assert_eq!(session.answers().len(), 1);
        assert!(session.is_loading());
        assert_eq!(session.answers()[0].text, "Whenever my body decides (Chaos mode)");

        match pending.request {
            NarrativeRequest::Reaction(req) => {
                assert_eq!(req.category, Category::Time);
                assert_eq!(req.tone, Tone::Normal);
            }
            other => panic!("unexpected request {:?}", other),
        }

        assert!(session.resolve_narrative::<String>(pending.ticket, Ok("lol".to_string())));
        assert_eq!(session.narrative(), Some("lol"));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_invalid_transitions_leave_state() {
        let mut session = Session::new();
        assert!(matches!(
            session.select_answer(AnswerChoice::Option(0), ""),
            Err(Error::InvalidTransition { phase: Phase::Welcome, .. })
        ));
        assert!(session.submit_rating(3).is_err());
        assert!(session.continue_quiz().is_err());

        session.start().unwrap();
        assert!(session.start().is_err());
        assert!(session.submit_rating(3).is_err());
        assert_eq!(session.answers().len(), 0);
    }

    #[test]
    fn test_select_answer_validation() {
        let mut session = Session::new();
        session.start().unwrap();

        assert!(matches!(
            session.select_answer(AnswerChoice::Option(5), "x"),
            Err(Error::OptionOutOfRange { index: 5, available: 5, .. })
        ));
        assert!(matches!(
            session.select_answer(AnswerChoice::Custom, "   "),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(session.phase(), Phase::Question);
        assert!(session.answers().is_empty());

        session.select_answer(AnswerChoice::Custom, " nap forever ").unwrap();
        assert_eq!(session.answers()[0].text, "nap forever");
    }

    #[test]
    fn test_failure_installs_fallback() {
        let mut session = Session::new();
        session.start().unwrap();
        let pending = answer_option(&mut session, 0);

        assert!(session.resolve_narrative(pending.ticket, Err("boom")));
        assert_eq!(session.narrative(), Some(REACTION_FALLBACK));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_blank_success_installs_fallback() {
        let mut session = Session::new();
        session.start().unwrap();
        let pending = answer_option(&mut session, 0);

        session.resolve_narrative::<String>(pending.ticket, Ok("  \n".to_string()));
        assert_eq!(session.narrative(), Some(REACTION_FALLBACK));
    }

    #[test]
    fn test_low_rating_sets_savage_for_next_request_only() {
        let mut session = Session::new();
        session.start().unwrap();
        let first = answer_option(&mut session, 0);
        session.resolve_narrative::<String>(first.ticket, Ok("meh".to_string()));

        assert_eq!(session.submit_rating(1).unwrap(), Tone::Savage);
        // the reaction already shown keeps its text
        assert_eq!(session.narrative(), Some("meh"));

        session.continue_quiz().unwrap();
        let second = answer_option(&mut session, 0);
        match second.request {
            NarrativeRequest::Reaction(req) => assert_eq!(req.tone, Tone::Savage),
            other => panic!("unexpected request {:?}", other),
        }
        session.resolve_narrative::<String>(second.ticket, Ok("ouch".to_string()));

        assert_eq!(session.submit_rating(4).unwrap(), Tone::Normal);
        assert_eq!(session.ratings(), &[1, 4]);
    }

    #[test]
    fn test_rating_bounds() {
        let mut session = Session::new();
        session.start().unwrap();
        let pending = answer_option(&mut session, 0);
        session.resolve_narrative::<String>(pending.ticket, Ok("ok".to_string()));

        assert_eq!(session.submit_rating(0), Err(Error::RatingOutOfRange(0)));
        assert_eq!(session.submit_rating(6), Err(Error::RatingOutOfRange(6)));
        assert_eq!(session.submit_rating(2), Ok(Tone::Savage));
        assert_eq!(session.submit_rating(3), Ok(Tone::Normal));
    }

    #[test]
    fn test_report_entered_exactly_once() {
        let mut session = Session::new();
        let pending = run_to_report(&mut session, 4);

        assert_eq!(session.phase(), Phase::Report);
        assert_eq!(session.answers().len(), 5);
        assert_eq!(session.progress(), (5, 5));

        match &pending.request {
            NarrativeRequest::FinalReport(req) => {
                assert_eq!(req.archetype, Archetype::ChaosGoblin);
                assert_eq!(req.scores.chaos, 90);
                assert_eq!(req.weirdest_answer, "Sushi with ranch dressing (I live dangerously)");
            }
            other => panic!("unexpected request {:?}", other),
        }

        assert_eq!(session.continue_quiz(), Ok(None));
        assert_eq!(session.continue_quiz(), Ok(None));

        let report = session.report().unwrap();
        assert!(report.loading);
        assert!(report.narrative.is_none());

        assert!(session.resolve_narrative::<String>(pending.ticket, Ok("report".to_string())));
        let report = session.report().unwrap();
        assert_eq!(report.narrative.as_deref(), Some("report"));
        assert!(!report.loading);

        // a second delivery for the same ticket is ignored
        assert!(!session.resolve_narrative::<String>(pending.ticket, Ok("again".to_string())));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new();
        let pending = run_to_report(&mut session, 0);
        session.restart();

        assert_eq!(session.phase(), Phase::Welcome);
        assert!(session.answers().is_empty());
        assert!(session.ratings().is_empty());
        assert_eq!(session.tone(), Tone::Normal);
        assert!(session.narrative().is_none());
        assert!(!session.is_loading());

        // late report from before the restart is dropped
        assert!(!session.resolve_narrative::<String>(pending.ticket, Ok("late".to_string())));
        assert!(session.narrative().is_none());
    }

    #[test]
    fn test_stale_reaction_after_restart_and_restart_mid_flight() {
        let mut session = Session::new();
        session.start().unwrap();
        let pending = answer_option(&mut session, 1);

        session.restart();
        session.start().unwrap();
        let fresh = answer_option(&mut session, 2);

        assert!(!session.resolve_narrative::<String>(pending.ticket, Ok("old".to_string())));
        assert!(session.is_loading());
        assert!(session.resolve_narrative::<String>(fresh.ticket, Ok("new".to_string())));
        assert_eq!(session.narrative(), Some("new"));
    }

    #[test]
    fn test_rate_and_continue_wait_for_reaction() {
        let mut session = Session::new();
        session.start().unwrap();
        let pending = answer_option(&mut session, 0);

        assert_eq!(
            session.continue_quiz(),
            Err(Error::InvalidTransition {
                phase: Phase::Response,
                action: "continue"
            })
        );
        assert_eq!(
            session.submit_rating(1),
            Err(Error::InvalidTransition {
                phase: Phase::Response,
                action: "rate"
            })
        );
        // nothing moved and no second request could be issued
        assert_eq!(session.phase(), Phase::Response);
        assert_eq!(session.question_index(), 0);
        assert!(session.ratings().is_empty());
        assert_eq!(session.tone(), Tone::Normal);
        assert!(session.select_answer(AnswerChoice::Option(0), "").is_err());

        assert!(session.resolve_narrative::<String>(pending.ticket, Ok("done".to_string())));
        assert_eq!(session.submit_rating(1), Ok(Tone::Savage));
        assert_eq!(session.continue_quiz(), Ok(None));
        assert_eq!(session.phase(), Phase::Question);
    }

    #[test]
    fn test_report_waits_for_last_reaction() {
        let mut session = Session::new();
        session.start().unwrap();
        for _ in 0..total_questions() - 1 {
            let pending = answer_option(&mut session, 1);
            session.resolve_narrative(pending.ticket, Err::<String, &str>("down"));
            session.continue_quiz().unwrap();
        }
        let last = answer_option(&mut session, 1);

        assert!(session.continue_quiz().is_err());
        assert_eq!(session.phase(), Phase::Response);

        session.resolve_narrative::<String>(last.ticket, Ok("fine".to_string()));
        assert!(session.continue_quiz().unwrap().is_some());
        assert_eq!(session.phase(), Phase::Report);
    }
}
