use crate::models::{ArtistPopularity, RankingEntry, RoundResult};
use thiserror::Error;

pub const TOTAL_ROUNDS: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is in phase {0:?} and does not accept answers")]
    NotActive(SessionPhase),
    #[error("Answer artist '{0}' is the theme artist of this round")]
    SameAsTheme(String),
    #[error("Session must be finalized before it can be submitted")]
    NotFinalized,
    #[error("A display name is required to submit a score")]
    EmptyName,
}

/// Lifecycle of a game session.
///
/// `Loading -> Active(round 1..=total) -> Finalized -> {Submitted | Abandoned}`.
/// The session stays `Active` across rounds and finalizes automatically when
/// the last round's result is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Finalized,
    Submitted,
    Abandoned,
}

/// A 10-round guessing game. Each round the player is shown a theme artist
/// and names another artist; the round's score is the absolute popularity
/// difference. Lower accumulated score is better.
#[derive(Debug)]
pub struct GameSession {
    total_rounds: usize,
    phase: SessionPhase,
    results: Vec<RoundResult>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_rounds(TOTAL_ROUNDS)
    }

    pub fn with_rounds(total_rounds: usize) -> Self {
        Self {
            total_rounds,
            phase: SessionPhase::Loading,
            results: Vec::with_capacity(total_rounds),
        }
    }

    /// Marks the session playable once its theme artists have been fetched.
    pub fn begin(&mut self) {
        if self.phase == SessionPhase::Loading {
            self.phase = SessionPhase::Active;
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// 1-based index of the round currently being played.
    pub fn current_round(&self) -> usize {
        (self.results.len() + 1).min(self.total_rounds)
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    /// Sum of all round diffs so far.
    pub fn accumulated_score(&self) -> u32 {
        self.results.iter().map(|r| u32::from(r.diff)).sum()
    }

    /// Records the answer for the current round.
    ///
    /// Rejected before scoring when the answer resolves to the theme artist
    /// itself. Finalizes the session when this was the last round.
    pub fn record_answer(
        &mut self,
        theme: &ArtistPopularity,
        answer: &ArtistPopularity,
    ) -> Result<RoundResult, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive(self.phase));
        }
        if answer.id == theme.id {
            return Err(SessionError::SameAsTheme(answer.name.clone()));
        }

        let result = RoundResult::new(theme, answer);
        self.results.push(result.clone());
        if self.results.len() == self.total_rounds {
            self.phase = SessionPhase::Finalized;
        }

        Ok(result)
    }

    /// Turns the finalized session into a leaderboard entry.
    pub fn submit(&mut self, name: &str) -> Result<RankingEntry, SessionError> {
        if self.phase != SessionPhase::Finalized {
            return Err(SessionError::NotFinalized);
        }
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }

        self.phase = SessionPhase::Submitted;
        Ok(RankingEntry::new(
            name.trim(),
            f64::from(self.accumulated_score()),
        ))
    }

    /// Discards a finalized session without submitting.
    pub fn abandon(&mut self) {
        if self.phase == SessionPhase::Finalized {
            self.phase = SessionPhase::Abandoned;
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, popularity: u8) -> ArtistPopularity {
        ArtistPopularity {
            id: id.to_string(),
            name: format!("artist-{id}"),
            popularity,
        }
    }

    #[test]
    fn test_session_starts_in_loading() {
        let mut session = GameSession::with_rounds(3);
        assert_eq!(session.phase(), SessionPhase::Loading);

        let err = session
            .record_answer(&artist("t", 50), &artist("a", 60))
            .unwrap_err();
        assert_eq!(err, SessionError::NotActive(SessionPhase::Loading));
    }

    #[test]
    fn test_full_game_finalizes_on_last_round() {
        let mut session = GameSession::with_rounds(3);
        session.begin();

        session
            .record_answer(&artist("t1", 50), &artist("a1", 40))
            .unwrap();
        session
            .record_answer(&artist("t2", 80), &artist("a2", 85))
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current_round(), 3);

        session
            .record_answer(&artist("t3", 30), &artist("a3", 30))
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Finalized);
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.accumulated_score(), 10 + 5 + 0);
    }

    #[test]
    fn test_answer_equal_to_theme_is_rejected_before_scoring() {
        let mut session = GameSession::with_rounds(2);
        session.begin();

        let theme = artist("same", 70);
        let err = session.record_answer(&theme, &theme.clone()).unwrap_err();
        assert!(matches!(err, SessionError::SameAsTheme(_)));

        // Nothing was recorded.
        assert!(session.results().is_empty());
        assert_eq!(session.current_round(), 1);
    }

    #[test]
    fn test_no_answers_after_finalization() {
        let mut session = GameSession::with_rounds(1);
        session.begin();
        session
            .record_answer(&artist("t", 50), &artist("a", 55))
            .unwrap();

        let err = session
            .record_answer(&artist("t2", 10), &artist("a2", 20))
            .unwrap_err();
        assert_eq!(err, SessionError::NotActive(SessionPhase::Finalized));
    }

    #[test]
    fn test_submit_requires_finalized_and_a_name() {
        let mut session = GameSession::with_rounds(1);
        session.begin();
        assert_eq!(session.submit("player").unwrap_err(), SessionError::NotFinalized);

        session
            .record_answer(&artist("t", 50), &artist("a", 58))
            .unwrap();

        assert_eq!(session.submit("   ").unwrap_err(), SessionError::EmptyName);

        let entry = session.submit("  player one ").unwrap();
        assert_eq!(entry.name, "player one");
        assert_eq!(entry.score, 8.0);
        assert_eq!(session.phase(), SessionPhase::Submitted);
    }

    #[test]
    fn test_abandon_only_from_finalized() {
        let mut session = GameSession::with_rounds(1);
        session.begin();
        session.abandon();
        assert_eq!(session.phase(), SessionPhase::Active);

        session
            .record_answer(&artist("t", 1), &artist("a", 2))
            .unwrap();
        session.abandon();
        assert_eq!(session.phase(), SessionPhase::Abandoned);

        assert_eq!(session.submit("late").unwrap_err(), SessionError::NotFinalized);
    }

    #[test]
    fn test_default_session_is_ten_rounds() {
        assert_eq!(GameSession::new().total_rounds(), TOTAL_ROUNDS);
    }
}
