pub use crate::config::*;
use crate::{make_rng, run_draw_with_rng};

use rand::rngs::StdRng;

/// A draw session: the loaded pool plus the cumulative winners log.
///
/// The session is the single owner of the anti-repeat state. Each successful
/// call to [DrawSession::draw] unions the new batch into the log, so a
/// participant can win at most once per session. A failed draw leaves the
/// log untouched.
///
/// ```
/// pub use raffle_draw::session::DrawSession;
/// pub use raffle_draw::{DrawRequest, DrawRules, Participant};
/// # use raffle_draw::DrawErrors;
///
/// let pool = vec![
///     Participant {
///         name: "Anna".to_string(),
///         national_id: "0011223344".to_string(),
///         phone: "09121234567".to_string(),
///     },
///     Participant {
///         name: "Bob".to_string(),
///         national_id: "0055667788".to_string(),
///         phone: "09129876543".to_string(),
///     },
/// ];
/// let mut session = DrawSession::new(&DrawRules::DEFAULT_RULES).participants(&pool);
///
/// let outcome = session.draw(&DrawRequest {
///     winner_count: 1,
///     countdown_seconds: 5,
/// })?;
/// assert_eq!(outcome.winners.len(), 1);
/// assert_eq!(session.remaining(), 1);
///
/// # Ok::<(), DrawErrors>(())
/// ```
pub struct DrawSession {
    _pool: Vec<Participant>,
    _winners: Vec<Participant>,
    _rng: StdRng,
}

impl DrawSession {
    pub fn new(rules: &DrawRules) -> DrawSession {
        DrawSession {
            _pool: Vec::new(),
            _winners: Vec::new(),
            _rng: make_rng(rules),
        }
    }

    /// Replaces the pool wholesale. The winners log is kept: participants
    /// that already won stay excluded even after a reload.
    pub fn participants(self, pool: &[Participant]) -> DrawSession {
        DrawSession {
            _pool: pool.to_vec(),
            _winners: self._winners,
            _rng: self._rng,
        }
    }

    /// Runs one batch and records its winners in the session log.
    pub fn draw(&mut self, request: &DrawRequest) -> Result<DrawOutcome, DrawErrors> {
        let outcome = run_draw_with_rng(&self._pool, &self._winners, request, &mut self._rng)?;
        self._winners.extend(outcome.winners.iter().cloned());
        Ok(outcome)
    }

    /// Every winner selected so far in this session, in selection order.
    pub fn winners(&self) -> &[Participant] {
        &self._winners
    }

    pub fn pool(&self) -> &[Participant] {
        &self._pool
    }

    /// How many participants have not won yet.
    pub fn remaining(&self) -> usize {
        crate::eligible_participants(&self._pool, &self._winners).len()
    }

    /// Discards the in-memory winners log. Anything already persisted by the
    /// caller is unaffected.
    pub fn clear_winners(&mut self) {
        self._winners.clear();
    }
}
