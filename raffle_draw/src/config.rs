// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A participant in the raffle.
///
/// Identity is the full tuple value: two participants are the same entry if
/// and only if all three fields match. There is no dedicated unique key.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Participant {
    pub name: String,
    /// National identifier, kept as text (leading zeros are significant).
    pub national_id: String,
    /// The raw phone number as loaded. Comparisons use this value, never the
    /// masked form.
    pub phone: String,
}

/// One request to draw a batch of winners.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DrawRequest {
    /// How many winners to select in this batch. Must be positive.
    pub winner_count: u32,
    /// Countdown duration for the presentation layer, in seconds. Must be
    /// positive. The engine validates it but does not wait on it.
    pub countdown_seconds: u32,
}

impl DrawRequest {
    pub fn single() -> DrawRequest {
        DrawRequest {
            winner_count: 1,
            countdown_seconds: 5,
        }
    }
}

// ******** Output data structures *********

/// The outcome of one successful draw batch.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawOutcome {
    /// The selected winners. The order within the batch carries no meaning.
    pub winners: Vec<Participant>,
    /// How many eligible participants are left after this batch.
    pub remaining: usize,
}

/// Errors that prevent a draw from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawErrors {
    EmptyPool,
    InvalidWinnerCount,
    InvalidCountdown,
    NotEnoughRemaining { requested: u32, remaining: usize },
}

impl Error for DrawErrors {}

impl Display for DrawErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawErrors::EmptyPool => write!(f, "the participant pool is empty"),
            DrawErrors::InvalidWinnerCount => {
                write!(f, "the number of winners must be a positive integer")
            }
            DrawErrors::InvalidCountdown => {
                write!(f, "the countdown duration must be a positive integer")
            }
            DrawErrors::NotEnoughRemaining {
                requested,
                remaining,
            } => write!(
                f,
                "requested {} winners but only {} participants have not won yet",
                requested, remaining
            ),
        }
    }
}

// ********* Configuration **********

/// The rules that govern a draw session.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DrawRules {
    /// Seed for the random number generator. A fixed seed makes the draw
    /// reproducible, which is useful for audits and tests. When absent, the
    /// generator is seeded from operating system entropy.
    pub seed: Option<u64>,
}

impl DrawRules {
    pub const DEFAULT_RULES: DrawRules = DrawRules { seed: None };
}
