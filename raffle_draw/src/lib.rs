mod config;
pub mod session;

use log::{debug, info};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use crate::config::*;

/// Computes the participants that are still eligible for a draw.
///
/// The pool order is preserved. Exclusion is by full tuple value: if a tuple
/// appears several times in the pool and that value has already won, every
/// copy is excluded.
pub fn eligible_participants(
    pool: &[Participant],
    already_won: &[Participant],
) -> Vec<Participant> {
    pool.iter()
        .filter(|p| !already_won.contains(p))
        .cloned()
        .collect()
}

/// Runs one draw batch with the given rules.
///
/// Arguments:
/// * `pool` the full participant list, as loaded
/// * `already_won` the participants selected by previous batches
/// * `request` the number of winners to select (and the countdown carried
///   for presentation layers)
/// * `rules` the session rules, including the optional seed
///
/// This is a pure function over its inputs: the caller is responsible for
/// unioning the returned winners into its own records and for persisting
/// them. Every subset of `winner_count` eligible participants is equally
/// likely; the order of the returned winners carries no meaning.
pub fn run_draw(
    pool: &[Participant],
    already_won: &[Participant],
    request: &DrawRequest,
    rules: &DrawRules,
) -> Result<DrawOutcome, DrawErrors> {
    let mut rng = make_rng(rules);
    run_draw_with_rng(pool, already_won, request, &mut rng)
}

/// Same as [run_draw], with a caller-provided generator.
///
/// A session that runs several batches should reuse one generator so that a
/// fixed seed makes the whole sequence of batches reproducible, not just the
/// first one.
pub fn run_draw_with_rng<R: Rng>(
    pool: &[Participant],
    already_won: &[Participant],
    request: &DrawRequest,
    rng: &mut R,
) -> Result<DrawOutcome, DrawErrors> {
    info!(
        "run_draw: pool size: {}, already won: {}, requested: {}",
        pool.len(),
        already_won.len(),
        request.winner_count
    );
    if request.winner_count == 0 {
        return Err(DrawErrors::InvalidWinnerCount);
    }
    if request.countdown_seconds == 0 {
        return Err(DrawErrors::InvalidCountdown);
    }
    if pool.is_empty() {
        return Err(DrawErrors::EmptyPool);
    }

    let eligible = eligible_participants(pool, already_won);
    debug!("run_draw: eligible: {:?}", eligible.len());
    if (request.winner_count as usize) > eligible.len() {
        return Err(DrawErrors::NotEnoughRemaining {
            requested: request.winner_count,
            remaining: eligible.len(),
        });
    }

    let idxs = rand::seq::index::sample(rng, eligible.len(), request.winner_count as usize);
    let winners: Vec<Participant> = idxs.iter().map(|i| eligible[i].clone()).collect();
    let remaining = eligible.len() - winners.len();
    info!(
        "run_draw: selected {} winners, {} participants remaining",
        winners.len(),
        remaining
    );
    Ok(DrawOutcome { winners, remaining })
}

pub(crate) fn make_rng(rules: &DrawRules) -> StdRng {
    match rules.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Masks a phone number for display.
///
/// All non-digit characters are stripped first. Numbers that follow the
/// Iranian mobile convention (11 digits starting with 09) are rewritten as
/// the last four digits, a `***` marker, then the first four digits. Anything
/// else is returned as the cleaned digit string, unmasked.
///
/// This is a display transformation only: participant identity always
/// compares the raw phone value.
pub fn mask_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.len() != 11 || !cleaned.starts_with("09") {
        return cleaned;
    }
    format!("{}***{}", &cleaned[7..], &cleaned[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, national_id: &str, phone: &str) -> Participant {
        Participant {
            name: name.to_string(),
            national_id: national_id.to_string(),
            phone: phone.to_string(),
        }
    }

    fn sample_pool(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                participant(
                    &format!("Participant {}", i),
                    &format!("00000000{:02}", i),
                    &format!("091234567{:02}", i),
                )
            })
            .collect()
    }

    fn seeded(seed: u64) -> DrawRules {
        DrawRules { seed: Some(seed) }
    }

    #[test]
    fn draw_returns_requested_count_from_pool() {
        let pool = sample_pool(6);
        let request = DrawRequest {
            winner_count: 3,
            countdown_seconds: 5,
        };
        let outcome = run_draw(&pool, &[], &request, &seeded(17)).unwrap();
        assert_eq!(outcome.winners.len(), 3);
        assert_eq!(outcome.remaining, 3);
        for w in outcome.winners.iter() {
            assert!(pool.contains(w), "winner not in pool: {:?}", w);
        }
        // All distinct.
        for (i, w) in outcome.winners.iter().enumerate() {
            assert!(!outcome.winners[i + 1..].contains(w));
        }
    }

    #[test]
    fn draw_excludes_previous_winners() {
        let pool = sample_pool(5);
        let excluded = vec![pool[0].clone(), pool[3].clone()];
        let request = DrawRequest {
            winner_count: 3,
            countdown_seconds: 1,
        };
        let outcome = run_draw(&pool, &excluded, &request, &seeded(4)).unwrap();
        assert_eq!(outcome.winners.len(), 3);
        assert_eq!(outcome.remaining, 0);
        for w in outcome.winners.iter() {
            assert!(!excluded.contains(w));
        }
    }

    #[test]
    fn draw_rejects_zero_winners() {
        let pool = sample_pool(3);
        let request = DrawRequest {
            winner_count: 0,
            countdown_seconds: 5,
        };
        let res = run_draw(&pool, &[], &request, &seeded(1));
        assert_eq!(res, Err(DrawErrors::InvalidWinnerCount));
    }

    #[test]
    fn draw_rejects_zero_countdown() {
        let pool = sample_pool(3);
        let request = DrawRequest {
            winner_count: 1,
            countdown_seconds: 0,
        };
        let res = run_draw(&pool, &[], &request, &seeded(1));
        assert_eq!(res, Err(DrawErrors::InvalidCountdown));
    }

    #[test]
    fn draw_rejects_empty_pool() {
        let request = DrawRequest::single();
        let res = run_draw(&[], &[], &request, &seeded(1));
        assert_eq!(res, Err(DrawErrors::EmptyPool));
    }

    #[test]
    fn draw_rejects_overdrawn_pool() {
        let pool = sample_pool(4);
        let excluded = vec![pool[1].clone()];
        let request = DrawRequest {
            winner_count: 4,
            countdown_seconds: 5,
        };
        let res = run_draw(&pool, &excluded, &request, &seeded(1));
        assert_eq!(
            res,
            Err(DrawErrors::NotEnoughRemaining {
                requested: 4,
                remaining: 3
            })
        );
    }

    #[test]
    fn duplicate_tuples_share_one_slot() {
        // Two participants with identical name, id and phone are
        // indistinguishable: once the value has won, both copies are out.
        let p = participant("Sara", "0012345678", "09121112233");
        let q = participant("Omid", "0087654321", "09354445566");
        let pool = vec![p.clone(), q.clone(), p.clone()];
        let eligible = eligible_participants(&pool, &[p.clone()]);
        assert_eq!(eligible, vec![q]);
    }

    #[test]
    fn eligible_filter_preserves_pool_order() {
        let pool = sample_pool(5);
        let excluded = vec![pool[1].clone(), pool[4].clone()];
        let eligible = eligible_participants(&pool, &excluded);
        assert_eq!(
            eligible,
            vec![pool[0].clone(), pool[2].clone(), pool[3].clone()]
        );
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let pool = sample_pool(10);
        let request = DrawRequest {
            winner_count: 4,
            countdown_seconds: 5,
        };
        let a = run_draw(&pool, &[], &request, &seeded(99)).unwrap();
        let b = run_draw(&pool, &[], &request, &seeded(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mask_standard_mobile_number() {
        assert_eq!(mask_phone("0912-345-6789"), "6789***0912");
        assert_eq!(mask_phone("09123456789"), "6789***0912");
        assert_eq!(mask_phone(" 0912 345 6789 "), "6789***0912");
    }

    #[test]
    fn mask_falls_back_to_cleaned_digits() {
        // Not 11 digits.
        assert_eq!(mask_phone("12345"), "12345");
        // 11 digits but not an Iranian mobile prefix.
        assert_eq!(mask_phone("08123456789"), "08123456789");
        assert_eq!(mask_phone(""), "");
    }

    #[test]
    fn mask_is_stable_on_nonstandard_input() {
        let once = mask_phone("+98 21 1234");
        assert_eq!(once, "98211234");
        assert_eq!(mask_phone(&once), once);
    }
}
