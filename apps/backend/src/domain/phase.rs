//! Phase engine: derives phase, countdown and winner from session facts.
//!
//! Nothing here is stored as a source of truth. Every projection recomputes
//! from `(start_time, duration, now, players, votes)`, so concurrent or
//! out-of-order polls can never observe a phase that disagrees with the
//! timestamps and votes they were computed from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::domain::session::{PlayerId, Session};

/// Game progression. Ordered: with a fixed roster a session only moves forward in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Created, host has not started.
    #[default]
    Waiting,
    /// Countdown running; players pick items.
    Draft,
    /// Countdown over; waiting for every vote.
    Vote,
    /// Every player has voted.
    Done,
}

/// Phase plus whole seconds left on the draft clock (`None` before start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseState {
    pub phase: Phase,
    pub time_remaining: Option<i64>,
}

/// Result of the vote tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Option<PlayerId>,
    pub tie: bool,
}

/// Phase from raw facts.
///
/// `players` is the roster size and `votes_cast` the number of recorded votes
/// (one per voter).
pub fn phase_at(
    start_time: Option<OffsetDateTime>,
    duration_seconds: i64,
    now: OffsetDateTime,
    players: usize,
    votes_cast: usize,
) -> PhaseState {
    let Some(start) = start_time else {
        return PhaseState {
            phase: Phase::Waiting,
            time_remaining: None,
        };
    };

    // Saturates at the calendar limit instead of overflowing.
    let end = start.saturating_add(Duration::seconds(duration_seconds));
    let time_remaining = Some((end - now).whole_seconds().max(0));

    let phase = if now < end {
        Phase::Draft
    } else if players > 0 && votes_cast >= players {
        Phase::Done
    } else {
        Phase::Vote
    };

    PhaseState {
        phase,
        time_remaining,
    }
}

/// Tally `targets` over `players` and pick a unique top scorer.
///
/// Players with no votes count as zero. A shared maximum (including the
/// everyone-at-zero case) is a tie with no winner.
pub fn tally_winner<'a>(
    players: impl IntoIterator<Item = &'a str>,
    targets: impl IntoIterator<Item = &'a str>,
) -> Outcome {
    let mut tally: HashMap<&str, usize> = players.into_iter().map(|id| (id, 0)).collect();
    for target in targets {
        if let Some(count) = tally.get_mut(target) {
            *count += 1;
        }
    }

    let Some(max_votes) = tally.values().copied().max() else {
        return Outcome {
            winner: None,
            tie: true,
        };
    };

    let mut leaders = tally
        .iter()
        .filter(|(_, count)| **count == max_votes)
        .map(|(id, _)| *id);

    match (leaders.next(), leaders.next()) {
        (Some(winner), None) => Outcome {
            winner: Some(winner.to_string()),
            tie: false,
        },
        _ => Outcome {
            winner: None,
            tie: true,
        },
    }
}

/// Current phase of `session` at `now`.
pub fn compute_phase(session: &Session, now: OffsetDateTime) -> PhaseState {
    phase_at(
        session.start_time(),
        session.duration_seconds(),
        now,
        session.player_count(),
        session.votes().len(),
    )
}

/// Tally for `session` when `phase` is `Done`.
///
/// Before that the last cached outcome is returned unchanged, so a join after
/// the vote closed (which reopens `Vote`) keeps reporting the last result.
pub fn compute_winner(session: &Session, phase: Phase) -> Outcome {
    if phase != Phase::Done {
        return session.cached_outcome();
    }
    tally_winner(
        session.players().map(|p| p.id.as_str()),
        session.votes().values().map(String::as_str),
    )
}
