// src/ranking.rs
//
// The single rank-and-window routine behind every leaderboard scope.
// Scope handlers fetch a fully ordered aggregate sequence from the store;
// this module assigns dense ranks, slices the returned window and resolves
// the requester's standing when it falls outside that window.

use std::collections::{HashMap, HashSet};

use crate::models::leaderboard::{LeaderboardEntry, QuizAttemptRow, RankedRow};

/// Window size served when the caller omits or mangles the limit parameter.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard ceiling on any requested window.
pub const MAX_LIMIT: i64 = 100;

/// Fixed number of entries shown per category on the overview endpoint.
/// The limit query parameter is ignored there.
pub const OVERVIEW_TOP_N: usize = 3;

/// Resolves the raw `limit` query value into an effective window size.
///
/// Absent or non-numeric input falls back to [`DEFAULT_LIMIT`]; numeric
/// input is clamped into `[1, MAX_LIMIT]`, so zero and negative values are
/// served as a window of one.
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<i64>()
            .map(|n| n.clamp(1, MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT),
        None => DEFAULT_LIMIT,
    }
}

/// Assigns dense ranks 1..n to an already ordered sequence.
///
/// Ordering (including the full tie-break chain) is the caller's contract;
/// ties have already been broken deterministically upstream, so position in
/// the sequence IS the rank.
pub fn assign_ranks(rows: Vec<RankedRow>) -> Vec<LeaderboardEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            user_id: row.user_id,
            username: row.username,
            score: row.score,
            quizzes_completed: row.quizzes_completed,
            rank: i as i64 + 1,
        })
        .collect()
}

/// Slices the top-`limit` window off a fully ranked sequence.
///
/// The requester's own entry is returned separately only when their rank
/// exceeds the window; inside the window it is already visible in the main
/// list and the second value is `None`.
pub fn window(
    entries: Vec<LeaderboardEntry>,
    limit: i64,
    requester: Option<i64>,
) -> (Vec<LeaderboardEntry>, Option<LeaderboardEntry>) {
    let current_user = requester.and_then(|user_id| {
        entries
            .iter()
            .find(|entry| entry.user_id == user_id)
            .filter(|entry| entry.rank > limit)
            .cloned()
    });

    let leaderboard = entries.into_iter().take(limit as usize).collect();

    (leaderboard, current_user)
}

/// Ranks a full ordered sequence and windows it in one step.
pub fn rank_and_window(
    rows: Vec<RankedRow>,
    limit: i64,
    requester: Option<i64>,
) -> (Vec<LeaderboardEntry>, Option<LeaderboardEntry>) {
    window(assign_ranks(rows), limit, requester)
}

/// Reduces per-attempt rows to one row per user for the quiz scope.
///
/// Input arrives ordered by (score DESC, finished_at ASC, user_id ASC), so
/// the first row seen for a user is their best attempt, with the earliest
/// completion winning among equal bests. The surviving rows keep the input
/// order, which is exactly the leaderboard order. `quizzes_completed`
/// carries the user's attempt count on this quiz.
pub fn best_attempt_per_user(attempts: Vec<QuizAttemptRow>) -> Vec<RankedRow> {
    let mut attempt_counts: HashMap<i64, i64> = HashMap::new();
    for attempt in &attempts {
        *attempt_counts.entry(attempt.user_id).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    attempts
        .into_iter()
        .filter(|attempt| seen.insert(attempt.user_id))
        .map(|attempt| RankedRow {
            quizzes_completed: attempt_counts[&attempt.user_id],
            user_id: attempt.user_id,
            username: attempt.username,
            score: attempt.score,
        })
        .collect()
}
