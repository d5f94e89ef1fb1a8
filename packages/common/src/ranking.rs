//! Leaderboard ordering.
//!
//! Ranking is a pure function over `(entry, votes)` pairs so it can be used on
//! whatever the data layer returns and tested without a database.

use serde::{Deserialize, Serialize};

/// Number of entries shown on a winners podium.
pub const PODIUM_SIZE: usize = 3;

/// Presentation tier derived from a leaderboard position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
    Standard,
}

impl Tier {
    /// Map a 0-indexed position to its tier.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => Self::Gold,
            1 => Self::Silver,
            2 => Self::Bronze,
            _ => Self::Standard,
        }
    }
}

/// An entry placed on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranked<T> {
    pub entry: T,
    pub votes: u64,
    /// 0-indexed; unique within one ranking even when votes tie.
    pub position: usize,
}

impl<T> Ranked<T> {
    pub fn tier(&self) -> Tier {
        Tier::for_position(self.position)
    }
}

/// Order entries by votes, highest first.
///
/// Entries with equal votes keep their input order, so the result is
/// deterministic for a given fetch order.
pub fn rank<T>(entries: impl IntoIterator<Item = (T, u64)>) -> Vec<Ranked<T>> {
    let mut entries: Vec<(T, u64)> = entries.into_iter().collect();
    // `sort_by` is stable.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .enumerate()
        .map(|(position, (entry, votes))| Ranked {
            entry,
            votes,
            position,
        })
        .collect()
}

/// The top of a ranking: at most [`PODIUM_SIZE`] entries.
pub fn podium<T>(ranked: Vec<Ranked<T>>) -> Vec<Ranked<T>> {
    ranked.into_iter().take(PODIUM_SIZE).collect()
}
