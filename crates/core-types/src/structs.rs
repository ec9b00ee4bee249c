use crate::enums::Candidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single vote record as stored in the `votes` table.
///
/// Records are append-only: they are created once by the cast-vote
/// operation and never updated or deleted afterwards. `vote_id` is assigned
/// by the database and is consistent with insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub vote_id: i32,
    pub candidate: Candidate,
    pub time_cast: DateTime<Utc>,
}

/// Per-candidate vote counts, derived fresh from the vote records on every
/// read. Never cached or persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub tab_count: i64,
    pub space_count: i64,
}

impl Tally {
    pub fn count_for(&self, candidate: Candidate) -> i64 {
        match candidate {
            Candidate::Tabs => self.tab_count,
            Candidate::Spaces => self.space_count,
        }
    }

    pub fn set_count(&mut self, candidate: Candidate, count: i64) {
        match candidate {
            Candidate::Tabs => self.tab_count = count,
            Candidate::Spaces => self.space_count = count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_are_addressable_per_candidate() {
        let mut tally = Tally::default();
        tally.set_count(Candidate::Tabs, 3);
        tally.set_count(Candidate::Spaces, 7);
        assert_eq!(tally.count_for(Candidate::Tabs), 3);
        assert_eq!(tally.count_for(Candidate::Spaces), 7);
        assert_eq!(tally.tab_count, 3);
        assert_eq!(tally.space_count, 7);
    }
}
