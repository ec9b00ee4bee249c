use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of candidates a vote can be cast for.
///
/// The wire form is the exact upper-case name (`"TABS"` / `"SPACES"`); no
/// other value is ever accepted or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Candidate {
    Tabs,
    Spaces,
}

impl Candidate {
    /// Every allowed candidate, in a fixed order. Tally computations and
    /// validation both iterate this slice so the set is defined in one place.
    pub const ALL: [Candidate; 2] = [Candidate::Tabs, Candidate::Spaces];

    /// The exact string stored in the `candidate` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Candidate::Tabs => "TABS",
            Candidate::Spaces => "SPACES",
        }
    }

    /// Parses the wire form. Matching is exact and case-sensitive; anything
    /// outside the closed set is rejected before it can reach storage.
    pub fn parse(input: &str) -> Result<Candidate, CoreError> {
        match input {
            "TABS" => Ok(Candidate::Tabs),
            "SPACES" => Ok(Candidate::Spaces),
            other => Err(CoreError::InvalidCandidate(other.to_string())),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Candidate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Candidate::parse(s)
    }
}
