use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum BallotError {
    #[error("ballot ranks unknown candidate: {0}")]
    UnknownCandidate(Candidate),
    #[error("ballot ranks candidate more than once: {0}")]
    DuplicateCandidate(Candidate),
    #[error("ballot is missing candidate: {0}")]
    MissingCandidate(Candidate),
    #[error("ballot exhausted: every ranked candidate has been eliminated")]
    Exhausted,
}

/// A candidate identifier. Unique within a single election; carries no
/// structure beyond equality, ordering, and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Candidate(String);

impl Candidate {
    pub fn new<S: Into<String>>(name: S) -> Candidate {
        Candidate(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Candidate {
    fn from(name: &str) -> Candidate {
        Candidate(name.to_string())
    }
}

/// One voter's complete ranking of all candidates, plus a cursor to the
/// candidate currently counted as this ballot's active vote.
///
/// The ranking is immutable after construction; only the tabulator's
/// recount step moves the cursor, and only forward.
#[derive(Debug, Clone)]
pub struct Ballot {
    ranking: Vec<Candidate>,
    cursor: usize,
}

impl Ballot {
    /// Build a ballot, validating that `ranking` is a total order over
    /// `candidates`: every candidate exactly once, nothing else.
    pub fn new(ranking: Vec<Candidate>, candidates: &[Candidate]) -> Result<Ballot, BallotError> {
        let mut seen: HashSet<&Candidate> = HashSet::with_capacity(ranking.len());
        for candidate in &ranking {
            if !candidates.contains(candidate) {
                return Err(BallotError::UnknownCandidate(candidate.clone()));
            }
            if !seen.insert(candidate) {
                return Err(BallotError::DuplicateCandidate(candidate.clone()));
            }
        }
        for candidate in candidates {
            if !seen.contains(candidate) {
                return Err(BallotError::MissingCandidate(candidate.clone()));
            }
        }
        Ok(Ballot { ranking, cursor: 0 })
    }

    /// The candidate this ballot currently counts toward.
    pub fn current_preference(&self) -> &Candidate {
        &self.ranking[self.cursor]
    }

    /// Move to the next-ranked candidate and return it. Fails with
    /// `BallotError::Exhausted` if the cursor is already on the last
    /// ranked candidate.
    pub fn advance(&mut self) -> Result<&Candidate, BallotError> {
        if self.cursor + 1 >= self.ranking.len() {
            return Err(BallotError::Exhausted);
        }
        self.cursor += 1;
        Ok(&self.ranking[self.cursor])
    }

    pub fn ranking(&self) -> &[Candidate] {
        &self.ranking
    }
}

impl fmt::Display for Ballot {
    /// Renders the ranking with the active preference bracketed,
    /// e.g. `A <B> C`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, candidate) in self.ranking.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if i == self.cursor {
                write!(f, "<{}>", candidate)?;
            } else {
                write!(f, "{}", candidate)?;
            }
        }
        Ok(())
    }
}

/// A parsed election: the candidate list plus one ballot per voter.
#[derive(Debug)]
pub struct Election {
    pub candidates: Vec<Candidate>,
    pub ballots: Vec<Ballot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::from(*n)).collect()
    }

    #[test]
    fn ballot_starts_at_first_preference() {
        let cands = candidates(&["A", "B", "C"]);
        let ballot = Ballot::new(candidates(&["B", "A", "C"]), &cands).unwrap();
        assert_eq!(ballot.current_preference(), &Candidate::from("B"));
    }

    #[test]
    fn advance_moves_one_step_and_returns_new_preference() {
        let cands = candidates(&["A", "B", "C"]);
        let mut ballot = Ballot::new(candidates(&["A", "B", "C"]), &cands).unwrap();
        assert_eq!(ballot.advance().unwrap(), &Candidate::from("B"));
        assert_eq!(ballot.current_preference(), &Candidate::from("B"));
        assert_eq!(ballot.advance().unwrap(), &Candidate::from("C"));
    }

    #[test]
    fn advance_past_last_preference_is_exhausted() {
        let cands = candidates(&["A", "B"]);
        let mut ballot = Ballot::new(candidates(&["A", "B"]), &cands).unwrap();
        ballot.advance().unwrap();
        assert!(matches!(ballot.advance(), Err(BallotError::Exhausted)));
        // Cursor stays on the last candidate after a failed advance.
        assert_eq!(ballot.current_preference(), &Candidate::from("B"));
    }

    #[test]
    fn rejects_unknown_candidate() {
        let cands = candidates(&["A", "B"]);
        let err = Ballot::new(candidates(&["A", "X"]), &cands).unwrap_err();
        assert!(matches!(err, BallotError::UnknownCandidate(c) if c.name() == "X"));
    }

    #[test]
    fn rejects_duplicate_candidate() {
        let cands = candidates(&["A", "B"]);
        let err = Ballot::new(candidates(&["A", "A"]), &cands).unwrap_err();
        assert!(matches!(err, BallotError::DuplicateCandidate(c) if c.name() == "A"));
    }

    #[test]
    fn rejects_missing_candidate() {
        let cands = candidates(&["A", "B", "C"]);
        let err = Ballot::new(candidates(&["A", "B"]), &cands).unwrap_err();
        assert!(matches!(err, BallotError::MissingCandidate(c) if c.name() == "C"));
    }

    #[test]
    fn display_brackets_active_preference() {
        let cands = candidates(&["A", "B", "C"]);
        let mut ballot = Ballot::new(candidates(&["A", "B", "C"]), &cands).unwrap();
        assert_eq!(ballot.to_string(), "<A> B C");
        ballot.advance().unwrap();
        assert_eq!(ballot.to_string(), "A <B> C");
    }
}
