use crate::model::election::{Ballot, BallotError, Candidate};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("no candidates supplied")]
    NoCandidates,
    #[error("no ballots supplied")]
    NoBallots,
    #[error("invalid ballot: {0}")]
    Ballot(#[from] BallotError),
}

pub type TabulationResult<T> = std::result::Result<T, TabulationError>;

/// Tally and elimination for one round, as they stood at the majority
/// check. `eliminated` is empty in the winning round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub round: u32,
    pub tally: HashMap<Candidate, u64>,
    pub eliminated: Vec<Candidate>,
}

/// Final result of a tabulation run.
///
/// `winners` holds every candidate that met the majority threshold in the
/// terminating round; more than one entry means an unresolved tie. `tally`
/// is the terminating round's vote counts, keyed by the candidates that
/// survived into that round.
#[derive(Debug, Serialize)]
pub struct TabulationOutcome {
    pub winners: Vec<Candidate>,
    pub tally: HashMap<Candidate, u64>,
    pub rounds: Vec<RoundResult>,
}

/// Instant-runoff tabulator.
///
/// Counts each ballot toward its current preference, then repeatedly
/// eliminates the weakest candidate and transfers that candidate's ballots
/// to each voter's next surviving preference, until some candidate holds
/// at least `ceil(num_ballots / 2)` votes.
pub struct Tabulator {
    /// Candidate order, shuffled once at construction. Minimum-selection
    /// ties are broken by taking the first minimal candidate in this
    /// order, so the tie-break is arbitrary but uniformly randomized
    /// rather than biased by input position.
    order: Vec<Candidate>,
    counts: HashMap<Candidate, u64>,
    buckets: HashMap<Candidate, Vec<Ballot>>,
    eliminated: HashSet<Candidate>,
    threshold: u64,
}

impl Tabulator {
    /// Set up the initial tally: shuffle the candidate order, seed every
    /// candidate with a zero count, and bucket each ballot under its
    /// first preference.
    ///
    /// The majority threshold is fixed here at `ceil(n / 2)` of the
    /// original ballot count; since every ballot ranks every candidate,
    /// the active vote count never diverges from it.
    pub fn new(
        mut candidates: Vec<Candidate>,
        ballots: Vec<Ballot>,
    ) -> TabulationResult<Tabulator> {
        if candidates.is_empty() {
            return Err(TabulationError::NoCandidates);
        }
        if ballots.is_empty() {
            return Err(TabulationError::NoBallots);
        }

        candidates.shuffle(&mut rand::thread_rng());
        let threshold = (ballots.len() as u64 + 1) / 2;

        let mut counts: HashMap<Candidate, u64> =
            candidates.iter().map(|c| (c.clone(), 0)).collect();
        let mut buckets: HashMap<Candidate, Vec<Ballot>> = HashMap::new();

        for ballot in ballots {
            let choice = ballot.current_preference().clone();
            match counts.get_mut(&choice) {
                Some(count) => *count += 1,
                None => return Err(BallotError::UnknownCandidate(choice).into()),
            }
            buckets.entry(choice).or_default().push(ballot);
        }

        Ok(Tabulator {
            order: candidates,
            counts,
            buckets,
            eliminated: HashSet::new(),
            threshold,
        })
    }

    /// Run elimination rounds to completion and return the winner set,
    /// the terminating round's tally, and the per-round log.
    ///
    /// Each round removes one candidate, and the last surviving candidate
    /// always meets the threshold, so this finishes within
    /// `num_candidates - 1` eliminations.
    pub fn tabulate(mut self) -> TabulationResult<TabulationOutcome> {
        let mut rounds: Vec<RoundResult> = Vec::new();

        loop {
            let round = rounds.len() as u32 + 1;
            let tally = self.counts.clone();

            let mut winners = self.current_winners();
            if !winners.is_empty() {
                winners.sort();
                rounds.push(RoundResult {
                    round,
                    tally,
                    eliminated: Vec::new(),
                });
                return Ok(TabulationOutcome {
                    winners,
                    tally: self.counts,
                    rounds,
                });
            }

            let loser = self.weakest();
            rounds.push(RoundResult {
                round,
                tally,
                eliminated: vec![loser.clone()],
            });
            self.eliminate(loser)?;
        }
    }

    /// Every surviving candidate currently at or above the majority
    /// threshold.
    fn current_winners(&self) -> Vec<Candidate> {
        self.counts
            .iter()
            .filter(|(_, &count)| count >= self.threshold)
            .map(|(candidate, _)| candidate.clone())
            .collect()
    }

    /// The first surviving candidate, in shuffled order, with the minimum
    /// current count.
    fn weakest(&self) -> Candidate {
        let mut weakest: Option<(&Candidate, u64)> = None;
        for candidate in &self.order {
            let count = match self.counts.get(candidate) {
                Some(&count) => count,
                None => continue,
            };
            match weakest {
                Some((_, min)) if count >= min => {}
                _ => weakest = Some((candidate, count)),
            }
        }
        weakest
            .map(|(candidate, _)| candidate.clone())
            // tabulate() only eliminates while no candidate has a
            // majority, which cannot hold with zero survivors.
            .expect("at least one candidate survives")
    }

    /// Remove `loser` from contention and recount its ballots: each one
    /// advances past eliminated candidates and is re-bucketed under its
    /// next surviving preference.
    fn eliminate(&mut self, loser: Candidate) -> TabulationResult<()> {
        self.counts.remove(&loser);
        let orphaned = self.buckets.remove(&loser).unwrap_or_default();
        self.eliminated.insert(loser);

        for mut ballot in orphaned {
            while self.eliminated.contains(ballot.current_preference()) {
                ballot.advance()?;
            }
            let next = ballot.current_preference().clone();
            match self.counts.get_mut(&next) {
                Some(count) => *count += 1,
                None => return Err(BallotError::UnknownCandidate(next).into()),
            }
            self.buckets.entry(next).or_default().push(ballot);
        }

        Ok(())
    }
}

/// Convenience wrapper: build a tabulator and run it to completion.
pub fn tabulate(
    candidates: Vec<Candidate>,
    ballots: Vec<Ballot>,
) -> TabulationResult<TabulationOutcome> {
    Tabulator::new(candidates, ballots)?.tabulate()
}
