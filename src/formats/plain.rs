use crate::model::election::{Ballot, BallotError, Candidate, Election};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("could not read votes file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Malformed { line: usize, source: BallotError },
}

/// Parse ballots from a plain-text source: one ballot per line, candidate
/// names separated by whitespace, ranked best-first. Blank lines are
/// skipped.
pub fn read_ballots<R: BufRead>(
    reader: R,
    candidates: &[Candidate],
) -> Result<Vec<Ballot>, FormatError> {
    let mut ballots = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let ranking: Vec<Candidate> = line.split_whitespace().map(Candidate::from).collect();
        let ballot = Ballot::new(ranking, candidates).map_err(|source| FormatError::Malformed {
            line: index + 1,
            source,
        })?;
        ballots.push(ballot);
    }
    Ok(ballots)
}

/// Read a votes file into an `Election` against a known candidate list.
pub fn read_election(path: &Path, candidates: &[Candidate]) -> Result<Election, FormatError> {
    let file = File::open(path)?;
    let ballots = read_ballots(BufReader::new(file), candidates)?;
    Ok(Election {
        candidates: candidates.to_vec(),
        ballots,
    })
}
