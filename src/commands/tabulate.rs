use crate::formats::plain::read_election;
use crate::model::election::Candidate;
use crate::tabulator::Tabulator;
use colored::Colorize;
use itertools::Itertools;
use std::path::Path;

/// Load a votes file, run the instant-runoff tabulation, and print the
/// result (or dump it as JSON).
pub fn tabulate(
    votes_file: &Path,
    candidate_names: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidates: Vec<Candidate> = candidate_names.iter().map(Candidate::new).collect();

    if !json {
        println!(
            "📋 Reading ballots from {}",
            votes_file.display().to_string().cyan()
        );
    }

    let election = read_election(votes_file, &candidates)?;

    if !json {
        println!(
            "🗳️  Tabulating {} ballots for {} candidates",
            election.ballots.len().to_string().bright_yellow(),
            election.candidates.len().to_string().bright_yellow()
        );
    }

    let outcome = Tabulator::new(election.candidates, election.ballots)?.tabulate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for round in &outcome.rounds {
        let tally = round
            .tally
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)))
            .map(|(candidate, count)| format!("{}={}", candidate, count))
            .join(", ");
        println!("  Round {}: {}", round.round, tally);
        for loser in &round.eliminated {
            println!("    ❌ Eliminated: {}", loser.to_string().red());
        }
    }

    if outcome.winners.len() > 1 {
        println!(
            "🤝 There is a tie! Winners: {}",
            outcome.winners.iter().join(", ").bright_green().bold()
        );
    } else {
        println!(
            "🏆 Winner: {}",
            outcome.winners[0].to_string().bright_green().bold()
        );
    }

    Ok(())
}
