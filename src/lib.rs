pub mod commands;
pub mod formats;
pub mod model;
pub mod tabulator;

pub use crate::model::election::{Ballot, BallotError, Candidate, Election};
pub use crate::tabulator::{
    tabulate, RoundResult, TabulationError, TabulationOutcome, Tabulator,
};
