mod tabulate;

pub use tabulate::tabulate;
