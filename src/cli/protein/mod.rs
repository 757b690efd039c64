pub use run::run;

pub mod args;
pub mod parse;
mod run;

pub const COMMAND: &str = "protein";
pub const ABOUT: &str = "Score a single protein against a user-supplied structure (e.g. a predicted model) whose residue numbering matches the sequence.";
