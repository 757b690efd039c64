pub mod aggregate;
pub mod assemble;
pub mod contacts;
pub mod error;
pub mod io;
pub mod mapping;
pub mod mutrate;
pub mod permutation;
pub mod record;
pub mod seq;
pub mod variants;
