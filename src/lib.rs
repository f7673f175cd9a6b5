//! numex: fetch the Numberland API, merge the three payloads by id,
//! and append the result to a per-day spreadsheet snapshot.

pub mod cli;
pub mod services;
pub mod types;
