//! Line counts per file extension across every GitHub repository a token can see.
//!
//! Repositories are listed page by page, each contents tree is walked
//! recursively over the REST API, and allow-listed files are fetched and
//! counted. Results are appended to a summary file and folded into an overall
//! tally.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod scan;
pub mod term;

pub use error::{Result, TallyError};
