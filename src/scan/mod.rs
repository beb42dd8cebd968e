pub mod exec;
pub mod prompt;
pub mod repos;
pub mod report;
pub mod tree;

pub use exec::{exec, scan_repositories, ScanSummary};
pub use prompt::{ask_year, parse_year};
pub use repos::{list_repositories, ListOptions};
pub use report::{format_repository_block, Reporter};
pub use tree::Aggregator;
