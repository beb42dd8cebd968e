pub mod client;
pub mod fake;
pub mod transport;

pub use client::{GitHubClient, PAGE_SIZE};
pub use fake::FakeTransport;
pub use transport::{SyncTransport, TransportError, UreqTransport};
