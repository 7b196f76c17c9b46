//! Upstream release retrieval for pacrelay.
//!
//! The crate exposes the [`Release`](traits::Release) and
//! [`Asset`](traits::Asset) abstractions the repository generator consumes,
//! and a blocking GitHub client that fetches release listings with a single,
//! fail-fast request.

pub mod error;
pub mod github;
pub mod http_client;
pub mod traits;

pub use error::DownloadError;
pub use github::{GithubAsset, GithubClient, GithubRelease};
pub use traits::{Asset, Release};
