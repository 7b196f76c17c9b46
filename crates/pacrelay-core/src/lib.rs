//! Pacman repository database generation from upstream release listings.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`classify`] turns release assets into [`PackageRecord`]s.
//! 2. [`metadata`] renders each record into `desc`, `files` and `depends`
//!    members.
//! 3. [`archive`] packs the members into a ustar container.
//! 4. [`compress`] gzips the container.
//!
//! [`repo::RepoGenerator`] drives the pipeline and [`response`] maps requested
//! resource names to finished artifacts.

use error::RepoError;

pub mod archive;
pub mod classify;
pub mod compress;
pub mod error;
pub mod metadata;
pub mod package;
pub mod repo;
pub mod response;
pub mod service;
pub mod signature;

pub use package::{PackageRecord, Variant};

pub type RepoResult<T> = std::result::Result<T, RepoError>;
