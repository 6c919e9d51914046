//! GitHub API access.
//!
//! Provides repository identification, token-based authentication and a
//! paginated REST client for listing pull requests.

/// Configuration and authentication for the GitHub API.
pub mod config;

/// GitHub REST client.
pub mod github;

/// Shared data types for repositories and pull requests.
pub mod types;

/// Response header helpers.
pub mod util;
