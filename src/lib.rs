//! Read-only social feed core.
//!
//! A [`repository::Repository`] reads users, posts and comments from an
//! in-memory fixture or a remote JSON service. [`feed::Feed`] pages through
//! posts and enriches them with authors and comments, and [`handlers`]
//! serves the result over HTTP.

pub mod config;
pub mod core;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod posts;
pub mod repository;
pub mod users;

pub use crate::core::errors::{ApiError, Entity, RepoError, RepoResult};
pub use crate::core::pagination::PageRequest;
pub use feed::{CommentCountPolicy, Feed};
pub use repository::{MemoryRepository, RemoteRepository, Repository};
