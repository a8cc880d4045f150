//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline and an external
//! system (time, local files, the gist API, the repository contents API,
//! the link locker). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod locker;
pub mod repository;
pub mod snippets;

use std::future::Future;
use std::pin::Pin;

use crate::error::HttpError;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use locker::{EncryptMethod, LinkLocker, LinkRequest};
pub use repository::{RepoFile, RepositoryHost};
pub use snippets::{Gist, GistRevision, SnippetHost};

/// Boxed future returned by the network ports, keeping the traits dyn-compatible.
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, HttpError>> + Send + 'a>>;
