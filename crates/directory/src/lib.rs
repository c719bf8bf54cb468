//! Directory service access for the empty-group sweep.
//!
//! - [`DirectoryClient`]: the narrow set of directory operations the sweep
//!   needs, so orchestrators can run against fakes.
//! - [`AdminDirectoryApi`]: implementation over the Admin SDK Directory
//!   REST API using [`reqwest`].
//! - [`GroupPages`]: lazy producer of group listing pages.

pub mod api;
pub mod client;
pub mod error;
pub mod pages;

pub use api::AdminDirectoryApi;
pub use client::{DirectoryClient, GroupPage, PAGE_SIZE};
pub use error::DirectoryError;
pub use pages::GroupPages;
