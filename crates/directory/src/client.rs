use async_trait::async_trait;
use groupsweep_core::{Group, Member};

use crate::error::DirectoryError;

/// Number of groups requested per listing page.
pub const PAGE_SIZE: u32 = 200;

/// One page of a group listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPage {
    pub groups: Vec<Group>,
    /// Continuation token; `None` on the last page.
    pub next_cursor: Option<String>,
}

/// Directory operations used by the sweep.
///
/// Every call is a single remote round trip (or a chain of them for
/// member listings). Failures are returned as-is; nothing here retries.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// List up to [`PAGE_SIZE`] groups of the configured customer, starting
    /// at `cursor` (or the beginning when `None`).
    async fn list_groups(&self, cursor: Option<&str>) -> Result<GroupPage, DirectoryError>;

    /// All direct members of a group, of any role.
    async fn list_members(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError>;

    /// Members of a group holding the owner role.
    async fn list_owners(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError>;

    /// Primary domain name of a customer.
    async fn customer_primary_domain(&self, customer_id: &str) -> Result<String, DirectoryError>;

    /// Delete a group by its email address.
    async fn delete_group(&self, email: &str) -> Result<(), DirectoryError>;
}
