//! Lazy producer of group listing pages.
//!
//! [`GroupPages`] walks a group listing one page at a time, feeding each
//! page's continuation token into the next request. It is finite and
//! cannot be restarted: once the last page has been returned every further
//! call to [`GroupPages::next_page`] yields `Ok(None)`.

use crate::client::{DirectoryClient, GroupPage};
use crate::error::DirectoryError;

pub struct GroupPages<'a> {
    client: &'a dyn DirectoryClient,
    cursor: Option<String>,
    exhausted: bool,
    fetched: usize,
}

impl<'a> GroupPages<'a> {
    /// Start a listing from the first page.
    pub fn new(client: &'a dyn DirectoryClient) -> Self {
        Self {
            client,
            cursor: None,
            exhausted: false,
            fetched: 0,
        }
    }

    /// Cursor the next request will use (`None` before the first page).
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Number of pages returned so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Whether the last page has been returned.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the next page.
    ///
    /// An error leaves the producer where it was; callers abort rather than
    /// retry.
    pub async fn next_page(&mut self) -> Result<Option<GroupPage>, DirectoryError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.client.list_groups(self.cursor.as_deref()).await?;
        self.fetched += 1;

        // An empty token is the same as no token.
        self.cursor = page.next_cursor.clone().filter(|c| !c.is_empty());
        if self.cursor.is_none() {
            self.exhausted = true;
        }

        tracing::debug!(
            page = self.fetched,
            groups = page.groups.len(),
            has_more = !self.exhausted,
            "Fetched group page"
        );

        Ok(Some(page))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
