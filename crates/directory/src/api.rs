//! REST client for the Admin SDK Directory API.
//!
//! Wraps the group, member and customer endpoints the sweep needs using
//! [`reqwest`]. Authentication is a bearer token handed in by the caller;
//! obtaining and refreshing it is the host's job.

use std::time::Duration;

use async_trait::async_trait;
use groupsweep_core::{Group, Member};
use reqwest::Url;
use serde::Deserialize;

use crate::client::{DirectoryClient, GroupPage, PAGE_SIZE};
use crate::error::DirectoryError;

/// Production Directory API host.
pub const DEFAULT_API_URL: &str = "https://admin.googleapis.com";

/// Customer alias meaning "the customer the token belongs to".
pub const MY_CUSTOMER: &str = "my_customer";

const DIRECTORY_PATH: [&str; 3] = ["admin", "directory", "v1"];

/// Page size for member listings (the endpoint's maximum).
const MEMBER_PAGE_SIZE: u32 = 200;

/// HTTP client for the Directory API of a single customer.
pub struct AdminDirectoryApi {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    customer_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupsResponse {
    #[serde(default)]
    groups: Vec<Group>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembersResponse {
    #[serde(default)]
    members: Vec<Member>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerResponse {
    customer_domain: String,
}

impl AdminDirectoryApi {
    /// Create a client with its own connection pool.
    ///
    /// * `api_url`      - Base URL, e.g. [`DEFAULT_API_URL`].
    /// * `access_token` - OAuth bearer token with the directory group scope.
    /// * `customer_id`  - Customer whose groups are listed.
    pub fn new(
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        customer_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url, access_token, customer_id))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            customer_id: customer_id.into(),
        }
    }

    /// Customer whose groups this client lists.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// `{api}/admin/directory/v1/` followed by `segments`, each
    /// percent-encoded as a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| DirectoryError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| DirectoryError::InvalidUrl(format!("{} cannot be a base", self.api_url)))?
            .pop_if_empty()
            .extend(DIRECTORY_PATH)
            .extend(segments);
        Ok(url)
    }

    /// Page through a member listing, optionally restricted to `roles`.
    async fn collect_members(
        &self,
        group_id: &str,
        roles: Option<&str>,
    ) -> Result<Vec<Member>, DirectoryError> {
        let url = self.url(&["groups", group_id, "members"])?;
        let mut members = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("maxResults", MEMBER_PAGE_SIZE.to_string())];
            if let Some(roles) = roles {
                query.push(("roles", roles.to_string()));
            }
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&self.access_token)
                .query(&query)
                .send()
                .await?;
            let page: MembersResponse = Self::parse_response(response).await?;

            members.extend(page.members);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(members)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise turn it
    /// into a [`DirectoryError::Api`] carrying the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DirectoryError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DirectoryError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DirectoryClient for AdminDirectoryApi {
    async fn list_groups(&self, cursor: Option<&str>) -> Result<GroupPage, DirectoryError> {
        let mut query: Vec<(&str, String)> = vec![
            ("customer", self.customer_id.clone()),
            ("maxResults", PAGE_SIZE.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("pageToken", cursor.to_string()));
        }

        let response = self
            .client
            .get(self.url(&["groups"])?)
            .bearer_auth(&self.access_token)
            .query(&query)
            .send()
            .await?;
        let page: GroupsResponse = Self::parse_response(response).await?;

        Ok(GroupPage {
            groups: page.groups,
            next_cursor: page.next_page_token,
        })
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError> {
        self.collect_members(group_id, None).await
    }

    async fn list_owners(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError> {
        let owners = self
            .collect_members(group_id, Some(groupsweep_core::types::ROLE_OWNER))
            .await?;
        Ok(owners.into_iter().filter(Member::is_owner).collect())
    }

    async fn customer_primary_domain(&self, customer_id: &str) -> Result<String, DirectoryError> {
        let response = self
            .client
            .get(self.url(&["customers", customer_id])?)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let customer: CustomerResponse = Self::parse_response(response).await?;
        Ok(customer.customer_domain)
    }

    async fn delete_group(&self, email: &str) -> Result<(), DirectoryError> {
        let response = self
            .client
            .delete(self.url(&["groups", email])?)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        tracing::debug!(group = email, "Group deleted");
        Ok(())
    }
}
