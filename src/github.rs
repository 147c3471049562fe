//! GitHub REST + GraphQL client for issue and Projects V2 board operations.
//!
//! The [`IssueTracker`] trait is the seam between the orchestration code and
//! the network: the synchronizer and cleanup routines are generic over it so
//! tests can drive them with an in-memory fake.

use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::GitHubConfig;
use crate::error::{TrackerError, TrackerResult};

/// GitHub GraphQL endpoint, used directly for the sub-issue mutation.
const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Page size when listing project items. Only the first page is fetched, so
/// boards with more items than this are only partially cleared.
pub const PROJECT_ITEMS_PAGE_SIZE: u32 = 100;

/// Page size when listing closed issues.
pub const CLOSED_ISSUES_PAGE_SIZE: u8 = 30;

/// An issue as returned by the REST create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Repository-scoped issue number
    pub number: u64,
    /// Opaque global identifier used by GraphQL mutations
    pub node_id: String,
    /// Browser URL of the issue
    pub url: String,
}

/// An item on a Projects V2 board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Board item identifier, distinct from the wrapped issue's identifier
    pub id: String,
    /// Title of the wrapped issue, when the item wraps one
    pub title: Option<String>,
}

/// A closed issue as returned by the REST listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedIssue {
    /// Repository-scoped issue number
    pub number: u64,
    /// Opaque global identifier used by GraphQL mutations
    pub node_id: String,
    /// Issue title
    pub title: String,
}

/// Operations against the GitHub issue and project surface.
///
/// Issue creation must complete (and its global identifier be resolvable)
/// before the issue is added to a project or linked as a sub-issue. The
/// callers enforce that ordering by running strictly sequentially.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Resolve the configured project board's opaque identifier.
    async fn project_id(&self) -> TrackerResult<String>;

    /// Resolve the configured repository's opaque identifier.
    async fn repository_id(&self) -> TrackerResult<String>;

    /// List the first page of items on a project board.
    async fn list_project_items(&self, project_id: &str) -> TrackerResult<Vec<ProjectItem>>;

    /// Delete an item from a project board. The underlying issue survives.
    async fn delete_project_item(&self, item_id: &str) -> TrackerResult<()>;

    /// Create an issue via the REST API.
    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> TrackerResult<CreatedIssue>;

    /// Resolve an issue's global identifier from its number.
    async fn issue_node_id(&self, number: u64) -> TrackerResult<String>;

    /// Add an issue to a project board, returning the new item's identifier.
    async fn add_issue_to_project(
        &self,
        project_id: &str,
        issue_number: u64,
    ) -> TrackerResult<String>;

    /// Link `child_number` as a sub-issue of `parent_number`.
    async fn link_sub_issue(&self, parent_number: u64, child_number: u64) -> TrackerResult<()>;

    /// Fetch one page (1-based) of closed issues. An empty page means the
    /// listing is exhausted.
    async fn closed_issues_page(&self, page: u32) -> TrackerResult<Vec<ClosedIssue>>;

    /// Close an issue by its global identifier.
    async fn close_issue(&self, node_id: &str) -> TrackerResult<()>;

    /// Delete an issue by its global identifier.
    async fn delete_issue(&self, node_id: &str) -> TrackerResult<()>;
}

/// Production [`IssueTracker`] backed by the GitHub API.
///
/// REST calls and GraphQL queries go through octocrab. The sub-issue link
/// mutation goes through a raw HTTP client because it needs the
/// `GraphQL-Features: sub_issues` preview header, which the shared octocrab
/// client does not send.
pub struct GitHubTracker {
    client: Octocrab,
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubTracker {
    /// Create a tracker from the given configuration.
    ///
    /// Must be called from within a tokio runtime: the underlying octocrab
    /// client spawns its request buffer onto the current runtime.
    pub fn new(config: GitHubConfig) -> TrackerResult<Self> {
        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()
            .map_err(|e| TrackerError::Api(format!("failed to create GitHub client: {e}")))?;

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| TrackerError::Config("token contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Header names must be lowercase here; the wire is case-insensitive.
        headers.insert("graphql-features", HeaderValue::from_static("sub_issues"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("projectini/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| TrackerError::Api(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            http,
            config,
        })
    }

    /// Run a GraphQL query through octocrab and fail on an `errors` array.
    async fn graphql(&self, payload: &serde_json::Value) -> TrackerResult<serde_json::Value> {
        let response: serde_json::Value = self
            .client
            .graphql(payload)
            .await
            .map_err(|e| TrackerError::Api(format!("GraphQL request failed: {e}")))?;
        check_graphql_errors(&response)?;
        Ok(response)
    }
}

/// Reject a GraphQL response that carries an `errors` array.
fn check_graphql_errors(response: &serde_json::Value) -> TrackerResult<()> {
    match response.get("errors") {
        Some(errors) => Err(TrackerError::GraphQl(errors.clone())),
        None => Ok(()),
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn project_id(&self) -> TrackerResult<String> {
        let query = r#"query($org: String!, $projectNumber: Int!) {
            organization(login: $org) {
                projectV2(number: $projectNumber) {
                    id
                    title
                }
            }
        }"#;
        let response = self
            .graphql(&serde_json::json!({
                "query": query,
                "variables": {
                    "org": self.config.org,
                    "projectNumber": self.config.project_number,
                },
            }))
            .await?;

        let project = response
            .get("data")
            .and_then(|d| d.get("organization"))
            .and_then(|o| o.get("projectV2"));

        match project.and_then(|p| p.get("id")).and_then(|i| i.as_str()) {
            Some(id) => {
                let title = project
                    .and_then(|p| p.get("title"))
                    .and_then(|t| t.as_str())
                    .unwrap_or("");
                tracing::info!(project_id = id, title, "resolved project");
                Ok(id.to_string())
            }
            None => Err(TrackerError::NotFound(format!(
                "project {} in organization {}",
                self.config.project_number, self.config.org
            ))),
        }
    }

    async fn repository_id(&self) -> TrackerResult<String> {
        let query = r#"query($org: String!, $repo: String!) {
            repository(owner: $org, name: $repo) {
                id
            }
        }"#;
        let response = self
            .graphql(&serde_json::json!({
                "query": query,
                "variables": { "org": self.config.org, "repo": self.config.repo },
            }))
            .await?;

        response
            .get("data")
            .and_then(|d| d.get("repository"))
            .and_then(|r| r.get("id"))
            .and_then(|i| i.as_str())
            .map(String::from)
            .ok_or_else(|| {
                TrackerError::NotFound(format!(
                    "repository {}/{}",
                    self.config.org, self.config.repo
                ))
            })
    }

    async fn list_project_items(&self, project_id: &str) -> TrackerResult<Vec<ProjectItem>> {
        let query = r#"query($projectId: ID!, $pageSize: Int!) {
            node(id: $projectId) {
                ... on ProjectV2 {
                    items(first: $pageSize) {
                        nodes {
                            id
                            content {
                                ... on Issue {
                                    title
                                }
                            }
                        }
                    }
                }
            }
        }"#;
        let response = self
            .graphql(&serde_json::json!({
                "query": query,
                "variables": { "projectId": project_id, "pageSize": PROJECT_ITEMS_PAGE_SIZE },
            }))
            .await?;

        let nodes = response
            .get("data")
            .and_then(|d| d.get("node"))
            .and_then(|n| n.get("items"))
            .and_then(|i| i.get("nodes"))
            .and_then(|n| n.as_array())
            .ok_or_else(|| {
                TrackerError::NotFound(format!("items for project ID {project_id}"))
            })?;

        let items = nodes
            .iter()
            .filter_map(|node| {
                let id = node.get("id").and_then(|i| i.as_str())?;
                let title = node
                    .get("content")
                    .and_then(|c| c.get("title"))
                    .and_then(|t| t.as_str())
                    .map(String::from);
                Some(ProjectItem {
                    id: id.to_string(),
                    title,
                })
            })
            .collect();
        Ok(items)
    }

    async fn delete_project_item(&self, item_id: &str) -> TrackerResult<()> {
        let mutation = r#"mutation($itemId: ID!) {
            deleteProjectV2Item(input: {itemId: $itemId}) {
                deletedItemId
            }
        }"#;
        self.graphql(&serde_json::json!({
            "query": mutation,
            "variables": { "itemId": item_id },
        }))
        .await?;
        Ok(())
    }

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> TrackerResult<CreatedIssue> {
        let issue = self
            .client
            .issues(&self.config.org, &self.config.repo)
            .create(title)
            .body(body)
            .labels(labels.to_vec())
            .send()
            .await
            .map_err(|e| TrackerError::Api(format!("failed to create issue '{title}': {e}")))?;

        Ok(CreatedIssue {
            number: issue.number,
            node_id: issue.node_id,
            url: issue.html_url.to_string(),
        })
    }

    async fn issue_node_id(&self, number: u64) -> TrackerResult<String> {
        let query = r#"query($org: String!, $repo: String!, $issueNumber: Int!) {
            repository(owner: $org, name: $repo) {
                issue(number: $issueNumber) {
                    id
                }
            }
        }"#;
        let response = self
            .graphql(&serde_json::json!({
                "query": query,
                "variables": {
                    "org": self.config.org,
                    "repo": self.config.repo,
                    "issueNumber": number,
                },
            }))
            .await?;

        response
            .get("data")
            .and_then(|d| d.get("repository"))
            .and_then(|r| r.get("issue"))
            .and_then(|i| i.get("id"))
            .and_then(|i| i.as_str())
            .map(String::from)
            .ok_or_else(|| {
                TrackerError::NotFound(format!(
                    "issue #{number} in repository {}/{}",
                    self.config.org, self.config.repo
                ))
            })
    }

    async fn add_issue_to_project(
        &self,
        project_id: &str,
        issue_number: u64,
    ) -> TrackerResult<String> {
        let content_id = self.issue_node_id(issue_number).await?;

        let mutation = r#"mutation($projectId: ID!, $contentId: ID!) {
            addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
                item {
                    id
                }
            }
        }"#;
        let response = self
            .graphql(&serde_json::json!({
                "query": mutation,
                "variables": { "projectId": project_id, "contentId": content_id },
            }))
            .await?;

        response
            .get("data")
            .and_then(|d| d.get("addProjectV2ItemById"))
            .and_then(|a| a.get("item"))
            .and_then(|i| i.get("id"))
            .and_then(|i| i.as_str())
            .map(String::from)
            .ok_or_else(|| {
                TrackerError::Api(format!(
                    "missing item ID after adding issue #{issue_number} to project {project_id}"
                ))
            })
    }

    async fn link_sub_issue(&self, parent_number: u64, child_number: u64) -> TrackerResult<()> {
        let parent_id = self.issue_node_id(parent_number).await?;
        let child_id = self.issue_node_id(child_number).await?;

        let mutation = r#"mutation($issueId: ID!, $subIssueId: ID!) {
            addSubIssue(input: { issueId: $issueId, subIssueId: $subIssueId }) {
                issue {
                    title
                }
                subIssue {
                    title
                }
            }
        }"#;
        let response = self
            .http
            .post(GRAPHQL_URL)
            .json(&serde_json::json!({
                "query": mutation,
                "variables": { "issueId": parent_id, "subIssueId": child_id },
            }))
            .send()
            .await
            .map_err(|e| TrackerError::Api(format!("sub-issue request failed: {e}")))?
            .error_for_status()
            .map_err(|e| TrackerError::Api(format!("sub-issue request failed: {e}")))?;

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TrackerError::Api(format!("invalid sub-issue response: {e}")))?;
        check_graphql_errors(&data)?;
        Ok(())
    }

    async fn closed_issues_page(&self, page: u32) -> TrackerResult<Vec<ClosedIssue>> {
        let listing = self
            .client
            .issues(&self.config.org, &self.config.repo)
            .list()
            .state(octocrab::params::State::Closed)
            .per_page(CLOSED_ISSUES_PAGE_SIZE)
            .page(page)
            .send()
            .await
            .map_err(|e| {
                TrackerError::Api(format!("failed to list closed issues (page {page}): {e}"))
            })?;

        Ok(listing
            .items
            .into_iter()
            .map(|issue| ClosedIssue {
                number: issue.number,
                node_id: issue.node_id,
                title: issue.title,
            })
            .collect())
    }

    async fn close_issue(&self, node_id: &str) -> TrackerResult<()> {
        let mutation = r#"mutation($issueId: ID!) {
            updateIssue(input: {id: $issueId, state: CLOSED}) {
                issue {
                    id
                }
            }
        }"#;
        self.graphql(&serde_json::json!({
            "query": mutation,
            "variables": { "issueId": node_id },
        }))
        .await?;
        Ok(())
    }

    async fn delete_issue(&self, node_id: &str) -> TrackerResult<()> {
        let mutation = r#"mutation($issueId: ID!, $clientMutationId: String!) {
            deleteIssue(input: {issueId: $issueId, clientMutationId: $clientMutationId}) {
                clientMutationId
            }
        }"#;
        self.graphql(&serde_json::json!({
            "query": mutation,
            "variables": { "issueId": node_id, "clientMutationId": "delete-issue" },
        }))
        .await?;
        Ok(())
    }
}
