//! Repository archive download with branch fallback.
//!
//! GitHub's codeload service serves full-repository ZIP snapshots
//! per branch. Branch candidates are tried in order; any failure
//! (connection, HTTP status, empty body) moves on to the next
//! candidate, and only when every candidate fails does the whole
//! fetch fail, carrying the last underlying cause.

use crate::core::error::{GriotError, Result};
use std::future::Future;
use std::time::Duration;

/// Archive download URL for one branch
pub fn archive_url(owner: &str, name: &str, branch: &str) -> String {
    format!("https://codeload.github.com/{owner}/{name}/zip/refs/heads/{branch}")
}

/// Try `attempt` against each candidate branch in order.
///
/// Returns the first success together with the candidate that
/// produced it. The fallback policy lives here, visible and testable
/// on its own, rather than inside the HTTP call.
pub async fn try_branches<T, F, Fut>(branches: &[String], mut attempt: F) -> Result<(T, String)>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = String::from("no branch candidates configured");

    for branch in branches {
        match attempt(branch.clone()).await {
            Ok(value) => return Ok((value, branch.clone())),
            Err(e) => {
                tracing::warn!("Branch '{}' failed: {}", branch, e);
                last_error = e.to_string();
            }
        }
    }

    Err(GriotError::FetchFailed {
        branches: branches.to_vec(),
        last_error,
    })
}

/// Downloads repository archives from GitHub
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    client: reqwest::Client,
}

impl GithubFetcher {
    /// Create a fetcher whose requests time out after `timeout_secs`
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("griot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Download one branch's archive, failing on non-success status
    async fn fetch_branch(&self, owner: &str, name: &str, branch: &str) -> Result<Vec<u8>> {
        let url = archive_url(owner, name, branch);
        tracing::debug!("Downloading {}", url);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(GriotError::ExtractionFailed(format!(
                "Empty archive from {url}"
            )));
        }

        Ok(bytes.to_vec())
    }

    /// Download the archive for the first branch candidate that
    /// succeeds, returning the bytes and the branch used.
    ///
    /// The branch identifier is required downstream: it is embedded
    /// in every record and in citation links.
    pub async fn fetch_archive(
        &self,
        owner: &str,
        name: &str,
        branches: &[String],
    ) -> Result<(Vec<u8>, String)> {
        let (bytes, branch) =
            try_branches(branches, |branch| async move {
                self.fetch_branch(owner, name, &branch).await
            })
            .await?;

        tracing::info!(
            "Downloaded {}/{} @ {} ({} bytes)",
            owner,
            name,
            branch,
            bytes.len()
        );

        Ok((bytes, branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_archive_url_shape() {
        assert_eq!(
            archive_url("ethereum", "EIPs", "master"),
            "https://codeload.github.com/ethereum/EIPs/zip/refs/heads/master"
        );
    }

    #[tokio::test]
    async fn test_try_branches_first_success_short_circuits() {
        let attempts = RefCell::new(Vec::new());
        let result = try_branches(&branches(&["main", "master"]), |branch| {
            attempts.borrow_mut().push(branch.clone());
            async move { Ok(format!("archive-{branch}")) }
        })
        .await
        .unwrap();

        assert_eq!(result, ("archive-main".to_string(), "main".to_string()));
        assert_eq!(*attempts.borrow(), vec!["main".to_string()]);
    }

    #[tokio::test]
    async fn test_try_branches_falls_back_on_failure() {
        let result = try_branches(&branches(&["main", "master"]), |branch| async move {
            if branch == "main" {
                Err(GriotError::ExtractionFailed("404 Not Found".to_string()))
            } else {
                Ok(42u32)
            }
        })
        .await
        .unwrap();

        assert_eq!(result, (42, "master".to_string()));
    }

    #[tokio::test]
    async fn test_try_branches_all_fail_reports_last_cause() {
        let err = try_branches(&branches(&["main", "master"]), |branch| async move {
            Err::<(), _>(GriotError::ExtractionFailed(format!("{branch} missing")))
        })
        .await
        .unwrap_err();

        match err {
            GriotError::FetchFailed {
                branches,
                last_error,
            } => {
                assert_eq!(branches, vec!["main", "master"]);
                assert!(last_error.contains("master missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_try_branches_empty_candidates() {
        let err = try_branches(&[], |_| async { Ok::<(), _>(()) })
            .await
            .unwrap_err();
        assert!(matches!(err, GriotError::FetchFailed { .. }));
    }

    #[test]
    fn test_fetcher_construction() {
        assert!(GithubFetcher::new(60).is_ok());
    }
}
