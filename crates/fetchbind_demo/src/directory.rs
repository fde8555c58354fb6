use std::time::Duration;

use fetchbind_engine::{FetchError, Fetcher};
use tokio_util::sync::CancellationToken;

const SAMPLE_USERS: [&str; 4] = ["abc", "bcd", "cde", "efg"];

/// In-memory user directory with an artificial lookup latency.
#[derive(Debug, Clone)]
pub(crate) struct UserDirectory {
    users: Vec<String>,
    latency: Duration,
}

impl UserDirectory {
    pub(crate) fn sample(latency: Duration) -> Self {
        Self {
            users: SAMPLE_USERS.iter().map(|user| user.to_string()).collect(),
            latency,
        }
    }

    /// Users whose name contains `keyword`; an empty keyword matches everyone.
    pub(crate) fn search(&self, keyword: &str) -> Result<Vec<String>, FetchError> {
        if keyword.contains('!') {
            return Err(FetchError::failed(format!("invalid keyword {keyword:?}")));
        }
        Ok(self
            .users
            .iter()
            .filter(|user| user.contains(keyword))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl Fetcher<String, Vec<String>> for UserDirectory {
    async fn fetch(
        &self,
        keyword: String,
        cancel: CancellationToken,
    ) -> Result<Vec<String>, FetchError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::failed("lookup superseded")),
            _ = tokio::time::sleep(self.latency) => self.search(&keyword),
        }
    }
}
