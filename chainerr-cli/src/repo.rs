//! Data-access stub used to produce realistic failures

use anyhow::{anyhow, Context};
use chainerr_outcome::{err, GenericError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the next lookup should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailureMode {
    /// Succeed
    #[default]
    None,
    /// An io error wrapped with anyhow context
    Io,
    /// A bare message
    Message,
    /// A panic inside the repository
    Panic,
    /// An already-chained, annotated error
    Chained,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// In-memory user repository with a configurable failure
#[derive(Debug, Clone, Default)]
pub struct UserRepository {
    fail_with: FailureMode,
}

impl UserRepository {
    pub fn new(fail_with: FailureMode) -> Self {
        Self { fail_with }
    }

    /// Look up a user
    pub fn find(&self, id: u64) -> anyhow::Result<User> {
        match self.fail_with {
            FailureMode::None => Ok(User {
                id,
                name: format!("user-{}", id),
            }),
            FailureMode::Io => Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))
            .context("reading users table"),
            FailureMode::Message => Err(anyhow!("user {} is archived", id)),
            FailureMode::Panic => panic!("connection pool poisoned"),
            FailureMode::Chained => {
                let cause = GenericError::new("deadline exceeded").with_name("TimeoutError");
                Err(err("query failed", cause)
                    .with_value("table", "users")
                    .with_value("operation", "select")
                    .into())
            }
        }
    }

    /// Look up a user, yielding to the runtime first
    pub async fn find_async(&self, id: u64) -> anyhow::Result<User> {
        tokio::task::yield_now().await;
        self.find(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_succeeds() {
        let repo = UserRepository::default();
        let user = repo.find(7).unwrap();
        assert_eq!(user, User { id: 7, name: "user-7".to_string() });
    }

    #[test]
    fn test_find_io_keeps_context() {
        let repo = UserRepository::new(FailureMode::Io);
        let e = repo.find(1).unwrap_err();
        assert_eq!(e.to_string(), "reading users table");
        assert_eq!(e.root_cause().to_string(), "connection reset by peer");
    }

    #[tokio::test]
    async fn test_find_async_matches_sync() {
        let repo = UserRepository::new(FailureMode::Message);
        let e = repo.find_async(3).await.unwrap_err();
        assert_eq!(e.to_string(), "user 3 is archived");
    }
}
