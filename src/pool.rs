use std::sync::Arc;

use tokio::sync::Semaphore;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::password;
use crate::record::HashRecord;

/// Runs hash/verify calls on the blocking thread pool, with at most
/// `max_concurrency` derivations (and their working sets) alive at once.
#[derive(Clone)]
pub struct HashPool {
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl HashPool {
    pub fn new(max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn hash(&self, password: impl Into<Vec<u8>>, params: ParameterSet) -> Result<HashRecord> {
        let secret = Zeroizing::new(password.into());
        self.run(move || password::hash(secret.as_slice(), &params))
            .await
    }

    pub async fn verify(
        &self,
        password: impl Into<Vec<u8>>,
        record: Option<HashRecord>,
    ) -> Result<bool> {
        let Some(record) = record else {
            return Err(Error::MissingRecord);
        };

        let secret = Zeroizing::new(password.into());
        self.run(move || record.verify(secret.as_slice()))
            .await
    }

    async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        if self.permits.available_permits() == 0 {
            tracing::debug!(
                "Hash pool saturated ({} in flight), waiting for a permit",
                self.max_concurrency
            );
        }

        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Error::WorkerFailed(format!("Permit unavailable: {e}")))?;

        tokio::task::spawn_blocking(move || {
            let result = job();
            drop(permit);
            result
        })
        .await
        .map_err(|e| Error::WorkerFailed(format!("Hash task did not complete: {e}")))?
    }
}
