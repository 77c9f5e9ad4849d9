use crate::utils::{Error, Result};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

/// Bounds transcoding work: at most `max_concurrent` jobs run, at most
/// `max_queued` more wait for a slot, anything beyond that is turned away.
#[derive(Debug, Clone)]
pub struct AdmissionControl {
    admitted: Arc<Semaphore>,
    workers: Arc<Semaphore>,
}

/// A request that got past admission and may wait for a worker slot.
#[derive(Debug)]
pub struct AdmissionTicket {
    admitted: OwnedSemaphorePermit,
    workers: Arc<Semaphore>,
}

/// Held for the lifetime of a running job.
#[derive(Debug)]
pub struct JobPermit {
    _admitted: OwnedSemaphorePermit,
    _worker: OwnedSemaphorePermit,
}

impl AdmissionControl {
    pub fn new(max_concurrent: usize, max_queued: usize) -> Self {
        Self {
            admitted: Arc::new(Semaphore::new(max_concurrent + max_queued)),
            workers: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    pub fn try_admit(&self) -> Result<AdmissionTicket> {
        match self.admitted.clone().try_acquire_owned() {
            Ok(admitted) => Ok(AdmissionTicket {
                admitted,
                workers: self.workers.clone(),
            }),
            Err(TryAcquireError::NoPermits) => {
                Err(Error::rejected("too many requests in flight"))
            }
            Err(TryAcquireError::Closed) => Err(Error::rejected("service is shutting down")),
        }
    }

    pub fn available_workers(&self) -> usize {
        self.workers.available_permits()
    }
}

impl AdmissionTicket {
    pub async fn wait_for_worker(self) -> Result<JobPermit> {
        let worker = self
            .workers
            .acquire_owned()
            .await
            .map_err(|_| Error::rejected("service is shutting down"))?;
        Ok(JobPermit {
            _admitted: self.admitted,
            _worker: worker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_excess_requests_rejected() {
        let admission = AdmissionControl::new(1, 1);
        let first = admission.try_admit().unwrap();
        let _second = admission.try_admit().unwrap();
        assert!(matches!(
            admission.try_admit(),
            Err(Error::Rejected { .. })
        ));

        drop(first);
        assert!(admission.try_admit().is_ok());
    }

    #[tokio::test]
    async fn test_queued_request_waits_for_worker() {
        let admission = AdmissionControl::new(1, 1);
        let running = admission.try_admit().unwrap().wait_for_worker().await.unwrap();
        assert_eq!(admission.available_workers(), 0);

        let queued = admission.try_admit().unwrap();
        let waiting = tokio::spawn(async move { queued.wait_for_worker().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(running);
        let permit = tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .unwrap()
            .unwrap();
        assert!(permit.is_ok());
    }
}
