//! Append-only in-memory record store.
//!
//! An [`Accumulator`] keeps every record received for one signal, in arrival
//! order, until it is cleared. All synchronisation is internal: handlers on
//! any number of threads may append while tests take snapshots.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;

/// Errors that can occur during accumulator operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccumulatorError {
    /// A previous holder of the lock panicked.
    #[error("Accumulator lock poisoned")]
    LockPoisoned,

    /// A wait condition did not hold before the timeout elapsed.
    #[error("Condition not met after waiting {waited:?}")]
    Timeout {
        /// How long the caller waited.
        waited: Duration,
    },
}

/// Concurrency-safe, append-only sequence of records.
///
/// Cloning an `Accumulator` yields another handle to the same sequence.
///
/// # Example
///
/// ```
/// use shared::storage::Accumulator;
///
/// let acc = Accumulator::new();
/// acc.append("first").unwrap();
/// acc.append("second").unwrap();
///
/// assert_eq!(acc.snapshot().unwrap(), vec!["first", "second"]);
///
/// acc.clear().unwrap();
/// assert!(acc.is_empty().unwrap());
/// ```
#[derive(Debug)]
pub struct Accumulator<T> {
    records: Arc<RwLock<Vec<T>>>,
    appended: Arc<Notify>,
}

impl<T> Clone for Accumulator<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            appended: Arc::clone(&self.appended),
        }
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Accumulator<T> {
    /// Creates a new empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            appended: Arc::new(Notify::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, AccumulatorError> {
        self.records
            .read()
            .map_err(|_| AccumulatorError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, AccumulatorError> {
        self.records
            .write()
            .map_err(|_| AccumulatorError::LockPoisoned)
    }

    /// Appends a record to the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::LockPoisoned`] if the lock is poisoned, in
    /// which case nothing was appended.
    pub fn append(&self, record: T) -> Result<(), AccumulatorError> {
        self.write()?.push(record);
        self.appended.notify_waiters();
        Ok(())
    }

    /// Returns the number of records currently held.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::LockPoisoned`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, AccumulatorError> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no records are held.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::LockPoisoned`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, AccumulatorError> {
        Ok(self.read()?.is_empty())
    }

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::LockPoisoned`] if the lock is poisoned.
    pub fn clear(&self) -> Result<(), AccumulatorError> {
        self.write()?.clear();
        Ok(())
    }
}

impl<T: Clone> Accumulator<T> {
    /// Returns a point-in-time copy of every record, in arrival order.
    ///
    /// The copy is owned by the caller; later appends and clears do not
    /// affect it.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::LockPoisoned`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<T>, AccumulatorError> {
        Ok(self.read()?.clone())
    }

    /// Waits until `predicate` holds for the accumulated records and returns
    /// the snapshot it held for.
    ///
    /// The predicate is checked immediately and again after every append.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::Timeout`] if the predicate does not hold
    /// within `timeout`, or [`AccumulatorError::LockPoisoned`] if the lock is
    /// poisoned.
    pub async fn wait_until<F>(
        &self,
        mut predicate: F,
        timeout: Duration,
    ) -> Result<Vec<T>, AccumulatorError>
    where
        F: FnMut(&[T]) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            // Register before checking so an append between the check and the
            // await still wakes us.
            let notified = self.appended.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(records) = self.snapshot_if(&mut predicate)? {
                return Ok(records);
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                tracing::debug!(?timeout, "Accumulator wait timed out");
                return Err(AccumulatorError::Timeout { waited: timeout });
            }
        }
    }

    /// Waits until at least `count` records have been accumulated.
    ///
    /// # Errors
    ///
    /// See [`Accumulator::wait_until`].
    pub async fn wait_for_len(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Result<Vec<T>, AccumulatorError> {
        self.wait_until(|records| records.len() >= count, timeout)
            .await
    }

    fn snapshot_if<F>(&self, predicate: &mut F) -> Result<Option<Vec<T>>, AccumulatorError>
    where
        F: FnMut(&[T]) -> bool,
    {
        let records = self.read()?;
        Ok(predicate(&records).then(|| records.clone()))
    }
}

#[cfg(any(test, feature = "test-util"))]
impl<T> Accumulator<T> {
    /// Poisons the lock by panicking while the write guard is held.
    ///
    /// Every later operation on this accumulator, and on its clones, fails
    /// with [`AccumulatorError::LockPoisoned`].
    pub fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.records.write();
            panic!("accumulator poisoned on request");
        }));
    }
}
