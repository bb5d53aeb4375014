use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, info};

use super::observer::BatchObserver;
use super::policy::{ErrorPolicy, FailurePolicy, SilentSkip};
use crate::domain::{
    BatchEntry, BatchMode, BatchRequest, BatchResult, ReadError, ReadOutcome, ResourceId,
};
use crate::io::ResourceReader;

/// Reads a batch of resources, in parallel or one at a time
///
/// Every operation returns one [`BatchEntry`] per requested id and calls
/// [`BatchObserver::on_done`] exactly once. Read failures never escape;
/// the [`ErrorPolicy`] decides whether they are reported and whether the
/// batch keeps going.
pub struct BatchFileReader<R>
where
    R: ResourceReader,
{
    reader: R,
}

impl<R> BatchFileReader<R>
where
    R: ResourceReader,
{
    /// Create a batch reader over any resource store
    ///
    /// # Example
    /// ```rust,ignore
    /// let batch = BatchFileReader::new(FileStore::new("poems"));
    /// let request = BatchRequest::numbered("poem-two", 1..=8);
    /// batch.read_all_sequential_ignoring_errors(request, ConsoleReporter::stdout()).await;
    /// ```
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Get reference to the underlying store
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Read every resource concurrently, ignoring failures
    ///
    /// Successes reach the observer in completion order.
    pub async fn read_all_parallel<O>(&self, request: BatchRequest, observer: O) -> BatchResult
    where
        O: BatchObserver,
    {
        self.read_parallel(request, &SilentSkip, observer).await
    }

    /// Read resources in request order, silently skipping failures
    pub async fn read_all_sequential_ignoring_errors<O>(
        &self,
        request: BatchRequest,
        observer: O,
    ) -> BatchResult
    where
        O: BatchObserver,
    {
        self.read_sequential(request, &SilentSkip, observer).await
    }

    /// Read resources in request order, reporting every failure
    ///
    /// With [`FailurePolicy::Abort`] the first failure ends the batch and the
    /// remaining ids come back as [`ReadOutcome::Skipped`]. With
    /// [`FailurePolicy::Continue`] every id is attempted.
    pub async fn read_all_sequential_fail_fast<O>(
        &self,
        request: BatchRequest,
        policy: FailurePolicy,
        observer: O,
    ) -> BatchResult
    where
        O: BatchObserver,
    {
        self.read_sequential(request, &policy, observer).await
    }

    /// Fan out one read per id and join on all of them
    ///
    /// All reads are started before any is awaited, so nothing can be
    /// aborted: the policy only decides whether failures are surfaced.
    pub async fn read_parallel<P, O>(
        &self,
        request: BatchRequest,
        policy: &P,
        mut observer: O,
    ) -> BatchResult
    where
        P: ErrorPolicy + ?Sized,
        O: BatchObserver,
    {
        let total = request.len();
        info!(count = total, mode = "parallel", "Starting batch");

        let reader = &self.reader;
        let mut pending: FuturesUnordered<_> = request
            .into_iter()
            .map(|id| async move {
                let result = reader.read(&id).await;
                (id, result)
            })
            .collect();

        let mut entries = Vec::with_capacity(total);
        while let Some((id, result)) = pending.next().await {
            if let Err(error) = &result {
                debug!(%id, "Read failed; remaining reads still collected: {}", error);
            }
            let outcome = settle(&id, result, policy, &mut observer);
            entries.push(BatchEntry { id, outcome });
        }

        observer.on_done();
        let result = BatchResult::new(BatchMode::Parallel, entries);
        info!(
            count = total,
            failures = result.failures().len(),
            mode = "parallel",
            "Batch settled"
        );
        result
    }

    /// Read one id at a time; the next read starts only after the previous settles
    pub async fn read_sequential<P, O>(
        &self,
        request: BatchRequest,
        policy: &P,
        mut observer: O,
    ) -> BatchResult
    where
        P: ErrorPolicy + ?Sized,
        O: BatchObserver,
    {
        let total = request.len();
        info!(count = total, mode = "sequential", "Starting batch");

        let mut ids = request.into_iter();
        let mut entries = Vec::with_capacity(total);

        for id in ids.by_ref() {
            let result = self.reader.read(&id).await;
            let proceed = match &result {
                Ok(_) => true,
                Err(error) => policy.handle_read_error(error),
            };
            let outcome = settle(&id, result, policy, &mut observer);
            entries.push(BatchEntry { id, outcome });

            if !proceed {
                info!(attempted = entries.len(), count = total, "Batch aborted");
                break;
            }
        }

        entries.extend(ids.map(|id| BatchEntry {
            id,
            outcome: ReadOutcome::Skipped,
        }));

        observer.on_done();
        BatchResult::new(BatchMode::Sequential, entries)
    }
}

/// Turn one settled read into an outcome, notifying the observer
fn settle<P, O>(
    id: &ResourceId,
    result: Result<String, ReadError>,
    policy: &P,
    observer: &mut O,
) -> ReadOutcome
where
    P: ErrorPolicy + ?Sized,
    O: BatchObserver,
{
    match result {
        Ok(content) => {
            debug!(%id, bytes = content.len(), "Read settled");
            observer.on_content(id, &content);
            ReadOutcome::Success(content)
        }
        Err(error) => {
            if policy.surfaces_errors() {
                observer.on_failure(&error);
            }
            ReadOutcome::Failure(error)
        }
    }
}
