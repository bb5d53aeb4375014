use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use super::error::AppError;
use crate::batch::{BatchFileReader, BatchObserver, FailurePolicy, NoopObserver};
use crate::domain::{BatchRequest, ResourceId};
use crate::io::{FileStore, ResourceReader};

/// Number of stanzas in each poem directory
pub const STANZA_COUNT: u32 = 8;

/// Everything a demonstration needs to run
pub struct DemoContext {
    /// Where the stanza files live
    pub store: FileStore,
    /// Where demo E writes its output
    pub scratch: FileStore,
    /// Poem directory under the store root
    pub poem: String,
    /// Slot to corrupt in demo D; chosen at random when unset
    pub fault_index: Option<usize>,
    /// What demo D does after a failure
    pub on_error: FailurePolicy,
    /// Receives every line a demo prints
    pub observer: Box<dyn BatchObserver>,
}

impl DemoContext {
    pub fn new(store: FileStore, scratch: FileStore, observer: Box<dyn BatchObserver>) -> Self {
        Self {
            store,
            scratch,
            poem: "poem-two".to_string(),
            fault_index: None,
            on_error: FailurePolicy::default(),
            observer,
        }
    }

    pub fn with_fault_index(mut self, index: Option<usize>) -> Self {
        self.fault_index = index;
        self
    }

    pub fn with_on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    fn stanzas(&self, numbers: RangeInclusive<u32>) -> BatchRequest {
        BatchRequest::numbered(&self.poem, numbers)
    }
}

/// A single runnable demonstration
#[async_trait]
pub trait Demo: Send + Sync {
    /// One-line summary shown in logs
    fn describe(&self) -> &'static str;

    async fn run(&self, ctx: &mut DemoContext) -> Result<(), AppError>;
}

/// Log a range of stanzas in any order, reads in parallel, errors ignored
pub struct ParallelStanzas {
    pub numbers: RangeInclusive<u32>,
}

#[async_trait]
impl Demo for ParallelStanzas {
    fn describe(&self) -> &'static str {
        "parallel read, any order, errors ignored"
    }

    async fn run(&self, ctx: &mut DemoContext) -> Result<(), AppError> {
        let request = ctx.stanzas(self.numbers.clone());
        BatchFileReader::new(&ctx.store)
            .read_all_parallel(request, &mut *ctx.observer)
            .await;
        Ok(())
    }
}

/// Log every stanza in order, reads in series, errors ignored
pub struct SequentialStanzas;

#[async_trait]
impl Demo for SequentialStanzas {
    fn describe(&self) -> &'static str {
        "sequential read, in order, errors ignored"
    }

    async fn run(&self, ctx: &mut DemoContext) -> Result<(), AppError> {
        let request = ctx.stanzas(1..=STANZA_COUNT);
        BatchFileReader::new(&ctx.store)
            .read_all_sequential_ignoring_errors(request, &mut *ctx.observer)
            .await;
        Ok(())
    }
}

/// Log every stanza in order with one filename corrupted, reporting the failure
pub struct FailingStanzas;

#[async_trait]
impl Demo for FailingStanzas {
    fn describe(&self) -> &'static str {
        "sequential read with an injected failure"
    }

    async fn run(&self, ctx: &mut DemoContext) -> Result<(), AppError> {
        let request = ctx.stanzas(1..=STANZA_COUNT);
        let index = match ctx.fault_index {
            Some(index) if index < request.len() => index,
            Some(index) => {
                return Err(AppError::InvalidArguments(format!(
                    "fault index {index} out of range for {} stanzas",
                    request.len()
                )));
            }
            None => random_index(request.len()),
        };
        debug!(index, policy = ?ctx.on_error, "Injecting fault");

        BatchFileReader::new(&ctx.store)
            .read_all_sequential_fail_fast(
                request.with_fault(index),
                ctx.on_error,
                &mut *ctx.observer,
            )
            .await;
        Ok(())
    }
}

/// Collect the poem into a single file, then read it back
pub struct WriteCollected;

#[async_trait]
impl Demo for WriteCollected {
    fn describe(&self) -> &'static str {
        "write the collected poem to a file and read it back"
    }

    async fn run(&self, ctx: &mut DemoContext) -> Result<(), AppError> {
        let request = ctx.stanzas(1..=STANZA_COUNT);
        let result = BatchFileReader::new(&ctx.store)
            .read_all_sequential_ignoring_errors(request, NoopObserver)
            .await;

        let target = ResourceId::new(format!("{}.txt", ctx.poem));
        let poem = result.contents().join("\n");
        ctx.scratch.write(&target, &poem).await?;

        let written = ctx.scratch.read(&target).await?;
        ctx.observer.on_content(&target, &written);
        ctx.observer.on_done();
        Ok(())
    }
}

fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    rand::rng().random_range(0..len)
}

/// Name-to-demo mapping consulted by [`dispatch`]
///
/// Names are matched case-insensitively.
#[derive(Default)]
pub struct DemoRegistry {
    demos: BTreeMap<String, Box<dyn Demo>>,
}

impl DemoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exercise's problems `A` through `E`
    pub fn standard() -> Self {
        Self::new()
            .register("A", ParallelStanzas { numbers: 1..=2 })
            .register(
                "B",
                ParallelStanzas {
                    numbers: 1..=STANZA_COUNT,
                },
            )
            .register("C", SequentialStanzas)
            .register("D", FailingStanzas)
            .register("E", WriteCollected)
    }

    /// Add a demo (fluent interface); a later registration replaces an earlier one
    pub fn register(mut self, name: &str, demo: impl Demo + 'static) -> Self {
        self.demos.insert(name.to_uppercase(), Box::new(demo));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Demo> {
        self.demos.get(&name.to_uppercase()).map(|demo| demo.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.demos.keys().map(String::as_str)
    }
}

/// Run each recognised name in argument order
///
/// Unrecognised names are skipped without error. Returns how many demos ran.
pub async fn dispatch<S>(
    registry: &DemoRegistry,
    names: &[S],
    ctx: &mut DemoContext,
) -> Result<usize, AppError>
where
    S: AsRef<str>,
{
    let mut ran = 0;

    for name in names {
        let name = name.as_ref();
        match registry.get(name) {
            Some(demo) => {
                info!(demo = name, "{}", demo.describe());
                demo.run(ctx).await?;
                ran += 1;
            }
            None => debug!(arg = name, "Ignoring unrecognised demo"),
        }
    }

    Ok(ran)
}
