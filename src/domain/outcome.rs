use super::error::ReadError;
use super::resource::ResourceId;

/// Result of one slot in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Success(String),
    Failure(ReadError),
    /// Never attempted because an earlier failure aborted the batch
    Skipped,
}

impl ReadOutcome {
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success(content) => Some(content),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ReadError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<String, ReadError>> for ReadOutcome {
    fn from(result: Result<String, ReadError>) -> Self {
        match result {
            Ok(content) => Self::Success(content),
            Err(error) => Self::Failure(error),
        }
    }
}

/// One resource paired with what happened when reading it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub id: ResourceId,
    pub outcome: ReadOutcome,
}

/// How a batch was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// All reads in flight at once, entries in completion order
    Parallel,
    /// One read at a time, entries in request order
    Sequential,
}

/// Every entry of a finished batch, one per requested id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    mode: BatchMode,
    entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new(mode: BatchMode, entries: Vec<BatchEntry>) -> Self {
        Self { mode, entries }
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<BatchEntry> {
        self.entries
    }

    /// Successful contents in result order
    pub fn contents(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.content())
            .collect()
    }

    pub fn failures(&self) -> Vec<&ReadError> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.error())
            .collect()
    }

    /// True if an abort left some ids unattempted
    pub fn was_aborted(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.outcome == ReadOutcome::Skipped)
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome.is_success())
    }
}
