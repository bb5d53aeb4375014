use tracing::{debug, info};

use crate::domain::ReadError;

/// Policy for handling read failures during a batch
pub trait ErrorPolicy: Send + Sync {
    /// Whether failures are reported to the batch observer
    fn surfaces_errors(&self) -> bool;

    /// Handle a read failure
    /// Return true to continue the batch, false to abort
    fn handle_read_error(&self, error: &ReadError) -> bool;
}

/// Report errors and continue with the next resource
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipErrors;

impl ErrorPolicy for SkipErrors {
    fn surfaces_errors(&self) -> bool {
        true
    }

    fn handle_read_error(&self, error: &ReadError) -> bool {
        info!(id = %error.id, "Read failed (skipping): {}", error);
        true
    }
}

/// Report the first error and stop
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnError;

impl ErrorPolicy for AbortOnError {
    fn surfaces_errors(&self) -> bool {
        true
    }

    fn handle_read_error(&self, error: &ReadError) -> bool {
        info!(id = %error.id, "Read failed (aborting): {}", error);
        false
    }
}

/// Silent error policy - swallow errors without reporting
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSkip;

impl ErrorPolicy for SilentSkip {
    fn surfaces_errors(&self) -> bool {
        false
    }

    fn handle_read_error(&self, error: &ReadError) -> bool {
        debug!(id = %error.id, "Read failed (ignored)");
        true
    }
}

/// Sub-policy for fail-fast sequential reads, chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure
    Abort,
    /// Report every failure and keep going
    #[default]
    Continue,
}

impl ErrorPolicy for FailurePolicy {
    fn surfaces_errors(&self) -> bool {
        true
    }

    fn handle_read_error(&self, error: &ReadError) -> bool {
        match self {
            Self::Abort => AbortOnError.handle_read_error(error),
            Self::Continue => SkipErrors.handle_read_error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceId;

    fn missing() -> ReadError {
        ReadError::not_found(ResourceId::new("wrong-file-name-1.txt"))
    }

    /// Collect everything a warn-level subscriber would print while `f` runs
    fn logged_at_warn(f: impl FnOnce()) -> String {
        use std::sync::{Arc, Mutex};

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || SharedWriter(sink.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    struct SharedWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn surfaced_failures_stay_quiet_at_default_level() {
        let output = logged_at_warn(|| {
            SkipErrors.handle_read_error(&missing());
            AbortOnError.handle_read_error(&missing());
            FailurePolicy::Continue.handle_read_error(&missing());
        });

        assert!(output.is_empty(), "unexpected log output: {output}");
    }

    #[test]
    fn skip_errors_continues_and_surfaces() {
        let policy = SkipErrors;
        assert!(policy.surfaces_errors());
        assert!(policy.handle_read_error(&missing()));
    }

    #[test]
    fn abort_on_error_stops_and_surfaces() {
        let policy = AbortOnError;
        assert!(policy.surfaces_errors());
        assert!(!policy.handle_read_error(&missing()));
    }

    #[test]
    fn silent_skip_continues_quietly() {
        let policy = SilentSkip;
        assert!(!policy.surfaces_errors());
        assert!(policy.handle_read_error(&missing()));
    }

    #[test]
    fn failure_policy_delegates() {
        assert!(!FailurePolicy::Abort.handle_read_error(&missing()));
        assert!(FailurePolicy::Continue.handle_read_error(&missing()));
        assert!(FailurePolicy::Abort.surfaces_errors());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    }
}
