//! Status reporting for long-running steps

/// Receives status updates from the assembler and installer.
///
/// Mirrors a terminal spinner: `start` begins a step, `succeed`/`fail` end it,
/// and `warn` reports a degraded but non-fatal outcome.
pub trait Progress {
    fn start(&mut self, message: &str);
    fn succeed(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn fail(&mut self, message: &str);
}

/// Progress sink for non-interactive runs that only emits `tracing` events
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn start(&mut self, message: &str) {
        tracing::info!("{}", message);
    }

    fn succeed(&mut self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn fail(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<P: Progress + ?Sized>(progress: &mut P) {
        progress.start("Cloning templates...");
        progress.warn("Backend template not found");
        progress.succeed("Done");
    }

    #[test]
    fn test_log_progress_is_object_safe() {
        let mut progress: Box<dyn Progress> = Box::new(LogProgress);
        drive(progress.as_mut());
        progress.fail("failed");
    }
}
