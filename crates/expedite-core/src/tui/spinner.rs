//! cliclack spinner as a [`Progress`] sink

use crate::progress::Progress;

/// Shows each step as a spinner and warnings as log lines
#[derive(Default)]
pub struct SpinnerProgress {
    active: Option<(cliclack::ProgressBar, String)>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the running spinner, leaving its own message in place
    fn settle(&mut self) {
        if let Some((spinner, message)) = self.active.take() {
            spinner.stop(message);
        }
    }
}

impl Progress for SpinnerProgress {
    fn start(&mut self, message: &str) {
        self.settle();
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.active = Some((spinner, message.to_string()));
    }

    fn succeed(&mut self, message: &str) {
        match self.active.take() {
            Some((spinner, _)) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn warn(&mut self, message: &str) {
        self.settle();
        let _ = cliclack::log::warning(message);
    }

    fn fail(&mut self, message: &str) {
        self.settle();
        let _ = cliclack::log::error(message);
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        self.settle();
    }
}
