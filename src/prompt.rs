//! Operator dialogs.
//!
//! Page components never block on a UI themselves. Confirmation questions and
//! notices go through a [`Prompter`] supplied by the embedding application.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Blocking confirmation and notice dialogs.
///
/// Implementations must be shareable with the background video poller,
/// which reports terminal job states through [`alert`](Prompter::alert).
pub trait Prompter: Send + Sync {
    /// Asks a yes/no question; returns `true` if the operator agreed.
    fn confirm(&self, message: &str) -> bool;

    /// Shows a notice.
    fn alert(&self, message: &str);
}

/// A headless [`Prompter`] that records every dialog.
///
/// Confirmations are answered from a queue of scripted answers, falling
/// back to a default once the queue is empty.
///
/// ```rust
/// use showcase_client::prompt::{Prompter, RecordingPrompter};
///
/// let prompter = RecordingPrompter::answering(false);
/// assert!(!prompter.confirm("Remove this product?"));
/// prompter.alert("done");
/// assert_eq!(prompter.confirmations(), vec!["Remove this product?".to_string()]);
/// assert_eq!(prompter.alerts(), vec!["done".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingPrompter {
    default_answer: bool,
    answers: Mutex<VecDeque<bool>>,
    confirmations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingPrompter {
    /// Creates a prompter that answers every confirmation with `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            default_answer: answer,
            ..Self::default()
        }
    }

    /// Queues answers consumed before the default applies.
    #[must_use]
    pub fn with_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
        lock(&self.answers).extend(answers);
        self
    }

    /// Returns every confirmation question asked so far.
    #[must_use]
    pub fn confirmations(&self) -> Vec<String> {
        lock(&self.confirmations).clone()
    }

    /// Returns every notice shown so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, message: &str) -> bool {
        lock(&self.confirmations).push(message.to_string());
        lock(&self.answers)
            .pop_front()
            .unwrap_or(self.default_answer)
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}

// A poisoned lock only means another recorder call panicked; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
