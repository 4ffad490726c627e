//! Debouncing of rapidly changing input.
//!
//! [`Debouncer`] is a plain state machine driven by explicit instants so it
//! works under any event loop. [`debounce`] runs one on a tokio task.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::sleep_until;

/// Emits a value once no newer value has arrived for the quiet interval.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replaces the pending value and restarts the timer.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Takes the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if due <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Local search text kept apart from the committed search query.
///
/// Typing updates [`SearchInput::text`] at once; the text is committed only
/// after it has been stable for the quiet interval and differs from the last
/// committed value.
#[derive(Debug)]
pub struct SearchInput {
    text: String,
    committed: String,
    debouncer: Debouncer<String>,
}

impl SearchInput {
    pub fn new(committed: impl Into<String>, quiet: Duration) -> Self {
        let committed = committed.into();
        Self {
            text: committed.clone(),
            committed,
            debouncer: Debouncer::new(quiet),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.debouncer.push(self.text.clone(), now);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Returns the text to commit, if it is due and changed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let text = self.debouncer.poll(now)?;
        if text == self.committed {
            return None;
        }
        self.committed = text.clone();
        Some(text)
    }

    /// Adopts a committed value changed elsewhere, dropping pending input.
    pub fn reset(&mut self, committed: impl Into<String>) {
        self.committed = committed.into();
        self.text = self.committed.clone();
        self.debouncer.cancel();
    }
}

/// Spawns a task forwarding each value from `input` once it has been stable
/// for `quiet`. A value still pending when `input` closes is dropped.
pub fn debounce<T>(mut input: mpsc::Receiver<T>, quiet: Duration) -> mpsc::Receiver<T>
where
    T: Send + 'static,
{
    let (tx, output) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(quiet);

        loop {
            let due = debouncer
                .deadline()
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(|| tokio::time::Instant::now() + quiet);

            tokio::select! {
                value = input.recv() => match value {
                    Some(value) => debouncer.push(value, tokio::time::Instant::now().into_std()),
                    None => break,
                },
                _ = sleep_until(due), if debouncer.is_pending() => {
                    let now = tokio::time::Instant::now().into_std();
                    if let Some(value) = debouncer.poll(now)
                        && tx.send(value).await.is_err()
                    {
                        break;
                    }
                }
            }
        }
    });

    output
}
