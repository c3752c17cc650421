//! Trailing-edge debouncing of surface intents.
//!
//! Each intent kind owns a single slot. Scheduling replaces whatever is still
//! pending in that slot; once an intent fires it is handed off and never
//! recalled. All methods take `now` so callers (and tests) supply the clock.

use crate::kernel::protocol::{PreviewRequest, Request, Response};
use crate::kernel::services::ports::Settings;
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);
pub const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "debounce overshoot"
            );
        }

        self.cancel()
    }
}

/// Debounce queues for the two intent kinds that need them.
#[derive(Debug, Clone)]
pub struct RequestScheduler {
    search: Debouncer<String>,
    preview: Debouncer<PreviewRequest>,
    min_query_len: usize,
}

impl Default for RequestScheduler {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE, PREVIEW_DEBOUNCE, 3)
    }
}

impl RequestScheduler {
    pub fn new(search_delay: Duration, preview_delay: Duration, min_query_len: usize) -> Self {
        Self {
            search: Debouncer::new(search_delay),
            preview: Debouncer::new(preview_delay),
            min_query_len,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Duration::from_millis(settings.search_debounce_ms),
            Duration::from_millis(settings.preview_debounce_ms),
            settings.min_query_len,
        )
    }

    /// Queue a search for `term`.
    ///
    /// Terms below the minimum length never reach the backend: any pending
    /// search is dropped and an empty result set is returned for the surface
    /// to apply right away.
    pub fn schedule_search(&mut self, term: String, now: Instant) -> Option<Response> {
        if term.chars().count() < self.min_query_len {
            self.search.cancel();
            return Some(Response::Results { data: Vec::new() });
        }
        self.search.schedule(term, now);
        None
    }

    pub fn schedule_preview(&mut self, request: PreviewRequest, now: Instant) {
        self.preview.schedule(request, now);
    }

    pub fn cancel_preview(&mut self) {
        self.preview.cancel();
    }

    pub fn has_pending(&self) -> bool {
        self.search.is_pending() || self.preview.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.search.deadline(), self.preview.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Requests whose quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<Request> {
        let mut due = Vec::new();
        if let Some(text) = self.search.poll(now) {
            due.push(Request::Search { text });
        }
        if let Some(data) = self.preview.poll(now) {
            due.push(Request::GetPreview { data });
        }
        due
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/debounce.rs"]
mod tests;
