//! When to run the positioner: document ready, debounced resize, fonts ready.
//!
//! [`TriggerScheduler`] is pure state over a monotonic clock supplied by the
//! caller (for a browser, `performance.now()`), so the timing rules can be
//! driven deterministically. [`AutoPositioner`] couples it with a positioner
//! and a document.

use std::time::Duration;

use super::{LayerDocument, LayerPositioner, PositionReport};

/// Loading state of the document when the runtime starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// External events that may cause a positioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The document finished parsing.
    DocumentReady,
    /// The viewport was resized.
    Resize,
    /// Web fonts finished loading.
    FontsReady,
}

// ============================================================================
// TriggerScheduler
// ============================================================================

/// Decides which events lead to a positioning pass.
///
/// - Start: run immediately unless the document is still loading, in which
///   case run on [`Trigger::DocumentReady`].
/// - Resize: each event pushes a deadline `debounce` into the future; the
///   pass runs from [`poll`](Self::poll) once the last deadline has passed.
///   A zero debounce runs on every resize.
/// - Fonts ready: runs once.
#[derive(Debug, Clone)]
pub struct TriggerScheduler {
    debounce: Duration,
    started: bool,
    awaiting_ready: bool,
    fonts_done: bool,
    resize_deadline: Option<Duration>,
}

impl TriggerScheduler {
    /// Resize debounce used by [`Default`].
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            started: false,
            awaiting_ready: false,
            fonts_done: false,
            resize_deadline: None,
        }
    }

    /// Records the initial ready state. Returns true if a pass should run now.
    pub fn start(&mut self, state: ReadyState) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.awaiting_ready = state == ReadyState::Loading;
        !self.awaiting_ready
    }

    /// Records an event. Returns true if a pass should run now.
    pub fn notify(&mut self, trigger: Trigger, now: Duration) -> bool {
        match trigger {
            Trigger::DocumentReady => std::mem::take(&mut self.awaiting_ready),
            Trigger::Resize if self.debounce.is_zero() => true,
            Trigger::Resize => {
                self.resize_deadline = Some(now + self.debounce);
                false
            }
            Trigger::FontsReady => !std::mem::replace(&mut self.fonts_done, true),
        }
    }

    /// Returns true once a pending debounced resize is due, clearing it.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.resize_deadline {
            Some(deadline) if now >= deadline => {
                self.resize_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending resize pass becomes due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.resize_deadline
    }
}

impl Default for TriggerScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEBOUNCE)
    }
}

// ============================================================================
// AutoPositioner
// ============================================================================

/// A positioner bound to a document and driven by trigger events.
///
/// Each method returns the pass's report when a pass ran.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blend_layers::{AutoPositioner, MemoryDocument, ReadyState, Trigger};
///
/// let mut auto = AutoPositioner::new(MemoryDocument::new());
/// assert!(auto.start(ReadyState::Loading).is_none());
/// assert!(auto.handle(Trigger::DocumentReady, Duration::ZERO).is_some());
///
/// auto.handle(Trigger::Resize, Duration::from_millis(10));
/// assert!(auto.tick(Duration::from_millis(50)).is_none());
/// assert!(auto.tick(Duration::from_millis(110)).is_some());
/// ```
#[derive(Debug)]
pub struct AutoPositioner<D> {
    positioner: LayerPositioner,
    scheduler: TriggerScheduler,
    document: D,
}

impl<D: LayerDocument> AutoPositioner<D> {
    /// Uses the default markers and debounce.
    pub fn new(document: D) -> Self {
        Self::with_parts(LayerPositioner::default(), TriggerScheduler::default(), document)
    }

    pub fn with_parts(
        positioner: LayerPositioner,
        scheduler: TriggerScheduler,
        document: D,
    ) -> Self {
        Self {
            positioner,
            scheduler,
            document,
        }
    }

    /// Initial run, immediate unless the document is still loading.
    pub fn start(&mut self, state: ReadyState) -> Option<PositionReport> {
        let run = self.scheduler.start(state);
        self.run_if(run, "start")
    }

    /// Feeds an event.
    pub fn handle(&mut self, trigger: Trigger, now: Duration) -> Option<PositionReport> {
        let run = self.scheduler.notify(trigger, now);
        self.run_if(run, trigger_name(trigger))
    }

    /// Runs a debounced resize pass if it is due.
    pub fn tick(&mut self, now: Duration) -> Option<PositionReport> {
        let run = self.scheduler.poll(now);
        self.run_if(run, "resize")
    }

    pub fn scheduler(&self) -> &TriggerScheduler {
        &self.scheduler
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    fn run_if(&mut self, run: bool, cause: &str) -> Option<PositionReport> {
        if !run {
            return None;
        }
        tracing::debug!(cause, "running positioner");
        Some(self.positioner.run(&mut self.document))
    }
}

fn trigger_name(trigger: Trigger) -> &'static str {
    match trigger {
        Trigger::DocumentReady => "document-ready",
        Trigger::Resize => "resize",
        Trigger::FontsReady => "fonts-ready",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Markers;
    use crate::positioner::{Geometry, MemoryDocument, MemoryElement, StyleProperty};

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn start_runs_immediately_when_interactive() {
        let mut s = TriggerScheduler::default();
        assert!(s.start(ReadyState::Interactive));
        assert!(!s.start(ReadyState::Interactive));
        assert!(!s.notify(Trigger::DocumentReady, ms(0)));

        assert!(TriggerScheduler::default().start(ReadyState::Complete));
    }

    #[test]
    fn start_waits_for_ready_while_loading() {
        let mut s = TriggerScheduler::default();
        assert!(!s.start(ReadyState::Loading));
        assert!(s.notify(Trigger::DocumentReady, ms(5)));
        assert!(!s.notify(Trigger::DocumentReady, ms(6)));
    }

    #[test]
    fn resize_is_debounced_to_last_event() {
        let mut s = TriggerScheduler::default();
        s.start(ReadyState::Complete);

        assert!(!s.notify(Trigger::Resize, ms(0)));
        assert!(!s.notify(Trigger::Resize, ms(60)));
        assert_eq!(s.next_deadline(), Some(ms(160)));

        assert!(!s.poll(ms(100)));
        assert!(!s.poll(ms(159)));
        assert!(s.poll(ms(160)));
        assert!(!s.poll(ms(500)));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn zero_debounce_runs_every_resize() {
        let mut s = TriggerScheduler::new(Duration::ZERO);
        assert!(s.notify(Trigger::Resize, ms(1)));
        assert!(s.notify(Trigger::Resize, ms(2)));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn fonts_ready_runs_once() {
        let mut s = TriggerScheduler::default();
        assert!(s.notify(Trigger::FontsReady, ms(0)));
        assert!(!s.notify(Trigger::FontsReady, ms(1)));
    }

    #[test]
    fn auto_positioner_follows_reflow_after_fonts_load() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let base = doc.push(
            MemoryElement::new([markers.base_class()])
                .with_geometry(Geometry::new(0.0, 0.0, 200.0, 30.0)),
        );
        let burn = doc.push(MemoryElement::new([markers.burn_class()]));
        doc.push(MemoryElement::new([markers.soft_class()]));

        let mut auto = AutoPositioner::new(doc);
        assert_eq!(auto.start(ReadyState::Complete).map(|r| r.positioned), Some(1));

        // A web font with taller metrics lands.
        auto.document_mut()
            .element_mut(base)
            .set_geometry(Geometry::new(0.0, 0.0, 200.0, 36.0));
        assert!(auto.handle(Trigger::FontsReady, ms(300)).is_some());

        assert_eq!(auto.document().style(burn, StyleProperty::Height), Some("36px"));
    }
}
