// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Prefetcher`]: event handlers tying motion, candidates, dispatch, and rendering together.
//!
//! ## Event flow
//!
//! The host forwards its events to the handlers and calls [`Prefetcher::poll`] once
//! [`Prefetcher::next_deadline`] has passed.
//!
//! Within one [`pointer_move`](Prefetcher::pointer_move) the order is fixed:
//!
//! 1. Due debounced refreshes run, so the candidate snapshot is current.
//! 2. The motion tracker offers the sample to its sampling throttle and updates the probe.
//! 3. If the probe moved, a display frame is requested for the overlay.
//! 4. The dispatcher ticks against the probe from step 2.
//!
//! [`scroll`](Prefetcher::scroll) and [`structure_changed`](Prefetcher::structure_changed) only
//! arm their debouncers. When both fire on the same poll their causes coalesce into one refresh.
//!
//! ## Attachment
//!
//! A prefetcher starts detached. [`attach`](Prefetcher::attach) takes the first snapshot and
//! starts accepting events. [`detach`](Prefetcher::detach) cancels every pending deadline and
//! frame, then applies the configured [`DetachPolicy`]. Events received while detached are
//! dropped.

use core::fmt;

use kurbo::Point;
use understory_schedule::{Debounce, Timestamp};

use crate::candidates::{CandidateSet, RefreshCause, RefreshReport, TargetSource};
use crate::config::{ConfigError, DetachPolicy, PrefetchConfig};
use crate::dispatch::{DispatchOutcome, PrefetchDispatcher, PrefetchSink};
use crate::motion::{MotionTracker, ProbeRegion};
use crate::render::{NoOverlay, Overlay, RenderSync};
use crate::sector::Sector;

/// Pointer-intent prefetcher over a host's navigable targets.
///
/// `S` enumerates targets, `K` receives prefetches, and `O` is the optional probe overlay.
pub struct Prefetcher<S, K, O = NoOverlay>
where
    S: TargetSource,
{
    config: PrefetchConfig,
    source: S,
    sink: K,
    overlay: O,
    tracker: MotionTracker,
    candidates: CandidateSet<S::Target>,
    scroll: Debounce<RefreshCause>,
    structure: Debounce<RefreshCause>,
    dispatcher: PrefetchDispatcher,
    render: RenderSync,
    attached: bool,
}

impl<S, K> Prefetcher<S, K, NoOverlay>
where
    S: TargetSource,
    K: PrefetchSink<S::Target>,
{
    /// Create a detached prefetcher without an overlay.
    pub fn new(config: PrefetchConfig, source: S, sink: K) -> Result<Self, ConfigError> {
        Self::with_overlay(config, source, sink, NoOverlay)
    }
}

impl<S, K, O> Prefetcher<S, K, O>
where
    S: TargetSource,
    K: PrefetchSink<S::Target>,
    O: Overlay,
{
    /// Create a detached prefetcher driving `overlay`.
    ///
    /// The overlay only receives frames when
    /// [`show_probe_area`](PrefetchConfig::show_probe_area) is set and the overlay is present.
    pub fn with_overlay(
        config: PrefetchConfig,
        source: S,
        sink: K,
        overlay: O,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let render = RenderSync::new(config.show_probe_area && overlay.is_present());
        Ok(Self {
            tracker: MotionTracker::new(config.sample_interval),
            candidates: CandidateSet::new(config.visibility),
            scroll: Debounce::new(config.scroll_debounce),
            structure: Debounce::new(config.structure_debounce),
            dispatcher: PrefetchDispatcher::new(
                config.dispatch_interval,
                config.dispatch_burst,
                config.proximity,
                config.coverage_radians(),
            ),
            render,
            config,
            source,
            sink,
            overlay,
            attached: false,
        })
    }

    /// Start tracking: take the initial candidate snapshot and accept events.
    ///
    /// Attaching again while attached refreshes the snapshot.
    pub fn attach(&mut self, now: Timestamp) -> RefreshReport {
        if !self.attached {
            self.attached = true;
            self.tracker.rearm();
            self.dispatcher.rearm();
            log::debug!("prefetcher attached at {:?}", now.since_epoch());
        }
        self.candidates.refresh(&self.source, RefreshCause::ATTACH)
    }

    /// Stop tracking: cancel pending refreshes, throttle resets, and frames.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.scroll.clear();
        self.structure.clear();
        self.dispatcher.clear();
        self.render.cancel(&mut self.overlay);
        match self.config.detach {
            DetachPolicy::SnapToIdle => self.tracker.reset(),
            DetachPolicy::FreezeLast => self.tracker.freeze(),
        }
        log::debug!("prefetcher detached ({:?})", self.config.detach);
    }

    /// Whether events are being accepted.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handle a pointer move to `position` in viewport coordinates.
    pub fn pointer_move(&mut self, now: Timestamp, position: Point) -> DispatchOutcome {
        if !self.attached {
            log::trace!("pointer move dropped while detached");
            return DispatchOutcome::Detached;
        }
        let _ = self.poll(now);
        if self.tracker.sample(now, position) {
            self.render.request(&mut self.overlay);
        }
        let probe = self.tracker.probe();
        self.dispatcher.tick(now, &probe, &self.candidates, &mut self.sink)
    }

    /// Handle a viewport scroll; the refresh runs once scrolling has been quiet for
    /// [`scroll_debounce`](PrefetchConfig::scroll_debounce).
    pub fn scroll(&mut self, now: Timestamp) {
        if !self.attached {
            log::trace!("scroll dropped while detached");
            return;
        }
        let _ = self.poll(now);
        self.scroll.run(now, RefreshCause::SCROLL);
    }

    /// Handle navigable targets being added or removed; the refresh runs once changes have been
    /// quiet for [`structure_debounce`](PrefetchConfig::structure_debounce).
    pub fn structure_changed(&mut self, now: Timestamp) {
        if !self.attached {
            log::trace!("structural change dropped while detached");
            return;
        }
        let _ = self.poll(now);
        self.structure.run(now, RefreshCause::STRUCTURE);
    }

    /// Run whatever is due at `now`.
    ///
    /// Returns the report of the candidate refresh, if one ran.
    pub fn poll(&mut self, now: Timestamp) -> Option<RefreshReport> {
        self.dispatcher.poll(now);
        let cause = self.scroll.poll(now).unwrap_or_default()
            | self.structure.poll(now).unwrap_or_default();
        if cause.is_empty() {
            return None;
        }
        Some(self.candidates.refresh(&self.source, cause))
    }

    /// When [`poll`](Self::poll) next has work to do, if anything is pending.
    ///
    /// Throttle windows reset lazily and never need a poll.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        [self.scroll.deadline(), self.structure.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// The requested display frame arrived: position the overlay for the current probe.
    ///
    /// Returns `true` if a transform was applied.
    pub fn frame(&mut self) -> bool {
        let probe = self.tracker.probe();
        self.render.frame(&probe, &mut self.overlay)
    }

    /// The current probe.
    pub fn probe(&self) -> ProbeRegion {
        self.tracker.probe()
    }

    /// The sector the next dispatch tick would test.
    pub fn sector(&self) -> Sector {
        self.dispatcher.sector(&self.tracker.probe())
    }

    /// The current candidate snapshot.
    pub fn candidates(&self) -> &CandidateSet<S::Target> {
        &self.candidates
    }

    /// The configuration this prefetcher was built with.
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }

    /// The target source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the target source.
    ///
    /// Changes are not observed until the next refresh; pair them with
    /// [`scroll`](Self::scroll) or [`structure_changed`](Self::structure_changed).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The prefetch sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutable access to the prefetch sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// The overlay.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Consume the prefetcher, returning the source, sink, and overlay.
    pub fn into_parts(self) -> (S, K, O) {
        (self.source, self.sink, self.overlay)
    }
}

impl<S, K, O> fmt::Debug for Prefetcher<S, K, O>
where
    S: TargetSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefetcher")
            .field("config", &self.config)
            .field("attached", &self.attached)
            .field("probe", &self.tracker.probe())
            .field("candidates", &self.candidates.len())
            .field("next_scroll_refresh", &self.scroll.deadline())
            .field("next_structure_refresh", &self.structure.deadline())
            .finish_non_exhaustive()
    }
}
