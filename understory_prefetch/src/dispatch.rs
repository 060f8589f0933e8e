// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefetch dispatch: intersect the probe sector with the candidate set on a throttled cadence.
//!
//! ## Semantics
//!
//! Each permitted tick reads the probe snapshot current at that instant, builds a
//! [`Sector`] from it, and hands every candidate whose rectangle midpoint falls inside the
//! sector to the [`PrefetchSink`], once per tick.
//!
//! There is no dedup across ticks: a candidate that stays in the sector is prefetched again on
//! every permitted tick. Sinks are expected to make repeat prefetches cheap (for example by
//! checking a cache first).
//!
//! Ticks that the throttle drops touch nothing.

use alloc::vec::Vec;
use core::time::Duration;

use understory_schedule::{BurstThrottle, Timestamp};

use crate::candidates::{Candidate, CandidateSet};
use crate::motion::ProbeRegion;
use crate::sector::Sector;

/// Receives prefetch actions for sector hits.
///
/// Both calls are fire-and-forget; the dispatcher neither observes nor retries failures.
pub trait PrefetchSink<T> {
    /// Warm the resource behind `target`. Called once per hit per tick.
    fn prefetch(&mut self, target: &T);

    /// Optional visual feedback for a hit (for example dimming the link).
    fn mark_hit(&mut self, _target: &T) {}
}

impl<T, F: FnMut(&T)> PrefetchSink<T> for F {
    fn prefetch(&mut self, target: &T) {
        self(target);
    }
}

/// What a dispatch tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Tracking is detached; the event was dropped before reaching the dispatcher.
    Detached,
    /// The throttle dropped the tick.
    Throttled,
    /// The tick ran and prefetched this many hits.
    Fired {
        /// Number of candidates inside the sector.
        hits: usize,
    },
}

impl DispatchOutcome {
    /// Hits prefetched by this tick; zero when nothing ran.
    pub fn hits(self) -> usize {
        match self {
            Self::Detached | Self::Throttled => 0,
            Self::Fired { hits } => hits,
        }
    }
}

/// Candidates whose midpoint lies inside `sector`, in candidate order.
pub fn sector_hits<'a, T>(
    sector: &Sector,
    candidates: &'a CandidateSet<T>,
) -> impl Iterator<Item = &'a Candidate<T>> + use<'a, T> {
    let sector = *sector;
    candidates
        .iter()
        .filter(move |c| sector.contains(c.midpoint()))
}

/// Rate-limited sector hit testing.
#[derive(Clone, Debug)]
pub struct PrefetchDispatcher {
    throttle: BurstThrottle,
    proximity: f64,
    coverage: f64,
}

impl PrefetchDispatcher {
    /// Create a dispatcher permitting `burst` ticks per `interval`.
    ///
    /// `proximity` is the sector radius and `coverage` its angular width in radians.
    pub fn new(interval: Duration, burst: u32, proximity: f64, coverage: f64) -> Self {
        Self {
            throttle: BurstThrottle::new(interval, burst),
            proximity,
            coverage,
        }
    }

    /// Sector radius.
    pub fn proximity(&self) -> f64 {
        self.proximity
    }

    /// Sector width in radians.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// The sector a tick would test for `probe`.
    pub fn sector(&self, probe: &ProbeRegion) -> Sector {
        probe.sector(self.proximity, self.coverage)
    }

    /// When the throttle window resets, if a reset is pending.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.throttle.reset_deadline()
    }

    /// Fire the throttle reset if due.
    pub fn poll(&mut self, now: Timestamp) {
        self.throttle.poll(now);
    }

    /// Cancel the pending throttle reset.
    pub fn clear(&mut self) {
        self.throttle.clear();
    }

    /// Restore a fresh throttle window.
    pub(crate) fn rearm(&mut self) {
        self.throttle = BurstThrottle::new(self.throttle.interval(), self.throttle.max_runs());
    }

    /// Run one tick at `now` if the throttle permits.
    pub fn tick<T, K>(
        &mut self,
        now: Timestamp,
        probe: &ProbeRegion,
        candidates: &CandidateSet<T>,
        sink: &mut K,
    ) -> DispatchOutcome
    where
        K: PrefetchSink<T> + ?Sized,
    {
        if !self.throttle.run(now) {
            log::trace!("dispatch tick throttled");
            return DispatchOutcome::Throttled;
        }
        let sector = self.sector(probe);
        let hits: Vec<&Candidate<T>> = sector_hits(&sector, candidates).collect();
        for c in &hits {
            sink.prefetch(&c.target);
            sink.mark_hit(&c.target);
        }
        if !hits.is_empty() {
            log::debug!(
                "prefetched {} of {} candidates (direction {:.3})",
                hits.len(),
                candidates.len(),
                probe.direction
            );
        }
        DispatchOutcome::Fired { hits: hits.len() }
    }
}
