// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate set: the navigable targets currently considered visible.
//!
//! ## Overview
//!
//! The set is a cheap-to-query snapshot. It is rebuilt wholesale by [`CandidateSet::refresh`]
//! from a [`TargetSource`] and never patched in between, so rectangles are only as fresh as the
//! last refresh.
//!
//! Refreshes are driven by the host's structural-change and scroll signals (debounced by
//! [`Prefetcher`](crate::Prefetcher)) and by attach, not by pointer motion.
//!
//! ## Visibility
//!
//! [`VisibilityTest::TopLeft`] keeps a target when its top-left corner lies strictly inside the
//! viewport. It is a known approximation: a link whose corner is scrolled off the top is dropped
//! even if most of it is on screen. [`VisibilityTest::Intersects`] keeps every target whose
//! rectangle overlaps the viewport.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

/// Enumerates navigable targets and reports their current geometry.
///
/// Implemented by the host (a DOM bridge, a widget tree, a box tree adapter).
pub trait TargetSource {
    /// Handle to a navigable target (element reference, URL, node id).
    type Target: Clone;

    /// All currently known navigable targets, visible or not.
    fn targets(&self) -> Vec<Self::Target>;

    /// The target's bounding rectangle in viewport coordinates, as of now.
    fn bounds(&self, target: &Self::Target) -> Rect;

    /// The viewport size; the viewport spans `(0, 0)` to `(width, height)`.
    fn viewport(&self) -> Size;
}

/// How a target's rectangle is tested against the viewport during a refresh.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisibilityTest {
    /// Top-left corner strictly inside the viewport.
    #[default]
    TopLeft,
    /// Rectangle overlaps the viewport with positive area.
    Intersects,
}

impl VisibilityTest {
    /// Whether `bounds` counts as visible in a viewport of `viewport` size.
    pub fn is_visible(self, bounds: Rect, viewport: Size) -> bool {
        match self {
            Self::TopLeft => {
                bounds.y0 > 0.0
                    && bounds.y0 < viewport.height
                    && bounds.x0 > 0.0
                    && bounds.x0 < viewport.width
            }
            Self::Intersects => {
                bounds.x0 < viewport.width
                    && bounds.x1 > 0.0
                    && bounds.y0 < viewport.height
                    && bounds.y1 > 0.0
            }
        }
    }
}

bitflags::bitflags! {
    /// Why a refresh ran. Several causes can coalesce into one refresh.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RefreshCause: u8 {
        /// Initial attach.
        const ATTACH    = 0b0000_0001;
        /// Navigable targets were added or removed.
        const STRUCTURE = 0b0000_0010;
        /// The viewport scrolled.
        const SCROLL    = 0b0000_0100;
    }
}

/// A visible navigable target and its rectangle at refresh time.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<T> {
    /// The host's handle.
    pub target: T,
    /// Viewport-space rectangle captured by the last refresh.
    pub bounds: Rect,
}

impl<T> Candidate<T> {
    /// Midpoint of the captured rectangle; the point tested against the probe sector.
    pub fn midpoint(&self) -> Point {
        self.bounds.center()
    }
}

/// Summary of one refresh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RefreshReport {
    /// Targets enumerated by the source.
    pub enumerated: usize,
    /// Targets kept as candidates.
    pub kept: usize,
    /// Causes coalesced into this refresh.
    pub cause: RefreshCause,
}

/// The current candidate snapshot.
///
/// Only [`CandidateSet::refresh`] writes it; dispatch reads it.
#[derive(Clone, Debug)]
pub struct CandidateSet<T> {
    candidates: Vec<Candidate<T>>,
    visibility: VisibilityTest,
    generation: u64,
}

impl<T> Default for CandidateSet<T> {
    fn default() -> Self {
        Self::new(VisibilityTest::default())
    }
}

impl<T> CandidateSet<T> {
    /// Create an empty set using `visibility` for refreshes.
    pub fn new(visibility: VisibilityTest) -> Self {
        Self {
            candidates: Vec::new(),
            visibility,
            generation: 0,
        }
    }

    /// The visibility test applied on refresh.
    pub fn visibility(&self) -> VisibilityTest {
        self.visibility
    }

    /// Current candidates in source order.
    pub fn as_slice(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// Iterate over current candidates.
    pub fn iter(&self) -> core::slice::Iter<'_, Candidate<T>> {
        self.candidates.iter()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Incremented by every refresh; lets readers notice a replaced snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop every candidate.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.generation += 1;
    }

    /// Rebuild the set from `source`, replacing the previous snapshot entirely.
    pub fn refresh<S>(&mut self, source: &S, cause: RefreshCause) -> RefreshReport
    where
        S: TargetSource<Target = T>,
    {
        let viewport = source.viewport();
        let targets = source.targets();
        let enumerated = targets.len();
        let visibility = self.visibility;
        self.candidates = targets
            .into_iter()
            .filter_map(|target| {
                let bounds = source.bounds(&target);
                visibility
                    .is_visible(bounds, viewport)
                    .then_some(Candidate { target, bounds })
            })
            .collect();
        self.generation += 1;
        let report = RefreshReport {
            enumerated,
            kept: self.candidates.len(),
            cause,
        };
        log::debug!(
            "refreshed candidates ({:?}): kept {} of {}",
            cause,
            report.kept,
            report.enumerated
        );
        report
    }
}

impl<'a, T> IntoIterator for &'a CandidateSet<T> {
    type Item = &'a Candidate<T>;
    type IntoIter = core::slice::Iter<'a, Candidate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
