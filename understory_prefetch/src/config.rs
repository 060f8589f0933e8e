// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static configuration supplied when constructing a [`Prefetcher`](crate::Prefetcher).

use core::time::Duration;

use crate::candidates::VisibilityTest;
use crate::trig::deg_to_rad;

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Proximity must be finite and positive.
    #[error("proximity must be finite and greater than zero, got {0}")]
    InvalidProximity(f64),
    /// Coverage must be finite and in `(0, 360]` degrees.
    #[error("coverage must be in (0, 360] degrees, got {0}")]
    InvalidCoverage(f64),
    /// A burst of zero would never permit a call.
    #[error("burst size must be at least 1")]
    ZeroBurst,
}

/// What happens to the probe when tracking detaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetachPolicy {
    /// Reset to [`ProbeRegion::IDLE`](crate::motion::ProbeRegion::IDLE).
    #[default]
    SnapToIdle,
    /// Keep the last probe and previous position for the next attach.
    FreezeLast,
}

/// Prefetcher configuration.
///
/// ```
/// use core::time::Duration;
/// use understory_prefetch::PrefetchConfig;
///
/// let config = PrefetchConfig::default()
///     .with_proximity(300.0)
///     .with_coverage(45.0)
///     .with_dispatch_interval(Duration::from_millis(50));
/// assert!(config.validate().is_ok());
/// assert!(PrefetchConfig::default().with_coverage(0.0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrefetchConfig {
    /// Sector radius in viewport units.
    pub proximity: f64,
    /// Sector angular width in degrees.
    pub coverage: f64,
    /// Whether to drive the probe overlay.
    pub show_probe_area: bool,
    /// Motion sampling window; one pointer sample is accepted per window.
    pub sample_interval: Duration,
    /// Dispatch throttle window.
    pub dispatch_interval: Duration,
    /// Dispatch ticks permitted per window.
    pub dispatch_burst: u32,
    /// Quiet period before a scroll refreshes candidates.
    pub scroll_debounce: Duration,
    /// Quiet period before a structural change refreshes candidates.
    pub structure_debounce: Duration,
    /// Viewport visibility test used by candidate refreshes.
    pub visibility: VisibilityTest,
    /// Probe behaviour on detach.
    pub detach: DetachPolicy,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            proximity: 250.0,
            coverage: 60.0,
            show_probe_area: false,
            sample_interval: Duration::from_millis(10),
            dispatch_interval: Duration::from_millis(100),
            dispatch_burst: 1,
            scroll_debounce: Duration::from_millis(100),
            structure_debounce: Duration::from_millis(50),
            visibility: VisibilityTest::TopLeft,
            detach: DetachPolicy::SnapToIdle,
        }
    }
}

impl PrefetchConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.proximity.is_finite() || self.proximity <= 0.0 {
            return Err(ConfigError::InvalidProximity(self.proximity));
        }
        if !self.coverage.is_finite() || self.coverage <= 0.0 || self.coverage > 360.0 {
            return Err(ConfigError::InvalidCoverage(self.coverage));
        }
        if self.dispatch_burst == 0 {
            return Err(ConfigError::ZeroBurst);
        }
        Ok(())
    }

    /// Coverage in radians.
    pub fn coverage_radians(&self) -> f64 {
        deg_to_rad(self.coverage)
    }

    /// Set [`proximity`](Self::proximity).
    #[must_use]
    pub fn with_proximity(mut self, proximity: f64) -> Self {
        self.proximity = proximity;
        self
    }

    /// Set [`coverage`](Self::coverage) in degrees.
    #[must_use]
    pub fn with_coverage(mut self, degrees: f64) -> Self {
        self.coverage = degrees;
        self
    }

    /// Set [`show_probe_area`](Self::show_probe_area).
    #[must_use]
    pub fn with_probe_area(mut self, show: bool) -> Self {
        self.show_probe_area = show;
        self
    }

    /// Set [`sample_interval`](Self::sample_interval).
    #[must_use]
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Set [`dispatch_interval`](Self::dispatch_interval).
    #[must_use]
    pub fn with_dispatch_interval(mut self, interval: Duration) -> Self {
        self.dispatch_interval = interval;
        self
    }

    /// Set [`dispatch_burst`](Self::dispatch_burst).
    #[must_use]
    pub fn with_dispatch_burst(mut self, burst: u32) -> Self {
        self.dispatch_burst = burst;
        self
    }

    /// Set [`scroll_debounce`](Self::scroll_debounce).
    #[must_use]
    pub fn with_scroll_debounce(mut self, delay: Duration) -> Self {
        self.scroll_debounce = delay;
        self
    }

    /// Set [`structure_debounce`](Self::structure_debounce).
    #[must_use]
    pub fn with_structure_debounce(mut self, delay: Duration) -> Self {
        self.structure_debounce = delay;
        self
    }

    /// Set [`visibility`](Self::visibility).
    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityTest) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set [`detach`](Self::detach).
    #[must_use]
    pub fn with_detach_policy(mut self, policy: DetachPolicy) -> Self {
        self.detach = policy;
        self
    }
}
