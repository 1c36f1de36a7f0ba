//! Bookkeeping shared by the collection pipelines.
//!
//! A run is split into units (one city for categories, one catalog section
//! for products). A failed unit is logged and counted; the run as a whole
//! fails only when every unit failed.

/// Counts for one unit of work.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct UnitStats {
    /// Records written to the output.
    pub written: usize,
    /// Items dropped without error (no slug, unsuccessful response).
    pub skipped: usize,
    /// Items that failed to fetch or normalize.
    pub failed: usize,
}

/// Running totals across all units of a collection run.
#[derive(Debug, Default)]
pub(super) struct RunTally {
    units: usize,
    failed_units: usize,
    totals: UnitStats,
}

impl RunTally {
    pub(super) fn new(units: usize) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    pub(super) fn unit_succeeded(&mut self, stats: UnitStats) {
        self.totals.written = self.totals.written.saturating_add(stats.written);
        self.totals.skipped = self.totals.skipped.saturating_add(stats.skipped);
        self.totals.failed = self.totals.failed.saturating_add(stats.failed);
    }

    pub(super) fn unit_failed(&mut self, unit: &str, error: &anyhow::Error) {
        tracing::error!(unit = %unit, error = %format!("{error:#}"), "unit failed, continuing");
        self.failed_units += 1;
    }

    /// Final totals, or an error when every unit failed.
    ///
    /// # Errors
    ///
    /// Returns an error if there was at least one unit and all of them failed.
    pub(super) fn finish(self, unit_kind: &str) -> anyhow::Result<UnitStats> {
        if self.failed_units > 0 {
            tracing::warn!(
                failed_units = self.failed_units,
                total_units = self.units,
                "some {unit_kind} failed during collection"
            );
        }
        if self.units > 0 && self.failed_units == self.units {
            anyhow::bail!("all {} {unit_kind} failed collection", self.failed_units);
        }
        Ok(self.totals)
    }
}
