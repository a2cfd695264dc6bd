//! Contingency tables aggregating role tallies across many fusion trees.
//!
//! Each selected seed (prolific node or singleton root) contributes one
//! sample per role split: the cell indexed by its two member counts gets a
//! count increment and the combined growth added to its sum. Averages and
//! percentages are derived, never accumulated.

use crate::seed::SeedRoles;
use ndarray::Array2;

/// One count/sum table pair with derived averages and percentages
#[derive(Clone, Debug)]
pub struct ContingencyTable {
    /// Samples per cell
    pub count: Array2<u64>,
    /// Combined growth per cell
    pub sum: Array2<i64>,
}

impl ContingencyTable {
    fn new(range: usize) -> Self {
        Self {
            count: Array2::zeros((range, range)),
            sum: Array2::zeros((range, range)),
        }
    }

    fn record(&mut self, row: usize, col: usize, growth: i64) -> bool {
        let range = self.count.nrows();
        if row >= range || col >= range {
            return false;
        }
        self.count[[row, col]] += 1;
        self.sum[[row, col]] += growth;
        true
    }

    /// Mean growth per cell (0 for cells with no samples)
    pub fn averages(&self) -> Array2<f64> {
        let range = self.count.nrows();
        let mut avg = Array2::zeros((range, range));
        for row in 0..range {
            for col in 0..range {
                let count = self.count[[row, col]];
                if count > 0 {
                    avg[[row, col]] = self.sum[[row, col]] as f64 / count as f64;
                }
            }
        }
        avg
    }

    /// Fraction of all samples landing in each cell
    pub fn percentages(&self, samples: u64) -> Array2<f64> {
        if samples == 0 {
            return Array2::zeros(self.count.dim());
        }
        self.count.mapv(|c| c as f64 / samples as f64)
    }
}

/// The three role-split tables accumulated over selected seeds.
///
/// Row/column conventions follow the recorded tallies: management indexes
/// `[managers, workers]`, mutualism `[outsiders, insiders]`, interaction
/// `[soloists, ensembles]`. Tables are `(max_parts + 1)` square so member
/// counts from 0 to `max_parts` inclusive are representable.
#[derive(Clone, Debug)]
pub struct RoleTables {
    pub management: ContingencyTable,
    pub mutualism: ContingencyTable,
    pub interaction: ContingencyTable,
    samples: u64,
    range: usize,
}

impl RoleTables {
    /// Create empty tables sized for seeds of up to `max_parts` parts
    pub fn new(max_parts: usize) -> Self {
        let range = max_parts + 1;
        Self {
            management: ContingencyTable::new(range),
            mutualism: ContingencyTable::new(range),
            interaction: ContingencyTable::new(range),
            samples: 0,
            range,
        }
    }

    /// Fold one selected seed's tallies into all three tables.
    ///
    /// A tally whose member counts exceed the table range cannot be
    /// indexed; the whole sample is skipped and reported to the caller.
    pub fn record(&mut self, roles: &SeedRoles) -> bool {
        let counts = [
            roles.managers,
            roles.workers,
            roles.outsiders,
            roles.insiders,
            roles.soloists,
            roles.ensembles,
        ];
        if counts.iter().any(|&c| c as usize >= self.range) {
            log::warn!(
                "role tally exceeds table range {}: skipping sample",
                self.range
            );
            return false;
        }

        self.management.record(
            roles.managers as usize,
            roles.workers as usize,
            roles.manager_growth + roles.worker_growth,
        );
        self.mutualism.record(
            roles.outsiders as usize,
            roles.insiders as usize,
            roles.outsider_growth + roles.insider_growth,
        );
        self.interaction.record(
            roles.soloists as usize,
            roles.ensembles as usize,
            roles.soloist_growth + roles.ensemble_growth,
        );
        self.samples += 1;
        true
    }

    /// Number of samples folded in
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Table side length (`max_parts + 1`)
    pub fn range(&self) -> usize {
        self.range
    }
}
