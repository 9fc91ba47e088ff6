/// Weighted value selection for a single axis.

use rand::Rng;
use std::collections::BTreeMap;

use crate::schema::axis::Axis;

/// Running weight totals over an axis's domain, in declaration order.
///
/// Built once by the registry so a draw only needs one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeWeights {
    totals: Vec<f64>,
}

impl CumulativeWeights {
    /// Build the cumulative list for `axis`. Values missing from `table`
    /// weigh 1.0.
    pub fn new(axis: &Axis, table: &BTreeMap<String, f64>) -> Self {
        let mut running = 0.0;
        let totals = axis
            .values
            .iter()
            .map(|value| {
                running += table.get(value).copied().unwrap_or(1.0);
                running
            })
            .collect();
        Self { totals }
    }

    pub fn total(&self) -> f64 {
        self.totals.last().copied().unwrap_or(0.0)
    }

    /// Index of the first entry whose cumulative weight exceeds `target`.
    fn index_for(&self, target: f64) -> usize {
        self.totals
            .iter()
            .position(|&c| c > target)
            .unwrap_or(self.totals.len().saturating_sub(1))
    }
}

/// An axis paired with its weight distribution, as handed out by the registry.
#[derive(Debug, Clone, Copy)]
pub struct AxisDistribution<'a> {
    pub axis: &'a Axis,
    pub weights: Option<&'a CumulativeWeights>,
}

/// Draws one value from an axis. Holds no state between calls.
pub struct WeightedSelector;

impl WeightedSelector {
    /// Select a value from `dist`.
    ///
    /// Unweighted axes take a single uniform index draw. Weighted axes draw a
    /// fraction in `[0, 1)` and pick the first value whose cumulative weight
    /// exceeds `fraction * total`. The result depends only on the rng stream
    /// position and the axis configuration.
    pub fn select<'a, R: Rng + ?Sized>(dist: &AxisDistribution<'a>, rng: &mut R) -> &'a str {
        let values = &dist.axis.values;
        let idx = match dist.weights {
            None => rng.gen_range(0..values.len()),
            Some(weights) => {
                let fraction: f64 = rng.gen();
                weights.index_for(fraction * weights.total())
            }
        };
        values[idx].as_str()
    }
}
