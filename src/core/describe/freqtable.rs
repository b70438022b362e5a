use std::collections::BTreeMap;

use super::{histogram, Describe, Distribution, DEFAULT_BINS};
use crate::core::errors::{Result, StatsError};

// Sparse table of non-negative integer observations (value -> occurrences).
// Observations are reconstructed from (key, count) pairs on demand; the table
// itself never shrinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    counts: BTreeMap<u64, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn increment(&mut self, key: u64) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&key, &count)| (key, count))
    }

    // 0-based position in the sorted multiset of observations.
    fn nth(&self, n: u64) -> u64 {
        debug_assert!(n < self.total);
        let mut seen = 0;
        for (&key, &count) in &self.counts {
            seen += count;
            if seen > n {
                return key;
            }
        }
        unreachable!()
    }
}

impl Describe for FrequencyTable {
    fn count(&self) -> u64 {
        self.total
    }

    fn sum(&self) -> f64 {
        self.counts.iter().map(|(&key, &count)| key as f64 * count as f64).sum()
    }

    fn min(&self) -> Result<f64> {
        self.counts.keys().next().map(|&key| key as f64).ok_or(StatsError::EmptyTable)
    }

    fn max(&self) -> Result<f64> {
        self.counts.keys().next_back().map(|&key| key as f64).ok_or(StatsError::EmptyTable)
    }

    fn average(&self) -> Result<f64> {
        match self.total {
            0 => Err(StatsError::EmptyTable),
            total => Ok(self.sum() / total as f64),
        }
    }

    fn median(&self) -> Result<f64> {
        match self.total {
            0 => Err(StatsError::EmptyTable),
            total if total % 2 == 1 => Ok(self.nth(total / 2) as f64),
            total => Ok((self.nth(total / 2 - 1) + self.nth(total / 2)) as f64 / 2.0),
        }
    }

    fn variance(&self) -> Result<f64> {
        // Population variance, i.e. divided by the number of observations
        let mean = self.average()?;
        let squares: f64 =
            self.counts.iter().map(|(&key, &count)| count as f64 * (key as f64 - mean).powi(2)).sum();
        Ok(squares / self.total as f64)
    }

    fn distribution(&self, bins: Option<usize>, min: Option<f64>, max: Option<f64>) -> Result<Distribution> {
        let (bins, observed) = (bins.unwrap_or(DEFAULT_BINS), (self.min()?, self.max()?));
        let (min, max) = (min.unwrap_or(observed.0), max.unwrap_or(observed.1));
        Ok(histogram(self.iter().map(|(key, count)| (key as f64, count)), bins, min, max))
    }
}
