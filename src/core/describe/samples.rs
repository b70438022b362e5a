use derive_more::Constructor;

use super::{histogram, Describe, Distribution};
use crate::core::errors::{Result, StatsError};

// Dense counterpart of FrequencyTable: one value per reference sequence, in
// catalogue order, fixed at construction. The optional ceiling pins the
// histogram axis to a known maximum instead of whatever was observed.
#[derive(Constructor, Debug, Clone, PartialEq)]
pub struct SampleVector {
    values: Vec<f64>,
    bins: usize,
    ceiling: Option<f64>,
}

impl SampleVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Describe for SampleVector {
    fn count(&self) -> u64 {
        self.values.len() as u64
    }

    fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn min(&self) -> Result<f64> {
        self.values.iter().copied().reduce(f64::min).ok_or(StatsError::EmptyTable)
    }

    fn max(&self) -> Result<f64> {
        self.values.iter().copied().reduce(f64::max).ok_or(StatsError::EmptyTable)
    }

    fn average(&self) -> Result<f64> {
        match self.values.len() {
            0 => Err(StatsError::EmptyTable),
            len => Ok(self.sum() / len as f64),
        }
    }

    fn median(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(StatsError::EmptyTable);
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            Ok(sorted[mid])
        } else {
            Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
        }
    }

    fn variance(&self) -> Result<f64> {
        let mean = self.average()?;
        let squares: f64 = self.values.iter().map(|value| (value - mean).powi(2)).sum();
        Ok(squares / self.values.len() as f64)
    }

    fn distribution(&self, bins: Option<usize>, min: Option<f64>, max: Option<f64>) -> Result<Distribution> {
        let bins = bins.unwrap_or(self.bins);
        let min = min.map(Ok).unwrap_or_else(|| self.min())?;
        let max = max.or(self.ceiling).map(Ok).unwrap_or_else(|| self.max())?;
        Ok(histogram(self.values.iter().map(|&value| (value, 1)), bins, min, max))
    }
}
