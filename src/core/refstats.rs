use bio_types::genome::Interval;
use derive_getters::Getters;
use itertools::{izip, Itertools};
use serde::Serialize;

use crate::core::describe::{FrequencyTable, SampleVector};
use crate::core::errors::{Result, StatsError};
use crate::core::source::AlignmentSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRecord {
    pub reference: String,
    pub length: u64,
    pub reads: u64,
    pub rpkm: f64,
}

// Per-reference abundance over one or more sources: raw read counts turned
// into RPKM (reads / length in bases, rescaled by total mapped reads in
// millions), plus a reference-length table for quick sanity checks.
#[derive(Getters)]
pub struct ReferenceStats {
    rpkms: SampleVector,
    lengths: FrequencyTable,
    most_abundant: Vec<ReferenceRecord>,
}

impl ReferenceStats {
    pub fn new<S: AlignmentSource>(
        sources: &mut [S],
        nmost: usize,
        max_rpkm: Option<f64>,
        bins: usize,
    ) -> Result<Self> {
        assert!(!sources.is_empty(), "At least one alignment source is required");

        let catalogue = sources[0].references().to_vec();
        if !sources.iter().map(|src| src.references()).all_equal() {
            return Err(StatsError::InconsistentReferences);
        }

        let mut lengths = FrequencyTable::new();
        let mut counts = Vec::with_capacity(catalogue.len());
        for reference in &catalogue {
            let region = Interval::new(reference.name.clone(), 0..reference.length);
            let mut count = 0;
            for src in sources.iter_mut() {
                count += src.count_overlapping(&region)?;
            }
            counts.push(count);
            lengths.increment(reference.length);
        }

        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Err(StatsError::NoReads);
        }

        let millions = total as f64 / 1e6;
        let rpkms =
            izip!(&catalogue, &counts).map(|(r, &count)| count as f64 / r.length as f64 / millions).collect_vec();

        let mut records = izip!(catalogue, counts, &rpkms)
            .map(|(r, reads, &rpkm)| ReferenceRecord { reference: r.name, length: r.length, reads, rpkm })
            .collect_vec();
        // Stable sort keeps the catalogue order for equal RPKMs
        records.sort_by(|a, b| b.rpkm.partial_cmp(&a.rpkm).unwrap());
        records.truncate(nmost);

        Ok(Self { rpkms: SampleVector::new(rpkms, bins, max_rpkm), lengths, most_abundant: records })
    }
}
