use std::collections::HashMap;

use itertools::izip;

use crate::core::describe::FrequencyTable;
use crate::core::errors::Result;
use crate::core::flags::{decompose, FLAGS};
use crate::core::source::AlignmentSource;

// Single pass over all reads: mapping quality distribution + how often each
// catalogue flag bit was set.
pub struct ReadStats {
    mapqs: FrequencyTable,
    flags: Vec<u64>,
}

impl ReadStats {
    pub fn new<S: AlignmentSource>(sources: &mut [S]) -> Result<Self> {
        let mut mapqs = FrequencyTable::new();
        let mut flags = vec![0u64; FLAGS.len()];

        for src in sources.iter_mut() {
            src.scan_reads(&mut |read| {
                mapqs.increment(read.mapq as u64);
                for ind in decompose(read.flags) {
                    flags[ind] += 1;
                }
            })?;
        }
        Ok(Self { mapqs, flags })
    }

    pub fn mapqs(&self) -> &FrequencyTable {
        &self.mapqs
    }

    pub fn flag_counts(&self) -> HashMap<&'static str, u64> {
        izip!(&FLAGS, &self.flags).map(|(&(_, label), &count)| (label, count)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::describe::Describe;
    use crate::core::source::stub::StubSource;
    use crate::core::source::ReadSummary;

    fn read(mapq: u8, flags: u16) -> ReadSummary {
        ReadSummary::new(mapq, flags, None)
    }

    #[test]
    fn mapq_table() {
        let mut sources = vec![StubSource {
            reads: vec![read(28, 0), read(149, 16), read(30, 0), read(28, 0)],
            ..Default::default()
        }];
        let stats = ReadStats::new(&mut sources).unwrap();

        assert_eq!(stats.mapqs().count(), 4);
        assert_eq!(stats.mapqs().min().unwrap(), 28.0);
        assert_eq!(stats.mapqs().max().unwrap(), 149.0);
    }

    #[test]
    fn flag_occurrences() {
        let mut sources = vec![StubSource {
            reads: vec![read(30, 0x1 | 0x2), read(30, 0x1), read(0, 0x4), read(30, 0)],
            ..Default::default()
        }];
        let counts = ReadStats::new(&mut sources).unwrap().flag_counts();

        assert_eq!(counts["is_paired"], 2);
        assert_eq!(counts["is_proper_pair"], 1);
        assert_eq!(counts["is_unmapped"], 1);
        assert_eq!(counts["is_duplicate"], 0);
        assert_eq!(counts.len(), FLAGS.len());
    }

    #[test]
    fn reads_pooled_across_sources() {
        let mut sources = vec![
            StubSource { reads: vec![read(10, 0), read(20, 0)], ..Default::default() },
            StubSource { reads: vec![read(30, 0)], ..Default::default() },
        ];
        let stats = ReadStats::new(&mut sources).unwrap();
        assert_eq!(stats.mapqs().count(), 3);
    }
}
