use crate::core::describe::FrequencyTable;
use crate::core::errors::Result;
use crate::core::source::AlignmentSource;

// Depth distribution over pileup columns: key = number of reads overlapping
// the column, count = number of columns with that depth.
pub struct CoverageCounter {
    depths: FrequencyTable,
}

impl CoverageCounter {
    pub fn new<S: AlignmentSource>(sources: &mut [S]) -> Result<Self> {
        let mut depths = FrequencyTable::new();
        for src in sources.iter_mut() {
            src.scan_pileup(&mut |mapqs| depths.increment(mapqs.len() as u64))?;
        }
        Ok(Self { depths })
    }

    pub fn depths(&self) -> &FrequencyTable {
        &self.depths
    }
}

// Threshold-aware variant. Per-column read qualities are cached in an arena
// during the one streaming pass; every threshold query is a pure filter over
// the arena and never touches the sources again.
pub struct GenomeCoverage {
    arena: Vec<Vec<u8>>,
    genome: u64,
}

impl GenomeCoverage {
    pub fn new<S: AlignmentSource>(sources: &mut [S]) -> Result<Self> {
        let genome = sources.first().map(|src| src.references().iter().map(|r| r.length).sum()).unwrap_or(0);

        let mut arena = Vec::new();
        for src in sources.iter_mut() {
            src.scan_pileup(&mut |mapqs| arena.push(mapqs.to_vec()))?;
        }
        Ok(Self { arena, genome })
    }

    // Depth distribution counting only reads with quality >= mapq. Columns
    // whose reads are all filtered out stay in the table at depth zero, so
    // every threshold covers the same number of columns.
    pub fn at_threshold(&self, mapq: u8) -> FrequencyTable {
        let mut depths = FrequencyTable::new();
        for column in &self.arena {
            depths.increment(column.iter().filter(|&&quality| quality >= mapq).count() as u64);
        }
        depths
    }

    // Reference positions that no pileup column ever touched.
    pub fn uncovered(&self) -> u64 {
        self.genome.saturating_sub(self.arena.len() as u64)
    }
}
