use bio_types::genome::Interval;
use derive_more::Constructor;
use serde::Serialize;

use crate::core::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Reference {
    pub name: String,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct ReadSummary {
    pub mapq: u8,
    pub flags: u16,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadGroupInfo {
    pub id: String,
    pub platform: Option<String>,
    pub library: Option<String>,
    pub sample: Option<String>,
}

// Seam between the engines and the alignment reader. Engines make exactly one
// pass per statistic and never hold onto the visitor arguments.
pub trait AlignmentSource {
    // Source identity (file stem); names the synthetic read group of reads
    // that carry no RG tag.
    fn label(&self) -> &str;

    // Reference catalogue in header order.
    fn references(&self) -> &[Reference];

    // Number of reads overlapping the region.
    fn count_overlapping(&mut self, region: &Interval) -> Result<u64>;

    // One pass over all reads, mapped and unmapped.
    fn scan_reads(&mut self, visitor: &mut dyn FnMut(&ReadSummary)) -> Result<()>;

    // One pass over pileup columns; the visitor receives the mapping quality
    // of every read overlapping the column.
    fn scan_pileup(&mut self, visitor: &mut dyn FnMut(&[u8])) -> Result<()>;

    // Header @RG entries.
    fn read_groups(&self) -> Result<Vec<ReadGroupInfo>>;
}
