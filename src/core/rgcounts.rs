use std::collections::{BTreeMap, HashMap};

use crate::core::errors::Result;
use crate::core::flags::UNMAPPED;
use crate::core::source::{AlignmentSource, ReadGroupInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub mapped: u64,
    pub unmapped: u64,
    // Present iff a mapq threshold was supplied to the engine; observers rely
    // on absence meaning "not requested" rather than zero.
    pub above_mapq: Option<u64>,
}

// Mapped/unmapped tallies keyed by read group. Reads without an RG tag are
// pooled under a synthetic group named after their source.
pub struct ReadGroupCounts {
    tallies: BTreeMap<String, GroupTally>,
    metadata: HashMap<String, ReadGroupInfo>,
}

impl ReadGroupCounts {
    pub fn new<S: AlignmentSource>(sources: &mut [S], above_mapq: Option<u8>) -> Result<Self> {
        let mut tallies: BTreeMap<String, GroupTally> = BTreeMap::new();
        let mut metadata = HashMap::new();

        for src in sources.iter_mut() {
            for info in src.read_groups()? {
                metadata.insert(info.id.clone(), info);
            }

            let fallback = src.label().to_owned();
            src.scan_reads(&mut |read| {
                let group = read.group.clone().unwrap_or_else(|| fallback.clone());
                let tally = tallies
                    .entry(group)
                    .or_insert_with(|| GroupTally { above_mapq: above_mapq.map(|_| 0), ..Default::default() });

                if read.flags & UNMAPPED != 0 {
                    tally.unmapped += 1;
                } else {
                    tally.mapped += 1;
                    if let (Some(threshold), Some(above)) = (above_mapq, tally.above_mapq.as_mut()) {
                        if read.mapq > threshold {
                            *above += 1;
                        }
                    }
                }
            })?;
        }
        Ok(Self { tallies, metadata })
    }

    pub fn tallies(&self) -> &BTreeMap<String, GroupTally> {
        &self.tallies
    }

    pub fn metadata(&self) -> &HashMap<String, ReadGroupInfo> {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::stub::StubSource;
    use crate::core::source::ReadSummary;

    fn read(mapq: u8, flags: u16, group: Option<&str>) -> ReadSummary {
        ReadSummary::new(mapq, flags, group.map(|x| x.to_owned()))
    }

    #[test]
    fn tallies_by_group() {
        let mut sources = vec![StubSource {
            label: "sample".into(),
            reads: vec![
                read(30, 0, Some("grp1")),
                read(30, 16, Some("grp1")),
                read(0, 0x4, Some("grp1")),
                read(30, 0, Some("grp2")),
            ],
            ..Default::default()
        }];
        let counts = ReadGroupCounts::new(&mut sources, None).unwrap();

        assert_eq!(counts.tallies()["grp1"], GroupTally { mapped: 2, unmapped: 1, above_mapq: None });
        assert_eq!(counts.tallies()["grp2"], GroupTally { mapped: 1, unmapped: 0, above_mapq: None });
    }

    #[test]
    fn untagged_reads_fall_back_to_source_label() {
        let mut sources = vec![StubSource {
            label: "sample_no_rg".into(),
            reads: vec![read(30, 0, None), read(0, 0x4, None)],
            ..Default::default()
        }];
        let counts = ReadGroupCounts::new(&mut sources, None).unwrap();

        let tally = &counts.tallies()["sample_no_rg"];
        assert_eq!((tally.mapped, tally.unmapped), (1, 1));
    }

    #[test]
    fn above_mapq_present_only_when_requested() {
        let reads = vec![read(30, 0, None), read(10, 0, None), read(60, 0x4, None)];

        let mut sources = vec![StubSource { label: "s".into(), reads: reads.clone(), ..Default::default() }];
        let counts = ReadGroupCounts::new(&mut sources, None).unwrap();
        assert_eq!(counts.tallies()["s"].above_mapq, None);

        let mut sources = vec![StubSource { label: "s".into(), reads: reads.clone(), ..Default::default() }];
        let counts = ReadGroupCounts::new(&mut sources, Some(20)).unwrap();
        // only mapped reads are compared against the threshold
        assert_eq!(counts.tallies()["s"].above_mapq, Some(1));

        let mut sources = vec![StubSource { label: "s".into(), reads, ..Default::default() }];
        let counts = ReadGroupCounts::new(&mut sources, Some(254)).unwrap();
        assert_eq!(counts.tallies()["s"].above_mapq, Some(0));
    }

    #[test]
    fn totals_match_read_count() {
        let reads =
            vec![read(30, 0, Some("a")), read(30, 0, Some("b")), read(0, 0x4, None), read(30, 16, Some("a"))];
        let mut sources = vec![StubSource { label: "src".into(), reads: reads.clone(), ..Default::default() }];
        let counts = ReadGroupCounts::new(&mut sources, None).unwrap();

        let total: u64 = counts.tallies().values().map(|tally| tally.mapped + tally.unmapped).sum();
        assert_eq!(total, reads.len() as u64);
    }

    #[test]
    fn metadata_pass_through() {
        use crate::core::source::ReadGroupInfo;

        let info = ReadGroupInfo {
            id: "grp1".into(),
            platform: Some("454".into()),
            library: Some("lib1".into()),
            sample: Some("s1".into()),
        };
        let mut sources =
            vec![StubSource { label: "src".into(), groups: vec![info.clone()], ..Default::default() }];
        let counts = ReadGroupCounts::new(&mut sources, None).unwrap();

        assert_eq!(counts.metadata()["grp1"], info);
    }
}
