use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bio_types::genome::{AbstractInterval, Interval};
use itertools::{izip, Itertools};
use rust_htslib::bam::record::Aux;
use rust_htslib::bam::{Header, IndexedReader, Read, Reader, Record};
use serde::Serialize;

use crate::core::errors::Result;
use crate::core::source::{AlignmentSource, ReadGroupInfo, ReadSummary, Reference};

// AlignmentSource over an indexed BAM file. Region counts go through the
// index; full scans open a fresh sequential cursor so that engines sharing a
// source never disturb each other.
pub struct HtsSource {
    path: PathBuf,
    label: String,
    references: Vec<Reference>,
    indexed: IndexedReader,
}

impl HtsSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let indexed = IndexedReader::from_path(&path)?;

        let header = indexed.header();
        let references = (0..header.target_count())
            .map(|tid| {
                let name = String::from_utf8_lossy(header.tid2name(tid)).to_string();
                let length = header.target_len(tid)
                    .unwrap_or_else(|| panic!("Missing length for {} in {}", name, path.display()));
                Reference::new(name, length)
            })
            .collect();

        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { path, label, references, indexed })
    }
}

impl AlignmentSource for HtsSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn references(&self) -> &[Reference] {
        &self.references
    }

    fn count_overlapping(&mut self, region: &Interval) -> Result<u64> {
        self.indexed.fetch((region.contig(), region.range().start, region.range().end))?;

        let mut count = 0;
        let mut record = Record::new();
        while let Some(r) = self.indexed.read(&mut record) {
            r?;
            count += 1;
        }
        Ok(count)
    }

    fn scan_reads(&mut self, visitor: &mut dyn FnMut(&ReadSummary)) -> Result<()> {
        let mut reader = Reader::from_path(&self.path)?;

        let mut record = Record::new();
        while let Some(r) = reader.read(&mut record) {
            r?;
            let group = match record.aux(b"RG") {
                Ok(Aux::String(id)) => Some(id.to_owned()),
                _ => None,
            };
            visitor(&ReadSummary::new(record.mapq(), record.flags(), group));
        }
        Ok(())
    }

    fn scan_pileup(&mut self, visitor: &mut dyn FnMut(&[u8])) -> Result<()> {
        let mut reader = Reader::from_path(&self.path)?;

        for column in reader.pileup() {
            let column = column?;
            let mapqs = column.alignments().map(|aln| aln.record().mapq()).collect_vec();
            visitor(&mapqs);
        }
        Ok(())
    }

    fn read_groups(&self) -> Result<Vec<ReadGroupInfo>> {
        let header = Header::from_template(self.indexed.header()).to_hashmap();

        let mut groups = Vec::new();
        if let Some(records) = header.get("RG") {
            for rg in records {
                groups.push(ReadGroupInfo {
                    id: rg.get("ID").cloned().unwrap_or_default(),
                    platform: rg.get("PL").cloned(),
                    library: rg.get("LB").cloned(),
                    sample: rg.get("SM").cloned(),
                });
            }
        }
        Ok(groups)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexCounts {
    pub reference: Option<String>,
    pub length: Option<u64>,
    pub mapped: u64,
    pub unmapped: u64,
}

// idxstats-style per-reference counts straight from the BAI index, no record
// streaming. Reads placed on no reference at all are not recoverable through
// this API, hence no trailing null row.
pub fn index_counts(path: impl AsRef<Path>) -> Result<Vec<IndexCounts>> {
    let mut reader = IndexedReader::from_path(path.as_ref())?;

    let references = (0..reader.header().target_count())
        .map(|tid| {
            let name = String::from_utf8_lossy(reader.header().tid2name(tid)).to_string();
            (name, reader.header().target_len(tid))
        })
        .collect_vec();

    let stats = reader.index_stats()?;
    Ok(izip!(references, stats)
        .map(|((reference, length), (_, _, mapped, unmapped))| IndexCounts {
            reference: Some(reference),
            length,
            mapped,
            unmapped,
        })
        .collect())
}

// The same counts pooled over several files and keyed by reference name.
pub fn index_counts_by_reference(paths: &[impl AsRef<Path>]) -> Result<HashMap<String, IndexCounts>> {
    let mut pooled: HashMap<String, IndexCounts> = HashMap::new();
    for path in paths {
        for row in index_counts(path)? {
            let name = row.reference.clone().unwrap_or_default();
            pooled
                .entry(name)
                .and_modify(|entry| {
                    entry.mapped += row.mapped;
                    entry.unmapped += row.unmapped;
                })
                .or_insert(row);
        }
    }
    Ok(pooled)
}
