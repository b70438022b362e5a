use std::path::{Path, PathBuf};

use rust_htslib::bam;
use rust_htslib::bam::header::HeaderRecord;
use rust_htslib::bam::record::{Aux, Cigar, CigarString};
use tempfile::TempDir;

use bamstats::core::coverage::{CoverageCounter, GenomeCoverage};
use bamstats::core::describe::{Describe, DEFAULT_BINS};
use bamstats::core::errors::StatsError;
use bamstats::core::io::hts::{index_counts, index_counts_by_reference, HtsSource};
use bamstats::core::readstats::ReadStats;
use bamstats::core::refstats::ReferenceStats;
use bamstats::core::rgcounts::ReadGroupCounts;

const READ_LEN: usize = 50;

fn header(references: &[(&str, u64)], groups: &[&str]) -> bam::header::Header {
    let mut header = bam::header::Header::new();

    let mut hd = HeaderRecord::new(b"HD");
    hd.push_tag(b"VN", &"1.6");
    hd.push_tag(b"SO", &"coordinate");
    header.push_record(&hd);

    for (name, length) in references {
        let mut sq = HeaderRecord::new(b"SQ");
        sq.push_tag(b"SN", name);
        sq.push_tag(b"LN", length);
        header.push_record(&sq);
    }
    for group in groups {
        let mut rg = HeaderRecord::new(b"RG");
        rg.push_tag(b"ID", group);
        rg.push_tag(b"PL", &"454");
        rg.push_tag(b"LB", &format!("{}-lib", group));
        rg.push_tag(b"SM", &format!("{}-sample", group));
        header.push_record(&rg);
    }
    header
}

fn record(tid: i32, pos: i64, mapq: u8, flags: u16, group: Option<&str>, qname: &str) -> bam::Record {
    let mut record = bam::Record::new();
    let (seq, qual) = (vec![b'A'; READ_LEN], vec![30u8; READ_LEN]);
    if flags & 0x4 == 0 {
        let cigar = CigarString(vec![Cigar::Match(READ_LEN as u32)]);
        record.set(qname.as_bytes(), Some(&cigar), &seq, &qual);
    } else {
        record.set(qname.as_bytes(), None, &seq, &qual);
    }
    record.set_tid(tid);
    record.set_pos(pos);
    record.set_mtid(-1);
    record.set_mpos(-1);
    record.set_mapq(mapq);
    record.set_flags(flags);
    if let Some(group) = group {
        record.push_aux(b"RG", Aux::String(group)).unwrap();
    }
    record
}

fn write_bam(path: &Path, header: &bam::header::Header, records: &[bam::Record]) {
    {
        let mut writer = bam::Writer::from_path(path, header, bam::Format::Bam).unwrap();
        for record in records {
            writer.write(record).unwrap();
        }
    }
    bam::index::build(path, None, bam::index::Type::Bai, 1).unwrap();
}

// Two references of different lengths, 18 reads split 9/9, two read groups.
// chrA reads are high quality (mapq 40), chrB reads low (mapq 20), four chrA
// reads are on the reverse strand.
fn example(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("example.bam");
    let mut records = Vec::new();
    for ind in 0..9 {
        let flags = if ind < 4 { 0x10 } else { 0 };
        records.push(record(0, 100, 40, flags, Some("grp1"), &format!("a{}", ind)));
    }
    for ind in 0..9 {
        records.push(record(1, 500, 20, 0, Some("grp2"), &format!("b{}", ind)));
    }
    write_bam(&path, &header(&[("chrA", 1000), ("chrB", 2000)], &["grp1", "grp2"]), &records);
    path
}

// A single reference, one mapped and one unmapped read, no read groups.
fn no_rg(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("norg.bam");
    let records =
        vec![record(0, 10, 30, 0, None, "m0"), record(-1, -1, 0, 0x4, None, "u0")];
    write_bam(&path, &header(&[("chrC", 500)], &[]), &records);
    path
}

fn open(path: &Path) -> HtsSource {
    HtsSource::open(path).unwrap()
}

#[test]
fn reference_stats() {
    let dir = TempDir::new().unwrap();
    let bam = example(&dir);

    let mut sources = vec![open(&bam)];
    let stats = ReferenceStats::new(&mut sources, 1, None, DEFAULT_BINS).unwrap();

    // equal counts, so the RPKM ratio is the inverse of the length ratio
    let rpkms = stats.rpkms().values();
    assert_eq!(rpkms.len(), 2);
    assert!((rpkms[0] / rpkms[1] - 2.0).abs() < 1e-9);
    assert!((rpkms[0] - 500.0).abs() < 1e-9);

    assert_eq!(stats.most_abundant().len(), 1);
    assert_eq!(stats.most_abundant()[0].reference, "chrA");
    assert_eq!(stats.most_abundant()[0].reads, 9);

    assert_eq!(stats.lengths().iter().collect::<Vec<_>>(), vec![(1000, 1), (2000, 1)]);
}

#[test]
fn rpkm_is_invariant_under_source_duplication() {
    let dir = TempDir::new().unwrap();
    let bam = example(&dir);

    let mut single = vec![open(&bam)];
    let mut doubled = vec![open(&bam), open(&bam)];

    let single = ReferenceStats::new(&mut single, 10, None, DEFAULT_BINS).unwrap();
    let doubled = ReferenceStats::new(&mut doubled, 10, None, DEFAULT_BINS).unwrap();

    assert_eq!(single.rpkms().values(), doubled.rpkms().values());
    assert_eq!(doubled.most_abundant()[0].reads, 18);
}

#[test]
fn mismatched_sources_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut sources = vec![open(&example(&dir)), open(&no_rg(&dir))];

    let result = ReferenceStats::new(&mut sources, 10, None, DEFAULT_BINS);
    assert!(matches!(result, Err(StatsError::InconsistentReferences)));
}

#[test]
fn read_stats() {
    let dir = TempDir::new().unwrap();
    let mut sources = vec![open(&example(&dir))];

    let stats = ReadStats::new(&mut sources).unwrap();
    assert_eq!(stats.mapqs().count(), 18);
    assert_eq!(stats.mapqs().min().unwrap(), 20.0);
    assert_eq!(stats.mapqs().max().unwrap(), 40.0);

    let flags = stats.flag_counts();
    assert_eq!(flags["is_unmapped"], 0);
    assert_eq!(flags["is_reverse"], 4);
    assert_eq!(flags["is_paired"], 0);
}

#[test]
fn coverage_distribution() {
    let dir = TempDir::new().unwrap();
    let bam = example(&dir);

    // 9 stacked reads of 50 bp on each reference
    let mut sources = vec![open(&bam)];
    let cov = CoverageCounter::new(&mut sources).unwrap();
    assert_eq!(cov.depths().count(), 100);
    assert_eq!(cov.depths().min().unwrap(), 9.0);
    assert_eq!(cov.depths().max().unwrap(), 9.0);

    let genome = GenomeCoverage::new(&mut sources).unwrap();
    assert_eq!(&genome.at_threshold(0), cov.depths());
    // chrB reads (mapq 20) drop out at 30, their columns stay at depth zero
    assert_eq!(genome.at_threshold(30).iter().collect::<Vec<_>>(), vec![(0, 50), (9, 50)]);
    assert_eq!(genome.uncovered(), 3000 - 100);
}

#[test]
fn read_group_counts() {
    let dir = TempDir::new().unwrap();
    let mut sources = vec![open(&example(&dir))];

    let counts = ReadGroupCounts::new(&mut sources, None).unwrap();
    assert_eq!(counts.tallies()["grp1"].mapped, 9);
    assert_eq!(counts.tallies()["grp2"].mapped, 9);

    // totals must agree with the per-read engine over the same input
    let mut sources = vec![open(&example(&dir))];
    let total: u64 = counts.tallies().values().map(|tally| tally.mapped + tally.unmapped).sum();
    assert_eq!(total, ReadStats::new(&mut sources).unwrap().mapqs().count());

    let meta = &counts.metadata()["grp1"];
    assert_eq!(meta.platform.as_deref(), Some("454"));
    assert_eq!(meta.library.as_deref(), Some("grp1-lib"));
    assert_eq!(meta.sample.as_deref(), Some("grp1-sample"));
}

#[test]
fn untagged_reads_and_thresholds() {
    let dir = TempDir::new().unwrap();
    let bam = no_rg(&dir);

    let counts = ReadGroupCounts::new(&mut vec![open(&bam)], None).unwrap();
    let tally = &counts.tallies()["norg"];
    assert_eq!((tally.mapped, tally.unmapped, tally.above_mapq), (1, 1, None));

    let counts = ReadGroupCounts::new(&mut vec![open(&bam)], Some(20)).unwrap();
    assert_eq!(counts.tallies()["norg"].above_mapq, Some(1));

    let counts = ReadGroupCounts::new(&mut vec![open(&bam)], Some(50)).unwrap();
    assert_eq!(counts.tallies()["norg"].above_mapq, Some(0));
}

#[test]
fn index_derived_counts() {
    let dir = TempDir::new().unwrap();
    let rows = index_counts(example(&dir)).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].reference.as_deref(), Some("chrA"));
    assert_eq!(rows[0].length, Some(1000));
    assert_eq!((rows[0].mapped, rows[0].unmapped), (9, 0));
    assert_eq!(rows[1].reference.as_deref(), Some("chrB"));
    assert_eq!((rows[1].mapped, rows[1].unmapped), (9, 0));

    // pooling the same file twice doubles the counts
    let bam = example(&dir);
    let pooled = index_counts_by_reference(&[&bam, &bam]).unwrap();
    assert_eq!(pooled["chrA"].mapped, 18);
    assert_eq!(pooled["chrB"].mapped, 18);
}
