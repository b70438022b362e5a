use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("alignment sources must share an identical reference catalogue (same names, lengths and order)")]
    InconsistentReferences,
    #[error("statistical query on a table with zero observations")]
    EmptyTable,
    #[error("zero reads mapped across all references, RPKM is undefined")]
    NoReads,
    #[error(transparent)]
    Hts(#[from] rust_htslib::errors::Error),
}
