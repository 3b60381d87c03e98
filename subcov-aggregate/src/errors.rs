use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Degenerate gene {0}: all exons are zero-length, coverage percentage is undefined")]
    DegenerateGene(String),
}
