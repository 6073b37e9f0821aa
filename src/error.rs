use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("node `{0}` not found in the street graph")]
    NodeNotFound(String),
    #[error("start and end nodes must be different")]
    IdenticalEndpoints,
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("predecessor chain through `{0}` exceeds the node count; search state is corrupt")]
    CorruptPredecessors(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
