use std::collections::TryReserveError;

use thiserror::Error;

use crate::ids::NodeHandle;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("node arena is full: {0} slots in use")]
    ArenaFull(usize),
    #[error("invalid node handle: {0:?}")]
    InvalidHandle(NodeHandle),
    #[error("query on an empty tree")]
    EmptyTree,
    #[error("export overflow: {needed} keys do not fit in a buffer of {capacity}")]
    ExportOverflow { needed: usize, capacity: usize },
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
