use thiserror::Error;

use crate::vertex::{VertexId, Weight};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No vertex named {0:?}")]
    UnknownVertexName(String),
    #[error("No vertex with index {0}")]
    UnknownVertex(VertexId),
    #[error("Graph already holds the maximum of {max} vertices")]
    VertexCapacityExceeded { max: usize },
    #[error("Edge weight {weight} exceeds the maximum of {max}")]
    WeightOutOfRange { weight: Weight, max: Weight },
    #[error("A vertex named {0:?} already exists")]
    DuplicateVertexName(String),
}
