use thiserror::Error;

pub type PathResult<T> = Result<T, PathError>;

/// Failures of path construction and path queries.
///
/// Vertices are rendered with their `Debug` representation so the error does
/// not depend on the vertex type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0} is not contained in this path")]
    NotFound(String),
    #[error("path from '{from}' to '{to}' doesn't exist")]
    PathNotFound { from: String, to: String },
    #[error("predecessor data links '{tail}' to '{head}' but the graph has no such edge")]
    MissingEdge { tail: String, head: String },
    #[error("predecessor data revisits '{vertex}'")]
    CycleDetected { vertex: String },
}

impl PathError {
    pub fn path_not_found(source: &impl std::fmt::Debug, target: &impl std::fmt::Debug) -> Self {
        PathError::PathNotFound {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }

    pub fn missing_edge(tail: &impl std::fmt::Debug, head: &impl std::fmt::Debug) -> Self {
        PathError::MissingEdge {
            tail: format!("{:?}", tail),
            head: format!("{:?}", head),
        }
    }
}
