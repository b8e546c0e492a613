use thiserror::Error;

/// Top-level error type for the dice generator and its kernel.
#[derive(Debug, Error)]
pub enum PolydiceError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A face is not planar within tolerance or encloses no area.
    #[error("degenerate face: {0}")]
    DegenerateFace(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological construction.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The edges handed to a wire do not close into a loop.
    #[error("wire is not closed")]
    WireNotClosed,

    /// A face/edge table is malformed (index out of range, bad arity, broken
    /// numbering convention).
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A shell does not bound a volume: an edge is not shared by exactly two
    /// faces with opposite orientation, or the enclosed volume is not positive.
    #[error("non-manifold shell: {0}")]
    NonManifold(String),
}

/// Errors related to operations and their inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("face number {face_number} is outside 1..={face_count}")]
    InvalidFaceNumber { face_number: u32, face_count: u32 },

    #[error("parameter {name} = {value} must be positive")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`PolydiceError`].
pub type Result<T> = std::result::Result<T, PolydiceError>;
