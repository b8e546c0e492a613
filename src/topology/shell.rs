use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the topology store.
    pub struct ShellId;
}

/// The faces bounding a solid.
///
/// Order matters: a die keeps shell face `n - 1` as face number `n`, and
/// pocket walls and floors follow the numbered faces.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceId>,
    /// Every edge is used once in each direction.
    pub is_closed: bool,
}
