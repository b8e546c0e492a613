use super::shell::ShellId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// A closed body bounded by a single shell.
///
/// Marking pockets are open to the surface, so a die never carries internal
/// voids.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// The bounding shell, wound outward.
    pub shell: ShellId,
}
