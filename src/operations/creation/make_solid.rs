use crate::error::{Result, TopologyError};
use crate::math::TOLERANCE;
use crate::operations::query::shell_volume;
use crate::topology::{ShellId, SolidData, SolidId, TopologyStore};

/// Closes a shell into a solid.
pub struct MakeSolid {
    shell: ShellId,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation.
    #[must_use]
    pub fn new(shell: ShellId) -> Self {
        Self { shell }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NonManifold`] if the shell is open or its
    /// faces, wound as given, do not enclose a positive volume.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !store.shell(self.shell)?.is_closed {
            return Err(TopologyError::NonManifold("shell is not closed".into()).into());
        }

        let volume = shell_volume(store, self.shell)?;
        if volume <= TOLERANCE {
            return Err(TopologyError::NonManifold(format!(
                "shell encloses a volume of {volume:.3e}"
            ))
            .into());
        }

        Ok(store.add_solid(SolidData { shell: self.shell }))
    }
}
