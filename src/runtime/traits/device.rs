//! Device handles

/// A compute unit tensors can live on
///
/// Handles are cheap to clone and carry no state beyond which unit they name:
/// the host has id 0, a GPU uses its ordinal. Two tensors can only meet in an
/// operation when their devices report the same id.
pub trait Device: Clone + Send + Sync + 'static {
    fn id(&self) -> usize;

    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Label used in logs and error messages, e.g. `cuda:1`
    fn name(&self) -> String {
        format!("device:{}", self.id())
    }
}
