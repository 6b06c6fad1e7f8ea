//! Entity trait shared by every persisted catalog record

use uuid::Uuid;

/// Base trait for persisted catalog entities.
///
/// `display_name` is the name used in failure messages
/// (`"Store not found."`).
pub trait Entity: Clone + Send + Sync + 'static {
    /// The name used in user-facing messages (e.g., "Store")
    fn display_name() -> &'static str;

    /// The identifier of this instance, if one has been assigned
    fn entity_id(&self) -> Option<Uuid>;

    /// Check whether this instance carries a usable (non-nil) identifier
    fn has_identifier(&self) -> bool {
        self.entity_id().is_some_and(|id| !id.is_nil())
    }
}
