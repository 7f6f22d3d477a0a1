//! Entity trait for records with a unique identity

use std::fmt::Debug;
use std::hash::Hash;

/// A record with a unique identity.
///
/// This trait is typically implemented via the `#[derive(Entity)]` macro,
/// which reads the identity from the field marked `#[entity(id)]` (or the
/// field named `id`).
///
/// # Manual Implementation
///
/// ```ignore
/// use catalog_query::Entity;
///
/// #[derive(Clone)]
/// pub struct Brand {
///     pub code: String,
///     pub label: String,
/// }
///
/// impl Entity for Brand {
///     type Id = String;
///     const NAME: &'static str = "brands";
///
///     fn id(&self) -> Self::Id {
///         self.code.clone()
///     }
/// }
/// ```
pub trait Entity: Clone + Send + Sync + 'static {
    /// The identity type.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Collection name, used in logs and error messages.
    const NAME: &'static str;

    /// The identity of this entity.
    fn id(&self) -> Self::Id;
}
