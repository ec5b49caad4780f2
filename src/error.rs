//! Error types for the permission catalog.

use thiserror::Error;

/// Catalog construction errors.
///
/// Resolution itself is infallible: unknown permission names resolve to
/// `false` by design. The only thing that can go wrong is assembling a
/// catalog that violates the definition invariants, and that fails fast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two definitions share a name.
    #[error("duplicate permission name: {0}")]
    DuplicateName(String),

    /// A definition has an empty name.
    #[error("permission name must not be empty")]
    EmptyName,
}
