//! Forum permission resolution.
//!
//! Merges permission grants attached to a user, the user's groups, and an
//! optional category/forum context into a single boolean decision per
//! permission name. The collaborating persistence layer materializes the
//! subject graph; this crate only computes truth values from it.
//!
//! Construct one [`PermissionResolver`] per authorization context and pass
//! it to the call sites that need it; the merged mapping is computed at most
//! once per resolver and is read-only afterwards.

pub mod catalog;
pub mod error;
pub mod levels;
pub mod models;
pub mod moderation;
pub mod resolver;

pub use catalog::PermissionCatalog;
pub use error::CatalogError;
pub use levels::PermissionLevel;
pub use models::{
    Category, Forum, Group, PermissionDefinition, PermissionGrant, SubjectKind, SubjectRef, User,
};
pub use moderation::{is_moderator, ADMIN, SUPER_MOD};
pub use resolver::{EffectivePermissions, PermissionResolver};
