//! The catalog of known permission definitions.

use crate::error::CatalogError;
use crate::levels::PermissionLevel;
use crate::models::PermissionDefinition;
use crate::moderation::{ADMIN, SUPER_MOD};

/// Validated, immutable set of permission definitions.
///
/// Seeded once by administrative code and read by every resolver. Names are
/// unique; a catalog rejecting that invariant never comes into existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCatalog {
    definitions: Vec<PermissionDefinition>,
}

impl PermissionCatalog {
    /// Build a catalog, rejecting empty and duplicate names.
    pub fn new(definitions: Vec<PermissionDefinition>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::with_capacity(definitions.len());
        for def in &definitions {
            if def.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(def.name.as_str()) {
                return Err(CatalogError::DuplicateName(def.name.clone()));
            }
        }
        Ok(Self { definitions })
    }

    /// An empty catalog. Every queried name will fall back to `false`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// The standard forum permission table.
    ///
    /// Mirrors the definitions a fresh forum installation seeds: reading and
    /// posting are on by default, everything destructive or elevated is off
    /// until granted.
    #[must_use]
    pub fn forum_defaults() -> Self {
        let defs = vec![
            PermissionDefinition::new("view", PermissionLevel::Yes)
                .with_description("Read categories, forums, and topics"),
            PermissionDefinition::new("search", PermissionLevel::Yes)
                .with_description("Use the search index"),
            PermissionDefinition::new("post_topic", PermissionLevel::Yes)
                .with_description("Open new topics"),
            PermissionDefinition::new("post_reply", PermissionLevel::Yes)
                .with_description("Reply to existing topics"),
            PermissionDefinition::new("edit_own_post", PermissionLevel::Yes)
                .with_description("Edit the user's own posts"),
            PermissionDefinition::new("delete_own_post", PermissionLevel::No)
                .with_description("Delete the user's own posts"),
            PermissionDefinition::new("upload_attachment", PermissionLevel::No)
                .with_description("Attach files to posts"),
            PermissionDefinition::new("edit_post", PermissionLevel::No)
                .with_description("Edit any post"),
            PermissionDefinition::new("delete_post", PermissionLevel::No)
                .with_description("Delete any post"),
            PermissionDefinition::new("lock_topic", PermissionLevel::No)
                .with_description("Lock and unlock topics"),
            PermissionDefinition::new("move_topic", PermissionLevel::No)
                .with_description("Move topics between forums"),
            PermissionDefinition::new("ban_user", PermissionLevel::No)
                .with_description("Ban and unban users"),
            PermissionDefinition::new(SUPER_MOD, PermissionLevel::No)
                .with_description("Moderate every category and forum"),
            PermissionDefinition::new(ADMIN, PermissionLevel::No)
                .with_description("Administer the installation"),
        ];

        // Hand-maintained table above is known unique.
        Self { definitions: defs }
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PermissionDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PermissionDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a PermissionCatalog {
    type Item = &'a PermissionDefinition;
    type IntoIter = std::slice::Iter<'a, PermissionDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_rejects_duplicate_names() {
        let result = PermissionCatalog::new(vec![
            PermissionDefinition::new("view", PermissionLevel::Yes),
            PermissionDefinition::new("view", PermissionLevel::No),
        ]);
        assert_eq!(result, Err(CatalogError::DuplicateName("view".to_string())));
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = PermissionCatalog::new(vec![PermissionDefinition::new(
            "",
            PermissionLevel::Undefined,
        )]);
        assert_eq!(result, Err(CatalogError::EmptyName));
    }

    #[test]
    fn test_get_by_name() {
        let catalog = PermissionCatalog::forum_defaults();
        let def = catalog.get("post_reply").unwrap();
        assert_eq!(def.default, PermissionLevel::Yes);
        assert!(catalog.get("no_such_permission").is_none());
    }

    #[test]
    fn test_forum_defaults_are_valid() {
        let catalog = PermissionCatalog::forum_defaults();
        // Re-validate through the checked constructor.
        let revalidated = PermissionCatalog::new(catalog.iter().cloned().collect());
        assert_eq!(revalidated, Ok(catalog));
    }

    #[test]
    fn test_forum_defaults_keep_elevated_permissions_off() {
        let catalog = PermissionCatalog::forum_defaults();
        for name in ["ban_user", "lock_topic", "delete_post", ADMIN, SUPER_MOD] {
            assert!(
                !catalog.get(name).unwrap().default.is_granted(),
                "{name} must not be granted by default"
            );
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PermissionCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
