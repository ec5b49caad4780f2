//! Permission resolution logic.
//!
//! Computes effective permissions for a user in an optional category/forum
//! context by merging every applicable grant into one boolean per name.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::catalog::PermissionCatalog;
use crate::levels::PermissionLevel;
use crate::models::{Category, Forum, PermissionGrant, User};
use crate::moderation::is_moderator;

/// Read-only mapping from permission name to the resolved decision.
///
/// Lookups for names nobody declared return `false` rather than failing;
/// "never declared" is treated exactly like "explicitly undefined."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    granted: HashMap<String, bool>,
}

impl EffectivePermissions {
    /// Whether the named permission resolved to granted.
    #[must_use]
    pub fn is_granted(&self, name: &str) -> bool {
        self.granted.get(name).copied().unwrap_or(false)
    }

    /// Whether the name appears in the resolved mapping at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.granted.contains_key(name)
    }

    /// Every permission name in the resolved mapping.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.granted.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.granted.iter().map(|(name, granted)| (name.as_str(), *granted))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

/// Per-context permission resolver.
///
/// Borrows a fully materialized subject graph and computes the merged
/// mapping at most once, on first query. A resolver is only valid for the
/// exact `(catalog, user, forum, category)` it was built with: construct one
/// per authorization context (per request, per evaluation) and discard it
/// afterwards, never reuse it for a different user or context.
///
/// Resolution order per permission name:
/// 1. Seed with the catalog default (`Undefined` for undeclared names)
/// 2. Merge user and group grants, skipping `when_moderator` grants unless
///    the user moderates this context
/// 3. Merge category grants, then forum grants, unconditionally
/// 4. The numerically highest level wins; the decision is its boolean
///    coercion
///
/// # Examples
///
/// ```
/// use forum_permissions::{PermissionCatalog, PermissionLevel, PermissionResolver, User};
/// use uuid::Uuid;
///
/// let catalog = PermissionCatalog::forum_defaults();
/// let user = User::new(Uuid::new_v4(), "alice");
///
/// let resolver = PermissionResolver::new(&catalog, &user, None, None);
/// assert!(resolver.is_granted("post_reply")); // catalog default
/// assert!(!resolver.is_granted("ban_user"));
/// ```
#[derive(Debug)]
pub struct PermissionResolver<'a> {
    catalog: &'a PermissionCatalog,
    user: &'a User,
    forum: Option<&'a Forum>,
    category: Option<&'a Category>,
    resolved: OnceLock<EffectivePermissions>,
}

impl<'a> PermissionResolver<'a> {
    /// Build a resolver over an already-loaded subject graph.
    ///
    /// All inputs must be fully materialized; resolution performs no I/O
    /// and never re-queries mid-computation. `forum` and `category` are
    /// independently optional.
    #[must_use]
    pub const fn new(
        catalog: &'a PermissionCatalog,
        user: &'a User,
        forum: Option<&'a Forum>,
        category: Option<&'a Category>,
    ) -> Self {
        Self {
            catalog,
            user,
            forum,
            category,
            resolved: OnceLock::new(),
        }
    }

    /// The merged mapping, computed on first access and cached for the
    /// lifetime of this resolver. Concurrent first access computes once.
    pub fn permissions(&self) -> &EffectivePermissions {
        self.resolved.get_or_init(|| self.combine())
    }

    /// Whether the named permission is granted in this context.
    pub fn is_granted(&self, name: &str) -> bool {
        self.permissions().is_granted(name)
    }

    /// Whether the name appears in the resolved mapping.
    pub fn has(&self, name: &str) -> bool {
        self.permissions().contains(name)
    }

    /// Every permission name in the resolved mapping.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.permissions().names()
    }

    /// Number of resolved permission names.
    pub fn len(&self) -> usize {
        self.permissions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions().is_empty()
    }

    #[tracing::instrument(skip_all, fields(user_id = %self.user.id))]
    fn combine(&self) -> EffectivePermissions {
        // Expensive (touches every group), so decided once per resolver.
        let moderator = is_moderator(self.user, self.category, self.forum);

        // Seed every known definition with its default; names only seen in
        // grants join lazily at Undefined. The highest level seen per name
        // wins, so folding with max is equivalent to collecting all levels
        // and sorting.
        let mut levels: HashMap<String, PermissionLevel> = self
            .catalog
            .iter()
            .map(|def| (def.name.clone(), def.default))
            .collect();

        let mut apply = |grant: &PermissionGrant| {
            let level = levels
                .entry(grant.permission.clone())
                .or_insert(PermissionLevel::Undefined);
            *level = (*level).max(grant.value);
        };

        // when_moderator gates user- and group-sourced grants only.
        for grant in self.user.effective_grants() {
            if grant.when_moderator && !moderator {
                continue;
            }
            apply(grant);
        }

        // Category and forum grants always apply, even when flagged
        // when_moderator: location grants are not moderator-gated.
        if let Some(category) = self.category {
            category.grants.iter().for_each(&mut apply);
        }
        if let Some(forum) = self.forum {
            forum.grants.iter().for_each(&mut apply);
        }

        let granted = levels
            .into_iter()
            .map(|(name, level)| (name, level.is_granted()))
            .collect();

        EffectivePermissions { granted }
    }
}
