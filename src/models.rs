//! Data model for the permission subject graph.
//!
//! The collaborating persistence layer materializes these entities fully
//! (definitions, grants, group memberships, moderator lists) before handing
//! them to the resolver; nothing here loads data on its own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::levels::PermissionLevel;

/// The kind of entity a grant is attached to.
///
/// A closed set: grants are keyed by `(kind, id, permission)` instead of one
/// join table per owning entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    User,
    Group,
    Category,
    Forum,
}

/// Reference to the entity that owns a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: Uuid,
}

impl SubjectRef {
    #[must_use]
    pub const fn new(kind: SubjectKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

/// Catalog entry for a known permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    /// Unique permission name, e.g. `"post_reply"`.
    pub name: String,
    pub description: Option<String>,
    /// Level applied when no grant mentions this permission.
    pub default: PermissionLevel,
}

impl PermissionDefinition {
    pub fn new(name: impl Into<String>, default: PermissionLevel) -> Self {
        Self {
            name: name.into(),
            description: None,
            default,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Assignment of a level to a named permission, owned by exactly one subject.
///
/// Grants live and die with their owner; deleting the subject deletes its
/// grants (cascade in the persistence layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Name of the granted permission (a `PermissionDefinition` name, or an
    /// undeclared name which the resolver seeds as `Undefined`).
    pub permission: String,
    pub value: PermissionLevel,
    /// When `true`, the grant only applies while the acting user is a
    /// moderator in the current context. Only honored on user- and
    /// group-owned grants; see the resolver.
    pub when_moderator: bool,
    pub subject: SubjectRef,
}

impl PermissionGrant {
    pub fn new(subject: SubjectRef, permission: impl Into<String>, value: PermissionLevel) -> Self {
        Self {
            permission: permission.into(),
            value,
            when_moderator: false,
            subject,
        }
    }

    /// A grant that applies only while the holder moderates the context.
    pub fn moderator_only(
        subject: SubjectRef,
        permission: impl Into<String>,
        value: PermissionLevel,
    ) -> Self {
        Self {
            when_moderator: true,
            ..Self::new(subject, permission, value)
        }
    }
}

/// A user with direct grants and group memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub grants: Vec<PermissionGrant>,
    /// Groups fully materialized, membership order irrelevant.
    pub groups: Vec<Group>,
}

impl User {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            grants: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::User, self.id);
        self.grants.push(PermissionGrant::new(subject, permission, value));
        self
    }

    #[must_use]
    pub fn with_moderator_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::User, self.id);
        self.grants
            .push(PermissionGrant::moderator_only(subject, permission, value));
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// The user's effective grant set: direct grants plus the grants of
    /// every group the user belongs to. Duplicate permission names are all
    /// kept; the merge resolves them by precedence, not by position.
    pub fn effective_grants(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.grants
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.grants.iter()))
    }
}

/// A group of users sharing a set of grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub grants: Vec<PermissionGrant>,
}

impl Group {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::Group, self.id);
        self.grants.push(PermissionGrant::new(subject, permission, value));
        self
    }

    #[must_use]
    pub fn with_moderator_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::Group, self.id);
        self.grants
            .push(PermissionGrant::moderator_only(subject, permission, value));
        self
    }
}

/// A category with its own grants and designated moderators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub grants: Vec<PermissionGrant>,
    moderators: HashSet<Uuid>,
}

impl Category {
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            grants: Vec::new(),
            moderators: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::Category, self.id);
        self.grants.push(PermissionGrant::new(subject, permission, value));
        self
    }

    #[must_use]
    pub fn with_moderator(mut self, user_id: Uuid) -> Self {
        self.moderators.insert(user_id);
        self
    }

    /// Designated moderators of this category. Empty when nobody is
    /// designated; membership here is independent of any permission grant.
    pub const fn moderators(&self) -> &HashSet<Uuid> {
        &self.moderators
    }
}

/// A forum with its own grants and designated moderators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub id: Uuid,
    pub title: String,
    pub grants: Vec<PermissionGrant>,
    moderators: HashSet<Uuid>,
}

impl Forum {
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            grants: Vec::new(),
            moderators: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_grant(mut self, permission: &str, value: PermissionLevel) -> Self {
        let subject = SubjectRef::new(SubjectKind::Forum, self.id);
        self.grants.push(PermissionGrant::new(subject, permission, value));
        self
    }

    #[must_use]
    pub fn with_moderator(mut self, user_id: Uuid) -> Self {
        self.moderators.insert(user_id);
        self
    }

    /// Designated moderators of this forum. Empty when nobody is designated.
    pub const fn moderators(&self) -> &HashSet<Uuid> {
        &self.moderators
    }
}
