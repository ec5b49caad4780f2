//! Moderator determination for a user in a category/forum context.

use crate::models::{Category, Forum, User};

/// Permission name whose mere presence in a user's effective grant set marks
/// the user as an administrator (and therefore a moderator everywhere).
pub const ADMIN: &str = "admin";

/// Permission name that, when granted truthy, makes the user a moderator in
/// every context.
pub const SUPER_MOD: &str = "super_mod";

/// Decide whether `when_moderator` grants apply for this user and context.
///
/// The user is a moderator if any of:
/// 1. the effective grant set (direct + group grants) contains a grant named
///    `admin` — the grant's own value is not consulted, so a `no`-valued
///    `admin` grant still counts; kept for compatibility with the system
///    this replaces
/// 2. the effective grant set contains a `super_mod` grant whose value
///    coerces to true
/// 3. the user is a designated moderator of the category
/// 4. the user is a designated moderator of the forum
///
/// This walks every group the user belongs to; callers evaluating many
/// permission names must compute it once per context, which is what the
/// resolver does.
pub fn is_moderator(user: &User, category: Option<&Category>, forum: Option<&Forum>) -> bool {
    let by_grant = user
        .effective_grants()
        .any(|g| g.permission == ADMIN || (g.permission == SUPER_MOD && g.value.is_granted()));

    let by_listing = category.is_some_and(|c| c.moderators().contains(&user.id))
        || forum.is_some_and(|f| f.moderators().contains(&user.id));

    tracing::debug!(user_id = %user.id, by_grant, by_listing, "moderator determination");

    by_grant || by_listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::PermissionLevel;
    use crate::models::Group;
    use uuid::Uuid;

    fn plain_user() -> User {
        User::new(Uuid::new_v4(), "alice")
    }

    #[test]
    fn test_plain_user_is_not_moderator() {
        assert!(!is_moderator(&plain_user(), None, None));
    }

    #[test]
    fn test_admin_grant_value_is_ignored() {
        // Presence of an admin-named grant suffices even when its value
        // coerces to false.
        let user = plain_user().with_grant(ADMIN, PermissionLevel::No);
        assert!(is_moderator(&user, None, None));

        let user = plain_user().with_grant(ADMIN, PermissionLevel::Never);
        assert!(is_moderator(&user, None, None));
    }

    #[test]
    fn test_super_mod_requires_truthy_value() {
        let user = plain_user().with_grant(SUPER_MOD, PermissionLevel::No);
        assert!(!is_moderator(&user, None, None));

        let user = plain_user().with_grant(SUPER_MOD, PermissionLevel::Never);
        assert!(!is_moderator(&user, None, None));

        let user = plain_user().with_grant(SUPER_MOD, PermissionLevel::Yes);
        assert!(is_moderator(&user, None, None));

        let user = plain_user().with_grant(SUPER_MOD, PermissionLevel::Always);
        assert!(is_moderator(&user, None, None));
    }

    #[test]
    fn test_group_grants_count_toward_moderator_status() {
        let staff = Group::new(Uuid::new_v4(), "staff").with_grant(ADMIN, PermissionLevel::No);
        let user = plain_user().with_group(staff);
        assert!(is_moderator(&user, None, None));
    }

    #[test]
    fn test_category_moderator_listing() {
        let user = plain_user();
        let category = Category::new(Uuid::new_v4(), "Support").with_moderator(user.id);
        assert!(is_moderator(&user, Some(&category), None));

        let other = Category::new(Uuid::new_v4(), "Support");
        assert!(!is_moderator(&user, Some(&other), None));
    }

    #[test]
    fn test_forum_moderator_listing() {
        let user = plain_user();
        let forum = Forum::new(Uuid::new_v4(), "General").with_moderator(user.id);
        assert!(is_moderator(&user, None, Some(&forum)));
    }

    #[test]
    fn test_moderator_of_other_context_does_not_carry_over() {
        let user = plain_user();
        let moderated = Forum::new(Uuid::new_v4(), "General").with_moderator(user.id);
        let unmoderated = Forum::new(Uuid::new_v4(), "Off-topic");

        assert!(is_moderator(&user, None, Some(&moderated)));
        assert!(!is_moderator(&user, None, Some(&unmoderated)));
    }
}
