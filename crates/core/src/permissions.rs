//! Role names and the page permissions they grant.
//!
//! Role names must match the `role` claim issued by the identity provider.

use serde::Serialize;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// What a user may do below a given parent page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePermissions {
    pub can_add_subpage: bool,
    pub can_publish_subpage: bool,
}

impl PagePermissions {
    /// Permissions for a role. Unknown roles get nothing.
    pub fn for_role(role: &str) -> Self {
        match role {
            ROLE_ADMIN => Self {
                can_add_subpage: true,
                can_publish_subpage: true,
            },
            ROLE_EDITOR => Self {
                can_add_subpage: true,
                can_publish_subpage: false,
            },
            _ => Self {
                can_add_subpage: false,
                can_publish_subpage: false,
            },
        }
    }

    pub fn ensure_can_add_subpage(&self) -> Result<(), CoreError> {
        if self.can_add_subpage {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You do not have permission to add pages here".to_string(),
            ))
        }
    }

    pub fn ensure_can_publish_subpage(&self) -> Result<(), CoreError> {
        if self.can_publish_subpage {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You do not have permission to publish pages here".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_admin_can_do_everything() {
        let perms = PagePermissions::for_role(ROLE_ADMIN);
        assert!(perms.can_add_subpage);
        assert!(perms.can_publish_subpage);
    }

    #[test]
    fn test_editor_cannot_publish() {
        let perms = PagePermissions::for_role(ROLE_EDITOR);
        assert!(perms.ensure_can_add_subpage().is_ok());
        assert_matches!(
            perms.ensure_can_publish_subpage(),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn test_viewer_and_unknown_roles_get_nothing() {
        for role in [ROLE_VIEWER, "superuser", ""] {
            let perms = PagePermissions::for_role(role);
            assert_matches!(perms.ensure_can_add_subpage(), Err(CoreError::Forbidden(_)));
        }
    }
}
