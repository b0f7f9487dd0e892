use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::users::user::{Role, User};

/// What a request is about to do, from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    /// Browse users and tasks.
    View,
    /// Create or change tasks and one's own profile.
    Edit,
    /// Manage other accounts.
    Administer,
}

pub fn capability_of(role: Role) -> Capability {
    match role {
        Role::User => Capability::Edit,
        Role::Admin => Capability::Administer,
    }
}

// Presentation resolves the caller; this module only decides.
pub fn require(user: &User, needed: Capability) -> ServiceResult<()> {
    if capability_of(user.role) >= needed {
        Ok(())
    } else {
        tracing::debug!(user_id = user.id, role = %user.role, ?needed, "access_denied");
        Err(ServiceError::Forbidden)
    }
}
