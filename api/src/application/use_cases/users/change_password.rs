use crate::application::dto::users::{AdminPasswordUpdateDto, UserPasswordUpdateDto};
use crate::application::error::{ServiceError, ServiceResult, ValidationErrors};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::{hash_password, verify_password};
use crate::application::validation;
use crate::domain::users::user::User;

pub struct ChangePassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

fn validate_new_password(new_password: Option<&str>) -> ServiceResult<&str> {
    let mut errors = ValidationErrors::default();
    match new_password {
        Some(p) => validation::password_strength(&mut errors, "newPassword", p),
        None => errors.add("newPassword", "password cannot be null"),
    }
    errors.into_result()?;
    Ok(new_password.unwrap_or_default())
}

impl<'a, R: UserRepository + ?Sized> ChangePassword<'a, R> {
    /// The caller proves knowledge of the current password.
    pub async fn by_user(&self, current: &User, req: &UserPasswordUpdateDto) -> ServiceResult<()> {
        let new_password = validate_new_password(req.new_password.as_deref())?;
        if !verify_password(&req.old_password, &current.password_hash) {
            return Err(ServiceError::InvalidCurrentPassword);
        }
        self.store(current.id, new_password).await?;
        tracing::info!(user_id = current.id, "password_changed_by_user");
        Ok(())
    }

    pub async fn by_admin(&self, req: &AdminPasswordUpdateDto) -> ServiceResult<()> {
        let new_password = validate_new_password(req.new_password.as_deref())?;
        let user = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| ServiceError::UserEmailNotFound(req.email.clone()))?;
        self.store(user.id, new_password).await?;
        tracing::info!(user_id = user.id, "password_changed_by_admin");
        Ok(())
    }

    async fn store(&self, user_id: i64, new_password: &str) -> ServiceResult<()> {
        let hash = hash_password(new_password)?;
        if !self.repo.update_password(user_id, &hash).await? {
            return Err(ServiceError::UserNotFound(user_id));
        }
        Ok(())
    }
}
