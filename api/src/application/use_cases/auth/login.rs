use crate::application::dto::users::AuthenticateRequest;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::verify_password;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, req: &AuthenticateRequest) -> ServiceResult<User> {
        let Some(user) = self.repo.find_by_email(&req.email).await? else {
            tracing::debug!(email = %req.email, "login_unknown_email");
            return Err(ServiceError::InvalidCredentials);
        };
        if !verify_password(&req.password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "login_bad_password");
            return Err(ServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}
