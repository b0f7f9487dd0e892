use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;

pub struct DeleteUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteUser<'a, R> {
    /// Assignments go with the user.
    pub async fn execute(&self, id: i64) -> ServiceResult<()> {
        if !self.repo.delete_user(id).await? {
            return Err(ServiceError::UserNotFound(id));
        }
        tracing::info!(user_id = id, "user_deleted");
        Ok(())
    }
}
