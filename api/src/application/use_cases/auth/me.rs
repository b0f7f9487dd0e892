use crate::application::dto::users::UserDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::assemble::user_dto;

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    /// A token whose account is gone counts as unauthenticated.
    pub async fn execute(&self, id: i64) -> ServiceResult<UserDto> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::Unauthorized)?;
        Ok(user_dto(self.repo, user).await?)
    }
}
