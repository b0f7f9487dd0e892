use crate::application::dto::users::UserDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::assemble::user_dto;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn by_id(&self, id: i64) -> ServiceResult<UserDto> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound(id))?;
        Ok(user_dto(self.repo, user).await?)
    }

    pub async fn by_email(&self, email: &str) -> ServiceResult<UserDto> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::UserEmailNotFound(email.to_string()))?;
        Ok(user_dto(self.repo, user).await?)
    }
}
