use crate::application::dto::users::{UserDto, UserWithoutTaskDto};
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::assemble::user_dtos;
use crate::domain::paging::PageRequest;
use crate::domain::users::user::UserFilter;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    /// One page of users, each with the tasks assigned to them.
    pub async fn detailed(&self, filter: &UserFilter, page: PageRequest) -> ServiceResult<Vec<UserDto>> {
        let users = self.repo.list_users(filter, Some(page)).await?;
        Ok(user_dtos(self.repo, users).await?)
    }

    pub async fn basic(&self, filter: &UserFilter) -> ServiceResult<Vec<UserWithoutTaskDto>> {
        let users = self.repo.list_users(filter, None).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
