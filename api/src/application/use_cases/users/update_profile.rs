use crate::application::dto::users::{UserDto, UserWithTaskIdsAndWithoutIdDto};
use crate::application::error::{ServiceError, ServiceResult, ValidationErrors};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::assemble::user_dto;
use crate::application::validation;
use crate::domain::assignments::AssignmentDiff;
use crate::domain::users::user::{User, UserChanges};

pub struct UpdateProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> UpdateProfile<'a, R> {
    pub async fn execute(
        &self,
        current: &User,
        req: &UserWithTaskIdsAndWithoutIdDto,
    ) -> ServiceResult<UserDto> {
        let mut errors = ValidationErrors::default();
        validation::not_blank(
            &mut errors,
            "firstName",
            &req.first_name,
            "first name cannot be blank",
        );
        validation::not_blank(
            &mut errors,
            "lastName",
            &req.last_name,
            "last name cannot be blank",
        );
        validation::email(&mut errors, "email", &req.email);
        errors.into_result()?;

        if req.email != current.email {
            if let Some(owner) = self.repo.find_by_email(&req.email).await? {
                if owner.id != current.id {
                    return Err(ServiceError::EmailAlreadyExists);
                }
            }
        }

        let diff = match &req.task_ids {
            Some(wanted) => {
                let assigned = self.repo.task_ids_for_user(current.id).await?;
                AssignmentDiff::between(&assigned, wanted)
            }
            None => AssignmentDiff::default(),
        };
        let changes = UserChanges {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
        };
        let updated = self
            .repo
            .update_user(current.id, &changes, &diff)
            .await
            .map_err(|e| ServiceError::from_store(e, |_| ServiceError::EmailAlreadyExists))?
            .ok_or(ServiceError::UserNotFound(current.id))?;
        tracing::info!(
            user_id = updated.id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "user_profile_updated"
        );
        Ok(user_dto(self.repo, updated).await?)
    }
}
