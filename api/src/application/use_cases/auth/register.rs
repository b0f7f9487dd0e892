use crate::application::dto::users::RegisterRequest;
use crate::application::error::{ServiceError, ServiceResult, ValidationErrors};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;
use crate::application::validation;
use crate::domain::users::user::{NewUser, Role, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<User> {
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
        match req.password.as_deref() {
            Some(password) => validation::password_strength(&mut errors, "password", password),
            None => errors.add("password", "Password cannot be null"),
        }
        errors.into_result()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::EmailInUse);
        }
        let password_hash = hash_password(req.password.as_deref().unwrap_or_default())?;
        let user = self
            .repo
            .create_user(&NewUser {
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                email: req.email.clone(),
                password_hash,
                role: Role::User,
            })
            .await
            .map_err(|e| ServiceError::from_store(e, |_| ServiceError::EmailInUse))?;
        tracing::info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(user)
    }
}
