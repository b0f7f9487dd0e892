use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;
use crate::domain::users::user::{NewUser, Role, User};

/// Creates the bootstrap administrator unless the email is already taken.
pub struct SeedAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> SeedAdmin<'a, R> {
    pub async fn execute(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        if let Some(existing) = self.repo.find_by_email(email).await? {
            tracing::info!(user_id = existing.id, role = %existing.role, "admin_seed_skipped_existing");
            return Ok(None);
        }
        let admin = self
            .repo
            .create_user(&NewUser {
                first_name: "Admin".into(),
                last_name: "Admin".into(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                role: Role::Admin,
            })
            .await?;
        tracing::info!(user_id = admin.id, email = %admin.email, "admin_seeded");
        Ok(Some(admin))
    }
}
