use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_conflict::StoreConflict;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::assignments::AssignmentDiff;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::Task;
use crate::domain::users::user::{NewUser, User, UserChanges, UserFilter};
use crate::infrastructure::db::{PgPool, unique_or};
use crate::infrastructure::db::repositories::task_repository_sqlx::task_from_row;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn user_from_row(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.try_get("role")?;
    Ok(User {
        id: r.try_get("id")?,
        first_name: r.try_get("first_name")?,
        last_name: r.try_get("last_name")?,
        email: r.try_get("email")?,
        password_hash: r.try_get("password_hash")?,
        role: role.parse()?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let row = sqlx::query(
            r#"INSERT INTO users (first_name, last_name, email, password_hash, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, first_name, last_name, email, password_hash, role"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or(e, || StoreConflict::Email(user.email.clone())))?;
        user_from_row(&row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, first_name, last_name, email, password_hash, role
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, first_name, last_name, email, password_hash, role
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users(
        &self,
        filter: &UserFilter,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT id, first_name, last_name, email, password_hash, role
               FROM users
               WHERE ($1::TEXT IS NULL OR first_name = $1)
                 AND ($2::TEXT IS NULL OR last_name = $2)
               ORDER BY id ASC
               LIMIT $3 OFFSET $4"#,
        )
        .bind(filter.first_name.as_deref())
        .bind(filter.last_name.as_deref())
        .bind(page.map(|p| p.limit()))
        .bind(page.map(|p| p.offset()).unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn tasks_for_users(&self, user_ids: &[i64]) -> anyhow::Result<Vec<(i64, Task)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT ut.user_id, t.id, t.title, t.description, t.task_status, t.deadline
               FROM user_tasks ut
               JOIN tasks t ON t.id = ut.task_id
               WHERE ut.user_id = ANY($1)
               ORDER BY ut.user_id ASC, t.id ASC"#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|r| -> anyhow::Result<(i64, Task)> {
                Ok((r.try_get::<i64, _>("user_id")?, task_from_row(r)?))
            })
            .collect()
    }

    async fn task_ids_for_user(&self, user_id: i64) -> anyhow::Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT task_id FROM user_tasks WHERE user_id = $1 ORDER BY task_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn update_user(
        &self,
        id: i64,
        changes: &UserChanges,
        tasks: &AssignmentDiff,
    ) -> anyhow::Result<Option<User>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"UPDATE users SET first_name = $2, last_name = $3, email = $4
               WHERE id = $1
               RETURNING id, first_name, last_name, email, password_hash, role"#,
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| unique_or(e, || StoreConflict::Email(changes.email.clone())))?;
        let Some(row) = row else {
            return Ok(None);
        };
        if !tasks.to_remove.is_empty() {
            sqlx::query("DELETE FROM user_tasks WHERE user_id = $1 AND task_id = ANY($2)")
                .bind(id)
                .bind(&tasks.to_remove)
                .execute(&mut *tx)
                .await?;
        }
        if !tasks.to_add.is_empty() {
            // Unknown task ids fall out of the join.
            sqlx::query(
                r#"INSERT INTO user_tasks (user_id, task_id)
                   SELECT $1, t.id FROM tasks t WHERE t.id = ANY($2)
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(id)
            .bind(&tasks.to_add)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        user_from_row(&row).map(Some)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
