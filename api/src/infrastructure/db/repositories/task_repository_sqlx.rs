use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_conflict::StoreConflict;
use crate::application::ports::task_repository::TaskRepository;
use crate::domain::assignments::AssignmentDiff;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::{Task, TaskChanges, TaskFilter, TaskSort, TaskStatus};
use crate::domain::users::user::User;
use crate::infrastructure::db::{PgPool, unique_or};
use crate::infrastructure::db::repositories::user_repository_sqlx::user_from_row;

pub struct SqlxTaskRepository {
    pub pool: PgPool,
}

impl SqlxTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn task_from_row(r: &PgRow) -> anyhow::Result<Task> {
    let status: Option<String> = r.try_get("task_status")?;
    Ok(Task {
        id: r.try_get("id")?,
        title: r.try_get("title")?,
        description: r.try_get("description")?,
        task_status: status.as_deref().map(str::parse).transpose()?,
        deadline: r.try_get("deadline")?,
    })
}

#[async_trait]
impl TaskRepository for SqlxTaskRepository {
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<Task>> {
        // ORDER BY comes from a closed set of literals.
        let sql = format!(
            r#"SELECT t.id, t.title, t.description, t.task_status, t.deadline
               FROM tasks t
               WHERE ($1::BIGINT IS NULL OR EXISTS (
                        SELECT 1 FROM user_tasks ut WHERE ut.task_id = t.id AND ut.user_id = $1))
                 AND ($2::TEXT IS NULL OR t.task_status = $2)
               ORDER BY {}
               LIMIT $3 OFFSET $4"#,
            sort.order_by_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(filter.user_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(page.map(|p| p.limit()))
            .bind(page.map(|p| p.offset()).unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(task_from_row).collect()
    }

    async fn list_unassigned(&self, sort: TaskSort, page: PageRequest) -> anyhow::Result<Vec<Task>> {
        let sql = format!(
            r#"SELECT t.id, t.title, t.description, t.task_status, t.deadline
               FROM tasks t
               WHERE NOT EXISTS (SELECT 1 FROM user_tasks ut WHERE ut.task_id = t.id)
               ORDER BY {}
               LIMIT $1 OFFSET $2"#,
            sort.order_by_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(task_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query(
            r#"SELECT id, title, description, task_status, deadline
               FROM tasks WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(task_from_row).transpose()
    }

    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query(
            r#"SELECT id, title, description, task_status, deadline
               FROM tasks WHERE title = $1"#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(task_from_row).transpose()
    }

    async fn users_for_tasks(&self, task_ids: &[i64]) -> anyhow::Result<Vec<(i64, User)>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT ut.task_id, u.id, u.first_name, u.last_name, u.email, u.password_hash, u.role
               FROM user_tasks ut
               JOIN users u ON u.id = ut.user_id
               WHERE ut.task_id = ANY($1)
               ORDER BY ut.task_id ASC, u.id ASC"#,
        )
        .bind(task_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|r| -> anyhow::Result<(i64, User)> {
                Ok((r.try_get::<i64, _>("task_id")?, user_from_row(r)?))
            })
            .collect()
    }

    async fn user_ids_for_task(&self, task_id: i64) -> anyhow::Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM user_tasks WHERE task_id = $1 ORDER BY user_id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn create_task(&self, task: &TaskChanges, user_ids: &[i64]) -> anyhow::Result<Task> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO tasks (title, description, task_status, deadline)
               VALUES ($1, $2, $3, $4)
               RETURNING id, title, description, task_status, deadline"#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.task_status.map(|s| s.as_str()))
        .bind(task.deadline)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_or(e, || StoreConflict::Title(task.title.clone())))?;
        let created = task_from_row(&row)?;
        if !user_ids.is_empty() {
            sqlx::query(
                r#"INSERT INTO user_tasks (user_id, task_id)
                   SELECT u.id, $1 FROM users u WHERE u.id = ANY($2)
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(created.id)
            .bind(user_ids)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn update_task(
        &self,
        id: i64,
        changes: &TaskChanges,
        users: &AssignmentDiff,
    ) -> anyhow::Result<Option<Task>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"UPDATE tasks SET title = $2, description = $3, task_status = $4, deadline = $5
               WHERE id = $1
               RETURNING id, title, description, task_status, deadline"#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.task_status.map(|s| s.as_str()))
        .bind(changes.deadline)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| unique_or(e, || StoreConflict::Title(changes.title.clone())))?;
        let Some(row) = row else {
            return Ok(None);
        };
        if !users.to_remove.is_empty() {
            sqlx::query("DELETE FROM user_tasks WHERE task_id = $1 AND user_id = ANY($2)")
                .bind(id)
                .bind(&users.to_remove)
                .execute(&mut *tx)
                .await?;
        }
        if !users.to_add.is_empty() {
            sqlx::query(
                r#"INSERT INTO user_tasks (user_id, task_id)
                   SELECT u.id, $1 FROM users u WHERE u.id = ANY($2)
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(id)
            .bind(&users.to_add)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        task_from_row(&row).map(Some)
    }

    async fn set_status(&self, id: i64, status: TaskStatus) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query(
            r#"UPDATE tasks SET task_status = $2 WHERE id = $1
               RETURNING id, title, description, task_status, deadline"#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(task_from_row).transpose()
    }

    async fn attach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO user_tasks (user_id, task_id)
               SELECT u.id, t.id FROM users u, tasks t WHERE u.id = $1 AND t.id = $2
               ON CONFLICT DO NOTHING"#,
        )
        .bind(user_id)
        .bind(task_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn detach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM user_tasks WHERE task_id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_task(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
