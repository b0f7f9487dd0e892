//! Process-local backend implementing every repository port.
//!
//! Used by `DATA_BACKEND=memory` and by the test-suite. Enforces the same
//! uniqueness and cascade rules as the SQL schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::store_conflict::StoreConflict;
use crate::application::ports::task_repository::TaskRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::assignments::AssignmentDiff;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::{Task, TaskChanges, TaskFilter, TaskSort, TaskStatus};
use crate::domain::users::user::{NewUser, User, UserChanges, UserFilter};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    /// `(user_id, task_id)` pairs.
    links: BTreeSet<(i64, i64)>,
    last_user_id: i64,
    last_task_id: i64,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.tasks
            .values()
            .any(|t| t.title == title && Some(t.id) != except)
    }

    fn is_assigned(&self, task_id: i64) -> bool {
        self.links.iter().any(|(_, t)| *t == task_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let mut st = self.lock()?;
        if st.email_taken(&user.email, None) {
            return Err(StoreConflict::Email(user.email.clone()).into());
        }
        st.last_user_id += 1;
        let row = User {
            id: st.last_user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
        };
        st.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let st = self.lock()?;
        Ok(st.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn list_users(
        &self,
        filter: &UserFilter,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<User>> {
        let st = self.lock()?;
        let all: Vec<User> = st
            .users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        Ok(match page {
            Some(p) => p.slice(all),
            None => all,
        })
    }

    async fn tasks_for_users(&self, user_ids: &[i64]) -> anyhow::Result<Vec<(i64, Task)>> {
        let st = self.lock()?;
        let mut out: Vec<(i64, Task)> = st
            .links
            .iter()
            .filter(|(u, _)| user_ids.contains(u))
            .filter_map(|(u, t)| st.tasks.get(t).map(|task| (*u, task.clone())))
            .collect();
        out.sort_by_key(|(u, t)| (*u, t.id));
        Ok(out)
    }

    async fn task_ids_for_user(&self, user_id: i64) -> anyhow::Result<Vec<i64>> {
        let st = self.lock()?;
        Ok(st
            .links
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, t)| *t)
            .collect())
    }

    async fn update_user(
        &self,
        id: i64,
        changes: &UserChanges,
        tasks: &AssignmentDiff,
    ) -> anyhow::Result<Option<User>> {
        let mut st = self.lock()?;
        if !st.users.contains_key(&id) {
            return Ok(None);
        }
        if st.email_taken(&changes.email, Some(id)) {
            return Err(StoreConflict::Email(changes.email.clone()).into());
        }
        for task_id in &tasks.to_remove {
            st.links.remove(&(id, *task_id));
        }
        for task_id in &tasks.to_add {
            if st.tasks.contains_key(task_id) {
                st.links.insert((id, *task_id));
            }
        }
        let Some(user) = st.users.get_mut(&id) else {
            return Ok(None);
        };
        user.first_name = changes.first_name.clone();
        user.last_name = changes.last_name.clone();
        user.email = changes.email.clone();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> anyhow::Result<bool> {
        let mut st = self.lock()?;
        Ok(match st.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                true
            }
            None => false,
        })
    }

    async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        let mut st = self.lock()?;
        let removed = st.users.remove(&id).is_some();
        st.links.retain(|(u, _)| *u != id);
        Ok(removed)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<Task>> {
        let st = self.lock()?;
        let mut all: Vec<Task> = st
            .tasks
            .values()
            .filter(|t| filter.status.is_none_or(|s| t.task_status == Some(s)))
            .filter(|t| {
                filter
                    .user_id
                    .is_none_or(|u| st.links.contains(&(u, t.id)))
            })
            .cloned()
            .collect();
        all.sort_by(|a, b| sort.compare(a, b));
        Ok(match page {
            Some(p) => p.slice(all),
            None => all,
        })
    }

    async fn list_unassigned(&self, sort: TaskSort, page: PageRequest) -> anyhow::Result<Vec<Task>> {
        let st = self.lock()?;
        let mut all: Vec<Task> = st
            .tasks
            .values()
            .filter(|t| !st.is_assigned(t.id))
            .cloned()
            .collect();
        all.sort_by(|a, b| sort.compare(a, b));
        Ok(page.slice(all))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>> {
        Ok(self.lock()?.tasks.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<Task>> {
        let st = self.lock()?;
        Ok(st.tasks.values().find(|t| t.title == title).cloned())
    }

    async fn users_for_tasks(&self, task_ids: &[i64]) -> anyhow::Result<Vec<(i64, User)>> {
        let st = self.lock()?;
        let mut out: Vec<(i64, User)> = st
            .links
            .iter()
            .filter(|(_, t)| task_ids.contains(t))
            .filter_map(|(u, t)| st.users.get(u).map(|user| (*t, user.clone())))
            .collect();
        out.sort_by_key(|(t, u)| (*t, u.id));
        Ok(out)
    }

    async fn user_ids_for_task(&self, task_id: i64) -> anyhow::Result<Vec<i64>> {
        let st = self.lock()?;
        Ok(st
            .links
            .iter()
            .filter(|(_, t)| *t == task_id)
            .map(|(u, _)| *u)
            .collect())
    }

    async fn create_task(&self, task: &TaskChanges, user_ids: &[i64]) -> anyhow::Result<Task> {
        let mut st = self.lock()?;
        if st.title_taken(&task.title, None) {
            return Err(StoreConflict::Title(task.title.clone()).into());
        }
        st.last_task_id += 1;
        let row = Task {
            id: st.last_task_id,
            title: task.title.clone(),
            description: task.description.clone(),
            task_status: task.task_status,
            deadline: task.deadline,
        };
        st.tasks.insert(row.id, row.clone());
        for user_id in user_ids {
            if st.users.contains_key(user_id) {
                st.links.insert((*user_id, row.id));
            }
        }
        Ok(row)
    }

    async fn update_task(
        &self,
        id: i64,
        changes: &TaskChanges,
        users: &AssignmentDiff,
    ) -> anyhow::Result<Option<Task>> {
        let mut st = self.lock()?;
        if !st.tasks.contains_key(&id) {
            return Ok(None);
        }
        if st.title_taken(&changes.title, Some(id)) {
            return Err(StoreConflict::Title(changes.title.clone()).into());
        }
        for user_id in &users.to_remove {
            st.links.remove(&(*user_id, id));
        }
        for user_id in &users.to_add {
            if st.users.contains_key(user_id) {
                st.links.insert((*user_id, id));
            }
        }
        let Some(task) = st.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.title = changes.title.clone();
        task.description = changes.description.clone();
        task.task_status = changes.task_status;
        task.deadline = changes.deadline;
        Ok(Some(task.clone()))
    }

    async fn set_status(&self, id: i64, status: TaskStatus) -> anyhow::Result<Option<Task>> {
        let mut st = self.lock()?;
        Ok(st.tasks.get_mut(&id).map(|task| {
            task.task_status = Some(status);
            task.clone()
        }))
    }

    async fn attach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let mut st = self.lock()?;
        if !st.tasks.contains_key(&task_id) || !st.users.contains_key(&user_id) {
            return Ok(false);
        }
        Ok(st.links.insert((user_id, task_id)))
    }

    async fn detach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool> {
        Ok(self.lock()?.links.remove(&(user_id, task_id)))
    }

    async fn delete_task(&self, id: i64) -> anyhow::Result<bool> {
        let mut st = self.lock()?;
        let removed = st.tasks.remove(&id).is_some();
        st.links.retain(|(_, t)| *t != id);
        Ok(removed)
    }
}
