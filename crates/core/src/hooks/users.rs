use crate::error::ApiResult;
use crate::hooks::{Hook, QueryState};
use crate::services::{UserDto, UserService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// User administration list. Toggles between active and soft-deleted accounts.
pub struct UsersHook {
    service: Arc<UserService>,
    hook: Hook<Vec<UserDto>>,
    show_deleted: AtomicBool,
}

impl UsersHook {
    pub fn new(service: Arc<UserService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
            show_deleted: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> QueryState<Vec<UserDto>> {
        self.hook.state()
    }

    pub fn showing_deleted(&self) -> bool {
        self.show_deleted.load(Ordering::SeqCst)
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.list(self.showing_deleted())).await
    }

    pub async fn show_deleted(&self, deleted: bool) -> bool {
        self.show_deleted.store(deleted, Ordering::SeqCst);
        self.refresh().await
    }

    /// Soft-deletes and reloads the list on success.
    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        self.service.delete(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn restore(&self, id: u64) -> ApiResult<UserDto> {
        let restored = self.service.restore(id).await?;
        self.refresh().await;
        Ok(restored)
    }
}
