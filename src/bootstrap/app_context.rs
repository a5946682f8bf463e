use std::sync::Arc;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    bookmark_repo: Arc<dyn BookmarkRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(
        bookmark_repo: Arc<dyn BookmarkRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            bookmark_repo,
            user_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn bookmark_repo(&self) -> Arc<dyn BookmarkRepository> {
        self.services.bookmark_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }
}
