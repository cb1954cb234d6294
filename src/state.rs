use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, SeaOrmAuthService, SeaOrmCatalogService, SeaOrmUserService,
    UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    /// Connects to the database, applies migrations and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), &config.auth))
            as Arc<dyn AuthService>;

        let catalog_service = Arc::new(SeaOrmCatalogService::new(store.clone()))
            as Arc<dyn CatalogService>;

        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            catalog_service,
            user_service,
        }
    }
}
