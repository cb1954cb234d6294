pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Claims, LoginResult};
pub use auth_service_impl::{SeaOrmAuthService, TokenSigner};

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod seed;
