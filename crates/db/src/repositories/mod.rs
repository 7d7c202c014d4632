//! Repositories, one per table, in the `StructName::method(pool, ..)` style.

mod auth_session_repo;
mod category_repo;
mod device_session_repo;
mod product_repo;
mod profile_repo;
mod user_repo;

pub use auth_session_repo::AuthSessionRepo;
pub use category_repo::CategoryRepo;
pub use device_session_repo::DeviceSessionRepo;
pub use product_repo::ProductRepo;
pub use profile_repo::ProfileRepo;
pub use user_repo::UserRepo;
