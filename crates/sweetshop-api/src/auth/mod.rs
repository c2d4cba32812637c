//! Authentication: password hashing, token issuance, and the request gate.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use middleware::{authenticate, require_active, require_admin, CurrentUser};
pub use service::AuthService;
