//! Server dependencies shared by every action.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Verifies session tokens issued by the identity provider
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            jwt_service,
        }
    }
}
