//! Auth domain - session token verification
//!
//! Sign-in itself happens at the external identity provider. This domain
//! verifies the tokens it issues and turns them into a `SessionIdentity`.

pub mod jwt;

pub use jwt::{Claims, JwtService, SessionIdentity, SESSION_TTL_DAYS};
