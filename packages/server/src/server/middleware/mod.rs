// HTTP middleware
pub mod role_gate;
pub mod session_auth;

pub use role_gate::*;
pub use session_auth::*;
