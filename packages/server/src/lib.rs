// Website Showcase Gallery - API Core
//
// Community gallery of submitted websites: public browsing, likes and
// comments for signed-in users, and a moderation queue behind role gates.
//
// Architecture: models own SQL, actions own business rules, the server
// layer owns HTTP.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
