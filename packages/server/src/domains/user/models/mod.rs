pub mod user;

pub use user::{RoleCounts, User};
