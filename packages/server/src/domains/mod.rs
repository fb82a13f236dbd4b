// Business domains
pub mod auth;
pub mod moderation;
pub mod user;
pub mod website;
