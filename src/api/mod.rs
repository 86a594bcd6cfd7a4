pub mod auth;
pub mod client;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;
