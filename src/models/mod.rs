//! Database models and server-side configuration/auth models.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod customer;
pub mod defect;
