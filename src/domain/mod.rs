//! Domain aggregates exposed by the inspection service layer.

pub mod auth;
pub mod customer;
pub mod defect;
pub mod types;
