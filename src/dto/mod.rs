//! Wire formats shared by the HTTP API and the client-side page fetcher.

pub mod envelope;
pub mod list;
