//! Resource fetcher
//!
//! HTTP client for the CARG API: offset/take pagination, static bearer
//! authentication, bounded rate-limit retry, and fixture fallback.

mod api;
mod page;

pub use api::CargClient;
pub use page::Page;

#[cfg(test)]
mod tests;
