//! Service layer behind the HTTP handlers.
//! - `storage`: the file store (trait + local directory implementation).
//! - `search`: aggregated search over GitHub plus the built-in catalogs.
//! - Errors are reported through a single `ServiceError` enum.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod search;
