// ABOUTME: Persistence layer for ptlog: a scoped SQLite session and the directory access service.
// ABOUTME: Every operation re-validates ids and roles against storage before it acts.

pub mod error;
mod helpers;
pub mod repos;
pub mod service;
pub mod session;

pub use error::StoreError;
pub use service::DirectoryService;
pub use session::Session;
