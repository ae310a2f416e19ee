//! Directory operations, grouped by the table they act on. Each file adds
//! methods to `DirectoryService`.

pub mod logs;
pub mod staff;
