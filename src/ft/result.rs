/// Crate-wide result. Errors are `anyhow` wrappers around each module's `thiserror` enum.
pub type Result<T = ()> = anyhow::Result<T>;
