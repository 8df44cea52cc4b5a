pub mod identity;
pub mod parent;

/// Transport-level error produced by repository implementations.
pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
