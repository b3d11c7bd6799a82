//! Per-table repositories.
//!
//! Repositories are stateless structs with associated async functions taking
//! a `&PgPool`. Timestamps are always assigned server-side with `NOW()`;
//! callers never compute them.

pub mod achievement_repo;
pub mod lead_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use lead_repo::LeadRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
