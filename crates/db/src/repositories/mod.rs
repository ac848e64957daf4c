//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async functions. Reads
//! and single-statement writes take `&MySqlPool`; anything a service runs
//! inside a transaction takes `&mut MySqlConnection`.

pub mod cohort_repo;
pub mod corporate_settings_repo;
pub mod enrollment_repo;
pub mod feedback_frequency_repo;
pub mod interaction_repo;
pub mod module_repo;
pub mod notification_repo;
pub mod permission_repo;
pub mod role_repo;
pub mod skill_repo;
pub mod unlimited_price_repo;
pub mod user_repo;

pub use cohort_repo::CohortRepo;
pub use corporate_settings_repo::CorporateSettingsRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use feedback_frequency_repo::FeedbackFrequencyRepo;
pub use interaction_repo::InteractionRepo;
pub use module_repo::ModuleRepo;
pub use notification_repo::NotificationRepo;
pub use permission_repo::PermissionRepo;
pub use role_repo::RoleRepo;
pub use skill_repo::SkillRepo;
pub use unlimited_price_repo::UnlimitedPriceRepo;
pub use user_repo::UserRepo;
