pub mod admin_account;
pub mod scheduler;

pub use admin_account::ensure_admin_account;
pub use scheduler::SchedulerService;
