//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Record store
//!
//! One repository per entity. Mutable entities carry a version and
//! `update` is a compare-and-swap on it.
//!
//! ## Time
//!
//! - `Clock` - Injected source of "now" and "today"

mod attachment_repository;
mod clock;
mod delay_repository;
mod intervention_repository;
mod mission_repository;
mod notification_repository;
mod report_repository;
mod user_repository;

pub use attachment_repository::AttachmentRepository;
pub use clock::Clock;
pub use delay_repository::DelayRepository;
pub use intervention_repository::InterventionRepository;
pub use mission_repository::MissionRepository;
pub use notification_repository::NotificationRepository;
pub use report_repository::ReportRepository;
pub use user_repository::UserRepository;
