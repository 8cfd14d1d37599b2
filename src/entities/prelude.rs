pub use super::sync_outbox::Entity as SyncOutbox;
pub use super::users::Entity as Users;
pub use super::vitals::Entity as Vitals;
