pub use super::users::Entity as Users;
pub use super::vitals::Entity as Vitals;
