//! Server-side schema, defined independently of the client's `crate::entities`.
//!
//! Client and server deploy and evolve separately; the wire payloads in
//! `models::outbox` are the only contract between them.

pub mod prelude;

pub mod users;
pub mod vitals;
