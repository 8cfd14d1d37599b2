pub mod export;
pub mod session;
pub mod sync;

pub use export::ExportService;
pub use session::Session;
pub use sync::{DeliveryOutcome, SyncService};
