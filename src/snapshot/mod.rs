pub mod event;
pub mod store;

pub use event::{EventSnapshot, UpcomingEvent};
pub use store::{SharedStore, SnapshotSource, StoreVersion};
