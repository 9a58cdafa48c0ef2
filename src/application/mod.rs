// Poll scheduling
pub mod poller;

pub use poller::{CycleReport, StatusPoller};
