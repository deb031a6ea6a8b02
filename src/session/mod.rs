pub mod state;

pub use state::{LoadOutcome, LoadTicket, Session};
