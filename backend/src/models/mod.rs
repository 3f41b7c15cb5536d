//! Domain models shared by the generator and the linker

pub mod leg;
pub mod linked;
pub mod record;
pub mod warning;

// Re-exports
pub use leg::{FlightLeg, PairIdentity};
pub use linked::{AutoLinkedRow, LinkedPair, LINKED_ROW_HEADER};
pub use record::{normalize_airline, normalize_registration, normalize_suffix, DailyRecord};
pub use warning::{GenerationWarning, LinkWarning};
