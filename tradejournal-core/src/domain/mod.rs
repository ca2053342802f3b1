//! Domain types for the trade journal

pub mod direction;
pub mod ids;
pub mod session;
pub mod trade;

pub use direction::{Direction, ParseDirectionError};
pub use ids::DatasetHash;
pub use session::{session_label, ASIAN, DEFAULT_SESSION, LONDON, NEW_YORK};
pub use trade::{TradeRecord, DEFAULT_JOURNAL, NO_REASON_LABEL, UNGRADED_LABEL};
