//! Card Module
//!
//! Plain data handed between the scheduler and the persistence layer:
//! - `Card` snapshots and their lifecycle `State`
//! - `Rating` grades
//! - `ReviewLog` / `ReviewHistory` records
//! - `SchedulingInfo` / `RecordLog` outcomes

mod log;
mod model;

pub use log::{RecordLog, ReviewHistory, ReviewLog, SchedulingInfo};
pub use model::{Card, Rating, State};
