//! Activity generation
//!
//! The four per-day activity generators (access, print, burn, travel), the
//! records they emit, the shared sampling helpers, and the risk indicator
//! composer. Travel is the only stateful generator; its `TripState` is owned
//! by the orchestrator and threaded through each day's call.

pub mod access;
pub mod burn;
pub mod print;
pub mod records;
pub mod risk;
pub mod sampling;
pub mod travel;

pub use access::AccessActivityGenerator;
pub use burn::BurnActivityGenerator;
pub use print::PrintActivityGenerator;
pub use records::{
    AccessActivity, BurnActivity, DailyActivityRecord, PrintActivity, TravelActivity,
};
pub use risk::risk_travel_indicator;
pub use travel::{TravelActivityGenerator, TripState};
