//! Layout and direct-manipulation engine for the week grid. No widgets or
//! painting in here; the UI feeds it plain coordinates and dates.

pub mod commit;
pub mod planner;
pub mod pointer;
pub mod rows;
pub mod session;

pub use planner::{Command, Planner, PlannerEvent};
pub use pointer::GridRect;
pub use session::{DragMode, DragPayload, Grip};
