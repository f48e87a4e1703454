pub mod board;
pub mod filter;
pub mod interval;
pub mod task;
pub mod week;

pub use board::TaskBoard;
pub use filter::{TaskFilter, TaskStats};
pub use interval::Interval;
pub use task::{Priority, Task, TaskId};
pub use week::{Week, DAYS_IN_WEEK};
