//! Linear companions to the task tree: pending-task list, undo stack and
//! scheduling queue.

pub mod list;
pub mod queue;
pub mod stack;

pub use list::TaskList;
pub use queue::ScheduledQueue;
pub use stack::ActionStack;
