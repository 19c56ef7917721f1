//! Sink port receiving query results one at a time.

use crate::connector::domain::TaskData;

/// Whether the query should keep scanning after a sink accepted a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkControl {
    /// Keep scanning.
    Continue,
    /// Stop the scan; the query ends as cancelled.
    Stop,
}

/// Consumer of matching task data, called once per match in scan order.
///
/// Implementations must not block indefinitely; backpressure is the sink's
/// responsibility.
pub trait TaskDataSink: Send {
    /// Receives one matching task.
    fn accept(&mut self, task_data: TaskData) -> SinkControl;
}

impl<F> TaskDataSink for F
where
    F: FnMut(TaskData) -> SinkControl + Send,
{
    fn accept(&mut self, task_data: TaskData) -> SinkControl {
        self(task_data)
    }
}
