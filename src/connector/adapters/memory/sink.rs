//! Collecting sink for query results.

use crate::connector::{
    domain::TaskData,
    ports::{SinkControl, TaskDataSink},
};

/// Sink that keeps every accepted record in scan order.
///
/// Optionally asks the scan to stop once a number of records was collected.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    collected: Vec<TaskData>,
    stop_after: Option<usize>,
}

impl CollectingSink {
    /// Creates a sink that accepts every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that stops the scan after `limit` records.
    #[must_use]
    pub const fn stopping_after(limit: usize) -> Self {
        Self {
            collected: Vec::new(),
            stop_after: Some(limit),
        }
    }

    /// Returns the records collected so far.
    #[must_use]
    pub fn collected(&self) -> &[TaskData] {
        &self.collected
    }

    /// Consumes the sink and returns the collected records.
    #[must_use]
    pub fn into_collected(self) -> Vec<TaskData> {
        self.collected
    }
}

impl TaskDataSink for CollectingSink {
    fn accept(&mut self, task_data: TaskData) -> SinkControl {
        self.collected.push(task_data);
        match self.stop_after {
            Some(limit) if self.collected.len() >= limit => SinkControl::Stop,
            _ => SinkControl::Continue,
        }
    }
}
