//! Bounded operation audit trail
//!
//! Every completed or failed operation appends a trimmed record; the history
//! keeps the most recent `MAX_HISTORY` entries, oldest evicted first.
//! Aggregate statistics are derived on demand from the retained window.

use super::{truncate, ToolResult};
use chrono::Utc;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Maximum retained history entries
pub const MAX_HISTORY: usize = 100;

/// History records keep a shorter error excerpt than the result envelope
const HISTORY_ERROR_LEN: usize = 100;

/// One entry in the audit trail
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    pub tool: String,
    pub success: bool,
    pub elapsed_ms: f64,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated toolkit usage statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolkitStats {
    pub total_operations: usize,
    pub successful: usize,
    pub failed: usize,
    /// Mean latency over the retained window, rounded to 0.1 ms
    pub avg_latency_ms: f64,
    pub cache_size: usize,
    pub tools_available: usize,
}

#[derive(Default)]
pub struct OperationHistory {
    total: AtomicUsize,
    records: Mutex<VecDeque<OperationRecord>>,
}

impl OperationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest entries past the bound.
    pub fn record(&self, result: &ToolResult) {
        self.total.fetch_add(1, Ordering::Relaxed);

        let record = OperationRecord {
            tool: result.tool.clone(),
            success: result.success,
            elapsed_ms: result.elapsed_ms,
            timestamp: Utc::now().timestamp(),
            error: result
                .error
                .as_deref()
                .map(|e| truncate(e, HISTORY_ERROR_LEN)),
        };

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push_back(record);
        while records.len() > MAX_HISTORY {
            records.pop_front();
        }
    }

    /// Total operations ever recorded, including evicted ones.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the retained records, oldest first.
    pub fn snapshot(&self) -> Vec<OperationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Derive aggregate statistics from the retained window.
    pub fn stats(&self, cache_size: usize, tools_available: usize) -> ToolkitStats {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);

        let successful = records.iter().filter(|r| r.success).count();
        let failed = records.len() - successful;
        let avg_latency_ms = if records.is_empty() {
            0.0
        } else {
            let sum: f64 = records.iter().map(|r| r.elapsed_ms).sum();
            (sum / records.len() as f64 * 10.0).round() / 10.0
        };

        ToolkitStats {
            total_operations: self.total(),
            successful,
            failed,
            avg_latency_ms,
            cache_size,
            tools_available,
        }
    }
}
