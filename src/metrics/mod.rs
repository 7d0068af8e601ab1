//! Navigation counters for periodic observability snapshots.

use std::time::Duration;

use serde_json::json;

use crate::logging::{FieldMap, LogLevel, LogRecord};

#[derive(Debug, Default, Clone)]
pub struct NavMetrics {
    events: u64,
    moves: u64,
    absorbed_moves: u64,
    detail_opens: u64,
    restores: u64,
    deferred_restores: u64,
}

impl NavMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn record_absorbed_move(&mut self) {
        self.absorbed_moves = self.absorbed_moves.saturating_add(1);
    }

    pub fn record_detail_open(&mut self) {
        self.detail_opens = self.detail_opens.saturating_add(1);
    }

    pub fn record_restore(&mut self) {
        self.restores = self.restores.saturating_add(1);
    }

    pub fn record_deferred_restore(&mut self) {
        self.deferred_restores = self.deferred_restores.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> NavMetricSnapshot {
        NavMetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            moves: self.moves,
            absorbed_moves: self.absorbed_moves,
            detail_opens: self.detail_opens,
            restores: self.restores,
            deferred_restores: self.deferred_restores,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavMetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub moves: u64,
    pub absorbed_moves: u64,
    pub detail_opens: u64,
    pub restores: u64,
    pub deferred_restores: u64,
}

impl NavMetricSnapshot {
    pub fn as_fields(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("absorbed_moves".to_string(), json!(self.absorbed_moves));
        map.insert("detail_opens".to_string(), json!(self.detail_opens));
        map.insert("restores".to_string(), json!(self.restores));
        map.insert(
            "deferred_restores".to_string(),
            json!(self.deferred_restores),
        );
        map
    }

    pub fn to_log_record(&self, target: &str) -> LogRecord {
        LogRecord::new(LogLevel::Info, target, "nav_metrics").with_fields(self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut metrics = NavMetrics::new();
        metrics.record_event();
        metrics.record_event();
        metrics.record_move();
        metrics.record_absorbed_move();
        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.events, 2);
        assert_eq!(snapshot.moves, 1);
        assert_eq!(snapshot.absorbed_moves, 1);
        assert_eq!(snapshot.uptime_ms, 1500);
    }

    #[test]
    fn snapshot_converts_to_log_record() {
        let metrics = NavMetrics::new();
        let record = metrics
            .snapshot(Duration::from_secs(1))
            .to_log_record("gridnav::engine.metrics");
        assert_eq!(record.message, "nav_metrics");
        assert_eq!(record.target, "gridnav::engine.metrics");
        assert_eq!(record.fields.get("events"), Some(&json!(0)));
    }
}
