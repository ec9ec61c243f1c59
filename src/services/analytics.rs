//! analytics.rs
//!
//! In-memory interaction log for the storefront.
//!
//! Every meaningful interaction (seat toggle, coupon attempt, confirmed
//! booking, client-side clicks) is recorded as an [`AnalyticsEvent`] with a
//! type, a page path and a metadata bag. The log keeps only the most recent
//! [`AnalyticsLog::capacity`] events; older ones are dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default number of events retained.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    Click,
    Scroll,
    FormSubmit,
    Navigation,
    Booking,
    Search,
}

impl AnalyticsEventType {
    fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventType::Click => "click",
            AnalyticsEventType::Scroll => "scroll",
            AnalyticsEventType::FormSubmit => "form_submit",
            AnalyticsEventType::Navigation => "navigation",
            AnalyticsEventType::Booking => "booking",
            AnalyticsEventType::Search => "search",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_type: AnalyticsEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    pub page_path: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

/// Bounded in-memory event log. Single-writer per request via the outer
/// lock in `AppState`; the log itself is plain data.
#[derive(Debug)]
pub struct AnalyticsLog {
    events: VecDeque<AnalyticsEvent>,
    capacity: usize,
    enabled: bool,
}

impl AnalyticsLog {
    pub fn new(capacity: usize, enabled: bool) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            enabled,
        }
    }

    /// Append an event, evicting the oldest once the cap is reached.
    /// No-op when analytics is disabled by config.
    pub fn record(&mut self, event: AnalyticsEvent) {
        if !self.enabled {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Convenience used by the booking controllers.
    pub fn record_now(
        &mut self,
        event_type: AnalyticsEventType,
        element_id: &str,
        page_path: &str,
        metadata: serde_json::Value,
    ) {
        self.record(AnalyticsEvent {
            event_type,
            element_id: Some(element_id.to_string()),
            page_path: page_path.to_string(),
            timestamp: Utc::now(),
            user_id: None,
            metadata,
        });
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.iter().cloned().collect()
    }

    /// Event counts keyed by type name, for the summary endpoint.
    pub fn counts_by_type(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for event in &self.events {
            *counts.entry(event.event_type.as_str().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: AnalyticsEventType, path: &str) -> AnalyticsEvent {
        AnalyticsEvent {
            event_type,
            element_id: None,
            page_path: path.to_string(),
            timestamp: Utc::now(),
            user_id: None,
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn keeps_only_the_most_recent_events() {
        let mut log = AnalyticsLog::new(3, true);
        for i in 0..5 {
            log.record(event(AnalyticsEventType::Click, &format!("/page-{i}")));
        }
        assert_eq!(log.len(), 3);
        let paths: Vec<_> = log.events().iter().map(|e| e.page_path.clone()).collect();
        assert_eq!(paths, vec!["/page-2", "/page-3", "/page-4"]);
    }

    #[test]
    fn counts_group_by_event_type() {
        let mut log = AnalyticsLog::new(10, true);
        log.record(event(AnalyticsEventType::Click, "/book"));
        log.record(event(AnalyticsEventType::Click, "/book"));
        log.record(event(AnalyticsEventType::Booking, "/book"));
        let counts = log.counts_by_type();
        assert_eq!(counts.get("click"), Some(&2));
        assert_eq!(counts.get("booking"), Some(&1));
    }

    #[test]
    fn disabled_log_drops_everything() {
        let mut log = AnalyticsLog::new(10, false);
        log.record_now(AnalyticsEventType::Click, "seat-selection", "/book", json!({}));
        assert!(log.is_empty());
    }
}
