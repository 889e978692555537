use crate::calc::DEFAULT_LOW_ATTENDANCE_THRESHOLD;
use crate::kv::KvStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REPORT_SETTINGS_SLOT: &str = "settings.reports";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSettings {
    pub low_attendance_threshold: f64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            low_attendance_threshold: DEFAULT_LOW_ATTENDANCE_THRESHOLD,
        }
    }
}

impl ReportSettings {
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) -> Result<(), String> {
        let mut next = *self;
        for (k, v) in patch {
            match k.as_str() {
                "lowAttendanceThreshold" => {
                    let n = v
                        .as_f64()
                        .ok_or_else(|| format!("{} must be a number", k))?;
                    if !(0.0..=100.0).contains(&n) {
                        return Err(format!("{} must be between 0 and 100", k));
                    }
                    next.low_attendance_threshold = n;
                }
                _ => return Err(format!("unknown reports field: {}", k)),
            }
        }
        *self = next;
        Ok(())
    }
}

/// Defaults merged with whatever was saved. A malformed saved value is ignored.
pub fn load(kv: &dyn KvStore) -> ReportSettings {
    let mut current = ReportSettings::default();
    let saved = match kv.get(REPORT_SETTINGS_SLOT) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "report settings unreadable; using defaults");
            None
        }
    };
    if let Some(raw) = saved {
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(obj)) => {
                if let Err(msg) = current.apply_patch(&obj) {
                    tracing::warn!(reason = %msg, "saved report settings rejected; using defaults");
                }
            }
            _ => tracing::warn!("saved report settings are not a JSON object; using defaults"),
        }
    }
    current
}

pub fn save(kv: &mut dyn KvStore, settings: &ReportSettings) -> anyhow::Result<()> {
    let raw = serde_json::to_string(settings).context("failed to serialize report settings")?;
    kv.set(REPORT_SETTINGS_SLOT, &raw)
}
