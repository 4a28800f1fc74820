//! Sensor Alert Rules
//!
//! Rules watch a single sensor and fire when a reading crosses a
//! threshold or changes too fast. Evaluation is pure: the rule set is
//! checked against the reading it is handed (and, for rate rules, the
//! previous reading) and returns the alerts that fired. Delivering those
//! alerts over email or SMS belongs to whoever consumes them.
//!
//! ## Rule Kinds
//!
//! | Kind            | Fires when                                   |
//! |-----------------|----------------------------------------------|
//! | `ThresholdHigh` | `value > threshold`                          |
//! | `ThresholdLow`  | `value < threshold`                          |
//! | `ChangeRate`    | `|Δvalue| / Δseconds > threshold`            |
//!
//! A rate rule without a previous reading, or with a previous reading that
//! is not strictly older, stays silent.
//!
//! Messages always print numbers with a decimal point (`threshold 30.0`).

use serde::{Deserialize, Serialize};

use crate::{
    errors::RuleError,
    readings::SensorReading,
    time::rate_per_sec,
};

/// What a rule compares against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRuleKind {
    /// Value strictly above the threshold
    #[serde(alias = "Threshold High")]
    ThresholdHigh,

    /// Value strictly below the threshold
    #[serde(alias = "Threshold Low")]
    ThresholdLow,

    /// Absolute change per second strictly above the threshold
    #[serde(alias = "Change Rate")]
    ChangeRate,
}

/// A rule bound to one sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Sensor identifier the rule watches
    pub sensor_id: String,

    /// Human-readable sensor name used in alert messages
    pub sensor_name: String,

    /// Comparison to apply
    #[serde(rename = "type")]
    pub kind: AlertRuleKind,

    /// Threshold in the sensor's unit (per second for rate rules)
    pub threshold: f64,
}

/// An alert produced by a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredAlert {
    /// Sensor that triggered
    pub sensor_id: String,

    /// Rule kind that fired
    pub kind: AlertRuleKind,

    /// Observed value (rate per second for rate rules)
    pub observed: f64,

    /// Rule threshold
    pub threshold: f64,

    /// Message suitable for a notification body
    pub message: String,
}

/// Ordered collection of alert rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertRuleSet {
    rules: Vec<AlertRule>,
}

impl AlertRuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule after checking it can be evaluated
    pub fn add(&mut self, rule: AlertRule) -> Result<(), RuleError> {
        if rule.sensor_id.trim().is_empty() {
            return Err(RuleError::MissingSensor);
        }
        if !rule.threshold.is_finite() {
            return Err(RuleError::NonFiniteThreshold {
                sensor_id: rule.sensor_id,
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Remove the rule at `index`; returns false when out of bounds
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.rules.len() {
            self.rules.remove(index);
            true
        } else {
            false
        }
    }

    /// All rules in insertion order
    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule bound to `sensor_id` against a reading
    pub fn check(
        &self,
        sensor_id: &str,
        reading: &SensorReading,
        previous: Option<&SensorReading>,
    ) -> Vec<TriggeredAlert> {
        self.rules
            .iter()
            .filter(|rule| rule.sensor_id == sensor_id)
            .filter_map(|rule| rule.evaluate(reading, previous))
            .collect()
    }
}

impl AlertRule {
    /// Evaluate this rule, returning the alert if it fires
    pub fn evaluate(
        &self,
        reading: &SensorReading,
        previous: Option<&SensorReading>,
    ) -> Option<TriggeredAlert> {
        let value = reading.value;
        let (observed, message) = match self.kind {
            AlertRuleKind::ThresholdHigh if value > self.threshold => (
                value,
                format!(
                    "{} value {:?} exceeds threshold {:?}",
                    self.sensor_name, value, self.threshold
                ),
            ),
            AlertRuleKind::ThresholdLow if value < self.threshold => (
                value,
                format!(
                    "{} value {:?} is below threshold {:?}",
                    self.sensor_name, value, self.threshold
                ),
            ),
            AlertRuleKind::ChangeRate => {
                let previous = previous?;
                let rate = rate_per_sec(
                    (previous.value, previous.timestamp),
                    (value, reading.timestamp),
                )?;
                if rate <= self.threshold {
                    return None;
                }
                (
                    rate,
                    format!(
                        "{} changed at {:.2}/s, exceeding rate threshold {:?}/s",
                        self.sensor_name, rate, self.threshold
                    ),
                )
            }
            _ => return None,
        };

        Some(TriggeredAlert {
            sensor_id: self.sensor_id.clone(),
            kind: self.kind,
            observed,
            threshold: self.threshold,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: AlertRuleKind, threshold: f64) -> AlertRule {
        AlertRule {
            sensor_id: "temp-1".to_string(),
            sensor_name: "Office Temperature".to_string(),
            kind,
            threshold,
        }
    }

    #[test]
    fn threshold_high_message() {
        let mut rules = AlertRuleSet::new();
        rules.add(rule(AlertRuleKind::ThresholdHigh, 30.0)).unwrap();

        let fired = rules.check("temp-1", &SensorReading::new("temperature", 31.5, 0), None);
        assert_eq!(fired.len(), 1);
        assert_eq!(
            fired[0].message,
            "Office Temperature value 31.5 exceeds threshold 30.0"
        );

        let quiet = rules.check("temp-1", &SensorReading::new("temperature", 30.0, 0), None);
        assert!(quiet.is_empty());
    }

    #[test]
    fn threshold_low_message() {
        let low = rule(AlertRuleKind::ThresholdLow, 18.0);
        let alert = low
            .evaluate(&SensorReading::new("temperature", 17.0, 0), None)
            .unwrap();
        assert_eq!(alert.message, "Office Temperature value 17.0 is below threshold 18.0");
    }

    #[test]
    fn other_sensors_ignored() {
        let mut rules = AlertRuleSet::new();
        rules.add(rule(AlertRuleKind::ThresholdHigh, 30.0)).unwrap();
        assert!(rules
            .check("temp-2", &SensorReading::new("temperature", 99.0, 0), None)
            .is_empty());
    }

    #[test]
    fn change_rate_needs_previous() {
        let rate = rule(AlertRuleKind::ChangeRate, 1.0);
        let current = SensorReading::new("temperature", 30.0, 2_000);
        assert!(rate.evaluate(&current, None).is_none());

        let previous = SensorReading::new("temperature", 20.0, 0);
        let alert = rate.evaluate(&current, Some(&previous)).unwrap();
        assert_eq!(alert.observed, 5.0);

        let stale = SensorReading::new("temperature", 20.0, 2_000);
        assert!(rate.evaluate(&current, Some(&stale)).is_none());
    }

    #[test]
    fn invalid_rules_rejected() {
        let mut rules = AlertRuleSet::new();
        assert!(matches!(
            rules.add(rule(AlertRuleKind::ThresholdHigh, f64::NAN)),
            Err(RuleError::NonFiniteThreshold { .. })
        ));
        let mut blank = rule(AlertRuleKind::ThresholdLow, 1.0);
        blank.sensor_id = "  ".to_string();
        assert_eq!(rules.add(blank), Err(RuleError::MissingSensor));
        assert!(rules.is_empty());
    }

    #[test]
    fn remove_by_index() {
        let mut rules = AlertRuleSet::new();
        rules.add(rule(AlertRuleKind::ThresholdHigh, 1.0)).unwrap();
        rules.add(rule(AlertRuleKind::ThresholdLow, 0.0)).unwrap();

        assert!(!rules.remove(5));
        assert!(rules.remove(0));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules()[0].kind, AlertRuleKind::ThresholdLow);
    }

    #[test]
    fn kind_accepts_display_names() {
        let kind: AlertRuleKind = serde_json::from_str("\"Threshold High\"").unwrap();
        assert_eq!(kind, AlertRuleKind::ThresholdHigh);
        let kind: AlertRuleKind = serde_json::from_str("\"change_rate\"").unwrap();
        assert_eq!(kind, AlertRuleKind::ChangeRate);
    }
}
