//! Substring classification of raw sensor lines.
//!
//! Classification is a pure function of the line and an ordered rule list.
//! Rules are evaluated in order and the first pattern contained in the line
//! wins, so a line carrying several patterns resolves to the earliest rule.

use super::event::SensorEvent;
use serde::{Deserialize, Serialize};

/// One `(pattern, event)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    pub pattern: String,
    pub event: SensorEvent,
}

impl MatchRule {
    pub fn new(pattern: impl Into<String>, event: SensorEvent) -> Self {
        Self {
            pattern: pattern.into(),
            event,
        }
    }

    fn matches(&self, line: &str) -> bool {
        !self.pattern.is_empty() && line.contains(self.pattern.as_str())
    }
}

/// Ordered rule list mapping sensor lines to events.
///
/// # Example
///
/// ```rust
/// use pythia::core::{EventClassifier, SensorEvent};
///
/// let classifier = EventClassifier::default();
///
/// assert_eq!(classifier.classify("isNear 42cm"), SensorEvent::Near);
/// assert_eq!(classifier.classify("talking"), SensorEvent::Talking);
/// assert_eq!(classifier.classify(""), SensorEvent::Unknown);
///
/// // Earlier rules take priority.
/// assert_eq!(classifier.classify("talking silence"), SensorEvent::Talking);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClassifier {
    rules: Vec<MatchRule>,
}

impl Default for EventClassifier {
    /// Rules understood by the stock proximity/microphone firmware.
    fn default() -> Self {
        Self::new(vec![
            MatchRule::new("isNear", SensorEvent::Near),
            MatchRule::new("talking", SensorEvent::Talking),
            MatchRule::new("silence", SensorEvent::Silence),
        ])
    }
}

impl EventClassifier {
    pub fn new(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority so far.
    pub fn with_rule(mut self, pattern: impl Into<String>, event: SensorEvent) -> Self {
        self.rules.push(MatchRule::new(pattern, event));
        self
    }

    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify one line. Surrounding whitespace is ignored; blank lines
    /// and lines matching no rule are `Unknown`.
    pub fn classify(&self, line: &str) -> SensorEvent {
        let line = line.trim();
        if line.is_empty() {
            return SensorEvent::Unknown;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(line))
            .map_or(SensorEvent::Unknown, |rule| rule.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_cover_sensor_vocabulary() {
        let classifier = EventClassifier::default();

        assert_eq!(classifier.classify("isNear"), SensorEvent::Near);
        assert_eq!(classifier.classify("state: talking"), SensorEvent::Talking);
        assert_eq!(classifier.classify("silence\r\n"), SensorEvent::Silence);
    }

    #[test]
    fn unmatched_and_blank_lines_are_unknown() {
        let classifier = EventClassifier::default();

        assert_eq!(classifier.classify("distance=120"), SensorEvent::Unknown);
        assert_eq!(classifier.classify("   "), SensorEvent::Unknown);
        assert_eq!(classifier.classify(""), SensorEvent::Unknown);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let classifier = EventClassifier::default();
        assert_eq!(classifier.classify("isnear"), SensorEvent::Unknown);
    }

    #[test]
    fn first_rule_wins_on_overlap() {
        let classifier = EventClassifier::default();
        assert_eq!(
            classifier.classify("isNear talking silence"),
            SensorEvent::Near
        );
        assert_eq!(classifier.classify("silence talking"), SensorEvent::Talking);
    }

    #[test]
    fn custom_order_changes_priority() {
        let classifier = EventClassifier::new(vec![])
            .with_rule("silence", SensorEvent::Silence)
            .with_rule("talking", SensorEvent::Talking);

        assert_eq!(classifier.classify("silence talking"), SensorEvent::Silence);
    }

    #[test]
    fn empty_pattern_never_matches() {
        let classifier = EventClassifier::new(vec![MatchRule::new("", SensorEvent::Near)]);
        assert_eq!(classifier.classify("anything"), SensorEvent::Unknown);
    }

    #[test]
    fn classifier_is_deterministic() {
        let classifier = EventClassifier::default();
        let line = "isNear";

        assert_eq!(classifier.classify(line), classifier.classify(line));
    }
}
