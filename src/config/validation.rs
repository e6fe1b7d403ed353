//! Configuration checks using Validation.
//!
//! Every check runs and all violations are reported together, so an
//! operator can fix a config file in one pass instead of one error at a
//! time.

use super::error::ConfigViolation;
use super::{Config, LedMode};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn volume(field: &'static str, value: f32) -> Check {
    require((0.0..=1.0).contains(&value), || {
        ConfigViolation::VolumeOutOfRange { field, value }
    })
}

/// Run every check against `config`, accumulating ALL violations.
pub fn validate(config: &Config) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    let timeout = config.sensor.read_timeout_secs;
    checks.push(require(timeout.is_finite() && timeout > 0.0, || {
        ConfigViolation::InvalidTimeout { value: timeout }
    }));

    let rules = &config.sensor.rules;
    checks.push(require(!rules.is_empty(), || ConfigViolation::NoRules));
    for (index, rule) in rules.iter().enumerate() {
        checks.push(require(!rule.pattern.is_empty(), || {
            ConfigViolation::EmptyPattern { index }
        }));
        checks.push(require(rule.event.is_known(), || {
            ConfigViolation::UnknownEventRule {
                index,
                pattern: rule.pattern.clone(),
            }
        }));
    }

    checks.push(volume("audio.talking_volume", config.audio.talking_volume));
    checks.push(volume("audio.full_volume", config.audio.full_volume));
    checks.push(require(
        !config.audio.extension.trim_start_matches('.').is_empty(),
        || ConfigViolation::EmptyExtension,
    ));

    checks.push(require(
        config.leds.mode != LedMode::Groups || !config.leds.groups.is_empty(),
        || ConfigViolation::MissingLedGroups,
    ));

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchRule, SensorEvent};

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut config = Config::default();
        config.sensor.read_timeout_secs = 0.0;
        config.audio.talking_volume = 1.5;
        config.leds.mode = LedMode::Groups;

        match validate(&config) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                let has_timeout = errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::InvalidTimeout { .. }));
                let has_volume = errors.iter().any(|e| {
                    matches!(
                        e,
                        ConfigViolation::VolumeOutOfRange {
                            field: "audio.talking_volume",
                            ..
                        }
                    )
                });
                let has_leds = errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::MissingLedGroups));

                assert!(has_timeout);
                assert!(has_volume);
                assert!(has_leds);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn rule_checks_report_index() {
        let mut config = Config::default();
        config.sensor.rules = vec![
            MatchRule::new("isNear", SensorEvent::Near),
            MatchRule::new("", SensorEvent::Talking),
            MatchRule::new("static", SensorEvent::Unknown),
        ];

        let result = validate(&config);
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert!(errors
                .iter()
                .any(|e| *e == ConfigViolation::EmptyPattern { index: 1 }));
            assert!(errors.iter().any(|e| matches!(
                e,
                ConfigViolation::UnknownEventRule { index: 2, .. }
            )));
        }
    }

    #[test]
    fn empty_rules_are_rejected() {
        let mut config = Config::default();
        config.sensor.rules.clear();

        assert!(validate(&config).is_failure());
    }

    #[test]
    fn nan_timeout_is_rejected() {
        let mut config = Config::default();
        config.sensor.read_timeout_secs = f64::NAN;

        assert!(validate(&config).is_failure());
    }
}
