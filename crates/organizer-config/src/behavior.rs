//! Behavior configuration: defaults, coercion, and domain checks.

use std::time::Duration;

use serde_json::Value;

use crate::defaults::{
    BEHAVIOR_SECTION, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_LOGGING_ENABLED, DEFAULT_MODE,
    DEFAULT_MOVE_STRATEGY, DEFAULT_STABILIZATION_DELAY, DEFAULT_VERBOSE_CLI,
};
use crate::error::ConfigResult;
use crate::model::{BehaviorSettings, ValueRegistry};
use crate::validate::{
    optional_field, parse_bool, parse_choice, parse_non_negative_int, parse_unit_interval,
    section_map,
};

impl BehaviorSettings {
    /// Build settings from the `behavior` section using the standard registry.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field when a value is outside its
    /// domain or has the wrong type.
    pub fn from_behavior_section(section: Option<&Value>) -> ConfigResult<Self> {
        Self::from_behavior_section_with(section, &ValueRegistry::standard())
    }

    /// Build settings from the `behavior` section, checking enumerated fields
    /// against `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field when a value is outside its
    /// domain or has the wrong type.
    pub fn from_behavior_section_with(
        section: Option<&Value>,
        registry: &ValueRegistry<'_>,
    ) -> ConfigResult<Self> {
        let fields = section_map(section, BEHAVIOR_SECTION)?;
        let default_mode = Value::from(DEFAULT_MODE);
        let default_strategy = Value::from(DEFAULT_MOVE_STRATEGY);

        let mode = parse_choice(
            optional_field(fields, "mode_default").unwrap_or(&default_mode),
            BEHAVIOR_SECTION,
            "mode_default",
            registry.modes,
        )?
        .parse()?;

        let move_strategy = parse_choice(
            optional_field(fields, "move_strategy").unwrap_or(&default_strategy),
            BEHAVIOR_SECTION,
            "move_strategy",
            registry.move_strategies,
        )?
        .parse()?;

        let confidence_threshold = optional_field(fields, "confidence_threshold")
            .map_or(Ok(DEFAULT_CONFIDENCE_THRESHOLD), |raw| {
                parse_unit_interval(raw, BEHAVIOR_SECTION, "confidence_threshold")
            })?;

        let stabilization_delay = optional_field(fields, "stabilization_delay")
            .map_or(Ok(DEFAULT_STABILIZATION_DELAY), |raw| {
                parse_non_negative_int(raw, BEHAVIOR_SECTION, "stabilization_delay")
                    .map(Duration::from_secs)
            })?;

        let logging_enabled = optional_field(fields, "logging_enabled")
            .map_or(Ok(DEFAULT_LOGGING_ENABLED), |raw| {
                parse_bool(raw, BEHAVIOR_SECTION, "logging_enabled")
            })?;

        let verbose_cli = optional_field(fields, "verbose_cli").map_or(
            Ok(DEFAULT_VERBOSE_CLI),
            |raw| parse_bool(raw, BEHAVIOR_SECTION, "verbose_cli"),
        )?;

        Ok(Self {
            mode,
            move_strategy,
            confidence_threshold,
            stabilization_delay,
            logging_enabled,
            verbose_cli,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::model::{Mode, MoveStrategy};
    use serde_json::json;

    fn build(raw: &Value) -> ConfigResult<BehaviorSettings> {
        BehaviorSettings::from_behavior_section(Some(raw))
    }

    fn field_of(err: &ConfigError) -> Option<&'static str> {
        match err {
            ConfigError::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }

    #[test]
    fn omitted_section_yields_defaults() {
        let settings = BehaviorSettings::from_behavior_section(None).expect("defaults");
        assert_eq!(settings, BehaviorSettings::default());
    }

    #[test]
    fn threshold_round_trips_and_defaults() {
        for value in [0.0, 0.25, 0.5, 0.99, 1.0] {
            let settings = build(&json!({ "confidence_threshold": value })).expect("in range");
            assert!((settings.confidence_threshold() - value).abs() < f64::EPSILON);
        }
        let settings = build(&json!({ "mode_default": "dry" })).expect("defaults");
        assert!((settings.confidence_threshold() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        for value in [-0.1, 1.1] {
            let err = build(&json!({ "confidence_threshold": value })).unwrap_err();
            assert_eq!(field_of(&err), Some("confidence_threshold"));
            assert!(err.to_string().contains("between 0.0 and 1.0"));
        }
    }

    #[test]
    fn numeric_strings_are_coerced_before_range_checks() {
        let settings = build(&json!({
            "confidence_threshold": "0.75",
            "stabilization_delay": "30",
        }))
        .expect("coercible");
        assert!((settings.confidence_threshold() - 0.75).abs() < f64::EPSILON);
        assert_eq!(settings.stabilization_delay(), Duration::from_secs(30));

        let type_err = build(&json!({ "confidence_threshold": "certain" })).unwrap_err();
        let range_err = build(&json!({ "confidence_threshold": "2" })).unwrap_err();
        assert!(type_err.to_string().contains("must be a number"));
        assert!(range_err.to_string().contains("between 0.0 and 1.0"));
    }

    #[test]
    fn negative_delay_is_a_range_error() {
        let err = build(&json!({ "stabilization_delay": -5 })).unwrap_err();
        assert_eq!(field_of(&err), Some("stabilization_delay"));
        assert!(err.to_string().contains(">= 0"));
    }

    #[test]
    fn enumerated_fields_are_checked_against_registry() {
        let err = build(&json!({ "mode_default": "turbo" })).unwrap_err();
        assert_eq!(field_of(&err), Some("mode_default"));
        let err = build(&json!({ "move_strategy": "teleport" })).unwrap_err();
        assert_eq!(field_of(&err), Some("move_strategy"));

        let settings = build(&json!({ "mode_default": "active", "move_strategy": "copy" }))
            .expect("valid enums");
        assert_eq!(settings.mode(), Mode::Active);
        assert_eq!(settings.move_strategy(), MoveStrategy::Copy);
    }

    #[test]
    fn injected_registry_narrows_accepted_values() {
        let registry = ValueRegistry {
            modes: &["dry"],
            move_strategies: &["copy"],
        };
        let raw = json!({ "mode_default": "active", "move_strategy": "copy" });
        let err = BehaviorSettings::from_behavior_section_with(Some(&raw), &registry).unwrap_err();
        assert_eq!(field_of(&err), Some("mode_default"));

        let raw = json!({ "mode_default": "dry", "move_strategy": "copy" });
        let settings =
            BehaviorSettings::from_behavior_section_with(Some(&raw), &registry).expect("allowed");
        assert_eq!(settings.mode(), Mode::Dry);
    }

    #[test]
    fn default_values_are_validated_against_registry() {
        let registry = ValueRegistry {
            modes: &["dry", "active"],
            move_strategies: &["move"],
        };
        let err = BehaviorSettings::from_behavior_section_with(None, &registry).unwrap_err();
        assert_eq!(field_of(&err), Some("mode_default"));
    }

    #[test]
    fn flags_must_be_booleans() {
        let err = build(&json!({ "logging_enabled": "yes" })).unwrap_err();
        assert_eq!(field_of(&err), Some("logging_enabled"));
        let err = build(&json!({ "verbose_cli": 1 })).unwrap_err();
        assert_eq!(field_of(&err), Some("verbose_cli"));

        let settings = build(&json!({ "logging_enabled": false, "verbose_cli": true }))
            .expect("booleans");
        assert!(!settings.logging_enabled());
        assert!(settings.verbose_cli());
    }

    #[test]
    fn non_mapping_section_is_rejected() {
        let err = build(&json!("dry")).unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }
}
