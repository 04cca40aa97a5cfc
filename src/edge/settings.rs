//! # Edge Calculator Settings
//!
//! Every numeric threshold the calculator reads. Fields are public so
//! callers can override them before building an [`EdgeCalculator`];
//! validation happens once at construction.
//!
//! Distances are metres, angles radians.
//!
//! [`EdgeCalculator`]: super::EdgeCalculator

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Upper bound on `pano_max_items`: one slice per degree.
pub const MAX_PANO_ITEMS: usize = 360;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeCalculatorSettings {
    // === Pano ===
    pub pano_min_distance: f64,
    pub pano_max_distance: f64,
    pub pano_preferred_distance: f64,
    /// Number of equal angular slices around the source, at most
    /// [`MAX_PANO_ITEMS`].
    pub pano_max_items: usize,

    // === Step ===
    pub step_min_distance: f64,
    pub step_max_distance: f64,
    pub step_preferred_distance: f64,
    /// Largest viewing-direction change a step may have.
    pub step_max_direction_change: f64,
    /// Largest deviation of motion from the step direction.
    pub step_max_drift: f64,

    // === Turn ===
    pub turn_max_distance: f64,
    /// Tolerance around each turn's target direction change.
    pub turn_max_direction_change: f64,
    pub turn_max_vertical_motion: f64,
    pub turn_max_rig_distance: f64,
    pub turn_min_rig_direction_change: f64,

    // === Sequence ===
    pub sequence_min_distance: f64,
    pub sequence_preferred_distance: f64,
    pub sequence_max_distance: f64,
}

impl Default for EdgeCalculatorSettings {
    fn default() -> Self {
        Self {
            pano_min_distance: 0.1,
            pano_max_distance: 20.0,
            pano_preferred_distance: 5.0,
            pano_max_items: 4,

            step_min_distance: 1.0,
            step_max_distance: 20.0,
            step_preferred_distance: 4.0,
            step_max_direction_change: PI / 6.0,
            step_max_drift: PI / 3.0,

            turn_max_distance: 15.0,
            turn_max_direction_change: 2.0 * PI / 9.0,
            turn_max_vertical_motion: PI / 4.0,
            turn_max_rig_distance: 0.65,
            turn_min_rig_direction_change: PI / 6.0,

            sequence_min_distance: 0.0,
            sequence_preferred_distance: 3.0,
            sequence_max_distance: 100.0,
        }
    }
}

impl EdgeCalculatorSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    ///
    /// ```
    /// use pano_edges::EdgeCalculatorSettings;
    ///
    /// let settings = EdgeCalculatorSettings::from_json(r#"{"pano_max_items": 8}"#).unwrap();
    /// assert_eq!(settings.pano_max_items, 8);
    /// assert_eq!(settings.pano_max_distance, 20.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Largest distance any edge kind accepts. Candidates beyond it are
    /// never turned into potential edges.
    pub fn max_distance(&self) -> f64 {
        self.pano_max_distance
            .max(self.step_max_distance)
            .max(self.turn_max_distance)
            .max(self.sequence_max_distance)
    }

    /// Reject non-finite, negative or inverted thresholds.
    pub fn validate(&self) -> Result<()> {
        window(
            ("pano_min_distance", self.pano_min_distance),
            ("pano_preferred_distance", self.pano_preferred_distance),
            ("pano_max_distance", self.pano_max_distance),
        )?;
        window(
            ("step_min_distance", self.step_min_distance),
            ("step_preferred_distance", self.step_preferred_distance),
            ("step_max_distance", self.step_max_distance),
        )?;
        window(
            ("sequence_min_distance", self.sequence_min_distance),
            ("sequence_preferred_distance", self.sequence_preferred_distance),
            ("sequence_max_distance", self.sequence_max_distance),
        )?;

        if self.pano_max_items == 0 {
            return Err(invalid("pano_max_items", "must be at least 1".into()));
        }
        if self.pano_max_items > MAX_PANO_ITEMS {
            return Err(invalid(
                "pano_max_items",
                format!("{} exceeds {}", self.pano_max_items, MAX_PANO_ITEMS),
            ));
        }

        non_negative("turn_max_distance", self.turn_max_distance)?;
        non_negative("turn_max_rig_distance", self.turn_max_rig_distance)?;
        if self.turn_max_rig_distance > self.turn_max_distance {
            return Err(invalid(
                "turn_max_rig_distance",
                format!(
                    "{} exceeds turn_max_distance {}",
                    self.turn_max_rig_distance, self.turn_max_distance
                ),
            ));
        }

        tolerance("step_max_direction_change", self.step_max_direction_change)?;
        tolerance("step_max_drift", self.step_max_drift)?;
        tolerance("turn_max_direction_change", self.turn_max_direction_change)?;
        tolerance("turn_max_vertical_motion", self.turn_max_vertical_motion)?;
        tolerance("turn_min_rig_direction_change", self.turn_min_rig_direction_change)?;

        Ok(())
    }
}

fn invalid(field: &'static str, message: String) -> Error {
    Error::InvalidSettings { field, message }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("{} is not a finite non-negative distance", value)));
    }
    Ok(())
}

fn tolerance(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value > PI {
        return Err(invalid(field, format!("{} is outside (0, π]", value)));
    }
    Ok(())
}

type Field = (&'static str, f64);

/// `min <= preferred <= max` with `min < max`.
fn window(min: Field, preferred: Field, max: Field) -> Result<()> {
    for (field, value) in [min, preferred, max] {
        non_negative(field, value)?;
    }

    if min.1 >= max.1 {
        return Err(invalid(min.0, format!("{} is not below {} {}", min.1, max.0, max.1)));
    }
    if preferred.1 < min.1 || preferred.1 > max.1 {
        return Err(invalid(
            preferred.0,
            format!("{} is outside [{}, {}]", preferred.1, min.1, max.1),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        EdgeCalculatorSettings::default().validate().unwrap();
    }

    #[test]
    fn test_inverted_pano_window_rejected() {
        let settings = EdgeCalculatorSettings {
            pano_min_distance: 30.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(Error::InvalidSettings { field, .. }) => assert_eq!(field, "pano_min_distance"),
            other => panic!("expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_preferred_outside_window_rejected() {
        let settings = EdgeCalculatorSettings {
            step_preferred_distance: 50.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(Error::InvalidSettings { field, .. }) => {
                assert_eq!(field, "step_preferred_distance")
            }
            other => panic!("expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_pano_items_rejected() {
        let settings = EdgeCalculatorSettings { pano_max_items: 0, ..Default::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_pano_items_capped() {
        let at_cap = EdgeCalculatorSettings { pano_max_items: MAX_PANO_ITEMS, ..Default::default() };
        assert!(at_cap.validate().is_ok());

        for items in [MAX_PANO_ITEMS + 1, usize::MAX / 2] {
            let settings = EdgeCalculatorSettings { pano_max_items: items, ..Default::default() };
            match settings.validate() {
                Err(Error::InvalidSettings { field, .. }) => assert_eq!(field, "pano_max_items"),
                other => panic!("expected InvalidSettings, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let settings = EdgeCalculatorSettings {
            turn_max_direction_change: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_override() {
        let settings = EdgeCalculatorSettings::from_json(
            r#"{"step_max_distance": 30.0, "turn_max_distance": 10.0}"#,
        )
        .unwrap();
        assert_eq!(settings.step_max_distance, 30.0);
        assert_eq!(settings.turn_max_distance, 10.0);
        assert_eq!(settings.pano_max_items, 4);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let result = EdgeCalculatorSettings::from_json(r#"{"sequence_max_distance": -1.0}"#);
        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = EdgeCalculatorSettings::from_json("{ not json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_max_distance() {
        assert_eq!(EdgeCalculatorSettings::default().max_distance(), 100.0);
    }
}
