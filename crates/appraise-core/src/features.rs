//! The car feature record and its validation bounds
//!
//! Bounds mirror the input widgets of the client form; both sides reject the
//! same values so a request the form allows is never refused by the service.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earliest accepted production year
pub const MIN_PROD_YEAR: i32 = 1950;

/// Smallest accepted engine volume in litres
pub const MIN_ENGINE_VOLUME: f64 = 0.1;

/// Largest accepted engine volume in litres
pub const MAX_ENGINE_VOLUME: f64 = 10.0;

/// Largest accepted mileage in kilometers
pub const MAX_MILEAGE: u32 = 1_000_000;

/// Accepted cylinder counts
pub const CYLINDER_OPTIONS: &[u8] = &[3, 4, 5, 6, 8, 10, 12];

/// Largest accepted airbag count
pub const MAX_AIRBAGS: u8 = 12;

/// Latest accepted production year (the current calendar year)
pub fn max_prod_year() -> i32 {
    chrono::Utc::now().year()
}

/// A single car described by the six features the model was trained on.
///
/// `turbo` is a 0/1 flag rather than a bool because the model consumes it as
/// a numeric feature and the wire format encodes it as an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarFeatures {
    pub prod_year: i32,
    pub engine_volume: f64,
    pub mileage: u32,
    pub cylinders: u8,
    pub airbags: u8,
    pub turbo: u8,
}

impl CarFeatures {
    /// Check every field against its bound, reporting the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let max_year = max_prod_year();
        if self.prod_year < MIN_PROD_YEAR || self.prod_year > max_year {
            return Err(ValidationError::ProdYearOutOfRange {
                value: self.prod_year,
                min: MIN_PROD_YEAR,
                max: max_year,
            });
        }
        if self.engine_volume < MIN_ENGINE_VOLUME
            || self.engine_volume > MAX_ENGINE_VOLUME
            || !self.engine_volume.is_finite()
        {
            return Err(ValidationError::EngineVolumeOutOfRange {
                value: self.engine_volume,
                min: MIN_ENGINE_VOLUME,
                max: MAX_ENGINE_VOLUME,
            });
        }
        if self.mileage > MAX_MILEAGE {
            return Err(ValidationError::MileageOutOfRange {
                value: self.mileage,
                max: MAX_MILEAGE,
            });
        }
        if !CYLINDER_OPTIONS.contains(&self.cylinders) {
            return Err(ValidationError::InvalidCylinderCount {
                value: self.cylinders,
                allowed: CYLINDER_OPTIONS,
            });
        }
        if self.airbags > MAX_AIRBAGS {
            return Err(ValidationError::AirbagsOutOfRange {
                value: self.airbags,
                max: MAX_AIRBAGS,
            });
        }
        if self.turbo > 1 {
            return Err(ValidationError::InvalidTurboFlag { value: self.turbo });
        }
        Ok(())
    }

    /// Look a feature up by the name a model bundle declares.
    ///
    /// Returns `None` for names outside the record; the model surfaces that
    /// as an unknown-feature error rather than guessing.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        match name {
            "prod_year" => Some(self.prod_year as f64),
            "engine_volume" => Some(self.engine_volume),
            "mileage" => Some(self.mileage as f64),
            "cylinders" => Some(self.cylinders as f64),
            "airbags" => Some(self.airbags as f64),
            "turbo" => Some(self.turbo as f64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CarFeatures {
        CarFeatures {
            prod_year: 2015,
            engine_volume: 2.0,
            mileage: 50_000,
            cylinders: 4,
            airbags: 2,
            turbo: 0,
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_prod_year_bounds() {
        let mut f = sample();
        f.prod_year = 1949;
        assert!(matches!(
            f.validate(),
            Err(ValidationError::ProdYearOutOfRange { .. })
        ));
        f.prod_year = max_prod_year() + 1;
        assert!(f.validate().is_err());
        f.prod_year = MIN_PROD_YEAR;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_engine_volume_bounds() {
        let mut f = sample();
        f.engine_volume = 0.0;
        assert!(f.validate().is_err());
        f.engine_volume = 0.05;
        assert!(matches!(
            f.validate(),
            Err(ValidationError::EngineVolumeOutOfRange { .. })
        ));
        f.engine_volume = f64::NAN;
        assert!(f.validate().is_err());
        // The full advertised range is accepted
        f.engine_volume = MIN_ENGINE_VOLUME;
        assert!(f.validate().is_ok());
        f.engine_volume = MAX_ENGINE_VOLUME;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_cylinder_options() {
        let mut f = sample();
        for &c in CYLINDER_OPTIONS {
            f.cylinders = c;
            assert!(f.validate().is_ok());
        }
        f.cylinders = 7;
        assert!(matches!(
            f.validate(),
            Err(ValidationError::InvalidCylinderCount { .. })
        ));
    }

    #[test]
    fn test_turbo_flag() {
        let mut f = sample();
        f.turbo = 1;
        assert!(f.validate().is_ok());
        f.turbo = 2;
        assert!(matches!(
            f.validate(),
            Err(ValidationError::InvalidTurboFlag { value: 2 })
        ));
    }

    #[test]
    fn test_value_of_named_lookup() {
        let f = sample();
        assert_eq!(f.value_of("prod_year"), Some(2015.0));
        assert_eq!(f.value_of("turbo"), Some(0.0));
        assert_eq!(f.value_of("horsepower"), None);
    }
}
