use super::SCHEMA_VERSION;
use crate::config::Config;
use crate::error::{MosaicError, Result, ValidationError};
use crate::grid::{AnimRange, ColorRange, CornerRadius};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_grid(config, &mut errors);
        Self::validate_sentiment(config, &mut errors);
        Self::validate_sunburst(config, &mut errors);
        Self::validate_palette(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MosaicError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_grid(config: &Config, errors: &mut Vec<ValidationError>) {
        let grid = &config.grid;
        if grid.cols == 0 {
            errors.push(ValidationError::new(
                "grid.cols",
                "Column count must be greater than 0",
            ));
        }
        if grid.rows == 0 {
            errors.push(ValidationError::new(
                "grid.rows",
                "Row count must be greater than 0",
            ));
        }

        // Cutoffs must be ordered so that every block size stays reachable
        let c = &grid.style.cutoffs;
        if !(0.0 <= c.tall && c.tall < c.wide && c.wide < c.big && c.big <= 1.0) {
            errors.push(ValidationError::new(
                "grid.style.cutoffs",
                format!(
                    "Cutoffs must satisfy 0 <= tall < wide < big <= 1, got {} / {} / {}",
                    c.tall, c.wide, c.big
                ),
            ));
        }

        Self::check_color_range("grid.style.saturation", &grid.style.saturation, 100.0, errors);
        Self::check_color_range("grid.style.lightness", &grid.style.lightness, 100.0, errors);
        Self::check_anim_range("grid.style.delay", &grid.style.delay, errors);
        Self::check_anim_range("grid.style.duration", &grid.style.duration, errors);

        let radius_ok = match grid.style.corner_radius {
            CornerRadius::Fixed { px } => px >= 0.0,
            CornerRadius::Random { base, span } => base >= 0.0 && span >= 0.0,
        };
        if !radius_ok {
            errors.push(ValidationError::new(
                "grid.style.corner_radius",
                "Corner radius cannot be negative",
            ));
        }
    }

    fn check_color_range(
        path: &str,
        range: &ColorRange,
        ceiling: f64,
        errors: &mut Vec<ValidationError>,
    ) {
        if range.min > range.max {
            errors.push(ValidationError::new(
                path,
                format!("min ({}) must not exceed max ({})", range.min, range.max),
            ));
        }
        if range.min < 0.0 || range.max > ceiling {
            errors.push(ValidationError::new(
                path,
                format!("Range must stay within 0..={}", ceiling),
            ));
        }
    }

    fn check_anim_range(path: &str, range: &AnimRange, errors: &mut Vec<ValidationError>) {
        if range.base < 0.0 || range.span < 0.0 {
            errors.push(ValidationError::new(
                path,
                "Animation base and span cannot be negative",
            ));
        }
    }

    fn validate_sentiment(config: &Config, errors: &mut Vec<ValidationError>) {
        let t = &config.sentiment;
        if !(t.critical < t.positive) {
            errors.push(ValidationError::new(
                "sentiment",
                format!(
                    "Critical threshold ({}) must be below positive threshold ({})",
                    t.critical, t.positive
                ),
            ));
        }
    }

    fn validate_sunburst(config: &Config, errors: &mut Vec<ValidationError>) {
        let s = &config.sunburst;
        if !(s.width > 0.0) {
            errors.push(ValidationError::new(
                "sunburst.width",
                "Width must be greater than 0",
            ));
        }
        if !(s.height > 0.0) {
            errors.push(ValidationError::new(
                "sunburst.height",
                "Height must be greater than 0",
            ));
        }
        if s.margin < 0.0 || s.width.min(s.height) / 2.0 <= s.margin {
            errors.push(ValidationError::new(
                "sunburst.margin",
                format!("Margin {} leaves no room for rings", s.margin),
            ));
        }
        if !(s.center_ratio > 0.0 && s.center_ratio < 1.0) {
            errors.push(ValidationError::new(
                "sunburst.center_ratio",
                format!("Center ratio must be in (0, 1), got {}", s.center_ratio),
            ));
        }
        if s.pad_angle < 0.0 {
            errors.push(ValidationError::new(
                "sunburst.pad_angle",
                "Pad angle cannot be negative",
            ));
        }
    }

    fn validate_palette(config: &Config, errors: &mut Vec<ValidationError>) {
        let shade = &config.palette.leaf_shade;
        if shade.floor < 0.0 || shade.span < 0.0 || shade.floor + shade.span > 1.0 {
            errors.push(ValidationError::new(
                "palette.leaf_shade",
                format!(
                    "floor + span must stay within 0..=1, got {} + {}",
                    shade.floor, shade.span
                ),
            ));
        }
        if config.palette.clusters.is_empty() {
            errors.push(ValidationError::new(
                "palette.clusters",
                "Cluster palette cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_unordered_cutoffs() {
        let mut config = Config::default();
        config.grid.style.cutoffs.wide = 0.9;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_zero_columns() {
        let mut config = Config::default();
        config.grid.cols = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_inverted_thresholds() {
        let mut config = Config::default();
        config.sentiment.positive = -0.2;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = Config::default();
        config.meta.schema_version = "0.9".to_string();
        config.sunburst.center_ratio = 1.5;
        config.palette.clusters.clear();
        match ConfigValidator::validate(&config) {
            Err(MosaicError::ConfigValidation { errors }) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_margin_too_large() {
        let mut config = Config::default();
        config.sunburst.margin = 300.0;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
