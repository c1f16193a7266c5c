//! The six-field input form
//!
//! Widgets carry the same bounds as server-side validation, so anything the
//! form submits should be accepted. Numeric fields are free-text buffers
//! validated on submit; cylinders and turbo cycle through fixed options.

use appraise_core::features::{
    max_prod_year, CYLINDER_OPTIONS, MAX_AIRBAGS, MAX_ENGINE_VOLUME, MAX_MILEAGE,
    MIN_ENGINE_VOLUME, MIN_PROD_YEAR,
};
use appraise_core::CarFeatures;

/// Field positions within the form
pub const PROD_YEAR: usize = 0;
pub const ENGINE_VOLUME: usize = 1;
pub const MILEAGE: usize = 2;
pub const CYLINDERS: usize = 3;
pub const AIRBAGS: usize = 4;
pub const TURBO: usize = 5;

/// Editable state of one form field
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Free-text integer input
    Int { buffer: String },
    /// Free-text decimal input
    Float { buffer: String },
    /// One of a fixed set of numeric options
    Choice {
        options: &'static [u8],
        index: usize,
    },
    /// Yes/no flag
    Toggle { on: bool },
}

/// One labelled input widget
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub hint: String,
    pub value: FieldValue,
}

impl Field {
    /// Rendered value text.
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Int { buffer } | FieldValue::Float { buffer } => buffer.clone(),
            FieldValue::Choice { options, index } => options[*index].to_string(),
            FieldValue::Toggle { on } => if *on { "Yes" } else { "No" }.to_string(),
        }
    }

    /// Whether the field takes typed input (vs cycling).
    pub fn is_editable(&self) -> bool {
        matches!(
            self.value,
            FieldValue::Int { .. } | FieldValue::Float { .. }
        )
    }
}

/// The prediction input form
pub struct Form {
    pub fields: Vec<Field>,
    pub selected: usize,
}

impl Form {
    /// Form with the default car: a 2015 2.0 L with 50 000 km on it.
    pub fn new() -> Self {
        let fields = vec![
            Field {
                label: "Production Year",
                hint: format!("{}-{}", MIN_PROD_YEAR, max_prod_year()),
                value: FieldValue::Int {
                    buffer: "2015".to_string(),
                },
            },
            Field {
                label: "Engine Volume (L)",
                hint: format!("{MIN_ENGINE_VOLUME}-{MAX_ENGINE_VOLUME}"),
                value: FieldValue::Float {
                    buffer: "2.0".to_string(),
                },
            },
            Field {
                label: "Mileage (km)",
                hint: format!("0-{MAX_MILEAGE}"),
                value: FieldValue::Int {
                    buffer: "50000".to_string(),
                },
            },
            Field {
                label: "Cylinders",
                hint: format!("{CYLINDER_OPTIONS:?}"),
                value: FieldValue::Choice {
                    options: CYLINDER_OPTIONS,
                    index: 1, // 4 cylinders
                },
            },
            Field {
                label: "Airbags",
                hint: format!("0-{MAX_AIRBAGS}"),
                value: FieldValue::Int {
                    buffer: "2".to_string(),
                },
            },
            Field {
                label: "Turbo",
                hint: "Space to toggle".to_string(),
                value: FieldValue::Toggle { on: false },
            },
        ];

        Self {
            fields,
            selected: 0,
        }
    }

    pub fn selected_field(&self) -> &Field {
        &self.fields[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
    }

    /// Advance a choice field or flip a toggle; no-op on text fields.
    pub fn cycle_selected(&mut self) {
        match &mut self.fields[self.selected].value {
            FieldValue::Choice { options, index } => {
                *index = (*index + 1) % options.len();
            }
            FieldValue::Toggle { on } => *on = !*on,
            _ => {}
        }
    }

    /// Append a character to the selected text buffer. Digits only for
    /// integer fields; one decimal point allowed for float fields.
    pub fn push_char(&mut self, c: char) {
        match &mut self.fields[self.selected].value {
            FieldValue::Int { buffer } if c.is_ascii_digit() => buffer.push(c),
            FieldValue::Float { buffer } => {
                if c.is_ascii_digit() || (c == '.' && !buffer.contains('.')) {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        if let FieldValue::Int { buffer } | FieldValue::Float { buffer } =
            &mut self.fields[self.selected].value
        {
            buffer.pop();
        }
    }

    /// Parse and validate the form into a feature record.
    ///
    /// Errors are human-readable strings ready for the status line.
    pub fn to_features(&self) -> Result<CarFeatures, String> {
        let features = CarFeatures {
            prod_year: parse_num(&self.fields[PROD_YEAR])?,
            engine_volume: parse_num(&self.fields[ENGINE_VOLUME])?,
            mileage: parse_num(&self.fields[MILEAGE])?,
            cylinders: choice_value(&self.fields[CYLINDERS]),
            airbags: parse_num(&self.fields[AIRBAGS])?,
            turbo: toggle_value(&self.fields[TURBO]),
        };
        features.validate().map_err(|e| e.to_string())?;
        Ok(features)
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a text buffer into its target numeric type; overflow of the target
/// type is a parse error, never a silent wrap.
fn parse_num<T: std::str::FromStr>(field: &Field) -> Result<T, String> {
    match &field.value {
        FieldValue::Int { buffer } | FieldValue::Float { buffer } => buffer
            .parse::<T>()
            .map_err(|_| format!("{}: not a valid number", field.label)),
        _ => unreachable!("parse_num on non-text field"),
    }
}

fn choice_value(field: &Field) -> u8 {
    match &field.value {
        FieldValue::Choice { options, index } => options[*index],
        _ => unreachable!("choice_value on non-choice field"),
    }
}

fn toggle_value(field: &Field) -> u8 {
    match &field.value {
        FieldValue::Toggle { on } => u8::from(*on),
        _ => unreachable!("toggle_value on non-toggle field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let features = Form::new().to_features().unwrap();
        assert_eq!(features.prod_year, 2015);
        assert_eq!(features.engine_volume, 2.0);
        assert_eq!(features.mileage, 50_000);
        assert_eq!(features.cylinders, 4);
        assert_eq!(features.airbags, 2);
        assert_eq!(features.turbo, 0);
    }

    #[test]
    fn test_empty_buffer_is_a_parse_error() {
        let mut form = Form::new();
        form.selected = PROD_YEAR;
        for _ in 0..4 {
            form.pop_char();
        }
        let err = form.to_features().unwrap_err();
        assert!(err.contains("Production Year"));
    }

    #[test]
    fn test_out_of_range_year_reported() {
        let mut form = Form::new();
        if let FieldValue::Int { buffer } = &mut form.fields[PROD_YEAR].value {
            *buffer = "1900".to_string();
        }
        let err = form.to_features().unwrap_err();
        assert!(err.contains("prod_year"));
    }

    #[test]
    fn test_engine_volume_hint_matches_accepted_range() {
        let mut form = Form::new();
        let hint = form.fields[ENGINE_VOLUME].hint.clone();
        assert_eq!(hint, "0.1-10");

        // The advertised minimum is accepted, values below it are not
        if let FieldValue::Float { buffer } = &mut form.fields[ENGINE_VOLUME].value {
            *buffer = "0.1".to_string();
        }
        assert!(form.to_features().is_ok());
        if let FieldValue::Float { buffer } = &mut form.fields[ENGINE_VOLUME].value {
            *buffer = "0.05".to_string();
        }
        assert!(form.to_features().unwrap_err().contains("engine_volume"));
    }

    #[test]
    fn test_cycle_cylinders_wraps() {
        let mut form = Form::new();
        form.selected = CYLINDERS;
        for _ in 0..CYLINDER_OPTIONS.len() {
            form.cycle_selected();
        }
        assert_eq!(choice_value(&form.fields[CYLINDERS]), 4);
    }

    #[test]
    fn test_toggle_turbo() {
        let mut form = Form::new();
        form.selected = TURBO;
        form.cycle_selected();
        assert_eq!(form.to_features().unwrap().turbo, 1);
    }

    #[test]
    fn test_float_buffer_allows_single_decimal_point() {
        let mut form = Form::new();
        form.selected = ENGINE_VOLUME;
        form.pop_char();
        form.pop_char();
        form.pop_char(); // buffer now "2" -> pop to ""
        assert_eq!(form.fields[ENGINE_VOLUME].display_value(), "");
        form.push_char('3');
        form.push_char('.');
        form.push_char('.');
        form.push_char('5');
        assert_eq!(form.fields[ENGINE_VOLUME].display_value(), "3.5");
    }

    #[test]
    fn test_int_buffer_rejects_letters() {
        let mut form = Form::new();
        form.selected = MILEAGE;
        form.push_char('x');
        assert_eq!(form.fields[MILEAGE].display_value(), "50000");
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut form = Form::new();
        form.select_prev();
        assert_eq!(form.selected, TURBO);
        form.select_next();
        assert_eq!(form.selected, PROD_YEAR);
    }
}
