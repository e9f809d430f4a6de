//! Schema validation for movie payloads.
//!
//! A single declarative constraint table drives both validation modes:
//! full (creation) requires every mandatory field, partial (patch) is the
//! same table with the required flags relaxed. Input is walked as raw
//! `serde_json::Value` so every malformed field is reported, not just the
//! first. Validation is pure; it never touches the store.

use serde::Serialize;
use serde_json::Value;

use crate::models::{Genre, MoviePatch, NewMovie};

/// Applied when a creation payload omits `rate`.
pub const DEFAULT_RATE: f64 = 5.0;

/// One structured error for one malformed field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Wrong JSON type for the field.
    Type,
    /// Right type, value outside the allowed range.
    Range,
    /// Value not a member of a closed enum.
    Enum,
    /// Mandatory field absent (or present but empty).
    Required,
}

impl FieldError {
    fn new(field: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, ErrorKind::Required, format!("Movie {field} is required"))
    }

    fn wrong_type(field: &str, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::Type, message)
    }
}

/// Validates a creation payload against the full schema. On success the
/// returned record is normalized: `rate` defaults to 5.0 when absent. An
/// `id` key in the body is ignored; ids are never user-supplied.
pub fn validate_movie(input: &Value) -> Result<NewMovie, Vec<FieldError>> {
    let (patch, errors) = check_fields(input, Mode::Full);
    match complete(patch) {
        Some(movie) if errors.is_empty() => Ok(movie),
        _ => Err(errors),
    }
}

/// Validates a partial payload: every field is optional, but any field
/// present must satisfy its constraint.
pub fn validate_partial_movie(input: &Value) -> Result<MoviePatch, Vec<FieldError>> {
    let (patch, errors) = check_fields(input, Mode::Partial);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

/// A checked, normalized field value on its way into a `MoviePatch`.
enum Checked {
    Text(String),
    Int(i64),
    Float(f64),
    Genres(Vec<Genre>),
}

enum Constraint {
    /// Any JSON string.
    Text,
    /// A JSON string with at least one character.
    NonEmptyText,
    /// A JSON integer within `min..=max`.
    Int {
        min: i64,
        max: i64,
        range_message: &'static str,
    },
    /// A JSON number within 0..=10. Integers are accepted and widened.
    Rate,
    /// A non-empty JSON array of known genre names.
    Genres,
}

struct FieldRule {
    name: &'static str,
    required: bool,
    constraint: Constraint,
    assign: fn(&mut MoviePatch, Checked),
}

const RULES: &[FieldRule] = &[
    FieldRule {
        name: "title",
        required: true,
        constraint: Constraint::NonEmptyText,
        assign: |patch, value| {
            if let Checked::Text(title) = value {
                patch.title = Some(title);
            }
        },
    },
    FieldRule {
        name: "year",
        required: true,
        constraint: Constraint::Int {
            min: 1900,
            max: 2024,
            range_message: "Movie year must be between 1900 and 2024",
        },
        assign: |patch, value| {
            if let Checked::Int(year) = value {
                patch.year = i32::try_from(year).ok();
            }
        },
    },
    FieldRule {
        name: "director",
        required: true,
        constraint: Constraint::Text,
        assign: |patch, value| {
            if let Checked::Text(director) = value {
                patch.director = Some(director);
            }
        },
    },
    FieldRule {
        name: "duration",
        required: true,
        constraint: Constraint::Int {
            min: 1,
            max: i32::MAX as i64,
            range_message: "Movie duration must be greater than 0",
        },
        assign: |patch, value| {
            if let Checked::Int(duration) = value {
                patch.duration = i32::try_from(duration).ok();
            }
        },
    },
    FieldRule {
        name: "rate",
        required: false,
        constraint: Constraint::Rate,
        assign: |patch, value| {
            if let Checked::Float(rate) = value {
                patch.rate = Some(rate);
            }
        },
    },
    FieldRule {
        name: "poster",
        required: true,
        constraint: Constraint::Text,
        assign: |patch, value| {
            if let Checked::Text(poster) = value {
                patch.poster = Some(poster);
            }
        },
    },
    FieldRule {
        name: "genre",
        required: true,
        constraint: Constraint::Genres,
        assign: |patch, value| {
            if let Checked::Genres(genre) = value {
                patch.genre = Some(genre);
            }
        },
    },
];

fn check_fields(input: &Value, mode: Mode) -> (MoviePatch, Vec<FieldError>) {
    let mut patch = MoviePatch::default();
    let mut errors = Vec::new();

    let Some(body) = input.as_object() else {
        errors.push(FieldError::wrong_type(
            "body",
            "Request body must be a JSON object",
        ));
        return (patch, errors);
    };

    for rule in RULES {
        match body.get(rule.name) {
            None => {
                if mode == Mode::Full && rule.required {
                    errors.push(FieldError::missing(rule.name));
                }
            }
            Some(value) => match rule.constraint.check(rule.name, value) {
                Ok(checked) => (rule.assign)(&mut patch, checked),
                Err(mut field_errors) => errors.append(&mut field_errors),
            },
        }
    }

    (patch, errors)
}

/// Promotes a full-mode patch into a creation record. `None` only when a
/// required field is missing, which full mode already reported.
fn complete(patch: MoviePatch) -> Option<NewMovie> {
    Some(NewMovie {
        title: patch.title?,
        year: patch.year?,
        director: patch.director?,
        duration: patch.duration?,
        rate: patch.rate.unwrap_or(DEFAULT_RATE),
        poster: patch.poster?,
        genre: patch.genre?,
    })
}

impl Constraint {
    fn check(&self, field: &'static str, value: &Value) -> Result<Checked, Vec<FieldError>> {
        match self {
            Self::Text => value.as_str().map_or_else(
                || {
                    Err(vec![FieldError::wrong_type(
                        field,
                        format!("Movie {field} must be a string"),
                    )])
                },
                |text| Ok(Checked::Text(text.to_string())),
            ),
            Self::NonEmptyText => match value.as_str() {
                None => Err(vec![FieldError::wrong_type(
                    field,
                    format!("Movie {field} must be a string"),
                )]),
                Some("") => Err(vec![FieldError::new(
                    field,
                    ErrorKind::Required,
                    format!("Movie {field} must not be empty"),
                )]),
                Some(text) => Ok(Checked::Text(text.to_string())),
            },
            Self::Int {
                min,
                max,
                range_message,
            } => match value.as_i64() {
                None => Err(vec![FieldError::wrong_type(
                    field,
                    format!("Movie {field} must be an integer"),
                )]),
                Some(n) if n < *min || n > *max => Err(vec![FieldError::new(
                    field,
                    ErrorKind::Range,
                    *range_message,
                )]),
                Some(n) => Ok(Checked::Int(n)),
            },
            Self::Rate => match value.as_f64() {
                None => Err(vec![FieldError::wrong_type(
                    field,
                    "Movie rate must be a number",
                )]),
                Some(rate) if !(0.0..=10.0).contains(&rate) => Err(vec![FieldError::new(
                    field,
                    ErrorKind::Range,
                    "Movie rate must be between 0 and 10",
                )]),
                Some(rate) => Ok(Checked::Float(rate)),
            },
            Self::Genres => check_genres(field, value),
        }
    }
}

fn check_genres(field: &'static str, value: &Value) -> Result<Checked, Vec<FieldError>> {
    let Some(items) = value.as_array() else {
        return Err(vec![FieldError::wrong_type(
            field,
            "Movie genre must be an array of enum genre",
        )]);
    };

    if items.is_empty() {
        return Err(vec![FieldError::new(
            field,
            ErrorKind::Required,
            "Movie genre must not be empty",
        )]);
    }

    let mut genres = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for item in items {
        match item.as_str() {
            None => errors.push(FieldError::wrong_type(
                field,
                "Movie genre must be an array of enum genre",
            )),
            Some(name) => match Genre::from_name(name) {
                Some(genre) => genres.push(genre),
                None => errors.push(FieldError::new(
                    field,
                    ErrorKind::Enum,
                    format!("Unknown movie genre: {name}"),
                )),
            },
        }
    }

    if errors.is_empty() {
        Ok(Checked::Genres(genres))
    } else {
        Err(errors)
    }
}
