//! Static per-field rules and step completeness.
//!
//! Everything here is a pure function of a `FormDefinition` and an `AnswerSet`:
//! no side effects, and running it twice on the same answers gives the same result.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{AnswerSet, AnswerValue, FieldDefinition, FieldId, FieldKind, FormDefinition, TextFormat};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-() ]{9,15}$").expect("phone pattern compiles"));

/// Field id -> message for every field that currently fails its rule.
///
/// No entry for a field means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldId, String>,
}

impl ValidationErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<FieldId>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Remove the message for a field.
    pub fn remove(&mut self, field: &FieldId) -> Option<String> {
        self.errors.remove(field)
    }

    /// Get the message for a field.
    pub fn get(&self, field: &FieldId) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Check if the field has a message.
    pub fn contains(&self, field: &FieldId) -> bool {
        self.errors.contains_key(field)
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Get an iterator over all field-message pairs, ordered by field id.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// How much of a field's rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    /// Shape, format and option membership only.
    Syntax,
    /// Everything, including numeric and date ranges.
    Full,
}

/// Run the full rule of one field against the current answers.
///
/// Fields whose requirement is inactive (a conditional field whose condition
/// does not hold) always pass. Optional fields pass while empty.
pub fn check_field(field: &FieldDefinition, answers: &AnswerSet) -> Result<(), String> {
    check(field, answers, Depth::Full).map_err(|generic| {
        field
            .message()
            .map(ToString::to_string)
            .unwrap_or(generic)
    })
}

/// Validate every field of the form.
pub fn validate_all(form: &FormDefinition, answers: &AnswerSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in form.fields() {
        if let Err(message) = check_field(field, answers) {
            errors.insert(field.id().clone(), message);
        }
    }
    errors
}

/// Whether every required field of the 1-based `step` is filled in and syntactically valid.
///
/// Conditional fields count only while their condition holds; optional fields
/// never block. Range rules are left to [`validate_all`]. Steps outside
/// `1..=N` are never complete.
pub fn is_step_complete(form: &FormDefinition, step: usize, answers: &AnswerSet) -> bool {
    if form.step(step).is_none() {
        return false;
    }
    form.step_fields(step).all(|field| {
        !field.requirement().is_required(answers) || check(field, answers, Depth::Syntax).is_ok()
    })
}

fn check(field: &FieldDefinition, answers: &AnswerSet, depth: Depth) -> Result<(), String> {
    let requirement = field.requirement();
    if !requirement.is_active(answers) {
        return Ok(());
    }
    match answers.get(field.id()) {
        Some(value) if !value.is_blank() => check_value(field.kind(), value, depth),
        _ if requirement.is_required(answers) => Err(required_message(field.kind())),
        _ => Ok(()),
    }
}

fn required_message(kind: &FieldKind) -> String {
    match kind {
        FieldKind::MultiChoice(_) => "Select at least one option".into(),
        FieldKind::Choice(_) => "Select an option".into(),
        FieldKind::Bool(b) if b.must_be_true => "You must accept to continue".into(),
        _ => "This field is required".into(),
    }
}

fn check_value(kind: &FieldKind, value: &AnswerValue, depth: Depth) -> Result<(), String> {
    if !kind.accepts(value) {
        return Err(format!(
            "Expected a {} value, got {}",
            kind.value_type(),
            value.type_name()
        ));
    }

    match (kind, value) {
        (FieldKind::Text(text), AnswerValue::Text(s)) => match text.format {
            Some(TextFormat::Email) if !EMAIL.is_match(s.trim()) => {
                Err("Enter a valid email (e.g., you@example.com)".into())
            }
            Some(TextFormat::Phone) if !PHONE.is_match(s.trim()) => {
                Err("Enter a valid phone number (9 to 15 digits)".into())
            }
            _ => Ok(()),
        },
        (FieldKind::Bool(b), AnswerValue::Bool(v)) => {
            if b.must_be_true && !v {
                Err("You must accept to continue".into())
            } else {
                Ok(())
            }
        }
        (FieldKind::Choice(choice), AnswerValue::Choice(s)) => {
            if choice.contains(s) {
                Ok(())
            } else {
                Err(format!("'{s}' is not one of the available options"))
            }
        }
        (FieldKind::MultiChoice(choice), AnswerValue::Choices(set)) => {
            match set.iter().find(|s| !choice.contains(s)) {
                Some(s) => Err(format!("'{s}' is not one of the available options")),
                None => Ok(()),
            }
        }
        (FieldKind::Float(_), v) if v.as_number().is_some_and(|n| !n.is_finite()) => {
            Err("Enter a number".into())
        }
        _ if depth == Depth::Syntax => Ok(()),
        (FieldKind::Int(int), AnswerValue::Int(i)) => check_range(*i, int.min, int.max),
        (FieldKind::Float(float), v) => match v.as_number() {
            Some(n) => check_range(n, float.min, float.max),
            None => Ok(()),
        },
        (FieldKind::Date(date), AnswerValue::Date(d)) => check_range(*d, date.min, date.max),
        _ => Ok(()),
    }
}

fn check_range<T>(value: T, min: Option<T>, max: Option<T>) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    let below = min.is_some_and(|m| value < m);
    let above = max.is_some_and(|m| value > m);
    if !below && !above {
        return Ok(());
    }
    Err(match (min, max) {
        (Some(min), Some(max)) => format!("Value must be between {min} and {max}"),
        (Some(min), None) => format!("Value must be at least {min}"),
        (None, Some(max)) => format!("Value must be at most {max}"),
        (None, None) => unreachable!("a bound was violated"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ChoiceField;

    fn form() -> FormDefinition {
        FormDefinition::builder()
            .step_with_fields(
                "Datos",
                None,
                [
                    FieldDefinition::text("nombre", "Nombre").required(),
                    FieldDefinition::int("edad", "Edad", Some(16), Some(100))
                        .required()
                        .with_message("La edad debe estar entre 16 y 100 años"),
                    FieldDefinition::float("peso", "Peso", Some(30.0), Some(300.0)),
                    FieldDefinition::email("email", "Email").required(),
                    FieldDefinition::phone("telefono", "Teléfono").required(),
                ],
            )
            .step_with_fields(
                "Salud",
                None,
                [
                    FieldDefinition::toggle("condicion", "¿Condición médica?"),
                    FieldDefinition::text("detalle", "Detalle").required_when_true("condicion"),
                    FieldDefinition::date("fecha", "Fecha"),
                ],
            )
            .step_with_fields(
                "Objetivos",
                None,
                [
                    FieldDefinition::multi_choice(
                        "objetivos",
                        "Objetivos",
                        ChoiceField::from_values(["Tonificar", "otro"]),
                    )
                    .required(),
                    FieldDefinition::choice(
                        "lugar",
                        "Lugar",
                        ChoiceField::from_values(["Casa", "Gimnasio"]),
                    )
                    .required(),
                    FieldDefinition::consent("terminos", "Acepto"),
                ],
            )
            .build()
            .unwrap()
    }

    fn valid_answers(form: &FormDefinition) -> AnswerSet {
        let mut answers = form.initial_answers();
        answers.insert("nombre", "Ana");
        answers.insert("edad", 30);
        answers.insert("email", "ana@example.com");
        answers.insert("telefono", "+34 612 345 678");
        answers.insert("objetivos", AnswerValue::choices(["Tonificar"]));
        answers.insert("lugar", AnswerValue::Choice("Casa".into()));
        answers.insert("terminos", true);
        answers
    }

    fn id(s: &str) -> FieldId {
        FieldId::new(s)
    }

    #[test]
    fn valid_answers_have_no_errors() {
        let form = form();
        let errors = validate_all(&form, &valid_answers(&form));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn validation_is_idempotent() {
        let form = form();
        let answers = form.initial_answers();
        let first = validate_all(&form, &answers);
        let second = validate_all(&form, &answers);
        assert_eq!(first, second);
        assert!(first.contains(&id("nombre")));
        assert!(first.contains(&id("objetivos")));
        assert!(first.contains(&id("terminos")));
    }

    #[test]
    fn age_range() {
        let form = form();
        let mut answers = valid_answers(&form);

        answers.insert("edad", 15);
        let errors = validate_all(&form, &answers);
        assert_eq!(
            errors.get(&id("edad")),
            Some("La edad debe estar entre 16 y 100 años")
        );

        answers.insert("edad", 16);
        assert!(!validate_all(&form, &answers).contains(&id("edad")));
    }

    #[test]
    fn optional_weight_checked_only_when_present() {
        let form = form();
        let mut answers = valid_answers(&form);
        assert!(!validate_all(&form, &answers).contains(&id("peso")));

        answers.insert("peso", 25.5);
        assert_eq!(
            validate_all(&form, &answers).get(&id("peso")),
            Some("Value must be between 30 and 300")
        );

        answers.insert("peso", 72);
        assert!(!validate_all(&form, &answers).contains(&id("peso")));
    }

    #[test]
    fn phone_format() {
        let form = form();
        let mut answers = valid_answers(&form);

        answers.insert("telefono", "12345");
        assert!(validate_all(&form, &answers).contains(&id("telefono")));

        answers.insert("telefono", "+34 612 345 678");
        assert!(!validate_all(&form, &answers).contains(&id("telefono")));

        answers.insert("telefono", "612-345-678x");
        assert!(validate_all(&form, &answers).contains(&id("telefono")));
    }

    #[test]
    fn email_format() {
        let form = form();
        let mut answers = valid_answers(&form);

        for bad in ["ana", "ana@example", "@example.com", "ana @example.com"] {
            answers.insert("email", bad);
            assert!(
                validate_all(&form, &answers).contains(&id("email")),
                "{bad} should fail"
            );
        }

        answers.insert("email", "");
        assert_eq!(
            validate_all(&form, &answers).get(&id("email")),
            Some("This field is required")
        );
    }

    #[test]
    fn conditional_detail_ignored_once_governing_is_false() {
        let form = form();
        let mut answers = valid_answers(&form);

        answers.insert("condicion", true);
        assert!(validate_all(&form, &answers).contains(&id("detalle")));

        answers.insert("detalle", "Asma");
        assert!(!validate_all(&form, &answers).contains(&id("detalle")));

        answers.insert("detalle", "   ");
        answers.insert("condicion", false);
        assert!(validate_all(&form, &answers).is_empty());
    }

    #[test]
    fn consent_must_be_true() {
        let form = form();
        let mut answers = valid_answers(&form);
        answers.insert("terminos", false);
        assert_eq!(
            validate_all(&form, &answers).get(&id("terminos")),
            Some("You must accept to continue")
        );
    }

    #[test]
    fn unknown_option_and_wrong_type() {
        let form = form();
        let mut answers = valid_answers(&form);
        answers.insert("lugar", AnswerValue::Choice("Parque".into()));
        answers.insert("nombre", 42);
        let errors = validate_all(&form, &answers);
        assert_eq!(
            errors.get(&id("lugar")),
            Some("'Parque' is not one of the available options")
        );
        assert_eq!(
            errors.get(&id("nombre")),
            Some("Expected a Text value, got Int")
        );
    }

    #[test]
    fn date_bounds() {
        let field = FieldDefinition::new(
            "fecha",
            "Fecha",
            FieldKind::Date(crate::DateField {
                min: NaiveDate::from_ymd_opt(2026, 1, 1),
                max: None,
            }),
        );
        let mut answers = AnswerSet::new();
        answers.insert("fecha", NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(
            check_field(&field, &answers),
            Err("Value must be at least 2026-01-01".to_string())
        );
        answers.insert("fecha", NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(check_field(&field, &answers), Ok(()));
    }

    #[test]
    fn step_completeness_ignores_ranges() {
        let form = form();
        let mut answers = form.initial_answers();
        assert!(!is_step_complete(&form, 1, &answers));

        answers.insert("nombre", "Ana");
        answers.insert("edad", 15);
        answers.insert("email", "ana@example.com");
        answers.insert("telefono", "12345");
        assert!(!is_step_complete(&form, 1, &answers));

        answers.insert("telefono", "612345678");
        assert!(is_step_complete(&form, 1, &answers));
    }

    #[test]
    fn step_completeness_follows_conditions() {
        let form = form();
        let mut answers = form.initial_answers();
        assert!(is_step_complete(&form, 2, &answers));

        answers.insert("condicion", true);
        assert!(!is_step_complete(&form, 2, &answers));

        answers.insert("detalle", "Asma");
        assert!(is_step_complete(&form, 2, &answers));
    }

    #[test]
    fn step_completeness_needs_one_goal() {
        let form = form();
        let mut answers = form.initial_answers();
        answers.insert("lugar", AnswerValue::Choice("Casa".into()));
        answers.insert("terminos", true);
        assert!(!is_step_complete(&form, 3, &answers));

        answers.insert("objetivos", AnswerValue::choices(["otro"]));
        assert!(is_step_complete(&form, 3, &answers));
    }

    #[test]
    fn out_of_range_steps_are_incomplete() {
        let form = form();
        let answers = valid_answers(&form);
        assert!(!is_step_complete(&form, 0, &answers));
        assert!(!is_step_complete(&form, 4, &answers));
    }

    #[test]
    fn unbounded_float_rejects_infinity() {
        let field = FieldDefinition::float("peso", "Peso", None, None).required();
        let mut answers = AnswerSet::new();

        answers.insert("peso", f64::INFINITY);
        assert_eq!(check_field(&field, &answers), Err("Enter a number".to_string()));
        answers.insert("peso", f64::NEG_INFINITY);
        assert!(check(&field, &answers, Depth::Syntax).is_err());

        answers.insert("peso", 72.5);
        assert_eq!(check_field(&field, &answers), Ok(()));
    }
}
