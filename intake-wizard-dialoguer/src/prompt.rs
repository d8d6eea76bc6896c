//! One dialoguer prompt per field kind.

use chrono::NaiveDate;
use dialoguer::theme::Theme;
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};
use intake::{AnswerValue, ChoiceOption, FieldDefinition, FieldKind};

use crate::{DialoguerError, Texts};

/// What the user entered for a field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Entry {
    Value(AnswerValue),
    /// Left empty.
    Cleared,
    /// Could not be parsed; the message to show before asking again.
    Unparsed(String),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

pub(crate) fn interact<T>(result: dialoguer::Result<T>) -> Result<T, DialoguerError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_cancelled(&e) => Err(DialoguerError::Cancelled),
        Err(e) => Err(DialoguerError::Dialoguer(e)),
    }
}

/// Prompt text for a field, marked with `*` when an answer is needed.
pub(crate) fn field_prompt(field: &FieldDefinition, required: bool) -> String {
    if required {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

/// Display text of a choice option, icon first.
pub(crate) fn option_label(option: &ChoiceOption) -> String {
    match &option.icon {
        Some(icon) => format!("{icon} {}", option.label),
        None => option.label.clone(),
    }
}

/// Ask for one field, starting from its current answer.
pub(crate) fn ask(
    theme: &dyn Theme,
    texts: &Texts,
    field: &FieldDefinition,
    required: bool,
    current: Option<&AnswerValue>,
) -> Result<Entry, DialoguerError> {
    let prompt = field_prompt(field, required);

    match field.kind() {
        FieldKind::Text(text) if text.multiline => {
            println!("{prompt}");
            let initial = current.and_then(AnswerValue::as_str).unwrap_or_default();
            let edited = interact(Editor::new().edit(initial))?;
            Ok(text_entry(edited.unwrap_or_default()))
        }

        FieldKind::Text(text) => {
            let mut input = Input::<String>::with_theme(theme)
                .with_prompt(&prompt)
                .allow_empty(true);
            if let Some(existing) = current.and_then(AnswerValue::as_str) {
                input = input.with_initial_text(existing);
            } else if let Some(placeholder) = &text.placeholder {
                println!("  ({placeholder})");
            }
            Ok(text_entry(interact(input.interact_text())?))
        }

        FieldKind::Int(_) => {
            let raw = ask_raw(theme, &prompt, current.and_then(AnswerValue::as_int))?;
            Ok(parse_int(&raw).unwrap_or_else(|| Entry::Unparsed(texts.invalid_number.clone())))
        }

        FieldKind::Float(_) => {
            let raw = ask_raw(theme, &prompt, current.and_then(AnswerValue::as_number))?;
            Ok(parse_float(&raw).unwrap_or_else(|| Entry::Unparsed(texts.invalid_number.clone())))
        }

        FieldKind::Date(_) => {
            let raw = ask_raw(
                theme,
                &format!("{prompt} (YYYY-MM-DD)"),
                current.and_then(AnswerValue::as_date),
            )?;
            Ok(parse_date(&raw).unwrap_or_else(|| Entry::Unparsed(texts.invalid_date.clone())))
        }

        FieldKind::Bool(_) => {
            let value = interact(
                Confirm::with_theme(theme)
                    .with_prompt(&prompt)
                    .default(current.and_then(AnswerValue::as_bool).unwrap_or(false))
                    .interact(),
            )?;
            Ok(Entry::Value(AnswerValue::Bool(value)))
        }

        FieldKind::Choice(choices) => {
            let items: Vec<String> = choices.options().iter().map(option_label).collect();
            let selected = current
                .and_then(AnswerValue::as_str)
                .and_then(|value| choices.options().iter().position(|o| o.value == value))
                .unwrap_or(0);
            let index = interact(
                Select::with_theme(theme)
                    .with_prompt(&prompt)
                    .items(&items)
                    .default(selected)
                    .interact(),
            )?;
            Ok(Entry::Value(AnswerValue::Choice(
                choices.options()[index].value.clone(),
            )))
        }

        FieldKind::MultiChoice(choices) => {
            let items: Vec<String> = choices.options().iter().map(option_label).collect();
            let defaults: Vec<bool> = choices
                .options()
                .iter()
                .map(|o| {
                    current
                        .and_then(AnswerValue::as_choices)
                        .is_some_and(|set| set.contains(&o.value))
                })
                .collect();
            let indices = interact(
                MultiSelect::with_theme(theme)
                    .with_prompt(&prompt)
                    .items(&items)
                    .defaults(&defaults)
                    .interact(),
            )?;
            Ok(Entry::Value(AnswerValue::choices(
                indices
                    .into_iter()
                    .map(|i| choices.options()[i].value.clone()),
            )))
        }
    }
}

fn ask_raw<T: ToString>(
    theme: &dyn Theme,
    prompt: &str,
    current: Option<T>,
) -> Result<String, DialoguerError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(existing) = current {
        input = input.with_initial_text(existing.to_string());
    }
    interact(input.interact_text())
}

fn text_entry(raw: String) -> Entry {
    let trimmed = raw.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        Entry::Cleared
    } else {
        Entry::Value(AnswerValue::Text(trimmed.to_string()))
    }
}

/// `None` means the text is not a whole number.
pub(crate) fn parse_int(raw: &str) -> Option<Entry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Entry::Cleared);
    }
    raw.parse::<i64>()
        .ok()
        .map(|n| Entry::Value(AnswerValue::Int(n)))
}

/// Accepts a decimal comma as well as a point.
pub(crate) fn parse_float(raw: &str) -> Option<Entry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Entry::Cleared);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| Entry::Value(AnswerValue::Float(n)))
}

/// `YYYY-MM-DD` or `DD/MM/YYYY`.
pub(crate) fn parse_date(raw: &str) -> Option<Entry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Entry::Cleared);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .map(|d| Entry::Value(AnswerValue::Date(d)))
}
