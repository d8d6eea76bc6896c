//! Chat link offered once the assessment has been sent.

use intake::{AnswerSet, FieldId};
use intake_http::{IntakeConfig, MessagingError, Url, deep_link};

use crate::consts::TRAINER_NAME;

/// Opening message for the trainer, built from the submitted answers.
pub fn greeting(answers: &AnswerSet) -> String {
    let trainer = TRAINER_NAME
        .split_whitespace()
        .next()
        .unwrap_or(TRAINER_NAME);
    let mut text = format!("¡Hola {trainer}!");

    if let Ok(name) = answers.get_text(&FieldId::new("nombreCompleto")) {
        text.push_str(&format!(" Soy {}.", name.trim()));
    }
    text.push_str(" Acabo de completar el formulario de evaluación.");
    if let Ok(phone) = answers.get_text(&FieldId::new("telefono")) {
        text.push_str(&format!(" Mi teléfono es {}.", phone.trim()));
    }
    text
}

/// Deep link to a chat with the trainer, pre-filled with `greeting`.
///
/// `None` when the config names no trainer phone.
pub fn follow_up_link(
    config: &IntakeConfig,
    answers: &AnswerSet,
) -> Result<Option<Url>, MessagingError> {
    let Some(phone) = config.trainer_phone.as_deref() else {
        return Ok(None);
    };
    deep_link(&config.messaging_host, phone, &greeting(answers)).map(Some)
}
