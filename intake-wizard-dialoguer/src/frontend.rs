//! Dialoguer front end driving a `WizardController`.

use dialoguer::Select;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use intake::{
    FieldId, Submission, SubmitOutcome, Submitter, WizardController, WizardError,
};
use thiserror::Error;
use tracing::debug;

use crate::prompt::{self, Entry};

/// Error type for the Dialoguer front end.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the wizard (e.g., pressed Ctrl+C or Escape).
    #[error("Wizard cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The controller refused an edit.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The controller was handed over after it had already submitted.
    #[error("The form has already been submitted")]
    AlreadySubmitted,
}

/// Words the front end prints around the form's own labels.
#[derive(Debug, Clone)]
pub struct Texts {
    pub next: String,
    pub back: String,
    pub submit: String,
    pub choose_action: String,
    pub invalid_number: String,
    pub invalid_date: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            next: "Next".into(),
            back: "Back".into(),
            submit: "Submit".into(),
            choose_action: "What next?".into(),
            invalid_number: "Enter a number".into(),
            invalid_date: "Enter a date as YYYY-MM-DD".into(),
        }
    }
}

/// Navigation choices offered below a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Next,
    Back,
    Submit,
}

/// Dialoguer front end for interactive CLI intake.
///
/// Each step asks its visible fields in order, checking every answer as it
/// is entered, then offers next/back or submit. Conditional fields appear
/// only while their condition holds.
#[derive(Debug, Clone)]
pub struct DialoguerWizard {
    /// Use colorful theme for prompts.
    colorful: bool,
    texts: Texts,
}

impl Default for DialoguerWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerWizard {
    /// Create a front end with the colorful theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            texts: Texts::default(),
        }
    }

    /// Create a front end with the plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            ..Self::new()
        }
    }

    /// Replace the navigation and parse-error texts.
    pub fn with_texts(mut self, texts: Texts) -> Self {
        self.texts = texts;
        self
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Walk the wizard until the answers are submitted or the user cancels.
    ///
    /// Submission failures are shown and the user may retry; they never end the run.
    pub fn run(
        &self,
        wizard: &mut WizardController,
        submitter: &impl Submitter,
    ) -> Result<Submission, DialoguerError> {
        let theme = self.theme();

        if let Some(prelude) = &wizard.form().prelude {
            println!("{prelude}");
            println!();
        }

        let mut ask_fields = true;
        loop {
            let Some(step) = wizard.current_step() else {
                return Err(DialoguerError::AlreadySubmitted);
            };

            if ask_fields {
                println!();
                println!("{}", step_header(wizard));
                self.ask_step(theme.as_ref(), wizard, step)?;
            }
            ask_fields = true;

            let action = self.choose_action(theme.as_ref(), wizard)?;
            debug!(step, ?action, "navigation");
            match action {
                Action::Back => {
                    wizard.retreat();
                }
                Action::Next => {
                    if !wizard.advance()
                        && let Some(helper) = wizard.helper_message()
                    {
                        println!("⚠️ {helper}");
                    }
                }
                Action::Submit => match wizard.submit(submitter) {
                    SubmitOutcome::Submitted(submission) => {
                        println!();
                        println!("{}", wizard.form().success_message());
                        if let Some(epilogue) = &wizard.form().epilogue {
                            println!("{epilogue}");
                        }
                        return Ok(submission);
                    }
                    SubmitOutcome::Invalid(_) => {
                        for (field, message) in wizard.errors().iter() {
                            println!("✗ {}: {message}", field_label(wizard, field));
                        }
                        go_to_first_error(wizard);
                    }
                    SubmitOutcome::Failed(notice) => {
                        println!("✗ {notice}");
                        wizard.dismiss_notice();
                        ask_fields = false;
                    }
                    SubmitOutcome::NotReady => {}
                    SubmitOutcome::AlreadySubmitted => {
                        return Err(DialoguerError::AlreadySubmitted);
                    }
                },
            }
        }
    }

    fn ask_step(
        &self,
        theme: &dyn Theme,
        wizard: &mut WizardController,
        step: usize,
    ) -> Result<(), DialoguerError> {
        let ids: Vec<FieldId> = wizard
            .form()
            .step(step)
            .map(|s| s.fields().to_vec())
            .unwrap_or_default();

        // Visibility is checked per field so a toggle answered earlier on the
        // step can reveal its detail field.
        for id in ids {
            if !is_visible(wizard, &id) {
                continue;
            }
            self.ask_until_valid(theme, wizard, &id)?;
        }
        Ok(())
    }

    fn ask_until_valid(
        &self,
        theme: &dyn Theme,
        wizard: &mut WizardController,
        id: &FieldId,
    ) -> Result<(), DialoguerError> {
        let Some(field) = wizard.form().field(id).cloned() else {
            return Err(WizardError::UnknownField(id.clone()).into());
        };

        loop {
            let required = field.requirement().is_required(wizard.answers());
            let entry = prompt::ask(theme, &self.texts, &field, required, wizard.answers().get(id))?;
            match entry {
                Entry::Value(value) => wizard.set(id.clone(), value)?,
                Entry::Cleared => wizard.clear(id.clone())?,
                Entry::Unparsed(message) => {
                    println!("Error: {message}");
                    continue;
                }
            }
            match wizard.touch(id.clone())? {
                Some(message) => println!("Error: {message}"),
                None => return Ok(()),
            }
        }
    }

    fn choose_action(
        &self,
        theme: &dyn Theme,
        wizard: &WizardController,
    ) -> Result<Action, DialoguerError> {
        let actions = available_actions(wizard);
        let items: Vec<&str> = actions
            .iter()
            .map(|action| match action {
                Action::Next => self.texts.next.as_str(),
                Action::Back => self.texts.back.as_str(),
                Action::Submit => self.texts.submit.as_str(),
            })
            .collect();

        let index = prompt::interact(
            Select::with_theme(theme)
                .with_prompt(&self.texts.choose_action)
                .items(&items)
                .default(0)
                .interact(),
        )?;
        Ok(actions[index])
    }
}

/// `[2/6] 🩺 Salud` style heading of the current step.
pub(crate) fn step_header(wizard: &WizardController) -> String {
    let (current, total) = wizard.progress();
    match wizard.current_step_definition() {
        Some(step) => match step.icon() {
            Some(icon) => format!("[{current}/{total}] {icon} {}", step.label()),
            None => format!("[{current}/{total}] {}", step.label()),
        },
        None => format!("[{current}/{total}]"),
    }
}

/// Whether a field is shown under the current answers.
pub(crate) fn is_visible(wizard: &WizardController, id: &FieldId) -> bool {
    wizard
        .form()
        .field(id)
        .is_some_and(|f| f.requirement().is_active(wizard.answers()))
}

/// Primary action first.
pub(crate) fn available_actions(wizard: &WizardController) -> Vec<Action> {
    let mut actions = Vec::with_capacity(2);
    if wizard.is_final_step() {
        actions.push(Action::Submit);
    } else {
        actions.push(Action::Next);
    }
    if wizard.current_step().is_some_and(|step| step > 1) {
        actions.push(Action::Back);
    }
    actions
}

fn field_label<'a>(wizard: &'a WizardController, id: &'a FieldId) -> &'a str {
    wizard
        .form()
        .field(id)
        .map(|f| f.label())
        .unwrap_or(id.as_str())
}

/// Retreat to the earliest step holding a field with an error.
fn go_to_first_error(wizard: &mut WizardController) {
    let target = wizard
        .errors()
        .iter()
        .filter_map(|(field, _)| wizard.form().step_of(field))
        .min();
    if let Some(target) = target {
        while wizard.current_step().is_some_and(|step| step > target) && wizard.retreat() {}
    }
}
