//! Integration tests for the intake wizard

use intake::{
    AnswerValue, ChoiceField, ChoiceOption, DefinitionError, FieldDefinition, FieldId,
    FormDefinition, IntakeForm, SubmitOutcome, TestSubmitter, WizardController, WizardState,
    validate_all,
};

struct ShortAssessment;

impl IntakeForm for ShortAssessment {
    fn form(&self) -> Result<FormDefinition, DefinitionError> {
        FormDefinition::builder()
            .step_with_fields(
                "Datos Personales",
                Some("👤"),
                [
                    FieldDefinition::text("nombreCompleto", "Nombre completo")
                        .required()
                        .with_message("El nombre completo es requerido"),
                    FieldDefinition::int("edad", "Edad", Some(16), Some(100))
                        .required()
                        .with_message("La edad debe estar entre 16 y 100 años"),
                    FieldDefinition::phone("telefono", "Teléfono").required(),
                ],
            )
            .step_with_fields(
                "Salud",
                Some("🩺"),
                [
                    FieldDefinition::toggle("tieneLesiones", "¿Tienes lesiones?"),
                    FieldDefinition::multiline("lesionesDetalle", "Describe tus lesiones")
                        .required_when_true("tieneLesiones"),
                ],
            )
            .step_with_fields(
                "Objetivos",
                Some("🎯"),
                [
                    FieldDefinition::multi_choice(
                        "objetivos",
                        "Objetivos",
                        ChoiceField::new(vec![
                            ChoiceOption::new("Tonificar").with_icon("🔥"),
                            ChoiceOption::new("otro").with_label("Otro"),
                        ]),
                    )
                    .required()
                    .with_message("Selecciona al menos un objetivo"),
                    FieldDefinition::text("objetivoOtro", "¿Cuál?")
                        .required_when_includes("objetivos", "otro"),
                ],
            )
            .failure_notice("Hubo un error al enviar el formulario. Por favor, inténtalo de nuevo.")
            .build()
    }
}

fn at_goals_step() -> WizardController {
    let mut wizard = WizardController::for_form(&ShortAssessment).unwrap();
    wizard.set("nombreCompleto", "Ana López").unwrap();
    wizard.set("edad", 34).unwrap();
    wizard.set("telefono", "+34 612 345 678").unwrap();
    assert!(wizard.advance());
    assert!(wizard.advance());
    wizard
}

#[test]
fn test_goals_step_needs_one_goal() {
    let mut wizard = at_goals_step();
    assert!(!wizard.is_step_complete(3));

    wizard.toggle_choice("objetivos", "Tonificar").unwrap();
    assert!(wizard.is_step_complete(3));
}

#[test]
fn test_other_goal_requires_description() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "otro").unwrap();
    assert!(!wizard.is_step_complete(3));

    wizard.set("objetivoOtro", "Correr una maratón").unwrap();
    assert!(wizard.is_step_complete(3));
}

#[test]
fn test_submit_success_reaches_submitted() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "Tonificar").unwrap();

    let submitter = TestSubmitter::new();
    let outcome = wizard.submit(&submitter);

    let SubmitOutcome::Submitted(submission) = outcome else {
        panic!("expected a submission, got {outcome:?}");
    };
    assert_eq!(wizard.state(), WizardState::Submitted);
    assert_eq!(submitter.sent(), vec![submission.answers.clone()]);
    assert_eq!(
        submission.answers.get(&FieldId::new("tieneLesiones")),
        Some(&AnswerValue::Bool(false))
    );
}

#[test]
fn test_server_error_keeps_step_and_answers() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "Tonificar").unwrap();
    let before = wizard.answers().clone();

    let submitter = TestSubmitter::new().with_rejection(500, None);
    let outcome = wizard.submit(&submitter);

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(
            "Hubo un error al enviar el formulario. Por favor, inténtalo de nuevo.".into()
        )
    );
    assert_eq!(wizard.state(), WizardState::Step(3));
    assert_eq!(wizard.answers(), &before);
    assert!(wizard.notice().is_some());
}

#[test]
fn test_transport_failure_is_recoverable() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "Tonificar").unwrap();

    let submitter = TestSubmitter::new().with_transport_failure("dns error");
    assert!(matches!(wizard.submit(&submitter), SubmitOutcome::Failed(_)));
    assert!(matches!(
        wizard.submit(&submitter),
        SubmitOutcome::Submitted(_)
    ));
}

#[test]
fn test_age_below_range_blocks_submit_with_custom_message() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "Tonificar").unwrap();
    wizard.set("edad", 15).unwrap();

    let submitter = TestSubmitter::new();
    assert_eq!(wizard.submit(&submitter), SubmitOutcome::Invalid(1));
    assert_eq!(
        wizard.errors().get(&FieldId::new("edad")),
        Some("La edad debe estar entre 16 y 100 años")
    );
    assert_eq!(submitter.attempts(), 0);
}

#[test]
fn test_short_phone_blocks_first_step() {
    let mut wizard = WizardController::for_form(&ShortAssessment).unwrap();
    wizard.set("nombreCompleto", "Ana López").unwrap();
    wizard.set("edad", 34).unwrap();
    wizard.set("telefono", "12345").unwrap();
    assert!(!wizard.advance());
    assert_eq!(wizard.state(), WizardState::Step(1));

    wizard.set("telefono", "+34 612 345 678").unwrap();
    assert!(wizard.advance());
}

#[test]
fn test_untriggered_detail_is_ignored() {
    let mut wizard = at_goals_step();
    wizard.toggle_choice("objetivos", "Tonificar").unwrap();
    wizard.set("tieneLesiones", true).unwrap();
    wizard.set("lesionesDetalle", "Rodilla").unwrap();
    wizard.set("lesionesDetalle", "").unwrap();
    wizard.set("tieneLesiones", false).unwrap();

    let errors = validate_all(wizard.form(), wizard.answers());
    assert!(errors.is_empty());
    assert_eq!(validate_all(wizard.form(), wizard.answers()), errors);
}

#[test]
fn test_unknown_field_in_step_is_rejected() {
    let result = FormDefinition::builder()
        .field(FieldDefinition::text("nombre", "Nombre"))
        .step(intake::StepDefinition::new("Datos", ["nombre", "apellido"]))
        .build();

    assert!(matches!(result, Err(DefinitionError::UnknownField { .. })));
}
