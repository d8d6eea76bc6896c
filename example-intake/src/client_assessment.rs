//! The client assessment form in its variants.

use intake::{
    ChoiceField, ChoiceOption, DefinitionError, FieldDefinition, FormDefinition, IntakeForm,
};

use crate::consts::{SITE_TITLE, TRAINER_NAME};

pub const GOAL_OTHER: &str = "otro";

const REQUIRED_INFO: &str = "Esta información es requerida";

/// Which optional parts of the assessment to include.
///
/// The base form has six steps. Contact details add email and phone to the
/// first step; the terms option appends a seventh step with a consent box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientAssessment {
    pub contact_details: bool,
    pub terms: bool,
}

impl ClientAssessment {
    /// The six-step assessment.
    pub fn base() -> Self {
        Self::default()
    }

    pub fn with_contact_details(mut self) -> Self {
        self.contact_details = true;
        self
    }

    pub fn with_terms(mut self) -> Self {
        self.terms = true;
        self
    }

    /// Build the field registry and step table for this variant.
    pub fn definition(&self) -> Result<FormDefinition, DefinitionError> {
        let mut builder = FormDefinition::builder()
            .prelude(format!(
                "{SITE_TITLE}\nCuéntale a {TRAINER_NAME} sobre ti para preparar tu plan."
            ))
            .step_with_fields("Datos Personales", Some("👤"), self.personal_fields())
            .step_with_fields("Salud y Antecedentes Médicos", Some("🏥"), health_fields())
            .step_with_fields("Hábitos y Estilo de Vida", Some("💼"), lifestyle_fields())
            .step_with_fields("Objetivos", Some("🎯"), goal_fields())
            .step_with_fields("Preferencias", Some("⚙️"), preference_fields())
            .step_with_fields("Alimentación", Some("🥗"), nutrition_fields());

        if self.terms {
            builder = builder.step_with_fields(
                "Términos",
                Some("📋"),
                [FieldDefinition::consent(
                    "aceptaTerminos",
                    "Acepto los términos y la política de privacidad",
                )
                .with_message("Debes aceptar los términos para continuar")],
            );
        }

        builder
            .incomplete_notice("Completa todos los campos requeridos para continuar")
            .failure_notice(
                "Hubo un error al enviar el formulario. Por favor, inténtalo de nuevo.",
            )
            .success_message(format!(
                "¡Formulario enviado exitosamente! {} se pondrá en contacto contigo pronto.",
                first_name(TRAINER_NAME)
            ))
            .build()
    }

    fn personal_fields(&self) -> Vec<FieldDefinition> {
        let mut fields = vec![
            FieldDefinition::text("nombreCompleto", "Nombre completo")
                .required()
                .with_placeholder("Tu nombre completo")
                .with_message("El nombre completo es requerido"),
            FieldDefinition::int("edad", "Edad", Some(16), Some(100))
                .required()
                .with_message("La edad debe estar entre 16 y 100 años"),
            FieldDefinition::int("altura", "Altura (cm)", Some(100), Some(250))
                .required()
                .with_message("La altura debe estar entre 100 y 250 cm"),
            FieldDefinition::float("pesoActual", "Peso actual (kg)", Some(30.0), Some(300.0))
                .with_message("El peso debe estar entre 30 y 300 kg"),
        ];
        if self.contact_details {
            fields.push(
                FieldDefinition::email("email", "Email")
                    .required()
                    .with_placeholder("tu@email.com")
                    .with_message("Ingresa un email válido (ej: tu@email.com)"),
            );
            fields.push(
                FieldDefinition::phone("telefono", "Teléfono / WhatsApp")
                    .required()
                    .with_placeholder("+34 612 345 678")
                    .with_message("Ingresa un teléfono válido (9 a 15 dígitos)"),
            );
        }
        fields.push(FieldDefinition::toggle(
            "seSienteComodaPesandose",
            "¿Te sientes cómoda pesándote regularmente?",
        ));
        fields
    }
}

impl IntakeForm for ClientAssessment {
    fn form(&self) -> Result<FormDefinition, DefinitionError> {
        self.definition()
    }
}

fn first_name(full: &str) -> &str {
    full.split_whitespace().next().unwrap_or(full)
}

/// A yes/no question followed by a detail field shown only on "yes".
fn toggle_with_detail(
    id: &str,
    label: &str,
    detail_id: &str,
    detail_label: &str,
    placeholder: &str,
) -> [FieldDefinition; 2] {
    [
        FieldDefinition::toggle(id, label),
        FieldDefinition::text(detail_id, detail_label)
            .required_when_true(id)
            .with_placeholder(placeholder)
            .with_message(REQUIRED_INFO),
    ]
}

fn health_fields() -> Vec<FieldDefinition> {
    let mut fields = Vec::new();
    fields.extend(toggle_with_detail(
        "tieneCondicionMedica",
        "¿Tienes alguna condición médica diagnosticada?",
        "condicionMedicaDetalle",
        "Especifica la condición médica",
        "Anemia, deficiencia de vitaminas, lesiones, etc.",
    ));
    fields.extend(toggle_with_detail(
        "tomaMedicacion",
        "¿Tomas alguna medicación o suplemento actualmente?",
        "medicacionDetalle",
        "¿Cuáles?",
        "Lista de medicamentos y suplementos",
    ));
    fields.extend(toggle_with_detail(
        "tieneLesiones",
        "¿Has tenido lesiones recientes o molestias físicas?",
        "lesionesDetalle",
        "¿Dónde?",
        "Describe las lesiones o molestias",
    ));
    fields.push(FieldDefinition::toggle(
        "tienePrescripcionMedica",
        "¿Tienes prescripción médica que limite tu actividad física?",
    ));
    fields
}

fn lifestyle_fields() -> Vec<FieldDefinition> {
    let mut fields = vec![
        FieldDefinition::toggle("trabaja", "¿Trabajas actualmente?"),
        FieldDefinition::text("areaTrabajo", "¿En qué área?")
            .required_when_true("trabaja")
            .with_placeholder("Tu área de trabajo")
            .with_message(REQUIRED_INFO),
        FieldDefinition::text("horarioLaboral", "¿Cuál es tu horario laboral?")
            .required_when_true("trabaja")
            .with_placeholder("Ej: 9:00 - 18:00")
            .with_message(REQUIRED_INFO),
        FieldDefinition::multi_choice(
            "disponibilidadDias",
            "¿Qué días tienes disponibilidad para entrenar?",
            ChoiceField::new(
                ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"]
                    .into_iter()
                    .map(|day| {
                        let icon = match day {
                            "Sábado" => "🎉",
                            "Domingo" => "☀️",
                            _ => "📅",
                        };
                        ChoiceOption::new(day).with_icon(icon)
                    })
                    .collect(),
            ),
        )
        .required()
        .with_message("Selecciona al menos un día"),
        FieldDefinition::text("horariosPreferidos", "Horarios preferidos")
            .required()
            .with_placeholder("Ej: Mañana temprano, después del trabajo, etc.")
            .with_message("Los horarios preferidos son requeridos"),
    ];
    fields.extend(toggle_with_detail(
        "haHechoEjercicio",
        "¿Has hecho ejercicio anteriormente?",
        "tipoEjercicio",
        "¿Qué tipo?",
        "Gimnasio, running, yoga, etc.",
    ));
    fields.push(
        FieldDefinition::choice(
            "frecuenciaEjercicio",
            "¿Con qué frecuencia hacías ejercicio antes?",
            ChoiceField::from_values([
                "Nunca",
                "1-2 veces/semana",
                "3-4 veces/semana",
                "5+ veces/semana",
            ]),
        )
        .required()
        .with_message("La frecuencia de ejercicio es requerida"),
    );
    fields
}

fn goal_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::multi_choice(
            "objetivos",
            "¿Cuál es tu objetivo principal? (puedes elegir más de uno)",
            ChoiceField::new(vec![
                ChoiceOption::new("Pérdida de peso").with_icon("⚖️"),
                ChoiceOption::new("Aumentar masa muscular").with_icon("💪"),
                ChoiceOption::new("Tonificar").with_icon("🔥"),
                ChoiceOption::new("Mejorar salud general").with_icon("❤️"),
                ChoiceOption::new("Reducir dolores o molestias").with_icon("🩹"),
                ChoiceOption::new(GOAL_OTHER)
                    .with_label("Otro")
                    .with_icon("🎯"),
            ]),
        )
        .required()
        .with_message("Selecciona al menos un objetivo"),
        FieldDefinition::text("objetivoOtro", "Especifica el otro objetivo")
            .required_when_includes("objetivos", GOAL_OTHER)
            .with_placeholder("Describe tu objetivo específico")
            .with_message(REQUIRED_INFO),
        FieldDefinition::multiline(
            "metaEspecifica",
            "¿Tienes una meta específica o fecha límite?",
        )
        .with_placeholder("Ej: Perder 10kg para el verano, correr 5km sin parar, etc."),
    ]
}

fn preference_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::choice(
            "horarioPreferido",
            "¿Te gustaría entrenar en la mañana, tarde o noche?",
            ChoiceField::from_values(["Mañana", "Tarde", "Noche"]),
        )
        .required()
        .with_message("El horario preferido es requerido"),
        FieldDefinition::choice(
            "lugarPreferido",
            "¿Prefieres entrenar en casa o en el gimnasio?",
            ChoiceField::from_values(["Casa", "Gimnasio", "Ambos"]),
        )
        .required()
        .with_message("El lugar preferido es requerido"),
        FieldDefinition::text(
            "ejerciciosNoGustan",
            "¿Hay ejercicios o actividades que no te gustan?",
        )
        .with_placeholder("Ej: Correr, sentadillas, etc."),
        FieldDefinition::choice(
            "tipoMedicion",
            "¿Te gustaría que te mida con fotos, medidas corporales o solo sensaciones?",
            ChoiceField::from_values([
                "Fotos",
                "Medidas (cm)",
                "Sensaciones / ropa",
                "Todo",
                "Prefiero no medir nada",
            ]),
        )
        .required()
        .with_message("El tipo de medición es requerido"),
    ]
}

fn nutrition_fields() -> Vec<FieldDefinition> {
    let mut fields = Vec::new();
    fields.extend(toggle_with_detail(
        "sigueAlimentacionEspecifica",
        "¿Sigues algún tipo de alimentación específica?",
        "tipoAlimentacion",
        "¿Cuál?",
        "Vegetariana, vegana, keto, etc.",
    ));
    fields.extend([
        FieldDefinition::multiline(
            "alimentosNoGustan",
            "¿Hay alimentos que no te gustan o no consumes?",
        )
        .with_placeholder("Lista de alimentos que no te gustan o no consumes"),
        FieldDefinition::choice(
            "tomaSuficienteAgua",
            "¿Tomas suficiente agua a diario?",
            ChoiceField::from_values(["Sí", "No", "No estoy segura"]),
        )
        .required()
        .with_message(REQUIRED_INFO),
        FieldDefinition::multiline(
            "otrosDetalles",
            "¿Hay algo que deba saber para adaptar mejor tu entrenamiento?",
        )
        .with_placeholder("Cualquier información adicional que consideres importante..."),
    ]);
    fields
}
