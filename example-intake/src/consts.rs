//! Site-wide texts.

pub const SITE_TITLE: &str = "JernieFit - Entrenamiento Personalizado";
pub const TRAINER_NAME: &str = "Jernie Richard";
