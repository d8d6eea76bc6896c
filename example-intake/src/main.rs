use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use example_intake::{ClientAssessment, follow_up_link};
use intake::WizardController;
use intake_http::{HttpSubmitter, IntakeConfig};
use intake_wizard_dialoguer::{DialoguerError, DialoguerWizard, Texts};

#[derive(Parser)]
#[command(
    name = "jerniefit-assessment",
    about = "Fill in the JernieFit client assessment and send it to the trainer",
    version
)]
struct Cli {
    /// YAML file with endpoint and messaging settings
    #[arg(long, env = "INTAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Submission endpoint (overrides the config file and INTAKE_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Ask for email and phone on the first step
    #[arg(long)]
    contact: bool,

    /// Add a final step to accept the terms
    #[arg(long)]
    terms: bool,

    /// Disable colors
    #[arg(long)]
    plain: bool,

    /// Log submission details
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => {}
        Err(e) if matches!(
            e.downcast_ref::<DialoguerError>(),
            Some(DialoguerError::Cancelled)
        ) => {
            eprintln!("Formulario cancelado.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => IntakeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => IntakeConfig::default(),
    }
    .with_env_overrides();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    tracing::debug!(endpoint = %config.endpoint, "using submission endpoint");

    let mut variant = ClientAssessment::base();
    if cli.contact {
        variant = variant.with_contact_details();
    }
    if cli.terms {
        variant = variant.with_terms();
    }

    let mut wizard =
        WizardController::for_form(&variant).context("building the assessment form")?;
    let submitter = HttpSubmitter::from_config(&config)?;

    let front_end = if cli.plain {
        DialoguerWizard::plain()
    } else {
        DialoguerWizard::new()
    };
    let front_end = front_end.with_texts(Texts {
        next: "Siguiente →".into(),
        back: "← Anterior".into(),
        submit: "Enviar formulario".into(),
        choose_action: "¿Qué quieres hacer?".into(),
        invalid_number: "Ingresa un número".into(),
        invalid_date: "Ingresa una fecha como AAAA-MM-DD".into(),
    });

    let submission = front_end.run(&mut wizard, &submitter)?;

    if cli.contact {
        match follow_up_link(&config, &submission.answers) {
            Ok(Some(link)) => println!("Escríbenos por WhatsApp: {link}"),
            Ok(None) => tracing::debug!("no trainer phone configured"),
            Err(e) => tracing::warn!(error = %e, "no follow-up link"),
        }
    }
    Ok(())
}
