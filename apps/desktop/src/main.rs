use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use intake_core::{
    load_settings, AttachmentGate, FormController, HttpSubmitter, Notice, SubmitRejected,
};
use serde_json::Value;
use shared::error::ValidationErrors;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod answers;

use answers::load_answers;

#[derive(Parser, Debug)]
#[command(name = "ep-renewal", about = "Employment Pass renewal intake")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the answers, encode attachments and post them to the workflow endpoint.
    Submit {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate the answers and print the payload with attachment contents elided.
    Check {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        skip_signature_check: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Submit { answers, config } => submit(&answers, config.as_deref()).await,
        Command::Check {
            answers,
            skip_signature_check,
        } => check(&answers, AttachmentGate::new(!skip_signature_check)).await,
    }
}

async fn submit(answers_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path).context("failed to load intake settings")?;
    info!(endpoint = %settings.endpoint, "loaded settings");
    let submitter = HttpSubmitter::new(&settings).context("failed to build HTTP client")?;

    let mut controller = load_controller(
        answers_path,
        AttachmentGate::new(settings.verify_pdf_signature),
    )?;
    match controller.submit(&submitter).await {
        Ok(Notice::Submitted) => {
            println!("Renewal details submitted.");
            Ok(())
        }
        Ok(Notice::SubmitFailed) => {
            bail!("submission failed; nothing was sent successfully, check the log and rerun")
        }
        Err(SubmitRejected::Invalid(errors)) => {
            report_errors(&errors);
            Err(anyhow!(errors))
        }
        Err(SubmitRejected::InFlight) => bail!("a submission is already in flight"),
    }
}

async fn check(answers_path: &Path, gate: AttachmentGate) -> Result<()> {
    let mut controller = load_controller(answers_path, gate)?;
    let prepared = match controller.begin_submit() {
        Ok(prepared) => prepared,
        Err(SubmitRejected::Invalid(errors)) => {
            report_errors(&errors);
            return Err(anyhow!(errors));
        }
        Err(err) => return Err(err.into()),
    };

    let payload = prepared
        .payload()
        .await
        .context("failed to encode attachments")?;
    let mut preview = serde_json::to_value(&payload)?;
    elide_attachment_contents(&mut preview);
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

fn load_controller(answers_path: &Path, gate: AttachmentGate) -> Result<FormController> {
    let answers = load_answers(answers_path)?;
    let base_dir = answers_path.parent().unwrap_or_else(|| Path::new("."));

    let mut controller = FormController::new(gate);
    let rejections = answers.apply(&mut controller, base_dir);
    if !rejections.is_empty() {
        for (slot, rejection) in &rejections {
            eprintln!("  {slot}: {rejection}");
        }
        bail!("{} attachment(s) rejected", rejections.len());
    }
    Ok(controller)
}

fn report_errors(errors: &ValidationErrors) {
    for (field, kind) in errors.iter() {
        eprintln!("  {field}: {}", kind.default_message());
    }
}

fn elide_attachment_contents(preview: &mut Value) {
    let Some(object) = preview.as_object_mut() else {
        return;
    };
    for value in object.values_mut() {
        if let Some(content) = value.get_mut("content") {
            let len = content.as_str().map(str::len).unwrap_or_default();
            *content = Value::String(format!("<{len} base64 chars>"));
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::elide_attachment_contents;

    #[test]
    fn elides_only_attachment_contents() {
        let mut preview = json!({
            "renewEP": "yes",
            "email": "alex.tan@example.com",
            "passportCopy": { "name": "p.pdf", "content": "JVBERi0x", "contentType": "application/pdf" },
        });
        elide_attachment_contents(&mut preview);
        assert_eq!(preview["passportCopy"]["content"], "<8 base64 chars>");
        assert_eq!(preview["passportCopy"]["name"], "p.pdf");
        assert_eq!(preview["email"], "alex.tan@example.com");
    }
}
