use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use giftwise_core::{BackendKind, Config, ErrorReporter, GiftWizard, PreferenceField, SuggestionClient};
use std::io::Write;
use std::path::PathBuf;

mod interactive;
mod logging;
mod render;

pub use interactive::{parse_command, run_wizard, WizardCommand};

#[derive(Parser)]
#[command(name = "giftwise")]
#[command(about = "AI-assisted gift ideas from a few quick questions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suggestion backend: mock | http
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    /// Suggestion endpoint URL (http backend)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer the questions one by one and browse the ideas
    Interactive,
    /// Ask for ideas in one go
    Suggest {
        #[arg(long)]
        occasion: Option<String>,
        #[arg(long)]
        recipient: Option<String>,
        #[arg(long)]
        style: Option<String>,
        /// Budget in ₹
        #[arg(long)]
        budget: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
        /// Gifts already seen; they will not be suggested again
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Refinement feedback appended to the notes
        #[arg(long)]
        feedback: Option<String>,
        /// Print the suggestions as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = Config::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    logging::init_logging(cli.debug, config.log_path.as_deref())?;
    logging::log_config_source(&source);
    tracing::debug!(backend = %config.backend, page_size = config.page_size, "configuration ready");

    let backend = config.build_backend()?;
    let mut wizard = GiftWizard::new(SuggestionClient::new(backend), config.page_size);

    match cli.command {
        Some(Commands::Suggest {
            occasion,
            recipient,
            style,
            budget,
            notes,
            exclude,
            feedback,
            json,
        }) => {
            let answers = [
                (PreferenceField::Occasion, occasion),
                (PreferenceField::Recipient, recipient),
                (PreferenceField::Style, style),
                (PreferenceField::Budget, budget.map(|b| b.to_string())),
                (PreferenceField::Notes, notes),
            ];
            for (field, value) in answers {
                if let Some(value) = value {
                    wizard.set_field(field, &value)?;
                }
            }
            let mut stdout = std::io::stdout();
            suggest(&mut wizard, exclude, feedback, json, &mut stdout).await?;
        }
        Some(Commands::Interactive) | None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run_wizard(&mut wizard, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}

/// One-shot request. A failed request comes back as an error already worded
/// for the user, so the caller only has to print it once.
async fn suggest<W: Write>(
    wizard: &mut GiftWizard,
    exclude: Vec<String>,
    feedback: Option<String>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let refinement = !exclude.is_empty() || feedback.is_some();
    let result = if refinement {
        wizard.mark_shown(&exclude);
        wizard.refine(feedback.as_deref()).await
    } else {
        wizard.generate().await
    };

    let deck = result.map_err(|err| anyhow!(ErrorReporter::format_user_error(&err)))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(deck.all())?)?;
    } else {
        write!(out, "{}", render::format_cards(1, deck.all()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_wizard() -> GiftWizard {
        let config = Config {
            mock_delay_ms: 0,
            ..Config::default()
        };
        GiftWizard::new(
            SuggestionClient::new(config.build_backend().unwrap()),
            config.page_size,
        )
    }

    fn answered_wizard() -> GiftWizard {
        let mut wizard = mock_wizard();
        wizard.set_field(PreferenceField::Occasion, "Housewarming").unwrap();
        wizard.set_field(PreferenceField::Recipient, "Neighbour").unwrap();
        wizard.set_field(PreferenceField::Style, "Practical").unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_failed_suggest_returns_single_user_message() {
        let mut wizard = mock_wizard();
        let mut out = Vec::new();

        let err = suggest(&mut wizard, vec![], None, false, &mut out)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("📝 Please answer: occasion, recipient, style"));
        assert_eq!(message.matches("Please answer").count(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_with_exclusions_as_json() {
        let mut wizard = answered_wizard();
        let mut out = Vec::new();

        suggest(
            &mut wizard,
            vec!["Scented Soy Candle".to_string()],
            Some("nothing fragile".to_string()),
            true,
            &mut out,
        )
        .await
        .unwrap();

        let gifts: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let names: Vec<&str> = gifts
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|g| g["gift"].as_str())
            .collect();
        assert_eq!(names.len(), 4);
        assert!(!names.contains(&"Scented Soy Candle"));
    }

    #[tokio::test]
    async fn test_suggest_prints_cards() {
        let mut wizard = answered_wizard();
        let mut out = Vec::new();

        suggest(&mut wizard, vec![], None, false, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1. Specialty Coffee Sampler"));
        assert!(text.contains("5. Compact Travel Mug"));
    }
}
