use crate::render::format_page;
use anyhow::Result;
use giftwise_core::{ErrorReporter, GiftWizard, PreferenceField, RequestError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const HELP: &str = "Commands:
  more               show the next few ideas
  refine [feedback]  ask for new ideas, skipping everything shown so far
  new                start a fresh search with the current answers
  set <field> <val>  change an answer (occasion, recipient, budget, style, notes)
  show               print the current answers as JSON
  reset              clear all answers and start over
  quit               leave the wizard";

const QUESTIONS: [(PreferenceField, &str); 5] = [
    (PreferenceField::Occasion, "What's the occasion? (e.g. Birthday, Anniversary)"),
    (PreferenceField::Recipient, "Who is the gift for? (e.g. Friend, Partner, Coworker)"),
    (PreferenceField::Budget, "Budget in ₹? [100]"),
    (PreferenceField::Style, "Preferred gift style? (e.g. Practical, Sentimental, Fun)"),
    (PreferenceField::Notes, "Anything else we should know? (optional)"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    More,
    Refine(Option<String>),
    New,
    Set { field: String, value: String },
    Show,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Option<WizardCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_lowercase().as_str() {
        "more" | "next" => WizardCommand::More,
        "refine" | "refresh" => {
            WizardCommand::Refine((!rest.is_empty()).then(|| rest.to_string()))
        }
        "new" | "generate" => WizardCommand::New,
        "set" => match rest.split_once(char::is_whitespace) {
            Some((field, value)) => WizardCommand::Set {
                field: field.to_string(),
                value: value.trim().to_string(),
            },
            None => WizardCommand::Unknown(line.to_string()),
        },
        "show" => WizardCommand::Show,
        "reset" => WizardCommand::Reset,
        "help" | "?" => WizardCommand::Help,
        "quit" | "exit" | "q" => WizardCommand::Quit,
        _ => WizardCommand::Unknown(line.to_string()),
    };
    Some(command)
}

/// Line-driven wizard: asks the form questions, shows results, then takes
/// commands until `quit` or end of input.
pub async fn run_wizard<R, W>(wizard: &mut GiftWizard, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "🎁 Let's find the perfect gift.")?;

    if !ask_form(wizard, &mut lines, out).await? {
        return Ok(());
    }
    generate(wizard, out).await?;

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        tracing::debug!(?command, "wizard command");
        match command {
            WizardCommand::More => {
                if wizard.deck_mut().advance() {
                    write!(out, "{}", format_page(wizard.deck()))?;
                } else {
                    writeln!(out, "That's every idea from this batch. Type `refine` for new ones.")?;
                }
            }
            WizardCommand::Refine(feedback) => {
                match wizard.refine(feedback.as_deref()).await {
                    Ok(deck) => write!(out, "{}", format_page(deck))?,
                    Err(err) => report_error(out, &err)?,
                }
            }
            WizardCommand::New => generate(wizard, out).await?,
            WizardCommand::Set { field, value } => match wizard.set_field_by_name(&field, &value) {
                Ok(()) => writeln!(out, "Updated {field}.")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            WizardCommand::Show => {
                writeln!(out, "{}", wizard.preferences().to_json()?)?;
            }
            WizardCommand::Reset => {
                wizard.reset();
                writeln!(out, "Starting over.")?;
                if !ask_form(wizard, &mut lines, out).await? {
                    return Ok(());
                }
                generate(wizard, out).await?;
            }
            WizardCommand::Help => writeln!(out, "{HELP}")?,
            WizardCommand::Quit => break,
            WizardCommand::Unknown(text) => {
                writeln!(out, "Unknown command: {text}. Type `help` for options.")?;
            }
        }
    }
    Ok(())
}

pub const RETRY_HINT: &str = "Type `refine` or `new` to try again.";

/// Prints the user-facing message, plus a retry hint when retrying can help.
fn report_error<W: Write>(out: &mut W, err: &RequestError) -> Result<()> {
    writeln!(out, "{}", ErrorReporter::format_user_error(err))?;
    if err.is_retryable() {
        writeln!(out, "{RETRY_HINT}")?;
    }
    Ok(())
}

/// Returns `false` if input ran out before the form was finished.
async fn ask_form<R, W>(wizard: &mut GiftWizard, lines: &mut Lines<R>, out: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for (field, question) in QUESTIONS {
        loop {
            writeln!(out, "{question}")?;
            let Some(answer) = lines.next_line().await? else {
                return Ok(false);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                break;
            }
            match wizard.set_field(field, answer) {
                Ok(()) => break,
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }
    Ok(true)
}

async fn generate<W: Write>(wizard: &mut GiftWizard, out: &mut W) -> Result<()> {
    writeln!(out, "Generating ideas...")?;
    match wizard.generate().await {
        Ok(deck) => write!(out, "{}", format_page(deck))?,
        Err(err) => report_error(out, &err)?,
    }
    Ok(())
}
