// Pino CLI Entry Point
// Analyze a prompt once, or serve the host protocol over stdin/stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pino_core::host::{self, EditorSelection, PanelHandle};
use pino_core::{logging, AppConfig, PromptAnalysisPipeline};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pino")]
#[command(about = "Pino: annotate prompts with key info, intent and context tags")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one prompt and print the result
    Analyze {
        /// Prompt words; read from stdin when omitted.
        /// Flags are recognized anywhere, so put words starting with `-` after `--`
        prompt: Vec<String>,

        /// Print the record as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// With --json, pretty-print
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Answer JSON-lines host requests on stdin
    Serve {
        /// File used as the editor document for get-selection
        #[arg(long, value_name = "PATH")]
        document: Option<PathBuf>,

        /// Byte range of the selection inside the document, e.g. 10..42
        #[arg(long, value_name = "START..END", requires = "document")]
        selection: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    logging::init(&config).context("Failed to initialize logging")?;

    let args = Args::parse();
    match args.cmd {
        Command::Analyze {
            prompt,
            json,
            pretty,
        } => analyze(prompt, json, pretty).await,
        Command::Serve {
            document,
            selection,
        } => serve(&config, document, selection).await,
    }
}

async fn analyze(words: Vec<String>, json: bool, pretty: bool) -> Result<()> {
    let prompt = if words.is_empty() {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read prompt from stdin")?;
        strip_line_ending(buf)
    } else {
        words.join(" ")
    };

    let record = PromptAnalysisPipeline::new().analyze(&prompt);

    if json {
        let out = if pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        println!("{}", out);
    } else {
        println!("{}", record.report());
    }
    Ok(())
}

/// Drops the single line ending a shell pipe leaves on the prompt.
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

async fn serve(
    config: &AppConfig,
    document: Option<PathBuf>,
    selection: Option<String>,
) -> Result<()> {
    let editor = match document {
        Some(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read document {}", path.display()))?;
            let editor = EditorSelection::document(text);
            match selection {
                Some(raw) => editor.with_selection(host::parse_range(&raw)?),
                None => editor,
            }
        }
        None => EditorSelection::none(),
    };

    let panel = PanelHandle::create(config, editor);
    let reader = BufReader::new(tokio::io::stdin());
    let answered = host::serve(&panel, reader, tokio::io::stdout()).await?;
    panel.dispose().await?;

    info!(answered, "Serve finished");
    Ok(())
}
