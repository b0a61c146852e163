use std::env;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use mailsort::terminal::TerminalView;
use mailsort::{ClientConfig, FileUpload, SubmissionClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: mailsort [--json] [--file PATH] [TEXT...]

Classifies an email through the remote API. TEXT is joined with spaces;
when neither TEXT nor --file is given the email body is read from stdin.
Typing text after choosing a file replaces the file, as in the web form.";

#[derive(Debug, Default)]
struct CliArgs {
    file: Option<PathBuf>,
    text: String,
    json: bool,
    help: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut words = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-f" | "--file" => {
                    let path = args.next().context("--file needs a path")?;
                    parsed.file = Some(PathBuf::from(path));
                }
                "--json" => parsed.json = true,
                "-h" | "--help" => parsed.help = true,
                _ => words.push(arg),
            }
        }

        parsed.text = words.join(" ");
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mailsort=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = ClientConfig::from_env().context("invalid configuration")?;
    println!("🌐 Classification API at {}", config.base_url);

    if args.file.is_none() && args.text.trim().is_empty() && !std::io::stdin().is_terminal() {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read email from stdin")?;
        args.text = body;
    }

    let client = SubmissionClient::new(config, TerminalView::stdout());
    let probe = client.spawn_liveness_probe();

    if let Some(path) = &args.file {
        let upload = FileUpload::from_path(path).await?;
        client.on_file_selected(Some(upload));
    }
    if !args.text.is_empty() {
        client.on_text_input(args.text.clone());
    }

    let outcome = client.submit().await;
    probe.abort();

    match outcome {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
        Err(err) => bail!("classification failed: {err}"),
    }
}
