use serde::Serialize;
use std::io::{self, Write};
use tabwriter::TabWriter;
use tokio::io::{self as aio, AsyncBufReadExt, AsyncWriteExt};
use tracing_subscriber::FmtSubscriber;

use yocto::{normalize_amount, to_human, AmountError, Precision, YoctoAmount};

#[derive(Serialize)]
struct Record<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Convert one input line in the requested direction.
fn convert(line: &str, reverse: bool) -> Result<String, AmountError> {
    if reverse {
        let amount: YoctoAmount = line.parse()?;
        Ok(to_human(amount.as_str(), Precision::Full))
    } else {
        normalize_amount(line)
    }
}

#[tokio::main]
async fn main() -> aio::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let json_output = std::env::args().any(|a| a == "--json");
    let reverse = std::env::args().any(|a| a == "--reverse");

    let stdin = aio::BufReader::new(aio::stdin());
    let mut lines = stdin.lines();

    if json_output {
        let mut stdout = aio::stdout();

        while let Some(line) = lines.next_line().await? {
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            let record = match convert(input, reverse) {
                Ok(out) => Record {
                    input,
                    output: Some(out),
                    error: None,
                },
                Err(e) => Record {
                    input,
                    output: None,
                    error: Some(e.to_string()),
                },
            };
            let out = serde_json::to_string(&record).unwrap_or(line.clone());
            stdout.write_all(out.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await?;
    } else {
        let stdout = io::stdout();
        let mut tw = TabWriter::new(stdout);

        while let Some(line) = lines.next_line().await? {
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            match convert(input, reverse) {
                Ok(out) => writeln!(tw, "{}\t{}", input, out)?,
                Err(e) => writeln!(tw, "{}\terror: {}", input, e.reason())?,
            }
        }
        tw.flush()?;
    }

    Ok(())
}
