use std::{sync::Arc, time::Duration};

use advisor::{Advisor, FinancialSnapshot, GeminiClient, Insight};
use engine::Ledger;
use serde::Serialize;
use settings::{Command, Settings};

use crate::error::Result;

mod error;
mod render;
mod report;
mod settings;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (settings, command) = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dohaeris={level},engine={level},advisor={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let ledger = Ledger::seeded()?;
    tracing::debug!(?command, currency = %settings.currency, "running");
    let output = run(command, &ledger, &settings).await?;
    print!("{output}");
    Ok(())
}

async fn run(command: Command, ledger: &Ledger, settings: &Settings) -> Result<String> {
    let currency = settings.currency;
    let json = settings.json;
    match command {
        Command::Dashboard => output(&report::dashboard(ledger, currency), json, render::dashboard),
        Command::Expenses => output(&report::expenses(ledger, currency), json, render::expenses),
        Command::Shopping => output(&report::shopping(ledger, currency), json, render::shopping),
        Command::Goals => output(&report::goals(ledger, currency), json, |goals| {
            render::goals(goals)
        }),
        Command::Patrimony => output(&report::patrimony(ledger, currency), json, render::patrimony),
        Command::Insight => {
            let insight = insight(ledger, settings).await?;
            output(&report::insight(&insight), json, render::insight)
        }
    }
}

fn output<T: Serialize>(view: &T, json: bool, text: impl Fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(view)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(text(view))
}

/// Runs one analysis, cancelling it on Ctrl-C.
async fn insight(ledger: &Ledger, settings: &Settings) -> Result<Insight> {
    let mut client = reqwest::Client::builder();
    if settings.ai.timeout_secs > 0 {
        client = client.timeout(Duration::from_secs(settings.ai.timeout_secs));
    }
    let gemini = GeminiClient::new(client.build()?, settings.ai.api_key.clone())
        .with_model(&settings.ai.model)
        .with_base_url(&settings.ai.base_url);
    let advisor = Advisor::new(Arc::new(gemini), settings.currency);

    let task = advisor.start(&FinancialSnapshot::from_ledger(ledger))?;
    let abort = task.abort_handle();
    let outcome = task.outcome();
    tokio::pin!(outcome);

    let insight = tokio::select! {
        insight = &mut outcome => insight,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, cancelling analysis");
            abort.abort();
            outcome.await
        }
    };
    Ok(insight)
}
