//! `pulse` - run a PulseSpark analysis from the terminal.

mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use analysis::{
    builtin_prompts, find_prompt, AnalysisError, AnalysisRunner, GatewayGenerator, Priority,
    PromptRequest, ResultsView, RunnerConfig,
};

#[derive(Parser)]
#[command(name = "pulse", version, about = "Run PulseSpark AEO analysis prompts")]
struct Cli {
    /// Free-text analysis prompt
    prompt: Option<String>,

    /// Run a built-in prompt by id (see --list-prompts)
    #[arg(long, conflicts_with = "prompt")]
    prompt_id: Option<String>,

    /// List built-in prompts and exit
    #[arg(long)]
    list_prompts: bool,

    /// Keyword substituted for {keyword} in the template
    #[arg(long)]
    keyword: Option<String>,

    /// Context option appended to the prompt (repeatable)
    #[arg(long = "context", value_name = "LABEL")]
    context: Vec<String>,

    /// Only show findings with this priority (high|medium|low)
    #[arg(long)]
    priority: Option<Priority>,

    /// Only show findings in this category
    #[arg(long)]
    category: Option<String>,

    /// Generator timeout in seconds
    #[arg(long, default_value_t = 45)]
    timeout: u64,
}

fn list_prompts() {
    for prompt in builtin_prompts() {
        let keyword_note = if prompt.requires_keyword {
            " (requires --keyword)".dimmed()
        } else {
            "".dimmed()
        };
        println!(
            "{}  {}{}\n    {}",
            prompt.id.bold(),
            prompt.title,
            keyword_note,
            prompt.description.dimmed()
        );
    }
}

fn resolve_template(cli: &Cli) -> Result<String> {
    if let Some(id) = &cli.prompt_id {
        let Some(prompt) = find_prompt(id) else {
            bail!("unknown prompt id '{id}'; see --list-prompts");
        };
        if prompt.requires_keyword && cli.keyword.is_none() {
            bail!("prompt '{id}' requires --keyword");
        }
        return Ok(prompt.template.to_string());
    }

    match &cli.prompt {
        Some(prompt) => Ok(prompt.clone()),
        None => bail!("provide a prompt, or --prompt-id (see --list-prompts)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.list_prompts {
        list_prompts();
        return Ok(());
    }

    let template = resolve_template(&cli)?;
    let mut request = PromptRequest::new(template).with_context(cli.context.clone());
    if let Some(keyword) = cli.keyword.clone() {
        request = request.with_keyword(keyword);
    }

    let generator = GatewayGenerator::from_env()
        .context("gateway not configured; set PULSE_GATEWAY_URL and PULSE_GATEWAY_KEY")?;
    let config = RunnerConfig::new().with_timeout(std::time::Duration::from_secs(cli.timeout));
    let runner = AnalysisRunner::with_config(generator, config);

    // Ctrl-C tears the run down instead of leaving the call orphaned
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut view = ResultsView::new();
    view.start_run();
    println!("{}", "Running analysis...".dimmed());

    match runner.run_with_cancel(&request, cancel).await {
        Ok(run) => view.complete(run),
        Err(AnalysisError::Validation { reason }) => {
            view.fail();
            bail!("invalid prompt: {reason}");
        }
        Err(AnalysisError::Cancelled) => {
            view.fail();
            bail!("analysis cancelled");
        }
        Err(err) => {
            view.fail();
            bail!("analysis failed: {err}");
        }
    }

    view.set_priority_filter(cli.priority);
    view.set_category_filter(cli.category.clone());

    render::print_results(&view);
    Ok(())
}
