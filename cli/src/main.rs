//! CLI entrypoint for multillm
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use multillm_application::RunComparisonUseCase;
use multillm_domain::{OutputFormat as DomainOutputFormat, Prompt, Protocol};
use multillm_infrastructure::{ConfigLoader, FileConfig, ModelRegistry, ReqwestSessionFactory};
use multillm_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter,
    PromptSource, ReplConfig, SimpleProgress, WebState,
};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    let mut has_errors = false;
    for issue in config.validate() {
        if issue.is_error() {
            eprintln!("error: {}", issue.message);
            has_errors = true;
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors {
        bail!("configuration is invalid");
    }

    let mut registry = ModelRegistry::from_config(&config)?;
    for name in &cli.enable {
        if !registry.set_enabled(name, true) {
            bail!("--enable: no model named '{}'", name);
        }
    }
    for name in &cli.disable {
        if !registry.set_enabled(name, false) {
            bail!("--disable: no model named '{}'", name);
        }
    }

    if cli.list_models {
        print_models(&registry);
        return Ok(());
    }

    let output = output_config(&cli, &config);
    colored::control::set_override(output.color);

    // === Dependency Injection ===
    let mut sessions = ReqwestSessionFactory::new();
    if let Some(seconds) = config.behavior.request_timeout_seconds.filter(|s| *s > 0) {
        sessions = sessions.with_request_timeout(Duration::from_secs(seconds));
    }
    let compare = registry.compare_config(config.behavior.to_behavior());
    info!(
        "Models: [{}], judges: [{}]",
        compare.model_names().join(", "),
        compare.judge_names().join(", ")
    );
    let use_case = Arc::new(RunComparisonUseCase::new(compare, Arc::new(sessions)));

    // Web mode
    if cli.serve {
        let bind = cli.bind.clone().unwrap_or_else(|| config.web.bind.clone());
        let state = WebState::new(use_case, config.web.default_protocol())
            .with_protocols(config.web.selectable_protocols());
        multillm_presentation::serve(&bind, state)
            .await
            .with_context(|| format!("web front end on {} failed", bind))?;
        return Ok(());
    }

    let (Some(protocol), Some(source)) = (cli.protocol.as_deref(), cli.prompt_source()) else {
        bail!("Usage: multillm <PROTOCOL> <PROMPT>, see --help");
    };
    let protocol = Protocol::from(protocol);
    if protocol.is_unknown() {
        warn!("Unknown protocol '{}', models are queried without comparison", protocol);
    }

    let text = match source {
        PromptSource::Interactive => {
            let repl = ReplConfig {
                prompt: config.repl.prompt.clone(),
                show_progress: config.repl.show_progress && !cli.quiet,
                history_file: config.repl.history_file.clone(),
            };
            ChatRepl::new(use_case, protocol)
                .with_repl_config(repl)
                .with_output_config(output)
                .run()
                .await?;
            return Ok(());
        }
        PromptSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read prompt from stdin")?;
            buf
        }
        PromptSource::Text(text) => text,
    };
    let prompt = Prompt::try_new(text)?;

    let run = if cli.quiet {
        use_case.run(&prompt, &protocol).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.run_with_progress(&prompt, &protocol, &progress).await?
    } else {
        use_case.run_with_progress(&prompt, &protocol, &SimpleProgress).await?
    };

    print!("{}", ConsoleFormatter.render(&run, output.format));
    if output.show_elapsed {
        println!("{}", ConsoleFormatter::format_elapsed(run.elapsed()));
    }

    Ok(())
}

fn output_config(cli: &Cli, config: &FileConfig) -> OutputConfig {
    let format = cli
        .output
        .map(DomainOutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    OutputConfig {
        format,
        color: config.output.color,
        show_elapsed: config.output.show_elapsed && !cli.quiet,
    }
}

fn print_models(registry: &ModelRegistry) {
    println!("{:<16} {:<10} {:<28} {:<8} judge", "NAME", "KIND", "MODEL", "ENABLED");
    for entry in registry.entries() {
        println!(
            "{:<16} {:<10} {:<28} {:<8} {}",
            entry.name,
            entry.kind.as_str(),
            entry.model,
            if entry.enabled { "yes" } else { "no" },
            if registry.is_judge(&entry.name) { "yes" } else { "" }
        );
    }
}
