//! CLI command definitions

use clap::{Parser, ValueEnum};
use multillm_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for comparison runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every trail line of the run
    Full,
    /// Only the agreed answer
    Answer,
    /// The whole run as JSON
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Answer => DomainOutputFormat::Answer,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// Where the prompt comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// Given on the command line
    Text(String),
    /// `input`: read standard input to EOF
    Stdin,
    /// `interactive`: read prompts line by line
    Interactive,
}

/// CLI arguments for multillm
#[derive(Parser, Debug)]
#[command(name = "multillm")]
#[command(author, version, about = "Ask several LLMs the same question and let judge models compare the answers")]
#[command(long_about = r#"
multillm sends one prompt to several language models, then asks judge models
whether the answers agree. The first answer that enough judges accept is printed.

Protocols:
  1-way    compare two responses
  2-way    compare first response with second and third response
  3-way    compare three responses to see if any two agree
  2-1      compare 2 responses and go on to a third if first two disagree
  3-all    compare three responses all ways
  n-way    compare all the responses each way and look for a quorum
  none     just query, no comparison

The prompt may be given as text, as `input` to read standard input, or as
`interactive` to enter prompts one by one (type `bye` to quit).

Configuration files are loaded from (in priority order):
1. MULTILLM_* environment variables (e.g. MULTILLM_BEHAVIOR__VERBOSE=false)
2. --config <path>     Explicit config file
3. ./multillm.toml     Project-level config
4. ~/.config/multillm/config.toml   Global config

Example:
  multillm 3-way "What is the boiling point of water at 2000m?"
  echo "Is 1013 prime?" | multillm n-way input
  multillm 2-1 interactive
  multillm --serve
"#)]
pub struct Cli {
    /// Comparison protocol (1-way, 2-way, 3-way, 2-1, 3-all, n-way, none)
    pub protocol: Option<String>,

    /// Prompt text, `input` to read stdin, or `interactive`
    pub prompt: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and the timing line
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable a configured model for this run (can be specified multiple times)
    #[arg(long, value_name = "MODEL")]
    pub enable: Vec<String>,

    /// Disable a configured model for this run (can be specified multiple times)
    #[arg(long, value_name = "MODEL")]
    pub disable: Vec<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List configured models and judges and exit
    #[arg(long)]
    pub list_models: bool,

    /// Start the web front end instead of running a prompt
    #[arg(long)]
    pub serve: bool,

    /// Address for --serve (overrides web.bind)
    #[arg(long, value_name = "ADDR", requires = "serve")]
    pub bind: Option<String>,
}

impl Cli {
    /// Interpret the prompt argument
    pub fn prompt_source(&self) -> Option<PromptSource> {
        self.prompt.as_deref().map(|prompt| match prompt {
            "input" => PromptSource::Stdin,
            "interactive" => PromptSource::Interactive,
            text => PromptSource::Text(text.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_and_prompt() {
        let cli = Cli::try_parse_from(["multillm", "3-way", "Why is the sky blue?"]).unwrap();
        assert_eq!(cli.protocol.as_deref(), Some("3-way"));
        assert_eq!(
            cli.prompt_source(),
            Some(PromptSource::Text("Why is the sky blue?".to_string()))
        );
    }

    #[test]
    fn test_special_prompts() {
        let cli = Cli::try_parse_from(["multillm", "n-way", "input"]).unwrap();
        assert_eq!(cli.prompt_source(), Some(PromptSource::Stdin));

        let cli = Cli::try_parse_from(["multillm", "2-1", "interactive"]).unwrap();
        assert_eq!(cli.prompt_source(), Some(PromptSource::Interactive));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "multillm", "-vv", "-q", "-o", "json", "--disable", "gpt", "1-way", "hi",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.disable, vec!["gpt"]);
    }

    #[test]
    fn test_bind_requires_serve() {
        assert!(Cli::try_parse_from(["multillm", "--bind", "0.0.0.0:80"]).is_err());
        let cli = Cli::try_parse_from(["multillm", "--serve", "--bind", "0.0.0.0:80"]).unwrap();
        assert!(cli.serve);
        assert!(cli.prompt_source().is_none());
    }
}
