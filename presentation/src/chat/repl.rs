//! REPL (Read-Eval-Print Loop) for interactive comparisons

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ProgressReporter;
use multillm_application::RunComparisonUseCase;
use multillm_domain::{Prompt, Protocol};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// One line of user input, classified
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Skip,
    Exit,
    Command(&'a str),
    Prompt(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Input::Skip
        } else if line == "bye" {
            Input::Exit
        } else if line.starts_with('/') {
            Input::Command(line)
        } else {
            Input::Prompt(line)
        }
    }
}

/// Interactive comparison REPL
pub struct ChatRepl {
    use_case: Arc<RunComparisonUseCase>,
    protocol: Protocol,
    repl: ReplConfig,
    output: OutputConfig,
}

impl ChatRepl {
    pub fn new(use_case: Arc<RunComparisonUseCase>, protocol: Protocol) -> Self {
        Self {
            use_case,
            protocol,
            repl: ReplConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    fn history_path(&self) -> Option<PathBuf> {
        match &self.repl.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|p| p.join("multillm").join("history.txt")),
        }
    }

    /// Run the interactive REPL until `bye`, `/quit` or EOF
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(&self.repl.prompt) {
                Ok(line) => match Input::parse(&line) {
                    Input::Skip => continue,
                    Input::Exit => break,
                    Input::Command(cmd) => {
                        if self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Prompt(text) => {
                        let _ = rl.add_history_entry(text);
                        self.process_prompt(text).await;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("multillm interactive mode, protocol {}", self.protocol);
        println!("Models: {}", self.use_case.config().model_names().join(", "));
        println!("Type a prompt, /help for commands, or bye to exit.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd, ""),
        };

        match name {
            "/quit" | "/exit" | "/q" => true,
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?        - Show this help");
                println!("  /models              - Show answering models and judges");
                println!("  /protocol [NAME]     - Show or change the protocol");
                println!("  /quit, /exit, /q     - Exit (or type bye)");
                println!();
                false
            }
            "/models" => {
                let config = self.use_case.config();
                println!();
                println!("Models: {}", config.model_names().join(", "));
                println!("Judges: {}", config.judge_names().join(", "));
                println!();
                false
            }
            "/protocol" if arg.is_empty() => {
                println!("{}: {}", self.protocol, self.protocol.description());
                false
            }
            "/protocol" => {
                let protocol = Protocol::from(arg);
                if protocol.is_unknown() {
                    println!("Unknown protocol: {}", arg);
                    println!(
                        "Known protocols: {}",
                        Protocol::known()
                            .iter()
                            .map(Protocol::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                } else {
                    debug!("REPL protocol changed to {}", protocol);
                    self.protocol = protocol;
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_prompt(&self, text: &str) {
        let prompt = match Prompt::try_new(text) {
            Ok(prompt) => prompt,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        let result = if self.repl.show_progress {
            let progress = ProgressReporter::new();
            self.use_case
                .run_with_progress(&prompt, &self.protocol, &progress)
                .await
        } else {
            self.use_case.run(&prompt, &self.protocol).await
        };

        match result {
            Ok(run) => {
                print!("{}", ConsoleFormatter.render(&run, self.output.format));
                if self.output.show_elapsed {
                    println!("{}", ConsoleFormatter::format_elapsed(run.elapsed()));
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }
}
