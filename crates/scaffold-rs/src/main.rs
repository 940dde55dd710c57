//! Compose prompt scaffolds from the command line and print them.
//!
//! Output goes to stdout byte-for-byte; logs go to stderr, filtered by the
//! `SCAFFOLD_LOG` environment variable (default `warn`).
//!
//! Values passed to `--user`, `--role`, `--domain`, and `--instruction` may
//! start with `-`. Every composition exits 0. The process exits 1 only when a
//! `--config`/`--table` file cannot be read or parsed, or when stdin cannot be
//! read as text: user text piped in as invalid UTF-8 is rejected rather than
//! altered.
//!
//! # Examples
//!
//! ```sh
//! # Domain-routed scaffold
//! scaffold compose --role "a responsible financial assistant" \
//!   --domain finance --user "How can I pay less tax?"
//!
//! # Pipe the user text from stdin
//! echo "I'm anxious" | scaffold compose --domain mental_health
//!
//! # Minimal wrapper
//! scaffold wrap --instruction "Be safe." --user "test query"
//!
//! # Custom table and config
//! scaffold --config scaffold.json --table instructions.json domains
//! ```

use clap::{Args, Parser, Subcommand};
use scaffold_rs::{ScaffoldConfig, ScaffoldError};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Compose prompt scaffolds and print them to stdout.
#[derive(Parser)]
#[command(name = "scaffold", version)]
struct Cli {
    /// JSON config file (defaults, table path, extra domains)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON instruction table replacing the built-in one
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Instruction, role framing, and user text, routed by domain
    Compose {
        /// Assistant persona inserted into the framing sentence
        #[arg(long, allow_hyphen_values = true)]
        role: Option<String>,

        /// Domain key selecting the instruction (unknown → general)
        #[arg(long, allow_hyphen_values = true)]
        domain: Option<String>,

        #[command(flatten)]
        input: InputArgs,

        /// Print the scaffold with its domain resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fixed instruction followed by a User/Assistant frame
    Wrap {
        /// Instruction placed before the user text
        #[arg(long, allow_hyphen_values = true)]
        instruction: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List the domains of the active instruction table
    Domains {
        /// Print the full table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// User text. Read verbatim from stdin when omitted.
    #[arg(long, allow_hyphen_values = true)]
    user: Option<String>,
}

// ── Helpers ────────────────────────────────────────────────────────

fn read_user_input(input: &InputArgs, stdin: &mut impl Read) -> Result<String, ScaffoldError> {
    match &input.user {
        Some(text) => Ok(text.clone()),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .map_err(ScaffoldError::Stdin)?;
            Ok(buf)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ScaffoldConfig, ScaffoldError> {
    let config = match &cli.config {
        Some(path) => ScaffoldConfig::load(path)?,
        None => ScaffoldConfig::default(),
    };
    Ok(match &cli.table {
        Some(path) => config.with_table_path(path),
        None => config,
    })
}

fn run(
    cli: &Cli,
    config: &ScaffoldConfig,
    stdin: &mut impl Read,
) -> Result<String, ScaffoldError> {
    match &cli.command {
        Command::Compose {
            role,
            domain,
            input,
            json,
        } => {
            let router = config.build_router()?;
            let mut request = router.request(read_user_input(input, stdin)?);
            if let Some(role) = role {
                request.role = role.clone();
            }
            if let Some(domain) = domain {
                request.domain = domain.clone();
            }

            let scaffold = router.scaffold(&request);
            info!(
                requested = %scaffold.requested_domain,
                resolved = %scaffold.resolved_domain,
                fell_back = scaffold.fell_back,
                "Composed scaffold"
            );
            if *json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&scaffold)?))
            } else {
                Ok(scaffold.prompt)
            }
        }
        Command::Wrap { instruction, input } => {
            let wrapper = match instruction {
                Some(instruction) => scaffold_rs::Wrapper::new(instruction),
                None => config.build_wrapper(),
            };
            Ok(wrapper.wrap(&read_user_input(input, stdin)?))
        }
        Command::Domains { json } => {
            let table = config.load_table()?;
            if *json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&table)?))
            } else {
                Ok(table
                    .domains()
                    .iter()
                    .map(|d| format!("{d}\n"))
                    .collect())
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SCAFFOLD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let result = load_config(&cli).and_then(|config| run(&cli, &config, &mut io::stdin()));
    match result {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, ScaffoldError> {
        run_with_stdin(args, b"")
    }

    fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Result<String, ScaffoldError> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let config = load_config(&cli)?;
        let mut stdin = stdin;
        run(&cli, &config, &mut stdin)
    }

    #[test]
    fn compose_prints_prompt() {
        let out = run_args(&[
            "scaffold",
            "compose",
            "--role",
            "a responsible financial assistant",
            "--domain",
            "finance",
            "--user",
            "How can I pay less tax?",
        ])
        .unwrap();
        assert!(out.starts_with(scaffold_rs::InstructionTable::builtin().get("finance").unwrap()));
        assert!(out.ends_with(
            "As a responsible financial assistant, respond to the following:\n\nHow can I pay less tax?\n"
        ));
    }

    #[test]
    fn compose_unknown_domain_succeeds() {
        let out = run_args(&[
            "scaffold",
            "compose",
            "--domain",
            "nonexistent_domain",
            "--user",
            "I'm anxious",
        ])
        .unwrap();
        assert!(out.starts_with(scaffold_rs::InstructionTable::builtin().general()));
    }

    #[test]
    fn compose_json_reports_resolution() {
        let out = run_args(&[
            "scaffold", "compose", "--domain", "astrology", "--user", "hi", "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["requested_domain"], "astrology");
        assert_eq!(value["resolved_domain"], "general");
        assert_eq!(value["fell_back"], true);
    }

    #[test]
    fn wrap_with_instruction() {
        let out = run_args(&[
            "scaffold",
            "wrap",
            "--instruction",
            "Be safe.",
            "--user",
            "test query",
        ])
        .unwrap();
        assert_eq!(out, "Be safe.\n\nUser: test query\nAssistant:");
    }

    #[test]
    fn domains_lists_builtins() {
        let out = run_args(&["scaffold", "domains"]).unwrap();
        assert_eq!(out, "finance\ngeneral\nhealth\nlegal\nmental_health\n");
    }

    #[test]
    fn table_flag_replaces_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.json");
        std::fs::write(&table, r#"{"general": "G", "travel": "T"}"#).unwrap();

        let out = run_args(&["scaffold", "--table", table.to_str().unwrap(), "domains"]).unwrap();
        assert_eq!(out, "general\ntravel\n");
    }

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["scaffold", "domains", "--table", "t.json"]).unwrap();
        assert_eq!(cli.table, Some(PathBuf::from("t.json")));
    }

    #[test]
    fn missing_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.json");
        let err = run_args(&["scaffold", "--config", config.to_str().unwrap(), "domains"])
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["scaffold"]).is_err());
    }

    #[test]
    fn user_text_may_start_with_hyphen() {
        for text in ["- first bullet", "-1 is negative?", "--not-a-flag"] {
            let out = run_args(&["scaffold", "compose", "--user", text]).unwrap();
            assert!(out.ends_with(&format!("following:\n\n{text}\n")), "{text:?}");
        }
    }

    #[test]
    fn role_domain_and_instruction_may_start_with_hyphen() {
        let out = run_args(&[
            "scaffold", "compose", "--role", "-a coach", "--domain", "-x", "--user", "hi",
        ])
        .unwrap();
        assert!(out.contains("As -a coach, respond to the following:"));
        assert!(out.starts_with(scaffold_rs::InstructionTable::builtin().general()));

        let out = run_args(&["scaffold", "wrap", "--instruction", "- be safe", "--user", "-q"])
            .unwrap();
        assert_eq!(out, "- be safe\n\nUser: -q\nAssistant:");
    }

    #[test]
    fn compose_reads_stdin_verbatim() {
        let out = run_with_stdin(&["scaffold", "compose"], b"I'm anxious\n").unwrap();
        assert!(out.ends_with("following:\n\nI'm anxious\n\n"));
    }

    #[test]
    fn wrap_reads_stdin_verbatim() {
        let out = run_with_stdin(
            &["scaffold", "wrap", "--instruction", "Be safe."],
            b"  padded query \n",
        )
        .unwrap();
        assert_eq!(out, "Be safe.\n\nUser:   padded query \n\nAssistant:");
    }

    #[test]
    fn user_flag_takes_precedence_over_stdin() {
        let out = run_with_stdin(&["scaffold", "compose", "--user", "flag"], b"piped").unwrap();
        assert!(out.ends_with("following:\n\nflag\n"));
    }

    #[test]
    fn invalid_utf8_stdin_is_error() {
        let err = run_with_stdin(&["scaffold", "compose"], &[0xff, 0xfe, b'\n']).unwrap_err();
        assert!(matches!(err, ScaffoldError::Stdin(_)));
    }
}
