//! Ampersand CLI
//!
//! Builds, inspects, and exercises named character reference automata.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use ampersand_common::warning::warn_once;
use ampersand_html::{Context, Decoded, decode};
use ampersand_trie::codec::{load_json, save_json};
use ampersand_trie::{Automaton, MatchState, Outcome, ReferenceDictionary, StrCursor, build};
use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;

/// Ampersand: HTML named character reference automata
#[derive(Parser, Debug)]
#[command(name = "ampersand")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Build the WHATWG automaton and save it
    ampersand build --output automaton.json

    # Summarize a saved automaton
    ampersand stats --automaton automaton.json

    # Consume the text after a '&'
    ampersand lookup 'notit;'

    # Decode an attribute value
    ampersand decode --attribute '?a=1&amp=2&copy;'
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an automaton from a dictionary and write it to disk
    Build {
        /// `entities.json`-format dictionary (default: the embedded WHATWG table)
        #[arg(long, value_name = "FILE")]
        dictionary: Option<PathBuf>,

        /// Where to write the automaton
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print node and reference counts
    Stats {
        #[command(flatten)]
        source: Source,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run longest-match consumption on the text following a '&'
    Lookup {
        /// Text after the '&' (a leading '&' is ignored)
        text: String,

        /// Treat the reference as part of an attribute value
        #[arg(short, long)]
        attribute: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Decode every named reference in a piece of text
    Decode {
        /// Text content or attribute value (without quotes)
        text: String,

        /// Decode as an attribute value
        #[arg(short, long)]
        attribute: bool,

        #[command(flatten)]
        source: Source,
    },
}

/// Where the automaton comes from. Defaults to the embedded WHATWG table.
#[derive(Args, Debug, Default)]
struct Source {
    /// Saved automaton to load
    #[arg(long, value_name = "FILE", conflicts_with = "dictionary")]
    automaton: Option<PathBuf>,

    /// `entities.json`-format dictionary to build from
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,
}

impl Source {
    fn load(&self) -> Result<Cow<'static, Automaton>> {
        if let Some(ref path) = self.automaton {
            let automaton = load_json(path)
                .with_context(|| format!("failed to load automaton from {}", path.display()))?;
            return Ok(Cow::Owned(automaton));
        }
        if let Some(ref path) = self.dictionary {
            return Ok(Cow::Owned(build_from_file(path)?));
        }
        Ok(Cow::Borrowed(ampersand_trie::whatwg()?))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { dictionary, output } => {
            let source = Source {
                automaton: None,
                dictionary,
            };
            let automaton = source.load()?;
            save_json(&output, &automaton)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Wrote {} nodes to {}",
                automaton.len(),
                output.display().green()
            );
        }
        Command::Stats { source, json } => {
            let stats = source.load()?.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("=== Automaton ===");
                println!("nodes:             {}", stats.nodes);
                println!("leaves:            {}", stats.leaves);
                println!("references:        {}", stats.references);
                println!("legacy references: {}", stats.legacy_references);
                println!("longest name:      {}", stats.longest_name);
            }
        }
        Command::Lookup {
            text,
            attribute,
            source,
        } => {
            let automaton = source.load()?;
            let rest = text.strip_prefix('&').unwrap_or(&text);
            let mut cursor = StrCursor::new(rest);
            let outcome = automaton.consume(&mut cursor, attribute);
            print!("{}", describe_outcome(&outcome, rest));
        }
        Command::Decode {
            text,
            attribute,
            source,
        } => {
            let automaton = source.load()?;
            let context = if attribute {
                Context::AttributeValue
            } else {
                Context::Text
            };
            print!("{}", describe_decoded(&decode(&automaton, &text, context)));
        }
    }

    Ok(())
}

/// Read and build an `entities.json`-format dictionary.
fn build_from_file(path: &Path) -> Result<Automaton> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read dictionary {}", path.display()))?;
    let dictionary = ReferenceDictionary::from_json_str(&json)
        .with_context(|| format!("invalid dictionary {}", path.display()))?;
    if dictionary.is_empty() {
        warn_once("CLI", &format!("{} contains no references", path.display()));
    }
    build(&dictionary).with_context(|| format!("failed to build {}", path.display()))
}

/// Render a single consumption result.
fn describe_outcome(outcome: &Outcome, rest: &str) -> String {
    let mut out = String::new();
    let state = outcome.state.to_string();
    let state = if outcome.is_match() {
        state.green().to_string()
    } else {
        state.red().to_string()
    };
    out.push_str(&format!("state:       {state}\n"));

    let name: String = rest.chars().take(outcome.consumed).collect();
    out.push_str(&format!("consumed:    {} (&{name})\n", outcome.consumed));

    if let Some(replacement) = outcome.replacement {
        let codepoints: Vec<String> = replacement
            .as_chars()
            .iter()
            .map(|c| format!("U+{:04X}", u32::from(*c)))
            .collect();
        out.push_str(&format!(
            "replacement: {:?} ({})\n",
            replacement.to_string(),
            codepoints.join(" ")
        ));
    }
    if let Some(error) = outcome.error {
        out.push_str(&format!("error:       {}\n", error.yellow()));
    }
    if outcome.state == MatchState::Rejected {
        out.push_str("note:        left undecoded inside an attribute value\n");
    }
    out
}

/// Render decoded text and its parse issues.
fn describe_decoded(decoded: &Decoded) -> String {
    let mut out = format!("{}\n", decoded.text);
    if !decoded.issues.is_empty() {
        out.push_str("\n=== Parse Issues ===\n");
        for issue in &decoded.issues {
            out.push_str(&format!("  - {} at byte {}\n", issue.kind, issue.offset));
        }
    }
    out
}
