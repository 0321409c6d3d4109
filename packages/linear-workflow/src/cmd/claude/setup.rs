//! Set up linear-workflow hooks for Claude Code.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::{
    Result,
    eyre::{Context, OptionExt, bail},
};
use linear_workflow::claude::hook;
use serde_json::{Value, json};
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Path to the .claude directory.
    #[arg(long, default_value = ".claude")]
    claude_dir: PathBuf,

    /// Skip the CLAUDE.md prompt (don't add commit conventions).
    #[arg(long)]
    skip_claude_md: bool,
}

/// The section we add to CLAUDE.md so the agent knows the commit grammar up front.
const CLAUDE_MD_SECTION: &str = r#"
## Linear workflow

Work in this project is tracked in Linear. Branches carry the issue identifier (for example `feat/LIN-42-login`), and local issue state is cached in `.claude/linear-tasks/`.

Commit subjects must follow `[emoji] <type>(<scope>): <description>`, where type is one of feat, fix, docs, style, refactor, test, chore, perf, ci, build, revert. Commits with a subject that does not match are blocked; run `linear-workflow check-commit "<subject>"` to test one.
"#;

/// Heading used to detect an existing section.
const CLAUDE_MD_HEADING: &str = "## Linear workflow";

/// Per-hook timeout in seconds; hooks bound their own git queries well below this.
const HOOK_TIMEOUT_SECS: u32 = 10;

#[instrument]
pub fn main(config: Config) -> Result<()> {
    fs::create_dir_all(&config.claude_dir).context("create .claude directory")?;

    let dotclaude = config
        .claude_dir
        .canonicalize()
        .with_context(|| format!("canonicalize claude dir: {:?}", config.claude_dir))?;
    let settings_file = dotclaude.join("settings.local.json");
    tracing::debug!(?dotclaude, ?settings_file, "read existing settings");

    let exe = env::current_exe()
        .context("get current executable path")?
        .to_str()
        .ok_or_eyre("convert current executable path to string")?
        .to_string();

    let command = |args: &str| {
        hook::Config::builder()
            .command(format!("{exe} claude {args}"))
            .timeout(HOOK_TIMEOUT_SECS)
            .build()
    };
    let handler = command("hook");
    let desired_hooks = [
        (
            "PreToolUse",
            hook::Matcher::builder()
                .matcher("Write|Edit|Bash")
                .hooks([&handler])
                .build(),
        ),
        (
            "PostToolUse",
            hook::Matcher::builder()
                .matcher("Bash")
                .hooks([&handler])
                .build(),
        ),
        (
            "UserPromptSubmit",
            hook::Matcher::builder()
                .hooks([&handler, &command("remind --topic workflow")])
                .build(),
        ),
        (
            "PreCompact",
            hook::Matcher::builder()
                .hooks([&handler, &command("remind --topic sync")])
                .build(),
        ),
    ];
    tracing::debug!(?desired_hooks, "generate desired hooks");

    let mut settings = if settings_file.exists() {
        let content =
            fs::read_to_string(&settings_file).context("read existing settings.local.json")?;
        serde_json::from_str::<Value>(&content).context("parse existing settings.local.json")?
    } else {
        json!({})
    };
    tracing::debug!(?settings, "read existing settings");

    // Merge into the existing settings as a `Value` so that keys we don't know
    // about survive; `preserve_order` keeps the user's ordering.
    let Value::Object(settings) = &mut settings else {
        bail!("expected settings to be an object, got: {settings:?}");
    };
    let hooks = settings.entry("hooks").or_insert_with(|| json!({}));
    let Value::Object(hooks) = hooks else {
        bail!("expected hooks to be an object, got: {hooks:?}");
    };
    for (event, matcher) in desired_hooks {
        let entry = hooks.entry(event).or_insert_with(|| json!([]));
        let Value::Array(matchers) = entry else {
            bail!("expected matchers to be an array, got: {entry:?}");
        };
        let matcher = json!(matcher);
        tracing::debug!(?event, ?matcher, ?matchers, "merge hooks");
        if !matchers.contains(&matcher) {
            matchers.push(matcher);
        }
    }

    let settings_json = serde_json::to_string_pretty(&settings).context("serialize settings")?;
    fs::write(&settings_file, settings_json).context("write settings file")?;
    tracing::debug!(?settings, ?settings_file, "wrote merged settings file");

    println!("✓ Wrote hooks configuration to {}", settings_file.display());
    println!();

    if !config.skip_claude_md {
        let project_root = dotclaude
            .parent()
            .ok_or_eyre("get parent directory of .claude")?;
        offer_claude_md_section(project_root)?;
    }

    println!("Next steps:");
    println!("1. Run /hooks in Claude Code to verify hooks are registered");
    println!("2. Create .claude/linear-tasks/ or .claude/linear-config.json to activate the workflow");

    Ok(())
}

/// Offer to add the commit conventions to CLAUDE.md in the project root.
fn offer_claude_md_section(project_root: &Path) -> Result<()> {
    let claude_md_path = project_root.join("CLAUDE.md");
    let existing = match fs::read_to_string(&claude_md_path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e).context("read existing CLAUDE.md"),
    };
    if existing
        .as_deref()
        .is_some_and(|content| content.contains(CLAUDE_MD_HEADING))
    {
        println!("CLAUDE.md already has a Linear workflow section, skipping.");
        println!();
        return Ok(());
    }

    println!("This will be added to {}:", claude_md_path.display());
    println!();
    for line in CLAUDE_MD_SECTION.lines() {
        println!("  {line}");
    }
    println!();

    print!("Add this section to CLAUDE.md? [Y/n] ");
    io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read user input")?;
    let response = line.trim().to_lowercase();
    if !matches!(response.as_str(), "" | "y" | "yes") {
        println!("Skipped CLAUDE.md update.");
        println!();
        return Ok(());
    }

    let mut content = match existing {
        Some(existing) if existing.ends_with('\n') => existing,
        Some(existing) => format!("{existing}\n"),
        None => String::from("# CLAUDE.md\n"),
    };
    content.push_str(CLAUDE_MD_SECTION);
    fs::write(&claude_md_path, content).context("write CLAUDE.md")?;
    println!("✓ Added Linear workflow section to {}", claude_md_path.display());
    println!();

    Ok(())
}
