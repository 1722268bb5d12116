//! # CLI Layer
//!
//! The only place that knows about stdout, stderr, stdin and exit codes.
//!
//! 1. **Argument parsing**: clap, in `setup.rs`.
//! 2. **Context setup**: resolve the data directory, load config, open the
//!    filesystem backend, install the log subscriber.
//! 3. **Dispatch**: one `PromptApi` call per command.
//! 4. **Output**: `render.rs` turns the `CmdResult` into text.
//!
//! The data directory is, in order: `--data-dir`, `$PROMPT_BUILDER_HOME`, then the
//! platform data directory from `directories`.

use super::render::{
    print_messages, render_config, render_issues, render_sections, render_stats,
    render_template_list,
};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use directories::ProjectDirs;
use promptbuilder::api::PromptApi;
use promptbuilder::clipboard::copy_to_clipboard;
use promptbuilder::commands::config::ConfigAction;
use promptbuilder::config::PromptConfig;
use promptbuilder::error::{PromptError, Result};
use promptbuilder::store::fs_backend::FsBackend;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const HOME_ENV: &str = "PROMPT_BUILDER_HOME";

pub(super) struct AppContext {
    pub api: PromptApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Shell) => shell::run(&mut ctx),
        Some(command) => dispatch(&mut ctx, command, false),
        None => dispatch(&mut ctx, Commands::Show { html: false }, false),
    }
}

/// Logs go to stderr so stdout stays clean for the prompt itself.
/// `RUST_LOG` wins over the defaults; `--verbose` raises the floor to debug.
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "prompt-builder", "prompt-builder")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PromptError::Api("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    debug!(dir = %data_dir.display(), "using data directory");

    let config = PromptConfig::load(&data_dir)?;
    let backend = FsBackend::new(data_dir.clone());
    let api = PromptApi::new(backend, config, data_dir);
    Ok(AppContext { api })
}

/// Runs one command against the context. `interactive` is set inside the shell,
/// where stdin belongs to the line editor.
pub(super) fn dispatch(ctx: &mut AppContext, command: Commands, interactive: bool) -> Result<()> {
    match command {
        Commands::Show { html } => handle_show(ctx, html),
        Commands::Stats => {
            let result = ctx.api.stats()?;
            if let Some(stats) = &result.stats {
                print!("{}", render_stats(stats));
            }
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Lint => {
            let result = ctx.api.lint()?;
            print!("{}", render_issues(&result.issues));
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Sections => {
            let result = ctx.api.sections()?;
            if let Some(template) = &result.template {
                print!("{}", render_sections(template));
            }
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Enable { key } => print_result(ctx.api.enable_section(&key)),
        Commands::Disable { key } => print_result(ctx.api.disable_section(&key)),
        Commands::Set { key, value } => handle_set(ctx, key, value, interactive),
        Commands::Clear => print_result(ctx.api.clear_all()),
        Commands::Fences => print_result(ctx.api.toggle_fences()),
        Commands::Up { key } => print_result(ctx.api.move_up(key.as_deref())),
        Commands::Down { key } => print_result(ctx.api.move_down(key.as_deref())),
        Commands::List => {
            let result = ctx.api.list()?;
            print!("{}", render_template_list(&result.listed_templates));
            print_messages(&result.messages);
            Ok(())
        }
        Commands::SaveAs { name } => print_result(ctx.api.save_as(&name.join(" "))),
        Commands::Switch { selector } => print_result(ctx.api.switch(&selector)),
        Commands::Rename { name } => print_result(ctx.api.rename(&name.join(" "))),
        Commands::Delete { selector } => print_result(ctx.api.delete(selector.as_deref())),
        Commands::Export { output, all } => print_result(ctx.api.export(output.as_deref(), all)),
        Commands::Import { file } => print_result(ctx.api.import(&file)),
        Commands::Copy => handle_copy(ctx),
        Commands::Config { key, value } => handle_config(ctx, key, value),
        Commands::Shell => {
            println!("Already in a shell.");
            Ok(())
        }
    }
}

fn print_result(result: Result<promptbuilder::commands::CmdResult>) -> Result<()> {
    let result = result?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, html: bool) -> Result<()> {
    let result = ctx.api.show(html)?;
    let body = if html {
        result.html.as_deref()
    } else {
        result.markdown.as_deref()
    };
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        if body.ends_with('\n') {
            print!("{}", body);
        } else {
            println!("{}", body);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    ctx: &mut AppContext,
    key: String,
    words: Vec<String>,
    interactive: bool,
) -> Result<()> {
    let value = if words.is_empty() && !interactive && !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(PromptError::Io)?;
        buffer.trim_end_matches(['\n', '\r']).to_string()
    } else {
        words.join(" ")
    };
    print_result(ctx.api.set_section(&key, value))
}

fn handle_copy(ctx: &mut AppContext) -> Result<()> {
    let markdown = ctx.api.markdown();
    if markdown.is_empty() {
        println!("Nothing to copy yet.");
        return Ok(());
    }
    copy_to_clipboard(&markdown)?;
    println!("Copied prompt to clipboard.");
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config_cmd(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
