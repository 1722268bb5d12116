//! Interactive session.
//!
//! Keeps one `PromptApi` alive across lines, so session state such as the last
//! edited section carries over: `set goal ...` followed by a bare `up` moves the
//! goal. Each line is parsed with the same clap definition as the command line.

use super::commands::{dispatch, AppContext};
use super::setup::{Cli, Commands};
use clap::{CommandFactory, Parser};
use colored::*;
use promptbuilder::error::{PromptError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Skip,
    Quit,
    ToggleHelp,
    Run(Vec<String>),
}

pub(super) fn run(ctx: &mut AppContext) -> Result<()> {
    print_welcome();

    let mut rl = DefaultEditor::new()
        .map_err(|e| PromptError::Api(format!("Failed to initialize readline: {}", e)))?;
    let mut show_help = false;

    loop {
        let readline = rl.readline(&format!("{} ", "prompt>".bright_green()));
        match readline {
            Ok(line) => {
                let action = classify(&line);
                if action != LineAction::Skip {
                    let _ = rl.add_history_entry(line.trim());
                }
                match action {
                    LineAction::Skip => continue,
                    LineAction::Quit => break,
                    LineAction::ToggleHelp => {
                        show_help = !show_help;
                        if show_help {
                            print!("{}", command_list());
                        } else {
                            println!("{}", "Help hidden.".dimmed());
                        }
                    }
                    LineAction::Run(words) => {
                        run_line(ctx, words);
                        if show_help {
                            print!("{}", command_list());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                return Err(PromptError::Api(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

fn run_line(ctx: &mut AppContext, words: Vec<String>) {
    let args = std::iter::once("prompt-builder".to_string()).chain(words);
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Some(command),
            ..
        }) => {
            if let Err(e) = dispatch(ctx, command, true) {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Ok(_) => {
            if let Err(e) = dispatch(ctx, Commands::Show { html: false }, true) {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => {
            let _ = e.print();
        }
    }
}

fn classify(line: &str) -> LineAction {
    let line = line.trim();
    match line {
        "" => LineAction::Skip,
        "quit" | "exit" | "q" => LineAction::Quit,
        "help" | "?" => LineAction::ToggleHelp,
        _ => LineAction::Run(split_words(line)),
    }
}

/// Splits a line on whitespace, keeping single- or double-quoted runs together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn command_list() -> String {
    let cmd = Cli::command();
    let mut out = String::from("\nCommands:\n");
    for sc in cmd.get_subcommands().filter(|sc| sc.get_name() != "shell") {
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        out.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
    }
    out.push_str(&format!("  {:<12} {}\n", "help", "Toggle this list"));
    out.push_str(&format!("  {:<12} {}\n\n", "quit", "Leave the shell"));
    out
}

fn print_welcome() {
    println!();
    println!("{}", "Prompt Builder".bright_cyan().bold());
    println!(
        "Type {} to toggle the command list, {} to exit",
        "help".yellow(),
        "quit".yellow()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("   "), LineAction::Skip);
        assert_eq!(classify("quit"), LineAction::Quit);
        assert_eq!(classify(" help "), LineAction::ToggleHelp);
        assert_eq!(
            classify("up goal"),
            LineAction::Run(vec!["up".into(), "goal".into()])
        );
    }

    #[test]
    fn test_split_words_respects_quotes() {
        assert_eq!(
            split_words(r#"set goal "Write a  haiku" now"#),
            vec!["set", "goal", "Write a  haiku", "now"]
        );
        assert_eq!(split_words("rename 'It''s'"), vec!["rename", "Its"]);
        assert_eq!(split_words(r#"set role """#), vec!["set", "role", ""]);
    }

    #[test]
    fn test_command_list_skips_shell() {
        let list = command_list();
        assert!(list.contains("  set "));
        assert!(list.contains("  save-as "));
        assert!(!list.contains("  shell "));
        assert!(list.contains("  quit "));
    }
}
