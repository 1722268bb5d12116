use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prompt-builder", bin_name = "prompt-builder", version)]
#[command(
    about = "Build structured prompts from labeled sections",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding templates and config (overrides PROMPT_BUILDER_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the synthesized prompt (the default)
    #[command(display_order = 1)]
    Show {
        /// Render to HTML instead of markdown
        #[arg(long)]
        html: bool,
    },

    /// Character, word and token counts of the prompt
    #[command(display_order = 2)]
    Stats,

    /// Report missing required content
    #[command(display_order = 3)]
    Lint,

    /// List sections of the current template in order
    #[command(alias = "ls-sections", display_order = 10)]
    Sections,

    /// Include a section in the prompt
    #[command(display_order = 11)]
    Enable { key: String },

    /// Leave a section out of the prompt
    #[command(display_order = 12)]
    Disable { key: String },

    /// Set a section's text (reads stdin when piped and no text is given)
    #[command(display_order = 13)]
    Set {
        key: String,

        /// Text words, joined with spaces
        #[arg(trailing_var_arg = true)]
        value: Vec<String>,
    },

    /// Empty every section value
    #[command(display_order = 14)]
    Clear,

    /// Toggle wrapping the prompt in a code fence
    #[command(display_order = 15)]
    Fences,

    /// Move a section (or the last edited one) up
    #[command(display_order = 16)]
    Up { key: Option<String> },

    /// Move a section (or the last edited one) down
    #[command(display_order = 17)]
    Down { key: Option<String> },

    /// List saved templates
    #[command(alias = "ls", display_order = 20)]
    List,

    /// Save a copy of the current template under a new name
    #[command(display_order = 21)]
    SaveAs {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Make another template current (position, id prefix, or id:<id>)
    #[command(display_order = 22)]
    Switch { selector: String },

    /// Rename the current template
    #[command(display_order = 23)]
    Rename {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a template (the current one by default)
    #[command(alias = "rm", display_order = 24)]
    Delete { selector: Option<String> },

    /// Write the current template (or all of them) to disk
    #[command(display_order = 30)]
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bundle every template into a .tar.gz
        #[arg(long)]
        all: bool,
    },

    /// Replace the collection with a template read from a JSON file
    #[command(display_order = 31)]
    Import { file: PathBuf },

    /// Copy the synthesized prompt to the clipboard
    #[command(display_order = 32)]
    Copy,

    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (default-locale, min-goal-chars, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start an interactive session
    #[command(display_order = 41)]
    Shell,
}
