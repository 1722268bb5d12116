use crate::error::{PromptError, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

struct Tool {
    program: &'static str,
    args: &'static [&'static str],
}

/// Clipboard tools to try, in order, for the current platform.
#[cfg(target_os = "macos")]
const TOOLS: &[Tool] = &[Tool {
    program: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "linux")]
const TOOLS: &[Tool] = &[
    Tool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    Tool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

#[cfg(target_os = "windows")]
const TOOLS: &[Tool] = &[Tool {
    program: "clip",
    args: &[],
}];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const TOOLS: &[Tool] = &[];

/// Copies text to the system clipboard through the platform's command line tool.
/// On Linux, xclip is tried first and xsel second.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if TOOLS.is_empty() {
        return Err(PromptError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ));
    }

    let mut last_error = None;
    for tool in TOOLS {
        match pipe_to(tool.program, tool.args, text) {
            Ok(()) => {
                debug!(program = tool.program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
            Err(e) => last_error = Some(e),
        }
    }
    let names: Vec<&str> = TOOLS.iter().map(|tool| tool.program).collect();
    Err(last_error.unwrap_or_else(|| {
        PromptError::Clipboard(format!("Install one of: {}", names.join(", ")))
    }))
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| PromptError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| PromptError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| PromptError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(PromptError::Clipboard(format!("{} exited with error", program)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_clipboard_error() {
        let err = pipe_to("prompt-builder-no-such-tool", &[], "x").unwrap_err();
        assert!(matches!(err, PromptError::Clipboard(_)));
        assert!(err.to_string().contains("Failed to spawn"));
    }

    #[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
    #[test]
    fn test_platform_has_candidates() {
        assert!(!TOOLS.is_empty());
    }
}
