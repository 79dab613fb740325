//! Clipboard writes through the host's clipboard tool.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Candidate tools, tried in order.
const TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Pipes text into the first clipboard tool found on PATH.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    pub fn detect() -> Option<Self> {
        TOOLS
            .iter()
            .find(|(program, _)| tool_available(program))
            .map(|(program, args)| Self {
                program: (*program).to_string(),
                args: args.iter().map(|a| (*a).to_string()).collect(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("run {}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("write to {}", self.program))?;
        }

        // xclip and wl-copy leave a forked owner holding the selection; only
        // the direct child is waited on.
        let status = child
            .wait()
            .with_context(|| format!("wait for {}", self.program))?;
        if !status.success() {
            bail!("{} failed with {}", self.program, status);
        }
        Ok(())
    }
}

/// Used when no clipboard tool exists; every write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        bail!(
            "no clipboard tool found (tried: {})",
            TOOLS.iter().map(|(p, _)| *p).collect::<Vec<_>>().join(", ")
        );
    }
}

/// The host clipboard, or a stub that reports the missing tool.
pub fn system() -> Box<dyn Clipboard> {
    match SystemClipboard::detect() {
        Some(c) => {
            tracing::debug!(program = c.program(), "using clipboard tool");
            Box::new(c)
        }
        None => Box::new(NoClipboard),
    }
}

fn tool_available(program: &str) -> bool {
    let path = std::env::var_os("PATH").unwrap_or_default();
    std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
}
