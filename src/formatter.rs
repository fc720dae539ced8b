// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bridge to the external `d2` executable.
//!
//! Formatting is the one operation the embedded engine does not cover; it
//! shells out to `d2 fmt -` with the source piped to stdin. The binary path
//! comes from the `D2_BIN` environment variable, falling back to the bare
//! name resolved via `PATH`. One process per call; no pooling.

use std::env;
use std::fmt;
use std::io;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Environment variable overriding the executable path.
pub const D2_BIN_ENV: &str = "D2_BIN";

const DEFAULT_BINARY: &str = "d2";
const INSTALL_URL: &str = "https://d2lang.com/tour/install";

/// Captured output of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl BinaryResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Best error text for a failed run: trimmed stderr, else trimmed stdout,
    /// else a fixed fallback.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_owned();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_owned();
        }
        "unknown error".to_owned()
    }
}

#[derive(Debug)]
pub enum FormatterError {
    NotFound { binary: String },
    Io { binary: String, source: io::Error },
}

impl fmt::Display for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { binary } => write!(
                f,
                "d2 executable `{binary}` not found; install it from {INSTALL_URL} or point the {D2_BIN_ENV} environment variable at the binary"
            ),
            Self::Io { binary, source } => {
                write!(f, "failed to run d2 executable `{binary}`: {source}")
            }
        }
    }
}

impl std::error::Error for FormatterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    binary: Option<String>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the executable path, bypassing `D2_BIN` and `PATH` resolution.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: Some(binary.into()) }
    }

    fn resolve_binary(&self) -> String {
        if let Some(binary) = &self.binary {
            return binary.clone();
        }
        env::var(D2_BIN_ENV).unwrap_or_else(|_| DEFAULT_BINARY.to_owned())
    }

    /// Runs the executable with `args`, piping `input` to stdin, and captures
    /// both output streams plus the exit status.
    ///
    /// A non-zero exit is not an error here; callers inspect
    /// [`BinaryResult::exit_code`].
    pub async fn run(&self, args: &[&str], input: &str) -> Result<BinaryResult, FormatterError> {
        let binary = self.resolve_binary();

        let mut child = Command::new(&binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    FormatterError::NotFound { binary: binary.clone() }
                } else {
                    FormatterError::Io { binary: binary.clone(), source: err }
                }
            })?;

        // Feed stdin concurrently with draining the output pipes: a child
        // that streams output while we are still writing must not deadlock,
        // and a child that exits without reading everything (EPIPE) still
        // gets its streams and exit status captured below.
        if let Some(mut stdin) = child.stdin.take() {
            let bytes = input.as_bytes().to_vec();
            tokio::spawn(async move {
                let _ = stdin.write_all(&bytes).await;
                let _ = stdin.shutdown().await;
                // Dropping the handle closes the pipe so the child sees EOF.
            });
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|err| FormatterError::Io { binary: binary.clone(), source: err })?;

        Ok(BinaryResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // A status without a code means the child died to a signal.
            exit_code: output.status.code().unwrap_or(1),
        })
    }

    /// Pipes `source` through `<binary> fmt -`.
    pub async fn format(&self, source: &str) -> Result<BinaryResult, FormatterError> {
        self.run(&["fmt", "-"], source).await
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryResult, Formatter, FormatterError, D2_BIN_ENV};

    #[tokio::test]
    async fn missing_binary_names_the_override() {
        let formatter = Formatter::with_binary("/nonexistent/proteus-test-d2");
        let err = formatter.format("a -> b").await.unwrap_err();
        assert!(matches!(err, FormatterError::NotFound { .. }), "got {err}");
        let message = err.to_string();
        assert!(message.contains(D2_BIN_ENV), "got {message}");
        assert!(message.contains("d2lang.com"), "got {message}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_exit_status() {
        let formatter = Formatter::with_binary("sh");
        let result = formatter.run(&["-c", "cat"], "a -> b\n").await.expect("run");
        assert!(result.success());
        assert_eq!(result.stdout, "a -> b\n");
        assert_eq!(result.stderr, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stderr_and_nonzero_exit() {
        let formatter = Formatter::with_binary("sh");
        let result = formatter
            .run(&["-c", "echo 'bad syntax' >&2; exit 3"], "")
            .await
            .expect("run");
        assert!(!result.success());
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.failure_message(), "bad syntax");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn streams_input_past_pipe_capacity_without_deadlocking() {
        let formatter = Formatter::with_binary("sh");
        // Far past the kernel pipe buffer, with the child echoing as it reads.
        let input = "a -> b\n".repeat(200_000);
        let result = formatter.run(&["-c", "cat"], &input).await.expect("run");
        assert!(result.success());
        assert_eq!(result.stdout.len(), input.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn child_that_never_reads_stdin_still_reports_exit_and_stderr() {
        let formatter = Formatter::with_binary("sh");
        let input = "x".repeat(1 << 20);
        let result = formatter
            .run(&["-c", "echo 'nope' >&2; exit 2"], &input)
            .await
            .expect("run");
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.failure_message(), "nope");
    }

    #[test]
    fn failure_message_prefers_stderr_then_stdout_then_fallback() {
        let both = BinaryResult {
            stdout: " out ".to_owned(),
            stderr: " err ".to_owned(),
            exit_code: 1,
        };
        assert_eq!(both.failure_message(), "err");

        let stdout_only =
            BinaryResult { stdout: " out ".to_owned(), stderr: String::new(), exit_code: 1 };
        assert_eq!(stdout_only.failure_message(), "out");

        let silent = BinaryResult { stdout: String::new(), stderr: String::new(), exit_code: 1 };
        assert_eq!(silent.failure_message(), "unknown error");
    }
}
