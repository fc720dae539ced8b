// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Guarded facade over the embedded compiler.
//!
//! [`Runtime`] owns the process-wide [`Engine`] instance, created lazily on
//! first use. Compile and render run on the blocking pool behind the deadline
//! guard; `validate` probes the compile phase without ever turning a compile
//! failure into an error.

mod engine;
pub mod guard;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

pub use engine::{CompiledDiagram, Engine, EngineError};
pub use guard::{DeadlineExceeded, OPERATION_DEADLINE};

use crate::layout::LayoutEngine;
use crate::render::RenderOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    Compile { diagnostic: String },
    Render { diagnostic: String },
    Timeout(DeadlineExceeded),
    Canceled { label: &'static str },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { diagnostic } => write!(f, "cannot compile diagram: {diagnostic}"),
            Self::Render { diagnostic } => write!(f, "cannot render diagram: {diagnostic}"),
            Self::Timeout(err) => write!(f, "{err}"),
            Self::Canceled { label } => write!(f, "{label} task was canceled before finishing"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EngineError> for RuntimeError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Compile { diagnostic } => Self::Compile { diagnostic },
            EngineError::Render { diagnostic } => Self::Render { diagnostic },
        }
    }
}

impl From<DeadlineExceeded> for RuntimeError {
    fn from(err: DeadlineExceeded) -> Self {
        Self::Timeout(err)
    }
}

/// Outcome of a `validate` probe. Always well-formed: compile failures become
/// `valid: false` plus the diagnostic, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
}

pub struct Runtime {
    engine: OnceCell<Arc<Engine>>,
    deadline: Duration,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_deadline(OPERATION_DEADLINE)
    }

    pub fn with_deadline(deadline: Duration) -> Self {
        Self { engine: OnceCell::new(), deadline }
    }

    /// Whether the engine instance has been constructed yet. Lazy init means
    /// this stays false until the first compile.
    pub fn engine_initialized(&self) -> bool {
        self.engine.initialized()
    }

    async fn engine(&self) -> Arc<Engine> {
        self.engine
            .get_or_init(|| async { Arc::new(Engine::new()) })
            .await
            .clone()
    }

    /// Compiles `source`, guarded by the operation deadline.
    pub async fn compile(&self, source: String) -> Result<CompiledDiagram, RuntimeError> {
        let engine = self.engine().await;
        let task = tokio::task::spawn_blocking(move || engine.compile(&source));
        match guard::with_deadline("compile", self.deadline, task).await? {
            Ok(result) => result.map_err(RuntimeError::from),
            Err(_join) => Err(RuntimeError::Canceled { label: "compile" }),
        }
    }

    /// Renders a compiled diagram, guarded by the operation deadline.
    ///
    /// The diagram is consumed: on timeout the detached render finishes in
    /// the background and its output is discarded.
    pub async fn render(
        &self,
        diagram: CompiledDiagram,
        options: RenderOptions,
    ) -> Result<String, RuntimeError> {
        let engine = self.engine().await;
        let task = tokio::task::spawn_blocking(move || engine.render(&diagram, &options));
        match guard::with_deadline("render", self.deadline, task).await? {
            Ok(result) => result.map_err(RuntimeError::from),
            Err(_join) => Err(RuntimeError::Canceled { label: "render" }),
        }
    }

    /// Runs the compile phase only and reports the outcome.
    ///
    /// Compile failures are the expected result here, not errors; only guard
    /// and scheduling failures propagate.
    pub async fn validate(&self, source: String) -> Result<Validation, RuntimeError> {
        match self.compile(source).await {
            Ok(_) => Ok(Validation { valid: true, error: None }),
            Err(RuntimeError::Compile { diagnostic }) => {
                Ok(Validation { valid: false, error: Some(diagnostic) })
            }
            Err(other) => Err(other),
        }
    }

    /// Pre-exercises both layout engines once so the first real call does not
    /// pay construction cost. Best-effort: failures are logged and swallowed.
    pub async fn warm_up(&self) {
        for engine_kind in LayoutEngine::ALL {
            let options = RenderOptions { layout: engine_kind, ..RenderOptions::default() };
            let outcome = async {
                let diagram = self.compile("a -> b".to_owned()).await?;
                self.render(diagram, options).await
            }
            .await;

            if let Err(err) = outcome {
                eprintln!("proteus: warm-up ({}) failed: {err}", engine_kind.name());
            }
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
