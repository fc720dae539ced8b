// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The embedded compiler instance.
//!
//! [`Engine`] bundles parse, layout and render behind two calls: `compile`
//! turns source into an opaque [`CompiledDiagram`], `render` turns that into
//! markup or text art. All engine state is immutable after construction, so a
//! single instance is shared across overlapping requests without locking.

use std::fmt;

use crate::compile::parse_source;
use crate::layout::layout_graph;
use crate::model::Graph;
use crate::render::{fonts, render_ascii, render_svg, RenderOptions};

/// Compiler intermediate representation. Opaque to callers; produced by one
/// `compile` and consumed by at most one `render`, never cached across
/// requests.
#[derive(Debug, Clone)]
pub struct CompiledDiagram {
    graph: Graph,
}

impl CompiledDiagram {
    pub(crate) fn graph(&self) -> &Graph {
        &self.graph
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Compile { diagnostic: String },
    Render { diagnostic: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { diagnostic } => write!(f, "cannot compile diagram: {diagnostic}"),
            Self::Render { diagnostic } => write!(f, "cannot render diagram: {diagnostic}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Debug)]
pub struct Engine {
    font_css: String,
}

impl Engine {
    /// Builds the engine. Font CSS is assembled once here and reused for
    /// every SVG render.
    pub fn new() -> Self {
        Self { font_css: fonts::font_face_css() }
    }

    pub fn compile(&self, source: &str) -> Result<CompiledDiagram, EngineError> {
        let graph = parse_source(source)
            .map_err(|err| EngineError::Compile { diagnostic: err.to_string() })?;
        Ok(CompiledDiagram { graph })
    }

    pub fn render(
        &self,
        diagram: &CompiledDiagram,
        options: &RenderOptions,
    ) -> Result<String, EngineError> {
        let layout = layout_graph(diagram.graph(), options.layout);
        if options.ascii_mode {
            render_ascii(diagram.graph(), &layout)
                .map_err(|err| EngineError::Render { diagnostic: err.to_string() })
        } else {
            render_svg(diagram.graph(), &layout, options, &self.font_css)
                .map_err(|err| EngineError::Render { diagnostic: err.to_string() })
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, EngineError};
    use crate::render::RenderOptions;

    #[test]
    fn compile_then_render_produces_svg() {
        let engine = Engine::new();
        let diagram = engine.compile("a -> b: connects").expect("compile");
        let svg = engine.render(&diagram, &RenderOptions::default()).expect("render");
        assert!(svg.starts_with("<?xml"));
    }

    #[test]
    fn compile_error_carries_the_diagnostic() {
        let engine = Engine::new();
        let err = engine.compile("a ->").unwrap_err();
        match err {
            EngineError::Compile { diagnostic } => {
                assert!(diagnostic.contains("line 1"), "got {diagnostic}")
            }
            other => panic!("expected compile error, got {other}"),
        }
    }

    #[test]
    fn empty_source_compiles_cleanly() {
        let engine = Engine::new();
        engine.compile("").expect("empty diagram is valid");
    }

    #[test]
    fn render_error_for_bad_theme() {
        let engine = Engine::new();
        let diagram = engine.compile("a -> b").expect("compile");
        let options = RenderOptions { theme_id: 12345, ..RenderOptions::default() };
        let err = engine.render(&diagram, &options).unwrap_err();
        assert!(matches!(err, EngineError::Render { .. }), "got {err}");
    }
}
