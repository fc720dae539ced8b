// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::formatter::Formatter;
use crate::layout::LAYOUTS;
use crate::render::{strip_embedded_fonts, RenderOptions, DEFAULT_PAD};
use crate::runtime::{Runtime, RuntimeError};
use crate::theme::{dark_theme_by_id, theme_by_id, DARK_THEMES, DEFAULT_THEME_ID, LIGHT_THEMES};

use super::types::*;

/// Hard cap on returned render payloads. Oversized output is withheld and
/// replaced by an error with mitigation hints.
pub const MAX_OUTPUT_CHARS: usize = 200_000;

#[derive(Clone)]
pub struct ProteusMcp {
    runtime: Arc<Runtime>,
    formatter: Formatter,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ProteusMcp {
    pub fn new() -> Self {
        Self::with_parts(Arc::new(Runtime::new()), Formatter::new())
    }

    pub fn with_parts(runtime: Arc<Runtime>, formatter: Formatter) -> Self {
        Self { runtime, formatter, tool_router: Self::tool_router() }
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    /// Kicks off compiler warm-up as a detached background task. The tool
    /// surface is usable immediately; a warm-up failure is logged inside
    /// [`Runtime::warm_up`] and never surfaces here.
    pub fn spawn_warm_up(&self) {
        let runtime = self.runtime.clone();
        tokio::spawn(async move { runtime.warm_up().await });
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Compile and render diagram source to SVG (default) or plain-text art
    /// with `ascii_mode: true`; see `list-themes`/`list-layouts` for option
    /// values.
    #[tool(name = "render")]
    async fn render(
        &self,
        params: Parameters<RenderParams>,
    ) -> Result<Json<RenderResponse>, ErrorData> {
        let RenderParams {
            source,
            layout,
            theme,
            dark_theme,
            sketch,
            pad,
            center,
            ascii_mode,
            strip_fonts,
        } = params.0;
        require_source(&source)?;

        let theme_id = theme.unwrap_or(DEFAULT_THEME_ID);
        if theme_by_id(theme_id).is_none() {
            return Err(ErrorData::invalid_params(
                format!("unknown theme id: {theme_id} (see list-themes)"),
                Some(serde_json::json!({ "theme": theme_id })),
            ));
        }
        if let Some(id) = dark_theme {
            if dark_theme_by_id(id).is_none() {
                return Err(ErrorData::invalid_params(
                    format!("unknown dark theme id: {id} (see list-themes)"),
                    Some(serde_json::json!({ "dark_theme": id })),
                ));
            }
        }

        let ascii_mode = ascii_mode.unwrap_or(false);
        let options = RenderOptions {
            layout: layout.unwrap_or_default(),
            theme_id,
            dark_theme_id: dark_theme,
            sketch: sketch.unwrap_or(false),
            pad: pad.unwrap_or(DEFAULT_PAD),
            center: center.unwrap_or(false),
            ascii_mode,
        };

        let diagram = self.runtime.compile(source).await.map_err(runtime_error_data)?;
        let output = self.runtime.render(diagram, options).await.map_err(runtime_error_data)?;

        // Fonts only exist in markup output; ascii has nothing to strip.
        let output = if strip_fonts.unwrap_or(false) && !ascii_mode {
            strip_embedded_fonts(&output)
        } else {
            output
        };

        let chars = output.chars().count();
        if chars > MAX_OUTPUT_CHARS {
            return Err(ErrorData::internal_error(
                format!(
                    "rendered output is {chars} characters, over the {MAX_OUTPUT_CHARS} limit; re-render with `ascii_mode: true` or `strip_fonts: true`"
                ),
                Some(serde_json::json!({ "chars": chars, "limit": MAX_OUTPUT_CHARS })),
            ));
        }

        Ok(Json(RenderResponse {
            output,
            format: if ascii_mode { "ascii".to_owned() } else { "svg".to_owned() },
            chars,
        }))
    }

    /// Probe diagram source for syntax errors without rendering; always
    /// returns `{valid, error?}`, never a tool error for bad source.
    #[tool(name = "validate")]
    async fn validate(
        &self,
        params: Parameters<ValidateParams>,
    ) -> Result<Json<ValidateResponse>, ErrorData> {
        let source = params.0.source;
        require_source(&source)?;

        let validation = self.runtime.validate(source).await.map_err(runtime_error_data)?;
        Ok(Json(ValidateResponse { valid: validation.valid, error: validation.error }))
    }

    /// Reformat diagram source through the external `d2 fmt` executable
    /// (override the path with the `D2_BIN` environment variable).
    #[tool(name = "format")]
    async fn format(
        &self,
        params: Parameters<FormatParams>,
    ) -> Result<Json<FormatResponse>, ErrorData> {
        let source = params.0.source;
        require_source(&source)?;

        let result = self
            .formatter
            .format(&source)
            .await
            .map_err(|err| ErrorData::internal_error(err.to_string(), None))?;

        if !result.success() {
            return Err(ErrorData::invalid_params(
                format!("d2 fmt failed (exit {}): {}", result.exit_code, result.failure_message()),
                Some(serde_json::json!({ "exit_code": result.exit_code })),
            ));
        }

        Ok(Json(FormatResponse { formatted: result.stdout }))
    }

    /// List the available light and dark themes with their ids.
    #[tool(name = "list-themes")]
    async fn list_themes(
        &self,
        _params: Parameters<ListThemesParams>,
    ) -> Result<Json<ListThemesResponse>, ErrorData> {
        Ok(Json(ListThemesResponse {
            light: LIGHT_THEMES
                .iter()
                .map(|theme| ThemeEntry { id: theme.id, name: theme.name.to_owned() })
                .collect(),
            dark: DARK_THEMES
                .iter()
                .map(|theme| ThemeEntry { id: theme.id, name: theme.name.to_owned() })
                .collect(),
        }))
    }

    /// List the available layout engines and their characteristics.
    #[tool(name = "list-layouts")]
    async fn list_layouts(
        &self,
        _params: Parameters<ListLayoutsParams>,
    ) -> Result<Json<ListLayoutsResponse>, ErrorData> {
        Ok(Json(ListLayoutsResponse {
            layouts: LAYOUTS
                .iter()
                .map(|info| LayoutEntry {
                    name: info.name.to_owned(),
                    description: info.description.to_owned(),
                    features: info.features.iter().map(|f| (*f).to_owned()).collect(),
                })
                .collect(),
        }))
    }
}

impl Default for ProteusMcp {
    fn default() -> Self {
        Self::new()
    }
}

fn require_source(source: &str) -> Result<(), ErrorData> {
    if source.trim().is_empty() {
        return Err(ErrorData::invalid_params("source must be a non-empty string", None));
    }
    Ok(())
}

fn runtime_error_data(err: RuntimeError) -> ErrorData {
    match &err {
        RuntimeError::Compile { .. } | RuntimeError::Render { .. } => {
            ErrorData::invalid_params(err.to_string(), None)
        }
        RuntimeError::Timeout(_) | RuntimeError::Canceled { .. } => {
            ErrorData::internal_error(err.to_string(), None)
        }
    }
}

#[tool_handler]
impl ServerHandler for ProteusMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Proteus diagram server (tools: render, validate, format, list-themes, list-layouts). Compiles D2-flavored diagram source to SVG or ASCII; `format` requires the external d2 executable."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests;
