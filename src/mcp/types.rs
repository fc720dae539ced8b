// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Params carry `deny_unknown_fields` so a typoed field fails validation
/// instead of being silently ignored.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RenderParams {
    /// Diagram source text.
    pub source: String,
    /// Layout engine: `dagre` (fast, default) or `elk`.
    pub layout: Option<crate::layout::LayoutEngine>,
    /// Theme id (see `list-themes`).
    pub theme: Option<i64>,
    /// Dark theme id applied via `prefers-color-scheme: dark`.
    pub dark_theme: Option<i64>,
    /// Hand-drawn stroke styling.
    pub sketch: Option<bool>,
    /// Outer padding in pixels.
    pub pad: Option<u32>,
    /// Center the diagram in the viewport.
    pub center: Option<bool>,
    /// Emit plain-text art instead of SVG.
    pub ascii_mode: Option<bool>,
    /// Strip embedded web fonts from SVG output.
    pub strip_fonts: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderResponse {
    pub output: String,
    /// `svg` or `ascii`.
    pub format: String,
    pub chars: usize,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ValidateParams {
    /// Diagram source text.
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormatParams {
    /// Diagram source text.
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormatResponse {
    pub formatted: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListThemesParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThemeEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListThemesResponse {
    pub light: Vec<ThemeEntry>,
    pub dark: Vec<ThemeEntry>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListLayoutsParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutEntry {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListLayoutsResponse {
    pub layouts: Vec<LayoutEntry>,
}
