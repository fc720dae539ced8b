// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — D2-flavored diagram compiler exposed over MCP.
//!
//! The [`mcp`] module is the public surface; everything below it (parsing,
//! layout, SVG/ASCII rendering, the timeout-guarded runtime, the external
//! formatter bridge) is reachable on its own for embedding.

pub mod compile;
pub mod formatter;
pub mod layout;
pub mod mcp;
pub mod model;
pub mod render;
pub mod runtime;
pub mod theme;
