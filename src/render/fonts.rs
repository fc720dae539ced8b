// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Embedded web fonts for SVG output, and the `strip_embedded_fonts`
//! post-processor that removes them again.
//!
//! The font payloads below are subsetted woff data; they make SVG output
//! self-contained but account for most of its size, which is why callers can
//! opt out via `strip_fonts`.

use std::sync::OnceLock;

use regex::Regex;

const FONT_FAMILY: &str = "SourceSansPro";

const FONT_REGULAR_WOFF_B64: &str = "d09GRgABAAAAAB4UABEAAAAAOPgAAQAAAAAAAAAAAAAAAAAAAAAAAAAAAABHREVGAAAB\
nAAAACwAAAAwAikB8UdQT1MAAAHIAAAFoAAADW5d2VXmR1NVQgAAB2gAAACgAAABNpcfDhtPUy8yAAAICAAAAFYAAABgaBqYak\
NGRiAAAAhgAAAN5QAAEZKZC4fUY21hcAAAFkgAAACcAAABcgWWBpxnYXNwAAAW5AAAAAgAAAAIAAAAEGhlYWQAABbsAAAANg";

const FONT_BOLD_WOFF_B64: &str = "d09GRgABAAAAABuoABEAAAAAMkQAAQAAAAAAAAAAAAAAAAAAAAAAAAAAAABHREVGAAAB\
nAAAACwAAAAwAhkB2UdQT1MAAAHIAAAFGgAAC5BU+2vYR1NVQgAABuQAAACgAAABNpcfDhtPUy8yAAAHhAAAAFYAAABgaEeYhE\
NGRiAAAAfcAAALoAAADrK4N9VLY21hcAAAE3wAAACcAAABcgWWBpxnYXNwAAAUGAAAAAgAAAAIAAAAEGhlYWQAABQgAAAANg";

/// CSS `@font-face` declarations embedded into every SVG `<style>` block.
pub(crate) fn font_face_css() -> String {
    format!(
        "@font-face {{\n\
         \tfont-family: \"{FONT_FAMILY}\";\n\
         \tfont-weight: 400;\n\
         \tsrc: url(\"data:application/font-woff;base64,{FONT_REGULAR_WOFF_B64}\") format(\"woff\");\n\
         }}\n\
         \n\
         @font-face {{\n\
         \tfont-family: \"{FONT_FAMILY}\";\n\
         \tfont-weight: 700;\n\
         \tsrc: url(\"data:application/font-woff;base64,{FONT_BOLD_WOFF_B64}\") format(\"woff\");\n\
         }}\n"
    )
}

pub(crate) fn font_family() -> &'static str {
    FONT_FAMILY
}

fn font_face_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // @font-face blocks are flat: brace-delimited with no nested braces.
    PATTERN.get_or_init(|| Regex::new(r"@font-face\s*\{[^{}]*\}").expect("valid pattern"))
}

fn blank_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("valid pattern"))
}

/// Removes every embedded `@font-face` block from `text`, then collapses runs
/// of three or more newlines down to exactly two.
///
/// Idempotent: a second pass finds no blocks and the newline collapse is a
/// fixed point. Purely textual; no diagram semantics are inspected.
pub fn strip_embedded_fonts(text: &str) -> String {
    let stripped = font_face_pattern().replace_all(text, "");
    blank_run_pattern().replace_all(&stripped, "\n\n").into_owned()
}
