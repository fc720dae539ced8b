// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Theme catalogs.
//!
//! Themes are named palettes keyed by small integer ids, following the D2
//! numbering convention: ids 0-105 and the 300-range terminal themes are
//! light, 200/201 are dark. The catalogs are process-lifetime constants;
//! nothing mutates them at runtime.

pub const DEFAULT_THEME_ID: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeInfo {
    pub id: i64,
    pub name: &'static str,
    pub palette: Palette,
}

/// Static light theme catalog.
pub const LIGHT_THEMES: &[ThemeInfo] = &[
    ThemeInfo {
        id: 0,
        name: "Neutral default",
        palette: Palette { background: "#ffffff", fill: "#f5f6f9", stroke: "#0d32b2", text: "#0a0f25" },
    },
    ThemeInfo {
        id: 1,
        name: "Neutral grey",
        palette: Palette { background: "#ffffff", fill: "#f2f2f2", stroke: "#3e4047", text: "#16171d" },
    },
    ThemeInfo {
        id: 3,
        name: "Flagship",
        palette: Palette { background: "#ffffff", fill: "#eef1fd", stroke: "#4a6ff3", text: "#10163a" },
    },
    ThemeInfo {
        id: 4,
        name: "Cool classics",
        palette: Palette { background: "#ffffff", fill: "#e8f0fb", stroke: "#2b6cb0", text: "#102a43" },
    },
    ThemeInfo {
        id: 5,
        name: "Mixed berry blue",
        palette: Palette { background: "#ffffff", fill: "#ebf3ff", stroke: "#4361ee", text: "#1b1f3b" },
    },
    ThemeInfo {
        id: 6,
        name: "Grape soda",
        palette: Palette { background: "#ffffff", fill: "#f3ebfb", stroke: "#7048e8", text: "#2b1b4d" },
    },
    ThemeInfo {
        id: 7,
        name: "Aubergine",
        palette: Palette { background: "#fdfbff", fill: "#efe7f3", stroke: "#5f3765", text: "#2d1b31" },
    },
    ThemeInfo {
        id: 8,
        name: "Colorblind clear",
        palette: Palette { background: "#ffffff", fill: "#f0f4f8", stroke: "#0072b2", text: "#111111" },
    },
    ThemeInfo {
        id: 100,
        name: "Vanilla nitro cola",
        palette: Palette { background: "#fffdf7", fill: "#f9efd9", stroke: "#8c5a2b", text: "#3b2a17" },
    },
    ThemeInfo {
        id: 101,
        name: "Orange creamsicle",
        palette: Palette { background: "#fffdfa", fill: "#fff0e0", stroke: "#e8590c", text: "#462a16" },
    },
    ThemeInfo {
        id: 102,
        name: "Shirley temple",
        palette: Palette { background: "#fffafb", fill: "#ffe3e9", stroke: "#d6336c", text: "#4a1528" },
    },
    ThemeInfo {
        id: 103,
        name: "Earth tones",
        palette: Palette { background: "#fdfcf9", fill: "#ece3d5", stroke: "#5f5b45", text: "#2c2a1f" },
    },
    ThemeInfo {
        id: 104,
        name: "Everglade green",
        palette: Palette { background: "#fbfdfb", fill: "#e2efe5", stroke: "#2b8a3e", text: "#12311b" },
    },
    ThemeInfo {
        id: 105,
        name: "Buttered toast",
        palette: Palette { background: "#fffef8", fill: "#faf1cf", stroke: "#b08d1e", text: "#3d3411" },
    },
    ThemeInfo {
        id: 300,
        name: "Terminal",
        palette: Palette { background: "#ffffff", fill: "#e8f5e9", stroke: "#12640e", text: "#063a04" },
    },
    ThemeInfo {
        id: 301,
        name: "Terminal grayscale",
        palette: Palette { background: "#ffffff", fill: "#ededed", stroke: "#3c3c3c", text: "#141414" },
    },
];

/// Static dark theme catalog.
pub const DARK_THEMES: &[ThemeInfo] = &[
    ThemeInfo {
        id: 200,
        name: "Dark mauve",
        palette: Palette { background: "#16131f", fill: "#2b2440", stroke: "#8f7ee8", text: "#e6e1fa" },
    },
    ThemeInfo {
        id: 201,
        name: "Dark flagship",
        palette: Palette { background: "#0f1420", fill: "#1d2840", stroke: "#6b8afd", text: "#e3e9fb" },
    },
];

/// Looks a theme id up across both catalogs.
pub fn theme_by_id(id: i64) -> Option<&'static ThemeInfo> {
    LIGHT_THEMES
        .iter()
        .chain(DARK_THEMES.iter())
        .find(|theme| theme.id == id)
}

pub fn dark_theme_by_id(id: i64) -> Option<&'static ThemeInfo> {
    DARK_THEMES.iter().find(|theme| theme.id == id)
}
