// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! SVG emitter.
//!
//! Output is a single self-contained document: XML declaration, a `<style>`
//! block carrying the embedded fonts and theme palette (plus an optional
//! `prefers-color-scheme: dark` override), then node boxes and connections.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use crate::layout::{GraphLayout, LayoutEngine};
use crate::model::{Arrow, Graph};
use crate::render::fonts::font_family;
use crate::render::RenderOptions;
use crate::theme::{dark_theme_by_id, theme_by_id, Palette};

const CHAR_W: i64 = 9;
const NODE_H: i64 = 42;
const NODE_PAD_X: i64 = 16;
const SIBLING_GAP: i64 = 56;
const LAYER_GAP: i64 = 64;
const ELK_SIBLING_GAP: i64 = 32;
const ELK_LAYER_GAP: i64 = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgRenderError {
    UnknownTheme { theme_id: i64 },
    UnknownDarkTheme { theme_id: i64 },
}

impl fmt::Display for SvgRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTheme { theme_id } => write!(f, "unknown theme id: {theme_id}"),
            Self::UnknownDarkTheme { theme_id } => {
                write!(f, "unknown dark theme id: {theme_id} (dark themes are 200 and 201)")
            }
        }
    }
}

impl std::error::Error for SvgRenderError {}

#[derive(Debug, Clone)]
struct NodeBox {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    label: String,
}

impl NodeBox {
    fn center(&self) -> (i64, i64) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Renders `graph` as themed SVG markup.
pub fn render_svg(
    graph: &Graph,
    layout: &GraphLayout,
    options: &RenderOptions,
    font_css: &str,
) -> Result<String, SvgRenderError> {
    let theme = theme_by_id(options.theme_id)
        .ok_or(SvgRenderError::UnknownTheme { theme_id: options.theme_id })?;
    let dark = match options.dark_theme_id {
        Some(id) => Some(
            dark_theme_by_id(id).ok_or(SvgRenderError::UnknownDarkTheme { theme_id: id })?,
        ),
        None => None,
    };

    let boxes = place_boxes(graph, layout);
    let content_w = boxes.values().map(|b| b.x + b.w).max().unwrap_or(0);
    let content_h = boxes.values().map(|b| b.y + b.h).max().unwrap_or(0);
    let pad = i64::from(options.pad);
    let width = content_w + 2 * pad;
    let height = content_h + 2 * pad;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\""
    );
    if options.center {
        out.push_str(" preserveAspectRatio=\"xMidYMid meet\"");
    }
    if options.sketch {
        out.push_str(" class=\"sketch\"");
    }
    out.push_str(">\n");

    push_style(&mut out, font_css, &theme.palette, dark.map(|d| &d.palette));
    push_defs(&mut out, &theme.palette);

    let _ = writeln!(out, "<rect class=\"background\" width=\"{width}\" height=\"{height}\"/>");
    let _ = writeln!(out, "<g transform=\"translate({pad},{pad})\">");

    for edge in graph.edges() {
        let (from, to) = edge.flow();
        let (Some(from_box), Some(to_box)) = (boxes.get(from), boxes.get(to)) else {
            continue;
        };
        push_edge(&mut out, layout.engine(), edge.arrow(), edge.label(), from_box, to_box);
    }

    for node_box in boxes.values() {
        let _ = writeln!(
            out,
            "<g class=\"node\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"6\"/><text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text></g>",
            node_box.x,
            node_box.y,
            node_box.w,
            node_box.h,
            node_box.center().0,
            node_box.center().1,
            escape_xml(&node_box.label),
        );
    }

    out.push_str("</g>\n</svg>\n");
    Ok(out)
}

fn place_boxes(graph: &Graph, layout: &GraphLayout) -> BTreeMap<String, NodeBox> {
    let mut boxes = BTreeMap::new();

    match layout.engine() {
        LayoutEngine::Dagre => {
            for (layer_idx, layer) in layout.layers().iter().enumerate() {
                let mut x = 0;
                for id in layer {
                    let Some(node) = graph.nodes().get(id) else { continue };
                    let w = box_width(node.label());
                    boxes.insert(
                        id.clone(),
                        NodeBox {
                            x,
                            y: layer_idx as i64 * (NODE_H + LAYER_GAP),
                            w,
                            h: NODE_H,
                            label: node.label().to_owned(),
                        },
                    );
                    x += w + SIBLING_GAP;
                }
            }
        }
        LayoutEngine::Elk => {
            let mut x = 0;
            for layer in layout.layers() {
                let col_w = layer
                    .iter()
                    .filter_map(|id| graph.nodes().get(id))
                    .map(|node| box_width(node.label()))
                    .max()
                    .unwrap_or(0);
                for (idx, id) in layer.iter().enumerate() {
                    let Some(node) = graph.nodes().get(id) else { continue };
                    boxes.insert(
                        id.clone(),
                        NodeBox {
                            x,
                            y: idx as i64 * (NODE_H + ELK_SIBLING_GAP),
                            w: box_width(node.label()),
                            h: NODE_H,
                            label: node.label().to_owned(),
                        },
                    );
                }
                x += col_w + ELK_LAYER_GAP;
            }
        }
    }

    boxes
}

fn box_width(label: &str) -> i64 {
    label.chars().count() as i64 * CHAR_W + 2 * NODE_PAD_X
}

fn push_style(out: &mut String, font_css: &str, palette: &Palette, dark: Option<&Palette>) {
    out.push_str("<style>\n");
    out.push_str(font_css);
    let _ = write!(
        out,
        "\n.background {{ fill: {bg}; }}\n\
         .node rect {{ fill: {fill}; stroke: {stroke}; stroke-width: 2; }}\n\
         .node text {{ font-family: \"{family}\"; font-size: 14px; fill: {text}; }}\n\
         .edge {{ stroke: {stroke}; stroke-width: 2; fill: none; }}\n\
         .edge-label {{ font-family: \"{family}\"; font-size: 12px; fill: {text}; }}\n",
        bg = palette.background,
        fill = palette.fill,
        stroke = palette.stroke,
        text = palette.text,
        family = font_family(),
    );
    out.push_str(
        ".sketch .node rect { stroke-dasharray: 6 4; stroke-linecap: round; }\n\
         .sketch .edge { stroke-dasharray: 6 4; stroke-linecap: round; }\n",
    );
    if let Some(dark) = dark {
        let _ = write!(
            out,
            "@media (prefers-color-scheme: dark) {{\n\
             .background {{ fill: {bg}; }}\n\
             .node rect {{ fill: {fill}; stroke: {stroke}; }}\n\
             .node text {{ fill: {text}; }}\n\
             .edge {{ stroke: {stroke}; }}\n\
             .edge-label {{ fill: {text}; }}\n\
             }}\n",
            bg = dark.background,
            fill = dark.fill,
            stroke = dark.stroke,
            text = dark.text,
        );
    }
    out.push_str("</style>\n");
}

fn push_defs(out: &mut String, palette: &Palette) {
    let _ = writeln!(
        out,
        "<defs>\
         <marker id=\"arrow-end\" markerWidth=\"10\" markerHeight=\"8\" refX=\"9\" refY=\"4\" orient=\"auto\">\
         <path d=\"M0,0 L10,4 L0,8 z\" fill=\"{stroke}\"/>\
         </marker>\
         <marker id=\"arrow-start\" markerWidth=\"10\" markerHeight=\"8\" refX=\"1\" refY=\"4\" orient=\"auto\">\
         <path d=\"M10,0 L0,4 L10,8 z\" fill=\"{stroke}\"/>\
         </marker>\
         </defs>",
        stroke = palette.stroke,
    );
}

fn push_edge(
    out: &mut String,
    engine: LayoutEngine,
    arrow: Arrow,
    label: Option<&str>,
    from_box: &NodeBox,
    to_box: &NodeBox,
) {
    // Leave from the flow side of the source box, enter the flow side of the
    // target box; degenerate cases (same layer, back edges) fall back to
    // center-to-center.
    let ((x1, y1), (x2, y2)) = match engine {
        LayoutEngine::Dagre if from_box.y < to_box.y => (
            (from_box.center().0, from_box.y + from_box.h),
            (to_box.center().0, to_box.y),
        ),
        LayoutEngine::Elk if from_box.x < to_box.x => (
            (from_box.x + from_box.w, from_box.center().1),
            (to_box.x, to_box.center().1),
        ),
        _ => (from_box.center(), to_box.center()),
    };

    let markers = match arrow {
        Arrow::Undirected => String::new(),
        Arrow::Both => {
            " marker-start=\"url(#arrow-start)\" marker-end=\"url(#arrow-end)\"".to_owned()
        }
        // Backward edges were normalized by flow(); a single end marker
        // covers both directed kinds.
        Arrow::Forward | Arrow::Backward => " marker-end=\"url(#arrow-end)\"".to_owned(),
    };

    let _ = writeln!(
        out,
        "<path class=\"edge\" d=\"M{x1},{y1} L{x2},{y2}\"{markers}/>"
    );

    if let Some(label) = label {
        let _ = writeln!(
            out,
            "<text class=\"edge-label\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>",
            (x1 + x2) / 2,
            (y1 + y2) / 2 - 4,
            escape_xml(label),
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, render_svg, SvgRenderError};
    use crate::compile::parse_source;
    use crate::layout::{layout_graph, LayoutEngine};
    use crate::render::fonts::font_face_css;
    use crate::render::RenderOptions;

    fn render(source: &str, options: &RenderOptions) -> Result<String, SvgRenderError> {
        let graph = parse_source(source).expect("parse");
        let layout = layout_graph(&graph, options.layout);
        render_svg(&graph, &layout, options, &font_face_css())
    }

    #[test]
    fn output_starts_with_xml_declaration() {
        let svg = render("a -> b: connects", &RenderOptions::default()).expect("render");
        assert!(svg.starts_with("<?xml version=\"1.0\""), "got {}", &svg[..60]);
        assert!(svg.contains("@font-face"));
        assert!(svg.contains("connects"));
    }

    #[test]
    fn style_rules_name_the_embedded_font_family() {
        let svg = render("a -> b", &RenderOptions::default()).expect("render");
        assert!(svg.contains(".node text { font-family: \"SourceSansPro\""), "got {svg}");
        assert!(svg.contains(".edge-label { font-family: \"SourceSansPro\""), "got {svg}");
    }

    #[test]
    fn empty_graph_still_renders_a_document() {
        let svg = render("", &RenderOptions::default()).expect("render");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg "));
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let options = RenderOptions { theme_id: 999, ..RenderOptions::default() };
        let err = render("a -> b", &options).unwrap_err();
        assert_eq!(err, SvgRenderError::UnknownTheme { theme_id: 999 });
    }

    #[test]
    fn light_theme_id_is_not_a_dark_theme() {
        let options = RenderOptions { dark_theme_id: Some(3), ..RenderOptions::default() };
        let err = render("a -> b", &options).unwrap_err();
        assert_eq!(err, SvgRenderError::UnknownDarkTheme { theme_id: 3 });
    }

    #[test]
    fn dark_theme_adds_color_scheme_block() {
        let options = RenderOptions { dark_theme_id: Some(200), ..RenderOptions::default() };
        let svg = render("a -> b", &options).expect("render");
        assert!(svg.contains("prefers-color-scheme: dark"));
    }

    #[test]
    fn sketch_mode_tags_the_root_element() {
        let options = RenderOptions { sketch: true, ..RenderOptions::default() };
        let svg = render("a -> b", &options).expect("render");
        assert!(svg.contains("class=\"sketch\""));
    }

    #[test]
    fn center_sets_preserve_aspect_ratio() {
        let options = RenderOptions { center: true, ..RenderOptions::default() };
        let svg = render("a -> b", &options).expect("render");
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
    }

    #[test]
    fn pad_grows_the_viewport() {
        let small = render("a", &RenderOptions { pad: 0, ..RenderOptions::default() })
            .expect("render");
        let large = render("a", &RenderOptions { pad: 100, ..RenderOptions::default() })
            .expect("render");
        assert!(small.contains("translate(0,0)"));
        assert!(large.contains("translate(100,100)"));
    }

    #[test]
    fn elk_layout_places_layers_left_to_right() {
        let options = RenderOptions { layout: LayoutEngine::Elk, ..RenderOptions::default() };
        let svg = render("a -> b", &options).expect("render");
        // Horizontal flow means both boxes sit at y=0.
        assert!(svg.contains("y=\"0\""));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let svg = render("a -> b: x & y", &RenderOptions::default()).expect("render");
        assert!(svg.contains("x &amp; y"));
        assert_eq!(escape_xml("<a>\"&\""), "&lt;a&gt;&quot;&amp;&quot;");
    }

    #[test]
    fn undirected_edges_carry_no_markers() {
        let svg = render("a -- b", &RenderOptions::default()).expect("render");
        assert!(!svg.contains("marker-end"));
    }
}
