// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! ASCII emitter.
//!
//! Plain-text boxes and connectors on a char canvas. No XML, no fonts, no
//! colors: the compact output mode for terminals and size-capped transports.
//! Connectors are drawn for adjacent-layer hops; longer and backward
//! connections keep their endpoints but no glyph path.

use std::collections::BTreeMap;
use std::fmt;

use crate::layout::{GraphLayout, LayoutEngine};
use crate::model::{Arrow, Graph};
use crate::render::{Canvas, CanvasError};

const BOX_H: usize = 3;
const MAX_LABEL: usize = 32;
const DAGRE_GAP_ROWS: usize = 2;
const DAGRE_GAP_COLS: usize = 4;
const ELK_GAP_ROWS: usize = 1;
const ELK_GAP_COLS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsciiRenderError {
    Canvas(CanvasError),
}

impl fmt::Display for AsciiRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for AsciiRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
        }
    }
}

impl From<CanvasError> for AsciiRenderError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas(err)
    }
}

#[derive(Debug, Clone, Copy)]
struct CellBox {
    x: usize,
    y: usize,
    w: usize,
}

impl CellBox {
    fn center_x(&self) -> usize {
        self.x + self.w / 2
    }

    fn center_y(&self) -> usize {
        self.y + BOX_H / 2
    }

    fn right(&self) -> usize {
        self.x + self.w - 1
    }

    fn bottom(&self) -> usize {
        self.y + BOX_H - 1
    }
}

/// Renders `graph` as plain-text art.
pub fn render_ascii(graph: &Graph, layout: &GraphLayout) -> Result<String, AsciiRenderError> {
    if graph.nodes().is_empty() {
        return Ok(String::new());
    }

    let boxes = place_boxes(graph, layout);
    let width = canvas_width(graph, layout, &boxes);
    let height = boxes.values().map(|b| b.y + BOX_H).max().unwrap_or(0);
    let mut canvas = Canvas::new(width, height)?;

    for edge in graph.edges() {
        let (from, to) = edge.flow();
        let (Some(from_box), Some(to_box)) = (boxes.get(from), boxes.get(to)) else {
            continue;
        };
        match layout.engine() {
            LayoutEngine::Dagre => {
                draw_vertical_connector(&mut canvas, edge.arrow(), edge.label(), from_box, to_box)?;
            }
            LayoutEngine::Elk => {
                draw_horizontal_connector(
                    &mut canvas,
                    edge.arrow(),
                    edge.label(),
                    from_box,
                    to_box,
                )?;
            }
        }
    }

    for (id, cell) in &boxes {
        let label = graph.nodes().get(id).map(|node| node.label()).unwrap_or(id);
        draw_box(&mut canvas, cell, label)?;
    }

    Ok(canvas.to_text())
}

fn place_boxes(graph: &Graph, layout: &GraphLayout) -> BTreeMap<String, CellBox> {
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
                        CellBox { x, y: layer_idx * (BOX_H + DAGRE_GAP_ROWS), w },
                    );
                    x += w + DAGRE_GAP_COLS;
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
                        CellBox { x, y: idx * (BOX_H + ELK_GAP_ROWS), w: box_width(node.label()) },
                    );
                }
                x += col_w + ELK_GAP_COLS;
            }
        }
    }

    boxes
}

/// Box extents plus room for connector labels, which sit to the right of the
/// path in vertical flow and would otherwise clip at the canvas edge.
fn canvas_width(graph: &Graph, layout: &GraphLayout, boxes: &BTreeMap<String, CellBox>) -> usize {
    let mut width = boxes.values().map(|b| b.x + b.w).max().unwrap_or(0);

    if layout.engine() == LayoutEngine::Dagre {
        for edge in graph.edges() {
            let Some(label) = edge.label() else { continue };
            let (from, to) = edge.flow();
            let (Some(from_box), Some(to_box)) = (boxes.get(from), boxes.get(to)) else {
                continue;
            };
            if to_box.y != from_box.bottom() + DAGRE_GAP_ROWS + 1 {
                continue;
            }
            let label_x = from_box.center_x().max(to_box.center_x()) + 2;
            width = width.max(label_x + clip_label(label, MAX_LABEL).chars().count());
        }
    }

    width
}

fn box_width(label: &str) -> usize {
    clip_label(label, MAX_LABEL).chars().count() + 4
}

/// Clips `label` to at most `max` chars, spending the last slot on `…` when
/// anything was cut.
fn clip_label(label: &str, max: usize) -> String {
    let mut chars = label.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_none() {
        return head;
    }
    if max == 0 {
        return String::new();
    }
    let mut clipped: String = head.chars().take(max - 1).collect();
    clipped.push('…');
    clipped
}

fn draw_box(canvas: &mut Canvas, cell: &CellBox, label: &str) -> Result<(), CanvasError> {
    canvas.draw_hline(cell.x, cell.right(), cell.y, '-')?;
    canvas.draw_hline(cell.x, cell.right(), cell.bottom(), '-')?;
    canvas.draw_vline(cell.x, cell.y, cell.bottom(), '|')?;
    canvas.draw_vline(cell.right(), cell.y, cell.bottom(), '|')?;
    for (x, y) in [
        (cell.x, cell.y),
        (cell.right(), cell.y),
        (cell.x, cell.bottom()),
        (cell.right(), cell.bottom()),
    ] {
        canvas.set(x, y, '+')?;
    }

    // Row of `|  label  |`: clear the interior first so connectors never
    // bleed through the box.
    for x in cell.x + 1..cell.right() {
        canvas.set(x, cell.center_y(), ' ')?;
    }
    canvas.write_str(cell.x + 2, cell.center_y(), &clip_label(label, MAX_LABEL))?;
    Ok(())
}

fn draw_vertical_connector(
    canvas: &mut Canvas,
    arrow: Arrow,
    label: Option<&str>,
    from_box: &CellBox,
    to_box: &CellBox,
) -> Result<(), CanvasError> {
    // Adjacent layers only: the gap between them is DAGRE_GAP_ROWS tall.
    if to_box.y != from_box.bottom() + DAGRE_GAP_ROWS + 1 {
        return Ok(());
    }

    let g1 = from_box.bottom() + 1;
    let g2 = g1 + 1;
    let from_x = from_box.center_x();
    let to_x = to_box.center_x();

    canvas.set(from_x, g1, if arrow == Arrow::Both { '^' } else { '|' })?;
    if from_x != to_x {
        canvas.draw_hline(from_x, to_x, g1, '-')?;
        canvas.set(from_x, g1, '+')?;
        canvas.set(to_x, g1, '+')?;
    }
    let entry = match arrow {
        Arrow::Undirected => '|',
        _ => 'v',
    };
    canvas.set(to_x, g2, entry)?;

    if let Some(label) = label {
        let label_x = from_x.max(to_x) + 2;
        if label_x < canvas.width() {
            canvas.write_str(label_x, g1, &clip_label(label, MAX_LABEL))?;
        }
    }

    Ok(())
}

fn draw_horizontal_connector(
    canvas: &mut Canvas,
    arrow: Arrow,
    label: Option<&str>,
    from_box: &CellBox,
    to_box: &CellBox,
) -> Result<(), CanvasError> {
    if to_box.x <= from_box.right() {
        return Ok(());
    }
    let gap_start = from_box.right() + 1;
    let gap_end = to_box.x - 1;
    if gap_end < gap_start {
        return Ok(());
    }

    let from_y = from_box.center_y();
    let to_y = to_box.center_y();

    if from_y == to_y {
        canvas.draw_hline(gap_start, gap_end, from_y, '-')?;
    } else {
        let mid = gap_start + (gap_end - gap_start) / 2;
        canvas.draw_hline(gap_start, mid, from_y, '-')?;
        canvas.draw_vline(mid, from_y, to_y, '|')?;
        canvas.set(mid, from_y, '+')?;
        canvas.set(mid, to_y, '+')?;
        canvas.draw_hline(mid, gap_end, to_y, '-')?;
    }

    if arrow != Arrow::Undirected {
        canvas.set(gap_end, to_y, '>')?;
    }
    if arrow == Arrow::Both {
        canvas.set(gap_start, from_y, '<')?;
    }

    if let Some(label) = label {
        if from_y > 0 {
            canvas.write_str(gap_start, from_y - 1, &clip_label(label, gap_end.saturating_sub(gap_start) + 1))?;
        }
    }

    Ok(())
}
