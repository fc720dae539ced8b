// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout engines.
//!
//! Layout assigns each node a layer and a position within that layer; pixel
//! and cell geometry is derived from placements by the renderers. Two engines
//! are supported: `dagre` ranks top-down, `elk` ranks left-to-right with wider
//! orthogonal spacing. Elk is the slower path under heavy graphs, which is why
//! guarded render calls suggest dagre on timeout.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Graph;

/// The closed set of supported layout engines. Anything else is rejected at
/// deserialization time, before it can reach the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    #[default]
    Dagre,
    Elk,
}

impl LayoutEngine {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dagre => "dagre",
            Self::Elk => "elk",
        }
    }

    pub const ALL: [LayoutEngine; 2] = [Self::Dagre, Self::Elk];
}

/// Catalog entry for the `list-layouts` tool.
pub struct LayoutInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

/// Static layout catalog. Process-lifetime, read-only.
pub const LAYOUTS: &[LayoutInfo] = &[
    LayoutInfo {
        name: "dagre",
        description: "Layered top-down layout; the fast default.",
        features: &["directed", "fast", "default"],
    },
    LayoutInfo {
        name: "elk",
        description: "Orthogonal left-to-right layout; tidier edges, slower on large graphs.",
        features: &["directed", "orthogonal", "slow-on-large-graphs"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphLayout {
    engine: LayoutEngine,
    layers: Vec<Vec<String>>,
    placements: BTreeMap<String, Placement>,
}

impl GraphLayout {
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    pub fn placement(&self, node_id: &str) -> Option<&Placement> {
        self.placements.get(node_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    layer: usize,
    index_in_layer: usize,
}

impl Placement {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index_in_layer(&self) -> usize {
        self.index_in_layer
    }
}

/// Computes placements for every node in `graph`.
///
/// Ranking is longest-path over connection flow. Cycles are permitted: rank
/// relaxation runs at most `|nodes|` passes, so a back edge settles instead of
/// looping, and every node keeps a deterministic placement (BTreeMap order
/// within a layer).
pub fn layout_graph(graph: &Graph, engine: LayoutEngine) -> GraphLayout {
    let mut ranks: BTreeMap<&str, usize> =
        graph.nodes().keys().map(|id| (id.as_str(), 0)).collect();

    for _ in 0..graph.nodes().len() {
        let mut changed = false;
        for edge in graph.edges() {
            let (from, to) = edge.flow();
            let Some(from_rank) = ranks.get(from).copied() else { continue };
            let Some(to_rank) = ranks.get(to).copied() else { continue };
            if to_rank < from_rank + 1 {
                ranks.insert(to, from_rank + 1);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let layer_count = ranks.values().max().map(|max| max + 1).unwrap_or(0);
    let mut layers = vec![Vec::new(); layer_count];
    let mut placements = BTreeMap::new();

    for (id, rank) in &ranks {
        let index_in_layer = layers[*rank].len();
        layers[*rank].push((*id).to_owned());
        placements
            .insert((*id).to_owned(), Placement { layer: *rank, index_in_layer });
    }

    GraphLayout { engine, layers, placements }
}
