// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph model for compiled diagrams.
//!
//! A [`Graph`] is the compiler's intermediate representation: a set of named
//! nodes plus the connections between them, in source order. It carries no
//! geometry; layout and rendering happen downstream.

use std::collections::BTreeMap;

/// Connection marker between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// `a -> b`
    Forward,
    /// `a <- b`
    Backward,
    /// `a <-> b`
    Both,
    /// `a -- b`
    Undirected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &BTreeMap<String, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Ensures a node exists for `id`, defaulting its label to the id itself.
    ///
    /// Connections may reference nodes that were never declared on their own
    /// line; those nodes spring into existence here.
    pub fn declare_node(&mut self, id: impl Into<String>) -> &mut Node {
        let id = id.into();
        self.nodes.entry(id.clone()).or_insert_with(|| Node::new(id))
    }

    pub fn set_node_label(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.declare_node(id).set_label(label);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.declare_node(edge.from().to_owned());
        self.declare_node(edge.to().to_owned());
        self.edges.push(edge);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    from: String,
    to: String,
    arrow: Arrow,
    label: Option<String>,
}

impl Edge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        arrow: Arrow,
        label: Option<String>,
    ) -> Self {
        Self { from: from.into(), to: to.into(), arrow, label }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn arrow(&self) -> Arrow {
        self.arrow
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Endpoints in flow order: the node the connection leaves, then the node
    /// it enters. `a <- b` flows b to a.
    pub fn flow(&self) -> (&str, &str) {
        match self.arrow {
            Arrow::Backward => (&self.to, &self.from),
            _ => (&self.from, &self.to),
        }
    }
}
