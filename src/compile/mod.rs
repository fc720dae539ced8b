// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Source parsing for the D2-flavored connection language.
//!
//! Line-based grammar: `#` comments, node declarations (`id: Label`) and
//! connection chains (`a -> b -> c: label`) with the four connection markers
//! `->`, `<-`, `<->` and `--`. An empty or whitespace-only source compiles to
//! an empty graph; it is not an error.

use std::fmt;

use crate::model::{Arrow, Edge, Graph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyEndpoint { line_no: usize, line: String },
    InvalidIdent { line_no: usize, ident: String },
    EmptyLabel { line_no: usize, line: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEndpoint { line_no, line } => {
                write!(f, "missing connection endpoint on line {line_no}: {line}")
            }
            Self::InvalidIdent { line_no, ident } => write!(
                f,
                "invalid identifier on line {line_no}: {ident} (identifiers use letters, digits, spaces, '_', '-', '.')"
            ),
            Self::EmptyLabel { line_no, line } => {
                write!(f, "empty label on line {line_no}: {line}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses diagram source into a [`Graph`].
pub fn parse_source(source: &str) -> Result<Graph, ParseError> {
    let mut graph = Graph::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_statement(&mut graph, line_no, line)?;
    }

    Ok(graph)
}

fn parse_statement(graph: &mut Graph, line_no: usize, line: &str) -> Result<(), ParseError> {
    // The label (if any) follows the first `:` and runs to the end of line, so
    // connection markers are only meaningful in the head.
    let (head, label) = match line.split_once(':') {
        Some((head, label)) => {
            let label = label.trim();
            if label.is_empty() {
                return Err(ParseError::EmptyLabel { line_no, line: line.to_owned() });
            }
            (head.trim(), Some(label))
        }
        None => (line, None),
    };

    let (endpoints, arrows) = split_connections(head);

    if arrows.is_empty() {
        let id = validate_ident(line_no, endpoints[0])?;
        match label {
            Some(label) => graph.set_node_label(id, label),
            None => {
                graph.declare_node(id);
            }
        }
        return Ok(());
    }

    let mut ids = Vec::with_capacity(endpoints.len());
    for endpoint in &endpoints {
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyEndpoint { line_no, line: line.to_owned() });
        }
        ids.push(validate_ident(line_no, trimmed)?);
    }

    // A chain label applies to every hop, matching how a chained connection
    // reads as one statement.
    for (hop, arrow) in arrows.iter().enumerate() {
        graph.add_edge(Edge::new(
            ids[hop].clone(),
            ids[hop + 1].clone(),
            *arrow,
            label.map(str::to_owned),
        ));
    }

    Ok(())
}

/// Splits a statement head into endpoints and the connection markers between
/// them. Returns one endpoint and no markers when the head holds none.
fn split_connections(head: &str) -> (Vec<&str>, Vec<Arrow>) {
    let mut endpoints = Vec::new();
    let mut arrows = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < head.len() {
        let rest = &head[i..];
        let matched = if rest.starts_with("<->") {
            Some((Arrow::Both, 3))
        } else if rest.starts_with("<-") {
            Some((Arrow::Backward, 2))
        } else if rest.starts_with("->") {
            Some((Arrow::Forward, 2))
        } else if rest.starts_with("--") {
            Some((Arrow::Undirected, 2))
        } else {
            None
        };

        match matched {
            Some((arrow, len)) => {
                endpoints.push(&head[start..i]);
                arrows.push(arrow);
                i += len;
                start = i;
            }
            None => {
                // Markers are ASCII; skip whole chars to stay on boundaries.
                i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
            }
        }
    }

    endpoints.push(&head[start..]);
    (endpoints, arrows)
}

fn validate_ident(line_no: usize, ident: &str) -> Result<String, ParseError> {
    let trimmed = ident.trim();
    let well_formed = !trimmed.is_empty()
        && trimmed.chars().any(|ch| ch.is_alphanumeric())
        && trimmed
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, ' ' | '_' | '-' | '.'));

    if !well_formed {
        return Err(ParseError::InvalidIdent { line_no, ident: trimmed.to_owned() });
    }

    Ok(trimmed.to_owned())
}
