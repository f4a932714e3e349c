//! Boundary parsing for the collection layer
//!
//! The interactive collection layer hands over raw text: a comma-separated
//! node list, comma-separated `from-to-capacity` edge tokens, and two
//! endpoint labels. This module turns that text into the typed inputs of
//! [`FlowNetwork::build`](crate::network::FlowNetwork::build), rejecting
//! malformed tokens before any construction is attempted. Every error names
//! the token or field that failed; nothing is guessed or silently repaired.

use thiserror::Error;

use crate::network::EdgeSpec;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("node list is empty")]
    EmptyNodeList,

    #[error("empty node label at position {0} in node list")]
    EmptyNodeLabel(usize),

    #[error("edge token `{0}` must have the form `from-to-capacity`")]
    MalformedEdgeToken(String),

    #[error("edge token `{token}` has an empty `{field}` field")]
    EmptyEdgeField { token: String, field: &'static str },

    #[error("capacity `{found}` in edge token `{token}` is not a non-negative integer")]
    InvalidCapacity { token: String, found: String },
}

/// Parses a comma-separated node list into trimmed, non-empty labels.
///
/// Uniqueness is not enforced here; network construction is the validation
/// point for duplicates.
pub fn parse_node_list(input: &str) -> Result<Vec<String>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyNodeList);
    }
    input
        .split(',')
        .enumerate()
        .map(|(position, raw)| {
            let label = raw.trim();
            if label.is_empty() {
                Err(ParseError::EmptyNodeLabel(position))
            } else {
                Ok(label.to_owned())
            }
        })
        .collect()
}

/// Parses comma-separated `from-to-capacity` edge tokens.
///
/// Each token splits on `-` into exactly three fields; the capacity must
/// parse as a non-negative integer. An empty input is a valid empty edge
/// list (a network with no edges is legal).
pub fn parse_edge_list(input: &str) -> Result<Vec<EdgeSpec>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(parse_edge_token).collect()
}

fn parse_edge_token(raw: &str) -> Result<EdgeSpec, ParseError> {
    let token = raw.trim();
    let fields: Vec<&str> = token.split('-').collect();
    let &[from, to, capacity] = fields.as_slice() else {
        return Err(ParseError::MalformedEdgeToken(token.to_owned()));
    };

    let require = |value: &str, field: &'static str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(ParseError::EmptyEdgeField {
                token: token.to_owned(),
                field,
            })
        } else {
            Ok(trimmed.to_owned())
        }
    };
    let from = require(from, "from")?;
    let to = require(to, "to")?;
    let capacity_text = require(capacity, "capacity")?;

    let capacity = capacity_text
        .parse::<i64>()
        .ok()
        .filter(|&value| value >= 0)
        .ok_or_else(|| ParseError::InvalidCapacity {
            token: token.to_owned(),
            found: capacity_text.clone(),
        })?;

    Ok(EdgeSpec { from, to, capacity })
}
