//! Circular dependency detection.
//!
//! # Algorithm
//!
//! 1. Build an adjacency list keyed by source id, in edge order. Duplicate
//!    edges are kept.
//! 2. Depth-first search from every adjacency key, in insertion order,
//!    tracking the current path.
//! 3. Reaching a node that is already on the current path closes a cycle:
//!    `path[first_index..] + [node]`. Sequences already recorded are skipped.
//! 4. One visited set is shared by all roots and only prunes re-exploration.
//!    The path check runs first, so a visited node still closes a cycle when
//!    it is on the current path.
//!
//! The search is iterative so deep dependency chains cannot overflow the stack.
//! Path membership is an index lookup, keeping the search linear in the size
//! of the graph.

use crate::domain::{AgentId, Dependency};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Maximum number of cycles reported.
pub const MAX_REPORTED_CYCLES: usize = 3;

/// A closed dependency chain; the first and last ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyCycle(pub Vec<AgentId>);

impl DependencyCycle {
    /// Ids in traversal order, closing id included.
    pub fn ids(&self) -> &[AgentId] {
        &self.0
    }

    /// Number of ids in the sequence, closing id included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence is empty (never true for detected cycles).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(AgentId::as_str)
            .collect::<Vec<_>>()
            .join(" → ");
        f.write_str(&joined)
    }
}

struct Frame<'a> {
    node: &'a str,
    next_successor: usize,
}

/// Detect up to [`MAX_REPORTED_CYCLES`] distinct cycles in discovery order.
pub fn detect_cycles(dependencies: &[Dependency]) -> Vec<DependencyCycle> {
    let mut adjacency: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for dep in dependencies {
        adjacency
            .entry(dep.from.as_str())
            .or_default()
            .push(dep.to.as_str());
    }

    let mut found: Vec<Vec<&str>> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut frames: Vec<Frame<'_>> = Vec::new();
    // Node on the current path -> its index in `frames`
    let mut on_path: HashMap<&str, usize> = HashMap::new();

    'roots: for &root in adjacency.keys() {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root, frames.len());
        frames.push(Frame {
            node: root,
            next_successor: 0,
        });

        while let Some(frame) = frames.last_mut() {
            let successors = adjacency.get(frame.node).map_or(&[][..], Vec::as_slice);
            let Some(&next) = successors.get(frame.next_successor) else {
                on_path.remove(frame.node);
                frames.pop();
                continue;
            };
            frame.next_successor += 1;

            if let Some(&start) = on_path.get(next) {
                let mut cycle: Vec<&str> = frames[start..].iter().map(|f| f.node).collect();
                cycle.push(next);
                if !found.contains(&cycle) {
                    tracing::trace!(cycle = %cycle.join(" → "), "Found dependency cycle");
                    found.push(cycle);
                    if found.len() >= MAX_REPORTED_CYCLES {
                        break 'roots;
                    }
                }
                continue;
            }

            if visited.insert(next) {
                on_path.insert(next, frames.len());
                frames.push(Frame {
                    node: next,
                    next_successor: 0,
                });
            }
        }
    }

    found
        .into_iter()
        .map(|ids| DependencyCycle(ids.into_iter().map(AgentId::from).collect()))
        .collect()
}
