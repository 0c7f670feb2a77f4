//! # Random DAG Generator
//!
//! Produces synthetic input graphs for demos, tests and benchmarks.
//!
//! The random source is always passed in, so a seeded `StdRng` gives
//! reproducible graphs and concurrent callers never share state.
//!
//! Construction:
//! 1. `node_qty` nodes `n0..`, each carrying random payload bytes.
//! 2. A random spanning tree: every node after the first gets one parent
//!    chosen among earlier nodes with spare out-degree. The graph is
//!    therefore weakly connected.
//! 3. Every remaining forward pair `(i, j)` with `i < j` gets an edge with
//!    probability `edge_factor` while `i` has spare out-degree.
//!
//! Edges only ever point from a lower to a higher index, so the result is
//! acyclic.

use crate::primitives::GENERATED_PAYLOAD_LEN;
use crate::{Edge, Graph, HashDagError, Node, NodeData, NodeId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shape parameters for [`random_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of nodes, at least 1.
    pub node_qty: usize,
    /// Maximum edges leaving a single node, at least 1.
    pub max_outdegree: usize,
    /// Probability of each optional forward edge, in `[0, 1]`.
    pub edge_factor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_qty: 10,
            max_outdegree: 3,
            edge_factor: 0.5,
        }
    }
}

impl GeneratorConfig {
    /// Check that the parameters describe a graph that can be built.
    pub fn validate(&self) -> Result<(), HashDagError> {
        if self.node_qty == 0 {
            return Err(HashDagError::InvalidGenerator(
                "node_qty must be at least 1".to_string(),
            ));
        }
        if self.max_outdegree == 0 {
            return Err(HashDagError::InvalidGenerator(
                "max_outdegree must be at least 1".to_string(),
            ));
        }
        // Also rejects NaN
        if !(0.0..=1.0).contains(&self.edge_factor) {
            return Err(HashDagError::InvalidGenerator(format!(
                "edge_factor must be within [0, 1], got {}",
                self.edge_factor
            )));
        }
        Ok(())
    }
}

/// Generate a random, weakly connected DAG.
pub fn random_graph<R>(config: &GeneratorConfig, rng: &mut R) -> Result<Graph, HashDagError>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let qty = config.node_qty;
    let ids: Vec<NodeId> = (0..qty).map(|i| NodeId(format!("n{i}"))).collect();

    let nodes = ids
        .iter()
        .map(|id| {
            let mut buf = vec![0u8; GENERATED_PAYLOAD_LEN];
            rng.fill_bytes(&mut buf);
            Node {
                id: id.clone(),
                data: NodeData(buf),
            }
        })
        .collect();

    let mut outdegree = vec![0usize; qty];
    let mut links: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut order: Vec<(usize, usize)> = Vec::new();

    // Spanning tree. Before node j is linked, nodes 0..j have j * max_outdegree
    // slots and only j - 1 are used, so a candidate always exists.
    for j in 1..qty {
        let candidates: Vec<usize> = (0..j)
            .filter(|&i| outdegree[i] < config.max_outdegree)
            .collect();
        if let Some(&i) = candidates.choose(rng) {
            outdegree[i] += 1;
            links.insert((i, j));
            order.push((i, j));
        }
    }

    for i in 0..qty {
        for j in (i + 1)..qty {
            if outdegree[i] >= config.max_outdegree {
                break;
            }
            if links.contains(&(i, j)) {
                continue;
            }
            if rng.gen_bool(config.edge_factor) {
                outdegree[i] += 1;
                links.insert((i, j));
                order.push((i, j));
            }
        }
    }

    let edges = order
        .into_iter()
        .map(|(i, j)| Edge {
            source: ids[i].clone(),
            target: ids[j].clone(),
        })
        .collect();

    Ok(Graph { nodes, edges })
}
