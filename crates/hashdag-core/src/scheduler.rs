//! # Level Scheduler
//!
//! Drives hashing one topological wave at a time (Kahn's algorithm).
//!
//! Every node moves through three states and never goes back:
//!
//! ```text
//! Pending (>= 1 unhashed parent) -> Ready (counter hits 0) -> Hashed
//! ```
//!
//! A wave ("frontier") holds exactly the Ready nodes. For each of them the
//! parent hashes are read from the [`MemoTable`], sorted, and fed to the
//! engine together with the payload hash. The result is memoized, handed to
//! the [`GraphAssembler`], and each child's pending counter is decremented;
//! children reaching zero form the next frontier.
//!
//! Nodes that sit on a cycle, or below an edge from an undeclared node, never
//! reach zero and are never hashed. The scheduler only reports them; the
//! caller decides whether that is an error.
//!
//! ## Parallel Mode
//!
//! Nodes within one frontier are independent, so they can be hashed on the
//! rayon pool against a read-only memo table. Results are merged and counters
//! decremented sequentially at the frontier boundary, which keeps every
//! child from being scheduled twice and keeps output identical to
//! sequential mode.

use crate::assembler::GraphAssembler;
use crate::config::Configuration;
use crate::engine::HashEngine;
use crate::indexer::GraphIndex;
use crate::memo::MemoTable;
use crate::{Hash, HashDagError, Node, NodeId};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Summary of a scheduler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerOutcome {
    /// Number of non-empty frontiers processed.
    pub waves: usize,
    /// Number of nodes hashed.
    pub hashed: usize,
    /// Declared nodes that never became ready, ordered by id.
    pub unresolved: Vec<NodeId>,
}

/// A node hashed within the current frontier, not yet committed.
struct Resolved<'g> {
    node: &'g Node,
    hash: Hash,
    parent_hashes: Vec<Hash>,
}

/// Wave-by-wave driver for one conversion.
pub struct LevelScheduler<'g, 'c> {
    index: GraphIndex<'g>,
    engine: &'c dyn HashEngine,
    parallel: bool,
    pending: BTreeMap<&'g NodeId, usize>,
    memo: MemoTable<'g>,
}

impl<'g, 'c> LevelScheduler<'g, 'c> {
    /// Prepare a run over `index` using the engine and mode from `config`.
    pub fn new(index: GraphIndex<'g>, config: &'c Configuration) -> Self {
        let pending = index.pending_counts();
        Self {
            index,
            engine: config.engine.as_ref(),
            parallel: config.parallel,
            pending,
            memo: MemoTable::new(),
        }
    }

    /// Hash every reachable node, emitting into `assembler`.
    pub fn run(
        mut self,
        assembler: &mut GraphAssembler,
    ) -> Result<SchedulerOutcome, HashDagError> {
        let mut frontier: Vec<&'g Node> = self.index.roots().to_vec();
        let mut waves = 0usize;

        while !frontier.is_empty() {
            waves = waves.saturating_add(1);

            let resolved = if self.parallel {
                frontier
                    .par_iter()
                    .map(|&node| self.resolve(node))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                frontier
                    .iter()
                    .map(|&node| self.resolve(node))
                    .collect::<Result<Vec<_>, _>>()?
            };

            frontier = self.commit(resolved, assembler);
        }

        let unresolved = self
            .index
            .nodes()
            .filter(|node| !self.memo.contains(&node.id))
            .map(|node| node.id.clone())
            .collect();

        Ok(SchedulerOutcome {
            waves,
            hashed: self.memo.len(),
            unresolved,
        })
    }

    /// Compute the content address of a ready node.
    fn resolve(&self, node: &'g Node) -> Result<Resolved<'g>, HashDagError> {
        let parent_hashes = self.memo.parent_hashes(self.index.parents(&node.id))?;
        let own = self.engine.hash(&node.data);
        let hash = self.engine.combine(&own, &parent_hashes);

        Ok(Resolved {
            node,
            hash,
            parent_hashes,
        })
    }

    /// Record a frontier's results and collect the next frontier.
    fn commit(
        &mut self,
        resolved: Vec<Resolved<'g>>,
        assembler: &mut GraphAssembler,
    ) -> Vec<&'g Node> {
        let mut next = Vec::new();

        for Resolved {
            node,
            hash,
            parent_hashes,
        } in resolved
        {
            assembler.add_node(hash.clone(), &node.data);
            for parent in parent_hashes {
                assembler.add_edge(parent, hash.clone());
            }
            self.memo.record(&node.id, hash);

            for child in self.index.children(&node.id) {
                let Some(count) = self.pending.get_mut(*child) else {
                    continue;
                };
                if *count == 0 {
                    continue;
                }
                *count -= 1;
                if *count == 0 {
                    // Undeclared targets reach zero too but have nothing to hash
                    if let Some(ready) = self.index.node(child) {
                        next.push(ready);
                    }
                }
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{with_naive_hasher, with_parallel};
    use crate::indexer::walk;
    use crate::{Edge, Graph};

    fn run(graph: &Graph, parallel: bool) -> (SchedulerOutcome, crate::HashGraph) {
        let config = Configuration::from_options([with_naive_hasher(), with_parallel(parallel)]);
        let mut assembler = GraphAssembler::new();
        let outcome = LevelScheduler::new(walk(graph), &config)
            .run(&mut assembler)
            .expect("run");
        (outcome, assembler.finish())
    }

    fn chain(len: usize) -> Graph {
        let nodes = (0..len).map(|i| Node::new(format!("{i}"), "x")).collect();
        let edges = (1..len)
            .map(|i| Edge::new(format!("{}", i - 1), format!("{i}")))
            .collect();
        Graph { nodes, edges }
    }

    #[test]
    fn chain_takes_one_wave_per_node() {
        let (outcome, graph) = run(&chain(4), false);
        assert_eq!(outcome.waves, 4);
        assert_eq!(outcome.hashed, 4);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(graph.nodes.len(), 4);
    }

    #[test]
    fn diamond_takes_three_waves() {
        let graph = Graph {
            nodes: vec![
                Node::new("a", "a"),
                Node::new("b", "b"),
                Node::new("c", "c"),
                Node::new("d", "d"),
            ],
            edges: vec![
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("c", "d"),
            ],
        };
        let (outcome, out) = run(&graph, false);
        assert_eq!(outcome.waves, 3);
        assert!(out.node(&Hash::new("d-(b-(a),c-(a))")).is_some());
    }

    #[test]
    fn cycle_members_stay_unresolved() {
        let graph = Graph {
            nodes: vec![Node::new("r", "r"), Node::new("x", "x"), Node::new("y", "y")],
            edges: vec![Edge::new("r", "x"), Edge::new("x", "y"), Edge::new("y", "x")],
        };
        let (outcome, out) = run(&graph, false);
        assert_eq!(outcome.hashed, 1);
        assert_eq!(outcome.unresolved, vec![NodeId::new("x"), NodeId::new("y")]);
        assert_eq!(out.nodes.len(), 1);
    }

    #[test]
    fn undeclared_parent_blocks_its_child() {
        let graph = Graph {
            nodes: vec![Node::new("a", "a"), Node::new("b", "b")],
            edges: vec![Edge::new("ghost", "b")],
        };
        let (outcome, _) = run(&graph, false);
        assert_eq!(outcome.unresolved, vec![NodeId::new("b")]);
    }

    #[test]
    fn undeclared_child_is_skipped() {
        let graph = Graph {
            nodes: vec![Node::new("a", "a")],
            edges: vec![Edge::new("a", "ghost")],
        };
        let (outcome, out) = run(&graph, false);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(out.nodes.len(), 1);
        assert!(out.edges.is_empty());
    }

    #[test]
    fn parallel_matches_sequential() {
        let (seq_outcome, seq) = run(&chain(10), false);
        let (par_outcome, par) = run(&chain(10), true);
        assert_eq!(seq_outcome, par_outcome);
        assert_eq!(seq, par);
    }
}
