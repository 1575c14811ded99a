use crate::graph::{GraphModel, NodeIndex};
use harborview_core::Diagnostic;
use std::collections::HashSet;

/// Logical forest view over the shared node arena.
///
/// Roots are the services that never appear as an edge target; children
/// are an adjacency list in edge-discovery order. A node reachable from
/// several parents appears in several child lists (diamond shapes), but
/// only once per parent even if the edge list carries duplicates, since
/// the containment relation is keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    pub roots: Vec<NodeIndex>,
    children: Vec<Vec<NodeIndex>>,
}

impl Forest {
    /// Identify roots, populate the child adjacency, and scan for
    /// dependency cycles. Cyclic branches stay in the adjacency but are
    /// reported so traversals know expansion was cut short.
    pub fn resolve(model: &GraphModel, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let node_count = model.node_count();
        let mut root_candidate = vec![true; node_count];
        let mut children: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];

        for edge in model.graph.edges() {
            root_candidate[edge.target_idx.0] = false;
            let list = &mut children[edge.source_idx.0];
            if !list.contains(&edge.target_idx) {
                list.push(edge.target_idx);
            }
        }

        let roots: Vec<NodeIndex> = model
            .graph
            .node_indices()
            .filter(|idx| root_candidate[idx.0])
            .collect();

        let forest = Self { roots, children };
        forest.scan_cycles(model, diagnostics);
        forest
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.children[idx.0]
    }

    pub fn is_root(&self, idx: NodeIndex) -> bool {
        self.roots.contains(&idx)
    }

    /// Depth-first scan that reports every distinct cycle once. Nodes not
    /// reachable from any root (every member of a closed cycle is an edge
    /// target, so such components have no root) are scanned from an
    /// arbitrary member so their cycles are reported too.
    fn scan_cycles(&self, model: &GraphModel, diagnostics: &mut Vec<Diagnostic>) {
        let node_count = model.node_count();
        let mut visited = vec![false; node_count];
        let mut on_path = vec![false; node_count];
        let mut trail = Vec::new();
        let mut seen_cycles = HashSet::new();

        for &root in &self.roots {
            self.visit(
                model,
                root,
                &mut visited,
                &mut on_path,
                &mut trail,
                &mut seen_cycles,
                diagnostics,
            );
        }

        for idx in model.graph.node_indices() {
            if !visited[idx.0] {
                self.visit(
                    model,
                    idx,
                    &mut visited,
                    &mut on_path,
                    &mut trail,
                    &mut seen_cycles,
                    diagnostics,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn visit(
        &self,
        model: &GraphModel,
        idx: NodeIndex,
        visited: &mut [bool],
        on_path: &mut [bool],
        trail: &mut Vec<NodeIndex>,
        seen_cycles: &mut HashSet<Vec<String>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if on_path[idx.0] {
            let start = trail
                .iter()
                .position(|&t| t == idx)
                .unwrap_or(trail.len().saturating_sub(1));
            let members: Vec<String> = trail[start..]
                .iter()
                .map(|&t| model.graph[t].name.clone())
                .collect();

            let mut key = members.clone();
            key.sort();
            if seen_cycles.insert(key) {
                tracing::warn!("Dependency cycle detected: {}", members.join(" -> "));
                diagnostics.push(Diagnostic::DependencyCycle { members });
            }
            return;
        }
        if visited[idx.0] {
            return;
        }

        visited[idx.0] = true;
        on_path[idx.0] = true;
        trail.push(idx);

        for &child in self.children(idx) {
            self.visit(model, child, visited, on_path, trail, seen_cycles, diagnostics);
        }

        trail.pop();
        on_path[idx.0] = false;
    }
}
