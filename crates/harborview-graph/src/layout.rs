use crate::forest::Forest;
use crate::graph::{GraphModel, NodeIndex};

/// Walk the forest and back-annotate `row`, `column` and `row_length`
/// onto the node pool. Returns the tree depth (number of distinct depths
/// encountered).
///
/// Traversal is depth-first per root in root order, recording every node
/// encounter into a per-depth bucket in visit order. A node reachable via
/// several parents is recorded once per path, so later (deeper) rows win
/// for `row` while `column` keeps its first-assigned value: a diamond
/// node's displayed column is decided by the first traversal path that
/// reaches it. Branches that would revisit a node already on the current
/// root-to-node path are not expanded; the resolver has already reported
/// those cycles.
pub fn assign_layout(model: &mut GraphModel, forest: &Forest) -> usize {
    let mut depths: Vec<Vec<NodeIndex>> = Vec::new();
    let mut on_path = vec![false; model.node_count()];

    for &root in &forest.roots {
        collect(forest, root, 0, &mut on_path, &mut depths);
    }

    for (depth, bucket) in depths.iter().enumerate() {
        let row_length = bucket.len();
        for (i, &idx) in bucket.iter().enumerate() {
            let node = &mut model.graph[idx];
            node.row = depth;
            node.row_length = row_length;
            if node.column == 0 {
                node.column = i + 1;
            }
        }
    }

    depths.len()
}

fn collect(
    forest: &Forest,
    idx: NodeIndex,
    depth: usize,
    on_path: &mut [bool],
    depths: &mut Vec<Vec<NodeIndex>>,
) {
    if on_path[idx.0] {
        return;
    }
    if depth == depths.len() {
        depths.push(Vec::new());
    }
    depths[depth].push(idx);

    on_path[idx.0] = true;
    for &child in forest.children(idx) {
        collect(forest, child, depth + 1, on_path, depths);
    }
    on_path[idx.0] = false;
}
