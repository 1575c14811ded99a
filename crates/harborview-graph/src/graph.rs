use harborview_core::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node per service. `id` is the registry enumeration ordinal and is
/// never reassigned; `row`/`column`/`row_length` are zero until the layout
/// assigner runs. `position` is written only by the simulation adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceNode {
    pub id: usize,
    pub name: String,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub row: usize,
    pub column: usize,
    pub row_length: usize,
    pub position: Vec2,
}

/// `source` is a dependency of `target`: the edge points from the thing
/// depended upon to the thing depending on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    pub source_idx: NodeIndex,
    pub target_idx: NodeIndex,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<ServiceNode>,
    edges: Vec<DependencyEdge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: ServiceNode) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    pub fn add_edge(&mut self, edge: DependencyEdge) -> EdgeIndex {
        let idx = EdgeIndex(self.edges.len());
        self.edges.push(edge);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex)
    }

    pub fn nodes(&self) -> &[ServiceNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn edge_endpoints(&self, index: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.edges
            .get(index.0)
            .map(|e| (e.source_idx, e.target_idx))
    }
}

impl Index<NodeIndex> for Graph {
    type Output = ServiceNode;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl IndexMut<NodeIndex> for Graph {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}

impl Index<EdgeIndex> for Graph {
    type Output = DependencyEdge;
    fn index(&self, index: EdgeIndex) -> &Self::Output {
        &self.edges[index.0]
    }
}

/// Arena graph plus name lookup. Exactly one `ServiceNode` exists per
/// service name; everything downstream (forest, layout, simulation)
/// addresses it through `NodeIndex`, never by copy.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    pub graph: Graph,
    pub node_map: HashMap<String, NodeIndex>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_service(&mut self, record: &harborview_core::ServiceRecord, id: usize) -> NodeIndex {
        let idx = self.graph.add_node(ServiceNode {
            id,
            name: record.name.clone(),
            ports: record.ports.clone(),
            volumes: record.volumes.clone(),
            row: 0,
            column: 0,
            row_length: 0,
            position: Vec2::default(),
        });
        self.node_map.insert(record.name.clone(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn get_node(&self, name: &str) -> Option<&ServiceNode> {
        self.node_map.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut ServiceNode> {
        self.node_map.get(name).map(|&idx| &mut self.graph[idx])
    }
}
