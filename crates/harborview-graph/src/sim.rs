use crate::graph::GraphModel;
use harborview_core::{Vec2, Viewport};
use serde::{Deserialize, Serialize};

/// Force and boundary tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Target separation the link force pulls connected nodes toward.
    pub link_distance: f32,
    /// Many-body strength; negative repels.
    pub charge_strength: f32,
    /// Node radius used for border enforcement.
    pub node_radius: f32,
    pub side_margin: f32,
    pub top_margin: f32,
    /// Extra offset below the top margin.
    pub top_offset: f32,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            link_distance: 130.0,
            charge_strength: -400.0,
            node_radius: 60.0,
            side_margin: 20.0,
            top_margin: 20.0,
            top_offset: 15.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            alpha_decay: 0.0228,
        }
    }
}

/// Finished input to the simulation adapter. Rebuilt from scratch on
/// every registry or view change, never mutated incrementally.
#[derive(Debug, Clone)]
pub struct SimulationGraph {
    pub model: GraphModel,
    pub tree_depth: usize,
}

impl SimulationGraph {
    pub fn model(&self) -> &GraphModel {
        &self.model
    }
}

/// Injected physics seam: iteratively relax positions toward force
/// equilibrium. The adapter owns boundary clamping, so implementations
/// only move points.
pub trait Relaxation {
    fn tick(&mut self, positions: &mut [Vec2]);
    fn settled(&self) -> bool;
}

/// Default relaxation: a link force pulling endpoints toward a fixed
/// separation plus pairwise many-body repulsion, integrated with velocity
/// decay under a cooling alpha schedule. Fully deterministic; coincident
/// points are separated by a fixed epsilon rather than a random jiggle.
pub struct ForceRelaxation {
    links: Vec<(usize, usize)>,
    velocities: Vec<Vec2>,
    alpha: f32,
    params: SimulationParams,
}

impl ForceRelaxation {
    /// Link endpoints are resolved through node identity (the name map),
    /// never positional array order, so a rebuild that enumerates
    /// services differently still connects the same services.
    pub fn new(graph: &SimulationGraph, params: SimulationParams) -> Self {
        let links = graph
            .model
            .graph
            .edges()
            .iter()
            .map(|e| (e.source_idx.0, e.target_idx.0))
            .collect();
        Self {
            links,
            velocities: vec![Vec2::default(); graph.model.node_count()],
            alpha: 1.0,
            params,
        }
    }
}

const MIN_DISTANCE: f32 = 1e-3;

impl Relaxation for ForceRelaxation {
    fn tick(&mut self, positions: &mut [Vec2]) {
        let n = positions.len();
        if n == 0 {
            return;
        }
        self.alpha += (0.0 - self.alpha) * self.params.alpha_decay;
        let alpha = self.alpha;

        // Link force: pull each connected pair toward link_distance.
        for &(source, target) in &self.links {
            if source == target {
                continue;
            }
            let dx = positions[target].x - positions[source].x;
            let dy = positions[target].y - positions[source].y;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let k = (dist - self.params.link_distance) / dist * alpha * 0.5;
            self.velocities[target].x -= dx * k;
            self.velocities[target].y -= dy * k;
            self.velocities[source].x += dx * k;
            self.velocities[source].y += dy * k;
        }

        // Many-body repulsion between every pair.
        for i in 0..n {
            for j in (i + 1)..n {
                let mut dx = positions[i].x - positions[j].x;
                let mut dy = positions[i].y - positions[j].y;
                if dx == 0.0 && dy == 0.0 {
                    dx = MIN_DISTANCE;
                    dy = MIN_DISTANCE;
                }
                let d2 = (dx * dx + dy * dy).max(1.0);
                let dist = d2.sqrt();
                let f = self.params.charge_strength * alpha / d2;
                let fx = dx / dist * f;
                let fy = dy / dist * f;
                // charge_strength is negative, so -f pushes i away from j.
                self.velocities[i].x -= fx;
                self.velocities[i].y -= fy;
                self.velocities[j].x += fx;
                self.velocities[j].y += fy;
            }
        }

        let retain = 1.0 - self.params.velocity_decay;
        for (position, velocity) in positions.iter_mut().zip(&mut self.velocities) {
            velocity.x *= retain;
            velocity.y *= retain;
            position.x += velocity.x;
            position.y += velocity.y;
        }
    }

    fn settled(&self) -> bool {
        self.alpha < self.params.alpha_min
    }
}

/// Wires a finished graph into a relaxation process and keeps every node
/// inside the viewport.
///
/// Teardown is dropping the adapter: there are no detached timers or
/// listeners, so replacing the adapter is enough to guarantee a single
/// position writer per view. Accumulated relaxation state survives
/// resizes; only the clamp bounds change.
pub struct SimulationAdapter {
    graph: SimulationGraph,
    relaxation: Box<dyn Relaxation>,
    viewport: Viewport,
    params: SimulationParams,
}

impl SimulationAdapter {
    pub fn new(graph: SimulationGraph, viewport: Viewport, params: SimulationParams) -> Self {
        let relaxation = Box::new(ForceRelaxation::new(&graph, params));
        Self::with_relaxation(graph, viewport, params, relaxation)
    }

    /// Construct with an injected relaxation, letting tests drive the
    /// adapter without real physics.
    pub fn with_relaxation(
        mut graph: SimulationGraph,
        viewport: Viewport,
        params: SimulationParams,
        relaxation: Box<dyn Relaxation>,
    ) -> Self {
        seed_positions(&mut graph, viewport);
        let mut adapter = Self {
            graph,
            relaxation,
            viewport,
            params,
        };
        adapter.clamp_all();
        adapter
    }

    /// Advance the relaxation one step and re-apply border enforcement.
    pub fn tick(&mut self) {
        let mut positions: Vec<Vec2> = self
            .graph
            .model
            .graph
            .nodes()
            .iter()
            .map(|n| n.position)
            .collect();
        self.relaxation.tick(&mut positions);

        let indices: Vec<_> = self.graph.model.graph.node_indices().collect();
        for (idx, position) in indices.into_iter().zip(positions) {
            self.graph.model.graph[idx].position = self.clamp(position);
        }
    }

    /// Viewport change: re-clamp only. The relaxation keeps its
    /// accumulated velocity and cooling state.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.clamp_all();
    }

    pub fn settled(&self) -> bool {
        self.relaxation.settled()
    }

    pub fn graph(&self) -> &SimulationGraph {
        &self.graph
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clamp_all(&mut self) {
        let indices: Vec<_> = self.graph.model.graph.node_indices().collect();
        for idx in indices {
            let clamped = self.clamp(self.graph.model.graph[idx].position);
            self.graph.model.graph[idx].position = clamped;
        }
    }

    fn clamp(&self, position: Vec2) -> Vec2 {
        let p = &self.params;
        // Upper bound first, then lower, so the lower margin wins on a
        // degenerate viewport.
        let x = position
            .x
            .min(self.viewport.width - p.side_margin - p.node_radius)
            .max(p.side_margin);
        let y = position
            .y
            .min(self.viewport.height - p.top_margin - p.node_radius)
            .max(p.top_offset + p.top_margin);
        Vec2::new(x, y)
    }
}

/// Deterministic initial placement from the row/column hint: columns
/// spread across the width, rows across the height. Nodes the layout
/// never reached (row-less cycle members) are spread by id instead.
fn seed_positions(graph: &mut SimulationGraph, viewport: Viewport) {
    let node_count = graph.model.node_count();
    let tree_depth = graph.tree_depth;
    for idx in graph.model.graph.node_indices().collect::<Vec<_>>() {
        let node = &mut graph.model.graph[idx];
        let position = if node.row_length > 0 {
            Vec2::new(
                node.column as f32 / (node.row_length + 1) as f32 * viewport.width,
                (node.row + 1) as f32 / (tree_depth + 1) as f32 * viewport.height,
            )
        } else {
            Vec2::new(
                (node.id + 1) as f32 / (node_count + 1) as f32 * viewport.width,
                viewport.height / 2.0,
            )
        };
        node.position = position;
    }
}
