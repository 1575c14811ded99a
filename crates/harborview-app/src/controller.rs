use harborview_core::{Diagnostic, Registry, Viewport};
use harborview_events::{Event, EventListener, Toggle};
use harborview_graph::{
    Forest, OverlayState, SimulationAdapter, SimulationGraph, SimulationParams, assign_layout,
    build_graph,
};

#[derive(Debug, Clone, Copy, Default)]
struct ToggleSet {
    ports: bool,
    volumes: bool,
    dependencies: bool,
}

/// Owns the rebuild pipeline and the live simulation for the active view.
///
/// A registry or view change runs the full pipeline synchronously:
/// graph build, forest resolution, layout assignment, then a fresh
/// simulation adapter. The previous adapter is dropped before the new one
/// is created, so there is never more than one position writer, and no
/// tick can observe a half-rebuilt graph: events are dispatched one at a
/// time on a single thread.
///
/// Ticks, resizes and toggle changes are incremental; they touch only
/// positions or overlay state.
pub struct TopologyController {
    registry: Registry,
    viewport: Viewport,
    params: SimulationParams,
    toggles: ToggleSet,
    sim: Option<SimulationAdapter>,
    overlay: OverlayState,
    diagnostics: Vec<Diagnostic>,
    generation: u64,
}

impl Default for TopologyController {
    fn default() -> Self {
        Self::new(Viewport::default(), SimulationParams::default())
    }
}

impl TopologyController {
    pub fn new(viewport: Viewport, params: SimulationParams) -> Self {
        Self {
            registry: Registry::new(),
            viewport,
            params,
            toggles: ToggleSet::default(),
            sim: None,
            overlay: OverlayState::new(),
            diagnostics: Vec::new(),
            generation: 0,
        }
    }

    /// Full rebuild of the active view from the current registry.
    fn rebuild(&mut self) {
        // Tear down the running simulation before creating its successor.
        self.sim = None;
        self.diagnostics.clear();
        self.generation += 1;

        let mut model = build_graph(&self.registry, &mut self.diagnostics);
        let forest = Forest::resolve(&model, &mut self.diagnostics);
        let tree_depth = assign_layout(&mut model, &forest);

        let adapter = SimulationAdapter::new(
            SimulationGraph { model, tree_depth },
            self.viewport,
            self.params,
        );

        // Re-attach overlays against the fresh node set according to the
        // remembered toggle state.
        let mut overlay = OverlayState::new();
        overlay.set_ports(self.toggles.ports, adapter.graph().model());
        overlay.set_volumes(self.toggles.volumes, adapter.graph().model());
        overlay.set_dependencies(self.toggles.dependencies);

        self.overlay = overlay;
        self.sim = Some(adapter);

        tracing::debug!(
            generation = self.generation,
            services = self.registry.len(),
            diagnostics = self.diagnostics.len(),
            "Rebuilt topology view"
        );
    }

    fn on_toggle(&mut self, toggle: Toggle, enabled: bool) {
        match toggle {
            Toggle::Ports => self.toggles.ports = enabled,
            Toggle::Volumes => self.toggles.volumes = enabled,
            Toggle::Dependencies => self.toggles.dependencies = enabled,
        }
        // Before the first rebuild there is nothing attached; remembering
        // the toggle is all that is needed.
        let Some(sim) = &self.sim else {
            return;
        };
        match toggle {
            Toggle::Ports => self.overlay.set_ports(enabled, sim.graph().model()),
            Toggle::Volumes => self.overlay.set_volumes(enabled, sim.graph().model()),
            Toggle::Dependencies => self.overlay.set_dependencies(enabled),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn simulation(&self) -> Option<&SimulationAdapter> {
        self.sim.as_ref()
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Monotonic rebuild counter; useful for asserting teardown ordering.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl EventListener for TopologyController {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::RegistryChanged { registry } => {
                self.registry = registry.clone();
                self.rebuild();
            }
            Event::ViewChanged => self.rebuild(),
            Event::ToggleChanged { toggle, enabled } => self.on_toggle(*toggle, *enabled),
            Event::ViewportResized { width, height } => {
                self.viewport = Viewport::new(*width, *height);
                if let Some(sim) = &mut self.sim {
                    sim.resize(self.viewport);
                }
            }
            Event::Tick => {
                if let Some(sim) = &mut self.sim {
                    sim.tick();
                }
            }
        }
    }
}
