use crate::color::{Color, volume_color};
use crate::graph::{GraphModel, NodeIndex};
use serde::{Deserialize, Serialize};

// Marker geometry, relative to the owning node group.
const PORT_CX: f32 = 58.0;
const PORT_CY: f32 = 18.0;
const PORT_RADIUS: f32 = 5.0;
const PORT_SPACING: f32 = 12.0;

const VOLUME_X: f32 = 8.0;
const VOLUME_Y: f32 = 20.0;
const VOLUME_SIZE: f32 = 10.0;
const VOLUME_SPACING: f32 = 12.0;

/// Decorative port badge attached next to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortMarker {
    pub node: NodeIndex,
    pub label: String,
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

/// Decorative volume badge attached next to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMarker {
    pub node: NodeIndex,
    pub label: String,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Attached decoration state for the three view toggles.
///
/// Attach and detach are exact inverses and idempotent; toggling never
/// touches node identity, row/column, or positions. Detaching when
/// nothing was attached is a no-op, so a toggle firing before the first
/// rebuild is harmless.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    ports: Vec<PortMarker>,
    volumes: Vec<VolumeMarker>,
    ports_enabled: bool,
    volumes_enabled: bool,
    dependencies_visible: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach or detach port markers for every node with a non-empty
    /// ports list.
    pub fn set_ports(&mut self, enabled: bool, model: &GraphModel) {
        if enabled == self.ports_enabled {
            return;
        }
        self.ports_enabled = enabled;
        if !enabled {
            self.ports.clear();
            return;
        }

        for idx in model.graph.node_indices() {
            let node = &model.graph[idx];
            for (i, port) in node.ports.iter().enumerate() {
                self.ports.push(PortMarker {
                    node: idx,
                    label: port.clone(),
                    cx: PORT_CX,
                    cy: PORT_CY + i as f32 * PORT_SPACING,
                    radius: PORT_RADIUS,
                });
            }
        }
    }

    /// Attach or detach volume markers for every node with a non-empty
    /// volumes list. Marker color is derived from the volume name, so the
    /// same volume gets the same tint everywhere.
    pub fn set_volumes(&mut self, enabled: bool, model: &GraphModel) {
        if enabled == self.volumes_enabled {
            return;
        }
        self.volumes_enabled = enabled;
        if !enabled {
            self.volumes.clear();
            return;
        }

        for idx in model.graph.node_indices() {
            let node = &model.graph[idx];
            for (i, volume) in node.volumes.iter().enumerate() {
                self.volumes.push(VolumeMarker {
                    node: idx,
                    label: volume.clone(),
                    color: volume_color(volume),
                    x: VOLUME_X,
                    y: VOLUME_Y + i as f32 * VOLUME_SPACING,
                    size: VOLUME_SIZE,
                });
            }
        }
    }

    /// Dependency-edge lines are shown or hidden as a whole; the edge set
    /// itself is untouched.
    pub fn set_dependencies(&mut self, visible: bool) {
        self.dependencies_visible = visible;
    }

    pub fn ports(&self) -> &[PortMarker] {
        &self.ports
    }

    pub fn volumes(&self) -> &[VolumeMarker] {
        &self.volumes
    }

    pub fn ports_enabled(&self) -> bool {
        self.ports_enabled
    }

    pub fn volumes_enabled(&self) -> bool {
        self.volumes_enabled
    }

    pub fn dependencies_visible(&self) -> bool {
        self.dependencies_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use harborview_core::{Registry, ServiceDescriptor};

    fn model_with_ports_and_volumes() -> GraphModel {
        let registry = Registry::from_mapping([
            (
                "web".to_string(),
                ServiceDescriptor {
                    ports: vec!["8080:80".to_string(), "8443:443".to_string()],
                    ..Default::default()
                },
            ),
            (
                "db".to_string(),
                ServiceDescriptor {
                    volumes: vec!["pgdata:/var/lib/postgresql/data".to_string()],
                    ..Default::default()
                },
            ),
            ("cache".to_string(), ServiceDescriptor::default()),
        ])
        .unwrap();
        build_graph(&registry, &mut Vec::new())
    }

    #[test]
    fn test_ports_attach_only_to_nodes_with_ports() {
        let model = model_with_ports_and_volumes();
        let mut overlay = OverlayState::new();

        overlay.set_ports(true, &model);
        assert_eq!(overlay.ports().len(), 2);
        assert!(overlay.ports().iter().all(|m| m.node == model.node_map["web"]));
    }

    #[test]
    fn test_port_markers_stack_downward() {
        let model = model_with_ports_and_volumes();
        let mut overlay = OverlayState::new();
        overlay.set_ports(true, &model);

        let cys: Vec<f32> = overlay.ports().iter().map(|m| m.cy).collect();
        assert_eq!(cys, vec![18.0, 30.0]);
    }

    #[test]
    fn test_enable_disable_leaves_no_residue() {
        let model = model_with_ports_and_volumes();
        let mut overlay = OverlayState::new();

        for _ in 0..2 {
            overlay.set_ports(true, &model);
            overlay.set_ports(false, &model);
        }
        assert!(overlay.ports().is_empty());

        for _ in 0..2 {
            overlay.set_volumes(true, &model);
            overlay.set_volumes(false, &model);
        }
        assert!(overlay.volumes().is_empty());
    }

    #[test]
    fn test_repeated_enable_is_idempotent() {
        let model = model_with_ports_and_volumes();
        let mut overlay = OverlayState::new();

        overlay.set_ports(true, &model);
        let attached = overlay.ports().to_vec();
        overlay.set_ports(true, &model);
        assert_eq!(overlay.ports(), attached.as_slice());
    }

    #[test]
    fn test_detach_before_any_attach_is_a_noop() {
        let model = model_with_ports_and_volumes();
        let mut overlay = OverlayState::new();
        overlay.set_volumes(false, &model);
        assert!(overlay.volumes().is_empty());
        assert!(!overlay.volumes_enabled());
    }

    #[test]
    fn test_volume_marker_color_is_deterministic() {
        let model = model_with_ports_and_volumes();
        let mut first = OverlayState::new();
        let mut second = OverlayState::new();
        first.set_volumes(true, &model);
        second.set_volumes(true, &model);
        assert_eq!(first.volumes()[0].color, second.volumes()[0].color);
    }

    #[test]
    fn test_dependency_visibility_flag() {
        let mut overlay = OverlayState::new();
        assert!(!overlay.dependencies_visible());
        overlay.set_dependencies(true);
        assert!(overlay.dependencies_visible());
        overlay.set_dependencies(false);
        assert!(!overlay.dependencies_visible());
    }
}
