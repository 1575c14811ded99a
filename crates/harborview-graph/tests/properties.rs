use harborview_core::{Registry, ServiceDescriptor, Viewport};
use harborview_graph::{
    Forest, SimulationAdapter, SimulationGraph, SimulationParams, assign_layout, build_graph,
};
use proptest::prelude::*;

/// Registries of up to a dozen services with random dependency lists.
/// Dependency indices may point past the end of the registry to exercise
/// the unresolvable-reference path, and may repeat or self-reference.
fn registry_strategy() -> impl Strategy<Value = Registry> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(0usize..(n + 3), 0..4), n).prop_map(
            move |dep_lists| {
                Registry::from_mapping((0..n).map(|i| {
                    (
                        format!("s{i}"),
                        ServiceDescriptor {
                            depends_on: dep_lists[i].iter().map(|d| format!("s{d}")).collect(),
                            ..Default::default()
                        },
                    )
                }))
                .unwrap()
            },
        )
    })
}

proptest! {
    #[test]
    fn node_pool_has_one_entry_per_service_and_edge_per_valid_reference(
        registry in registry_strategy()
    ) {
        let mut diagnostics = Vec::new();
        let model = build_graph(&registry, &mut diagnostics);

        let expected_edges: usize = registry
            .iter()
            .map(|r| r.depends_on.iter().filter(|d| registry.contains(d)).count())
            .sum();

        prop_assert_eq!(model.node_count(), registry.len());
        prop_assert_eq!(model.edge_count(), expected_edges);
        // Every dropped reference is accounted for.
        let dropped: usize = registry
            .iter()
            .map(|r| r.depends_on.iter().filter(|d| !registry.contains(d)).count())
            .sum();
        prop_assert_eq!(diagnostics.len(), dropped);
    }

    #[test]
    fn service_without_dependencies_is_always_a_root(registry in registry_strategy()) {
        let mut diagnostics = Vec::new();
        let model = build_graph(&registry, &mut diagnostics);
        let forest = Forest::resolve(&model, &mut diagnostics);

        for record in registry.iter() {
            let has_valid_dependency =
                record.depends_on.iter().any(|d| registry.contains(d));
            if !has_valid_dependency {
                let idx = model.node_map[&record.name];
                prop_assert!(forest.is_root(idx), "{} should be a root", record.name);
            }
        }
    }

    #[test]
    fn resolution_terminates_and_depth_is_bounded(registry in registry_strategy()) {
        let mut diagnostics = Vec::new();
        let mut model = build_graph(&registry, &mut diagnostics);
        let forest = Forest::resolve(&model, &mut diagnostics);
        let tree_depth = assign_layout(&mut model, &forest);

        // No root-to-node path repeats a name, so depth never exceeds the
        // service count even in the presence of cycles.
        prop_assert!(tree_depth <= registry.len());
        for node in model.graph.nodes() {
            prop_assert!(node.row < registry.len().max(1));
        }
    }

    #[test]
    fn layout_assignment_is_deterministic(registry in registry_strategy()) {
        let annotate = |registry: &Registry| {
            let mut diagnostics = Vec::new();
            let mut model = build_graph(registry, &mut diagnostics);
            let forest = Forest::resolve(&model, &mut diagnostics);
            assign_layout(&mut model, &forest);
            model
                .graph
                .nodes()
                .iter()
                .map(|n| (n.name.clone(), n.row, n.column, n.row_length))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(annotate(&registry), annotate(&registry));
    }

    #[test]
    fn child_row_is_parent_row_plus_one_in_trees(
        parents in (1usize..10).prop_flat_map(|n| {
            proptest::collection::vec(proptest::option::of(0usize..n), n)
        })
    ) {
        // Tree-shaped input: service i may depend on one service with a
        // smaller index, so there are no cycles and no diamonds.
        let registry = Registry::from_mapping(parents.iter().enumerate().map(|(i, parent)| {
            (
                format!("s{i}"),
                ServiceDescriptor {
                    depends_on: parent
                        .filter(|&p| p < i)
                        .map(|p| vec![format!("s{p}")])
                        .unwrap_or_default(),
                    ..Default::default()
                },
            )
        }))
        .unwrap();

        let mut diagnostics = Vec::new();
        let mut model = build_graph(&registry, &mut diagnostics);
        let forest = Forest::resolve(&model, &mut diagnostics);
        assign_layout(&mut model, &forest);
        prop_assert!(diagnostics.is_empty());

        for edge in model.graph.edges() {
            let parent = &model.graph[edge.source_idx];
            let child = &model.graph[edge.target_idx];
            prop_assert_eq!(child.row, parent.row + 1);
        }
    }

    #[test]
    fn every_tick_keeps_nodes_inside_the_viewport(
        registry in registry_strategy(),
        width in 200.0f32..2000.0,
        height in 200.0f32..2000.0,
        ticks in 1usize..40,
    ) {
        let mut diagnostics = Vec::new();
        let mut model = build_graph(&registry, &mut diagnostics);
        let forest = Forest::resolve(&model, &mut diagnostics);
        let tree_depth = assign_layout(&mut model, &forest);

        let params = SimulationParams::default();
        let mut adapter = SimulationAdapter::new(
            SimulationGraph { model, tree_depth },
            Viewport::new(width, height),
            params,
        );
        for _ in 0..ticks {
            adapter.tick();
        }

        for node in adapter.graph().model.graph.nodes() {
            prop_assert!(node.position.x >= params.side_margin);
            prop_assert!(node.position.x <= width - params.side_margin - params.node_radius);
            prop_assert!(node.position.y >= params.top_offset + params.top_margin);
            prop_assert!(node.position.y <= height - params.top_margin - params.node_radius);
        }
    }
}
