use crate::graph::{DependencyEdge, GraphModel};
use harborview_core::{Diagnostic, Registry};

/// Build the node pool and edge list from the normalized registry.
///
/// One node per service in registry enumeration order. One edge per
/// resolvable `depends_on` entry, with `source` = dependency name and
/// `target` = dependent name. Edge order is registry order, then
/// dependency-list order within a record; the layout assigner relies on
/// this ordering for deterministic row/column output.
///
/// A `depends_on` entry that does not resolve to a known service emits no
/// edge; the condition is surfaced as a diagnostic instead of failing the
/// rebuild.
pub fn build_graph(registry: &Registry, diagnostics: &mut Vec<Diagnostic>) -> GraphModel {
    let mut model = GraphModel::new();

    for (id, record) in registry.iter().enumerate() {
        model.add_service(record, id);
    }

    for record in registry.iter() {
        let target_idx = model.node_map[&record.name];
        for dependency in &record.depends_on {
            match model.node_map.get(dependency) {
                Some(&source_idx) => {
                    model.graph.add_edge(DependencyEdge {
                        source: dependency.clone(),
                        target: record.name.clone(),
                        source_idx,
                        target_idx,
                    });
                }
                None => {
                    tracing::warn!(
                        "Dropping dependency edge because service '{}' referenced by '{}' \
                         is missing from the registry",
                        dependency,
                        record.name
                    );
                    diagnostics.push(Diagnostic::UnresolvedDependency {
                        service: record.name.clone(),
                        missing: dependency.clone(),
                    });
                }
            }
        }
    }

    model
}
