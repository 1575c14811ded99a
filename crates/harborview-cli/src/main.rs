use anyhow::{Context, Result, bail};
use clap::Parser;
use harborview_app::TopologyController;
use harborview_core::{Registry, ServiceDescriptor, Viewport};
use harborview_events::{Event, EventBus, Toggle};
use harborview_graph::SimulationParams;
use std::fs;
use std::path::PathBuf;

/// Lay out the service topology of a JSON service mapping.
///
/// The input file is a JSON object mapping service name to a descriptor
/// with optional `ports`, `volumes` and `depends_on` arrays. Key order in
/// the file is the registry order and decides row/column assignment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the service mapping (JSON object)
    path: PathBuf,

    /// Number of relaxation ticks to run
    #[arg(short, long, default_value_t = 300)]
    ticks: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Attach port markers
    #[arg(long)]
    ports: bool,

    /// Attach volume markers
    #[arg(long)]
    volumes: bool,
}

fn load_registry(path: &PathBuf) -> Result<Registry> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read service mapping {path:?}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("Service mapping is not valid JSON")?;
    let Some(mapping) = value.as_object() else {
        bail!("Service mapping must be a JSON object of service name -> descriptor");
    };

    let mut registry = Registry::new();
    for (name, descriptor) in mapping {
        let descriptor: ServiceDescriptor = serde_json::from_value(descriptor.clone())
            .with_context(|| format!("Invalid descriptor for service '{name}'"))?;
        registry.insert(name.clone(), descriptor)?;
    }
    Ok(registry)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let registry = load_registry(&args.path)?;
    println!("Loaded {} services from {:?}", registry.len(), args.path);

    let bus = EventBus::new();
    let mut controller = TopologyController::new(
        Viewport::new(args.width, args.height),
        SimulationParams::default(),
    );

    bus.publish(Event::RegistryChanged { registry });
    if args.ports {
        bus.publish(Event::ToggleChanged {
            toggle: Toggle::Ports,
            enabled: true,
        });
    }
    if args.volumes {
        bus.publish(Event::ToggleChanged {
            toggle: Toggle::Volumes,
            enabled: true,
        });
    }
    for _ in 0..args.ticks {
        bus.publish(Event::Tick);
    }
    bus.dispatch_to(&mut controller);

    for diagnostic in controller.diagnostics() {
        eprintln!("warning: {diagnostic}");
    }

    let Some(sim) = controller.simulation() else {
        bail!("No simulation was created");
    };
    let graph = sim.graph();
    println!(
        "{} nodes, {} edges, tree depth {}",
        graph.model().node_count(),
        graph.model().edge_count(),
        graph.tree_depth
    );

    println!("{:<20} {:>4} {:>4} {:>4} {:>10} {:>10}", "service", "row", "col", "len", "x", "y");
    for node in graph.model().graph.nodes() {
        println!(
            "{:<20} {:>4} {:>4} {:>4} {:>10.1} {:>10.1}",
            node.name, node.row, node.column, node.row_length, node.position.x, node.position.y
        );
    }

    for edge in graph.model().graph.edges() {
        println!("{} -> {}", edge.source, edge.target);
    }

    if args.ports {
        println!("{} port markers attached", controller.overlay().ports().len());
    }
    if args.volumes {
        println!(
            "{} volume markers attached",
            controller.overlay().volumes().len()
        );
    }

    Ok(())
}
