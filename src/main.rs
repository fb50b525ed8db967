use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use csv::Writer;
use sptree::{reference, scenario, Graph, GraphConfig, Selector, VertexId};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "sptree")]
#[command(about = "Build the tower graph and highlight the shortest-path tree from a source tower.", long_about = None)]
struct Cli {
    /// Source tower, by name ("Tower 1") or by index (1)
    #[arg(short, long, default_value_t = String::from("Tower 0"))]
    source: String,

    /// How the next vertex to settle is picked
    #[arg(short = 'S', long, value_enum, default_value_t = SelectorArg::Linear)]
    selector: SelectorArg,

    /// Maximum number of vertices the graph may hold
    #[arg(short, long, default_value_t = sptree::DEFAULT_MAX_VERTICES)]
    max_vertices: usize,

    /// Output CSV (vertex_id, name, distance, predecessor, finalized). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Include unreachable vertices in the CSV output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Cross-check the distances against a plain heap Dijkstra
    #[arg(long, default_value_t = false)]
    verify: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SelectorArg {
    Linear,
    Heap,
}

impl From<SelectorArg> for Selector {
    fn from(arg: SelectorArg) -> Self {
        match arg {
            SelectorArg::Linear => Selector::LinearScan,
            SelectorArg::Heap => Selector::Heap,
        }
    }
}

fn resolve_source(graph: &Graph, source: &str) -> Result<VertexId> {
    if let Some(id) = graph.index_of(source) {
        return Ok(id);
    }
    source
        .parse::<VertexId>()
        .with_context(|| format!("no tower named {source:?}"))
}

fn distance_text(graph: &Graph, id: VertexId) -> String {
    match graph.vertex(id) {
        Some(vertex) if vertex.is_finalized() => vertex.distance().to_string(),
        _ => String::from("inf"),
    }
}

fn verify(graph: &Graph, source: VertexId) -> Result<()> {
    let expected = reference::dijkstra_all(&graph.adjacency_list(), source);
    for (vertex, expected) in graph.vertices().iter().zip(expected) {
        let actual = vertex.is_finalized().then(|| vertex.distance());
        if actual != expected {
            bail!(
                "distance mismatch at {}: labeled {:?}, reference {:?}",
                vertex,
                actual,
                expected
            );
        }
    }
    info!("distances match the reference Dijkstra");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let config = GraphConfig {
        max_vertices: cli.max_vertices,
        selector: cli.selector.into(),
    };
    let mut graph = scenario::towers(config).context("building the tower graph")?;
    info!("Graph: {} vertices, {} directed edges", graph.len(), graph.edges().count());

    let source = resolve_source(&graph, &cli.source)?;

    use std::time::SystemTime;
    let now = SystemTime::now();
    graph.clear_highlighting();
    let summary = graph
        .compute_shortest_paths(source)
        .with_context(|| format!("computing shortest paths from {}", &cli.source))?;
    if let Ok(elapsed) = now.elapsed() {
        info!(
            "Settled {} vertices with {} relaxations in {} s",
            summary.settled.len(),
            summary.relaxations,
            elapsed.as_secs_f64()
        );
    }

    if cli.verify {
        verify(&graph, source)?;
    }

    if let Some(out_path) = cli.out {
        let mut wtr =
            Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        wtr.write_record(["vertex_id", "name", "distance", "predecessor", "finalized"])?;
        let mut written = 0;
        for vertex in graph.vertices() {
            if !vertex.is_finalized() && !cli.include_unreachable {
                continue;
            }
            let predecessor = vertex
                .predecessor()
                .filter(|_| vertex.is_finalized())
                .map(|p| p.to_string())
                .unwrap_or_default();
            wtr.write_record(&[
                vertex.id().to_string(),
                vertex.name().to_string(),
                distance_text(&graph, vertex.id()),
                predecessor,
                vertex.is_finalized().to_string(),
            ])?;
            written += 1;
        }
        wtr.flush()?;
        println!("Wrote labels for {} vertices to {}", written, out_path);
    } else {
        let source_name = graph.vertex(source).map(|v| v.name()).unwrap_or_default();
        println!("Shortest paths from {}:", source_name);
        for vertex in graph.vertices() {
            let via = match graph.path_to(vertex.id()) {
                Some(path) => path
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> "),
                None => String::from("unreachable"),
            };
            println!(
                "  {:<10} {:>5}   {}",
                vertex.name(),
                distance_text(&graph, vertex.id()),
                via
            );
        }
        let tree: Vec<String> = graph
            .tree_edges()
            .iter()
            .map(|(from, to)| format!("({from},{to})"))
            .collect();
        println!("Highlighted edges: {}", tree.join(" "));
    }

    Ok(())
}
