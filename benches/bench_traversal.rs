use std::time::Duration;

use arborgraph::{
    ArborGraph,
    bench_utils::{GraphShape, generate_graph},
};
use criterion::{Criterion, criterion_group, criterion_main};

const LINE_SEED: u64 = 0xDD21;
const TREE_SEED: u64 = 0xEE45;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

struct PreparedGraph {
    graph: ArborGraph,
    label: &'static str,
}

fn bench_scale() -> usize {
    #[cfg(feature = "bench-ci")]
    {
        10_000
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        50_000
    }
}

fn prepared_graphs() -> Vec<PreparedGraph> {
    let nodes = bench_scale();
    vec![
        PreparedGraph {
            graph: generate_graph(GraphShape::Line, nodes, LINE_SEED, false).expect("line"),
            label: "line",
        },
        PreparedGraph {
            graph: generate_graph(GraphShape::Caterpillar { spine: nodes / 2 }, nodes, 0, false)
                .expect("caterpillar"),
            label: "caterpillar",
        },
        PreparedGraph {
            graph: generate_graph(GraphShape::RandomTree, nodes, TREE_SEED, false)
                .expect("random tree"),
            label: "random_tree",
        },
    ]
}

fn bench_leaves(c: &mut Criterion) {
    let graphs = prepared_graphs();
    let mut group = c.benchmark_group("leaves");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &graphs {
        group.bench_function(prepared.label, |b| {
            b.iter(|| prepared.graph.leaves().expect("leaves"));
        });
    }
    group.finish();
}

fn bench_is_tree(c: &mut Criterion) {
    let graphs = prepared_graphs();
    let mut group = c.benchmark_group("is_tree");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &graphs {
        group.bench_function(prepared.label, |b| {
            b.iter(|| prepared.graph.is_tree().expect("is_tree"));
        });
    }
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut graphs = prepared_graphs();
    let mut group = c.benchmark_group("direct_round_trip");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &mut graphs {
        let label = prepared.label;
        group.bench_function(label, |b| {
            b.iter(|| {
                prepared.graph.make_directed();
                prepared.graph.make_undirected().expect("undirected");
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = traversal_benches;
    config = Criterion::default();
    targets = bench_leaves, bench_is_tree, bench_conversion
);
criterion_main!(traversal_benches);
