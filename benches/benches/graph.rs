use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use graphql_graph::{Graph, GraphOptions};
use graphql_model::Schema;
use std::fmt::Write;
use std::hint::black_box;

const TYPE_COUNT: usize = 300;

/// A wide schema where every type points at the next few, with a union and
/// an input type per object so every edge kind shows up.
fn synthetic_schema() -> String {
    let mut sdl = String::from("type Query {\n");
    for i in 0..TYPE_COUNT {
        let _ = writeln!(sdl, "  node{i}(filter: Filter{i}): Node{i}");
    }
    sdl.push_str("}\n\n");

    for i in 0..TYPE_COUNT {
        let next = (i + 1) % TYPE_COUNT;
        let skip = (i + 7) % TYPE_COUNT;
        let _ = writeln!(
            sdl,
            "type Node{i} {{\n  id: ID!\n  name: String\n  next: Node{next}\n  \
             related(first: Int, filter: Filter{skip}): [Node{skip}!]!\n  any: Any{i}\n}}\n"
        );
        let _ = writeln!(sdl, "union Any{i} = Node{i} | Node{next}\n");
        let _ = writeln!(
            sdl,
            "input Filter{i} {{\n  name: String\n  and: Filter{next}\n}}\n"
        );
    }
    sdl
}

fn compiled() -> apollo_compiler::validation::Valid<apollo_compiler::Schema> {
    apollo_compiler::Schema::parse_and_validate(synthetic_schema(), "synthetic.graphql")
        .expect("synthetic schema is valid")
}

fn bench_build_model(c: &mut Criterion) {
    let compiled = compiled();
    c.bench_function("build_model", |b| {
        b.iter(|| Schema::build(black_box(&compiled)).expect("model builds"));
    });
}

fn bench_build_graph(c: &mut Criterion) {
    let schema = Schema::build(&compiled()).expect("model builds");
    c.bench_function("build_graph", |b| {
        b.iter(|| Graph::from_schema(black_box(&schema), GraphOptions::new()));
    });
}

fn bench_reachable_from(c: &mut Criterion) {
    let schema = Schema::build(&compiled()).expect("model builds");
    let graph = Graph::from_schema(&schema, GraphOptions::new());
    let roots = schema
        .resolve_names(&["Query.node0", "Node150"])
        .expect("roots resolve");

    let mut group = c.benchmark_group("reachable_from");
    for depth in [0, 3, 10] {
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| black_box(&graph).reachable_from(&roots, depth));
        });
    }
    group.finish();
}

fn bench_prune_and_render(c: &mut Criterion) {
    let schema = Schema::build(&compiled()).expect("model builds");
    c.bench_function("prune_and_render", |b| {
        b.iter_batched(
            || schema.clone(),
            |mut schema| {
                let pruned = {
                    let roots = schema.resolve_names(&["Query.node42"]).expect("roots resolve");
                    Graph::from_schema(&schema, GraphOptions::new())
                        .reachable_from(&roots, 4)
                        .into_definitions()
                };
                schema.replace_types(pruned);
                schema.filter_builtins();
                Graph::from_schema(&schema, GraphOptions::new()).to_dot()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_build_model,
    bench_build_graph,
    bench_reachable_from,
    bench_prune_and_render,
);
criterion_main!(benches);
