use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use shortest_path::MinHeap;
use shortest_path::Transcript;
use shortest_path::dijkstra;
use shortest_path::dijkstra_with_observer;
use shortest_path::generator::GraphCase;
use shortest_path::generator::generate_case;

const GRAPH_SIZES: [usize; 3] = [2_048, 8_192, 32_768];
const HEAP_SIZES: [usize; 3] = [4_096, 65_536, 262_144];

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap");
    let mut rng = bench::default_rng();

    for &size in &HEAP_SIZES {
        bench::apply_runtime_for_size(&mut group, size);
        let ops = bench::heap_workload(&mut rng, size, 1_000_000_000);

        group.bench_function(BenchmarkId::new("min_heap", size), |bencher| {
            bencher.iter(|| {
                let mut heap = MinHeap::new();
                for (i, op) in ops.iter().enumerate() {
                    match op {
                        Some(p) => heap.push(*p, i),
                        None => {
                            black_box(heap.pop());
                        }
                    }
                }
                black_box(heap.len())
            });
        });

        group.bench_function(BenchmarkId::new("std_binary_heap", size), |bencher| {
            bencher.iter(|| {
                let mut heap = BinaryHeap::new();
                for (i, op) in ops.iter().enumerate() {
                    match op {
                        Some(p) => heap.push(Reverse((*p, i))),
                        None => {
                            black_box(heap.pop());
                        }
                    }
                }
                black_box(heap.len())
            });
        });
    }

    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    for case in GraphCase::ALL {
        let mut group = c.benchmark_group(format!("dijkstra/{}", case.label()));

        for &size in &GRAPH_SIZES {
            bench::apply_runtime_for_size(&mut group, size);
            let input = generate_case(case, size, bench::seed_for(case as u64, size));

            group.bench_function(BenchmarkId::new("silent", size), |bencher| {
                bencher.iter(|| black_box(dijkstra(&input.graph, &input.source)));
            });

            group.bench_function(BenchmarkId::new("transcript", size), |bencher| {
                bencher.iter(|| {
                    let mut transcript = Transcript::new();
                    let dist = dijkstra_with_observer(&input.graph, &input.source, &mut transcript);
                    black_box((dist, transcript.len()))
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_heap, bench_dijkstra);
criterion_main!(benches);
