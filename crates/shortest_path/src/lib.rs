mod dijkstra;
mod error;
pub mod generator;
pub mod graph;
pub mod heap;
mod observer;

pub use dijkstra::Distances;
pub use dijkstra::Search;
pub use dijkstra::dijkstra;
pub use dijkstra::dijkstra_bounded;
pub use dijkstra::dijkstra_with_observer;
pub use error::Error;
pub use error::Result;
pub use graph::Edge;
pub use graph::Graph;
pub use graph::Neighbors;
pub use heap::MinHeap;
pub use observer::Event;
pub use observer::Observer;
pub use observer::Snapshot;
pub use observer::Step;
pub use observer::Transcript;

/// Distance of a vertex the source cannot reach.
pub const INF: f64 = f64::INFINITY;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::collections::HashSet;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::INF;
    use crate::Transcript;
    use crate::dijkstra;
    use crate::dijkstra_with_observer;
    use crate::generator::GraphCase;
    use crate::generator::generate_case;
    use crate::graph::Graph;

    fn random_graph(n: u32, m: usize, seed: u64) -> Graph<u32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut used = HashSet::new();
        let mut graph = Graph::new();
        for v in 0..n {
            graph.add_vertex(v);
        }

        let m = m.min((n * (n - 1)) as usize);
        while used.len() < m {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u == v || !used.insert((u, v)) {
                continue;
            }
            let w = rng.random_range(0..=1_000_u32);
            graph.add_edge(u, v, f64::from(w)).unwrap();
        }

        graph
    }

    fn bellman_ford(graph: &Graph<u32>, source: u32) -> HashMap<u32, f64> {
        let mut dist: HashMap<u32, f64> = graph.vertices().map(|&v| (v, INF)).collect();
        dist.insert(source, 0.0);

        for _ in 0..dist.len() {
            let mut changed = false;
            for u in graph.vertices() {
                let du = dist[u];
                if du == INF {
                    continue;
                }
                for edge in graph.neighbors(u) {
                    let cand = du + edge.weight;
                    if cand < dist[edge.to] {
                        dist.insert(*edge.to, cand);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        dist
    }

    #[test]
    fn matches_bellman_ford_random() {
        for seed in 0..40_u64 {
            let n = 24;
            let m = 80;
            let g = random_graph(n, m, 0xD1A1_0000 + seed);
            let src = (seed as u32) % n;
            let expected = bellman_ford(&g, src);
            let got = dijkstra(&g, &src);
            assert_eq!(got.into_inner(), expected, "seed={seed}");
        }
    }

    #[test]
    fn matches_bellman_ford_dense_small() {
        for seed in 0..20_u64 {
            let n = 8;
            let g = random_graph(n, 56, 0xB0A5_0000 + seed);
            let src = (seed as u32) % n;
            assert_eq!(
                dijkstra(&g, &src).into_inner(),
                bellman_ford(&g, src),
                "seed={seed}"
            );
        }
    }

    #[test]
    fn generator_cases_match_bellman_ford() {
        for (i, case) in GraphCase::ALL.iter().enumerate() {
            let input = generate_case(*case, 256, 0x5EED_0000 + i as u64);
            let expected = bellman_ford(&input.graph, input.source);
            let got = dijkstra(&input.graph, &input.source);
            assert_eq!(got.into_inner(), expected, "case={:?}", case);
        }
    }

    #[test]
    fn observer_does_not_change_result() {
        for seed in 0..10_u64 {
            let g = random_graph(30, 120, 0x0B5E_0000 + seed);
            let src = (seed as u32) % 30;
            let mut transcript = Transcript::new();
            let observed = dijkstra_with_observer(&g, &src, &mut transcript);
            assert_eq!(observed, dijkstra(&g, &src), "seed={seed}");

            let reachable = observed.reachable().count();
            assert_eq!(transcript.finalized().count(), reachable, "seed={seed}");
            assert_eq!(transcript.initial().len(), observed.len(), "seed={seed}");
            assert_eq!(transcript.source(), Some(&src), "seed={seed}");
        }
    }

    #[test]
    fn graph_is_shared_across_threads() {
        let input = generate_case(GraphCase::SparseRandom, 512, 0x7A7A);
        let graph = &input.graph;
        let expected = dijkstra(graph, &input.source);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| dijkstra(graph, &input.source)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn killer_case_leaves_stale_entries() {
        let input = generate_case(GraphCase::DijkstraKiller, 64, 0x4B11);
        let mut transcript = Transcript::new();
        dijkstra_with_observer(&input.graph, &input.source, &mut transcript);
        let stale = transcript
            .steps()
            .iter()
            .filter(|step| matches!(step.event, crate::Event::Stale { .. }))
            .count();
        assert!(stale > 0);
    }
}
