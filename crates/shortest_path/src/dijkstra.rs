use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Index;

use crate::INF;
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::observer::Event;
use crate::observer::Observer;
use crate::observer::Snapshot;

/// Distances from one source. Every vertex the graph knew about at the start
/// of the run is present (`INF` when unreached), as is the source itself.
/// Path sums that exceed `f64::MAX` are reported as `f64::MAX`, so `INF`
/// always means "not reached".
#[derive(Clone, Debug)]
pub struct Distances<N> {
    map: HashMap<N, f64>,
}

impl<N: Eq + Hash> Distances<N> {
    /// `INF` for unreached or unknown nodes.
    #[inline]
    pub fn get(&self, node: &N) -> f64 {
        self.map.get(node).copied().unwrap_or(INF)
    }

    #[inline]
    pub fn is_reachable(&self, node: &N) -> bool {
        self.get(node).is_finite()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&N, f64)> + '_ {
        self.map.iter().map(|(node, &d)| (node, d))
    }

    pub fn reachable(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.iter().filter(|(_, d)| d.is_finite())
    }

    pub fn into_inner(self) -> HashMap<N, f64> {
        self.map
    }
}

impl<N: Eq + Hash> PartialEq for Distances<N> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<N: Eq + Hash> Index<&N> for Distances<N> {
    type Output = f64;

    fn index(&self, node: &N) -> &f64 {
        self.map.get(node).unwrap_or(&INF)
    }
}

/// Result of a run that may have been stopped early.
#[derive(Clone, Debug)]
pub struct Search<N> {
    distances: Distances<N>,
    complete: bool,
}

impl<N> Search<N> {
    /// `false` when the stop predicate ended the run before the heap drained.
    /// Visited nodes still carry final distances; the rest are upper bounds.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn distances(&self) -> &Distances<N> {
        &self.distances
    }

    pub fn into_distances(self) -> Distances<N> {
        self.distances
    }
}

struct Silent;

impl<N> Observer<N> for Silent {
    #[inline]
    fn observe(&mut self, _event: &Event<&N>, _snapshot: &Snapshot<'_, N>) {}
}

/// Single-source shortest distances over non-negative weights.
///
/// A source the graph does not contain is treated as an isolated vertex: it
/// gets distance 0 and every registered vertex stays at `INF`. Distances
/// saturate at `f64::MAX` instead of overflowing to `INF`.
pub fn dijkstra<N: Eq + Hash + Clone>(graph: &Graph<N>, source: &N) -> Distances<N> {
    run(graph, source, &mut Silent, || false).distances
}

/// Same as [`dijkstra`], reporting every pop, stale discard, finalization and
/// relaxation attempt to `observer`.
pub fn dijkstra_with_observer<N, O>(graph: &Graph<N>, source: &N, observer: &mut O) -> Distances<N>
where
    N: Eq + Hash + Clone,
    O: Observer<N> + ?Sized,
{
    run(graph, source, observer, || false).distances
}

/// Runs until the heap drains or `should_stop` returns `true`; the predicate
/// is polled once before every pop.
pub fn dijkstra_bounded<N, S>(graph: &Graph<N>, source: &N, should_stop: S) -> Search<N>
where
    N: Eq + Hash + Clone,
    S: FnMut() -> bool,
{
    run(graph, source, &mut Silent, should_stop)
}

fn run<'a, N, O, S>(
    graph: &'a Graph<N>,
    source: &'a N,
    observer: &mut O,
    mut should_stop: S,
) -> Search<N>
where
    N: Eq + Hash + Clone,
    O: Observer<N> + ?Sized,
    S: FnMut() -> bool,
{
    let n = graph.vertex_count();
    let mut dist: HashMap<&'a N, f64> = HashMap::with_capacity(n + 1);
    for v in graph.vertices() {
        dist.insert(v, INF);
    }
    dist.insert(source, 0.0);

    let mut visited: HashSet<&'a N> = HashSet::with_capacity(n);
    let mut heap = MinHeap::with_capacity(n.max(1));
    heap.push(0.0, source);

    let mut complete = true;
    while !heap.is_empty() {
        if should_stop() {
            complete = false;
            break;
        }
        let Some((d, u)) = heap.pop() else {
            break;
        };

        observer.observe(
            &Event::Pop {
                node: u,
                distance: d,
            },
            &snapshot(&heap, &visited, &dist),
        );

        if visited.contains(u) {
            observer.observe(
                &Event::Stale {
                    node: u,
                    distance: d,
                },
                &snapshot(&heap, &visited, &dist),
            );
            continue;
        }

        visited.insert(u);
        observer.observe(
            &Event::Finalize {
                node: u,
                distance: d,
            },
            &snapshot(&heap, &visited, &dist),
        );

        for edge in graph.neighbors(u) {
            // Saturate so a reached node never collides with the INF sentinel.
            let cand = (d + edge.weight).min(f64::MAX);
            let current = dist.get(edge.to).copied().unwrap_or(INF);
            if cand < current {
                dist.insert(edge.to, cand);
                heap.push(cand, edge.to);
                observer.observe(
                    &Event::Relax {
                        from: u,
                        to: edge.to,
                        weight: edge.weight,
                        previous: current,
                        distance: cand,
                    },
                    &snapshot(&heap, &visited, &dist),
                );
            } else {
                observer.observe(
                    &Event::Skip {
                        from: u,
                        to: edge.to,
                        weight: edge.weight,
                        candidate: cand,
                        current,
                    },
                    &snapshot(&heap, &visited, &dist),
                );
            }
        }
    }

    let map = dist
        .into_iter()
        .map(|(node, d)| (node.clone(), d))
        .collect();
    Search {
        distances: Distances { map },
        complete,
    }
}

#[inline]
fn snapshot<'s, N>(
    heap: &'s MinHeap<f64, &'s N>,
    visited: &'s HashSet<&'s N>,
    distances: &'s HashMap<&'s N, f64>,
) -> Snapshot<'s, N> {
    Snapshot {
        heap: heap.as_slice(),
        visited,
        distances,
    }
}
