use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::Graph;

/// Largest generated weight. Weights are whole numbers, so path sums stay
/// exact in `f64`.
const C_MAX: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GraphCase {
    SparseRandom,
    DenseRandom,
    AlmostLine,
    Grid,
    ZeroWeights,
    DijkstraKiller,
}

impl GraphCase {
    pub const ALL: [GraphCase; 6] = [
        Self::SparseRandom,
        Self::DenseRandom,
        Self::AlmostLine,
        Self::Grid,
        Self::ZeroWeights,
        Self::DijkstraKiller,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SparseRandom => "sparse_random",
            Self::DenseRandom => "dense_random",
            Self::AlmostLine => "almost_line",
            Self::Grid => "grid",
            Self::ZeroWeights => "zero_weights",
            Self::DijkstraKiller => "dijkstra_killer",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    pub graph: Graph<u32>,
    pub source: u32,
}

/// Builds a directed graph of roughly `size` vertices (dense cases use about
/// `sqrt(size)` vertices). The same `seed` always gives the same graph.
pub fn generate_case(case: GraphCase, size: usize, seed: u64) -> GeneratedGraph {
    match case {
        GraphCase::SparseRandom => sparse_random_case(size.max(32), seed, 4),
        GraphCase::DenseRandom => dense_random_case(size.max(64), seed),
        GraphCase::AlmostLine => almost_line_case(size.max(16), seed),
        GraphCase::Grid => grid_case(size.max(16), seed),
        GraphCase::ZeroWeights => zero_weights_case(size.max(64), seed),
        GraphCase::DijkstraKiller => dijkstra_killer_case(size.max(32), seed),
    }
}

fn sparse_random_case(n: usize, seed: u64, edge_factor: usize) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let m_target = n.saturating_mul(edge_factor).min(complete_edges(n));
    let mut edges = Vec::with_capacity(m_target);
    let mut used = HashSet::with_capacity(m_target * 2 + 1);

    while edges.len() < m_target {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let source = rng.random_range(0..n) as u32;
    GeneratedGraph {
        graph: build(n, &edges),
        source,
    }
}

fn dense_random_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(complete_edges(n));

    for u in 0..n {
        for v in 0..n {
            if u != v {
                edges.push((u as u32, v as u32, rng.random_range(0..=C_MAX)));
            }
        }
    }

    let source = rng.random_range(0..n) as u32;
    GeneratedGraph {
        graph: build(n, &edges),
        source,
    }
}

fn zero_weights_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(complete_edges(n));

    for u in 0..n {
        for v in 0..n {
            if u != v && rng.random_bool(0.5) {
                edges.push((u as u32, v as u32, 0));
            }
        }
    }

    let source = rng.random_range(0..n) as u32;
    GeneratedGraph {
        graph: build(n, &edges),
        source,
    }
}

// A path with random shortcuts of length 2-3, relabeled by a random permutation.
fn almost_line_case(n: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n * 2);
    let mut used = HashSet::with_capacity(n * 4);

    for i in 0..(n - 1) {
        push_unique_edge(&mut edges, &mut used, i, i + 1, rng.random_range(0..=C_MAX));
    }

    let m_target = n.saturating_mul(2).min(complete_edges(n));
    while edges.len() < m_target {
        let a = rng.random_range(0..(n - 2));
        let b = (a + rng.random_range(2..=3)).min(n - 1);
        let (u, v) = if rng.random_bool(0.5) { (b, a) } else { (a, b) };
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let mut perm: Vec<u32> = (0..n as u32).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0 as usize];
        edge.1 = perm[edge.1 as usize];
    }

    GeneratedGraph {
        graph: build(n, &edges),
        source: perm[0],
    }
}

fn grid_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = floor_sqrt(size).max(4);
    let n = len * len;
    let mut edges = Vec::with_capacity(n * 4);
    let index = |i: usize, j: usize| (i * len + j) as u32;

    for i in 0..len {
        for j in 0..len {
            if j + 1 < len {
                edges.push((index(i, j), index(i, j + 1), rng.random_range(0..=C_MAX)));
                edges.push((index(i, j + 1), index(i, j), rng.random_range(0..=C_MAX)));
            }
            if i + 1 < len {
                edges.push((index(i, j), index(i + 1, j), rng.random_range(0..=C_MAX)));
                edges.push((index(i + 1, j), index(i, j), rng.random_range(0..=C_MAX)));
            }
        }
    }

    let source = rng.random_range(0..n) as u32;
    GeneratedGraph {
        graph: build(n, &edges),
        source,
    }
}

// Fan-out / fan-in layers where the cheap first hop leads to the expensive
// second hop, so tentative distances get improved many times and the heap
// fills with stale entries.
fn dijkstra_killer_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let one = (size / 4).max(8);
    let n = one * 2 + 3;
    let hub = one + 1;
    let sink = n - 1;
    let mut edges = Vec::with_capacity(one * 4);

    for i in 0..one {
        let span = (one - i - 1) as u32;
        edges.push((0, (i + 1) as u32, i as u32));
        edges.push(((i + 1) as u32, hub as u32, span * 2));
        edges.push((hub as u32, (hub + 1 + i) as u32, 2 * i as u32));
        edges.push(((hub + 1 + i) as u32, sink as u32, span));
    }

    let mut perm: Vec<u32> = (0..n as u32).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0 as usize];
        edge.1 = perm[edge.1 as usize];
    }
    edges.shuffle(&mut rng);

    GeneratedGraph {
        graph: build(n, &edges),
        source: perm[0],
    }
}

fn build(n: usize, edges: &[(u32, u32, u32)]) -> Graph<u32> {
    let mut graph = Graph::new();
    for v in 0..n as u32 {
        graph.add_vertex(v);
    }
    for &(from, to, weight) in edges {
        graph.insert_edge(from, to, f64::from(weight));
    }
    graph
}

#[inline]
fn complete_edges(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1))
}

#[inline]
fn floor_sqrt(value: usize) -> usize {
    (value as f64).sqrt().floor() as usize
}

#[inline]
fn push_unique_edge(
    edges: &mut Vec<(u32, u32, u32)>,
    used: &mut HashSet<u64>,
    u: usize,
    v: usize,
    weight: u32,
) -> bool {
    if u == v {
        return false;
    }
    let key = ((u as u64) << 32) | v as u64;
    if used.insert(key) {
        edges.push((u as u32, v as u32, weight));
        true
    } else {
        false
    }
}
