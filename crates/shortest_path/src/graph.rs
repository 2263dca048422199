use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

use crate::error::Result;
use crate::error::check_weight;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<'a, N> {
    pub to: &'a N,
    pub weight: f64,
}

/// Weighted adjacency table keyed by vertex id.
///
/// Every vertex maps to its outgoing `neighbor -> weight` table. Weights are
/// validated on insertion, so a built graph only holds finite, non-negative
/// weights.
#[derive(Clone, Debug)]
pub struct Graph<N> {
    adj: HashMap<N, HashMap<N, f64>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adj: HashMap::new(),
        }
    }
}

impl<N: Eq + Hash + Clone> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: &[(N, N, f64)]) -> Result<Self> {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from.clone(), to.clone(), *weight)?;
        }
        Ok(graph)
    }

    pub fn from_undirected_edges(edges: &[(N, N, f64)]) -> Result<Self> {
        let mut graph = Self::new();
        for (a, b, weight) in edges {
            graph.add_undirected_edge(a.clone(), b.clone(), *weight)?;
        }
        Ok(graph)
    }

    /// Registers `id`. Existing edges of `id` are kept.
    pub fn add_vertex(&mut self, id: N) {
        self.adj.entry(id).or_default();
    }

    /// Records `from -> to` with `weight`, replacing an earlier weight for the
    /// same pair. Both endpoints are registered. On error the graph is left
    /// untouched.
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) -> Result<()> {
        let weight = check_weight(weight)?;
        self.insert_edge(from, to, weight);
        Ok(())
    }

    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) -> Result<()> {
        let weight = check_weight(weight)?;
        self.adj
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.adj.entry(b).or_default().insert(a, weight);
        Ok(())
    }

    /// For callers that produce weights from a known-valid range.
    pub(crate) fn insert_edge(&mut self, from: N, to: N, weight: f64) {
        debug_assert!(check_weight(weight).is_ok(), "invalid weight {weight}");
        self.add_vertex(to.clone());
        self.adj.entry(from).or_default().insert(to, weight);
    }

    #[inline]
    pub fn neighbors(&self, id: &N) -> Neighbors<'_, N> {
        Neighbors {
            table: self.adj.get(id),
        }
    }

    #[inline]
    pub fn contains_vertex(&self, id: &N) -> bool {
        self.adj.contains_key(id)
    }
}

impl<N> Graph<N> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(HashMap::len).sum()
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &N> + '_ {
        self.adj.keys()
    }
}

impl<N: fmt::Display> fmt::Display for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, table) in &self.adj {
            write!(f, "{vertex}: [")?;
            for (i, (to, weight)) in table.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{to}({weight})")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Outgoing edges of one vertex. Empty for ids the graph does not know.
#[derive(Debug)]
pub struct Neighbors<'a, N> {
    table: Option<&'a HashMap<N, f64>>,
}

impl<N> Clone for Neighbors<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Neighbors<'_, N> {}

impl<'a, N: Eq + Hash> Neighbors<'a, N> {
    #[inline]
    pub fn len(&self) -> usize {
        self.table.map_or(0, HashMap::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, to: &N) -> Option<f64> {
        self.table.and_then(|table| table.get(to).copied())
    }

    pub fn iter(&self) -> NeighborIter<'a, N> {
        NeighborIter {
            inner: self.table.map(HashMap::iter),
        }
    }
}

impl<'a, N: Eq + Hash> IntoIterator for Neighbors<'a, N> {
    type Item = Edge<'a, N>;
    type IntoIter = NeighborIter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct NeighborIter<'a, N> {
    inner: Option<hash_map::Iter<'a, N, f64>>,
}

impl<'a, N> Iterator for NeighborIter<'a, N> {
    type Item = Edge<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let (to, &weight) = self.inner.as_mut()?.next()?;
        Some(Edge { to, weight })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(inner) => inner.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<N> ExactSizeIterator for NeighborIter<'_, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn add_edge_registers_both_endpoints() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 2.0).unwrap();

        assert!(g.contains_vertex(&"A"));
        assert!(g.contains_vertex(&"B"));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(&"A").get(&"B"), Some(2.0));
        assert!(g.neighbors(&"B").is_empty());
    }

    #[test]
    fn undirected_edge_is_symmetric() {
        let mut g = Graph::new();
        g.add_undirected_edge(1_u32, 2, 4.5).unwrap();

        assert_eq!(g.neighbors(&1).get(&2), Some(4.5));
        assert_eq!(g.neighbors(&2).get(&1), Some(4.5));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn add_vertex_keeps_existing_edges() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_vertex("A");
        g.add_vertex("A");

        assert_eq!(g.neighbors(&"A").len(), 1);
        assert_eq!(g.neighbors(&"A").get(&"B"), Some(1.0));
    }

    #[test]
    fn repeated_edge_overwrites_weight() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 9.0).unwrap();
        g.add_edge("A", "B", 3.0).unwrap();

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(&"A").get(&"B"), Some(3.0));
    }

    #[test]
    fn unknown_vertex_has_no_neighbors() {
        let g: Graph<&str> = Graph::new();
        let nb = g.neighbors(&"missing");
        assert!(nb.is_empty());
        assert_eq!(nb.iter().len(), 0);
        assert_eq!(nb.iter().next(), None);
        assert_eq!(nb.get(&"x"), None);
    }

    #[test]
    fn invalid_weights_are_rejected_without_side_effects() {
        let mut g = Graph::new();
        assert_eq!(
            g.add_edge("A", "B", -1.0),
            Err(Error::InvalidWeight { weight: -1.0 })
        );
        assert!(g.add_undirected_edge("A", "B", f64::NAN).is_err());
        assert!(g.add_edge("A", "B", f64::INFINITY).is_err());
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);

        let err = Graph::from_edges(&[("A", "B", 1.0), ("B", "C", -2.0)]).unwrap_err();
        assert_eq!(err, Error::InvalidWeight { weight: -2.0 });
    }

    #[test]
    fn neighbor_iteration_yields_every_edge() {
        let g = Graph::from_edges(&[("A", "B", 2.0), ("A", "C", 5.0), ("B", "C", 3.0)]).unwrap();

        let mut edges: Vec<(&str, f64)> = g
            .neighbors(&"A")
            .into_iter()
            .map(|e| (*e.to, e.weight))
            .collect();
        edges.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(edges, vec![("B", 2.0), ("C", 5.0)]);

        let mut vertices: Vec<_> = g.vertices().copied().collect();
        vertices.sort_unstable();
        assert_eq!(vertices, vec!["A", "B", "C"]);
    }

    #[test]
    fn display_lists_adjacency() {
        let g = Graph::from_edges(&[("A", "B", 2.0)]).unwrap();
        let text = g.to_string();
        assert!(text.contains("A: [B(2)]\n"), "{text}");
        assert!(text.contains("B: []\n"), "{text}");
    }
}
