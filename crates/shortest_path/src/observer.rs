use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::INF;

/// One step of a Dijkstra run. The engine emits `Event<&N>`; recording
/// observers keep owned copies via [`Event::cloned`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event<N> {
    /// The minimum entry was taken off the heap.
    Pop { node: N, distance: f64 },
    /// The popped entry belongs to an already finalized node and is dropped.
    Stale { node: N, distance: f64 },
    /// `node` entered the visited set; `distance` is final.
    Finalize { node: N, distance: f64 },
    /// `from -> to` improved the tentative distance of `to`.
    Relax {
        from: N,
        to: N,
        weight: f64,
        previous: f64,
        distance: f64,
    },
    /// `from -> to` did not beat the current tentative distance.
    Skip {
        from: N,
        to: N,
        weight: f64,
        candidate: f64,
        current: f64,
    },
}

impl<N: Clone> Event<&N> {
    pub fn cloned(&self) -> Event<N> {
        match *self {
            Event::Pop { node, distance } => Event::Pop {
                node: node.clone(),
                distance,
            },
            Event::Stale { node, distance } => Event::Stale {
                node: node.clone(),
                distance,
            },
            Event::Finalize { node, distance } => Event::Finalize {
                node: node.clone(),
                distance,
            },
            Event::Relax {
                from,
                to,
                weight,
                previous,
                distance,
            } => Event::Relax {
                from: from.clone(),
                to: to.clone(),
                weight,
                previous,
                distance,
            },
            Event::Skip {
                from,
                to,
                weight,
                candidate,
                current,
            } => Event::Skip {
                from: from.clone(),
                to: to.clone(),
                weight,
                candidate,
                current,
            },
        }
    }
}

/// Read-only view of a run's working state at the moment an event fires.
pub struct Snapshot<'a, N> {
    pub(crate) heap: &'a [(f64, &'a N)],
    pub(crate) visited: &'a HashSet<&'a N>,
    pub(crate) distances: &'a HashMap<&'a N, f64>,
}

impl<'a, N: Eq + Hash> Snapshot<'a, N> {
    /// Queued entries in heap array order, stale duplicates included.
    pub fn heap(&self) -> &'a [(f64, &'a N)] {
        self.heap
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> impl Iterator<Item = &'a N> + 'a {
        self.visited.iter().copied()
    }

    /// Tentative distance, `INF` when `node` has not been reached.
    pub fn distance(&self, node: &N) -> f64 {
        self.distances.get(node).copied().unwrap_or(INF)
    }

    /// Every tracked node with its tentative distance, in no particular order.
    pub fn distances(&self) -> impl Iterator<Item = (&'a N, f64)> + 'a {
        self.distances.iter().map(|(node, &d)| (*node, d))
    }
}

pub trait Observer<N> {
    fn observe(&mut self, event: &Event<&N>, snapshot: &Snapshot<'_, N>);
}

impl<N, F> Observer<N> for F
where
    F: FnMut(&Event<&N>, &Snapshot<'_, N>),
{
    fn observe(&mut self, event: &Event<&N>, snapshot: &Snapshot<'_, N>) {
        self(event, snapshot)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step<N> {
    pub event: Event<N>,
    /// Heap entries after the event, in array order.
    pub queue: Vec<(f64, N)>,
    /// Finalized nodes after the event.
    pub visited: usize,
}

/// Observer that records every step of one run and renders them as a
/// narration: each finalized node is followed by the distance table (`✓`
/// marks visited nodes) and the queue, and the run ends with a summary of
/// the distances from the source.
#[derive(Clone, Debug)]
pub struct Transcript<N> {
    /// Distances before the first pop, source first.
    initial: Vec<(N, f64)>,
    steps: Vec<Step<N>>,
}

impl<N> Default for Transcript<N> {
    fn default() -> Self {
        Self {
            initial: Vec::new(),
            steps: Vec::new(),
        }
    }
}

impl<N> Transcript<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step<N>] {
        &self.steps
    }

    pub fn source(&self) -> Option<&N> {
        self.initial.first().map(|(node, _)| node)
    }

    /// Every vertex of the run with its starting distance, source first.
    pub fn initial(&self) -> &[(N, f64)] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nodes in the order they were finalized.
    pub fn finalized(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.steps.iter().filter_map(|step| match &step.event {
            Event::Finalize { node, distance } => Some((node, *distance)),
            _ => None,
        })
    }
}

impl<N: Eq + Hash + Clone> Observer<N> for Transcript<N> {
    fn observe(&mut self, event: &Event<&N>, snapshot: &Snapshot<'_, N>) {
        if self.steps.is_empty() {
            if let Event::Pop { node: source, .. } = *event {
                self.initial.push((source.clone(), 0.0));
                self.initial.extend(
                    snapshot
                        .distances()
                        .filter(|(node, _)| *node != source)
                        .map(|(node, d)| (node.clone(), d)),
                );
            }
        }
        self.steps.push(Step {
            event: event.cloned(),
            queue: snapshot
                .heap()
                .iter()
                .map(|&(d, node)| (d, node.clone()))
                .collect(),
            visited: snapshot.visited_count(),
        });
    }
}

struct Dist(f64);

impl fmt::Display for Dist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            write!(f, "∞")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<N: fmt::Display> fmt::Display for Step<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            Event::Pop { node, distance } => write!(
                f,
                "pop ({}, {node}), {} queued",
                Dist(*distance),
                self.queue.len()
            ),
            Event::Stale { node, distance } => {
                write!(f, "  skip stale ({}, {node})", Dist(*distance))
            }
            Event::Finalize { node, distance } => write!(
                f,
                "  finalize {node} = {}, {} visited",
                Dist(*distance),
                self.visited
            ),
            Event::Relax {
                from,
                to,
                weight,
                previous,
                distance,
            } => write!(
                f,
                "    relax {from} -> {to} (w={weight}): {} -> {}",
                Dist(*previous),
                Dist(*distance)
            ),
            Event::Skip {
                from,
                to,
                weight,
                candidate,
                current,
            } => write!(
                f,
                "    keep {from} -> {to} (w={weight}): {} >= {}",
                Dist(*candidate),
                Dist(*current)
            ),
        }
    }
}

struct Queue<'a, N>(&'a [(f64, N)]);

impl<N: fmt::Display> fmt::Display for Queue<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "empty");
        }
        write!(f, "[")?;
        for (i, (d, node)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {node})", Dist(*d))?;
        }
        write!(f, "]")
    }
}

/// Distance table rebuilt while replaying the steps.
struct Table<'a, N> {
    rows: Vec<(&'a N, f64, bool)>,
    index: HashMap<&'a N, usize>,
}

impl<'a, N: Eq + Hash> Table<'a, N> {
    fn new(initial: &'a [(N, f64)]) -> Self {
        let rows: Vec<_> = initial.iter().map(|(node, d)| (node, *d, false)).collect();
        let index = rows.iter().enumerate().map(|(i, row)| (row.0, i)).collect();
        Self { rows, index }
    }

    fn row(&mut self, node: &'a N) -> &mut (&'a N, f64, bool) {
        let next = self.rows.len();
        let i = *self.index.entry(node).or_insert(next);
        if i == next {
            self.rows.push((node, INF, false));
        }
        &mut self.rows[i]
    }

    fn apply(&mut self, event: &'a Event<N>) {
        match event {
            Event::Finalize { node, distance } => {
                let row = self.row(node);
                row.1 = *distance;
                row.2 = true;
            }
            Event::Relax { to, distance, .. } => self.row(to).1 = *distance,
            _ => {}
        }
    }
}

impl<N: fmt::Display> fmt::Display for Table<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (node, d, visited)) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{node}: {}{}", Dist(*d), if *visited { "✓" } else { "" })?;
        }
        write!(f, " }}")
    }
}

impl<N: fmt::Display + Eq + Hash> fmt::Display for Transcript<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(&self.initial);
        // Set while the steps of a freshly finalized node are being written.
        let mut open: Option<&Step<N>> = None;
        for step in &self.steps {
            if matches!(step.event, Event::Pop { .. }) {
                if let Some(last) = open.take() {
                    write_state(f, &table, last)?;
                }
            }
            table.apply(&step.event);
            writeln!(f, "{step}")?;
            if open.is_some() || matches!(step.event, Event::Finalize { .. }) {
                open = Some(step);
            }
        }
        if let Some(last) = open {
            write_state(f, &table, last)?;
        }

        if let Some(source) = self.source() {
            writeln!(f, "shortest distances from {source}:")?;
            for (node, d, _) in &table.rows {
                writeln!(f, "  {source} -> {node}: {}", Dist(*d))?;
            }
        }
        Ok(())
    }
}

fn write_state<N: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    table: &Table<'_, N>,
    last: &Step<N>,
) -> fmt::Result {
    writeln!(f, "  distances: {table}")?;
    writeln!(f, "  queue: {}", Queue(&last.queue))
}
