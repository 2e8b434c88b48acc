//! Resumable search steppers.
//!
//! A [`Search`] runs one of the four [`Algorithm`]s one event at a time.
//! Every call to [`step`](SearchStepper::step) performs a bounded unit of
//! work and returns exactly one [`Event`]:
//!
//! 1. If `Visit` events from the last expansion are still queued, the
//!    oldest is returned.
//! 2. Otherwise the next frontier node is popped and `Process(node)` is
//!    returned. Expanding it queues one `Visit` per admitted neighbor
//!    (up, down, left, right). Popping the goal queues `PathFound`.
//! 3. When nothing is queued and the frontier is empty, `Exhausted`.
//!
//! After `PathFound` or `Exhausted` the stepper is spent: further calls
//! return [`SearchError::InvalidState`]. Steppers cannot be rewound; build
//! a fresh one to search again.

use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use pathviz_core::{Coord, Maze};

use crate::algorithm::Algorithm;
use crate::distance::manhattan;
use crate::error::SearchError;
use crate::event::{Event, Outcome};
use crate::frontier::{Entry, Frontier};
use crate::traits::Pather;

/// Lifecycle of a stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Constructed, no step taken yet.
    Ready,
    /// At least one step taken, no terminal event yet.
    Running,
    /// `PathFound` or `Exhausted` has been returned.
    Completed,
}

/// Counters for side-by-side comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// `Process` events emitted.
    pub processed: usize,
    /// `Visit` events emitted.
    pub discovered: usize,
    /// `step()` calls that returned an event.
    pub steps: usize,
}

/// The capability set every stepper exposes to the playback layer.
pub trait SearchStepper {
    /// Advance by one event.
    fn step(&mut self) -> Result<Event, SearchError>;

    /// Whether a terminal event has been returned.
    fn is_done(&self) -> bool;

    /// The strategy this stepper runs.
    fn algorithm(&self) -> Algorithm;

    /// Progress counters so far.
    fn stats(&self) -> SearchStats;

    /// Step until a terminal event, returning every event in order.
    fn run_to_end(&mut self) -> Result<Vec<Event>, SearchError> {
        let mut events = Vec::new();
        while !self.is_done() {
            events.push(self.step()?);
        }
        Ok(events)
    }
}

/// A single resumable search over a [`Pather`].
///
/// All search state (frontier, visited set, predecessors, best costs and the
/// queue of pending events) is owned by the stepper and never shared.
#[derive(Debug)]
pub struct Search<P: Pather = Maze> {
    algorithm: Algorithm,
    pather: Rc<P>,
    start: Coord,
    goal: Coord,
    frontier: Frontier,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    costs: HashMap<Coord, i32>,
    pending: VecDeque<Event>,
    phase: Phase,
    outcome: Option<Outcome>,
    stats: SearchStats,
    nbuf: Vec<Coord>,
}

impl<P: Pather> Search<P> {
    /// Create a stepper for `algorithm` from `start` to `goal`.
    ///
    /// Both endpoints must lie inside the pather's range and the start must
    /// be passable. The goal may be blocked; such a search ends in
    /// `Exhausted`.
    pub fn new(
        algorithm: Algorithm,
        pather: Rc<P>,
        start: Coord,
        goal: Coord,
    ) -> Result<Self, SearchError> {
        let rng = pather.range();
        if !rng.contains(start) {
            return Err(SearchError::StartOutOfBounds(start));
        }
        if !rng.contains(goal) {
            return Err(SearchError::GoalOutOfBounds(goal));
        }
        if !pather.passable(start) {
            return Err(SearchError::StartBlocked(start));
        }

        let mut frontier = match algorithm {
            Algorithm::Bfs => Frontier::queue(),
            Algorithm::Dfs => Frontier::stack(),
            Algorithm::GreedyBestFirst | Algorithm::AStar => Frontier::priority(),
        };
        let h = manhattan(start, goal);
        frontier.push(
            Entry {
                coord: start,
                cost: 0,
            },
            h,
        );

        Ok(Self {
            algorithm,
            pather,
            start,
            goal,
            frontier,
            visited: HashSet::from([start]),
            parents: HashMap::new(),
            costs: HashMap::from([(start, 0)]),
            pending: VecDeque::new(),
            phase: Phase::Ready,
            outcome: None,
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        })
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The result once completed.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Every coordinate admitted to the frontier so far, start included.
    pub fn visited(&self) -> &HashSet<Coord> {
        &self.visited
    }

    /// Best known path cost from the start, if the node has been reached.
    pub fn cost_of(&self, c: Coord) -> Option<i32> {
        self.costs.get(&c).copied()
    }

    fn advance(&mut self) -> Event {
        if let Some(ev) = self.pending.pop_front() {
            return ev;
        }

        while let Some(entry) = self.frontier.pop() {
            // A* leaves superseded heap entries behind; skip them.
            if self.algorithm == Algorithm::AStar && self.cost_of(entry.coord) != Some(entry.cost) {
                continue;
            }

            let node = entry.coord;
            if node == self.goal {
                self.pending
                    .push_back(Event::PathFound(self.reconstruct(node)));
            } else {
                self.expand(node, entry.cost);
            }
            return Event::Process(node);
        }

        Event::Exhausted
    }

    fn expand(&mut self, node: Coord, cost: i32) {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(node, &mut nbuf);

        let tentative = cost + 1;
        for &n in nbuf.iter() {
            let admit = match self.algorithm {
                Algorithm::AStar => self.costs.get(&n).is_none_or(|&old| tentative < old),
                _ => !self.visited.contains(&n),
            };
            if !admit {
                continue;
            }

            self.visited.insert(n);
            self.parents.insert(n, node);
            self.costs.insert(n, tentative);

            let priority = match self.algorithm {
                Algorithm::Bfs | Algorithm::Dfs => 0,
                Algorithm::GreedyBestFirst => manhattan(n, self.goal),
                Algorithm::AStar => tentative + manhattan(n, self.goal),
            };
            self.frontier.push(
                Entry {
                    coord: n,
                    cost: tentative,
                },
                priority,
            );
            self.pending.push_back(Event::Visit(n));
        }

        self.nbuf = nbuf;
    }

    /// Follow predecessors back from `node` and return the start→node path.
    fn reconstruct(&self, node: Coord) -> Vec<Coord> {
        let mut path = vec![node];
        let mut cur = node;
        while let Some(&prev) = self.parents.get(&cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }
}

impl<P: Pather> SearchStepper for Search<P> {
    fn step(&mut self) -> Result<Event, SearchError> {
        if self.phase == Phase::Completed {
            return Err(SearchError::InvalidState {
                algorithm: self.algorithm,
            });
        }
        self.phase = Phase::Running;

        let ev = self.advance();
        self.stats.steps += 1;
        match &ev {
            Event::Process(_) => self.stats.processed += 1,
            Event::Visit(_) => self.stats.discovered += 1,
            Event::PathFound(path) => {
                self.phase = Phase::Completed;
                self.outcome = Some(Outcome::Found(path.clone()));
            }
            Event::Exhausted => {
                self.phase = Phase::Completed;
                self.outcome = Some(Outcome::Exhausted);
            }
        }
        Ok(ev)
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Completed
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
