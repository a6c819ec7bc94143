//! The agent arena.
//!
//! Agents live in one `Vec` and are addressed by `AgentId` (the index).
//! Archetype-specific state is the type parameter `R`, so this crate stays
//! independent of the concrete behaviours built on top of it.
//!
//! Cross-agent mutation (a transfer, a car hand-over) goes through
//! [`Population::pair_mut`], which yields two disjoint `&mut` borrows.

use std::ops::{Index, IndexMut};

use ce_core::{AgentId, AgentKind, CarId};

use crate::{AgentError, AgentResult, Ledger};

/// One member of the population.
#[derive(Debug, Clone)]
pub struct Agent<R> {
    pub id:     AgentId,
    pub kind:   AgentKind,
    pub ledger: Ledger,
    pub role:   R,
}

/// All agents plus a per-archetype index.
#[derive(Debug, Clone)]
pub struct Population<R> {
    agents:      Vec<Agent<R>>,
    by_kind:     [Vec<AgentId>; AgentKind::COUNT],
    next_car_id: u64,
}

impl<R> Default for Population<R> {
    fn default() -> Self {
        Self {
            agents:      Vec::new(),
            by_kind:     std::array::from_fn(|_| Vec::new()),
            next_car_id: 0,
        }
    }
}

impl<R> Population<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { agents: Vec::with_capacity(capacity), ..Self::default() }
    }

    /// Append an agent; ids are handed out in insertion order.
    pub fn push(&mut self, kind: AgentKind, ledger: Ledger, role: R) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent { id, kind, ledger, role });
        self.by_kind[kind.index()].push(id);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> AgentResult<&Agent<R>> {
        self.agents.get(id.index()).ok_or(AgentError::UnknownAgent(id))
    }

    pub fn get_mut(&mut self, id: AgentId) -> AgentResult<&mut Agent<R>> {
        self.agents.get_mut(id.index()).ok_or(AgentError::UnknownAgent(id))
    }

    /// Ids of every agent of `kind`, in construction order.
    #[inline]
    pub fn of_kind(&self, kind: AgentKind) -> &[AgentId] {
        &self.by_kind[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent<R>> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent<R>> {
        self.agents.iter_mut()
    }

    /// Agents of `kind` only.
    pub fn iter_kind(&self, kind: AgentKind) -> impl Iterator<Item = &Agent<R>> {
        self.of_kind(kind).iter().map(|id| &self.agents[id.index()])
    }

    /// Disjoint mutable borrows of two different agents, in argument order.
    pub fn pair_mut(&mut self, a: AgentId, b: AgentId) -> AgentResult<(&mut Agent<R>, &mut Agent<R>)> {
        let (ia, ib) = (a.index(), b.index());
        let len = self.agents.len();
        if ia >= len {
            return Err(AgentError::UnknownAgent(a));
        }
        if ib >= len || ia == ib {
            return Err(AgentError::UnknownAgent(b));
        }
        if ia < ib {
            let (lo, hi) = self.agents.split_at_mut(ib);
            Ok((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.agents.split_at_mut(ia);
            Ok((&mut hi[0], &mut lo[ib]))
        }
    }

    /// A fresh, never-used car id.
    pub fn next_car_id(&mut self) -> CarId {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        id
    }
}

impl<R> Index<AgentId> for Population<R> {
    type Output = Agent<R>;

    /// # Panics
    /// Panics on an id that was not handed out by this population.
    #[inline]
    fn index(&self, id: AgentId) -> &Agent<R> {
        &self.agents[id.index()]
    }
}

impl<R> IndexMut<AgentId> for Population<R> {
    #[inline]
    fn index_mut(&mut self, id: AgentId) -> &mut Agent<R> {
        &mut self.agents[id.index()]
    }
}
