use super::catalogue::{ActionKey, CatalogueEntry};
use crate::common::{GroundAction, Literal};

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

// Position of a node inside its level. Ids of the two node kinds are
// distinct types, so a literal can never be related to an action as a sibling.
pub trait LevelId: Copy + Eq + Ord + Hash + Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl LevelId for StateId {
    fn from_index(index: usize) -> Self {
        StateId(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

impl LevelId for ActionId {
    fn from_index(index: usize) -> Self {
        ActionId(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

/// Relations shared by both node kinds. `S` indexes siblings at the same
/// level, `O` indexes nodes of the other kind one level back or forward.
/// Sets only ever grow while a graph is being built.
#[derive(Debug, Clone)]
pub struct Relations<S, O> {
    pub(crate) parents: BTreeSet<O>,
    pub(crate) children: BTreeSet<O>,
    pub(crate) mutex: BTreeSet<S>,
}

impl<S, O> Default for Relations<S, O> {
    fn default() -> Self {
        Relations {
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
            mutex: BTreeSet::new(),
        }
    }
}

impl<S: Ord, O: Ord> Relations<S, O> {
    pub fn parents(&self) -> &BTreeSet<O> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeSet<O> {
        &self.children
    }

    pub fn mutex(&self) -> &BTreeSet<S> {
        &self.mutex
    }
}

pub trait PgNode {
    type Id: LevelId;
    type Link: LevelId;
    type Key: Clone + Eq + Hash + Debug;

    fn key(&self) -> &Self::Key;
    fn relations(&self) -> &Relations<Self::Id, Self::Link>;
    fn relations_mut(&mut self) -> &mut Relations<Self::Id, Self::Link>;

    fn is_mutex(&self, other: Self::Id) -> bool {
        self.relations().mutex.contains(&other)
    }
}

#[derive(Debug, Clone)]
pub struct StateNode {
    literal: Literal,
    pub(crate) relations: Relations<StateId, ActionId>,
}

impl StateNode {
    pub fn new(literal: Literal) -> Self {
        StateNode {
            literal,
            relations: Relations::default(),
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

impl PgNode for StateNode {
    type Id = StateId;
    type Link = ActionId;
    type Key = Literal;

    fn key(&self) -> &Literal {
        &self.literal
    }

    fn relations(&self) -> &Relations<StateId, ActionId> {
        &self.relations
    }

    fn relations_mut(&mut self) -> &mut Relations<StateId, ActionId> {
        &mut self.relations
    }
}

#[derive(Debug, Clone)]
pub struct ActionNode {
    pub(crate) entry: Arc<CatalogueEntry>,
    pub(crate) relations: Relations<ActionId, StateId>,
}

impl ActionNode {
    pub fn new(entry: Arc<CatalogueEntry>) -> Self {
        ActionNode {
            entry,
            relations: Relations::default(),
        }
    }

    pub fn action(&self) -> &GroundAction {
        self.entry.action()
    }

    pub fn prenodes(&self) -> &BTreeSet<Literal> {
        self.entry.prenodes()
    }

    pub fn effnodes(&self) -> &BTreeSet<Literal> {
        self.entry.effnodes()
    }

    pub fn is_persistent(&self) -> bool {
        self.entry.is_persistent()
    }
}

impl PgNode for ActionNode {
    type Id = ActionId;
    type Link = StateId;
    type Key = ActionKey;

    fn key(&self) -> &ActionKey {
        self.entry.key()
    }

    fn relations(&self) -> &Relations<ActionId, StateId> {
        &self.relations
    }

    fn relations_mut(&mut self) -> &mut Relations<ActionId, StateId> {
        &mut self.relations
    }
}

#[derive(Debug, Clone)]
pub struct Level<N: PgNode> {
    pub(crate) nodes: Vec<N>,
    index: HashMap<N::Key, N::Id>,
}

impl<N: PgNode> Default for Level<N> {
    fn default() -> Self {
        Level {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<N: PgNode> Level<N> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (N::Id, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (N::Id::from_index(index), node))
    }

    pub fn find(&self, key: &N::Key) -> Option<N::Id> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &N::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts `node` unless a node with the same key is already present.
    /// Returns the id of the node holding the key and whether it was inserted.
    pub(crate) fn insert(&mut self, node: N) -> (N::Id, bool) {
        if let Some(id) = self.find(node.key()) {
            return (id, false);
        }
        let id = N::Id::from_index(self.nodes.len());
        self.index.insert(node.key().clone(), id);
        self.nodes.push(node);
        (id, true)
    }

    pub(crate) fn node_mut(&mut self, id: N::Id) -> &mut N {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn mutexify(&mut self, a: N::Id, b: N::Id) {
        debug_assert_ne!(a, b, "a node cannot be mutex with itself");
        self.node_mut(a).relations_mut().mutex.insert(b);
        self.node_mut(b).relations_mut().mutex.insert(a);
    }

    pub fn is_mutex(&self, a: N::Id, b: N::Id) -> bool {
        self[a].is_mutex(b)
    }

    pub fn mutex_pairs(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.relations().mutex.len())
            .sum::<usize>()
            / 2
    }

    pub fn same_nodes(&self, other: &Level<N>) -> bool {
        self.len() == other.len() && self.index.keys().all(|key| other.contains(key))
    }
}

impl<N: PgNode> Index<N::Id> for Level<N> {
    type Output = N;

    fn index(&self, id: N::Id) -> &N {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_deduplicates_literals() {
        let mut level: Level<StateNode> = Level::default();
        let (have, inserted) = level.insert(StateNode::new(Literal::pos("Have(Cake)")));
        assert!(inserted);
        let (again, inserted) = level.insert(StateNode::new(Literal::pos("Have(Cake)")));
        assert!(!inserted);
        assert_eq!(have, again);

        let (not_have, inserted) = level.insert(StateNode::new(Literal::neg("Have(Cake)")));
        assert!(inserted);
        assert_ne!(have, not_have);
        assert_eq!(level.len(), 2);
        assert_eq!(level.find(&Literal::neg("Have(Cake)")), Some(not_have));
    }

    #[test]
    fn test_mutexify_is_symmetric() {
        let mut level: Level<StateNode> = Level::default();
        let (a, _) = level.insert(StateNode::new(Literal::pos("A")));
        let (b, _) = level.insert(StateNode::new(Literal::pos("B")));
        let (c, _) = level.insert(StateNode::new(Literal::pos("C")));

        level.mutexify(a, b);
        assert!(level.is_mutex(a, b));
        assert!(level.is_mutex(b, a));
        assert!(!level.is_mutex(a, c));
        assert_eq!(level.mutex_pairs(), 1);
    }

    #[test]
    fn test_same_nodes_ignores_order() {
        let mut first: Level<StateNode> = Level::default();
        first.insert(StateNode::new(Literal::pos("A")));
        first.insert(StateNode::new(Literal::neg("B")));

        let mut second: Level<StateNode> = Level::default();
        second.insert(StateNode::new(Literal::neg("B")));
        second.insert(StateNode::new(Literal::pos("A")));
        assert!(first.same_nodes(&second));

        second.insert(StateNode::new(Literal::pos("B")));
        assert!(!first.same_nodes(&second));
    }
}
