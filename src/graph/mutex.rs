use super::node::{ActionId, ActionNode, Level, LevelId, StateId, StateNode};
use crate::common::Fluent;

use tracing::trace;

pub(super) fn update_a_mutex(
    a_level: &mut Level<ActionNode>,
    s_level: &Level<StateNode>,
    serial: bool,
) -> usize {
    let mut pairs = Vec::new();
    let nodes = &a_level.nodes;
    for (i, n1) in nodes.iter().enumerate() {
        for (j, n2) in nodes.iter().enumerate().skip(i + 1) {
            if serialize_actions(n1, n2, serial)
                || inconsistent_effects_mutex(n1, n2)
                || interference_mutex(n1, n2)
                || competing_needs_mutex(n1, n2, s_level)
            {
                trace!("mutex actions: {} / {}", n1.action(), n2.action());
                pairs.push((ActionId::from_index(i), ActionId::from_index(j)));
            }
        }
    }

    for &(a, b) in &pairs {
        a_level.mutexify(a, b);
    }
    pairs.len()
}

pub(super) fn update_s_mutex(s_level: &mut Level<StateNode>, a_level: &Level<ActionNode>) -> usize {
    let mut pairs = Vec::new();
    let nodes = &s_level.nodes;
    for (i, n1) in nodes.iter().enumerate() {
        for (j, n2) in nodes.iter().enumerate().skip(i + 1) {
            if negation_mutex(n1, n2) || inconsistent_support_mutex(n1, n2, a_level) {
                trace!("mutex literals: {} / {}", n1.literal(), n2.literal());
                pairs.push((StateId::from_index(i), StateId::from_index(j)));
            }
        }
    }

    for &(a, b) in &pairs {
        s_level.mutexify(a, b);
    }
    pairs.len()
}

fn intersects(lhs: &[Fluent], rhs: &[Fluent]) -> bool {
    lhs.iter().any(|fluent| rhs.contains(fluent))
}

// Under serial semantics two non-persistence actions never share a level.
pub(super) fn serialize_actions(n1: &ActionNode, n2: &ActionNode, serial: bool) -> bool {
    serial && !n1.is_persistent() && !n2.is_persistent()
}

// One action adds a fluent the other removes.
pub(super) fn inconsistent_effects_mutex(n1: &ActionNode, n2: &ActionNode) -> bool {
    let (a1, a2) = (n1.action(), n2.action());
    intersects(&a1.effect_add, &a2.effect_rem) || intersects(&a1.effect_rem, &a2.effect_add)
}

// One action's effect negates a precondition of the other.
pub(super) fn interference_mutex(n1: &ActionNode, n2: &ActionNode) -> bool {
    let (a1, a2) = (n1.action(), n2.action());
    intersects(&a1.effect_add, &a2.precond_neg)
        || intersects(&a1.effect_rem, &a2.precond_pos)
        || intersects(&a2.effect_add, &a1.precond_neg)
        || intersects(&a2.effect_rem, &a1.precond_pos)
}

// Some precondition of one action is mutex with some precondition of the other.
pub(super) fn competing_needs_mutex(
    n1: &ActionNode,
    n2: &ActionNode,
    s_level: &Level<StateNode>,
) -> bool {
    let (parents_1, parents_2) = (n1.relations.parents(), n2.relations.parents());
    parents_1
        .iter()
        .any(|&p1| parents_2.iter().any(|&p2| s_level.is_mutex(p1, p2)))
}

pub(super) fn negation_mutex(n1: &StateNode, n2: &StateNode) -> bool {
    n1.literal().is_negation_of(n2.literal())
}

// Every action supporting one literal is mutex with every action supporting
// the other. A literal without supporting actions is never mutex by this rule.
pub(super) fn inconsistent_support_mutex(
    n1: &StateNode,
    n2: &StateNode,
    a_level: &Level<ActionNode>,
) -> bool {
    let (parents_1, parents_2) = (n1.relations.parents(), n2.relations.parents());
    if parents_1.is_empty() || parents_2.is_empty() {
        return false;
    }
    parents_1
        .iter()
        .all(|&a1| parents_2.iter().all(|&a2| a_level.is_mutex(a1, a2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{GroundAction, Literal};
    use crate::graph::catalogue::CatalogueEntry;
    use std::sync::Arc;

    fn node(action: GroundAction) -> ActionNode {
        ActionNode::new(Arc::new(CatalogueEntry::new(action)))
    }

    fn action(name: &str, pre: (&[&str], &[&str]), eff: (&[&str], &[&str])) -> ActionNode {
        let fluents = |list: &[&str]| list.iter().map(|&f| Fluent::from(f)).collect::<Vec<_>>();
        node(GroundAction::new(
            name,
            &[],
            (fluents(pre.0), fluents(pre.1)),
            (fluents(eff.0), fluents(eff.1)),
        ))
    }

    #[test]
    fn test_serialize_actions() {
        let a = action("A", (&[], &[]), (&["X"], &[]));
        let b = action("B", (&[], &[]), (&["Y"], &[]));
        let noop = node(GroundAction::noop_pos(&Fluent::from("X")));

        assert!(serialize_actions(&a, &b, true));
        assert!(!serialize_actions(&a, &b, false));
        assert!(!serialize_actions(&a, &noop, true));
        assert!(!serialize_actions(&noop, &a, true));
    }

    #[test]
    fn test_inconsistent_effects() {
        let add_x = action("AddX", (&[], &[]), (&["X"], &[]));
        let rem_x = action("RemX", (&[], &[]), (&[], &["X"]));
        let add_y = action("AddY", (&[], &[]), (&["Y"], &[]));

        assert!(inconsistent_effects_mutex(&add_x, &rem_x));
        assert!(inconsistent_effects_mutex(&rem_x, &add_x));
        assert!(!inconsistent_effects_mutex(&add_x, &add_y));
    }

    #[test]
    fn test_interference() {
        let needs_x = action("NeedsX", (&["X"], &[]), (&["Y"], &[]));
        let needs_not_x = action("NeedsNotX", (&[], &["X"]), (&["Z"], &[]));
        let rem_x = action("RemX", (&[], &[]), (&[], &["X"]));
        let add_x = action("AddX", (&[], &[]), (&["X"], &[]));

        assert!(interference_mutex(&needs_x, &rem_x));
        assert!(interference_mutex(&rem_x, &needs_x));
        assert!(interference_mutex(&add_x, &needs_not_x));
        assert!(interference_mutex(&needs_not_x, &add_x));
        assert!(!interference_mutex(&needs_x, &add_x));
        assert!(!interference_mutex(&needs_not_x, &rem_x));
    }

    #[test]
    fn test_negation_mutex() {
        let have = StateNode::new(Literal::pos("Have(Cake)"));
        let not_have = StateNode::new(Literal::neg("Have(Cake)"));
        let eaten = StateNode::new(Literal::pos("Eaten(Cake)"));

        assert!(negation_mutex(&have, &not_have));
        assert!(!negation_mutex(&have, &eaten));
        assert!(!negation_mutex(&have, &have));
    }

    #[test]
    fn test_competing_needs_and_inconsistent_support() {
        // S: X, Y with X/Y mutex; A: NeedsX, NeedsY.
        let mut s_level: Level<StateNode> = Level::default();
        let (x, _) = s_level.insert(StateNode::new(Literal::pos("X")));
        let (y, _) = s_level.insert(StateNode::new(Literal::pos("Y")));
        s_level.mutexify(x, y);

        let mut a_level: Level<ActionNode> = Level::default();
        let (needs_x, _) = a_level.insert(action("NeedsX", (&["X"], &[]), (&["P"], &[])));
        let (needs_y, _) = a_level.insert(action("NeedsY", (&["Y"], &[]), (&["Q"], &[])));
        a_level.node_mut(needs_x).relations.parents.insert(x);
        a_level.node_mut(needs_y).relations.parents.insert(y);

        assert!(competing_needs_mutex(
            &a_level[needs_x],
            &a_level[needs_y],
            &s_level
        ));
        assert_eq!(update_a_mutex(&mut a_level, &s_level, false), 1);
        assert!(a_level.is_mutex(needs_x, needs_y));

        let mut p = StateNode::new(Literal::pos("P"));
        p.relations.parents.insert(needs_x);
        let mut q = StateNode::new(Literal::pos("Q"));
        q.relations.parents.insert(needs_y);
        assert!(inconsistent_support_mutex(&p, &q, &a_level));

        // A shared supporter makes both literals achievable together.
        q.relations.parents.insert(needs_x);
        assert!(!inconsistent_support_mutex(&p, &q, &a_level));
    }

    #[test]
    fn test_inconsistent_support_without_supporters() {
        let a_level: Level<ActionNode> = Level::default();
        let p = StateNode::new(Literal::pos("P"));
        let q = StateNode::new(Literal::pos("Q"));
        assert!(!inconsistent_support_mutex(&p, &q, &a_level));
    }
}
