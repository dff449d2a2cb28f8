use crate::common::{Fluent, GroundAction, Literal};

use std::collections::BTreeSet;
use std::sync::Arc;

pub type ActionKey = (String, Vec<String>);

#[derive(Debug, Clone)]
pub struct CatalogueEntry {
    action: GroundAction,
    key: ActionKey,
    prenodes: BTreeSet<Literal>,
    effnodes: BTreeSet<Literal>,
    is_persistent: bool,
}

impl CatalogueEntry {
    pub fn new(action: GroundAction) -> Self {
        let key = (action.name.clone(), action.args.clone());
        let prenodes = action.precond_literals();
        let effnodes = action.effect_literals();
        let is_persistent = prenodes == effnodes;
        CatalogueEntry {
            action,
            key,
            prenodes,
            effnodes,
            is_persistent,
        }
    }

    pub fn action(&self) -> &GroundAction {
        &self.action
    }

    pub fn key(&self) -> &ActionKey {
        &self.key
    }

    pub fn prenodes(&self) -> &BTreeSet<Literal> {
        &self.prenodes
    }

    pub fn effnodes(&self) -> &BTreeSet<Literal> {
        &self.effnodes
    }

    pub fn is_persistent(&self) -> bool {
        self.is_persistent
    }
}

/// Every action a planning graph may place on a level: the problem's ground
/// actions followed by a positive and a negative no-op per fluent.
///
/// Entries are shared, so one catalogue serves the graphs of every state of
/// a problem.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalogue {
    entries: Vec<Arc<CatalogueEntry>>,
}

impl ActionCatalogue {
    pub fn new(actions: &[GroundAction], state_map: &[Fluent]) -> Self {
        let entries = actions
            .iter()
            .cloned()
            .chain(noop_actions(state_map))
            .map(|action| Arc::new(CatalogueEntry::new(action)))
            .collect();
        ActionCatalogue { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogueEntry>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn noop_actions(state_map: &[Fluent]) -> Vec<GroundAction> {
    state_map
        .iter()
        .flat_map(|fluent| [GroundAction::noop_pos(fluent), GroundAction::noop_neg(fluent)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::have_cake;

    #[test]
    fn test_noop_actions() {
        let state_map: Vec<Fluent> = vec!["Have(Cake)".into(), "Eaten(Cake)".into()];
        let noops = noop_actions(&state_map);

        let names: Vec<String> = noops.iter().map(|a| a.to_string()).collect();
        assert_eq!(
            names,
            [
                "Noop_pos(Have(Cake))",
                "Noop_neg(Have(Cake))",
                "Noop_pos(Eaten(Cake))",
                "Noop_neg(Eaten(Cake))",
            ]
        );
    }

    #[test]
    fn test_catalogue_persistence() {
        let problem = have_cake();
        let catalogue = problem.catalogue();
        assert_eq!(catalogue.len(), 2 + 2 * problem.state_map.len());

        let persistent: Vec<&str> = catalogue
            .iter()
            .filter(|entry| entry.is_persistent())
            .map(|entry| entry.action().name.as_str())
            .collect();
        assert_eq!(persistent.len(), 4);
        assert!(persistent.iter().all(|name| name.starts_with("Noop_")));

        let eat = catalogue
            .iter()
            .find(|entry| entry.action().name == "Eat")
            .unwrap();
        assert!(!eat.is_persistent());
        assert_eq!(eat.key(), &("Eat".to_string(), vec!["Cake".to_string()]));
    }
}
