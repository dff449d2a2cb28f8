use crate::common::{Fluent, FluentState, GroundAction, Literal};
use crate::problem::Problem;

/// Cargo moved between airports by planes, grounded over fixed object sets.
#[derive(Debug, Clone)]
pub struct AirCargo {
    pub cargos: Vec<String>,
    pub planes: Vec<String>,
    pub airports: Vec<String>,
}

fn at(thing: &str, place: &str) -> Fluent {
    Fluent::new(format!("At({thing}, {place})"))
}

fn inside(cargo: &str, plane: &str) -> Fluent {
    Fluent::new(format!("In({cargo}, {plane})"))
}

impl AirCargo {
    pub fn new(cargos: &[&str], planes: &[&str], airports: &[&str]) -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        AirCargo {
            cargos: owned(cargos),
            planes: owned(planes),
            airports: owned(airports),
        }
    }

    pub fn fluents(&self) -> Vec<Fluent> {
        let mut fluents = Vec::new();
        for c in &self.cargos {
            for a in &self.airports {
                fluents.push(at(c, a));
            }
            for p in &self.planes {
                fluents.push(inside(c, p));
            }
        }
        for p in &self.planes {
            for a in &self.airports {
                fluents.push(at(p, a));
            }
        }
        fluents
    }

    pub fn actions(&self) -> Vec<GroundAction> {
        let mut loads = Vec::new();
        let mut unloads = Vec::new();
        for c in &self.cargos {
            for p in &self.planes {
                for a in &self.airports {
                    loads.push(GroundAction::new(
                        "Load",
                        &[c.as_str(), p.as_str(), a.as_str()],
                        (vec![at(p, a), at(c, a)], vec![]),
                        (vec![inside(c, p)], vec![at(c, a)]),
                    ));
                    unloads.push(GroundAction::new(
                        "Unload",
                        &[c.as_str(), p.as_str(), a.as_str()],
                        (vec![at(p, a), inside(c, p)], vec![]),
                        (vec![at(c, a)], vec![inside(c, p)]),
                    ));
                }
            }
        }

        let mut flys = Vec::new();
        for from in &self.airports {
            for to in self.airports.iter().filter(|to| *to != from) {
                for p in &self.planes {
                    flys.push(GroundAction::new(
                        "Fly",
                        &[p.as_str(), from.as_str(), to.as_str()],
                        (vec![at(p, from)], vec![]),
                        (vec![at(p, to)], vec![at(p, from)]),
                    ));
                }
            }
        }

        loads.into_iter().chain(unloads).chain(flys).collect()
    }

    pub fn problem(&self, name: &str, pos: Vec<Fluent>, goal: Vec<Literal>) -> Problem {
        let neg = self
            .fluents()
            .into_iter()
            .filter(|fluent| !pos.contains(fluent))
            .collect();
        Problem::new(name, FluentState::new(pos, neg), goal, self.actions())
    }
}

pub fn air_cargo_p1() -> Problem {
    let domain = AirCargo::new(&["C1", "C2"], &["P1", "P2"], &["JFK", "SFO"]);
    let pos = vec![
        at("C1", "SFO"),
        at("C2", "JFK"),
        at("P1", "SFO"),
        at("P2", "JFK"),
    ];
    let goal = vec![
        Literal::pos(at("C1", "JFK")),
        Literal::pos(at("C2", "SFO")),
    ];
    domain.problem("air_cargo_p1", pos, goal)
}

pub fn air_cargo_p2() -> Problem {
    let domain = AirCargo::new(&["C1", "C2", "C3"], &["P1", "P2", "P3"], &["JFK", "SFO", "SYD"]);
    let pos = vec![
        at("C1", "SYD"),
        at("C2", "JFK"),
        at("C3", "SFO"),
        at("P1", "SYD"),
        at("P2", "JFK"),
        at("P3", "SFO"),
    ];
    let goal = vec![
        Literal::pos(at("C1", "JFK")),
        Literal::pos(at("C2", "SFO")),
        Literal::pos(at("C3", "SYD")),
    ];
    domain.problem("air_cargo_p2", pos, goal)
}

pub fn air_cargo_p3() -> Problem {
    let domain = AirCargo::new(
        &["C1", "C2", "C3", "C4"],
        &["P1", "P2"],
        &["JFK", "SFO", "SYD", "PER"],
    );
    let pos = vec![
        at("C1", "SFO"),
        at("C2", "JFK"),
        at("C3", "SYD"),
        at("C4", "PER"),
        at("P1", "SFO"),
        at("P2", "JFK"),
    ];
    let goal = vec![
        Literal::pos(at("C1", "JFK")),
        Literal::pos(at("C2", "SFO")),
        Literal::pos(at("C3", "JFK")),
        Literal::pos(at("C4", "SFO")),
    ];
    domain.problem("air_cargo_p3", pos, goal)
}
