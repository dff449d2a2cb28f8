use crate::common::{FluentState, GroundAction, Literal};
use crate::problem::Problem;

pub fn have_cake() -> Problem {
    let eat = GroundAction::new(
        "Eat",
        &["Cake"],
        (vec!["Have(Cake)".into()], vec![]),
        (vec!["Eaten(Cake)".into()], vec!["Have(Cake)".into()]),
    );
    let bake = GroundAction::new(
        "Bake",
        &["Cake"],
        (vec![], vec!["Have(Cake)".into()]),
        (vec!["Have(Cake)".into()], vec![]),
    );

    let initial = FluentState::new(vec!["Have(Cake)".into()], vec!["Eaten(Cake)".into()]);
    let goal = vec![Literal::pos("Have(Cake)"), Literal::pos("Eaten(Cake)")];
    Problem::new("have_cake", initial, goal, vec![eat, bake])
}
