mod air_cargo;
mod have_cake;

pub use air_cargo::{air_cargo_p1, air_cargo_p2, air_cargo_p3, AirCargo};
pub use have_cake::have_cake;

use crate::error::PlanError;
use crate::problem::Problem;

pub const BUILTIN_PROBLEMS: [&str; 4] = ["have_cake", "air_cargo_p1", "air_cargo_p2", "air_cargo_p3"];

pub fn builtin(name: &str) -> Result<Problem, PlanError> {
    match name {
        "have_cake" => Ok(have_cake()),
        "air_cargo_p1" => Ok(air_cargo_p1()),
        "air_cargo_p2" => Ok(air_cargo_p2()),
        "air_cargo_p3" => Ok(air_cargo_p3()),
        _ => Err(PlanError::UnknownProblem(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_problems() {
        for name in BUILTIN_PROBLEMS {
            let problem = builtin(name).unwrap();
            assert_eq!(problem.name, name);
            assert_eq!(problem.initial.len(), problem.state_map.len());
            assert_eq!(problem.validate(), Ok(()));
        }
        assert_eq!(
            builtin("blocks_world").unwrap_err(),
            PlanError::UnknownProblem("blocks_world".to_string())
        );
    }
}
