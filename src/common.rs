mod action;
mod literal;
mod state;

pub use action::GroundAction;
pub use literal::{Fluent, Literal};
pub use state::{decode_state, encode_state, FluentState};
