//! Rule mechanics evaluated against player state: choice gating,
//! psychological modes and ending policy.

mod conditions;
mod endings;
mod mode;

pub use conditions::*;
pub use endings::*;
pub use mode::*;
