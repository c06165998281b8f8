//! Entity model and wire protocol shared by the employee roster client and
//! any server speaking the same resource contract.

pub mod domain;
pub mod error;
pub mod protocol;
