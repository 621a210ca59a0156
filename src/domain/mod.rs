//! Domain layer - pure business logic with no I/O.

pub mod consultation;
pub mod foundation;
pub mod knowledge;
pub mod prompt;
