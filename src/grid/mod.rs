/// Per-resolution scene caps.
pub mod limits;
/// Deterministic contact-sheet layout search.
pub mod solver;
