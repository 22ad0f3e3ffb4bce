//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and wrap their results for the
//! outer layers. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod history;
