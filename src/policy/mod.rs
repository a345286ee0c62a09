//! Policy configuration for reconcile runs.
//!
//! The `policy` module centralizes the knobs consumers tune before creating
//! a [`Reconciler`](crate::Reconciler): the desired dir/file modes and the
//! audit-line verbosity. Construct a [`Policy`](crate::policy::Policy) via
//! `Default` or [`Policy::with_modes`] and customize fields from there.
//!
//! Submodules:
//! - `config`: policy struct and presets
//! - `types`: grouped policy field types

pub mod config;
pub mod types;

pub use config::Policy;
