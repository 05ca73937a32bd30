//! Knowledge base for the training-sim decision engine.
//!
//! This crate holds the static reference data every decision is made against:
//!
//! - **Closed enumerations** ([`types`]) - stats, surfaces, distance classes,
//!   training phases, running styles, aptitude ranks, and status tags. Keys are
//!   enums rather than strings so an invalid key is unrepresentable.
//! - **Character profiles** ([`profile`]) - per-character growth multipliers,
//!   running style, and surface aptitude, plus the fixed style and aptitude
//!   bonus tables.
//! - **Effect weights** ([`weights`]) - the stat weight table by surface and
//!   race distance, phase-dependent skill-point/bond weights, status point
//!   values, and stat-combo multipliers.
//! - **Event database** ([`event`]) - the three event tiers (character-specific,
//!   common, support-card) mapping event names to choice lists, and the
//!   [`EffectRecord`] data model shared with the parser and scorer.
//! - **Loading** ([`load`]) - JSON deserialization for all of the above with
//!   construction-time validation.
//!
//! Everything here is loaded once at startup and never mutated afterwards, so
//! the tables are safe to share across concurrent callers without locking.

pub use self::{event::*, load::*, profile::*, types::*, weights::*};

pub mod event;
pub mod load;
pub mod profile;
pub mod types;
pub mod weights;
