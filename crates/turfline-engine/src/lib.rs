//! The decision engine for an automated training session.
//!
//! # How It Works
//!
//! Each turn the automation loop hands the engine two kinds of recognized
//! text: an event title and, per selectable option, a block of effect lines.
//! The engine turns those into a single 1-based choice index:
//!
//! 1. [`effect_parser`] classifies each effect line by keyword and extracts
//!    its numeric payload into an [`EffectRecord`](turfline_kb::EffectRecord).
//! 2. [`event_resolver`] maps the noisy event title to a canonical event in
//!    the three-tier database, trying exact then normalized matches per tier.
//! 3. [`scorer`] prices every choice's effects against the weight tables and
//!    the active character's profile, with an itemized breakdown available
//!    for diagnostics.
//! 4. [`decision`] picks the first strictly-best choice, falling back to
//!    choice 1 with a warning when the event is unknown.
//!
//! The engine holds no mutable state: every function takes the knowledge
//! base by reference and returns a value, so concurrent turns need no
//! coordination. Nothing in here is fatal — malformed lines are dropped,
//! unknown characters fall back to a neutral profile, and missing weight
//! entries degrade to unweighted contributions, each surfaced as a log line.

pub use self::{decision::*, effect_parser::*, event_resolver::*, scorer::*};

pub mod decision;
pub mod effect_parser;
pub mod event_resolver;
pub mod scorer;
