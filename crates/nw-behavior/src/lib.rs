//! `nw-behavior`: the enemy's decision state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`state`]   | `BehaviorState` (closed enum), `StateKind`, `StunState`          |
//! | [`config`]  | `BehaviorConfig`, `EnemyConfig`                                  |
//! | [`context`] | `DecisionContext<'a>`: per-tick borrowed world + shared trust    |
//! | [`event`]   | `BehaviorEvent`: transitions, evaluations, arbitration results   |
//! | [`enemy`]   | `Enemy<M>`, one agent with state, perception, hearing, evaluation|
//! | [`stun`]    | `StunRequest`, `StunOnHit` gate for thrown objects               |
//!
//! # Design notes
//!
//! States are a closed enum and every change goes through
//! [`Enemy::switch_state`], which runs the old state's exit before the new
//! state's enter.  `Stunned` carries its own payload (end time, knockback,
//! redirect) so no stun data outlives the state.
//!
//! The shared [`TrustModel`][nw_trust::TrustModel] is never owned by an
//! enemy.  The simulation lends it through [`DecisionContext`] for the
//! duration of one decision, and agents are processed one at a time, so
//! updates are ordered deterministically without locks.

pub mod config;
pub mod context;
pub mod enemy;
pub mod event;
pub mod state;
pub mod stun;


pub use config::{BehaviorConfig, EnemyConfig};
pub use context::DecisionContext;
pub use enemy::Enemy;
pub use event::BehaviorEvent;
pub use state::{BehaviorState, StateKind, StunState};
pub use stun::{ImpactHit, StunOnHit, StunOnHitConfig, StunRequest};
