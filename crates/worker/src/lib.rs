#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Async primitives shared by the editor session.
//!
//! * [`CancellationScope`]: one-shot teardown flag checked by continuations
//! * [`join_both`]: fan-in over two fallible futures
//! * [`settle`] / [`settle_both`]: scope-aware completion of pending work
//! * [`spawn`]: traced task spawning on the current runtime

mod join;
mod spawn;
mod token;

pub use join::{Settled, join_both, settle, settle_both};
pub use spawn::spawn;
pub use token::CancellationScope;
