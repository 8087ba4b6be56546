//! Text provider adapters.

mod replay;

pub use replay::ReplayProvider;
