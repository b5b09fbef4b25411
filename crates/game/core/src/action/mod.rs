//! Move directions and the rules that resolve them.
//!
//! [`MoveEngine`] slides and merges tiles, [`SpawnPolicy`] places new tiles.
//! Both are pure with respect to anything but the board they are handed; the
//! [`crate::engine::GameEngine`] sequences them into a turn.
mod direction;
mod slide;
mod spawn;

pub use direction::{Direction, InvalidDirection};
pub use slide::{MoveEngine, SlideOutcome};
pub use spawn::{SpawnError, SpawnPolicy};
