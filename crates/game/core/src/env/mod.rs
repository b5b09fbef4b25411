//! Read-only inputs the engine consults while resolving a move.
//!
//! The [`Env`] aggregate bundles the game configuration with the RNG oracle so
//! the engine can access everything it needs without hard coupling to
//! concrete implementations.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::config::GameConfig;

/// Aggregates the configuration and oracles required by the engine.
pub struct Env<'a, R>
where
    R: RngOracle + ?Sized,
{
    config: &'a GameConfig,
    rng: &'a R,
}

pub type GameEnv<'a> = Env<'a, dyn RngOracle + 'a>;

impl<'a, R> Env<'a, R>
where
    R: RngOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, rng: &'a R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }
}

impl<'a, R> Env<'a, R>
where
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(self.config, rng)
    }
}

// Manual impls: derives would demand `R: Clone`, which trait objects never are.
impl<R> Clone for Env<'_, R>
where
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Env<'_, R> where R: RngOracle + ?Sized {}

impl<R> core::fmt::Debug for Env<'_, R>
where
    R: RngOracle + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
