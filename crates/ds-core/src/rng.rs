//! Deterministic random streams.
//!
//! # Determinism strategy
//!
//! Every component instance owns its own `StreamRng`, seeded from the run
//! seed, the owning agent and the component's slot in the pipeline:
//!
//!   seed = mix(mix(run_seed ^ agent) ^ slot)
//!
//! `mix` is the SplitMix64 finaliser, so neighbouring agents and slots land
//! far apart in seed space.  Because streams are never shared, the numbers a
//! component draws depend only on how often *it* was stepped, never on the
//! order other components ran in or on which thread ran it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::AgentId;

#[inline]
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// A seeded random stream owned by exactly one consumer.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Stream for the component in `slot` of `agent`'s pipeline.
    pub fn for_component(run_seed: u64, agent: AgentId, slot: usize) -> Self {
        let agent_seed = mix(run_seed ^ agent.0 as u64);
        StreamRng(SmallRng::seed_from_u64(mix(agent_seed ^ slot as u64)))
    }

    /// Stream for a simulation-level consumer identified by `label`.
    pub fn for_label(run_seed: u64, label: &str) -> Self {
        let folded = label
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3));
        StreamRng(SmallRng::seed_from_u64(mix(run_seed ^ folded)))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..high)
    }

    /// Gaussian sample.  A non-positive or non-finite `std_dev` yields `mean`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(&mut self.0),
            _ => mean,
        }
    }
}
