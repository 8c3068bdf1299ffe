//! Biased compounding: importance sampling with a tail-heavy proposal.
//!
//! A compounded heavy-tailed distribution's interesting behavior lives
//! many MADs from the mean, where direct sampling would need astronomically
//! many draws to place even one observation. For heavy tails the extreme
//! sums are dominated by a single large component (one-big-jump), so it is
//! enough to bias *one* of the `n` components: draw it from a proposal that
//! over-samples the extremes, and record each observation with the density
//! ratio `p(x)/q(x)` as its weight. The weighted histogram self-normalizes,
//! recovering the true probabilities.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::compound::config::BiasConfig;
use crate::dist::Distribution;
use crate::hist::Histogram;

/// Fraction of first components drawn from the base itself rather than the
/// warped proposal. The mixture keeps the proposal density bounded away
/// from zero wherever the base has mass, which bounds the weights by
/// `1 / BASE_MIX`.
const BASE_MIX: f64 = 0.5;

/// Resolved bias transform: an invertible power-warped proposal for the
/// biased first component.
///
/// Sampling: `x = shift + scale · sign(v) · |v|^(1/power)` with
/// `v ~ U(−1, 1)`, support `[shift − scale, shift + scale]`. Closed-form
/// density: `q(x) = power/(2·scale) · (|x − shift|/scale)^(power−1)`.
/// For `power > 1` the density grows toward the interval edges, skewing
/// samples into the tails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BiasProposal {
    shift: f64,
    scale: f64,
    power: f64,
}

impl BiasProposal {
    /// Resolve the configured transform against a base distribution.
    ///
    /// `tail_reach` is how far (in absolute x units) a single biased
    /// component must be able to travel. The engine passes the outermost
    /// bucket offset, so every output bucket is reachable by one big jump.
    pub(crate) fn resolve(cfg: &BiasConfig, base_mean: f64, tail_reach: f64) -> Self {
        Self {
            shift: cfg.shift.unwrap_or(base_mean),
            scale: cfg.scale.unwrap_or(tail_reach),
            power: cfg.power,
        }
    }

    /// Draw from the warped proposal.
    fn warp_sample(&self, rng: &mut SmallRng) -> f64 {
        let v = 2.0 * rng.random::<f64>() - 1.0;
        self.shift + self.scale * v.signum() * v.abs().powf(1.0 / self.power)
    }

    /// Density of the warped proposal at `x`; zero outside its support.
    fn warp_density(&self, x: f64) -> f64 {
        let d = ((x - self.shift) / self.scale).abs();
        if d > 1.0 {
            return 0.0;
        }
        self.power / (2.0 * self.scale) * d.powf(self.power - 1.0)
    }
}

/// Fill `hist` with `quota` weighted observations of the `n`-fold sum.
///
/// The first component of each sum is drawn from the mixture
/// `BASE_MIX · base + (1 − BASE_MIX) · proposal` and the observation is
/// weighted by `base.prob(x₁) / q_mix(x₁)`; the remaining `n − 1`
/// components are ordinary draws.
pub(crate) fn fill(
    src: &mut dyn Distribution,
    rng: &mut SmallRng,
    hist: &mut Histogram,
    n: usize,
    proposal: &BiasProposal,
    quota: usize,
) {
    for _ in 0..quota {
        let x1 = if rng.random::<f64>() < BASE_MIX {
            src.sample()
        } else {
            proposal.warp_sample(rng)
        };
        let p = src.prob(x1);
        let q = BASE_MIX * p + (1.0 - BASE_MIX) * proposal.warp_density(x1);
        if !(q > 0.0) || !q.is_finite() {
            // Outside both supports; carries no information.
            continue;
        }
        let mut y = x1;
        for _ in 1..n {
            y += src.sample();
        }
        hist.add_weighted(y, p / q);
    }
}
