//! Compound engine: parallel construction of the distribution of a sum of
//! `n` i.i.d. draws.
//!
//! Each worker owns an independent, deterministically reseeded copy of the
//! base distribution and fills a partial histogram; partials merge
//! associatively, so the aggregate is reproducible for a fixed seed even
//! though worker interleaving is not ordered.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::compound::biased::BiasProposal;
use crate::compound::config::{CompoundConfig, Strategy};
use crate::compound::{biased, direct, fast};
use crate::core::error::{Result, TailError};
use crate::core::seed::{resolve_seed, worker_seed};
use crate::dist::{Distribution, EmpiricalDist};
use crate::hist::Histogram;

/// Construct the distribution of `Y = X₁ + … + X_n` for i.i.d. draws from
/// `base`, as a histogram-backed [`EmpiricalDist`].
///
/// The base may itself be an `EmpiricalDist` from a previous run, so
/// compounding composes recursively. With `cfg.seed == Some(s)` the
/// aggregate histogram is reproducible; with `None` a seed is derived from
/// the clock.
pub fn compound(base: &dyn Distribution, cfg: &CompoundConfig) -> Result<EmpiricalDist> {
    cfg.validate()?;
    let seed = resolve_seed(cfg.seed);
    let nf = cfg.n as f64;
    let center = nf * base.mean();
    let spread = nf * base.mad();
    debug!(
        n = cfg.n,
        strategy = %cfg.strategy,
        samples = cfg.samples,
        workers = cfg.workers,
        seed,
        "compounding distribution"
    );

    let hist = match cfg.strategy {
        Strategy::Direct => {
            let layout = exponential_layout(cfg, center, spread)?;
            run_workers(base, &layout, cfg, seed, |_, src, hist, quota| {
                direct::fill(src, hist, cfg.n, quota)
            })?
        }
        Strategy::Fast => {
            let layout = exponential_layout(cfg, center, spread)?;
            run_workers(base, &layout, cfg, seed, |_, src, hist, quota| {
                fast::fill(src, hist, cfg.n, quota)
            })?
        }
        Strategy::Biased => {
            let bias = cfg.bias.as_ref().ok_or_else(|| {
                TailError::invalid_config("biased strategy requires bias parameters")
            })?;
            let lo = center + bias.range_lo * spread;
            let hi = center + bias.range_hi * spread;
            let layout = Histogram::linear(lo, hi, bias.buckets)?;
            let reach = spread * bias.range_lo.abs().max(bias.range_hi.abs());
            let proposal = BiasProposal::resolve(bias, base.mean(), reach);
            run_workers(base, &layout, cfg, seed, move |w, src, hist, quota| {
                // Proposal draws come from a stream disjoint from every
                // worker's source seed.
                let mut rng = SmallRng::seed_from_u64(worker_seed(seed, cfg.workers + w));
                biased::fill(src, &mut rng, hist, cfg.n, &proposal, quota)
            })?
        }
    };

    info!(
        strategy = %cfg.strategy,
        total = hist.total(),
        mean = hist.mean(),
        "compound histogram built"
    );

    // Sliding-window outputs share n−1 terms between neighbors.
    let independent = cfg.strategy != Strategy::Fast;
    EmpiricalDist::new(hist, worker_seed(seed, 2 * cfg.workers + 1), independent)
}

fn exponential_layout(cfg: &CompoundConfig, center: f64, spread: f64) -> Result<Histogram> {
    Histogram::exponential(
        center,
        cfg.half_range_mads * spread,
        cfg.buckets_per_side,
        cfg.growth,
    )
}

/// Split the sample budget across workers, remainder to the first ones.
fn split_quota(samples: usize, workers: usize) -> Vec<usize> {
    let per = samples / workers;
    let rem = samples % workers;
    (0..workers)
        .map(|w| per + usize::from(w < rem))
        .collect()
}

/// Fan a sampling job out across workers, each with its own reseeded copy
/// of the base distribution and its own partial histogram, then merge.
fn run_workers<F>(
    base: &dyn Distribution,
    layout: &Histogram,
    cfg: &CompoundConfig,
    seed: u64,
    job: F,
) -> Result<Histogram>
where
    F: Fn(usize, &mut dyn Distribution, &mut Histogram, usize) + Send + Sync,
{
    let quotas = split_quota(cfg.samples, cfg.workers);

    // Sources are cloned and reseeded serially so the parallel phase never
    // touches shared random state.
    let sources: Vec<(usize, Box<dyn Distribution>, usize)> = quotas
        .into_iter()
        .enumerate()
        .map(|(w, quota)| {
            let mut src = base.clone_dist();
            src.reseed(worker_seed(seed, w));
            (w, src, quota)
        })
        .collect();

    let partials: Vec<Histogram> = sources
        .into_par_iter()
        .map(|(w, mut src, quota)| {
            let mut hist = layout.empty_like();
            job(w, src.as_mut(), &mut hist, quota);
            hist
        })
        .collect();

    let mut merged = layout.empty_like();
    for partial in &partials {
        merged.merge(partial)?;
    }
    Ok(merged)
}
