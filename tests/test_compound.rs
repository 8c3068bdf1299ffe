//! Integration tests for the tailcast compound engine.

use tailcast::{
    compound, BiasConfig, CompoundConfig, CumulativeConfig, CumulativeStatistic, Distribution,
    Gaussian, Histogram, Strategy,
};

fn gaussian_base() -> Gaussian {
    Gaussian::new(1.0, 1.0, 0).unwrap()
}

fn config(strategy: Strategy, n: usize, samples: usize, seed: u64) -> CompoundConfig {
    CompoundConfig {
        n,
        strategy,
        samples,
        workers: 4,
        seed: Some(seed),
        bias: Some(BiasConfig::default()),
        ..Default::default()
    }
}

/// σ² of a Gaussian with MAD 1.
fn unit_mad_variance() -> f64 {
    std::f64::consts::PI / 2.0
}

#[test]
fn test_fast_strategy_scenario() {
    // Gaussian(mean 1, MAD 1), n = 10, fast strategy, seed 42.
    let d = compound(&gaussian_base(), &config(Strategy::Fast, 10, 10_000, 42)).unwrap();
    assert!((d.mean() - 10.0).abs() < 0.5, "mean {}", d.mean());
    // Sliding-window outputs are correlated and say so.
    assert!(!d.independent());
}

#[test]
fn test_direct_strategy_same_mean() {
    let d = compound(&gaussian_base(), &config(Strategy::Direct, 10, 2_000, 42)).unwrap();
    assert!((d.mean() - 10.0).abs() < 0.5, "mean {}", d.mean());
    assert!(d.independent());
}

#[test]
fn test_biased_strategy_mean_and_tail_coverage() {
    let cfg = config(Strategy::Biased, 10, 20_000, 42);
    let d = compound(&gaussian_base(), &cfg).unwrap();
    assert!((d.mean() - 10.0).abs() < 0.7, "mean {}", d.mean());

    // The importance sampler must reach the outermost buckets of the
    // configured [-4, 6] × n × MAD range, where a direct run of the same
    // budget leaves nothing.
    let h = d.histogram();
    let far_tail_weight: f64 = (1..h.num_buckets() - 1)
        .filter(|&i| h.x(i) > 50.0)
        .map(|i| h.count(i))
        .sum();
    assert!(far_tail_weight > 0.0, "no weight beyond 50");

    let direct = compound(&gaussian_base(), &config(Strategy::Direct, 10, 20_000, 42)).unwrap();
    let hd = direct.histogram();
    let direct_far: f64 = (1..hd.num_buckets() - 1)
        .filter(|&i| hd.x(i) > 50.0)
        .map(|i| hd.count(i))
        .sum();
    // A 10-fold Gaussian sum sits ~10 standard deviations below 50;
    // direct sampling cannot reach it at this budget.
    assert_eq!(direct_far, 0.0);
}

#[test]
fn test_n_one_matches_base() {
    for strategy in [Strategy::Direct, Strategy::Fast] {
        let d = compound(&gaussian_base(), &config(strategy, 1, 20_000, 7)).unwrap();
        assert!(
            (d.mean() - 1.0).abs() < 0.05,
            "{strategy}: mean {}",
            d.mean()
        );
        assert!(
            (d.variance() - unit_mad_variance()).abs() < 0.15,
            "{strategy}: variance {}",
            d.variance()
        );
    }
}

#[test]
fn test_variance_scales_with_n() {
    // Zero-mean base: compounded mean stays 0, variance grows as n × σ².
    let base = Gaussian::new(0.0, 1.0, 0).unwrap();
    let n = 4;
    let d = compound(&base, &config(Strategy::Direct, n, 40_000, 11)).unwrap();
    assert!(d.mean().abs() < 0.05, "mean {}", d.mean());
    let expected = n as f64 * unit_mad_variance();
    assert!(
        (d.variance() - expected).abs() < 0.1 * expected,
        "variance {} vs expected {expected}",
        d.variance()
    );
}

#[test]
fn test_fixed_seed_reproducible() {
    let a = compound(&gaussian_base(), &config(Strategy::Fast, 5, 10_000, 9)).unwrap();
    let b = compound(&gaussian_base(), &config(Strategy::Fast, 5, 10_000, 9)).unwrap();
    for i in 0..a.histogram().num_buckets() {
        assert_eq!(a.histogram().count(i), b.histogram().count(i));
    }
    let c = compound(&gaussian_base(), &config(Strategy::Fast, 5, 10_000, 10)).unwrap();
    assert!((1..a.histogram().num_buckets() - 1)
        .any(|i| a.histogram().count(i) != c.histogram().count(i)));
}

#[test]
fn test_compound_result_feeds_convergence_tracking() {
    // Resample a compounded distribution and watch the running mean
    // approach the compounded mean on a log checkpoint grid.
    let mut d = compound(&gaussian_base(), &config(Strategy::Direct, 10, 20_000, 3)).unwrap();

    let total = 2_000u64;
    let cfg = CumulativeConfig {
        total_samples: total,
        points: 12,
        percentiles: vec![25.0, 75.0],
        expected: Some(10.0),
        ..Default::default()
    };
    let layout = Histogram::linear(-30.0, 70.0, 200).unwrap();
    let mut cs = CumulativeStatistic::new(cfg, &layout).unwrap();
    for _ in 0..total {
        cs.add_to_average(d.sample());
    }

    assert!(cs.checkpoints().len() <= 12);
    assert_eq!(cs.expected(), Some(10.0));
    let last = cs.checkpoints().last().unwrap();
    assert_eq!(last.samples, total);
    assert!((last.value - 10.0).abs() < 0.5, "final mean {}", last.value);
    // Percentile band straddles the mean.
    assert!(last.percentiles[0] < last.value);
    assert!(last.percentiles[1] > last.value);
}

#[test]
fn test_unknown_strategy_is_hard_error() {
    assert!("quick".parse::<Strategy>().is_err());
}

#[test]
fn test_invalid_configs_rejected() {
    let base = gaussian_base();

    let mut cfg = config(Strategy::Direct, 10, 1000, 1);
    cfg.n = 0;
    assert!(compound(&base, &cfg).is_err());

    let mut cfg = config(Strategy::Direct, 10, 1000, 1);
    cfg.samples = 0;
    assert!(compound(&base, &cfg).is_err());

    let mut cfg = config(Strategy::Biased, 10, 1000, 1);
    cfg.bias = None;
    assert!(compound(&base, &cfg).is_err());
}
