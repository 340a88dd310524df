use std::sync::Arc;
use std::thread;

use covflow::{AuxiliaryData, Consumer, CovarianceAccumulator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIM: usize = 4;

fn samples(seed: u64, n: usize) -> Vec<[f64; DIM]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let base: f64 = rng.gen_range(-5.0..5.0);
            // Correlated components so the off-diagonal terms are non-trivial.
            [base, base * 2.0 + rng.gen_range(-1.0..1.0), rng.gen_range(0.0..100.0), -base]
        })
        .collect()
}

fn sequential(samples: &[[f64; DIM]]) -> CovarianceAccumulator<f64> {
    let acc = CovarianceAccumulator::<f64>::new();
    for s in samples {
        acc.ingest(s).unwrap();
    }
    acc
}

fn assert_matches(actual: &CovarianceAccumulator<f64>, expected: &CovarianceAccumulator<f64>) {
    let (a, e) = (actual.summary(), expected.summary());
    assert_eq!(a.count, e.count);
    for i in 0..DIM {
        assert!((a.mean[i] - e.mean[i]).abs() < 1e-9 * e.mean[i].abs().max(1.0));
        for j in 0..DIM {
            let (x, y) = (a.covariance[(i, j)], e.covariance[(i, j)]);
            assert!((x - y).abs() < 1e-9 * y.abs().max(1.0), "({i}, {j}): {x} vs {y}");
        }
    }
}

#[test]
fn partitioned_producers_match_sequential() {
    let data = samples(42, 8_000);
    let acc = CovarianceAccumulator::<f64>::new();

    thread::scope(|s| {
        for chunk in data.chunks(1_000) {
            let acc = &acc;
            s.spawn(move || {
                for sample in chunk {
                    acc.consume(*sample, AuxiliaryData::new()).unwrap();
                }
            });
        }
    });

    assert_matches(&acc, &sequential(&data));
}

#[test]
fn channel_fan_out_matches_sequential() {
    let data = samples(7, 5_000);
    let acc = Arc::new(CovarianceAccumulator::<f64>::new());
    let (tx, rx) = crossbeam_channel::bounded::<([f64; DIM], AuxiliaryData)>(64);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let rx = rx.clone();
            let acc = Arc::clone(&acc);
            thread::spawn(move || {
                for (sample, aux) in rx {
                    acc.consume(sample, aux).unwrap();
                }
            })
        })
        .collect();
    drop(rx);

    for (k, sample) in data.iter().enumerate() {
        let mut aux = AuxiliaryData::new();
        aux.insert("index", k);
        tx.send((*sample, aux)).unwrap();
    }
    drop(tx);
    for w in workers {
        w.join().unwrap();
    }

    assert_matches(&acc, &sequential(&data));
}

#[test]
fn readers_never_see_torn_state() {
    let data = samples(3, 4_000);
    let total = data.len() as u64;
    let acc = CovarianceAccumulator::<f64>::new();

    thread::scope(|s| {
        for chunk in data.chunks(1_000) {
            let acc = &acc;
            s.spawn(move || {
                for sample in chunk {
                    acc.ingest(sample).unwrap();
                }
            });
        }

        for _ in 0..2 {
            let acc = &acc;
            s.spawn(move || {
                let mut last = 0;
                while last < total {
                    let summary = acc.summary();
                    assert!(summary.count >= last);
                    last = summary.count;
                    if summary.count == 0 {
                        assert!(summary.covariance.is_empty());
                        continue;
                    }
                    assert_eq!(summary.mean.len(), DIM);
                    assert_eq!(summary.covariance.dim(), DIM);
                    assert!(summary.covariance.is_symmetric());
                    assert!((0..DIM).all(|i| summary.covariance[(i, i)] >= 0.0));
                }
            });
        }
    });

    assert_eq!(acc.count(), total);
}

#[test]
fn mismatched_producer_does_not_disturb_others() {
    let data = samples(5, 2_000);
    let acc = CovarianceAccumulator::<f64>::new();
    acc.ingest(&data[0]).unwrap();
    let rest = &data[1..];

    thread::scope(|s| {
        let acc = &acc;
        s.spawn(move || {
            for sample in rest {
                acc.ingest(sample).unwrap();
            }
        });
        s.spawn(move || {
            for _ in 0..500 {
                assert!(acc.ingest(&[1.0, 2.0]).is_err());
            }
        });
    });

    assert_matches(&acc, &sequential(&data));
}
