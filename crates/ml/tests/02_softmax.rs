use ml::{LinearModel, Replay, SoftmaxPolicy, UniformSource};

fn close(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn distribution_sums_to_one() {
    let cases: [&[f64]; 4] = [
        &[0.0, 0.0, 0.0, 0.0],
        &[1.0, 2.0, 3.0, 4.0],
        &[-50.0, 10.0, 0.5, 3.0],
        &[800.0, 799.0, -800.0, 0.0],
    ];
    for scores in cases {
        let p = SoftmaxPolicy::distribution(scores);
        let sum: f64 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "sum {sum} for {scores:?}");
        assert!(p.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn distribution_is_shift_invariant() {
    let scores = [0.3, -1.2, 2.0, 0.0];
    let base = SoftmaxPolicy::distribution(&scores);
    for c in [-100.0, -1.0, 0.5, 250.0] {
        let shifted: Vec<f64> = scores.iter().map(|s| s + c).collect();
        assert!(close(&base, &SoftmaxPolicy::distribution(&shifted)), "shift {c}");
    }
}

#[test]
fn matches_textbook_softmax() {
    let scores = [1.0f64, 2.0, 3.0];
    let exp: Vec<f64> = scores.iter().map(|s| s.exp()).collect();
    let sum: f64 = exp.iter().sum();
    let expected: Vec<f64> = exp.iter().map(|e| e / sum).collect();
    assert!(close(&SoftmaxPolicy::distribution(&scores), &expected));
}

#[test]
fn zero_weights_give_uniform_policy() {
    let model = LinearModel::zeros(4);
    for state in [[0.0, 0.0, 0.0, 0.5], [-5.0, 3.0, 9.0, 2.0]] {
        let p = SoftmaxPolicy::distribution(&model.score(&state).unwrap());
        assert!(close(&p, &[0.25; 4]));
    }
}

#[test]
fn sample_walks_cumulative_sum() {
    let p = [0.1, 0.2, 0.3, 0.4];
    assert_eq!(SoftmaxPolicy::sample(&p, 0.0), 0);
    assert_eq!(SoftmaxPolicy::sample(&p, 0.05), 0);
    assert_eq!(SoftmaxPolicy::sample(&p, 0.1), 1);
    assert_eq!(SoftmaxPolicy::sample(&p, 0.29), 1);
    assert_eq!(SoftmaxPolicy::sample(&p, 0.65), 3);
}

#[test]
fn sample_at_zero_picks_index_zero() {
    assert_eq!(SoftmaxPolicy::sample(&[0.25; 4], 0.0), 0);
    assert_eq!(SoftmaxPolicy::sample(&[1e-12, 0.5, 0.5, 0.0], 0.0), 0);
}

#[test]
fn sample_falls_back_to_last_index() {
    // Slightly short of one, as rounding can leave it.
    let p = [0.25, 0.25, 0.25, 0.249_999];
    assert_eq!(SoftmaxPolicy::sample(&p, 0.999_999_9), 3);
}

#[test]
fn sample_is_deterministic_for_a_fixed_stream() {
    let scores = [0.4, 0.1, -0.3, 0.2];
    let mut a = Replay::new(vec![0.12, 0.87, 0.5, 0.33]).unwrap();
    let mut b = Replay::new(vec![0.12, 0.87, 0.5, 0.33]).unwrap();
    let first: Vec<usize> = (0..8).map(|_| SoftmaxPolicy::act(&scores, &mut a)).collect();
    let second: Vec<usize> = (0..8).map(|_| SoftmaxPolicy::act(&scores, &mut b)).collect();
    assert_eq!(first, second);

    let mut r1 = fastrand::Rng::with_seed(3);
    let mut r2 = fastrand::Rng::with_seed(3);
    for _ in 0..16 {
        assert_eq!(r1.next_uniform(), r2.next_uniform());
    }
}
