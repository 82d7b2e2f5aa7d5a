//! Integration tests for KnnError variants.

use kvote_knn::{
    Classifier, Euclidean, KnnConfig, KnnError, Metric, MetricKind, Sample, SampleId, SamplePool,
    Tally, select_k_closest,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn one_sample_pool() -> SamplePool<Vec<f64>> {
    [Sample::new(SampleId(0), "a", vec![1.0])].into_iter().collect()
}

#[test]
fn error_invalid_k_on_construction() {
    let result = Classifier::<Vec<f64>, _>::new(0, Euclidean);
    assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
}

#[test]
fn error_invalid_k_on_reconfigure() {
    let mut clf = Classifier::<Vec<f64>, _>::new(4, Euclidean).unwrap();
    assert!(matches!(clf.set_k(0), Err(KnnError::InvalidK { k: 0 })));
    assert_eq!(clf.k(), 4);
}

#[test]
fn error_invalid_k_from_config() {
    let result = Classifier::<Vec<f64>, MetricKind>::from_config(&KnnConfig::new(0));
    assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
}

#[test]
fn error_invalid_k_on_select() {
    let pool = one_sample_pool();
    let result = select_k_closest(&pool, &vec![0.0], &Euclidean, 0);
    assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
}

#[test]
fn error_empty_pool_on_select() {
    let pool: SamplePool<Vec<f64>> = SamplePool::new();
    let result = select_k_closest(&pool, &vec![0.0], &Euclidean, 1);
    assert!(matches!(result, Err(KnnError::EmptyPool)));
}

#[test]
fn error_empty_pool_on_random_held_out() {
    let mut clf = Classifier::<Vec<f64>, _>::new(1, Euclidean).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(clf.pick_held_out(&mut rng), Err(KnnError::EmptyPool)));
    assert!(matches!(clf.self_test(&mut rng), Err(KnnError::EmptyPool)));
}

#[test]
fn error_empty_selection() {
    let tally = Tally::from_labels(Vec::<&str>::new());
    assert!(matches!(tally.winner(), Err(KnnError::EmptySelection)));
}

#[test]
fn error_held_out_not_found() {
    let mut clf = Classifier::new(1, Euclidean).unwrap();
    clf.add_samples(one_sample_pool().iter().cloned());
    assert!(matches!(
        clf.set_held_out(SampleId(5)),
        Err(KnnError::HeldOutNotFound { id: SampleId(5) })
    ));
}

#[test]
fn error_no_held_out() {
    let mut clf = Classifier::new(1, Euclidean).unwrap();
    clf.add_samples(one_sample_pool().iter().cloned());
    assert!(matches!(clf.classify_held_out(), Err(KnnError::NoHeldOut)));
}

struct Negative;

impl Metric<Vec<f64>> for Negative {
    fn distance(&self, _a: &Vec<f64>, _b: &Vec<f64>) -> f64 {
        -1.0
    }
}

#[test]
fn error_invalid_distance() {
    let mut clf = Classifier::new(1, Negative).unwrap();
    clf.add_samples(one_sample_pool().iter().cloned());
    let err = clf.classify(&vec![0.0]).unwrap_err();
    assert_eq!(
        err,
        KnnError::InvalidDistance {
            id: SampleId(0),
            distance: -1.0
        }
    );
}

#[test]
fn error_query_width_differs_from_pool() {
    let mut clf = Classifier::new(1, Euclidean).unwrap();
    clf.add_samples([
        Sample::new(SampleId(0), "near", vec![0.0, 100.0]),
        Sample::new(SampleId(1), "far", vec![1.0, 0.0]),
    ]);

    let err = clf.classify(&vec![0.0]).unwrap_err();
    assert_eq!(
        err,
        KnnError::DimensionMismatch {
            id: SampleId(0),
            expected: 1,
            found: 2
        }
    );
    assert!(matches!(
        clf.classify(&vec![]),
        Err(KnnError::DimensionMismatch { expected: 0, .. })
    ));
    assert_eq!(clf.classify(&vec![0.0, 90.0]).unwrap().label(), "near");
}

#[test]
fn error_ragged_pool_under_config_metric() {
    let mut clf = Classifier::<Vec<f64>, MetricKind>::from_config(&KnnConfig::new(3)).unwrap();
    clf.add_samples([
        Sample::new(SampleId(0), "a", vec![0.0, 0.0]),
        Sample::new(SampleId(1), "b", vec![1.0]),
    ]);
    assert!(matches!(
        clf.classify(&vec![0.0, 0.0]),
        Err(KnnError::DimensionMismatch {
            id: SampleId(1),
            expected: 2,
            found: 1
        })
    ));
}
