use crate::stats::Samples;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_empty() {
    let samples = Samples::new();
    assert_eq!(samples.samples(), 0);
    assert_eq!(samples.mean(), 0.0);
    assert_eq!(samples.min(), None);
    assert_eq!(samples.max(), None);
    assert_eq!(samples.stddev(), None);
    assert_eq!(samples.error(), None);
}

#[test]
fn test_single() {
    let mut samples = Samples::new();
    samples.sample(12.5);
    assert_eq!(samples.mean(), 12.5);
    assert_eq!(samples.min(), Some(12.5));
    assert_eq!(samples.max(), Some(12.5));
    assert_eq!(samples.error(), None);
}

#[test]
fn test_stats() {
    let mut samples = Samples::new();
    for score in [3.0, 1.0, 5.0, 2.0, 4.0].iter() {
        samples.sample(*score);
    }
    assert_eq!(samples.samples(), 5);
    assert!(approx(samples.mean(), 3.0));
    assert_eq!(samples.min(), Some(1.0));
    assert_eq!(samples.max(), Some(5.0));
    assert!(approx(samples.stddev().unwrap(), 1.581_139));
    // t(4) at 99.9% = 8.610
    assert!(approx(samples.error().unwrap(), 6.088_189));
    samples.pretty_print("test_stats ");
}

#[test]
fn test_error_large_sample() {
    let mut samples = Samples::new();
    for i in 0..1000 {
        samples.sample(if i % 2 == 0 { 9.0 } else { 11.0 });
    }
    let err = samples.error().unwrap();
    let expect = 3.291 * samples.stddev().unwrap() / (1000_f64).sqrt();
    assert!(approx(err, expect));
}

#[test]
fn test_merge() {
    let (mut a, mut b) = (Samples::new(), Samples::new());
    a.sample(1.0);
    a.sample(2.0);
    b.sample(6.0);
    a.merge(b);
    assert_eq!(a.scores(), &[1.0, 2.0, 6.0]);
    assert!(approx(a.mean(), 3.0));
}

#[test]
fn test_json() {
    let mut samples = Samples::new();
    samples.sample(2.0);
    samples.sample(4.0);
    let s = samples.json();
    assert!(s.starts_with("{ \"samples\": 2, \"mean\": 3,"), "{}", s);
    assert!(s.contains("\"min\": 2"), "{}", s);
    assert!(s.contains("\"scores\": [2, 4]"), "{}", s);

    let s = Samples::new().json();
    assert!(s.contains("\"error\": null"), "{}", s);
}
