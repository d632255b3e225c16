use super::*;

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(p10(&v), 2.0);
}

#[test]
fn test_quantiles_skip_nan() {
    let v = vec![f64::NAN, 0.5, f64::NAN, 0.25];
    assert_eq!(quantile_indexed(&v, 0.0), 0.25);
    assert_eq!(quantile_indexed(&v, 1.0), 0.5);
    assert!(median(&[f64::NAN]).is_nan());
    assert!(median(&[]).is_nan());
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.625), "0.625000");
    assert_eq!(format_f64_6(f64::NAN), "NaN");
}

#[test]
fn test_rdf_stats() {
    let stats = rdf_stats(&[1.0, 0.0, 0.5, f64::NAN], 3);
    assert_eq!(stats.n_pairs, 4);
    assert_eq!(stats.n_no_repeat, 3);
    assert_eq!(stats.n_undefined, 1);
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 1.0);
    assert_eq!(stats.median, 0.5);
}
