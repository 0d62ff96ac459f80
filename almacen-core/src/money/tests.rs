use super::*;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    assert_ne!(a + b, 0.3);

    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn test_round_half_up() {
    assert_eq!(to_f64(Decimal::new(2345, 3)), 2.35);
    assert_eq!(round_f64(2.346), 2.35);
    assert_eq!(round_f64(2.344), 2.34);
    assert_eq!(to_f64(Decimal::new(5, 3)), 0.01);
    assert_eq!(to_f64(Decimal::new(-5, 3)), -0.01);
}

#[test]
fn test_truncate_money() {
    assert_eq!(truncate_money(Decimal::new(33339, 3)), Decimal::new(3333, 2));
}

#[test]
fn test_non_finite_input() {
    assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    assert!(checked_decimal(f64::NAN).is_none());
    assert!(checked_decimal(f64::NEG_INFINITY).is_none());
    assert_eq!(checked_decimal(1.5), Some(Decimal::new(15, 1)));
}

#[test]
fn test_sum() {
    assert_eq!(to_f64(sum([10.1, 20.2, 30.3])), 60.6);
    assert_eq!(sum(Vec::<f64>::new()), Decimal::ZERO);
}

#[test]
fn test_money_eq() {
    assert!(money_eq(10.0, 10.0));
    assert!(money_eq(10.0, 10.005));
    assert!(!money_eq(10.0, 10.01));
    assert!(!money_eq(10.0, 9.98));
}
