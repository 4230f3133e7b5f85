use base_common::{to_text, try_to_text, AmountError};
use proptest::prelude::*;

#[test]
fn test_receipt_amounts() {
    assert_eq!(to_text(1005.3), "壹仟零伍元叁角");
    assert_eq!(to_text(3_650_000.0), "叁佰陆拾伍万元整");
    assert_eq!(to_text(80_000.08), "捌万元捌分");
    assert_eq!(to_text(100_000_001.0), "壹亿零壹元整");
}

#[test]
fn test_fraction_only_amounts() {
    assert_eq!(to_text(0.1), "壹角");
    assert_eq!(to_text(0.01), "壹分");
    assert_eq!(to_text(-0.5), "欠伍角");
}

#[test]
fn test_fractions_near_one_truncate() {
    assert_eq!(to_text(5.999999999), "伍元玖角玖分");
    assert_eq!(to_text(0.9999999999), "玖角玖分");
    assert_eq!(to_text(-19.999), "欠壹拾玖元玖角玖分");
}

#[test]
fn test_whole_amounts_beyond_u64_cents() {
    assert_eq!(to_text(2e17), "贰拾亿亿元整");
    assert_eq!(to_text(9_007_199_254_740_992.0), "玖仟零柒万亿壹仟玖佰玖拾贰亿伍仟肆佰柒拾肆万零玖佰玖拾贰元整");
}

#[test]
fn test_non_finite_is_rejected_by_checked_variant() {
    assert!(matches!(try_to_text(f64::NAN), Err(AmountError::NonFinite(_))));
    assert_eq!(
        try_to_text(f64::INFINITY),
        Err(AmountError::NonFinite(f64::INFINITY))
    );
    assert_eq!(try_to_text(12.5).unwrap(), "壹拾贰元伍角");
}

#[test]
fn test_non_finite_does_not_panic() {
    let _ = to_text(f64::NAN);
    let _ = to_text(f64::NEG_INFINITY);
}

proptest! {
    #[test]
    fn prop_negative_is_debt_marker_plus_positive(amount in 0.01f64..1e9) {
        prop_assert_eq!(to_text(-amount), format!("欠{}", to_text(amount)));
    }

    #[test]
    fn prop_whole_amounts_are_exact(amount in 1u64..(1u64 << 53)) {
        let text = to_text(amount as f64);
        prop_assert!(text.ends_with("元整"), "{} -> {}", amount, text);
        prop_assert!(!text.starts_with('零'), "{} -> {}", amount, text);
    }

    #[test]
    fn prop_zeros_never_repeat(amount in 1.0f64..1e15) {
        let text = to_text(amount);
        prop_assert!(!text.is_empty());
        prop_assert!(!text.contains("零零"), "{} -> {}", amount, text);
        prop_assert!(!text.contains("零元"), "{} -> {}", amount, text);
    }

    #[test]
    fn prop_sub_units_match_truncated_hundredths(whole in 0u64..1_000_000, cents in 0u64..100) {
        let amount = whole as f64 + cents as f64 / 100.0;
        let text = to_text(amount);
        let jiao = cents / 10;
        let fen = cents % 10;
        const DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];

        if cents == 0 {
            prop_assert!(text.ends_with('整'), "{} -> {}", amount, text);
        }
        if fen != 0 {
            prop_assert!(text.ends_with(&format!("{}分", DIGITS[fen as usize])), "{} -> {}", amount, text);
        }
        if jiao != 0 {
            prop_assert!(text.contains(&format!("{}角", DIGITS[jiao as usize])), "{} -> {}", amount, text);
        }
    }
}
