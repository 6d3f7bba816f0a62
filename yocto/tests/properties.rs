use proptest::prelude::*;
use yocto::{canonical_yocto, normalize_amount, to_human, trim_zeros, Precision};

#[test]
fn trims_zeros() {
    assert_eq!(trim_zeros("000.12"), ".12");
    assert_eq!(trim_zeros("0.32000"), ".32");
    assert_eq!(trim_zeros("1000"), "1000");
    assert_eq!(trim_zeros("0.0"), "0");
}

#[test]
fn normalizes_amounts() {
    assert_eq!(normalize_amount(".12").unwrap(), "120000000000000000000000");
    assert_eq!(normalize_amount("42").unwrap(), "42000000000000000000000000");
}

#[test]
fn converts_to_human() {
    assert_eq!(
        to_human("1000000000000000000000000", Precision::Full),
        "1.000000000000000000000000"
    );
    assert_eq!(to_human("1", Precision::Full), "0.000000000000000000000001");
    assert_eq!(to_human("0", Precision::Full), "0.000000000000000000000000");
    assert_eq!(
        to_human("12340000000000000000000000001", Precision::Full),
        "12340.000000000000000000000001"
    );
}

proptest! {
    #[test]
    fn trimming_is_idempotent(s in "[0-9]{0,8}(\\.[0-9]{0,8})?") {
        let once = trim_zeros(&s);
        prop_assert_eq!(trim_zeros(&once), once);
    }

    #[test]
    fn yocto_round_trips(y in "[0-9]{1,40}") {
        let human = to_human(&y, Precision::Full);
        let back = normalize_amount(&human).unwrap();
        prop_assert_eq!(canonical_yocto(&back), canonical_yocto(&y));
    }

    #[test]
    fn integer_part_has_no_padding_zeros(zeros in "0{0,10}", y in "[0-9]{1,40}") {
        let human = to_human(&format!("{zeros}{y}"), Precision::Full);
        let (int_part, _) = human.split_once('.').unwrap();
        prop_assert!(int_part == "0" || !int_part.starts_with('0'));
        prop_assert_eq!(human.clone(), to_human(&canonical_yocto(&y), Precision::Full));
    }

    #[test]
    fn normalized_length_is_integer_digits_plus_scale(
        int_part in "[0-9]{0,12}",
        frac in "[0-9]{0,24}",
    ) {
        let human = format!("{int_part}.{frac}");
        let trimmed = trim_zeros(&human);
        let int_digits = trimmed.split('.').next().unwrap_or("").len();
        let yocto = normalize_amount(&human).unwrap();
        prop_assert_eq!(yocto.len(), int_digits + 24);
        prop_assert!(yocto.chars().all(|c| c.is_ascii_digit()));
    }
}
