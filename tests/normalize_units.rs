use matprice::normalize::{UnitRules, normalize};

#[test]
fn ton_and_kg_agree_for_generic_material() {
    assert_eq!(
        normalize(1000.0, "ton", "generic-material"),
        normalize(1.0, "kg", "generic-material")
    );
}

#[test]
fn korean_ton_unit_is_divided_down() {
    // 3,000,000 KRW per 톤 of steel -> 3,000 KRW per kg
    assert_eq!(normalize(3_000_000.0, "톤", "steel-rebar"), 3000.0);
    assert_eq!(normalize(3_000_000.0, "원/톤", "steel-rebar"), 3000.0);
}

#[test]
fn unit_tokens_are_case_insensitive() {
    assert_eq!(normalize(2000.0, "TON", "copper"), 2.0);
    assert_eq!(normalize(2000.0, "USD/T", "copper"), 2.0);
    assert_eq!(normalize(2000.0, "kg", "copper"), 2000.0);
}

#[test]
fn bulk_resin_ids_are_divided_even_with_neutral_unit() {
    assert_eq!(normalize(1_200_000.0, "원", "HDPE"), 1200.0);
    assert_eq!(normalize(1_200_000.0, "", "pp-homo"), 1200.0);
}

#[test]
fn pinned_ids_keep_native_unit() {
    // PE-ROD matches the "PE" resin keyword and carries a ton unit, but is pinned
    assert_eq!(normalize(1_500_000.0, "원/톤", "PE-ROD"), 1_500_000.0);
    assert_eq!(normalize(1_500_000.0, "원/톤", "pe-rod"), 1_500_000.0);
}

#[test]
fn custom_rules_replace_the_defaults() {
    let rules = UnitRules {
        large_unit_tokens: vec!["mt".into()],
        bulk_keywords: vec![],
        pinned_ids: vec!["wire-rod".into()],
        divisor: 1000.0,
    };
    assert_eq!(rules.normalize(900_000.0, "USD/MT", "wire-rod"), 900_000.0);
    assert_eq!(rules.normalize(900_000.0, "USD/MT", "billet"), 900.0);
    // "ton" is no longer a large unit under these rules
    assert_eq!(rules.normalize(900_000.0, "ton", "billet"), 900_000.0);
    assert_eq!(rules.canonical_unit("USD/MT", "billet"), "USD/kg");
}

#[test]
fn nan_passes_through_for_later_coalescing() {
    assert!(normalize(f64::NAN, "ton", "steel").is_nan());
}

#[test]
fn normalization_is_deterministic() {
    let rules = UnitRules::default();
    let a = rules.normalize(12_345.0, "톤", "PVC");
    let b = rules.normalize(12_345.0, "톤", "PVC");
    assert_eq!(a.to_bits(), b.to_bits());
}
