use super::*;

#[test]
fn edge_key_normalization_trims_and_rejects_empty() {
    assert_eq!(
        EdgeKey::normalized(" a ", "b\t"),
        Some(EdgeKey::new("a", "b"))
    );
    assert_eq!(EdgeKey::normalized("a", "  "), None);
    assert_eq!(EdgeKey::normalized("", "b"), None);
}

#[test]
fn resolve_prefers_exact_orientation() {
    let visible: BTreeSet<EdgeKey> = [EdgeKey::new("a", "b"), EdgeKey::new("b", "a")]
        .into_iter()
        .collect();
    let hit = EdgeKey::new("b", "a").resolve_in(&visible).unwrap();
    assert_eq!(hit, &EdgeKey::new("b", "a"));
}

#[test]
fn resolve_falls_back_to_reversed_orientation() {
    let visible: BTreeSet<EdgeKey> = [EdgeKey::new("c", "d")].into_iter().collect();
    assert_eq!(
        EdgeKey::new("d", "c").resolve_in(&visible),
        Some(&EdgeKey::new("c", "d"))
    );
    assert_eq!(EdgeKey::new("x", "y").resolve_in(&visible), None);
}

#[test]
fn edge_key_serializes_as_pair() {
    let json = serde_json::to_string(&EdgeKey::new("a", "b")).unwrap();
    assert_eq!(json, r#"["a","b"]"#);
    let back: EdgeKey = serde_json::from_str(r#"["x","y"]"#).unwrap();
    assert_eq!(back, EdgeKey::new("x", "y"));
}

#[test]
fn hex_colors_parse_in_all_widths() {
    assert_eq!(Rgba8::parse_hex("#111").unwrap(), Rgba8::rgb(0x11, 0x11, 0x11));
    assert_eq!(
        Rgba8::parse_hex("c0392b").unwrap(),
        Rgba8::rgb(0xc0, 0x39, 0x2b)
    );
    assert_eq!(
        Rgba8::parse_hex("#4c6ef580").unwrap(),
        Rgba8::new(0x4c, 0x6e, 0xf5, 0x80)
    );
    assert!(Rgba8::parse_hex("#12").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
}

#[test]
fn severity_palette_defaults_to_signal_blue() {
    assert_eq!(Rgba8::for_severity("error"), Rgba8::rgb(0xc0, 0x39, 0x2b));
    assert_eq!(Rgba8::for_severity(" WARN "), Rgba8::rgb(0xd6, 0x89, 0x10));
    assert_eq!(Rgba8::for_severity("info"), Rgba8::SIGNAL);
}

#[test]
fn color_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgba8::SIGNAL).unwrap();
    assert_eq!(json, r##""#4c6ef5ff""##);
    let back: Rgba8 = serde_json::from_str(r##""#d68910""##).unwrap();
    assert_eq!(back, Rgba8::rgb(0xd6, 0x89, 0x10));
}
