use super::*;

#[test]
fn defaults_validate() {
    ScrollworkConfig::default().validate().unwrap();
}

#[test]
fn partial_document_keeps_other_defaults() {
    let cfg = ScrollworkConfig::from_json_str(r#"{ "intro": { "fade_ms": 400 } }"#).unwrap();
    assert_eq!(cfg.intro.fade_ms, 400);
    assert_eq!(cfg.intro.reveal_ms, 1200);
    assert_eq!(cfg.intro.media_fallback_ms, 2500);
    assert_eq!(cfg.letters.fade_start, 440.0);
    assert_eq!(cfg.container.fade_start, 350.0);
}

#[test]
fn json_roundtrip_preserves_ease() {
    let cfg = ScrollworkConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    let de: ScrollworkConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(de.smoothing.ease, Ease::OutExpo);
    assert_eq!(de, cfg);
}

#[test]
fn validate_rejects_inverted_alphas() {
    let mut cfg = ScrollworkConfig::default();
    cfg.letters.faded_alpha = 0.9;
    cfg.letters.full_alpha = 0.5;
    assert!(matches!(cfg.validate(), Err(ScrollworkError::Config(_))));
}

#[test]
fn validate_rejects_zero_durations() {
    let mut cfg = ScrollworkConfig::default();
    cfg.intro.reveal_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = ScrollworkConfig::default();
    cfg.hero.shrink_distance = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_blank_tagline() {
    let mut cfg = ScrollworkConfig::default();
    cfg.tagline.text = "   ".to_owned();
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ScrollworkConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ScrollworkError::Serde(_)));
}

#[test]
fn ripple_defaults_follow_navbar_timing() {
    let r = RippleConfig::default();
    assert_eq!((r.letter_delay_ms, r.duration_ms), (100, 600));
    assert_eq!(r.lift_px, 4.0);
    assert_eq!(r.ease, Ease::InOutQuad);
}
