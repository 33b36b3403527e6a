use super::*;

#[test]
fn phases_are_ordered_forward() {
    for pair in IntroPhase::ALL.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[0].index() + 1, pair[1].index());
    }
}

#[test]
fn caption_follows_phase() {
    assert_eq!(IntroPhase::Idle.caption(), CaptionTone::Hidden);
    assert_eq!(IntroPhase::FadingToBlack.caption(), CaptionTone::Black);
    assert_eq!(IntroPhase::RevealingMedia.caption(), CaptionTone::White);
    assert_eq!(IntroPhase::Complete.caption(), CaptionTone::White);
}

#[test]
fn only_the_animated_phases_lock_scroll() {
    let locked: Vec<_> = IntroPhase::ALL
        .into_iter()
        .filter(|p| p.locks_scroll())
        .collect();
    assert_eq!(
        locked,
        vec![IntroPhase::FadingToBlack, IntroPhase::RevealingMedia]
    );
}

#[test]
fn readiness_flips_once() {
    let mut f = ReadinessFlags::default();
    assert!(!f.all());
    assert!(f.mark_dom_ready());
    assert!(!f.mark_dom_ready());
    assert!(!f.all());
    assert!(f.mark_media_ready());
    assert!(!f.mark_media_ready());
    assert!(f.all());
}
