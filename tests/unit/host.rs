use super::*;

#[test]
fn manual_source_tracks_listeners() {
    let mut src = ManualScrollSource::new(120.0);
    assert_eq!(src.position(), 120.0);

    let a = src.attach();
    let b = src.attach();
    assert_ne!(a, b);
    assert_eq!(src.attached_count(), 2);

    src.detach(a);
    src.detach(a);
    assert_eq!(src.attached_count(), 1);
    assert_eq!(src.attach_calls(), 2);

    src.set_position(5.0);
    assert_eq!(src.position(), 5.0);
}

#[test]
fn closures_measure_blocks() {
    let laid_out = || Some(64.0);
    let pending = || None::<f64>;
    assert_eq!(laid_out.block_height(), Some(64.0));
    assert_eq!(pending.block_height(), None);
}

#[test]
fn static_readiness_answers_both_questions() {
    let p = StaticReadiness {
        loaded: true,
        playable: false,
    };
    assert!(p.is_loaded());
    assert!(!p.has_playable_data());
}
