use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::geometry::tests::{assert_close, vertical_layout};
use crate::record::tests::{descriptor, record};
use crate::render::AnimationKind;
use crate::tonearm::{PointerEvent, PointerPhase};
use crate::{AudioSource, Point, Rect};

#[derive(Default)]
struct RecordingObserver {
    states: RefCell<Vec<(TonearmState, TonearmState)>>,
    buffering: RefCell<Vec<bool>>,
    errors: RefCell<Vec<String>>,
}

impl PhonographObserver for RecordingObserver {
    fn tonearm_state_will_change(&self, old: TonearmState, new: TonearmState) {
        self.states.borrow_mut().push((old, new));
    }

    fn is_assumed_buffering(&self, buffering: bool) {
        self.buffering.borrow_mut().push(buffering);
    }

    fn media_error(&self, error: &PhonographError) {
        self.errors.borrow_mut().push(error.to_string());
    }
}

fn phonograph_with(config: PhonographConfig) -> (Phonograph, SimulatedCollaborators) {
    let (mut phonograph, simulated) = Phonograph::simulated(config).unwrap();
    phonograph.layout_did_change(vertical_layout()).unwrap();
    phonograph.enqueue_record(record("satie")).unwrap();
    (phonograph, simulated)
}

fn phonograph() -> (Phonograph, SimulatedCollaborators) {
    phonograph_with(PhonographConfig::default())
}

fn points(phonograph: &mut Phonograph) -> ControlPoints {
    *phonograph.ensure_control_points().unwrap()
}

/// Completes every animation the surface is running, including the ones
/// their continuations start.
fn settle(phonograph: &mut Phonograph, simulated: &SimulatedCollaborators) {
    for _ in 0..10 {
        let finished = simulated.surface.finish_all();
        if finished.is_empty() {
            return;
        }
        for id in finished {
            phonograph.finish_animation(id).unwrap();
        }
    }
}

fn counter() -> (Rc<Cell<u32>>, Option<Completion>) {
    let calls = Rc::new(Cell::new(0));
    let handle = calls.clone();
    let completion: Completion = Box::new(move || handle.set(handle.get() + 1));
    (calls, Some(completion))
}

fn press_and_release(phonograph: &mut Phonograph, location: Point) {
    for phase in [PointerPhase::Began, PointerPhase::Changed, PointerPhase::Ended] {
        phonograph.handle_pointer(PointerEvent::new(phase, location));
    }
}

#[test]
fn rests_at_zero_until_asked_to_play() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);

    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_close(simulated.surface.state().tonearm_angle, points.tonearm_true_zero_angle);
    assert!(!simulated.frame_clock.is_running());
    assert_eq!(simulated.audio.state().loaded, Some(AudioSource::new("satie-a.mp3")));
    assert_eq!(simulated.surface.state().artwork_loads, 1);
}

#[test]
fn play_from_time_places_stylus_proportionally() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);

    phonograph.play(Some(472.5), false, None).unwrap();

    let halfway = points.vinyl_track_start_angle + points.vinyl_track_range() / 2.0;
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    assert_close(phonograph.tonearm_angle(), halfway);
    assert!(simulated.frame_clock.is_running());
    assert!(simulated.audio.is_playing());
    let offset = *simulated.audio.state().seeks.last().unwrap();
    assert!((offset - 472.5).abs() < 1e-6);
    assert!(simulated.noise.state().playing);
}

#[test]
fn animated_play_waits_for_the_sweep() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);
    let (calls, completion) = counter();

    phonograph.play(None, true, completion).unwrap();

    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_close(phonograph.tonearm_angle(), points.vinyl_track_start_angle);
    assert!(!simulated.surface.state().tonearm_enabled);
    assert_eq!(simulated.surface.pending_animations().len(), 1);
    assert_eq!(calls.get(), 0);

    phonograph.on_frame();
    assert_close(phonograph.tonearm_angle(), points.vinyl_track_start_angle);

    settle(&mut phonograph, &simulated);
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    assert!(simulated.surface.state().tonearm_enabled);
    assert!(!simulated.surface.state().flipper_enabled);
    assert_eq!(calls.get(), 1);
}

#[test]
fn seeking_while_playing_moves_the_audio() {
    let (mut phonograph, simulated) = phonograph();
    phonograph.play(Some(100.0), false, None).unwrap();

    phonograph.play(Some(600.0), false, None).unwrap();

    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    assert_eq!(simulated.audio.current_time(), 600.0);
}

#[test]
fn stop_is_idempotent() {
    let (mut phonograph, simulated) = phonograph();
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);

    phonograph.stop(false, None).unwrap();
    assert!(observer.states.borrow().is_empty());

    phonograph.play(Some(10.0), false, None).unwrap();
    phonograph.stop(false, None).unwrap();
    let clock_counts = {
        let clock = simulated.frame_clock.state();
        (clock.start_count, clock.stop_count)
    };
    let audio_counts = {
        let audio = simulated.audio.state();
        (audio.play_count, audio.pause_count)
    };
    phonograph.stop(false, None).unwrap();
    phonograph.stop(false, None).unwrap();

    let clock = simulated.frame_clock.state();
    assert_eq!((clock.start_count, clock.stop_count), clock_counts);
    let audio = simulated.audio.state();
    assert_eq!((audio.play_count, audio.pause_count), audio_counts);
    drop((clock, audio));

    assert_eq!(
        *observer.states.borrow(),
        vec![
            (TonearmState::OnRest, TonearmState::OnVinylTrack),
            (TonearmState::OnVinylTrack, TonearmState::OnRest),
        ]
    );
    assert!(!simulated.audio.is_playing());
    assert_eq!(simulated.audio.current_time(), 0.0);
    assert!(!simulated.frame_clock.is_running());
    assert!(!simulated.noise.state().playing);
}

#[test]
fn flipping_twice_restores_the_original_side() {
    let (mut phonograph, simulated) = phonograph();

    phonograph.flip(false, None).unwrap();
    assert_eq!(
        phonograph.current_record().unwrap().orientation(),
        Orientation::B
    );
    assert_eq!(simulated.audio.state().loaded, Some(AudioSource::new("satie-b.mp3")));

    phonograph.flip(false, None).unwrap();
    assert_eq!(
        phonograph.current_record().unwrap().orientation(),
        Orientation::A
    );
    assert_eq!(simulated.surface.state().artwork_loads, 3);
}

#[test]
fn flipping_while_playing_stops_first() {
    let (mut phonograph, simulated) = phonograph();
    let (calls, completion) = counter();
    phonograph.play(Some(30.0), false, None).unwrap();

    phonograph.flip(true, completion).unwrap();
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);

    settle(&mut phonograph, &simulated);

    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_eq!(
        phonograph.current_record().unwrap().orientation(),
        Orientation::B
    );
    assert_eq!(calls.get(), 1);
    let transform = phonograph.record_transform();
    assert_eq!(transform.flip, 0.0);
    assert_eq!(transform.scale, 1.0);
    assert!(simulated.surface.state().tonearm_enabled);
}

#[test]
fn stylus_clamps_to_each_boundary_and_returns_from_the_label() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);
    phonograph.play(Some(945.0), false, None).unwrap();

    phonograph.on_frame();
    assert_eq!(phonograph.state(), TonearmState::OnRunOutGroove);
    assert_eq!(phonograph.tonearm_angle(), points.vinyl_track_end_angle);
    assert!(!simulated.audio.is_playing());

    let mut frames = 0;
    while phonograph.state() == TonearmState::OnRunOutGroove && frames < 400 {
        phonograph.on_frame();
        frames += 1;
    }
    assert_eq!(phonograph.state(), TonearmState::OnCenterLabel);
    assert!(frames > 100);
    assert!(!simulated.frame_clock.is_running());

    let sweep = simulated.surface.state().animations[0].kind;
    assert_eq!(
        sweep,
        AnimationKind::Tonearm {
            from: points.run_out_groove_end_angle,
            to: points.tonearm_true_zero_angle,
        }
    );

    settle(&mut phonograph, &simulated);
    assert_eq!(phonograph.state(), TonearmState::OnRest);
}

#[test]
fn record_spins_at_the_style_rate() {
    let (mut phonograph, _simulated) = phonograph();
    phonograph.play(Some(0.0), false, None).unwrap();

    for _ in 0..60 {
        phonograph.on_frame();
    }

    let expected = Style::Lp.angle_per_frame(60.0) * 60.0;
    assert!((phonograph.record_transform().rotation - expected).abs() < 1e-9);
}

#[test]
fn stalled_audio_holds_the_stylus_and_flags_buffering() {
    let config = PhonographConfig {
        only_plays_static_noise_when_buffering: true,
        ..PhonographConfig::default()
    };
    let (mut phonograph, simulated) = phonograph_with(config);
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);
    phonograph.play(Some(0.0), false, None).unwrap();
    assert!(!simulated.noise.state().playing);

    simulated.audio.set_stalled(true);
    let held = phonograph.tonearm_angle();
    for _ in 0..3 {
        phonograph.on_frame();
    }
    assert_eq!(phonograph.tonearm_angle(), held);
    assert!(phonograph.is_assumed_buffering());
    assert_eq!(*observer.buffering.borrow(), vec![true]);
    assert!(simulated.noise.state().playing);
    assert_eq!(simulated.noise.state().play_count, 1);

    simulated.audio.set_stalled(false);
    phonograph.on_frame();
    assert!(phonograph.tonearm_angle() > held);
    assert_eq!(*observer.buffering.borrow(), vec![true, false]);
    assert!(!simulated.noise.state().playing);
}

#[test]
fn leaving_the_track_clears_buffering() {
    let (mut phonograph, simulated) = phonograph();
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);
    phonograph.play(Some(0.0), false, None).unwrap();
    simulated.audio.set_stalled(true);
    phonograph.on_frame();

    phonograph.stop(false, None).unwrap();

    assert!(!phonograph.is_assumed_buffering());
    assert_eq!(*observer.buffering.borrow(), vec![true, false]);
}

#[test]
fn releasing_the_tonearm_classifies_where_it_landed() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);
    let quarter = points.vinyl_track_start_angle + points.vinyl_track_range() / 4.0;

    phonograph.handle_pointer(PointerEvent::new(
        PointerPhase::Began,
        points.stylus_location(quarter),
    ));
    assert_eq!(phonograph.state(), TonearmState::UserHolding);
    assert!(simulated.frame_clock.is_running());

    phonograph.handle_pointer(PointerEvent::new(
        PointerPhase::Ended,
        points.stylus_location(quarter),
    ));
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    let touchdown = phonograph
        .control_points()
        .and_then(|points| points.tonearm_last_touchdown_angle)
        .unwrap();
    assert!((touchdown - quarter).abs() < 1e-9);
    let offset = *simulated.audio.state().seeks.last().unwrap();
    assert!((offset - 945.0 / 4.0).abs() < 1e-6);

    let right_of_pivot = Point::new(points.tonearm_anchor_point.x + 20.0, 100.0);
    press_and_release(&mut phonograph, right_of_pivot);
    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_eq!(phonograph.tonearm_angle(), points.tonearm_true_zero_angle);
}

#[test]
fn dragging_never_passes_the_record_center() {
    let (mut phonograph, _simulated) = phonograph();
    let points = points(&mut phonograph);

    phonograph.handle_pointer(PointerEvent::new(PointerPhase::Began, Point::new(0.0, 10.0)));

    assert_eq!(phonograph.tonearm_angle(), points.tonearm_true_center_angle);
    phonograph.handle_pointer(PointerEvent::new(PointerPhase::Cancelled, Point::new(0.0, 10.0)));
    assert_eq!(phonograph.state(), TonearmState::OnCenterLabel);
}

#[test]
fn lead_in_runs_from_touchdown_to_the_track() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);
    let middle = points.lead_in_groove_start_angle + points.lead_in_groove_range() / 2.0;

    press_and_release(&mut phonograph, points.stylus_location(middle));
    assert_eq!(phonograph.state(), TonearmState::OnLeadInGroove);
    assert!(simulated.noise.state().playing);

    for _ in 0..50 {
        phonograph.on_frame();
    }
    assert_eq!(phonograph.state(), TonearmState::OnLeadInGroove);
    for _ in 0..10 {
        phonograph.on_frame();
    }
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    assert_eq!(simulated.audio.state().seeks.last(), Some(&0.0));
}

#[test]
fn programmatic_play_forgets_an_old_touchdown() {
    let (mut phonograph, _simulated) = phonograph();
    let points = points(&mut phonograph);
    let late = points.run_out_groove_start_angle + points.run_out_groove_range() * 0.9;
    press_and_release(&mut phonograph, points.stylus_location(late));
    assert_eq!(phonograph.state(), TonearmState::OnRunOutGroove);

    phonograph.stop(false, None).unwrap();
    phonograph.play(Some(945.0), false, None).unwrap();
    assert_eq!(
        phonograph.control_points().unwrap().tonearm_last_touchdown_angle,
        None
    );

    phonograph.on_frame();
    assert_eq!(phonograph.state(), TonearmState::OnRunOutGroove);
    let mut frames = 0;
    while phonograph.state() == TonearmState::OnRunOutGroove && frames < 400 {
        phonograph.on_frame();
        frames += 1;
    }
    assert!(frames > 100, "run-out took {frames} frames");
}

#[test]
fn pointer_is_ignored_while_the_tonearm_sweeps() {
    let (mut phonograph, _simulated) = phonograph();
    let points = points(&mut phonograph);
    phonograph.play(None, true, None).unwrap();

    press_and_release(&mut phonograph, Point::new(0.0, 10.0));

    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_close(phonograph.tonearm_angle(), points.vinyl_track_start_angle);
}

#[test]
fn enqueued_records_wait_behind_the_current_one() {
    let (mut phonograph, simulated) = phonograph();

    phonograph.enqueue_record(record("gymnopedies")).unwrap();

    assert_eq!(phonograph.queue().len(), 2);
    assert_eq!(phonograph.current_record().unwrap().name(), "satie");
    assert_eq!(simulated.audio.state().load_count, 1);

    let (calls, completion) = counter();
    phonograph.next(false, completion).unwrap();
    assert_eq!(phonograph.current_record().unwrap().name(), "gymnopedies");
    assert_eq!(
        simulated.audio.state().loaded,
        Some(AudioSource::new("gymnopedies-a.mp3"))
    );
    assert_eq!(phonograph.record_transform().rotation, 0.0);
    assert_eq!(calls.get(), 1);

    let err = phonograph.next(false, None).unwrap_err();
    assert!(matches!(err, PhonographError::Configuration(_)));
}

#[test]
fn animated_next_fades_through_and_lands_at_zero_rotation() {
    let (mut phonograph, simulated) = phonograph();
    phonograph.enqueue_record(record("gymnopedies")).unwrap();
    phonograph.play(Some(0.0), false, None).unwrap();
    for _ in 0..7 {
        phonograph.on_frame();
    }
    let (calls, completion) = counter();

    phonograph.next(true, completion).unwrap();
    settle(&mut phonograph, &simulated);

    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_eq!(phonograph.current_record().unwrap().name(), "gymnopedies");
    assert_eq!(phonograph.record_transform(), RecordTransform::default());
    assert_eq!(calls.get(), 1);
}

#[test]
fn dequeuing_the_current_record_stops_playback() {
    let (mut phonograph, simulated) = phonograph();
    phonograph.enqueue_record(record("gymnopedies")).unwrap();
    phonograph.play(Some(5.0), false, None).unwrap();

    let err = phonograph.dequeue_record(5).unwrap_err();
    assert!(matches!(err, PhonographError::Configuration(_)));

    let removed = phonograph.dequeue_record(1).unwrap();
    assert_eq!(removed.name(), "satie");
    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_eq!(phonograph.queue().len(), 1);
    assert_eq!(
        simulated.audio.state().loaded,
        Some(AudioSource::new("gymnopedies-a.mp3"))
    );

    phonograph.dequeue_record(0).unwrap();
    assert!(phonograph.queue().is_empty());
    assert_eq!(simulated.surface.state().artwork, None);
}

#[test]
fn media_errors_reach_the_observer() {
    let (mut phonograph, simulated) = phonograph();
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);
    simulated.audio.fail_to_load(AudioSource::new("satie-b.mp3"));

    phonograph.flip(false, None).unwrap();
    assert_eq!(observer.errors.borrow().len(), 1);
    assert_eq!(phonograph.state(), TonearmState::OnRest);

    phonograph.flip(false, None).unwrap();
    phonograph.play(Some(20.0), false, None).unwrap();
    phonograph
        .handle_audio_decode_error(PhonographError::Media("corrupt frame".into()))
        .unwrap();
    assert_eq!(observer.errors.borrow().len(), 2);
    settle(&mut phonograph, &simulated);
    assert_eq!(phonograph.state(), TonearmState::OnRest);
}

#[test]
fn missing_audio_keeps_the_tonearm_at_rest() {
    let (mut phonograph, simulated) = Phonograph::simulated(PhonographConfig::default()).unwrap();
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);
    phonograph.layout_did_change(vertical_layout()).unwrap();
    simulated.audio.fail_to_load(AudioSource::new("satie-a.mp3"));
    phonograph.enqueue_record(record("satie")).unwrap();
    assert_eq!(observer.errors.borrow().len(), 1);

    let err = phonograph.play(Some(20.0), false, None).unwrap_err();
    assert!(matches!(err, PhonographError::Media(_)));
    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert!(!simulated.frame_clock.is_running());
    assert!(!phonograph.is_assumed_buffering());
    assert_eq!(observer.errors.borrow().len(), 2);

    let points = points(&mut phonograph);
    let quarter = points.vinyl_track_start_angle + points.vinyl_track_range() / 4.0;
    press_and_release(&mut phonograph, points.stylus_location(quarter));
    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert_eq!(phonograph.tonearm_angle(), points.tonearm_true_zero_angle);
    assert!(!simulated.frame_clock.is_running());
    assert_eq!(simulated.audio.state().play_count, 0);
    assert_eq!(observer.errors.borrow().len(), 3);
}

#[test]
fn dropped_observers_are_not_notified() {
    let (mut phonograph, _simulated) = phonograph();
    let observer = Rc::new(RecordingObserver::default());
    phonograph.set_observer(&observer);
    drop(observer);

    phonograph.play(Some(1.0), false, None).unwrap();
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
}

#[test]
fn detaching_stops_unless_configured_to_keep_playing() {
    let (mut phonograph, _simulated) = phonograph();
    phonograph.play(Some(1.0), false, None).unwrap();
    phonograph.host_did_detach().unwrap();
    assert_eq!(phonograph.state(), TonearmState::OnRest);

    phonograph.set_plays_when_not_active(true);
    phonograph.play(Some(1.0), false, None).unwrap();
    phonograph.host_did_detach().unwrap();
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
}

#[test]
fn reattaching_realigns_the_stylus_with_the_audio() {
    let (mut phonograph, simulated) = phonograph();
    let points = points(&mut phonograph);
    phonograph.set_plays_when_not_active(true);
    phonograph.play(Some(100.0), false, None).unwrap();
    phonograph.host_did_detach().unwrap();

    simulated.audio.advance(50.0);
    phonograph.host_did_attach().unwrap();

    assert_close(phonograph.tonearm_angle(), points.angle_for_time(150.0, 945.0));
}

#[test]
fn layout_changes_resolve_geometry_and_resync() {
    let (mut phonograph, simulated) = phonograph();
    phonograph.play(Some(100.0), false, None).unwrap();
    simulated.audio.advance(20.0);

    let mut layout = vertical_layout();
    layout.record_frame = Rect::square_around(layout.record_frame.center(), 360.0);
    phonograph.layout_did_change(layout).unwrap();

    let points = *phonograph.control_points().unwrap();
    assert_close(phonograph.tonearm_angle(), points.angle_for_time(120.0, 945.0));
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
}

#[test]
fn unsolvable_layouts_leave_playback_untouched() {
    let (mut phonograph, simulated) = phonograph();
    phonograph.play(Some(100.0), false, None).unwrap();
    let before = *phonograph.control_points().unwrap();

    let mut layout = vertical_layout();
    layout.tonearm.frame = Rect::new(395.0, 0.0, 10.0, 50.0);
    let err = phonograph.layout_did_change(layout).unwrap_err();

    assert!(matches!(err, PhonographError::Geometry(_)));
    assert_eq!(phonograph.state(), TonearmState::OnVinylTrack);
    assert_eq!(phonograph.control_points(), Some(&before));
    assert_eq!(phonograph.layout(), Some(&vertical_layout()));

    phonograph.stop(false, None).unwrap();
    assert_eq!(phonograph.state(), TonearmState::OnRest);
    assert!(!simulated.audio.is_playing());
    assert!(!simulated.frame_clock.is_running());
}

#[test]
fn unreachable_records_are_rejected_at_enqueue() {
    let (mut phonograph, _simulated) = Phonograph::simulated(PhonographConfig::default()).unwrap();
    let mut layout = vertical_layout();
    layout.tonearm.frame = Rect::new(395.0, 0.0, 10.0, 50.0);
    phonograph.layout_did_change(layout).unwrap();

    let err = phonograph.enqueue_record(record("satie")).unwrap_err();
    assert!(matches!(err, PhonographError::Geometry(_)));
    assert!(phonograph.queue().is_empty());
}

#[test]
fn extended_play_records_get_the_adapter_peg() {
    let (mut phonograph, simulated) = Phonograph::simulated(PhonographConfig::default()).unwrap();
    phonograph.layout_did_change(vertical_layout()).unwrap();
    let mut descriptor = descriptor("single");
    descriptor.style = Style::Ep;

    phonograph.enqueue_record(descriptor.try_into().unwrap()).unwrap();

    let (peg, hole) = simulated.surface.state().center_peg.unwrap();
    assert_eq!(peg, CenterPeg::FortyFiveAdapter);
    assert_close(hole, 40.0 * 0.2);
}

#[test]
fn reports_the_track_under_the_stylus() {
    let (mut phonograph, _simulated) = phonograph();
    phonograph.flip(false, None).unwrap();

    phonograph.play(Some(350.0), false, None).unwrap();

    assert_eq!(phonograph.current_track(), Some(1));
}

#[test]
fn setters_reach_the_collaborators() {
    let (mut phonograph, simulated) = phonograph();

    phonograph.set_static_noise_volume(2.0);
    phonograph.set_plays_in_background(false);

    assert_eq!(simulated.noise.state().volume, 1.0);
    assert_eq!(simulated.audio.state().plays_in_background, Some(false));
}

#[test]
fn zero_frame_rate_is_rejected_at_construction() {
    let config = PhonographConfig {
        frames_per_second: 0,
        ..PhonographConfig::default()
    };

    let err = Phonograph::simulated(config).unwrap_err();

    assert!(matches!(err, PhonographError::Configuration(_)));
}
