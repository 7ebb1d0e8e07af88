//! Integration tests for the call simulator state machine
//!
//! All tests drive a manual clock; a tick is a 3-second jump followed
//! by a poll.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use call_simulator_core_rs::{
    BaselineMetrics, CallEvent, CallSession, CallSimulator, Clock, EngagementStats, EventKind,
    EventLog, FillerWordStats, ManualClock, Phase, SentimentSummary, SimulatorConfig,
    SpeakerRole, SpeakingPace, TalkListenRatio, TranscriptEntry, TranscriptStore, TriggerCatalog,
    TriggerCategory, TriggerDefinition,
};

fn turn(id: u32, text: &str, sentiment: f64) -> TranscriptEntry {
    TranscriptEntry {
        id,
        speaker: if id % 2 == 1 { "John" } else { "Sarah" }.to_string(),
        text: text.to_string(),
        timestamp: format!("00:01:{:02}", 10 + id),
        sentiment,
        role: if id % 2 == 1 {
            SpeakerRole::Rep
        } else {
            SpeakerRole::Prospect
        },
        keywords: vec![],
        filler_words: 0,
    }
}

fn baseline(overall: f64) -> BaselineMetrics {
    BaselineMetrics {
        sentiment: SentimentSummary {
            overall,
            current: overall,
            trend: "positive".to_string(),
            history: vec![],
        },
        talk_listen_ratio: TalkListenRatio {
            rep: 58,
            prospect: 42,
            target: 43,
            status: "needs_improvement".to_string(),
        },
        speaking_pace: SpeakingPace {
            current: 152,
            average: 148,
            target: 150,
            status: "good".to_string(),
        },
        filler_words: FillerWordStats {
            count: 1,
            rate: 0.5,
            target: 2,
            status: "excellent".to_string(),
        },
        engagement: EngagementStats {
            score: 78,
            questions: 3,
            interruptions: 1,
        },
    }
}

fn session() -> CallSession {
    CallSession {
        id: "call_2025_001".to_string(),
        sales_rep: "John Davis".to_string(),
        prospect: "Sarah Chen".to_string(),
        company: "TechCorp Solutions".to_string(),
        start_time: "2025-09-27T12:14:00Z".to_string(),
        duration: "00:23:45".to_string(),
        status: "active".to_string(),
        call_type: "discovery".to_string(),
    }
}

fn budget_card() -> TriggerDefinition {
    TriggerDefinition {
        id: "budget".to_string(),
        trigger: "budget".to_string(),
        title: "Budget Objection Handler".to_string(),
        content: "ROI Calculator: Show 3x return in year 1.".to_string(),
        category: TriggerCategory::Objection,
    }
}

fn harness(
    entries: Vec<TranscriptEntry>,
    cards: Vec<TriggerDefinition>,
) -> (CallSimulator, Rc<ManualClock>, Rc<RefCell<EventLog>>) {
    let clock = Rc::new(ManualClock::new());
    let mut sim = CallSimulator::new(
        session(),
        TranscriptStore::new(entries),
        baseline(0.5),
        TriggerCatalog::new(cards),
        SimulatorConfig::default(),
        Rc::clone(&clock) as Rc<dyn Clock>,
    )
    .unwrap();
    let (_, log) = EventLog::attach(sim.bus_mut());
    (sim, clock, log)
}

/// Advance past one turn interval and deliver the firings.
fn tick(sim: &mut CallSimulator, clock: &ManualClock) {
    clock.advance(Duration::from_millis(3000));
    sim.poll();
}

#[test]
fn test_budget_turn_surfaces_card_after_one_tick() {
    let entries = vec![
        turn(1, "Thanks for taking the time today.", 0.5),
        turn(2, "Honestly, budget is tight this quarter.", 0.8),
    ];
    let (mut sim, clock, log) = harness(entries, vec![budget_card()]);

    assert!(sim.start());
    tick(&mut sim, &clock);

    assert_eq!(sim.state().displayed_entries().len(), 2);
    assert_eq!(sim.state().current_sentiment(), 0.8);
    assert_eq!(sim.state().active_triggers(), &["budget".to_string()]);
    assert_eq!(log.borrow().count_of(EventKind::RtaCardTriggered), 1);
}

#[test]
fn test_stop_before_first_tick_resets_playback() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2)];
    let (mut sim, _clock, log) = harness(entries, vec![]);

    assert!(sim.start());
    assert!(sim.stop());

    assert_eq!(sim.phase(), Phase::Ended);
    assert_eq!(sim.state().displayed_entries().len(), 1);
    assert_eq!(sim.state().cursor(), 0);
    assert!(sim.state().active_triggers().is_empty());
    assert!(sim.state().started_at().is_none());
    assert_eq!(log.borrow().count_of(EventKind::TranscriptUpdated), 0);
    assert_eq!(log.borrow().count_of(EventKind::CallEnded), 1);
}

#[test]
fn test_exhausted_transcript_ends_call_without_stop() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2), turn(3, "c", 0.3)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    tick(&mut sim, &clock);
    assert_eq!(sim.phase(), Phase::Running);
    tick(&mut sim, &clock);

    assert_eq!(sim.phase(), Phase::Ended);
    assert_eq!(log.borrow().count_of(EventKind::CallEnded), 1);
    // Completion freezes the finished call on screen.
    assert_eq!(sim.state().displayed_entries().len(), 3);
    assert!(sim.state().started_at().is_none());
}

#[test]
fn test_full_playback_in_order() {
    let entries: Vec<TranscriptEntry> = (1..=5)
        .map(|i| turn(i, &format!("turn {}", i), i as f64 / 10.0))
        .collect();
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    for _ in 0..4 {
        tick(&mut sim, &clock);
    }

    assert_eq!(sim.phase(), Phase::Ended);
    let displayed: Vec<u32> = sim.state().displayed_entries().iter().map(|e| e.id).collect();
    assert_eq!(displayed, vec![1, 2, 3, 4, 5]);

    let emitted: Vec<u32> = log
        .borrow()
        .events_of_kind(EventKind::TranscriptUpdated)
        .iter()
        .map(|e| match e {
            CallEvent::TranscriptUpdated(t) => t.id,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(emitted, vec![2, 3, 4, 5]);
    assert_eq!(
        log.borrow().count_of(EventKind::SentimentChanged),
        emitted.len()
    );
}

#[test]
fn test_start_is_idempotent_while_running() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2), turn(3, "c", 0.3)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    assert!(sim.start());
    assert!(!sim.start());

    assert_eq!(sim.state().cursor(), 1);
    assert_eq!(log.borrow().count_of(EventKind::CallStarted), 1);

    // One interval still yields exactly one turn: the second start did
    // not arm a second timer.
    tick(&mut sim, &clock);
    assert_eq!(sim.state().displayed_entries().len(), 2);
    assert_eq!(log.borrow().count_of(EventKind::TranscriptUpdated), 1);
}

#[test]
fn test_trigger_fires_once_per_call() {
    let entries = vec![
        turn(1, "intro", 0.5),
        turn(2, "budget is tight", -0.3),
        turn(3, "about that budget again", 0.2),
        turn(4, "budget budget budget", 0.1),
    ];
    let (mut sim, clock, log) = harness(entries, vec![budget_card()]);

    sim.start();
    for _ in 0..3 {
        tick(&mut sim, &clock);
    }

    assert_eq!(log.borrow().count_of(EventKind::RtaCardTriggered), 1);
    assert_eq!(sim.state().active_triggers(), &["budget".to_string()]);
}

#[test]
fn test_no_zombie_tick_after_pause() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    assert!(sim.pause());
    assert_eq!(sim.phase(), Phase::Paused);

    // Wait well past the turn interval: nothing may fire.
    clock.advance(Duration::from_secs(30));
    sim.poll();

    assert_eq!(log.borrow().count_of(EventKind::TranscriptUpdated), 0);
    assert_eq!(sim.state().displayed_entries().len(), 1);
    assert_eq!(sim.phase(), Phase::Paused);
}

#[test]
fn test_no_zombie_tick_after_stop() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    sim.stop();

    clock.advance(Duration::from_secs(30));
    sim.poll();

    assert_eq!(log.borrow().count_of(EventKind::TranscriptUpdated), 0);
    assert_eq!(sim.phase(), Phase::Ended);
}

#[test]
fn test_pause_outside_running_is_a_no_op() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2)];
    let (mut sim, _clock, log) = harness(entries, vec![]);

    assert!(!sim.pause());
    assert_eq!(sim.phase(), Phase::Idle);
    assert!(log.borrow().is_empty());

    sim.start();
    sim.stop();
    let events_after_stop = log.borrow().len();

    assert!(!sim.pause());
    assert_eq!(sim.phase(), Phase::Ended);
    assert_eq!(log.borrow().len(), events_after_stop);
}

#[test]
fn test_paused_call_cannot_be_restarted_directly() {
    let entries = vec![turn(1, "a", 0.1), turn(2, "b", 0.2)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    sim.pause();

    // Only stop exits Paused.
    assert!(!sim.start());
    assert_eq!(sim.phase(), Phase::Paused);
    assert_eq!(log.borrow().count_of(EventKind::CallStarted), 1);

    assert!(sim.stop());
    assert_eq!(sim.phase(), Phase::Ended);

    // A fresh start from Ended replays from the top.
    assert!(sim.start());
    tick(&mut sim, &clock);
    assert_eq!(sim.state().displayed_entries().len(), 2);
}

#[test]
fn test_restart_after_completion_resets_everything() {
    let entries = vec![
        turn(1, "intro", 0.5),
        turn(2, "budget is tight", -0.3),
    ];
    let (mut sim, clock, log) = harness(entries, vec![budget_card()]);

    sim.start();
    tick(&mut sim, &clock);
    assert_eq!(sim.phase(), Phase::Ended);
    assert_eq!(sim.state().active_triggers().len(), 1);

    assert!(sim.start());
    assert_eq!(sim.phase(), Phase::Running);
    assert_eq!(sim.state().cursor(), 1);
    assert_eq!(sim.state().displayed_entries().len(), 1);
    assert!(sim.state().active_triggers().is_empty());
    assert_eq!(log.borrow().count_of(EventKind::CallStarted), 2);

    // The card surfaces again in the new call.
    tick(&mut sim, &clock);
    assert_eq!(log.borrow().count_of(EventKind::RtaCardTriggered), 2);
}

#[test]
fn test_single_turn_transcript_completes_without_emission() {
    let entries = vec![turn(1, "only turn", 0.4)];
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    assert_eq!(sim.phase(), Phase::Running);
    tick(&mut sim, &clock);

    assert_eq!(sim.phase(), Phase::Ended);
    assert_eq!(log.borrow().count_of(EventKind::TranscriptUpdated), 0);
    assert_eq!(log.borrow().count_of(EventKind::CallEnded), 1);
    assert_eq!(sim.state().displayed_entries().len(), 1);
}

#[test]
fn test_elapsed_duration_tracks_wall_clock_while_running() {
    // Long enough that playback outlasts the clock jumps below.
    let entries: Vec<TranscriptEntry> = (1..=100)
        .map(|i| turn(i, &format!("turn {}", i), 0.1))
        .collect();
    let (mut sim, clock, _log) = harness(entries, vec![]);

    sim.start();
    assert_eq!(sim.state().elapsed_display(), "00:00");

    clock.advance(Duration::from_secs(5));
    sim.poll();
    assert_eq!(sim.state().elapsed_display(), "00:05");

    clock.advance(Duration::from_secs(60));
    sim.poll();
    assert_eq!(sim.state().elapsed_display(), "01:05");
}

#[test]
fn test_elapsed_duration_freezes_on_pause() {
    let entries: Vec<TranscriptEntry> = (1..=20)
        .map(|i| turn(i, &format!("turn {}", i), 0.1))
        .collect();
    let (mut sim, clock, _log) = harness(entries, vec![]);

    sim.start();
    clock.advance(Duration::from_secs(4));
    sim.poll();
    assert_eq!(sim.state().elapsed_display(), "00:04");

    sim.pause();
    clock.advance(Duration::from_secs(120));
    sim.poll();

    assert_eq!(sim.state().elapsed_display(), "00:04");
}

#[test]
fn test_fast_forward_replays_missed_turns_in_order() {
    let entries: Vec<TranscriptEntry> = (1..=4)
        .map(|i| turn(i, &format!("turn {}", i), 0.1))
        .collect();
    let (mut sim, clock, log) = harness(entries, vec![]);

    sim.start();
    // One big jump covers every remaining turn interval.
    clock.advance(Duration::from_secs(60));
    sim.poll();

    assert_eq!(sim.phase(), Phase::Ended);
    let emitted: Vec<u32> = log
        .borrow()
        .events_of_kind(EventKind::TranscriptUpdated)
        .iter()
        .map(|e| match e {
            CallEvent::TranscriptUpdated(t) => t.id,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(emitted, vec![2, 3, 4]);
    assert_eq!(log.borrow().count_of(EventKind::CallEnded), 1);
}
