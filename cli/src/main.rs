//! Terminal replay of the bundled demo call
//!
//! Wires a simulator to a manual clock and steps it to completion,
//! printing every event the engine publishes. The same engine drives
//! the dashboard panels; this binary is just the smallest consumer.

mod fixture;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use call_simulator_core_rs::{
    format_score, CallEvent, CallSimulator, Clock, EventKind, ManualClock, Phase, SentimentLabel,
    SentimentTrend, SimulatorConfig, TranscriptStore, TriggerCatalog,
};

use fixture::CallFixture;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CallFixture::demo()?;

    let clock = Rc::new(ManualClock::new());
    let mut sim = CallSimulator::new(
        fixture.call_session,
        TranscriptStore::new(fixture.transcript),
        fixture.metrics,
        TriggerCatalog::new(fixture.rta_cards),
        SimulatorConfig::default(),
        Rc::clone(&clock) as Rc<dyn Clock>,
    )?;

    println!(
        "{}: {} with {} ({})",
        sim.session().id,
        sim.session().sales_rep,
        sim.session().prospect,
        sim.session().company
    );
    println!();

    sim.bus_mut().subscribe_all(|event: &CallEvent| match event {
        CallEvent::CallStarted => println!("-- call started"),
        CallEvent::CallPaused => println!("-- call paused"),
        CallEvent::CallEnded => println!("-- call ended"),
        CallEvent::TranscriptUpdated(entry) => {
            println!("[{}] {}: {}", entry.timestamp, entry.speaker, entry.text);
        }
        CallEvent::SentimentChanged(score) => {
            println!(
                "    sentiment {} ({})",
                format_score(*score),
                SentimentLabel::from_score(*score).as_str()
            );
        }
        CallEvent::RtaCardTriggered(card) => {
            println!("  >> assist [{}]: {}", card.title, card.content);
        }
    });

    // Chart consumer: one point per emitted turn, last ten kept.
    let trend = Rc::new(RefCell::new(SentimentTrend::new()));
    let sink = Rc::clone(&trend);
    sim.bus_mut()
        .subscribe(EventKind::TranscriptUpdated, move |event| {
            if let CallEvent::TranscriptUpdated(entry) = event {
                sink.borrow_mut()
                    .record(entry.timestamp.clone(), entry.sentiment);
            }
        });

    sim.start();
    while sim.phase() == Phase::Running {
        clock.advance(Duration::from_millis(500));
        sim.poll();
    }

    println!();
    println!("duration display after replay: {}", sim.current_duration());
    println!(
        "overall sentiment: {} ({})",
        format_score(sim.current_sentiment()),
        SentimentLabel::from_score(sim.current_sentiment()).as_str()
    );
    println!("cards surfaced: {}", sim.state().active_triggers().len());
    println!();
    println!("sentiment trend (last {} turns):", trend.borrow().len());
    for point in trend.borrow().points() {
        println!("  {}  {}", point.label, format_score(point.score));
    }

    Ok(())
}
