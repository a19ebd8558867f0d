// tests/runtime_recording_sink.rs

use std::error::Error;

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use pmsim::controller::{
    ControlEvent, ControllerCore, ControllerOptions, RunState, Runtime, ViewUpdate,
};
use pmsim_test_utils::builders::demo_session;
use pmsim_test_utils::{init_tracing, with_timeout, RecordingSink};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn auto_run_ticks_until_limit() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(64);
    let sink = RecordingSink::new();
    let core = ControllerCore::new(
        demo_session(5, 21),
        ControllerOptions {
            default_speed: 10,
            exit_when_finished: true,
        },
    );

    tx.send(ControlEvent::Start { speed: None }).await?;
    let runtime = Runtime::new(core, rx, tx.clone(), sink.clone());

    let exit = timeout(Duration::from_secs(5), runtime.run()).await??;

    assert!(!exit.report_requested);
    assert_eq!(exit.final_frame.run_state, RunState::Finished);
    assert_eq!(exit.final_frame.snapshot.metrics.time_step, 5);
    assert!(exit.final_frame.report_unlocked);

    let frames = sink.frames();
    // Initial frame, start frame, then one per tick.
    assert_eq!(frames.len(), 1 + 1 + 5);
    assert_eq!(frames[0].run_state, RunState::Idle);

    let steps: Vec<u32> = frames.iter().map(|f| f.snapshot.metrics.time_step).collect();
    assert!(steps.windows(2).all(|w| w[0] <= w[1]));

    let logs = sink.log_messages();
    assert!(logs.iter().any(|m| m.starts_with("Agent Agent 1 -> Task Task 1")));
    assert_eq!(logs.last().map(String::as_str), Some("Simulation run completed."));
    Ok(())
}

#[tokio::test]
async fn pause_stops_ticks() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(64);
    let sink = RecordingSink::new();
    let core = ControllerCore::new(demo_session(200, 22), ControllerOptions::default());
    let runtime = Runtime::new(core, rx, tx.clone(), sink.clone());
    let handle = tokio::spawn(runtime.run());

    tx.send(ControlEvent::Start { speed: Some(10) }).await?;
    tokio::time::sleep(Duration::from_millis(350)).await;
    tx.send(ControlEvent::Pause).await?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let paused_at = sink
        .frames()
        .last()
        .map(|f| f.snapshot.metrics.time_step)
        .unwrap_or(0);

    tokio::time::sleep(Duration::from_millis(400)).await;
    tx.send(ControlEvent::Shutdown).await?;

    let exit = with_timeout(handle).await??;
    assert_eq!(exit.final_frame.run_state, RunState::Paused);
    assert!(paused_at >= 1);
    assert_eq!(exit.final_frame.snapshot.metrics.time_step, paused_at);
    Ok(())
}

#[tokio::test]
async fn report_request_ends_loop() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(64);
    let sink = RecordingSink::new();
    let core = ControllerCore::new(demo_session(1, 23), ControllerOptions::default());

    tx.send(ControlEvent::ViewReport).await?;
    tx.send(ControlEvent::Step).await?;
    tx.send(ControlEvent::ViewReport).await?;
    let runtime = Runtime::new(core, rx, tx.clone(), sink.clone());

    let exit = timeout(Duration::from_secs(5), runtime.run()).await??;

    assert!(exit.report_requested);
    assert_eq!(exit.final_frame.run_state, RunState::Finished);

    let warnings = sink
        .updates()
        .into_iter()
        .filter(|u| matches!(u, ViewUpdate::Log(e) if e.message.contains("report becomes available")))
        .count();
    assert_eq!(warnings, 1);
    Ok(())
}
