//! End-to-end: run the pipeline over in-memory channels and check output and status.

mod common;

use common::{sample, shown_bytes, status_frames, ClosedPipe, FailingReader, SharedBuf, SlowReader};
use pipemeter_core::transfer::Side;
use pipemeter_core::{run_pipeline, CancelToken, MeterConfig, TransferError};
use std::io::Cursor;
use std::time::Duration;

fn config(total: i64) -> MeterConfig {
    MeterConfig {
        total_size: total,
        refresh_interval: Duration::from_millis(10),
        bar_width: 10,
        quiet: false,
    }
}

#[tokio::test]
async fn copies_stream_and_ends_at_done() {
    let data = sample(300_000);
    let out = SharedBuf::default();
    let status = SharedBuf::default();

    let summary = run_pipeline(
        config(data.len() as i64),
        Cursor::new(data.clone()),
        out.clone(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.bytes, data.len() as u64);
    assert_eq!(out.bytes(), data);

    let final_line = summary.final_line.expect("final render");
    assert!(final_line.contains("100.0%"), "{}", final_line);
    assert!(final_line.ends_with("Done!"), "{}", final_line);
    assert!(!final_line.contains("ETA"));

    let text = status.text();
    assert!(text.ends_with('\n'));
    assert_eq!(text.matches('\n').count(), 1);
    let frames = status_frames(&text);
    assert_eq!(frames.last().unwrap(), &final_line);
}

#[tokio::test]
async fn empty_input_determinate_shows_zero_percent() {
    let out = SharedBuf::default();
    let status = SharedBuf::default();
    let summary = run_pipeline(
        config(100),
        Cursor::new(Vec::new()),
        out.clone(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.bytes, 0);
    assert!(out.bytes().is_empty());
    let line = summary.final_line.unwrap();
    assert!(line.contains("0.0%"), "{}", line);
    assert!(line.contains("0B of 100B"), "{}", line);
    assert!(status.text().ends_with('\n'));
}

#[tokio::test]
async fn empty_input_unknown_size_is_indeterminate() {
    let status = SharedBuf::default();
    let summary = run_pipeline(
        config(0),
        Cursor::new(Vec::new()),
        SharedBuf::default(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    let line = summary.final_line.unwrap();
    assert!(line.ends_with("0B @ 0B/s"), "{}", line);
    assert!(!line.contains('%'));
}

#[tokio::test]
async fn quiet_writes_nothing_to_status() {
    let data = sample(5_000);
    let out = SharedBuf::default();
    let status = SharedBuf::default();
    let cfg = MeterConfig {
        quiet: true,
        ..config(data.len() as i64)
    };

    let summary = run_pipeline(
        cfg,
        Cursor::new(data.clone()),
        out.clone(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(out.bytes(), data);
    assert!(summary.final_line.is_none());
    assert!(status.bytes().is_empty());
}

#[tokio::test]
async fn read_failure_is_reported_as_read_side() {
    let status = SharedBuf::default();
    let out = SharedBuf::default();
    let err = run_pipeline(
        config(1_000),
        FailingReader::after(sample(10)),
        out.clone(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.side(), Some(Side::Read));
    assert_eq!(out.bytes(), sample(10));
    // No final render, but the line is still terminated.
    let text = status.text();
    assert!(!text.contains("Done!"));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn write_failure_is_reported_as_write_side() {
    let err = run_pipeline(
        config(1_000),
        Cursor::new(sample(1_000)),
        ClosedPipe,
        SharedBuf::default(),
        CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TransferError::Write(_)));
    assert_eq!(err.side(), Some(Side::Write));
}

#[tokio::test]
async fn status_write_failure_is_not_fatal() {
    let data = sample(2_000);
    let out = SharedBuf::default();
    let summary = run_pipeline(
        config(data.len() as i64),
        SlowReader::new(data.clone(), 200, Duration::from_millis(5)),
        out.clone(),
        ClosedPipe,
        CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.bytes, data.len() as u64);
    assert_eq!(out.bytes(), data);
}

#[tokio::test]
async fn zero_refresh_interval_is_rejected_up_front() {
    let cfg = MeterConfig {
        refresh_interval: Duration::ZERO,
        ..config(10)
    };
    let out = SharedBuf::default();
    let err = run_pipeline(
        cfg,
        Cursor::new(sample(10)),
        out.clone(),
        SharedBuf::default(),
        CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TransferError::Config(_)));
    assert!(out.bytes().is_empty());
}

#[tokio::test]
async fn cancelled_transfer_stops_without_final_render() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let status = SharedBuf::default();
    let cfg = MeterConfig {
        refresh_interval: Duration::from_secs(3600),
        ..config(100)
    };
    let err = run_pipeline(
        cfg,
        Cursor::new(sample(100)),
        SharedBuf::default(),
        status.clone(),
        cancel,
    )
    .await
    .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(status.text(), "\n");
}

#[tokio::test]
async fn periodic_frames_never_exceed_final_total() {
    let data = sample(900);
    let status = SharedBuf::default();
    let summary = run_pipeline(
        config(data.len() as i64),
        SlowReader::new(data.clone(), 30, Duration::from_millis(3)),
        SharedBuf::default(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    let frames = status_frames(&status.text());
    assert!(frames.len() >= 2, "expected periodic frames, got {:?}", frames);
    let mut previous = 0;
    for frame in &frames {
        let shown = shown_bytes(frame);
        assert!(shown <= summary.bytes, "frame {:?} exceeds total", frame);
        assert!(shown >= previous, "counter went backwards in {:?}", frame);
        previous = shown;
    }
    assert_eq!(shown_bytes(frames.last().unwrap()), data.len() as u64);
}

#[tokio::test]
async fn no_status_writes_after_pipeline_returns() {
    let status = SharedBuf::default();
    run_pipeline(
        config(0),
        SlowReader::new(sample(500), 50, Duration::from_millis(4)),
        SharedBuf::default(),
        status.clone(),
        CancelToken::new(),
    )
    .await
    .unwrap();

    let at_return = status.bytes().len();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(status.bytes().len(), at_return);
}
