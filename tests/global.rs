use std::hint::black_box;
use std::sync::{Arc, Mutex};

use zlog::memory_sink::MemorySink;
use zlog::record::keys;
use zlog::{Level, Policy, Value};

// The global facility is shared by every test in this binary.
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn install(policy: Policy) -> MemorySink {
    let sink = MemorySink::new();
    zlog::set_sink(Arc::new(sink.clone()));
    zlog::set_policy(policy);
    sink
}

#[inline(never)]
fn chain(depth: usize) {
    if depth == 0 {
        zlog::error().message("deep failure");
        return;
    }
    chain(depth - 1);
    black_box(depth);
}

#[test]
fn error_logger_with_auto_capture_from_deep_chain() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let sink = install(
        Policy::builder()
            .auto_source(Level::Error, true)
            .auto_callstack(Level::Error, true)
            .max_depth(Level::Error, 3)
            .build(),
    );

    chain(10);

    let record = sink.last().expect("record emitted");
    assert_eq!(record.level, Level::Error);
    match record.get(keys::SOURCE) {
        Some(Value::String(source)) => {
            assert!(source.starts_with("#chain @ "), "source was {}", source)
        }
        other => panic!("unexpected source {:?}", other),
    }
    match record.get(keys::CALLSTACK) {
        Some(Value::List(stack)) => {
            assert!(!stack.is_empty() && stack.len() <= 3, "stack was {:?}", stack);
            assert!(stack.iter().all(|frame| frame.starts_with("#chain @ ")));
        }
        other => panic!("unexpected callstack {:?}", other),
    }

    zlog::set_policy(Policy::default());
}

#[test]
fn default_policy_attaches_nothing_automatically() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let sink = install(Policy::default());

    zlog::error().message("plain error");
    zlog::warn().message("plain warn");
    zlog::debug().message("plain debug");
    zlog::info().message("plain info");

    let records = sink.take();
    let levels: Vec<Level> = records.iter().map(|r| r.level).collect();
    assert_eq!(levels, [Level::Error, Level::Warn, Level::Debug, Level::Info]);
    assert!(records.iter().all(|r| !r.has(keys::SOURCE) && !r.has(keys::CALLSTACK)));
}

#[test]
fn auto_configuration_persists_across_calls() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let sink = install(Policy::builder().auto_source(Level::Error, true).build());

    zlog::error().message("first error");
    zlog::at(Level::Error).message("second error");

    let records = sink.take();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.has(keys::SOURCE)));
    assert_eq!(zlog::policy().effective_max_depth(Level::Error), 10);

    zlog::set_policy(Policy::default());
}

#[test]
fn default_depths_apply_to_manual_call_stacks() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _sink = install(Policy::default());

    assert_eq!(zlog::debug().max_depth(), 20);
    assert_eq!(zlog::info().max_depth(), 5);
    assert_eq!(zlog::warn().max_depth(), 5);
    assert_eq!(zlog::error().max_depth(), 10);
}
