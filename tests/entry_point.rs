//! Runs without the libtest harness so the walk happens on the binary's own
//! `main` thread and can reach the real entry point.

use std::sync::Arc;

use zlog::memory_sink::MemorySink;
use zlog::record::keys;
use zlog::{Facility, Level, Policy, Value};

#[inline(never)]
fn handle(facility: &Facility) {
    std::hint::black_box(0);
    facility.error().message("walk to main");
}

#[inline(never)]
fn dispatch(facility: &Facility) {
    handle(facility);
    std::hint::black_box(1);
}

fn main() {
    if !cfg!(debug_assertions) {
        eprintln!("entry_point: skipped, needs debug info and un-inlined frames");
        return;
    }

    let sink = MemorySink::new();
    let policy = Policy::builder()
        .auto_callstack(Level::Error, true)
        .max_depth(Level::Error, 50)
        .build();
    let facility = Facility::new(Arc::new(sink.clone())).with_policy(policy);

    dispatch(&facility);

    let record = sink.last().expect("record emitted");
    let stack = match record.get(keys::CALLSTACK) {
        Some(Value::List(stack)) => stack.clone(),
        other => panic!("unexpected callstack {:?}", other),
    };
    assert!(stack.len() < 50, "walk ran to the depth bound: {:?}", stack);
    assert!(stack[0].starts_with("#handle @ "), "first frame was {}", stack[0]);
    let last = stack.last().expect("non-empty stack");
    assert!(last.starts_with("#main @ "), "last frame was {}", last);
    assert!(last.contains("entry_point.rs:"), "last frame was {}", last);
    assert_eq!(stack.iter().filter(|f| f.starts_with("#main @ ")).count(), 1);

    println!("entry_point: ok");
}
