//! Stowage walkthrough: placement, assignment, and smashing guards.
//!
//! Demonstrates:
//!   1. Inline and owned placement for the same value type
//!   2. In-place assignment
//!   3. Guarded containers reporting intact canaries
//!   4. An out-of-bounds write caught by the trailing guard
//!
//! Diagnostic events are printed through a `tracing-subscriber` formatter.
//! Run with:
//!   RUST_LOG=stowage=trace cargo run --example smash

use std::mem::size_of;

use stowage::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stowage=trace")),
        )
        .init();

    // ─── Placement ──────────────────────────────────────────────
    let mut inline_test: Storage<i32, 0, 4> = Storage::default();
    let mut owned_test: Storage<i32, 0, 1> = Storage::default();
    inline_test.set(27);
    owned_test.set(27);
    println!(
        "inline_test = {inline_test} ({}) | owned_test = {owned_test} ({})",
        inline_test.placement(),
        owned_test.placement(),
    );

    // ─── Guarded ────────────────────────────────────────────────
    let mut inline_guarded: Storage<i32, 4, 4> = Storage::default();
    let mut owned_guarded: Storage<i32, 4, 1> = Storage::default();
    inline_guarded.set(36);
    owned_guarded.set(36);
    println!(
        "inline_guarded = {inline_guarded} [{}] | owned_guarded = {owned_guarded} [{}]",
        inline_guarded.guard_status(),
        owned_guarded.guard_status(),
    );

    // ─── Smash ──────────────────────────────────────────────────
    smash_and_check("inline", &mut inline_guarded);
    smash_and_check("owned", &mut owned_guarded);
}

/// Write one byte just past the end of an `i32` container's value, then
/// verify its guards without aborting.
fn smash_and_check<const GUARD: usize, const THRESHOLD: usize>(
    name: &str,
    storage: &mut Storage<i32, GUARD, THRESHOLD>,
) {
    assert!(GUARD > 0, "smashing an unguarded container writes outside it");
    let end = storage.as_mut_ptr().cast::<u8>();
    // SAFETY: GUARD > 0, so the byte after the value is the first byte of
    // the trailing guard, inside the frame.
    unsafe { end.add(size_of::<i32>()).write(0) };

    match storage.check_guard_values(CorruptionPolicy::ReportOnly) {
        Ok(()) => println!("{name}: guards intact"),
        Err(err) => println!("{name}: {err}"),
    }
}
