//! Integration test: construction, teardown and diagnostic events.
//!
//! Verifies exactly-once destruction across repeated construct/drop cycles
//! in both placements, and that the diagnostic events a subscriber sees
//! report the placement decision and addresses.

use std::thread;

use stowage_region::{GuardStatus, Storage, StorageError};
use stowage_test_utils::{DropCounter, EventCapture, EvenNumber, OddNumber, Tracked};

#[test]
fn repeated_cycles_drop_each_value_once() {
    let counter = DropCounter::new();
    for i in 0..1000 {
        let inline: Storage<Tracked, 4, 64> = Storage::new(counter.track(i));
        let owned: Storage<Tracked, 4, 0> = Storage::new(counter.track(i));
        assert!(inline.is_inline());
        assert!(owned.is_owned());
    }
    assert_eq!(counter.drops(), 2000);
}

#[test]
fn reassignment_cycles_drop_each_replaced_value_once() {
    let counter = DropCounter::new();
    {
        let mut s: Storage<Tracked, 8, 0> = Storage::new(counter.track(0));
        for i in 1..=100 {
            s.set(counter.track(i));
        }
        assert_eq!(s.id(), 100);
        assert_eq!(counter.drops(), 100);
    }
    assert_eq!(counter.drops(), 101);
}

#[test]
fn construction_failure_leaves_nothing_behind() {
    let counter = DropCounter::new();
    for _ in 0..100 {
        let result = Storage::<Tracked, 4, 0>::try_new_with(|| {
            drop(counter.track(0));
            Err(OddNumber(1))
        });
        assert_eq!(
            result.map(|_| ()),
            Err(StorageError::Construction(OddNumber(1)))
        );
    }
    assert_eq!(counter.drops(), 100);
}

#[test]
fn fallible_constructor_arguments() {
    let ok = Storage::<EvenNumber, 4, 4>::try_new_with(|| EvenNumber::new(36));
    assert_eq!(ok.map(|s| s.get().get()), Ok(36));

    let err = Storage::<EvenNumber, 4, 4>::try_new_with(|| EvenNumber::new(27));
    let err = err.map(|_| ()).unwrap_err();
    assert_eq!(err.to_string(), "value construction failed: 27 is odd");
}

#[test]
fn panicking_constructor_releases_frame() {
    let result = std::panic::catch_unwind(|| {
        Storage::<[u64; 16], 4, 0>::new_with(|| panic!("constructor panicked"))
    });
    assert!(result.is_err());
}

#[test]
fn containers_move_across_threads() {
    let s: Storage<Vec<u32>, 4, 0> = Storage::new(vec![1, 2, 3]);
    let handle = thread::spawn(move || {
        assert_eq!(s.guard_status(), GuardStatus::Intact);
        s.into_inner()
    });
    assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
}

#[test]
fn construction_and_release_are_observable() {
    let capture = EventCapture::new();
    {
        let _guard = capture.install();
        let inline: Storage<i32, 4, 4> = Storage::new(27);
        let owned: Storage<i32, 4, 1> = Storage::new(27);
        drop(inline);
        drop(owned);
    }

    let constructed = capture.with_message("constructed");
    assert_eq!(constructed.len(), 2);
    assert!(constructed.iter().all(|e| e.target == "stowage::storage"));
    assert_eq!(constructed[0].field("placement"), Some("inline"));
    assert_eq!(constructed[1].field("placement"), Some("owned"));
    assert_eq!(constructed[0].field("frame_size"), Some("12"));
    assert!(constructed[0].field("address").is_some());

    let released = capture.with_message("released");
    assert_eq!(released.len(), 2);
    assert_eq!(released[0].field("placement"), Some("inline"));
    assert_eq!(released[1].field("placement"), Some("owned"));
}

#[test]
fn owned_release_reports_the_constructed_address() {
    let capture = EventCapture::new();
    {
        let _guard = capture.install();
        drop(Storage::<u64, 8, 0>::new(1));
    }
    let constructed = capture.with_message("constructed");
    let released = capture.with_message("released");
    assert_eq!(
        constructed[0].field("address"),
        released[0].field("address")
    );
}
