use std::sync::Arc;
use std::thread;

use sync::SpinLock;

#[test]
fn test_lock_guards_data() {
    let lock = SpinLock::new(0);
    {
        let mut guard = lock.lock();
        *guard += 1;
    }
    assert_eq!(*lock.lock(), 1);
}

#[test]
fn test_try_lock_while_held() {
    let lock = SpinLock::new(());
    let guard = lock.lock();
    assert!(lock.try_lock().is_none());
    drop(guard);
    assert!(lock.try_lock().is_some());
}

#[test]
fn test_mutual_exclusion_across_threads() {
    let counter = Arc::new(SpinLock::new(0usize));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let counter = counter.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..1000 {
                *counter.lock() += 1;
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*counter.lock(), 8 * 1000);
}
