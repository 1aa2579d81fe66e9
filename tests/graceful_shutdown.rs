use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use blipq::BlockingQueue;

mod common;

#[test]
fn disable_wakes_every_blocked_consumer() {
    common::init_logging();
    const CONSUMERS: usize = 8;
    let q: Arc<BlockingQueue<u64>> = Arc::new(BlockingQueue::new());
    let parked = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let q = Arc::clone(&q);
            let parked = Arc::clone(&parked);
            let tx = tx.clone();
            thread::spawn(move || {
                parked.fetch_add(1, Ordering::SeqCst);
                let got = q.pop();
                tx.send(got).unwrap();
            })
        })
        .collect();
    drop(tx);

    while parked.load(Ordering::SeqCst) < CONSUMERS {
        thread::yield_now();
    }
    thread::sleep(Duration::from_millis(50));
    assert!(rx.try_recv().is_err(), "a consumer returned before disable");

    assert!(q.disable_queue());

    for _ in 0..CONSUMERS {
        let got = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("consumer still blocked after disable");
        assert_eq!(got, None);
    }
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn blocked_consumer_receives_later_push() {
    let q: Arc<BlockingQueue<&'static str>> = Arc::new(BlockingQueue::new());
    let q2 = Arc::clone(&q);
    let handle = thread::spawn(move || q2.pop());

    thread::sleep(Duration::from_millis(50));
    assert!(!handle.is_finished());
    q.push("hello").unwrap();

    assert_eq!(handle.join().unwrap(), Some("hello"));
}

#[test]
fn push_after_disable_is_rejected_and_size_unchanged() {
    let q = BlockingQueue::new();
    q.push(1).unwrap();
    q.push(2).unwrap();
    q.disable_queue();

    let err = q.push(3).unwrap_err();
    assert!(err.is_disabled());
    assert_eq!(err.into_inner(), 3);
    assert_eq!(q.size(), 2);
}

#[test]
fn second_disable_is_a_no_op() {
    let q = BlockingQueue::new();
    q.push(1).unwrap();
    assert!(q.disable_queue());
    let before = (q.size(), q.is_enabled(), q.stats());
    assert!(!q.disable_queue());
    assert_eq!((q.size(), q.is_enabled(), q.stats()), before);
    assert_eq!(q.pop(), None);
}

#[test]
fn destroy_all_data_visits_each_element_once_in_order() {
    let visited = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&visited);
    let q = BlockingQueue::new().with_cleanup(move |v: String| sink.lock().unwrap().push(v));

    let items: Vec<String> = (0..25).map(|i| format!("item-{i}")).collect();
    for item in &items {
        q.push(item.clone()).unwrap();
    }

    q.disable_queue();
    assert_eq!(q.destroy_all_data(), items.len());
    assert!(q.is_empty());
    assert_eq!(*visited.lock().unwrap(), items);

    // nothing left for a second pass or for drop
    assert_eq!(q.destroy_all_data(), 0);
    drop(q);
    assert_eq!(visited.lock().unwrap().len(), items.len());
}

#[test]
fn dropping_last_handle_releases_owned_resources() {
    struct Resource(Arc<AtomicUsize>);

    let released = Arc::new(AtomicUsize::new(0));
    let q = Arc::new(BlockingQueue::new().with_cleanup(|r: Box<Resource>| {
        r.0.fetch_add(1, Ordering::SeqCst);
    }));
    for _ in 0..3 {
        q.push(Box::new(Resource(Arc::clone(&released)))).unwrap();
    }

    let other = Arc::clone(&q);
    drop(q);
    assert_eq!(released.load(Ordering::SeqCst), 0);
    drop(other);
    assert_eq!(released.load(Ordering::SeqCst), 3);
}
