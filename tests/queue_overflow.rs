use blipq::{BlockingQueue, PushError};

mod common;

#[test]
fn enforced_queue_accepts_one_past_max_len() {
    common::init_logging();
    const N: usize = 10;
    let q = BlockingQueue::new();
    q.set_max_len(N);

    let results: Vec<_> = (0..N + 2).map(|i| q.push(i)).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(accepted, N + 1);
    assert_eq!(q.size(), N + 1);
    assert!(matches!(results.last(), Some(Err(PushError::Full(v))) if *v == N + 1));
}

#[test]
fn default_capacity_is_two_hundred() {
    common::init_logging();
    let q = BlockingQueue::new();
    let accepted = (0..300u32).filter(|i| q.push(*i).is_ok()).count();
    assert_eq!(accepted, 201);
}

#[test]
fn disabled_enforcement_accepts_everything() {
    let q = BlockingQueue::new();
    q.set_max_len(1);
    q.disable_max_len();
    for i in 0..1_000 {
        q.push(i).unwrap();
    }
    assert_eq!(q.size(), 1_000);
}

#[test]
fn pops_come_out_in_push_order() {
    let q = BlockingQueue::new();
    q.push('a').unwrap();
    q.push('b').unwrap();
    q.push('c').unwrap();

    let drained: Vec<char> = (0..3).filter_map(|_| q.pop()).collect();
    assert_eq!(drained, vec!['a', 'b', 'c']);
}

#[test]
fn room_frees_up_after_pop() {
    let q = BlockingQueue::new();
    q.set_max_len(0);
    q.push(1).unwrap();
    assert!(q.push(2).is_err());
    assert_eq!(q.pop(), Some(1));
    q.push(3).unwrap();
    assert_eq!(q.peek_front(), Some(3));
}
