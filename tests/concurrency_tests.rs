//! Cross-thread tests for the blocking queue and the cycling machine.

use light_cycle::queue::{BlockingQueue, MessageSource, QueueError};
use light_cycle::{
    machine::wait_for, CycleConfig, CyclingMachineBuilder, CyclingStateMachine, LightPhase,
    MachineError,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn fast_config(seed: u64) -> CycleConfig {
    CycleConfig {
        tick_micros: 200,
        min_ticks: 20,
        max_ticks: 30,
        seed: Some(seed),
        history_limit: 256,
    }
}

#[test]
fn receive_on_empty_queue_waits_for_send() {
    let queue = Arc::new(BlockingQueue::new());
    let delay = Duration::from_millis(40);

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let start = Instant::now();
            let value = queue.receive();
            (value, start.elapsed())
        })
    };

    thread::sleep(delay);
    queue.send("go");

    let (value, waited) = consumer.join().unwrap();
    assert_eq!(value, Ok("go"));
    assert!(waited >= delay / 2, "receive returned after {waited:?}");
}

#[test]
fn concurrent_consumers_partition_all_values() {
    const VALUES: u64 = 10_000;
    const CONSUMERS: u64 = 4;

    let queue = Arc::new(BlockingQueue::new());

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                (0..VALUES / CONSUMERS)
                    .map(|_| queue.receive().unwrap())
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for value in 0..VALUES {
                queue.send(value);
            }
        })
    };

    producer.join().unwrap();
    let mut seen = HashSet::new();
    let mut total = 0;
    for consumer in consumers {
        let values = consumer.join().unwrap();
        // Each consumer sees its share in send order.
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        total += values.len();
        seen.extend(values);
    }

    assert_eq!(total as u64, VALUES);
    assert_eq!(seen.len() as u64, VALUES);
    assert!(queue.is_empty());
    assert_eq!(queue.stats(), (VALUES, VALUES));
}

#[test]
fn closing_releases_consumers_after_drain() {
    let queue = Arc::new(BlockingQueue::new());
    let received = Arc::new(Mutex::new(Vec::new()));

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let received = Arc::clone(&received);
            thread::spawn(move || {
                while let Ok(value) = queue.receive() {
                    received.lock().unwrap().push(value);
                }
            })
        })
        .collect();

    for value in 0..100 {
        queue.send(value);
    }
    queue.close();

    for consumer in consumers {
        consumer.join().unwrap();
    }

    let mut received = received.lock().unwrap().clone();
    received.sort_unstable();
    assert_eq!(received, (0..100).collect::<Vec<_>>());
}

#[test]
fn wait_for_consumes_scripted_sequence() {
    struct Scripted(Mutex<Vec<LightPhase>>);

    impl MessageSource<LightPhase> for Scripted {
        fn receive(&self) -> Result<LightPhase, QueueError> {
            let mut script = self.0.lock().unwrap();
            if script.is_empty() {
                Err(QueueError::Closed)
            } else {
                Ok(script.remove(0))
            }
        }
    }

    let source = Scripted(Mutex::new(vec![
        LightPhase::Red,
        LightPhase::Red,
        LightPhase::Green,
    ]));

    assert_eq!(wait_for(&source, &LightPhase::Green), Ok(2));
    assert!(source.0.lock().unwrap().is_empty());
}

#[test]
fn flip_intervals_stay_within_threshold_bounds() {
    let config = fast_config(2024);
    let (min_phase, _) = config.phase_bounds();
    let machine = CyclingStateMachine::new(LightPhase::Red, config).unwrap();
    machine.start().unwrap();

    for _ in 0..5 {
        machine.wait_for_state(LightPhase::Green).unwrap();
        machine.wait_for_state(LightPhase::Red).unwrap();
    }
    machine.stop().unwrap();

    let history = machine.history();
    assert!(history.len() >= 10);
    assert!(history.intervals().iter().all(|t| (20..=30).contains(t)));

    let flips: Vec<_> = history.transitions().collect();
    for pair in flips.windows(2) {
        let gap = pair[1]
            .timestamp
            .signed_duration_since(pair[0].timestamp)
            .to_std()
            .unwrap();
        assert!(gap >= min_phase, "phase lasted only {gap:?}");
    }
}

#[test]
fn published_states_strictly_alternate() {
    let machine = CyclingStateMachine::new(LightPhase::Green, fast_config(7)).unwrap();
    machine.start().unwrap();

    for _ in 0..4 {
        machine.wait_for_state(LightPhase::Green).unwrap();
    }
    machine.stop().unwrap();

    let history = machine.history();
    let path = history.get_path();
    assert_eq!(path[0], &LightPhase::Green);
    assert!(path.windows(2).all(|pair| pair[0] != pair[1]));
    for flip in history.transitions() {
        assert_ne!(flip.from, flip.to);
    }
}

#[test]
fn current_state_tracks_last_flip() {
    let machine = CyclingStateMachine::new(LightPhase::Red, fast_config(3)).unwrap();
    machine.start().unwrap();
    machine.wait_for_state(LightPhase::Green).unwrap();
    machine.stop().unwrap();

    let last = machine.history().last().map(|flip| flip.to);
    assert_eq!(last, Some(machine.current_state()));
}

#[test]
fn stop_releases_blocked_waiter() {
    let machine = Arc::new(
        CyclingMachineBuilder::new()
            .initial(LightPhase::Red)
            .tick(Duration::from_millis(1))
            .threshold_range(60_000, 60_000)
            .build()
            .unwrap(),
    );
    machine.start().unwrap();

    let waiter = {
        let machine = Arc::clone(&machine);
        thread::spawn(move || machine.wait_for_state(LightPhase::Green))
    };

    thread::sleep(Duration::from_millis(20));
    machine.stop().unwrap();

    assert!(matches!(waiter.join().unwrap(), Err(MachineError::Stopped)));
    assert!(machine.history().is_empty());
}

#[test]
fn several_waiters_on_one_target_all_return() {
    let machine = Arc::new(CyclingStateMachine::new(LightPhase::Red, fast_config(99)).unwrap());
    machine.start().unwrap();

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || machine.wait_for_state(LightPhase::Green))
        })
        .collect();

    for waiter in waiters {
        assert!(waiter.join().unwrap().is_ok());
    }
    machine.stop().unwrap();

    let greens = machine
        .history()
        .transitions()
        .filter(|flip| flip.to == LightPhase::Green)
        .count();
    assert!(greens >= 3);
}

#[test]
fn seeded_machines_share_a_schedule() {
    let run = || {
        let machine = CyclingStateMachine::new(LightPhase::Red, fast_config(5)).unwrap();
        machine.start().unwrap();
        for _ in 0..3 {
            machine.wait_for_state(LightPhase::Red).unwrap();
        }
        machine.stop().unwrap();
        machine.history().intervals()
    };

    let first = run();
    let second = run();
    let common = first.len().min(second.len());
    assert!(common >= 6);
    assert_eq!(first[..common], second[..common]);
}

fn slow_single_tick_machine() -> CyclingStateMachine<LightPhase> {
    CyclingMachineBuilder::new()
        .initial(LightPhase::Red)
        .tick(Duration::from_millis(300))
        .threshold_range(1, 1)
        .build()
        .unwrap()
}

#[test]
fn stop_during_sleep_publishes_nothing() {
    let machine = slow_single_tick_machine();
    machine.start().unwrap();

    thread::sleep(Duration::from_millis(50));
    machine.stop().unwrap();

    assert!(machine.history().is_empty());
    assert_eq!(machine.current_state(), LightPhase::Red);
    assert_eq!(machine.pending(), 0);
}

#[test]
fn concurrent_stops_both_wait_for_worker() {
    let machine = Arc::new(slow_single_tick_machine());
    machine.start().unwrap();

    let first = {
        let machine = Arc::clone(&machine);
        thread::spawn(move || machine.stop())
    };

    thread::sleep(Duration::from_millis(20));
    machine.stop().unwrap();
    assert!(!machine.is_running());
    assert!(machine.history().is_empty());

    thread::sleep(Duration::from_millis(500));
    assert!(machine.history().is_empty());
    assert!(first.join().unwrap().is_ok());
}
