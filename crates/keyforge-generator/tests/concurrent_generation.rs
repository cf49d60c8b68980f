use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use jiff::{SignedDuration, Timestamp};
use keyforge_generator::{Generator, IdGenerator};
use keyforge_snowflake::{Clock, ManualClock, Snowflake, SnowflakeId, SnowflakeSettings};

const THREADS: usize = 8;
const CALLS: usize = 1_000;

fn assert_distinct(ids: &[String]) {
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids generated");
}

#[test]
fn threads_sharing_one_generator_never_collide() {
    let generator = Arc::new(IdGenerator::new(1, 1, None).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..CALLS / THREADS)
                    .map(|_| generator.generate_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(ids.len(), CALLS);
    assert_distinct(&ids);
}

#[test]
fn each_thread_observes_increasing_ids() {
    let generator = Arc::new(IdGenerator::new(2, 5, None).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let mut previous = generator.next_id().unwrap();
                for _ in 0..CALLS {
                    let id = generator.next_id().unwrap();
                    assert!(id > previous, "{id:?} not after {previous:?}");
                    previous = id;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tasks_sharing_one_generator_never_collide() {
    let generator = Arc::new(IdGenerator::new(3, 7, None).unwrap());

    let tasks: Vec<_> = (0..CALLS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move { generator.generate_id().unwrap() })
        })
        .collect();

    let mut ids = Vec::with_capacity(CALLS);
    for task in tasks {
        ids.push(task.await.unwrap());
    }

    assert_distinct(&ids);
}

#[test]
fn frozen_clock_under_contention_exhausts_and_rolls_over() {
    let start = Timestamp::from_millisecond(1_700_000_000_000).unwrap();
    let clock = ManualClock::new(start);
    let settings = SnowflakeSettings::builder()
        .datacenter_id(9)
        .worker_id(9)
        .build();
    let generator = Arc::new(Snowflake::with_clock(settings, clock.clone()).unwrap());

    // 8 * 1_000 ids from a clock that only moves when the sequence wraps.
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..CALLS)
                    .map(|_| generator.generate().unwrap())
                    .collect::<Vec<SnowflakeId>>()
            })
        })
        .collect();

    let mut ids: Vec<SnowflakeId> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), THREADS * CALLS);

    // 8_000 ids need two full 4_096-id milliseconds.
    assert_eq!(clock.now(), start + SignedDuration::from_millis(1));
    let first_ms = ids[0].timestamp();
    assert_eq!(
        ids.iter().filter(|id| id.timestamp() == first_ms).count(),
        4_096
    );
}

#[test]
fn distinct_identities_never_collide() {
    let clock = ManualClock::new(Timestamp::from_millisecond(1_700_000_000_000).unwrap());
    let generators: Vec<_> = [(0, 0), (0, 1), (1, 0), (31, 31)]
        .into_iter()
        .map(|(datacenter_id, worker_id)| {
            IdGenerator::with_clock(datacenter_id, worker_id, None, clock.clone()).unwrap()
        })
        .collect();

    let ids: Vec<String> = (0..500)
        .flat_map(|_| {
            generators
                .iter()
                .map(|generator| generator.generate_id().unwrap())
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(ids.len(), 2_000);
    assert_distinct(&ids);
}
