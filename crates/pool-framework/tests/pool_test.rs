use pool_framework::{PoolActor, PoolClient, PoolEntity, PoolError};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
struct Track {
    name: String,
    busy: bool,
}

impl PoolEntity for Track {
    type Id = String;

    fn id(&self) -> &String {
        &self.name
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

fn tracks(n: usize) -> Vec<Track> {
    (1..=n)
        .map(|i| Track {
            name: format!("T{}", i),
            busy: false,
        })
        .collect()
}

fn start(n: usize) -> PoolClient<Track> {
    let (actor, client) = PoolActor::new(32, tracks(n)).unwrap();
    tokio::spawn(actor.run());
    client
}

#[tokio::test]
async fn test_sequential_reservations_follow_index_order() {
    let client = start(3);

    let mut held = Vec::new();
    while let Some(lease) = client.try_reserve_any().await.unwrap() {
        assert!(lease.item().busy);
        held.push(lease);
    }
    let names: Vec<_> = held.iter().map(|l| l.id().clone()).collect();
    assert_eq!(names, vec!["T1", "T2", "T3"]);

    let t2 = held.remove(1);
    t2.release().await.unwrap();
    let next = client.try_reserve_any().await.unwrap().unwrap();
    assert_eq!(next.id(), "T2");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_never_share_a_track() {
    let client = start(4);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.try_reserve_any().await }));
    }

    let mut won = Vec::new();
    for handle in handles {
        if let Some(lease) = handle.await.unwrap().unwrap() {
            won.push(lease);
        }
    }

    let unique: HashSet<_> = won.iter().map(|l| l.id().clone()).collect();
    assert_eq!(won.len(), 4);
    assert_eq!(unique.len(), 4);

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.iter().all(|t| t.busy));

    for lease in won {
        lease.release().await.unwrap();
    }
    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.iter().all(|t| !t.busy));
}

#[tokio::test]
async fn test_double_release_is_rejected() {
    let client = start(2);

    let lease = client.try_reserve_any().await.unwrap().unwrap();
    let id = lease.id().clone();
    lease.release().await.unwrap();

    let second = client.release(id).await;
    assert_eq!(second, Err(PoolError::AlreadyFree("T1".into())));
    assert!(second.unwrap_err().is_invalid_release());

    let unknown = client.release("T9".to_string()).await;
    assert_eq!(unknown, Err(PoolError::UnknownResource("T9".into())));
}

#[tokio::test]
async fn test_empty_pool_always_exhausted() {
    let client = start(0);
    assert!(client.try_reserve_any().await.unwrap().is_none());
    assert!(client.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_reflects_busy_flag() {
    let client = start(2);
    let _held = client.try_reserve_any().await.unwrap();

    let t1 = client.get("T1".to_string()).await.unwrap().unwrap();
    let t2 = client.get("T2".to_string()).await.unwrap().unwrap();
    assert!(t1.busy);
    assert!(!t2.busy);
    assert!(client.get("T3".to_string()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reservation_rolled_back_when_requester_cancelled() {
    let (actor, client) = PoolActor::new(4, tracks(1)).unwrap();

    // Actor not running yet: the request sits in the mailbox until after the abort.
    let requester = {
        let client = client.clone();
        tokio::spawn(async move { client.try_reserve_any().await })
    };
    tokio::task::yield_now().await;
    requester.abort();
    assert!(requester.await.unwrap_err().is_cancelled());

    tokio::spawn(actor.run());
    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.iter().all(|t| !t.busy));
}

#[tokio::test]
async fn test_dropped_lease_frees_track() {
    let client = start(1);
    let lease = client.try_reserve_any().await.unwrap().unwrap();

    drop(lease);

    // Same mailbox, so the snapshot is answered after the queued release.
    let snapshot = client.snapshot().await.unwrap();
    assert!(!snapshot[0].busy);
}

#[tokio::test]
async fn test_aborted_holder_frees_track() {
    let client = start(1);

    let holder = {
        let client = client.clone();
        tokio::spawn(async move {
            let _lease = client.try_reserve_any().await.unwrap().unwrap();
            std::future::pending::<()>().await;
        })
    };
    // Wait until the holder actually has the track.
    while !client.snapshot().await.unwrap()[0].busy {
        tokio::task::yield_now().await;
    }

    holder.abort();
    let _ = holder.await;

    let lease = client.try_reserve_any().await.unwrap();
    assert_eq!(lease.map(|l| l.id().clone()), Some("T1".to_string()));
}

#[tokio::test]
async fn test_actor_stops_when_clients_dropped() {
    let (actor, client) = PoolActor::new(4, tracks(1)).unwrap();
    let handle = tokio::spawn(actor.run());

    let lease = client.try_reserve_any().await.unwrap().unwrap();
    drop(client);
    handle.await.unwrap();

    assert_eq!(lease.release().await, Err(PoolError::ActorClosed));
}
