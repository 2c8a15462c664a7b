use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};

use super::*;

const WINDOW: Duration = Duration::from_secs(60);

fn limiter_with_clock(limit: u32) -> (SlidingWindowLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let limiter = SlidingWindowLimiter::with_clock(limit, WINDOW, clock.clone());
    (limiter, clock)
}

#[test]
fn test_admits_up_to_limit_then_rejects() {
    let (limiter, _clock) = limiter_with_clock(2);

    assert_eq!(
        limiter.check("10.0.0.1"),
        Ok(Admission {
            limit: 2,
            remaining: 1
        })
    );
    assert_eq!(
        limiter.check("10.0.0.1"),
        Ok(Admission {
            limit: 2,
            remaining: 0
        })
    );

    let err = limiter.check("10.0.0.1").unwrap_err();
    match err {
        RateLimitError::Exceeded {
            limit, window_secs, ..
        } => {
            assert_eq!(limit, 2);
            assert_eq!(window_secs, 60);
        }
    }
}

#[test]
fn test_identities_are_independent() {
    let (limiter, _clock) = limiter_with_clock(1);

    assert!(limiter.check("a").is_ok());
    assert!(limiter.check("a").is_err());
    assert!(limiter.check("b").is_ok());
    assert_eq!(limiter.tracked_identities(), 2);
}

#[test]
fn test_window_expiry_readmits() {
    let (limiter, clock) = limiter_with_clock(2);

    assert!(limiter.check("client").is_ok());
    clock.advance(Duration::from_secs(30));
    assert!(limiter.check("client").is_ok());
    assert!(limiter.check("client").is_err());

    // First admission is exactly one window old: it no longer counts.
    clock.advance(Duration::from_secs(30));
    assert!(limiter.check("client").is_ok());
    assert!(limiter.check("client").is_err());
}

#[test]
fn test_just_inside_window_still_counts() {
    let (limiter, clock) = limiter_with_clock(1);

    assert!(limiter.check("client").is_ok());
    clock.advance(WINDOW - Duration::from_millis(1));
    assert!(limiter.check("client").is_err());
}

#[test]
fn test_rejections_are_not_recorded() {
    let (limiter, clock) = limiter_with_clock(1);

    assert!(limiter.check("client").is_ok());
    for _ in 0..5 {
        clock.advance(Duration::from_secs(10));
        assert!(limiter.check("client").is_err());
    }

    // Only the single admission at t=0 was recorded.
    clock.advance(Duration::from_secs(10));
    assert!(limiter.check("client").is_ok());
}

#[test]
fn test_retry_after_tracks_oldest_admission() {
    let (limiter, clock) = limiter_with_clock(1);

    limiter.check("client").unwrap();
    clock.advance(Duration::from_secs(45));

    let err = limiter.check("client").unwrap_err();
    match &err {
        RateLimitError::Exceeded { retry_after, .. } => {
            assert_eq!(*retry_after, Duration::from_secs(15));
        }
    }
    assert_eq!(err.retry_after_secs(), 15);
}

#[test]
fn test_retry_after_secs_rounds_up_and_floors_at_one() {
    let err = RateLimitError::Exceeded {
        limit: 1,
        window_secs: 60,
        retry_after: Duration::from_millis(1500),
    };
    assert_eq!(err.retry_after_secs(), 2);

    let err = RateLimitError::Exceeded {
        limit: 1,
        window_secs: 60,
        retry_after: Duration::ZERO,
    };
    assert_eq!(err.retry_after_secs(), 1);
}

#[test]
fn test_evict_idle_drops_only_expired_identities() {
    let (limiter, clock) = limiter_with_clock(5);

    limiter.check("old").unwrap();
    clock.advance(Duration::from_secs(40));
    limiter.check("recent").unwrap();
    clock.advance(Duration::from_secs(30));

    assert_eq!(limiter.evict_idle(), 1);
    assert_eq!(limiter.tracked_identities(), 1);

    clock.advance(WINDOW);
    assert_eq!(limiter.evict_idle(), 1);
    assert_eq!(limiter.tracked_identities(), 0);
}

#[test]
fn test_concurrent_checks_never_exceed_limit() {
    let limiter = Arc::new(SlidingWindowLimiter::new(25, WINDOW));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = limiter.clone();
            std::thread::spawn(move || {
                (0..20)
                    .filter(|_| limiter.check("shared").is_ok())
                    .count()
            })
        })
        .collect();

    let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(admitted, 25);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_evicts_in_background() {
    let clock = Arc::new(ManualClock::new());
    let limiter = Arc::new(SlidingWindowLimiter::with_clock(
        5,
        Duration::from_secs(1),
        clock.clone(),
    ));
    limiter.check("client").unwrap();
    clock.advance(Duration::from_secs(2));

    let handle = limiter.clone().spawn_sweeper(Duration::from_secs(2));

    tokio::time::sleep(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;

    handle.abort();
    assert_eq!(limiter.tracked_identities(), 0);
}

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn test_identity_prefers_first_forwarded_for_entry() {
    let peer: SocketAddr = "192.168.1.9:5000".parse().unwrap();
    let map = headers(&[
        ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
        ("x-real-ip", "198.51.100.2"),
    ]);
    assert_eq!(client_identity(&map, Some(peer)), "203.0.113.7");
}

#[test]
fn test_identity_falls_back_to_real_ip() {
    let peer: SocketAddr = "192.168.1.9:5000".parse().unwrap();
    let map = headers(&[("x-forwarded-for", "  "), ("x-real-ip", "198.51.100.2")]);
    assert_eq!(client_identity(&map, Some(peer)), "198.51.100.2");
}

#[test]
fn test_identity_falls_back_to_peer_then_unknown() {
    let peer: SocketAddr = "[::1]:8080".parse().unwrap();
    assert_eq!(client_identity(&HeaderMap::new(), Some(peer)), "::1");
    assert_eq!(client_identity(&HeaderMap::new(), None), UNKNOWN_CLIENT);
}
