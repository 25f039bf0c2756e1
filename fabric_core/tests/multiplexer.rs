use fabric_core::os::fd::set_nonblocking;
use fabric_core::os::{EventMultiplexer, Interest, OsError};
use fabric_core::MuxConfig;
use std::io::{Read, Write};
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;
use std::thread;
use std::time::{Duration, Instant};

/// `n` socket pairs; the second half of each pair is what gets registered.
fn pairs(n: usize) -> Vec<(UnixStream, UnixStream)> {
    (0..n).map(|_| UnixStream::pair().unwrap()).collect()
}

#[test]
fn empty_handle_polls_without_blocking() {
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    let start = Instant::now();
    assert_eq!(mux.wait(0), None);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn timeout_elapses_with_nothing_ready() {
    let socks = pairs(1);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    mux.register(socks[0].1.as_raw_fd(), 7).unwrap();

    let start = Instant::now();
    assert_eq!(mux.try_wait(30).unwrap(), None);
    assert!(start.elapsed() >= Duration::from_millis(25));
}

#[test]
fn readable_socket_yields_its_context() {
    let mut socks = pairs(3);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    for (i, (_, rx)) in socks.iter().enumerate() {
        set_nonblocking(rx.as_raw_fd()).unwrap();
        mux.register(rx.as_raw_fd(), 100 + i).unwrap();
    }

    socks[2].0.write_all(b"x").unwrap();
    assert_eq!(mux.wait(1000), Some(102));
}

#[test]
fn blocked_wait_wakes_on_write() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    mux.register(rx.as_raw_fd(), 1).unwrap();

    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        tx.write_all(b"wake").unwrap();
        tx
    });
    assert_eq!(mux.wait(-1), Some(1));
    writer.join().unwrap();
}

#[test]
fn persistently_ready_fds_are_served_in_rotation() {
    let mut socks = pairs(6);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    for (i, (tx, rx)) in socks.iter_mut().enumerate() {
        mux.register(rx.as_raw_fd(), i).unwrap();
        tx.write_all(b"!").unwrap();
    }

    let mut seen: Vec<usize> = (0..6).filter_map(|_| mux.wait(0)).collect();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 6);
    // next round starts over at the first slot
    assert_eq!(mux.wait(0), Some(0));
}

#[test]
fn drained_fd_stops_being_reported() {
    let mut socks = pairs(2);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    mux.register(socks[0].1.as_raw_fd(), 0).unwrap();
    mux.register(socks[1].1.as_raw_fd(), 1).unwrap();
    socks[0].0.write_all(b"a").unwrap();
    socks[1].0.write_all(b"b").unwrap();

    assert_eq!(mux.wait(0), Some(0));
    let mut buf = [0u8; 1];
    socks[0].1.read_exact(&mut buf).unwrap();

    assert_eq!(mux.wait(0), Some(1));
    assert_eq!(mux.wait(0), Some(1));
}

#[test]
fn growth_past_first_block_keeps_registrations() {
    let mut socks = pairs(65);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    for (i, (_, rx)) in socks.iter().enumerate() {
        mux.register(rx.as_raw_fd(), i).unwrap();
    }
    assert_eq!(mux.len(), 65);
    assert!(mux.capacity() >= 65);
    for (i, (_, rx)) in socks.iter().enumerate() {
        assert_eq!(mux.context_of(rx.as_raw_fd()), Some(i));
    }

    socks[64].0.write_all(b"z").unwrap();
    assert_eq!(mux.wait(0), Some(64));
}

#[test]
fn every_registration_deregisters_exactly_once() {
    let socks = pairs(10);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    for (i, (_, rx)) in socks.iter().enumerate() {
        mux.register(rx.as_raw_fd(), i).unwrap();
    }
    for (_, rx) in socks.iter().rev().step_by(2) {
        mux.deregister(rx.as_raw_fd()).unwrap();
    }
    for (_, rx) in socks.iter() {
        let fd = rx.as_raw_fd();
        if mux.contains(fd) {
            mux.deregister(fd).unwrap();
        }
        assert!(matches!(mux.deregister(fd), Err(OsError::InvalidArgument)));
    }
    assert!(mux.is_empty());
    assert_eq!(mux.wait(0), None);
}

#[test]
fn deregistered_fd_is_no_longer_reported() {
    let mut socks = pairs(3);
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    for (i, (_, rx)) in socks.iter().enumerate() {
        mux.register(rx.as_raw_fd(), i).unwrap();
    }
    socks[0].0.write_all(b"a").unwrap();
    mux.deregister(socks[0].1.as_raw_fd()).unwrap();

    let order: Vec<_> = mux.iter().map(|(_, ctx)| ctx).collect();
    assert_eq!(order, vec![2, 1]);
    assert_eq!(mux.wait(0), None);
}

#[test]
fn writable_interest_is_reported() {
    let (tx, _rx) = UnixStream::pair().unwrap();
    let mut mux: EventMultiplexer = EventMultiplexer::new().unwrap();
    mux.register_interest(tx.as_raw_fd(), Interest::Writable, 9).unwrap();
    assert_eq!(mux.wait(0), Some(9));
    assert!(mux.last_readiness(tx.as_raw_fd()).unwrap().is_writable());
}

#[test]
fn configured_handle_preallocates() {
    let cfg = MuxConfig::parse("initial_capacity=128\ngrow_step=32").unwrap();
    let mux: EventMultiplexer<u64> = EventMultiplexer::with_config(&cfg).unwrap();
    assert!(mux.capacity() >= 128);
    mux.close();
}
