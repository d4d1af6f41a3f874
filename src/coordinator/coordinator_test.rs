use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use super::*;
use crate::constants::*;
use crate::test_utils::*;
use crate::ButtonChoice;
use crate::ParameterBag;

#[test]
fn first_caller_leads_and_equivalent_callers_follow() {
    let coordinator = NotificationCoordinator::new();

    let leader = coordinator.enter(EXPIRATION_TIME_WARNING, expiration_warning("CodeMeter", 10));
    let follower = coordinator.enter(EXPIRATION_TIME_WARNING, expiration_warning("WibuKey", 3));

    assert_eq!(leader.role(), Role::Leader);
    assert_eq!(follower.role(), Role::Follower);
    assert_eq!(coordinator.pending_events(), 1);
    assert_eq!(coordinator.active_callers(), 2);

    assert_eq!(coordinator.leave(leader, Some(ButtonChoice::Ok)), ButtonChoice::Ok);
    assert_eq!(coordinator.leave(follower, None), ButtonChoice::Ok);
    assert_eq!(coordinator.pending_events(), 0);
}

#[test]
fn followers_see_the_leaders_parameters() {
    let coordinator = NotificationCoordinator::new();

    let leader = coordinator.enter(EXPIRATION_TIME_WARNING, expiration_warning("CodeMeter", 10));
    let follower = coordinator.enter(EXPIRATION_TIME_WARNING, expiration_warning("WibuKey", 3));

    assert_eq!(follower.parameters().text(KEY_SYSTEM).unwrap(), "CodeMeter");
    assert_eq!(follower.code(), EXPIRATION_TIME_WARNING);

    let _ = coordinator.leave(follower, None);
    let _ = coordinator.leave(leader, None);
}

#[test]
fn distinct_events_get_their_own_entries() {
    let coordinator = NotificationCoordinator::new();

    let first = coordinator.enter(GENERAL_ERROR, general_error(license("CodeMeter", 10, 13, 0), 200));
    let second = coordinator.enter(GENERAL_ERROR, general_error(license("CodeMeter", 10, 14, 0), 200));
    let other_code = coordinator.enter(EXPIRATION_TIME_WARNING, expiration_warning("CodeMeter", 10));

    assert_eq!(second.role(), Role::Leader);
    assert_eq!(other_code.role(), Role::Leader);
    assert_eq!(coordinator.pending_events(), 3);

    let _ = coordinator.leave(first, Some(ButtonChoice::Ok));
    let _ = coordinator.leave(second, Some(ButtonChoice::Cancel));
    let _ = coordinator.leave(other_code, Some(ButtonChoice::Ok));
    assert_eq!(coordinator.pending_events(), 0);
    assert_eq!(coordinator.active_callers(), 0);
}

#[test]
fn exactly_one_caller_becomes_renderer() {
    let coordinator = NotificationCoordinator::new();

    let leader = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
    let follower = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());

    assert!(coordinator.try_become_renderer(&leader));
    assert!(!coordinator.try_become_renderer(&follower));
    assert!(!coordinator.try_become_renderer(&leader));

    let _ = coordinator.leave(leader, Some(ButtonChoice::Ok));
    let _ = coordinator.leave(follower, None);
}

#[test]
fn entry_is_removed_when_last_caller_leaves() {
    let coordinator = NotificationCoordinator::new();

    let first = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
    let second = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());

    let _ = coordinator.leave(first, Some(ButtonChoice::Ok));
    assert_eq!(coordinator.pending_events(), 1);
    assert_eq!(coordinator.active_callers(), 1);

    let _ = coordinator.leave(second, None);
    assert_eq!(coordinator.pending_events(), 0);

    // A later event starts a fresh entry
    let again = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
    assert_eq!(again.role(), Role::Leader);
    assert!(coordinator.try_become_renderer(&again));
    let _ = coordinator.leave(again, Some(ButtonChoice::Cancel));
}

#[test]
fn single_caller_leave_removes_entry() {
    let coordinator = NotificationCoordinator::new();

    let handle = coordinator.enter(USAGE_PERIOD_WARNING, ParameterBag::new());
    assert_eq!(coordinator.leave(handle, Some(ButtonChoice::Cancel)), ButtonChoice::Cancel);

    assert_eq!(coordinator.pending_events(), 0);
}

#[test]
fn stored_result_wins_over_later_results() {
    let coordinator = NotificationCoordinator::new();

    let leader = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
    let follower = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());

    assert_eq!(coordinator.leave(leader, Some(ButtonChoice::Retry)), ButtonChoice::Retry);
    assert_eq!(coordinator.leave(follower, Some(ButtonChoice::Abort)), ButtonChoice::Retry);
}

#[test]
fn leave_without_any_result_yields_none() {
    let coordinator = NotificationCoordinator::new();

    let handle = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());

    assert_eq!(coordinator.leave(handle, None), ButtonChoice::None);
    assert_eq!(coordinator.pending_events(), 0);
}

#[test]
fn follower_blocks_until_result_is_published() {
    let coordinator = Arc::new(NotificationCoordinator::new());
    let leader = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
    assert!(coordinator.try_become_renderer(&leader));

    let waiter = {
        let coordinator = coordinator.clone();
        thread::spawn(move || {
            let handle = coordinator.enter(VERSION_TOO_OLD, ParameterBag::new());
            assert!(!coordinator.try_become_renderer(&handle));
            let seen = coordinator.await_result(&handle);
            (seen, coordinator.leave(handle, None))
        })
    };

    wait_for_callers(&coordinator, 2);
    assert_eq!(coordinator.leave(leader, Some(ButtonChoice::Yes)), ButtonChoice::Yes);

    assert_eq!(waiter.join().unwrap(), (ButtonChoice::Yes, ButtonChoice::Yes));
    assert_eq!(coordinator.pending_events(), 0);
}

#[test]
fn concurrent_equivalent_callers_share_one_renderer() {
    const CALLERS: usize = 8;
    let coordinator = Arc::new(NotificationCoordinator::new());
    let barrier = Arc::new(Barrier::new(CALLERS));

    let workers: Vec<_> = (0..CALLERS)
        .map(|i| {
            let coordinator = coordinator.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let handle = coordinator.enter(
                    GENERAL_ERROR,
                    general_error(license("CodeMeter", 10, 13, 0), 200).with("caller", i as i64),
                );
                if coordinator.try_become_renderer(&handle) {
                    // Hold the notice until every caller has joined
                    wait_for_callers(&coordinator, CALLERS);
                    (true, coordinator.leave(handle, Some(ButtonChoice::Ignore)))
                } else {
                    coordinator.await_result(&handle);
                    (false, coordinator.leave(handle, None))
                }
            })
        })
        .collect();

    let outcomes: Vec<(bool, ButtonChoice)> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    assert_eq!(outcomes.iter().filter(|(rendered, _)| *rendered).count(), 1);
    assert!(outcomes.iter().all(|(_, choice)| *choice == ButtonChoice::Ignore));
    assert_eq!(coordinator.pending_events(), 0);
    assert_eq!(coordinator.active_callers(), 0);
}
