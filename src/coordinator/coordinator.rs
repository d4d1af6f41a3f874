use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Condvar;
use parking_lot::Mutex;
use tracing::debug;
use tracing::warn;

use super::equivalent;
use crate::ButtonChoice;
use crate::ParameterBag;

/// Role a caller got when registering its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Registered a new logical event
    Leader,
    /// Joined an event already in flight
    Follower,
}

/// One-shot result slot shared by every caller of a logical event.
#[derive(Debug, Default)]
struct EventSignal {
    claimed: AtomicBool,
    result: Mutex<Option<ButtonChoice>>,
    published: Condvar,
}

impl EventSignal {
    fn claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn publish(
        &self,
        choice: ButtonChoice,
    ) {
        let mut result = self.result.lock();
        if result.is_none() {
            *result = Some(choice);
        }
        self.published.notify_all();
    }

    fn wait(&self) -> ButtonChoice {
        let mut result = self.result.lock();
        loop {
            if let Some(choice) = *result {
                return choice;
            }
            self.published.wait(&mut result);
        }
    }
}

#[derive(Debug)]
struct PendingEvent {
    id: u64,
    ref_count: usize,
    result: Option<ButtonChoice>,
    signal: Arc<EventSignal>,
    snapshot: Arc<ParameterBag>,
}

/// Registration of one caller with one logical event.
///
/// Must be handed back through [`NotificationCoordinator::leave`]; a handle
/// that is dropped instead keeps its event in the table.
#[derive(Debug)]
#[must_use = "every entered event must be left"]
pub struct EventHandle {
    id: u64,
    code: i32,
    role: Role,
    signal: Arc<EventSignal>,
    parameters: Arc<ParameterBag>,
}

impl EventHandle {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Parameters of the event as first registered
    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }
}

/// Table of in-flight events.
///
/// The table lock is only held for scans and bookkeeping, never while a
/// notice is rendered.
#[derive(Debug, Default)]
pub struct NotificationCoordinator {
    // error code -> events with that code
    table: Mutex<HashMap<i32, Vec<PendingEvent>>>,
    next_id: AtomicU64,
}

impl NotificationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins an equivalent in-flight event or registers a new one. Never blocks
    /// beyond the table lock.
    pub fn enter(
        &self,
        code: i32,
        parameters: ParameterBag,
    ) -> EventHandle {
        let mut table = self.table.lock();
        let events = table.entry(code).or_default();

        if let Some(event) = events
            .iter_mut()
            .find(|event| equivalent(code, &event.snapshot, &parameters))
        {
            event.ref_count += 1;
            debug!(code, id = event.id, ref_count = event.ref_count, "Joined pending event");
            return EventHandle {
                id: event.id,
                code,
                role: Role::Follower,
                signal: event.signal.clone(),
                parameters: event.snapshot.clone(),
            };
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let signal = Arc::new(EventSignal::default());
        let snapshot = Arc::new(parameters);
        events.push(PendingEvent {
            id,
            ref_count: 1,
            result: None,
            signal: signal.clone(),
            snapshot: snapshot.clone(),
        });
        debug!(code, id, "Registered pending event");
        EventHandle {
            id,
            code,
            role: Role::Leader,
            signal,
            parameters: snapshot,
        }
    }

    /// Exactly one caller per logical event wins and must render; everybody
    /// else has to [`await_result`](Self::await_result).
    pub fn try_become_renderer(
        &self,
        handle: &EventHandle,
    ) -> bool {
        handle.signal.claim()
    }

    /// Blocks the calling thread until the renderer publishes its result.
    pub fn await_result(
        &self,
        handle: &EventHandle,
    ) -> ButtonChoice {
        handle.signal.wait()
    }

    /// Publishes `result` unless one is already stored, drops this caller's
    /// reference and returns the result every caller agrees on.
    ///
    /// The event leaves the table in the same critical section that sees its
    /// last reference go.
    pub fn leave(
        &self,
        handle: EventHandle,
        result: Option<ButtonChoice>,
    ) -> ButtonChoice {
        let mut table = self.table.lock();

        let Some(events) = table.get_mut(&handle.code) else {
            warn!(code = handle.code, id = handle.id, "Left an unknown event");
            return result.unwrap_or(ButtonChoice::None);
        };
        let Some(pos) = events.iter().position(|event| event.id == handle.id) else {
            warn!(code = handle.code, id = handle.id, "Left an unknown event");
            return result.unwrap_or(ButtonChoice::None);
        };

        let event = &mut events[pos];
        let agreed = match (event.result, result) {
            (Some(stored), _) => stored,
            (None, Some(choice)) => {
                event.result = Some(choice);
                event.signal.publish(choice);
                choice
            }
            (None, None) => ButtonChoice::None,
        };

        event.ref_count -= 1;
        if event.ref_count == 0 {
            events.remove(pos);
            debug!(code = handle.code, id = handle.id, "Removed pending event");
            if events.is_empty() {
                table.remove(&handle.code);
            }
        }
        agreed
    }

    /// Distinct logical events currently in flight
    pub fn pending_events(&self) -> usize {
        self.table.lock().values().map(Vec::len).sum()
    }

    /// Callers currently between `enter` and `leave`, over all events
    pub fn active_callers(&self) -> usize {
        self.table
            .lock()
            .values()
            .flatten()
            .map(|event| event.ref_count)
            .sum()
    }
}
