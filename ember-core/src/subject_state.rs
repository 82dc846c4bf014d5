// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subscription::Subscription;
use crate::teardown::TeardownCell;
use crate::{EmberError, StreamItem, SubjectError, Teardown};
use futures::channel::mpsc::{self, UnboundedSender};
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type SharedState<T> = Arc<Mutex<SubjectState<T>>>;

pub(crate) enum Terminal {
    Completed,
    Errored(EmberError),
}

pub(crate) struct Subscriber<T> {
    id: u64,
    sender: UnboundedSender<StreamItem<T>>,
    teardown: TeardownCell,
}

/// Registry shared by both subject flavours. `latest` is only ever filled by a replaying subject.
pub(crate) struct SubjectState<T> {
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
    terminal: Option<Terminal>,
    latest: Option<T>,
}

impl<T> SubjectState<T> {
    pub(crate) fn deregister(&mut self, id: u64) {
        self.subscribers.retain(|s| s.id != id);
    }
}

impl<T: Clone + Send + Sync + 'static> SubjectState<T> {
    pub(crate) fn shared(latest: Option<T>) -> SharedState<T> {
        Arc::new(Mutex::new(Self {
            next_id: 0,
            subscribers: Vec::new(),
            terminal: None,
            latest,
        }))
    }

    pub(crate) fn subscribe(
        state: &SharedState<T>,
        teardown: Teardown,
        replay_latest: bool,
    ) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded();
        let cell = TeardownCell::new(teardown);
        let mut guard = state.lock();

        match &guard.terminal {
            Some(Terminal::Errored(err)) => {
                let _ = tx.unbounded_send(StreamItem::Error(err.clone()));
                return Subscription::detached(rx, cell);
            }
            Some(Terminal::Completed) => return Subscription::detached(rx, cell),
            None => {}
        }

        if replay_latest {
            if let Some(latest) = &guard.latest {
                let _ = tx.unbounded_send(StreamItem::Value(latest.clone()));
            }
        }

        let id = guard.next_id;
        guard.next_id += 1;
        guard.subscribers.push(Subscriber {
            id,
            sender: tx,
            teardown: cell.clone(),
        });
        drop(guard);

        Subscription::registered(rx, cell, id, Arc::downgrade(state))
    }

    pub(crate) fn publish(
        state: &SharedState<T>,
        value: T,
        cache_latest: bool,
    ) -> Result<(), SubjectError> {
        let mut guard = state.lock();
        if guard.terminal.is_some() {
            return Err(SubjectError::Closed);
        }

        // A failed send means the receiver is mid-drop; its own teardown still runs.
        guard
            .subscribers
            .retain(|s| s.sender.unbounded_send(StreamItem::Value(value.clone())).is_ok());

        if cache_latest {
            guard.latest = Some(value);
        }
        Ok(())
    }

    /// Marks the subject terminated and runs every pending teardown after releasing the lock.
    pub(crate) fn terminate(state: &SharedState<T>, terminal: Terminal) -> Result<(), SubjectError> {
        let cells: Vec<TeardownCell> = {
            let mut guard = state.lock();
            if guard.terminal.is_some() {
                return Err(SubjectError::Closed);
            }

            if let Terminal::Errored(err) = &terminal {
                for subscriber in &guard.subscribers {
                    let _ = subscriber
                        .sender
                        .unbounded_send(StreamItem::Error(err.clone()));
                }
            }

            guard.terminal = Some(terminal);
            // Dropping the senders ends every subscription stream.
            guard.subscribers.drain(..).map(|s| s.teardown).collect()
        };

        for cell in cells {
            cell.run();
        }
        Ok(())
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn current_error(&self) -> Option<EmberError> {
        match &self.terminal {
            Some(Terminal::Errored(err)) => Some(err.clone()),
            _ => None,
        }
    }

    pub(crate) fn has_completed(&self) -> bool {
        matches!(self.terminal, Some(Terminal::Completed))
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }

    pub(crate) fn latest(&self) -> Option<T> {
        self.latest.clone()
    }
}
