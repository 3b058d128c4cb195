//! Test doubles and common utilities for observer contract tests
//!
//! This module provides minimal observers that record what happened to
//! them so the tests can assert on order and counts.

#![allow(dead_code)]

use observer_core::{ConcreteSubject, Observer, Subject, SubjectExt};
use std::io::{self, Write};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Shared log of `(observer name, state seen)` pairs, in call order
#[derive(Clone, Default)]
pub struct UpdateLog {
    entries: Arc<Mutex<Vec<(String, i64)>>>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, name: &str, state: i64) {
        self.entries.lock().unwrap().push((name.to_string(), state));
    }

    /// All recorded updates
    pub fn entries(&self) -> Vec<(String, i64)> {
        self.entries.lock().unwrap().clone()
    }

    /// Observer names in the order they were updated
    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// An observer that records every update into an [`UpdateLog`]
pub struct RecordingObserver {
    name: String,
    subject: Weak<dyn Subject>,
    cached: AtomicI64,
    calls: AtomicUsize,
    log: UpdateLog,
}

impl RecordingObserver {
    /// Create a recording observer and attach it to `subject`
    pub fn attach(subject: &Arc<ConcreteSubject>, name: &str, log: &UpdateLog) -> Arc<Self> {
        let observer = Self::detached(subject, name, log);
        subject.attach(observer.clone());
        observer
    }

    /// Create a recording observer bound to `subject` without attaching it
    pub fn detached(subject: &Arc<ConcreteSubject>, name: &str, log: &UpdateLog) -> Arc<Self> {
        let handle: Arc<dyn Subject> = subject.clone();
        Arc::new(Self {
            name: name.to_string(),
            subject: Arc::downgrade(&handle),
            cached: AtomicI64::new(0),
            calls: AtomicUsize::new(0),
            log: log.clone(),
        })
    }

    /// State cached at the last update
    pub fn cached(&self) -> i64 {
        self.cached.load(Ordering::SeqCst)
    }

    /// Number of times update() was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Observer for RecordingObserver {
    fn update(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(subject) = self.subject.upgrade() {
            let state = subject.state();
            self.cached.store(state, Ordering::SeqCst);
            self.log.push(&self.name, state);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An observer that detaches itself the first time it is notified
pub struct SelfDetachingObserver {
    name: String,
    me: Weak<SelfDetachingObserver>,
    subject: Weak<dyn Subject>,
    log: UpdateLog,
}

impl SelfDetachingObserver {
    pub fn attach(subject: &Arc<ConcreteSubject>, name: &str, log: &UpdateLog) -> Arc<Self> {
        let handle: Arc<dyn Subject> = subject.clone();
        let observer = Arc::new_cyclic(|me| Self {
            name: name.to_string(),
            me: me.clone(),
            subject: Arc::downgrade(&handle),
            log: log.clone(),
        });
        subject.attach(observer.clone());
        observer
    }
}

impl Observer for SelfDetachingObserver {
    fn update(&self) {
        if let (Some(subject), Some(me)) = (self.subject.upgrade(), self.me.upgrade()) {
            self.log.push(&self.name, subject.state());
            subject.detach_observer(&me);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An observer that attaches a new observer on its first notification
pub struct RecruitingObserver {
    name: String,
    subject: Weak<ConcreteSubject>,
    recruit: Mutex<Option<Arc<dyn Observer>>>,
    log: UpdateLog,
}

impl RecruitingObserver {
    pub fn attach(
        subject: &Arc<ConcreteSubject>,
        name: &str,
        recruit: Arc<dyn Observer>,
        log: &UpdateLog,
    ) -> Arc<Self> {
        let observer = Arc::new(Self {
            name: name.to_string(),
            subject: Arc::downgrade(subject),
            recruit: Mutex::new(Some(recruit)),
            log: log.clone(),
        });
        subject.attach(observer.clone());
        observer
    }
}

impl Observer for RecruitingObserver {
    fn update(&self) {
        if let Some(subject) = self.subject.upgrade() {
            self.log.push(&self.name, subject.state());
            if let Some(recruit) = self.recruit.lock().unwrap().take() {
                subject.attach(recruit);
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An in-memory writer that can be cloned and inspected after the fact
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as text
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Written text split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
