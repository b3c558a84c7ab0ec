//! Stand-ins for the services and ports a page depends on.
//!
//! The fake services record every call and hold on to its callback until the
//! test resolves it, so tests decide when and in which order responses arrive.

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use crate::{
    AccountInfo, AccountService, AppShell, Confirm, Error, RenderOptions, TransactionItem,
    TransactionService, request::Callback,
};

#[derive(Default)]
pub(crate) struct FakeAccounts {
    get_calls: Mutex<Vec<String>>,
    remove_calls: Mutex<Vec<String>>,
    pending_gets: Mutex<VecDeque<Callback<AccountInfo>>>,
    pending_removes: Mutex<VecDeque<Callback<()>>>,
}

impl FakeAccounts {
    pub(crate) fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }

    pub(crate) fn remove_calls(&self) -> Vec<String> {
        self.remove_calls.lock().unwrap().clone()
    }

    /// Answer the oldest unanswered `get`.
    #[track_caller]
    pub(crate) fn resolve_get(&self, result: Result<AccountInfo, Error>) {
        let callback = self
            .pending_gets
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending account lookup");
        callback(result);
    }

    /// Answer the oldest unanswered `remove`.
    #[track_caller]
    pub(crate) fn resolve_remove(&self, result: Result<(), Error>) {
        let callback = self
            .pending_removes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending account removal");
        callback(result);
    }
}

impl AccountService for FakeAccounts {
    fn get(&self, id: &str, callback: Callback<AccountInfo>) {
        self.get_calls.lock().unwrap().push(id.to_owned());
        self.pending_gets.lock().unwrap().push_back(callback);
    }

    fn remove(&self, id: &str, callback: Callback<()>) {
        self.remove_calls.lock().unwrap().push(id.to_owned());
        self.pending_removes.lock().unwrap().push_back(callback);
    }
}

#[derive(Default)]
pub(crate) struct FakeTransactions {
    list_calls: Mutex<Vec<RenderOptions>>,
    remove_calls: Mutex<Vec<String>>,
    pending_lists: Mutex<VecDeque<Callback<Vec<TransactionItem>>>>,
    pending_removes: Mutex<VecDeque<Callback<()>>>,
}

impl FakeTransactions {
    pub(crate) fn list_calls(&self) -> Vec<RenderOptions> {
        self.list_calls.lock().unwrap().clone()
    }

    pub(crate) fn remove_calls(&self) -> Vec<String> {
        self.remove_calls.lock().unwrap().clone()
    }

    /// Answer the oldest unanswered `list`.
    #[track_caller]
    pub(crate) fn resolve_list(&self, result: Result<Vec<TransactionItem>, Error>) {
        let callback = self
            .pending_lists
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending transaction list");
        callback(result);
    }

    /// Answer the oldest unanswered `remove`.
    #[track_caller]
    pub(crate) fn resolve_remove(&self, result: Result<(), Error>) {
        let callback = self
            .pending_removes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending transaction removal");
        callback(result);
    }
}

impl TransactionService for FakeTransactions {
    fn list(&self, options: &RenderOptions, callback: Callback<Vec<TransactionItem>>) {
        self.list_calls.lock().unwrap().push(options.clone());
        self.pending_lists.lock().unwrap().push_back(callback);
    }

    fn remove(&self, id: &str, callback: Callback<()>) {
        self.remove_calls.lock().unwrap().push(id.to_owned());
        self.pending_removes.lock().unwrap().push_back(callback);
    }
}

#[derive(Default)]
pub(crate) struct RecordingApp {
    updates: AtomicUsize,
    widget_updates: AtomicUsize,
}

impl RecordingApp {
    pub(crate) fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub(crate) fn widget_updates(&self) -> usize {
        self.widget_updates.load(Ordering::SeqCst)
    }
}

impl AppShell for RecordingApp {
    fn update(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    fn update_widgets(&self) {
        self.widget_updates.fetch_add(1, Ordering::SeqCst);
    }
}

/// Answers every confirmation with a fixed response and records the prompts.
pub(crate) struct FakeConfirm {
    answer: AtomicBool,
    prompts: Mutex<Vec<String>>,
}

impl FakeConfirm {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for FakeConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_owned());
        self.answer.load(Ordering::SeqCst)
    }
}
