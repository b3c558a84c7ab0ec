#![allow(missing_docs)]

pub(crate) mod fakes;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use fakes::{FakeAccounts, FakeConfirm, FakeTransactions, RecordingApp};
pub(crate) use html::{assert_valid_html, parse_html_fragment};
pub(crate) use http::{callback_channel, spawn_server};
