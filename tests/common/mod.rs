//! Shared helpers for controller integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use pushkind_clinic::domain::notice::{Notice, NoticePriority};
use pushkind_clinic::domain::types::NoticeId;
use pushkind_clinic::pagination::Page;
use pushkind_clinic::query::QueryState;
use pushkind_clinic::transport::Transport;
use pushkind_clinic::transport::errors::{TransportError, TransportResult};
use tokio::sync::oneshot;
use tokio::time::Instant;

pub type PageResult = TransportResult<Page<Notice>>;

enum Reply {
    Ready(PageResult),
    Gated(oneshot::Receiver<PageResult>),
}

/// Transport answering fetches from a queue of scripted replies.
///
/// Replies are consumed in call order. Gated replies resolve only when the
/// test sends on the returned sender, which lets tests pick the order in
/// which concurrent requests complete.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<(Instant, QueryState)>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, items: Vec<Notice>, total: usize) {
        self.push(Reply::Ready(Ok(Page::new(items, total))));
    }

    pub fn push_error(&self, err: TransportError) {
        self.push(Reply::Ready(Err(err)));
    }

    /// Queues a reply that stays pending until the sender is used.
    pub fn push_gate(&self) -> oneshot::Sender<PageResult> {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Gated(rx));
        tx
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<QueryState> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, query)| query.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl Transport<Notice> for ScriptedTransport {
    async fn fetch_page(&self, query: &QueryState) -> PageResult {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), query.clone()));
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Unexpected("gate dropped".to_string()))),
            None => Err(TransportError::Unexpected("no scripted reply".to_string())),
        }
    }
}

pub fn notice(id: i32) -> Notice {
    Notice {
        id: NoticeId::new(id).unwrap(),
        title: format!("Notice {id}"),
        body: format!("Body of notice {id}"),
        priority: NoticePriority::Normal,
        is_read: false,
        created_at: NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    }
}

pub fn notices(ids: impl IntoIterator<Item = i32>) -> Vec<Notice> {
    ids.into_iter().map(notice).collect()
}

pub fn ids(items: &[Notice]) -> Vec<i32> {
    items.iter().map(|n| n.id.get()).collect()
}

/// Lets spawned fetch tasks run to completion on the current-thread runtime.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
