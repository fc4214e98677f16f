use std::sync::Arc;
use std::time::Duration;

use pushkind_clinic::controller::{
    ControllerOptions, FetchOutcome, ResourceController, Status,
};
use pushkind_clinic::domain::notice::Notice;
use pushkind_clinic::pagination::Page;
use pushkind_clinic::transport::errors::TransportError;
use tokio::sync::oneshot;

mod common;

use common::{ScriptedTransport, ids, notices, settle};

type Board = ResourceController<Notice, Arc<ScriptedTransport>>;

fn board() -> (Board, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let controller = ResourceController::new(Arc::clone(&transport), ControllerOptions::default());
    (controller, transport)
}

fn remove(id: i32) -> impl Fn(&mut Vec<Notice>) + Send + Sync + 'static {
    move |items: &mut Vec<Notice>| items.retain(|n| n.id.get() != id)
}

#[tokio::test]
async fn test_filter_change_replaces_page_and_resets_position() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=10), 23);
    transport.push_page(notices(21..=23), 23);
    transport.push_page(notices(11..=12), 2);

    assert_eq!(controller.refresh().settled().await, FetchOutcome::Applied);
    assert_eq!(controller.total_pages(), 3);

    let page = controller.set_page(3).expect("page 3 is in range");
    assert_eq!(page.settled().await, FetchOutcome::Applied);
    assert_eq!(controller.query().page, 3);

    let filter = controller.set_filter("high-priority");
    assert_eq!(controller.query().page, 1);
    assert_eq!(filter.settled().await, FetchOutcome::Applied);

    let state = controller.snapshot();
    assert_eq!(state.total, 2);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.query.page, 1);
    assert_eq!(ids(&state.items), vec![11, 12]);
    assert_eq!(state.status, Status::Idle);

    let sent = transport.calls();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].category_filter, "high-priority");
    assert_eq!(sent[2].page, 1);
    assert_eq!(sent[2].page_size, 10);
}

#[tokio::test(start_paused = true)]
async fn test_keystrokes_coalesce_into_one_search_fetch() {
    let (controller, transport) = board();
    transport.push_page(notices([7]), 1);

    controller.set_search("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.set_search("ab");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.set_search("abc");
    let last_keystroke = tokio::time::Instant::now();

    assert!(controller.is_search_pending());
    assert_eq!(controller.status(), Status::Idle);
    assert_eq!(controller.query().search_text, "abc");

    tokio::time::sleep(Duration::from_millis(399)).await;
    assert!(transport.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    settle().await;

    let sent = transport.calls();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].search_text, "abc");
    let waited = transport.call_times()[0] - last_keystroke;
    assert!(waited >= Duration::from_millis(400) && waited < Duration::from_millis(402));

    assert_eq!(ids(&controller.items()), vec![7]);
    assert_eq!(controller.status(), Status::Idle);
    assert!(!controller.is_search_pending());
}

#[tokio::test(start_paused = true)]
async fn test_search_resets_page_before_fetching() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=10), 30);
    transport.push_page(notices(11..=20), 30);
    transport.push_page(notices([4]), 1);

    controller.refresh().settled().await;
    controller.set_page(2).unwrap().settled().await;
    assert_eq!(controller.query().page, 2);

    controller.set_search("insulin");
    assert_eq!(controller.query().page, 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    settle().await;

    let sent = transport.calls();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].page, 1);
    assert_eq!(sent[2].search_text, "insulin");
}

#[tokio::test(start_paused = true)]
async fn test_filter_cancels_pending_search_fetch() {
    let (controller, transport) = board();
    transport.push_page(notices([3]), 1);

    controller.set_search("flu");
    let filter = controller.set_filter("low");
    assert!(!controller.is_search_pending());
    assert_eq!(filter.settled().await, FetchOutcome::Applied);

    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;

    let sent = transport.calls();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].search_text, "flu");
    assert_eq!(sent[0].category_filter, "low");
}

#[tokio::test]
async fn test_older_response_arriving_last_is_discarded() {
    let (controller, transport) = board();
    let first = transport.push_gate();
    let second = transport.push_gate();

    let older = controller.refresh();
    let newer = controller.set_filter("normal");
    settle().await;
    assert_eq!(transport.calls().len(), 2);

    second.send(Ok(Page::new(notices([2]), 1))).unwrap();
    assert_eq!(newer.settled().await, FetchOutcome::Applied);

    first.send(Ok(Page::new(notices([1]), 1))).unwrap();
    assert_eq!(older.settled().await, FetchOutcome::Stale);

    let state = controller.snapshot();
    assert_eq!(ids(&state.items), vec![2]);
    assert_eq!(state.status, Status::Idle);
    assert_eq!(state.current_generation, 2);
}

#[tokio::test]
async fn test_older_response_arriving_first_is_discarded() {
    let (controller, transport) = board();
    let first = transport.push_gate();
    let second = transport.push_gate();

    let older = controller.refresh();
    let newer = controller.set_filter("normal");
    settle().await;

    first.send(Ok(Page::new(notices([1]), 1))).unwrap();
    assert_eq!(older.settled().await, FetchOutcome::Stale);
    assert!(controller.items().is_empty());
    assert_eq!(controller.status(), Status::Loading);

    second.send(Ok(Page::new(notices([2]), 1))).unwrap();
    assert_eq!(newer.settled().await, FetchOutcome::Applied);
    assert_eq!(ids(&controller.items()), vec![2]);
}

#[tokio::test]
async fn test_stale_failure_is_silent() {
    let (controller, transport) = board();
    let first = transport.push_gate();
    transport.push_page(notices([5]), 1);

    let older = controller.refresh();
    controller.refresh().settled().await;

    first
        .send(Err(TransportError::Network("connection reset".to_string())))
        .unwrap();
    assert_eq!(older.settled().await, FetchOutcome::Stale);

    assert_eq!(controller.status(), Status::Idle);
    assert_eq!(controller.error_message(), None);
    assert_eq!(ids(&controller.items()), vec![5]);
}

#[tokio::test]
async fn test_out_of_range_pages_do_not_move_the_view() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=10), 23);
    controller.refresh().settled().await;

    for page in [0, 4, 100] {
        assert!(controller.set_page(page).is_none());
        assert_eq!(controller.query().page, 1);
    }
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_fetch_keeps_rows_until_next_success() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=3), 3);
    transport.push_error(TransportError::Timeout);
    transport.push_page(notices(1..=4), 4);

    controller.refresh().settled().await;
    assert_eq!(controller.refresh().settled().await, FetchOutcome::Failed);

    let state = controller.snapshot();
    assert_eq!(ids(&state.items), vec![1, 2, 3]);
    assert_eq!(state.total, 3);
    assert_eq!(state.status, Status::Error);
    assert_eq!(state.error_message.as_deref(), Some("Request timed out"));

    controller.refresh().settled().await;
    assert_eq!(controller.status(), Status::Idle);
    assert_eq!(controller.error_message(), None);
    assert_eq!(controller.total(), 4);
}

#[tokio::test]
async fn test_failed_mutation_restores_removed_row() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=3), 3);
    controller.refresh().settled().await;

    let result: Result<(), _> = controller
        .mutate_optimistic(remove(2), async {
            Err(TransportError::Status {
                status: 500,
                message: "Internal error".to_string(),
            })
        })
        .await;

    assert!(result.is_err());
    assert_eq!(ids(&controller.items()), vec![1, 2, 3]);
    assert_eq!(controller.status(), Status::Error);
    assert_eq!(controller.pending_mutations(), 0);
}

#[tokio::test]
async fn test_pending_mutation_is_reapplied_after_refresh() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=3), 3);
    controller.refresh().settled().await;

    let (gate, remote) = oneshot::channel::<Result<(), TransportError>>();
    let mutation = controller.mutate_optimistic(remove(1), async move {
        remote
            .await
            .unwrap_or_else(|_| Err(TransportError::Unexpected("gate dropped".to_string())))
    });

    let controller_ref = &controller;
    let transport_ref = &transport;
    let driver = async move {
        settle().await;
        assert_eq!(ids(&controller_ref.items()), vec![2, 3]);
        assert_eq!(controller_ref.pending_mutations(), 1);

        transport_ref.push_page(notices(1..=4), 4);
        controller_ref.refresh().settled().await;
        assert_eq!(ids(&controller_ref.items()), vec![2, 3, 4]);

        gate.send(Ok(())).unwrap();
    };

    let (result, ()) = tokio::join!(mutation, driver);

    assert!(result.is_ok());
    assert_eq!(ids(&controller.items()), vec![2, 3, 4]);
    assert_eq!(controller.pending_mutations(), 0);
    assert_eq!(controller.status(), Status::Idle);
}

#[tokio::test]
async fn test_failed_mutation_after_refresh_shows_server_rows() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=3), 3);
    controller.refresh().settled().await;

    let (gate, remote) = oneshot::channel::<Result<(), TransportError>>();
    let mutation = controller.mutate_optimistic(remove(3), async move {
        remote
            .await
            .unwrap_or_else(|_| Err(TransportError::Unexpected("gate dropped".to_string())))
    });

    let controller_ref = &controller;
    let transport_ref = &transport;
    let driver = async move {
        settle().await;
        transport_ref.push_page(notices([3, 5, 6]), 3);
        controller_ref.refresh().settled().await;
        assert_eq!(ids(&controller_ref.items()), vec![5, 6]);

        gate.send(Err(TransportError::Network("offline".to_string())))
            .unwrap();
    };

    let (result, ()) = tokio::join!(mutation, driver);

    assert!(result.is_err());
    assert_eq!(ids(&controller.items()), vec![3, 5, 6]);
    assert_eq!(controller.status(), Status::Error);
    assert_eq!(
        controller.error_message().as_deref(),
        Some("Network error: offline")
    );
}

#[tokio::test]
async fn test_subscribers_see_revisions() {
    let (controller, transport) = board();
    transport.push_page(notices([1]), 1);
    let mut revisions = controller.subscribe();
    let before = *revisions.borrow_and_update();

    controller.refresh().settled().await;

    assert!(revisions.has_changed().unwrap());
    assert!(*revisions.borrow_and_update() > before);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_cancels_pending_search() {
    let (controller, transport) = board();
    transport.push_page(notices([1]), 1);

    controller.set_search("late");
    drop(controller);

    tokio::time::sleep(Duration::from_secs(2)).await;
    settle().await;

    assert!(transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_mutation_is_withdrawn() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=3), 3);
    transport.push_page(notices(1..=3), 3);
    controller.refresh().settled().await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(10),
        controller.mutate_optimistic(
            remove(1),
            std::future::pending::<Result<(), TransportError>>(),
        ),
    )
    .await;

    assert!(abandoned.is_err());
    assert_eq!(controller.pending_mutations(), 0);
    assert_eq!(ids(&controller.items()), vec![1, 2, 3]);

    controller.refresh().settled().await;
    assert_eq!(ids(&controller.items()), vec![1, 2, 3]);
    assert_eq!(controller.status(), Status::Idle);
}

#[tokio::test]
async fn test_page_past_shrunken_list_falls_back_to_last_page() {
    let (controller, transport) = board();
    transport.push_page(notices(1..=10), 23);
    let filter_reply = transport.push_gate();
    transport.push_page(Vec::new(), 2);
    transport.push_page(notices(11..=12), 2);

    controller.refresh().settled().await;

    let filter = controller.set_filter("low");
    let page = controller.set_page(3).expect("page 3 of the previous list");
    assert_eq!(page.settled().await, FetchOutcome::Applied);

    let state = controller.snapshot();
    assert_eq!(state.query.page, 1);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(ids(&state.items), vec![11, 12]);
    assert_eq!(state.status, Status::Idle);

    let sent = transport.calls();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[2].page, 3);
    assert_eq!(sent[3].page, 1);
    assert_eq!(sent[3].category_filter, "low");

    filter_reply
        .send(Ok(Page::new(notices(11..=12), 2)))
        .unwrap();
    assert_eq!(filter.settled().await, FetchOutcome::Stale);
}
