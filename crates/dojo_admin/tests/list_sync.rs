//! Load, silent refresh and polling behavior of the list synchronizer.

mod support;

use dojo_admin::ListSynchronizer;
use dojo_core::models::{ClientRecord, InstructorRecord};
use std::sync::Arc;
use std::time::Duration;
use support::{client, instructor, Call, FakeBackend};

type ClientList = ListSynchronizer<ClientRecord, FakeBackend>;
type InstructorList = ListSynchronizer<InstructorRecord, FakeBackend>;

fn three_clients() -> Vec<ClientRecord> {
    vec![
        client(1, "Rosa", "12345678"),
        client(2, "Luis", "87654321"),
        client(3, "Marta", "20123456789"),
    ]
}

#[tokio::test]
async fn load_replaces_collection_and_clears_loading() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend, "Error al cargar los clientes");
    assert!(list.is_loading());

    list.load().await;
    assert!(!list.is_loading());
    assert_eq!(list.error(), None);
    assert_eq!(list.collection(), three_clients().as_slice());
    assert_eq!(list.view(), list.collection());
}

#[tokio::test]
async fn load_failure_sets_page_error_and_keeps_previous_state() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend.clone(), "Error al cargar los clientes");
    list.load().await;

    backend.fail_lists(true);
    list.load().await;
    assert!(!list.is_loading());
    assert_eq!(list.error(), Some("Error al cargar los clientes"));
    assert_eq!(list.collection().len(), 3);

    backend.fail_lists(false);
    list.load().await;
    assert_eq!(list.error(), None);
}

#[tokio::test]
async fn equal_silent_refresh_changes_nothing() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend, "x");
    list.load().await;
    list.set_search_term("rosa");
    let revision = list.view_revision();
    let view = list.view().to_vec();

    assert!(!list.refresh_silently().await);
    assert_eq!(list.view_revision(), revision);
    assert_eq!(list.view(), view.as_slice());
}

#[tokio::test]
async fn differing_silent_refresh_recomputes_with_current_term() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend.clone(), "x");
    list.load().await;
    list.set_search_term("MAR");
    assert_eq!(list.view().len(), 1);
    let revision = list.view_revision();

    let mut updated = three_clients();
    updated.push(client(4, "Maria", "11223344"));
    backend.set_clients(updated.clone());

    assert!(list.refresh_silently().await);
    assert!(list.view_revision() > revision);
    assert_eq!(list.collection(), updated.as_slice());
    let ids: Vec<_> = list.view().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn silent_refresh_failure_is_swallowed() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend.clone(), "Error al cargar los clientes");
    list.load().await;
    let revision = list.view_revision();

    backend.fail_lists(true);
    assert!(!list.refresh_silently().await);
    assert_eq!(list.error(), None);
    assert_eq!(list.view_revision(), revision);
    assert_eq!(list.collection().len(), 3);
}

#[tokio::test]
async fn search_by_document_is_exact_case_substring() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend, "x");
    list.load().await;

    list.set_search_term("8765");
    assert_eq!(list.view().iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    list.set_search_term("");
    assert_eq!(list.view(), list.collection());
}

#[tokio::test]
async fn update_record_recomputes_view() {
    let backend = Arc::new(FakeBackend::with_instructors(vec![
        instructor(1, "Kenji", "Judo"),
        instructor(2, "Ana", "Karate"),
    ]));
    let mut list = InstructorList::new(backend, "x");
    list.load().await;
    list.set_search_term("judo");
    assert_eq!(list.view().len(), 1);

    assert!(list.update_record(2, |record| record.specialty = "Judo".to_string()));
    assert_eq!(list.view().len(), 2);
    assert!(!list.update_record(99, |record| record.is_published = true));
}

#[tokio::test(start_paused = true)]
async fn polling_first_fetch_waits_one_full_interval() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend.clone(), "x");
    list.load().await;

    let interval = Duration::from_secs(10);
    let started = tokio::time::Instant::now();
    let mut handle = list.start_polling(interval);
    assert!(handle.is_running());

    let changed = list.apply_next_poll(&mut handle).await;
    assert_eq!(changed, Some(false));
    assert!(started.elapsed() >= interval);
    assert_eq!(backend.count(|call| *call == Call::ListClients), 2);

    backend.set_clients(vec![client(9, "Nuevo", "99887766")]);
    assert_eq!(list.apply_next_poll(&mut handle).await, Some(true));
    assert!(started.elapsed() >= interval * 2);
    assert_eq!(list.collection().len(), 1);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn stopping_or_dropping_the_handle_ends_polling() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let list = ClientList::new(backend.clone(), "x");

    let handle = list.start_polling(Duration::from_secs(10));
    handle.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.count(|_| true), 0);

    {
        let _handle = list.start_polling(Duration::from_secs(10));
    }
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.count(|_| true), 0);
}

#[tokio::test(start_paused = true)]
async fn polling_failures_never_surface() {
    let backend = Arc::new(FakeBackend::with_clients(three_clients()));
    let mut list = ClientList::new(backend.clone(), "Error al cargar los clientes");
    list.load().await;
    backend.fail_lists(true);

    let mut handle = list.start_polling(Duration::from_secs(10));
    let result = handle.next_result().await.expect("polled result");
    assert!(result.is_err());
    assert!(!list.apply_silent_result(result));
    assert_eq!(list.error(), None);
    assert_eq!(list.collection().len(), 3);
}
