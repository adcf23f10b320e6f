//! End-to-end tests for the runtime.
//!
//! Drives the real App, provider and runtime with a scripted driver against
//! in-memory collaborators:
//! 1. Start signed in (or not) and wait for the first room list
//! 2. Replay user input
//! 3. Wait for the outcome and inspect the directory and the rendered frames

use std::{sync::Arc, time::Duration};

use cryptochat_app::{AppEvent, Destination, DialogState, RoomListEvent, Runtime};
use cryptochat_core::{
    Identity, MemoryDirectory, MemoryIdentity, Room, RoomDirectory, RoomListProvider,
};
use cryptochat_harness::{DirectoryFault, FaultyDirectory, ScriptError, ScriptedDriver};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn alice_signed_in() -> Arc<MemoryIdentity> {
    let identity = MemoryIdentity::new()
        .with_account("alice@example.com", "secret1", "alice")
        .and_then(|identity| identity.signed_in("alice@example.com"))
        .unwrap();
    Arc::new(identity)
}

fn provider<D: RoomDirectory>(directory: &Arc<D>) -> Arc<RoomListProvider<D>> {
    Arc::new(RoomListProvider::new(Arc::clone(directory)))
}

/// Script prefix: wait for the first observation, then open the dialog and
/// type `name`.
fn open_and_type(name: &str) -> ScriptedDriver {
    ScriptedDriver::new()
        .wait_until("rooms loaded", |app| app.room_list().is_loaded())
        .send(RoomListEvent::OpenDialog)
        .send(RoomListEvent::EditDraft(name.to_string()))
}

fn dialog_error(app: &cryptochat_app::App) -> bool {
    app.room_list().dialog().error().is_some_and(|error| !error.is_empty())
}

#[tokio::test]
async fn create_room_closes_dialog_and_lists_room() {
    let directory = Arc::new(MemoryDirectory::new());
    let script = open_and_type("Team Sync")
        .send(RoomListEvent::Confirm)
        .wait_until("room listed", |app| {
            !app.room_list().dialog().is_open() && app.room_list().room("Team Sync").is_some()
        });

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(directory.snapshot(), vec![Room::new("Team Sync", "alice")]);

    let driver = runtime.driver();
    assert!(driver.is_stopped());
    let frame = driver.last_frame().unwrap();
    assert_eq!(frame.destination, Destination::ChatRoomList);
    assert_eq!(frame.dialog, DialogState::Closed);
    assert_eq!(frame.rooms, vec![Room::new("Team Sync", "alice")]);
}

#[tokio::test]
async fn input_after_create_is_not_lost() {
    // Creating a room wakes the room list and the completion channel together,
    // racing the driver's next input.
    for _ in 0..25 {
        let directory = Arc::new(MemoryDirectory::new());
        let script = open_and_type("Team Sync")
            .send(RoomListEvent::Confirm)
            .wait_until("room listed", |app| app.room_list().room("Team Sync").is_some())
            .send(AppEvent::Notice("created".into()))
            .wait_until("notice shown", |app| app.status() == Some("created"));

        let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
        timeout(WAIT, runtime.run()).await.unwrap().unwrap();

        assert_eq!(runtime.driver().remaining_steps(), 0);
        assert_eq!(runtime.app().status(), Some("created"));
    }
}

#[tokio::test]
async fn empty_name_keeps_dialog_open_with_error() {
    let directory = Arc::new(MemoryDirectory::new());
    let script = open_and_type("")
        .send(RoomListEvent::Confirm)
        .wait_until("error shown", dialog_error);

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    let dialog = runtime.app().room_list().dialog();
    assert_eq!(dialog.draft(), Some(""));
    assert_eq!(dialog.error(), Some("Room name cannot be empty"));
    assert!(directory.snapshot().is_empty());
}

#[tokio::test]
async fn duplicate_name_reports_collision_and_keeps_first_room() {
    let directory = Arc::new(MemoryDirectory::with_rooms([Room::new("Team Sync", "bob")]));
    let script = open_and_type("Team Sync")
        .send(RoomListEvent::Confirm)
        .wait_until("error shown", dialog_error);

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    let dialog = runtime.app().room_list().dialog();
    assert_eq!(dialog.draft(), Some("Team Sync"));
    assert!(dialog.error().unwrap().contains("already exists"));
    assert_eq!(directory.snapshot(), vec![Room::new("Team Sync", "bob")]);
}

#[tokio::test]
async fn failed_insert_is_not_retried_and_user_can_resubmit() {
    let directory = Arc::new(FaultyDirectory::new(MemoryDirectory::new()));
    directory.inject(DirectoryFault::Insert("connection reset".into()));

    let script = open_and_type("Team Sync")
        .send(RoomListEvent::Confirm)
        .wait_until("error shown", dialog_error)
        .send(RoomListEvent::Confirm)
        .wait_until("dialog closed", |app| !app.room_list().dialog().is_open());

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(directory.insert_calls(), 2);
    assert_eq!(directory.inner().snapshot(), vec![Room::new("Team Sync", "alice")]);

    let error_frame = runtime
        .driver()
        .frames()
        .iter()
        .find_map(|frame| match &frame.dialog {
            DialogState::Open { error, .. } if !error.is_empty() => Some(error.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(error_frame, "Could not create room: connection reset");
}

#[tokio::test]
async fn double_confirm_sends_one_request() {
    let directory = Arc::new(
        FaultyDirectory::new(MemoryDirectory::new()).with_latency(Duration::from_millis(20)),
    );
    let script = open_and_type("Team Sync")
        .send_all([RoomListEvent::Confirm.into(), RoomListEvent::Confirm.into()])
        .wait_until("dialog closed", |app| !app.room_list().dialog().is_open());

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(directory.insert_calls(), 1);
}

#[tokio::test]
async fn cancel_then_reopen_starts_fresh() {
    let directory = Arc::new(MemoryDirectory::new());
    let script = open_and_type("")
        .send(RoomListEvent::Confirm)
        .wait_until("error shown", dialog_error)
        .send(RoomListEvent::Cancel)
        .send(RoomListEvent::OpenDialog);

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(
        runtime.app().room_list().dialog().state(),
        &DialogState::Open { draft: String::new(), error: String::new(), pending: None }
    );
}

#[tokio::test]
async fn selecting_a_room_opens_detail() {
    let directory = Arc::new(MemoryDirectory::with_rooms([Room::new("Team Sync", "bob")]));
    let script = ScriptedDriver::new()
        .wait_until("room listed", |app| app.room_list().room("Team Sync").is_some())
        .send(RoomListEvent::Select("Team Sync".into()));

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    let app = runtime.app();
    assert_eq!(app.current(), &Destination::ChatRoom { room_id: "Team Sync".into() });
    assert_eq!(app.current_room(), Some(&Room::new("Team Sync", "bob")));
}

#[tokio::test]
async fn rooms_created_elsewhere_appear() {
    let directory = Arc::new(MemoryDirectory::new());
    let script = ScriptedDriver::new()
        .wait_until("second client's room listed", |app| app.room_list().rooms().len() == 1);

    let writer = tokio::spawn({
        let directory = Arc::clone(&directory);
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            directory.insert(Room::new("lobby", "carol")).await
        }
    });

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();
    writer.await.unwrap().unwrap();

    assert_eq!(runtime.app().room_list().rooms(), &[Room::new("lobby", "carol")]);
}

#[tokio::test]
async fn login_lands_on_room_list_without_history() {
    let directory = Arc::new(MemoryDirectory::new());
    let identity =
        Arc::new(MemoryIdentity::new().with_account("alice@example.com", "secret1", "alice").unwrap());

    let script = ScriptedDriver::new()
        .send(AppEvent::ChooseLogin)
        .send(AppEvent::SubmitLogin {
            email: "alice@example.com".into(),
            password: "secret1".into(),
        })
        .wait_until("signed in", |app| app.session().is_some());

    let mut runtime = Runtime::new(script, provider(&directory), identity);
    assert_eq!(runtime.app().current(), &Destination::Register);

    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    let app = runtime.app();
    assert_eq!(app.router().history(), &[Destination::ChatRoomList]);
    assert_eq!(app.session().map(|s| s.display_name.as_str()), Some("alice"));
}

#[tokio::test]
async fn register_then_create_uses_new_display_name() {
    let directory = Arc::new(MemoryDirectory::new());
    let identity = Arc::new(MemoryIdentity::new());

    let script = ScriptedDriver::new()
        .send(AppEvent::SubmitRegister {
            email: "dana@example.com".into(),
            password: "secret1".into(),
            display_name: "Dana".into(),
        })
        .wait_until("signed in", |app| app.session().is_some())
        .send(RoomListEvent::OpenDialog)
        .send(RoomListEvent::EditDraft("Design".into()))
        .send(RoomListEvent::Confirm)
        .wait_until("room listed", |app| app.room_list().room("Design").is_some());

    let mut runtime = Runtime::new(script, provider(&directory), identity);
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(directory.snapshot(), vec![Room::new("Design", "Dana")]);
}

#[tokio::test]
async fn sign_out_returns_to_authentication_choice() {
    let directory = Arc::new(MemoryDirectory::new());
    let identity = alice_signed_in();
    let script = ScriptedDriver::new().send(AppEvent::SignOut);

    let mut runtime = Runtime::new(script, provider(&directory), Arc::clone(&identity));
    timeout(WAIT, runtime.run()).await.unwrap().unwrap();

    assert_eq!(identity.current_session(), None);
    assert_eq!(runtime.app().router().history(), &[Destination::AuthenticationOption]);
}

#[tokio::test]
async fn render_failure_stops_runtime() {
    let directory = Arc::new(MemoryDirectory::new());
    let script = ScriptedDriver::new().fail_render_at(0);

    let mut runtime = Runtime::new(script, provider(&directory), alice_signed_in());
    let result = timeout(WAIT, runtime.run()).await.unwrap();

    assert_eq!(result, Err(ScriptError::RenderFailed(0)));
    assert!(runtime.driver().is_stopped());
}
