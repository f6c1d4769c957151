//! Commands dispatched the way the binary runs them, with scripted terminal input.

mod common;

use common::{Call, RecordingGateway, records};
use metadata_console::{
    controllers::metadata_list::{MSG_CREATE_EMPTY, MetadataListController},
    errors::AppError,
    handlers::{command_handlers::EditArgs, terminal::Terminal},
    routes::commands::{Command, dispatch},
    services::metadata_gateway::GENERIC_FAILURE_MESSAGE,
};

type Controller = MetadataListController<RecordingGateway>;

fn controller(active: usize, inactive: usize) -> Controller {
    MetadataListController::new(RecordingGateway::with_sets(
        records(1..=active as i64, "A"),
        records(100..=(99 + inactive as i64), "I"),
    ))
}

async fn run(controller: &mut Controller, command: Command, input: &str) -> Result<(), AppError> {
    let mut terminal = Terminal::new(input.as_bytes());
    dispatch(command, controller, &mut terminal).await
}

fn updated_title(call: &Call) -> Option<(i64, &str)> {
    match call {
        Call::Update(update) => Some((update.id, update.title.as_str())),
        _ => None,
    }
}

#[tokio::test]
async fn list_inactive_jumps_to_page() {
    let mut controller = controller(3, 6);
    let command = Command::List {
        inactive: true,
        page: Some(2),
    };

    run(&mut controller, command, "").await.unwrap();

    assert_eq!(controller.gateway().calls(), vec![Call::ListInactive]);
    assert!(!controller.state().showing_active_set);
    assert_eq!(controller.state().page, 2);
    let ids: Vec<i64> = controller.visible().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![104, 105]);
}

#[tokio::test]
async fn list_fails_when_backend_is_down() {
    let mut controller = controller(3, 0);
    controller.gateway().fail("list_active");
    let command = Command::List {
        inactive: false,
        page: None,
    };

    let err = run(&mut controller, command, "").await.unwrap_err();
    assert_eq!(err.exit_code, 1);
    assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn create_with_blank_url_is_a_usage_error() {
    let mut controller = controller(1, 0);

    let err = run(&mut controller, Command::Create { url: "  ".into() }, "")
        .await
        .unwrap_err();

    assert_eq!(err.exit_code, 2);
    assert_eq!(err.message, MSG_CREATE_EMPTY);
    assert!(controller.gateway().calls().is_empty());
}

#[tokio::test]
async fn deactivate_waits_for_an_answer() {
    let mut controller = controller(2, 0);
    run(&mut controller, Command::Deactivate { id: 1, yes: false }, "n\n")
        .await
        .unwrap();
    assert!(controller.gateway().calls().is_empty());

    run(&mut controller, Command::Deactivate { id: 1, yes: false }, "y\n")
        .await
        .unwrap();
    assert_eq!(
        controller.gateway().calls(),
        vec![Call::Deactivate(1), Call::ListActive]
    );
}

#[tokio::test]
async fn failed_status_change_exits_with_failure() {
    let mut controller = controller(0, 1);
    controller.gateway().fail("activate");

    let err = run(&mut controller, Command::Activate { id: 100, yes: true }, "")
        .await
        .unwrap_err();

    assert_eq!(err.exit_code, 1);
    assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
    assert_eq!(controller.gateway().calls(), vec![Call::Activate(100)]);
}

#[tokio::test]
async fn edit_finds_records_in_the_inactive_set() {
    let mut controller = controller(2, 2);
    let args = EditArgs {
        id: 101,
        title: Some("Renamed".into()),
        ..Default::default()
    };

    run(&mut controller, Command::Edit(args), "y\n").await.unwrap();

    let calls = controller.gateway().calls();
    assert_eq!(calls[..2], [Call::ListActive, Call::ListInactive]);
    assert_eq!(updated_title(&calls[2]), Some((101, "Renamed")));
    assert_eq!(calls[3], Call::ListInactive);
    assert_eq!(calls.len(), 4);
    assert!(controller.edit_buffer().is_none());
}

#[tokio::test]
async fn edit_of_unknown_record_is_not_found() {
    let mut controller = controller(1, 1);
    let args = EditArgs {
        id: 42,
        yes: true,
        ..Default::default()
    };

    let err = run(&mut controller, Command::Edit(args), "").await.unwrap_err();

    assert_eq!(err.exit_code, 3);
    assert_eq!(
        controller.gateway().calls(),
        vec![Call::ListActive, Call::ListInactive]
    );
}

#[tokio::test]
async fn edit_with_malformed_feeds_never_updates() {
    let mut controller = controller(1, 0);
    let args = EditArgs {
        id: 1,
        feeds: Some("not a list".into()),
        yes: true,
        ..Default::default()
    };

    let err = run(&mut controller, Command::Edit(args), "").await.unwrap_err();

    assert_eq!(err.exit_code, 1);
    assert_eq!(controller.gateway().calls(), vec![Call::ListActive]);
}

#[tokio::test]
async fn edit_without_overrides_is_a_no_op() {
    let mut controller = controller(1, 0);
    let args = EditArgs {
        id: 1,
        ..Default::default()
    };

    run(&mut controller, Command::Edit(args), "").await.unwrap();
    assert_eq!(controller.gateway().calls(), vec![Call::ListActive]);
}

#[tokio::test]
async fn browse_session_edits_an_inactive_record() {
    let mut controller = controller(5, 2);
    let script = "\
next
launch
toggle
edit 100
set title Fresh title
save
y
quit
page 2
";

    run(&mut controller, Command::Browse, script).await.unwrap();

    let calls = controller.gateway().calls();
    assert_eq!(calls[..2], [Call::ListActive, Call::ListInactive]);
    assert_eq!(updated_title(&calls[2]), Some((100, "Fresh title")));
    assert_eq!(calls[3], Call::ListInactive);
    assert_eq!(calls.len(), 4);
    // `page 2` came after `quit`
    assert_eq!(controller.state().page, 1);
    assert!(!controller.state().edit_form_open);
}

#[tokio::test]
async fn browse_declined_confirmation_keeps_the_record() {
    let mut controller = controller(2, 0);

    run(&mut controller, Command::Browse, "deactivate 2\nn\nnext\n")
        .await
        .unwrap();

    assert_eq!(controller.gateway().calls(), vec![Call::ListActive]);
    assert_eq!(controller.state().records.len(), 2);
}
