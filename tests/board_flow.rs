//! End-to-end store flows against a mocked gateway: login, board and task
//! loading, task creation, board creation with its default column set, and
//! the column-delete cascade.

mod common;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{board_json, column_json, task_json};
use taskboard::{
    ApiClient, BoardError, BoardStore, CreateBoardRequest, CreateTaskRequest, TaskStore,
};

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/kanbans/k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(
            "k1",
            "Sprint board",
            vec![
                column_json("todo", "To Do", 0, None),
                column_json("in-progress", "In Progress", 1, Some(3)),
                column_json("review", "Review", 2, Some(2)),
                column_json("done", "Done", 3, None),
            ],
        )))
        .mount(server)
        .await;
}

async fn mount_tasks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "todo", 0),
            task_json("t2", "todo", 1),
            task_json("t3", "review", 0),
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_then_board_and_task_load() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "session-token",
            "user": {"id": "u1", "username": "ada", "role": "user"}
        })))
        .mount(&server)
        .await;
    mount_board(&server).await;
    mount_tasks(&server).await;

    let mut api = ApiClient::new(server.uri());
    api.login("ada", "pw").await.unwrap();
    let api = Arc::new(api);

    let mut boards = BoardStore::new(Arc::clone(&api));
    let mut tasks = TaskStore::new(Arc::clone(&api));

    let project_id = boards.load_board("k1").await.unwrap().project_id.clone();
    tasks.load_tasks(Some(&project_id)).await.unwrap();

    let column_ids: Vec<&str> = boards
        .current_columns()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(column_ids, vec!["todo", "in-progress", "review", "done"]);
    assert_eq!(tasks.tasks().len(), 3);
    assert_eq!(tasks.tasks_in_column("todo").len(), 2);
    assert!(boards.error().is_none());
    assert!(!tasks.loading());
}

#[tokio::test]
async fn test_create_task_lands_at_end_of_column() {
    let server = MockServer::start().await;
    mount_tasks(&server).await;
    // The store computes the next free position in the column; two tasks at
    // 0 and 1 mean the draft carries 2, and new tasks always start in todo.
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_partial_json(json!({
            "title": "Fix login",
            "status": "todo",
            "columnId": "todo",
            "position": 2,
            "actualHours": 0.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t9", "todo", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let api = Arc::new(ApiClient::new(server.uri()));
    let mut tasks = TaskStore::new(api);
    tasks.load_tasks(Some("p1")).await.unwrap();

    let created = tasks
        .create_task(CreateTaskRequest::new("Fix login", "u1", "p1", "todo"))
        .await
        .unwrap();
    assert_eq!(created.position, 2);
    assert_eq!(tasks.tasks_in_column("todo").len(), 3);
}

#[tokio::test]
async fn test_create_board_creates_default_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kanbans"))
        .and(body_partial_json(json!({
            "name": "New board",
            "projectId": "p1",
            "createdBy": "u1",
            "isDefault": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(board_json("k1", "New board", vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/kanban-columns"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(column_json("col-1", "To Do", 0, None)),
        )
        .expect(4)
        .mount(&server)
        .await;

    let api = Arc::new(ApiClient::new(server.uri()));
    let mut boards = BoardStore::new(api);

    let board = boards
        .create_board(CreateBoardRequest::new("New board", "p1"), "u1")
        .await
        .unwrap();
    assert_eq!(board.columns.len(), 4);
    assert_eq!(boards.boards().len(), 1);
}

#[tokio::test]
async fn test_create_board_cleans_up_columns_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kanbans"))
        .respond_with(ResponseTemplate::new(201).set_body_json(board_json("k1", "New board", vec![])))
        .mount(&server)
        .await;
    // First column create succeeds, the second fails; the created column
    // must then be deleted and the board kept without columns.
    Mock::given(method("POST"))
        .and(path("/kanban-columns"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(column_json("col-1", "To Do", 0, None)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/kanban-columns"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"message\":\"boom\"}"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/kanban-columns/col-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = Arc::new(ApiClient::new(server.uri()));
    let mut boards = BoardStore::new(api);

    let result = boards
        .create_board(CreateBoardRequest::new("New board", "p1"), "u1")
        .await;
    assert!(matches!(result, Err(BoardError::Api { status: 500, .. })));
    assert_eq!(boards.boards().len(), 1);
    assert!(boards.boards()[0].columns.is_empty());
    assert!(boards.error().is_some());
}

#[tokio::test]
async fn test_delete_column_purges_its_tasks() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    mount_tasks(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/kanban-columns/review"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = Arc::new(ApiClient::new(server.uri()));
    let mut boards = BoardStore::new(Arc::clone(&api));
    let mut tasks = TaskStore::new(Arc::clone(&api));
    boards.load_board("k1").await.unwrap();
    tasks.load_tasks(Some("p1")).await.unwrap();
    assert!(tasks.get_task("t3").is_some());

    boards.delete_column(&mut tasks, "review").await.unwrap();
    assert!(boards.column("review").is_none());
    assert!(tasks.get_task("t3").is_none());
    assert_eq!(tasks.tasks().len(), 2);
}

#[tokio::test]
async fn test_expired_token_surfaces_as_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"token expired\"}"))
        .mount(&server)
        .await;

    let api = Arc::new(ApiClient::new(server.uri()).with_token("stale"));
    let mut tasks = TaskStore::new(api);

    let result = tasks.load_tasks(None).await;
    assert!(matches!(result, Err(BoardError::Unauthorized(_))));
    assert!(tasks.tasks().is_empty());
    assert!(tasks.error().is_some());
}
