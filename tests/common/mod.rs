#![allow(dead_code)]
//! Shared JSON fixtures for the wiremock-backed integration tests

use serde_json::{json, Value};
use taskboard::TaskStatus;

pub fn task_json(id: &str, column_id: &str, position: usize) -> Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "status": TaskStatus::for_column(column_id).as_str(),
        "priority": "MEDIUM",
        "type": "task",
        "reporter": {"id": "u1", "name": "Ada", "email": "ada@example.com"},
        "projectId": "p1",
        "columnId": column_id,
        "position": position,
        "createdAt": "2026-08-01T10:00:00Z",
        "updatedAt": "2026-08-02T10:00:00Z"
    })
}

pub fn column_json(id: &str, title: &str, position: usize, wip_limit: Option<usize>) -> Value {
    let mut column = json!({
        "id": id,
        "title": title,
        "color": "#f4f5f7",
        "position": position,
        "isDroppable": true,
        "isDraggable": true,
        "kanbanId": "k1",
        "createdAt": "2026-07-01T09:00:00Z",
        "updatedAt": "2026-07-01T09:00:00Z"
    });
    if let Some(limit) = wip_limit {
        column["wipLimit"] = json!(limit);
    }
    column
}

pub fn settings_json() -> Value {
    json!({
        "enableWipLimit": true,
        "showTaskCount": true,
        "showPriority": true,
        "showAssignee": true,
        "showLabels": true,
        "showDueDate": true,
        "cardDisplayMode": "detailed",
        "autoRefreshInterval": 30
    })
}

pub fn board_json(id: &str, name: &str, columns: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "columns": columns,
        "projectId": "p1",
        "createdBy": "u1",
        "memberIds": ["u1"],
        "isDefault": false,
        "settings": settings_json(),
        "createdAt": "2026-07-01T09:00:00Z",
        "updatedAt": "2026-07-01T09:00:00Z"
    })
}
