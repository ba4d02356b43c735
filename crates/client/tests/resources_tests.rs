//! Resource endpoint tests: equipment, history, tasks, task logs,
//! attachments and users.

mod common;

use chrono::{TimeDelta, Utc};
use common::*;
use maintdesk_client::{
    AttachmentUpload, CreateUserParams, EquipmentParams, Role, TaskLogParams, TaskParams,
    TaskStatus, UpdateUserParams,
};
use secrecy::SecretString;
use wiremock::matchers::{body_json, header, method, path, query_param};

fn logged_in(server: &MockServer, role: &str) -> Harness {
    let h = harness(server, "/");
    seed_session(
        &h.store,
        "valid-token",
        Some("refresh-1"),
        Utc::now() + TimeDelta::hours(1),
        role,
    );
    h
}

#[tokio::test]
async fn test_equipment_crud() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Equipment"))
        .and(header("Authorization", "Bearer valid-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("equipment/list_equipment.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Equipment"))
        .and(body_json(serde_json::json!({"name": "Lathe", "location": "Bay 4"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 7, "name": "Lathe", "location": "Bay 4"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/Equipment/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/Equipment/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in(&server, "Technician");

    let equipment = h.client.list_equipment().await.unwrap();
    assert_eq!(equipment.len(), 3);
    assert_eq!(equipment[0].name, "Hydraulic Press");

    let created = h
        .client
        .create_equipment(&EquipmentParams {
            name: Some("Lathe".to_string()),
            location: Some("Bay 4".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 7);

    let updated = h
        .client
        .update_equipment(
            7,
            &EquipmentParams {
                status: Some("Retired".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_none());

    h.client.delete_equipment(7).await.unwrap();
}

#[tokio::test]
async fn test_filtered_lists_send_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tasks"))
        .and(query_param("equipmentId", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("tasks/list_tasks.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/MaintenanceHistory"))
        .and(query_param("equipmentId", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("history/list_history.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/TaskLogs"))
        .and(query_param("taskId", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("task_logs/list_task_logs.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in(&server, "Technician");

    let tasks = h.client.list_tasks(Some(1)).await.unwrap();
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(tasks[1].status, TaskStatus::Open);

    let history = h.client.list_history(Some(1)).await.unwrap();
    assert_eq!(history.len(), 1);

    let logs = h.client.list_task_logs(Some(10)).await.unwrap();
    assert_eq!(logs[0].task_id, 10);
}

#[tokio::test]
async fn test_create_task_and_log() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Tasks"))
        .and(body_json(serde_json::json!({
            "equipmentId": 1,
            "title": "Grease bearings",
            "status": "Open"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 12, "equipmentId": 1, "title": "Grease bearings", "status": "Open"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/TaskLogs"))
        .and(body_json(serde_json::json!({"taskId": 12, "message": "Started"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 300, "taskId": 12, "message": "Started"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in(&server, "Technician");

    let task = h
        .client
        .create_task(&TaskParams {
            equipment_id: Some(1),
            title: Some("Grease bearings".to_string()),
            status: Some(TaskStatus::Open),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(task.id, 12);

    let log = h
        .client
        .create_task_log(&TaskLogParams {
            task_id: task.id,
            message: "Started".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(log.id, 300);
}

#[tokio::test]
async fn test_invalid_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Equipment/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let h = logged_in(&server, "Technician");
    let err = h.client.get_equipment(1).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_attachment_upload_is_replayed_after_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Attachments"))
        .and(header("Authorization", bearer(REFRESHED_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(load_fixture("attachments/upload_success.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Attachments"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Authentication/RefreshToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/refresh_success.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, "/attachments");
    seed_expired_session(&h.store, Some("refresh-1"));

    let upload = AttachmentUpload {
        file_name: "report.pdf".to_string(),
        content_type: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.7 test".to_vec(),
        task_id: Some(10),
        equipment_id: None,
    };
    let attachment = h.client.upload_attachment(&upload).await.unwrap();
    assert_eq!(attachment.id, 900);

    let received = server.received_requests().await.unwrap();
    let replay = received
        .iter()
        .filter(|r| r.url.path() == "/Attachments")
        .next_back()
        .unwrap();
    let body = String::from_utf8_lossy(&replay.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"report.pdf\""));
    assert!(body.contains("%PDF-1.7 test"));
    assert!(body.contains("name=\"taskId\""));
}

#[tokio::test]
async fn test_attachment_download_returns_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Attachments/900/Download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_bytes(b"hello".to_vec()),
        )
        .mount(&server)
        .await;

    let h = logged_in(&server, "Technician");
    let content = h.client.download_attachment(900).await.unwrap();
    assert_eq!(content.bytes, b"hello");
    assert_eq!(content.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_users_require_admin_role() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("users/list_users.json")))
        .expect(1)
        .mount(&server)
        .await;

    let technician = logged_in(&server, "Technician");
    let err = technician.client.list_users().await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    let anonymous = harness(&server, "/login");
    let err = anonymous
        .client
        .delete_user("5")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    let admin = logged_in(&server, "Admin");
    let users = admin.client.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_admin_user_management() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Users"))
        .and(body_json(serde_json::json!({
            "name": "Robin",
            "email": "robin@example.com",
            "password": "initial-pw",
            "role": "Technician"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 8, "name": "Robin", "email": "robin@example.com", "role": "Technician"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/Users/8"))
        .and(body_json(serde_json::json!({"role": "Admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 8, "name": "Robin", "email": "robin@example.com", "role": "Admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let admin = logged_in(&server, "Admin");

    let user = admin
        .client
        .create_user(&CreateUserParams {
            name: "Robin".to_string(),
            email: "robin@example.com".to_string(),
            password: SecretString::new("initial-pw".to_string().into()),
            role: Role::Technician,
        })
        .await
        .unwrap();
    assert_eq!(user.id, "8");

    let updated = admin
        .client
        .update_user(
            &user.id,
            &UpdateUserParams {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.role, Some(Role::Admin));
}
