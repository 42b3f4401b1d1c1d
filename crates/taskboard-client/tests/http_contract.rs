#![allow(missing_docs)]

use std::error::Error;
use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use taskboard_client::{
    ApiClient, ClientOptions, ErrorKind, ImageUpload, TasksClient, list_query,
};
use taskboard_core::{NewTask, Priority, TaskFilters, TaskId, TaskUpdate};

type TestResult = Result<(), Box<dyn Error + Send + Sync>>;

struct Captured {
    method: String,
    url: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Captured {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn query_pairs(&self) -> Result<Vec<(String, String)>, Box<dyn Error + Send + Sync>> {
        let url = reqwest::Url::parse(&format!("http://backend.invalid{}", self.url))?;
        Ok(url.query_pairs().into_owned().collect())
    }
}

struct Reply {
    status: u16,
    content_type: Option<&'static str>,
    body: String,
}

impl Reply {
    fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8"),
            body: body.to_string(),
        }
    }

    fn raw(status: u16, content_type: Option<&'static str>, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_owned(),
        }
    }
}

/// Serve exactly one request on an ephemeral port and report what arrived.
fn serve_once(
    reply: Reply,
) -> Result<(TasksClient, mpsc::Receiver<Captured>), Box<dyn Error + Send + Sync>> {
    let server = tiny_http::Server::http("127.0.0.1:0")?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or("test server is not bound to an IP address")?;
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok(mut request) = server.recv() else {
            return;
        };
        let mut body = Vec::new();
        let _ = request.as_reader().read_to_end(&mut body);
        let content_type = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Content-Type"))
            .map(|header| header.value.as_str().to_owned());
        let _ = tx.send(Captured {
            method: request.method().as_str().to_owned(),
            url: request.url().to_owned(),
            content_type,
            body,
        });

        let mut response =
            tiny_http::Response::from_data(reply.body.into_bytes()).with_status_code(reply.status);
        if let Some(value) = reply.content_type
            && let Ok(header) = tiny_http::Header::from_bytes("Content-Type", value)
        {
            response.add_header(header);
        }
        let _ = request.respond(response);
    });

    let client = TasksClient::from_options(ClientOptions {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(5),
    })?;
    Ok((client, rx))
}

fn task_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "desc",
        "completed": false,
        "priority": "low",
        "created_at": "2024-03-01T10:00:00.000Z",
        "updated_at": "2024-03-01T10:00:00.000Z",
        "images": []
    })
}

#[tokio::test]
async fn get_tasks_sends_filters_as_query_and_decodes_page() -> TestResult {
    let (client, rx) = serve_once(Reply::json(
        200,
        &json!({
            "tasks": [task_json(1, "a"), task_json(2, "b")],
            "pagination": {
                "current_page": 2,
                "total_pages": 3,
                "total_count": 25,
                "per_page": 10,
                "next_page": 3,
                "prev_page": 1
            }
        }),
    ))?;

    let filters = TaskFilters::default()
        .with_search("buy milk")
        .with_priority(Priority::High);
    let page = client.get_tasks(&filters, Some(2), Some(10)).await?;

    assert_eq!(page.tasks.len(), 2);
    assert_eq!(page.pagination.total_count, 25);
    assert_eq!(page.pagination.next_page, Some(3));

    let captured = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(captured.method, "GET");
    assert!(captured.url.starts_with("/tasks?"));
    assert_eq!(captured.query_pairs()?, list_query(&filters, Some(2), Some(10)));
    Ok(())
}

#[tokio::test]
async fn create_task_posts_multipart_with_one_image_part() -> TestResult {
    let (client, rx) = serve_once(Reply::json(201, &task_json(3, "t")))?;

    let task = NewTask::new("t", "d", Priority::Low);
    let image = ImageUpload::new("a.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    let created = client.create_task(&task, vec![image]).await?;
    assert_eq!(created.id, TaskId(3));

    let captured = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/tasks");
    let content_type = captured.content_type.clone().unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = captured.body_text();
    assert!(body.contains("name=\"task[title]\"\r\n\r\nt\r\n"));
    assert!(body.contains("name=\"task[description]\"\r\n\r\nd\r\n"));
    assert!(body.contains("name=\"task[priority]\"\r\n\r\nlow\r\n"));
    assert!(body.contains("name=\"task[completed]\"\r\n\r\nfalse\r\n"));
    assert_eq!(body.matches("name=\"task[images][]\"").count(), 1);
    assert!(body.contains("filename=\"a.png\""));
    assert!(body.contains("Content-Type: image/png"));
    Ok(())
}

#[tokio::test]
async fn create_task_without_images_is_still_multipart() -> TestResult {
    let (client, rx) = serve_once(Reply::json(201, &task_json(4, "plain")))?;

    let task = NewTask::new("plain", "", Priority::Medium);
    client.create_task(&task, Vec::new()).await?;

    let captured = rx.recv_timeout(Duration::from_secs(5))?;
    let content_type = captured.content_type.clone().unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = captured.body_text();
    assert!(!body.contains("task[description]"));
    assert!(!body.contains("task[images][]"));
    Ok(())
}

#[tokio::test]
async fn update_task_sends_only_given_fields() -> TestResult {
    let mut updated = task_json(1, "a");
    updated["completed"] = json!(true);
    let (client, rx) = serve_once(Reply::json(200, &updated))?;

    let task = client
        .update_task(TaskId(1), &TaskUpdate::completion(true))
        .await?;
    assert!(task.completed);

    let captured = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(captured.method, "PUT");
    assert_eq!(captured.url, "/tasks/1");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&captured.body)?;
    assert_eq!(body, json!({ "task": { "completed": true } }));
    Ok(())
}

#[tokio::test]
async fn delete_task_accepts_no_content() -> TestResult {
    let (client, rx) = serve_once(Reply::raw(204, None, ""))?;

    client.delete_task(TaskId(9)).await?;

    let captured = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.url, "/tasks/9");
    assert!(captured.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn unprocessable_entity_becomes_validation_error() -> TestResult {
    let (client, _rx) = serve_once(Reply::json(422, &json!({ "title": ["can't be blank"] })))?;

    let task = NewTask::new("", "", Priority::Low);
    let Err(err) = client.create_task(&task, Vec::new()).await else {
        panic!("422 should fail");
    };
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "title can't be blank");
    Ok(())
}

#[tokio::test]
async fn server_error_with_html_body_uses_status_line() -> TestResult {
    let (client, _rx) = serve_once(Reply::raw(500, Some("text/html"), "<h1>oops</h1>"))?;

    let Err(err) = client.get_tasks(&TaskFilters::default(), None, None).await else {
        panic!("500 should fail");
    };
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "HTTP 500: Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn missing_task_is_not_found() -> TestResult {
    let (client, _rx) = serve_once(Reply::json(404, &json!({ "error": "Not Found" })))?;

    let Err(err) = client.delete_task(TaskId(404)).await else {
        panic!("404 should fail");
    };
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Not Found");
    Ok(())
}

#[tokio::test]
async fn non_json_success_returns_nothing() -> TestResult {
    let (client, _rx) = serve_once(Reply::raw(200, Some("text/plain"), "ok"))?;

    let value: Option<Value> = client.api().get("/health", &[]).await?;
    assert!(value.is_none());
    Ok(())
}

#[tokio::test]
async fn refused_connection_is_network_error() -> TestResult {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let api = ApiClient::new(ClientOptions {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout: Duration::from_secs(5),
    })?;
    let client = TasksClient::new(api);

    let Err(err) = client.get_tasks(&TaskFilters::default(), Some(1), Some(10)).await else {
        panic!("closed port should fail");
    };
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.status().is_none());
    Ok(())
}
