#![allow(dead_code)]
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use grouper_client::{
    ClientError, GrouperClient, GrouperClientBuilder, Transport, TransportRequest,
    TransportResponse,
};
use serde_json::{json, Value};

pub const TEST_ADDRESS: &str = "https://grouper.example.com/grouper-ws/servicesRest/json/v2_5_000";
pub const TEST_USER: &str = "grouper_ws";
pub const TEST_PASSWORD: &str = "integration test password";

pub type RequestLog = Arc<Mutex<Vec<TransportRequest>>>;

/// Answers each request with the next queued reply and records what was sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<TransportResponse>>>,
    log: RequestLog,
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, ClientError> {
        self.log.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("No reply scripted for {}", request.path));
        Ok(reply)
    }
}

pub fn run_test_with_responses<F>(replies: Vec<TransportResponse>, test_fn: F)
where
    F: FnOnce(GrouperClient, RequestLog),
{
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let log = RequestLog::default();
    let transport = ScriptedTransport {
        replies: Arc::new(Mutex::new(replies.into_iter().collect())),
        log: log.clone(),
    };
    let client = GrouperClientBuilder::new()
        .address(TEST_ADDRESS.to_string())
        .username(TEST_USER.to_string())
        .password(TEST_PASSWORD.to_string())
        .universal_identifier_attr("uid".to_string())
        .build_with_transport(Box::new(transport))
        .expect("Failed to build client");

    test_fn(client, log.clone());
}

// Test external behaviours of the client against canned Grouper replies.

pub fn run_test<F>(replies: Vec<Value>, test_fn: F)
where
    F: FnOnce(GrouperClient, RequestLog),
{
    run_test_with_responses(
        replies
            .into_iter()
            .map(|v| TransportResponse::ok(v.to_string()))
            .collect(),
        test_fn,
    )
}

/// The single request body sent at `index`, without its envelope key.
pub fn sent_params(log: &RequestLog, index: usize, request_key: &str) -> Value {
    let log = log.lock().unwrap();
    log.get(index)
        .and_then(|r| r.body.get(request_key))
        .cloned()
        .unwrap_or_else(|| panic!("Request {} carries no {}", index, request_key))
}

pub fn sent_path(log: &RequestLog, index: usize) -> String {
    log.lock().unwrap()[index].path.clone()
}

pub fn sent_count(log: &RequestLog) -> usize {
    log.lock().unwrap().len()
}

pub fn success() -> Value {
    json!({"success": "T", "resultCode": "SUCCESS"})
}

pub fn failure(code: &str, message: &str) -> Value {
    json!({"success": "F", "resultCode": code, "resultMessage": message})
}

pub fn ws_group(uuid: &str, name: &str) -> Value {
    let extension = name.rsplit(':').next().unwrap_or(name);
    json!({
        "uuid": uuid,
        "name": name,
        "extension": extension,
        "displayName": name,
        "displayExtension": extension,
        "description": format!("{} description", extension),
        "enabled": "T",
        "typeOfGroup": "group",
        "idIndex": "10001"
    })
}

pub fn ws_stem(uuid: &str, name: &str) -> Value {
    let extension = name.rsplit(':').next().unwrap_or(name);
    json!({
        "uuid": uuid,
        "name": name,
        "extension": extension,
        "displayName": name,
        "displayExtension": extension,
        "description": format!("{} description", extension),
        "idIndex": "20001"
    })
}

/// A person with attributes in the order `["description", "name", "uid"]`.
pub fn ws_person(id: &str, uid: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Person {}", uid),
        "sourceId": "ldap",
        "success": "T",
        "resultCode": "SUCCESS",
        "attributeValues": [format!("{} description", uid), format!("Person {}", uid), uid]
    })
}

/// A group subject with attributes in the order `["description", "name", "uid"]`.
pub fn ws_group_subject(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "sourceId": "g:gsa",
        "success": "T",
        "resultCode": "SUCCESS",
        "attributeValues": [format!("{} description", name), name, ""]
    })
}

pub fn subject_attribute_names() -> Value {
    json!(["description", "name", "uid"])
}
