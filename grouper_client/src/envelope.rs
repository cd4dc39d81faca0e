use grouper_proto::model::{Group, HydrationError, Person, ResolvedSubject, Subject};
use grouper_proto::v1::{
    is_lite_request_key, GrouperRequest, WsResultMetadata, GROUP_NOT_FOUND, INSUFFICIENT_PRIVILEGES,
};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::transport::TransportRequest;
use crate::{ClientError, EntityKind, GrouperClient};

/// The subject a request is performed on behalf of.
///
/// Exactly one of the two fields may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActAs {
    pub subject_id: Option<String>,
    pub subject_identifier: Option<String>,
}

impl ActAs {
    pub fn subject_id(id: &str) -> Self {
        ActAs {
            subject_id: Some(id.to_string()),
            subject_identifier: None,
        }
    }

    pub fn subject_identifier(identifier: &str) -> Self {
        ActAs {
            subject_id: None,
            subject_identifier: Some(identifier.to_string()),
        }
    }
}

impl From<&Subject> for ActAs {
    fn from(s: &Subject) -> Self {
        ActAs::subject_id(&s.id)
    }
}

impl From<&Person> for ActAs {
    fn from(p: &Person) -> Self {
        ActAs::subject_id(&p.subject.id)
    }
}

impl From<&Group> for ActAs {
    fn from(g: &Group) -> Self {
        ActAs::subject_id(&g.id)
    }
}

impl From<&ResolvedSubject> for ActAs {
    fn from(s: &ResolvedSubject) -> Self {
        ActAs::subject_id(s.id())
    }
}

/// Copy `body` with the act-as parameters added under its request key.
pub(crate) fn apply_act_as(body: &Value, act_as: Option<&ActAs>) -> Result<Value, ClientError> {
    let (lookup_key, lite_key, value) = match act_as {
        None => return Ok(body.clone()),
        Some(ActAs {
            subject_id: Some(_),
            subject_identifier: Some(_),
        }) => {
            return Err(ClientError::InvalidArgument(
                "Only one of act-as subject id or subject identifier may be given".to_string(),
            ))
        }
        Some(ActAs {
            subject_id: Some(id),
            subject_identifier: None,
        }) => ("subjectId", "actAsSubjectId", id),
        Some(ActAs {
            subject_id: None,
            subject_identifier: Some(identifier),
        }) => ("subjectIdentifier", "actAsSubjectIdentifier", identifier),
        Some(ActAs {
            subject_id: None,
            subject_identifier: None,
        }) => return Ok(body.clone()),
    };

    let mut body = body.clone();
    let (request_key, params) = body
        .as_object_mut()
        .and_then(|o| o.iter_mut().next())
        .ok_or_else(|| {
            ClientError::InvalidArgument("Request body has no operation key".to_string())
        })?;
    let lite = is_lite_request_key(request_key);
    let params = params.as_object_mut().ok_or_else(|| {
        ClientError::InvalidArgument(format!("Parameters of {} are not an object", request_key))
    })?;

    if lite {
        params.insert(lite_key.to_string(), Value::String(value.clone()));
    } else {
        let mut lookup = Map::new();
        lookup.insert(lookup_key.to_string(), Value::String(value.clone()));
        params.insert("actAsSubjectLookup".to_string(), Value::Object(lookup));
    }
    Ok(body)
}

/// The `key=value` field at `index` of a comma separated result message.
pub(crate) fn name_from_message(message: &str, index: usize) -> Option<String> {
    message
        .split(',')
        .nth(index)?
        .split('=')
        .nth(1)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A reply whose `resultMetadata.success` was not `T`.
#[derive(Debug)]
pub(crate) struct Failure<'a> {
    pub metadata: WsResultMetadata,
    pub body: &'a Value,
    pub raw: &'a Value,
}

impl Failure<'_> {
    pub fn result_code(&self) -> Option<&str> {
        self.metadata.result_code.as_deref()
    }

    pub fn result_message(&self) -> &str {
        self.metadata.result_message.as_deref().unwrap_or("")
    }

    /// `resultMetadata` of each entry under `results`.
    pub fn items(&self) -> Vec<WsResultMetadata> {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| r.get("resultMetadata"))
                    .filter_map(|m| serde_json::from_value(m.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn any_item_has_code(&self, code: &str) -> bool {
        self.items()
            .iter()
            .any(|m| m.result_code.as_deref() == Some(code))
    }

    pub fn not_found(&self, kind: EntityKind, identifier: &str) -> ClientError {
        ClientError::EntityNotFound {
            kind,
            identifier: identifier.to_string(),
            raw: Box::new(self.raw.clone()),
        }
    }

    /// `code` with a nested insufficient privileges item is a permission failure.
    pub fn permission_denied_for(&self, code: &str) -> Option<ClientError> {
        if self.result_code() == Some(code)
            && self.any_item_has_code(INSUFFICIENT_PRIVILEGES)
        {
            Some(ClientError::PermissionDenied(Box::new(self.raw.clone())))
        } else {
            None
        }
    }
}

/// `GROUP_NOT_FOUND` on a call naming a single group.
pub(crate) fn group_not_found(f: &Failure<'_>, group_name: &str) -> Option<ClientError> {
    if f.result_code() == Some(GROUP_NOT_FOUND) {
        Some(f.not_found(EntityKind::Group, group_name))
    } else {
        None
    }
}

/// A successful reply, decoded, with the raw document kept for error reporting.
#[derive(Debug)]
pub(crate) struct Reply<T> {
    pub results: T,
    pub raw: Value,
}

impl<T> Reply<T> {
    pub fn unexpected(&self, reason: String) -> ClientError {
        ClientError::UnexpectedResult {
            reason,
            raw: Box::new(self.raw.clone()),
        }
    }

    pub fn not_found(&self, kind: EntityKind, identifier: &str) -> ClientError {
        ClientError::EntityNotFound {
            kind,
            identifier: identifier.to_string(),
            raw: Box::new(self.raw.clone()),
        }
    }

    pub fn hydrated<U>(&self, result: Result<U, HydrationError>) -> Result<U, ClientError> {
        result.map_err(|e| self.unexpected(e.to_string()))
    }
}

pub(crate) fn unexpected(reason: String, raw: &Value) -> ClientError {
    ClientError::UnexpectedResult {
        reason,
        raw: Box::new(raw.clone()),
    }
}

impl GrouperClient {
    fn exchange(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        act_as: Option<&ActAs>,
    ) -> Result<Value, ClientError> {
        let body = apply_act_as(body, act_as)?;
        let request = TransportRequest {
            method,
            path: path.to_string(),
            body,
        };
        let response = self.transport.send(&request)?;

        if response.status == StatusCode::UNAUTHORIZED {
            warn!("Grouper rejected the credentials for {}", path);
            return Err(ClientError::Unauthorized(response.body));
        }

        match serde_json::from_str(&response.body) {
            Ok(v) => Ok(v),
            Err(e) => {
                error!(?e, status = %response.status, "Unable to decode reply");
                Err(ClientError::JsonDecode(e, response.body))
            }
        }
    }

    /// POST `request` to `path` and decode its results.
    ///
    /// When Grouper reports a failure, `classify` may turn it into a specific
    /// error; anything it declines becomes [`ClientError::UnexpectedResult`].
    pub(crate) fn perform_grouper_request<R, F>(
        &self,
        path: &str,
        request: &R,
        act_as: Option<&ActAs>,
        classify: F,
    ) -> Result<Reply<R::Results>, ClientError>
    where
        R: GrouperRequest,
        F: FnOnce(&Failure<'_>) -> Option<ClientError>,
    {
        let params = serde_json::to_value(request).map_err(ClientError::JsonEncode)?;
        let mut envelope = Map::new();
        envelope.insert(R::REQUEST_KEY.to_string(), params);
        debug!("{} -> {}", R::REQUEST_KEY, path);

        let raw = self.exchange(Method::POST, path, &Value::Object(envelope), act_as)?;

        let body = raw
            .get(R::RESULTS_KEY)
            .ok_or_else(|| unexpected(format!("Reply has no {} key", R::RESULTS_KEY), &raw))?;
        let metadata: WsResultMetadata = body
            .get("resultMetadata")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| unexpected(format!("Invalid resultMetadata: {}", e), &raw))?
            .unwrap_or_default();

        if !metadata.is_success() {
            debug!("{} failed {}", R::RESULTS_KEY, metadata);
            let failure = Failure {
                metadata,
                body,
                raw: &raw,
            };
            return Err(classify(&failure).unwrap_or_else(|| {
                unexpected(
                    format!(
                        "{} did not succeed: {}",
                        R::RESULTS_KEY,
                        failure.result_code().unwrap_or("<no resultCode>")
                    ),
                    &raw,
                )
            }));
        }

        let results = serde_json::from_value(body.clone()).map_err(|e| {
            unexpected(format!("Unable to decode {}: {}", R::RESULTS_KEY, e), &raw)
        })?;
        Ok(Reply { results, raw })
    }

    /// Send an arbitrary request body and return Grouper's full reply.
    ///
    /// The reply must carry `resultMetadata.success == "T"` under its single
    /// top-level key; otherwise the call fails with
    /// [`ClientError::UnexpectedResult`] holding the reply.
    pub fn call_grouper(
        &self,
        path: &str,
        method: Method,
        body: &Value,
        act_as: Option<&ActAs>,
    ) -> Result<Value, ClientError> {
        let raw = self.exchange(method, path, body, act_as)?;
        let success = raw
            .as_object()
            .and_then(|o| o.values().next())
            .and_then(|b| b.get("resultMetadata"))
            .and_then(|m| m.get("success"))
            .and_then(Value::as_str);
        if success != Some("T") {
            return Err(unexpected(
                format!("Call to {} did not succeed", path),
                &raw,
            ));
        }
        Ok(raw)
    }
}
