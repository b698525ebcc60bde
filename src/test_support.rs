use crate::error::{QuillError, Result};
use crate::resolver::{AccessGrant, AgentRole, CredentialSource, ResolvedAgent};
use crate::runtime::{AgentInvoker, InvocationRequest, InvocationSession};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{self, Read};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server};

/// A canned HTTP response served by [`MockServer`].
pub(crate) struct MockResponse {
    status: u16,
    body: String,
    content_type: &'static str,
}

impl MockResponse {
    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
        }
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "text/plain",
        }
    }
}

/// A request as seen by [`MockServer`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// In-process HTTP server answering requests with canned responses, in order.
///
/// The server thread stops after the last response or after a few seconds
/// without a request, so a test that sends fewer requests than expected still
/// finishes.
pub(crate) struct MockServer {
    url: String,
    handle: Option<JoinHandle<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub(crate) fn start(responses: Vec<MockResponse>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("mock http server");
        let url = format!("http://{}", server.server_addr());

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for canned in responses {
                let mut request = match server.recv_timeout(Duration::from_secs(5)) {
                    Ok(Some(request)) => request,
                    _ => break,
                };

                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                recorded.push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.as_str().to_string(), h.value.to_string()))
                        .collect(),
                    body,
                });

                let response = Response::from_string(canned.body)
                    .with_status_code(canned.status)
                    .with_header(
                        Header::from_bytes("Content-Type", canned.content_type).unwrap(),
                    );
                request.respond(response).unwrap();
            }
            recorded
        });

        Self {
            url,
            handle: Some(handle),
        }
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the server thread and return every request it saw.
    pub(crate) fn finish(mut self) -> Vec<RecordedRequest> {
        self.handle
            .take()
            .expect("server already finished")
            .join()
            .expect("mock server thread")
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local tracing subscriber and return its output.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

/// A call received by [`FakeInvoker`].
#[derive(Debug, Clone)]
pub(crate) struct InvokeCall {
    pub(crate) endpoint_id: String,
    pub(crate) region: String,
    pub(crate) system_prompt: String,
    pub(crate) prompt: String,
    pub(crate) model: Option<String>,
    pub(crate) session: InvocationSession,
    pub(crate) token: String,
}

/// Agent invoker that replays queued replies and records every call.
#[derive(Default)]
pub(crate) struct FakeInvoker {
    replies: RefCell<VecDeque<Result<String>>>,
    calls: RefCell<Vec<InvokeCall>>,
}

impl FakeInvoker {
    pub(crate) fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fake = Self::default();
        for reply in replies {
            fake.push(Ok(reply.into()));
        }
        fake
    }

    pub(crate) fn push(&self, reply: Result<String>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<InvokeCall> {
        self.calls.borrow().clone()
    }
}

impl AgentInvoker for FakeInvoker {
    fn invoke(
        &self,
        request: &InvocationRequest<'_>,
        session: &InvocationSession,
        grant: &AccessGrant,
    ) -> Result<String> {
        self.calls.borrow_mut().push(InvokeCall {
            endpoint_id: request.endpoint_id.to_string(),
            region: request.region.to_string(),
            system_prompt: request.system_prompt.to_string(),
            prompt: request.prompt.to_string(),
            model: request.model.map(str::to_string),
            session: session.clone(),
            token: grant.token().to_string(),
        });

        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(QuillError::Invocation("no reply queued".to_string())))
    }
}

/// Credential source backed by a fixed role table.
#[derive(Default)]
pub(crate) struct FakeCredentials {
    roles: HashMap<String, AgentRole>,
    requested: RefCell<Vec<String>>,
}

impl FakeCredentials {
    /// Register every default stage role with an endpoint named after it.
    pub(crate) fn with_stage_roles() -> Self {
        let mut fake = Self::default();
        for stage in crate::pipeline::Stage::ALL {
            let role = stage.default_role();
            fake = fake.with_role(AgentRole {
                name: role.to_string(),
                system_prompt: format!("You are the {} agent.", stage),
                model: None,
                endpoint_id: Some(format!(
                    "arn:aws:bedrock-agentcore:us-west-2:000000000000:runtime/{}",
                    role
                )),
            });
        }
        fake
    }

    pub(crate) fn with_role(mut self, role: AgentRole) -> Self {
        self.roles.insert(role.name.clone(), role);
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl CredentialSource for FakeCredentials {
    fn resolve(&self, role_name: &str) -> Result<ResolvedAgent> {
        self.requested.borrow_mut().push(role_name.to_string());
        let role = self
            .roles
            .get(role_name)
            .cloned()
            .ok_or_else(|| QuillError::RoleNotFound(role_name.to_string()))?;

        Ok(ResolvedAgent {
            grant: AccessGrant::new(format!("token-for-{}", role_name)),
            role,
        })
    }
}
