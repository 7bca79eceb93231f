//! Request building and reply interpretation.

use prism_core::{ServiceError, ShaderProgramDescription};
use serde::Serialize;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::transport::{HttpReply, ShaderTransport};

/// A complete shader program plus the body it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedShader {
    pub program: ShaderProgramDescription,
    pub raw: Value,
}

impl GeneratedShader {
    /// The raw reply, pretty-printed with two-space indentation.
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    description: &'a str,
}

/// Client for the generation endpoint.
#[derive(Debug, Clone)]
pub struct ShaderService<T> {
    config: ServiceConfig,
    transport: T,
}

impl<T: ShaderTransport> ShaderService<T> {
    pub fn new(config: ServiceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the service for a shader matching `description`.
    pub async fn generate(&self, description: &str) -> Result<GeneratedShader, ServiceError> {
        let url = self.config.endpoint();
        let body = serde_json::to_value(GenerateRequest { description })
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        log::debug!("requesting shader from {}", url);
        let reply = self.transport.post_json(&url, &body).await.map_err(|e| {
            log::error!("shader request to {} failed: {}", url, e);
            e
        })?;
        log::debug!("shader service replied with status {}", reply.status);

        interpret_reply(&reply)
    }
}

/// Turn an HTTP reply into a shader or the error the user should see.
///
/// Non-success: the body's `error` string if there is one, else the generic
/// failure. Success: the body must decode as JSON and carry all four mandatory
/// fields with usable types.
pub fn interpret_reply(reply: &HttpReply) -> Result<GeneratedShader, ServiceError> {
    let parsed = serde_json::from_slice::<Value>(&reply.body);

    if !reply.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        return Err(ServiceError::Service {
            status: reply.status,
            message,
        });
    }

    let raw = parsed.map_err(|e| ServiceError::Transport(e.to_string()))?;
    let program = match serde_json::from_value::<ShaderProgramDescription>(raw.clone()) {
        Ok(program) => program,
        Err(e) => {
            log::warn!("malformed shader payload: {}", e);
            return Err(ServiceError::PayloadIncomplete);
        }
    };

    if !program.is_complete() {
        return Err(ServiceError::PayloadIncomplete);
    }

    Ok(GeneratedShader { program, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::DrawMode;
    use serde_json::json;
    use std::cell::RefCell;

    /// Answers every request with one canned reply and remembers what was sent.
    struct Scripted {
        reply: Result<HttpReply, ServiceError>,
        sent: RefCell<Vec<(String, Value)>>,
    }

    impl Scripted {
        fn json(status: u16, body: Value) -> Self {
            Self::raw(status, body.to_string())
        }

        fn raw(status: u16, body: impl Into<Vec<u8>>) -> Self {
            Self {
                reply: Ok(HttpReply::new(status, body)),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(ServiceError::Transport(message.to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl ShaderTransport for Scripted {
        async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, ServiceError> {
            self.sent.borrow_mut().push((url.to_string(), body.clone()));
            self.reply.clone()
        }
    }

    fn service(transport: Scripted) -> ShaderService<Scripted> {
        ShaderService::new(ServiceConfig::new("http://shaders.test/"), transport)
    }

    fn triangle() -> Value {
        json!({
            "vertexShaderCode": "attribute vec3 position; void main() { gl_Position = vec4(position, 1.0); }",
            "fragmentShaderCode": "void main() { gl_FragColor = vec4(1.0); }",
            "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0],
            "indices": [0, 1, 2],
            "drawMode": "TRIANGLES"
        })
    }

    #[test]
    fn test_request_shape() {
        let svc = service(Scripted::json(200, triangle()));
        pollster::block_on(svc.generate("a red triangle")).unwrap();

        let sent = svc.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "http://shaders.test/generate-shader");
        assert_eq!(sent[0].1, json!({ "description": "a red triangle" }));
    }

    #[test]
    fn test_success() {
        let shader = pollster::block_on(service(Scripted::json(200, triangle())).generate("x")).unwrap();
        assert_eq!(shader.program.vertices.as_deref().map(<[f64]>::len), Some(9));
        assert_eq!(shader.program.draw_mode(), DrawMode::Triangles);
        assert_eq!(shader.raw, triangle());
    }

    #[test]
    fn test_scenario_rate_limited() {
        let svc = service(Scripted::json(500, json!({ "error": "rate limited" })));
        let err = pollster::block_on(svc.generate("x")).unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
        assert!(matches!(err, ServiceError::Service { status: 500, .. }));
    }

    #[test]
    fn test_error_status_without_message() {
        let err = interpret_reply(&HttpReply::new(404, json!({}).to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate shader.");
    }

    #[test]
    fn test_error_status_with_html_body() {
        let err = interpret_reply(&HttpReply::new(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate shader.");
    }

    #[test]
    fn test_scenario_missing_indices() {
        let mut body = triangle();
        body.as_object_mut().unwrap().remove("indices");
        let err = interpret_reply(&HttpReply::new(200, body.to_string())).unwrap_err();
        assert_eq!(err, ServiceError::PayloadIncomplete);
        assert_eq!(err.to_string(), "Incomplete shader data received from the backend.");
    }

    #[test]
    fn test_empty_shader_counts_as_missing() {
        let mut body = triangle();
        body["fragmentShaderCode"] = json!("");
        let err = interpret_reply(&HttpReply::new(200, body.to_string())).unwrap_err();
        assert_eq!(err, ServiceError::PayloadIncomplete);
    }

    #[test]
    fn test_wrong_field_type_is_incomplete() {
        let mut body = triangle();
        body["vertices"] = json!("0,0,0");
        let err = interpret_reply(&HttpReply::new(200, body.to_string())).unwrap_err();
        assert_eq!(err, ServiceError::PayloadIncomplete);
    }

    #[test]
    fn test_undecodable_success_body() {
        let err = interpret_reply(&HttpReply::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ServiceError::Transport(ref m) if !m.is_empty()));
    }

    #[test]
    fn test_transport_failure_passed_through() {
        let svc = service(Scripted::failing("connection refused"));
        let err = pollster::block_on(svc.generate("x")).unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_empty_transport_message_falls_back() {
        let svc = service(Scripted::failing(""));
        let err = pollster::block_on(svc.generate("x")).unwrap_err();
        assert_eq!(err.to_string(), "An unexpected error occurred.");
    }

    #[test]
    fn test_pretty_json_two_space_indent() {
        let shader = interpret_reply(&HttpReply::new(200, triangle().to_string())).unwrap();
        let pretty = shader.pretty_json();
        assert!(pretty.starts_with("{\n  \""));
        assert!(pretty.contains("\"drawMode\": \"TRIANGLES\""));
    }
}
