//! TypeScript-friendly type definitions for WASM bindings.

use serde::{Deserialize, Serialize};

use prism_render::RenderReport;
use prism_service::ServiceConfig;
use prism_ui::ShaderPanel;

/// Service configuration from JavaScript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfigJs {
    /// Base URL of the generation service.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Endpoint path below the base URL.
    #[serde(default)]
    pub path: Option<String>,
}

impl ServiceConfigJs {
    pub fn into_core(self) -> ServiceConfig {
        let mut config = ServiceConfig::default();
        if let Some(base_url) = self.base_url.filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(path) = self.path {
            config.path = path;
        }
        config
    }
}

/// Render report for JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReportJs {
    pub draw_mode: String,
    pub vertex_count: usize,
    pub index_count: usize,
    pub position_bound: bool,
    pub warnings: Vec<String>,
}

impl From<&RenderReport> for RenderReportJs {
    fn from(report: &RenderReport) -> Self {
        Self {
            draw_mode: report.draw_mode.as_token().to_string(),
            vertex_count: report.vertex_count,
            index_count: report.index_count,
            position_bound: report.position_bound,
            warnings: report.warnings.clone(),
        }
    }
}

/// Everything the host page needs to draw the shader panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaderPanelViewJs {
    pub description: String,
    pub loading: bool,
    pub can_generate: bool,
    pub button_label: String,
    pub error: Option<String>,
    /// Pretty-printed reply of the current shader.
    pub shader_json: Option<String>,
}

impl From<&ShaderPanel> for ShaderPanelViewJs {
    fn from(panel: &ShaderPanel) -> Self {
        Self {
            description: panel.description().to_string(),
            loading: panel.is_loading(),
            can_generate: panel.can_generate(),
            button_label: panel.button_label().to_string(),
            error: panel.error().map(str::to_string),
            shader_json: panel.raw_json_pretty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{DrawMode, ServiceError};
    use prism_service::DEFAULT_BACKEND_URL;

    #[test]
    fn test_service_config_from_js() {
        let js: ServiceConfigJs = serde_json::from_str(r#"{"baseUrl":"https://gen.example"}"#).unwrap();
        let config = js.into_core();
        assert_eq!(config.endpoint(), "https://gen.example/generate-shader");
    }

    #[test]
    fn test_blank_base_url_keeps_default() {
        let config = ServiceConfigJs {
            base_url: Some("  ".into()),
            path: None,
        }
        .into_core();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_render_report_field_names() {
        let report = RenderReport {
            draw_mode: DrawMode::TriangleFan,
            vertex_count: 4,
            index_count: 6,
            position_bound: true,
            warnings: vec![],
        };
        let json = serde_json::to_value(RenderReportJs::from(&report)).unwrap();
        assert_eq!(json["drawMode"], "TRIANGLE_FAN");
        assert_eq!(json["indexCount"], 6);
        assert_eq!(json["positionBound"], true);
    }

    #[test]
    fn test_panel_view() {
        let mut panel = ShaderPanel::new();
        panel.set_description("a cube");
        panel.begin_request();
        let view = ShaderPanelViewJs::from(&panel);
        assert!(view.loading);
        assert!(!view.can_generate);
        assert_eq!(view.button_label, "Generating...");

        panel.finish_request(Err(ServiceError::Service {
            status: 500,
            message: Some("rate limited".into()),
        }));
        let view = ShaderPanelViewJs::from(&panel);
        assert_eq!(view.error.as_deref(), Some("rate limited"));
        assert_eq!(view.shader_json, None);
    }
}
