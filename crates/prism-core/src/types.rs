//! Value types exchanged between the service, the renderer, and the panels.

use std::fmt;

/// A shader program as described by the generation service.
///
/// Every field is optional because the payload comes from an untrusted upstream;
/// consumers check completeness with [`ShaderProgramDescription::is_complete`]
/// or [`ShaderProgramDescription::parts`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShaderProgramDescription {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vertex_shader_code: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fragment_shader_code: Option<String>,
    /// Flattened `x, y, z` triples.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vertices: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub indices: Option<Vec<f64>>,
    /// Primitive topology token, e.g. `"TRIANGLES"`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub draw_mode: Option<String>,
}

/// Borrowed view of the four mandatory fields of a complete description.
#[derive(Debug, Clone, Copy)]
pub struct ProgramParts<'a> {
    pub vertex_shader_code: &'a str,
    pub fragment_shader_code: &'a str,
    pub vertices: &'a [f64],
    pub indices: &'a [f64],
    pub draw_mode: DrawMode,
}

impl ShaderProgramDescription {
    /// Create a description from the four mandatory fields.
    pub fn new(
        vertex_shader_code: impl Into<String>,
        fragment_shader_code: impl Into<String>,
        vertices: Vec<f64>,
        indices: Vec<f64>,
    ) -> Self {
        Self {
            vertex_shader_code: Some(vertex_shader_code.into()),
            fragment_shader_code: Some(fragment_shader_code.into()),
            vertices: Some(vertices),
            indices: Some(indices),
            draw_mode: None,
        }
    }

    /// Set the draw mode token.
    pub fn with_draw_mode(mut self, token: impl Into<String>) -> Self {
        self.draw_mode = Some(token.into());
        self
    }

    /// Whether all four mandatory fields are present.
    ///
    /// Empty shader sources count as missing; empty arrays do not.
    pub fn is_complete(&self) -> bool {
        self.parts().is_some()
    }

    /// Borrow the mandatory fields, or `None` if any is missing.
    pub fn parts(&self) -> Option<ProgramParts<'_>> {
        let vertex_shader_code = self.vertex_shader_code.as_deref().filter(|s| !s.is_empty())?;
        let fragment_shader_code = self.fragment_shader_code.as_deref().filter(|s| !s.is_empty())?;
        Some(ProgramParts {
            vertex_shader_code,
            fragment_shader_code,
            vertices: self.vertices.as_deref()?,
            indices: self.indices.as_deref()?,
            draw_mode: self.draw_mode(),
        })
    }

    /// The requested topology, falling back to triangles.
    pub fn draw_mode(&self) -> DrawMode {
        DrawMode::from_token(self.draw_mode.as_deref())
    }
}

/// Primitive topology used for the indexed draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    pub const ALL: [DrawMode; 7] = [
        DrawMode::Points,
        DrawMode::Lines,
        DrawMode::LineLoop,
        DrawMode::LineStrip,
        DrawMode::Triangles,
        DrawMode::TriangleStrip,
        DrawMode::TriangleFan,
    ];

    /// Parse a WebGL topology name. Unknown or absent tokens yield `Triangles`.
    pub fn from_token(token: Option<&str>) -> Self {
        token.and_then(Self::parse).unwrap_or_default()
    }

    /// Parse an exact WebGL topology name.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_token() == token)
    }

    /// The WebGL constant name for this topology.
    pub fn as_token(self) -> &'static str {
        match self {
            DrawMode::Points => "POINTS",
            DrawMode::Lines => "LINES",
            DrawMode::LineLoop => "LINE_LOOP",
            DrawMode::LineStrip => "LINE_STRIP",
            DrawMode::Triangles => "TRIANGLES",
            DrawMode::TriangleStrip => "TRIANGLE_STRIP",
            DrawMode::TriangleFan => "TRIANGLE_FAN",
        }
    }

    /// The GL enum value (identical in WebGL 1 and desktop GL).
    pub fn gl_enum(self) -> u32 {
        match self {
            DrawMode::Points => 0x0000,
            DrawMode::Lines => 0x0001,
            DrawMode::LineLoop => 0x0002,
            DrawMode::LineStrip => 0x0003,
            DrawMode::Triangles => 0x0004,
            DrawMode::TriangleStrip => 0x0005,
            DrawMode::TriangleFan => 0x0006,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// The calculator tab's input and last result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatorState {
    pub expression: String,
    pub result: String,
}

impl CalculatorState {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: String::new(),
        }
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// The fixed canvas size used for generated shaders.
    pub const CANVAS: SurfaceSize = SurfaceSize { width: 500, height: 500 };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::CANVAS
    }
}
