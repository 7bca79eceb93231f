//! Shader source normalization.

const VERSION_DIRECTIVE: &str = "#version";

/// Remove `#version` directive lines and trim the result.
///
/// The target context only accepts its own fixed GLSL dialect, so any version the
/// generator declared (`#version 300 es`, `#version 330 core`) has to go.
pub fn strip_version_directives(source: &str) -> String {
    let has_directive = source
        .lines()
        .any(|line| line.trim_start().starts_with(VERSION_DIRECTIVE));
    if !has_directive {
        return source.trim().to_string();
    }

    source
        .lines()
        .filter(|line| !line.trim_start().starts_with(VERSION_DIRECTIVE))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_directive() {
        let src = "#version 300 es\nprecision mediump float;\nvoid main() {}\n";
        assert_eq!(strip_version_directives(src), "precision mediump float;\nvoid main() {}");
    }

    #[test]
    fn test_strip_indented_directive() {
        let src = "\n   #version 100\nvoid main() {}";
        assert_eq!(strip_version_directives(src), "void main() {}");
    }

    #[test]
    fn test_no_directive_is_trimmed() {
        assert_eq!(strip_version_directives("  void main() {}  \n"), "void main() {}");
    }

    #[test]
    fn test_directive_text_inside_comment_kept() {
        let src = "// uses #version 100 semantics\nvoid main() {}";
        assert_eq!(strip_version_directives(src), src);
    }
}
