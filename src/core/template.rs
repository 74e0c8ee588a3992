//! String template rendering.
//!
//! Placeholders use `{{key}}` syntax. Lenient rendering substitutes the
//! keys it knows and leaves everything else verbatim; strict rendering
//! fails on the first placeholder with no corresponding variable.

use crate::error::{Error, Result};

pub struct TemplateVars;

impl TemplateVars {
    pub const PROJECT_NAME: &'static str = "projectName";
    pub const PROJECT_DESCRIPTION: &'static str = "projectDescription";
    pub const PROJECT_GITHUB_URL: &'static str = "projectGithubUrl";
    pub const PROJECT_TAGS: &'static str = "projectTags";
    pub const AUTHOR_NAME: &'static str = "authorName";
    pub const AUTHOR_EMAIL: &'static str = "authorEmail";
}

/// Lenient render: unknown placeholders survive verbatim. Total and
/// idempotent as long as no variable value itself introduces a
/// placeholder for another key.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// Strict render: every `{{key}}` placeholder in the template must have
/// a corresponding variable, otherwise the first unresolved one is an
/// error.
pub fn render_strict(template: &str, variables: &[(&str, &str)]) -> Result<String> {
    let result = render(template, variables);

    if let Some(placeholder) = first_placeholder(&result) {
        return Err(Error::template_unresolved(placeholder, None));
    }

    Ok(result)
}

pub fn is_present(template: &str, key: &str) -> bool {
    let placeholder = format!("{{{{{}}}}}", key);
    template.contains(&placeholder)
}

/// Find the first `{{key}}` occurrence and return the key, if any.
fn first_placeholder(text: &str) -> Option<String> {
    let start = text.find("{{")?;
    let rest = &text[start + 2..];
    let end = rest.find("}}")?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_known_placeholders() {
        let out = render("name: {{projectName}}", &[("projectName", "demo")]);
        assert_eq!(out, "name: demo");
    }

    #[test]
    fn render_leaves_unknown_placeholders_verbatim() {
        let out = render("run: {{mystery}}", &[("projectName", "demo")]);
        assert_eq!(out, "run: {{mystery}}");
    }

    #[test]
    fn render_is_idempotent() {
        let vars = [("projectName", "demo")];
        let once = render("{{projectName}} and {{unknown}}", &vars);
        let twice = render(&once, &vars);
        assert_eq!(once, twice);
    }

    #[test]
    fn render_strict_resolves_all_placeholders() {
        let out = render_strict(
            "{{projectName}}: {{projectDescription}}",
            &[("projectName", "demo"), ("projectDescription", "a demo")],
        )
        .unwrap();
        assert_eq!(out, "demo: a demo");
    }

    #[test]
    fn render_strict_fails_on_unresolved_placeholder() {
        let err = render_strict("{{projectName}}", &[]).err().unwrap();
        assert_eq!(err.code, crate::ErrorCode::TemplateUnresolvedPlaceholder);
        assert!(err.message.contains("projectName"));
    }

    #[test]
    fn is_present_detects_placeholder() {
        assert!(is_present("{{projectName}}", "projectName"));
        assert!(!is_present("{{projectName}}", "authorName"));
    }
}
