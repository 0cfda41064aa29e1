//! Templates compiled into the binary
//!
//! Placeholders are written `{{ name }}`. Every placeholder must have a value
//! in the context; unused context entries are ignored.

use crate::domain::ports::{TemplateContext, TemplateRenderer};
use crate::error::{WiseError, WiseResult};

const TEMPLATES: &[(&str, &str)] = &[
    (
        "django_nginx.conf",
        include_str!("../../templates/django_nginx.conf"),
    ),
    (
        "django_nginx_ssl.conf",
        include_str!("../../templates/django_nginx_ssl.conf"),
    ),
    (
        "django_supervisor.conf",
        include_str!("../../templates/django_supervisor.conf"),
    ),
    ("start.sh", include_str!("../../templates/start.sh")),
    ("post-receive", include_str!("../../templates/post-receive")),
    ("renew_le.sh", include_str!("../../templates/renew_le.sh")),
    ("crontab_le.sh", include_str!("../../templates/crontab_le.sh")),
    (
        "system-xenial.txt",
        include_str!("../../templates/system-xenial.txt"),
    ),
    (
        "system-bionic.txt",
        include_str!("../../templates/system-bionic.txt"),
    ),
    (
        "system-focal.txt",
        include_str!("../../templates/system-focal.txt"),
    ),
    (
        "system-jammy.txt",
        include_str!("../../templates/system-jammy.txt"),
    ),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn source(name: &str) -> Option<&'static str> {
        TEMPLATES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, body)| *body)
    }
}

impl TemplateRenderer for EmbeddedTemplates {
    fn render(&self, name: &str, context: &TemplateContext) -> WiseResult<String> {
        let source = Self::source(name).ok_or_else(|| WiseError::TemplateNotFound {
            name: name.to_string(),
        })?;
        substitute(name, source, context)
    }
}

/// Replace every `{{ key }}` in `source`.
pub fn substitute(name: &str, source: &str, context: &TemplateContext) -> WiseResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // unterminated, keep verbatim
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let key = after[..end].trim();
        let value = context
            .get(key)
            .ok_or_else(|| WiseError::TemplateVariable {
                template: name.to_string(),
                variable: key.to_string(),
            })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Package names from a package list: one or more per line, `#` starts a comment.
pub fn parse_package_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}
