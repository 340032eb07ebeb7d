use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::models::ResumeState;

/// The most recent full render of the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPreview {
    pub html: String,
    /// Bumped on every render; 0 means nothing has been rendered yet.
    pub revision: u64,
}

pub type PostRenderHook = Arc<dyn Fn() + Send + Sync>;

/// Read-only preview output, shared between the store listener that
/// re-renders it and whoever displays it.
#[derive(Clone, Default)]
pub struct Preview {
    output: Arc<RwLock<RenderedPreview>>,
    post_render: Option<PostRenderHook>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `hook` after every render, with no inputs.
    pub fn with_post_render<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.post_render = Some(Arc::new(hook));
        self
    }

    /// Recomputes the preview from `state` and replaces the previous output.
    pub fn render(&self, state: &ResumeState) {
        let html = render_preview(state);
        {
            let mut out = self
                .output
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            out.html = html;
            out.revision += 1;
        }
        if let Some(hook) = &self.post_render {
            hook();
        }
    }

    pub fn current(&self) -> RenderedPreview {
        self.output
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Pure function of `state`: same input, same HTML.
pub fn render_preview(state: &ResumeState) -> String {
    let p = &state.personal;
    let mut html = String::new();

    html.push_str(&format!(
        "<h1 class=\"text-4xl font-bold mb-2\">{}</h1>\n",
        escape_html(&p.full_name)
    ));
    html.push_str(&format!(
        "<p class=\"text-xl text-primary mb-4\">{}</p>\n",
        escape_html(&p.headline)
    ));
    html.push_str(&format!(
        "<div class=\"text-sm text-gray-600 mb-8\">{} • {} • {}</div>\n",
        escape_html(&p.email),
        escape_html(&p.phone),
        escape_html(&p.location)
    ));

    html.push_str(&section_heading("Experience"));
    for e in &state.experience {
        html.push_str("<div class=\"mb-4\">\n");
        html.push_str(&format!(
            "  <div class=\"flex justify-between font-bold\"><span>{}</span><span class=\"text-sm font-normal\">{} - {}</span></div>\n",
            escape_html(&e.company),
            escape_html(&e.start_date),
            escape_html(&e.end_date)
        ));
        html.push_str(&format!(
            "  <div class=\"text-primary text-sm font-semibold mb-1\">{}</div>\n",
            escape_html(&e.role)
        ));
        html.push_str(&format!(
            "  <div class=\"text-sm whitespace-pre-line\">{}</div>\n",
            escape_html(&e.description)
        ));
        html.push_str("</div>\n");
    }

    if !state.education.is_empty() {
        html.push_str(&section_heading("Education"));
        for e in &state.education {
            html.push_str("<div class=\"mb-4\">\n");
            html.push_str(&format!(
                "  <div class=\"flex justify-between font-bold\"><span>{}</span><span class=\"text-sm font-normal\">{} - {}</span></div>\n",
                escape_html(&e.school),
                escape_html(&e.start_date),
                escape_html(&e.end_date)
            ));
            html.push_str(&format!(
                "  <div class=\"text-sm\">{}, {}</div>\n",
                escape_html(&e.degree),
                escape_html(&e.location)
            ));
            html.push_str("</div>\n");
        }
    }

    if !state.skills.trim().is_empty() {
        html.push_str(&section_heading("Skills"));
        html.push_str(&format!(
            "<p class=\"text-sm\">{}</p>\n",
            escape_html(&state.skills)
        ));
    }

    html
}

fn section_heading(title: &str) -> String {
    format!(
        "<h3 class=\"font-bold border-b mb-4 pb-2 uppercase text-sm text-gray-500\">{title}</h3>\n"
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::{PersonalInfo, ResumePatch};

    #[test]
    fn test_render_contains_seed_fields() {
        let html = render_preview(&ResumeState::seed());
        assert!(html.contains("John Doe"));
        assert!(html.contains("Senior Software Engineer"));
        assert!(html.contains("john.doe@example.com • +1 234 567 890 • New York, NY"));
        assert!(html.contains("Tech Corp"));
        assert!(html.contains("2020-01 - Present"));
        assert!(html.contains("University of Tech"));
        assert!(html.contains("JavaScript, React, Node.js"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let s = ResumeState::seed();
        assert_eq!(render_preview(&s), render_preview(&s));
    }

    #[test]
    fn test_render_escapes_markup() {
        let mut s = ResumeState::seed();
        s.apply(ResumePatch::personal(PersonalInfo {
            full_name: "<script>alert('x')</script>".to_string(),
            ..s.personal.clone()
        }));
        let html = render_preview(&s);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_omits_empty_education_and_skills() {
        let mut s = ResumeState::seed();
        s.apply(ResumePatch::education(vec![]));
        s.apply(ResumePatch::skills("  "));
        let html = render_preview(&s);
        assert!(html.contains(">Experience</h3>"));
        assert!(!html.contains(">Education</h3>"));
        assert!(!html.contains(">Skills</h3>"));
    }

    #[test]
    fn test_preview_render_replaces_output() {
        let preview = Preview::new();
        assert_eq!(preview.current().revision, 0);

        let mut s = ResumeState::seed();
        preview.render(&s);
        s.apply(ResumePatch::experience(vec![]));
        preview.render(&s);

        let out = preview.current();
        assert_eq!(out.revision, 2);
        assert!(!out.html.contains("Tech Corp"));
        assert_eq!(out.html.matches("<h1").count(), 1);
    }

    #[test]
    fn test_post_render_hook_runs_after_each_render() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let preview = Preview::new().with_post_render(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        preview.render(&ResumeState::seed());
        preview.render(&ResumeState::seed());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clones_share_output() {
        let preview = Preview::new();
        let viewer = preview.clone();
        preview.render(&ResumeState::seed());
        assert_eq!(viewer.current(), preview.current());
    }
}
