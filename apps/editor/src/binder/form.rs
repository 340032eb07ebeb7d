use super::preview::escape_html;
use super::BoundField;

const EDIT_SCRIPT: &str = r#"<script>
document.querySelectorAll('input[data-model]').forEach((el) => {
  el.addEventListener('input', async () => {
    await fetch('/api/v1/fields', {
      method: 'PUT',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ path: el.dataset.model, value: el.value }),
    });
    const res = await fetch('/api/v1/preview');
    document.getElementById('resume-preview-content').innerHTML = await res.text();
  });
});
</script>"#;

/// Editor page: one input per bound field, then the current preview.
pub fn render_editor_page(fields: &[BoundField], preview_html: &str) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Resume Editor</title></head>\n<body>\n",
    );

    html.push_str("<form class=\"editor-panel\" id=\"section-personal\">\n");
    for field in fields {
        html.push_str(&format!(
            "  <label>{label}<input type=\"text\" data-model=\"{path}\" value=\"{value}\"></label>\n",
            label = escape_html(field_label(&field.path)),
            path = escape_html(&field.path),
            value = escape_html(&field.value),
        ));
    }
    html.push_str("</form>\n");

    html.push_str("<div id=\"resume-preview-content\">\n");
    html.push_str(preview_html);
    html.push_str("</div>\n");
    html.push_str(EDIT_SCRIPT);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn field_label(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
