// 📄 Pages - ordered display elements, rendered as an HTML form or plain text
//
// Each page is one form. Buttons submit every field on the page to their
// url, so handler arguments are simply the named fields of that form.

const SITE_CSS: &str = "\
body { background-color: #f5f5f5; font-family: Arial, sans-serif; }
h1 { background-color: #2c3e50; color: white; padding: 20px; text-align: center; border-radius: 10px; margin: 10px 0; }
button { background-color: #3498db; color: white; padding: 10px 20px; margin: 5px; border-radius: 5px; font-weight: bold; border: none; cursor: pointer; }
button:hover { opacity: 0.8; }
input, select { padding: 8px; margin: 5px 0; border: 1px solid #ccc; border-radius: 4px; font-size: 14px; }
";

// ============================================================================
// ELEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(String),
    Header(String),
    Button { label: String, url: String },
    TextBox { name: String, default: String },
    SelectBox { name: String, options: Vec<String> },
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    pub fn header(text: impl Into<String>) -> Self {
        Element::Header(text.into())
    }

    pub fn button(label: impl Into<String>, url: impl Into<String>) -> Self {
        Element::Button {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn text_box(name: impl Into<String>, default: impl Into<String>) -> Self {
        Element::TextBox {
            name: name.into(),
            default: default.into(),
        }
    }

    pub fn select_box(name: impl Into<String>, options: Vec<String>) -> Self {
        Element::SelectBox {
            name: name.into(),
            options,
        }
    }
}

// ============================================================================
// PAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub content: Vec<Element>,
}

impl Page {
    pub fn new(content: Vec<Element>) -> Self {
        Page { content }
    }

    /// Every plain text line on the page, in order
    pub fn texts(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) | Element::Header(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Button targets, in order
    pub fn button_urls(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|e| match e {
                Element::Button { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn render_html(&self, title: &str) -> String {
        let mut body = String::new();

        for element in &self.content {
            let line = match element {
                Element::Text(text) => format!("<p>{}</p>", escape_html(text)),
                Element::Header(text) => format!("<h1>{}</h1>", escape_html(text)),
                Element::Button { label, url } => format!(
                    r#"<button type="submit" formaction="{}">{}</button>"#,
                    escape_html(url),
                    escape_html(label)
                ),
                Element::TextBox { name, default } => format!(
                    r#"<input type="text" name="{}" value="{}"><br>"#,
                    escape_html(name),
                    escape_html(default)
                ),
                Element::SelectBox { name, options } => {
                    let opts: String = options
                        .iter()
                        .map(|o| {
                            let o = escape_html(o);
                            format!(r#"<option value="{o}">{o}</option>"#)
                        })
                        .collect();
                    format!(r#"<select name="{}">{}</select><br>"#, escape_html(name), opts)
                }
            };
            body.push_str(&line);
            body.push('\n');
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}</style>\n</head>\n\
             <body>\n<form method=\"post\">\n{}</form>\n</body>\n</html>\n",
            escape_html(title),
            SITE_CSS,
            body
        )
    }

    /// Terminal rendering: one line per element
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for element in &self.content {
            let line = match element {
                Element::Text(text) => text.clone(),
                Element::Header(text) => format!("== {} ==", text),
                Element::Button { label, url } => {
                    format!("  [{}] -> {}", label, url.trim_start_matches('/'))
                }
                Element::TextBox { name, default } if default.is_empty() => {
                    format!("    {}=", name)
                }
                Element::TextBox { name, default } => {
                    format!("    {}= (default {})", name, default)
                }
                Element::SelectBox { name, options } => {
                    format!("    {}= one of: {}", name, options.join(" | "))
                }
            };
            out.push_str(&line);
            out.push('\n');
        }

        out
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        Page::new(vec![
            Element::header("Welcome, ryder."),
            Element::text("Name of Course:"),
            Element::text_box("course_name", ""),
            Element::select_box("course", vec!["CISC108".to_string(), "MATH241".to_string()]),
            Element::button("Add Course", "/append_course"),
        ])
    }

    #[test]
    fn test_texts_and_buttons() {
        let page = sample_page();
        assert_eq!(page.texts(), vec!["Welcome, ryder.", "Name of Course:"]);
        assert_eq!(page.button_urls(), vec!["/append_course"]);
    }

    #[test]
    fn test_render_html_form() {
        let html = sample_page().render_html("GPA Tracker");

        assert!(html.contains("<title>GPA Tracker</title>"));
        assert!(html.contains("<form method=\"post\">"));
        assert!(html.contains("<h1>Welcome, ryder.</h1>"));
        assert!(html.contains(r#"<input type="text" name="course_name" value="">"#));
        assert!(html.contains(r#"<option value="MATH241">MATH241</option>"#));
        assert!(html.contains(r#"formaction="/append_course">Add Course</button>"#));
    }

    #[test]
    fn test_render_html_escapes_user_text() {
        let page = Page::new(vec![Element::text("<script>alert('x')</script> & co")]);
        let html = page.render_html("t");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn test_render_text() {
        let text = sample_page().render_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "== Welcome, ryder. ==");
        assert_eq!(lines[2], "    course_name=");
        assert_eq!(lines[3], "    course= one of: CISC108 | MATH241");
        assert_eq!(lines[4], "  [Add Course] -> append_course");
    }
}
