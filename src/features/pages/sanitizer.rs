use ammonia::Builder;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// 摘要清洗器：白名单模式。
///
/// 只保留基础排版标签与安全链接；`<script>`、`on*` 事件属性、
/// `javascript:` 协议等一律剥离。上游内容不可信，每个渲染片段都必须经过这里。
static EXCERPT_SANITIZER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::from([
            "a", "b", "strong", "i", "em", "p", "br", "ul", "ol", "li", "blockquote", "code",
        ]))
        .link_rel(Some("noopener noreferrer"))
        .url_schemes(HashSet::from(["http", "https", "mailto"]));
    builder
});

/// 清洗摘要 HTML：返回可安全内联的片段。
pub fn sanitize_excerpt(raw: &str) -> String {
    EXCERPT_SANITIZER.clean(raw).to_string()
}

/// 清洗标题为纯文本：剥离全部标签，同时解码实体后再转义，防止双重转义。
pub fn sanitize_title(raw: &str) -> String {
    static TITLE_SANITIZER: Lazy<Builder<'static>> = Lazy::new(|| {
        let mut builder = Builder::default();
        builder.tags(HashSet::new());
        builder
    });
    TITLE_SANITIZER.clean(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::{sanitize_excerpt, sanitize_title};

    #[test]
    fn excerpt_strips_script_tags() {
        let dirty = r#"<p>ciao</p><script>alert("xss")</script>"#;
        let clean = sanitize_excerpt(dirty);
        assert!(!clean.contains("<script"));
        assert!(clean.contains("<p>ciao</p>"));
    }

    #[test]
    fn excerpt_strips_event_handler_attributes() {
        let dirty = r#"<p onclick="steal()">testo</p><a href="/x" onmouseover="p()">link</a>"#;
        let clean = sanitize_excerpt(dirty);
        assert!(!clean.to_lowercase().contains("onclick"));
        assert!(!clean.to_lowercase().contains("onmouseover"));
        assert!(clean.contains("testo"));
    }

    #[test]
    fn excerpt_strips_javascript_urls() {
        let dirty = r#"<a href="javascript:alert(1)">clicca</a>"#;
        let clean = sanitize_excerpt(dirty);
        assert!(!clean.contains("javascript:"));
    }

    #[test]
    fn excerpt_keeps_basic_formatting() {
        let dirty = "<p>Un <strong>bel</strong> articolo</p>";
        let clean = sanitize_excerpt(dirty);
        assert_eq!(clean, "<p>Un <strong>bel</strong> articolo</p>");
    }

    #[test]
    fn title_is_reduced_to_plain_text() {
        let dirty = "Trekking <em>estivo</em><script>x()</script>";
        let clean = sanitize_title(dirty);
        assert!(!clean.contains('<'));
        assert!(clean.contains("Trekking"));
        assert!(clean.contains("estivo"));
    }
}
