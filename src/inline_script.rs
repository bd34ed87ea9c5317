//! Rewrites the bodies of inline `<script>` elements before the HTML pass, so
//! embedded code goes through the same JS minifier as standalone `.js` files.

const JS_TYPES: [&str; 6] = [
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
    "module",
    "",
];

/// Value of attribute `name` in a lowercased open tag. Boolean attributes give `""`.
fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut from = 0;
    while let Some(found) = tag[from..].find(name) {
        let start = from + found;
        let end = start + name.len();
        from = end;

        let preceded = tag[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        let rest = tag[end..].trim_start();
        if !preceded {
            continue;
        }
        let Some(value) = rest.strip_prefix('=') else {
            let bare = rest.is_empty()
                || rest.starts_with(['>', '/'])
                || tag[end..].starts_with(char::is_whitespace);
            if bare {
                return Some("");
            }
            continue;
        };

        let value = value.trim_start();
        return Some(match value.chars().next() {
            Some(q @ ('"' | '\'')) => value[1..].split(q).next().unwrap_or(""),
            _ => value
                .split(|c: char| c.is_ascii_whitespace() || c == '>')
                .next()
                .unwrap_or(""),
        });
    }
    None
}

fn is_inline_js(open_tag: &str) -> bool {
    if attr_value(open_tag, "src").is_some() {
        return false;
    }
    attr_value(open_tag, "type").is_none_or(|t| JS_TYPES.contains(&t.trim()))
}

/// Runs `minify_js` over every inline script body of `html`. Everything else,
/// including external and non-JS scripts, is copied through unchanged.
pub fn minify_scripts<F>(html: &str, mut minify_js: F) -> Result<String, String>
where
    F: FnMut(&str) -> Result<String, String>,
{
    // ASCII lowering keeps byte offsets identical to `html`
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some(found) = lower[pos..].find("<script") {
        let tag_start = pos + found;
        let after_name = tag_start + "<script".len();
        let is_script_tag = lower[after_name..]
            .starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/');
        if !is_script_tag {
            out.push_str(&html[pos..after_name]);
            pos = after_name;
            continue;
        }

        let Some(gt) = lower[after_name..].find('>') else {
            break;
        };
        let body_start = after_name + gt + 1;
        let Some(close) = lower[body_start..].find("</script") else {
            break;
        };
        let body_end = body_start + close;

        out.push_str(&html[pos..body_start]);
        let body = &html[body_start..body_end];
        if is_inline_js(&lower[tag_start..body_start]) && !body.trim().is_empty() {
            let minified = minify_js(body)
                .map_err(|e| format!("inline script at byte {tag_start}: {e}"))?;
            out.push_str(&minified);
        } else {
            out.push_str(body);
        }
        pos = body_end;
    }

    out.push_str(&html[pos..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(js: &str) -> Result<String, String> {
        Ok(js.trim().to_uppercase())
    }

    #[test]
    fn test_attr_value() {
        let tag = "<script type=\"module\" data-x='a b' defer>";
        assert_eq!(attr_value(tag, "type"), Some("module"));
        assert_eq!(attr_value(tag, "data-x"), Some("a b"));
        assert_eq!(attr_value(tag, "defer"), Some(""));
        assert_eq!(attr_value(tag, "src"), None);
        assert_eq!(attr_value("<script type=module>", "type"), Some("module"));
        // `nosrc` must not be read as `src`
        assert_eq!(attr_value("<script nosrc=\"x\">", "src"), None);
    }

    #[test]
    fn test_rewrites_inline_bodies_only() {
        let html = "<p>x</p><SCRIPT>let a = 1;</SCRIPT><script src=\"app.js\"></script>\
                    <script type=\"application/json\">{\"k\": 1}</script>\
                    <script type=module> go() </script>";
        let out = minify_scripts(html, shout).unwrap();

        assert_eq!(
            out,
            "<p>x</p><SCRIPT>LET A = 1;</SCRIPT><script src=\"app.js\"></script>\
             <script type=\"application/json\">{\"k\": 1}</script>\
             <script type=module>GO()</script>"
        );
    }

    #[test]
    fn test_ignores_lookalike_tags() {
        let html = "<scripture>keep me</scripture>";
        assert_eq!(minify_scripts(html, shout).unwrap(), html);
    }

    #[test]
    fn test_unclosed_script_is_copied() {
        let html = "<script>never closed";
        assert_eq!(minify_scripts(html, shout).unwrap(), html);
    }

    #[test]
    fn test_reports_failing_script() {
        let err = minify_scripts("<b></b><script>bad</script>", |_| Err("boom".to_string()))
            .unwrap_err();
        assert_eq!(err, "inline script at byte 7: boom");
    }
}
