// Template helpers shared by the matching and assistant prompt modules.

/// Fills `{key}` placeholders in a prompt template in one pass over the
/// template. Inserted values are never scanned again, so a value that itself
/// contains `{key}` is kept verbatim. Unknown placeholders and other braces
/// (JSON examples in templates) are left as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let key = &after[..key_len];

        let value = if after[key_len..].starts_with('}') {
            values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
        } else {
            None
        };

        match value {
            Some(value) => {
                out.push_str(value);
                rest = &after[key_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Renders a list for a prompt, or a placeholder when empty.
pub fn list_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
