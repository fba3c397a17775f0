use serde_json::Value;

/// Tags returned whenever tagging fails.
pub const GENERIC_TAGS: [&str; 4] = ["inspection", "property", "building", "documentation"];

const MAX_TAGS: usize = 8;

pub fn generic_tags() -> Vec<String> {
    GENERIC_TAGS.iter().map(|t| t.to_string()).collect()
}

/// Parses provider output into normalized tags.
///
/// Accepts a JSON array, a `{"tags": [...]}` object (optionally inside a
/// fenced code block) or a comma/newline separated list. Returns `None` when
/// nothing usable is found.
pub fn parse_tags(content: &str) -> Option<Vec<String>> {
    let body = strip_code_fence(content.trim());

    let raw: Vec<String> = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => strings(&items),
        Ok(Value::Object(map)) => match map.get("tags") {
            Some(Value::Array(items)) => strings(items),
            _ => return None,
        },
        _ => body
            .split([',', '\n'])
            .map(|t| t.trim_start_matches(['-', '*', ' ']).to_string())
            .collect(),
    };

    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag
            .trim()
            .trim_matches(['"', '\'', '.'])
            .trim()
            .to_lowercase();
        if tag.is_empty() || tag.chars().count() > 40 || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
        if tags.len() == MAX_TAGS {
            break;
        }
    }

    if tags.is_empty() { None } else { Some(tags) }
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening line
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        assert_eq!(
            parse_tags(r#"["Roof", "slate", "roof", " moss "]"#),
            Some(vec!["roof".into(), "slate".into(), "moss".into()])
        );
    }

    #[test]
    fn test_json_object_in_fence() {
        let content = "```json\n{\"tags\": [\"gutter\", \"rust\"]}\n```";
        assert_eq!(parse_tags(content), Some(vec!["gutter".into(), "rust".into()]));
    }

    #[test]
    fn test_comma_and_bullet_lists() {
        assert_eq!(
            parse_tags("damp, skirting board, mould."),
            Some(vec!["damp".into(), "skirting board".into(), "mould".into()])
        );
        assert_eq!(
            parse_tags("- boiler\n- flue"),
            Some(vec!["boiler".into(), "flue".into()])
        );
    }

    #[test]
    fn test_caps_tag_count() {
        let many = (0..20).map(|i| format!("tag{i}")).collect::<Vec<_>>().join(",");
        assert_eq!(parse_tags(&many).unwrap().len(), MAX_TAGS);
    }

    #[test]
    fn test_unusable_output() {
        assert_eq!(parse_tags(""), None);
        assert_eq!(parse_tags("{\"other\": 1}"), None);
        assert_eq!(parse_tags("[1, 2]"), None);
    }
}
