use std::collections::HashMap;
use anyhow::{anyhow, Result};

/// Field keys understood on `task add` / `task edit` command lines.
pub const TASK_FIELD_KEYS: [&str; 2] = ["due", "status"];

#[derive(Debug, PartialEq, Default)]
pub struct ParsedInput {
    /// Free words joined with single spaces.
    pub title: String,
    pub fields: HashMap<String, String>,
}

/// Splits `key:value` tokens from free words.
///
/// `Build the thing due:fri status:wip` yields the title `Build the thing`
/// and the fields `due=fri`, `status=wip`. A token with an empty key (`:x`)
/// is kept as a word.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut fields = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                fields.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        fields,
    }
}

/// Resolves `key` against `candidates`, accepting any unambiguous prefix.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// [`parse_args`] followed by key expansion against [`TASK_FIELD_KEYS`].
pub fn parse_task_args(args: &[String]) -> Result<ParsedInput> {
    let parsed = parse_args(args);
    let mut fields = HashMap::new();
    for (key, value) in parsed.fields {
        let full_key = expand_key(&key, &TASK_FIELD_KEYS)?;
        fields.insert(full_key, value);
    }
    Ok(ParsedInput {
        title: parsed.title,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["Design", "doc", "due:2025-03-01", "Status:Done"]));
        assert_eq!(parsed.title, "Design doc");
        assert_eq!(parsed.fields.get("due"), Some(&"2025-03-01".to_string()));
        assert_eq!(parsed.fields.get("status"), Some(&"Done".to_string()));
    }

    #[test]
    fn test_empty_key_stays_in_title() {
        let parsed = parse_args(&args(&["ratio", ":3"]));
        assert_eq!(parsed.title, "ratio :3");
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["due", "description", "status"];

        assert_eq!(expand_key("du", &candidates).unwrap(), "due");
        assert_eq!(expand_key("due", &candidates).unwrap(), "due");
        assert_eq!(expand_key("s", &candidates).unwrap(), "status");

        // Ambiguous
        assert!(expand_key("d", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_task_args_expands_prefixes() {
        let parsed = parse_task_args(&args(&["Build", "d:tomorrow", "st:wip"])).unwrap();
        assert_eq!(parsed.title, "Build");
        assert_eq!(parsed.fields.get("due"), Some(&"tomorrow".to_string()));
        assert_eq!(parsed.fields.get("status"), Some(&"wip".to_string()));

        assert!(parse_task_args(&args(&["Build", "priority:high"])).is_err());
    }
}
