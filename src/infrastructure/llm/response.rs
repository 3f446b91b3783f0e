use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z]*\n?|```").unwrap());

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

/// Strips markdown code fences and reasoning tags that models wrap JSON
/// replies in, then trims.
pub fn clean_llm_response(response: &str) -> String {
    let cleaned = THINK_TAG_PATTERN.replace_all(response, "");
    let cleaned = CODE_FENCE_PATTERN.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_code_fence() {
        let input = "```json\n[{\"title\":\"Hike\"}]\n```";
        assert_eq!(clean_llm_response(input), "[{\"title\":\"Hike\"}]");
    }

    #[test]
    fn strips_bare_fence() {
        let input = "```\n[1,2]\n```";
        assert_eq!(clean_llm_response(input), "[1,2]");
    }

    #[test]
    fn strips_think_tags() {
        let input = "<think>planning...</think>[\"ok\"]";
        assert_eq!(clean_llm_response(input), "[\"ok\"]");
    }

    #[test]
    fn preserves_plain_json() {
        let input = "[{\"title\":\"Museum visit\"}]";
        assert_eq!(clean_llm_response(input), input);
    }
}
