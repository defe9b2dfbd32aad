// College gateway prompt templates.
// All prompts for the colleges module are defined here.

pub const FETCH_PROMPT_TEMPLATE: &str = "Provide a JSON array of top {top_k} colleges in India \
for the course '{course}' in '{city}'. \
Each element must be an object with the fields \"name\", \"city\", \"fees\" and \"rating\". \
Only output JSON.\n";

pub const COMPARE_PROMPT_TEMPLATE: &str = r#"Choose the BEST college from this list (JSON):
{colleges_json}

Return ONLY JSON object:
{"name": "...", "reason": "..."}"#;

pub const RECOMMEND_PROMPT_TEMPLATE: &str = "Write a short 3-line recommendation for this college:\n\
{college_json}";

/// Fills `{key}` placeholders in one left-to-right pass. Substituted values are
/// never rescanned, and braces that do not name a known key are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            vars.iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (end, *value))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
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
