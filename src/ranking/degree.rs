/// Known degree type tokens, highest degree first. The first token found in
/// a description wins.
pub const DEGREE_TYPE_TOKENS: [&str; 3] = ["博士", "硕士", "学士"];

/// Reduce a full degree description (e.g. "电子信息硕士专业学位") to its short
/// type label for badge display. Returns the input unchanged when no known
/// token occurs in it.
pub fn extract_degree_type(description: &str) -> &str {
    for token in DEGREE_TYPE_TOKENS {
        if description.contains(token) {
            return token;
        }
    }
    description
}
