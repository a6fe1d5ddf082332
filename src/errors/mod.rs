use anyhow::Context as _;

/// Add context to store errors
pub fn store_context(operation: &str, collection: &str) -> String {
    format!("Failed to {} collection: {}", operation, collection)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to draft errors
pub fn draft_context(operation: &str, date: &str) -> String {
    format!("Failed to {} match draft for {}", operation, date)
}

/// Wrap result with store context
pub fn with_store_context<T>(
    result: anyhow::Result<T>,
    operation: &str,
    collection: &str,
) -> anyhow::Result<T> {
    result.context(store_context(operation, collection))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_is_outermost_message() {
        let result: Result<u32, _> = "x".parse::<u32>();
        let err = with_parse_context(result, "score").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse score");
    }
}
