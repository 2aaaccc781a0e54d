use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// `?page=abc` is served like a request without a page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or_else(first_page))
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> i64 {
        let uri: Uri = format!("/questions?{query}").parse().unwrap();
        Query::<PageQuery>::try_from_uri(&uri).unwrap().0.page
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(parse(""), 1);
        assert_eq!(parse("page=abc"), 1);
        assert_eq!(parse("page="), 1);
    }

    #[test]
    fn page_is_parsed() {
        assert_eq!(parse("page=3"), 3);
        assert_eq!(parse("page=-2"), -2);
    }
}
