//! Engine defaults, written only for members not rendered yet.

use crate::backends::json::JsonRequest;
use crate::parameter::system::{DEFAULT_FIELDS, DEFAULT_QUERY, DEFAULT_SORT, ENGINE_DEFAULTS};

pub(super) fn render(carrier: &mut JsonRequest) {
    if carrier.get("query").is_none() {
        carrier.set("query", DEFAULT_QUERY);
    }
    if carrier.fields().is_empty() {
        carrier.extend_fields(DEFAULT_FIELDS.iter().copied());
    }
    if carrier.get("sort").is_none() {
        carrier.set("sort", DEFAULT_SORT);
    }
    for (key, value) in ENGINE_DEFAULTS {
        carrier.param_if_absent(key, *value);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_on_empty_request() {
        let mut carrier = JsonRequest::default();
        render(&mut carrier);
        assert_eq!(
            carrier.into_value(),
            json!({
                "query": "*:*",
                "fields": ["*", "score"],
                "sort": "score asc",
                "params": {
                    "echoParams": "none",
                    "wt": "json",
                    "indent": "off",
                    "defType": "edismax",
                    "q.alt": "*:*",
                    "df": "id"
                }
            })
        );
    }

    #[test]
    fn test_caller_values_win() {
        let mut carrier = JsonRequest::default();
        carrier.set("query", "title:rust");
        carrier.extend_fields(["id"]);
        carrier.set("sort", "price desc");
        carrier.add_param("defType", "lucene");
        render(&mut carrier);

        let value = carrier.into_value();
        assert_eq!(value["query"], "title:rust");
        assert_eq!(value["fields"], json!(["id"]));
        assert_eq!(value["sort"], "price desc");
        assert_eq!(value["params"]["defType"], "lucene");
        assert_eq!(value["params"]["wt"], "json");
    }
}
