//! Engine defaults, written only for keys not rendered yet.

use crate::backends::legacy::QueryString;
use crate::parameter::system::{DEFAULT_FIELDS, DEFAULT_QUERY, DEFAULT_SORT, ENGINE_DEFAULTS};

pub(super) fn render(carrier: &mut QueryString) {
    for (key, value) in ENGINE_DEFAULTS {
        carrier.push_if_absent(key, *value);
    }
    carrier.push_if_absent("fl", DEFAULT_FIELDS.join(","));
    carrier.push_if_absent("sort", DEFAULT_SORT);
    carrier.push_if_absent("q", DEFAULT_QUERY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_defaults_on_empty_request() {
        let mut carrier = QueryString::default();
        render(&mut carrier);
        let rendered: Vec<String> = carrier
            .pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "echoParams=none",
                "wt=json",
                "indent=off",
                "defType=edismax",
                "q.alt=*:*",
                "df=id",
                "fl=*,score",
                "sort=score asc",
                "q=*:*",
            ]
        );
    }

    #[test]
    fn test_caller_values_win() {
        let mut carrier = QueryString::default();
        carrier.push("q", "title:rust");
        carrier.push("sort", "price desc");
        carrier.push("wt", "xml");
        render(&mut carrier);

        assert_eq!(carrier.get("q"), Some("title:rust"));
        assert_eq!(carrier.get("sort"), Some("price desc"));
        assert_eq!(carrier.get("wt"), Some("xml"));
        assert_eq!(carrier.pairs().iter().filter(|(k, _)| k == "q").count(), 1);
    }
}
