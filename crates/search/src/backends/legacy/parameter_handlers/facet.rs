//! Facet parameters.
//!
//! Every facet turns faceting on once (`facet=true`) and names its output
//! through local parameters, e.g. `facet.field={!ex=dt key=city}city`.
//! Options of a single facet (sort, limit, range bounds) ride in those local
//! parameters. Only settings shared by every facet on a field use the
//! `f.<field>.` prefix, and are written once per field.

use crate::backends::legacy::QueryString;
use crate::document::Document;
use crate::parameter::{
    FacetField, FacetLimit, FacetQuery, FacetRange, FacetSpatial, facet_local_params,
};

fn enable(carrier: &mut QueryString) {
    carrier.push_if_absent("facet", "true");
}

pub(super) fn render_field<D: Document>(parameter: &FacetField<D>, carrier: &mut QueryString) {
    let field = parameter.field().name();
    enable(carrier);
    let mut options = Vec::new();
    if let Some(sort) = parameter.sort() {
        options.push(("facet.sort", sort.parts().0.to_string()));
    }
    if let Some(limit) = parameter.limit() {
        options.push(("facet.limit", limit.to_string()));
    }
    carrier.push(
        "facet.field",
        format!(
            "{}{}",
            facet_local_params(parameter.alias(), parameter.excludes(), &options),
            field
        ),
    );
    carrier.push_if_absent(&format!("f.{}.facet.mincount", field), "1");
}

pub(super) fn render_limit(parameter: &FacetLimit, carrier: &mut QueryString) {
    carrier.push("facet.limit", parameter.value().to_string());
}

pub(super) fn render_query<D: Document>(parameter: &FacetQuery<D>, carrier: &mut QueryString) {
    enable(carrier);
    carrier.push(
        "facet.query",
        format!(
            "{}{}",
            facet_local_params(parameter.alias(), parameter.excludes(), &[]),
            parameter.query()
        ),
    );
}

pub(super) fn render_range<D: Document>(parameter: &FacetRange<D>, carrier: &mut QueryString) {
    let field = parameter.field().name();
    enable(carrier);
    let mut options = vec![
        ("facet.range.start", parameter.start().to_string()),
        ("facet.range.end", parameter.end().to_string()),
        ("facet.range.gap", parameter.gap().to_string()),
    ];
    if let Some(sort) = parameter.sort() {
        options.push(("facet.sort", sort.parts().0.to_string()));
    }
    carrier.push(
        "facet.range",
        format!(
            "{}{}",
            facet_local_params(parameter.alias(), parameter.excludes(), &options),
            field
        ),
    );
    let other = format!("f.{}.facet.range.other", field);
    if !carrier.contains_key(&other) {
        carrier.push(other.clone(), "before");
        carrier.push(other, "after");
    }
    carrier.push_if_absent(&format!("f.{}.facet.mincount", field), "1");
}

pub(super) fn render_spatial<D: Document>(parameter: &FacetSpatial<D>, carrier: &mut QueryString) {
    enable(carrier);
    carrier.push(
        "facet.query",
        format!(
            "{}{}",
            facet_local_params(parameter.alias(), parameter.excludes(), &[]),
            parameter.expression()
        ),
    );
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::document::{DynamicDocument, Field};
    use crate::parameter::QueryValue;
    use crate::types::{FacetSortType, GeoCoordinate, SpatialFunction};

    type Doc = DynamicDocument;

    fn rendered(carrier: &QueryString) -> Vec<String> {
        carrier
            .pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }

    #[test]
    fn test_facet_field_with_exclude() {
        let mut carrier = QueryString::default();
        let facet = FacetField::new(Field::<Doc>::new("Id")).with_excludes(["dt"]);
        render_field(&facet, &mut carrier);
        assert_eq!(
            rendered(&carrier),
            vec!["facet=true", "facet.field={!ex=dt key=Id}Id", "f.Id.facet.mincount=1"]
        );
    }

    #[test]
    fn test_facet_field_with_sort_and_limit() {
        let mut carrier = QueryString::default();
        let facet = FacetField::new(Field::<Doc>::new("Id"))
            .with_excludes(["dt"])
            .with_sort(FacetSortType::CountDesc)
            .with_limit(5);
        render_field(&facet, &mut carrier);
        assert_eq!(
            rendered(&carrier),
            vec![
                "facet=true",
                "facet.field={!ex=dt key=Id facet.sort=count facet.limit=5}Id",
                "f.Id.facet.mincount=1",
            ]
        );
    }

    #[test]
    fn test_facet_fields_on_same_field_keep_their_options() {
        let mut carrier = QueryString::default();
        let top = FacetField::new(Field::<Doc>::new("city"))
            .with_alias("top")
            .unwrap()
            .with_limit(3);
        let all = FacetField::new(Field::<Doc>::new("city"))
            .with_alias("all")
            .unwrap()
            .with_sort(FacetSortType::IndexAsc);
        render_field(&top, &mut carrier);
        render_field(&all, &mut carrier);
        assert_eq!(
            rendered(&carrier),
            vec![
                "facet=true",
                "facet.field={!key=top facet.limit=3}city",
                "f.city.facet.mincount=1",
                "facet.field={!key=all facet.sort=index}city",
            ]
        );
    }

    #[test]
    fn test_facet_enabled_once() {
        let mut carrier = QueryString::default();
        render_field(&FacetField::new(Field::<Doc>::new("a")), &mut carrier);
        render_field(&FacetField::new(Field::<Doc>::new("b")), &mut carrier);
        render_query(
            &FacetQuery::new("cheap", QueryValue::<Doc>::expression("price:[* TO 10]").unwrap()).unwrap(),
            &mut carrier,
        );
        let lines = rendered(&carrier);
        assert_eq!(lines.iter().filter(|l| *l == "facet=true").count(), 1);
        assert!(lines.contains(&"facet.query={!key=cheap}price:[* TO 10]".to_string()));
    }

    #[test]
    fn test_facet_range() {
        let mut carrier = QueryString::default();
        let facet = FacetRange::new("prices", Field::<Doc>::new("price"), "10", "0", "100").unwrap();
        render_range(&facet, &mut carrier);
        assert_eq!(
            rendered(&carrier),
            vec![
                "facet=true",
                "facet.range={!key=prices facet.range.start=0 facet.range.end=100 \
                 facet.range.gap=10}price",
                "f.price.facet.range.other=before",
                "f.price.facet.range.other=after",
                "f.price.facet.mincount=1",
            ]
        );
    }

    #[test]
    fn test_facet_ranges_on_same_field_keep_their_bounds() {
        let mut carrier = QueryString::default();
        let low = FacetRange::new("low", Field::<Doc>::new("price"), "10", "0", "100").unwrap();
        let high = FacetRange::new("high", Field::<Doc>::new("price"), "100", "100", "1000")
            .unwrap()
            .with_sort(FacetSortType::CountDesc);
        render_range(&low, &mut carrier);
        render_range(&high, &mut carrier);

        let ranges: Vec<&str> = carrier
            .pairs()
            .iter()
            .filter(|(k, _)| k == "facet.range")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(
            ranges,
            vec![
                "{!key=low facet.range.start=0 facet.range.end=100 facet.range.gap=10}price",
                "{!key=high facet.range.start=100 facet.range.end=1000 facet.range.gap=100 \
                 facet.sort=count}price",
            ]
        );
        let lines = rendered(&carrier);
        assert_eq!(lines.iter().filter(|l| l.starts_with("f.price.facet.range.other")).count(), 2);
        assert_eq!(lines.iter().filter(|l| *l == "f.price.facet.mincount=1").count(), 1);
        assert!(!lines.iter().any(|l| l.starts_with("f.price.facet.range.start")));
    }

    #[test]
    fn test_facet_spatial() {
        let mut carrier = QueryString::default();
        let facet = FacetSpatial::new(
            "near",
            SpatialFunction::Geofilt,
            Field::<Doc>::new("location"),
            GeoCoordinate::new(-23.5, -46.6).unwrap(),
            Decimal::new(10, 0),
        )
        .unwrap();
        render_spatial(&facet, &mut carrier);
        assert_eq!(
            carrier.get("facet.query"),
            Some("{!key=near}{!geofilt sfield=location pt=-23.5,-46.6 d=10}")
        );
    }

    #[test]
    fn test_facet_limit() {
        let mut carrier = QueryString::default();
        render_limit(&FacetLimit::new(20), &mut carrier);
        assert_eq!(rendered(&carrier), vec!["facet.limit=20"]);
    }
}
