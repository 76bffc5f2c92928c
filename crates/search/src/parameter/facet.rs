//! Facet parameters.
//!
//! Every facet is identified by an alias. The alias names the facet in the
//! request and is the key the matching result builder looks for in the
//! response.

use rust_decimal::Decimal;

use crate::document::{Document, Field};
use crate::error::ConfigurationError;
use crate::parameter::value::{spatial_expression, validate_spatial_field};
use crate::parameter::{QueryValue, Validate};
use crate::types::{FacetSortType, GeoCoordinate, SpatialFunction};

fn require_alias(alias: String) -> Result<String, ConfigurationError> {
    if alias.trim().is_empty() {
        Err(ConfigurationError::EmptyArgument { argument: "alias" })
    } else {
        Ok(alias)
    }
}

fn collect_excludes<I, S>(excludes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    excludes
        .into_iter()
        .map(Into::into)
        .filter(|tag: &String| !tag.trim().is_empty())
        .collect()
}

/// Local parameters naming a facet, the filter tags it ignores and its own
/// options, e.g. `{!ex=dt key=city facet.limit=5}`.
///
/// Options scoped this way apply to one facet only, so two facets on the
/// same field keep separate settings.
pub(crate) fn facet_local_params(
    alias: &str,
    excludes: &[String],
    options: &[(&str, String)],
) -> String {
    let mut params = Vec::with_capacity(options.len() + 2);
    if !excludes.is_empty() {
        params.push(format!("ex={}", excludes.join(",")));
    }
    params.push(format!("key={}", local_value(alias)));
    params.extend(
        options
            .iter()
            .map(|(name, value)| format!("{}={}", name, local_value(value))),
    );
    format!("{{!{}}}", params.join(" "))
}

fn local_value(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
    } else {
        value.to_string()
    }
}

/// Counts documents per distinct value of a field.
#[derive(Debug, Clone)]
pub struct FacetField<D> {
    field: Field<D>,
    alias: String,
    sort: Option<FacetSortType>,
    limit: Option<u64>,
    excludes: Vec<String>,
}

impl<D: Document> FacetField<D> {
    /// Facets on `field`, aliased by the field name.
    pub fn new(field: Field<D>) -> Self {
        Self {
            alias: field.name().to_string(),
            field,
            sort: None,
            limit: None,
            excludes: Vec::new(),
        }
    }

    /// Renames the facet. Fails when `alias` is blank.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Result<Self, ConfigurationError> {
        self.alias = require_alias(alias.into())?;
        Ok(self)
    }

    /// Orders the buckets.
    pub fn with_sort(mut self, sort: FacetSortType) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Caps the number of buckets.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Ignores the filters tagged with any of `excludes`.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = collect_excludes(excludes);
        self
    }

    pub fn field(&self) -> &Field<D> {
        &self.field
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn sort(&self) -> Option<FacetSortType> {
        self.sort
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }
}

impl<D: Document> Validate for FacetField<D> {
    fn validate(&self) -> Result<(), String> {
        self.field.require_indexed(&format!(
            "field \"{}\" must be indexed to be used in a facet",
            self.field
        ))
    }
}

/// Counts documents matching a query.
#[derive(Debug, Clone)]
pub struct FacetQuery<D> {
    alias: String,
    query: QueryValue<D>,
    excludes: Vec<String>,
}

impl<D: Document> FacetQuery<D> {
    /// Counts matches of `query` under `alias`. Fails when `alias` is blank.
    pub fn new(alias: impl Into<String>, query: QueryValue<D>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            alias: require_alias(alias.into())?,
            query,
            excludes: Vec::new(),
        })
    }

    /// Ignores the filters tagged with any of `excludes`.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = collect_excludes(excludes);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn query(&self) -> &QueryValue<D> {
        &self.query
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }
}

impl<D: Document> Validate for FacetQuery<D> {
    fn validate(&self) -> Result<(), String> {
        self.query.validate()
    }
}

/// Counts documents in consecutive ranges of a numeric or date/time field.
///
/// `start`, `end` and `gap` use the engine's syntax: plain numbers for
/// numeric fields, timestamps and date math (`+1DAY`) for date/time fields.
/// Counts before `start` and after `end` are requested as well.
#[derive(Debug, Clone)]
pub struct FacetRange<D> {
    alias: String,
    field: Field<D>,
    gap: String,
    start: String,
    end: String,
    sort: Option<FacetSortType>,
    excludes: Vec<String>,
}

impl<D: Document> FacetRange<D> {
    /// Fails when any of the textual arguments is blank.
    pub fn new(
        alias: impl Into<String>,
        field: Field<D>,
        gap: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let required = |value: String, argument: &'static str| {
            if value.trim().is_empty() {
                Err(ConfigurationError::EmptyArgument { argument })
            } else {
                Ok(value)
            }
        };
        Ok(Self {
            alias: require_alias(alias.into())?,
            field,
            gap: required(gap.into(), "gap")?,
            start: required(start.into(), "start")?,
            end: required(end.into(), "end")?,
            sort: None,
            excludes: Vec::new(),
        })
    }

    /// Orders the buckets.
    pub fn with_sort(mut self, sort: FacetSortType) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Ignores the filters tagged with any of `excludes`.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = collect_excludes(excludes);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn field(&self) -> &Field<D> {
        &self.field
    }

    pub fn gap(&self) -> &str {
        &self.gap
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn sort(&self) -> Option<FacetSortType> {
        self.sort
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }
}

impl<D: Document> Validate for FacetRange<D> {
    fn validate(&self) -> Result<(), String> {
        self.field.require_indexed(&format!(
            "field \"{}\" must be indexed to be used in a facet",
            self.field
        ))?;
        match self.field.descriptor() {
            Some(descriptor) if !descriptor.kind().supports_range() => Err(format!(
                "field \"{}\" must be numeric or date/time to be used in a range facet",
                self.field
            )),
            _ => Ok(()),
        }
    }
}

/// Counts documents within a distance of a point.
#[derive(Debug, Clone)]
pub struct FacetSpatial<D> {
    alias: String,
    function: SpatialFunction,
    field: Field<D>,
    center: GeoCoordinate,
    distance: Decimal,
    excludes: Vec<String>,
}

impl<D: Document> FacetSpatial<D> {
    /// Fails when `alias` is blank or `distance` is negative.
    pub fn new(
        alias: impl Into<String>,
        function: SpatialFunction,
        field: Field<D>,
        center: GeoCoordinate,
        distance: Decimal,
    ) -> Result<Self, ConfigurationError> {
        if distance.is_sign_negative() {
            return Err(ConfigurationError::InvalidArgument {
                argument: "distance",
                message: format!("{} is negative", distance),
            });
        }
        Ok(Self {
            alias: require_alias(alias.into())?,
            function,
            field,
            center,
            distance,
            excludes: Vec::new(),
        })
    }

    /// Ignores the filters tagged with any of `excludes`.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = collect_excludes(excludes);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// The spatial query counted by this facet.
    pub fn expression(&self) -> String {
        spatial_expression(self.function, &self.field, &self.center, &self.distance)
    }
}

impl<D: Document> Validate for FacetSpatial<D> {
    fn validate(&self) -> Result<(), String> {
        validate_spatial_field(&self.field)
    }
}

/// Default maximum number of buckets for every field facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetLimit {
    value: u64,
}

impl FacetLimit {
    /// Caps field facets at `value` buckets.
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// The bucket cap.
    pub fn value(&self) -> u64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DynamicDocument;

    type Doc = DynamicDocument;

    #[test]
    fn test_local_params() {
        assert_eq!(facet_local_params("city", &[], &[]), "{!key=city}");
        assert_eq!(
            facet_local_params("city", &["dt".to_string(), "st".to_string()], &[]),
            "{!ex=dt,st key=city}"
        );
    }

    #[test]
    fn test_local_params_with_options() {
        let options = [("facet.limit", "5".to_string()), ("facet.sort", "count".to_string())];
        assert_eq!(
            facet_local_params("city", &["dt".to_string()], &options),
            "{!ex=dt key=city facet.limit=5 facet.sort=count}"
        );
        let options = [("facet.range.start", "NOW-1 DAY".to_string())];
        assert_eq!(
            facet_local_params("top cities", &[], &options),
            "{!key='top cities' facet.range.start='NOW-1 DAY'}"
        );
    }

    #[test]
    fn test_facet_field_alias_defaults_to_field_name() {
        let facet = FacetField::new(Field::<Doc>::new("city"));
        assert_eq!(facet.alias(), "city");
        let facet = facet.with_alias("cities").unwrap();
        assert_eq!(facet.alias(), "cities");
        assert!(FacetField::new(Field::<Doc>::new("city")).with_alias("").is_err());
    }

    #[test]
    fn test_excludes_drop_blank_tags() {
        let facet = FacetField::new(Field::<Doc>::new("city")).with_excludes(["dt", " ", "st"]);
        assert_eq!(facet.excludes(), ["dt".to_string(), "st".to_string()]);
    }

    #[test]
    fn test_facet_range_requires_bounds() {
        let field = Field::<Doc>::new("price");
        assert!(FacetRange::new("price", field.clone(), "10", "0", "100").is_ok());
        assert!(matches!(
            FacetRange::new("price", field.clone(), "", "0", "100"),
            Err(ConfigurationError::EmptyArgument { argument: "gap" })
        ));
        assert!(matches!(
            FacetRange::new("price", field, "10", "0", " "),
            Err(ConfigurationError::EmptyArgument { argument: "end" })
        ));
    }

    #[test]
    fn test_facet_spatial_expression() {
        let facet = FacetSpatial::new(
            "near",
            SpatialFunction::Geofilt,
            Field::<Doc>::new("location"),
            GeoCoordinate::new(1.5, 2.0).unwrap(),
            Decimal::new(25, 1),
        )
        .unwrap();
        assert_eq!(facet.expression(), "{!geofilt sfield=location pt=1.5,2 d=2.5}");
    }

    #[test]
    fn test_facet_spatial_rejects_negative_distance() {
        let result = FacetSpatial::new(
            "near",
            SpatialFunction::Geofilt,
            Field::<Doc>::new("location"),
            GeoCoordinate::new(0.0, 0.0).unwrap(),
            Decimal::new(-1, 0),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidArgument { argument: "distance", .. })
        ));
    }
}
