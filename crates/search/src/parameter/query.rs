//! Query, filter, boost and field-list parameters.

use crate::document::{Document, Field};
use crate::error::ConfigurationError;
use crate::parameter::{QueryValue, Validate};
use crate::types::BoostFunction;

fn require_text(value: String, argument: &'static str) -> Result<String, ConfigurationError> {
    if value.trim().is_empty() {
        Err(ConfigurationError::EmptyArgument { argument })
    } else {
        Ok(value)
    }
}

/// The main query.
#[derive(Debug, Clone)]
pub struct Query<D> {
    value: QueryValue<D>,
}

impl<D: Document> Query<D> {
    /// Searches for documents matching `value`.
    pub fn new(value: QueryValue<D>) -> Self {
        Self { value }
    }

    /// The query expression.
    pub fn value(&self) -> &QueryValue<D> {
        &self.value
    }
}

impl<D: Document> Validate for Query<D> {
    fn validate(&self) -> Result<(), String> {
        self.value.validate()
    }
}

/// A filter query, optionally tagged so facets can exclude it.
#[derive(Debug, Clone)]
pub struct Filter<D> {
    value: QueryValue<D>,
    tag: Option<String>,
}

impl<D: Document> Filter<D> {
    /// Restricts results to documents matching `value`.
    pub fn new(value: QueryValue<D>) -> Self {
        Self { value, tag: None }
    }

    /// Tags the filter. Fails when `tag` is blank.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Result<Self, ConfigurationError> {
        self.tag = Some(require_text(tag.into(), "tag")?);
        Ok(self)
    }

    /// The filter expression.
    pub fn value(&self) -> &QueryValue<D> {
        &self.value
    }

    /// The tag facets may exclude.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The rendered filter, including the tag local parameter.
    pub fn expression(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{{!tag={}}}{}", tag, self.value),
            None => self.value.to_string(),
        }
    }
}

impl<D: Document> Validate for Filter<D> {
    fn validate(&self) -> Result<(), String> {
        self.value.validate()
    }
}

/// A boost applied to the relevance score.
#[derive(Debug, Clone)]
pub struct Boost<D> {
    value: QueryValue<D>,
    function: BoostFunction,
}

impl<D: Document> Boost<D> {
    /// Boosts documents by `value`, combined through `function`.
    pub fn new(value: QueryValue<D>, function: BoostFunction) -> Self {
        Self { value, function }
    }

    /// The boost expression.
    pub fn value(&self) -> &QueryValue<D> {
        &self.value
    }

    /// How the boost combines with the score.
    pub fn function(&self) -> BoostFunction {
        self.function
    }
}

impl<D: Document> Validate for Boost<D> {
    fn validate(&self) -> Result<(), String> {
        self.value.validate()
    }
}

/// The query fields and their weights, e.g. `title^2 body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    expression: String,
}

impl QueryField {
    /// Fails when `expression` is blank.
    pub fn new(expression: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            expression: require_text(expression.into(), "expression")?,
        })
    }

    /// The raw expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// How many optional clauses must match, e.g. `75%` or `2<-25%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumShouldMatch {
    expression: String,
}

impl MinimumShouldMatch {
    /// Fails when `expression` is blank.
    pub fn new(expression: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            expression: require_text(expression.into(), "expression")?,
        })
    }

    /// The raw expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// An arbitrary request parameter passed through by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any {
    name: String,
    value: String,
}

impl Any {
    /// Sends `name=value`. Fails when either is blank.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            name: require_text(name.into(), "name")?,
            value: require_text(value.into(), "value")?,
        })
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Validate for Any {
    fn validate(&self) -> Result<(), String> {
        if self.name.contains(['&', '=']) || self.name.chars().any(char::is_whitespace) {
            return Err(format!(
                "parameter name \"{}\" must not contain '&', '=' or whitespace",
                self.name
            ));
        }
        if self.value.contains('&') {
            return Err(format!("value of \"{}\" must not contain '&'", self.name));
        }
        Ok(())
    }
}

/// The stored fields returned with each document.
///
/// Several instances merge into one field list.
#[derive(Debug, Clone)]
pub struct Fields<D> {
    fields: Vec<Field<D>>,
}

impl<D: Document> Fields<D> {
    /// Returns `fields`. Fails when the list is empty.
    pub fn new(fields: impl IntoIterator<Item = Field<D>>) -> Result<Self, ConfigurationError> {
        let fields: Vec<_> = fields.into_iter().collect();
        if fields.is_empty() {
            return Err(ConfigurationError::EmptyArgument { argument: "fields" });
        }
        Ok(Self { fields })
    }

    /// The requested fields.
    pub fn fields(&self) -> &[Field<D>] {
        &self.fields
    }

    /// Wire names in request order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }
}

impl<D: Document> Validate for Fields<D> {
    fn validate(&self) -> Result<(), String> {
        for field in &self.fields {
            if let Some(descriptor) = field.descriptor() {
                if !descriptor.is_stored() {
                    return Err(format!(
                        "field \"{}\" must be stored to be returned with documents",
                        field
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DynamicDocument;

    type Doc = DynamicDocument;

    #[test]
    fn test_filter_expression_with_tag() {
        let value = QueryValue::single(Field::<Doc>::new("city"), "rio");
        let filter = Filter::new(value.clone());
        assert_eq!(filter.expression(), "city:rio");

        let tagged = Filter::new(value).with_tag("dt").unwrap();
        assert_eq!(tagged.tag(), Some("dt"));
        assert_eq!(tagged.expression(), "{!tag=dt}city:rio");
    }

    #[test]
    fn test_filter_rejects_blank_tag() {
        let value = QueryValue::single(Field::<Doc>::new("city"), "rio");
        assert!(matches!(
            Filter::new(value).with_tag(" "),
            Err(ConfigurationError::EmptyArgument { argument: "tag" })
        ));
    }

    #[test]
    fn test_text_parameters_reject_blank() {
        assert!(QueryField::new("").is_err());
        assert!(MinimumShouldMatch::new("  ").is_err());
        assert!(Any::new("", "x").is_err());
        assert!(Any::new("x", "").is_err());
        assert!(Fields::<Doc>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_any_validation() {
        assert!(Any::new("facet.pivot", "a,b").unwrap().validate().is_ok());
        assert!(Any::new("a=b", "c").unwrap().validate().is_err());
        assert!(Any::new("a&b", "c").unwrap().validate().is_err());
        assert!(Any::new("a", "b&c=d").unwrap().validate().is_err());
    }

    #[test]
    fn test_fields_names() {
        let fields = Fields::new([Field::<Doc>::new("id"), Field::new("score")]).unwrap();
        assert_eq!(fields.names(), vec!["id", "score"]);
        assert!(fields.validate().is_ok());
    }
}
