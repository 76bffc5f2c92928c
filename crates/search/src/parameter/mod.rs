//! Query parameters.
//!
//! A query is assembled from independent [`Parameter`]s. Each parameter kind
//! declares whether several instances may coexist in one query
//! ([`ParameterKind::allows_multiple_instances`]) and may check itself against
//! the document schema through [`Validate`] before anything is sent.
//!
//! | Kind | Multiple | Validates |
//! |------|----------|-----------|
//! | [`Any`] | yes | name and value are wire-safe |
//! | [`Boost`] | no | query fields are indexed |
//! | [`FacetField`] | yes | field is indexed |
//! | [`FacetLimit`] | no | |
//! | [`FacetQuery`] | yes | query fields are indexed |
//! | [`FacetRange`] | yes | field is indexed and numeric or date/time |
//! | [`FacetSpatial`] | yes | field is indexed and holds coordinates |
//! | [`Fields`] | yes | fields are stored |
//! | [`Filter`] | yes | query fields are indexed |
//! | [`Limit`] | no | |
//! | [`MinimumShouldMatch`] | no | |
//! | [`Offset`] | no | |
//! | [`Query`] | no | query fields are indexed |
//! | [`QueryField`] | no | |
//! | [`RandomSort`] | yes | |
//! | [`Sort`] | yes | field is indexed |
//! | [`SpatialFilter`] | no | field is indexed and holds coordinates |
//! | [`SystemParameter`] | no | |

mod facet;
mod pagination;
mod query;
mod sort;
mod spatial;
pub(crate) mod system;
pub(crate) mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use facet::{FacetField, FacetLimit, FacetQuery, FacetRange, FacetSpatial};
pub(crate) use facet::facet_local_params;
pub use pagination::{DEFAULT_PAGE_SIZE, Limit, Offset};
pub use query::{Any, Boost, Fields, Filter, MinimumShouldMatch, Query, QueryField};
pub(crate) use sort::merge_sort_keys;
pub use sort::{RandomSort, Sort};
pub use spatial::SpatialFilter;
pub use system::SystemParameter;
pub use value::QueryValue;

use crate::document::{Document, Field};
use crate::types::SortDirection;

/// A check a parameter runs against its own configuration and the document
/// schema. Returns the reason when the parameter is unusable.
pub trait Validate {
    /// Validates the parameter.
    fn validate(&self) -> Result<(), String>;
}

/// The kind of a [`Parameter`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    Any,
    Boost,
    FacetField,
    FacetLimit,
    FacetQuery,
    FacetRange,
    FacetSpatial,
    Fields,
    Filter,
    Limit,
    MinimumShouldMatch,
    Offset,
    Query,
    QueryField,
    RandomSort,
    Sort,
    SpatialFilter,
    System,
}

impl ParameterKind {
    /// Returns true if one query may hold several parameters of this kind.
    pub fn allows_multiple_instances(&self) -> bool {
        matches!(
            self,
            ParameterKind::Any
                | ParameterKind::FacetField
                | ParameterKind::FacetQuery
                | ParameterKind::FacetRange
                | ParameterKind::FacetSpatial
                | ParameterKind::Fields
                | ParameterKind::Filter
                | ParameterKind::RandomSort
                | ParameterKind::Sort
        )
    }

    /// Returns the kebab-case name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Any => "any",
            ParameterKind::Boost => "boost",
            ParameterKind::FacetField => "facet-field",
            ParameterKind::FacetLimit => "facet-limit",
            ParameterKind::FacetQuery => "facet-query",
            ParameterKind::FacetRange => "facet-range",
            ParameterKind::FacetSpatial => "facet-spatial",
            ParameterKind::Fields => "fields",
            ParameterKind::Filter => "filter",
            ParameterKind::Limit => "limit",
            ParameterKind::MinimumShouldMatch => "minimum-should-match",
            ParameterKind::Offset => "offset",
            ParameterKind::Query => "query",
            ParameterKind::QueryField => "query-field",
            ParameterKind::RandomSort => "random-sort",
            ParameterKind::Sort => "sort",
            ParameterKind::SpatialFilter => "spatial-filter",
            ParameterKind::System => "system",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of query configuration for document type `D`.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub enum Parameter<D> {
    Any(Any),
    Boost(Boost<D>),
    FacetField(FacetField<D>),
    FacetLimit(FacetLimit),
    FacetQuery(FacetQuery<D>),
    FacetRange(FacetRange<D>),
    FacetSpatial(FacetSpatial<D>),
    Fields(Fields<D>),
    Filter(Filter<D>),
    Limit(Limit),
    MinimumShouldMatch(MinimumShouldMatch),
    Offset(Offset),
    Query(Query<D>),
    QueryField(QueryField),
    RandomSort(RandomSort),
    Sort(Sort<D>),
    SpatialFilter(SpatialFilter<D>),
    System(SystemParameter),
}

impl<D: Document> Parameter<D> {
    /// The kind tag of this parameter.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Parameter::Any(_) => ParameterKind::Any,
            Parameter::Boost(_) => ParameterKind::Boost,
            Parameter::FacetField(_) => ParameterKind::FacetField,
            Parameter::FacetLimit(_) => ParameterKind::FacetLimit,
            Parameter::FacetQuery(_) => ParameterKind::FacetQuery,
            Parameter::FacetRange(_) => ParameterKind::FacetRange,
            Parameter::FacetSpatial(_) => ParameterKind::FacetSpatial,
            Parameter::Fields(_) => ParameterKind::Fields,
            Parameter::Filter(_) => ParameterKind::Filter,
            Parameter::Limit(_) => ParameterKind::Limit,
            Parameter::MinimumShouldMatch(_) => ParameterKind::MinimumShouldMatch,
            Parameter::Offset(_) => ParameterKind::Offset,
            Parameter::Query(_) => ParameterKind::Query,
            Parameter::QueryField(_) => ParameterKind::QueryField,
            Parameter::RandomSort(_) => ParameterKind::RandomSort,
            Parameter::Sort(_) => ParameterKind::Sort,
            Parameter::SpatialFilter(_) => ParameterKind::SpatialFilter,
            Parameter::System(_) => ParameterKind::System,
        }
    }

    /// Shorthand for `self.kind().allows_multiple_instances()`.
    pub fn allows_multiple_instances(&self) -> bool {
        self.kind().allows_multiple_instances()
    }

    /// True for pass-through parameters, which are validated only when the
    /// configuration asks for it separately.
    pub fn is_any(&self) -> bool {
        matches!(self, Parameter::Any(_))
    }

    /// True for the engine-defaults parameter.
    pub fn is_system(&self) -> bool {
        matches!(self, Parameter::System(_))
    }

    /// The validation capability, for the kinds that have one.
    pub fn validation(&self) -> Option<&dyn Validate> {
        match self {
            Parameter::Any(p) => Some(p),
            Parameter::Boost(p) => Some(p),
            Parameter::FacetField(p) => Some(p),
            Parameter::FacetQuery(p) => Some(p),
            Parameter::FacetRange(p) => Some(p),
            Parameter::FacetSpatial(p) => Some(p),
            Parameter::Fields(p) => Some(p),
            Parameter::Filter(p) => Some(p),
            Parameter::Query(p) => Some(p),
            Parameter::Sort(p) => Some(p),
            Parameter::SpatialFilter(p) => Some(p),
            Parameter::FacetLimit(_)
            | Parameter::Limit(_)
            | Parameter::MinimumShouldMatch(_)
            | Parameter::Offset(_)
            | Parameter::QueryField(_)
            | Parameter::RandomSort(_)
            | Parameter::System(_) => None,
        }
    }

    /// Skips `value` documents.
    pub fn offset(value: u64) -> Self {
        Parameter::Offset(Offset::new(value))
    }

    /// Returns at most `value` documents.
    pub fn limit(value: u64) -> Self {
        Parameter::Limit(Limit::new(value))
    }

    /// The main query.
    pub fn query(value: QueryValue<D>) -> Self {
        Parameter::Query(Query::new(value))
    }

    /// An untagged filter.
    pub fn filter(value: QueryValue<D>) -> Self {
        Parameter::Filter(Filter::new(value))
    }

    /// Sorts on `field`.
    pub fn sort(field: Field<D>, direction: SortDirection) -> Self {
        Parameter::Sort(Sort::new(field, direction))
    }

    /// Sorts randomly.
    pub fn random_sort(direction: SortDirection) -> Self {
        Parameter::RandomSort(RandomSort::new(direction))
    }

    /// Facets on `field` under its own name.
    pub fn facet_field(field: Field<D>) -> Self {
        Parameter::FacetField(FacetField::new(field))
    }

    /// Caps the buckets of every field facet.
    pub fn facet_limit(value: u64) -> Self {
        Parameter::FacetLimit(FacetLimit::new(value))
    }

    pub(crate) fn system() -> Self {
        Parameter::System(SystemParameter::new())
    }
}

macro_rules! impl_from_parameter {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<D: Document> From<$ty> for Parameter<D> {
                fn from(parameter: $ty) -> Self {
                    Parameter::$variant(parameter)
                }
            }
        )*
    };
}

impl_from_parameter!(
    Any(Any),
    Boost(Boost<D>),
    FacetField(FacetField<D>),
    FacetLimit(FacetLimit),
    FacetQuery(FacetQuery<D>),
    FacetRange(FacetRange<D>),
    FacetSpatial(FacetSpatial<D>),
    Fields(Fields<D>),
    Filter(Filter<D>),
    Limit(Limit),
    MinimumShouldMatch(MinimumShouldMatch),
    Offset(Offset),
    Query(Query<D>),
    QueryField(QueryField),
    RandomSort(RandomSort),
    Sort(Sort<D>),
    SpatialFilter(SpatialFilter<D>),
);

/// The document-independent parameters a shared configuration can add to
/// every query.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalParameter {
    Any(Any),
    FacetLimit(FacetLimit),
    Limit(Limit),
    MinimumShouldMatch(MinimumShouldMatch),
    Offset(Offset),
    QueryField(QueryField),
    RandomSort(RandomSort),
}

impl<D: Document> From<GlobalParameter> for Parameter<D> {
    fn from(parameter: GlobalParameter) -> Self {
        match parameter {
            GlobalParameter::Any(p) => Parameter::Any(p),
            GlobalParameter::FacetLimit(p) => Parameter::FacetLimit(p),
            GlobalParameter::Limit(p) => Parameter::Limit(p),
            GlobalParameter::MinimumShouldMatch(p) => Parameter::MinimumShouldMatch(p),
            GlobalParameter::Offset(p) => Parameter::Offset(p),
            GlobalParameter::QueryField(p) => Parameter::QueryField(p),
            GlobalParameter::RandomSort(p) => Parameter::RandomSort(p),
        }
    }
}

macro_rules! impl_from_global {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for GlobalParameter {
                fn from(parameter: $variant) -> Self {
                    GlobalParameter::$variant(parameter)
                }
            }
        )*
    };
}

impl_from_global!(
    Any,
    FacetLimit,
    Limit,
    MinimumShouldMatch,
    Offset,
    QueryField,
    RandomSort
);
