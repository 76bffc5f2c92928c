//! Typed documents from `response.docs`.

use serde::Deserialize;
use serde_json::Value;

use crate::document::Document;
use crate::error::ResponseError;

pub(crate) fn build<D: Document>(response: &Value) -> Result<Vec<D>, ResponseError> {
    let docs = response
        .pointer("/response/docs")
        .ok_or_else(|| ResponseError::unexpected("missing response.docs", response))?;
    if !docs.is_array() {
        return Err(ResponseError::unexpected("response.docs is not an array", response));
    }
    Vec::<D>::deserialize(docs).map_err(|e| ResponseError::Deserialization {
        message: e.to_string(),
        response: response.to_string(),
    })
}
