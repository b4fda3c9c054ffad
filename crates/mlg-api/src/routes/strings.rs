//! String storage and filtering endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mlg_nlp::{FilterPredicate, parse_query};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;
use crate::store::StoredString;

#[derive(Debug, Deserialize)]
pub struct CreateString {
    pub value: String,
}

/// Explicit filter query parameters for `GET /strings`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub is_palindrome: Option<bool>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub word_count: Option<usize>,
    pub contains_character: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> ApiResult<FilterPredicate> {
        let contains_character = match self.contains_character {
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => {
                        return Err(ApiError::BadRequest(
                            "contains_character must be exactly one character".into(),
                        ));
                    }
                }
            }
            None => None,
        };

        let filter = FilterPredicate {
            is_palindrome: self.is_palindrome,
            min_length: self.min_length,
            max_length: self.max_length,
            word_count: self.word_count,
            contains_character,
        };
        filter.validate().map_err(|_| {
            ApiError::BadRequest("max_length must be greater than or equal to min_length".into())
        })?;
        Ok(filter)
    }
}

#[derive(Debug, Serialize)]
pub struct StringList {
    pub data: Vec<StoredString>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_applied: Option<FilterPredicate>,
}

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterPredicate,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageList {
    pub data: Vec<StoredString>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// POST /api/v1/strings — analyze and store a string.
pub async fn create_string(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateString>,
) -> ApiResult<(StatusCode, Json<StoredString>)> {
    let record = state.store.insert(StoredString::new(req.value)).await?;
    tracing::info!(id = %record.id, length = record.properties.length, "string stored");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/strings — list strings matching explicit filters.
pub async fn list_strings(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<StringList>> {
    let filter = params.into_filter()?;
    let data = state.store.list(&filter).await?;
    Ok(Json(StringList {
        count: data.len(),
        data,
        filters_applied: (!filter.is_empty()).then_some(filter),
    }))
}

/// GET /api/v1/strings/filter-by-natural-language — list strings matching a
/// plain-English query.
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NaturalLanguageParams>,
) -> ApiResult<Json<NaturalLanguageList>> {
    let filter = parse_query(&params.query)?;
    filter.validate()?;
    tracing::debug!(query = %params.query, ?filter, "interpreted natural language query");

    let data = state.store.list(&filter).await?;
    Ok(Json(NaturalLanguageList {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original: params.query,
            parsed_filters: filter,
        },
    }))
}

/// GET /api/v1/strings/{value} — fetch one string.
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> ApiResult<Json<StoredString>> {
    state
        .store
        .get(&value)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("string does not exist in the system".into()))
}

/// DELETE /api/v1/strings/{value} — remove one string.
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete(&value).await? {
        tracing::info!(value = %value, "string deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("string does not exist in the system".into()))
    }
}
