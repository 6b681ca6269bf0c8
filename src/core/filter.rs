use crate::domain::model::EndpointFilter;

/// True when a filter selects the entire codebase (no id chunks).
pub fn is_codebase_filtered(codebase: &str, filters: &[EndpointFilter]) -> bool {
    filters
        .iter()
        .any(|filter| filter.codebase == codebase && filter.is_codebase_wide())
}

/// True when any filter lists `id` among its id chunks. Exact, case-sensitive.
pub fn is_endpoint_filtered<'a, I>(id: &str, filters: I) -> bool
where
    I: IntoIterator<Item = &'a EndpointFilter>,
{
    filters.into_iter().any(|filter| {
        filter
            .id_chunks
            .as_ref()
            .is_some_and(|chunks| chunks.iter().any(|chunk| chunk == id))
    })
}

pub fn filters_for_codebase<'a>(
    codebase: &str,
    filters: &'a [EndpointFilter],
) -> Vec<&'a EndpointFilter> {
    filters
        .iter()
        .filter(|filter| filter.codebase == codebase)
        .collect()
}

/// Parses `--only` selectors such as `api,functions:web:render.thumbnail`.
///
/// Each comma separated selector is `codebase` or `codebase:chunk[.chunk]`,
/// optionally prefixed with `functions:`. Blank selectors are dropped.
pub fn parse_only_selectors(only: &str) -> Vec<EndpointFilter> {
    only.split(',')
        .map(str::trim)
        .map(|selector| selector.strip_prefix("functions:").unwrap_or(selector))
        .filter(|selector| !selector.is_empty())
        .map(|selector| match selector.split_once(':') {
            Some((codebase, id)) => EndpointFilter {
                codebase: codebase.to_string(),
                id_chunks: Some(
                    id.split('.')
                        .filter(|chunk| !chunk.is_empty())
                        .map(str::to_string)
                        .collect(),
                ),
            },
            None => EndpointFilter::codebase(selector),
        })
        .collect()
}
