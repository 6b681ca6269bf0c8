use crate::core::filter::{filters_for_codebase, is_codebase_filtered, is_endpoint_filtered};
use crate::core::hash::{endpoint_hash, environment_variables_hash, secrets_hash};
use crate::domain::model::{Backend, Context, EndpointFilter, SourceHashes};
use std::collections::BTreeMap;

/// Assigns a change-detection hash to every endpoint of every wanted backend.
///
/// A codebase selected as a whole by a filter keeps all its endpoints unhashed,
/// and so does any endpoint named by a filter of its codebase. Unhashed
/// endpoints skip the "unchanged" check downstream and always redeploy.
pub fn apply_backend_hash_to_backends(
    want_backends: &mut BTreeMap<String, Backend>,
    context: &Context,
) {
    let filters = context.filters();

    for (codebase, want_backend) in want_backends.iter_mut() {
        if is_codebase_filtered(codebase, filters) {
            tracing::debug!("Codebase {} is filtered, skipping hashes", codebase);
            continue;
        }

        let source = context.sources.get(codebase);
        let env_hash = environment_variables_hash(want_backend);
        let codebase_filters = filters_for_codebase(codebase, filters);
        apply_backend_hash_to_endpoints(want_backend, &env_hash, &codebase_filters, source);
    }
}

fn apply_backend_hash_to_endpoints(
    want_backend: &mut Backend,
    env_hash: &str,
    codebase_filters: &[&EndpointFilter],
    source: Option<&SourceHashes>,
) {
    for endpoint in want_backend.all_endpoints_mut() {
        if is_endpoint_filtered(&endpoint.id, codebase_filters.iter().copied()) {
            tracing::debug!("Endpoint {} is filtered, leaving it unhashed", endpoint.id);
            continue;
        }

        let secrets = secrets_hash(endpoint);
        let source_hash = source.and_then(|s| s.for_platform(endpoint.platform));
        endpoint.hash = Some(endpoint_hash(source_hash.into(), env_hash, &secrets));
    }
}
