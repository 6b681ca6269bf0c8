use anyhow::Result;
use fn_deploy::core::filter::parse_only_selectors;
use fn_deploy::core::hash::{
    endpoint_hash, environment_variables_hash, secrets_hash, HashComponent,
};
use fn_deploy::domain::model::{Backend, Context, EndpointFilter, Platform};
use fn_deploy::utils::validation::Validate;
use fn_deploy::{apply_backend_hash_to_backends, DeployManifest};
use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;

const MANIFEST: &str = r#"
[codebases.api]
environment = { MODE = "prod" }

[codebases.api.source]
v1_hash = "s1"
v2_hash = "s2"

[[codebases.api.endpoints]]
id = "foo"
platform = "gcfv1"
secrets = [{ key = "TOKEN", secret = "x", version = "1" }]

[[codebases.api.endpoints]]
id = "bar"
platform = "gcfv2"
secrets = [{ key = "TOKEN", secret = "y", version = "7" }]

[codebases.web]
environment = { MODE = "prod" }

[[codebases.web.endpoints]]
id = "render"
platform = "gcfv2"
"#;

fn load(filters: Option<Vec<EndpointFilter>>) -> Result<(BTreeMap<String, Backend>, Context)> {
    let mut file = NamedTempFile::new()?;
    file.write_all(MANIFEST.as_bytes())?;

    let manifest = DeployManifest::from_file(file.path())?;
    manifest.validate()?;
    let (backends, sources) = manifest.into_parts();
    Ok((backends, Context { filters, sources }))
}

fn hash<'a>(backends: &'a BTreeMap<String, Backend>, codebase: &str, id: &str) -> Option<&'a str> {
    backends[codebase]
        .endpoint(id)
        .and_then(|e| e.hash.as_deref())
}

#[test]
fn test_unfiltered_endpoints_get_platform_specific_hashes() -> Result<()> {
    let (mut backends, context) = load(Some(vec![]))?;
    apply_backend_hash_to_backends(&mut backends, &context);

    let api = &backends["api"];
    let env = environment_variables_hash(api);
    let foo = api.endpoint("foo").unwrap();
    let bar = api.endpoint("bar").unwrap();

    assert_eq!(foo.platform, Platform::V1);
    assert_eq!(
        foo.hash.as_deref(),
        Some(endpoint_hash(Some("s1").into(), &env, &secrets_hash(foo)).as_str())
    );
    assert_eq!(
        bar.hash.as_deref(),
        Some(endpoint_hash(Some("s2").into(), &env, &secrets_hash(bar)).as_str())
    );

    // web has no source hashes but is still hashed
    let web = &backends["web"];
    let render = web.endpoint("render").unwrap();
    assert_eq!(
        render.hash.as_deref(),
        Some(
            endpoint_hash(
                HashComponent::Absent,
                &environment_variables_hash(web),
                &secrets_hash(render)
            )
            .as_str()
        )
    );
    Ok(())
}

#[test]
fn test_codebase_selector_leaves_whole_codebase_unhashed() -> Result<()> {
    let (mut backends, context) = load(Some(parse_only_selectors("api")))?;
    apply_backend_hash_to_backends(&mut backends, &context);

    assert_eq!(hash(&backends, "api", "foo"), None);
    assert_eq!(hash(&backends, "api", "bar"), None);
    assert!(hash(&backends, "web", "render").is_some());
    Ok(())
}

#[test]
fn test_endpoint_selector_leaves_only_that_endpoint_unhashed() -> Result<()> {
    let (mut backends, context) = load(Some(parse_only_selectors("functions:api:foo")))?;
    apply_backend_hash_to_backends(&mut backends, &context);

    assert_eq!(hash(&backends, "api", "foo"), None);
    assert!(hash(&backends, "api", "bar").is_some());
    assert!(hash(&backends, "web", "render").is_some());
    Ok(())
}

#[test]
fn test_hash_assigned_iff_no_filter_applies() -> Result<()> {
    let filter_sets = vec![
        vec![],
        vec![EndpointFilter::codebase("web")],
        vec![EndpointFilter::endpoints("api", ["bar"])],
        vec![
            EndpointFilter::endpoints("api", ["foo"]),
            EndpointFilter::endpoints("web", ["render"]),
        ],
        vec![EndpointFilter::endpoints("web", ["foo"])],
        vec![EndpointFilter::codebase("missing")],
    ];

    for filters in filter_sets {
        let (mut backends, context) = load(Some(filters.clone()))?;
        apply_backend_hash_to_backends(&mut backends, &context);

        for (codebase, backend) in &backends {
            for endpoint in backend.all_endpoints() {
                let excluded = filters.iter().any(|f| {
                    f.codebase == *codebase
                        && (f.is_codebase_wide()
                            || f.id_chunks.as_ref().unwrap().contains(&endpoint.id))
                });
                assert_eq!(
                    endpoint.hash.is_none(),
                    excluded,
                    "{}:{} with filters {:?}",
                    codebase,
                    endpoint.id,
                    filters
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let (mut first, context) = load(None)?;
    let (mut second, _) = load(None)?;
    apply_backend_hash_to_backends(&mut first, &context);
    apply_backend_hash_to_backends(&mut second, &context);

    assert_eq!(first, second);
    assert!(first
        .values()
        .flat_map(|b| b.all_endpoints())
        .all(|e| e.hash.as_ref().is_some_and(|h| h.len() == 64)));
    Ok(())
}
