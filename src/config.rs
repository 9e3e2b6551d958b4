use std::env;

use crate::storage::ObjectStorageConfig;

/// Values given explicitly on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ObjectStorageOverrides {
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

// First set variable wins.
fn first_var<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
}

/// Load object storage configuration for `bucket` from the process environment.
///
/// Anything left unset here is resolved later by OpenDAL's own credential
/// loading (shared config files, `AWS_PROFILE`).
pub fn load_object_storage_config(
    bucket: &str,
    overrides: ObjectStorageOverrides,
) -> ObjectStorageConfig {
    resolve_object_storage_config(bucket, overrides, |key| env::var(key).ok())
}

/// Resolve object storage configuration against an arbitrary variable lookup.
pub fn resolve_object_storage_config<F>(
    bucket: &str,
    overrides: ObjectStorageOverrides,
    lookup: F,
) -> ObjectStorageConfig
where
    F: Fn(&str) -> Option<String>,
{
    let region = overrides.region.or_else(|| {
        first_var(
            &lookup,
            &["STORAGE_REGION", "AWS_REGION", "AWS_DEFAULT_REGION"],
        )
    });
    let endpoint = overrides
        .endpoint
        .or_else(|| first_var(&lookup, &["STORAGE_ENDPOINT", "AWS_ENDPOINT_URL"]));
    let access_key_id = first_var(&lookup, &["STORAGE_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID"]);
    let secret_access_key = first_var(
        &lookup,
        &["STORAGE_ACCESS_KEY_SECRET", "AWS_SECRET_ACCESS_KEY"],
    );

    ObjectStorageConfig {
        bucket: bucket.to_string(),
        region,
        endpoint,
        access_key_id,
        secret_access_key,
    }
}
