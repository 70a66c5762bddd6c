//! Upload destination settings.

use serde::Deserialize;

/// Upload destination settings. The bucket comes from `S3_BUCKET`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_acl")]
    pub acl: String,
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

fn default_key() -> String {
    "transparency/transparency.json".into()
}

fn default_region() -> String {
    "us-west-2".into()
}

fn default_acl() -> String {
    "public-read".into()
}

fn default_cache_control() -> String {
    "max-age=1800".into()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            region: default_region(),
            acl: default_acl(),
            cache_control: default_cache_control(),
        }
    }
}
