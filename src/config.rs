// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    fetch::REGISTER_URL,
    register::filter,
    schema::{FieldSchema, Revision},
    Record,
};

/// Run settings for the `wtr` binary.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Local path or http(s) URL of the register.
    pub source: String,
    /// Where to write the result; stdout when unset.
    pub output: Option<PathBuf>,
    pub revision: Revision,
    /// Downloads are kept here and reused on the next run.
    pub cache_dir: PathBuf,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub companies: Vec<String>,
    pub product_codes: Vec<String>,
    pub point_to_point: bool,
    pub valid_ngr_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: REGISTER_URL.to_string(),
            output: None,
            revision: Revision::default(),
            cache_dir: PathBuf::from("test_data"),
            filters: FilterConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing {:?}", path))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Override settings from `WTR_SOURCE`, `WTR_OUTPUT`, `WTR_REVISION` and `WTR_CACHE_DIR`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = var("WTR_SOURCE") {
            self.source = source;
        }
        if let Some(output) = var("WTR_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }
        if let Some(revision) = var("WTR_REVISION") {
            self.revision = revision
                .parse::<Revision>()
                .with_context(|| format!("WTR_REVISION={}", revision))?;
        }
        if let Some(dir) = var("WTR_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}

impl FilterConfig {
    /// Turn the configured filters into predicates for `schema`.
    pub fn predicates(&self, schema: &FieldSchema) -> Vec<Box<dyn Fn(&Record) -> bool>> {
        let mut predicates: Vec<Box<dyn Fn(&Record) -> bool>> = Vec::new();
        if !self.companies.is_empty() {
            predicates.push(Box::new(filter::companies(self.companies.clone())));
        }
        if !self.product_codes.is_empty() {
            predicates.push(Box::new(filter::product_codes(
                schema,
                self.product_codes.clone(),
            )));
        }
        if self.point_to_point {
            predicates.push(Box::new(filter::point_to_point(schema)));
        }
        if self.valid_ngr_only {
            predicates.push(Box::new(filter::valid_ngr));
        }
        predicates
    }
}
