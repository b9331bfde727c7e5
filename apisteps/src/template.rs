use crate::{data::CacheValue, error::Error};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::{collections::HashMap, fmt::Debug};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{\s*(?P<key>[^{}]*?)\s*\}\}").unwrap();
}

pub trait TemplateEngine: Debug {
    fn replace(
        &self,
        template: &str,
        storage: &HashMap<String, CacheValue>,
    ) -> Result<String, Error>;
}

/// Substitutes `{{key}}` placeholders with the saved values. Whitespace
/// around the key is ignored, inside it is part of the key. An empty
/// placeholder never resolves.
#[derive(Debug, Default)]
pub struct PlaceholderTemplateEngine;

impl PlaceholderTemplateEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for PlaceholderTemplateEngine {
    fn replace(
        &self,
        template: &str,
        storage: &HashMap<String, CacheValue>,
    ) -> Result<String, Error> {
        if let Some(missing) = PLACEHOLDER_REGEX
            .captures_iter(template)
            .map(|captures| captures["key"].to_string())
            .find(|key| !storage.contains_key(key))
        {
            return Err(Error::TemplateResolution(missing));
        }

        Ok(PLACEHOLDER_REGEX
            .replace_all(template, |captures: &Captures| {
                storage
                    .get(&captures["key"])
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .into_owned())
    }
}
