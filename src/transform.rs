//! Placeholder substitution for template contents and paths.
//!
//! Substitution is literal, case-sensitive and runs in a single left-to-right
//! pass, so a replacement value is never scanned again for placeholders.

use std::borrow::Cow;

use indexmap::IndexMap;
use log::debug;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

use crate::error::{Error, Result};

/// Ordered mapping from placeholder token to its replacement.
///
/// Keys are non-empty and no key is a substring of another, which makes the
/// result independent of the key order.
#[derive(Debug, Clone)]
pub struct ReplacementSet {
    replacements: IndexMap<String, String>,
    text_pattern: Option<BytesRegex>,
    path_pattern: Option<Regex>,
}

impl ReplacementSet {
    /// Builds a replacement set from token/value pairs.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a token is empty, repeated, or contained in another token
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut replacements = IndexMap::new();
        for (key, value) in pairs {
            let key = key.into();
            if key.is_empty() {
                return Err(Error::ConfigError("placeholder tokens must not be empty".into()));
            }
            if replacements.insert(key.clone(), value.into()).is_some() {
                return Err(Error::ConfigError(format!("duplicate placeholder token '{key}'")));
            }
        }

        for a in replacements.keys() {
            for b in replacements.keys() {
                if a != b && b.contains(a.as_str()) {
                    return Err(Error::ConfigError(format!(
                        "placeholder token '{a}' is a substring of '{b}'"
                    )));
                }
            }
        }

        let (text_pattern, path_pattern) = if replacements.is_empty() {
            (None, None)
        } else {
            let alternation = replacements
                .keys()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            let text = BytesRegex::new(&alternation)
                .map_err(|e| Error::ConfigError(format!("invalid placeholder pattern: {e}")))?;
            let path = Regex::new(&alternation)
                .map_err(|e| Error::ConfigError(format!("invalid placeholder pattern: {e}")))?;
            (Some(text), Some(path))
        };

        Ok(Self { replacements, text_pattern, path_pattern })
    }

    /// Maps every token to the same value, the usual case of a project name.
    pub fn for_project<S: AsRef<str>>(tokens: &[S], project_name: &str) -> Result<Self> {
        Self::new(tokens.iter().map(|token| (token.as_ref().to_string(), project_name.to_string())))
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.replacements.keys().map(String::as_str)
    }

    /// Replaces every token occurrence in a byte sequence.
    pub fn replace_bytes<'a>(&self, text: &'a [u8]) -> Cow<'a, [u8]> {
        match &self.text_pattern {
            Some(pattern) => pattern.replace_all(text, |caps: &regex::bytes::Captures| {
                self.replacements[String::from_utf8_lossy(&caps[0]).as_ref()]
                    .as_bytes()
                    .to_vec()
            }),
            None => Cow::Borrowed(text),
        }
    }

    /// Replaces every token occurrence in a string.
    pub fn replace_str<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.path_pattern {
            Some(pattern) => pattern.replace_all(text, |caps: &regex::Captures| {
                self.replacements[&caps[0]].clone()
            }),
            None => Cow::Borrowed(text),
        }
    }
}

/// Returns true when the content holds a NUL byte and must be copied verbatim.
pub fn is_binary(content: &[u8]) -> bool {
    content.contains(&0)
}

/// Result of transforming one file's content.
#[derive(Debug)]
pub enum Transformed<'a> {
    /// Text content after substitution.
    Text(Cow<'a, [u8]>),
    /// Binary content passed through unchanged.
    Binary(&'a [u8]),
}

impl Transformed<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Transformed::Text(content) => content.as_ref(),
            Transformed::Binary(content) => content,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Transformed::Binary(_))
    }
}

/// Applies a [`ReplacementSet`] to file contents and, optionally, to paths.
#[derive(Debug, Clone)]
pub struct Transformer {
    replacements: ReplacementSet,
    rename_paths: bool,
}

impl Transformer {
    pub fn new(replacements: ReplacementSet, rename_paths: bool) -> Self {
        Self { replacements, rename_paths }
    }

    pub fn renames_paths(&self) -> bool {
        self.rename_paths
    }

    /// Substitutes placeholders in text content; binary content is returned as is.
    pub fn transform_content<'a>(&self, content: &'a [u8]) -> Transformed<'a> {
        if is_binary(content) {
            Transformed::Binary(content)
        } else {
            Transformed::Text(self.replacements.replace_bytes(content))
        }
    }

    /// Maps a slash-separated template path to its destination form.
    pub fn transform_path<'a>(&self, relative_path: &'a str) -> Cow<'a, str> {
        if !self.rename_paths {
            return Cow::Borrowed(relative_path);
        }
        let renamed = self.replacements.replace_str(relative_path);
        if let Cow::Owned(ref path) = renamed {
            debug!("Renamed path '{relative_path}' to '{path}'");
        }
        renamed
    }
}
