//! Build conformance fixture runner.
//!
//! Each case names a reference request type and supplies either path
//! parameters or a JSON body. The built message is compared through its JSON
//! encoding, or the failure is compared by category.

use crate::registry;
use rpcgate::{build_from_body, build_from_params, BodyError, BuildError, DEFAULT_MAX_BODY_BYTES};
use serde::Deserialize;
use std::collections::HashMap;

/// A build fixture.
#[derive(Debug, Deserialize)]
pub struct BuildFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<BuildCase>,
}

/// A single message to build.
#[derive(Debug, Deserialize)]
pub struct BuildCase {
    pub name: String,
    pub type_name: String,
    /// Path parameters. Ignored when `body` is set.
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Raw JSON body.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
    /// Expected JSON encoding of the built message.
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ErrorKind>,
}

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownType,
    ConstructionFailed,
    BodyDecode,
    BodyTooLarge,
    ParameterDecode,
}

impl ErrorKind {
    /// Categorize a build error.
    #[must_use]
    pub fn of(err: &BuildError) -> Self {
        match err {
            BuildError::UnknownType { .. } => Self::UnknownType,
            BuildError::ConstructionFailed { .. } => Self::ConstructionFailed,
            BuildError::BodyDecode {
                source: BodyError::TooLarge { .. },
                ..
            } => Self::BodyTooLarge,
            BuildError::BodyDecode { .. } => Self::BodyDecode,
            BuildError::ParameterDecode { .. } => Self::ParameterDecode,
        }
    }
}

/// What a case produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Message(serde_json::Value),
    Error(ErrorKind),
}

impl BuildFixture {
    /// Parse multiple fixtures from a YAML file with `---` separators.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all cases and panic on first failure.
    pub fn run_and_assert(&self) {
        let registry = registry();
        for case in &self.cases {
            let expected = case.expected();
            let actual = case.run(&registry);
            assert_eq!(
                actual, expected,
                "Fixture '{}' case '{}' failed",
                self.name, case.name
            );
        }
    }
}

impl BuildCase {
    /// Build the case's message against `resolver`.
    pub fn run(&self, resolver: &rpcgate::TypeRegistry) -> Outcome {
        let result = match &self.body {
            Some(body) => build_from_body(
                resolver,
                &self.type_name,
                body.as_bytes(),
                self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES),
            ),
            None => build_from_params(resolver, &self.type_name, &self.params),
        };

        match result {
            Ok(message) => match message.to_json() {
                Ok(json) => Outcome::Message(json),
                Err(e) => panic!("case '{}': message does not encode: {e}", self.name),
            },
            Err(err) => Outcome::Error(ErrorKind::of(&err)),
        }
    }

    /// The outcome the fixture expects.
    ///
    /// # Panics
    ///
    /// If the case sets neither `expect` nor `expect_error`.
    pub fn expected(&self) -> Outcome {
        match (&self.expect, self.expect_error) {
            (_, Some(kind)) => Outcome::Error(kind),
            (Some(json), None) => Outcome::Message(json.clone()),
            (None, None) => panic!("case '{}' has no expectation", self.name),
        }
    }
}
