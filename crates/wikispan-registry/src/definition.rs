//! Token definitions.
//!
//! A [`TokenDefinition`] is a plain record: a name, a pattern, a priority and
//! a construction rule. The rule is either a list of [`FieldSpec`]s that copy
//! capture groups into named fields, or any closure implementing
//! [`Construct`].

use regex::{Captures, Match, Regex};
use std::fmt;
use std::sync::Arc;
use wikispan_core::{GroupRef, RegistrationError};

/// Extracted fields of a token, in definition order.
pub type Fields = Vec<(String, String)>;

/// Construction rule mapping a successful match to token fields.
///
/// Returning `Err` marks the match as malformed: the scanner keeps the
/// matched text as plain text and reports the reason as a diagnostic.
pub trait Construct: Send + Sync {
    /// Build the fields of a token from the captures of one match.
    fn construct(&self, caps: &Captures<'_>) -> Result<Fields, String>;
}

impl<F> Construct for F
where
    F: Fn(&Captures<'_>) -> Result<Fields, String> + Send + Sync,
{
    fn construct(&self, caps: &Captures<'_>) -> Result<Fields, String> {
        self(caps)
    }
}

/// One field copied from a capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name on the produced token
    pub name: String,
    /// Capture group providing the value
    pub group: GroupRef,
    /// Whether a missing group makes the match malformed
    pub required: bool,
}

impl FieldSpec {
    /// A field that must be present in every match.
    pub fn required(name: impl Into<String>, group: impl Into<GroupRef>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            required: true,
        }
    }

    /// A field that is skipped when its group does not participate.
    pub fn optional(name: impl Into<String>, group: impl Into<GroupRef>) -> Self {
        Self {
            required: false,
            ..Self::required(name, group)
        }
    }
}

/// Look up a capture group by index or name.
pub fn capture<'h>(caps: &Captures<'h>, group: &GroupRef) -> Option<Match<'h>> {
    match group {
        GroupRef::Index(i) => caps.get(*i),
        GroupRef::Name(name) => caps.name(name),
    }
}

/// The data-driven construction rule.
fn extract_fields(specs: &[FieldSpec], caps: &Captures<'_>) -> Result<Fields, String> {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        match capture(caps, &spec.group) {
            Some(m) => fields.push((spec.name.clone(), m.as_str().to_string())),
            None if spec.required => {
                return Err(format!(
                    "required field `{}` has no text: capture group {} is missing from the match",
                    spec.name, spec.group
                ));
            }
            None => {}
        }
    }
    Ok(fields)
}

/// Description of one inline construct.
///
/// Definitions are built with a small builder and compiled when they are
/// registered.
///
/// ```
/// use wikispan_registry::TokenDefinition;
///
/// let link = TokenDefinition::new("wiki_link", r"\[\[ *(.+?) *\| *(.+?) *\]\]")
///     .priority(20)
///     .field("display", 1)
///     .field("target", 2);
/// assert_eq!(link.name(), "wiki_link");
/// ```
#[derive(Clone)]
pub struct TokenDefinition {
    name: String,
    pattern: String,
    priority: i32,
    inner: Option<GroupRef>,
    fields: Vec<FieldSpec>,
    constructor: Option<Arc<dyn Construct>>,
}

impl TokenDefinition {
    /// Create a definition with the default priority and no fields.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            priority: 0,
            inner: None,
            fields: Vec::new(),
            constructor: None,
        }
    }

    /// Set the priority rank (lower = tried first on ties).
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, group: impl Into<GroupRef>) -> Self {
        self.fields.push(FieldSpec::required(name, group));
        self
    }

    /// Add a field spec.
    pub fn field_spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Scan this capture group again for nested tokens.
    pub fn inner(mut self, group: impl Into<GroupRef>) -> Self {
        self.inner = Some(group.into());
        self
    }

    /// Replace the field list with a custom construction rule.
    pub fn constructor(mut self, constructor: impl Construct + 'static) -> Self {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Definition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern source text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Priority rank.
    pub fn priority_rank(&self) -> i32 {
        self.priority
    }

    /// Field specs used when no custom constructor is set.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Compile the pattern, check that it can never match empty text and
    /// that every referenced capture group exists.
    pub(crate) fn compile(self, order: usize) -> Result<CompiledDefinition, RegistrationError> {
        let invalid = |reason: String| RegistrationError::InvalidPattern {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            reason,
        };

        let regex = Regex::new(&self.pattern).map_err(|e| invalid(e.to_string()))?;
        if matches_empty(&self.pattern).map_err(&invalid)? {
            return Err(invalid("pattern can match an empty string".to_string()));
        }
        for spec in &self.fields {
            check_group(&regex, &spec.group)
                .map_err(|reason| invalid(format!("field `{}`: {}", spec.name, reason)))?;
        }
        if let Some(group) = &self.inner {
            check_group(&regex, group).map_err(|reason| invalid(format!("inner: {}", reason)))?;
        }

        Ok(CompiledDefinition {
            definition: self,
            regex,
            order,
        })
    }
}

impl fmt::Debug for TokenDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDefinition")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("priority", &self.priority)
            .field("inner", &self.inner)
            .field("fields", &self.fields)
            .field("custom_constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Whether the pattern can match the empty string anywhere.
///
/// Reads the minimum match length off the parsed pattern. A pattern that
/// can never match has no minimum and is accepted.
fn matches_empty(pattern: &str) -> Result<bool, String> {
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| e.to_string())?;
    Ok(hir.properties().minimum_len() == Some(0))
}

/// Check that a group exists in the compiled pattern.
fn check_group(regex: &Regex, group: &GroupRef) -> Result<(), String> {
    let known = match group {
        GroupRef::Index(i) => *i < regex.captures_len(),
        GroupRef::Name(name) => regex.capture_names().flatten().any(|n| n == name),
    };
    if known {
        Ok(())
    } else {
        Err(format!("capture group {} does not exist in the pattern", group))
    }
}

/// A registered definition with its compiled pattern.
#[derive(Clone)]
pub struct CompiledDefinition {
    definition: TokenDefinition,
    regex: Regex,
    order: usize,
}

impl CompiledDefinition {
    /// Definition name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Pattern source text.
    pub fn pattern(&self) -> &str {
        &self.definition.pattern
    }

    /// Priority rank.
    pub fn priority(&self) -> i32 {
        self.definition.priority
    }

    /// Registration sequence number.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Capture group re-scanned for nested tokens.
    pub fn inner(&self) -> Option<&GroupRef> {
        self.definition.inner.as_ref()
    }

    /// The uncompiled definition.
    pub fn definition(&self) -> &TokenDefinition {
        &self.definition
    }

    /// Run the construction rule on one match.
    pub fn construct(&self, caps: &Captures<'_>) -> Result<Fields, String> {
        match &self.definition.constructor {
            Some(constructor) => constructor.construct(caps),
            None => extract_fields(&self.definition.fields, caps),
        }
    }
}

impl fmt::Debug for CompiledDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledDefinition")
            .field("definition", &self.definition)
            .field("order", &self.order)
            .finish()
    }
}
