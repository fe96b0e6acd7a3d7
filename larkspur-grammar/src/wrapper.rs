//! In-place mutation of registered definitions, addressed by name.

use tracing::{debug, warn};

use crate::{
    Error, Grammar, Result,
    definition::{Body, Definition, ModifierKind, TemplateDef},
    node::{Node, Renderable, collect},
};

/// A registered definition found by [`GrammarWrapper::get_def`].
#[derive(Debug, Clone, Copy)]
pub enum DefinitionRef<'a> {
    Rule(&'a Definition),
    Terminal(&'a Definition),
    Template(&'a TemplateDef),
}

impl DefinitionRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(def) | Self::Terminal(def) => def.name(),
            Self::Template(def) => def.name(),
        }
    }

    pub fn tokens(&self) -> &[Renderable] {
        match self {
            Self::Rule(def) | Self::Terminal(def) => def.tokens(),
            Self::Template(def) => def.tokens(),
        }
    }

    pub fn modifier(&self) -> ModifierKind {
        match self {
            Self::Rule(def) | Self::Terminal(def) => def.modifier(),
            Self::Template(def) => def.modifier(),
        }
    }

    /// Priority of a rule or terminal; templates have none.
    pub fn priority(&self) -> Option<i64> {
        match self {
            Self::Rule(def) | Self::Terminal(def) => Some(def.priority()),
            Self::Template(_) => None,
        }
    }
}

/// Changes applied by [`GrammarWrapper::edit`]. Unset fields are left as
/// they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edit {
    pub modifier: Option<ModifierKind>,
    pub priority: Option<i64>,
}

impl Edit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifier(mut self, modifier: impl Into<ModifierKind>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

enum Slot<'a> {
    Definition(&'a mut Definition),
    Template(&'a mut TemplateDef),
}

impl Slot<'_> {
    fn tokens_mut(&mut self) -> &mut Vec<Renderable> {
        match self {
            Slot::Definition(def) => def.tokens_mut(),
            Slot::Template(def) => def.tokens_mut(),
        }
    }
}

/// Mutation surface over a [`Grammar`].
///
/// Names are looked up in rules, then terminals, then templates. A rule
/// and a template may share a name; the rule is then used and a warning is
/// logged.
///
/// # Example
///
/// ```
/// use larkspur_core::Context;
/// use larkspur_grammar::Grammar;
///
/// let mut g = Grammar::new();
/// g.define("rule1", "a").unwrap();
/// g.use_wrapper().extend("rule1", ["e"]).unwrap();
/// assert_eq!(g.generate(&Context::new()).unwrap(), r#"rule1: "a" | "e""#);
/// ```
#[derive(Debug)]
pub struct GrammarWrapper<'g> {
    grammar: &'g mut Grammar,
}

impl<'g> GrammarWrapper<'g> {
    pub(crate) fn new(grammar: &'g mut Grammar) -> Self {
        Self { grammar }
    }

    /// The definition stored under `name`, if any.
    pub fn get_def(&self, name: &str) -> Option<DefinitionRef<'_>> {
        self.warn_if_ambiguous(name);
        let grammar = &*self.grammar;
        if let Some(def) = grammar.rules.get(name) {
            return Some(DefinitionRef::Rule(def));
        }
        if let Some(def) = grammar.terminals.get(name) {
            return Some(DefinitionRef::Terminal(def));
        }
        grammar.templates.get(name).map(DefinitionRef::Template)
    }

    /// Turn the body into one alternation of its current tokens followed by
    /// `alternatives`.
    pub fn extend<I>(&mut self, name: &str, alternatives: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        let mut slot = self.slot(name)?;
        let tokens = slot.tokens_mut();
        let mut choices = std::mem::take(tokens);
        choices.extend(collect(alternatives));
        tokens.push(Node::Choice(choices).into());
        debug!(definition = name, "extended definition");
        Ok(())
    }

    /// Overwrite the body, keeping modifier and priority.
    pub fn replace(&mut self, name: &str, body: impl Into<Body>) -> Result<()> {
        let (tokens, _) = body.into().into_parts();
        *self.slot(name)?.tokens_mut() = tokens;
        debug!(definition = name, "replaced definition body");
        Ok(())
    }

    /// Update modifier and/or priority, leaving the body alone.
    pub fn edit(&mut self, name: &str, edit: Edit) -> Result<()> {
        match self.slot(name)? {
            Slot::Definition(def) => {
                if let Some(modifier) = edit.modifier {
                    *def.modifier_mut() = modifier;
                }
                if let Some(priority) = edit.priority {
                    *def.priority_mut() = priority;
                }
            }
            Slot::Template(def) => {
                if edit.priority.is_some() {
                    return Err(Error::invalid_operation(format!(
                        "template '{name}' cannot carry a priority"
                    )));
                }
                if let Some(modifier) = edit.modifier {
                    *def.modifier_mut() = modifier;
                }
            }
        }
        debug!(definition = name, ?edit, "edited definition");
        Ok(())
    }

    fn slot(&mut self, name: &str) -> Result<Slot<'_>> {
        self.warn_if_ambiguous(name);
        let grammar = &mut *self.grammar;
        if let Some(def) = grammar.rules.get_mut(name) {
            return Ok(Slot::Definition(def));
        }
        if let Some(def) = grammar.terminals.get_mut(name) {
            return Ok(Slot::Definition(def));
        }
        grammar
            .templates
            .get_mut(name)
            .map(Slot::Template)
            .ok_or_else(|| Error::unknown_definition(name))
    }

    fn warn_if_ambiguous(&self, name: &str) {
        if self.grammar.rules.contains_key(name) && self.grammar.templates.contains_key(name) {
            warn!(
                definition = name,
                "'{name}' is both a rule and a template; using the rule"
            );
        }
    }
}
