//! The definition registry.

use indexmap::{IndexMap, IndexSet, map::Entry};
use larkspur_core::{
    Context, NameClass, indent_block, name_class, validate_rule_name, validate_terminal_name,
};
use tracing::debug;

use crate::{
    Emitter, Error, GrammarWrapper, Namespace, Render, Result,
    definition::{
        Body, DefOptions, Definition, DefinitionKind, DirectiveContent, DirectiveDef, TemplateDef,
        DEFAULT_PRIORITY,
    },
    node::{GrammarId, Reference, Renderable, RuleRef, TerminalRef},
};

/// An insertion-ordered registry of rules, terminals, templates and
/// directives that renders to grammar text.
///
/// A grammar is not synchronized. Mutate it from one thread at a time;
/// rendering only reads it.
///
/// # Example
///
/// ```
/// use larkspur_core::Context;
/// use larkspur_grammar::{Grammar, Node};
///
/// let mut g = Grammar::new();
/// let expr = g.rule("expr").unwrap();
/// let number = g.terminal("NUMBER").unwrap();
/// g.define("start", expr).unwrap();
/// g.define("expr", Node::many_separated("+", number)).unwrap();
/// g.define("NUMBER", Node::regexp("[0-9]+")).unwrap();
///
/// assert_eq!(
///     g.generate(&Context::new()).unwrap(),
///     "NUMBER: /[0-9]+/\n\nstart: expr\nexpr: (NUMBER (\"+\" NUMBER)+)"
/// );
/// ```
#[derive(Debug)]
pub struct Grammar {
    id: GrammarId,
    pub(crate) rules: IndexMap<String, Definition>,
    pub(crate) terminals: IndexMap<String, Definition>,
    pub(crate) templates: IndexMap<String, TemplateDef>,
    pub(crate) directives: Vec<DirectiveDef>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Self {
            id: GrammarId::next(),
            rules: IndexMap::new(),
            terminals: IndexMap::new(),
            templates: IndexMap::new(),
            directives: Vec::new(),
        }
    }

    /// Identity carried by every handle this grammar issues.
    pub fn id(&self) -> GrammarId {
        self.id
    }

    /// A forward-reference handle to a rule, defined or not.
    pub fn rule(&self, name: &str) -> Result<RuleRef> {
        check_name(name, Namespace::Rule)?;
        Ok(RuleRef::new(name, self.id))
    }

    /// A forward-reference handle to a terminal, defined or not.
    pub fn terminal(&self, name: &str) -> Result<TerminalRef> {
        check_name(name, Namespace::Terminal)?;
        Ok(TerminalRef::new(name, self.id))
    }

    /// A handle whose kind is picked by the case of `name`.
    pub fn lookup(&self, name: &str) -> Result<Reference> {
        match classify(name)? {
            NameClass::Rule => Ok(RuleRef::new(name, self.id).into()),
            NameClass::Terminal => Ok(TerminalRef::new(name, self.id).into()),
        }
    }

    /// Define a rule or a terminal, picked by the case of `name`.
    ///
    /// A [`Modifier`](crate::Modifier) body sets the modifier of the new
    /// definition.
    pub fn define(&mut self, name: &str, body: impl Into<Body>) -> Result<&mut Definition> {
        match classify(name)? {
            NameClass::Rule => self.make_rule(name, body, DefOptions::default()),
            NameClass::Terminal => self.make_terminal(name, body, DefOptions::default()),
        }
    }

    /// Define a rule with default options.
    pub fn define_rule(&mut self, name: &str, body: impl Into<Body>) -> Result<&mut Definition> {
        self.make_rule(name, body, DefOptions::default())
    }

    /// Define a terminal with default options.
    pub fn define_terminal(
        &mut self,
        name: &str,
        body: impl Into<Body>,
    ) -> Result<&mut Definition> {
        self.make_terminal(name, body, DefOptions::default())
    }

    pub fn make_rule(
        &mut self,
        name: &str,
        body: impl Into<Body>,
        options: DefOptions,
    ) -> Result<&mut Definition> {
        check_name(name, Namespace::Rule)?;
        let def = Definition::new(DefinitionKind::Rule, name, body, options);
        insert(&mut self.rules, def, Namespace::Rule, options.replace)
    }

    pub fn make_terminal(
        &mut self,
        name: &str,
        body: impl Into<Body>,
        options: DefOptions,
    ) -> Result<&mut Definition> {
        check_name(name, Namespace::Terminal)?;
        let def = Definition::new(DefinitionKind::Terminal, name, body, options);
        insert(&mut self.terminals, def, Namespace::Terminal, options.replace)
    }

    /// Define a template, `name{params}: body`.
    ///
    /// `params` is a single parameter or a tuple of them. Templates carry no
    /// priority.
    pub fn make_template(
        &mut self,
        name: &str,
        params: impl Into<Renderable>,
        body: impl Into<Body>,
        options: DefOptions,
    ) -> Result<&mut TemplateDef> {
        check_name(name, Namespace::Template)?;
        if options.priority != DEFAULT_PRIORITY {
            return Err(Error::invalid_operation(format!(
                "template '{name}' cannot carry a priority"
            )));
        }
        let params = params.into().into_params();
        if params.is_empty() {
            return Err(Error::invalid_operation(format!(
                "template '{name}' needs at least one parameter"
            )));
        }
        let def = TemplateDef::new(name, params, body, options.modifier);
        insert(&mut self.templates, def, Namespace::Template, options.replace)
    }

    /// Append a directive, `%name content`. Directives are never
    /// duplicate-checked.
    pub fn make_directive(
        &mut self,
        name: &str,
        content: impl Into<DirectiveContent>,
    ) -> Result<&mut DirectiveDef> {
        check_name(name, Namespace::Directive)?;
        self.directives.push(DirectiveDef::new(name, content));
        let index = self.directives.len() - 1;
        Ok(&mut self.directives[index])
    }

    /// Register `value` through a handle.
    ///
    /// An integer key defines the handle's rule or terminal with that
    /// priority. Any other key defines a template named after a rule handle
    /// with the key as its parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use larkspur_core::Context;
    /// use larkspur_grammar::Grammar;
    ///
    /// let mut g = Grammar::new();
    /// let (template, c, keyword) = (g.rule("template1")?, g.rule("c")?, g.rule("keyword")?);
    /// g.assign(&template, c, "d")?;
    /// g.assign(&keyword, 2, "let")?;
    /// assert_eq!(
    ///     g.generate(&Context::new())?,
    ///     "keyword.2: \"let\"\n\n\ntemplate1{c}: \"d\""
    /// );
    /// # Ok::<(), larkspur_grammar::Error>(())
    /// ```
    pub fn assign(
        &mut self,
        handle: impl Into<Reference>,
        key: impl Into<IndexKey>,
        value: impl Into<Body>,
    ) -> Result<()> {
        let handle = handle.into();
        if handle.grammar() != self.id {
            return Err(Error::invalid_operation(format!(
                "handle '{}' belongs to another grammar",
                handle.name()
            )));
        }
        match (handle, key.into()) {
            (Reference::Rule(rule), IndexKey::Priority(priority)) => {
                let options = DefOptions::new().priority(priority);
                self.make_rule(rule.name(), value, options)?;
            }
            (Reference::Terminal(terminal), IndexKey::Priority(priority)) => {
                let options = DefOptions::new().priority(priority);
                self.make_terminal(terminal.name(), value, options)?;
            }
            (Reference::Rule(rule), IndexKey::Params(params)) => {
                self.make_template(
                    rule.name(),
                    Renderable::Group(params),
                    value,
                    DefOptions::default(),
                )?;
            }
            (Reference::Terminal(terminal), IndexKey::Params(_)) => {
                return Err(Error::invalid_operation(format!(
                    "terminal '{}' cannot be a template",
                    terminal.name()
                )));
            }
        }
        Ok(())
    }

    /// Render the whole grammar: terminals, rules, directives, then
    /// templates, with a blank line after each group.
    ///
    /// Either the complete text is returned or the first render error.
    pub fn generate(&self, ctx: &Context) -> Result<String> {
        let text = self.render_to_string(ctx)?;
        Ok(text.trim().to_string())
    }

    /// Mutation surface over the registered definitions.
    pub fn use_wrapper(&mut self) -> GrammarWrapper<'_> {
        GrammarWrapper::new(self)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Definition> {
        self.rules.values()
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Definition> {
        self.terminals.values()
    }

    pub fn templates(&self) -> impl Iterator<Item = &TemplateDef> {
        self.templates.values()
    }

    pub fn directives(&self) -> &[DirectiveDef] {
        &self.directives
    }

    pub fn get_rule(&self, name: &str) -> Option<&Definition> {
        self.rules.get(name)
    }

    pub fn get_terminal(&self, name: &str) -> Option<&Definition> {
        self.terminals.get(name)
    }

    pub fn get_template(&self, name: &str) -> Option<&TemplateDef> {
        self.templates.get(name)
    }

    /// Whether `name` is stored in any namespace.
    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.contains_key(name)
            || self.terminals.contains_key(name)
            || self.templates.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
            && self.terminals.is_empty()
            && self.templates.is_empty()
            && self.directives.is_empty()
    }

    /// Names referenced through handles or template instantiations that
    /// have no definition, in order of first appearance.
    ///
    /// Template parameters count as defined inside their own template, and
    /// names brought in by `%import` or `%declare` count as defined.
    /// Variables are not resolved.
    pub fn undefined_references(&self) -> Vec<String> {
        let mut declared = IndexSet::new();
        for directive in &self.directives {
            declared.extend(declared_names(directive));
        }

        // (referenced names, names local to the definition)
        let mut scopes: Vec<(Vec<&str>, Vec<&str>)> = Vec::new();
        for def in self.terminals.values().chain(self.rules.values()) {
            scopes.push((references_of(def.tokens()), Vec::new()));
        }
        for directive in &self.directives {
            if let DirectiveContent::Node(node) = directive.content() {
                let mut names = Vec::new();
                node.references(&mut names);
                scopes.push((names, Vec::new()));
            }
        }
        for template in self.templates.values() {
            scopes.push((references_of(template.tokens()), references_of(template.params())));
        }

        let mut missing = IndexSet::new();
        for (names, local) in scopes {
            for name in names {
                if !self.is_defined(name) && !declared.contains(name) && !local.contains(&name) {
                    missing.insert(name.to_string());
                }
            }
        }
        missing.into_iter().collect()
    }
}

impl Render for Grammar {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        for def in self.terminals.values() {
            out.emit(def, ctx)?.newline();
        }
        out.newline();
        for def in self.rules.values() {
            out.emit(def, ctx)?.newline();
        }
        out.newline();
        for def in &self.directives {
            out.emit(def, ctx)?.newline();
        }
        out.newline();
        for def in self.templates.values() {
            out.emit(def, ctx)?.newline();
        }
        out.newline();
        Ok(())
    }

    fn describe(&self) -> String {
        let mut dumps = Vec::new();
        dumps.extend(self.rules.values().map(Render::describe));
        dumps.extend(self.terminals.values().map(Render::describe));
        dumps.extend(self.directives.iter().map(Render::describe));
        dumps.extend(self.templates.values().map(Render::describe));
        format!("Grammar({})", indent_block(&dumps.join("\n\n")))
    }
}

/// Key of [`Grammar::assign`]: a priority or a template parameter list.
#[derive(Debug, Clone)]
pub enum IndexKey {
    Priority(i64),
    Params(Vec<Renderable>),
}

impl From<i64> for IndexKey {
    fn from(priority: i64) -> Self {
        Self::Priority(priority)
    }
}

impl From<i32> for IndexKey {
    fn from(priority: i32) -> Self {
        Self::Priority(priority as i64)
    }
}

impl From<Vec<Renderable>> for IndexKey {
    fn from(params: Vec<Renderable>) -> Self {
        Self::Params(params)
    }
}

macro_rules! impl_index_key_params {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for IndexKey {
                fn from(value: $ty) -> Self {
                    Self::Params(Renderable::from(value).into_params())
                }
            }
        )*
    };
}

impl_index_key_params!(&str, String, Renderable, RuleRef, TerminalRef, Reference);

impl From<&RuleRef> for IndexKey {
    fn from(rule: &RuleRef) -> Self {
        Self::Params(vec![rule.clone().into()])
    }
}

macro_rules! impl_index_key_tuple {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Into<Renderable>),+> From<($($name,)+)> for IndexKey {
                #[allow(non_snake_case)]
                fn from(($($name,)+): ($($name,)+)) -> Self {
                    Self::Params(vec![$($name.into()),+])
                }
            }
        )*
    };
}

impl_index_key_tuple!((A), (A, B), (A, B, C), (A, B, C, D));

fn check_name(name: &str, namespace: Namespace) -> Result<()> {
    let problem = match namespace {
        Namespace::Terminal => validate_terminal_name(name),
        Namespace::Rule | Namespace::Template | Namespace::Directive => validate_rule_name(name),
    };
    match problem {
        Some(reason) => Err(Error::invalid_name(name, namespace, reason)),
        None => Ok(()),
    }
}

fn classify(name: &str) -> Result<NameClass> {
    name_class(name).ok_or_else(|| {
        // Report against the namespace the name looks closest to
        let (namespace, reason) = if name.chars().any(|c| c.is_ascii_lowercase()) {
            (Namespace::Rule, validate_rule_name(name))
        } else {
            (Namespace::Terminal, validate_terminal_name(name))
        };
        Error::invalid_name(name, namespace, reason.unwrap_or("invalid identifier"))
    })
}

trait Named {
    fn key(&self) -> &str;
}

impl Named for Definition {
    fn key(&self) -> &str {
        self.name()
    }
}

impl Named for TemplateDef {
    fn key(&self) -> &str {
        self.name()
    }
}

fn insert<T: Named>(
    map: &mut IndexMap<String, T>,
    def: T,
    namespace: Namespace,
    replace: bool,
) -> Result<&mut T> {
    match map.entry(def.key().to_string()) {
        Entry::Occupied(mut entry) => {
            if !replace {
                return Err(Error::duplicate_name(entry.key().clone(), namespace));
            }
            debug!(definition = %entry.key(), %namespace, "replacing definition");
            entry.insert(def);
            Ok(entry.into_mut())
        }
        Entry::Vacant(entry) => Ok(entry.insert(def)),
    }
}

fn references_of(tokens: &[Renderable]) -> Vec<&str> {
    let mut names = Vec::new();
    tokens.iter().for_each(|t| t.references(&mut names));
    names
}

/// Names a directive brings into scope: `%import lib.NAME`,
/// `%import lib.NAME -> ALIAS`, `%import lib (A, B)` and `%declare A B`.
fn declared_names(directive: &DirectiveDef) -> Vec<String> {
    let DirectiveContent::Raw(text) = directive.content() else {
        return Vec::new();
    };
    match directive.name() {
        "declare" => text.split_whitespace().map(str::to_string).collect(),
        "import" => {
            if let Some((_, alias)) = text.split_once("->") {
                return vec![alias.trim().to_string()];
            }
            if let (Some(open), Some(close)) = (text.find('('), text.rfind(')'))
                && open < close
            {
                return text[open + 1..close]
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
            }
            text.trim()
                .rsplit('.')
                .next()
                .map(|name| vec![name.to_string()])
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}
