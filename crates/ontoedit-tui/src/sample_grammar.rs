//! A small class-expression checker for the demo editor
//!
//! Recognises a Manchester-style fragment:
//!
//! ```text
//! expression  := conjunction ("or" conjunction)*
//! conjunction := primary ("and" primary)*
//! primary     := "not" primary
//!              | "(" expression ")"
//!              | "{" individual ("," individual)* "}"
//!              | object-property object-restriction
//!              | data-property data-restriction
//!              | class
//! object-restriction := ("some" | "only") primary
//!                     | "value" individual
//!                     | ("min" | "max" | "exactly") integer primary?
//! data-restriction   := ("some" | "only") datatype
//!                     | "value" literal
//!                     | ("min" | "max" | "exactly") integer datatype?
//! ```
//!
//! On a syntax error it reports which entity kinds and keywords would have been accepted at
//! the failing token, which is what the completer's probe needs.

use ontoedit_completion::{
    CheckError, Entity, EntityKind, ExpectedKinds, Expectations, ExpressionChecker,
    ModelRenderer, Vocabulary,
};
use std::collections::HashMap;

const OPERAND_KEYWORDS: &[&str] = &["not"];
const CONNECTIVES: &[&str] = &["and", "or"];
const OBJECT_RESTRICTIONS: &[&str] = &["some", "only", "value", "min", "max", "exactly"];
const DATA_RESTRICTIONS: &[&str] = &["some", "only", "value", "min", "max", "exactly"];
const LITERAL_KEYWORDS: &[&str] = &["true", "false"];

const PIZZA: &str = "http://www.co-ode.org/ontologies/pizza/pizza.owl#";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Built-in vocabulary used when no vocabulary file is given
pub fn sample_vocabulary() -> Vocabulary {
    let named = |kind, base: &str, names: &[&str]| -> Vec<Entity> {
        names
            .iter()
            .map(|name| Entity::new(kind, format!("{}{}", base, name)))
            .collect()
    };

    let mut entities = named(
        EntityKind::Class,
        PIZZA,
        &[
            "Pizza",
            "PizzaBase",
            "PizzaTopping",
            "CheeseTopping",
            "MeatTopping",
            "MozzarellaTopping",
            "MushroomTopping",
            "PepperoniSausageTopping",
            "TomatoTopping",
            "VegetableTopping",
            "VegetarianPizza",
            "SpicyPizza",
            "ThinAndCrispyBase",
            "DeepPanBase",
            "Country",
        ],
    );
    entities.extend(named(
        EntityKind::ObjectProperty,
        PIZZA,
        &["hasBase", "hasTopping", "hasIngredient", "hasCountryOfOrigin", "isToppingOf"],
    ));
    entities.extend(named(
        EntityKind::DataProperty,
        PIZZA,
        &["hasCalorificContentValue"],
    ));
    entities.extend(named(
        EntityKind::Individual,
        PIZZA,
        &["America", "England", "France", "Germany", "Italy"],
    ));
    entities.extend(named(
        EntityKind::Datatype,
        XSD,
        &["integer", "string", "boolean", "decimal"],
    ));
    Vocabulary { entities }
}

/// Checker for the sample class-expression grammar
pub struct SampleClassExpressionChecker {
    names: HashMap<String, EntityKind>,
}

impl SampleClassExpressionChecker {
    /// Build a checker that knows the entities of `vocabulary` by their renderings
    pub fn new(vocabulary: &Vocabulary, renderer: &dyn ModelRenderer) -> Self {
        let names = vocabulary
            .entities
            .iter()
            .map(|e| (renderer.render(e), e.kind))
            .collect();
        Self { names }
    }
}

impl ExpressionChecker for SampleClassExpressionChecker {
    fn check(&self, text: &str) -> Result<(), CheckError> {
        let tokens = tokenize(text);
        Parser {
            tokens,
            pos: 0,
            names: &self.names,
        }
        .parse()
        .map_err(CheckError::Parse)
    }
}

/// Split into words, quoted literals and single-character punctuation
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        if in_quotes {
            current.push(c);
            if c == '"' {
                in_quotes = false;
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        match c {
            '"' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push(c);
                in_quotes = true;
            }
            '(' | ')' | '{' | '}' | ',' | '[' | ']' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() || c == '^' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

type ParseResult = Result<(), Expectations>;

struct Parser<'a> {
    tokens: Vec<String>,
    pos: usize,
    names: &'a HashMap<String, EntityKind>,
}

impl Parser<'_> {
    fn parse(mut self) -> ParseResult {
        self.expression()?;
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(expecting(ExpectedKinds::none(), CONNECTIVES)),
        }
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.peek() == Some(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn kind_of_next(&self) -> Option<EntityKind> {
        self.peek().and_then(|t| self.names.get(t).copied())
    }

    fn expression(&mut self) -> ParseResult {
        self.conjunction()?;
        while self.eat("or") {
            self.conjunction()?;
        }
        Ok(())
    }

    fn conjunction(&mut self) -> ParseResult {
        self.primary()?;
        while self.eat("and") {
            self.primary()?;
        }
        Ok(())
    }

    fn primary(&mut self) -> ParseResult {
        if self.eat("not") {
            return self.primary();
        }
        if self.eat("(") {
            self.expression()?;
            return self.close(")");
        }
        if self.eat("{") {
            self.individual()?;
            while self.eat(",") {
                self.individual()?;
            }
            return self.close("}");
        }

        match self.kind_of_next() {
            Some(EntityKind::Class) => {
                self.bump();
                Ok(())
            }
            Some(EntityKind::ObjectProperty) => {
                self.bump();
                self.object_restriction()
            }
            Some(EntityKind::DataProperty) => {
                self.bump();
                self.data_restriction()
            }
            _ => Err(operand_expected()),
        }
    }

    fn close(&mut self, delimiter: &str) -> ParseResult {
        if self.eat(delimiter) {
            Ok(())
        } else {
            Err(expecting(ExpectedKinds::none(), CONNECTIVES))
        }
    }

    fn object_restriction(&mut self) -> ParseResult {
        match self.peek() {
            Some("some") | Some("only") => {
                self.bump();
                self.primary()
            }
            Some("value") => {
                self.bump();
                self.individual()
            }
            Some("min") | Some("max") | Some("exactly") => {
                self.bump();
                self.cardinality()?;
                if self.at_operand_end() {
                    Ok(())
                } else {
                    self.primary()
                }
            }
            _ => Err(expecting(ExpectedKinds::none(), OBJECT_RESTRICTIONS)),
        }
    }

    fn data_restriction(&mut self) -> ParseResult {
        match self.peek() {
            Some("some") | Some("only") => {
                self.bump();
                self.datatype()
            }
            Some("value") => {
                self.bump();
                self.literal()
            }
            Some("min") | Some("max") | Some("exactly") => {
                self.bump();
                self.cardinality()?;
                if self.at_operand_end() {
                    Ok(())
                } else {
                    self.datatype()
                }
            }
            _ => Err(expecting(ExpectedKinds::none(), DATA_RESTRICTIONS)),
        }
    }

    fn at_operand_end(&self) -> bool {
        matches!(self.peek(), None | Some("and") | Some("or") | Some(")"))
    }

    fn cardinality(&mut self) -> ParseResult {
        match self.peek().map(str::parse::<u32>) {
            Some(Ok(_)) => {
                self.bump();
                Ok(())
            }
            _ => Err(Expectations::default()),
        }
    }

    fn individual(&mut self) -> ParseResult {
        self.entity(EntityKind::Individual)
    }

    fn datatype(&mut self) -> ParseResult {
        self.entity(EntityKind::Datatype)
    }

    fn entity(&mut self, kind: EntityKind) -> ParseResult {
        if self.kind_of_next() == Some(kind) {
            self.bump();
            Ok(())
        } else {
            Err(Expectations::new(ExpectedKinds::none().with(kind), Vec::new()))
        }
    }

    fn literal(&mut self) -> ParseResult {
        let is_literal = self.peek().is_some_and(|t| {
            (t.len() >= 2 && t.starts_with('"') && t.ends_with('"'))
                || t.parse::<f64>().is_ok()
                || LITERAL_KEYWORDS.contains(&t)
        });
        if is_literal {
            self.bump();
            Ok(())
        } else {
            Err(expecting(ExpectedKinds::none(), LITERAL_KEYWORDS))
        }
    }
}

fn expecting(kinds: ExpectedKinds, keywords: &[&str]) -> Expectations {
    Expectations::new(kinds, keywords.iter().map(|k| k.to_string()).collect())
}

fn operand_expected() -> Expectations {
    expecting(
        ExpectedKinds::none()
            .with(EntityKind::Class)
            .with(EntityKind::ObjectProperty)
            .with(EntityKind::DataProperty),
        OPERAND_KEYWORDS,
    )
}
