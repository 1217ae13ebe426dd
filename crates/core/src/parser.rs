//! Recursive-descent parser producing the raw construct list.
//! All constructs carry provenance (file, line of the opening keyword).
//! No cross-reference checks are done here; that is validation's job.
use crate::error::LoadError;
use crate::lexer::{Spanned, Token};

pub use crate::ast::{Provenance, RawAlternative, RawConstruct, RawLabel, RawStep};

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    filename: String,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], filename: &str) -> Self {
        Parser {
            tokens,
            pos: 0,
            filename: filename.to_owned(),
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn cur_line(&self) -> u32 {
        self.cur().line
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, token: Token, shown: &str) -> Result<(), LoadError> {
        if self.peek() == &token {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}', got {:?}", shown, self.peek())))
        }
    }

    fn expect_colon(&mut self) -> Result<(), LoadError> {
        self.expect(Token::Colon, ":")
    }

    fn expect_lbrace(&mut self) -> Result<(), LoadError> {
        self.expect(Token::LBrace, "{")
    }

    fn expect_rbrace(&mut self) -> Result<(), LoadError> {
        self.expect(Token::RBrace, "}")
    }

    fn expect_lbracket(&mut self) -> Result<(), LoadError> {
        self.expect(Token::LBracket, "[")
    }

    fn expect_rbracket(&mut self) -> Result<(), LoadError> {
        self.expect(Token::RBracket, "]")
    }

    fn skip_comma(&mut self) {
        if self.peek() == &Token::Comma {
            self.advance();
        }
    }

    fn err(&self, msg: impl Into<String>) -> LoadError {
        LoadError::parse(&self.filename, self.cur_line(), msg)
    }

    fn err_at(&self, line: u32, msg: impl Into<String>) -> LoadError {
        LoadError::parse(&self.filename, line, msg)
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    fn take_word(&mut self) -> Result<String, LoadError> {
        if let Token::Word(w) = self.peek().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected identifier, got {:?}", self.peek())))
        }
    }

    fn take_label(&mut self) -> Result<RawLabel, LoadError> {
        let line = self.cur_line();
        let name = self.take_word()?;
        Ok(RawLabel { name, line })
    }

    fn take_str(&mut self) -> Result<String, LoadError> {
        if let Token::Str(s) = self.peek().clone() {
            self.advance();
            Ok(s)
        } else {
            Err(self.err(format!("expected string literal, got {:?}", self.peek())))
        }
    }

    fn prov(&self, line: u32) -> Provenance {
        Provenance {
            file: self.filename.clone(),
            line,
        }
    }

    // -- Lists ------------------------------------------------------

    fn parse_label_list(&mut self) -> Result<Vec<RawLabel>, LoadError> {
        self.expect_lbracket()?;
        let mut items = Vec::new();
        while self.peek() != &Token::RBracket {
            if self.peek() == &Token::Eof {
                return Err(self.err("unterminated list, expected ']'"));
            }
            items.push(self.take_label()?);
            self.skip_comma();
        }
        self.expect_rbracket()?;
        Ok(items)
    }

    /// `[ "text", when label "text", ... ]`
    fn parse_steps(&mut self) -> Result<Vec<RawStep>, LoadError> {
        self.expect_lbracket()?;
        let mut steps = Vec::new();
        while self.peek() != &Token::RBracket {
            let line = self.cur_line();
            let gate = if self.is_word("when") {
                self.advance();
                Some(self.take_label()?)
            } else {
                None
            };
            let text = self.take_str()?;
            steps.push(RawStep { text, gate, line });
            self.skip_comma();
        }
        self.expect_rbracket()?;
        Ok(steps)
    }

    // -- Constructs -------------------------------------------------

    pub fn parse_file(&mut self) -> Result<Vec<RawConstruct>, LoadError> {
        let mut constructs = Vec::new();
        while self.peek() != &Token::Eof {
            let c = self.parse_construct()?;
            constructs.push(c);
        }
        Ok(constructs)
    }

    fn parse_construct(&mut self) -> Result<RawConstruct, LoadError> {
        let line = self.cur_line();
        match self.peek().clone() {
            Token::Word(w) => match w.as_str() {
                "wizard" => self.parse_wizard(line),
                "question" => self.parse_question(line),
                "catalog" => self.parse_catalog(line),
                "effect" => self.parse_effect(line),
                "relation" => self.parse_relation(line),
                _ => Err(self.err(format!("unexpected token '{}'", w))),
            },
            other => Err(self.err(format!("expected construct keyword, got {:?}", other))),
        }
    }

    fn parse_wizard(&mut self, line: u32) -> Result<RawConstruct, LoadError> {
        self.advance();
        let id = self.take_word()?;
        self.expect_lbrace()?;
        let mut title = None;
        let mut relation = None;
        let mut found = None;
        let mut not_found = None;
        while self.peek() != &Token::RBrace {
            let key = self.take_word()?;
            self.expect_colon()?;
            match key.as_str() {
                "title" => title = Some(self.take_str()?),
                "relation" => relation = Some(self.take_label()?),
                "found" => found = Some(self.take_str()?),
                "not_found" => not_found = Some(self.take_str()?),
                _ => return Err(self.err(format!("unknown Wizard field '{}'", key))),
            }
        }
        self.expect_rbrace()?;
        Ok(RawConstruct::Wizard {
            id,
            title: title.ok_or_else(|| self.err_at(line, "Wizard missing 'title'"))?,
            relation: relation.ok_or_else(|| self.err_at(line, "Wizard missing 'relation'"))?,
            found,
            not_found,
            prov: self.prov(line),
        })
    }

    fn parse_question(&mut self, line: u32) -> Result<RawConstruct, LoadError> {
        self.advance();
        let id = self.take_word()?;
        self.expect_lbrace()?;
        let mut prompt = None;
        while self.peek() != &Token::RBrace {
            let key = self.take_word()?;
            self.expect_colon()?;
            match key.as_str() {
                "prompt" => prompt = Some(self.take_str()?),
                _ => return Err(self.err(format!("unknown Question field '{}'", key))),
            }
        }
        self.expect_rbrace()?;
        Ok(RawConstruct::Question {
            id,
            prompt: prompt.ok_or_else(|| self.err_at(line, "Question missing 'prompt'"))?,
            prov: self.prov(line),
        })
    }

    fn parse_catalog(&mut self, line: u32) -> Result<RawConstruct, LoadError> {
        self.advance();
        let id = self.take_word()?;
        self.expect_lbrace()?;
        let mut items = None;
        while self.peek() != &Token::RBrace {
            let key = self.take_word()?;
            self.expect_colon()?;
            match key.as_str() {
                "items" => items = Some(self.parse_label_list()?),
                _ => return Err(self.err(format!("unknown Catalog field '{}'", key))),
            }
        }
        self.expect_rbrace()?;
        Ok(RawConstruct::Catalog {
            id,
            items: items.ok_or_else(|| self.err_at(line, "Catalog missing 'items'"))?,
            prov: self.prov(line),
        })
    }

    fn parse_effect(&mut self, line: u32) -> Result<RawConstruct, LoadError> {
        self.advance();
        let id = self.take_word()?;
        self.expect_lbrace()?;
        let mut text = None;
        while self.peek() != &Token::RBrace {
            let key = self.take_word()?;
            self.expect_colon()?;
            match key.as_str() {
                "text" => text = Some(self.take_str()?),
                _ => return Err(self.err(format!("unknown Effect field '{}'", key))),
            }
        }
        self.expect_rbrace()?;
        Ok(RawConstruct::Effect {
            id,
            text: text.ok_or_else(|| self.err_at(line, "Effect missing 'text'"))?,
            prov: self.prov(line),
        })
    }

    fn parse_relation(&mut self, line: u32) -> Result<RawConstruct, LoadError> {
        self.advance();
        let id = self.take_word()?;
        self.expect_lbrace()?;
        let mut alternatives = Vec::new();
        while self.peek() != &Token::RBrace {
            if self.peek() == &Token::Eof {
                return Err(self.err(format!("unterminated Relation '{}'", id)));
            }
            alternatives.push(self.parse_alternative()?);
        }
        self.expect_rbrace()?;
        Ok(RawConstruct::Relation {
            id,
            alternatives,
            prov: self.prov(line),
        })
    }

    fn parse_alternative(&mut self) -> Result<RawAlternative, LoadError> {
        let line = self.cur_line();
        let output = self.take_word()?;
        self.expect_lbrace()?;
        let mut requires = None;
        let mut steps = Vec::new();
        while self.peek() != &Token::RBrace {
            let key = self.take_word()?;
            self.expect_colon()?;
            match key.as_str() {
                "requires" => requires = Some(self.parse_label_list()?),
                "steps" => steps = self.parse_steps()?,
                _ => return Err(self.err(format!("unknown Alternative field '{}'", key))),
            }
        }
        self.expect_rbrace()?;
        Ok(RawAlternative {
            requires: requires.ok_or_else(|| {
                self.err_at(line, format!("Alternative '{}' missing 'requires'", output))
            })?,
            output,
            steps,
            line,
        })
    }
}

/// Default maximum number of errors collected in multi-error mode before aborting.
pub const DEFAULT_MAX_ERRORS: usize = 10;

pub fn parse(tokens: &[Spanned], filename: &str) -> Result<Vec<RawConstruct>, LoadError> {
    let mut p = Parser::new(tokens, filename);
    p.parse_file()
}

/// Parse in multi-error recovery mode.
///
/// Returns the constructs that parsed plus the errors collected along the
/// way. The parser recovers at construct boundaries: after an error it
/// skips to the closing `}` of the broken construct, or to the next
/// top-level keyword, and resumes.
pub fn parse_recovering(
    tokens: &[Spanned],
    filename: &str,
    max_errors: usize,
) -> (Vec<RawConstruct>, Vec<LoadError>) {
    let mut p = Parser::new(tokens, filename);
    p.parse_file_recovering(max_errors)
}

impl<'a> Parser<'a> {
    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)].token
    }

    /// A construct keyword followed by ':' is a field name, not a new construct.
    fn is_construct_keyword(&self) -> bool {
        matches!(
            self.peek(),
            Token::Word(w) if matches!(
                w.as_str(),
                "wizard" | "question" | "catalog" | "effect" | "relation"
            )
        ) && self.peek_next() != &Token::Colon
    }

    fn recover_to_next_construct(&mut self) {
        let mut depth: i32 = 0;
        loop {
            match self.peek() {
                Token::Eof => break,
                Token::LBrace => {
                    depth += 1;
                    self.advance();
                }
                Token::RBrace => {
                    if depth <= 0 {
                        // Consume the closing brace that ends the broken construct
                        self.advance();
                        break;
                    }
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    if depth == 0 && self.is_construct_keyword() {
                        break;
                    }
                    self.advance();
                }
            }
        }
    }

    fn parse_file_recovering(&mut self, max_errors: usize) -> (Vec<RawConstruct>, Vec<LoadError>) {
        let mut constructs = Vec::new();
        let mut errors = Vec::new();

        while self.peek() != &Token::Eof {
            match self.parse_construct() {
                Ok(c) => constructs.push(c),
                Err(e) => {
                    errors.push(e);
                    if errors.len() >= max_errors {
                        break;
                    }
                    self.recover_to_next_construct();
                }
            }
        }

        (constructs, errors)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_src(src: &str) -> Result<Vec<RawConstruct>, LoadError> {
        let tokens = lexer::lex(src, "test.kb")?;
        parse(&tokens, "test.kb")
    }

    #[test]
    fn parses_relation_with_steps_and_gates() {
        let src = r#"
relation makeable_pizza {
    margherita {
        requires: [tomato_sauce, mozzarella]
        steps: [
            "Stretch the dough.",
            when olive_oil "Brush with olive oil.",
            "Bake."
        ]
    }
}
"#;
        let constructs = parse_src(src).unwrap();
        assert_eq!(constructs.len(), 1);
        match &constructs[0] {
            RawConstruct::Relation { id, alternatives, prov } => {
                assert_eq!(id, "makeable_pizza");
                assert_eq!(prov.line, 2);
                assert_eq!(alternatives.len(), 1);
                let alt = &alternatives[0];
                assert_eq!(alt.output, "margherita");
                assert_eq!(alt.requires.len(), 2);
                assert_eq!(alt.steps.len(), 3);
                assert!(alt.steps[0].gate.is_none());
                assert_eq!(
                    alt.steps[1].gate.as_ref().map(|g| g.name.as_str()),
                    Some("olive_oil")
                );
            }
            other => panic!("expected Relation, got {:?}", other),
        }
    }

    #[test]
    fn parses_wizard_question_catalog_effect() {
        let src = r#"
wizard health {
    title: "Health"
    relation: disease
    not_found: "Nothing."
}
question fever { prompt: "Do you have a fever?" }
catalog extra_base { items: [olive_oil, sugar] }
effect sugar { text: "Slower rise." }
"#;
        let constructs = parse_src(src).unwrap();
        let kinds: Vec<&str> = constructs.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["Wizard", "Question", "Catalog", "Effect"]);
        if let RawConstruct::Wizard {
            found, not_found, ..
        } = &constructs[0]
        {
            assert!(found.is_none());
            assert_eq!(not_found.as_deref(), Some("Nothing."));
        }
    }

    #[test]
    fn missing_required_field_is_reported() {
        let err = parse_src("question fever { }").unwrap_err();
        assert!(err.message.contains("missing 'prompt'"), "{}", err.message);

        let err = parse_src("\nquestion fever {\n}\n").unwrap_err();
        assert_eq!(err.line, 2);

        let err = parse_src("relation r { a { steps: [] } }").unwrap_err();
        assert!(err.message.contains("missing 'requires'"), "{}", err.message);
    }

    #[test]
    fn unknown_field_is_reported() {
        let err = parse_src("catalog c { entries: [a] }").unwrap_err();
        assert!(err.message.contains("unknown Catalog field 'entries'"));
    }

    #[test]
    fn unknown_keyword_is_reported() {
        let err = parse_src("fact fever { }").unwrap_err();
        assert!(err.message.contains("unexpected token 'fact'"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn recovering_parse_collects_each_broken_construct() {
        let src = r#"
question fever { }
question cough { prompt: "Cough?" }
catalog c { items: [a }
question headache { prompt: "Headache?" }
"#;
        let tokens = lexer::lex(src, "test.kb").unwrap();
        let (constructs, errors) = parse_recovering(&tokens, "test.kb", DEFAULT_MAX_ERRORS);
        assert_eq!(errors.len(), 2, "{:?}", errors);
        let ids: Vec<&str> = constructs.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["cough", "headache"]);
    }

    #[test]
    fn recovery_skips_keyword_used_as_field_name() {
        let src = "wizard w { title: 5 relation: disease }\nquestion q { prompt: \"Q?\" }\n";
        let tokens = lexer::lex(src, "test.kb").unwrap();
        let (constructs, errors) = parse_recovering(&tokens, "test.kb", DEFAULT_MAX_ERRORS);
        assert_eq!(errors.len(), 1, "{:?}", errors);
        let ids: Vec<&str> = constructs.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["q"]);
    }

    #[test]
    fn recovering_parse_stops_at_max_errors() {
        let mut src = String::new();
        for i in 0..20 {
            src.push_str(&format!("question q{} {{ }}\n", i));
        }
        let tokens = lexer::lex(&src, "limit.kb").unwrap();
        let (_, errors) = parse_recovering(&tokens, "limit.kb", 5);
        assert_eq!(errors.len(), 5);
    }
}
