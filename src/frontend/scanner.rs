//! Scanner for the matrix language.
//!
//! The scanner owns an ordered table of (pattern, token kind) rules. At
//! each position it skips whitespace and comments, then picks the rule with
//! the longest match; on a tie the rule registered first wins, which is how
//! `int` becomes a keyword rather than a variable name. Input that no rule
//! matches is consumed one character at a time as a lexical-error token and
//! scanning carries on.

use crate::frontend::pattern::Pattern;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::location::{SourceLocation, Span};
use log::{debug, trace};
use once_cell::sync::Lazy;

/// A single scanner rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub kind: TokenKind,
}

impl Rule {
    pub fn new(pattern: Pattern, kind: TokenKind) -> Self {
        Self { pattern, kind }
    }
}

/// The ordered rule table plus the patterns for skipped input.
///
/// Built once and only read afterwards, so one table can back any number
/// of scanners, on any number of threads.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    trivia: Vec<Pattern>,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::IntKwd),
    ("float", TokenKind::FloatKwd),
    ("boolean", TokenKind::BoolKwd),
    ("True", TokenKind::TrueKwd),
    ("False", TokenKind::FalseKwd),
    ("string", TokenKind::StringKwd),
    ("matrix", TokenKind::MatrixKwd),
    ("let", TokenKind::LetKwd),
    ("in", TokenKind::InKwd),
    ("end", TokenKind::EndKwd),
    ("if", TokenKind::IfKwd),
    ("then", TokenKind::ThenKwd),
    ("else", TokenKind::ElseKwd),
    ("repeat", TokenKind::RepeatKwd),
    ("while", TokenKind::WhileKwd),
    ("print", TokenKind::PrintKwd),
    ("to", TokenKind::ToKwd),
];

const CONSTANTS: &[(&str, TokenKind)] = &[
    (r"[0-9]+", TokenKind::IntConst),
    (r"[0-9]+\.[0-9]+", TokenKind::FloatConst),
    (r#""(\\.|[^"\\])*""#, TokenKind::StringConst),
];

const VARIABLE_NAME: &str = r"[a-zA-Z0-9_]+";

const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftCurly),
    ("}", TokenKind::RightCurly),
    ("[", TokenKind::LeftSquare),
    ("]", TokenKind::RightSquare),
    (";", TokenKind::SemiColon),
    (":", TokenKind::Colon),
];

const OPERATORS: &[(&str, TokenKind)] = &[
    ("=", TokenKind::Assign),
    ("+", TokenKind::PlusSign),
    ("*", TokenKind::Star),
    ("-", TokenKind::Dash),
    ("/", TokenKind::ForwardSlash),
    ("<", TokenKind::LessThan),
    ("<=", TokenKind::LessThanEqual),
    (">", TokenKind::GreaterThan),
    (">=", TokenKind::GreaterThanEqual),
    ("==", TokenKind::EqualsEquals),
    ("!=", TokenKind::NotEquals),
    ("&&", TokenKind::AndOp),
    ("||", TokenKind::OrOp),
    ("!", TokenKind::NotOp),
];

const WHITESPACE: &str = r"[\n\t\r ]+";
const BLOCK_COMMENT: &str = r"/\*([^*]|\*+[^*/])*\*+/";
const LINE_COMMENT: &str = r"//[^\n\r]*";

static STANDARD_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::standard().expect("built-in scanner patterns are valid")
});

impl RuleTable {
    /// Build a table from rules in priority order and the patterns to skip.
    pub fn new(rules: Vec<Rule>, trivia: Vec<Pattern>) -> Self {
        Self { rules, trivia }
    }

    /// The language's rule table: keywords, constants, variable names,
    /// punctuation, operators, in that priority.
    pub fn standard() -> Result<Self, regex::Error> {
        let mut rules = Vec::new();
        for &(text, kind) in KEYWORDS {
            rules.push(Rule::new(Pattern::literal(text)?, kind));
        }
        for &(pattern, kind) in CONSTANTS {
            rules.push(Rule::new(Pattern::new(pattern)?, kind));
        }
        rules.push(Rule::new(Pattern::new(VARIABLE_NAME)?, TokenKind::VariableName));
        for &(text, kind) in PUNCTUATION.iter().chain(OPERATORS) {
            rules.push(Rule::new(Pattern::literal(text)?, kind));
        }

        let trivia = vec![
            Pattern::new(WHITESPACE)?,
            Pattern::new(BLOCK_COMMENT)?,
            Pattern::new(LINE_COMMENT)?,
        ];
        Ok(Self::new(rules, trivia))
    }

    /// The shared, lazily built standard table.
    pub fn shared() -> &'static RuleTable {
        &STANDARD_RULES
    }

    /// Longest match at the start of `text`; earlier rules win ties.
    /// Returns a length of 0 when nothing matches.
    pub fn longest_match(&self, text: &str) -> (usize, TokenKind) {
        let mut best = (0, TokenKind::LexicalError);
        for rule in &self.rules {
            let len = rule.pattern.match_len(text);
            if len > best.0 {
                best = (len, rule.kind);
            }
        }
        best
    }

    /// Bytes of whitespace and comments at the start of `text`.
    /// Comments and whitespace may abut in any order.
    pub fn trivia_len(&self, text: &str) -> usize {
        let mut total = 0;
        loop {
            let consumed = self
                .trivia
                .iter()
                .map(|p| p.match_len(&text[total..]))
                .find(|&len| len > 0);
            match consumed {
                Some(len) => total += len,
                None => return total,
            }
        }
    }
}

/// Turns source text into a token sequence.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'r> {
    rules: &'r RuleTable,
}

impl Scanner<'static> {
    /// A scanner over the shared standard rule table.
    pub fn new() -> Self {
        Self { rules: RuleTable::shared() }
    }
}

impl Default for Scanner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Scanner<'r> {
    /// A scanner over a caller-provided table.
    pub fn with_rules(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    /// Scan `text` into tokens. The result is never empty and always ends
    /// with exactly one end-of-input token.
    pub fn scan<'src>(&self, text: &'src str) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        let mut loc = SourceLocation::start();
        let mut rest = self.skip_trivia(text, &mut loc);

        while !rest.is_empty() {
            let (len, kind) = match self.rules.longest_match(rest) {
                (0, _) => {
                    let width = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                    (width, TokenKind::LexicalError)
                }
                found => found,
            };

            let (lexeme, tail) = rest.split_at(len);
            let end = loc.advanced_by(lexeme);
            trace!("scanned {:?} {:?} at {}", kind, lexeme, loc);
            tokens.push(Token::new(kind, lexeme, Span::new(loc, end), tokens.len()));

            loc = end;
            rest = self.skip_trivia(tail, &mut loc);
        }

        tokens.push(Token::new(TokenKind::EndOfFile, "", Span::point(loc), tokens.len()));
        debug!("scanned {} tokens", tokens.len());
        tokens
    }

    fn skip_trivia<'src>(&self, text: &'src str, loc: &mut SourceLocation) -> &'src str {
        let (skipped, rest) = text.split_at(self.rules.trivia_len(text));
        *loc = loc.advanced_by(skipped);
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token<'_>> {
        Scanner::new().scan(source)
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        scan(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_standard_patterns_compile() {
        let table = RuleTable::standard();
        assert!(table.is_ok(), "{:?}", table.err());
    }

    #[test]
    fn test_empty() {
        let tokens = scan("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_whitespace_and_comments_only() {
        let kinds = token_kinds("  /* a */// b\n\t/* c *//**/ \r\n");
        assert_eq!(kinds, vec![TokenKind::EndOfFile]);
    }

    #[test]
    fn test_keyword_wins_tie_with_name() {
        let tokens = scan("int");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::IntKwd);
        assert_eq!(tokens[0].lexeme, "int");
    }

    #[test]
    fn test_longest_match_beats_keyword() {
        let tokens = scan("intx");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::VariableName);
        assert_eq!(tokens[0].lexeme, "intx");

        assert_eq!(token_kinds("in index"), vec![
            TokenKind::InKwd,
            TokenKind::VariableName,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_keywords() {
        let kinds = token_kinds(
            "int float boolean True False string matrix let in end if then else repeat while print to",
        );
        assert_eq!(kinds, vec![
            TokenKind::IntKwd,
            TokenKind::FloatKwd,
            TokenKind::BoolKwd,
            TokenKind::TrueKwd,
            TokenKind::FalseKwd,
            TokenKind::StringKwd,
            TokenKind::MatrixKwd,
            TokenKind::LetKwd,
            TokenKind::InKwd,
            TokenKind::EndKwd,
            TokenKind::IfKwd,
            TokenKind::ThenKwd,
            TokenKind::ElseKwd,
            TokenKind::RepeatKwd,
            TokenKind::WhileKwd,
            TokenKind::PrintKwd,
            TokenKind::ToKwd,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_constants() {
        let tokens = scan(r#"123 45.67 "say \"hi\"" 8."#);
        assert_eq!(tokens[0].kind, TokenKind::IntConst);
        assert_eq!(tokens[1].kind, TokenKind::FloatConst);
        assert_eq!(tokens[1].lexeme, "45.67");
        assert_eq!(tokens[2].kind, TokenKind::StringConst);
        assert_eq!(tokens[2].lexeme, r#""say \"hi\"""#);
        // A dot without a fraction is not part of a float.
        assert_eq!(tokens[3].kind, TokenKind::IntConst);
        assert_eq!(tokens[4].kind, TokenKind::LexicalError);
    }

    #[test]
    fn test_operators_prefer_longest() {
        let kinds = token_kinds("< <= > >= == = != ! && ||");
        assert_eq!(kinds, vec![
            TokenKind::LessThan,
            TokenKind::LessThanEqual,
            TokenKind::GreaterThan,
            TokenKind::GreaterThanEqual,
            TokenKind::EqualsEquals,
            TokenKind::Assign,
            TokenKind::NotEquals,
            TokenKind::NotOp,
            TokenKind::AndOp,
            TokenKind::OrOp,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_punctuation_without_spaces() {
        let kinds = token_kinds("m[1:2]=x;");
        assert_eq!(kinds, vec![
            TokenKind::VariableName,
            TokenKind::LeftSquare,
            TokenKind::IntConst,
            TokenKind::Colon,
            TokenKind::IntConst,
            TokenKind::RightSquare,
            TokenKind::Assign,
            TokenKind::VariableName,
            TokenKind::SemiColon,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_unmatched_input_is_fail_soft() {
        let tokens = scan("a # b & c");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::VariableName,
            TokenKind::LexicalError,
            TokenKind::VariableName,
            TokenKind::LexicalError,
            TokenKind::VariableName,
            TokenKind::EndOfFile,
        ]);
        assert_eq!(tokens[1].lexeme, "#");
        assert_eq!(tokens[3].lexeme, "&");
    }

    #[test]
    fn test_error_token_consumes_one_character() {
        let tokens = scan("é1");
        assert_eq!(tokens[0].kind, TokenKind::LexicalError);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[1].kind, TokenKind::IntConst);
    }

    #[test]
    fn test_positions() {
        let tokens = scan("foo\n  bar");
        assert_eq!(tokens[0].index, 0);
        assert_eq!(tokens[1].index, 1);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.column, 3);
        assert_eq!(tokens[2].index, 2);
        assert_eq!(tokens[2].span.start.column, 6);
    }

    #[test]
    fn test_custom_rule_table() {
        let table = RuleTable::new(
            vec![Rule::new(Pattern::literal("x").unwrap(), TokenKind::VariableName)],
            vec![Pattern::new(" +").unwrap()],
        );
        let tokens = Scanner::with_rules(&table).scan("x x y");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::VariableName,
            TokenKind::VariableName,
            TokenKind::LexicalError,
            TokenKind::EndOfFile,
        ]);
    }

    #[test]
    fn test_complete_program() {
        let source = r#"
            /* builds a matrix */
            example () {
                matrix m [ 2 : 3 ] i : j = i * j ;
                print ( m ) ; // show it
            }
        "#;
        let tokens = scan(source);
        assert!(tokens.iter().all(|t| !t.is_error()));
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }
}
