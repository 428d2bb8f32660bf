//! Tokenizer and recursive descent parser for the built-in evaluator

use std::fmt;

use crate::core::{CalcError, CalcResult, Comparison, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Constant or function name
    Identifier(String),
    /// Arithmetic operator
    Operator(Operation),
    /// Relational operator
    Compare(Comparison),
    /// Postfix factorial `!`
    Bang,
    /// Argument separator
    Comma,
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is an arithmetic or relational operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Compare(_) | Self::Bang)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => f.write_str(name),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::Compare(cmp) => f.write_str(cmp.symbol()),
            Self::Bang => f.write_str("!"),
            Self::Comma => f.write_str(","),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// A token with its byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The token
    pub token: Token,
    /// Byte offset of the first character
    pub offset: usize,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Nothing to evaluate (blank or comment-only input)
    Empty,
    /// Numeric literal
    Number(f64),
    /// Bare identifier
    Identifier(String),
    /// Function call
    Call {
        /// Function name
        name: String,
        /// Argument expressions
        args: Vec<AstNode>,
    },
    /// Binary arithmetic operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Relational comparison
    Compare {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Comparison,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Postfix factorial
    Factorial(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new identifier node
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Creates a new call node
    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<AstNode>) -> Self {
        Self::Call {
            name: name.into(),
            args,
        }
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new comparison node
    #[must_use]
    pub fn compare(left: AstNode, op: Comparison, right: AstNode) -> Self {
        Self::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new factorial node
    #[must_use]
    pub fn factorial(inner: AstNode) -> Self {
        Self::Factorial(Box::new(inner))
    }
}

/// 1-based character position of a byte offset, as shown in error messages
fn char_position(input: &str, offset: usize) -> usize {
    input[..offset.min(input.len())].chars().count() + 1
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input; a `#` ends the input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Spanned>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input or at a comment
    pub fn next_token(&mut self) -> CalcResult<Option<Spanned>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };
        if ch == '#' {
            self.pos = self.input.len();
            return Ok(None);
        }

        let offset = self.pos;
        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            '+' => self.single(Token::Operator(Operation::Add)),
            '-' => self.single(Token::Operator(Operation::Subtract)),
            '*' => self.single(Token::Operator(Operation::Multiply)),
            '/' => self.single(Token::Operator(Operation::Divide)),
            '%' => self.single(Token::Operator(Operation::Modulo)),
            '^' => self.single(Token::Operator(Operation::Power)),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            ',' => self.single(Token::Comma),
            '<' => self.with_optional_eq(Comparison::Less, Comparison::LessEqual),
            '>' => self.with_optional_eq(Comparison::Greater, Comparison::GreaterEqual),
            '!' => {
                self.advance();
                if self.eat('=') {
                    Token::Compare(Comparison::NotEqual)
                } else {
                    Token::Bang
                }
            }
            '=' if self.remaining().starts_with("==") => {
                self.advance();
                self.advance();
                Token::Compare(Comparison::Equal)
            }
            _ => return Err(self.syntax_error_here()),
        };

        Ok(Some(Spanned { token, offset }))
    }

    fn syntax_error_here(&self) -> CalcError {
        CalcError::syntax(format!(
            "Syntax error in part \"{}\" (char {})",
            self.remaining(),
            char_position(self.input, self.pos)
        ))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn with_optional_eq(&mut self, bare: Comparison, with_eq: Comparison) -> Token {
        self.advance();
        if self.eat('=') {
            Token::Compare(with_eq)
        } else {
            Token::Compare(bare)
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        // Exponent only when digits follow, so `2e` stays `2` then `e`
        if matches!(self.current_char(), Some('e' | 'E')) {
            let digit_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        num_str.parse::<f64>().map(Token::Number).map_err(|_| {
            CalcError::syntax(format!(
                "Syntax error in part \"{}\" (char {})",
                num_str,
                char_position(self.input, start)
            ))
        })
    }
}

/// Deepest nesting the parser accepts.
///
/// Parentheses, unary signs, exponents and operator chains each add a level.
pub const MAX_DEPTH: usize = 256;

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// comparison ::= additive (CMP additive)?
/// additive   ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary)*
/// unary      ::= ('-' | '+') unary | power
/// power      ::= postfix ('^' unary)?       // right associative
/// postfix    ::= primary '!'*
/// primary    ::= NUMBER | IDENT | IDENT '(' args ')' | '(' comparison ')'
/// args       ::= (comparison (',' comparison)*)?
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over tokens produced from `input`
    #[must_use]
    pub fn new(input: &'a str, tokens: Vec<Spanned>) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Parser::new(input, tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Ok(AstNode::Empty);
        }

        let ast = self.parse_comparison()?;

        if let Some(spanned) = self.tokens.get(self.pos) {
            let kind = if spanned.token.is_operator() {
                "operator"
            } else {
                "token"
            };
            return Err(CalcError::syntax(format!(
                "Unexpected {kind} {} (char {})",
                spanned.token,
                char_position(self.input, spanned.offset)
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<&Spanned> {
        let spanned = self.tokens.get(self.pos);
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    /// Position of the current token, or one past the end of input
    fn here(&self) -> usize {
        self.tokens.get(self.pos).map_or_else(
            || self.input.chars().count() + 1,
            |s| char_position(self.input, s.offset),
        )
    }

    /// Goes one level deeper, failing past [`MAX_DEPTH`]
    fn descend(&mut self) -> CalcResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::syntax(format!(
                "Maximum nesting depth exceeded (char {})",
                self.here()
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn parse_comparison(&mut self) -> CalcResult<AstNode> {
        let left = self.parse_additive()?;

        if let Some(Token::Compare(op)) = self.current() {
            let op = *op;
            self.advance();
            let right = self.parse_additive()?;
            return Ok(AstNode::compare(left, op, right));
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;
        let mut chained = 0;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(Operation::Add) => Operation::Add,
                Token::Operator(Operation::Subtract) => Operation::Subtract,
                _ => break,
            };
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        self.ascend(chained);
        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;
        let mut chained = 0;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(Operation::Multiply) => Operation::Multiply,
                Token::Operator(Operation::Divide) => Operation::Divide,
                Token::Operator(Operation::Modulo) => Operation::Modulo,
                _ => break,
            };
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        self.ascend(chained);
        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend(1);
                Ok(AstNode::negate(operand))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend(1);
                Ok(operand)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_postfix()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            self.descend()?;
            // Recursing through unary keeps `^` right associative and allows `2^-1`
            let exponent = self.parse_unary()?;
            self.ascend(1);
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_postfix(&mut self) -> CalcResult<AstNode> {
        let mut node = self.parse_primary()?;
        let mut chained = 0;
        while matches!(self.current(), Some(Token::Bang)) {
            self.descend()?;
            chained += 1;
            self.advance();
            node = AstNode::factorial(node);
        }
        self.ascend(chained);
        Ok(node)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let at = self.here();
        let Some(spanned) = self.advance() else {
            return Err(CalcError::syntax(format!(
                "Unexpected end of expression (char {at})"
            )));
        };

        match spanned.token.clone() {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Identifier(name) => {
                if matches!(self.current(), Some(Token::LeftParen)) {
                    self.advance();
                    self.descend()?;
                    let args = self.parse_args()?;
                    self.ascend(1);
                    Ok(AstNode::call(name, args))
                } else {
                    Ok(AstNode::Identifier(name))
                }
            }
            Token::LeftParen => {
                self.descend()?;
                let expr = self.parse_comparison()?;
                self.expect_right_paren()?;
                self.ascend(1);
                Ok(expr)
            }
            _ => Err(CalcError::syntax(format!("Value expected (char {at})"))),
        }
    }

    fn parse_args(&mut self) -> CalcResult<Vec<AstNode>> {
        let mut args = Vec::new();
        if matches!(self.current(), Some(Token::RightParen)) {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_comparison()?);
            if matches!(self.current(), Some(Token::Comma)) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_right_paren()?;
        Ok(args)
    }

    fn expect_right_paren(&mut self) -> CalcResult<()> {
        let at = self.here();
        match self.current() {
            Some(Token::RightParen) => {
                self.advance();
                Ok(())
            }
            _ => Err(CalcError::syntax(format!(
                "Parenthesis ) expected (char {at})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    fn syntax_message(input: &str) -> String {
        match Parser::parse_str(input) {
            Err(CalcError::Syntax(message)) => message,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    // ===== Token tests =====

    #[test]
    fn test_token_predicates() {
        assert!(Token::Operator(Operation::Add).is_operator());
        assert!(Token::Compare(Comparison::Less).is_operator());
        assert!(Token::Bang.is_operator());
        assert!(!Token::Number(5.0).is_operator());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Operator(Operation::Power).to_string(), "^");
        assert_eq!(Token::Compare(Comparison::GreaterEqual).to_string(), ">=");
        assert_eq!(Token::Identifier("pi".into()).to_string(), "pi");
        assert_eq!(Token::RightParen.to_string(), ")");
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(tokens("42"), vec![Token::Number(42.0)]);
        assert_eq!(tokens("3.25"), vec![Token::Number(3.25)]);
        assert_eq!(tokens(".5"), vec![Token::Number(0.5)]);
        assert_eq!(tokens("1e3"), vec![Token::Number(1000.0)]);
        assert_eq!(tokens("2.5E-2"), vec![Token::Number(0.025)]);
    }

    #[test]
    fn test_tokenize_dangling_exponent_is_identifier() {
        assert_eq!(
            tokens("2e"),
            vec![Token::Number(2.0), Token::Identifier("e".into())]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            tokens("+ - * / % ^"),
            vec![
                Token::Operator(Operation::Add),
                Token::Operator(Operation::Subtract),
                Token::Operator(Operation::Multiply),
                Token::Operator(Operation::Divide),
                Token::Operator(Operation::Modulo),
                Token::Operator(Operation::Power),
            ]
        );
    }

    #[test]
    fn test_tokenize_comparisons() {
        assert_eq!(
            tokens("== != < <= > >="),
            vec![
                Token::Compare(Comparison::Equal),
                Token::Compare(Comparison::NotEqual),
                Token::Compare(Comparison::Less),
                Token::Compare(Comparison::LessEqual),
                Token::Compare(Comparison::Greater),
                Token::Compare(Comparison::GreaterEqual),
            ]
        );
    }

    #[test]
    fn test_tokenize_call() {
        assert_eq!(
            tokens("max(1,2)"),
            vec![
                Token::Identifier("max".into()),
                Token::LeftParen,
                Token::Number(1.0),
                Token::Comma,
                Token::Number(2.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_factorial() {
        assert_eq!(tokens("5!"), vec![Token::Number(5.0), Token::Bang]);
    }

    #[test]
    fn test_tokenize_comment_stops_input() {
        assert_eq!(tokens("1 + 2 # three"), tokens("1 + 2"));
        assert!(tokens("# nothing here").is_empty());
    }

    #[test]
    fn test_tokenize_offsets() {
        let spanned = Tokenizer::new("12 + x").tokenize().unwrap();
        let offsets: Vec<usize> = spanned.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 3, 5]);
    }

    #[test]
    fn test_tokenize_invalid_char() {
        let result = Tokenizer::new("2 @ 3").tokenize();
        assert_eq!(
            result,
            Err(CalcError::syntax("Syntax error in part \"@ 3\" (char 3)"))
        );
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut t = Tokenizer::new("1 + 2");
        t.next_token().unwrap();
        assert_eq!(t.remaining(), " + 2");
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_empty_and_comment() {
        assert_eq!(Parser::parse_str("").unwrap(), AstNode::Empty);
        assert_eq!(Parser::parse_str("  # note").unwrap(), AstNode::Empty);
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        assert_eq!(
            Parser::parse_str("2 + 3 * 4").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(AstNode::number(3.0), Operation::Multiply, AstNode::number(4.0)),
            )
        );
    }

    #[test]
    fn test_parse_power_right_associative() {
        assert_eq!(
            Parser::parse_str("2 ^ 3 ^ 2").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::binary(AstNode::number(3.0), Operation::Power, AstNode::number(2.0)),
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_binds_looser_than_power() {
        assert_eq!(
            Parser::parse_str("-2^2").unwrap(),
            AstNode::negate(AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::number(2.0)
            ))
        );
    }

    #[test]
    fn test_parse_negative_exponent() {
        assert_eq!(
            Parser::parse_str("2^-1").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::negate(AstNode::number(1.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_plus_is_transparent() {
        assert_eq!(Parser::parse_str("+7").unwrap(), AstNode::number(7.0));
    }

    #[test]
    fn test_parse_double_negative() {
        assert_eq!(
            Parser::parse_str("--5").unwrap(),
            AstNode::negate(AstNode::negate(AstNode::number(5.0)))
        );
    }

    #[test]
    fn test_parse_parentheses() {
        assert_eq!(
            Parser::parse_str("((2 + 3))").unwrap(),
            AstNode::binary(AstNode::number(2.0), Operation::Add, AstNode::number(3.0))
        );
    }

    #[test]
    fn test_parse_identifier_and_call() {
        assert_eq!(Parser::parse_str("sin").unwrap(), AstNode::identifier("sin"));
        assert_eq!(
            Parser::parse_str("pow(2, 3)").unwrap(),
            AstNode::call("pow", vec![AstNode::number(2.0), AstNode::number(3.0)])
        );
        assert_eq!(Parser::parse_str("max()").unwrap(), AstNode::call("max", vec![]));
    }

    #[test]
    fn test_parse_comparison() {
        assert_eq!(
            Parser::parse_str("1 + 1 == 2").unwrap(),
            AstNode::compare(
                AstNode::binary(AstNode::number(1.0), Operation::Add, AstNode::number(1.0)),
                Comparison::Equal,
                AstNode::number(2.0)
            )
        );
    }

    #[test]
    fn test_parse_factorial_chain() {
        assert_eq!(
            Parser::parse_str("3!!").unwrap(),
            AstNode::factorial(AstNode::factorial(AstNode::number(3.0)))
        );
    }

    #[test]
    fn test_parse_unclosed_paren_at_end() {
        assert_eq!(
            syntax_message("3*(4+"),
            "Unexpected end of expression (char 6)"
        );
        assert_eq!(syntax_message("(2 + 3"), "Parenthesis ) expected (char 7)");
    }

    #[test]
    fn test_parse_extra_close_paren() {
        assert_eq!(syntax_message("2 + 3)"), "Unexpected token ) (char 6)");
    }

    #[test]
    fn test_parse_missing_operand() {
        assert_eq!(syntax_message("2 +"), "Unexpected end of expression (char 4)");
    }

    #[test]
    fn test_parse_consecutive_operators() {
        assert_eq!(syntax_message("2 + * 3"), "Value expected (char 5)");
    }

    #[test]
    fn test_parse_chained_comparison_rejected() {
        assert_eq!(syntax_message("1 < 2 < 3"), "Unexpected operator < (char 7)");
    }

    // ===== Nesting depth =====

    fn nested_parens(levels: usize) -> String {
        format!("{}1{}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_parse_nesting_up_to_limit() {
        assert_eq!(
            Parser::parse_str(&nested_parens(MAX_DEPTH)).unwrap(),
            AstNode::number(1.0)
        );
    }

    #[test]
    fn test_parse_nesting_past_limit_rejected() {
        assert_eq!(
            syntax_message(&nested_parens(MAX_DEPTH + 1)),
            format!("Maximum nesting depth exceeded (char {})", MAX_DEPTH + 2)
        );
    }

    #[test]
    fn test_parse_deep_input_fails_without_overflow() {
        let message = syntax_message(&nested_parens(20_000));
        assert!(message.starts_with("Maximum nesting depth exceeded"));

        for input in [
            format!("{}1", "-".repeat(20_000)),
            format!("{}1", "+".repeat(20_000)),
            format!("2{}", "^2".repeat(20_000)),
            format!("3{}", "!".repeat(20_000)),
            format!("1{}", "+1".repeat(20_000)),
            format!("1{}", "*1".repeat(20_000)),
            format!("{}1{}", "sin(".repeat(20_000), ")".repeat(20_000)),
        ] {
            assert!(
                syntax_message(&input).starts_with("Maximum nesting depth exceeded"),
                "for input of {} chars",
                input.len()
            );
        }
    }

    #[test]
    fn test_parse_depth_resets_between_siblings() {
        // Side by side groups do not add up; only the chain links count
        let input = vec![nested_parens(MAX_DEPTH - 8); 4].join(" * 1 + ");
        assert!(Parser::parse_str(&input).is_ok());
    }

    #[test]
    fn test_parse_adjacent_values_rejected() {
        assert_eq!(syntax_message("2 pi"), "Unexpected token pi (char 3)");
    }

    #[test]
    fn test_parse_reports_character_positions_not_bytes() {
        assert_eq!(
            syntax_message("π + §"),
            "Syntax error in part \"§\" (char 5)"
        );
    }

    #[test]
    fn test_parser_new_and_parse() {
        let spanned = Tokenizer::new("42").tokenize().unwrap();
        let mut parser = Parser::new("42", spanned);
        assert_eq!(parser.pos, 0);
        assert_eq!(parser.parse().unwrap(), AstNode::Number(42.0));
    }
}
