//! Expression Tokenizer
//!
//! Turns a raw expression string into a flat sequence of typed tokens.
//! Whitespace is stripped; digit/decimal-point runs accumulate into `f64`
//! number tokens; `+ - * / ( )` each emit a token immediately. Anything else
//! is an `InvalidCharacter` compile error.

use super::types::{CompileError, Op, Token};

pub fn tokenize(text: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut buf = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            buf.push(c);
            continue;
        }

        if let Some(op) = Op::from_char(c) {
            flush_number(&mut buf, &mut tokens)?;
            tokens.push(Token::Operator(op));
        } else if c == '(' {
            flush_number(&mut buf, &mut tokens)?;
            tokens.push(Token::LeftParen);
        } else if c == ')' {
            flush_number(&mut buf, &mut tokens)?;
            tokens.push(Token::RightParen);
        } else {
            return Err(CompileError::InvalidCharacter(c));
        }
    }

    flush_number(&mut buf, &mut tokens)?;

    Ok(tokens)
}

/// Parses and emits the pending number run, if any.
fn flush_number(buf: &mut String, tokens: &mut Vec<Token>) -> Result<(), CompileError> {
    if buf.is_empty() {
        return Ok(());
    }

    let num: f64 = buf
        .parse()
        .map_err(|_| CompileError::InvalidNumber(buf.clone()))?;
    tokens.push(Token::Number(num));
    buf.clear();

    Ok(())
}
