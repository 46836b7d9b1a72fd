//! Shunting-Yard Reducer
//!
//! Converts the infix token sequence into postfix (reverse-Polish) order,
//! honoring operator precedence and parentheses. Pure function, no shared
//! state.

use super::types::{CompileError, Token};

/// Standard shunting-yard. All four operators are left-associative: on equal
/// precedence the stacked operator pops before the new one pushes.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(op) => {
                while matches!(
                    stack.last(),
                    Some(Token::Operator(top)) if op.precedence() <= top.precedence()
                ) {
                    if let Some(popped) = stack.pop() {
                        output.push(popped);
                    }
                }
                stack.push(Token::Operator(op));
            }
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(inner) => output.push(inner),
                        None => return Err(CompileError::MismatchedParentheses),
                    }
                }
            }
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(CompileError::MismatchedParentheses);
        }
        output.push(token);
    }

    Ok(output)
}
