use crate::lexer::{Lexer, Token, TokenKind};
use resgen_core::ModelDescriptor;

const TYPE_KEYWORDS: [&str; 4] = ["class", "interface", "trait", "enum"];

/// Recover the namespace and first declared type name from PHP source.
///
/// Each `namespace` keyword resets the namespace, so the most recent
/// declaration before the type wins. Returns an empty `type_name` when the
/// source declares no type.
pub fn extract_declaration(source: &str) -> ModelDescriptor {
    let mut namespace = String::new();
    let mut reading_namespace = false;
    let mut awaiting_type_name = false;
    let mut previous: Option<Token<'_>> = None;

    for token in Lexer::new(source).filter(|t| !t.is_trivia()) {
        if reading_namespace {
            match token.kind {
                TokenKind::Name | TokenKind::QualifiedName => {
                    namespace.push_str(token.text.trim_start_matches('\\'));
                    previous = Some(token);
                    continue;
                }
                _ => reading_namespace = false,
            }
        }

        if awaiting_type_name {
            if token.kind == TokenKind::Name {
                return ModelDescriptor::new(namespace, token.text);
            }
            awaiting_type_name = false;
        }

        if token.is_keyword("namespace") && !is_member_access(previous.as_ref()) {
            namespace.clear();
            reading_namespace = true;
        } else if is_type_keyword(&token) && !is_member_access(previous.as_ref()) && !is_anonymous(previous.as_ref()) {
            awaiting_type_name = true;
        }

        previous = Some(token);
    }

    ModelDescriptor::new(namespace, "")
}

fn is_type_keyword(token: &Token<'_>) -> bool {
    TYPE_KEYWORDS.iter().any(|keyword| token.is_keyword(keyword))
}

/// `Foo::class`, `$this->class`
fn is_member_access(previous: Option<&Token<'_>>) -> bool {
    previous.is_some_and(|t| matches!(t.kind, TokenKind::DoubleColon | TokenKind::Arrow))
}

/// `new class(...) { ... }`
fn is_anonymous(previous: Option<&Token<'_>>) -> bool {
    previous.is_some_and(|t| t.is_keyword("new"))
}
