use crate::formula::Connective;

/// A token of formula text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Open,
    Close,
    Keyword(Connective),
    Ident(&'a str),
}

/// A token together with the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spanned<'a> {
    pub pos: usize,
    pub token: Token<'a>,
}

fn push_word<'a>(input: &'a str, start: usize, end: usize, tokens: &mut Vec<Spanned<'a>>) {
    let word = &input[start..end];
    let token = match Connective::from_keyword(word) {
        Some(c) => Token::Keyword(c),
        None => Token::Ident(word),
    };
    tokens.push(Spanned { pos: start, token });
}

/// Splits the input into parentheses and words.
/// A word is a maximal run of characters that are neither whitespace nor parentheses.
/// Words spelling a connective keyword (case-sensitive) become keywords, all others identifiers.
pub(crate) fn tokenize(input: &str) -> Vec<Spanned<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (pos, c) in input.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(start) = word_start.take() {
                push_word(input, start, pos, &mut tokens);
            }
            match c {
                '(' => tokens.push(Spanned { pos, token: Token::Open }),
                ')' => tokens.push(Spanned { pos, token: Token::Close }),
                _ => {}
            }
        } else if word_start.is_none() {
            word_start = Some(pos);
        }
    }
    if let Some(start) = word_start {
        push_word(input, start, input.len(), &mut tokens);
    }
    tokens
}
