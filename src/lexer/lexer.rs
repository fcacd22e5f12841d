// Copyright (C) 2024 Bellande Architecture Mechanism Research Innovation Center, Ronaldson Bellande

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::utilities::utilities::{Token, GROUP_MARKER, VARIABLE_SENTINEL};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    fn next_token(&mut self) -> Option<Token> {
        // Characters that open no token are dropped, the same way an
        // unterminated quote or a lone sentinel is.
        loop {
            let ch = *self.input.get(self.position)?;
            let token = match ch {
                '"' => self.read_quoted(),
                VARIABLE_SENTINEL => self.read_variable(),
                '[' => self.read_group(),
                c if is_word_char(c) => Some(Token::Word(self.read_while(is_word_char))),
                _ => None,
            };
            match token {
                Some(token) => return Some(token),
                None => self.position += 1,
            }
        }
    }

    fn read_quoted(&mut self) -> Option<Token> {
        let close = self.input[self.position + 1..]
            .iter()
            .position(|&c| c == '"')?;
        let end = self.position + close + 2;
        let text: String = self.input[self.position..end].iter().collect();
        self.position = end;
        Some(Token::Quoted(text))
    }

    fn read_variable(&mut self) -> Option<Token> {
        if !self.peek_is(self.position + 1, is_name_char) {
            return None;
        }
        self.position += 1;
        let name = self.read_while(is_name_char);
        Some(Token::Variable(format!("{}{}", VARIABLE_SENTINEL, name)))
    }

    fn read_group(&mut self) -> Option<Token> {
        let marker_len = GROUP_MARKER.len();
        if self.input.get(self.position + 1) != Some(&']')
            || !self.peek_is(self.position + marker_len, is_name_char)
        {
            return None;
        }
        self.position += marker_len;
        let name = self.read_while(is_name_char);
        Some(Token::Group(format!("{}{}", GROUP_MARKER, name)))
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let start = self.position;
        while self.peek_is(self.position, accept) {
            self.position += 1;
        }
        self.input[start..self.position].iter().collect()
    }

    fn peek_is(&self, index: usize, accept: fn(char) -> bool) -> bool {
        self.input.get(index).map_or(false, |&c| accept(c))
    }
}

impl Iterator for Lexer {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Characters allowed in variable and group names.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '/' | '~' | '.')
}

/// Bare words additionally take glob characters so `find` patterns
/// survive tokenization.
fn is_word_char(c: char) -> bool {
    is_name_char(c) || matches!(c, '*' | '?' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> Vec<Token> {
        Lexer::new(line).tokenize()
    }

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn quoted_span_keeps_spaces_and_quotes() {
        assert_eq!(
            lex(r#"echo "hello big world" done"#),
            vec![
                word("echo"),
                Token::Quoted("\"hello big world\"".into()),
                word("done"),
            ]
        );
    }

    #[test]
    fn variables_and_groups() {
        assert_eq!(
            lex("each []results $cmd"),
            vec![
                word("each"),
                Token::Group("[]results".into()),
                Token::Variable("$cmd".into()),
            ]
        );
    }

    #[test]
    fn paths_home_and_globs_are_bare_words() {
        assert_eq!(
            lex("find *.TXT []found"),
            vec![word("find"), word("*.TXT"), Token::Group("[]found".into())]
        );
        assert_eq!(
            lex("cp ~/notes/a-1.md ../b.md"),
            vec![word("cp"), word("~/notes/a-1.md"), word("../b.md")]
        );
    }

    #[test]
    fn stray_characters_are_dropped() {
        assert_eq!(lex("set x = 1;"), vec![word("set"), word("x"), word("1")]);
        assert_eq!(lex("echo $ [] [x"), vec![word("echo"), word("x")]);
    }

    #[test]
    fn unterminated_quote_is_skipped() {
        assert_eq!(lex(r#"echo "abc def"#), vec![word("echo"), word("abc"), word("def")]);
    }

    #[test]
    fn empty_quotes_form_a_token() {
        assert_eq!(
            lex(r#"write a.txt """#),
            vec![word("write"), word("a.txt"), Token::Quoted("\"\"".into())]
        );
    }

    #[test]
    fn sentinel_glued_to_word_starts_a_variable() {
        assert_eq!(
            lex("echo pre$post"),
            vec![word("echo"), word("pre"), Token::Variable("$post".into())]
        );
    }

    #[test]
    fn blank_line_yields_nothing() {
        assert!(lex("   \t ").is_empty());
    }
}
