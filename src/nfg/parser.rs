//! Parser for the Gambit strategic-game format, outcome version.
//!
//! The format looks like:
//!
//! ```text
//! NFG 1 R "Game title" { "Player 1" "Player 2" } { { "a" "b" } { "c" "d" } }
//! "optional comment"
//! {
//! { "first outcome" 1, -1 }
//! { "second outcome" -1, 1 }
//! }
//! 1 2 2 1
//! ```
//!
//! The trailing numbers map each strategy profile (mixed-radix encoded,
//! player 0 least significant) to an outcome, where index 0 means "no
//! outcome" and index `i >= 1` refers to the i-th outcome of the block.
//!
//! Syntax problems are reported as [`NfgError`] values; the input file is
//! external and malformed text must not abort the process. Structural
//! mismatches against the game model (wrong payoff-vector length, wrong
//! index count) are checked later during game construction.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// One parsed outcome: a name plus one integer payoff per player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutcome {
    /// Outcome name (often empty in real files).
    pub name: String,
    /// Payoff per player, in player order.
    pub payoffs: Vec<i32>,
}

/// A parsed strategic game in outcome format.
#[derive(Debug, Clone, Default)]
pub struct StrategicGame {
    /// Game title.
    pub name: String,
    /// Player names, in order.
    pub players: Vec<String>,
    /// Per-player ordered strategy names.
    pub strategies: Vec<Vec<String>>,
    /// Free-text comment, possibly empty.
    pub comment: String,
    /// Outcome list, in file order.
    pub outcomes: Vec<ParsedOutcome>,
    /// Flattened profile → outcome index (0 = no outcome, `i >= 1` =
    /// `outcomes[i - 1]`).
    pub payoff_indices: Vec<usize>,
}

/// Errors produced while reading or parsing an .nfg file.
#[derive(Debug)]
pub enum NfgError {
    /// The file could not be read.
    Io(io::Error),
    /// The content does not follow the outcome format.
    Syntax {
        /// Byte offset of the offending token.
        position: usize,
        /// What went wrong.
        message: String,
    },
}

impl fmt::Display for NfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NfgError::Io(error) => write!(f, "cannot read input: {}", error),
            NfgError::Syntax { position, message } => {
                write!(f, "syntax error at byte {}: {}", position, message)
            }
        }
    }
}

impl std::error::Error for NfgError {}

impl From<io::Error> for NfgError {
    fn from(error: io::Error) -> Self {
        NfgError::Io(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    OpenBrace,
    CloseBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Int(n) => write!(f, "number {}", n),
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
        }
    }
}

/// Parser over one .nfg document.
pub struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    /// Create a parser for the given document text.
    pub fn new(content: &str) -> Result<Self, NfgError> {
        Ok(Self {
            tokens: tokenize(content)?,
            pos: 0,
        })
    }

    /// Read and parse a file.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<StrategicGame, NfgError> {
        let content = fs::read_to_string(path)?;
        Parser::new(&content)?.parse()
    }

    /// Parse the whole document into a [`StrategicGame`].
    pub fn parse(mut self) -> Result<StrategicGame, NfgError> {
        let mut game = StrategicGame::default();
        self.parse_header(&mut game)?;
        self.parse_players(&mut game)?;
        self.parse_strategies(&mut game)?;
        self.parse_comment(&mut game)?;
        self.parse_outcomes(&mut game)?;
        self.parse_payoff_indices(&mut game)?;
        Ok(game)
    }

    fn parse_header(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        self.expect_ident("NFG")?;
        let version = self.expect_int()?;
        if version != 1 {
            return Err(self.error(format!("unsupported NFG version {}", version)));
        }
        // Payoff precision marker: R (rational) or D (decimal).
        let marker = self.expect_any_ident()?;
        if marker != "R" && marker != "D" {
            return Err(self.error(format!("expected R or D marker, got '{}'", marker)));
        }
        game.name = self.expect_string()?;
        Ok(())
    }

    fn parse_players(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        self.expect(Token::OpenBrace)?;
        while let Some(Token::Str(_)) = self.peek() {
            game.players.push(self.expect_string()?);
        }
        self.expect(Token::CloseBrace)?;
        if game.players.is_empty() {
            return Err(self.error("game has no players".to_string()));
        }
        Ok(())
    }

    fn parse_strategies(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        self.expect(Token::OpenBrace)?;
        while let Some(Token::OpenBrace) = self.peek() {
            self.expect(Token::OpenBrace)?;
            let mut strategies = Vec::new();
            while let Some(Token::Str(_)) = self.peek() {
                strategies.push(self.expect_string()?);
            }
            self.expect(Token::CloseBrace)?;
            game.strategies.push(strategies);
        }
        self.expect(Token::CloseBrace)?;
        if game.strategies.len() != game.players.len() {
            return Err(self.error(format!(
                "{} strategy lists for {} players",
                game.strategies.len(),
                game.players.len()
            )));
        }
        Ok(())
    }

    fn parse_comment(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        if let Some(Token::Str(_)) = self.peek() {
            game.comment = self.expect_string()?;
        }
        Ok(())
    }

    fn parse_outcomes(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        self.expect(Token::OpenBrace)?;
        while let Some(Token::OpenBrace) = self.peek() {
            self.expect(Token::OpenBrace)?;
            let name = self.expect_string()?;
            let mut payoffs = Vec::new();
            while let Some(Token::Int(_)) = self.peek() {
                let payoff = self.expect_int()?;
                let payoff = i32::try_from(payoff)
                    .map_err(|_| self.error(format!("payoff {} out of range", payoff)))?;
                payoffs.push(payoff);
            }
            self.expect(Token::CloseBrace)?;
            game.outcomes.push(ParsedOutcome { name, payoffs });
        }
        self.expect(Token::CloseBrace)?;
        Ok(())
    }

    fn parse_payoff_indices(&mut self, game: &mut StrategicGame) -> Result<(), NfgError> {
        while self.peek().is_some() {
            let index = self.expect_int()?;
            if index < 0 || index as usize > game.outcomes.len() {
                return Err(self.error(format!("outcome index {} out of range", index)));
            }
            game.payoff_indices.push(index as usize);
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn next(&mut self) -> Option<&(usize, Token)> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map(|(position, _)| *position)
            .unwrap_or(0)
    }

    fn error(&self, message: String) -> NfgError {
        NfgError::Syntax {
            position: self.position(),
            message,
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), NfgError> {
        let position = self.position();
        match self.next() {
            Some((_, token)) if *token == expected => Ok(()),
            Some((_, token)) => Err(NfgError::Syntax {
                position,
                message: format!("expected {}, got {}", expected, token),
            }),
            None => Err(NfgError::Syntax {
                position,
                message: format!("expected {}, got end of input", expected),
            }),
        }
    }

    fn expect_ident(&mut self, name: &str) -> Result<(), NfgError> {
        let ident = self.expect_any_ident()?;
        if ident != name {
            return Err(self.error(format!("expected '{}', got '{}'", name, ident)));
        }
        Ok(())
    }

    fn expect_any_ident(&mut self) -> Result<String, NfgError> {
        let position = self.position();
        match self.next() {
            Some((_, Token::Ident(s))) => Ok(s.clone()),
            Some((_, token)) => Err(NfgError::Syntax {
                position,
                message: format!("expected identifier, got {}", token),
            }),
            None => Err(NfgError::Syntax {
                position,
                message: "expected identifier, got end of input".to_string(),
            }),
        }
    }

    fn expect_string(&mut self) -> Result<String, NfgError> {
        let position = self.position();
        match self.next() {
            Some((_, Token::Str(s))) => Ok(s.clone()),
            Some((_, token)) => Err(NfgError::Syntax {
                position,
                message: format!("expected string, got {}", token),
            }),
            None => Err(NfgError::Syntax {
                position,
                message: "expected string, got end of input".to_string(),
            }),
        }
    }

    fn expect_int(&mut self) -> Result<i64, NfgError> {
        let position = self.position();
        match self.next() {
            Some((_, Token::Int(n))) => Ok(*n),
            Some((_, token)) => Err(NfgError::Syntax {
                position,
                message: format!("expected number, got {}", token),
            }),
            None => Err(NfgError::Syntax {
                position,
                message: "expected number, got end of input".to_string(),
            }),
        }
    }
}

fn tokenize(content: &str) -> Result<Vec<(usize, Token)>, NfgError> {
    let bytes = content.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' | b',' => i += 1,
            b'{' => {
                tokens.push((i, Token::OpenBrace));
                i += 1;
            }
            b'}' => {
                tokens.push((i, Token::CloseBrace));
                i += 1;
            }
            b'"' => {
                let start = i;
                i += 1;
                let mut value = String::new();
                loop {
                    // Structural characters are ASCII; everything else is
                    // copied through as full UTF-8 characters.
                    let mut chars = content[i..].chars();
                    match chars.next() {
                        Some('"') => {
                            i += 1;
                            break;
                        }
                        // Backslash-escaped characters stay in the string.
                        Some('\\') => match chars.next() {
                            Some(escaped) => {
                                value.push(escaped);
                                i += 1 + escaped.len_utf8();
                            }
                            None => {
                                return Err(NfgError::Syntax {
                                    position: start,
                                    message: "unterminated string".to_string(),
                                })
                            }
                        },
                        Some(c) => {
                            value.push(c);
                            i += c.len_utf8();
                        }
                        None => {
                            return Err(NfgError::Syntax {
                                position: start,
                                message: "unterminated string".to_string(),
                            })
                        }
                    }
                }
                tokens.push((start, Token::Str(value)));
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let text = &content[start..i];
                let value = text.parse::<i64>().map_err(|_| NfgError::Syntax {
                    position: start,
                    message: format!("invalid number '{}'", text),
                })?;
                tokens.push((start, Token::Int(value)));
            }
            b if b.is_ascii_alphabetic() => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                tokens.push((start, Token::Ident(content[start..i].to_string())));
            }
            _ => {
                let c = content[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(NfgError::Syntax {
                    position: i,
                    message: format!("unexpected character '{}'", c),
                });
            }
        }
    }
    Ok(tokens)
}
