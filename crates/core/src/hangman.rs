use serde::Serialize;

use crate::error::HangmanError;
use crate::picker::ReplyPicker;

pub const WORDS: &[&str] = &["python", "computer", "game", "code", "fun"];
pub const MAX_INCORRECT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Hit(char),
    Miss(char),
    AlreadyGuessed(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Serialize)]
pub struct HangmanGame {
    word: String,
    guessed: Vec<char>,
    incorrect: u8,
    max_incorrect: u8,
}

impl HangmanGame {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase(),
            guessed: Vec::new(),
            incorrect: 0,
            max_incorrect: MAX_INCORRECT,
        }
    }

    pub fn random(picker: &mut dyn ReplyPicker) -> Self {
        let index = picker.pick_index(WORDS.len()).min(WORDS.len() - 1);
        Self::new(WORDS[index])
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn incorrect(&self) -> u8 {
        self.incorrect
    }

    pub fn max_incorrect(&self) -> u8 {
        self.max_incorrect
    }

    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, HangmanError> {
        let lowered = input.trim().to_lowercase();
        let mut chars = lowered.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_alphabetic() => letter,
            _ => return Err(HangmanError::InvalidGuess(input.trim().to_string())),
        };

        if self.guessed.contains(&letter) {
            return Ok(GuessOutcome::AlreadyGuessed(letter));
        }
        self.guessed.push(letter);

        if self.word.contains(letter) {
            Ok(GuessOutcome::Hit(letter))
        } else {
            self.incorrect += 1;
            Ok(GuessOutcome::Miss(letter))
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.word.chars().all(|ch| self.guessed.contains(&ch)) {
            GameStatus::Won
        } else if self.incorrect >= self.max_incorrect {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Word with unguessed letters hidden, e.g. `"p _ t _ _ n"`.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|ch| {
                if self.guessed.contains(&ch) {
                    ch.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
