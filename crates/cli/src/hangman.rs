use std::io::{self, Write};

use anyhow::Result;
use parlor_core::hangman::{GameStatus, GuessOutcome, HangmanGame};
use parlor_core::ReplyPicker;

pub fn run_hangman(picker: &mut dyn ReplyPicker) -> Result<()> {
    let mut game = HangmanGame::random(picker);

    println!("Welcome to Hangman!");
    println!(
        "You have {} incorrect guesses allowed.",
        game.max_incorrect()
    );
    println!("Word to guess: {}", game.masked());

    while game.status() == GameStatus::InProgress {
        println!("\nCurrent word: {}", game.masked());
        println!(
            "Incorrect guesses: {}/{}",
            game.incorrect(),
            game.max_incorrect()
        );
        if !game.guessed().is_empty() {
            let letters: Vec<String> = game.guessed().iter().map(char::to_string).collect();
            println!("Letters guessed: {}", letters.join(", "));
        }

        print!("Enter a letter: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        match game.guess(&line) {
            Ok(GuessOutcome::Hit(letter)) => println!("Good guess! '{letter}' is in the word."),
            Ok(GuessOutcome::Miss(letter)) => println!("Sorry, '{letter}' is not in the word."),
            Ok(GuessOutcome::AlreadyGuessed(_)) => println!("You already guessed that letter!"),
            Err(error) => println!("Please enter a single letter ({error})."),
        }
    }

    match game.status() {
        GameStatus::Won => println!("\nCongratulations! You guessed the word: {}", game.word()),
        GameStatus::Lost => println!("\nGame over! The word was: {}", game.word()),
        GameStatus::InProgress => println!("\nThe word was: {}", game.word()),
    }
    println!("Thanks for playing!");
    Ok(())
}
