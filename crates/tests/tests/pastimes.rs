use parlor_core::hangman::{GameStatus, HangmanGame, WORDS};
use parlor_core::portfolio::{price_of, Portfolio, STOCK_PRICES};
use parlor_core::{RandomPicker, ScriptedPicker};

#[test]
fn hangman_is_winnable_by_guessing_every_letter() {
    for index in 0..WORDS.len() {
        let mut game = HangmanGame::random(&mut ScriptedPicker::new().with_indices([index]));
        let letters: Vec<char> = game.word().chars().collect();
        for letter in letters {
            game.guess(&letter.to_string()).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.incorrect(), 0);
        assert!(!game.masked().contains('_'));
    }
}

#[test]
fn seeded_hangman_picks_the_same_word() {
    let first = HangmanGame::random(&mut RandomPicker::seeded(99));
    let second = HangmanGame::random(&mut RandomPicker::seeded(99));
    assert_eq!(first.word(), second.word());
    assert!(WORDS.contains(&first.word()));
}

#[test]
fn portfolio_values_every_listed_stock() {
    let mut portfolio = Portfolio::new();
    for (symbol, _) in STOCK_PRICES {
        portfolio.add(&symbol.to_lowercase(), 2).unwrap();
    }

    let expected: f64 = STOCK_PRICES.iter().map(|(_, price)| price * 2.0).sum();
    assert_eq!(portfolio.lines().len(), STOCK_PRICES.len());
    assert!((portfolio.total_value() - expected).abs() < f64::EPSILON);
    assert_eq!(price_of("nvda"), Some(450.0));
}
