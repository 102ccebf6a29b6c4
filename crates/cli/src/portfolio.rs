use std::io::{self, Write};

use anyhow::Result;
use parlor_core::portfolio::{Portfolio, STOCK_PRICES};
use parlor_core::PortfolioError;

pub fn run_portfolio() -> Result<()> {
    let mut portfolio = Portfolio::new();

    println!("Welcome to Stock Portfolio Tracker!");
    println!("Track your investments with ease!");

    loop {
        print_menu();
        let Some(choice) = prompt("Enter your choice (1-5): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => print_stocks(),
            "2" => {
                print_stocks();
                add_stock(&mut portfolio)?;
            }
            "3" => print_portfolio(&portfolio),
            "4" => {
                if portfolio.is_empty() {
                    println!("Your portfolio is empty. Add some stocks first!");
                } else {
                    println!("{}", serde_json::to_string_pretty(&portfolio.report())?);
                }
            }
            "5" => {
                println!("Thank you for using Stock Portfolio Tracker!");
                println!("Happy investing!");
                break;
            }
            _ => println!("Invalid choice. Please enter a number between 1-5."),
        }
    }

    Ok(())
}

fn add_stock(portfolio: &mut Portfolio) -> Result<()> {
    loop {
        let Some(symbol) = prompt("\nEnter stock symbol (or 'back' to return): ")? else {
            return Ok(());
        };
        if symbol.eq_ignore_ascii_case("back") {
            return Ok(());
        }
        if parlor_core::portfolio::price_of(&symbol).is_none() {
            println!("Stock '{symbol}' not found. Please choose from available stocks.");
            continue;
        }

        let symbol = symbol.to_uppercase();
        let Some(raw_quantity) = prompt(&format!("Enter quantity for {symbol}: "))? else {
            return Ok(());
        };
        let Ok(quantity) = raw_quantity.parse::<i64>() else {
            println!("Please enter a valid number for quantity.");
            continue;
        };

        match portfolio.add(&symbol, quantity) {
            Ok(_) => {
                println!("Added {quantity} shares of {symbol} to your portfolio!");
                return Ok(());
            }
            Err(PortfolioError::NonPositiveQuantity) => println!("Quantity must be positive!"),
            Err(error) => println!("{error}"),
        }
    }
}

/// `None` on end of input.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_menu() {
    let rule = "=".repeat(40);
    println!("\n{rule}");
    println!("MENU OPTIONS");
    println!("{rule}");
    println!("1. View available stocks");
    println!("2. Add stock to portfolio");
    println!("3. View portfolio");
    println!("4. Show portfolio report (JSON)");
    println!("5. Exit");
    println!("{rule}");
}

fn print_stocks() {
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("AVAILABLE STOCKS");
    println!("{rule}");
    for (symbol, price) in STOCK_PRICES {
        println!("{symbol:<8} ${price:>8.2}");
    }
    println!("{rule}");
}

fn print_portfolio(portfolio: &Portfolio) {
    if portfolio.is_empty() {
        println!("\nYour portfolio is empty!");
        return;
    }

    let rule = "=".repeat(70);
    println!("\n{rule}");
    println!("YOUR PORTFOLIO");
    println!("{rule}");
    println!(
        "{:<8} {:<10} {:<10} {:<15}",
        "Stock", "Quantity", "Price", "Total Value"
    );
    println!("{}", "-".repeat(70));
    for line in portfolio.lines() {
        println!(
            "{:<8} {:<10} ${:<9.2} ${:<14.2}",
            line.symbol, line.quantity, line.price, line.value
        );
    }
    println!("{}", "-".repeat(70));
    println!(
        "{:<43} ${:<14.2}",
        "TOTAL PORTFOLIO VALUE:",
        portfolio.total_value()
    );
    println!("{rule}");
}
