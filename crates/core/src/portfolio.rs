use serde::Serialize;

use crate::error::PortfolioError;

pub const STOCK_PRICES: &[(&str, f64)] = &[
    ("AAPL", 180.00),
    ("TSLA", 250.00),
    ("GOOGL", 135.00),
    ("MSFT", 375.00),
    ("NVDA", 450.00),
    ("AMZN", 140.00),
    ("META", 320.00),
    ("NFLX", 400.00),
    ("AMD", 115.00),
    ("INTC", 45.00),
];

pub fn price_of(symbol: &str) -> Option<f64> {
    STOCK_PRICES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(symbol.trim()))
        .map(|(_, price)| *price)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingLine {
    pub symbol: String,
    pub quantity: u64,
    pub price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    pub holdings: Vec<HoldingLine>,
    pub total_value: f64,
}

/// Holdings in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    holdings: Vec<(String, u64)>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn add(&mut self, symbol: &str, quantity: i64) -> Result<u64, PortfolioError> {
        let symbol = symbol.trim().to_uppercase();
        if price_of(&symbol).is_none() {
            return Err(PortfolioError::UnknownSymbol(symbol));
        }
        let quantity = u64::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(PortfolioError::NonPositiveQuantity)?;

        match self.holdings.iter_mut().find(|(held, _)| *held == symbol) {
            Some((_, held)) => {
                *held = held
                    .checked_add(quantity)
                    .ok_or_else(|| PortfolioError::QuantityOverflow(symbol.clone()))?;
                Ok(*held)
            }
            None => {
                self.holdings.push((symbol, quantity));
                Ok(quantity)
            }
        }
    }

    pub fn lines(&self) -> Vec<HoldingLine> {
        self.holdings
            .iter()
            .map(|(symbol, quantity)| {
                let price = price_of(symbol).unwrap_or_default();
                HoldingLine {
                    symbol: symbol.clone(),
                    quantity: *quantity,
                    price,
                    value: price * *quantity as f64,
                }
            })
            .collect()
    }

    pub fn total_value(&self) -> f64 {
        self.lines().iter().map(|line| line.value).sum()
    }

    pub fn report(&self) -> PortfolioReport {
        PortfolioReport {
            holdings: self.lines(),
            total_value: self.total_value(),
        }
    }
}
