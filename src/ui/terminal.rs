// Terminal presentation surface
//
// Parses line commands into dashboard actions and draws a DashboardView as
// plain text.

use crate::models::{CATEGORY_OPTIONS, PriceRange, ProductId, SortKey, parse_min_rating};
use crate::state::Action;
use crate::ui::controller::ViewSink;
use crate::ui::view::DashboardView;
use anyhow::Result;
use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Category(String),
    Sort(SortKey),
    /// `None` clears the minimum
    MinRating(Option<f64>),
    Price(PriceRange),
    LoadMore,
    View(ProductId),
    Close,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs an argument: {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("invalid {0}: '{1}'")]
    InvalidArgument(&'static str, String),
}

impl Command {
    /// The dashboard action this command maps to, if any.
    pub fn into_action(self) -> Option<Action> {
        match self {
            Command::Category(category) => Some(Action::SetCategory(category)),
            Command::Sort(sort) => Some(Action::SetSort(sort)),
            Command::MinRating(rating) => Some(Action::SetMinRating(rating.unwrap_or(0.0))),
            Command::Price(range) => Some(Action::SetPriceRange(range)),
            Command::LoadMore => Some(Action::RevealMore),
            Command::View(id) => Some(Action::SelectForDetail(id)),
            Command::Close => Some(Action::DismissDetail),
            Command::Help | Command::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "category" | "cat" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("category", "<name> or 'all'"));
                }
                if rest.eq_ignore_ascii_case("all") {
                    Ok(Command::Category(String::new()))
                } else {
                    Ok(Command::Category(rest.to_string()))
                }
            }
            "sort" => rest
                .parse::<SortKey>()
                .map(Command::Sort)
                .map_err(|_| CommandError::InvalidArgument("sort order", rest.to_string())),
            "rating" => Ok(Command::MinRating(parse_min_rating(rest))),
            "price" => parse_price_range(rest).map(Command::Price),
            "more" | "m" => Ok(Command::LoadMore),
            "view" | "v" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("view", "<product id>"));
                }
                rest.parse::<ProductId>()
                    .map(Command::View)
                    .map_err(|_| CommandError::InvalidArgument("product id", rest.to_string()))
            }
            "close" | "c" => Ok(Command::Close),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_price_range(rest: &str) -> Result<PriceRange, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument("price", "<min> <max>"));
    };

    let parse = |value: &str| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| CommandError::InvalidArgument("price", value.to_string()))
    };

    Ok(PriceRange::new(parse(min)?, parse(max)?))
}

pub fn help_text() -> String {
    let categories = CATEGORY_OPTIONS
        .iter()
        .filter(|(value, _)| !value.is_empty())
        .map(|(value, _)| *value)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Commands:\n\
         \x20 category <name|all>           filter by category ({})\n\
         \x20 sort <lowToHigh|highToLow|none> sort by price\n\
         \x20 rating <n>                    minimum rating (0 or empty clears)\n\
         \x20 price <min> <max>             inclusive price range\n\
         \x20 more                          load more products\n\
         \x20 view <id>                     show product details\n\
         \x20 close                         close the details panel\n\
         \x20 quit                          leave the dashboard",
        categories
    )
}

/// Draw the dashboard as text.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", view.heading);
    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {}", error);
    }

    let rating = view
        .min_rating
        .map(|r| format!("{}+", r))
        .unwrap_or_else(|| "any".to_string());
    let _ = writeln!(
        out,
        "[{}] [{}] [rating: {}]",
        view.category_label, view.sort, rating
    );

    for card in &view.cards {
        let _ = writeln!(out, "#{:<4} {:<60} {:>10}", card.id, card.title, card.price_label);
    }

    if !view.is_loading && view.error.is_none() {
        let _ = writeln!(out, "-- {}", view.summary);
    }

    if view.load_more_visible {
        let _ = writeln!(out, "-- type 'more' to load more");
    }

    if view.is_loading {
        let _ = writeln!(out, "Loading...");
    }

    if let Some(detail) = &view.detail {
        let _ = writeln!(out, "+--- {} ---", detail.title);
        let _ = writeln!(out, "| {}", detail.image);
        let _ = writeln!(out, "| {}", detail.description);
        let _ = writeln!(out, "| Price: {}", detail.price_label);
        if let Some(rating) = &detail.rating_label {
            let _ = writeln!(out, "| Rating: {}", rating);
        }
        let _ = writeln!(out, "+--- type 'close' to dismiss");
    }

    out
}

/// [`ViewSink`] that writes rendered views to any `Write`.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ViewSink for TerminalSink<W> {
    fn render(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(self.out, "{}", render(view))?;
        self.out.flush()?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }
}
