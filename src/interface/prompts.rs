use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::engine::period::parse_date;
use crate::error::{KitchenError, Result};
use crate::models::{Item, NewWasteRecord, Unit};

/// Minimum Jaro-Winkler similarity for a fuzzy item match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Items whose names resemble `input`, best match first.
///
/// An exact (case-insensitive) match is returned alone.
pub fn match_items<'a>(items: &'a [Item], input: &str) -> Vec<(&'a Item, f64)> {
    let needle = input.trim().to_lowercase();

    if let Some(exact) = items.iter().find(|i| i.key() == needle) {
        return vec![(exact, 1.0)];
    }

    let mut candidates: Vec<(&Item, f64)> = items
        .iter()
        .map(|i| (i, jaro_winkler(&i.key(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Prompt for an item by name with fuzzy matching.
///
/// Returns `None` when the user finishes without choosing.
pub fn prompt_item(items: &[Item]) -> Result<Option<&Item>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Item (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let candidates = match_items(items, input);

        if candidates.is_empty() {
            println!("No matching item found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let item = candidates[0].0;
            if candidates[0].1 >= 1.0 {
                return Ok(Some(item));
            }

            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", item.name))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(Some(item));
            }
            continue;
        }

        let options: Vec<String> = candidates
            .iter()
            .take(5)
            .map(|(i, _)| i.name.clone())
            .collect();

        let mut selection_options = options.clone();
        selection_options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&selection_options)
            .default(0)
            .interact()?;

        if selection < options.len() {
            return Ok(Some(candidates[selection].0));
        }
    }
}

/// Prompt for the entry date, asking again until it parses.
pub fn prompt_date(default: NaiveDate) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("Date (YYYY-MM-DD)")
            .default(default.to_string())
            .interact_text()?;

        match parse_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => println!("{}", e),
        }
    }
}

/// Parse a typed quantity; it must be a finite, non-negative number.
pub fn parse_quantity(input: &str) -> Result<f64> {
    let qty: f64 = input
        .trim()
        .parse()
        .map_err(|_| KitchenError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if !qty.is_finite() || qty < 0.0 {
        return Err(KitchenError::InvalidQuantity(qty));
    }

    Ok(qty)
}

/// Prompt for a quantity in the item's unit, asking again until it is valid.
pub fn prompt_quantity(unit: Unit) -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("Quantity wasted ({})", unit))
            .interact_text()?;

        match parse_quantity(&input) {
            Ok(qty) => return Ok(qty),
            Err(e) => println!("{}", e),
        }
    }
}

/// Prompt for an optional free-text note.
pub fn prompt_note() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Note (optional)")
        .allow_empty(true)
        .interact_text()?;

    let note = input.trim();
    Ok(if note.is_empty() {
        None
    } else {
        Some(note.to_string())
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect one waste entry, or `None` if the user is done.
pub fn collect_waste_entry(items: &[Item], today: NaiveDate) -> Result<Option<NewWasteRecord>> {
    let item = match prompt_item(items)? {
        Some(item) => item,
        None => return Ok(None),
    };

    let date = prompt_date(today)?;
    let quantity = prompt_quantity(item.unit)?;
    let note = prompt_note()?;

    Ok(Some(NewWasteRecord {
        item_id: item.id,
        date,
        quantity,
        note,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(1, "Chicken Fillet Roll", Unit::Pieces),
            Item::new(2, "Sausage Roll", Unit::Pieces),
            Item::new(3, "Chicken Curry", Unit::Kg),
        ]
    }

    #[test]
    fn test_exact_match_wins() {
        let items = sample_items();
        let matches = match_items(&items, "  sausage ROLL ");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0.id, 2);
    }

    #[test]
    fn test_fuzzy_match_typo() {
        let items = sample_items();
        let matches = match_items(&items, "chiken curry");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.id, 3);
    }

    #[test]
    fn test_no_match_for_unrelated_input() {
        let items = sample_items();
        assert!(match_items(&items, "zzzz").is_empty());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_quantity("0").unwrap(), 0.0);
        assert!(matches!(
            parse_quantity("abc"),
            Err(KitchenError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_quantity("-1"),
            Err(KitchenError::InvalidQuantity(_))
        ));
        assert!(parse_quantity("inf").is_err());
    }
}
