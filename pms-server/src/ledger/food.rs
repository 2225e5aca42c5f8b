//! Food line pricing
//!
//! Translates (menu, portion, quantity) into priced lines. Half-plate
//! orders require the menu to carry a half-plate price; there is no
//! silent fallback to the full-plate price.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{FoodLineInput, Menu, PortionType};

use super::LedgerError;
use super::money::{round_money, to_decimal, validate_amount};

/// Maximum quantity per food order line
const MAX_QUANTITY: i64 = 999;

/// A priced food order line, ready for persistence
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub menu_id: String,
    pub menu_name: String,
    pub portion_type: PortionType,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Price one line against its menu entry
pub fn price_line(
    menu: &Menu,
    portion_type: PortionType,
    quantity: i64,
) -> Result<PricedLine, LedgerError> {
    if quantity < 1 {
        return Err(LedgerError::Validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(LedgerError::Validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }

    let unit_price = match portion_type {
        PortionType::Half => match menu.half_plate_price {
            Some(price) => {
                validate_amount(price, "half plate price")?;
                to_decimal(price)
            }
            None => {
                return Err(LedgerError::Validation(format!(
                    "half plate not available for {}",
                    menu.name
                )));
            }
        },
        PortionType::Full => {
            validate_amount(menu.full_plate_price, "full plate price")?;
            to_decimal(menu.full_plate_price)
        }
    };

    let line_total = round_money(unit_price * Decimal::from(quantity));
    Ok(PricedLine {
        menu_id: menu.id.clone(),
        menu_name: menu.name.clone(),
        portion_type,
        quantity,
        unit_price,
        line_total,
    })
}

/// Price a batch of lines, resolving each against the fetched menus.
///
/// Returns the priced lines plus the grand total. A line referencing a
/// menu that was not fetched is a not-found error naming the menu.
pub fn price_lines(
    menus: &HashMap<String, Menu>,
    lines: &[FoodLineInput],
) -> Result<(Vec<PricedLine>, Decimal), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::Validation(
            "food order must contain at least one line".to_string(),
        ));
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut grand_total = Decimal::ZERO;
    for line in lines {
        let menu = menus
            .get(&line.menu_id)
            .ok_or_else(|| LedgerError::NotFound(format!("Menu {} not found", line.menu_id)))?;
        let priced_line = price_line(menu, line.portion_type, line.quantity)?;
        grand_total += priced_line.line_total;
        priced.push(priced_line);
    }
    Ok((priced, round_money(grand_total)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(name: &str, half: Option<f64>, full: f64) -> Menu {
        Menu {
            id: format!("menu-{name}"),
            name: name.to_string(),
            half_plate_price: half,
            full_plate_price: full,
            created_by: "user-1".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn half_plate_pricing() {
        // Dal: half 50, full 90 — two half plates cost 100
        let dal = menu("Dal", Some(50.0), 90.0);
        let line = price_line(&dal, PortionType::Half, 2).unwrap();
        assert_eq!(line.unit_price, Decimal::from(50));
        assert_eq!(line.line_total, Decimal::from(100));
    }

    #[test]
    fn half_plate_unavailable_is_rejected() {
        let biryani = menu("Biryani", None, 180.0);
        let err = price_line(&biryani, PortionType::Half, 1).unwrap_err();
        assert!(err.to_string().contains("half plate not available for Biryani"));
    }

    #[test]
    fn full_plate_pricing() {
        let biryani = menu("Biryani", None, 180.0);
        let line = price_line(&biryani, PortionType::Full, 3).unwrap();
        assert_eq!(line.line_total, Decimal::from(540));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let dal = menu("Dal", Some(50.0), 90.0);
        assert!(price_line(&dal, PortionType::Full, 0).is_err());
    }

    #[test]
    fn batch_pricing_sums_grand_total() {
        let mut menus = HashMap::new();
        let dal = menu("Dal", Some(50.0), 90.0);
        let rice = menu("Rice", None, 60.0);
        menus.insert(dal.id.clone(), dal.clone());
        menus.insert(rice.id.clone(), rice.clone());

        let lines = vec![
            FoodLineInput {
                menu_id: dal.id.clone(),
                portion_type: PortionType::Half,
                quantity: 2,
            },
            FoodLineInput {
                menu_id: rice.id.clone(),
                portion_type: PortionType::Full,
                quantity: 1,
            },
        ];

        let (priced, total) = price_lines(&menus, &lines).unwrap();
        assert_eq!(priced.len(), 2);
        assert_eq!(total, Decimal::from(160));
    }

    #[test]
    fn unknown_menu_is_not_found() {
        let menus = HashMap::new();
        let lines = vec![FoodLineInput {
            menu_id: "menu-ghost".to_string(),
            portion_type: PortionType::Full,
            quantity: 1,
        }];
        let err = price_lines(&menus, &lines).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn empty_order_is_rejected() {
        let menus = HashMap::new();
        assert!(price_lines(&menus, &[]).is_err());
    }
}
