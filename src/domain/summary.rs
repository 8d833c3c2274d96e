use serde::Serialize;

use crate::domain::{Item, ItemStatus};

/// Financial overview of the whole inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Everything ever paid for stock, sold or not.
    pub total_cost: f64,
    /// List prices of what is still in stock.
    pub potential_revenue: f64,
    pub total_sales: f64,
    /// Sales minus the cost of the items that were sold.
    pub total_profit: f64,
}

/// Totals are accumulated in whole pence, so the result does not depend on item order.
pub fn summarize(items: &[Item]) -> Summary {
    let mut total_cost = 0i64;
    let mut potential_revenue = 0i64;
    let mut total_sales = 0i64;
    let mut cost_of_sold = 0i64;

    for item in items {
        total_cost += to_minor(item.cost);
        match item.status {
            ItemStatus::InStock => potential_revenue += to_minor(item.potential_revenue),
            ItemStatus::Sold => {
                total_sales += to_minor(item.sold_price.unwrap_or(0.0));
                cost_of_sold += to_minor(item.cost);
            }
        }
    }

    Summary {
        total_cost: from_minor(total_cost),
        potential_revenue: from_minor(potential_revenue),
        total_sales: from_minor(total_sales),
        total_profit: from_minor(total_sales - cost_of_sold),
    }
}

fn to_minor(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_minor(minor: i64) -> f64 {
    minor as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDraft;

    fn item(name: &str, cost: f64, potential_revenue: f64) -> Item {
        Item::new(ItemDraft {
            name: name.into(),
            cost,
            potential_revenue,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_inventory() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_single_in_stock_item() {
        let summary = summarize(&[item("Silk Robe", 20.0, 50.0)]);
        assert_eq!(summary.total_cost, 20.0);
        assert_eq!(summary.potential_revenue, 50.0);
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.total_profit, 0.0);
    }

    #[test]
    fn test_sold_item_moves_to_sales() {
        let mut robe = item("Silk Robe", 20.0, 50.0);
        robe.sell(45.0).unwrap();
        let summary = summarize(&[robe]);
        assert_eq!(summary.total_cost, 20.0);
        assert_eq!(summary.potential_revenue, 0.0);
        assert_eq!(summary.total_sales, 45.0);
        assert_eq!(summary.total_profit, 25.0);
    }

    #[test]
    fn test_profit_ignores_unsold_cost() {
        let mut slip = item("Lace Slip", 12.5, 40.0);
        slip.sell(30.0).unwrap();
        let girdle = item("Girdle", 8.0, 25.0);

        let summary = summarize(&[slip, girdle]);
        assert_eq!(summary.total_cost, 20.5);
        assert_eq!(summary.potential_revenue, 25.0);
        assert_eq!(summary.total_sales, 30.0);
        assert_eq!(summary.total_profit, 17.5);
    }

    #[test]
    fn test_sold_without_price_counts_as_zero() {
        let mut odd = item("Stocking", 3.0, 9.0);
        odd.status = ItemStatus::Sold;
        let summary = summarize(&[odd]);
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.total_profit, -3.0);
    }

    #[test]
    fn test_order_independent_for_decimal_prices() {
        let mut a = item("Garter Belt", 0.1, 0.7);
        a.sell(0.3).unwrap();
        let b = item("Camisole", 0.2, 0.1);
        let c = item("Stockings", 0.3, 0.2);

        let forward = summarize(&[a.clone(), b.clone(), c.clone()]);
        let reversed = summarize(&[c, b, a]);
        assert_eq!(forward, reversed);
        assert_eq!(forward.total_cost, 0.6);
        assert_eq!(forward.potential_revenue, 0.3);
        assert_eq!(forward.total_profit, 0.2);
    }

    #[test]
    fn test_order_independent() {
        let mut a = item("Peignoir", 15.0, 60.0);
        a.sell(55.5).unwrap();
        let b = item("Bed Jacket", 7.25, 22.0);
        let mut c = item("Corselet", 30.0, 90.0);
        c.sell(80.0).unwrap();
        let d = item("Tap Pants", 4.5, 18.0);

        let forward = vec![a.clone(), b.clone(), c.clone(), d.clone()];
        let expected = summarize(&forward);
        let permutations = [
            vec![d.clone(), c.clone(), b.clone(), a.clone()],
            vec![b.clone(), d.clone(), a.clone(), c.clone()],
            vec![c, a, d, b],
        ];
        for list in permutations {
            assert_eq!(summarize(&list), expected);
        }
    }
}
