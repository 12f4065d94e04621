use edible_shared::OrderLineItem;

/// Text shown next to a line item: `-` with nothing selected,
/// `Price at venue` for unpriced products, otherwise the naira amount.
pub fn price_label(item: &OrderLineItem) -> String {
    if !item.is_selected() {
        return "-".to_string();
    }
    match item.price {
        Some(price) => naira(price),
        None => "Price at venue".to_string(),
    }
}

pub fn naira(amount: i64) -> String {
    format!("₦{}", amount)
}
