use chrono::{DateTime, Utc};
use edible_shared::PersistedOrder;
use serde::Serialize;

pub const REPORT_TITLE: &str = "Orders Report";

const HEADERS: [&str; 7] = [
    "Order ID",
    "Name",
    "Phone",
    "Mode of Collection",
    "Address",
    "Items",
    "Total Price",
];

/// Sum of stored totals. Missing totals count as zero; line items are not
/// re-priced.
pub fn compute_grand_total(orders: &[PersistedOrder]) -> i64 {
    orders.iter().map(PersistedOrder::total).sum()
}

/// Tabular export of all orders with a trailing grand total row
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub grand_total: i64,
}

pub fn export_report(orders: &[PersistedOrder]) -> OrderReport {
    let rows = orders
        .iter()
        .map(|order| {
            vec![
                order.id.to_string(),
                order.name.clone(),
                order.phone.clone(),
                order.delivery_method.to_string(),
                order.address_or_placeholder().to_string(),
                order.items_summary(),
                order.total().to_string(),
            ]
        })
        .collect();

    OrderReport {
        title: REPORT_TITLE.to_string(),
        generated_at: Utc::now(),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
        grand_total: compute_grand_total(orders),
    }
}

impl OrderReport {
    pub fn total_row(&self) -> Vec<String> {
        let mut row = vec![String::new(); HEADERS.len() - 2];
        row.push("Grand Total".to_string());
        row.push(self.grand_total.to_string());
        row
    }

    pub fn to_csv(&self) -> String {
        let total = self.total_row();
        let mut out = String::new();
        for row in std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .chain(std::iter::once(&total))
        {
            let line = row.iter().map(|cell| csv_cell(cell)).collect::<Vec<_>>().join(",");
            out.push_str(&line);
            out.push_str("\r\n");
        }
        out
    }
}

/// Leading characters a spreadsheet reads as the start of a formula
const FORMULA_TRIGGERS: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

/// Customer text is written as literal text: a cell that would open as a
/// formula gets a leading `'`. The bare `-` address placeholder is left as is.
fn csv_cell(cell: &str) -> String {
    let cell = if cell != "-" && cell.starts_with(FORMULA_TRIGGERS) {
        format!("'{}", cell)
    } else {
        cell.to_string()
    };
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell
    }
}
