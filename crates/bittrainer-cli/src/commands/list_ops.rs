//! The `bittrainer list-ops` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use bittrainer_core::CATALOG;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Id",
        "Name",
        "Symbol",
        "Arity",
        "Operand 2",
        "Description",
    ]);

    for info in &CATALOG {
        let operand2 = info
            .operand2
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(info.id),
            Cell::new(info.name),
            Cell::new(info.symbol),
            Cell::new(info.arity()),
            Cell::new(operand2),
            Cell::new(info.description),
        ]);
    }

    println!("{table}");
    Ok(())
}
