use anyhow::Result;
use rust_xlsxwriter::{Table, TableColumn, Workbook};

fn main() -> Result<()> {
    // config.xlsx: sheet "config" with table "table_config".
    let mut config = Workbook::new();
    let sheet = config.add_worksheet();
    sheet.set_name("config")?;
    let rows = [
        ["RackA", "Rack-01", "Tokyo", "10.0.1.1"],
        ["RackA", "Rack-02", "Tokyo", "10.0.1.2"],
        ["RackB", "Rack-03", "Osaka", "10.0.2.1"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, c as u16, *value)?;
        }
    }
    let columns = ["type", "name", "site", "rack_ip"].map(|h| TableColumn::new().set_header(h));
    let table = Table::new().set_name("table_config").set_columns(&columns);
    sheet.add_table(0, 0, rows.len() as u32, 3, &table)?;
    config.save("config.xlsx")?;

    // format.xlsx: one template sheet per rack type.
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for template in ["RackA", "RackB"] {
        let sheet = book
            .new_sheet(template)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        sheet.get_cell_mut("A1").set_value_string("name (type)");
        sheet.get_cell_mut("A2").set_value_string("site");
        sheet.get_cell_mut("B3").set_value_string("mgmt: rack_ip");
    }
    umya_spreadsheet::writer::xlsx::write(&book, "format.xlsx")?;

    println!("Wrote config.xlsx and format.xlsx");
    println!("Try: rackreplace config.xlsx format.xlsx out.xlsx --sheet-type-column type --sheet-name-column name");
    Ok(())
}
