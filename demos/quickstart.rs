/// Quickstart example - flatten one nested record
use frame_extras::{FlattenConfig, Flattener, TableWriter};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== Flatten Quick Start ===\n");

    // Step 1: Your JSON data
    let my_data = json!({
        "id": "0001",
        "type": "donut",
        "name": "Cake",
        "ppu": 0.55,
        "batters": {
            "batter": [
                {"id": "1001", "type": "Regular"},
                {"id": "1002", "type": "Chocolate"}
            ]
        },
        "topping": [
            {"id": "5001", "type": "None"},
            {"id": "5002", "type": "Glazed"},
            {"id": "5005", "type": "Sugar"}
        ]
    });

    println!("Original JSON:");
    println!("{}\n", serde_json::to_string_pretty(&my_data)?);

    // Step 2: Create a flattener that samples 1 row and runs up to 2 passes
    let flattener = Flattener::new(FlattenConfig::new(1).with_depth(2));

    // Step 3: Flatten the JSON into a table
    let table = flattener.flatten_value(my_data)?;

    println!(
        "Flattened into {} rows x {} columns:",
        table.num_rows(),
        table.num_columns()
    );
    for name in table.column_names() {
        println!("  • {}", name);
    }

    // Step 4: Print the rows as JSON Lines
    println!();
    let mut writer = TableWriter::new(std::io::stdout());
    writer.write_table(&table)?;
    writer.flush()?;

    Ok(())
}
