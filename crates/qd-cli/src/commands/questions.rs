use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let catalog = super::catalog_or_default(path)?;

    if catalog.is_empty() {
        println!("  No questions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Question"]);

    for (i, question) in catalog.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), question.clone()]);
    }

    println!("{table}");
    println!();
    println!("  {} questions", catalog.len());

    Ok(())
}
