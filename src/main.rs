use memstore::catalog::Catalog;
use memstore::tuple::{RowBuilder, Value};
use memstore::Result;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("Memstore - An in-memory table store in Rust");
    println!("===========================================\n");

    let catalog = Catalog::new();

    let db = catalog.create_db("d1")?;
    println!("Created database: {}", db.name());

    let table = db.create_table_from_declarations("t1", &[("id", "integer"), ("name", "string")])?;
    println!("Created table: {} ({} columns)\n", table.name(), table.schema().column_count());

    for (id, name) in [(1, "a"), (2, "b")] {
        let values = RowBuilder::new(table.schema().clone())
            .value(id)
            .value(name)
            .build()?;
        let key = table.insert_row(values)?;
        println!("Inserted row with key {}", key);
    }

    let updated_at = table.update_row(&1.into(), vec![1.into(), "c".into()])?;
    println!("Updated key 1 at {}", updated_at);

    let removed = table.delete_row(&2.into())?;
    println!("Deleted row {:?}", removed);

    println!("\nRows in {}:", table.name());
    for row in table.get_all_rows() {
        let rendered: Vec<String> = row.iter().map(Value::to_string).collect();
        println!("  - ({})", rendered.join(", "));
    }

    if let Err(e) = catalog.create_db("d1") {
        println!("\nSecond create_db(\"d1\") rejected: {}", e);
    }

    println!("\nDemo completed successfully!");
    Ok(())
}
