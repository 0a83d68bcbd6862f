//! Concurrency tests: parallel writers, readers and structural changes

use std::sync::{Arc, Barrier};
use std::thread;

use crossbeam_channel::unbounded;

use memstore::catalog::Catalog;
use memstore::table::Table;
use memstore::tuple::{DataType, Schema, Value};
use memstore::StoreError;

fn create_table() -> Arc<Table> {
    let schema = Schema::builder()
        .column("id", DataType::Integer)
        .column("a", DataType::String)
        .column("b", DataType::Integer)
        .build_arc()
        .unwrap();
    Arc::new(Table::new("t", schema, 16))
}

#[test]
fn test_concurrent_inserts_of_distinct_keys() {
    let table = create_table();
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let id = (t * per_thread + i) as i64;
                    table
                        .insert_row(vec![id.into(), "x".into(), id.into()])
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(table.len(), threads * per_thread);
    for id in 0..(threads * per_thread) as i64 {
        assert_eq!(table.get_row(&id.into()).unwrap()[2], Value::Integer(id));
    }
}

#[test]
fn test_racing_inserts_of_same_key_admit_exactly_one() {
    let table = create_table();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let (tx, rx) = unbounded();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            thread::spawn(move || {
                barrier.wait();
                let result = table.insert_row(vec![1.into(), format!("t{}", t).into(), 0.into()]);
                tx.send(result).unwrap();
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        handle.join().unwrap();
    }

    let results: Vec<_> = rx.iter().collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(StoreError::DuplicateKey(_))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, threads - 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_same_row_updates_never_tear() {
    let table = create_table();
    table.insert_row(vec![1.into(), "init".into(), 0.into()]).unwrap();

    let writers = 4;
    let rounds = 500;
    let barrier = Arc::new(Barrier::new(writers + 1));

    let mut handles = Vec::new();
    for w in 0..writers {
        let table = Arc::clone(&table);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..rounds {
                // Column a and column b always carry the same writer id
                table
                    .update_row(
                        &1.into(),
                        vec![1.into(), format!("w{}", w).into(), (w as i64).into()],
                    )
                    .unwrap();
            }
        }));
    }

    let reader = {
        let table = Arc::clone(&table);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..rounds {
                assert_consistent(&table.get_row(&1.into()).unwrap());
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    let last = table.get_row(&1.into()).unwrap();
    assert_consistent(&last);
    assert_ne!(last[1], Value::from("init"));
}

fn assert_consistent(values: &[Value]) {
    if values[1] == Value::from("init") {
        assert_eq!(values[2], Value::Integer(0));
        return;
    }
    let b = values[2].as_integer().unwrap();
    assert_eq!(values[1], Value::from(format!("w{}", b)));
}

#[test]
fn test_updates_to_different_rows_all_land() {
    let table = create_table();
    let rows = 8;
    for id in 0..rows {
        table.insert_row(vec![id.into(), "v0".into(), 0.into()]).unwrap();
    }

    let rounds = 200;
    let (tx, rx) = unbounded();
    let handles: Vec<_> = (0..rows)
        .map(|id| {
            let table = Arc::clone(&table);
            let tx = tx.clone();
            thread::spawn(move || {
                let mut last = 0;
                for round in 1..=rounds {
                    let updated_at = table
                        .update_row(
                            &id.into(),
                            vec![id.into(), format!("v{}", round).into(), round.into()],
                        )
                        .unwrap();
                    assert!(updated_at > last);
                    last = updated_at;
                }
                tx.send(id).unwrap();
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(rx.iter().count(), rows as usize);

    for id in 0..rows {
        assert_eq!(
            table.get_row(&id.into()).unwrap(),
            vec![
                Value::from(id),
                Value::from(format!("v{}", rounds)),
                Value::from(rounds)
            ]
        );
    }
}

#[test]
fn test_deletes_racing_with_reads() {
    let table = create_table();
    let n: i64 = 1000;
    for id in 0..n {
        table.insert_row(vec![id.into(), "x".into(), id.into()]).unwrap();
    }

    let deleter = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            for id in (0..n).filter(|id| id % 2 == 0) {
                table.delete_row(&id.into()).unwrap();
            }
        })
    };

    let reader = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            for _ in 0..5 {
                for id in (0..n).filter(|id| id % 2 == 1) {
                    // Odd rows are never deleted and must stay reachable
                    assert_eq!(table.get_row(&id.into()).unwrap()[2], Value::Integer(id));
                }
            }
        })
    };

    deleter.join().unwrap();
    reader.join().unwrap();

    let remaining = table.get_all_rows();
    assert_eq!(remaining.len(), (n / 2) as usize);
    for (i, row) in remaining.iter().enumerate() {
        assert_eq!(row[0], Value::Integer(2 * i as i64 + 1));
    }
}

#[test]
fn test_concurrent_catalog_create_and_delete() {
    let catalog = Arc::new(Catalog::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let (tx, rx) = unbounded();

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            thread::spawn(move || {
                barrier.wait();
                tx.send(catalog.create_db("shared").is_ok()).unwrap();
                for i in 0..50 {
                    let name = format!("db{}", i);
                    // Either we created it or someone else did first
                    match catalog.create_db(&name) {
                        Ok(_) | Err(StoreError::DatabaseExists(_)) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                    match catalog.get_db(&name) {
                        Ok(db) => assert_eq!(db.name(), name),
                        Err(StoreError::DatabaseNotFound(_)) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                    match catalog.delete_db(&name) {
                        Ok(()) | Err(StoreError::DatabaseNotFound(_)) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        handle.join().unwrap();
    }

    let created = rx.iter().filter(|ok| *ok).count();
    assert_eq!(created, 1);
    assert_eq!(catalog.database_names(), vec!["shared"]);
}
