use std::fs;
use stock_control::lifecycle::{StockConfig, StockSession};
use stock_control::model::{Size, StockCreate, StockKey, StockRecord};
use stock_control::stock::{self, StockError, StockLevel};
use stock_control::validate::{AddStockForm, QuantityForm};
use tempfile::tempdir;

const HEADER: &str = "name,quantity,price,size,available\n";

fn add_form(name: &str, size: &str, price: &str, quantity: &str) -> AddStockForm {
    AddStockForm {
        name: name.into(),
        size: size.into(),
        price: price.into(),
        quantity: quantity.into(),
    }
}

/// Full add → sell → restock → reprice flow against a real file.
#[test]
fn test_stock_workflow_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));

    let submission = session
        .submit_add(&add_form("Red Shirt", "S", "10", "5"), &mut |_: &str| false)
        .unwrap();
    assert_eq!(submission.message, "Added new stock item: Red Shirt (S).");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{HEADER}Red Shirt,5,10.0,S,1\n")
    );

    let client = session.client();
    let key = StockKey::new("Red Shirt", Size::S);

    let level = client.sell(&key, 5).unwrap();
    assert_eq!(level, StockLevel { quantity: 0, available: false });
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{HEADER}Red Shirt,0,10.0,S,0\n")
    );

    let level = client.restock(&key, 3).unwrap();
    assert_eq!(level, StockLevel { quantity: 3, available: true });

    let record = client.set_price(&key, 12.5).unwrap();
    assert_eq!(record, StockRecord::new("Red Shirt", Size::S, 12.5, 3));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{HEADER}Red Shirt,3,12.5,S,1\n")
    );
}

#[test]
fn test_declined_suggestion_creates_size_variant() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    fs::write(&path, format!("{HEADER}Red Shirt,5,10.0,S,1\n")).unwrap();
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));

    let mut prompts = Vec::new();
    session
        .submit_add(&add_form("Red Shirt", "M", "10.0", "3"), &mut |name: &str| {
            prompts.push(name.to_string());
            false
        })
        .unwrap();

    assert_eq!(prompts, vec!["Red Shirt"]);
    assert_eq!(
        session.client().list().unwrap(),
        vec![
            StockRecord::new("Red Shirt", Size::S, 10.0, 5),
            StockRecord::new("Red Shirt", Size::M, 10.0, 3),
        ]
    );
}

#[test]
fn test_accepted_suggestion_on_same_key_changes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    let original = format!("{HEADER}Red Shirt,5,10.0,S,1\n");
    fs::write(&path, &original).unwrap();
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));

    let err = session
        .submit_add(&add_form("Red Shirt", "S", "10.0", "3"), &mut |_: &str| true)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An item with name 'Red Shirt' and size 'S' already exists."
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_new_item_without_similar_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    fs::write(&path, format!("{HEADER}Red Shirt,5,10.0,S,1\n")).unwrap();
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));
    let client = session.client();

    let params = StockCreate {
        name: "Wool Scarf".into(),
        size: Size::XL,
        price: 19.99,
        quantity: 1,
    };
    let record = client
        .add_stock(params, &mut |_: &str| -> bool { panic!("no similar name expected") })
        .unwrap();
    assert!(record.is_available());
    assert_eq!(client.list().unwrap().len(), 2);
    assert!(fs::read_to_string(&path).unwrap().ends_with("Wool Scarf,1,19.99,XL,1\n"));
}

#[test]
fn test_oversell_reports_and_keeps_quantity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    fs::write(&path, format!("{HEADER}Red Shirt,5,10.0,S,1\n")).unwrap();
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));

    let form = QuantityForm {
        name: "Red Shirt".into(),
        size: "S".into(),
        operation: "Sell Copies".into(),
        quantity: "6".into(),
    };
    let err = session.submit_quantity(&form).unwrap_err();
    assert!(matches!(err, StockError::InsufficientStock { requested: 6, available: 5 }));

    let key = StockKey::new("Red Shirt", Size::S);
    assert_eq!(session.client().get(&key).unwrap().unwrap().quantity, 5);
}

#[test]
fn test_round_trip_preserves_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    let original = format!(
        "{HEADER}Red Shirt,5,10.0,S,1\nBlue Jeans,0,25.5,M,0\n\"Hat, wool\",2,7.25,XL,1\nRed Shirt,1,10.0,L,1\n"
    );
    fs::write(&path, &original).unwrap();

    let ledger = stock::open(&path);
    let records = ledger.load().unwrap();
    assert_eq!(records.len(), 4);
    ledger.save(&records).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_missing_file_reads_are_unavailable_but_add_creates_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    let session = StockSession::open(StockConfig::default().with_ledger_path(&path));

    assert!(session.view_available().unwrap_err().is_unavailable());
    assert!(session.client().item_names().unwrap_err().is_unavailable());

    let submission = session
        .submit_add(&add_form("Green Hat", "M", "4.5", "2"), &mut |_: &str| false)
        .unwrap();
    let notice = submission.notice.unwrap();
    assert_eq!(notice.to_string(), format!("Stock file not found: {}", path.display()));
    assert!(path.exists());
    assert_eq!(session.client().item_names().unwrap(), vec!["Green Hat"]);
}
