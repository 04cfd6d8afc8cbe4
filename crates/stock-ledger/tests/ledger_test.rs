use std::fs;
use stock_ledger::{CsvTable, Ledger, LedgerEntity, LedgerError};
use tempfile::tempdir;

/// A shelf with a label and a count of boxes.
#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    label: String,
    boxes: u32,
}

#[derive(Debug)]
struct ShelfCreate {
    label: String,
    boxes: u32,
}

#[derive(Debug)]
struct ShelfRelabel {
    label: String,
}

#[derive(Debug)]
enum ShelfAction {
    Store(u32),
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("blank label")]
    BlankLabel,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl LedgerEntity for Shelf {
    type Key = String;
    type Create = ShelfCreate;
    type Update = ShelfRelabel;
    type Action = ShelfAction;
    type ActionResult = u32;
    type Error = ShelfError;

    const HEADER: &'static [&'static str] = &["label", "boxes"];

    fn key(&self) -> String {
        self.label.clone()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.label.clone(), self.boxes.to_string()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        match fields {
            [label, boxes] => Ok(Self {
                label: label.to_string(),
                boxes: boxes.parse().map_err(|_| format!("bad box count {boxes:?}"))?,
            }),
            _ => Err(format!("expected 2 fields, found {}", fields.len())),
        }
    }

    fn from_create_params(params: ShelfCreate) -> Result<Self, ShelfError> {
        if params.label.trim().is_empty() {
            return Err(ShelfError::BlankLabel);
        }
        Ok(Self {
            label: params.label,
            boxes: params.boxes,
        })
    }

    fn on_update(&mut self, update: ShelfRelabel) -> Result<(), ShelfError> {
        self.label = update.label;
        Ok(())
    }

    fn handle_action(&mut self, action: ShelfAction) -> Result<u32, ShelfError> {
        match action {
            ShelfAction::Store(n) => {
                self.boxes += n;
                Ok(self.boxes)
            }
        }
    }
}

fn shelf(label: &str, boxes: u32) -> ShelfCreate {
    ShelfCreate {
        label: label.into(),
        boxes,
    }
}

#[test]
fn test_first_create_brings_file_into_existence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelves.csv");
    let ledger: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));

    assert!(ledger.load().unwrap_err().is_unavailable());

    ledger.create(shelf("A1", 2)).unwrap();
    ledger.create(shelf("B7", 0)).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "label,boxes\nA1,2\nB7,0\n");
}

#[test]
fn test_changes_persist_across_ledgers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelves.csv");

    let ledger: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));
    ledger.create(shelf("A1", 2)).unwrap();
    assert_eq!(ledger.act(&"A1".to_string(), ShelfAction::Store(3)).unwrap(), 5);

    let reopened: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));
    let stored = reopened.get(&"A1".to_string()).unwrap().unwrap();
    assert_eq!(stored.boxes, 5);

    reopened
        .update(&"A1".to_string(), ShelfRelabel { label: "A2".into() })
        .unwrap();
    assert!(ledger.get(&"A1".to_string()).unwrap().is_none());
    assert!(ledger.get(&"A2".to_string()).unwrap().is_some());
}

#[test]
fn test_save_of_load_is_identity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelves.csv");
    let original = "label,boxes\nA1,2\n\"Back, left\",0\nC3,9\n";
    fs::write(&path, original).unwrap();

    let ledger: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));
    let records = ledger.load().unwrap();
    assert_eq!(records[1].label, "Back, left");

    ledger.save(&records).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_duplicate_key_leaves_file_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelves.csv");
    let ledger: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));
    ledger.create(shelf("A1", 2)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = ledger.create(shelf("A1", 7)).unwrap_err();
    assert!(matches!(err, ShelfError::Ledger(LedgerError::DuplicateKey(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_malformed_row_reports_its_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelves.csv");
    fs::write(&path, "label,boxes\nA1,2\nB7,lots\n").unwrap();

    let ledger: Ledger<Shelf> = Ledger::new(CsvTable::new(&path));
    match ledger.load().unwrap_err() {
        LedgerError::MalformedRow { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("lots"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Mutations refuse to rewrite a file they cannot read.
    assert!(ledger.act(&"A1".to_string(), ShelfAction::Store(1)).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "label,boxes\nA1,2\nB7,lots\n");
}
