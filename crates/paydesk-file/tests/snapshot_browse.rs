//! Browsing records loaded from a snapshot directory.

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

use paydesk_core::{
    EntityKind, FilterCriteria, PageRequest, RawCriteria, Record, RecordSource, apply_in,
};
use paydesk_file::{FileSource, SnapshotMeta, SnapshotStore};

fn source_for(dir: &TempDir) -> FileSource {
    let url = url::Url::from_directory_path(dir.path()).unwrap();
    FileSource::from_url(url.as_str().parse().unwrap()).unwrap()
}

fn qr_payments() -> Vec<Record> {
    (1..=12)
        .map(|i| {
            let merchant = if i % 2 == 0 { "Noodle House" } else { "Coffee Corner" };
            let status = if i % 3 == 0 { "FAILED" } else { "PAID" };
            Record::new(json!({
                "id": format!("QR-{i:03}"),
                "merchantName": merchant,
                "status": status,
                "bankCode": "014",
                "amount": i * 50,
                "createdAt": format!("2024-04-{i:02}T12:00:00Z"),
            }))
            .unwrap()
        })
        .collect()
}

#[tokio::test]
async fn written_snapshot_browses_like_live_data() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.write(EntityKind::QrPayment, &qr_payments()).await.unwrap();

    let mut meta = SnapshotMeta::now("https://gateway.example.com/");
    meta.counts.insert(EntityKind::QrPayment.segment().to_string(), 12);
    store.write_meta(&meta).await.unwrap();

    let records = source_for(&dir)
        .fetch_all(EntityKind::QrPayment)
        .await
        .unwrap();
    assert_eq!(records.len(), 12);

    let raw: RawCriteria = serde_json::from_value(json!({
        "search": "noodle",
        "status": "paid",
        "bank": "all",
        "amountMin": "100"
    }))
    .unwrap();
    let criteria = FilterCriteria::try_from(raw).unwrap();
    let fields = EntityKind::QrPayment.field_map();

    // Even ids, not multiples of three, amount >= 100: 2, 4, 8, 10.
    let first = apply_in(&records, &criteria, PageRequest::new(1, 3).unwrap(), &fields, &Utc);
    assert_eq!(first.total, 4);
    assert_eq!(first.total_pages, 2);
    let ids: Vec<String> = first.items.iter().map(|r| r.text("id").unwrap()).collect();
    assert_eq!(ids, ["QR-010", "QR-008", "QR-004"]);

    let second = apply_in(&records, &criteria, PageRequest::new(2, 3).unwrap(), &fields, &Utc);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].text("id").as_deref(), Some("QR-002"));

    assert_eq!(store.read_meta().await.unwrap(), Some(meta));
}

#[tokio::test]
async fn empty_directory_yields_empty_page() {
    let dir = TempDir::new().unwrap();
    let records = source_for(&dir).fetch_all(EntityKind::Transfer).await.unwrap();

    let page = apply_in(
        &records,
        &FilterCriteria::default(),
        PageRequest::default(),
        &EntityKind::Transfer.field_map(),
        &Utc,
    );
    assert!(page.items.is_empty());
    assert_eq!((page.page, page.total_pages, page.total), (1, 1, 0));
}
