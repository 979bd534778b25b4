//! Benchmark for NSPI address-book row set encoding and decoding.
//!
//! Builds an address-book row set from a JSON list of entries (optionally
//! gzipped) or from synthetic entries, then times encode and decode.

use std::fs;
use std::io::Read;
use std::time::Instant;

use oxnspi::codec::{decode_address_book_row_set, encode_address_book_row_set, Reader, Writer};
use oxnspi::{
    encode_entry_id, tags, AddressBookRow, AddressBookRowSet, ColumnValue, DisplayType, EntryId,
    EphemeralEntryId, FlatUid, PropertyTag, PropertyType, TaggedValue,
};
use serde::Deserialize;
use uuid::Uuid;

const DEFAULT_SYNTHETIC: usize = 10_000;
const DECODE_ITERS: u32 = 20;

/// Error code for a property the object does not have.
const MAPI_E_NOT_FOUND: u32 = 0x8004_010F;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Entry {
    display_name: String,
    email: Option<String>,
    phonetic_name: Option<String>,
    #[serde(default)]
    display_type: u32,
    #[serde(default)]
    members: Vec<String>,
}

fn load_entries(path: &str) -> Vec<Entry> {
    let raw = fs::read(path).expect("Failed to read entries file");
    let json = if path.ends_with(".gz") {
        let mut decoder = flate2::read::GzDecoder::new(raw.as_slice());
        let mut decompressed = String::new();
        decoder
            .read_to_string(&mut decompressed)
            .expect("Failed to decompress");
        decompressed
    } else {
        String::from_utf8(raw).expect("Entries file is not UTF-8")
    };
    serde_json::from_str(&json).expect("Failed to parse JSON")
}

fn synthetic_entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let is_list = i % 17 == 0;
            Entry {
                display_name: format!("User {i:05}"),
                email: (i % 5 != 0).then(|| format!("user{i}@contoso.example")),
                phonetic_name: (i % 3 == 0).then(|| format!("ユーザー {i}")),
                display_type: if is_list { 1 } else { 0 },
                members: if is_list {
                    (1..=4).map(|m| format!("/o=Contoso/cn=Recipients/cn=user{}", i + m)).collect()
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}

// =============================================================================
// ROW SET CONSTRUCTION
// =============================================================================

fn columns() -> Vec<PropertyTag> {
    vec![
        tags::ENTRY_ID,
        tags::DISPLAY_NAME,
        tags::EMAIL_ADDRESS,
        tags::ADDRESS_BOOK_PHONETIC_DISPLAY_NAME,
        tags::DISPLAY_TYPE,
        tags::ADDRESS_BOOK_MEMBER,
        PropertyTag::new(tags::INSTANCE_KEY.id(), PropertyType::Unspecified),
    ]
}

fn build_row(entry: &Entry, mid: u32, provider: FlatUid) -> AddressBookRow {
    let display_type = DisplayType::from_u32(entry.display_type).unwrap_or(DisplayType::MailUser);
    let entry_id = encode_entry_id(&EntryId::Ephemeral(EphemeralEntryId {
        provider_uid: provider,
        display_type,
        mid,
    }))
    .expect("Failed to encode entry ID");

    let optional_string = |s: &Option<String>| match s {
        Some(s) => ColumnValue::Present(TaggedValue::String(s.clone())),
        None => ColumnValue::Absent,
    };
    let members = if entry.members.is_empty() {
        ColumnValue::Error(MAPI_E_NOT_FOUND)
    } else {
        ColumnValue::Present(TaggedValue::MultipleString8(
            entry.members.iter().map(|m| m.as_bytes().to_vec()).collect(),
        ))
    };

    AddressBookRow::new(vec![
        ColumnValue::Present(TaggedValue::Binary(entry_id)),
        ColumnValue::Present(TaggedValue::String8(entry.display_name.as_bytes().to_vec())),
        optional_string(&entry.email),
        optional_string(&entry.phonetic_name),
        ColumnValue::Present(TaggedValue::Integer32(display_type.code() as i32)),
        members,
        ColumnValue::Present(TaggedValue::Binary(mid.to_le_bytes().to_vec())),
    ])
}

fn main() {
    let arg = std::env::args().nth(1);
    let entries = match arg.as_deref() {
        None => synthetic_entries(DEFAULT_SYNTHETIC),
        Some(a) => match a.parse::<usize>() {
            Ok(n) => synthetic_entries(n),
            Err(_) => {
                println!("Loading entries from: {}", a);
                load_entries(a)
            }
        },
    };

    let provider = FlatUid::from_uuid(Uuid::new_v4());
    println!("Provider UID: {}", provider);

    let build_start = Instant::now();
    let row_set = AddressBookRowSet {
        columns: columns(),
        rows: entries
            .iter()
            .enumerate()
            .map(|(i, e)| build_row(e, 0x1000 + i as u32, provider))
            .collect(),
    };
    println!(
        "Built {} rows x {} columns in {:?}",
        row_set.rows.len(),
        row_set.columns.len(),
        build_start.elapsed()
    );
    let flagged = row_set.rows.iter().filter(|r| r.flag() == oxnspi::RowFlag::Flagged).count();
    println!("  - {} flagged rows, {} standard rows", flagged, row_set.rows.len() - flagged);

    // Encode
    let encode_start = Instant::now();
    let mut writer = Writer::with_capacity(row_set.rows.len() * 128);
    encode_address_book_row_set(&mut writer, &row_set).expect("Failed to encode row set");
    let encode_time = encode_start.elapsed();
    let encoded = writer.into_bytes();

    println!("\nEncoded: {} bytes in {:?}", encoded.len(), encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );

    // Warmup
    let decoded = decode_address_book_row_set(&mut Reader::new(&encoded)).expect("Failed to decode");
    assert_eq!(decoded, row_set, "row set did not survive the round trip");

    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let decoded = decode_address_book_row_set(&mut Reader::new(&encoded)).expect("Failed to decode");
        std::hint::black_box(decoded);
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!("\nDecoded: {:?} per iteration ({} iterations)", decode_time, DECODE_ITERS);
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );
}
