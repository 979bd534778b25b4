//! Binary encoding and decoding for the NSPI wire format.
//!
//! All integers are little-endian. Decoders take a `Reader` positioned at the
//! start of the structure and leave it just past the end; encoders append to
//! a `Writer`.

pub mod entry_id;
pub mod primitives;
pub mod restriction;
pub mod row;
pub mod script;
pub mod stat;
pub mod template;
pub mod value;

pub use entry_id::{decode_entry_id, encode_entry_id};
pub use primitives::{Reader, Writer};
pub use restriction::{decode_restriction, encode_restriction};
pub use row::{
    decode_address_book_row, decode_address_book_row_set, decode_property_row,
    decode_property_row_for_columns, decode_property_row_set, decode_property_tag_array,
    decode_value_for_column, encode_address_book_row, encode_address_book_row_set,
    encode_property_row, encode_property_row_set, encode_property_tag_array,
};
pub use script::{decode_script, encode_script, encode_script_blob, parse_script_blob, parse_script_words};
pub use stat::{decode_stat, encode_stat};
pub use template::{decode_template_rows, encode_template_rows};
pub use value::{
    decode_property_value, decode_typed_value, decode_value, decode_value_for_code,
    encode_property_value, encode_typed_value, encode_value,
};
