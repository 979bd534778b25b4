//! Entry ID encoding/decoding.
//!
//! Both forms share a prefix: ID type byte, three reserved bytes, provider
//! UID, reserved R4 and display type. Ephemeral IDs end with a MID; permanent
//! IDs end with a NUL-terminated ASCII distinguished name.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::entry_id::{ENTRY_ID_R4, EPHEMERAL_ID_TYPE, PERMANENT_ID_TYPE};
use crate::model::{DisplayType, EntryId, EphemeralEntryId, PermanentEntryId, PERMANENT_ENTRY_ID_GUID};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an entry ID, dispatching on its first byte.
pub fn decode_entry_id(data: &[u8]) -> Result<EntryId, DecodeError> {
    let mut reader = Reader::new(data);
    let id_type = reader.read_byte("entry_id.type")?;
    reader.read_bytes(3, "entry_id.reserved")?;
    match id_type {
        EPHEMERAL_ID_TYPE => {
            let provider_uid = reader.read_flat_uid("entry_id.provider_uid")?;
            reader.read_u32("entry_id.r4")?;
            let display_type = decode_display_type(&mut reader)?;
            let mid = reader.read_u32("entry_id.mid")?;
            Ok(EntryId::Ephemeral(EphemeralEntryId {
                provider_uid,
                display_type,
                mid,
            }))
        }
        PERMANENT_ID_TYPE => {
            let provider_uid = reader.read_flat_uid("entry_id.provider_uid")?;
            if provider_uid != PERMANENT_ENTRY_ID_GUID {
                return Err(DecodeError::InvalidProviderUid);
            }
            reader.read_u32("entry_id.r4")?;
            let display_type = decode_display_type(&mut reader)?;
            let dn = reader.read_ansi_cstring("entry_id.distinguished_name")?;
            if !dn.is_ascii() {
                return Err(DecodeError::InvalidString {
                    context: "entry_id.distinguished_name",
                });
            }
            let distinguished_name = String::from_utf8_lossy(dn).into_owned();
            Ok(EntryId::Permanent(PermanentEntryId {
                display_type,
                distinguished_name,
            }))
        }
        value => Err(DecodeError::InvalidEntryIdType { value }),
    }
}

fn decode_display_type(reader: &mut Reader<'_>) -> Result<DisplayType, DecodeError> {
    let value = reader.read_u32("entry_id.display_type")?;
    DisplayType::from_u32(value).ok_or(DecodeError::InvalidDisplayType { value })
}

// =============================================================================
// ENCODING
// =============================================================================

pub fn encode_entry_id(id: &EntryId) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    writer.write_byte(id.id_type());
    writer.write_bytes(&[0, 0, 0]);
    match id {
        EntryId::Ephemeral(eph) => {
            writer.write_flat_uid(&eph.provider_uid);
            writer.write_u32(ENTRY_ID_R4);
            writer.write_u32(eph.display_type.code());
            writer.write_u32(eph.mid);
        }
        EntryId::Permanent(perm) => {
            if !perm.distinguished_name.is_ascii() {
                return Err(EncodeError::InvalidString {
                    context: "entry_id.distinguished_name",
                });
            }
            writer.write_flat_uid(&PERMANENT_ENTRY_ID_GUID);
            writer.write_u32(ENTRY_ID_R4);
            writer.write_u32(perm.display_type.code());
            writer.write_ansi_cstring(perm.distinguished_name.as_bytes(), "entry_id.distinguished_name")?;
        }
    }
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::EPHEMERAL_ENTRY_ID_LEN;
    use crate::model::FlatUid;

    #[test]
    fn test_ephemeral_layout() {
        let id = EntryId::Ephemeral(EphemeralEntryId {
            provider_uid: FlatUid([0x11; 16]),
            display_type: DisplayType::DistList,
            mid: 0x0001_0203,
        });
        let bytes = encode_entry_id(&id).unwrap();
        assert_eq!(bytes.len(), EPHEMERAL_ENTRY_ID_LEN);
        assert_eq!(&bytes[..4], &[0x87, 0, 0, 0]);
        assert_eq!(&bytes[20..24], &[1, 0, 0, 0]);
        assert_eq!(&bytes[24..28], &[1, 0, 0, 0]);
        assert_eq!(&bytes[28..32], &[0x03, 0x02, 0x01, 0x00]);
        assert_eq!(decode_entry_id(&bytes).unwrap(), id);
    }

    #[test]
    fn test_permanent_roundtrip() {
        let id = EntryId::Permanent(PermanentEntryId {
            display_type: DisplayType::MailUser,
            distinguished_name: "/o=Contoso/ou=Exchange/cn=Recipients/cn=alice".to_string(),
        });
        let bytes = encode_entry_id(&id).unwrap();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[4..20], PERMANENT_ENTRY_ID_GUID.as_bytes());
        assert_eq!(*bytes.last().unwrap(), 0);
        assert_eq!(decode_entry_id(&bytes).unwrap(), id);
    }

    #[test]
    fn test_invalid_type_byte() {
        assert_eq!(
            decode_entry_id(&[0x42, 0, 0, 0]),
            Err(DecodeError::InvalidEntryIdType { value: 0x42 })
        );
    }

    #[test]
    fn test_permanent_wrong_provider() {
        let mut bytes = encode_entry_id(&EntryId::Permanent(PermanentEntryId {
            display_type: DisplayType::Container,
            distinguished_name: "/o=x".to_string(),
        }))
        .unwrap();
        bytes[4] ^= 0xFF;
        assert_eq!(decode_entry_id(&bytes), Err(DecodeError::InvalidProviderUid));
    }

    #[test]
    fn test_invalid_display_type() {
        let mut bytes = encode_entry_id(&EntryId::Ephemeral(EphemeralEntryId {
            provider_uid: FlatUid::default(),
            display_type: DisplayType::MailUser,
            mid: 1,
        }))
        .unwrap();
        bytes[24] = 0x07;
        assert_eq!(
            decode_entry_id(&bytes),
            Err(DecodeError::InvalidDisplayType { value: 7 })
        );
    }

    #[test]
    fn test_non_ascii_dn_rejected() {
        let id = EntryId::Permanent(PermanentEntryId {
            display_type: DisplayType::MailUser,
            distinguished_name: "/o=Zoë".to_string(),
        });
        assert!(encode_entry_id(&id).is_err());
    }
}
