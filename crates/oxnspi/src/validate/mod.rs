//! Semantic validation for NSPI structures.
//!
//! Structural validation happens during decode. The checks here cover what a
//! well-formed buffer can still get wrong: values that disagree with their
//! tags or columns, restriction trees whose leaves disagree with their
//! embedded values, and scripts that never halt.

use crate::error::ValidationError;
use crate::model::{AddressBookRow, ColumnValue, Opcode, Operation, PropertyTag, PropertyType, PropertyValue, Restriction};

/// Validates a column-form row against its column list.
///
/// Checks the row length, that each present value fits its column type, and
/// the value-level constraints of [`crate::model::TaggedValue::validate`].
pub fn validate_address_book_row(row: &AddressBookRow, columns: &[PropertyTag]) -> Result<(), ValidationError> {
    if row.len() != columns.len() {
        return Err(ValidationError::RowLengthMismatch {
            expected: columns.len(),
            actual: row.len(),
        });
    }
    for (index, (column, cell)) in columns.iter().zip(&row.values).enumerate() {
        let ColumnValue::Present(value) = cell else {
            continue;
        };
        let actual = value.property_type();
        if column.type_code() != PropertyType::Unspecified.code() && column.type_code() != actual.code() {
            return Err(ValidationError::ColumnTypeMismatch {
                index,
                tag: *column,
                actual,
            });
        }
        if let Some(reason) = value.validate() {
            return Err(ValidationError::InvalidValue { tag: *column, reason });
        }
    }
    Ok(())
}

/// Validates that a value's tag describes it and the value is within limits.
pub fn validate_property_value(pv: &PropertyValue) -> Result<(), ValidationError> {
    if !pv.is_consistent() {
        return Err(ValidationError::TypeMismatch {
            tag: pv.tag,
            actual: pv.value.property_type(),
        });
    }
    if let Some(reason) = pv.value.validate() {
        return Err(ValidationError::InvalidValue { tag: pv.tag, reason });
    }
    Ok(())
}

/// Validates a restriction tree.
///
/// - depth must not exceed `max_depth`
/// - And/Or nodes must have children
/// - Content and Property leaves must name the same tag as their value
pub fn validate_restriction(restriction: &Restriction, max_depth: usize) -> Result<(), ValidationError> {
    if restriction.depth() > max_depth {
        return Err(ValidationError::RestrictionTooDeep { max: max_depth });
    }
    validate_node(restriction)
}

fn validate_node(restriction: &Restriction) -> Result<(), ValidationError> {
    match restriction {
        Restriction::And(children) | Restriction::Or(children) => {
            if children.is_empty() {
                return Err(ValidationError::EmptyRestriction {
                    kind: restriction.restriction_type().name(),
                });
            }
            children.iter().try_for_each(validate_node)
        }
        Restriction::Not(inner) => validate_node(inner),
        Restriction::Content { tag, value, .. } | Restriction::Property { tag, value, .. } => {
            if *tag != value.tag {
                return Err(ValidationError::RestrictionTagMismatch {
                    restriction: *tag,
                    value: value.tag,
                });
            }
            validate_property_value(value)
        }
        Restriction::Exist { .. } => Ok(()),
    }
}

/// Validates that a decoded script ends with Halt.
pub fn validate_script(ops: &[Operation]) -> Result<(), ValidationError> {
    match ops.last() {
        Some(op) if op.instruction == Opcode::Halt => Ok(()),
        _ => Err(ValidationError::ScriptNotHalted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_script;
    use crate::model::{RelOp, TaggedValue};

    #[test]
    fn test_row_validation() {
        let columns = [PropertyTag::from_raw(0x3001_001F), PropertyTag::from_raw(0x3900_0000)];
        let ok = AddressBookRow::new(vec![
            TaggedValue::String("Eve".into()).into(),
            TaggedValue::Integer32(0).into(),
        ]);
        assert!(validate_address_book_row(&ok, &columns).is_ok());

        let short = AddressBookRow::new(vec![ColumnValue::Absent]);
        assert_eq!(
            validate_address_book_row(&short, &columns),
            Err(ValidationError::RowLengthMismatch { expected: 2, actual: 1 })
        );

        let wrong = AddressBookRow::new(vec![TaggedValue::Integer32(1).into(), ColumnValue::Absent]);
        assert!(matches!(
            validate_address_book_row(&wrong, &columns),
            Err(ValidationError::ColumnTypeMismatch { index: 0, .. })
        ));

        let nul = AddressBookRow::new(vec![TaggedValue::String("a\0".into()).into(), ColumnValue::Absent]);
        assert!(matches!(
            validate_address_book_row(&nul, &columns),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_property_value_validation() {
        let pv = PropertyValue {
            tag: PropertyTag::from_raw(0x0FFE_0002),
            value: TaggedValue::Integer32(6),
        };
        assert!(matches!(
            validate_property_value(&pv),
            Err(ValidationError::TypeMismatch { .. })
        ));
        assert!(validate_property_value(&PropertyValue::new(0x0FFE, TaggedValue::Integer32(6))).is_ok());
    }

    #[test]
    fn test_restriction_validation() {
        let name = PropertyValue::new(0x3001, TaggedValue::String("x".into()));
        let good = Restriction::Or(vec![Restriction::property(RelOp::Equal, name.clone())]);
        assert!(validate_restriction(&good, 8).is_ok());
        assert_eq!(
            validate_restriction(&good, 1),
            Err(ValidationError::RestrictionTooDeep { max: 1 })
        );

        let mismatched = Restriction::Property {
            relop: RelOp::Equal,
            tag: PropertyTag::from_raw(0x3002_001F),
            value: name,
        };
        assert!(matches!(
            validate_restriction(&mismatched, 8),
            Err(ValidationError::RestrictionTagMismatch { .. })
        ));

        assert_eq!(
            validate_restriction(&Restriction::And(vec![]), 8),
            Err(ValidationError::EmptyRestriction { kind: "And" })
        );
    }

    #[test]
    fn test_script_validation() {
        assert!(validate_script(&decode_script(&[2, 0x3001_001F, 0])).is_ok());
        assert_eq!(
            validate_script(&decode_script(&[2, 0x3001_001F])),
            Err(ValidationError::ScriptNotHalted)
        );
        assert_eq!(validate_script(&[]), Err(ValidationError::ScriptNotHalted));
    }
}
